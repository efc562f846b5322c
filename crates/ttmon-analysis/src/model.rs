//! Trait seam for the text-generation collaborator.

use async_trait::async_trait;

use crate::error::AnalysisError;

/// A video attachment for a generation request.
#[derive(Debug, Clone)]
pub struct VideoPart {
    pub mime_type: &'static str,
    pub data: Vec<u8>,
}

impl VideoPart {
    #[must_use]
    pub fn mp4(data: Vec<u8>) -> Self {
        Self {
            mime_type: "video/mp4",
            data,
        }
    }
}

/// The text-generation collaborator: a formatted prompt (plus optional video
/// bytes) in, one raw free-text response out. The pipeline owns the prompts
/// and the parsing; implementations own the transport.
#[async_trait]
pub trait AnalysisModel: Send + Sync {
    /// Generate a response for `prompt`, attaching `video` inline when given.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError`] on transport failure, API-level errors, or
    /// an empty candidate list. Callers treat any error as a per-item skip.
    async fn generate(
        &self,
        prompt: &str,
        video: Option<&VideoPart>,
    ) -> Result<String, AnalysisError>;
}
