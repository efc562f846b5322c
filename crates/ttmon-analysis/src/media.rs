//! Optional media enrichment: video bytes and subtitle text.
//!
//! Every failure here is non-fatal by contract: callers fall back to
//! text-only analysis. No retries; the content is re-scraped on the next
//! run anyway.

use std::time::Duration;

use crate::error::AnalysisError;

pub struct MediaFetcher {
    client: reqwest::Client,
}

impl MediaFetcher {
    /// # Errors
    ///
    /// Returns [`AnalysisError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64) -> Result<Self, AnalysisError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("ttmon/0.1 (tiktok-monitoring)")
            .build()?;
        Ok(Self { client })
    }

    /// Download video bytes for inline model upload.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Media`] on any transport or status failure;
    /// the caller degrades to text-only analysis.
    pub async fn fetch_video(&self, url: &str) -> Result<Vec<u8>, AnalysisError> {
        let response = self.get(url).await?;
        let bytes = response.bytes().await.map_err(|e| AnalysisError::Media {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(bytes.to_vec())
    }

    /// Download a subtitle file and reduce it to plain spoken text.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Media`] on any transport or status failure;
    /// the caller proceeds with empty subtitles.
    pub async fn fetch_subtitle_text(&self, url: &str) -> Result<String, AnalysisError> {
        let response = self.get(url).await?;
        let raw = response.text().await.map_err(|e| AnalysisError::Media {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(extract_subtitle_text(&raw))
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, AnalysisError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AnalysisError::Media {
                url: url.to_owned(),
                reason: e.to_string(),
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::Media {
                url: url.to_owned(),
                reason: format!("HTTP status {status}"),
            });
        }
        Ok(response)
    }
}

/// Strip SRT/VTT structure down to the spoken text: drops cue indices,
/// `-->` timecode lines, and blank lines, then joins what remains with
/// spaces.
#[must_use]
pub fn extract_subtitle_text(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .filter(|line| {
            !line.is_empty() && !line.contains("-->") && !line.chars().all(|c| c.is_ascii_digit())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn srt_reduces_to_spoken_text() {
        let srt = "1\n00:00:00,000 --> 00:00:02,500\nWelcome back everyone\n\n2\n00:00:02,500 --> 00:00:05,000\ntoday we talk about books\n";
        assert_eq!(
            extract_subtitle_text(srt),
            "Welcome back everyone today we talk about books"
        );
    }

    #[test]
    fn vtt_header_and_timecodes_are_dropped() {
        let vtt = "WEBVTT\n\n00:00.000 --> 00:02.000\nhello\n\n00:02.000 --> 00:04.000\nworld\n";
        assert_eq!(extract_subtitle_text(vtt), "WEBVTT hello world");
    }

    #[test]
    fn empty_input_yields_empty_string() {
        assert_eq!(extract_subtitle_text(""), "");
    }
}
