//! Lark Base (Bitable) wire types.
//!
//! Every response wraps its payload in a `{code, msg, data}` envelope;
//! `code != 0` is an API-level error even on HTTP 200. The token endpoint is
//! the one exception: it returns its fields at the top level.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Response from `auth/v3/tenant_access_token/internal`.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub tenant_access_token: Option<String>,
    /// Token lifetime in seconds.
    #[serde(default)]
    pub expire: Option<u64>,
}

/// Standard `{code, msg, data}` envelope around every Bitable payload.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub data: Option<T>,
}

/// Payload of the table-listing endpoint.
#[derive(Debug, Deserialize)]
pub struct TablesData {
    #[serde(default)]
    pub items: Vec<TableInfo>,
}

#[derive(Debug, Deserialize)]
pub struct TableInfo {
    pub table_id: String,
    pub name: String,
}

/// Payload of the record-listing endpoint.
#[derive(Debug, Deserialize)]
pub struct RecordsData {
    #[serde(default)]
    pub items: Vec<Record>,
}

/// One Bitable record. Field values are kept as raw JSON: their shape
/// depends on the column type (text segments, select options, link objects),
/// and `decode` handles each observed shape.
#[derive(Debug, Deserialize)]
pub struct Record {
    pub record_id: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

/// Payload of record create/update endpoints. Only the record id is used.
#[derive(Debug, Deserialize)]
pub struct RecordData {
    pub record: Record,
}
