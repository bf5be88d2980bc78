//! jmxtrans JSON documents
//!
//! One `HostSetConfig` is produced per host set and written to
//! `<setname>.json`:
//!
//! ```text
//! {"servers": [{"host": ..., "port": ..., "queries": [...], "numQueryThreads": N, ...}]}
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::catalog::QuerySnippet;
use crate::config::Port;
use crate::error::GenerateError;

/// Indentation used for written documents
const JSON_INDENT: &[u8] = b" ";

/// One monitored JVM
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerEntry {
    pub host: String,

    pub port: Port,

    pub queries: Vec<QuerySnippet>,

    /// Always equal to `queries.len()`
    #[serde(rename = "numQueryThreads")]
    pub num_query_threads: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Complete document for one host set
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HostSetConfig {
    pub servers: Vec<ServerEntry>,
}

impl HostSetConfig {
    /// Render as indented JSON
    pub fn to_json(&self) -> Result<String, GenerateError> {
        let mut buffer = Vec::with_capacity(self.servers.len() * 512);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(JSON_INDENT);
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);

        self.serialize(&mut serializer)
            .map_err(GenerateError::Serialize)?;

        // serde_json only ever emits valid UTF-8
        String::from_utf8(buffer).map_err(|e| {
            GenerateError::Serialize(serde::ser::Error::custom(e.to_string()))
        })
    }

    /// Write the document to `path`, replacing any existing file
    pub fn write_to(&self, path: &Path) -> Result<(), GenerateError> {
        let json = self.to_json()?;

        std::fs::write(path, json).map_err(|source| GenerateError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}
