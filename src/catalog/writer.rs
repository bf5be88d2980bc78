//! Output writer configuration
//!
//! Every query snippet carries an `outputWriters` array. The writers either
//! come from the document's `outputWriters` list, or, for documents written
//! against the older schema, a single Graphite writer is synthesized from the
//! top-level `graphite_host`/`graphite_port` fields. Which of the two applies
//! is decided once, when the document is loaded.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::Port;

/// Writer class used when the document only carries `graphite_*` settings
pub const GRAPHITE_WRITER_CLASS: &str = "com.googlecode.jmxtrans.model.output.GraphiteWriter";

/// Type name applied when a query does not set `typeName`
pub const DEFAULT_TYPE_NAME: &str = "name";

/// `typeName` as written in the document: a single name or a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeNames {
    /// `typeName: name`
    One(String),
    /// `typeName: [name, type]`
    Many(Vec<String>),
}

impl TypeNames {
    /// Normalize into the list form the writers expect
    pub fn to_list(&self) -> Vec<String> {
        match self {
            TypeNames::One(name) => vec![name.clone()],
            TypeNames::Many(names) => names.clone(),
        }
    }
}

impl Default for TypeNames {
    fn default() -> Self {
        TypeNames::One(DEFAULT_TYPE_NAME.to_string())
    }
}

/// A single output writer entry
///
/// Used both for the definitions read from the document and for the
/// resolved copies attached to each query. `settings` is kept as an ordered
/// JSON mapping since its keys depend on the writer class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputWriter {
    /// Fully qualified writer class
    #[serde(rename = "@class")]
    pub class: Option<String>,

    /// Writer specific settings
    pub settings: Option<Map<String, Value>>,
}

/// How output writers are produced for this document
#[derive(Debug, Clone, PartialEq)]
pub enum WriterMode {
    /// Older schema: one Graphite writer built from global host/port
    Legacy { host: String, port: Port },
    /// Writers listed explicitly under `outputWriters`
    Configured(Vec<OutputWriter>),
}

impl WriterMode {
    /// Produce the `outputWriters` array for one query
    ///
    /// In legacy mode the synthesized Graphite writer carries `rootPrefix`.
    /// Configured writers are copied and only get their `typeNames`
    /// overwritten; `root_prefix` is not injected into them.
    pub fn resolve(&self, type_names: &TypeNames, root_prefix: &str) -> Vec<OutputWriter> {
        let type_names = type_names.to_list();

        match self {
            WriterMode::Legacy { host, port } => {
                let mut settings = Map::new();
                settings.insert("port".to_string(), port.to_json());
                settings.insert("host".to_string(), Value::String(host.clone()));
                settings.insert(
                    "rootPrefix".to_string(),
                    Value::String(root_prefix.to_string()),
                );
                settings.insert("typeNames".to_string(), string_array(&type_names));

                vec![OutputWriter {
                    class: Some(GRAPHITE_WRITER_CLASS.to_string()),
                    settings: Some(settings),
                }]
            }
            WriterMode::Configured(writers) => writers
                .iter()
                .map(|writer| {
                    let mut copy = writer.clone();
                    copy.settings
                        .get_or_insert_with(Map::new)
                        .insert("typeNames".to_string(), string_array(&type_names));
                    copy
                })
                .collect(),
        }
    }

    /// Whether the writers are synthesized from `graphite_*` fields
    pub fn is_legacy(&self) -> bool {
        matches!(self, WriterMode::Legacy { .. })
    }
}

fn string_array(values: &[String]) -> Value {
    Value::Array(values.iter().cloned().map(Value::String).collect())
}
