//! Input document for yaml2jmxtrans
//!
//! Handles loading and validating the YAML description of queries, output
//! writers and host sets.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::catalog::{OutputWriter, TypeNames, WriterMode};

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error reading the input file
    #[error("Failed to read input file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error parsing the input file
    #[error("Failed to parse input file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Document validation error
    #[error("Invalid input document: {0}")]
    ValidationError(String),
}

/// A JMX or Graphite port
///
/// Numbers written in the document stay numbers, while a port taken from a
/// `host:port` specifier is kept as the literal text after the colon.
/// Numbers are passed through unchecked; jmxtrans reports bad ports itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Port {
    Number(u64),
    Text(String),
}

impl Port {
    pub fn to_json(&self) -> Value {
        match self {
            Port::Number(n) => Value::from(*n),
            Port::Text(s) => Value::String(s.clone()),
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Port::Number(n) => write!(f, "{}", n),
            Port::Text(s) => f.write_str(s),
        }
    }
}

impl From<u16> for Port {
    fn from(port: u16) -> Self {
        Port::Number(u64::from(port))
    }
}

/// Top-level input document
///
/// # Example (YAML)
///
/// ```yaml
/// query_port: 9004
/// global_host_alias: "${hostshortname}"
/// graphite_host: graphite.example.com
/// graphite_port: 2003
/// queries:
///   - name: heap
///     obj: "java.lang:type=Memory"
///     resultAlias: jvm.memory
///     attr: [HeapMemoryUsage]
/// sets:
///   - setname: prod
///     query_names: [heap]
///     hosts: ["app1.example.com", "app2.example.com:9999;app2/prod"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Default JMX port for hosts that do not name one
    pub query_port: Port,

    /// Alias (and optional `/rootPrefix`) for hosts without a `;` segment
    pub global_host_alias: String,

    /// Explicit output writers; absent or empty selects the Graphite fallback
    #[serde(rename = "outputWriters", default)]
    pub output_writers: Option<Vec<OutputWriter>>,

    #[serde(default)]
    pub graphite_host: Option<String>,

    #[serde(default)]
    pub graphite_port: Option<Port>,

    pub queries: Vec<QueryDef>,

    pub sets: Vec<HostSetDef>,
}

/// Named MBean query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryDef {
    pub name: String,

    /// MBean object name pattern
    #[serde(default)]
    pub obj: Option<String>,

    #[serde(rename = "resultAlias", default)]
    pub result_alias: Option<String>,

    /// Attributes to read; absent means all of them
    #[serde(default)]
    pub attr: Option<Vec<String>>,

    #[serde(rename = "typeName", default)]
    pub type_name: Option<TypeNames>,

    #[serde(rename = "allowDottedKeys", default)]
    pub allow_dotted_keys: Option<bool>,

    #[serde(rename = "useObjDomainAsKey", default)]
    pub use_obj_domain_as_key: Option<bool>,
}

/// Named group of hosts sharing queries and credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostSetDef {
    /// Set name, also the output file stem
    pub setname: String,

    pub query_names: Vec<String>,

    /// Host specifiers: `host[:port][;alias[/rootPrefix]]`
    pub hosts: Vec<String>,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    /// JMX service URL template
    #[serde(rename = "urlTemplate", default)]
    pub url_template: Option<String>,
}

impl Document {
    /// Load the document from a YAML file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed or validated
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        let document = Self::parse(&contents)?;

        tracing::info!(
            path = %path.display(),
            queries = document.queries.len(),
            sets = document.sets.len(),
            "Input document loaded"
        );

        Ok(document)
    }

    /// Parse and validate a YAML document held in memory
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let document: Document = serde_yaml::from_str(contents)?;
        document.validate()?;
        Ok(document)
    }

    /// Decide how output writers are produced
    ///
    /// An absent or empty `outputWriters` list falls back to a single
    /// Graphite writer, which needs both `graphite_host` and `graphite_port`.
    pub fn writer_mode(&self) -> Result<WriterMode, ConfigError> {
        match &self.output_writers {
            Some(writers) if !writers.is_empty() => Ok(WriterMode::Configured(writers.clone())),
            _ => match (&self.graphite_host, &self.graphite_port) {
                (Some(host), Some(port)) => Ok(WriterMode::Legacy {
                    host: host.clone(),
                    port: port.clone(),
                }),
                _ => Err(ConfigError::ValidationError(
                    "graphite_host and graphite_port are required when no outputWriters are configured"
                        .to_string(),
                )),
            },
        }
    }

    /// Validate the document
    fn validate(&self) -> Result<(), ConfigError> {
        if let WriterMode::Configured(writers) = self.writer_mode()? {
            for (index, writer) in writers.iter().enumerate() {
                if writer.settings.is_none() {
                    tracing::warn!(
                        index,
                        class = writer.class.as_deref().unwrap_or("<none>"),
                        "Output writer has no settings; only typeNames will be set"
                    );
                }
            }
        }

        for (index, query) in self.queries.iter().enumerate() {
            if query.name.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "Query at index {} has an empty name",
                    index
                )));
            }
        }

        for (index, set) in self.sets.iter().enumerate() {
            if set.setname.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "Host set at index {} has an empty setname",
                    index
                )));
            }

            if set.setname.contains(['/', '\\']) || set.setname == "." || set.setname == ".." {
                return Err(ConfigError::ValidationError(format!(
                    "Host set name '{}' cannot be used as a file name",
                    set.setname
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEGACY: &str = r#"
query_port: 9004
global_host_alias: "${hostshortname}"
graphite_host: graphite.example.com
graphite_port: 2003
queries:
  - name: heap
    obj: "java.lang:type=Memory"
    resultAlias: jvm.memory
    attr: [HeapMemoryUsage, NonHeapMemoryUsage]
  - name: gc
    obj: "java.lang:type=GarbageCollector,name=*"
    typeName: [name]
    allowDottedKeys: true
sets:
  - setname: prod
    query_names: [heap, gc]
    hosts: ["app1.example.com", "app2.example.com:9999;app2/prod"]
    username: monitor
    password: secret
"#;

    #[test]
    fn test_parse_legacy_document() {
        let document = Document::parse(LEGACY).unwrap();
        assert_eq!(document.query_port, Port::Number(9004));
        assert_eq!(document.queries.len(), 2);
        assert_eq!(document.queries[1].allow_dotted_keys, Some(true));
        assert_eq!(
            document.queries[1].type_name,
            Some(TypeNames::Many(vec!["name".to_string()]))
        );
        assert!(document.queries[1].attr.is_none());
        assert_eq!(document.sets[0].username.as_deref(), Some("monitor"));
        assert!(document.sets[0].url_template.is_none());
        assert!(document.writer_mode().unwrap().is_legacy());
    }

    #[test]
    fn test_configured_writers() {
        let yaml = r#"
query_port: 9004
global_host_alias: servers
outputWriters:
  - "@class": com.googlecode.jmxtrans.model.output.StatsDWriter
    settings:
      host: statsd
      port: 8125
queries: []
sets: []
"#;
        let document = Document::parse(yaml).unwrap();
        match document.writer_mode().unwrap() {
            WriterMode::Configured(writers) => {
                assert_eq!(writers.len(), 1);
                assert_eq!(
                    writers[0].class.as_deref(),
                    Some("com.googlecode.jmxtrans.model.output.StatsDWriter")
                );
            }
            other => panic!("unexpected writer mode: {other:?}"),
        }
    }

    #[test]
    fn test_legacy_requires_graphite_fields() {
        let yaml = r#"
query_port: 9004
global_host_alias: servers
graphite_host: graphite
queries: []
sets: []
"#;
        assert!(matches!(
            Document::parse(yaml),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_empty_writer_list_falls_back_to_legacy() {
        let yaml = r#"
query_port: 9004
global_host_alias: servers
outputWriters: []
graphite_host: graphite
graphite_port: 2003
queries: []
sets: []
"#;
        assert!(Document::parse(yaml).unwrap().writer_mode().unwrap().is_legacy());
    }

    #[test]
    fn test_missing_required_field() {
        let yaml = r#"
query_port: 9004
graphite_host: graphite
graphite_port: 2003
queries: []
sets: []
"#;
        assert!(matches!(Document::parse(yaml), Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_setname_must_be_a_file_stem() {
        let yaml = r#"
query_port: 9004
global_host_alias: servers
graphite_host: graphite
graphite_port: 2003
queries: []
sets:
  - setname: "../escape"
    query_names: []
    hosts: []
"#;
        assert!(matches!(
            Document::parse(yaml),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_port_outside_u16_passes_through() {
        let yaml = r#"
query_port: 70000
global_host_alias: servers
graphite_host: graphite
graphite_port: 2003
queries: []
sets: []
"#;
        let document = Document::parse(yaml).unwrap();
        assert_eq!(document.query_port, Port::Number(70000));
        assert_eq!(document.query_port.to_json(), serde_json::json!(70000));
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let err = Document::load("/nonexistent/jmx.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
        assert!(err.to_string().contains("/nonexistent/jmx.yaml"));
    }

    #[test]
    fn test_port_display() {
        assert_eq!(Port::Number(9004).to_string(), "9004");
        assert_eq!(Port::Text("9999".to_string()).to_string(), "9999");
        assert_eq!(Port::from(1099).to_json(), serde_json::json!(1099));
    }
}
