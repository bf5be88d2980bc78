//! Query catalog
//!
//! Indexes the document's named query definitions and turns a query name
//! into the fully materialized query object jmxtrans expects, output
//! writers included.
//!
//! # Example
//!
//! ```ignore
//! use yaml2jmxtrans::catalog::{QueryCatalog, WriterMode};
//!
//! let catalog = QueryCatalog::new(document.queries, WriterMode::Configured(writers));
//! let snippet = catalog.create_query_snippet("heap", "servers")?;
//! ```

pub mod writer;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::QueryDef;
use crate::error::GenerateError;

pub use writer::{OutputWriter, TypeNames, WriterMode, DEFAULT_TYPE_NAME, GRAPHITE_WRITER_CLASS};

/// One query object inside a server entry
///
/// Unset attributes are emitted as `null`, except `attr`: leaving it out
/// makes jmxtrans poll every attribute of the MBean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySnippet {
    /// MBean object name pattern
    pub obj: Option<String>,

    #[serde(rename = "resultAlias")]
    pub result_alias: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attr: Option<Vec<String>>,

    #[serde(rename = "allowDottedKeys")]
    pub allow_dotted_keys: Option<bool>,

    #[serde(rename = "useObjDomainAsKey")]
    pub use_obj_domain_as_key: Option<bool>,

    #[serde(rename = "outputWriters")]
    pub output_writers: Vec<OutputWriter>,
}

/// Named query definitions plus the output writers attached to them
#[derive(Debug, Clone)]
pub struct QueryCatalog {
    queries: HashMap<String, QueryDef>,
    writers: WriterMode,
}

impl QueryCatalog {
    /// Index `queries` by name; a repeated name replaces the earlier one
    pub fn new(queries: impl IntoIterator<Item = QueryDef>, writers: WriterMode) -> Self {
        let mut index = HashMap::new();

        for query in queries {
            if index.contains_key(&query.name) {
                tracing::warn!(query = %query.name, "Duplicate query name, keeping the last one");
            }
            index.insert(query.name.clone(), query);
        }

        tracing::debug!(
            queries = index.len(),
            legacy_writer = writers.is_legacy(),
            "Query catalog built"
        );

        Self {
            queries: index,
            writers,
        }
    }

    /// Number of distinct query names
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    /// Build the query object for `query_name`
    ///
    /// # Errors
    /// Returns `GenerateError::UnknownQuery` if the name was never defined
    pub fn create_query_snippet(
        &self,
        query_name: &str,
        root_prefix: &str,
    ) -> Result<QuerySnippet, GenerateError> {
        let query = self
            .queries
            .get(query_name)
            .ok_or_else(|| GenerateError::UnknownQuery(query_name.to_string()))?;

        let default_type_name = TypeNames::default();
        let type_names = query.type_name.as_ref().unwrap_or(&default_type_name);

        Ok(QuerySnippet {
            obj: query.obj.clone(),
            result_alias: query.result_alias.clone(),
            attr: query.attr.clone(),
            allow_dotted_keys: query.allow_dotted_keys,
            use_obj_domain_as_key: query.use_obj_domain_as_key,
            output_writers: self.create_output_writer_config(type_names, root_prefix),
        })
    }

    /// Output writers for a query with the given type names
    pub fn create_output_writer_config(
        &self,
        type_names: &TypeNames,
        root_prefix: &str,
    ) -> Vec<OutputWriter> {
        self.writers.resolve(type_names, root_prefix)
    }
}
