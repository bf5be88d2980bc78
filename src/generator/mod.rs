//! jmxtrans configuration generator
//!
//! Ties the query catalog and host set registry together: every host set is
//! expanded into one `servers` document, one entry per host specifier and
//! one query object per query name.
//!
//! # Example
//!
//! ```ignore
//! use yaml2jmxtrans::generator::Generator;
//!
//! let generator = Generator::load("jmx.yaml")?;
//! let written = generator.write_all(std::path::Path::new("."))?;
//! ```

pub mod output;
pub mod template;

use std::path::{Path, PathBuf};

use crate::catalog::QueryCatalog;
use crate::config::{ConfigError, Document, Port};
use crate::error::{AppResult, GenerateError};
use crate::hosts::{HostSet, HostSetRegistry, HostSpec};

pub use output::{HostSetConfig, ServerEntry};
pub use template::{render, TemplateVars};

/// Expands host sets into jmxtrans documents
#[derive(Debug, Clone)]
pub struct Generator {
    catalog: QueryCatalog,
    registry: HostSetRegistry,
    query_port: Port,
    global_host_alias: String,
}

impl Generator {
    pub fn new(
        catalog: QueryCatalog,
        registry: HostSetRegistry,
        query_port: Port,
        global_host_alias: impl Into<String>,
    ) -> Self {
        Self {
            catalog,
            registry,
            query_port,
            global_host_alias: global_host_alias.into(),
        }
    }

    /// Build the catalog and registry from a loaded document
    pub fn from_document(document: Document) -> Result<Self, ConfigError> {
        let writers = document.writer_mode()?;

        Ok(Self::new(
            QueryCatalog::new(document.queries, writers),
            HostSetRegistry::new(document.sets),
            document.query_port,
            document.global_host_alias,
        ))
    }

    /// Load, validate and index the YAML document at `path`
    ///
    /// # Errors
    /// Returns `AppError::Config` if the file cannot be read, parsed or
    /// validated
    pub fn load<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let document = Document::load(path)?;
        Ok(Self::from_document(document)?)
    }

    pub fn catalog(&self) -> &QueryCatalog {
        &self.catalog
    }

    pub fn registry(&self) -> &HostSetRegistry {
        &self.registry
    }

    /// Resolve a single host of a set into a server entry
    ///
    /// `spec.alias` is treated as a template; an empty alias or URL
    /// template leaves the corresponding field out.
    pub fn create_host_entry(
        &self,
        spec: &HostSpec,
        set: &HostSet,
        set_name: &str,
    ) -> Result<ServerEntry, GenerateError> {
        let queries = set
            .query_names
            .iter()
            .map(|name| self.catalog.create_query_snippet(name, &spec.root_prefix))
            .collect::<Result<Vec<_>, _>>()?;

        let port = spec.port.to_string();
        let vars = TemplateVars {
            hostname: &spec.host,
            query_port: &port,
            setname: set_name,
            hostshortname: spec.short_name(),
        };

        let alias = non_empty(Some(spec.alias.as_str()))
            .map(|template| render(template, &vars))
            .transpose()?;

        let url = non_empty(set.url_template.as_deref())
            .map(|template| render(template, &vars))
            .transpose()?;

        let entry = ServerEntry {
            host: spec.host.clone(),
            port: spec.port.clone(),
            num_query_threads: queries.len(),
            queries,
            username: non_empty(set.username.as_deref()).map(str::to_string),
            password: non_empty(set.password.as_deref()).map(str::to_string),
            alias,
            url,
        };

        tracing::debug!(
            set = %set_name,
            host = %entry.host,
            port = %entry.port,
            queries = entry.num_query_threads,
            "Resolved host entry"
        );

        Ok(entry)
    }

    /// Resolve every host of `set` into one document
    pub fn create_host_set_configuration(
        &self,
        set_name: &str,
        set: &HostSet,
    ) -> Result<HostSetConfig, GenerateError> {
        let servers = set
            .hosts
            .iter()
            .map(|raw| {
                let spec = HostSpec::parse(raw, &self.query_port, &self.global_host_alias);
                self.create_host_entry(&spec, set, set_name)
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| e.in_set(set_name))?;

        Ok(HostSetConfig { servers })
    }

    /// Resolve the registered set `set_name`
    pub fn configure_set(&self, set_name: &str) -> Result<HostSetConfig, GenerateError> {
        let set = self.registry.get_set(set_name)?;
        self.create_host_set_configuration(set_name, set)
    }

    /// Resolve every set in memory without writing anything
    pub fn generate_all(&self) -> Result<Vec<(String, HostSetConfig)>, GenerateError> {
        self.registry
            .set_names()
            .into_iter()
            .map(|name| {
                self.configure_set(name)
                    .map(|config| (name.to_string(), config))
            })
            .collect()
    }

    /// Write `<setname>.json` into `out_dir` for every set
    ///
    /// Sets are written one at a time; a failure stops the run and leaves
    /// the files of earlier sets in place.
    pub fn write_all(&self, out_dir: &Path) -> Result<Vec<PathBuf>, GenerateError> {
        std::fs::create_dir_all(out_dir).map_err(|source| GenerateError::Write {
            path: out_dir.to_path_buf(),
            source,
        })?;

        let mut written = Vec::with_capacity(self.registry.len());

        for name in self.registry.set_names() {
            let config = self.configure_set(name)?;
            let path = out_dir.join(format!("{}.json", name));
            config.write_to(&path)?;

            tracing::info!(
                set = %name,
                path = %path.display(),
                servers = config.servers.len(),
                "Wrote host set configuration"
            );
            written.push(path);
        }

        Ok(written)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
