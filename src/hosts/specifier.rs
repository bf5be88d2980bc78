//! Host specifier decomposition
//!
//! A host specifier packs up to four values into one string:
//!
//! ```text
//! host[:port][;alias[/rootPrefix]]
//! ```
//!
//! The string is split on `;` first, then the host part on `:` and the alias
//! part on `/`, each on the first occurrence. Without a `;` segment the
//! global alias is used instead, and it is split on `/` the same way.

use crate::config::Port;

/// Root prefix used when the alias carries no `/rootPrefix`
pub const DEFAULT_ROOT_PREFIX: &str = "servers";

/// Decomposed host specifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostSpec {
    pub host: String,
    pub port: Port,
    /// Alias template, rendered later with the host placeholders
    pub alias: String,
    pub root_prefix: String,
}

impl HostSpec {
    /// Decompose `spec`, falling back to `default_port` and `global_alias`
    pub fn parse(spec: &str, default_port: &Port, global_alias: &str) -> Self {
        let (host_part, alias_part) = spec.split_once(';').unwrap_or((spec, global_alias));

        let (alias, root_prefix) = alias_part
            .split_once('/')
            .unwrap_or((alias_part, DEFAULT_ROOT_PREFIX));

        let (host, port) = match host_part.split_once(':') {
            Some((host, port)) => (host, Port::Text(port.trim().to_string())),
            None => (host_part, default_port.clone()),
        };

        Self {
            host: host.trim().to_string(),
            port,
            alias: alias.trim().to_string(),
            root_prefix: root_prefix.trim().to_string(),
        }
    }

    /// Host name up to the first `.`
    pub fn short_name(&self) -> &str {
        self.host
            .split_once('.')
            .map_or(self.host.as_str(), |(short, _)| short)
    }
}
