//! Server configuration from environment variables
//!
//! | Variable       | Default | Meaning |
//! |----------------|---------|---------|
//! | `PORT`         | 3000    | HTTP listen port |
//! | `CATALOG_PATH` | unset   | JSON crop catalog replacing the built-in one |
//! | `JITTER`       | on      | `off`/`false`/`0` disables tie-break jitter |
//! | `JITTER_SEED`  | unset   | Seed for reproducible jitter (ignored when jitter is off) |

use crate::catalog::CropCatalog;
use crate::error::Result;
use crate::jitter::JitterMode;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    pub catalog_path: Option<PathBuf>,
    pub jitter: JitterMode,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            catalog_path: None,
            jitter: JitterMode::Entropy,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (lets tests avoid touching process env)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let catalog_path = lookup("CATALOG_PATH")
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        let enabled = lookup("JITTER")
            .map(|v| !matches!(v.trim().to_lowercase().as_str(), "off" | "false" | "0" | "no"))
            .unwrap_or(true);

        let seed = lookup("JITTER_SEED").and_then(|s| s.trim().parse::<u64>().ok());

        let jitter = match (enabled, seed) {
            (false, _) => JitterMode::Disabled,
            (true, Some(seed)) => JitterMode::Seeded(seed),
            (true, None) => JitterMode::Entropy,
        };

        Self { port, catalog_path, jitter }
    }

    /// Load the configured catalog (built-in when no path is set)
    pub fn load_catalog(&self) -> Result<CropCatalog> {
        match &self.catalog_path {
            Some(path) => CropCatalog::from_json_file(path),
            None => CropCatalog::builtin(),
        }
    }
}
