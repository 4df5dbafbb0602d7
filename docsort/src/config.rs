use serde::Deserialize;
use std::env;
use std::path::PathBuf;

use crate::processing::DEFAULT_MAX_CHUNK_SIZE;

pub const DEFAULT_FALLBACK_LABEL: &str = "Unclassified documents";

/// Upper bound on the bytes a single PPTX may expand to when unpacked.
pub const DEFAULT_MAX_UNPACKED_BYTES: u64 = 256 * 1024 * 1024;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub processing: ProcessingConfig,
    pub classifier: ClassifierConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// How many consecutive ports to try when the configured one is taken.
    pub port_attempts: u16,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProcessingConfig {
    pub max_chunk_size: usize,
    /// Parent directory for per-extraction PPTX workspaces.
    pub temp_dir: PathBuf,
    pub max_unpacked_bytes: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    pub url: String,
    pub timeout_secs: u64,
    pub fallback_label: String,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: DEFAULT_MAX_CHUNK_SIZE,
            temp_dir: env::temp_dir(),
            max_unpacked_bytes: DEFAULT_MAX_UNPACKED_BYTES,
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8000/api/sugerencia".to_string(),
            timeout_secs: 30,
            fallback_label: DEFAULT_FALLBACK_LABEL.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let processing_defaults = ProcessingConfig::default();
        let classifier_defaults = ClassifierConfig::default();

        Self {
            server: ServerConfig {
                host: env::var("DOCSORT_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("DOCSORT_PORT", 3000),
                port_attempts: parse_env_or::<u16>("DOCSORT_PORT_ATTEMPTS", 20).max(1),
                upload_dir: env::var("DOCSORT_UPLOAD_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("uploads")),
                max_upload_bytes: parse_env_or("DOCSORT_MAX_UPLOAD_BYTES", 50 * 1024 * 1024),
            },
            processing: ProcessingConfig {
                max_chunk_size: parse_env_or("MAX_CHUNK_SIZE", processing_defaults.max_chunk_size)
                    .max(1),
                temp_dir: env::var("DOCSORT_TEMP_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(processing_defaults.temp_dir),
                max_unpacked_bytes: parse_env_or(
                    "PPTX_MAX_UNPACKED_BYTES",
                    processing_defaults.max_unpacked_bytes,
                ),
            },
            classifier: ClassifierConfig {
                url: env::var("CLASSIFIER_URL").unwrap_or(classifier_defaults.url),
                timeout_secs: parse_env_or("CLASSIFIER_TIMEOUT", classifier_defaults.timeout_secs),
                fallback_label: env::var("CLASSIFIER_FALLBACK_LABEL")
                    .ok()
                    .filter(|label| !label.trim().is_empty())
                    .unwrap_or(classifier_defaults.fallback_label),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}
