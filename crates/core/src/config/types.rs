use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

/// Fixed local roster sources served by the read endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourcesConfig {
    /// Gzip-compressed tar archive holding a roster CSV
    #[serde(default = "default_archive_path")]
    pub archive_path: PathBuf,
    /// Uncompressed roster CSV
    #[serde(default = "default_csv_path")]
    pub csv_path: PathBuf,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            archive_path: default_archive_path(),
            csv_path: default_csv_path(),
        }
    }
}

fn default_archive_path() -> PathBuf {
    PathBuf::from("member.tar.gz")
}

fn default_csv_path() -> PathBuf {
    PathBuf::from("member.csv")
}

/// Decoding and aggregation settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IngestConfig {
    /// Rows per batch for the batched upload route
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Maximum accepted upload body in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    /// Field delimiter of the tabular data (single ASCII character)
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            max_upload_bytes: default_max_upload_bytes(),
            delimiter: default_delimiter(),
        }
    }
}

impl IngestConfig {
    /// Delimiter as a byte. Falls back to `,` if the configured value is not
    /// a single ASCII character; `validate_config` rejects that case upfront.
    pub fn delimiter_byte(&self) -> u8 {
        match self.delimiter.as_bytes() {
            [b] if b.is_ascii() => *b,
            _ => b',',
        }
    }
}

fn default_batch_size() -> usize {
    1000
}

fn default_max_upload_bytes() -> usize {
    64 * 1024 * 1024 // 64 MiB
}

fn default_delimiter() -> String {
    ",".to_string()
}
