use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Batch size and upload limit are positive
/// - Delimiter is a single ASCII character
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    // Ingest validation
    if config.ingest.batch_size == 0 {
        return Err(ConfigError::ValidationError(
            "ingest.batch_size cannot be 0".to_string(),
        ));
    }

    if config.ingest.max_upload_bytes == 0 {
        return Err(ConfigError::ValidationError(
            "ingest.max_upload_bytes cannot be 0".to_string(),
        ));
    }

    match config.ingest.delimiter.as_bytes() {
        [b] if b.is_ascii() => {}
        _ => {
            return Err(ConfigError::ValidationError(format!(
                "ingest.delimiter must be a single ASCII character, got {:?}",
                config.ingest.delimiter
            )))
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{IngestConfig, ServerConfig};
    use std::net::IpAddr;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_port_zero_fails() {
        let config = Config {
            server: ServerConfig {
                host: "0.0.0.0".parse::<IpAddr>().unwrap(),
                port: 0,
            },
            ..Default::default()
        };
        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validate_batch_size_zero_fails() {
        let config = Config {
            ingest: IngestConfig {
                batch_size: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("batch_size"));
    }

    #[test]
    fn test_validate_upload_limit_zero_fails() {
        let config = Config {
            ingest: IngestConfig {
                max_upload_bytes: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_delimiter() {
        for (delimiter, ok) in [(";", true), ("\t", true), ("", false), (",,", false), ("§", false)] {
            let config = Config {
                ingest: IngestConfig {
                    delimiter: delimiter.to_string(),
                    ..Default::default()
                },
                ..Default::default()
            };
            assert_eq!(
                validate_config(&config).is_ok(),
                ok,
                "delimiter {:?}",
                delimiter
            );
        }
    }
}
