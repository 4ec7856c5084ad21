use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub transcript: TranscriptConfig,
    pub report: ReportConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

/// Limits applied to transcripts before they reach the engine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TranscriptConfig {
    /// Minimum transcript length in characters
    pub min_length: usize,
    /// Maximum transcript length in characters
    pub max_length: usize,
    /// Per-request analysis budget
    pub timeout_ms: u64,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            min_length: 50,
            max_length: 200_000,
            timeout_ms: 5_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub max_numbers: usize,
    pub max_guidance: usize,
    pub summary_sentences: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_numbers: 20,
            max_guidance: 10,
            summary_sentences: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Fallback filter when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.transcript;
        if t.min_length > t.max_length {
            return Err(ConfigError::ParseError(format!(
                "transcript.min_length ({}) exceeds transcript.max_length ({})",
                t.min_length, t.max_length
            )));
        }
        if t.timeout_ms == 0 {
            return Err(ConfigError::ParseError(
                "transcript.timeout_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.transcript.min_length, 50);
        assert_eq!(config.report.max_numbers, 20);
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [server]
            port = 9100

            [transcript]
            max_length = 1000
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.transcript.max_length, 1000);
        assert_eq!(config.transcript.min_length, 50);
        assert_eq!(config.report.summary_sentences, 5);
    }

    #[test]
    fn test_invalid_limits_rejected() {
        let err = AppConfig::from_toml(
            r#"
            [transcript]
            min_length = 500
            max_length = 100
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_bad_toml() {
        assert!(matches!(
            AppConfig::from_toml("server = ["),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            AppConfig::from_file("does/not/exist.toml"),
            Err(ConfigError::IoError(_))
        ));
    }
}
