//! Configuration module
//!
//! Everything is read from the environment (optionally seeded from a `.env`
//! file). Every setting has a default that targets a local LocalStack
//! instance, so the service starts with no configuration at all.

use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use std::time::Duration;

use crate::key_strategy::KeyStrategy;

const SERVER_PORT: u16 = 8080;
const S3_BUCKET: &str = "toybox";
const S3_REGION: &str = "us-east-1";
const S3_ENDPOINT: &str = "http://s3.us-east-1.localhost.localstack.cloud:4566";
const S3_STATIC_ACCESS_KEY_ID: &str = "test";
const S3_STATIC_SECRET_ACCESS_KEY: &str = "test";
const S3_OPERATION_TIMEOUT_SECS: u64 = 30;
const MAX_UPLOAD_SIZE_MB: usize = 10;

/// Validity window of every presigned download URL.
pub const PRESIGN_EXPIRY: Duration = Duration::from_secs(15 * 60);

/// Where the storage client gets its credentials from.
#[derive(Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Fixed access key and secret.
    Static {
        access_key_id: String,
        secret_access_key: String,
    },
    /// The AWS SDK default provider chain (env vars, profile, IMDS, ...).
    Environment,
}

// Keep secrets out of logs.
impl std::fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            CredentialSource::Static { access_key_id, .. } => f
                .debug_struct("Static")
                .field("access_key_id", access_key_id)
                .field("secret_access_key", &"<redacted>")
                .finish(),
            CredentialSource::Environment => write!(f, "Environment"),
        }
    }
}

/// Tracing output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(anyhow::anyhow!("Invalid log format: {}", s)),
        }
    }
}

impl Display for LogFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

/// Object store connection settings
#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub bucket: String,
    pub region: String,
    pub endpoint: String,
    pub credentials: CredentialSource,
    pub operation_timeout: Duration,
}

/// Upload handler behaviour
#[derive(Clone, Debug)]
pub struct UploadConfig {
    pub key_strategy: KeyStrategy,
    /// `None` leaves the HTTP layer's default body limit in place.
    pub max_upload_bytes: Option<usize>,
    pub presign_expiry: Duration,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            key_strategy: KeyStrategy::default(),
            max_upload_bytes: Some(MAX_UPLOAD_SIZE_MB * 1024 * 1024),
            presign_expiry: PRESIGN_EXPIRY,
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub log_format: LogFormat,
    pub storage: StorageConfig,
    pub upload: UploadConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let environment = var("ENVIRONMENT")
            .or_else(|| var("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());
        let is_production = is_production_name(&environment);

        let server_port = match var("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            None => SERVER_PORT,
        };

        let log_format = match var("LOG_FORMAT") {
            Some(format) => format.parse()?,
            None if is_production => LogFormat::Json,
            None => LogFormat::Pretty,
        };

        let credentials = match var("S3_CREDENTIALS")
            .map(|s| s.trim().to_lowercase())
            .as_deref()
        {
            None | Some("static") => CredentialSource::Static {
                access_key_id: var("S3_ACCESS_KEY_ID")
                    .unwrap_or_else(|| S3_STATIC_ACCESS_KEY_ID.to_string()),
                secret_access_key: var("S3_SECRET_ACCESS_KEY")
                    .unwrap_or_else(|| S3_STATIC_SECRET_ACCESS_KEY.to_string()),
            },
            Some("environment") | Some("env") => CredentialSource::Environment,
            Some(other) => {
                return Err(anyhow::anyhow!(
                    "S3_CREDENTIALS must be 'static' or 'environment', got '{}'",
                    other
                ))
            }
        };

        let operation_timeout_secs = match var("S3_OPERATION_TIMEOUT_SECS") {
            Some(secs) => secs
                .trim()
                .parse::<u64>()
                .map_err(|_| anyhow::anyhow!("S3_OPERATION_TIMEOUT_SECS must be a valid number"))?,
            None => S3_OPERATION_TIMEOUT_SECS,
        };

        let storage = StorageConfig {
            bucket: var("S3_BUCKET").unwrap_or_else(|| S3_BUCKET.to_string()),
            region: var("S3_REGION")
                .or_else(|| var("AWS_REGION"))
                .unwrap_or_else(|| S3_REGION.to_string()),
            endpoint: var("S3_ENDPOINT").unwrap_or_else(|| S3_ENDPOINT.to_string()),
            credentials,
            operation_timeout: Duration::from_secs(operation_timeout_secs),
        };

        let key_strategy = match var("UPLOAD_KEY_STRATEGY") {
            Some(strategy) => strategy.parse()?,
            None => KeyStrategy::default(),
        };

        let max_upload_size_mb = match var("MAX_UPLOAD_SIZE_MB") {
            Some(mb) => mb
                .trim()
                .parse::<usize>()
                .map_err(|_| anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be a valid number"))?,
            None => MAX_UPLOAD_SIZE_MB,
        };

        let upload = UploadConfig {
            key_strategy,
            max_upload_bytes: (max_upload_size_mb > 0).then(|| max_upload_size_mb * 1024 * 1024),
            presign_expiry: PRESIGN_EXPIRY,
        };

        let config = Config {
            server_port,
            environment,
            log_format,
            storage,
            upload,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.storage.bucket.trim().is_empty() {
            return Err(anyhow::anyhow!("S3_BUCKET must not be empty"));
        }

        if self.storage.region.trim().is_empty() {
            return Err(anyhow::anyhow!("S3_REGION must not be empty"));
        }

        let endpoint: http::Uri = self
            .storage
            .endpoint
            .parse()
            .map_err(|e| anyhow::anyhow!("S3_ENDPOINT is not a valid URI: {}", e))?;
        match endpoint.scheme_str() {
            Some("http") | Some("https") if endpoint.host().is_some() => {}
            _ => {
                return Err(anyhow::anyhow!(
                    "S3_ENDPOINT must be an absolute http(s) URL, got '{}'",
                    self.storage.endpoint
                ))
            }
        }

        if self.storage.operation_timeout.is_zero() {
            return Err(anyhow::anyhow!(
                "S3_OPERATION_TIMEOUT_SECS must be greater than 0"
            ));
        }

        if let CredentialSource::Static {
            access_key_id,
            secret_access_key,
        } = &self.storage.credentials
        {
            if access_key_id.is_empty() || secret_access_key.is_empty() {
                return Err(anyhow::anyhow!(
                    "S3_ACCESS_KEY_ID and S3_SECRET_ACCESS_KEY must not be empty"
                ));
            }
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_name(&self.environment)
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn s3_bucket(&self) -> &str {
        &self.storage.bucket
    }

    pub fn key_strategy(&self) -> KeyStrategy {
        self.upload.key_strategy
    }

    pub fn max_upload_bytes(&self) -> Option<usize> {
        self.upload.max_upload_bytes
    }
}

fn is_production_name(environment: &str) -> bool {
    let environment = environment.to_lowercase();
    environment == "production" || environment == "prod"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, anyhow::Error> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults_target_localstack() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.server_port(), 8080);
        assert_eq!(config.s3_bucket(), "toybox");
        assert_eq!(config.storage.region, "us-east-1");
        assert_eq!(
            config.storage.endpoint,
            "http://s3.us-east-1.localhost.localstack.cloud:4566"
        );
        assert_eq!(
            config.storage.credentials,
            CredentialSource::Static {
                access_key_id: "test".to_string(),
                secret_access_key: "test".to_string(),
            }
        );
        assert_eq!(config.key_strategy(), KeyStrategy::Timestamp);
        assert_eq!(config.max_upload_bytes(), Some(10 * 1024 * 1024));
        assert_eq!(config.upload.presign_expiry, Duration::from_secs(900));
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(!config.is_production());
    }

    #[test]
    fn test_filename_variant() {
        let config = config_from(&[
            ("S3_BUCKET", "assets"),
            ("UPLOAD_KEY_STRATEGY", "filename"),
            ("MAX_UPLOAD_SIZE_MB", "0"),
        ])
        .unwrap();
        assert_eq!(config.s3_bucket(), "assets");
        assert_eq!(config.key_strategy(), KeyStrategy::Filename);
        assert_eq!(config.max_upload_bytes(), None);
    }

    #[test]
    fn test_region_falls_back_to_aws_region() {
        let config = config_from(&[("AWS_REGION", "eu-west-1")]).unwrap();
        assert_eq!(config.storage.region, "eu-west-1");

        let config = config_from(&[("AWS_REGION", "eu-west-1"), ("S3_REGION", "ap-south-1")])
            .unwrap();
        assert_eq!(config.storage.region, "ap-south-1");
    }

    #[test]
    fn test_environment_credentials() {
        let config = config_from(&[("S3_CREDENTIALS", "environment")]).unwrap();
        assert_eq!(config.storage.credentials, CredentialSource::Environment);

        assert!(config_from(&[("S3_CREDENTIALS", "vault")]).is_err());
    }

    #[test]
    fn test_production_defaults_to_json_logs() {
        let config = config_from(&[("ENVIRONMENT", "production")]).unwrap();
        assert!(config.is_production());
        assert_eq!(config.log_format, LogFormat::Json);

        let config = config_from(&[("APP_ENV", "prod"), ("LOG_FORMAT", "pretty")]).unwrap();
        assert!(config.is_production());
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(config_from(&[("PORT", "http")]).is_err());
        assert!(config_from(&[("UPLOAD_KEY_STRATEGY", "random")]).is_err());
        assert!(config_from(&[("MAX_UPLOAD_SIZE_MB", "-1")]).is_err());
        assert!(config_from(&[("S3_OPERATION_TIMEOUT_SECS", "0")]).is_err());
        assert!(config_from(&[("S3_ENDPOINT", "localhost:4566")]).is_err());
        assert!(config_from(&[("S3_ENDPOINT", "ftp://localhost:4566")]).is_err());
        assert!(config_from(&[("LOG_FORMAT", "xml")]).is_err());
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = config_from(&[("S3_BUCKET", "  "), ("PORT", "")]).unwrap();
        assert_eq!(config.s3_bucket(), "toybox");
        assert_eq!(config.server_port(), 8080);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let source = CredentialSource::Static {
            access_key_id: "AKIA".to_string(),
            secret_access_key: "very-secret".to_string(),
        };
        let rendered = format!("{:?}", source);
        assert!(rendered.contains("AKIA"));
        assert!(!rendered.contains("very-secret"));
    }
}
