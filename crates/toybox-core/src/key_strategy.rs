use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// How an uploaded file's storage key is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyStrategy {
    /// `<unix-nanos><extension>`, unique per upload.
    #[default]
    Timestamp,
    /// The client-supplied filename, validated. Re-uploads overwrite.
    Filename,
}

impl FromStr for KeyStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "timestamp" => Ok(KeyStrategy::Timestamp),
            "filename" => Ok(KeyStrategy::Filename),
            _ => Err(anyhow::anyhow!("Invalid key strategy: {}", s)),
        }
    }
}

impl Display for KeyStrategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            KeyStrategy::Timestamp => write!(f, "timestamp"),
            KeyStrategy::Filename => write!(f, "filename"),
        }
    }
}
