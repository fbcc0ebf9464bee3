use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Where the service fetches templates from: built-in assets shipped with
/// the binary, or stored bodies supplied with the request. Injected as
/// configuration rather than toggled globally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateSource {
    Asset,
    Stored,
}

/// Raised when a template source name is not recognized.
#[derive(Debug, thiserror::Error)]
#[error("template source must be 'asset' or 'stored', got '{0}'")]
pub struct ParseTemplateSourceError(String);

impl FromStr for TemplateSource {
    type Err = ParseTemplateSourceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asset" => Ok(Self::Asset),
            "stored" => Ok(Self::Stored),
            _ => Err(ParseTemplateSourceError(value.to_string())),
        }
    }
}

/// Error raised by a template store.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("no template stored under key '{0}'")]
    NotFound(String),
    #[error("template body is empty")]
    Empty,
}

/// Seam for the collaborator that supplies raw template strings. The engine
/// itself never reads files or makes network calls.
pub trait TemplateStore: Send + Sync {
    fn fetch(&self, key: &str) -> Result<String, TemplateError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_source_parses_known_values() {
        assert_eq!(
            "asset".parse::<TemplateSource>().expect("asset parses"),
            TemplateSource::Asset
        );
        assert_eq!(
            " Stored ".parse::<TemplateSource>().expect("padded name parses"),
            TemplateSource::Stored
        );
        assert!("database".parse::<TemplateSource>().is_err());
    }
}
