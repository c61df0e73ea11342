//! Error types
//!
//! Only catalog ingestion and plural-forms compilation can fail. Lookups,
//! substitution, markup parsing and rendering are total.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GettextError {
    /// The `Plural-Forms` expression could not be parsed.
    #[error("invalid plural expression `{expression}` at offset {offset}: {message}")]
    InvalidPluralExpression {
        expression: String,
        message: String,
        offset: usize,
    },

    #[error("malformed catalog: {0}")]
    CatalogFormat(#[from] serde_json::Error),

    #[error("failed to read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GettextError {
    pub fn invalid_plural(expression: &str, message: impl Into<String>, offset: usize) -> Self {
        GettextError::InvalidPluralExpression {
            expression: expression.to_string(),
            message: message.into(),
            offset,
        }
    }

    pub fn is_invalid_plural(&self) -> bool {
        matches!(self, GettextError::InvalidPluralExpression { .. })
    }
}

pub type Result<T> = std::result::Result<T, GettextError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_plural_display() {
        let err = GettextError::invalid_plural("plural=(n", "Expected character ')'", 9);
        assert!(err.is_invalid_plural());
        assert_eq!(
            err.to_string(),
            "invalid plural expression `plural=(n` at offset 9: Expected character ')'"
        );
    }
}
