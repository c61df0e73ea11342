//! Catalog compilation options

use serde::{Deserialize, Serialize};

use crate::plural::DEFAULT_PLURAL_FORMS;

/// What to do with a `Plural-Forms` header that does not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InvalidPluralForms {
    /// Fail compilation with `InvalidPluralExpression`.
    #[default]
    Reject,
    /// Log a warning and compile `default_plural_forms` instead.
    UseDefault,
}

/// Options applied when turning a [`PoJson`](crate::catalog::PoJson) into a
/// [`Catalog`](crate::catalog::Catalog).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GettextConfig {
    /// Used when the catalog carries no plural-forms header.
    pub default_plural_forms: String,
    /// Used when the catalog carries no language.
    pub default_lang: String,
    pub invalid_plural_forms: InvalidPluralForms,
}

impl Default for GettextConfig {
    fn default() -> Self {
        GettextConfig {
            default_plural_forms: DEFAULT_PLURAL_FORMS.to_string(),
            default_lang: "en".to_string(),
            invalid_plural_forms: InvalidPluralForms::Reject,
        }
    }
}
