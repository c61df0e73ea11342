//! Message Catalog
//!
//! The compiled form of a `.po` file: messages grouped by context, plus the
//! language's plural rule. A catalog is immutable once compiled. Swap whole
//! catalogs through [`CatalogStore`](crate::store::CatalogStore) to change
//! language at runtime.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::config::{GettextConfig, InvalidPluralForms};
use crate::error::{GettextError, Result};
use crate::plural::PluralRule;

/// The default (empty) message context.
pub const DEFAULT_CONTEXT: &str = "";

/// A translation: one string, or one string per plural variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageEntry {
    Single(String),
    Plural(Vec<String>),
}

impl MessageEntry {
    pub fn variant(&self, index: usize) -> Option<&str> {
        match self {
            MessageEntry::Single(_) => None,
            MessageEntry::Plural(variants) => variants.get(index).map(String::as_str),
        }
    }
}

impl From<&str> for MessageEntry {
    fn from(value: &str) -> Self {
        MessageEntry::Single(value.to_string())
    }
}

impl From<String> for MessageEntry {
    fn from(value: String) -> Self {
        MessageEntry::Single(value)
    }
}

impl<S: Into<String>> From<Vec<S>> for MessageEntry {
    fn from(variants: Vec<S>) -> Self {
        MessageEntry::Plural(variants.into_iter().map(Into::into).collect())
    }
}

/// Context → message id → translation.
pub type Messages = IndexMap<String, IndexMap<String, MessageEntry>>;

/// JSON shape produced by the `.po` converter.
///
/// Every field is optional; absent fields take the defaults of the
/// [`GettextConfig`] used to compile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PoJson {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plural_forms: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    pub messages: Messages,
}

impl PoJson {
    pub fn new(messages: Messages) -> Self {
        PoJson {
            plural_forms: None,
            lang: None,
            messages,
        }
    }

    pub fn with_plural_forms(mut self, plural_forms: impl Into<String>) -> Self {
        self.plural_forms = Some(plural_forms.into());
        self
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }
}

/// A compiled, read-only translation catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    lang: String,
    messages: Messages,
    plural_rule: PluralRule,
}

impl Catalog {
    /// Compile with the default [`GettextConfig`].
    pub fn compile(po: PoJson) -> Result<Self> {
        Self::compile_with(po, &GettextConfig::default())
    }

    pub fn compile_with(po: PoJson, config: &GettextConfig) -> Result<Self> {
        let PoJson {
            plural_forms,
            lang,
            mut messages,
        } = po;

        let plural_rule = match plural_forms {
            Some(source) => compile_plural_forms(&source, config)?,
            None => PluralRule::compile(&config.default_plural_forms)?,
        };
        let lang = lang.unwrap_or_else(|| config.default_lang.clone());

        if !messages.contains_key(DEFAULT_CONTEXT) {
            messages.insert(DEFAULT_CONTEXT.to_string(), IndexMap::new());
        }

        if let Some(nplurals) = plural_rule.nplurals() {
            check_variant_counts(&messages, nplurals);
        }

        tracing::debug!(
            lang = %lang,
            contexts = messages.len(),
            nplurals = ?plural_rule.nplurals(),
            "compiled catalog"
        );

        Ok(Catalog {
            lang,
            messages,
            plural_rule,
        })
    }

    /// Parse a [`PoJson`] document and compile it.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_json_with(json, &GettextConfig::default())
    }

    pub fn from_json_with(json: &str, config: &GettextConfig) -> Result<Self> {
        let po: PoJson = serde_json::from_str(json)?;
        Self::compile_with(po, config)
    }

    /// Read, parse and compile a JSON catalog file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| GettextError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    pub fn plural_rule(&self) -> &PluralRule {
        &self.plural_rule
    }

    pub(crate) fn entry(&self, context: &str, msgid: &str) -> Option<&MessageEntry> {
        self.messages.get(context)?.get(msgid)
    }
}

impl Default for Catalog {
    /// An empty catalog: every lookup falls back to the message id.
    fn default() -> Self {
        let mut messages = Messages::new();
        messages.insert(DEFAULT_CONTEXT.to_string(), IndexMap::new());
        Catalog {
            lang: GettextConfig::default().default_lang,
            messages,
            plural_rule: PluralRule::english(),
        }
    }
}

fn compile_plural_forms(source: &str, config: &GettextConfig) -> Result<PluralRule> {
    match PluralRule::compile(source) {
        Ok(rule) => Ok(rule),
        Err(err) if config.invalid_plural_forms == InvalidPluralForms::UseDefault => {
            tracing::warn!(
                error = %err,
                fallback = %config.default_plural_forms,
                "invalid plural forms, using fallback"
            );
            PluralRule::compile(&config.default_plural_forms)
        }
        Err(err) => Err(err),
    }
}

fn check_variant_counts(messages: &Messages, nplurals: usize) {
    for (context, entries) in messages {
        for (msgid, entry) in entries {
            if let MessageEntry::Plural(variants) = entry {
                if variants.len() != nplurals {
                    tracing::warn!(
                        context = %context,
                        msgid = %msgid,
                        variants = variants.len(),
                        nplurals,
                        "plural variant count does not match nplurals"
                    );
                }
            }
        }
    }
}
