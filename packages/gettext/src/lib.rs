#![deny(clippy::all)]

/**
 * gettext-template
 *
 * Runtime gettext catalog lookup with `{{placeholder}}` substitution and
 * tolerant pseudo-markup rendering into caller-defined content.
 */

// Core modules
pub mod catalog;
pub mod chars;
pub mod config;
mod error;
pub mod format;
pub mod gettext;
pub mod render;
mod resolver;
pub mod store;

// Parser modules
pub mod markup;
pub mod plural;

// Re-exports
pub use catalog::{Catalog, MessageEntry, Messages, PoJson, DEFAULT_CONTEXT};
pub use config::{GettextConfig, InvalidPluralForms};
pub use error::{GettextError, Result};
pub use format::{substitute, Scalar, TagFn, TagMap, Value, Values};
pub use gettext::{Gettext, Message};
pub use markup::{parse, parse_with_diagnostics, Element, Node, Text};
pub use plural::{compile, PluralRule, DEFAULT_PLURAL_FORMS};
pub use render::{render, Content};
pub use store::CatalogStore;
