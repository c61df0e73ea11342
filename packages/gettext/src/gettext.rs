//! Gettext facade
//!
//! [`Gettext`] wraps a shared [`Catalog`] and hands out [`Message`] handles.
//! A handle is formatted in one of three ways:
//!
//! - [`Message::raw`] returns the translation untouched;
//! - [`Message::format`] substitutes placeholders and, when tag transforms
//!   are given, flattens the markup to a string;
//! - [`Message::rich`] substitutes placeholders and renders into any
//!   [`Content`] type.
//!
//! ```
//! use gettext_template::{Gettext, Values};
//!
//! let gettext = Gettext::default();
//! let text = gettext
//!     .text("Hello <b>{{name}}</b>")
//!     .format(&Values::new().with("name", "Ada").tag("b", |s: String| s.to_uppercase()));
//! assert_eq!(text, "Hello ADA");
//! ```

use std::fmt;
use std::sync::Arc;

use crate::catalog::{Catalog, PoJson};
use crate::config::GettextConfig;
use crate::error::Result;
use crate::format::{substitute, Values};
use crate::markup::parse;
use crate::render::{render, Content};

/// Translation engine over one compiled catalog.
#[derive(Debug, Clone, Default)]
pub struct Gettext {
    catalog: Arc<Catalog>,
}

impl Gettext {
    pub fn new(catalog: Catalog) -> Self {
        Gettext {
            catalog: Arc::new(catalog),
        }
    }

    pub fn from_shared(catalog: Arc<Catalog>) -> Self {
        Gettext { catalog }
    }

    pub fn from_po(po: PoJson) -> Result<Self> {
        Ok(Self::new(Catalog::compile(po)?))
    }

    pub fn from_po_with(po: PoJson, config: &GettextConfig) -> Result<Self> {
        Ok(Self::new(Catalog::compile_with(po, config)?))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(Catalog::from_json(json)?))
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn lang(&self) -> &str {
        self.catalog.lang()
    }

    pub fn text<'a>(&'a self, msgid: &'a str) -> Message<'a> {
        Message::new(self.catalog.gettext(msgid))
    }

    pub fn text_with_context<'a>(&'a self, msgctxt: &str, msgid: &'a str) -> Message<'a> {
        Message::new(self.catalog.pgettext(msgctxt, msgid))
    }

    pub fn plural_text<'a>(&'a self, msgid: &'a str, msgid_plural: &'a str, n: i64) -> Message<'a> {
        Message::new(self.catalog.ngettext(msgid, msgid_plural, n))
    }

    pub fn plural_text_with_context<'a>(
        &'a self,
        msgctxt: &str,
        msgid: &'a str,
        msgid_plural: &'a str,
        n: i64,
    ) -> Message<'a> {
        Message::new(self.catalog.npgettext(msgctxt, msgid, msgid_plural, n))
    }

    /// Untouched translation of `msgid`.
    pub fn raw<'a>(&'a self, msgid: &'a str) -> &'a str {
        self.catalog.gettext(msgid)
    }

    pub fn raw_with_context<'a>(&'a self, msgctxt: &str, msgid: &'a str) -> &'a str {
        self.catalog.pgettext(msgctxt, msgid)
    }
}

/// A resolved translation waiting to be formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Message<'a> {
    text: &'a str,
}

impl<'a> Message<'a> {
    pub fn new(text: &'a str) -> Self {
        Message { text }
    }

    pub fn raw(&self) -> &'a str {
        self.text
    }

    /// Substitute placeholders; with tag transforms, also render the markup
    /// to a plain string.
    pub fn format(&self, values: &Values<'_, String>) -> String {
        self.rich(values)
    }

    /// Substitute placeholders and render into `C`.
    ///
    /// Markup is only parsed when `values` carries at least one tag
    /// transform; otherwise the substituted text is lifted as is.
    pub fn rich<C: Content>(&self, values: &Values<'_, C>) -> C {
        let split = values.split();
        let text = substitute(self.text, &split.scalars);
        if split.tags.is_empty() {
            return C::from_text(&text);
        }
        render(&parse(&text), &split.tags)
    }
}

impl fmt::Display for Message<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text)
    }
}
