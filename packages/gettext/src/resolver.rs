//! Translation lookup
//!
//! The four gettext lookups over a [`Catalog`]. Every lookup is total: a
//! missing context, message or variant falls back to the source id.
//!
//! A plain lookup of a variant sequence picks element 1 while a contextual
//! lookup picks element 0. Catalogs in the wild depend on this asymmetry, so
//! it is kept as is.

use crate::catalog::{Catalog, MessageEntry, DEFAULT_CONTEXT};

impl Catalog {
    /// Plain lookup in the default context.
    pub fn gettext<'a>(&'a self, msgid: &'a str) -> &'a str {
        match self.entry(DEFAULT_CONTEXT, msgid) {
            Some(MessageEntry::Single(msgstr)) => msgstr.as_str(),
            Some(entry) => entry.variant(1).unwrap_or(msgid),
            None => msgid,
        }
    }

    /// Plural lookup in the default context.
    pub fn ngettext<'a>(&'a self, msgid: &'a str, msgid_plural: &'a str, n: i64) -> &'a str {
        self.plural_lookup(DEFAULT_CONTEXT, msgid, msgid_plural, n)
    }

    /// Lookup in context `msgctxt`.
    pub fn pgettext<'a>(&'a self, msgctxt: &str, msgid: &'a str) -> &'a str {
        match self.entry(msgctxt, msgid) {
            Some(MessageEntry::Single(msgstr)) => msgstr.as_str(),
            Some(entry) => entry.variant(0).unwrap_or(msgid),
            None => msgid,
        }
    }

    /// Plural lookup in context `msgctxt`.
    pub fn npgettext<'a>(
        &'a self,
        msgctxt: &str,
        msgid: &'a str,
        msgid_plural: &'a str,
        n: i64,
    ) -> &'a str {
        self.plural_lookup(msgctxt, msgid, msgid_plural, n)
    }

    fn plural_lookup<'a>(
        &'a self,
        msgctxt: &str,
        msgid: &'a str,
        msgid_plural: &'a str,
        n: i64,
    ) -> &'a str {
        let index = self.plural_rule().index(n);
        usize::try_from(index)
            .ok()
            .and_then(|index| self.entry(msgctxt, msgid)?.variant(index))
            .unwrap_or(if n == 1 { msgid } else { msgid_plural })
    }
}
