//! Commit-message shortcodes
//!
//! Maps `:code:` tokens (the gitmoji convention) to the symbols they stand
//! for, so commit logs read well in a changelog draft.

use regex::{Captures, Regex};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

use crate::error::Result;

const GITMOJIS: &str = include_str!("gitmojis.json");

#[derive(Debug, Deserialize)]
struct GitmojiTable {
    gitmojis: Vec<Gitmoji>,
}

#[derive(Debug, Deserialize)]
struct Gitmoji {
    emoji: String,
    code: String,
}

/// Shortcode to symbol table
#[derive(Debug, Clone)]
pub struct Shortcodes {
    symbols: HashMap<String, String>,
    /// Alternation of the known codes only, `None` for an empty table
    token: Option<Regex>,
}

impl Shortcodes {
    /// Table with exactly the given `":code:" -> symbol` entries
    pub fn new(symbols: HashMap<String, String>) -> Result<Self> {
        let token = known_codes(&symbols)?;
        Ok(Self { symbols, token })
    }

    /// The bundled gitmoji table
    pub fn gitmoji() -> Result<Self> {
        let table: GitmojiTable = serde_json::from_str(GITMOJIS)?;
        let symbols = table
            .gitmojis
            .into_iter()
            .map(|g| (g.code, g.emoji))
            .collect();
        Self::new(symbols)
    }

    /// Add or replace entries, e.g. from the `[shortcodes]` config section
    pub fn with_overrides(mut self, overrides: &BTreeMap<String, String>) -> Result<Self> {
        for (code, symbol) in overrides {
            self.symbols.insert(code.clone(), symbol.clone());
        }
        Self::new(self.symbols)
    }

    pub fn symbol(&self, code: &str) -> Option<&str> {
        self.symbols.get(code).map(String::as_str)
    }

    /// Replace every known token in `text`; anything else is kept as is
    pub fn replace(&self, text: &str) -> String {
        match &self.token {
            Some(token) => token
                .replace_all(text, |caps: &Captures| {
                    let code = &caps[0];
                    self.symbol(code).unwrap_or(code).to_string()
                })
                .into_owned(),
            None => text.to_string(),
        }
    }
}

/// Matcher for exactly the codes in the table. Longer codes come first so
/// that a code is never cut short by another code that prefixes it.
fn known_codes(symbols: &HashMap<String, String>) -> Result<Option<Regex>> {
    if symbols.is_empty() {
        return Ok(None);
    }

    let mut codes: Vec<&str> = symbols.keys().map(String::as_str).collect();
    codes.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));

    let pattern = codes
        .iter()
        .map(|code| regex::escape(code))
        .collect::<Vec<_>>()
        .join("|");
    Ok(Some(Regex::new(&pattern)?))
}
