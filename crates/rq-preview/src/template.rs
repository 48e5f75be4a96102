//! Preview templates
//!
//! A template is text with `{<column id>}` placeholders, for example
//! `"{11} ({12})"`. It is parsed once into literal and placeholder tokens
//! so substitution never touches text outside a placeholder, and id `1`
//! can never match inside `{12}`.

use regex::Regex;
use rq_core::ColumnId;
use std::collections::BTreeSet;
use std::sync::OnceLock;

use crate::error::{PreviewError, PreviewResult};

static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_RE.get_or_init(|| Regex::new(r"\{(.*?)\}").expect("valid regex"))
}

/// One piece of a parsed template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Literal(String),
    Placeholder(ColumnId),
}

/// A parsed preview template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewTemplate {
    source: String,
    tokens: Vec<Token>,
}

impl PreviewTemplate {
    /// Parse a template, rejecting placeholders that are not column ids
    pub fn parse(source: &str) -> PreviewResult<Self> {
        let mut tokens = Vec::new();
        let mut last = 0;
        for captures in placeholder_regex().captures_iter(source) {
            let (Some(whole), Some(inner)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            if whole.start() > last {
                tokens.push(Token::Literal(source[last..whole.start()].to_string()));
            }
            let id = inner
                .as_str()
                .trim()
                .parse::<ColumnId>()
                .map_err(|_| PreviewError::InvalidPlaceholder {
                    template: source.to_string(),
                    placeholder: inner.as_str().to_string(),
                })?;
            tokens.push(Token::Placeholder(id));
            last = whole.end();
        }
        if last < source.len() {
            tokens.push(Token::Literal(source[last..].to_string()));
        }
        Ok(Self {
            source: source.to_string(),
            tokens,
        })
    }

    /// Template text as written
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Referenced column ids in order of first appearance
    pub fn column_ids(&self) -> Vec<ColumnId> {
        let mut seen = BTreeSet::new();
        self.tokens
            .iter()
            .filter_map(|token| match token {
                Token::Placeholder(id) if seen.insert(*id) => Some(*id),
                _ => None,
            })
            .collect()
    }

    /// Render by replacing every placeholder with `replace(id)`
    pub fn render(&self, mut replace: impl FnMut(ColumnId) -> String) -> String {
        let mut out = String::with_capacity(self.source.len());
        for token in &self.tokens {
            match token {
                Token::Literal(text) => out.push_str(text),
                Token::Placeholder(id) => out.push_str(&replace(*id)),
            }
        }
        out
    }
}

impl std::fmt::Display for PreviewTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}
