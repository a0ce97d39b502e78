//! Inline formatting removal.
//!
//! Every non-code line the parser emits goes through [`InlineStripper::strip`],
//! which removes inline Markdown markers and keeps only the enclosed text.
//! Order matters: doubled markers (bold) are consumed before single markers
//! (italic) so `**a**` is never half-eaten by the italic rule. Each rule is a
//! single left-to-right pass; composition is not re-applied recursively, which
//! makes stripping idempotent on already-stripped text.

use std::sync::OnceLock;

use regex::Regex;

struct InlineRules {
    bold_star: Regex,
    bold_under: Regex,
    italic_star: Regex,
    italic_under: Regex,
    strike: Regex,
    code: Regex,
    link: Regex,
}

impl InlineRules {
    fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            bold_star: Regex::new(r"\*\*([^*]+)\*\*")?,
            bold_under: Regex::new(r"__([^_]+)__")?,
            italic_star: Regex::new(r"\*([^*]+)\*")?,
            italic_under: Regex::new(r"_([^_]+)_")?,
            strike: Regex::new(r"~~([^~]+)~~")?,
            code: Regex::new(r"`([^`]+)`")?,
            // Covers both `[text](url)` and `![alt](url)`; the enclosed text
            // survives, the target is discarded.
            link: Regex::new(r"!?\[([^\]]*)\]\([^)]*\)")?,
        })
    }
}

static RULES: OnceLock<Result<InlineRules, regex::Error>> = OnceLock::new();

/// Strips inline Markdown markers from single lines of text.
pub struct InlineStripper {
    rules: &'static InlineRules,
}

impl InlineStripper {
    /// Compiles the marker rules (once per process).
    ///
    /// A pattern failing to compile is an internal failure and feeds the
    /// parse-level fallback rather than reaching callers of `parse`.
    pub fn new() -> Result<Self, regex::Error> {
        match RULES.get_or_init(InlineRules::compile) {
            Ok(rules) => Ok(Self { rules }),
            Err(err) => Err(err.clone()),
        }
    }

    /// Removes bold, italic, strikethrough, inline-code, and link markers,
    /// keeping only the enclosed text.
    pub fn strip(&self, line: &str) -> String {
        let r = self.rules;
        let s = r.bold_star.replace_all(line, "$1");
        let s = r.bold_under.replace_all(&s, "$1");
        let s = r.italic_star.replace_all(&s, "$1");
        let s = r.italic_under.replace_all(&s, "$1");
        let s = r.strike.replace_all(&s, "$1");
        let s = r.code.replace_all(&s, "$1");
        let s = r.link.replace_all(&s, "$1");
        s.into_owned()
    }
}
