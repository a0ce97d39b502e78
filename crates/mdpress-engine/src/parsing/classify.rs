//! Line classification, phase 1 of parsing.
//!
//! Each line is classified independently into a [`LineClass`] by trying a
//! fixed priority order of rules; the first matching rule wins. The only
//! context-sensitive construct, the interior of an open code fence, is
//! handled by the builder, which ignores classification while a fence is
//! open.

use std::sync::OnceLock;

use regex::Regex;

/// Classification of a single line, carrying only local facts.
///
/// Variants are listed in match priority order: fence > header > table >
/// image > quote > list > rule > standalone link > paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// Whitespace-only line. Ends any open run.
    Blank,
    /// Triple-backtick fence line; `language` is the trimmed remainder.
    Fence { language: String },
    /// 1–6 `#` markers, whitespace, then text.
    Header { level: u8, rest: String },
    /// A table row that is only pipes, dashes, colons, and whitespace.
    TableSeparator,
    /// A pipe-delimited data row, split into raw cells.
    TableRow { cells: Vec<String> },
    /// An image reference alone on the line.
    Image {
        alt: String,
        title: Option<String>,
        url: String,
    },
    /// A blockquote line; `rest` has the `>` markers already removed.
    Quote { rest: String },
    /// One unordered list item.
    Bullet { rest: String },
    /// One ordered list item. The ordinal is not kept.
    Ordered { rest: String },
    /// A horizontal rule.
    Rule,
    /// A `[text](url)` link alone on the line.
    StandaloneLink { text: String, url: String },
    /// Anything else: part of a paragraph run.
    Paragraph,
}

struct Rules {
    header: Regex,
    image: Regex,
    link: Regex,
    bullet: Regex,
    ordered: Regex,
    rule: Regex,
    url: Regex,
}

impl Rules {
    fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            header: Regex::new(r"^(#{1,6})\s+(.+)$")?,
            image: Regex::new(r#"^!\[([^\]]*)\]\(\s*(\S+?)(?:\s+"([^"]*)")?\s*\)$"#)?,
            link: Regex::new(r#"^\[([^\]]*)\]\(\s*(\S+?)(?:\s+"([^"]*)")?\s*\)$"#)?,
            bullet: Regex::new(r"^[-*+]\s+(.*)$")?,
            ordered: Regex::new(r"^\d+\.\s+(.*)$")?,
            rule: Regex::new(r"^(?:-{3,}|\*{3,}|_{3,})$")?,
            url: Regex::new(r"https?://[^\s<>\[\]]+")?,
        })
    }
}

static RULES: OnceLock<Result<Rules, regex::Error>> = OnceLock::new();

/// Classifies individual lines for the block-building phase.
pub struct LineClassifier {
    rules: &'static Rules,
}

impl LineClassifier {
    pub fn new() -> Result<Self, regex::Error> {
        match RULES.get_or_init(Rules::compile) {
            Ok(rules) => Ok(Self { rules }),
            Err(err) => Err(err.clone()),
        }
    }

    /// Classifies a line into a [`LineClass`] by fixed-priority dispatch.
    pub fn classify(&self, line: &str) -> LineClass {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            return LineClass::Blank;
        }

        if let Some(language) = trimmed.strip_prefix("```") {
            return LineClass::Fence {
                language: language.trim().to_string(),
            };
        }

        if let Some(caps) = self.rules.header.captures(trimmed) {
            return LineClass::Header {
                level: caps[1].len() as u8,
                rest: caps[2].to_string(),
            };
        }

        if trimmed.len() >= 2 && trimmed.starts_with('|') && trimmed.ends_with('|') {
            if is_table_separator(trimmed) {
                return LineClass::TableSeparator;
            }
            let interior = &trimmed[1..trimmed.len() - 1];
            return LineClass::TableRow {
                cells: interior.split('|').map(|c| c.trim().to_string()).collect(),
            };
        }

        if let Some(caps) = self.rules.image.captures(trimmed) {
            return LineClass::Image {
                alt: caps[1].to_string(),
                url: caps[2].to_string(),
                title: caps.get(3).map(|m| m.as_str().to_string()),
            };
        }

        if trimmed.starts_with('>') {
            return LineClass::Quote {
                rest: strip_quote_markers(trimmed),
            };
        }

        if let Some(caps) = self.rules.bullet.captures(trimmed) {
            return LineClass::Bullet {
                rest: caps[1].to_string(),
            };
        }

        if let Some(caps) = self.rules.ordered.captures(trimmed) {
            return LineClass::Ordered {
                rest: caps[1].to_string(),
            };
        }

        if self.rules.rule.is_match(trimmed) {
            return LineClass::Rule;
        }

        if let Some(caps) = self.rules.link.captures(trimmed) {
            return LineClass::StandaloneLink {
                text: caps[1].to_string(),
                url: caps[2].to_string(),
            };
        }

        LineClass::Paragraph
    }

    /// First absolute URL inside `text`, if any. Used by the paragraph
    /// reclassification heuristic.
    pub fn find_url<'a>(&self, text: &'a str) -> Option<&'a str> {
        self.rules.url.find(text).map(|m| m.as_str())
    }
}

/// Removes leading `>` markers, collapsing nested notation (`>>`, `> >`).
fn strip_quote_markers(trimmed: &str) -> String {
    let mut rest = trimmed;
    while let Some(stripped) = rest.strip_prefix('>') {
        rest = stripped.trim_start();
    }
    rest.to_string()
}

fn is_table_separator(trimmed: &str) -> bool {
    trimmed.contains('-')
        && trimmed
            .chars()
            .all(|c| c == '|' || c == '-' || c == ':' || c.is_whitespace())
}
