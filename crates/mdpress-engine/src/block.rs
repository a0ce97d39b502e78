use serde::{Deserialize, Serialize};

/// Language tag used for fenced code blocks that carry no tag of their own.
pub const PLAIN_TEXT: &str = "plain text";

/// The kind of a parsed block, with its kind-specific metadata.
///
/// This is a closed set: constructs the parser does not recognise degrade to
/// `Text` rather than growing new variants. Serialized with a `kind` tag in
/// snake_case so the schema stays stable for any replacement player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockKind {
    /// A level-1 heading.
    Header { level: u8 },
    /// Headings at levels 2–6, plus the table-row and divider degradations.
    Subheader { level: u8 },
    /// A paragraph run.
    Text,
    /// A blockquote run, one entry per source line.
    Quote,
    /// An unordered list, one entry per item.
    BulletList,
    /// An ordered list, one entry per item. Source ordinals are not kept.
    NumList,
    /// A fenced code block. Contents are verbatim, never inline-stripped.
    CodeBlock { language: String },
    /// A standalone link or image reference, or a paragraph reclassified by
    /// the URL heuristic.
    Link { url: String },
}

/// One classified, ordered unit of parsed document content.
///
/// `lines` holds plain text with inline Markdown markers already stripped
/// (except for `CodeBlock`, which is verbatim). An emitted block always has
/// at least one line; block order mirrors source line order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    #[serde(flatten)]
    pub kind: BlockKind,
    pub lines: Vec<String>,
}

impl Block {
    pub fn new(kind: BlockKind, lines: Vec<String>) -> Self {
        Self { kind, lines }
    }

    /// Convenience for the many single-line kinds.
    pub fn single(kind: BlockKind, line: String) -> Self {
        Self {
            kind,
            lines: vec![line],
        }
    }
}
