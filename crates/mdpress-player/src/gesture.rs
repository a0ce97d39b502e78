use mdpress_engine::{Block, BlockKind};

/// An editor-specific formatting action performed before a block's text is
/// inserted: "switch the focused region to this style".
///
/// Gestures are structural, not mechanical: how a surface realises
/// `SetHeading` (toolbar click, keyboard shortcut, DOM surgery) is its own
/// business.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gesture {
    PlainParagraph,
    SetHeading { level: u8 },
    SetQuote,
    SetBulletList,
    SetNumberedList,
    SetCodeBlock { language: String },
    SetLink { url: String },
}

impl Gesture {
    /// The formatting gesture for a block kind.
    pub fn for_block(block: &Block) -> Gesture {
        match &block.kind {
            BlockKind::Header { level } | BlockKind::Subheader { level } => {
                Gesture::SetHeading { level: *level }
            }
            BlockKind::Text => Gesture::PlainParagraph,
            BlockKind::Quote => Gesture::SetQuote,
            BlockKind::BulletList => Gesture::SetBulletList,
            BlockKind::NumList => Gesture::SetNumberedList,
            BlockKind::CodeBlock { language } => Gesture::SetCodeBlock {
                language: language.clone(),
            },
            BlockKind::Link { url } => Gesture::SetLink { url: url.clone() },
        }
    }
}

impl std::fmt::Display for Gesture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gesture::PlainParagraph => write!(f, "paragraph"),
            Gesture::SetHeading { level } => write!(f, "heading({level})"),
            Gesture::SetQuote => write!(f, "quote"),
            Gesture::SetBulletList => write!(f, "bullet-list"),
            Gesture::SetNumberedList => write!(f, "numbered-list"),
            Gesture::SetCodeBlock { language } => write!(f, "code-block({language})"),
            Gesture::SetLink { url } => write!(f, "link({url})"),
        }
    }
}
