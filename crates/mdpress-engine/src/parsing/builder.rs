//! Block construction, phase 2 of parsing.
//!
//! [`BlockBuilder`] is a push-per-line state machine. It holds at most one
//! open run (paragraph, quote, list, or fence) and emits a [`Block`] whenever
//! a run closes. An open fence is a raw zone: every line is copied verbatim
//! until a closing fence, and no other rule applies inside it.

use crate::block::{Block, BlockKind, PLAIN_TEXT};

use super::{
    classify::{LineClass, LineClassifier},
    inline::InlineStripper,
};

/// Placeholder line emitted for horizontal rules, which have no native kind.
const DIVIDER_LINE: &str = "---";

#[derive(Debug)]
enum Run {
    None,
    Paragraph(Vec<String>),
    Quote(Vec<String>),
    Bullet(Vec<String>),
    Ordered(Vec<String>),
    Fence {
        language: String,
        lines: Vec<String>,
    },
}

pub struct BlockBuilder<'a> {
    classifier: &'a LineClassifier,
    stripper: &'a InlineStripper,
    run: Run,
    out: Vec<Block>,
}

impl<'a> BlockBuilder<'a> {
    pub fn new(classifier: &'a LineClassifier, stripper: &'a InlineStripper) -> Self {
        Self {
            classifier,
            stripper,
            run: Run::None,
            out: Vec::new(),
        }
    }

    /// Consumes one source line.
    ///
    /// `raw` is the unmodified line (needed verbatim inside fences); `class`
    /// is its classification, ignored while a fence is open except to detect
    /// the closing fence.
    pub fn push(&mut self, raw: &str, class: LineClass) {
        if let Run::Fence { .. } = self.run {
            if matches!(class, LineClass::Fence { .. }) {
                self.flush();
            } else if let Run::Fence { lines, .. } = &mut self.run {
                lines.push(raw.to_string());
            }
            return;
        }

        match class {
            LineClass::Blank => self.flush(),
            LineClass::Fence { language } => {
                self.flush();
                self.run = Run::Fence {
                    language,
                    lines: Vec::new(),
                };
            }
            LineClass::Header { level, rest } => {
                self.flush();
                let kind = if level == 1 {
                    BlockKind::Header { level }
                } else {
                    BlockKind::Subheader { level }
                };
                let text = self.stripper.strip(&rest);
                self.out.push(Block::single(kind, text));
            }
            // Tables degrade: separator rows vanish, data rows flatten into
            // one level-2 subheader line.
            LineClass::TableSeparator => self.flush(),
            LineClass::TableRow { cells } => {
                self.flush();
                let flattened = cells
                    .iter()
                    .map(|c| self.stripper.strip(c))
                    .collect::<Vec<_>>()
                    .join(" | ");
                if !flattened.is_empty() {
                    self.out
                        .push(Block::single(BlockKind::Subheader { level: 2 }, flattened));
                }
            }
            // Images degrade to links: alt text, else title, else the URL.
            LineClass::Image { alt, title, url } => {
                self.flush();
                let text = if !alt.is_empty() {
                    alt
                } else if let Some(title) = title.filter(|t| !t.is_empty()) {
                    title
                } else {
                    url.clone()
                };
                self.out.push(Block::single(BlockKind::Link { url }, text));
            }
            LineClass::Quote { rest } => {
                let line = self.stripper.strip(&rest);
                match &mut self.run {
                    Run::Quote(lines) => lines.push(line),
                    _ => {
                        self.flush();
                        self.run = Run::Quote(vec![line]);
                    }
                }
            }
            LineClass::Bullet { rest } => {
                let item = self.stripper.strip(&rest);
                match &mut self.run {
                    Run::Bullet(items) => items.push(item),
                    _ => {
                        self.flush();
                        self.run = Run::Bullet(vec![item]);
                    }
                }
            }
            LineClass::Ordered { rest } => {
                let item = self.stripper.strip(&rest);
                match &mut self.run {
                    Run::Ordered(items) => items.push(item),
                    _ => {
                        self.flush();
                        self.run = Run::Ordered(vec![item]);
                    }
                }
            }
            LineClass::Rule => {
                self.flush();
                self.out.push(Block::single(
                    BlockKind::Subheader { level: 2 },
                    DIVIDER_LINE.to_string(),
                ));
            }
            LineClass::StandaloneLink { text, url } => {
                self.flush();
                let text = self.stripper.strip(&text);
                let line = if text.is_empty() { url.clone() } else { text };
                self.out.push(Block::single(BlockKind::Link { url }, line));
            }
            LineClass::Paragraph => {
                let line = self.stripper.strip(raw.trim());
                // Lines that strip down to nothing are dropped.
                if line.is_empty() {
                    return;
                }
                match &mut self.run {
                    Run::Paragraph(lines) => lines.push(line),
                    _ => {
                        self.flush();
                        self.run = Run::Paragraph(vec![line]);
                    }
                }
            }
        }
    }

    /// Flushes the final open run (including an unterminated fence, which is
    /// emitted as code rather than dropped) and returns all blocks in source
    /// order.
    pub fn finish(mut self) -> Vec<Block> {
        self.flush();
        self.out
    }

    fn flush(&mut self) {
        match std::mem::replace(&mut self.run, Run::None) {
            Run::None => {}
            Run::Paragraph(lines) => {
                if lines.is_empty() {
                    return;
                }
                // A paragraph mentioning an absolute URL becomes a link
                // block. Deliberate heuristic, not a structural parse.
                let url = lines
                    .iter()
                    .find_map(|l| self.classifier.find_url(l))
                    .map(str::to_string);
                let kind = match url {
                    Some(url) => BlockKind::Link { url },
                    None => BlockKind::Text,
                };
                self.out.push(Block::new(kind, lines));
            }
            Run::Quote(lines) => self.out.push(Block::new(BlockKind::Quote, lines)),
            Run::Bullet(items) => self.out.push(Block::new(BlockKind::BulletList, items)),
            Run::Ordered(items) => self.out.push(Block::new(BlockKind::NumList, items)),
            Run::Fence { language, lines } => {
                let language = if language.is_empty() {
                    PLAIN_TEXT.to_string()
                } else {
                    language
                };
                self.out
                    .push(Block::new(BlockKind::CodeBlock { language }, lines));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse;
    use pretty_assertions::assert_eq;

    #[test]
    fn table_rows_flatten_to_subheaders() {
        let blocks = parse("| Name | Age |\n| --- | --- |\n| Ada | 36 |");
        assert_eq!(
            blocks,
            vec![
                Block::single(BlockKind::Subheader { level: 2 }, "Name | Age".to_string()),
                Block::single(BlockKind::Subheader { level: 2 }, "Ada | 36".to_string()),
            ]
        );
    }

    #[test]
    fn image_degrades_to_link_preferring_alt() {
        let blocks = parse("![logo](http://x.com/l.png)");
        assert_eq!(
            blocks,
            vec![Block::single(
                BlockKind::Link {
                    url: "http://x.com/l.png".to_string()
                },
                "logo".to_string()
            )]
        );
    }

    #[test]
    fn image_without_alt_or_title_uses_the_url() {
        let blocks = parse("![](http://x.com/l.png)");
        assert_eq!(blocks[0].lines, vec!["http://x.com/l.png".to_string()]);
    }

    #[test]
    fn horizontal_rule_emits_divider_placeholder() {
        let blocks = parse("above\n\n---\n\nbelow");
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[1].kind, BlockKind::Subheader { level: 2 });
        assert_eq!(blocks[1].lines, vec!["---".to_string()]);
    }

    #[test]
    fn paragraph_with_absolute_url_reclassifies_to_link() {
        let blocks = parse("read https://example.com/post today");
        assert_eq!(
            blocks[0].kind,
            BlockKind::Link {
                url: "https://example.com/post".to_string()
            }
        );
        assert_eq!(
            blocks[0].lines,
            vec!["read https://example.com/post today".to_string()]
        );
    }

    #[test]
    fn www_prose_does_not_reclassify() {
        let blocks = parse("just mentioning www. prose");
        assert_eq!(blocks[0].kind, BlockKind::Text);
    }

    #[test]
    fn unterminated_fence_is_kept_as_code() {
        let blocks = parse("```rust\nfn main() {}\n");
        assert_eq!(
            blocks,
            vec![Block::new(
                BlockKind::CodeBlock {
                    language: "rust".to_string()
                },
                vec!["fn main() {}".to_string()]
            )]
        );
    }

    #[test]
    fn fence_interior_suppresses_all_other_rules() {
        let blocks = parse("```\n# not a header\n- not a list\n```");
        assert_eq!(
            blocks,
            vec![Block::new(
                BlockKind::CodeBlock {
                    language: PLAIN_TEXT.to_string()
                },
                vec!["# not a header".to_string(), "- not a list".to_string()]
            )]
        );
    }

    #[test]
    fn marker_only_paragraph_lines_are_dropped() {
        // `[]()` strips to nothing and must not produce an empty line.
        let blocks = parse("real text\n[]()\nmore text");
        assert_eq!(
            blocks,
            vec![Block::new(
                BlockKind::Text,
                vec!["real text".to_string(), "more text".to_string()]
            )]
        );
    }

    #[test]
    fn marker_only_input_still_yields_a_block() {
        // Every line strips to nothing, but non-blank input must still
        // produce at least one block: the input comes back verbatim.
        let blocks = parse("[]()");
        assert_eq!(
            blocks,
            vec![Block::new(BlockKind::Text, vec!["[]()".to_string()])]
        );
    }

    #[test]
    fn mixed_list_markers_split_into_two_blocks() {
        let blocks = parse("- a\n1. b");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].kind, BlockKind::BulletList);
        assert_eq!(blocks[1].kind, BlockKind::NumList);
    }

    #[test]
    fn blank_line_ends_a_quote_run() {
        let blocks = parse("> a\n\n> b");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].kind, BlockKind::Quote);
        assert_eq!(blocks[1].kind, BlockKind::Quote);
    }
}
