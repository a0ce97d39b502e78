//! # Markdown parsing
//!
//! Two-phase line-oriented parsing:
//!
//! 1. **Line classification** (`classify`): each line is classified into a
//!    [`LineClass`](classify::LineClass) by fixed-priority dispatch over
//!    local facts only.
//! 2. **Block construction** (`builder`): a [`BlockBuilder`](builder::BlockBuilder)
//!    consumes classified lines, tracks the open run (paragraph, quote, list,
//!    fence), and emits [`Block`]s in source order.
//!
//! Inline markers are stripped (`inline`) on every emitted line except fence
//! contents, which are raw zones.
//!
//! ## Key invariants
//!
//! - [`parse`] never panics and never returns an error: any internal failure
//!   degrades to a single text block wrapping the raw input.
//! - Block order exactly mirrors source line order.
//! - Fence contents are never re-interpreted as other block kinds.

pub mod builder;
pub mod classify;
pub mod inline;

use crate::block::{Block, BlockKind};

use builder::BlockBuilder;
use classify::LineClassifier;
use inline::InlineStripper;

/// Internal scan failure. Never escapes [`parse`]; carried so the fallback
/// path has something concrete to degrade on.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("parser rule failed to compile: {0}")]
    Rule(#[from] regex::Error),
}

/// Parses Markdown text into an ordered sequence of typed blocks.
///
/// Never fails: if the scan itself breaks, the whole input is returned as a
/// single degraded text block, so non-blank input always yields at least one
/// block.
pub fn parse(text: &str) -> Vec<Block> {
    match scan(text) {
        // A scan can come back empty for non-blank input when every line
        // strips down to nothing (e.g. a document of bare markers). The
        // non-empty guarantee still holds: degrade to the verbatim block.
        Ok(blocks) if blocks.is_empty() && !text.trim().is_empty() => fallback_block(text),
        Ok(blocks) => blocks,
        Err(_) => fallback_block(text),
    }
}

fn scan(text: &str) -> Result<Vec<Block>, ScanError> {
    let classifier = LineClassifier::new()?;
    let stripper = InlineStripper::new()?;
    let mut builder = BlockBuilder::new(&classifier, &stripper);

    for line in text.lines() {
        let class = classifier.classify(line);
        builder.push(line, class);
    }

    Ok(builder.finish())
}

/// Fallback-on-error policy: the raw input verbatim, one text block.
fn fallback_block(text: &str) -> Vec<Block> {
    let lines: Vec<String> = text.lines().map(str::to_string).collect();
    if lines.is_empty() {
        return Vec::new();
    }
    vec![Block::new(BlockKind::Text, lines)]
}
