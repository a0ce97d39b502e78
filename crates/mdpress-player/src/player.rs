use std::thread;
use std::time::Duration;

use mdpress_engine::Block;

use crate::gesture::Gesture;
use crate::surface::{EditorSurface, SurfaceError};

/// Timing for a playback run.
///
/// `per_char` models typing speed (the insert is one atomic write, paced by
/// text length); `settle` is the bounded wait after each block that lets the
/// host editor's own reactive update cycle finish. Not a retry loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub per_char: Duration,
    pub settle: Duration,
}

impl Pacing {
    /// No waiting at all. Used by tests and transcript-only runs.
    pub const fn zero() -> Self {
        Self {
            per_char: Duration::ZERO,
            settle: Duration::ZERO,
        }
    }

    pub const fn new(per_char: Duration, settle: Duration) -> Self {
        Self { per_char, settle }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        // Timings the target editor is known to keep up with.
        Self {
            per_char: Duration::from_millis(2),
            settle: Duration::from_millis(5000),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PlayError {
    /// No editable region had focus when a block was due. Fatal to the run;
    /// blocks already played stay in the editor.
    #[error("no editable region has focus (stopped after {played} of {total} blocks)")]
    NoFocusedRegion { played: usize, total: usize },
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayReport {
    pub blocks_played: usize,
}

/// Drains a block sequence into an [`EditorSurface`], strictly in order.
///
/// For each block: re-resolve focus, apply the kind's gesture, write the
/// text, advance to a fresh region, then settle-wait. Nothing from block
/// *n + 1* starts before all of that completes for block *n*. There is no
/// cancellation and no retry: a failed block fails the run.
pub struct Player {
    pacing: Pacing,
}

impl Player {
    pub fn new(pacing: Pacing) -> Self {
        Self { pacing }
    }

    pub fn play(
        &self,
        surface: &mut dyn EditorSurface,
        blocks: &[Block],
    ) -> Result<PlayReport, PlayError> {
        for (played, block) in blocks.iter().enumerate() {
            let region = surface
                .focused_region()
                .ok_or(PlayError::NoFocusedRegion {
                    played,
                    total: blocks.len(),
                })?;

            let gesture = Gesture::for_block(block);
            log::debug!("block {played}: {gesture} into region {}", region.0);
            surface.apply_gesture(region, &gesture)?;

            let text = block.lines.join("\n");
            surface.insert_text(region, &text)?;
            if !self.pacing.per_char.is_zero() {
                thread::sleep(self.pacing.per_char * text.chars().count() as u32);
            }

            surface.advance(region)?;
            if !self.pacing.settle.is_zero() {
                thread::sleep(self.pacing.settle);
            }
        }

        log::info!("played {} blocks", blocks.len());
        Ok(PlayReport {
            blocks_played: blocks.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_pacing_matches_the_editor_timings() {
        let pacing = Pacing::default();
        assert_eq!(pacing.per_char, Duration::from_millis(2));
        assert_eq!(pacing.settle, Duration::from_millis(5000));
    }

    #[test]
    fn custom_pacing_is_kept() {
        let pacing = Pacing::new(Duration::from_millis(1), Duration::from_millis(10));
        assert_eq!(pacing.settle, Duration::from_millis(10));
        assert!(!pacing.per_char.is_zero());
    }

    #[test]
    fn zero_pacing_never_sleeps() {
        assert!(Pacing::zero().per_char.is_zero());
        assert!(Pacing::zero().settle.is_zero());
    }
}
