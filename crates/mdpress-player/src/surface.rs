use crate::gesture::Gesture;

/// Opaque handle to one editable region of the host editor.
///
/// Handles are only valid for the call they were resolved for; the host may
/// replace its input node at any gesture, so callers re-resolve through
/// [`EditorSurface::focused_region`] instead of caching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionId(pub u64);

#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("editable region {0:?} no longer exists")]
    StaleRegion(RegionId),
    #[error("editor rejected the gesture: {0}")]
    Rejected(String),
}

/// The injection seam between the player and a concrete editor.
///
/// Implementations perform whatever editor-specific mechanics make a block
/// appear correctly formatted. The player is the single writer during a run;
/// a surface never has to deal with interleaved callers.
pub trait EditorSurface {
    /// Resolves the currently focused editable region, fresh on every call.
    /// `None` means no region has focus, which is fatal to the run.
    fn focused_region(&mut self) -> Option<RegionId>;

    /// Applies a formatting gesture to the region.
    fn apply_gesture(&mut self, region: RegionId, gesture: &Gesture) -> Result<(), SurfaceError>;

    /// Writes the block's text into the region.
    fn insert_text(&mut self, region: RegionId, text: &str) -> Result<(), SurfaceError>;

    /// Moves input focus to a fresh empty region below `region`.
    fn advance(&mut self, region: RegionId) -> Result<(), SurfaceError>;
}

/// One recorded surface call, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Gesture(RegionId, Gesture),
    Insert(RegionId, String),
    Advance(RegionId),
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Gesture(r, g) => write!(f, "region {}: style {g}", r.0),
            Action::Insert(r, text) => write!(f, "region {}: insert {text:?}", r.0),
            Action::Advance(r) => write!(f, "region {}: enter", r.0),
        }
    }
}

/// In-memory [`EditorSurface`] that records every call.
///
/// Used by the CLI to show what a run would do to the editor, and by tests
/// to assert strict ordering. Regions are numbered from zero; `advance`
/// focuses the next number.
#[derive(Debug, Default)]
pub struct TranscriptSurface {
    focused: Option<RegionId>,
    next: u64,
    actions: Vec<Action>,
    /// When set, focus is dropped after this many advances. Simulates the
    /// host deselecting its input partway through a run.
    lose_focus_after: Option<u64>,
}

impl TranscriptSurface {
    /// A surface with region 0 focused, ready for a run.
    pub fn new() -> Self {
        Self {
            focused: Some(RegionId(0)),
            next: 1,
            ..Self::default()
        }
    }

    /// A surface with nothing focused; the first block fails.
    pub fn unfocused() -> Self {
        Self::default()
    }

    /// Drops focus after `n` completed blocks.
    pub fn lose_focus_after(mut self, n: u64) -> Self {
        self.lose_focus_after = Some(n);
        self
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }
}

impl EditorSurface for TranscriptSurface {
    fn focused_region(&mut self) -> Option<RegionId> {
        self.focused
    }

    fn apply_gesture(&mut self, region: RegionId, gesture: &Gesture) -> Result<(), SurfaceError> {
        self.check(region)?;
        self.actions.push(Action::Gesture(region, gesture.clone()));
        Ok(())
    }

    fn insert_text(&mut self, region: RegionId, text: &str) -> Result<(), SurfaceError> {
        self.check(region)?;
        self.actions.push(Action::Insert(region, text.to_string()));
        Ok(())
    }

    fn advance(&mut self, region: RegionId) -> Result<(), SurfaceError> {
        self.check(region)?;
        self.actions.push(Action::Advance(region));
        if self.lose_focus_after == Some(self.next) {
            self.focused = None;
        } else {
            self.focused = Some(RegionId(self.next));
        }
        self.next += 1;
        Ok(())
    }
}

impl TranscriptSurface {
    fn check(&self, region: RegionId) -> Result<(), SurfaceError> {
        if self.focused == Some(region) {
            Ok(())
        } else {
            Err(SurfaceError::StaleRegion(region))
        }
    }
}
