//! Block playback: replays a parsed block sequence as simulated user input
//! against an editor behind the [`EditorSurface`] seam.
//!
//! The player is strictly sequential: every side effect for block *n*,
//! including its settle-wait, completes before block *n + 1* starts. The
//! focused region is re-resolved before every block rather than cached,
//! because the host editor may replace its input node on formatting
//! gestures.

pub mod gesture;
pub mod player;
pub mod protocol;
pub mod surface;

pub use gesture::Gesture;
pub use player::{Pacing, PlayError, PlayReport, Player};
pub use protocol::{Request, Response, dispatch};
pub use surface::{Action, EditorSurface, RegionId, SurfaceError, TranscriptSurface};
