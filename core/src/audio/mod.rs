//! Sound cue subsystem
//!
//! Timers emit symbolic [`Cue`]s. The [`SoundResolver`] turns each into a
//! playable asset (or drops it), and [`PendingSounds`] holds the results
//! until the client drains them.

mod assets;
mod cue;
mod queue;
mod resolver;

pub use assets::{AssetStore, SoundsDirectory, StaticAssets};
pub use cue::{COUNTDOWN_MARKS, Cue, TEN_SECOND_ASSET};
pub use queue::PendingSounds;
pub use resolver::SoundResolver;
