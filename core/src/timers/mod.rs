//! Timer system
//!
//! This module provides:
//! - **Egg timers**: one main + flip countdown per egg size
//! - **Loop timer**: a single self-restarting interval countdown
//! - **Registry**: owns every timer and routes client actions to them
//!
//! All timers share one [`PendingSounds`](crate::audio::PendingSounds) queue
//! and one [`DurationStore`](crate::context::DurationStore).

mod egg;
mod error;
mod looping;
mod registry;


pub use egg::EggTimer;
pub use error::TimerError;
pub use looping::LoopTimer;
pub use registry::{DEFAULT_TICK, TimerRegistry};
