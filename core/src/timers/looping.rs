//! Repeating interval timer
//!
//! Counts the loop cycle down forever, beeping each time it wraps and
//! announcing the 10-second mark once per cycle. Unlike the egg timers,
//! a second `start()` while running is ignored. Cues are queued after the
//! state lock is released.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use eggtimer_types::LoopStatus;
use tokio_util::sync::CancellationToken;

use crate::audio::{Cue, PendingSounds};
use crate::context::DurationStore;

const TEN_SECOND_MARK: u32 = 10;

#[derive(Debug)]
struct LoopState {
    remaining: u32,
    running: bool,
    fired_ten: bool,
    cycle: CancellationToken,
}

#[derive(Debug)]
struct LoopShared {
    tick: Duration,
    durations: DurationStore,
    sounds: PendingSounds,
    state: Mutex<LoopState>,
}

impl LoopShared {
    fn lock(&self) -> MutexGuard<'_, LoopState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// The singleton loop timer
#[derive(Debug)]
pub struct LoopTimer {
    shared: Arc<LoopShared>,
}

impl LoopTimer {
    pub fn new(durations: DurationStore, sounds: PendingSounds, tick: Duration) -> Self {
        let state = LoopState {
            remaining: durations.loop_main(),
            running: false,
            fired_ten: false,
            cycle: CancellationToken::new(),
        };

        Self {
            shared: Arc::new(LoopShared {
                tick,
                durations,
                sounds,
                state: Mutex::new(state),
            }),
        }
    }

    /// Start looping and return the start cue. Returns None, and changes
    /// nothing, if the loop is already running.
    pub fn start(&self) -> Option<String> {
        let shared = &self.shared;
        let cycle = {
            let mut state = shared.lock();
            if state.running {
                tracing::debug!("Loop timer already running, ignoring start");
                return None;
            }
            state.running = true;
            state.remaining = shared.durations.loop_main();
            state.fired_ten = false;
            state.cycle = CancellationToken::new();
            state.cycle.clone()
        };

        tokio::spawn(run_loop(Arc::clone(shared), cycle));

        tracing::debug!("Loop timer started");
        shared.sounds.resolver().resolve(Cue::LoopStart)
    }

    /// Stop looping, reload the cycle length, and return the reset cue.
    pub fn reset(&self) -> Option<String> {
        let shared = &self.shared;
        {
            let mut state = shared.lock();
            state.cycle.cancel();
            state.running = false;
            state.remaining = shared.durations.loop_main();
            state.fired_ten = false;
        }

        tracing::debug!("Loop timer reset");
        shared.sounds.resolver().resolve(Cue::LoopReset)
    }

    /// Cancel the running loop without a cue or reload
    pub fn halt(&self) {
        let mut state = self.shared.lock();
        state.cycle.cancel();
        state.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.shared.lock().running
    }

    pub fn status(&self) -> LoopStatus {
        let state = self.shared.lock();
        LoopStatus {
            remain: state.remaining,
            running: state.running,
        }
    }
}

async fn run_loop(shared: Arc<LoopShared>, cycle: CancellationToken) {
    loop {
        let wrapped = {
            let mut state = shared.lock();
            if cycle.is_cancelled() {
                return;
            }
            let wrapped = state.remaining == 0;
            if wrapped {
                state.remaining = shared.durations.loop_main();
                state.fired_ten = false;
                tracing::info!(next = state.remaining, "Loop cycle complete");
            }
            wrapped
        };
        if wrapped {
            shared.sounds.enqueue(Cue::LoopBeep);
        }

        tokio::select! {
            _ = cycle.cancelled() => return,
            _ = tokio::time::sleep(shared.tick) => {}
        }

        let ten_seconds = {
            let mut state = shared.lock();
            if cycle.is_cancelled() {
                return;
            }
            state.remaining = state.remaining.saturating_sub(1);
            let mark = state.remaining == TEN_SECOND_MARK && !state.fired_ten;
            if mark {
                state.fired_ten = true;
            }
            mark
        };
        if ten_seconds {
            shared.sounds.enqueue(Cue::TenSeconds);
        }
    }
}
