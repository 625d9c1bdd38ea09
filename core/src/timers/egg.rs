//! Egg countdown timer (one per size)
//!
//! Each timer runs two independent countdowns per cycle:
//! - **main**: counts the cooking time, announcing the 2-minute, 1-minute and
//!   10-second marks, then the finish cue
//! - **flip**: counts down to the "flip the egg" reminder (a flip length of 0
//!   fires the reminder as soon as the cycle starts)
//!
//! # Lifecycle
//!
//! 1. `start()` reloads durations and spawns both countdown tasks
//! 2. Tasks tick once per interval until they reach 0 or their cycle is cancelled
//! 3. Natural completion queues the cue and reloads from the current config
//! 4. `reset()` cancels the cycle; cancelled tasks exit without a cue
//!
//! Cues are resolved and queued after the state lock is released, since
//! resolving touches the sounds directory.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use eggtimer_types::{EggSize, EggStatus};
use tokio_util::sync::CancellationToken;

use crate::audio::{COUNTDOWN_MARKS, Cue, PendingSounds};
use crate::context::DurationStore;

/// Which marks of `COUNTDOWN_MARKS` already fired this cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct FiredMarks([bool; COUNTDOWN_MARKS.len()]);

impl FiredMarks {
    /// Returns the mark's cue the first time `remaining` hits it this cycle
    fn fire(&mut self, remaining: u32) -> Option<Cue> {
        let index = COUNTDOWN_MARKS
            .iter()
            .position(|(secs, _)| *secs == remaining)?;
        if self.0[index] {
            return None;
        }
        self.0[index] = true;
        Some(COUNTDOWN_MARKS[index].1)
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug)]
struct EggState {
    remaining_main: u32,
    remaining_flip: u32,
    running_main: bool,
    running_flip: bool,
    marks: FiredMarks,
    /// Cancelled when the current cycle is reset or replaced
    cycle: CancellationToken,
}

impl EggState {
    fn remaining(&self, countdown: Countdown) -> u32 {
        match countdown {
            Countdown::Main => self.remaining_main,
            Countdown::Flip => self.remaining_flip,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Countdown {
    Main,
    Flip,
}

#[derive(Debug)]
struct EggShared {
    size: EggSize,
    tick: Duration,
    durations: DurationStore,
    sounds: PendingSounds,
    state: Mutex<EggState>,
}

impl EggShared {
    fn lock(&self) -> MutexGuard<'_, EggState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reload after natural completion and return the cue to queue
    fn finish(&self, countdown: Countdown, state: &mut EggState) -> Cue {
        let durations = self.durations.egg(self.size);
        // Either completion reloads flip, even mid-countdown
        state.remaining_flip = durations.flip;
        match countdown {
            Countdown::Main => {
                state.running_main = false;
                state.remaining_main = durations.main;
                tracing::info!(timer = %self.size, next_main = durations.main, "Egg timer finished");
                Cue::Finish(self.size)
            }
            Countdown::Flip => {
                state.running_flip = false;
                tracing::info!(timer = %self.size, "Flip reminder");
                Cue::Flip(self.size)
            }
        }
    }
}

/// Countdown clock for one egg size.
///
/// `start` and `reset` spawn onto the ambient Tokio runtime and must be called
/// from within it.
#[derive(Debug)]
pub struct EggTimer {
    shared: Arc<EggShared>,
}

impl EggTimer {
    pub fn new(
        size: EggSize,
        durations: DurationStore,
        sounds: PendingSounds,
        tick: Duration,
    ) -> Self {
        let initial = durations.egg(size);
        let state = EggState {
            remaining_main: initial.main,
            remaining_flip: initial.flip,
            running_main: false,
            running_flip: false,
            marks: FiredMarks::default(),
            cycle: CancellationToken::new(),
        };

        Self {
            shared: Arc::new(EggShared {
                size,
                tick,
                durations,
                sounds,
                state: Mutex::new(state),
            }),
        }
    }

    pub fn size(&self) -> EggSize {
        self.shared.size
    }

    /// Begin a fresh cycle and return the start cue to play immediately.
    ///
    /// Starting a running timer cancels its current cycle first, so at most
    /// one pair of countdown tasks is ever live.
    pub fn start(&self) -> Option<String> {
        let shared = &self.shared;
        let durations = shared.durations.egg(shared.size);

        let cycle = {
            let mut state = shared.lock();
            if state.running_main || state.running_flip {
                tracing::debug!(timer = %shared.size, "Restarting running egg timer");
            }
            state.cycle.cancel();
            state.cycle = CancellationToken::new();
            state.remaining_main = durations.main;
            state.remaining_flip = durations.flip;
            state.running_main = true;
            state.running_flip = true;
            state.marks.clear();
            state.cycle.clone()
        };

        tokio::spawn(run_countdown(
            Arc::clone(shared),
            Countdown::Main,
            cycle.clone(),
        ));
        tokio::spawn(run_countdown(Arc::clone(shared), Countdown::Flip, cycle));

        tracing::debug!(
            timer = %shared.size,
            main = durations.main,
            flip = durations.flip,
            "Egg timer started"
        );
        shared.sounds.resolver().resolve(Cue::Start(shared.size))
    }

    /// Stop both countdowns, reload durations, and return the reset cue.
    pub fn reset(&self) -> Option<String> {
        let shared = &self.shared;
        let durations = shared.durations.egg(shared.size);

        {
            let mut state = shared.lock();
            state.cycle.cancel();
            state.running_main = false;
            state.running_flip = false;
            state.remaining_main = durations.main;
            state.remaining_flip = durations.flip;
            state.marks.clear();
        }

        tracing::debug!(timer = %shared.size, "Egg timer reset");
        shared.sounds.resolver().resolve(Cue::Reset(shared.size))
    }

    /// Cancel the current cycle without a cue or reload
    pub fn halt(&self) {
        let mut state = self.shared.lock();
        state.cycle.cancel();
        state.running_main = false;
        state.running_flip = false;
    }

    pub fn is_running(&self) -> bool {
        let state = self.shared.lock();
        state.running_main || state.running_flip
    }

    pub fn status(&self) -> EggStatus {
        let state = self.shared.lock();
        EggStatus {
            remain: state.remaining_main,
            flip_remain: state.remaining_flip,
            running: state.running_main,
            flip_running: state.running_flip,
        }
    }
}

async fn run_countdown(shared: Arc<EggShared>, countdown: Countdown, cycle: CancellationToken) {
    loop {
        let finished = {
            let mut state = shared.lock();
            // Reset/restart cancel under this lock, so this check is authoritative
            if cycle.is_cancelled() {
                return;
            }
            (state.remaining(countdown) == 0)
                .then(|| shared.finish(countdown, &mut state))
        };
        if let Some(cue) = finished {
            shared.sounds.enqueue(cue);
            return;
        }

        tokio::select! {
            _ = cycle.cancelled() => return,
            _ = tokio::time::sleep(shared.tick) => {}
        }

        let mark = {
            let mut state = shared.lock();
            if cycle.is_cancelled() {
                return;
            }
            match countdown {
                Countdown::Main => {
                    state.remaining_main = state.remaining_main.saturating_sub(1);
                    let remaining = state.remaining_main;
                    let mark = state.marks.fire(remaining);
                    if mark.is_some() {
                        tracing::debug!(timer = %shared.size, remaining, "Countdown mark");
                    }
                    mark
                }
                Countdown::Flip => {
                    state.remaining_flip = state.remaining_flip.saturating_sub(1);
                    None
                }
            }
        };
        if let Some(cue) = mark {
            shared.sounds.enqueue(cue);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::OnceLock;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use eggtimer_types::{DurationConfig, TimerDurations, TimerId};

    use crate::audio::{AssetStore, SoundResolver};

    /// Asset store that notes whether the timer state was locked during a lookup
    #[derive(Default)]
    struct LockWatch {
        timer: OnceLock<Arc<EggShared>>,
        lookups: AtomicUsize,
        locked_during_lookup: AtomicBool,
    }

    struct WatchedAssets(Arc<LockWatch>);

    impl AssetStore for WatchedAssets {
        fn exists(&self, _asset: &str) -> bool {
            if let Some(timer) = self.0.timer.get() {
                self.0.lookups.fetch_add(1, Ordering::SeqCst);
                if timer.state.try_lock().is_err() {
                    self.0.locked_during_lookup.store(true, Ordering::SeqCst);
                }
            }
            true
        }
    }

    #[tokio::test(start_paused = true)]
    async fn cues_resolve_outside_state_lock() {
        let watch = Arc::new(LockWatch::default());
        let sounds = PendingSounds::new(SoundResolver::new(WatchedAssets(Arc::clone(&watch))));
        let durations = DurationStore::new(
            DurationConfig::default()
                .with(TimerId::Egg(EggSize::Small), TimerDurations::new(12, 1)),
        )
        .unwrap();
        let timer = EggTimer::new(EggSize::Small, durations, sounds.clone(), Duration::from_secs(1));
        assert!(watch.timer.set(Arc::clone(&timer.shared)).is_ok());

        timer.start();
        tokio::time::sleep(Duration::from_millis(12_500)).await;

        assert_eq!(
            sounds.drain_all(),
            vec!["flip_small.mp3", "countdown10.mp3", "finish_small.mp3"]
        );
        // start cue plus the three queued cues
        assert_eq!(watch.lookups.load(Ordering::SeqCst), 4);
        assert!(!watch.locked_during_lookup.load(Ordering::SeqCst));
    }

    #[test]
    fn marks_fire_once_per_cycle() {
        let mut marks = FiredMarks::default();
        assert_eq!(marks.fire(120), Some(Cue::TwoMinutes));
        assert_eq!(marks.fire(120), None);
        assert_eq!(marks.fire(60), Some(Cue::OneMinute));
        assert_eq!(marks.fire(10), Some(Cue::TenSeconds));
        assert_eq!(marks.fire(10), None);

        marks.clear();
        assert_eq!(marks.fire(10), Some(Cue::TenSeconds));
    }

    #[test]
    fn other_values_are_not_marks() {
        let mut marks = FiredMarks::default();
        for remaining in [0, 1, 9, 11, 59, 61, 119, 121, 300] {
            assert_eq!(marks.fire(remaining), None, "{remaining} is not a mark");
        }
    }
}
