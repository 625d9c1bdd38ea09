//! Pending sound queue shared by all ticking timers
//!
//! Timers push resolved assets as they cross thresholds; the client drains
//! the whole queue on every poll and plays each entry once.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::cue::{Cue, TEN_SECOND_ASSET};
use super::resolver::SoundResolver;

/// FIFO of resolved asset names. Clones share the same queue.
#[derive(Debug, Clone)]
pub struct PendingSounds {
    resolver: SoundResolver,
    queue: Arc<Mutex<VecDeque<String>>>,
}

impl PendingSounds {
    pub fn new(resolver: SoundResolver) -> Self {
        Self {
            resolver,
            queue: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    pub fn resolver(&self) -> &SoundResolver {
        &self.resolver
    }

    /// Resolve `cue` and append it.
    ///
    /// Unplayable cues are dropped. The 10-second asset is dropped while a
    /// copy of it is still waiting in the queue.
    pub fn enqueue(&self, cue: Cue) {
        let Some(asset) = self.resolver.resolve(cue) else {
            return;
        };

        let mut queue = self.lock();
        if asset == TEN_SECOND_ASSET && queue.iter().any(|pending| pending == TEN_SECOND_ASSET) {
            tracing::debug!("10-second mark already pending, skipping duplicate");
            return;
        }
        queue.push_back(asset);
    }

    /// Remove and return everything queued, oldest first
    pub fn drain_all(&self) -> Vec<String> {
        self.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<String>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::StaticAssets;
    use eggtimer_types::EggSize;

    fn pending(assets: &[&str]) -> PendingSounds {
        PendingSounds::new(SoundResolver::new(
            assets.iter().copied().collect::<StaticAssets>(),
        ))
    }

    #[test]
    fn drain_preserves_emission_order() {
        let sounds = pending(&["countdown02.mp3", "countdown01.mp3", "flip_small.mp3"]);
        sounds.enqueue(Cue::Flip(EggSize::Small));
        sounds.enqueue(Cue::TwoMinutes);
        sounds.enqueue(Cue::OneMinute);

        assert_eq!(
            sounds.drain_all(),
            vec!["flip_small.mp3", "countdown02.mp3", "countdown01.mp3"]
        );
    }

    #[test]
    fn drain_empties_the_queue() {
        let sounds = pending(&["loop_beep.mp3"]);
        sounds.enqueue(Cue::LoopBeep);
        assert_eq!(sounds.len(), 1);

        assert_eq!(sounds.drain_all().len(), 1);
        assert!(sounds.is_empty());
        assert!(sounds.drain_all().is_empty());
    }

    #[test]
    fn unresolvable_cues_are_dropped() {
        let sounds = pending(&[]);
        sounds.enqueue(Cue::Flip(EggSize::Large));
        sounds.enqueue(Cue::TenSeconds);
        assert!(sounds.is_empty());
    }

    #[test]
    fn ten_second_mark_is_pending_at_most_once() {
        let sounds = pending(&["countdown10.mp3", "loop_beep.mp3"]);
        sounds.enqueue(Cue::TenSeconds);
        sounds.enqueue(Cue::LoopBeep);
        sounds.enqueue(Cue::TenSeconds);

        assert_eq!(sounds.drain_all(), vec!["countdown10.mp3", "loop_beep.mp3"]);
    }

    #[test]
    fn ten_second_dedup_ignores_drained_history() {
        let sounds = pending(&["countdown10.mp3"]);
        sounds.enqueue(Cue::TenSeconds);
        assert_eq!(sounds.drain_all(), vec!["countdown10.mp3"]);

        sounds.enqueue(Cue::TenSeconds);
        assert_eq!(sounds.drain_all(), vec!["countdown10.mp3"]);
    }

    #[test]
    fn other_assets_are_not_deduplicated() {
        let sounds = pending(&["loop_beep.mp3"]);
        sounds.enqueue(Cue::LoopBeep);
        sounds.enqueue(Cue::Finish(EggSize::Small));
        assert_eq!(sounds.drain_all(), vec!["loop_beep.mp3", "loop_beep.mp3"]);
    }

    #[test]
    fn concurrent_enqueue_loses_nothing() {
        let sounds = pending(&["loop_beep.mp3"]);
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let sounds = sounds.clone();
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        sounds.enqueue(Cue::LoopBeep);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(sounds.drain_all().len(), 200);
    }

    #[test]
    fn drain_alongside_enqueue_loses_nothing() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicBool, Ordering};

        let sounds = pending(&["loop_beep.mp3"]);
        let done = Arc::new(AtomicBool::new(false));

        let drainer = {
            let sounds = sounds.clone();
            let done = Arc::clone(&done);
            std::thread::spawn(move || {
                let mut drained = 0;
                while !done.load(Ordering::SeqCst) {
                    drained += sounds.drain_all().len();
                    std::thread::yield_now();
                }
                drained
            })
        };

        let producers: Vec<_> = (0..4)
            .map(|_| {
                let sounds = sounds.clone();
                std::thread::spawn(move || {
                    for _ in 0..500 {
                        sounds.enqueue(Cue::LoopBeep);
                    }
                })
            })
            .collect();
        for producer in producers {
            producer.join().unwrap();
        }
        done.store(true, Ordering::SeqCst);

        let drained = drainer.join().unwrap() + sounds.drain_all().len();
        assert_eq!(drained, 2000);
    }
}
