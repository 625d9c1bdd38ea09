//! Cue → asset resolution with fallback substitution

use std::sync::Arc;

use eggtimer_types::EggSize;

use super::assets::AssetStore;
use super::cue::Cue;

/// Maps cues to playable assets.
///
/// An exact asset always wins. When it is missing:
/// - medium start/reset borrow the large asset, then the small one
/// - any finish cue borrows the loop beep
/// - everything else is unplayable
#[derive(Clone)]
pub struct SoundResolver {
    assets: Arc<dyn AssetStore>,
}

impl SoundResolver {
    pub fn new(assets: impl AssetStore + 'static) -> Self {
        Self {
            assets: Arc::new(assets),
        }
    }

    /// Asset to play for `cue`, or None if nothing playable exists
    pub fn resolve(&self, cue: Cue) -> Option<String> {
        let exact = cue.asset_name();
        if self.assets.exists(&exact) {
            return Some(exact);
        }

        let resolved = match cue {
            Cue::Start(EggSize::Medium) => {
                self.first_present(&[Cue::Start(EggSize::Large), Cue::Start(EggSize::Small)])
            }
            Cue::Reset(EggSize::Medium) => {
                self.first_present(&[Cue::Reset(EggSize::Large), Cue::Reset(EggSize::Small)])
            }
            Cue::Finish(_) => self.first_present(&[Cue::LoopBeep]),
            _ => None,
        };

        match &resolved {
            Some(asset) => tracing::debug!(cue = %cue, asset = %asset, "Substituted sound asset"),
            None => tracing::debug!(cue = %cue, asset = %exact, "No playable asset for cue"),
        }
        resolved
    }

    fn first_present(&self, candidates: &[Cue]) -> Option<String> {
        candidates
            .iter()
            .map(Cue::asset_name)
            .find(|name| self.assets.exists(name))
    }
}

impl std::fmt::Debug for SoundResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundResolver").finish_non_exhaustive()
    }
}
