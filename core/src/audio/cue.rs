//! Symbolic sound cues emitted by the timers

use std::fmt;

use eggtimer_types::EggSize;

/// Asset for the 10-second mark. At most one copy may be pending at a time.
pub const TEN_SECOND_ASSET: &str = "countdown10.mp3";

/// A logical sound event, independent of which asset ends up playing it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Start(EggSize),
    Reset(EggSize),
    Finish(EggSize),
    Flip(EggSize),
    TwoMinutes,
    OneMinute,
    TenSeconds,
    LoopStart,
    LoopReset,
    LoopBeep,
}

/// Remaining-time marks that announce themselves once per countdown cycle
pub const COUNTDOWN_MARKS: [(u32, Cue); 3] = [
    (120, Cue::TwoMinutes),
    (60, Cue::OneMinute),
    (10, Cue::TenSeconds),
];

impl Cue {
    /// File name of the asset that plays this cue exactly
    pub fn asset_name(&self) -> String {
        match self {
            Cue::Start(size) => format!("start_{size}.mp3"),
            Cue::Reset(size) => format!("reset_{size}.mp3"),
            Cue::Finish(size) => format!("finish_{size}.mp3"),
            Cue::Flip(size) => format!("flip_{size}.mp3"),
            Cue::TwoMinutes => "countdown02.mp3".to_string(),
            Cue::OneMinute => "countdown01.mp3".to_string(),
            Cue::TenSeconds => TEN_SECOND_ASSET.to_string(),
            Cue::LoopStart => "loop_start.mp3".to_string(),
            Cue::LoopReset => "loop_reset.mp3".to_string(),
            Cue::LoopBeep => "loop_beep.mp3".to_string(),
        }
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cue::Start(size) => write!(f, "start ({size})"),
            Cue::Reset(size) => write!(f, "reset ({size})"),
            Cue::Finish(size) => write!(f, "finish ({size})"),
            Cue::Flip(size) => write!(f, "flip ({size})"),
            Cue::TwoMinutes => f.write_str("2-minute mark"),
            Cue::OneMinute => f.write_str("1-minute mark"),
            Cue::TenSeconds => f.write_str("10-second mark"),
            Cue::LoopStart => f.write_str("loop start"),
            Cue::LoopReset => f.write_str("loop reset"),
            Cue::LoopBeep => f.write_str("loop beep"),
        }
    }
}
