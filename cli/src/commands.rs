use crate::CliContext;
use eggtimer_core::{AppConfigExt, DurationConfig, TimerAction, TimerDurations, TimerId, TimerRegistry};
use std::io::Write;

/// Start or reset a timer and announce the cue to play right away
pub fn timer_action(name: &str, action: TimerAction, ctx: &CliContext) {
    match ctx.timers.dispatch_named(name, action) {
        Ok(Some(cue)) => println!("play: {}", describe_cue(&cue, ctx)),
        Ok(None) => println!("(silent)"),
        Err(e) => println!("{e}. Known timers: small, medium, large, loop"),
    }
}

/// Poll once: remaining times plus every sound queued since the last poll
pub fn show_status(ctx: &CliContext) {
    let snapshot = ctx.timers.poll();
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(e) => println!("Failed to render status: {e}"),
    }
}

/// Poll once per tick for `ticks` ticks, printing whenever sounds arrive
pub async fn watch(ctx: &CliContext, ticks: u32) {
    let tick = ctx.config.read().await.tick_interval();

    for _ in 0..ticks {
        tokio::time::sleep(tick).await;
        let snapshot = ctx.timers.poll();
        if snapshot.sounds.is_empty() {
            continue;
        }
        println!(
            "small {:>4}/{:<3} medium {:>4}/{:<3} large {:>4}/{:<3} loop {:>4}",
            snapshot.small.remain,
            snapshot.small.flip_remain,
            snapshot.medium.remain,
            snapshot.medium.flip_remain,
            snapshot.large.remain,
            snapshot.large.flip_remain,
            snapshot.loop_remain,
        );
        for sound in &snapshot.sounds {
            println!("  play: {}", describe_cue(sound, ctx));
        }
    }
}

pub async fn show_config(ctx: &CliContext) {
    let durations = ctx.timers.durations();
    println!("{:<8} {:>6} {:>6}", "Timer", "Main", "Flip");
    println!("{}", "-".repeat(22));
    for timer in TimerId::ALL {
        if let Some(d) = durations.get(timer) {
            println!("{:<8} {:>6} {:>6}", timer.as_str(), d.main, d.flip);
        }
    }

    let config = ctx.config.read().await;
    println!("\nTick: {}ms", config.tick_interval().as_millis());
    for root in ctx.sounds.roots() {
        let marker = if root.is_dir() { "" } else { " (missing)" };
        println!("Sounds: {}{}", root.display(), marker);
    }
}

pub async fn set_duration(ctx: &CliContext, name: &str, main: u32, flip: Option<u32>) {
    let Some(timer) = TimerRegistry::lookup(name) else {
        println!("Unknown timer '{name}'. Known timers: small, medium, large, loop");
        return;
    };

    let updated = updated_durations(ctx.timers.durations(), timer, main, flip);
    if let Err(e) = ctx.timers.apply_durations(updated.clone()) {
        println!("Update rejected: {e}");
        return;
    }

    let mut config = ctx.config.write().await;
    config.durations = updated;
    match config.save() {
        Ok(()) => println!("Saved {timer} durations (takes effect at next start)"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to persist duration settings");
            println!("Durations applied but not saved: {e}");
        }
    }
}

pub fn exit(ctx: &CliContext) -> Result<(), String> {
    ctx.timers.stop_all();
    writeln!(std::io::stdout(), "quitting...").map_err(|e| e.to_string())?;
    std::io::stdout().flush().map_err(|e| e.to_string())
}

/// Copy of `current` with one timer's lengths replaced.
/// An omitted flip keeps the timer's existing flip length.
pub fn updated_durations(
    current: DurationConfig,
    timer: TimerId,
    main: u32,
    flip: Option<u32>,
) -> DurationConfig {
    let flip = flip
        .or_else(|| current.get(timer).map(|d| d.flip))
        .unwrap_or(0);
    current.with(timer, TimerDurations::new(main, flip))
}

fn describe_cue(cue: &str, ctx: &CliContext) -> String {
    match ctx.sounds.locate(cue) {
        Some(path) => format!("{cue} ({})", path.display()),
        None => cue.to_string(),
    }
}
