use clap::{Parser, Subcommand};
use eggtimer_cli::commands;
use eggtimer_cli::logging;
use eggtimer_cli::readline;
use eggtimer_cli::CliContext;
use eggtimer_core::TimerAction;
use std::io::Write;

#[tokio::main]
async fn main() -> Result<(), String> {
    let _log_guard = logging::init();

    let ctx = CliContext::new().map_err(|e| {
        tracing::error!(error = %e, "Cannot build timers from configuration");
        format!("invalid configuration: {e}")
    })?;

    loop {
        let Some(line) = readline()? else {
            commands::exit(&ctx)?;
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &ctx).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                write!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(version, about = "egg timer")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    Start {
        #[arg(short, long)]
        timer: String,
    },
    Reset {
        #[arg(short, long)]
        timer: String,
    },
    Status,
    Watch {
        #[arg(short, long, default_value_t = 10)]
        seconds: u32,
    },
    Config,
    SetDuration {
        #[arg(short, long)]
        timer: String,
        #[arg(short, long)]
        main: u32,
        #[arg(short, long)]
        flip: Option<u32>,
    },
    Exit,
}

async fn respond(line: &str, ctx: &CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "eggtimer".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match &cli.command {
        Some(Commands::Start { timer }) => commands::timer_action(timer, TimerAction::Start, ctx),
        Some(Commands::Reset { timer }) => commands::timer_action(timer, TimerAction::Reset, ctx),
        Some(Commands::Status) => commands::show_status(ctx),
        Some(Commands::Watch { seconds }) => commands::watch(ctx, *seconds).await,
        Some(Commands::Config) => commands::show_config(ctx).await,
        Some(Commands::SetDuration { timer, main, flip }) => {
            commands::set_duration(ctx, timer, *main, *flip).await
        }
        Some(Commands::Exit) => {
            commands::exit(ctx)?;
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}
