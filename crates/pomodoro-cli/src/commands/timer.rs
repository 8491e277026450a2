use std::sync::Arc;
use std::time::Duration;

use clap::Subcommand;
use pomodoro_core::format::format_countdown;
use pomodoro_core::{Event, LogNotifier, SessionEngine, Store, TimerHost};

use super::CliResult;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run sessions in the foreground, ticking once per interval
    Run {
        /// Stop after this many completed sessions
        #[arg(long, default_value = "1")]
        sessions: u32,
        /// Milliseconds between ticks
        #[arg(long, default_value = "1000", hide = true)]
        tick_ms: u64,
        /// Print only completion events
        #[arg(long)]
        quiet: bool,
    },
    /// Print the session the timer would start with, as JSON
    Status,
}

pub fn run(store: Arc<Store>, action: TimerAction) -> CliResult {
    let engine = SessionEngine::new(store)?;

    match action {
        TimerAction::Run {
            sessions,
            tick_ms,
            quiet,
        } => {
            let mut host = TimerHost::new(engine, LogNotifier);
            if let Some(event) = host.engine_mut().start()? {
                print_event(&event)?;
            }

            let mut completed = 0;
            while completed < sessions {
                std::thread::sleep(Duration::from_millis(tick_ms));
                let Some(event) = host.on_tick()? else {
                    break;
                };
                match &event {
                    Event::Progress { remaining_secs, .. } if quiet => {
                        tracing::trace!(remaining = %format_countdown(*remaining_secs), "tick");
                    }
                    Event::SessionCompleted(done) => {
                        completed += 1;
                        print_event(&event)?;
                        eprintln!("{}", done.reward_message);
                        if !host.engine().state().is_running {
                            break;
                        }
                    }
                    _ => print_event(&event)?,
                }
            }
        }
        TimerAction::Status => {
            println!("{}", serde_json::to_string_pretty(engine.state())?);
        }
    }
    Ok(())
}

fn print_event(event: &Event) -> CliResult {
    println!("{}", serde_json::to_string(event)?);
    Ok(())
}
