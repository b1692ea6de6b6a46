//! Stepgoal CLI - pick a daily step goal and simulate tracking it.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use stepgoal_core::{StepEvent, StepGoal};
use stepgoal_progress::{
    ChannelSensor, DayClock, InputMode, LocalNotifier, ManualClock, NoSensor,
    NotificationPermission, NotificationSink, ProgressSession, ProgressSnapshot, SessionUpdate,
    StepSensor, SystemClock, TrackerConfig,
};
use stepgoal_selector::{parse_progress_route, progress_route, GoalSelector, SelectorView};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stepgoal")]
#[command(about = "Daily step goal selection and milestone tracking", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Tracker config file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the recommended goal for an age
    Recommend {
        /// Age as typed by the user
        #[arg(long, allow_hyphen_values = true)]
        age: String,
    },
    /// Pick a goal, then feed it scripted sensor readings and manual presses
    Simulate {
        /// Age as typed by the user
        #[arg(long, allow_hyphen_values = true)]
        age: String,
        /// Press "+" this many times
        #[arg(long, default_value = "0")]
        increase: u32,
        /// Press "-" this many times
        #[arg(long, default_value = "0")]
        decrease: u32,
        /// Cumulative sensor readings, comma separated
        #[arg(long, value_delimiter = ',')]
        readings: Vec<u32>,
        /// Advance the clock one day before this input (0-based, repeatable)
        #[arg(long)]
        rollover_at: Vec<usize>,
        /// Press the manual increment control this many times
        #[arg(long, default_value = "0")]
        manual: usize,
        /// Behave as if notification permission was withheld
        #[arg(long)]
        deny_notifications: bool,
        /// Behave as if the device has no step counter
        #[arg(long)]
        no_sensor: bool,
        /// Start date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        start: Option<chrono::NaiveDate>,
    },
    /// Replay a JSON event list against the goal encoded in a route
    Replay {
        /// Route such as `progress/10000`
        route: String,
        /// File holding a JSON array of events
        #[arg(long)]
        events: PathBuf,
        /// Start date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        start: Option<chrono::NaiveDate>,
    },
}

/// One entry of a replay file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ReplayEvent {
    /// Sensor reading
    Reading(u32),
    /// Manual increment press
    Manual,
    /// Move the clock to the next day
    NextDay,
}

#[derive(Serialize)]
struct SimulationReport {
    selector: SelectorView,
    route: Option<String>,
    updates: Vec<SessionUpdate>,
    snapshot: Option<ProgressSnapshot>,
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Recommend { age } => {
            let mut selector = GoalSelector::new();
            selector.set_age_input(age);
            let view = selector.view();

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print_selector(&view);
            }
        }
        Commands::Simulate {
            age,
            increase,
            decrease,
            readings,
            rollover_at,
            manual,
            deny_notifications,
            no_sensor,
            start,
        } => {
            let mut selector = GoalSelector::new();
            selector.set_age_input(age);
            for _ in 0..increase {
                if let Err(e) = selector.increment() {
                    warn!("\"+\" ignored: {}", e);
                }
            }
            for _ in 0..decrease {
                if let Err(e) = selector.decrement() {
                    warn!("\"-\" ignored: {}", e);
                }
            }

            let mut report = SimulationReport {
                selector: selector.view(),
                route: None,
                updates: Vec::new(),
                snapshot: None,
            };

            let goal = match selector.confirm() {
                Ok(goal) => goal,
                Err(e) => {
                    warn!("Goal not confirmed: {}", e);
                    print_report(&report, cli.json)?;
                    return Ok(());
                }
            };

            // The goal travels through the route as the progress screen
            // would receive it.
            let route = progress_route(goal);
            let goal = parse_progress_route(&route);
            report.route = Some(route);

            let clock = ManualClock::new(start.unwrap_or_else(|| SystemClock.today()));
            let (sensor, feed) = if no_sensor {
                (Arc::new(NoSensor) as Arc<dyn StepSensor>, None)
            } else {
                let (sensor, feed) = ChannelSensor::new(readings.len());
                (Arc::new(sensor) as Arc<dyn StepSensor>, Some(feed))
            };
            let notifier = notifier(deny_notifications);

            let mut session =
                ProgressSession::new(goal, config, Arc::new(clock.clone()), sensor, notifier)?;
            let mode = session.start().await;

            // Dropping the feed after the last reading ends the sensor stream.
            if let Some(feed) = feed.filter(|_| mode == InputMode::Live) {
                for &steps in &readings {
                    feed.send(steps).await.context("sensor feed closed")?;
                }
            } else if !readings.is_empty() {
                warn!("No step sensor, ignoring {} readings", readings.len());
            }

            let controls = session.attach_controls(manual);
            for _ in 0..manual {
                controls.send(StepEvent::ManualIncrement).await?;
            }
            drop(controls);

            let mut index = 0;
            while let Some(event) = session.next_event().await {
                if rollover_at.contains(&index) {
                    let date = clock.advance_days(1);
                    info!("Clock moved to {}", date);
                }
                let update = session.handle(event).await;
                if !cli.json {
                    print_update(&update, goal);
                }
                report.updates.push(update);
                index += 1;
            }

            report.snapshot = Some(session.snapshot());
            session.stop();
            print_report(&report, cli.json)?;
        }
        Commands::Replay { route, events, start } => {
            let goal = parse_progress_route(&route);
            let events = load_replay(&events)?;

            let clock = ManualClock::new(start.unwrap_or_else(|| SystemClock.today()));
            let mut session = ProgressSession::new(
                goal,
                config,
                Arc::new(clock.clone()),
                Arc::new(NoSensor),
                notifier(false),
            )?;
            session.start().await;

            let mut updates = Vec::new();
            for event in events {
                let step = match event {
                    ReplayEvent::Reading(steps) => StepEvent::Reading(steps),
                    ReplayEvent::Manual => StepEvent::ManualIncrement,
                    ReplayEvent::NextDay => {
                        let date = clock.advance_days(1);
                        info!("Clock moved to {}", date);
                        continue;
                    }
                };
                let update = session.handle(step).await;
                if !cli.json {
                    print_update(&update, goal);
                }
                updates.push(update);
            }

            let snapshot = session.snapshot();
            if cli.json {
                let out = serde_json::json!({ "updates": updates, "snapshot": snapshot });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                print_snapshot(&snapshot);
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<TrackerConfig> {
    match path {
        Some(path) => TrackerConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(TrackerConfig::default()),
    }
}

fn load_replay(path: &Path) -> Result<Vec<ReplayEvent>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    parse_replay(&json).with_context(|| format!("parsing {}", path.display()))
}

fn parse_replay(json: &str) -> Result<Vec<ReplayEvent>> {
    Ok(serde_json::from_str(json)?)
}

fn notifier(deny: bool) -> Arc<LocalNotifier> {
    let permission = if deny {
        NotificationPermission::Denied
    } else {
        NotificationPermission::Granted
    };
    Arc::new(LocalNotifier::new(NotificationSink::Console).with_permission(permission))
}

fn print_selector(view: &SelectorView) {
    println!("Age: {:?} ({})", view.age_input, if view.age_valid { "valid" } else { "invalid" });
    println!("  Recommended steps: {}", view.recommended_steps);
    println!("  [-] {}", enabled(view.can_decrement));
    println!("  [+] {}", enabled(view.can_increment));
    println!("  [Submit] {}", enabled(view.can_confirm));
}

fn print_update(update: &SessionUpdate, goal: StepGoal) {
    let input = match update.event {
        StepEvent::Reading(steps) => format!("reading {steps}"),
        StepEvent::ManualIncrement => "manual +".to_string(),
    };
    let rollover = if update.transition.rolled_over { " (new day)" } else { "" };
    let milestone = update
        .transition
        .milestone
        .map(|m| format!(" milestone {m}"))
        .unwrap_or_default();
    println!(
        "{input}{rollover}: {} / {goal}{milestone}",
        update.transition.clamped_steps
    );
}

fn print_snapshot(snapshot: &ProgressSnapshot) {
    println!("Progress ({:?})", snapshot.mode);
    println!("  Day: {}", snapshot.state.current_day());
    println!(
        "  Steps: {} / {} ({:.0}%)",
        snapshot.state.clamped_steps(),
        snapshot.goal,
        snapshot.percentage
    );
    println!("  Counter: {}", snapshot.state.cumulative_steps());
    println!("  Last milestone: {}%", snapshot.state.last_milestone());
    println!(
        "  Notifications: {} posted, {} denied, {} failed",
        snapshot.notifications.posted, snapshot.notifications.denied, snapshot.notifications.failed
    );
}

fn print_report(report: &SimulationReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    print_selector(&report.selector);
    if let Some(route) = &report.route {
        println!("Route: {route}");
    }
    if let Some(snapshot) = &report.snapshot {
        print_snapshot(snapshot);
    }
    Ok(())
}

fn enabled(on: bool) -> &'static str {
    if on { "enabled" } else { "disabled" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_replay_events() {
        let events = parse_replay(r#"[{"reading": 400}, "manual", "next_day"]"#).unwrap();
        assert_eq!(
            events,
            vec![ReplayEvent::Reading(400), ReplayEvent::Manual, ReplayEvent::NextDay]
        );
    }

    #[test]
    fn test_parse_replay_rejects_unknown() {
        assert!(parse_replay(r#"["jump"]"#).is_err());
    }

    #[test]
    fn test_cli_parses_simulate() {
        let cli = Cli::try_parse_from([
            "stepgoal", "simulate", "--age", "30", "--readings", "400,600,1100",
            "--rollover-at", "2", "--manual", "3", "--json",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Simulate { readings, rollover_at, manual, .. } => {
                assert_eq!(readings, vec![400, 600, 1100]);
                assert_eq!(rollover_at, vec![2]);
                assert_eq!(manual, 3);
            }
            _ => panic!("expected simulate"),
        }
    }

    #[test]
    fn test_cli_accepts_negative_age_text() {
        let cli = Cli::try_parse_from(["stepgoal", "recommend", "--age", "-4"]).unwrap();
        match cli.command {
            Commands::Recommend { age } => assert_eq!(age, "-4"),
            _ => panic!("expected recommend"),
        }
    }
}
