use std::env;
use std::fmt;
use std::process::ExitCode;

use anyhow::Context;
use chrono::{Local, NaiveTime, TimeZone, Utc};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use schedule::config::{self, Args, Defaults, Invocation};
use schedule::{events_from_source, reference_instant, select_window, Event};

const LOG_VAR: &str = "SCHEDULE_LOG";

fn setup_logging() {
    let filter = EnvFilter::try_from_env(LOG_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_events<Z: TimeZone>(events: &[Event], zone: &Z)
where
    Z::Offset: fmt::Display,
{
    for event in events {
        println!("{}", event.render_in(zone));
    }
}

fn show(events: &[Event], args: &Args) {
    match &args.timezone {
        Some(zone) => print_events(events, zone),
        None => print_events(events, &Local),
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let events = events_from_source(&args.source).context("failed to load schedule")?;

    if args.all {
        show(&events, &args);
    }

    let reference = match args.date {
        Some(date) => date.and_time(NaiveTime::MIN).and_utc(),
        None => reference_instant(Utc::now()),
    };

    let window = select_window(&events, reference);
    debug!(
        %reference,
        anchor = window.anchor(),
        anchor_found = window.anchor_found(),
        "selected window"
    );

    show(window.events(), &args);
    Ok(())
}

fn main() -> ExitCode {
    setup_logging();

    let argv: Vec<String> = env::args().skip(1).collect();
    let args = match config::parse(&argv, Defaults::from_env()) {
        Ok(Invocation::Run(args)) => args,
        Ok(Invocation::Help(usage)) => {
            println!("{usage}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("{err}");
            eprintln!("{}", config::usage());
            return ExitCode::from(2);
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
