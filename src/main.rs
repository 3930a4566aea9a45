mod api;
mod bootstrap;
mod config;
mod controller;
mod error;
mod model;
mod render;
mod scenarios;
mod screen;
mod state;

use clap::Parser;
use std::io::Write as _;
use std::sync::Arc;
use tokio::io::AsyncBufReadExt;
use tracing::info;

use api::OverviewFilter;
use config::{CliArgs, ConsoleConfig};
use model::PredictionForm;
use state::{ConsoleState, SharedState};

// The whole console is cooperative and single-threaded: the only suspension
// points are the network awaits, so every render runs to completion before
// anything else touches the screen.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "slawatch=info".into()),
        )
        .init();

    let args = CliArgs::parse();
    info!("Starting slawatch v{}", env!("CARGO_PKG_VERSION"));
    info!("Backend: {}", args.base_url);

    let config = ConsoleConfig::from_args(args);
    let state: SharedState = Arc::new(ConsoleState::new(config));

    if state.config.bootstrap {
        bootstrap::bootstrap(&state).await;
    }

    if let Some(command) = state.config.one_shot.clone() {
        dispatch(&state, &command).await;
        println!("{}", screen::lock(&state.screen).draw());
        return Ok(());
    }

    println!("{}", screen::lock(&state.screen).draw());
    println!("Commands: refresh [k=v ...] | train | reingest | predict k=v ... | scenarios | show | help | quit");

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("slawatch> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }
        dispatch(&state, line).await;
        println!("{}", screen::lock(&state.screen).draw());
    }

    info!("Console shutting down");
    Ok(())
}

async fn dispatch(state: &SharedState, line: &str) {
    let mut parts = line.split_whitespace();
    let Some(command) = parts.next() else {
        return;
    };
    let fields = parse_fields(parts);

    match command {
        "refresh" => {
            let filter = overview_filter(&fields);
            tokio::join!(
                bootstrap::refresh_overview(state, &filter),
                bootstrap::refresh_diagnostics(state),
                bootstrap::refresh_metrics(state),
            );
        }
        "train" => controller::run_train(state).await,
        "reingest" => controller::run_reingest(state).await,
        "predict" => controller::run_predict(state, PredictionForm { fields }).await,
        "scenarios" => {
            print!("{}", scenarios::run_scenarios(&state.api).await);
        }
        // The screen is re-drawn after every command anyway.
        "show" => {}
        "help" => {
            println!("  refresh [start=.. end=.. category=.. priority=..]");
            println!("  train                      train the breach model");
            println!("  reingest                   regenerate and re-ingest the data set");
            println!("  predict k=v ...            e.g. predict category=Security priority=urgent \\");
            println!("                             channel=email region=NA plan=pro tenure_months=12 employees=100");
            println!("  scenarios                  run the canned prediction scenarios");
            println!("  show | help | quit");
        }
        other => println!("Unknown command '{other}'; try 'help'."),
    }
}

fn parse_fields<'a>(parts: impl Iterator<Item = &'a str>) -> Vec<(String, String)> {
    let mut fields = Vec::new();
    for part in parts {
        match part.split_once('=') {
            Some((key, value)) => fields.push((key.to_string(), value.to_string())),
            None => println!("Ignoring '{part}' (expected key=value)"),
        }
    }
    fields
}

fn overview_filter(fields: &[(String, String)]) -> OverviewFilter {
    let mut filter = OverviewFilter::default();
    for (key, value) in fields {
        match key.as_str() {
            "start" => filter.start = Some(value.clone()),
            "end" => filter.end = Some(value.clone()),
            "category" => filter.category = Some(value.clone()),
            "priority" => filter.priority = Some(value.clone()),
            other => println!("Ignoring unknown filter '{other}'"),
        }
    }
    filter
}
