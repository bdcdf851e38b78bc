use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use skycast_core::{Config, UnitSystem};
use skycast_dashboard::{
    help_text, parse_line, render, Dashboard, DashboardEvent, DashboardSettings, DashboardState,
    Input,
};
use skycast_services::{FavoritesStore, JsonFileStore};
use skycast_weather::{ConfiguredLocation, Coordinates, GatewaySettings, WeatherProvider};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;

#[derive(Parser)]
#[command(name = "skycast")]
#[command(version)]
#[command(about = "Terminal weather dashboard")]
struct Cli {
    /// City to show at startup (overrides the configured default)
    #[arg(long)]
    city: Option<String>,

    /// Display units at startup: metric or imperial
    #[arg(long, value_name = "UNITS")]
    units: Option<UnitSystem>,

    /// Path to config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the dashboard once and exit
    #[arg(long)]
    once: bool,
}

/// What woke the main loop
enum Wake {
    Line(Option<String>),
    Outcome(Option<DashboardEvent>),
    Tick,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    skycast_core::init()?;

    let (config, _validation) =
        Config::load_validated(cli.config.as_deref()).context("Failed to load configuration")?;

    let provider = WeatherProvider::new(GatewaySettings {
        base_url: config.gateway.base_url.clone(),
        api_key: config.gateway.resolved_api_key(),
        timeout: config.gateway.timeout_secs.map(Duration::from_secs),
    })
    .context("Failed to create weather client")?;

    let favorites = FavoritesStore::load(JsonFileStore::new(config.favorites_dir()));
    let location = ConfiguredLocation::new(
        config
            .location
            .coordinates()
            .map(|(latitude, longitude)| Coordinates {
                latitude,
                longitude,
            }),
    );

    let city = cli
        .city
        .unwrap_or_else(|| config.dashboard.default_city.clone());
    let units = cli.units.unwrap_or(config.dashboard.default_units);
    let state = DashboardState::new(
        city.clone(),
        skycast_dashboard::state::unit_preference(units),
        favorites.favorites().clone(),
        DashboardSettings::from_config(&config),
    );

    let mut dash = Dashboard::new(state, provider, favorites, location);
    tracing::info!("Skycast started for {}", city);
    dash.dispatch(DashboardEvent::Search(city));

    if cli.once {
        dash.run_until_idle().await;
        print_dashboard(dash.state());
        return Ok(());
    }

    run_interactive(&mut dash).await
}

async fn run_interactive<S, L>(dash: &mut Dashboard<S, L>) -> Result<()>
where
    S: skycast_services::KeyValueStore,
    L: skycast_weather::LocationSource + 'static,
{
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut tick = tokio::time::interval(Duration::from_secs(1));
    tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

    println!("{}", help_text());
    print_dashboard(dash.state());

    loop {
        let wake = tokio::select! {
            line = lines.next_line() => Wake::Line(line.context("Failed to read input")?),
            event = dash.next_outcome() => Wake::Outcome(event),
            _ = tick.tick() => Wake::Tick,
        };

        match wake {
            Wake::Line(None) | Wake::Outcome(None) => break,
            Wake::Line(Some(line)) => match parse_line(&line) {
                Input::Dispatch(event) => dash.dispatch(event),
                Input::Help => {
                    println!("{}", help_text());
                    continue;
                }
                Input::Invalid(message) => {
                    println!("{}", message);
                    continue;
                }
                Input::Empty => continue,
            },
            Wake::Outcome(Some(event)) => dash.dispatch(event),
            Wake::Tick => {
                let had_notification = dash.state().notification.is_some();
                dash.dispatch(DashboardEvent::Tick);
                // redraw only when a notification just expired
                if !had_notification || dash.state().notification.is_some() {
                    continue;
                }
            }
        }

        if dash.state().should_quit {
            break;
        }
        print_dashboard(dash.state());
    }

    tracing::info!("Skycast stopped");
    Ok(())
}

fn print_dashboard(state: &DashboardState) {
    println!("\n{}", render(state, Utc::now()));
}
