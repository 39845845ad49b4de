mod catalog;
mod config;
mod constants;
mod feed;
mod geo;
mod report;
mod store;
mod web;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use crate::catalog::{model_time, synthesize_track, Catalog, OrbitBand};
use crate::config::{parse_duration, to_time_delta, Config};
use crate::feed::{
    refresh_once, resolve_satellites, window_start, AnyProvider, Poller, PositionProvider,
    DEFAULT_SATELLITES,
};
use crate::geo::LongitudeConvention;
use crate::store::PositionStore;
use crate::web::AppState;

#[derive(Parser)]
#[command(name = "orbit-view")]
#[command(about = "Satellite positions from a live feed and a built-in orbit catalog")]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Longitude range for reported positions
    #[arg(long, global = true, value_enum)]
    longitude: Option<LongitudeConvention>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in orbit catalog
    Catalog {
        #[arg(short, long, value_enum)]
        band: Option<OrbitBand>,
    },
    /// Print modelled positions of catalog satellites
    Simulate {
        #[arg(short, long, value_enum)]
        band: Option<OrbitBand>,
        /// Seconds since the model epoch; defaults to the current time of day
        #[arg(short, long)]
        offset: Option<f64>,
    },
    /// List satellites the provider currently has data for
    Satellites,
    /// Fetch one window of positions and print the latest sample of each satellite
    Track {
        /// Satellite ids; `all` queries every active satellite
        #[arg(short, long, value_delimiter = ',')]
        satellites: Vec<String>,
        #[arg(short, long, value_parser = parse_duration)]
        window: Option<Duration>,
    },
    /// Refresh positions periodically until interrupted
    Watch {
        #[arg(short, long, value_delimiter = ',')]
        satellites: Vec<String>,
        #[arg(short, long, value_parser = parse_duration)]
        interval: Option<Duration>,
    },
    /// Serve the HTTP API over catalog and live tracks
    Serve {
        #[arg(short, long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match Config::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };
    if let Some(convention) = cli.longitude {
        config.feed.longitude = convention;
    }

    let catalog = match Catalog::builtin() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Invalid built-in catalog: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Catalog { band } => {
            report::print_catalog(&catalog, band.unwrap_or(config.catalog.band));
            ExitCode::SUCCESS
        }
        Commands::Simulate { band, offset } => simulate(&catalog, &config, band, offset),
        Commands::Satellites => satellites(&config).await,
        Commands::Track { satellites, window } => {
            if !satellites.is_empty() {
                config.feed.satellites = satellites;
            }
            if let Some(window) = window {
                config.feed.time_window = window;
            }
            if let Err(e) = config.feed.validate() {
                eprintln!("{}", e);
                return ExitCode::FAILURE;
            }
            track(&config).await
        }
        Commands::Watch {
            satellites,
            interval,
        } => {
            if !satellites.is_empty() {
                config.feed.satellites = satellites;
            }
            if let Some(interval) = interval {
                config.feed.refresh_interval = interval;
            }
            if let Err(e) = config.feed.validate() {
                eprintln!("{}", e);
                return ExitCode::FAILURE;
            }
            watch(&config).await
        }
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.web.bind = bind;
            }
            serve(catalog, &config).await
        }
    }
}

fn simulate(
    catalog: &Catalog,
    config: &Config,
    band: Option<OrbitBand>,
    offset: Option<f64>,
) -> ExitCode {
    let band = band.unwrap_or(config.catalog.band);
    let now = chrono::Utc::now();
    let epoch = now.date_naive().and_time(chrono::NaiveTime::MIN).and_utc();
    let at = match offset {
        Some(seconds) => match model_time(epoch, seconds) {
            Some(at) => at,
            None => {
                eprintln!("Offset {} s is outside the supported time range", seconds);
                return ExitCode::FAILURE;
            }
        },
        None => now,
    };

    let store = PositionStore::new();
    for entry in catalog.in_band(band) {
        let track = synthesize_track(
            entry,
            epoch,
            at,
            at,
            chrono::Duration::zero(),
            config.feed.longitude,
        );
        store.replace_track(&entry.params.id, track);
    }

    println!("{} at {}s after epoch", band.label(), (at - epoch).num_seconds());
    report::print_latest(&store);
    ExitCode::SUCCESS
}

fn build_provider(config: &Config) -> Option<AnyProvider> {
    let Some(provider_config) = &config.provider else {
        eprintln!("No provider configured; add a `provider` section to the config file");
        return None;
    };
    match provider_config.build() {
        Ok(p) => Some(p),
        Err(e) => {
            eprintln!("Error creating provider: {}", e);
            None
        }
    }
}

async fn satellites_to_query<P: PositionProvider>(provider: &P, config: &Config) -> Vec<String> {
    match resolve_satellites(provider, &config.feed.satellites).await {
        Ok(ids) if !ids.is_empty() => ids,
        Ok(_) => {
            log::warn!("Provider lists no active satellites, using defaults");
            DEFAULT_SATELLITES.iter().map(|s| s.to_string()).collect()
        }
        Err(e) => {
            log::warn!("Could not list satellites ({}), using defaults", e);
            DEFAULT_SATELLITES.iter().map(|s| s.to_string()).collect()
        }
    }
}

async fn satellites(config: &Config) -> ExitCode {
    let Some(provider) = build_provider(config) else {
        return ExitCode::FAILURE;
    };

    match provider.observatories().await {
        Ok(observatories) => {
            let active = feed::active_observatories(observatories, chrono::Utc::now());
            report::print_observatories(&active);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error listing satellites: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn track(config: &Config) -> ExitCode {
    let Some(provider) = build_provider(config) else {
        return ExitCode::FAILURE;
    };

    let ids = satellites_to_query(&provider, config).await;
    let job = config.feed.job(ids);
    let store = PositionStore::new();

    let outcome = refresh_once(&provider, &store, &job, chrono::Utc::now()).await;
    report::print_refresh(&outcome);
    report::print_latest(&store);

    if outcome.installed.is_empty() && !outcome.failures.is_empty() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

async fn watch(config: &Config) -> ExitCode {
    let Some(provider) = build_provider(config) else {
        return ExitCode::FAILURE;
    };

    let ids = satellites_to_query(&provider, config).await;
    let job = config.feed.job(ids);
    let store = Arc::new(PositionStore::new());
    let mut poller = Poller::new();

    let mut reports = match poller.start(
        Arc::new(provider),
        store.clone(),
        job,
        config.feed.refresh_interval,
    ) {
        Ok(rx) => rx,
        Err(e) => {
            eprintln!("Error starting poller: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!(
        "Refreshing every {}, press Ctrl+C to stop",
        humantime::format_duration(config.feed.refresh_interval)
    );

    loop {
        tokio::select! {
            cycle = reports.recv() => match cycle {
                Some(outcome) => {
                    report::print_refresh(&outcome);
                    report::print_latest(&store);
                }
                None => break,
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    let cycles = poller.stop().await;
    println!("Stopped after {} refreshes", cycles);
    ExitCode::SUCCESS
}

async fn serve(catalog: Catalog, config: &Config) -> ExitCode {
    let store = Arc::new(PositionStore::new());
    let convention = config.feed.longitude;

    let end = chrono::Utc::now();
    let start = window_start(end, to_time_delta(config.feed.time_window));
    let epoch = end.date_naive().and_time(chrono::NaiveTime::MIN).and_utc();
    let step = to_time_delta(config.catalog.sample_step);
    for entry in catalog.in_band(config.catalog.band) {
        store.replace_track(
            &entry.params.id,
            synthesize_track(entry, epoch, start, end, step, convention),
        );
    }
    log::info!("Seeded {} catalog tracks", store.len());

    let mut poller = Poller::new();
    if config.provider.is_some() {
        let Some(provider) = build_provider(config) else {
            return ExitCode::FAILURE;
        };
        let ids = satellites_to_query(&provider, config).await;
        let job = config.feed.job(ids);
        // reports are logged by the poller itself
        if let Err(e) = poller.start(
            Arc::new(provider),
            store.clone(),
            job,
            config.feed.refresh_interval,
        ) {
            eprintln!("Error starting poller: {}", e);
            return ExitCode::FAILURE;
        }
    }

    let state = AppState {
        catalog: Arc::new(catalog),
        store,
        convention,
    };

    let result = web::run_server(&config.web.bind, state).await;
    if poller.is_running() {
        let cycles = poller.stop().await;
        log::info!("Poller stopped after {} refreshes", cycles);
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}
