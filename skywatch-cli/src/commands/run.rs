//! Run command - start the fetcher and render the live board.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use skywatch::app::{AppConfig, SkywatchApp};
use skywatch::fetcher::FetchMetrics;
use skywatch::opensky::OpenSkyClient;
use skywatch::store::SharedStore;

use crate::error::CliError;
use crate::runner::CliRunner;
use crate::ui::dashboard::traffic::TrafficSource;
use crate::ui::dashboard::utils::{print_session_summary, print_simple_status};
use crate::ui::{Dashboard, DashboardConfig};

/// Arguments for the run command.
pub struct RunArgs {
    pub airports: Option<PathBuf>,
    pub url: Option<String>,
    pub interval: Option<u64>,
    pub headless: bool,
    pub debug: bool,
}

/// Run the run command.
pub fn run(args: RunArgs) -> Result<(), CliError> {
    let interactive = !args.headless && atty::is(atty::Stream::Stdout);

    let runner = CliRunner::new(args.debug, !interactive)?;
    runner.log_startup("run");
    let config = runner.config();

    // CLI takes precedence, then config
    let mut app_config = AppConfig::from_config_file(config);
    if let Some(path) = args.airports {
        app_config = app_config.with_airports_file(path);
    }
    if let Some(url) = args.url {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(CliError::Config(format!(
                "--url must start with http:// or https://, got '{}'",
                url
            )));
        }
        app_config = app_config.with_base_url(url);
    }
    if let Some(secs) = args.interval {
        app_config = app_config.with_poll_interval(Duration::from_secs(secs));
    }

    let poll_interval = app_config.fetcher.poll_interval;
    let dashboard_config = DashboardConfig {
        refresh: config.refresh_interval(),
        base_url: app_config.base_url.clone(),
        poll_interval,
    };

    if !interactive {
        println!("Skywatch v{}", skywatch::VERSION);
        println!("==============");
        println!();
        println!("Source:   {}", app_config.base_url);
        match app_config.airports_file {
            Some(ref path) => println!("Airports: {}", path.display()),
            None => println!("Airports: (none)"),
        }
        println!("Interval: {}s", poll_interval.as_secs());
        println!(
            "Auth:     {}",
            if app_config.credentials.is_some() {
                "basic"
            } else {
                "anonymous"
            }
        );
        println!();
        println!("Press Ctrl+C to exit");
        println!();
    }

    // Separate client for on-demand airport traffic in the dashboard.
    let traffic_client: Option<Arc<dyn TrafficSource>> = if interactive {
        let client: Arc<dyn TrafficSource> = Arc::new(OpenSkyClient::new(
            app_config.base_url.clone(),
            app_config.credentials.clone(),
            app_config.request_timeout,
        )?);
        Some(client)
    } else {
        None
    };

    let app = SkywatchApp::start(app_config)?;
    let store = app.store();
    let metrics = app.metrics();

    let signal_store = Arc::clone(&store);
    ctrlc::set_handler(move || {
        signal_store.request_exit();
    })
    .map_err(|e| CliError::Config(format!("Failed to set signal handler: {}", e)))?;

    let started = Instant::now();
    let result = if interactive {
        run_dashboard(
            Arc::clone(&store),
            Arc::clone(&metrics),
            dashboard_config,
            traffic_client,
        )
    } else {
        run_headless(&store, &metrics, poll_interval);
        Ok(())
    };

    // Exit must be requested even when the dashboard failed.
    if !app.shutdown() {
        tracing::warn!("A worker thread panicked during shutdown");
    }

    print_session_summary(&metrics.snapshot(), started.elapsed());
    result
}

fn run_dashboard(
    store: Arc<SharedStore>,
    metrics: Arc<FetchMetrics>,
    config: DashboardConfig,
    traffic: Option<Arc<dyn TrafficSource>>,
) -> Result<(), CliError> {
    let mut dashboard = Dashboard::new(store, metrics, config).map_err(CliError::Terminal)?;
    if let Some(source) = traffic {
        dashboard = dashboard.with_traffic(source);
    }
    let result = dashboard.run().map_err(CliError::Terminal);
    dashboard.restore().map_err(CliError::Terminal)?;
    result
}

/// Print a status line every `interval` until exit is requested.
fn run_headless(store: &SharedStore, metrics: &FetchMetrics, interval: Duration) {
    while !store.wait_for_exit(interval) {
        print_simple_status(store, &metrics.snapshot());
    }
    println!();
    println!("Received shutdown signal, stopping...");
}
