#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the fire watch decision engine.
//!
//! Loads the configured datasets once at startup into shared state and
//! serves the decision pipeline over a JSON REST API. All computation
//! per request runs against the in-memory inputs; no request touches
//! the filesystem.

mod handlers;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use fire_watch_engine::{
    EngineConfig, EngineContext, load_prior_table, load_readings, load_table, resolve_config_path,
};
use fire_watch_grid::RiskTable;
use fire_watch_risk_models::SensorReading;

/// Shared application state, loaded once at startup.
pub struct AppState {
    /// Engine configuration plus the region index.
    pub context: EngineContext,
    /// Current-day risk grid.
    pub table: RiskTable,
    /// Prior-day risk grid, when configured.
    pub prior: Option<RiskTable>,
    /// Raw sensor readings, when configured.
    pub readings: Vec<SensorReading>,
}

/// Resolves the configuration from the environment.
///
/// Reads the path from `FIRE_WATCH_CONFIG` (default `fire-watch.toml`).
/// A missing file yields the default configuration so the server can
/// start inert; a present-but-malformed file is fatal.
///
/// # Panics
///
/// Panics if the config file exists but cannot be parsed.
#[must_use]
pub fn config_from_env() -> EngineConfig {
    let path = resolve_config_path(None);
    EngineConfig::load_or_default(&path).expect("Failed to parse engine configuration")
}

/// Starts the fire watch API server.
///
/// Loads the configuration, builds the region index, reads the grid and
/// sensor datasets, and serves the API. This is a regular async
/// function; the caller provides the runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind
/// or encounters a runtime error.
///
/// # Panics
///
/// Panics if a configured input file cannot be read or parsed.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    // Tolerate a logger already installed by the CLI wrapper.
    pretty_env_logger::try_init_custom_env("RUST_LOG").ok();

    let config = config_from_env();

    log::info!("Loading boundary dataset...");
    let context = EngineContext::load(config).expect("Failed to load boundary dataset");

    log::info!("Loading risk grid...");
    let table = load_table(context.config()).expect("Failed to load risk grid");
    let prior = load_prior_table(context.config()).expect("Failed to load prior risk grid");

    log::info!("Loading sensor readings...");
    let readings = load_readings(context.config()).expect("Failed to load sensor readings");

    let state = web::Data::new(AppState {
        context,
        table,
        prior,
        readings,
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/regions", web::get().to(handlers::regions))
                    .route("/hotspots", web::get().to(handlers::hotspots))
                    .route("/decision", web::get().to(handlers::decision))
                    .route("/sensors", web::get().to(handlers::sensors)),
            )
            .default_service(web::route().to(handlers::not_found))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
