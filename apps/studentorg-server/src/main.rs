mod config;
mod logging;
mod signals;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use axum::http::{HeaderName, StatusCode};
use clap::{Parser, Subcommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use studentorg::StudentOrgModule;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::{AppConfig, CliOverrides};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Student organization records server
#[derive(Parser)]
#[command(name = "studentorg-server")]
#[command(about = "Student organization records server")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration (YAML) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory SQLite database
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) defaults -> 2) YAML (if provided) -> 3) env (STUDENTORG__*) -> 4) CLI overrides
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(CliOverrides {
        port: cli.port,
        mock: cli.mock,
        verbose: cli.verbose,
    });

    logging::init(&config.logging);

    if cli.print_config {
        println!("Effective configuration:\n{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(&config),
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    println!("Configuration is valid");
    println!("{}", config.to_yaml()?);
    Ok(())
}

async fn connect(config: &AppConfig) -> Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(config.database.dsn.clone());
    opts.max_connections(config.database.max_connections)
        .sqlx_logging(false);
    if config.database.max_connections == 1 {
        // In-memory SQLite lives as long as its single connection.
        opts.min_connections(1);
    }
    let dsn = redact_dsn(&config.database.dsn);
    Database::connect(opts)
        .await
        .with_context(|| format!("failed to connect to database ({dsn})"))
}

/// Strip credentials from a DSN before it reaches logs or errors.
fn redact_dsn(dsn: &str) -> String {
    match (dsn.find("://"), dsn.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://[REDACTED]{}", &dsn[..scheme_end], &dsn[at..])
        }
        _ => dsn.to_owned(),
    }
}

async fn run_server(config: AppConfig) -> Result<()> {
    let bind_addr: std::net::SocketAddr = config
        .server
        .bind_addr
        .parse()
        .with_context(|| format!("invalid bind address: {}", config.server.bind_addr))?;

    tracing::info!(dsn = %redact_dsn(&config.database.dsn), "Connecting to database");
    let conn = connect(&config).await?;
    StudentOrgModule::migrate(&conn).await?;

    let module = StudentOrgModule::init(&conn, &config.deploy)?;
    let router = apply_middleware_stack(
        module.router(),
        Duration::from_secs(config.server.request_timeout_secs),
    );

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(addr = %bind_addr, "Student organization server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = signals::wait_for_shutdown().await {
                tracing::error!(error = %e, "Signal handling failed, shutting down");
            }
        })
        .await
        .context("server error")?;

    conn.close().await.context("failed to close database")?;
    tracing::info!("Server stopped");
    Ok(())
}

/// Layers are registered innermost first. At runtime requests pass through
/// `SetRequestId` → `PropagateRequestId` → Trace → Timeout → Router.
fn apply_middleware_stack(router: Router, request_timeout: Duration) -> Router {
    let x_request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let router = router.layer(TimeoutLayer::with_status_code(
        StatusCode::GATEWAY_TIMEOUT,
        request_timeout,
    ));
    apply_trace_layer(router)
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid))
}

fn apply_trace_layer(router: Router) -> Router {
    use tracing::field::Empty;

    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(|req: &axum::http::Request<axum::body::Body>| {
                let rid = req
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("n/a");

                tracing::info_span!(
                    "http_request",
                    method = %req.method(),
                    uri = %req.uri().path(),
                    request_id = %rid,
                    status = Empty,
                    latency_ms = Empty,
                )
            })
            .on_response(
                |res: &axum::http::Response<axum::body::Body>,
                 latency: Duration,
                 span: &tracing::Span| {
                    span.record("status", res.status().as_u16());
                    span.record("latency_ms", latency.as_millis());
                    tracing::info!(parent: span, "request completed");
                },
            ),
    )
}
