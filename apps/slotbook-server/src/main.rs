use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use axum::{response::Html, response::Json, routing::get, Router};
use clap::{Parser, Subcommand};
use db::{ConnectOpts, DbHandle};
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs, DatabaseConfig};
use sea_orm_migration::MigratorTrait;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use url::Url;
use utoipa::OpenApi;

use scheduling::config::SchedulingConfig;
use scheduling::domain::service::Service;
use scheduling::infra::storage::migrations::Migrator;
use scheduling::infra::storage::repo::{
    SeaOrmAppointmentsRepository, SeaOrmTimeSlotsRepository, SeaOrmUsersRepository,
};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Expand a sqlite DSN into an absolute-path DSN using a base directory.
/// - Keeps "sqlite::memory:" as-is.
/// - Normalizes backslashes into forward slashes (important on Windows).
fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path, create_dirs: bool) -> Result<String> {
    if dsn.eq_ignore_ascii_case("sqlite::memory:") || dsn.eq_ignore_ascii_case("sqlite://:memory:")
    {
        return Ok("sqlite::memory:".to_string());
    }
    let db_path = dsn
        .strip_prefix("sqlite://")
        .ok_or_else(|| anyhow!("DSN must start with sqlite:// (got: {})", dsn))?;

    let (path_str, query) = match db_path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (db_path, None),
    };

    let mut p = PathBuf::from(path_str);
    if p.as_os_str().is_empty() {
        return Err(anyhow!("Empty SQLite path in DSN"));
    }
    if p.is_relative() {
        p = base_dir.join(p);
    }

    if let Some(dir) = p.parent() {
        if create_dirs {
            std::fs::create_dir_all(dir)?;
        }
    }

    // Rebuild DSN with absolute path and normalized slashes
    let mut out = String::from("sqlite://");
    out.push_str(&p.to_string_lossy().replace('\\', "/"));
    if let Some(q) = query {
        out.push('?');
        out.push_str(q);
    }
    Ok(out)
}

/// Slotbook Server - appointment booking service
#[derive(Parser)]
#[command(name = "slotbook-server")]
#[command(about = "Slotbook Server - appointment booking service")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory database instead of the configured one
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // CLI args passed down to config/app
    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // Figment silently skips missing files; surface them as a startup error.
    if let Some(path) = cli.config.as_deref() {
        if !path.exists() {
            return Err(anyhow!("Configuration file not found: {}", path.display()));
        }
    }

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())
        .context("Failed to parse configuration file")?;

    // Apply CLI overrides (port / verbosity)
    config.apply_cli_overrides(&args);

    // Initialize logging
    let logging_config = config
        .logging
        .as_ref()
        .cloned()
        .unwrap_or_else(runtime::default_logging_config);
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!("Slotbook Server starting");

    // Print config and exit if requested
    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    // Execute command
    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config, args).await,
        Commands::Check => check_config(config).await,
    }
}

/// Detect DB backend from URL scheme (sqlite/postgres).
fn detect_from_dsn(cfg: &DatabaseConfig) -> Result<&'static str> {
    let raw = cfg.url.trim().to_owned();
    if raw.is_empty() {
        return Err(anyhow!("Database URL not configured"));
    }

    let url = Url::parse(&raw).map_err(|e| anyhow!("Invalid database DSN '{}': {}", raw, e))?;

    match url.scheme() {
        "sqlite" | "sqlite3" => Ok("sqlite"),
        "postgres" | "postgresql" => Ok("postgres"),
        other => Err(anyhow!("Unsupported database type: {}", other)),
    }
}

async fn connect_database(config: &AppConfig, args: &CliArgs) -> Result<DbHandle> {
    let db_config = config
        .database
        .clone()
        .ok_or_else(|| anyhow!("Database configuration is required"))?;

    let _backend = detect_from_dsn(&db_config)?;

    // Use URL from config; override with in-memory SQLite when --mock is set
    let config_dsn = db_config.url.trim().to_owned();
    let mut final_dsn = if args.mock {
        "sqlite://:memory:".to_string()
    } else {
        config_dsn
    };

    // Absolutize sqlite DSNs to avoid cwd issues
    if final_dsn.starts_with("sqlite://") {
        let base_dir = PathBuf::from(&config.server.home_dir);
        final_dsn = absolutize_sqlite_dsn(&final_dsn, &base_dir, true)?;
    }

    let connect_opts = ConnectOpts {
        max_conns: db_config.max_conns,
        acquire_timeout: Some(Duration::from_secs(5)),
        sqlite_busy_timeout: db_config
            .busy_timeout_ms
            .map(|ms| Duration::from_millis(ms as u64)),
        create_sqlite_dirs: true,
        ..Default::default()
    };

    tracing::info!("Connecting to database: {}", final_dsn);
    let db = DbHandle::connect(&final_dsn, connect_opts).await?;
    tracing::info!("Connected DB backend: {:?}", db.engine());

    Ok(db)
}

async fn run_server(config: AppConfig, args: CliArgs) -> Result<()> {
    tracing::info!("Initializing scheduling module...");

    let db = connect_database(&config, &args).await?;

    // Bring the schema up before serving traffic.
    Migrator::up(db.seaorm(), None)
        .await
        .context("Failed to run database migrations")?;

    let scheduling_config: SchedulingConfig = config
        .module_config("scheduling")?
        .unwrap_or_default();

    let sea = db.sea();
    let service = Arc::new(Service::new(
        Arc::new(SeaOrmUsersRepository::new(sea.clone())),
        Arc::new(SeaOrmAppointmentsRepository::new(sea.clone())),
        Arc::new(SeaOrmTimeSlotsRepository::new(sea)),
        scheduling_config,
    ));

    let router = build_router(service);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| {
            anyhow!(
                "Invalid bind address '{}:{}': {}",
                config.server.host,
                config.server.port,
                e
            )
        })?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("HTTP server bound on {}", addr);
    if let Some(public_url) = &config.server.public_url {
        tracing::info!("Public base URL: {}", public_url);
    }

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow!(e))
}

fn build_router(service: Arc<Service>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/openapi.json", get(serve_openapi))
        .route("/docs", get(serve_docs))
        .merge(scheduling::api::rest::routes::router(service))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Graceful shutdown on ctrl-c or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("HTTP server shutting down gracefully (signal)");
}

async fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    if let Some(db_config) = &config.database {
        detect_from_dsn(db_config)?;
    }

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("Server config:");
    println!("{}", config.to_yaml()?);

    Ok(())
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn serve_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn serve_docs() -> Html<&'static str> {
    Html(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8"/>
  <title>Slotbook API Docs</title>
  <script src="https://unpkg.com/@stoplight/elements@latest/web-components.min.js"></script>
  <link rel="stylesheet" href="https://unpkg.com/@stoplight/elements@latest/styles.min.css">
</head>
<body>
  <elements-api apiDescriptionUrl="/openapi.json" router="hash" layout="sidebar"></elements-api>
</body>
</html>"#,
    )
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Slotbook API",
        description = "Appointment booking service API",
        version = "0.1.0"
    ),
    paths(
        scheduling::api::rest::handlers::list_users,
        scheduling::api::rest::handlers::get_user,
        scheduling::api::rest::handlers::create_user,
        scheduling::api::rest::handlers::update_user,
        scheduling::api::rest::handlers::google_sign_in,
        scheduling::api::rest::handlers::create_appointment,
        scheduling::api::rest::handlers::get_appointment,
        scheduling::api::rest::handlers::update_appointment,
        scheduling::api::rest::handlers::list_appointments,
        scheduling::api::rest::handlers::list_user_appointments,
        scheduling::api::rest::handlers::create_time_slot,
        scheduling::api::rest::handlers::get_time_slot,
        scheduling::api::rest::handlers::update_time_slot,
        scheduling::api::rest::handlers::delete_time_slot,
        scheduling::api::rest::handlers::list_time_slots,
    ),
    components(schemas(
        scheduling::api::rest::dto::UserDto,
        scheduling::api::rest::dto::CreateUserReq,
        scheduling::api::rest::dto::UpdateUserReq,
        scheduling::api::rest::dto::GoogleSignInReq,
        scheduling::api::rest::dto::UserListDto,
        scheduling::api::rest::dto::AppointmentDto,
        scheduling::api::rest::dto::CreateAppointmentReq,
        scheduling::api::rest::dto::UpdateAppointmentReq,
        scheduling::api::rest::dto::AppointmentListDto,
        scheduling::api::rest::dto::AppointmentRangeDto,
        scheduling::api::rest::dto::AppointmentStatusDto,
        scheduling::api::rest::dto::TimeSlotDto,
        scheduling::api::rest::dto::CreateTimeSlotReq,
        scheduling::api::rest::dto::UpdateTimeSlotReq,
        scheduling::api::rest::dto::TimeSlotListDto,
    )),
    tags(
        (name = "users", description = "User management"),
        (name = "auth", description = "External identity sign-in"),
        (name = "appointments", description = "Appointment booking"),
        (name = "time-slots", description = "Bookable time slots")
    )
)]
struct ApiDoc;
