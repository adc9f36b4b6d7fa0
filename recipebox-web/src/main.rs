//! recipebox - recipe collection web service
//!
//! `serve` runs the HTTP service; the remaining subcommands manage users
//! and categories directly in the database.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use recipebox_common::config::{resolve_config_path, ServiceConfig, TomlConfig, DEFAULT_LOG_LEVEL};
use recipebox_common::db::{categories, init_database, sessions, users};
use recipebox_common::model::NewCategory;
use recipebox_web::logging::{apply_log_level, init_logging};
use recipebox_web::{build_router, AppState};
use sqlx::SqlitePool;
use tokio::signal;
use tracing::{info, warn};

/// Command-line arguments for recipebox
#[derive(Parser, Debug)]
#[command(name = "recipebox")]
#[command(about = "Recipe collection web service")]
#[command(version)]
struct Args {
    /// Folder holding the database (overrides RECIPEBOX_ROOT_FOLDER and the config file)
    #[arg(short, long)]
    root_folder: Option<PathBuf>,

    /// Config file (overrides RECIPEBOX_CONFIG)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP service
    Serve {
        /// Address to bind (overrides bind_addr)
        #[arg(long)]
        bind: Option<String>,

        /// Port to listen on (overrides port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Create a login account
    CreateUser {
        username: String,

        #[arg(long, env = "RECIPEBOX_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Add a recipe category
    AddCategory {
        name: String,

        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// List login accounts
    ListUsers,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_handle = init_logging(DEFAULT_LOG_LEVEL);

    let config_path = resolve_config_path(args.config.as_deref());
    let toml_config = match &config_path {
        Some(path) => TomlConfig::load(path)?,
        None => TomlConfig::default(),
    };
    let config = ServiceConfig::resolve(args.root_folder.as_deref(), &toml_config)?;

    if let Err(e) = apply_log_level(&log_handle, &config.log_level) {
        warn!("Failed to apply log level '{}': {}", config.log_level, e);
    }

    info!(
        "Starting recipebox v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    if let Some(path) = &config_path {
        info!("Config file: {}", path.display());
    }

    config.ensure_root_folder()?;
    let db_path = config.database_path();
    info!("Database path: {}", db_path.display());

    let pool = init_database(&db_path)
        .await
        .context("Failed to initialize database")?;

    match args.command {
        Command::Serve { bind, port } => serve(pool, config, bind, port).await,
        Command::CreateUser { username, password } => {
            let password = password
                .context("A password is required: pass --password or set RECIPEBOX_PASSWORD")?;
            let user = users::create_user(&pool, &username, &password).await?;
            println!("Created user '{}' ({})", user.username, user.guid);
            Ok(())
        }
        Command::AddCategory { name, description } => {
            let category =
                categories::insert_category(&pool, &NewCategory { name, description }).await?;
            println!("Created category '{}' (id {})", category.name, category.id);
            Ok(())
        }
        Command::ListUsers => {
            let all = users::list_users(&pool).await?;
            if all.is_empty() {
                println!("No users. Create one with: recipebox create-user <username>");
            }
            for user in all {
                println!("{}\t{}", user.username, user.guid);
            }
            Ok(())
        }
    }
}

async fn serve(
    pool: SqlitePool,
    config: ServiceConfig,
    bind: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    match sessions::purge_expired_sessions(&pool).await {
        Ok(0) => {}
        Ok(purged) => info!("Purged {} expired sessions", purged),
        Err(e) => warn!("Failed to purge expired sessions: {}", e),
    }

    let addr = format!(
        "{}:{}",
        bind.unwrap_or_else(|| config.bind_addr.clone()),
        port.unwrap_or(config.port)
    );

    let state = AppState::from_config(pool, &config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("recipebox listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
