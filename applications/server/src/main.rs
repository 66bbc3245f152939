/// Bazaar Server - Regional marketplace backend
use anyhow::Context;
use bazaar_core::{types::Region, MarketStore};
use bazaar_server::{
    config::ServerConfig,
    create_router,
    services::accounts::{self, Registration},
    state::AppState,
    AuthService,
};
use bazaar_storage::SqliteMarket;
use clap::{Parser, Subcommand};
use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bazaar-server")]
#[command(about = "Bazaar regional marketplace server", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Register a new user
    AddUser {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
        /// Region to register in (East or West)
        #[arg(short, long)]
        location: Region,
    },
    /// List all users of a region
    ListUsers {
        #[arg(short, long)]
        location: Region,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bazaar_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load(cli.config.as_deref())?;
    config.validate()?;

    match cli.command {
        Commands::Serve => serve(config).await?,
        Commands::AddUser {
            username,
            email,
            password,
            location,
        } => {
            add_user(
                config,
                Registration {
                    username,
                    email,
                    password,
                    region: location,
                },
            )
            .await?;
        }
        Commands::ListUsers { location } => list_users(config, location).await?,
    }

    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Bazaar Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let store = open_store(&config).await?;
    tracing::info!("Database connected");

    let auth_service = Arc::new(auth_service(&config));
    let app_state = AppState::new(Arc::new(store), auth_service);
    let app = create_router(app_state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn add_user(config: ServerConfig, registration: Registration) -> anyhow::Result<()> {
    let store = open_store(&config).await?;
    let auth_service = auth_service(&config);

    let user = accounts::register(&store, &auth_service, registration)
        .await
        .context("Failed to register user")?;

    println!("Created user {} ({}) in {}", user.username, user.id, user.region);
    Ok(())
}

async fn list_users(config: ServerConfig, region: Region) -> anyhow::Result<()> {
    let store = open_store(&config).await?;
    let users = store.get_all_users(region).await?;

    println!("Users in {}:", region);
    for user in users {
        println!(
            "  {} - {} <{}> balance {:.2}, earnings {:.2}",
            user.id, user.username, user.email, user.balance, user.earnings
        );
    }

    Ok(())
}

fn auth_service(config: &ServerConfig) -> AuthService {
    AuthService::new(
        config.auth.token_secret.clone(),
        config.auth.token_expiration_days,
    )
    .with_hash_cost(config.auth.password_hash_cost)
}

async fn open_store(config: &ServerConfig) -> anyhow::Result<SqliteMarket> {
    ensure_database_dir(&config.storage.database_url)?;
    SqliteMarket::connect(&config.storage.database_url)
        .await
        .with_context(|| format!("Failed to open {}", config.storage.database_url))
}

/// SQLite creates the file but not its parent directory
fn ensure_database_dir(database_url: &str) -> anyhow::Result<()> {
    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .unwrap_or(database_url);

    if path.starts_with(':') {
        return Ok(());
    }

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    Ok(())
}
