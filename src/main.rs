use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::bail;
use chrono::Utc;
use clap::{Parser, Subcommand};
use rand::Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use scrivener::auth::PasswordHasher;
use scrivener::config::{self, AppConfig, DEFAULT_SECRET_KEY, SECRET_KEY_ENV};
use scrivener::server::{AppState, create_router};
use scrivener::store::{SqliteStore, Store};
use scrivener::types::User;

#[derive(Parser)]
#[command(name = "scrivener")]
#[command(about = "An admin backend for Markdown blogs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Administrative commands
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },

    /// Start the server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(long, short, default_value = "8000")]
        port: u16,

        /// Data directory for the credential database
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Directory the Markdown posts live in
        #[arg(long, default_value = "./site/src/contents/posts")]
        content_dir: String,

        /// Root of the static site project; rebuilds run here
        #[arg(long, default_value = "./site")]
        site_dir: String,

        /// Deployment mode: "development" or "production"
        #[arg(long, default_value = "development")]
        environment: String,

        /// Signing algorithm for session tokens
        #[arg(long, default_value = "HS256")]
        algorithm: String,

        /// Session token lifetime in minutes
        #[arg(long, default_value = "1440")]
        token_ttl_minutes: i64,

        /// Comma-separated CORS allow-list, e.g. "https://blog.example.com".
        /// Defaults to localhost origins in development and none in production.
        #[arg(long)]
        allowed_origins: Option<String>,
    },
}

#[derive(Subcommand)]
enum AdminCommands {
    /// Initialize the server (create the database and the admin account)
    Init {
        /// Data directory for the credential database
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Admin username (prompted for when omitted)
        #[arg(long)]
        username: Option<String>,

        /// Admin password (generated when omitted with --non-interactive)
        #[arg(long)]
        password: Option<String>,

        /// Skip interactive prompts
        #[arg(long)]
        non_interactive: bool,
    },
}

fn generate_password() -> String {
    rand::thread_rng()
        .sample_iter(&rand::distributions::Alphanumeric)
        .take(24)
        .map(char::from)
        .collect()
}

fn prompt_username() -> anyhow::Result<String> {
    let username = inquire::Text::new("Username:")
        .with_validator(|input: &str| {
            if input.trim().is_empty() {
                Err("Username cannot be empty".into())
            } else if input.contains(char::is_whitespace) {
                Err("Username cannot contain whitespace".into())
            } else {
                Ok(inquire::validator::Validation::Valid)
            }
        })
        .prompt()?;
    Ok(username)
}

fn prompt_password() -> anyhow::Result<String> {
    let password = inquire::Password::new("Password:")
        .with_validator(|input: &str| {
            if input.len() < 8 {
                Err("Password must be at least 8 characters".into())
            } else {
                Ok(inquire::validator::Validation::Valid)
            }
        })
        .prompt()?;
    Ok(password)
}

fn run_init(
    data_dir: String,
    username: Option<String>,
    password: Option<String>,
    non_interactive: bool,
) -> anyhow::Result<()> {
    let data_path: PathBuf = data_dir.into();
    fs::create_dir_all(&data_path)?;

    let store = SqliteStore::new(data_path.join("scrivener.db"))?;
    store.initialize()?;

    if store.has_users()? {
        bail!("Server already initialized. An admin account exists in {}", data_path.display());
    }

    let username = match username {
        Some(username) => username,
        None if non_interactive => "admin".to_string(),
        None => prompt_username()?,
    };

    let (password, generated) = match password {
        Some(password) => (password, false),
        None if non_interactive => (generate_password(), true),
        None => (prompt_password()?, false),
    };

    let hasher = PasswordHasher::new();
    let user = User {
        id: Uuid::new_v4().to_string(),
        username: username.clone(),
        password_hash: hasher.hash(&password)?,
        created_at: Utc::now(),
    };
    store.create_user(&user)?;

    println!();
    println!("========================================");
    println!("Created admin account '{username}'");
    if generated {
        println!();
        println!("Generated password (save this, it won't be shown again):");
        println!();
        println!("  {password}");
    }
    println!("========================================");
    println!();

    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn run_serve(
    host: String,
    port: u16,
    data_dir: String,
    content_dir: String,
    site_dir: String,
    environment: String,
    algorithm: String,
    token_ttl_minutes: i64,
    allowed_origins: Option<String>,
) -> anyhow::Result<()> {
    let secret_key =
        std::env::var(SECRET_KEY_ENV).unwrap_or_else(|_| DEFAULT_SECRET_KEY.to_string());

    let config = AppConfig {
        host,
        port,
        data_dir: data_dir.into(),
        content_dir: content_dir.into(),
        site_dir: site_dir.into(),
        secret_key,
        algorithm: config::parse_algorithm(&algorithm)?,
        token_ttl_minutes,
        environment: environment.parse()?,
        allowed_origins: allowed_origins
            .as_deref()
            .map(config::parse_allowed_origins),
    };

    config.validate()?;

    if !config.db_path().exists() {
        bail!(
            "Server not initialized. Run 'scrivener admin init' first to create the admin account."
        );
    }

    fs::create_dir_all(&config.content_dir)?;

    let store = SqliteStore::new(config.db_path())?;
    store.initialize()?;

    if !store.has_users()? {
        bail!(
            "Server not initialized. Run 'scrivener admin init' first to create the admin account."
        );
    }

    info!("Running in {} mode", config.environment);
    info!("Serving posts from {}", config.content_dir.display());

    let addr = config.socket_addr()?;
    let state = Arc::new(AppState::new(Arc::new(store), config));
    let app = create_router(state);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("scrivener=info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Admin { command } => match command {
            AdminCommands::Init {
                data_dir,
                username,
                password,
                non_interactive,
            } => {
                run_init(data_dir, username, password, non_interactive)?;
            }
        },
        Commands::Serve {
            host,
            port,
            data_dir,
            content_dir,
            site_dir,
            environment,
            algorithm,
            token_ttl_minutes,
            allowed_origins,
        } => {
            run_serve(
                host,
                port,
                data_dir,
                content_dir,
                site_dir,
                environment,
                algorithm,
                token_ttl_minutes,
                allowed_origins,
            )
            .await?;
        }
    }

    Ok(())
}
