//! CLI entry point for carelink

mod views;

use anyhow::{bail, Result};
use carelink_client::{AppContext, AuthOutcome, Credentials};
use carelink_core::config::{Config, ConfigLoader, LoggingConfig};
use carelink_core::logging::init_logging;
use carelink_core::routes::Navigation;
use clap::{Parser, Subcommand};
use console::style;
use dialoguer::{Confirm, Input, Password};
use std::path::{Path, PathBuf};
use tracing::info;
use views::CatalogLoader;

#[derive(Parser)]
#[command(name = "carelink")]
#[command(about = "Terminal client for the carelink health assistant")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration directory
    #[arg(short, long, global = true)]
    config_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write an initial configuration
    Init,
    /// Log in to the backend
    Login {
        /// Account username
        #[arg(short, long, conflicts_with = "email", required_unless_present = "email")]
        username: Option<String>,
        /// Account email
        #[arg(short, long)]
        email: Option<String>,
        /// Password; prompted for when omitted
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Create a new account
    Register {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        email: String,
        /// Password; prompted for when omitted
        #[arg(short, long)]
        password: Option<String>,
        /// Account role, e.g. user or caretaker
        #[arg(short, long)]
        role: Option<String>,
    },
    /// End the current session
    Logout,
    /// Show configuration and session state
    Status,
    /// List the navigable routes
    Routes,
    /// Navigate to a route and show its view
    Open {
        /// Route path, e.g. /chatbot
        path: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_loader = if let Some(dir) = cli.config_dir {
        ConfigLoader::with_dir(dir)
    } else {
        ConfigLoader::new()
    };

    match cli.command {
        Commands::Init => {
            let _log_guard = init_logging(&logging_under(&config_loader, LoggingConfig::default()));
            info!("Running init command");
            run_init(&config_loader)
        }
        command => run_command(&config_loader, command).await,
    }
}

/// Place a relative log directory inside the config directory
fn logging_under(loader: &ConfigLoader, mut logging: LoggingConfig) -> LoggingConfig {
    if Path::new(&logging.dir).is_relative() {
        logging.dir = loader
            .config_dir()
            .join(&logging.dir)
            .to_string_lossy()
            .into_owned();
    }
    logging
}

/// Start the application context and run one command against it
async fn run_command(loader: &ConfigLoader, command: Commands) -> Result<()> {
    let config = loader.load()?;
    let _log_guard = init_logging(&logging_under(loader, config.logging.clone()));

    let ctx = AppContext::start(config, CatalogLoader)?;

    let result = match command {
        Commands::Init => Ok(()),
        Commands::Login {
            username,
            email,
            password,
        } => {
            info!("Running login command");
            run_login(&ctx, username, email, password).await
        }
        Commands::Register {
            username,
            email,
            password,
            role,
        } => {
            info!("Running register command");
            run_register(&ctx, username, email, password, role).await
        }
        Commands::Logout => {
            info!("Running logout command");
            report(ctx.session().logout().await)
        }
        Commands::Status => run_status(&ctx, loader),
        Commands::Routes => run_routes(&ctx),
        Commands::Open { path } => {
            info!(%path, "Opening route");
            run_open(&ctx, &path).await
        }
    };

    ctx.shutdown();
    result
}

fn run_init(loader: &ConfigLoader) -> Result<()> {
    println!("{}", style("Welcome to carelink!").bold().cyan());

    let config_path = loader.config_dir().join("config.json");
    if config_path.exists() {
        let overwrite = Confirm::new()
            .with_prompt("Configuration already exists. Overwrite?")
            .default(false)
            .interact()?;
        if !overwrite {
            println!("Init cancelled.");
            return Ok(());
        }
    }

    let mut config = Config::default();
    config.api.base_url = Input::new()
        .with_prompt("Backend URL")
        .default(config.api.base_url.clone())
        .interact_text()?;

    loader.save(&config)?;
    println!(
        "\n{} Configuration saved to {}",
        style("✓").green(),
        config_path.display()
    );
    Ok(())
}

async fn run_login(
    ctx: &AppContext<CatalogLoader>,
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let mut credentials = Credentials::new();
    if let Some(username) = username {
        credentials.insert("username", username);
    }
    if let Some(email) = email {
        credentials.insert("email", email);
    }
    credentials.insert("password", password_or_prompt(password, false)?);

    report(ctx.session().login(&credentials).await)
}

async fn run_register(
    ctx: &AppContext<CatalogLoader>,
    username: String,
    email: String,
    password: Option<String>,
    role: Option<String>,
) -> Result<()> {
    let mut credentials = Credentials::new()
        .with("username", username)
        .with("email", email)
        .with("password", password_or_prompt(password, true)?);
    if let Some(role) = role {
        credentials.insert("role", role);
    }

    report(ctx.session().register(&credentials).await)
}

fn password_or_prompt(password: Option<String>, confirm: bool) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }
    let prompt = Password::new().with_prompt("Password");
    let prompt = if confirm {
        prompt.with_confirmation("Repeat password", "Passwords do not match")
    } else {
        prompt
    };
    Ok(prompt.interact()?)
}

/// Print an auth outcome; a failed outcome becomes the process error
fn report(outcome: AuthOutcome) -> Result<()> {
    if !outcome.status {
        bail!("{} {}", style("✗").red(), outcome.message);
    }

    println!("{} {}", style("✓").green(), outcome.message);
    if let (Some(username), Some(role)) = (&outcome.username, &outcome.role) {
        println!("  Signed in as {} ({})", style(username).bold(), role);
    }
    Ok(())
}

fn run_status(ctx: &AppContext<CatalogLoader>, loader: &ConfigLoader) -> Result<()> {
    let config = ctx.config();

    println!("{}", style("carelink Status").bold().cyan());
    println!("Version: {}\n", env!("CARGO_PKG_VERSION"));

    println!("{}", style("Configuration:").bold());
    println!("  Config directory: {}", loader.config_dir().display());
    println!("  Backend: {}", config.api.base_url);
    println!("  Storage: {:?} ({})", config.storage.backend, config.storage.path);
    println!();

    println!("{}", style("Session:").bold());
    let session = ctx.session();
    let state = if session.is_authenticated() {
        style("authenticated").green()
    } else {
        style("not logged in").red()
    };
    println!("  State: {}", state);
    match session.profile() {
        Ok(profile) => {
            println!("  User: {}", profile.username);
            println!("  Email: {}", profile.email);
            println!("  Role: {}", profile.role);
        }
        Err(carelink_core::Error::NotFound(_)) => {}
        Err(e) => println!("  Profile: {}", style(e).red()),
    }
    Ok(())
}

fn run_routes(ctx: &AppContext<CatalogLoader>) -> Result<()> {
    println!("{}", style("Routes:").bold());
    let authenticated = ctx.session().is_authenticated();
    for route in ctx.router().table().iter() {
        let access = match (route.requires_auth, authenticated) {
            (false, _) => style("public").dim(),
            (true, true) => style("signed in").green(),
            (true, false) => style("login required").yellow(),
        };
        println!("  {:<24} {:<24} {}", route.path, route.name, access);
    }
    Ok(())
}

async fn run_open(ctx: &AppContext<CatalogLoader>, path: &str) -> Result<()> {
    match ctx.navigate(path).await? {
        Navigation::Entered { route, view } => {
            println!("{}", style(view.title).bold().cyan());
            println!("  {}", view.description);
            println!("  {}", style(format!("{} ({})", route.path, route.name)).dim());
        }
        Navigation::Redirected { from, to } => {
            println!(
                "{} {} needs a session; opening {} instead",
                style("!").yellow(),
                from,
                to
            );
            if let Navigation::Entered { view, .. } = ctx.navigate(&to).await? {
                println!("{}", style(view.title).bold().cyan());
                println!("  {}", view.description);
            }
        }
    }
    Ok(())
}
