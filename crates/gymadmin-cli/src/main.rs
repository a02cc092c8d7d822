//! `gym-admin` command-line console
//!
//! Signs an admin in against local fixture accounts, then browses and
//! updates platform data through the REST backend or the in-memory mock.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

use chrono::Utc;
use clap::Parser;
use gymadmin_auth::{AuthContext, FileStore, UserDirectory};
use gymadmin_cli::cli::{Cli, Commands};
use gymadmin_cli::{OutputFormat, Settings, commands};
use gymadmin_client::{HttpAdminClient, MockAdminClient};
use gymadmin_core::{Config, Result};
use std::io::BufRead;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error, info};

/// Main entry point
#[tokio::main]
async fn main() -> ExitCode {
    // Read before the config loads; reported once logging is up
    let env_file = dotenvy::dotenv();

    let cli = Cli::parse();

    match run(cli, env_file).await {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, env_file: dotenvy::Result<PathBuf>) -> Result<String> {
    let config = Config::load(cli.config.as_deref())?;

    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    gymadmin_core::init_logging(level, config.logging.format == "json")?;
    debug!(version = env!("CARGO_PKG_VERSION"), "gym-admin starting");
    commands::note_env_file(env_file);

    let format = OutputFormat::from_flag(cli.json);

    match &cli.command {
        Commands::Login { email, password } => {
            let directory = UserDirectory::load(&config.auth.fixture_path)?;
            let auth = AuthContext::new(directory, FileStore::new(&config.auth.session_path));
            let password = match password {
                Some(password) => password.clone(),
                None => read_password()?,
            };
            commands::login(&auth, email, &password, format)
        }
        Commands::Logout => commands::logout(&session(&config)),
        Commands::Whoami => commands::whoami(&session(&config), format),
        Commands::Config => commands::show_config(&config, format),
        command => {
            let auth = session(&config);
            commands::require_session(&auth)?;

            let settings = Settings::from_config(&config, format, Utc::now().date_naive());
            if cli.mock || config.api.use_mock {
                let api = mock_backend(&config)?;
                commands::run(&api, command, &settings).await
            } else {
                let mut api = HttpAdminClient::from_config(&config.api)?;
                if let Some(token) = auth.token() {
                    api = api.with_token(token);
                }
                info!(base_url = api.base_url(), "Using REST backend");
                commands::run(&api, command, &settings).await
            }
        }
    }
}

/// Session over the configured file; accounts are only needed to sign in
fn session(config: &Config) -> AuthContext<FileStore> {
    AuthContext::new(
        UserDirectory::default(),
        FileStore::new(&config.auth.session_path),
    )
}

/// Mock backend seeded from `mock_data_dir`, or from the directory holding
/// the account fixtures when that is unset
fn mock_backend(config: &Config) -> Result<MockAdminClient> {
    let mut api_config = config.api.clone();
    if api_config.mock_data_dir.is_none() {
        api_config.mock_data_dir = config
            .auth
            .fixture_path
            .parent()
            .filter(|dir| dir.is_dir())
            .map(std::path::Path::to_path_buf);
    }
    info!(data_dir = ?api_config.mock_data_dir, "Using in-memory backend");
    MockAdminClient::from_config(&api_config)
}

fn read_password() -> Result<String> {
    eprint!("Password: ");
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
