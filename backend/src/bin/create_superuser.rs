//! Create an active staff superuser in the configured database.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use fleet_backend::domain::ports::UserAccounts;
use fleet_backend::domain::{AccountsService, Email, PlainPassword};
use fleet_backend::outbound::persistence::{
    DbPool, DieselUserRepository, PoolConfig, run_pending_migrations,
};
use fleet_backend::outbound::security::Argon2PasswordHasher;
use tokio::runtime::Builder;

const DATABASE_URL_ENV: &str = "FLEET_DATABASE_URL";
const PASSWORD_ENV: &str = "FLEET_SUPERUSER_PASSWORD";

/// `create-superuser` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "create-superuser",
    about = "Create a staff superuser that can sign in to the fleet API",
    version
)]
struct CliArgs {
    /// Login email for the new account.
    #[arg(long, value_name = "email")]
    email: String,
    /// Password for the new account. Falls back to `FLEET_SUPERUSER_PASSWORD`.
    #[arg(long, value_name = "password")]
    password: Option<String>,
    /// Database connection URL. Falls back to `FLEET_DATABASE_URL`.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    runtime.block_on(async_main())
}

async fn async_main() -> Result<()> {
    let args = CliArgs::try_parse()?;
    let email = Email::new(&args.email).wrap_err("invalid --email")?;
    let password = resolve(args.password, PASSWORD_ENV, "--password")?;
    let password = PlainPassword::new(&password).wrap_err("invalid password")?;
    let database_url = resolve(args.database_url, DATABASE_URL_ENV, "--database-url")?;

    run_pending_migrations(&database_url)
        .await
        .map_err(|error| eyre!("apply migrations: {error}"))?;
    let pool = DbPool::new(PoolConfig::new(&database_url))
        .await
        .map_err(|error| eyre!("create database pool: {error}"))?;

    let accounts = AccountsService::new(
        Arc::new(DieselUserRepository::new(pool)),
        Arc::new(Argon2PasswordHasher::new()),
    );
    let user = accounts
        .register_superuser(email, password)
        .await
        .map_err(|error| eyre!("create superuser: {error}"))?;

    println!("id={}", user.id());
    println!("email={}", user.email());
    Ok(())
}

/// Prefer the explicit flag, then the environment variable; reject blanks.
fn resolve(explicit: Option<String>, env_name: &str, flag: &str) -> io::Result<String> {
    let value = match explicit {
        Some(value) => value,
        None => env::var(env_name).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("missing value: set {flag} or {env_name}"),
            )
        })?,
    };
    if value.trim().is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{flag} must not be empty"),
        ));
    }
    Ok(value)
}
