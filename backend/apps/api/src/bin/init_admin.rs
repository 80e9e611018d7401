//! Seed the first admin credential
//!
//! Reads ADMIN_USERNAME (default "admin") and ADMIN_PASSWORD from the
//! environment; creates the credential, or resets its password if it already
//! exists. Run once after migrations:
//!
//! ```sh
//! ADMIN_PASSWORD='...' cargo run --bin init_admin
//! ```

use auth::PgAuthRepository;
use auth::domain::repository::CredentialRepository;
use auth::domain::value_object::username::Username;
use platform::password::Password;
use sqlx::postgres::PgPoolOptions;
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "init_admin=info,auth=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");
    let admin_username = env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
    let admin_password = env::var("ADMIN_PASSWORD").expect("ADMIN_PASSWORD must be set");

    let username = Username::new(admin_username)?;
    let password = Password::new(admin_password)?;
    let digest = password.hash()?;

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await?;

    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    let repo = PgAuthRepository::new(pool);

    match repo.find_by_username(&username).await? {
        Some(_) => {
            repo.replace_password_digest(&username, &digest).await?;
            tracing::info!(username = %username, "Admin credential already existed, password reset");
        }
        None => {
            repo.create(&username, &digest).await?;
            tracing::info!(username = %username, "Admin credential created");
        }
    }

    Ok(())
}
