//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::entity::credential::Credential;
use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::username::Username;
use crate::error::AuthResult;
use kernel::id::UserId;
use platform::password::PasswordDigest;

/// PostgreSQL-backed credential repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CredentialRepository for PgAuthRepository {
    async fn create(&self, username: &Username, digest: &PasswordDigest) -> AuthResult<()> {
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO users (username, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $3)
            "#,
        )
        .bind(username.as_str())
        .bind(digest.as_str())
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_username(&self, username: &Username) -> AuthResult<Option<Credential>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                id,
                username,
                password_hash,
                created_at,
                updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_credential))
    }

    async fn replace_password_digest(
        &self,
        username: &Username,
        digest: &PasswordDigest,
    ) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET password_hash = $2, updated_at = $3
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .bind(digest.as_str())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Row mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_credential(self) -> Credential {
        Credential {
            user_id: UserId::from_i64(self.id),
            username: Username::from_db(self.username),
            password_digest: PasswordDigest::new(self.password_hash),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
