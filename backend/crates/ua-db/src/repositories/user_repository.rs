//! SQLite-backed user directory.
//!
//! Uniqueness of `email` (case-insensitive) and `username` is enforced by
//! unique indexes, so concurrent writers racing on the same identity are
//! settled by the database: exactly one insert wins, the other surfaces as
//! `DirectoryError::Conflict`.

use crate::{DbError, Result as DbErrorResult};

use ua_core::{
    DirectoryError, DirectoryResult, Gender, LoginProvider, ProviderLink, User, UserDirectory,
    normalize_email,
};

use std::panic::Location;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

const USER_COLUMNS: &str = r#"
    id, email, username, password_hash, full_name, phone, date_of_birth, gender,
    address, avatar_url, login_provider, last_login_at, created_at, updated_at
"#;

pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user: &User) -> DbErrorResult<()> {
        let mut conn = self.pool.acquire().await?;
        Self::insert_user(&mut conn, user).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");

        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| user_from_row(&r)).transpose()
    }

    pub async fn find_by_email(&self, email: &str) -> DbErrorResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?");

        let row = sqlx::query(&sql)
            .bind(normalize_email(email))
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| user_from_row(&r)).transpose()
    }

    /// Full-record update. Returns the number of rows touched (0 when the
    /// user does not exist).
    pub async fn update(&self, user: &User) -> DbErrorResult<u64> {
        let result = sqlx::query(
            r#"
                UPDATE users
                SET email = ?, username = ?, password_hash = ?, full_name = ?, phone = ?,
                    date_of_birth = ?, gender = ?, address = ?, avatar_url = ?,
                    login_provider = ?, last_login_at = ?, updated_at = ?
                WHERE id = ?
            "#,
        )
        .bind(normalize_email(&user.email))
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.full_name)
        .bind(&user.phone)
        .bind(user.date_of_birth.map(|dt| dt.timestamp()))
        .bind(user.gender.map(|g| g.as_str()))
        .bind(&user.address)
        .bind(&user.avatar_url)
        .bind(user.login_provider.as_str())
        .bind(user.last_login_at.map(|dt| dt.timestamp()))
        .bind(user.updated_at.timestamp())
        .bind(user.id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Insert the user and its provider link in a single transaction.
    /// A failure on either insert rolls both back.
    pub async fn create_user_and_provider_link(
        &self,
        user: &User,
        link: &ProviderLink,
    ) -> DbErrorResult<()> {
        let mut tx = self.pool.begin().await?;

        Self::insert_user(&mut tx, user).await?;

        sqlx::query(
            r#"
                INSERT INTO user_oauth_providers (id, user_id, provider, subject, created_at)
                VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(link.id.to_string())
        .bind(link.user_id.to_string())
        .bind(link.provider.as_str())
        .bind(&link.subject)
        .bind(link.created_at.timestamp())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        log::debug!("Created user {} with {} link", user.id, link.provider);

        Ok(())
    }

    pub async fn find_provider_links(&self, user_id: Uuid) -> DbErrorResult<Vec<ProviderLink>> {
        let rows = sqlx::query(
            r#"
                SELECT id, user_id, provider, subject, created_at
                FROM user_oauth_providers
                WHERE user_id = ?
                ORDER BY created_at
            "#,
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|r| -> DbErrorResult<ProviderLink> {
                Ok(ProviderLink {
                    id: parse_uuid(r.try_get("id")?, "user_oauth_providers.id")?,
                    user_id: parse_uuid(r.try_get("user_id")?, "user_oauth_providers.user_id")?,
                    provider: LoginProvider::from_str(r.try_get("provider")?).map_err(|e| {
                        DbError::Initialization {
                            message: format!("Invalid provider in user_oauth_providers.provider: {}", e),
                            location: ErrorLocation::from(Location::caller()),
                        }
                    })?,
                    subject: r.try_get("subject")?,
                    created_at: parse_timestamp(
                        r.try_get("created_at")?,
                        "user_oauth_providers.created_at",
                    )?,
                })
            })
            .collect::<DbErrorResult<Vec<_>>>()
    }

    async fn insert_user(conn: &mut sqlx::SqliteConnection, user: &User) -> DbErrorResult<()> {
        let sql = format!(
            "INSERT INTO users ({USER_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        );

        sqlx::query(&sql)
            .bind(user.id.to_string())
            .bind(normalize_email(&user.email))
            .bind(&user.username)
            .bind(&user.password_hash)
            .bind(&user.full_name)
            .bind(&user.phone)
            .bind(user.date_of_birth.map(|dt| dt.timestamp()))
            .bind(user.gender.map(|g| g.as_str()))
            .bind(&user.address)
            .bind(&user.avatar_url)
            .bind(user.login_provider.as_str())
            .bind(user.last_login_at.map(|dt| dt.timestamp()))
            .bind(user.created_at.timestamp())
            .bind(user.updated_at.timestamp())
            .execute(&mut *conn)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl UserDirectory for UserRepository {
    async fn create(&self, user: &User) -> DirectoryResult<()> {
        Ok(UserRepository::create(self, user).await?)
    }

    async fn get_by_id(&self, id: Uuid) -> DirectoryResult<User> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DirectoryError::not_found(id.to_string()))
    }

    async fn get_by_email(&self, email: &str) -> DirectoryResult<User> {
        self.find_by_email(email)
            .await?
            .ok_or_else(|| DirectoryError::not_found("email"))
    }

    async fn create_user_and_provider_link(
        &self,
        user: &User,
        link: &ProviderLink,
    ) -> DirectoryResult<()> {
        Ok(UserRepository::create_user_and_provider_link(self, user, link).await?)
    }

    async fn update(&self, user: &User) -> DirectoryResult<()> {
        match UserRepository::update(self, user).await? {
            0 => Err(DirectoryError::not_found(user.id.to_string())),
            _ => Ok(()),
        }
    }
}

#[track_caller]
fn parse_uuid(value: String, column: &str) -> DbErrorResult<Uuid> {
    Uuid::parse_str(&value).map_err(|e| DbError::Initialization {
        message: format!("Invalid UUID in {}: {}", column, e),
        location: ErrorLocation::from(Location::caller()),
    })
}

#[track_caller]
fn parse_timestamp(value: i64, column: &str) -> DbErrorResult<DateTime<Utc>> {
    DateTime::from_timestamp(value, 0).ok_or_else(|| DbError::Initialization {
        message: format!("Invalid timestamp in {}", column),
        location: ErrorLocation::from(Location::caller()),
    })
}

fn user_from_row(r: &SqliteRow) -> DbErrorResult<User> {
    Ok(User {
        id: parse_uuid(r.try_get("id")?, "users.id")?,
        email: r.try_get("email")?,
        username: r.try_get("username")?,
        password_hash: r.try_get("password_hash")?,
        full_name: r.try_get("full_name")?,
        phone: r.try_get("phone")?,
        date_of_birth: r
            .try_get::<Option<i64>, _>("date_of_birth")?
            .map(|ts| parse_timestamp(ts, "users.date_of_birth"))
            .transpose()?,
        gender: r
            .try_get::<Option<String>, _>("gender")?
            .map(|g| {
                Gender::from_str(&g).map_err(|e| DbError::Initialization {
                    message: format!("Invalid Gender in users.gender: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })
            })
            .transpose()?,
        address: r.try_get("address")?,
        avatar_url: r.try_get("avatar_url")?,
        login_provider: LoginProvider::from_str(r.try_get("login_provider")?).map_err(|e| {
            DbError::Initialization {
                message: format!("Invalid LoginProvider in users.login_provider: {}", e),
                location: ErrorLocation::from(Location::caller()),
            }
        })?,
        last_login_at: r
            .try_get::<Option<i64>, _>("last_login_at")?
            .map(|ts| parse_timestamp(ts, "users.last_login_at"))
            .transpose()?,
        created_at: parse_timestamp(r.try_get("created_at")?, "users.created_at")?,
        updated_at: parse_timestamp(r.try_get("updated_at")?, "users.updated_at")?,
    })
}
