use async_trait::async_trait;
use uuid::Uuid;
use sqlx::PgPool;
use covoit_core::repository::{RepositoryResult, UserRepository};
use covoit_shared::{NewUser, User, UserPatch};

use crate::database::storage_error;

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    address: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            user_id: row.user_id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            address: row.address,
        }
    }
}

const USER_COLUMNS: &str = "user_id, first_name, last_name, email, phone, address";

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn list_users(&self) -> RepositoryResult<Vec<User>> {
        let rows: Vec<UserRow> = sqlx::query_as(&format!(
            "SELECT {} FROM users ORDER BY email",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("could not retrieve users", e))?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn find_user_by_id(&self, user_id: Uuid) -> RepositoryResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {} FROM users WHERE user_id = $1",
            USER_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error(format!("could not retrieve user with id {}", user_id), e))?;

        Ok(row.map(User::from))
    }

    async fn find_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error(format!("could not retrieve user with email {}", email), e))?;

        Ok(row.map(User::from))
    }

    async fn create_user(&self, user: &NewUser) -> RepositoryResult<User> {
        let row: UserRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO users (first_name, last_name, email, phone, address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.address)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| storage_error(format!("could not create user {}", user.email), e))?;

        Ok(row.into())
    }

    async fn update_user(&self, user_id: Uuid, patch: &UserPatch) -> RepositoryResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            r#"
            UPDATE users
            SET first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                email = COALESCE($4, email),
                phone = COALESCE($5, phone),
                address = COALESCE($6, address)
            WHERE user_id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(user_id)
        .bind(patch.first_name.as_deref())
        .bind(patch.last_name.as_deref())
        .bind(patch.email.as_deref())
        .bind(patch.phone.as_deref())
        .bind(patch.address.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error(format!("could not update user {}", user_id), e))?;

        Ok(row.map(User::from))
    }

    async fn delete_user(&self, user_id: Uuid) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error(format!("could not delete user {}", user_id), e))?;

        Ok(result.rows_affected() > 0)
    }
}
