use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{IdentityAssertion, User, UserRole};
use crate::db::DatabaseError;

pub struct UserRepository;

impl UserRepository {
    pub async fn get_by_id(pool: &PgPool, user_id: Uuid) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, first_name, last_name, profile_image_url, role,
                   created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    pub async fn get_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, first_name, last_name, profile_image_url, role,
                   created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.to_lowercase())
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// First sign-in creates the row with the default employee role; later
    /// sign-ins only refresh profile fields from the assertion. The role is
    /// never written here, so admin grants survive re-authentication.
    pub async fn upsert_identity(
        pool: &PgPool,
        assertion: &IdentityAssertion,
    ) -> Result<User, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, first_name, last_name, profile_image_url)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO UPDATE SET
                first_name = COALESCE(excluded.first_name, users.first_name),
                last_name = COALESCE(excluded.last_name, users.last_name),
                profile_image_url = COALESCE(excluded.profile_image_url, users.profile_image_url),
                updated_at = now()
            RETURNING id, email, first_name, last_name, profile_image_url, role,
                      created_at, updated_at
            "#,
        )
        .bind(assertion.email.to_lowercase())
        .bind(&assertion.given_name)
        .bind(&assertion.family_name)
        .bind(&assertion.picture)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    pub async fn update_role(
        pool: &PgPool,
        user_id: Uuid,
        role: UserRole,
    ) -> Result<User, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET role = $1, updated_at = now()
            WHERE id = $2
            RETURNING id, email, first_name, last_name, profile_image_url, role,
                      created_at, updated_at
            "#,
        )
        .bind(role)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    pub async fn list_all(pool: &PgPool) -> Result<Vec<User>, DatabaseError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, first_name, last_name, profile_image_url, role,
                   created_at, updated_at
            FROM users
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(users)
    }
}
