use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    domain::entities::user::UserRecord,
    use_cases::credentials::UserRepo,
};

// Roles are aggregated in name order; users without roles get an empty array.
const SELECT_USER: &str = r#"
    SELECT u.id, u.username, u.password_hash,
           COALESCE(
               array_agg(r.role_name ORDER BY r.role_name)
                   FILTER (WHERE r.role_name IS NOT NULL),
               '{}'::text[]
           ) AS roles
    FROM users u
    LEFT JOIN user_roles ur ON ur.user_id = u.id
    LEFT JOIN roles r ON r.id = ur.role_id
"#;

fn row_to_user(row: sqlx::postgres::PgRow) -> UserRecord {
    UserRecord {
        id: row.get("id"),
        username: row.get("username"),
        password_hash: row.get("password_hash"),
        roles: row.get("roles"),
    }
}

#[async_trait]
impl UserRepo for PostgresPersistence {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<UserRecord>> {
        let row = sqlx::query(&format!(
            "{SELECT_USER} WHERE u.username = $1 GROUP BY u.id"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(row.map(row_to_user))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<UserRecord>> {
        let row = sqlx::query(&format!("{SELECT_USER} WHERE u.id = $1 GROUP BY u.id"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)?;

        Ok(row.map(row_to_user))
    }
}
