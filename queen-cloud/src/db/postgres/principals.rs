use shared::models::Principal;
use sqlx::PgPool;
use uuid::Uuid;

/// Insert a principal; `Ok(false)` when the email is already registered
pub async fn create(pool: &PgPool, principal: &Principal) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO principals (id, email, password_hash, name, role, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(principal.id)
    .bind(&principal.email)
    .bind(&principal.password_hash)
    .bind(&principal.name)
    .bind(&principal.role)
    .bind(principal.created_at)
    .bind(principal.updated_at)
    .execute(pool)
    .await;

    match result {
        Ok(_) => Ok(true),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(false),
        Err(e) => Err(e),
    }
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Principal>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM principals WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Principal>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM principals WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}
