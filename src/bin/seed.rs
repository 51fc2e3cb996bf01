//! Development seed: creates (or refreshes) an owner account and prints a
//! bearer token signed with the configured JWT secret.
//! Run with: cargo run --bin seed

use chrono::{Duration, Utc};
use content_admin::{config::Config, db::Database, middleware::Claims};
use jsonwebtoken::{encode, EncodingKey, Header};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    println!("Connecting to database...");
    let db = Database::connect(&config).await?;
    db.run_migrations().await?;

    let email = std::env::var("SEED_EMAIL").unwrap_or_else(|_| "owner@katapang.local".to_string());
    let username = std::env::var("SEED_USERNAME").unwrap_or_else(|_| "owner".to_string());
    let name = std::env::var("SEED_NAME").unwrap_or_else(|_| "Development Owner".to_string());

    let user_id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO users (username, name, email)
        VALUES ($1, $2, $3)
        ON CONFLICT (email) DO UPDATE
            SET username = EXCLUDED.username, name = EXCLUDED.name, updated_at = NOW()
        RETURNING id
        "#,
    )
    .bind(&username)
    .bind(&name)
    .bind(&email)
    .fetch_one(&db.pg)
    .await?;

    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        email: email.clone(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::days(7)).timestamp() as usize,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt.secret.as_bytes()),
    )
    .map_err(|e| anyhow::anyhow!("Token generation failed: {}", e))?;

    println!("\n========================================");
    println!("Owner Account Ready!");
    println!("========================================");
    println!("Id:       {}", user_id);
    println!("Email:    {}", email);
    println!("Username: {}", username);
    println!("Token (valid 7 days):");
    println!("{}", token);
    println!("========================================");
    println!("\nUse it as: Authorization: Bearer <token>");

    Ok(())
}
