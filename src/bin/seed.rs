use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use bazaar_api::{
    config::AppConfig,
    db::{create_pool, run_migrations},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    run_migrations(&pool).await?;

    let user_id = ensure_user(&pool, "alice", "alice@example.com", "User123!pass").await?;
    let seller_id = ensure_seller(&pool, "acme", "acme@example.com", "Seller123!pass").await?;
    seed_products(&pool, seller_id).await?;

    println!("Seed completed. User ID: {user_id}, Seller ID: {seller_id}");
    println!("Set ADMIN_USERNAME and ADMIN_PASSWORD_HASH to enable the admin login.");
    Ok(())
}

fn hash(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    username: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<i32> {
    let existing: Option<(i32,)> = sqlx::query_as("SELECT id FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await?;
    if let Some((id,)) = existing {
        return Ok(id);
    }

    let (id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO users (username, password_hash, email, email_verified)
        VALUES ($1, $2, $3, TRUE)
        RETURNING id
        "#,
    )
    .bind(username)
    .bind(hash(password)?)
    .bind(email)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

async fn ensure_seller(
    pool: &sqlx::PgPool,
    username: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<i32> {
    let existing: Option<(i32,)> = sqlx::query_as("SELECT id FROM sellers WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await?;
    if let Some((id,)) = existing {
        return Ok(id);
    }

    let (id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO sellers (username, password_hash, email, email_verified, gst_number)
        VALUES ($1, $2, $3, TRUE, '29ABCDE1234F2Z5')
        RETURNING id
        "#,
    )
    .bind(username)
    .bind(hash(password)?)
    .bind(email)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

async fn seed_products(pool: &sqlx::PgPool, seller_id: i32) -> anyhow::Result<()> {
    let count: (i64,) = sqlx::query_as("SELECT count(*) FROM products")
        .fetch_one(pool)
        .await?;
    if count.0 > 0 {
        return Ok(());
    }

    let demo = [
        ("Steel Water Bottle", "Kitchen", 499.0, 120),
        ("Cotton T-Shirt", "Apparel", 299.0, 300),
        ("Wireless Mouse", "Electronics", 899.0, 75),
    ];

    for (name, category, price, quantity) in demo {
        sqlx::query(
            r#"
            INSERT INTO products
                (seller_id, name, category, description, selling_price, price,
                 available_quantity, stock_availability, unique_product_id)
            VALUES ($1, $2, $3, $4, $5, $5, $6, 'ready', $7)
            "#,
        )
        .bind(seller_id)
        .bind(name)
        .bind(category)
        .bind(format!("Demo listing: {name}"))
        .bind(price)
        .bind(quantity)
        .bind(format!("PROD-{}", name.len() * 1111))
        .execute(pool)
        .await?;
    }

    Ok(())
}
