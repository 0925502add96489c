use anyhow::Result;
use chrono::Utc;
use rand::Rng;
use sqlx::SqlitePool;

/// Generate random password
fn generate_random_password(length: usize) -> String {
    const CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghjkmnpqrstuvwxyz23456789!@#$%^&*";
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Run database migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS papers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            class TEXT NOT NULL,
            subject TEXT NOT NULL,
            semester TEXT NOT NULL,
            exam_year TEXT NOT NULL,
            exam_type TEXT NOT NULL,
            paper_code TEXT NOT NULL DEFAULT 'N/A',
            exam_number TEXT NOT NULL DEFAULT 'N/A',
            medium TEXT NOT NULL,
            university TEXT NOT NULL DEFAULT 'N/A',
            time TEXT NOT NULL DEFAULT 'N/A',
            max_marks TEXT NOT NULL DEFAULT 'N/A',
            uploader_name TEXT NOT NULL,
            filename TEXT NOT NULL UNIQUE,
            upload_date TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            id TEXT PRIMARY KEY,
            user_id INTEGER NOT NULL,
            expires_at TEXT NOT NULL,
            created_at TEXT NOT NULL,
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Database migration completed");

    initialize_default_data(pool).await?;

    Ok(())
}

/// Initialize default data
///
/// Creates the first admin account with a random password when the users
/// table is empty. The password is printed to the log once; there is no
/// self-service account management.
async fn initialize_default_data(pool: &SqlitePool) -> Result<()> {
    let user_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    if user_count == 0 {
        tracing::info!("First startup, creating default admin account...");

        let admin_password = generate_random_password(16);
        let password_hash = bcrypt::hash(&admin_password, bcrypt::DEFAULT_COST)?;
        let now = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();

        sqlx::query("INSERT INTO users (username, password_hash, created_at) VALUES (?, ?, ?)")
            .bind("admin")
            .bind(&password_hash)
            .bind(&now)
            .execute(pool)
            .await?;

        tracing::info!("============================================================");
        tracing::info!("Default admin account created:");
        tracing::info!("  Username: admin");
        tracing::info!("  Password: {}", admin_password);
        tracing::info!("WARNING: Please save the password!");
        tracing::info!("============================================================");
    }

    Ok(())
}
