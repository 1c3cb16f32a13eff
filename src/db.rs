use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

pub type Conn = Pool<Postgres>;

pub async fn migrate(db: &Conn) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(db).await
}

pub async fn build_connection_pool(
    database_url: &str,
    max_connections: u32,
) -> Result<Conn, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// returns true when the database answers a trivial query
pub async fn is_healthy(db: &Conn) -> bool {
    match sqlx::query("SELECT 1").execute(db).await {
        Ok(_) => true,
        Err(e) => {
            error!("database health check failed: {}", e);
            false
        }
    }
}
