use anyhow::{Context, Error};
use dotenv::dotenv;
use log::{debug, info};

use questlog::config::Config;
use questlog::{db, server, telemetry};

#[actix_web::main]
async fn main() -> anyhow::Result<(), Error> {
    init().await?;

    Ok(())
}

async fn init() -> anyhow::Result<(), Error> {
    dotenv().ok();

    telemetry::init()?;
    Config::init();

    let database_url = Config::database_url().context("DATABASE_URL is not set")?;

    let pool = db::build_connection_pool(database_url, Config::database_max_connections())
        .await
        .context("unable to connect to the database")?;

    info!("running database migrations");
    db::migrate(&pool)
        .await
        .context("unable to run the database migrations")?;

    debug!(
        "launching the actix webserver on {}:{}",
        Config::api_host(),
        Config::api_port()
    );
    server::launch(pool).await?;

    Ok(())
}
