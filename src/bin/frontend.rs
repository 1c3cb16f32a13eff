//! Serves the single page shell and proxies `/api/*` calls to the api.
use anyhow::{Context, Error};
use dotenv::dotenv;
use log::debug;

use questlog::config::Config;
use questlog::frontend::{self, Proxy};
use questlog::telemetry;

#[actix_web::main]
async fn main() -> anyhow::Result<(), Error> {
    dotenv().ok();

    telemetry::init()?;
    Config::init();

    let proxy = Proxy::new(Config::api_url()).context("API_URL is not a valid url")?;

    debug!(
        "serving the frontend on {}:{}, proxying /api to {}",
        Config::frontend_host(),
        Config::frontend_port(),
        Config::api_url()
    );
    frontend::launch(proxy).await?;

    Ok(())
}
