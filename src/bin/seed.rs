//! Replaces the database contents with sample players, sessions and participations.
use anyhow::{Context, Error};
use dotenv::dotenv;
use log::info;

use questlog::config::Config;
use questlog::players::Player;
use questlog::seed::SeedPlan;
use questlog::{db, telemetry};

#[actix_web::main]
async fn main() -> anyhow::Result<(), Error> {
    dotenv().ok();

    telemetry::init()?;
    Config::init();

    let database_url = Config::database_url().context("DATABASE_URL is not set")?;
    let pool = db::build_connection_pool(database_url, Config::database_max_connections())
        .await
        .context("unable to connect to the database")?;

    db::migrate(&pool)
        .await
        .context("unable to run the database migrations")?;

    let plan = SeedPlan::new(chrono::Utc::now(), &mut rand::thread_rng());
    let seeded = plan
        .apply(&pool)
        .await
        .context("unable to seed the database")?;

    for player in Player::find_all(&pool).await? {
        let sessions = Player::sessions(player.id, &pool)
            .await
            .with_context(|| format!("unable to load the sessions of {}", player.name))?;
        info!("{} is signed up for {} sessions", player.name, sessions.len());
    }

    info!(
        "seed completed: {} players, {} sessions, {} participations",
        seeded.players.len(),
        seeded.sessions.len(),
        seeded.participations.len()
    );

    Ok(())
}
