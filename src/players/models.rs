use chrono::{DateTime, Utc};

use crate::db;
use crate::errors::ServiceError;
use crate::sessions::Session;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPlayer {
    pub name: String,
}

impl Player {
    #[tracing::instrument(name = "Player::find_all", skip(db))]
    pub async fn find_all(db: &db::Conn) -> Result<Vec<Player>, ServiceError> {
        let players = sqlx::query_as::<_, Player>("SELECT * FROM players ORDER BY id")
            .fetch_all(db)
            .await?;

        Ok(players)
    }

    #[tracing::instrument(name = "Player::find", skip(db))]
    pub async fn find(id: i64, db: &db::Conn) -> Result<Player, ServiceError> {
        let player = sqlx::query_as::<_, Player>("SELECT * FROM players WHERE id = $1")
            .bind(id)
            .fetch_one(db)
            .await?;

        Ok(player)
    }

    /// returns true if a player with this id is stored
    #[tracing::instrument(name = "Player::exists", skip(db))]
    pub async fn exists(id: i64, db: &db::Conn) -> Result<bool, ServiceError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM players WHERE id = $1)")
                .bind(id)
                .fetch_one(db)
                .await?;

        Ok(exists)
    }

    pub async fn create<'c, E>(player: &NewPlayer, db: E) -> Result<Player, sqlx::Error>
    where
        E: sqlx::PgExecutor<'c>,
    {
        sqlx::query_as::<_, Player>("INSERT INTO players (name) VALUES ($1) RETURNING *")
            .bind(&player.name)
            .fetch_one(db)
            .await
    }

    /// The sessions a player took part in, once for every participation
    #[tracing::instrument(name = "Player::sessions", skip(db))]
    pub async fn sessions(player_id: i64, db: &db::Conn) -> Result<Vec<Session>, ServiceError> {
        let sessions = sqlx::query_as::<_, Session>(
            "SELECT sessions.* FROM sessions
            INNER JOIN participations ON participations.session_id = sessions.id
            WHERE participations.player_id = $1
            ORDER BY sessions.scheduled_at, participations.id",
        )
        .bind(player_id)
        .fetch_all(db)
        .await?;

        Ok(sessions)
    }
}
