use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::db;
use crate::errors::ServiceError;
use crate::participations::{NewParticipation, Participation};
use crate::players::{NewPlayer, Player};
use crate::sessions::{NewSession, Session};

const PLAYERS: [&str; 5] = ["Alice", "Bob", "Charlie", "Diana", "Eve"];

/// what a player can bring to a session that already took place
const SNACKS: [&str; 4] = ["snacks", "drinks", "dice", "character_sheet"];

/// The attendance notes of one seeded player for one seeded session,
/// both referenced by their position in the plan.
#[derive(Debug, Clone)]
pub struct PlannedParticipation {
    pub player: usize,
    pub session: usize,
    pub presence: bool,
    pub snacks: Option<String>,
}

/// Sample data, built up front so it can be inspected before touching the database
#[derive(Debug, Clone)]
pub struct SeedPlan {
    pub players: Vec<NewPlayer>,
    pub sessions: Vec<NewSession>,
    pub participations: Vec<PlannedParticipation>,
}

/// What ended up in the database
#[derive(Debug)]
pub struct Seeded {
    pub players: Vec<Player>,
    pub sessions: Vec<Session>,
    pub participations: Vec<Participation>,
}

impl SeedPlan {
    /// Every player attends every session, with a random presence.
    /// Only sessions in the past get snacks.
    pub fn new<R: Rng + ?Sized>(now: DateTime<Utc>, rng: &mut R) -> Self {
        let players: Vec<NewPlayer> = PLAYERS
            .iter()
            .map(|name| NewPlayer {
                name: name.to_string(),
            })
            .collect();

        let sessions = vec![
            NewSession {
                title: String::from("Session 1: The Beginning"),
                scheduled_at: Some(now - Duration::weeks(1)),
                recap: Some(String::from(
                    "The party met in a tavern and received their first quest.",
                )),
            },
            NewSession {
                title: String::from("Session 2: The Forest of Shadows"),
                scheduled_at: Some(now - Duration::days(3)),
                recap: Some(String::from(
                    "The party ventured into the dark forest and encountered strange creatures.",
                )),
            },
            NewSession {
                title: String::from("Session 3: The Ancient Ruins"),
                scheduled_at: Some(now + Duration::days(2)),
                recap: None,
            },
            NewSession {
                title: String::from("Session 4: The Final Battle"),
                scheduled_at: Some(now + Duration::weeks(1)),
                recap: None,
            },
        ];

        let mut participations = Vec::with_capacity(players.len() * sessions.len());
        for (session_index, session) in sessions.iter().enumerate() {
            let is_past = session.is_past(now);

            for player_index in 0..players.len() {
                let snacks = if is_past {
                    SNACKS.choose(rng).map(|snack| snack.to_string())
                } else {
                    None
                };

                participations.push(PlannedParticipation {
                    player: player_index,
                    session: session_index,
                    presence: rng.gen_bool(0.5),
                    snacks,
                });
            }
        }

        SeedPlan {
            players,
            sessions,
            participations,
        }
    }

    /// Replace everything in the database with this plan.
    ///
    /// Runs in a single transaction, so running it twice leaves the same amount of rows behind.
    #[tracing::instrument(name = "SeedPlan::apply", skip(self, db))]
    pub async fn apply(&self, db: &db::Conn) -> Result<Seeded, ServiceError> {
        let mut tx = db.begin().await?;

        info!("cleaning database");
        sqlx::query("DELETE FROM participations")
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM sessions").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM players").execute(&mut *tx).await?;

        info!("creating {} players", self.players.len());
        let mut players = Vec::with_capacity(self.players.len());
        for player in &self.players {
            players.push(Player::create(player, &mut *tx).await?);
        }

        info!("creating {} sessions", self.sessions.len());
        let mut sessions = Vec::with_capacity(self.sessions.len());
        for session in &self.sessions {
            sessions.push(Session::insert(session, &mut *tx).await?);
        }

        info!("creating {} participations", self.participations.len());
        let mut participations = Vec::with_capacity(self.participations.len());
        for planned in &self.participations {
            let participation = NewParticipation {
                player_id: players[planned.player].id,
                session_id: sessions[planned.session].id,
                presence: Some(planned.presence),
                snacks: planned.snacks.clone(),
            };
            participations.push(Participation::insert(&participation, &mut *tx).await?);
        }

        tx.commit().await?;

        Ok(Seeded {
            players,
            sessions,
            participations,
        })
    }
}
