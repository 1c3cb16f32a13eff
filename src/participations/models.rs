use chrono::{DateTime, Utc};

use crate::db;
use crate::errors::ServiceError;
use crate::players::Player;
use crate::sessions::Session;

/// One player's attendance notes for one session.
///
/// There is no uniqueness constraint on (player_id, session_id),
/// recording the same player twice for a session is allowed.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Participation {
    pub id: i64,
    pub presence: Option<bool>,
    pub snacks: Option<String>,
    pub player_id: i64,
    pub session_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// What the client sends to record an attendance,
/// the session is taken from the path.
///
/// **POST /api/sessions/{id}/attendances**
///
/// ``` shell
/// curl --location --request POST 'localhost:8080/api/sessions/1/attendances' \
///     --header 'Content-Type: application/json' \
///     --data-raw '{ "player_id": 2, "presence": true, "snacks": "dice" }'
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateParticipation {
    pub player_id: Option<i64>,
    pub presence: Option<bool>,
    pub snacks: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewParticipation {
    pub player_id: i64,
    pub session_id: i64,
    pub presence: Option<bool>,
    pub snacks: Option<String>,
}

impl Participation {
    /// Record an attendance for an existing session and player.
    ///
    /// Returns NotFound when the session doesn't exist and a ValidationError
    /// when the player doesn't.
    #[tracing::instrument(name = "Participation::create", skip(db))]
    pub async fn create(
        participation: &NewParticipation,
        db: &db::Conn,
    ) -> Result<Participation, ServiceError> {
        Session::find(participation.session_id, db).await?;

        if !Player::exists(participation.player_id, db).await? {
            validation_error!(format!(
                "player {} does not exist",
                participation.player_id
            ));
        }

        // a player or session removed in the meantime surfaces as a foreign key violation
        let participation = Participation::insert(participation, db).await?;

        Ok(participation)
    }

    /// Insert a participation, this returns the raw database error so it can be used in transactions
    pub async fn insert<'c, E>(
        participation: &NewParticipation,
        db: E,
    ) -> Result<Participation, sqlx::Error>
    where
        E: sqlx::PgExecutor<'c>,
    {
        sqlx::query_as::<_, Participation>(
            "INSERT INTO participations (presence, snacks, player_id, session_id)
            VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(participation.presence)
        .bind(&participation.snacks)
        .bind(participation.player_id)
        .bind(participation.session_id)
        .fetch_one(db)
        .await
    }

    #[tracing::instrument(name = "Participation::find_by_session", skip(db))]
    pub async fn find_by_session(
        session_id: i64,
        db: &db::Conn,
    ) -> Result<Vec<Participation>, ServiceError> {
        let participations = sqlx::query_as::<_, Participation>(
            "SELECT * FROM participations WHERE session_id = $1 ORDER BY id",
        )
        .bind(session_id)
        .fetch_all(db)
        .await?;

        Ok(participations)
    }
}

impl crate::validation::Validate<CreateParticipation> for CreateParticipation {
    fn validate(&self) -> Result<(), ServiceError> {
        match self.player_id {
            None => {
                validation_error!("player_id is required");
            }
            Some(_) => Ok(()),
        }
    }
}

impl CreateParticipation {
    /// attach the request to the session from the path
    pub fn for_session(self, session_id: i64) -> Result<NewParticipation, ServiceError> {
        let player_id = match self.player_id {
            Some(player_id) => player_id,
            None => {
                validation_error!("player_id is required");
            }
        };

        Ok(NewParticipation {
            player_id,
            session_id,
            presence: self.presence,
            snacks: self.snacks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Validator;
    use serde_json::json;

    #[test]
    fn player_is_required() {
        let participation: CreateParticipation =
            serde_json::from_value(json!({ "presence": true })).unwrap();

        assert!(Validator::new(participation.clone()).validate().is_err());
        assert!(participation.for_session(1).is_err());
    }

    #[test]
    fn unknown_looking_player_ids_are_left_to_storage() {
        // whether the player exists is only known after the session was found
        let participation = CreateParticipation {
            player_id: Some(0),
            ..Default::default()
        };

        assert!(Validator::new(participation).validate().is_ok());
    }

    #[test]
    fn presence_and_snacks_are_optional() {
        let participation: CreateParticipation =
            serde_json::from_value(json!({ "player_id": 3 })).unwrap();

        assert!(Validator::new(participation.clone()).validate().is_ok());

        let participation = participation.for_session(7).unwrap();
        assert_eq!(participation.player_id, 3);
        assert_eq!(participation.session_id, 7);
        assert!(participation.presence.is_none());
        assert!(participation.snacks.is_none());
    }
}
