use chrono::{DateTime, Utc};

use crate::db;
use crate::errors::ServiceError;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Session {
    pub id: i64,
    pub title: String,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub recap: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A session together with everyone who attended it
#[derive(Debug, Serialize)]
pub struct SessionDetail {
    #[serde(flatten)]
    pub session: Session,
    pub participants: Vec<Participant>,
}

/// A player as seen through one of their participations,
/// a player attending the same session twice shows up twice.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Participant {
    pub id: i64,
    pub name: String,
    pub participation_id: i64,
    pub presence: Option<bool>,
    pub snacks: Option<String>,
}

///
/// **POST /api/sessions**
///
/// Only the title is required, `summary` is accepted as an alias of `recap`.
///
/// ``` shell
/// curl --location --request POST 'localhost:8080/api/sessions' \
///     --header 'Content-Type: application/json' \
///     --data-raw '{
///         "title": "Session 5",
///         "scheduled_at": "2025-06-14T18:00:00Z"
///     }'
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateSession {
    pub title: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(alias = "summary")]
    pub recap: Option<String>,
}

/// A session that passed validation and can be inserted
#[derive(Debug, Clone)]
pub struct NewSession {
    pub title: String,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub recap: Option<String>,
}

impl Session {
    #[tracing::instrument(name = "Session::find_all", skip(db))]
    pub async fn find_all(db: &db::Conn) -> Result<Vec<Session>, ServiceError> {
        let sessions = sqlx::query_as::<_, Session>("SELECT * FROM sessions ORDER BY id")
            .fetch_all(db)
            .await?;

        Ok(sessions)
    }

    #[tracing::instrument(name = "Session::find", skip(db))]
    pub async fn find(id: i64, db: &db::Conn) -> Result<Session, ServiceError> {
        let session = sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE id = $1")
            .bind(id)
            .fetch_one(db)
            .await?;

        Ok(session)
    }

    /// Load a session and its participants, NotFound when the session doesn't exist
    pub async fn find_detail(id: i64, db: &db::Conn) -> Result<SessionDetail, ServiceError> {
        let session = Session::find(id, db).await?;
        let participants = Session::participants(session.id, db).await?;

        Ok(SessionDetail {
            session,
            participants,
        })
    }

    /// returns every player attending a session, ordered by the participation
    #[tracing::instrument(name = "Session::participants", skip(db))]
    pub async fn participants(
        session_id: i64,
        db: &db::Conn,
    ) -> Result<Vec<Participant>, ServiceError> {
        let participants = sqlx::query_as::<_, Participant>(
            "SELECT players.id, players.name, participations.id AS participation_id,
                participations.presence, participations.snacks
            FROM participations
            INNER JOIN players ON players.id = participations.player_id
            WHERE participations.session_id = $1
            ORDER BY participations.id",
        )
        .bind(session_id)
        .fetch_all(db)
        .await?;

        Ok(participants)
    }

    #[tracing::instrument(name = "Session::create", skip(db))]
    pub async fn create(session: &NewSession, db: &db::Conn) -> Result<Session, ServiceError> {
        let session = Session::insert(session, db).await?;

        Ok(session)
    }

    /// Insert a session, this returns the raw database error so it can be used in transactions
    pub async fn insert<'c, E>(session: &NewSession, db: E) -> Result<Session, sqlx::Error>
    where
        E: sqlx::PgExecutor<'c>,
    {
        sqlx::query_as::<_, Session>(
            "INSERT INTO sessions (title, scheduled_at, recap) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&session.title)
        .bind(session.scheduled_at)
        .bind(&session.recap)
        .fetch_one(db)
        .await
    }
}

impl NewSession {
    /// returns true if the session is scheduled before `now`
    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        matches!(self.scheduled_at, Some(scheduled_at) if scheduled_at < now)
    }
}

impl crate::validation::Validate<CreateSession> for CreateSession {
    fn validate(&self) -> Result<(), ServiceError> {
        let title = match &self.title {
            Some(title) => title,
            None => {
                validation_error!("title is required");
            }
        };

        if title.trim().is_empty() {
            validation_error!("title can't be blank");
        }

        Ok(())
    }
}

impl CreateSession {
    /// converts a validated request into an insertable session
    pub fn into_new(self) -> Result<NewSession, ServiceError> {
        let title = match self.title {
            Some(title) => title,
            None => {
                validation_error!("title is required");
            }
        };

        Ok(NewSession {
            title: title.trim().to_string(),
            scheduled_at: self.scheduled_at,
            recap: self.recap,
        })
    }
}
