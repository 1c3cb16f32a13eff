use actix_web::web::{Data, Json, Path};
use actix_web::{post, web};

use crate::participations::{CreateParticipation, Participation};
use crate::server::{Response, State};
use crate::validation::Validator;

#[post("/sessions/{id}/attendances")]
async fn create(
    session_id: Path<i64>,
    participation: Json<Validator<CreateParticipation>>,
    state: Data<State>,
) -> Response {
    let participation = participation
        .into_inner()
        .validate()?
        .for_session(session_id.into_inner())?;

    let participation = Participation::create(&participation, &state.db).await?;

    http_created_json!(participation);
}

pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.service(create);
}
