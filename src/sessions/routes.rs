use actix_web::web::{Data, Json, Path};
use actix_web::{get, post, web};

use crate::server::{Response, State};
use crate::sessions::{CreateSession, Session};
use crate::validation::Validator;

#[get("/sessions")]
async fn find_all(state: Data<State>) -> Response {
    let sessions = Session::find_all(&state.db).await?;

    http_ok_json!(sessions);
}

#[get("/sessions/{id}")]
async fn find(session_id: Path<i64>, state: Data<State>) -> Response {
    let session = Session::find_detail(session_id.into_inner(), &state.db).await?;

    http_ok_json!(session);
}

#[post("/sessions")]
async fn create(session: Json<Validator<CreateSession>>, state: Data<State>) -> Response {
    let session = session.into_inner().validate()?.into_new()?;

    let session = Session::create(&session, &state.db).await?;

    http_created_json!(session);
}

pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.service(find_all);
    cfg.service(find);
    cfg.service(create);
}
