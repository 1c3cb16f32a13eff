//! End-to-end tests against a real postgres database.
//!
//! They only run when `DATABASE_URL` is set, every test creates its own rows
//! so they can share a database.
use actix_web::http::StatusCode;
use actix_web::test;
use actix_web::web::Data;
use actix_web::App;
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

use questlog::db;
use questlog::participations::{CreateParticipation, Participation};
use questlog::players::{NewPlayer, Player};
use questlog::server::{self, State};
use questlog::sessions::Session;

async fn state() -> Option<Data<State>> {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("DATABASE_URL is not set, skipping");
            return None;
        }
    };

    let pool = db::build_connection_pool(&database_url, 2).await.unwrap();
    db::migrate(&pool).await.unwrap();

    Some(Data::new(State::new(pool)))
}

async fn player(name: &str, state: &State) -> Player {
    Player::create(
        &NewPlayer {
            name: name.to_string(),
        },
        &state.db,
    )
    .await
    .unwrap()
}

#[actix_rt::test]
async fn created_sessions_can_be_shown() {
    let state = match state().await {
        Some(state) => state,
        None => return,
    };
    let app = test::init_service(App::new().app_data(state.clone()).configure(server::configure)).await;

    let scheduled_at = Utc.with_ymd_and_hms(2025, 6, 14, 18, 0, 0).unwrap();
    let req = test::TestRequest::post()
        .uri("/api/sessions")
        .set_json(json!({
            "title": "Session 5",
            "scheduled_at": scheduled_at,
            "recap": "The dragon got away."
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Session = test::read_body_json(resp).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/sessions/{}", created.id))
        .to_request();
    let shown: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(shown["id"], created.id);
    assert_eq!(shown["title"], "Session 5");
    assert_eq!(shown["recap"], "The dragon got away.");
    assert_eq!(shown["participants"], json!([]));

    let shown: Session = serde_json::from_value(shown).unwrap();
    assert_eq!(shown.scheduled_at, Some(scheduled_at));
}

#[actix_rt::test]
async fn sessions_without_schedule_or_recap() {
    let state = match state().await {
        Some(state) => state,
        None => return,
    };
    let app = test::init_service(App::new().app_data(state.clone()).configure(server::configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/sessions")
        .set_json(json!({ "title": "Session 6" }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(created["title"], "Session 6");
    assert!(created["scheduled_at"].is_null());
    assert!(created["recap"].is_null());

    let req = test::TestRequest::get().uri("/api/sessions").to_request();
    let sessions: Vec<Session> = test::call_and_read_body_json(&app, req).await;

    assert!(sessions
        .iter()
        .any(|session| Some(session.id) == created["id"].as_i64()));
}

#[actix_rt::test]
async fn unknown_sessions_are_not_found() {
    let state = match state().await {
        Some(state) => state,
        None => return,
    };
    let app = test::init_service(App::new().app_data(state.clone()).configure(server::configure)).await;
    let alice = player("Alice", &state).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/sessions/{}", i64::MAX))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri(&format!("/api/sessions/{}/attendances", i64::MAX))
        .set_json(json!({ "player_id": alice.id, "presence": true }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // the session is looked up before the player, whatever the player id
    for player_id in &[0, -1, i64::MAX] {
        let req = test::TestRequest::post()
            .uri(&format!("/api/sessions/{}/attendances", i64::MAX))
            .set_json(json!({ "player_id": player_id }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}

#[actix_rt::test]
async fn long_recaps_are_stored() {
    let state = match state().await {
        Some(state) => state,
        None => return,
    };
    let app = test::init_service(App::new().app_data(state.clone()).configure(server::configure)).await;

    let recap = "The party argued about the map. ".repeat(256);
    let req = test::TestRequest::post()
        .uri("/api/sessions")
        .set_json(json!({ "title": "Session 10", "recap": recap }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Session = test::read_body_json(resp).await;

    let stored = Session::find(created.id, &state.db).await.unwrap();
    assert_eq!(stored.recap.as_deref(), Some(recap.as_str()));
}

#[actix_rt::test]
async fn unknown_players_are_rejected() {
    let state = match state().await {
        Some(state) => state,
        None => return,
    };
    let app = test::init_service(App::new().app_data(state.clone()).configure(server::configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/sessions")
        .set_json(json!({ "title": "Session 7" }))
        .to_request();
    let session: Session = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/sessions/{}/attendances", session.id))
        .set_json(json!({ "player_id": i64::MAX, "presence": true }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    assert!(Participation::find_by_session(session.id, &state.db)
        .await
        .unwrap()
        .is_empty());
}

#[actix_rt::test]
async fn duplicate_participations_are_listed_twice() {
    let state = match state().await {
        Some(state) => state,
        None => return,
    };
    let app = test::init_service(App::new().app_data(state.clone()).configure(server::configure)).await;
    let bob = player("Bob", &state).await;
    let eve = player("Eve", &state).await;

    let req = test::TestRequest::post()
        .uri("/api/sessions")
        .set_json(json!({ "title": "Session 8" }))
        .to_request();
    let session: Session = test::call_and_read_body_json(&app, req).await;

    let attendances = vec![
        json!({ "player_id": bob.id, "presence": true, "snacks": "dice" }),
        json!({ "player_id": bob.id, "presence": false }),
        json!({ "player_id": eve.id }),
    ];
    for attendance in attendances {
        let req = test::TestRequest::post()
            .uri(&format!("/api/sessions/{}/attendances", session.id))
            .set_json(attendance)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let participation: Participation = test::read_body_json(resp).await;
        assert_eq!(participation.session_id, session.id);
    }

    let req = test::TestRequest::get()
        .uri(&format!("/api/sessions/{}", session.id))
        .to_request();
    let shown: Value = test::call_and_read_body_json(&app, req).await;
    let participants: Vec<i64> = shown["participants"]
        .as_array()
        .unwrap()
        .iter()
        .map(|participant| participant["id"].as_i64().unwrap())
        .collect();

    assert_eq!(participants, vec![bob.id, bob.id, eve.id]);
    assert_eq!(shown["participants"][0]["snacks"], "dice");
    assert_eq!(shown["participants"][2]["presence"], Value::Null);

    assert_eq!(Player::sessions(bob.id, &state.db).await.unwrap().len(), 2);
    assert_eq!(Player::sessions(eve.id, &state.db).await.unwrap().len(), 1);
}

#[actix_rt::test]
async fn participations_can_be_created_directly() {
    let state = match state().await {
        Some(state) => state,
        None => return,
    };
    let diana = player("Diana", &state).await;
    let session = Session::create(
        &questlog::sessions::NewSession {
            title: String::from("Session 9"),
            scheduled_at: None,
            recap: None,
        },
        &state.db,
    )
    .await
    .unwrap();

    let request = CreateParticipation {
        player_id: Some(diana.id),
        presence: Some(true),
        snacks: None,
    };
    let participation =
        Participation::create(&request.for_session(session.id).unwrap(), &state.db)
            .await
            .unwrap();

    assert_eq!(participation.player_id, diana.id);
    assert_eq!(
        Player::find(participation.player_id, &state.db)
            .await
            .unwrap()
            .name,
        "Diana"
    );
    assert_eq!(participation.presence, Some(true));

    let participants = Session::participants(session.id, &state.db).await.unwrap();
    assert_eq!(participants.len(), 1);
    assert_eq!(participants[0].name, "Diana");
    assert_eq!(participants[0].participation_id, participation.id);
}

#[actix_rt::test]
async fn up_reports_a_reachable_database() {
    let state = match state().await {
        Some(state) => state,
        None => return,
    };
    let app = test::init_service(App::new().app_data(state.clone()).configure(server::configure)).await;

    let req = test::TestRequest::get().uri("/up").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}
