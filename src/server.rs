use actix_web::web::Data;
use actix_web::{error, get, middleware, web, App, HttpRequest, HttpResponse, HttpServer};
use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::db;
use crate::errors::ServiceError;
use crate::participations;
use crate::sessions;

pub type Response = Result<HttpResponse, ServiceError>;

/// shared between all workers
#[derive(Debug, Clone)]
pub struct State {
    pub db: db::Conn,
}

impl State {
    pub fn new(db: db::Conn) -> Self {
        State { db }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

#[get("/health")]
async fn health(req: HttpRequest) -> Response {
    let info = req.connection_info();
    debug!("health check requested at {}", Utc::now());
    debug!("request host: {}", info.host());
    debug!("request peer: {:?}", info.peer_addr());
    for (name, value) in req.headers() {
        debug!("request header {}: {:?}", name, value);
    }

    http_ok_json!(Health {
        status: String::from("ok"),
        timestamp: Utc::now(),
    });
}

/// returns 200 when the process is up and the database is reachable
#[get("/up")]
async fn up(state: Data<State>) -> Response {
    if db::is_healthy(&state.db).await {
        http_ok_json!("ok");
    }

    Err(ServiceError::InternalServerError)
}

/// Registers every route and the extractor configuration,
/// used by the server and by the tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(262_144)
            .error_handler(|err, _| {
                debug!("invalid json payload: {}", err);
                error::Error::from(ServiceError::ValidationError(err.to_string()))
            }),
    )
    .app_data(web::PathConfig::default().error_handler(|err, _| {
        debug!("invalid path: {}", err);
        error::Error::from(ServiceError::NotFound)
    }))
    .service(
        web::scope("/api")
            .configure(sessions::routes::register)
            .configure(participations::routes::register)
            .service(health),
    )
    .service(up);
}

pub async fn launch(db: db::Conn) -> std::io::Result<()> {
    let state = Data::new(State::new(db));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::DefaultHeaders::new().add(("X-Version", env!("CARGO_PKG_VERSION"))))
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure)
    })
    .bind((Config::api_host(), Config::api_port()))?
    .run()
    .await
}
