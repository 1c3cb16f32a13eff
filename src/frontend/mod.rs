//! The single page shell listing sessions and their details.
//!
//! Every known view is served the same page, which picks the view client side
//! and fetches its data through the `/api` proxy.
pub mod proxy;
pub mod router;

use actix_web::http::header;
use actix_web::web::{Bytes, Data};
use actix_web::{get, middleware, web, App, HttpRequest, HttpResponse, HttpServer};

use crate::config::Config;
use crate::server::Response;

pub use proxy::Proxy;
pub use router::Route;

const INDEX_HTML: &str = include_str!("../../frontend/index.html");
const APP_JS: &str = include_str!("../../frontend/app.js");

#[get("/assets/app.js")]
async fn app_js() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/javascript; charset=utf-8")
        .body(APP_JS)
}

async fn page(req: HttpRequest) -> HttpResponse {
    match router::resolve(req.path()) {
        Some(Route::Redirect(location)) => HttpResponse::Found()
            .insert_header((header::LOCATION, location))
            .finish(),
        Some(route) => {
            debug!("serving {:?}", route);
            HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(INDEX_HTML)
        }
        None => HttpResponse::NotFound().body("Not Found"),
    }
}

async fn forward(req: HttpRequest, body: Bytes, proxy: Data<Proxy>) -> Response {
    proxy.forward(&req, body).await
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope(proxy::PREFIX).default_service(web::to(forward)))
        .service(app_js)
        .default_service(web::to(page));
}

pub async fn launch(proxy: Proxy) -> std::io::Result<()> {
    let proxy = Data::new(proxy);

    HttpServer::new(move || {
        App::new()
            .app_data(proxy.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind((Config::frontend_host(), Config::frontend_port()))?
    .run()
    .await
}
