use actix_web::http::StatusCode;
use actix_web::web::Bytes;
use actix_web::{HttpRequest, HttpResponse};
use url::Url;

use crate::errors::ServiceError;

/// requests under this prefix are forwarded, without the prefix
pub const PREFIX: &str = "/api";

/// headers that only make sense for a single connection
const HOP_BY_HOP: [&str; 10] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailers",
    "transfer-encoding",
    "upgrade",
    "host",
    "content-length",
];

fn is_hop_by_hop(name: &str) -> bool {
    HOP_BY_HOP.iter().any(|header| name.eq_ignore_ascii_case(header))
}

/// Forwards `/api/*` calls from the frontend to the api
#[derive(Debug, Clone)]
pub struct Proxy {
    client: reqwest::Client,
    target: Url,
}

impl Proxy {
    pub fn new(target: &str) -> Result<Self, url::ParseError> {
        Ok(Proxy {
            client: reqwest::Client::new(),
            target: Url::parse(target)?,
        })
    }

    /// strips the `/api` prefix and appends what's left to the target
    pub fn rewrite(&self, path: &str, query: &str) -> Url {
        let rest = path.strip_prefix(PREFIX).unwrap_or(path);

        let mut url = self.target.clone();
        url.set_path(&format!("{}{}", self.target.path().trim_end_matches('/'), rest));
        url.set_query(if query.is_empty() { None } else { Some(query) });

        url
    }

    pub async fn forward(&self, req: &HttpRequest, body: Bytes) -> Result<HttpResponse, ServiceError> {
        let url = self.rewrite(req.path(), req.query_string());
        debug!("proxying {} {} to {}", req.method(), req.path(), url);

        let method = reqwest::Method::from_bytes(req.method().as_str().as_bytes())
            .map_err(|_| ServiceError::BadGateway)?;

        // the host header is left out, so reqwest sets it to the target's
        let mut upstream = self.client.request(method, url);
        for (name, value) in req.headers() {
            if !is_hop_by_hop(name.as_str()) {
                upstream = upstream.header(name.as_str(), value.as_bytes());
            }
        }

        let resp = upstream.body(body).send().await?;

        let status =
            StatusCode::from_u16(resp.status().as_u16()).map_err(|_| ServiceError::BadGateway)?;
        let mut response = HttpResponse::build(status);
        for (name, value) in resp.headers() {
            if !is_hop_by_hop(name.as_str()) {
                response.append_header((name.as_str(), value.as_bytes()));
            }
        }

        let body = resp.bytes().await?;

        Ok(response.body(body))
    }
}
