use std::{collections::BTreeMap, net::SocketAddr, time::Duration};

use axum::{
    extract::{ConnectInfo, Query, Request, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// Origin reported when the connection's peer address is unknown.
pub const FALLBACK_ORIGIN: &str = "127.0.0.1";

/// Body of a `/get` answer, shaped like httpbin's.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Echo {
    pub args: BTreeMap<String, String>,
    pub headers: BTreeMap<String, String>,
    pub origin: String,
    pub url: String,
}

/// How `/get` answers.
#[derive(Clone, Debug, Default)]
pub enum Behavior {
    /// Echo the request the way httpbin does.
    #[default]
    Echo,
    /// Reply with this status and an empty body.
    Status(u16),
    /// Reply 200 with this raw body.
    Body(String),
    /// Sleep, then echo.
    Delay(Duration),
}

pub fn app() -> Router {
    app_with(Behavior::Echo)
}

pub fn app_with(behavior: Behavior) -> Router {
    Router::new().route("/get", get(handle_get)).with_state(behavior)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Behavior::Echo).await
}

pub async fn run_with(listener: TcpListener, behavior: Behavior) -> Result<(), std::io::Error> {
    axum::serve(
        listener,
        app_with(behavior).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
}

async fn handle_get(
    State(behavior): State<Behavior>,
    Query(args): Query<BTreeMap<String, String>>,
    request: Request,
) -> Response {
    match behavior {
        Behavior::Echo => Json(echo(args, &request)).into_response(),
        Behavior::Status(code) => {
            let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            tracing::debug!(%status, "answering /get with fixed status");
            status.into_response()
        }
        Behavior::Body(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Behavior::Delay(delay) => {
            tokio::time::sleep(delay).await;
            Json(echo(args, &request)).into_response()
        }
    }
}

fn echo(args: BTreeMap<String, String>, request: &Request) -> Echo {
    let origin = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_canonical().to_string())
        .unwrap_or_else(|| FALLBACK_ORIGIN.to_string());

    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");

    Echo {
        args,
        headers: title_case_headers(request.headers()),
        origin,
        url: format!("http://{host}{}", request.uri()),
    }
}

/// httpbin reports header names as `Title-Case`.
fn title_case_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            let value = value.to_str().ok()?;
            Some((title_case(name.as_str()), value.to_string()))
        })
        .collect()
}

fn title_case(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}
