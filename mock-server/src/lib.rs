//! In-memory imitation of the slice of the Graph REST surface the client
//! tests drive: contacts CRUD, message delete / send, a request echo, a
//! status route that answers with any code and a Graph-shaped error body,
//! plus a redirect and a non-UTF-8 body for transport edge cases.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, HeaderMap, Method, StatusCode, Uri},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{any, delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;
use uuid::Uuid;

/// Token the server treats as expired.
pub const EXPIRED_TOKEN: &str = "expired";

pub type Db = Arc<RwLock<HashMap<String, Value>>>;

/// What `/v1.0/echo` reports back about the request it received.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub query: Option<String>,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

#[derive(Deserialize)]
pub struct ErrorCode {
    pub code: Option<String>,
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    let api = Router::new()
        .route("/me/contacts", get(list_contacts).post(create_contact))
        .route(
            "/me/contacts/{id}",
            get(get_contact).patch(update_contact).delete(delete_contact),
        )
        .route("/me/messages/{id}", delete(delete_message))
        .route("/me/sendMail", post(send_mail))
        .route("/echo", any(echo))
        .route("/status/{code}", any(status))
        .route("/redirect", get(redirect))
        .route("/binary", get(binary))
        .layer(middleware::from_fn(require_bearer))
        .with_state(db);
    Router::new().nest("/v1.0", api)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub fn graph_error(status: StatusCode, code: &str, message: &str) -> Response {
    (status, Json(json!({ "error": { "code": code, "message": message } }))).into_response()
}

async fn require_bearer(request: Request, next: Next) -> Response {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or_default();
    if token.is_empty() || token == EXPIRED_TOKEN {
        return graph_error(
            StatusCode::UNAUTHORIZED,
            "InvalidAuthenticationToken",
            "Access token has expired or is not yet valid.",
        );
    }
    next.run(request).await
}

fn not_found(id: &str) -> Response {
    graph_error(
        StatusCode::NOT_FOUND,
        "ErrorItemNotFound",
        &format!("The specified object {id} was not found in the store."),
    )
}

async fn list_contacts(State(db): State<Db>, Query(params): Query<HashMap<String, String>>) -> Response {
    let number = |key: &str| params.get(key).and_then(|v| v.parse::<usize>().ok());
    let skip = number("$skip").unwrap_or(0);
    let top = number("$top").unwrap_or(usize::MAX);

    let contacts = db.read().await;
    let mut all: Vec<&Value> = contacts.values().collect();
    all.sort_by_key(|c| c["id"].as_str().map(str::to_string));
    let page: Vec<Value> = all.into_iter().skip(skip).take(top).cloned().collect();
    Json(json!({ "value": page })).into_response()
}

async fn create_contact(State(db): State<Db>, Json(input): Json<Map<String, Value>>) -> Response {
    let id = Uuid::new_v4().to_string();
    let mut contact = input;
    contact.insert("id".to_string(), Value::from(id.clone()));
    let contact = Value::Object(contact);
    db.write().await.insert(id, contact.clone());
    (StatusCode::CREATED, Json(contact)).into_response()
}

async fn get_contact(State(db): State<Db>, Path(id): Path<String>) -> Response {
    match db.read().await.get(&id) {
        Some(contact) => Json(contact.clone()).into_response(),
        None => not_found(&id),
    }
}

async fn update_contact(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<Map<String, Value>>,
) -> Response {
    let mut contacts = db.write().await;
    let Some(Value::Object(contact)) = contacts.get_mut(&id) else {
        return not_found(&id);
    };
    for (key, value) in input {
        if key != "id" {
            contact.insert(key, value);
        }
    }
    Json(Value::Object(contact.clone())).into_response()
}

async fn delete_contact(State(db): State<Db>, Path(id): Path<String>) -> Response {
    match db.write().await.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(&id),
    }
}

async fn delete_message(Path(id): Path<String>) -> StatusCode {
    debug!(%id, "message deleted");
    StatusCode::NO_CONTENT
}

async fn send_mail(Json(input): Json<Value>) -> Response {
    if input.get("Message").is_none() {
        return graph_error(
            StatusCode::BAD_REQUEST,
            "ErrorInvalidRequest",
            "Message is required.",
        );
    }
    StatusCode::ACCEPTED.into_response()
}

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: String) -> Json<Echo> {
    let headers = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();
    Json(Echo {
        method: method.to_string(),
        query: uri.query().map(str::to_string),
        headers,
        body,
    })
}

async fn status(Path(code): Path<u16>, Query(error): Query<ErrorCode>) -> Response {
    let Ok(status) = StatusCode::from_u16(code) else {
        return graph_error(StatusCode::BAD_REQUEST, "ErrorInvalidRequest", "invalid status code");
    };
    if status.is_success() {
        return status.into_response();
    }
    let code = error.code.unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("UnknownError")
            .replace(' ', "")
    });
    graph_error(status, &code, &format!("Simulated {} response.", status.as_u16()))
}

async fn redirect() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, "/v1.0/echo")]).into_response()
}

async fn binary() -> Response {
    (
        [(header::CONTENT_TYPE, "application/octet-stream")],
        vec![0xff_u8, 0xfe, 0x00, 0x01],
    )
        .into_response()
}
