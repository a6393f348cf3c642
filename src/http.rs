use crate::backend::BookingStore;
use crate::booking_manager::BookingManager;
use crate::configuration::Configuration;
use crate::errors::BookingError;
use crate::types::{Availability, BookingRequest, Confirmation};
use axum::body::Bytes;
use axum::http::{header, HeaderMap};
use axum::response::{Html, Response};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum::{
    routing::{get, post},
    Router,
};
use serde_json::json;
use std::path::PathBuf;
use tokio::fs;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

/// Parameterless pages and the template each one is rendered from.
const PAGES: [(&str, &str); 8] = [
    ("/", "index"),
    ("/promposal", "promposal"),
    ("/dateinvite", "dateinvite"),
    ("/fake1", "fake1"),
    ("/terms", "terms"),
    ("/privacy", "privacy"),
    ("/contact", "contact"),
    ("/booking", "booking"),
];

pub struct AppState<S: BookingStore, C: Configuration> {
    booking_manager: BookingManager<S>,
    configuration: C,
}

impl<S: BookingStore, C: Configuration> Clone for AppState<S, C> {
    fn clone(&self) -> Self {
        Self {
            booking_manager: self.booking_manager.clone(),
            configuration: self.configuration.clone(),
        }
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(err = ?self, "Booking request failed");
        }
        let body = Json(json!({ "ok": false, "error": self.public_message() }));
        (status, body).into_response()
    }
}

pub fn create_app<S: BookingStore, C: Configuration>(store: S, configuration: C) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let state = AppState {
        booking_manager: BookingManager::new(store, configuration.corruption_policy()),
        configuration,
    };

    let mut pages = Router::new();
    for (path, template) in PAGES {
        pages = pages.route(
            path,
            get(move |State(state): State<AppState<S, C>>| {
                get_page(state.configuration.templates_path(), template)
            }),
        );
    }

    let api = Router::new()
        .route("/api/availability", get(get_availability::<S, C>))
        .route("/api/book", post(book_slot::<S, C>));

    Router::new()
        .merge(pages)
        .merge(api)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn get_page(
    templates_path: PathBuf,
    template: &'static str,
) -> Result<Html<String>, (StatusCode, String)> {
    let path = templates_path.join(format!("{template}.html"));

    match fs::read_to_string(&path).await {
        Ok(contents) => Ok(Html(contents)),
        Err(err) => {
            error!(?err, path = %path.display(), "Failed to read template");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to read template {template}"),
            ))
        }
    }
}

async fn get_availability<S: BookingStore, C: Configuration>(
    State(state): State<AppState<S, C>>,
) -> Result<Json<Availability>, BookingError> {
    let booking_manager = state.booking_manager;
    let availability = tokio::task::spawn_blocking(move || booking_manager.availability())
        .await
        .map_err(|err| BookingError::Worker(err.to_string()))??;
    Ok(Json(availability))
}

/// `application/json` or any `+json` media type.
fn is_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

async fn book_slot<S: BookingStore, C: Configuration>(
    State(state): State<AppState<S, C>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Confirmation>, BookingError> {
    // Anything not sent as JSON is treated as an empty submission.
    let request = match is_json(&headers) {
        true => BookingRequest::from_body(&body),
        false => BookingRequest::default(),
    };
    let booking_manager = state.booking_manager;
    let confirmation = tokio::task::spawn_blocking(move || booking_manager.book(&request))
        .await
        .map_err(|err| BookingError::Worker(err.to_string()))??;
    Ok(Json(confirmation))
}
