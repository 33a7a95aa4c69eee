//! Routing for `GET /?action=quotes|history|search`.
//!
//! Every response carries `Access-Control-Allow-Origin: *`; any `OPTIONS` request is
//! answered by the CORS layer with an empty 200.
use axum::extract::{Query, State};
use axum::http::{Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use log::{debug, info};
use moex_common::MoexError;
use moex_common::action::Action;
use moex_common::quote::{ErrorBody, HistoryResponse, QuotesResponse, SearchResponse};
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::iss::{self, IssApi};

/// Shared state of the endpoint: the upstream and the calendar closing history windows.
pub struct Endpoint<A> {
    api: A,
    today: fn() -> NaiveDate,
}

impl<A: IssApi> Endpoint<A> {
    /// Endpoint over `api`, using the local calendar date.
    pub fn new(api: A) -> Self {
        Self::with_clock(api, local_today)
    }

    /// Endpoint over `api` with a fixed source of "today".
    pub fn with_clock(api: A, today: fn() -> NaiveDate) -> Self {
        Self { api, today }
    }

    /// Answers a parsed action. Upstream failures of history and search are reported
    /// in the body with `200`.
    pub async fn answer(&self, action: &Action) -> Response {
        match action {
            Action::Quotes { tickers } => {
                let quotes = iss::quotes(&self.api, tickers).await;
                debug!("{} of {} quotes resolved", quotes.len(), tickers.len());
                Json(QuotesResponse { quotes }).into_response()
            }
            Action::History { ticker, days } => {
                let body = match iss::history(&self.api, ticker, *days, (self.today)()).await {
                    Ok(history) => HistoryResponse {
                        ticker: Some(ticker.clone()),
                        history,
                        error: None,
                    },
                    Err(e) => HistoryResponse {
                        ticker: Some(ticker.clone()),
                        history: Vec::new(),
                        error: Some(e.to_string()),
                    },
                };
                Json(body).into_response()
            }
            Action::Search { query } => {
                let body = match iss::search(&self.api, query).await {
                    Ok(results) => SearchResponse {
                        results,
                        error: None,
                    },
                    Err(e) => SearchResponse {
                        results: Vec::new(),
                        error: Some(e.to_string()),
                    },
                };
                Json(body).into_response()
            }
        }
    }
}

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Builds the endpoint router.
pub fn router<A: IssApi>(endpoint: Arc<Endpoint<A>>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(serve_action::<A>).fallback(method_not_allowed))
        .layer(cors)
        .with_state(endpoint)
}

async fn serve_action<A: IssApi>(
    State(endpoint): State<Arc<Endpoint<A>>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let pairs = params.iter().map(|(k, v)| (k.as_str(), v.as_str()));
    let action = match Action::from_query(pairs) {
        Ok(Some(action)) => action,
        Ok(None) => return error_response(StatusCode::BAD_REQUEST, "Unknown action"),
        Err(MoexError::Format(msg)) | Err(MoexError::ParseTickers(msg)) => {
            return error_response(StatusCode::BAD_REQUEST, msg);
        }
        Err(e) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };

    let response = endpoint.answer(&action).await;
    info!("GET action={} -> {}", action.name(), response.status());
    response
}

async fn method_not_allowed() -> Response {
    error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}
