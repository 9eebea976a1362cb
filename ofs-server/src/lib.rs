use serde::Deserialize;
use std::sync::Arc;
use warp::Filter;

use ofs_core::{DailyLedger, DayWindow, LedgerError, parse_submission};
use ofs_types::{ApiFailure, ApiSuccess, PlayedGame};

pub mod config;

/// Header carrying the user id resolved by the session layer in front of us.
pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Deserialize)]
struct StatsRequest {
    #[serde(default)]
    query: serde_json::Value,
}

pub fn create_routes(
    ledger: Arc<DailyLedger>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let ledger_filter = warp::any().map({
        let ledger = ledger.clone();
        move || ledger.clone()
    });

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", warp::http::StatusCode::OK));

    // Submit today's games, get the day's fitness stats back
    let ofs_stats = warp::path!("ofs" / "stats")
        .and(warp::post())
        .and(warp::header::optional::<String>(USER_ID_HEADER))
        .and(warp::body::content_length_limit(1024 * 1024))
        .and(warp::body::json())
        .and(ledger_filter.clone())
        .and_then(handle_ofs_stats_request);

    // CORS configuration
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type", USER_ID_HEADER])
        .allow_methods(vec!["GET", "POST"]);

    health
        .or(ofs_stats)
        .with(cors)
        .with(warp::log("opening_fitness"))
}

fn failure(
    message: &str,
    status: warp::http::StatusCode,
) -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(warp::reply::json(&ApiFailure::new(message)), status)
}

async fn handle_ofs_stats_request(
    user_id: Option<String>,
    request: StatsRequest,
    ledger: Arc<DailyLedger>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let Some(user_id) = user_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
    else {
        return Ok(failure(
            "Authentication required",
            warp::http::StatusCode::UNAUTHORIZED,
        ));
    };

    let games = match parse_submission(&request.query) {
        Ok(games) => games,
        Err(err) => {
            tracing::warn!("Rejected ofs submission from {}: {}", user_id, err);
            return Ok(failure("Bad query", warp::http::StatusCode::BAD_REQUEST));
        }
    };

    // Only today's games take part in the daily stats
    let today = DayWindow::today();
    let games: Vec<PlayedGame> = games
        .into_iter()
        .filter(|game| today.contains(game.created_at))
        .collect();

    match ledger.reconcile_within(&user_id, games, today).await {
        Ok(stats) => Ok(warp::reply::with_status(
            warp::reply::json(&ApiSuccess::new(stats)),
            warp::http::StatusCode::OK,
        )),
        Err(LedgerError::Validation(message)) => {
            tracing::warn!("Rejected ofs submission from {}: {}", user_id, message);
            Ok(failure("Bad query", warp::http::StatusCode::BAD_REQUEST))
        }
        Err(err) => {
            tracing::error!("Failed to reconcile ofs stats for {}: {}", user_id, err);
            Ok(failure(
                "Internal server error",
                warp::http::StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}
