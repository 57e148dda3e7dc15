use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{error, info};
use uuid::Uuid;
use warp::Filter;

use chrono::Utc;
use game_core::{DailyWordSelector, GameSession};
use game_sheets::{AnalyticsPipeline, WordSource, load_daily_word};
use game_types::GameplayEvent;

pub mod config;

/// Shared per-process state: one live session behind a swap lock (replaced
/// at day rollover) and one analytics pipeline.
pub struct AppState {
    pub session: RwLock<Arc<GameSession>>,
    pub analytics: AnalyticsPipeline,
}

impl AppState {
    pub fn new(session: GameSession, analytics: AnalyticsPipeline) -> Self {
        Self {
            session: RwLock::new(Arc::new(session)),
            analytics,
        }
    }

    async fn current_session(&self) -> Arc<GameSession> {
        self.session.read().await.clone()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GuessRequest {
    guess: String,
    player_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GuessResponse {
    correct: bool,
    masked_word: String,
    revealed: Vec<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HintQuery {
    category: String,
    player_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HintResponse {
    category: String,
    label: String,
    hint: String,
    emoji: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatsQuery {
    game_id: Option<String>,
    player_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WordResponse {
    game_id: String,
    masked_word: String,
    categories: Vec<String>,
    category_emojis: std::collections::HashMap<String, String>,
}

/// Anonymous players get a throwaway id so analytics rows stay non-empty.
fn resolve_player_id(player_id: Option<String>) -> String {
    player_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

pub fn create_routes(
    state: Arc<AppState>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let state_filter = warp::any().map({
        let state = state.clone();
        move || state.clone()
    });

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", warp::http::StatusCode::OK));

    // Masked word + categories for the game page
    let word = warp::path("word")
        .and(warp::get())
        .and(state_filter.clone())
        .and_then(handle_word_request);

    // Guess submission
    let guess = warp::path("guess")
        .and(warp::post())
        .and(warp::body::json())
        .and(state_filter.clone())
        .and_then(handle_guess_request);

    // Hint lookup
    let hint = warp::path("hint")
        .and(warp::get())
        .and(warp::query::<HintQuery>())
        .and(state_filter.clone())
        .and_then(handle_hint_request);

    // Player stats lookup
    let stats = warp::path("stats")
        .and(warp::get())
        .and(warp::query::<StatsQuery>())
        .and(state_filter.clone())
        .and_then(handle_stats_request);

    // CORS configuration
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["GET", "POST"]);

    health
        .or(word)
        .or(guess)
        .or(hint)
        .or(stats)
        .with(cors)
        .with(warp::log("daily_word"))
}

async fn handle_word_request(state: Arc<AppState>) -> Result<impl warp::Reply, warp::Rejection> {
    let session = state.current_session().await;
    Ok(warp::reply::json(&WordResponse {
        game_id: session.daily_game_id(),
        masked_word: session.masked_word(),
        categories: session.categories().to_vec(),
        category_emojis: session.category_emojis(),
    }))
}

async fn handle_guess_request(
    request: GuessRequest,
    state: Arc<AppState>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let session = state.current_session().await;
    let (correct, revealed) = session.check_guess(&request.guess);

    let player_id = resolve_player_id(request.player_id);
    state.analytics.submit(GameplayEvent::guess(
        &session.daily_game_id(),
        &player_id,
        request.guess.trim(),
        correct,
    ));

    Ok(warp::reply::json(&GuessResponse {
        correct,
        masked_word: session.masked_word(),
        revealed,
    }))
}

async fn handle_hint_request(
    query: HintQuery,
    state: Arc<AppState>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let session = state.current_session().await;

    let hint = match session.hint(&query.category) {
        Ok(hint) => hint.to_string(),
        Err(err) => {
            return Ok(warp::reply::with_status(
                warp::reply::json(&serde_json::json!({ "error": err.to_string() })),
                warp::http::StatusCode::NOT_FOUND,
            ));
        }
    };
    let emoji = match session.emoji(&query.category) {
        Ok(emoji) => emoji.to_string(),
        Err(err) => {
            return Ok(warp::reply::with_status(
                warp::reply::json(&serde_json::json!({ "error": err.to_string() })),
                warp::http::StatusCode::NOT_FOUND,
            ));
        }
    };
    let label = session.label(&query.category).unwrap_or("").to_string();

    let player_id = resolve_player_id(query.player_id);
    state.analytics.submit(GameplayEvent::hint(
        &session.daily_game_id(),
        &player_id,
        &query.category,
    ));

    Ok(warp::reply::with_status(
        warp::reply::json(&HintResponse {
            category: query.category,
            label,
            hint,
            emoji,
        }),
        warp::http::StatusCode::OK,
    ))
}

async fn handle_stats_request(
    query: StatsQuery,
    state: Arc<AppState>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let session = state.current_session().await;
    let game_id = query
        .game_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| session.daily_game_id());
    let player_id = query.player_id.unwrap_or_default();

    let stats = state.analytics.player_stats(&game_id, &player_id).await;
    Ok(warp::reply::json(&stats))
}

/// One reload attempt: load a fresh word and swap the session in, or keep
/// the previous word so the game stays playable. Returns whether the swap
/// happened.
pub async fn reload_session(
    state: &AppState,
    source: &dyn WordSource,
    selector: &DailyWordSelector,
    partial_unmasking: bool,
) -> bool {
    match load_daily_word(source, selector).await {
        Ok(record) => {
            *state.session.write().await = Arc::new(GameSession::new(record, partial_unmasking));
            true
        }
        Err(err) => {
            error!(error = %err, "daily word reload failed, keeping previous word");
            false
        }
    }
}

/// Swap in a fresh session when the UTC date rolls over.
pub async fn run_daily_reload(
    state: Arc<AppState>,
    source: Arc<dyn WordSource>,
    selector: DailyWordSelector,
    partial_unmasking: bool,
) {
    let mut interval = tokio::time::interval(Duration::from_secs(60));
    let mut loaded_for = Utc::now().date_naive();

    loop {
        interval.tick().await;
        let today = Utc::now().date_naive();
        if today == loaded_for {
            continue;
        }

        if reload_session(&state, source.as_ref(), &selector, partial_unmasking).await {
            loaded_for = today;
            info!(%today, "rolled over to a new daily word");
        }
    }
}
