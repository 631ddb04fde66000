//! The axum router and request handlers.

use crate::chat::{ChatBackend, HttpChatClient};
use crate::config::ServerConfig;
use crate::error::{ServingError, ServingResult};
use crate::page::INDEX_HTML;
use crate::predictor::{Prediction, Predictor};
use crate::session::SessionStore;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use casaval_data::dataset::{HousingDataset, HousingRow};
use casaval_data::stats;
use casaval_features::RawRecord;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

/// Shared server state. Everything except the session store is read-only.
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<Predictor>,
    pub dataset: Arc<HousingDataset>,
    pub sessions: Arc<SessionStore>,
    pub chat: Option<Arc<dyn ChatBackend>>,
    pub started_at: Instant,
}

/// Loads artifacts and the dataset, then serves until shutdown.
///
/// # Errors
///
/// Returns [`ServingError::ArtifactLoad`] or [`ServingError::DatasetLoad`]
/// at startup; both are fatal. A missing chat API key only disables the chat
/// endpoint and logs a warning, because the side-channel must never gate
/// prediction capability.
pub async fn serve(config: ServerConfig) -> ServingResult<()> {
    let predictor = Arc::new(Predictor::load_from_dir(&config.artifact_dir)?);
    let dataset = Arc::new(HousingDataset::from_csv_path(&config.data_path)?);
    info!(rows = dataset.len(), "Dataset loaded for chart panels");

    let chat: Option<Arc<dyn ChatBackend>> = match &config.chat {
        Some(chat_config) => match HttpChatClient::new(chat_config.clone()) {
            Ok(client) => Some(Arc::new(client)),
            Err(e) => {
                warn!(error = %e, "Chat side-channel disabled");
                None
            }
        },
        None => None,
    };

    let state = AppState {
        predictor,
        dataset,
        sessions: Arc::new(SessionStore::new()),
        chat,
        started_at: Instant::now(),
    };
    let app = create_router(state, config.enable_cors);

    let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
    info!("Serving on http://{}", config.socket_addr());

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for shutdown signal");
        } else {
            info!("Shutdown signal received");
        }
    };
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("Server shutdown complete");
    Ok(())
}

/// Builds the router with all endpoints.
pub fn create_router(state: AppState, enable_cors: bool) -> Router {
    let mut app = Router::new()
        .route("/", get(index_handler))
        .route("/api/predict", post(predict_handler))
        .route("/api/stats", get(stats_handler))
        .route("/api/histogram", get(histogram_handler))
        .route("/api/correlation", get(correlation_handler))
        .route("/api/scatter", get(scatter_handler))
        .route("/api/map", get(map_handler))
        .route("/api/session", post(session_create_handler))
        .route("/api/session/:id", delete(session_clear_handler))
        .route("/api/chat", post(chat_handler))
        .route("/health", get(health_handler))
        .with_state(state);

    if enable_cors {
        app = app.layer(CorsLayer::permissive());
    }
    app
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(err: &ServingError) -> ApiError {
    let status = if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else if err.is_recoverable() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// A prediction request: the form fields, category as its dataset label.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictRequest {
    pub longitude: f64,
    pub latitude: f64,
    pub housing_median_age: f64,
    pub total_rooms: f64,
    pub total_bedrooms: f64,
    pub population: f64,
    pub households: f64,
    pub median_income: f64,
    pub ocean_proximity: String,
}

async fn predict_handler(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<Prediction>, ApiError> {
    let record = RawRecord::from_fields(
        request.longitude,
        request.latitude,
        request.housing_median_age,
        request.total_rooms,
        request.total_bedrooms,
        request.population,
        request.households,
        request.median_income,
        &request.ocean_proximity,
    )
    .map_err(|e| api_error(&e.into()))?;

    match state.predictor.predict(&record) {
        Ok(prediction) => Ok(Json(prediction)),
        Err(e) => {
            warn!(error = %e, "Prediction failed");
            Err(api_error(&e))
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub rows: usize,
    pub preview: Vec<HousingRow>,
    pub summaries: Vec<stats::ColumnSummary>,
}

async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse {
        rows: state.dataset.len(),
        preview: stats::preview(&state.dataset, 5).to_vec(),
        summaries: stats::summaries(&state.dataset),
    })
}

#[derive(Debug, Deserialize)]
pub struct HistogramParams {
    #[serde(default = "default_bins")]
    pub bins: usize,
}

fn default_bins() -> usize {
    30
}

async fn histogram_handler(
    State(state): State<AppState>,
    Query(params): Query<HistogramParams>,
) -> Json<stats::Histogram> {
    Json(stats::price_histogram(&state.dataset, params.bins))
}

async fn correlation_handler(State(state): State<AppState>) -> Json<stats::CorrelationMatrix> {
    Json(stats::correlation_matrix(&state.dataset))
}

#[derive(Debug, Deserialize)]
pub struct SampleParams {
    #[serde(default = "default_max_points")]
    pub max_points: usize,
}

fn default_max_points() -> usize {
    1000
}

async fn scatter_handler(
    State(state): State<AppState>,
    Query(params): Query<SampleParams>,
) -> Json<Vec<stats::ScatterPoint>> {
    Json(stats::scatter_sample(&state.dataset, params.max_points))
}

async fn map_handler(
    State(state): State<AppState>,
    Query(params): Query<SampleParams>,
) -> Json<Vec<stats::MapPoint>> {
    Json(stats::map_points(&state.dataset, params.max_points))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session_id: String,
}

async fn session_create_handler(State(state): State<AppState>) -> Json<SessionResponse> {
    Json(SessionResponse {
        session_id: state.sessions.create(),
    })
}

async fn session_clear_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.sessions.clear(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(api_error(&ServingError::UnknownSession(id)))
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
    /// True when the reply is a local fallback because the external service
    /// failed. The session history does not record fallback replies.
    pub degraded: bool,
}

const CHAT_FALLBACK: &str = "HouseBot is unavailable right now. Please try again later.";

async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let backend = state
        .chat
        .as_ref()
        .ok_or_else(|| api_error(&ServingError::external("chat is not configured")))?;

    // The user turn is part of the history whether or not the provider
    // answers; the fallback reply is not.
    let history = state
        .sessions
        .with_session(&request.session_id, |session| {
            let history = session.messages.clone();
            session.push_user(&request.message);
            history
        })
        .ok_or_else(|| api_error(&ServingError::UnknownSession(request.session_id.clone())))?;

    let response = match backend.reply(&history, &request.message).await {
        Ok(reply) => {
            // A session cleared while the provider was answering stays
            // cleared; the reply is still returned to the caller.
            state
                .sessions
                .with_session(&request.session_id, |session| session.push_assistant(&reply));
            ChatResponse {
                reply,
                degraded: false,
            }
        }
        Err(e) => {
            warn!(error = %e, "Chat side-channel failed; serving fallback");
            ChatResponse {
                reply: CHAT_FALLBACK.to_string(),
                degraded: true,
            }
        }
    };

    Ok(Json(response))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub chat_enabled: bool,
    pub live_sessions: usize,
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        chat_enabled: state.chat.is_some(),
        live_sessions: state.sessions.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ChatMessage;
    use casaval_model::{LinearRegression, StandardScaler};
    use casaval_features::FEATURE_COUNT;
    use async_trait::async_trait;

    struct EchoBackend;

    #[async_trait]
    impl ChatBackend for EchoBackend {
        async fn reply(&self, history: &[ChatMessage], user_message: &str) -> ServingResult<String> {
            Ok(format!("echo[{}]: {user_message}", history.len()))
        }
    }

    struct DownBackend;

    #[async_trait]
    impl ChatBackend for DownBackend {
        async fn reply(&self, _: &[ChatMessage], _: &str) -> ServingResult<String> {
            Err(ServingError::external("connection refused"))
        }
    }

    // Clears its own session while "answering", like a user ending the
    // session during a slow provider call.
    struct SelfClearingBackend {
        sessions: Arc<SessionStore>,
        session_id: String,
    }

    #[async_trait]
    impl ChatBackend for SelfClearingBackend {
        async fn reply(&self, _: &[ChatMessage], _: &str) -> ServingResult<String> {
            self.sessions.clear(&self.session_id);
            Ok("too late".to_string())
        }
    }

    fn test_state(chat: Option<Arc<dyn ChatBackend>>) -> AppState {
        let scaler =
            StandardScaler::from_state(vec![0.0; FEATURE_COUNT], vec![1.0; FEATURE_COUNT]).unwrap();
        let model = LinearRegression::from_parameters(vec![100.0; FEATURE_COUNT], 50_000.0);
        let rows = vec![HousingRow {
            longitude: -122.0,
            latitude: 37.0,
            housing_median_age: 41.0,
            total_rooms: 880.0,
            total_bedrooms: Some(129.0),
            population: 322.0,
            households: 126.0,
            median_income: 8.3,
            median_house_value: 452_600.0,
            ocean_proximity: "NEAR BAY".to_string(),
        }];
        AppState {
            predictor: Arc::new(Predictor::new(scaler, model)),
            dataset: Arc::new(HousingDataset::new(rows).unwrap()),
            sessions: Arc::new(SessionStore::new()),
            chat,
            started_at: Instant::now(),
        }
    }

    fn predict_request() -> PredictRequest {
        PredictRequest {
            longitude: -120.0,
            latitude: 35.0,
            housing_median_age: 20.0,
            total_rooms: 3000.0,
            total_bedrooms: 500.0,
            population: 800.0,
            households: 400.0,
            median_income: 4.5,
            ocean_proximity: "INLAND".to_string(),
        }
    }

    #[tokio::test]
    async fn predict_handler_returns_formatted_estimate() {
        let state = test_state(None);
        let response = predict_handler(State(state), Json(predict_request()))
            .await
            .unwrap();
        assert!(response.estimate.is_finite());
        assert!(response.formatted.starts_with('$') || response.formatted.starts_with("-$"));
    }

    #[tokio::test]
    async fn predict_handler_rejects_unknown_category() {
        let state = test_state(None);
        let mut request = predict_request();
        request.ocean_proximity = "RIVERSIDE".to_string();
        let (status, body) = predict_handler(State(state), Json(request))
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.error.contains("RIVERSIDE"));
    }

    #[tokio::test]
    async fn chat_failure_serves_fallback_and_leaves_prediction_working() {
        let state = test_state(Some(Arc::new(DownBackend)));
        let session_id = state.sessions.create();

        let response = chat_handler(
            State(state.clone()),
            Json(ChatRequest {
                session_id: session_id.clone(),
                message: "hello?".to_string(),
            }),
        )
        .await
        .unwrap();
        assert!(response.degraded);
        assert_eq!(response.reply, CHAT_FALLBACK);

        // The user turn is recorded, the fallback is not.
        let session = state.sessions.get(&session_id).unwrap();
        assert_eq!(session.messages.len(), 1);

        // The prediction path is unaffected by the dead side-channel.
        let prediction = predict_handler(State(state), Json(predict_request()))
            .await
            .unwrap();
        assert!(prediction.estimate.is_finite());
    }

    #[tokio::test]
    async fn chat_round_trip_records_both_turns() {
        let state = test_state(Some(Arc::new(EchoBackend)));
        let session_id = state.sessions.create();

        let response = chat_handler(
            State(state.clone()),
            Json(ChatRequest {
                session_id: session_id.clone(),
                message: "Is Inland cheaper?".to_string(),
            }),
        )
        .await
        .unwrap();
        assert!(!response.degraded);
        assert_eq!(response.reply, "echo[0]: Is Inland cheaper?");

        let session = state.sessions.get(&session_id).unwrap();
        assert_eq!(session.messages.len(), 2);
    }

    #[tokio::test]
    async fn session_cleared_mid_exchange_stays_cleared() {
        let mut state = test_state(None);
        let session_id = state.sessions.create();
        state.chat = Some(Arc::new(SelfClearingBackend {
            sessions: Arc::clone(&state.sessions),
            session_id: session_id.clone(),
        }));

        let response = chat_handler(
            State(state.clone()),
            Json(ChatRequest {
                session_id: session_id.clone(),
                message: "still there?".to_string(),
            }),
        )
        .await
        .unwrap();
        assert!(!response.degraded);
        assert_eq!(response.reply, "too late");

        // The in-flight reply must not recreate the cleared session.
        assert!(state.sessions.get(&session_id).is_none());
        assert_eq!(state.sessions.len(), 0);
    }

    #[tokio::test]
    async fn unknown_session_is_a_client_error() {
        let state = test_state(Some(Arc::new(EchoBackend)));
        let (status, _) = chat_handler(
            State(state),
            Json(ChatRequest {
                session_id: "nope".to_string(),
                message: "hi".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn session_lifecycle_via_handlers() {
        let state = test_state(None);
        let created = session_create_handler(State(state.clone())).await;
        let id = created.session_id.clone();

        let status = session_clear_handler(State(state.clone()), Path(id.clone()))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(session_clear_handler(State(state), Path(id)).await.is_err());
    }

    #[tokio::test]
    async fn health_reports_chat_availability() {
        let response = health_handler(State(test_state(None))).await;
        assert_eq!(response.status, "healthy");
        assert!(!response.chat_enabled);
    }

    #[tokio::test]
    async fn chart_endpoints_render_the_dataset() {
        let state = test_state(None);
        let stats_response = stats_handler(State(state.clone())).await;
        assert_eq!(stats_response.rows, 1);
        assert_eq!(stats_response.preview.len(), 1);

        let histogram = histogram_handler(
            State(state.clone()),
            Query(HistogramParams { bins: 10 }),
        )
        .await;
        assert_eq!(histogram.counts.iter().sum::<usize>(), 1);

        let map = map_handler(State(state), Query(SampleParams { max_points: 10 })).await;
        assert_eq!(map.len(), 1);
        assert_eq!(map[0].lat, 37.0);
    }
}
