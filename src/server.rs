use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse,
    },
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::{Duration, SystemTime, UNIX_EPOCH},
};
use tokio::sync::{broadcast, Mutex};
use tokio_stream::{wrappers::BroadcastStream, StreamExt};
use tower_http::services::{ServeDir, ServeFile};
use tracing::info;

use crate::api::{
    AnalyzeRequest, AnalyzeResponse, CompetitionRequest, CompetitionResponse, SaveSearchRequest,
    ScheduleRequest, ScheduleResponse, TitlesRequest, TitlesResponse, TrendingRequest,
};
use crate::searches::{SavedSearch, SavedSearchStore};
use crate::trending;
use crate::youtube_api::YoutubeClient;
use niche_radar::config::AppConfig;
use niche_radar::extract::{self, synthetic};
use niche_radar::metrics::SyntheticMetricsSource;
use niche_radar::{competition, run_analysis, schedule, stable_hash64, titles};

#[derive(Clone)]
struct AppState {
    config: AppConfig,
    youtube: Option<YoutubeClient>,
    searches: Arc<SavedSearchStore>,
    channels: Arc<Mutex<HashMap<String, broadcast::Sender<StageEvent>>>>,
}

#[derive(Clone, Serialize)]
struct StageEvent {
    stage: String,
    message: String,
    timestamp_ms: u128,
}

#[derive(serde::Deserialize)]
struct StreamQuery {
    request_id: String,
}

#[derive(serde::Deserialize)]
struct ListSearchesQuery {
    owner_id: Option<String>,
}

static REQUEST_COUNTER: AtomicUsize = AtomicUsize::new(0);

pub async fn serve(args: crate::ServeArgs, config: AppConfig) -> Result<(), String> {
    let youtube = YoutubeClient::from_env(&config.youtube);
    if youtube.is_none() {
        info!("YOUTUBE_API_KEY not set; extraction and trending run on synthetic data");
    }

    let searches = SavedSearchStore::load(args.searches_path.into()).await?;
    let state = AppState {
        config,
        youtube,
        searches: Arc::new(searches),
        channels: Arc::new(Mutex::new(HashMap::new())),
    };

    let web_root = args.web_root;
    let index_path = format!("{}/index.html", web_root.trim_end_matches('/'));
    let static_service = ServeDir::new(web_root).not_found_service(ServeFile::new(index_path));

    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/analyze", post(analyze_handler))
        .route("/api/analyze/stream", get(stream_handler))
        .route("/api/titles", post(titles_handler))
        .route("/api/competition", post(competition_handler))
        .route("/api/schedule", post(schedule_handler))
        .route("/api/trending", post(trending_handler))
        .route("/api/searches", get(list_searches).post(save_search))
        .route("/api/searches/:id", get(get_search).delete(delete_search))
        .nest_service("/", static_service)
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|err| format!("invalid bind address: {}", err))?;

    info!(%addr, "niche-radar server listening");
    axum::serve(
        tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|err| format!("failed to bind server: {}", err))?,
        app,
    )
    .await
    .map_err(|err| format!("server error: {}", err))?;

    Ok(())
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn analyze_handler(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, (StatusCode, String)> {
    let request_id = request
        .request_id
        .clone()
        .unwrap_or_else(generate_request_id);
    let criteria = request.criteria(&state.config.validation);
    let force_synthetic = request.synthetic.unwrap_or(false);
    let params = request
        .into_params(crate::default_seed())
        .map_err(|err| (StatusCode::BAD_REQUEST, err))?;

    let sender = get_or_create_channel(&state, &request_id).await;
    send_event(&sender, "extracting", "Buscando canais do nicho");

    let now = Utc::now();
    let (channels, failures, source) = match (&state.youtube, force_synthetic) {
        (Some(client), false) => {
            let (channels, failures) = client
                .fetch_channels(
                    &params.niche,
                    &params.language,
                    params.channel_limit(),
                    state.config.youtube.recent_videos_limit,
                )
                .await
                .map_err(|err| (StatusCode::BAD_GATEWAY, err))?;
            (channels, failures, "youtube")
        }
        _ => (
            synthetic::generate_channels(
                &params.niche,
                &params.language,
                params.channel_limit(),
                params.seed,
                now,
            ),
            Vec::new(),
            "synthetic",
        ),
    };

    send_event(&sender, "grouping", "Agrupando canais por palavras-chave");
    let report = extract::ExtractionReport::from_channels(&channels, failures);

    send_event(&sender, "scoring", "Calculando métricas e validando subnichos");
    let mut source_rng = SyntheticMetricsSource::new(params.seed);
    let output = run_analysis(
        report.subnichos,
        &mut source_rng,
        &criteria,
        &state.config.narrative,
        now,
    );

    send_event(&sender, "done", "Análise concluída");
    schedule_cleanup(state.channels.clone(), request_id.clone());

    Ok(Json(AnalyzeResponse::from_output(
        output,
        &params,
        source,
        report.failures,
        request_id,
    )))
}

async fn stream_handler(
    State(state): State<AppState>,
    Query(query): Query<StreamQuery>,
) -> Result<Sse<impl tokio_stream::Stream<Item = Result<Event, std::convert::Infallible>>>, StatusCode>
{
    let sender = get_or_create_channel(&state, &query.request_id).await;
    let receiver = sender.subscribe();
    let stream = BroadcastStream::new(receiver).filter_map(|event| match event {
        Ok(event) => {
            let data = serde_json::to_string(&event).unwrap_or_default();
            Some(Ok(Event::default().data(data)))
        }
        Err(_) => None,
    });

    send_event(&sender, "connected", "Acompanhando etapas da análise");
    Ok(Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(8))))
}

async fn titles_handler(
    State(state): State<AppState>,
    Json(request): Json<TitlesRequest>,
) -> Result<Json<TitlesResponse>, (StatusCode, String)> {
    let (original, opts) = request
        .into_options(crate::default_seed())
        .map_err(|err| (StatusCode::BAD_REQUEST, err))?;

    let variations = titles::generate_variations(&original, &opts, &state.config.titles);
    Ok(Json(TitlesResponse { variations }))
}

async fn competition_handler(
    State(state): State<AppState>,
    Json(request): Json<CompetitionRequest>,
) -> Result<Json<CompetitionResponse>, (StatusCode, String)> {
    let (subnicho, languages, seed) = request
        .into_parts(crate::default_seed())
        .map_err(|err| (StatusCode::BAD_REQUEST, err))?;

    let data =
        competition::simulate_competition(&subnicho, &languages, seed, &state.config.competition);
    let comparisons = competition::compare_languages(data, &state.config.competition);
    let recommendation = competition::recommend(&comparisons, &state.config.competition);

    Ok(Json(CompetitionResponse {
        subnicho,
        comparisons,
        recommendation,
    }))
}

async fn schedule_handler(
    State(state): State<AppState>,
    Json(request): Json<ScheduleRequest>,
) -> Result<Json<ScheduleResponse>, (StatusCode, String)> {
    let (recommendations, cadence, cycles, seed) = request
        .into_parts(crate::default_seed())
        .map_err(|err| (StatusCode::BAD_REQUEST, err))?;

    let entries = schedule::build_schedule(
        &recommendations,
        cadence,
        cycles,
        Utc::now(),
        &state.config.schedule,
        &state.config.titles,
        seed,
    );

    Ok(Json(ScheduleResponse {
        cadence: cadence.label().to_string(),
        entries,
    }))
}

async fn trending_handler(
    State(state): State<AppState>,
    Json(request): Json<TrendingRequest>,
) -> Json<trending::TrendingResponse> {
    let region = request.region.unwrap_or_default();
    Json(trending::trending_topics(state.youtube.as_ref(), &region).await)
}

async fn list_searches(
    State(state): State<AppState>,
    Query(query): Query<ListSearchesQuery>,
) -> Json<Vec<SavedSearch>> {
    Json(state.searches.list(query.owner_id.as_deref()).await)
}

async fn save_search(
    State(state): State<AppState>,
    Json(request): Json<SaveSearchRequest>,
) -> Result<Json<SavedSearch>, (StatusCode, String)> {
    let name = request.name.unwrap_or_default().trim().to_string();
    if name.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Informe um nome para a pesquisa".to_string(),
        ));
    }

    let owner_id = request.owner_id.unwrap_or_default().trim().to_string();
    if owner_id.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Informe o usuário dono da pesquisa".to_string(),
        ));
    }

    let created_at = Utc::now().to_rfc3339();
    let id = request
        .id
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| {
            format!(
                "search_{:x}",
                stable_hash64(&format!("{}:{}:{}", owner_id, name, created_at))
            )
        });

    let saved = state
        .searches
        .upsert(SavedSearch {
            id,
            name,
            params: request.params.unwrap_or(serde_json::Value::Null),
            owner_id,
            created_at,
        })
        .await
        .map_err(|err| (StatusCode::INTERNAL_SERVER_ERROR, err))?;

    Ok(Json(saved))
}

async fn get_search(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SavedSearch>, (StatusCode, String)> {
    match state.searches.get(&id).await {
        Some(search) => Ok(Json(search)),
        None => Err((
            StatusCode::NOT_FOUND,
            format!("Pesquisa não encontrada: {}", id),
        )),
    }
}

async fn delete_search(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let removed = state
        .searches
        .delete(&id)
        .await
        .map_err(|err| (StatusCode::INTERNAL_SERVER_ERROR, err))?;
    Ok(Json(serde_json::json!({ "removed": removed })))
}

async fn get_or_create_channel(state: &AppState, request_id: &str) -> broadcast::Sender<StageEvent> {
    let mut guard = state.channels.lock().await;
    if let Some(sender) = guard.get(request_id) {
        return sender.clone();
    }
    let (sender, _) = broadcast::channel(32);
    guard.insert(request_id.to_string(), sender.clone());
    sender
}

fn send_event(sender: &broadcast::Sender<StageEvent>, stage: &str, message: &str) {
    let _ = sender.send(StageEvent {
        stage: stage.to_string(),
        message: message.to_string(),
        timestamp_ms: now_ms(),
    });
}

fn schedule_cleanup(
    channels: Arc<Mutex<HashMap<String, broadcast::Sender<StageEvent>>>>,
    request_id: String,
) {
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(10)).await;
        let mut guard = channels.lock().await;
        guard.remove(&request_id);
    });
}

fn generate_request_id() -> String {
    let counter = REQUEST_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("req-{}-{}", now_ms(), counter)
}

fn now_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_millis())
        .unwrap_or(0)
}
