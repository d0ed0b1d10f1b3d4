//! Bracket web server: REST API over in-memory tournaments.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! AI text generation: GEMINI_API_KEY, GEMINI_MODEL, GEMINI_BASE_URL.
//! Idle tournaments are dropped after TOURNAMENT_INACTIVITY_HOURS (default 12).

use actix_web::{
    delete, get, post, put,
    web::{Bytes, Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use bowling_bracket::commentary::{self, GeminiClient, TextGenerator};
use bowling_bracket::{
    AdvancePolicy, BracketEngine, MatchId, ParticipantId, Refusal, TournamentId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// Per-tournament entry: the engine + last activity time (for auto-cleanup).
struct TournamentEntry {
    engine: BracketEngine,
    last_activity: Instant,
}

/// In-memory state: tournaments by id. The lock serializes every engine mutation.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

type Generator = Data<dyn TextGenerator>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct AddParticipantBody {
    name: String,
    #[serde(default)]
    affiliation: Option<String>,
}

#[derive(Deserialize)]
struct DeclareWinnerBody {
    match_id: MatchId,
    participant_id: ParticipantId,
}

#[derive(Deserialize)]
struct HypeBody {
    match_id: MatchId,
}

#[derive(Deserialize)]
struct NicknameBody {
    name: String,
    #[serde(default)]
    affiliation: Option<String>,
}

#[derive(Serialize)]
struct NicknameResponse {
    nickname: String,
    display_name: String,
}

#[derive(Deserialize)]
struct AdvanceQuery {
    #[serde(default)]
    strict: bool,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and participant id
#[derive(Deserialize)]
struct TournamentParticipantPath {
    id: TournamentId,
    participant_id: ParticipantId,
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

fn bad_request(e: impl std::fmt::Display) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

/// Run `op` against one tournament's engine under the write lock; respond with the snapshot.
fn with_engine<T>(
    state: &AppState,
    id: TournamentId,
    op: impl FnOnce(&mut BracketEngine) -> Result<T, Refusal>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    match op(&mut entry.engine) {
        Ok(_) => HttpResponse::Ok().json(entry.engine.tournament()),
        Err(e) => bad_request(e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "bowling-bracket",
    })
}

/// Create a new tournament (returns it with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState) -> HttpResponse {
    let engine = BracketEngine::new();
    let id = engine.tournament().id;
    let snapshot = engine.snapshot();
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.insert(
        id,
        TournamentEntry {
            engine,
            last_activity: Instant::now(),
        },
    );
    log::info!("Created tournament {}", id);
    HttpResponse::Ok().json(snapshot)
}

/// Get a tournament by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_engine(&state, path.id, |_| Ok(()))
}

/// Register a participant. After start they are placed in round 1 immediately.
#[post("/api/tournaments/{id}/participants")]
async fn api_add_participant(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<AddParticipantBody>,
) -> HttpResponse {
    with_engine(&state, path.id, |engine| {
        engine.register_participant(&body.name, body.affiliation.as_deref())
    })
}

/// Register every row of a `name,affiliation` CSV body.
#[post("/api/tournaments/{id}/participants/import")]
async fn api_import_participants(
    state: AppState,
    path: Path<TournamentPath>,
    body: Bytes,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    match entry.engine.import_roster(&body[..]) {
        Ok(_) => HttpResponse::Ok().json(entry.engine.tournament()),
        Err(e) => bad_request(e),
    }
}

/// Remove a participant by id (only before start).
#[delete("/api/tournaments/{id}/participants/{participant_id}")]
async fn api_remove_participant(
    state: AppState,
    path: Path<TournamentParticipantPath>,
) -> HttpResponse {
    let participant_id = path.participant_id;
    with_engine(&state, path.id, |engine| {
        engine.remove_participant(participant_id)
    })
}

/// Draw round 1.
#[post("/api/tournaments/{id}/start")]
async fn api_start_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_engine(&state, path.id, |engine| engine.start_tournament())
}

/// Declare the winner of one match.
#[put("/api/tournaments/{id}/matches/winner")]
async fn api_declare_winner(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<DeclareWinnerBody>,
) -> HttpResponse {
    with_engine(&state, path.id, |engine| {
        engine.declare_winner(body.match_id, body.participant_id)
    })
}

/// Create the next round. `?strict=true` refuses while any match is undecided.
#[post("/api/tournaments/{id}/rounds/advance")]
async fn api_advance_round(
    state: AppState,
    path: Path<TournamentPath>,
    query: Query<AdvanceQuery>,
) -> HttpResponse {
    let policy = if query.strict {
        AdvancePolicy::Strict
    } else {
        AdvancePolicy::Forfeit
    };
    with_engine(&state, path.id, |engine| engine.advance_round_with(policy))
}

/// Restart: back to registration with the same roster.
#[post("/api/tournaments/{id}/restart")]
async fn api_restart_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_engine(&state, path.id, |engine| engine.restart())
}

/// Suggest a nickname and the composed display name. Does not register anyone.
#[post("/api/nickname")]
async fn api_nickname(generator: Generator, body: Json<NicknameBody>) -> HttpResponse {
    let affiliation = body.affiliation.as_deref();
    match commentary::generate_nickname(generator.get_ref(), &body.name, affiliation).await {
        Some(nickname) => HttpResponse::Ok().json(NicknameResponse {
            display_name: commentary::compose_nickname(&body.name, &nickname),
            nickname,
        }),
        None => bad_request(Refusal::EmptyName),
    }
}

/// Announcer hype for a live match. Byes get 400 and never reach the generator.
#[post("/api/tournaments/{id}/matches/hype")]
async fn api_match_hype(
    state: AppState,
    generator: Generator,
    path: Path<TournamentPath>,
    body: Json<HypeBody>,
) -> HttpResponse {
    // Build the prompt under the lock; the generator call must not hold it.
    let prompt = {
        let mut g = match state.write() {
            Ok(guard) => guard,
            Err(_) => return HttpResponse::InternalServerError().body("lock error"),
        };
        let entry = match g.get_mut(&path.id) {
            Some(e) => e,
            None => return not_found(),
        };
        entry.last_activity = Instant::now();
        let tournament = entry.engine.tournament();
        if tournament.find_match(body.match_id).is_none() {
            return bad_request(Refusal::MatchNotFound(body.match_id));
        }
        match commentary::match_hype_prompt(tournament, body.match_id) {
            Some(p) => p,
            None => return bad_request("No hype for a bye"),
        }
    };
    let hype = commentary::hype_from_prompt(generator.get_ref(), body.match_id, &prompt).await;
    HttpResponse::Ok().json(hype)
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_inactivity_hours() -> u64 {
    12
}

fn env_or(key: &str, default: impl FnOnce() -> String) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(default)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = env_or("HOST", default_host);
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let inactivity_hours: u64 = std::env::var("TOURNAMENT_INACTIVITY_HOURS")
        .ok()
        .and_then(|h| h.parse().ok())
        .unwrap_or_else(default_inactivity_hours);
    let inactivity_timeout = Duration::from_secs(inactivity_hours * 3600);

    let api_key = env_or("GEMINI_API_KEY", String::new);
    if api_key.is_empty() {
        log::warn!("GEMINI_API_KEY not set; nickname and hype calls will return placeholders");
    }
    let gemini = GeminiClient::new(api_key)
        .with_model(env_or("GEMINI_MODEL", || {
            commentary::DEFAULT_MODEL.to_string()
        }))
        .with_base_url(env_or("GEMINI_BASE_URL", || {
            commentary::DEFAULT_BASE_URL.to_string()
        }));
    let generator: Generator = Data::from(Arc::new(gemini) as Arc<dyn TextGenerator>);

    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<TournamentId, TournamentEntry>::new()));

    // Background task: every 30 minutes, remove idle tournaments
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < inactivity_timeout);
            let removed = before - g.len();
            if removed > 0 {
                log::info!(
                    "Cleaned up {} inactive tournament(s) (no activity for {}h)",
                    removed,
                    inactivity_hours
                );
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(generator.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_add_participant)
            .service(api_import_participants)
            .service(api_remove_participant)
            .service(api_start_tournament)
            .service(api_declare_winner)
            .service(api_advance_round)
            .service(api_restart_tournament)
            .service(api_nickname)
            .service(api_match_hype)
    })
    .bind(bind)?
    .run()
    .await
}
