//! Single binary web server: JSON API over the ladder library.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! ADMIN_PASSWORD gates every write endpoint (unset = open, for local use).
//! POINTS_PER_WIN, MATCH_POLICY, ENTRY_BAND: see `LadderConfig::from_env`.

use actix_session::{storage::CookieSessionStore, Session, SessionMiddleware};
use actix_web::{
    cookie::Key,
    delete, get, post, put,
    web::{Data, Json, Path, Query, ServiceConfig},
    App, HttpResponse, HttpServer, Responder,
};
use serde::{Deserialize, Serialize};
use tennis_ladder_web::{
    delete_all_matches, delete_all_players, delete_player, filter_ranked, move_player,
    player_stats, project, quick_move, record_match, register_player, reorganize_all,
    update_profile, AdminCredential, Band, BandSetting, BandSettingUpdate, Direction,
    LadderConfig, LadderError, MemoryStore, NewMatch, NewPlayer, Player, PlayerId, PlayerStats,
    ProfileUpdate, RecordStore, TennisMatch, ADMIN_SESSION_KEY,
};
use tokio::sync::Mutex;

/// Store and configuration behind one lock: band-mutating requests run one at a time.
struct Ladder {
    store: MemoryStore,
    config: LadderConfig,
}

type AppState = Data<Mutex<Ladder>>;
type Credential = Data<AdminCredential>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct LoginBody {
    password: String,
}

#[derive(Deserialize)]
struct MoveBody {
    band: Band,
    position: u32,
}

#[derive(Deserialize)]
struct QuickMoveBody {
    direction: Direction,
}

#[derive(Deserialize)]
struct RankingQuery {
    q: Option<String>,
}

/// Path segment: player id (e.g. /api/players/{id})
#[derive(Deserialize)]
struct PlayerPath {
    id: PlayerId,
}

/// Path segment: band number (e.g. /api/bands/{band})
#[derive(Deserialize)]
struct BandPath {
    band: u8,
}

/// One band with its settings and players in position order.
#[derive(Serialize)]
struct BandView {
    #[serde(flatten)]
    setting: BandSetting,
    players: Vec<Player>,
}

#[derive(Serialize)]
struct StatsResponse {
    player: Player,
    stats: PlayerStats,
    matches: Vec<TennisMatch>,
}

fn error_response(e: &LadderError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        LadderError::NotFound(_) => HttpResponse::NotFound().json(body),
        LadderError::InvalidTarget(_)
        | LadderError::InvalidMatch(_)
        | LadderError::InvalidPlayer(_) => HttpResponse::BadRequest().json(body),
        LadderError::InvariantViolation { .. } => {
            log::error!("{e}; run reorganize to repair the band");
            HttpResponse::Conflict().json(body)
        }
        LadderError::Store(_) => {
            log::error!("{e}");
            HttpResponse::InternalServerError().json(body)
        }
    }
}

fn respond<T: Serialize>(result: Result<T, LadderError>) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::Ok().json(value),
        Err(e) => error_response(&e),
    }
}

/// Admin gate for write endpoints: Err carries the 401 to return.
fn require_admin(session: &Session, credential: &AdminCredential) -> Result<(), HttpResponse> {
    if credential.is_open() {
        return Ok(());
    }
    match session.get::<bool>(ADMIN_SESSION_KEY) {
        Ok(Some(true)) => Ok(()),
        _ => Err(HttpResponse::Unauthorized()
            .json(serde_json::json!({ "error": "Admin login required" }))),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tennis-ladder-web",
    })
}

#[post("/api/login")]
async fn api_login(session: Session, credential: Credential, body: Json<LoginBody>) -> HttpResponse {
    if !credential.verify(&body.password) {
        log::warn!("Rejected admin login");
        return HttpResponse::Unauthorized().json(serde_json::json!({ "error": "Wrong password" }));
    }
    match session.insert(ADMIN_SESSION_KEY, true) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "admin": true })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() })),
    }
}

#[post("/api/logout")]
async fn api_logout(session: Session) -> HttpResponse {
    session.purge();
    HttpResponse::Ok().json(serde_json::json!({ "admin": false }))
}

/// All players in ladder order (band, then position).
#[get("/api/players")]
async fn api_list_players(state: AppState) -> HttpResponse {
    let ladder = state.lock().await;
    respond(ladder.store.list_players())
}

/// Leaderboard by points, optionally filtered with ?q= (name or nationality).
#[get("/api/rankings")]
async fn api_rankings(state: AppState, query: Query<RankingQuery>) -> HttpResponse {
    let ladder = state.lock().await;
    respond(ladder.store.list_players().map(|players| {
        let ranked = project(&players);
        match query.q.as_deref() {
            Some(q) => filter_ranked(&ranked, q),
            None => ranked,
        }
    }))
}

/// The four bands with their settings and players.
#[get("/api/bands")]
async fn api_bands(state: AppState) -> HttpResponse {
    let ladder = state.lock().await;
    let views: Result<Vec<BandView>, LadderError> = ladder
        .config
        .bands
        .iter()
        .map(|setting| {
            Ok(BandView {
                setting: setting.clone(),
                players: ladder.store.list_players_by_band(setting.band)?,
            })
        })
        .collect();
    respond(views)
}

/// Update a band's name, color or soft max.
#[put("/api/bands/{band}")]
async fn api_update_band(
    state: AppState,
    session: Session,
    credential: Credential,
    path: Path<BandPath>,
    body: Json<BandSettingUpdate>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&session, &credential) {
        return resp;
    }
    let band = match Band::new(path.band) {
        Ok(band) => band,
        Err(e) => return error_response(&e),
    };
    let mut ladder = state.lock().await;
    respond(ladder.config.bands.update(band, body.into_inner()).cloned())
}

/// Renumber every band to 1..N (repair after an inconsistent write).
#[post("/api/bands/reorganize")]
async fn api_reorganize(state: AppState, session: Session, credential: Credential) -> HttpResponse {
    if let Err(resp) = require_admin(&session, &credential) {
        return resp;
    }
    let mut ladder = state.lock().await;
    respond(reorganize_all(&mut ladder.store).map(|changed| serde_json::json!({ "changed": changed })))
}

/// Register a player at the end of their band.
#[post("/api/players")]
async fn api_register_player(
    state: AppState,
    session: Session,
    credential: Credential,
    body: Json<NewPlayer>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&session, &credential) {
        return resp;
    }
    let mut ladder = state.lock().await;
    let Ladder { store, config } = &mut *ladder;
    respond(register_player(store, config, body.into_inner()))
}

/// Edit a player's profile and points.
#[put("/api/players/{id}")]
async fn api_update_player(
    state: AppState,
    session: Session,
    credential: Credential,
    path: Path<PlayerPath>,
    body: Json<ProfileUpdate>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&session, &credential) {
        return resp;
    }
    let mut ladder = state.lock().await;
    respond(update_profile(&mut ladder.store, path.id, body.into_inner()))
}

/// Delete a player; their band closes the gap.
#[delete("/api/players/{id}")]
async fn api_delete_player(
    state: AppState,
    session: Session,
    credential: Credential,
    path: Path<PlayerPath>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&session, &credential) {
        return resp;
    }
    let mut ladder = state.lock().await;
    respond(delete_player(&mut ladder.store, path.id))
}

#[delete("/api/players")]
async fn api_delete_all_players(state: AppState, session: Session, credential: Credential) -> HttpResponse {
    if let Err(resp) = require_admin(&session, &credential) {
        return resp;
    }
    let mut ladder = state.lock().await;
    respond(delete_all_players(&mut ladder.store).map(|removed| serde_json::json!({ "removed": removed })))
}

/// Move a player to a band and position.
#[post("/api/players/{id}/move")]
async fn api_move_player(
    state: AppState,
    session: Session,
    credential: Credential,
    path: Path<PlayerPath>,
    body: Json<MoveBody>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&session, &credential) {
        return resp;
    }
    let mut ladder = state.lock().await;
    let store = &mut ladder.store;
    let result = move_player(store, path.id, body.band, body.position)
        .and_then(|()| store.list_players_by_band(body.band));
    respond(result)
}

/// One step up or down, crossing bands at the edges.
#[post("/api/players/{id}/quick-move")]
async fn api_quick_move(
    state: AppState,
    session: Session,
    credential: Credential,
    path: Path<PlayerPath>,
    body: Json<QuickMoveBody>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&session, &credential) {
        return resp;
    }
    let mut ladder = state.lock().await;
    let store = &mut ladder.store;
    let result = quick_move(store, path.id, body.direction).and_then(|()| {
        store
            .get_player(path.id)?
            .ok_or(LadderError::NotFound(path.id))
    });
    respond(result)
}

/// Match history and statistics for one player.
#[get("/api/players/{id}/stats")]
async fn api_player_stats(state: AppState, path: Path<PlayerPath>) -> HttpResponse {
    let ladder = state.lock().await;
    let result = ladder
        .store
        .get_player(path.id)
        .and_then(|p| p.ok_or(LadderError::NotFound(path.id)))
        .and_then(|player| {
            let matches: Vec<_> = ladder
                .store
                .list_matches()?
                .into_iter()
                .filter(|m| m.involves(player.id))
                .collect();
            Ok(StatsResponse {
                stats: player_stats(player.id, &matches),
                player,
                matches,
            })
        });
    respond(result)
}

/// All matches, most recent first.
#[get("/api/matches")]
async fn api_list_matches(state: AppState) -> HttpResponse {
    let ladder = state.lock().await;
    respond(ladder.store.list_matches())
}

/// Record a match: winner gets points, positions change per MATCH_POLICY.
#[post("/api/matches")]
async fn api_record_match(
    state: AppState,
    session: Session,
    credential: Credential,
    body: Json<NewMatch>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&session, &credential) {
        return resp;
    }
    let mut ladder = state.lock().await;
    let Ladder { store, config } = &mut *ladder;
    respond(record_match(store, config, body.into_inner()))
}

#[delete("/api/matches")]
async fn api_delete_all_matches(state: AppState, session: Session, credential: Credential) -> HttpResponse {
    if let Err(resp) = require_admin(&session, &credential) {
        return resp;
    }
    let mut ladder = state.lock().await;
    respond(delete_all_matches(&mut ladder.store).map(|removed| serde_json::json!({ "removed": removed })))
}

fn session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_secure(false)
        .build()
}

fn routes(cfg: &mut ServiceConfig) {
    cfg.service(api_health)
        .service(api_login)
        .service(api_logout)
        .service(api_list_players)
        .service(api_delete_all_players)
        .service(api_register_player)
        .service(api_update_player)
        .service(api_delete_player)
        .service(api_move_player)
        .service(api_quick_move)
        .service(api_player_stats)
        .service(api_rankings)
        .service(api_bands)
        .service(api_reorganize)
        .service(api_update_band)
        .service(api_list_matches)
        .service(api_record_match)
        .service(api_delete_all_matches);
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);

    let config = LadderConfig::from_env();
    log::info!(
        "Match policy {:?}, {} points per win, new players join band {}",
        config.match_policy,
        config.points_per_win,
        config.entry_band
    );
    let credential = AdminCredential::from_env();
    if credential.is_open() {
        log::warn!("ADMIN_PASSWORD not set: write endpoints are open");
    }

    let state = Data::new(Mutex::new(Ladder {
        store: MemoryStore::new(),
        config,
    }));
    let credential = Data::new(credential);
    let session_key = Key::generate();

    log::info!("Starting server at http://{}:{}", bind.0, bind.1);
    HttpServer::new(move || {
        App::new()
            .wrap(session_middleware(session_key.clone()))
            .app_data(state.clone())
            .app_data(credential.clone())
            .configure(routes)
    })
    .bind(bind)?
    .run()
    .await
}
