//! Single binary web server: page from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! DATA_DIR (default `data`) holds one directory of saved blobs per browser session.
//! SESSION_KEY (at least 64 bytes) keeps session cookies valid across restarts.

use actix_files::Files;
use actix_session::{storage::CookieSessionStore, Session, SessionMiddleware};
use actix_web::{
    cookie::Key,
    delete, get, middleware, post, put,
    web::{self, Bytes, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use badminton_draw::{
    DrawMode, FileStore, Organizer, SessionError, SlotRef, TimerEvent, TimerSetting,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use uuid::Uuid;

type SessionOrganizer = Organizer<FileStore, StdRng>;

/// Per-browser entry: organizer + last activity time (for auto-cleanup).
struct SessionEntry {
    organizer: SessionOrganizer,
    last_activity: Instant,
}

impl SessionEntry {
    /// Load (or start) the session stored under `data_dir/<id>`.
    fn load(data_dir: &std::path::Path, id: Uuid) -> Self {
        let store = FileStore::new(data_dir.join(id.to_string()));
        if store.exists() {
            log::info!("Restoring session {} from {}", id, store.dir().display());
        }
        Self {
            organizer: Organizer::load(store, StdRng::from_entropy()),
            last_activity: Instant::now(),
        }
    }
}

/// In-memory sessions by id. Entries idle for INACTIVITY_TIMEOUT are dropped from memory;
/// their files stay on disk and are reloaded on the next request.
type AppState = Data<RwLock<HashMap<Uuid, SessionEntry>>>;

const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

/// Cookie session key holding the session id.
const SESSION_ID_KEY: &str = "session_id";

struct ServerConfig {
    host: String,
    port: u16,
    data_dir: PathBuf,
    session_key: Key,
}

impl ServerConfig {
    fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or_else(default_port);
        let data_dir = std::env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));
        let session_key = match std::env::var("SESSION_KEY")
            .ok()
            .and_then(|k| Key::try_from(k.as_bytes()).ok())
        {
            Some(key) => key,
            None => {
                log::warn!("SESSION_KEY unset or shorter than 64 bytes; sessions reset on restart");
                Key::generate()
            }
        };
        Self {
            host,
            port,
            data_dir,
            session_key,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
}

#[derive(Deserialize)]
struct PlayerPath {
    name: String,
}

#[derive(Deserialize)]
struct SettingsBody {
    court_count: Option<u32>,
    mode: Option<DrawMode>,
}

#[derive(Deserialize)]
struct SlotBody {
    slot: SlotRef,
}

#[derive(Deserialize)]
struct TimerSettingBody {
    setting: TimerSetting,
}

/// Session id from the cookie, creating one for new browsers.
fn session_id(session: &Session) -> Uuid {
    if let Ok(Some(id)) = session.get::<Uuid>(SESSION_ID_KEY) {
        return id;
    }
    let id = Uuid::new_v4();
    if let Err(e) = session.insert(SESSION_ID_KEY, id) {
        log::warn!("Failed to store session id: {}", e);
    }
    id
}

/// Run one command against this browser's organizer and answer with the fresh view.
fn with_organizer<F>(state: &AppState, data_dir: &Data<PathBuf>, session: &Session, f: F) -> HttpResponse
where
    F: FnOnce(&mut SessionOrganizer) -> Result<(), SessionError>,
{
    let id = session_id(session);
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = g
        .entry(id)
        .or_insert_with(|| SessionEntry::load(data_dir, id));
    entry.last_activity = Instant::now();
    match f(&mut entry.organizer) {
        Ok(()) => HttpResponse::Ok().json(entry.organizer.view()),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "badminton-draw",
    })
}

#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Current view (creates the session on first visit).
#[get("/api/session")]
async fn api_get_session(state: AppState, data_dir: Data<PathBuf>, session: Session) -> HttpResponse {
    with_organizer(&state, &data_dir, &session, |_| Ok(()))
}

/// Add a player (empty or duplicate names are ignored).
#[post("/api/players")]
async fn api_add_player(
    state: AppState,
    data_dir: Data<PathBuf>,
    session: Session,
    body: Json<AddPlayerBody>,
) -> HttpResponse {
    with_organizer(&state, &data_dir, &session, |o| {
        o.on_add_player(&body.name);
        Ok(())
    })
}

#[delete("/api/players/{name}")]
async fn api_remove_player(
    state: AppState,
    data_dir: Data<PathBuf>,
    session: Session,
    path: Path<PlayerPath>,
) -> HttpResponse {
    with_organizer(&state, &data_dir, &session, |o| {
        o.on_remove_player(&path.name);
        Ok(())
    })
}

/// Replace the roster from a CSV body (clears history).
#[post("/api/players/import")]
async fn api_import_players(
    state: AppState,
    data_dir: Data<PathBuf>,
    session: Session,
    body: Bytes,
) -> HttpResponse {
    with_organizer(&state, &data_dir, &session, |o| o.on_import_csv(&body).map(|_| ()))
}

#[get("/api/players/export")]
async fn api_export_players(state: AppState, data_dir: Data<PathBuf>, session: Session) -> HttpResponse {
    let id = session_id(&session);
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = g
        .entry(id)
        .or_insert_with(|| SessionEntry::load(&data_dir, id));
    entry.last_activity = Instant::now();
    match entry.organizer.export_csv() {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header(("Content-Disposition", "attachment; filename=\"players.csv\""))
            .body(csv),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Save the current roster as the base roster.
#[post("/api/base/save")]
async fn api_save_base(state: AppState, data_dir: Data<PathBuf>, session: Session) -> HttpResponse {
    with_organizer(&state, &data_dir, &session, |o| o.on_save_base().map(|_| ()))
}

/// Replace the roster with the saved base roster (clears history).
#[post("/api/base/apply")]
async fn api_apply_base(state: AppState, data_dir: Data<PathBuf>, session: Session) -> HttpResponse {
    with_organizer(&state, &data_dir, &session, |o| o.on_apply_base().map(|_| ()))
}

/// Court count and/or draw mode.
#[put("/api/settings")]
async fn api_settings(
    state: AppState,
    data_dir: Data<PathBuf>,
    session: Session,
    body: Json<SettingsBody>,
) -> HttpResponse {
    with_organizer(&state, &data_dir, &session, |o| {
        if let Some(n) = body.court_count {
            o.on_set_courts(n)?;
        }
        if let Some(mode) = body.mode {
            o.on_set_mode(mode);
        }
        Ok(())
    })
}

#[post("/api/draw")]
async fn api_draw(state: AppState, data_dir: Data<PathBuf>, session: Session) -> HttpResponse {
    with_organizer(&state, &data_dir, &session, |o| o.on_draw().map(|_| ()))
}

/// Slot click: select, cancel, or swap.
#[post("/api/slots/select")]
async fn api_select_slot(
    state: AppState,
    data_dir: Data<PathBuf>,
    session: Session,
    body: Json<SlotBody>,
) -> HttpResponse {
    with_organizer(&state, &data_dir, &session, |o| o.on_slot_clicked(body.slot).map(|_| ()))
}

#[put("/api/timer/setting")]
async fn api_timer_setting(
    state: AppState,
    data_dir: Data<PathBuf>,
    session: Session,
    body: Json<TimerSettingBody>,
) -> HttpResponse {
    with_organizer(&state, &data_dir, &session, |o| o.on_timer_setting(body.setting))
}

#[post("/api/timer/toggle")]
async fn api_timer_toggle(state: AppState, data_dir: Data<PathBuf>, session: Session) -> HttpResponse {
    with_organizer(&state, &data_dir, &session, |o| {
        o.on_timer_toggle();
        Ok(())
    })
}

#[post("/api/timer/reset")]
async fn api_timer_reset(state: AppState, data_dir: Data<PathBuf>, session: Session) -> HttpResponse {
    with_organizer(&state, &data_dir, &session, |o| {
        o.on_timer_reset();
        Ok(())
    })
}

#[post("/api/alarm/stop")]
async fn api_stop_alarm(state: AppState, data_dir: Data<PathBuf>, session: Session) -> HttpResponse {
    with_organizer(&state, &data_dir, &session, |o| {
        o.on_stop_alarm();
        Ok(())
    })
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);
    log::info!("Session data directory: {}", config.data_dir.display());

    let state = Data::new(RwLock::new(HashMap::<Uuid, SessionEntry>::new()));
    let data_dir = Data::new(config.data_dir.clone());

    // Round timers: one tick per second for every session in memory.
    let state_ticker = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        loop {
            interval.tick().await;
            let mut g = match state_ticker.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            for (id, entry) in g.iter_mut() {
                if entry.organizer.on_timer_tick() == TimerEvent::Finished {
                    log::info!("Round over for session {}", id);
                }
            }
        }
    });

    // Every 30 minutes, drop sessions idle for 12+ hours from memory.
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
            g.retain(|_, entry| {
                entry.organizer.timer().is_running()
                    || entry.last_activity.elapsed() < INACTIVITY_TIMEOUT
            });
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Unloaded {} inactive session(s) (no activity for 12h)", removed);
            }
        }
    });

    let session_key = config.session_key.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), session_key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .app_data(state.clone())
            .app_data(data_dir.clone())
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_get_session)
            .service(api_import_players)
            .service(api_export_players)
            .service(api_add_player)
            .service(api_remove_player)
            .service(api_save_base)
            .service(api_apply_base)
            .service(api_settings)
            .service(api_draw)
            .service(api_select_slot)
            .service(api_timer_setting)
            .service(api_timer_toggle)
            .service(api_timer_reset)
            .service(api_stop_alarm)
            .service(Files::new("/static", "static"))
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
