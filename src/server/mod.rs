//! Web-service variant: the same attendance sequence behind one REST
//! endpoint, with SQLite persistence.

pub mod routes;

use crate::config::Config;
use crate::db::initialize::init_db;
use crate::errors::{AppError, AppResult};
use crate::snapshot::SnapshotStore;
use crate::snapshot::face::{AcceptAllDetector, CommandDetector, FaceDetector};
use crate::store::codes::CodeStore;
use actix_web::{App, HttpServer, web};
use env_logger::Env;
use log::info;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

/// Shared per-process state. The connection and the code store sit behind
/// mutexes: attendance inserts and active-code reads are serialized across
/// workers.
pub struct AppState {
    pub conn: Mutex<Connection>,
    pub codes: Mutex<CodeStore>,
    pub detector: Arc<dyn FaceDetector>,
    pub snapshots: SnapshotStore,
    pub classroom_lat: f64,
    pub classroom_lon: f64,
    pub allowed_radius_m: f64,
    pub code_validity_minutes: i64,
}

pub fn build_state(cfg: &Config, detector: Arc<dyn FaceDetector>) -> AppResult<AppState> {
    let conn = Connection::open(&cfg.database)?;
    init_db(&conn)?;

    Ok(AppState {
        conn: Mutex::new(conn),
        codes: Mutex::new(CodeStore::new(cfg)),
        detector,
        snapshots: SnapshotStore::new(cfg.snapshot_dir()),
        classroom_lat: cfg.classroom_lat,
        classroom_lon: cfg.classroom_lon,
        allowed_radius_m: cfg.allowed_radius_m,
        code_validity_minutes: cfg.code_validity_minutes,
    })
}

/// Pick the detector implementation from the configuration.
pub fn detector_from_config(cfg: &Config) -> Arc<dyn FaceDetector> {
    match &cfg.face_detector_cmd {
        Some(cmd) => Arc::new(CommandDetector::new(cmd.clone())),
        None => Arc::new(AcceptAllDetector),
    }
}

#[actix_web::main]
pub async fn run_server(cfg: Config) -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let detector = detector_from_config(&cfg);
    let state = build_state(&cfg, detector)
        .map_err(|e: AppError| std::io::Error::other(e.to_string()))?;
    let data = web::Data::new(state);

    let bind = cfg.bind_addr.clone();
    info!("rollcall service listening on {}", bind);

    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(10 * 1024 * 1024)) // 10 MB
            .app_data(data.clone())
            .service(routes::configure_routes())
    })
    .bind(bind)?
    .run()
    .await
}
