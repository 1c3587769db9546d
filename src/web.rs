use std::collections::BTreeMap;

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::{middleware, web, App, HttpRequest, HttpResponse, HttpServer, ResponseError, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::error::{ensure_enough_participants, validate, ScheduleError};
use crate::schedule::summary::{MatchRecord, RosterLine};
use crate::schedule::types::{Configuration, Participant, Round, SlotConstraint, SlotInfo};
use crate::schedule::{games_per_participant, generate, match_log, roster_overview, slot_grid};

impl ResponseError for ScheduleError {
    fn status_code(&self) -> StatusCode {
        match self {
            ScheduleError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        warn!("Rejected request: {}", self);
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "success": false,
            "error": self.to_string()
        }))
    }
}

/// Malformed bodies get the same `{ success, error }` shape as validation failures
fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    warn!("Rejected request body: {}", err);
    let response = HttpResponse::BadRequest().json(serde_json::json!({
        "success": false,
        "error": err.to_string()
    }));
    InternalError::from_response(err, response).into()
}

#[derive(Deserialize)]
pub struct ScheduleRequest {
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub config: Configuration,
    #[serde(default)]
    pub constraints: Vec<SlotConstraint>,
}

#[derive(Serialize)]
pub struct ScheduleResponse {
    success: bool,
    rounds: Vec<Round>,
    games: BTreeMap<String, u32>,
    log: Vec<MatchRecord>,
    roster: Vec<RosterLine>,
}

#[derive(Deserialize)]
pub struct SlotsRequest {
    #[serde(default)]
    pub config: Configuration,
    #[serde(default)]
    pub constraints: Vec<SlotConstraint>,
}

#[derive(Serialize)]
pub struct SlotsResponse {
    success: bool,
    slots: Vec<SlotInfo>,
}

// Each request gets its own run; nothing is kept between calls
async fn create_schedule(req: web::Json<ScheduleRequest>) -> Result<HttpResponse, ScheduleError> {
    let req = req.into_inner();
    ensure_enough_participants(&req.participants)?;
    validate(&req.participants, &req.config, &req.constraints)?;

    let rounds = generate(&req.participants, &req.config, &req.constraints);
    info!("Schedule generated: {} rounds", rounds.len());

    Ok(HttpResponse::Ok().json(ScheduleResponse {
        success: true,
        games: games_per_participant(&rounds),
        log: match_log(&rounds),
        roster: roster_overview(&req.participants, &rounds, &req.config),
        rounds,
    }))
}

async fn list_slots(req: web::Json<SlotsRequest>) -> Result<HttpResponse, ScheduleError> {
    validate(&[], &req.config, &req.constraints)?;
    Ok(HttpResponse::Ok().json(SlotsResponse {
        success: true,
        slots: slot_grid(&req.config, &req.constraints),
    }))
}

async fn health() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({"status": "ok"})))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .route("/api/schedule", web::post().to(create_schedule))
        .route("/api/slots", web::post().to(list_slots))
        .route("/api/health", web::get().to(health));
}

pub async fn start_server(server: ServerConfig) -> std::io::Result<()> {
    info!("Listening on {}:{}", server.bind_address, server.port);

    HttpServer::new(|| {
        App::new()
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind((server.bind_address.as_str(), server.port))?
    .run()
    .await
}
