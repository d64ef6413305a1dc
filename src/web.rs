use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Mutex;

use actix_files::Files;
use actix_web::{web, App, HttpResponse, HttpServer, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::form::{export_queue_csv, validate_booking, BookingRequest};
use crate::queue::{
    bracket_by_label, default_brackets, find_open_slot, mark_status, open_slot_count,
    slot_sort_key, AppointmentRecord, Bracket, QueueStore, Status, StatusError,
    SLOTS_PER_BRACKET,
};

/// Shared state for the one service process that owns the queue file. Every
/// handler that touches the store holds the mutex across its whole
/// load-mutate-save, so there is a single mutation path.
pub struct AppState {
    pub store: Mutex<QueueStore>,
    pub brackets: Vec<Bracket>,
}

impl AppState {
    pub fn new<P: Into<PathBuf>>(queue_path: P) -> Self {
        AppState {
            store: Mutex::new(QueueStore::new(queue_path)),
            brackets: default_brackets(),
        }
    }
}

#[derive(Deserialize)]
pub struct QueueQuery {
    search: Option<String>,
}

#[derive(Deserialize)]
pub struct MarkRequest {
    index: usize,
    status: Status,
}

/// One row of the staff queue. `index` addresses the record in the persisted
/// collection so a mark request hits the right entry regardless of the
/// sorted display order.
#[derive(Serialize)]
pub struct QueueEntry {
    index: usize,
    name: String,
    age: String,
    gender: String,
    slot: String,
    status: Status,
}

#[derive(Serialize)]
pub struct BracketAvailability {
    label: String,
    open: usize,
    total: usize,
}

// Booking endpoint: validate, then a single locked load-scan-append-save.
async fn book_slot(
    req: web::Json<BookingRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if let Err(error) = validate_booking(&req, &state.brackets) {
        return Ok(HttpResponse::BadRequest()
            .json(serde_json::json!({"success": false, "error": error})));
    }

    let bracket = match bracket_by_label(&state.brackets, req.bracket.trim()) {
        Some(bracket) => bracket,
        None => {
            return Ok(HttpResponse::BadRequest().json(
                serde_json::json!({"success": false, "error": "Unknown time bracket"}),
            ))
        }
    };

    let store = state.store.lock().unwrap();
    let mut records = load_records(&store)?;

    let booked_slots: HashSet<String> = records.iter().map(|r| r.slot.clone()).collect();

    match find_open_slot(bracket, &booked_slots) {
        Some(slot) => {
            let name = req.name.trim().to_string();
            records.push(AppointmentRecord {
                name: name.clone(),
                age: req.age.trim().to_string(),
                gender: req.gender.trim().to_string(),
                slot: slot.clone(),
                status: Status::Pending,
            });
            save_records(&store, &records)?;

            info!(%name, %slot, bracket = %bracket.label, "booked appointment");
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "slot": slot,
                "message": format!("{}, your appointment is at {}", name, slot)
            })))
        }
        None => {
            warn!(bracket = %bracket.label, "booking rejected, bracket full");
            Ok(HttpResponse::Conflict().json(serde_json::json!({
                "success": false,
                "error": "No available slots in this bracket. Try another one."
            })))
        }
    }
}

// Queue listing for the staff view: sorted chronologically by slot, filtered
// by case-insensitive substring match on name.
async fn get_queue(
    query: web::Query<QueueQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let records = {
        let store = state.store.lock().unwrap();
        load_records(&store)?
    };

    let needle = query
        .search
        .as_deref()
        .unwrap_or("")
        .trim()
        .to_lowercase();

    let mut entries: Vec<QueueEntry> = records
        .into_iter()
        .enumerate()
        .filter(|(_, r)| needle.is_empty() || r.name.to_lowercase().contains(&needle))
        .map(|(index, r)| QueueEntry {
            index,
            name: r.name,
            age: r.age,
            gender: r.gender,
            slot: r.slot,
            status: r.status,
        })
        .collect();
    entries.sort_by_key(|e| slot_sort_key(&e.slot));

    Ok(HttpResponse::Ok().json(entries))
}

// Status marking: the tracker enforces transition legality, the handler only
// maps its verdict onto HTTP.
async fn mark_appointment(
    req: web::Json<MarkRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let store = state.store.lock().unwrap();
    let mut records = load_records(&store)?;

    match mark_status(&mut records, req.index, req.status) {
        Ok(changed) => {
            if changed {
                save_records(&store, &records)?;
                info!(index = req.index, status = %req.status, "marked appointment");
            }
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "status": req.status
            })))
        }
        Err(error @ StatusError::IndexOutOfRange { .. }) => Ok(HttpResponse::NotFound()
            .json(serde_json::json!({"success": false, "error": error.to_string()}))),
        Err(error @ StatusError::IllegalTransition { .. }) => {
            warn!(index = req.index, %error, "rejected status change");
            Ok(HttpResponse::Conflict()
                .json(serde_json::json!({"success": false, "error": error.to_string()})))
        }
    }
}

// Per-bracket availability for the patient form's bracket picker.
async fn get_brackets(state: web::Data<AppState>) -> Result<HttpResponse> {
    let records = {
        let store = state.store.lock().unwrap();
        load_records(&store)?
    };

    let booked_slots: HashSet<String> = records.iter().map(|r| r.slot.clone()).collect();

    let availability: Vec<BracketAvailability> = state
        .brackets
        .iter()
        .map(|bracket| BracketAvailability {
            label: bracket.label.clone(),
            open: open_slot_count(bracket, &booked_slots),
            total: SLOTS_PER_BRACKET,
        })
        .collect();

    Ok(HttpResponse::Ok().json(availability))
}

// CSV download of the full queue for staff.
async fn export_csv(state: web::Data<AppState>) -> Result<HttpResponse> {
    let records = {
        let store = state.store.lock().unwrap();
        store.load_sorted().map_err(|e| {
            actix_web::error::ErrorInternalServerError(format!("Failed to load queue: {}", e))
        })?
    };

    let csv = export_queue_csv(&records).map_err(|e| {
        actix_web::error::ErrorInternalServerError(format!("Failed to export queue: {}", e))
    })?;

    Ok(HttpResponse::Ok()
        .content_type("text/csv")
        .insert_header(("Content-Disposition", "attachment; filename=\"queue.csv\""))
        .body(csv))
}

// HTML page handlers
async fn patient_page() -> Result<HttpResponse> {
    let html = include_str!("../templates/patient.html");
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

async fn staff_page() -> Result<HttpResponse> {
    let html = include_str!("../templates/staff.html");
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

fn load_records(store: &QueueStore) -> Result<Vec<AppointmentRecord>> {
    store
        .load()
        .map_err(|e| actix_web::error::ErrorInternalServerError(format!("Failed to load queue: {}", e)))
}

fn save_records(store: &QueueStore, records: &[AppointmentRecord]) -> Result<()> {
    store
        .save(records)
        .map_err(|e| actix_web::error::ErrorInternalServerError(format!("Failed to save queue: {}", e)))
}

/// Page and API routes, shared between the server and the API tests.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(patient_page))
        .route("/staff", web::get().to(staff_page))
        .route("/api/book", web::post().to(book_slot))
        .route("/api/queue", web::get().to(get_queue))
        .route("/api/mark", web::post().to(mark_appointment))
        .route("/api/brackets", web::get().to(get_brackets))
        .route("/api/export.csv", web::get().to(export_csv));
}

pub async fn start_server(port: u16, queue_path: PathBuf) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState::new(queue_path));

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .service(Files::new("/static", "static"))
            .configure(routes)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
