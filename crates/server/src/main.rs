// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod live;
mod scheduler;
mod session;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use clap::Parser;
use louaj::QueueStore;
use louaj_api::{
    AdjustSeatsRequest, ApiError, AuditEventView, BookSeatsRequest, BookingListResponse,
    BookingResponse, DestinationListResponse, DestinationView, EnqueueVehicleRequest,
    EntryResponse, FareResponse, OperationalResponse, OvernightEntryResponse,
    OvernightQueueResponse, ParkByDriverRequest, ParkOvernightRequest, PromoteOvernightResponse,
    QueueResponse, QueueStatsResponse, RegisterDestinationRequest, RegisterVehicleRequest,
    ReorderQueueRequest, SetDepartureRequest, SetFareRequest, SetOperationalRequest,
    StationConfig, StationStatsResponse, UpdateStatusRequest, VehicleResponse,
    adjust_entry_seats, book_seats, destination_audit_events, enqueue_vehicle, list_bookings,
    list_destinations, list_overnight, list_queue, mark_ready_for_transfer, park_overnight,
    park_overnight_by_driver, promote_overnight, queue_stats, recent_audit_events,
    register_destination, register_vehicle, remove_entry, remove_overnight, reorder_queue,
    set_estimated_departure, set_fare, set_operational, station_stats, update_entry_status,
    verify_ticket,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

use crate::live::{LiveEvent, LiveEventBroadcaster, live_events_handler};
use crate::session::StaffSession;

/// Default number of audit events returned by `GET /audit`.
const DEFAULT_AUDIT_LIMIT: usize = 50;

/// Louaj station server - HTTP API for the vehicle queues
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a JSON station config. If not provided, starts an empty station.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Disable automatic overnight promotion at opening time
    #[arg(long)]
    no_scheduler: bool,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The queue store.
    store: Arc<QueueStore>,
    /// Live event fan-out.
    broadcaster: Arc<LiveEventBroadcaster>,
    /// The loaded station configuration.
    config: Arc<StationConfig>,
}

/// Query parameters for `GET /audit`.
#[derive(Debug, Deserialize)]
struct AuditQuery {
    /// Maximum number of events to return.
    limit: Option<usize>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::DomainRuleViolation { rule, .. } if is_conflict(rule) => StatusCode::CONFLICT,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Rules broken by a resource that already exists.
fn is_conflict(rule: &str) -> bool {
    matches!(
        rule,
        "one_slot_per_vehicle"
            | "unique_destination"
            | "unique_vehicle_registration"
            | "single_verification"
    )
}

fn queue_changed(app_state: &AppState, destination: &str) {
    app_state.broadcaster.broadcast(&LiveEvent::QueueChanged {
        destination: destination.to_string(),
    });
}

fn overnight_changed(app_state: &AppState, destination: &str) {
    app_state.broadcaster.broadcast(&LiveEvent::OvernightChanged {
        destination: destination.to_string(),
    });
}

// ============================================================================
// Station setup
// ============================================================================

/// Handler for GET `/station`.
///
/// Reports the startup configuration with the current open or closed state.
async fn handle_station_info(AxumState(app_state): AxumState<AppState>) -> Json<StationConfig> {
    Json(StationConfig {
        operational: app_state.store.is_operational(),
        ..StationConfig::clone(&app_state.config)
    })
}

/// Handler for PUT `/station/operational`.
async fn handle_set_operational(
    AxumState(app_state): AxumState<AppState>,
    StaffSession(actor, cause): StaffSession,
    Json(request): Json<SetOperationalRequest>,
) -> Result<Json<OperationalResponse>, HttpError> {
    let response: OperationalResponse =
        set_operational(&app_state.store, &request, &actor, cause)?;
    app_state
        .broadcaster
        .broadcast(&LiveEvent::StationStatusChanged {
            operational: response.operational,
        });
    Ok(Json(response))
}

/// Handler for GET `/destinations`.
async fn handle_list_destinations(
    AxumState(app_state): AxumState<AppState>,
    _session: StaffSession,
) -> Json<DestinationListResponse> {
    Json(list_destinations(&app_state.store))
}

/// Handler for POST `/destinations`.
async fn handle_register_destination(
    AxumState(app_state): AxumState<AppState>,
    StaffSession(actor, cause): StaffSession,
    Json(request): Json<RegisterDestinationRequest>,
) -> Result<Json<DestinationView>, HttpError> {
    let view: DestinationView = register_destination(&app_state.store, &request, &actor, cause)?;
    app_state
        .broadcaster
        .broadcast(&LiveEvent::DestinationRegistered {
            destination: view.name.clone(),
        });
    Ok(Json(view))
}

/// Handler for PUT `/destinations/{destination}/fare`.
async fn handle_set_fare(
    AxumState(app_state): AxumState<AppState>,
    Path(destination): Path<String>,
    StaffSession(actor, cause): StaffSession,
    Json(request): Json<SetFareRequest>,
) -> Result<Json<FareResponse>, HttpError> {
    Ok(Json(set_fare(
        &app_state.store,
        &destination,
        &request,
        &actor,
        cause,
    )?))
}

/// Handler for POST `/vehicles`.
async fn handle_register_vehicle(
    AxumState(app_state): AxumState<AppState>,
    StaffSession(actor, cause): StaffSession,
    Json(request): Json<RegisterVehicleRequest>,
) -> Result<Json<VehicleResponse>, HttpError> {
    Ok(Json(register_vehicle(
        &app_state.store,
        &request,
        &actor,
        cause,
    )?))
}

// ============================================================================
// Active queue
// ============================================================================

/// Handler for GET `/queues/{destination}`.
async fn handle_list_queue(
    AxumState(app_state): AxumState<AppState>,
    Path(destination): Path<String>,
    _session: StaffSession,
) -> Result<Json<QueueResponse>, HttpError> {
    Ok(Json(list_queue(&app_state.store, &destination)?))
}

/// Handler for POST `/queues/{destination}/entries`.
async fn handle_enqueue(
    AxumState(app_state): AxumState<AppState>,
    Path(destination): Path<String>,
    StaffSession(actor, cause): StaffSession,
    Json(request): Json<EnqueueVehicleRequest>,
) -> Result<Json<EntryResponse>, HttpError> {
    let response: EntryResponse =
        enqueue_vehicle(&app_state.store, &destination, &request, &actor, cause)?;
    queue_changed(&app_state, &response.entry.destination);
    Ok(Json(response))
}

/// Handler for PUT `/queues/{destination}/order`.
async fn handle_reorder(
    AxumState(app_state): AxumState<AppState>,
    Path(destination): Path<String>,
    StaffSession(actor, cause): StaffSession,
    Json(request): Json<ReorderQueueRequest>,
) -> Result<Json<QueueResponse>, HttpError> {
    let response: QueueResponse =
        reorder_queue(&app_state.store, &destination, &request, &actor, cause)?;
    queue_changed(&app_state, &response.destination);
    Ok(Json(response))
}

/// Handler for PUT `/entries/{id}/status`.
async fn handle_update_status(
    AxumState(app_state): AxumState<AppState>,
    Path(entry_id): Path<u64>,
    StaffSession(actor, cause): StaffSession,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<EntryResponse>, HttpError> {
    let response: EntryResponse =
        update_entry_status(&app_state.store, entry_id, &request, &actor, cause)?;
    queue_changed(&app_state, &response.entry.destination);
    Ok(Json(response))
}

/// Handler for POST `/entries/{id}/seats`.
async fn handle_adjust_seats(
    AxumState(app_state): AxumState<AppState>,
    Path(entry_id): Path<u64>,
    StaffSession(actor, cause): StaffSession,
    Json(request): Json<AdjustSeatsRequest>,
) -> Result<Json<EntryResponse>, HttpError> {
    let response: EntryResponse =
        adjust_entry_seats(&app_state.store, entry_id, &request, &actor, cause)?;
    queue_changed(&app_state, &response.entry.destination);
    Ok(Json(response))
}

/// Handler for PUT `/entries/{id}/departure`.
async fn handle_set_departure(
    AxumState(app_state): AxumState<AppState>,
    Path(entry_id): Path<u64>,
    StaffSession(actor, cause): StaffSession,
    Json(request): Json<SetDepartureRequest>,
) -> Result<Json<EntryResponse>, HttpError> {
    let response: EntryResponse =
        set_estimated_departure(&app_state.store, entry_id, &request, &actor, cause)?;
    queue_changed(&app_state, &response.entry.destination);
    Ok(Json(response))
}

/// Handler for DELETE `/entries/{id}`.
async fn handle_remove_entry(
    AxumState(app_state): AxumState<AppState>,
    Path(entry_id): Path<u64>,
    StaffSession(actor, cause): StaffSession,
) -> Result<Json<EntryResponse>, HttpError> {
    let response: EntryResponse = remove_entry(&app_state.store, entry_id, &actor, cause)?;
    queue_changed(&app_state, &response.entry.destination);
    Ok(Json(response))
}

/// Handler for POST `/bookings`.
async fn handle_book_seats(
    AxumState(app_state): AxumState<AppState>,
    StaffSession(actor, cause): StaffSession,
    Json(request): Json<BookSeatsRequest>,
) -> Result<Json<BookingResponse>, HttpError> {
    let response: BookingResponse = book_seats(&app_state.store, &request, &actor, cause)?;
    app_state.broadcaster.broadcast(&LiveEvent::SeatsBooked {
        destination: response.booking.destination.clone(),
        seats: response.booking.seats,
    });
    Ok(Json(response))
}

/// Handler for GET `/bookings/{destination}`.
async fn handle_list_bookings(
    AxumState(app_state): AxumState<AppState>,
    Path(destination): Path<String>,
    _session: StaffSession,
) -> Result<Json<BookingListResponse>, HttpError> {
    Ok(Json(list_bookings(&app_state.store, &destination)?))
}

/// Handler for POST `/tickets/{code}/verify`.
async fn handle_verify_ticket(
    AxumState(app_state): AxumState<AppState>,
    Path(code): Path<String>,
    StaffSession(actor, cause): StaffSession,
) -> Result<Json<BookingResponse>, HttpError> {
    let response: BookingResponse = verify_ticket(&app_state.store, &code, &actor, cause)?;
    app_state.broadcaster.broadcast(&LiveEvent::TicketVerified {
        destination: response.booking.destination.clone(),
        seats: response.booking.seats,
    });
    Ok(Json(response))
}

// ============================================================================
// Overnight queue
// ============================================================================

/// Handler for GET `/overnight/{destination}`.
async fn handle_list_overnight(
    AxumState(app_state): AxumState<AppState>,
    Path(destination): Path<String>,
    StaffSession(actor, _cause): StaffSession,
) -> Result<Json<OvernightQueueResponse>, HttpError> {
    Ok(Json(list_overnight(&app_state.store, &destination, &actor)?))
}

/// Handler for POST `/overnight/{destination}`.
async fn handle_park_overnight(
    AxumState(app_state): AxumState<AppState>,
    Path(destination): Path<String>,
    StaffSession(actor, cause): StaffSession,
    Json(request): Json<ParkOvernightRequest>,
) -> Result<Json<OvernightEntryResponse>, HttpError> {
    let response: OvernightEntryResponse =
        park_overnight(&app_state.store, &destination, &request, &actor, cause)?;
    overnight_changed(&app_state, &response.entry.destination);
    Ok(Json(response))
}

/// Handler for POST `/overnight/by-driver`.
async fn handle_park_by_driver(
    AxumState(app_state): AxumState<AppState>,
    StaffSession(actor, cause): StaffSession,
    Json(request): Json<ParkByDriverRequest>,
) -> Result<Json<OvernightEntryResponse>, HttpError> {
    let response: OvernightEntryResponse =
        park_overnight_by_driver(&app_state.store, &request, &actor, cause)?;
    overnight_changed(&app_state, &response.entry.destination);
    Ok(Json(response))
}

/// Handler for POST `/overnight/{destination}/promote`.
async fn handle_promote(
    AxumState(app_state): AxumState<AppState>,
    Path(destination): Path<String>,
    StaffSession(actor, cause): StaffSession,
) -> Result<Json<PromoteOvernightResponse>, HttpError> {
    let response: PromoteOvernightResponse =
        promote_overnight(&app_state.store, &destination, &actor, cause)?;
    app_state
        .broadcaster
        .broadcast(&LiveEvent::OvernightPromoted {
            destination: response.destination.clone(),
            promoted: response.promoted,
        });
    Ok(Json(response))
}

/// Handler for PUT `/overnight/entries/{id}/ready`.
async fn handle_mark_ready(
    AxumState(app_state): AxumState<AppState>,
    Path(entry_id): Path<u64>,
    StaffSession(actor, cause): StaffSession,
) -> Result<Json<OvernightEntryResponse>, HttpError> {
    let response: OvernightEntryResponse =
        mark_ready_for_transfer(&app_state.store, entry_id, &actor, cause)?;
    overnight_changed(&app_state, &response.entry.destination);
    Ok(Json(response))
}

/// Handler for DELETE `/overnight/entries/{id}`.
async fn handle_remove_overnight(
    AxumState(app_state): AxumState<AppState>,
    Path(entry_id): Path<u64>,
    StaffSession(actor, cause): StaffSession,
) -> Result<Json<OvernightEntryResponse>, HttpError> {
    let response: OvernightEntryResponse =
        remove_overnight(&app_state.store, entry_id, &actor, cause)?;
    overnight_changed(&app_state, &response.entry.destination);
    Ok(Json(response))
}

// ============================================================================
// Statistics and audit
// ============================================================================

/// Handler for GET `/stats`.
async fn handle_station_stats(
    AxumState(app_state): AxumState<AppState>,
    _session: StaffSession,
) -> Json<StationStatsResponse> {
    Json(station_stats(&app_state.store))
}

/// Handler for GET `/stats/{destination}`.
async fn handle_queue_stats(
    AxumState(app_state): AxumState<AppState>,
    Path(destination): Path<String>,
    _session: StaffSession,
) -> Result<Json<QueueStatsResponse>, HttpError> {
    Ok(Json(queue_stats(&app_state.store, &destination)?))
}

/// Handler for GET `/audit`.
async fn handle_recent_audit(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<AuditQuery>,
    _session: StaffSession,
) -> Json<Vec<AuditEventView>> {
    let limit: usize = query.limit.unwrap_or(DEFAULT_AUDIT_LIMIT);
    Json(recent_audit_events(&app_state.store, limit))
}

/// Handler for GET `/audit/{destination}`.
async fn handle_destination_audit(
    AxumState(app_state): AxumState<AppState>,
    Path(destination): Path<String>,
    _session: StaffSession,
) -> Result<Json<Vec<AuditEventView>>, HttpError> {
    Ok(Json(destination_audit_events(
        &app_state.store,
        &destination,
    )?))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/station", get(handle_station_info))
        .route("/station/operational", put(handle_set_operational))
        .route(
            "/destinations",
            get(handle_list_destinations).post(handle_register_destination),
        )
        .route("/destinations/{destination}/fare", put(handle_set_fare))
        .route("/vehicles", post(handle_register_vehicle))
        .route("/queues/{destination}", get(handle_list_queue))
        .route("/queues/{destination}/entries", post(handle_enqueue))
        .route("/queues/{destination}/order", put(handle_reorder))
        .route("/entries/{id}", delete(handle_remove_entry))
        .route("/entries/{id}/status", put(handle_update_status))
        .route("/entries/{id}/seats", post(handle_adjust_seats))
        .route("/entries/{id}/departure", put(handle_set_departure))
        .route("/bookings", post(handle_book_seats))
        .route("/bookings/{destination}", get(handle_list_bookings))
        .route("/tickets/{code}/verify", post(handle_verify_ticket))
        .route("/overnight/by-driver", post(handle_park_by_driver))
        .route(
            "/overnight/{destination}",
            get(handle_list_overnight).post(handle_park_overnight),
        )
        .route("/overnight/{destination}/promote", post(handle_promote))
        .route("/overnight/entries/{id}", delete(handle_remove_overnight))
        .route("/overnight/entries/{id}/ready", put(handle_mark_ready))
        .route("/stats", get(handle_station_stats))
        .route("/stats/{destination}", get(handle_queue_stats))
        .route("/audit", get(handle_recent_audit))
        .route("/audit/{destination}", get(handle_destination_audit))
        .route("/live", get(live_events_handler))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing louaj station server");

    let config: StationConfig = if let Some(path) = &args.config {
        info!(path = %path.display(), "Loading station config");
        StationConfig::load(path)?
    } else {
        info!("No station config given, starting an empty station");
        StationConfig::default()
    };

    let store: Arc<QueueStore> = Arc::new(QueueStore::new());
    config.seed_store(&store)?;
    info!(
        station = %config.station_name,
        destinations = config.destinations.len(),
        vehicles = config.vehicles.len(),
        "Station seeded"
    );

    let broadcaster: Arc<LiveEventBroadcaster> = Arc::new(LiveEventBroadcaster::new());

    if args.no_scheduler {
        info!("Overnight promotion scheduler disabled");
    } else {
        scheduler::spawn(
            Arc::clone(&store),
            Arc::clone(&broadcaster),
            config.promotion_schedule()?,
        );
    }

    let app_state: AppState = AppState {
        store,
        broadcaster,
        config: Arc::new(config),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
