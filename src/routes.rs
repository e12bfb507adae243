use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Base64 inflates a 10MB receipt to roughly 13.4MB of JSON.
const BODY_LIMIT: usize = 16 * 1024 * 1024;

fn cors(origin: Option<&str>) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match origin.and_then(|o| HeaderValue::from_str(o).ok()) {
        Some(origin) => layer.allow_origin(origin),
        None => layer.allow_origin(Any),
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = cors(state.config.cors_origin.as_deref());

    Router::new()
        .route("/", get(handlers::app::redirect_to_app))
        .route("/health", get(handlers::health::health))
        .route("/app", get(handlers::app::app_page))
        // public
        .route("/api/courses", get(handlers::courses::list_courses))
        .route(
            "/api/courses/:id/dates",
            get(handlers::courses::list_course_dates),
        )
        .route("/api/enroll/:code", get(handlers::courses::resolve_link))
        .route("/api/bookings", post(handlers::bookings::create_booking))
        .route(
            "/api/bookings/validate",
            post(handlers::bookings::validate_booking),
        )
        .route(
            "/api/bookings/payment-method",
            post(handlers::bookings::switch_payment_method),
        )
        // admin
        .route("/api/admin/calendar", get(handlers::calendar::admin_calendar))
        .route(
            "/api/admin/schedules",
            post(handlers::calendar::create_schedule),
        )
        .route(
            "/api/admin/schedules/drop",
            post(handlers::calendar::drop_template),
        )
        .route(
            "/api/admin/schedules/:id",
            delete(handlers::calendar::delete_schedule),
        )
        .route(
            "/api/admin/schedules/:id/ics",
            get(handlers::calendar::download_ics),
        )
        .route("/api/admin/payments", get(handlers::payments::list_payments))
        .route(
            "/api/admin/payments/:id/verify",
            put(handlers::payments::verify_payment),
        )
        .route(
            "/api/admin/payments/:id/receipt",
            get(handlers::payments::download_receipt),
        )
        .route("/api/admin/quiz/results", get(handlers::quiz::list_results))
        .route(
            "/api/admin/quiz/results/:id/bypass",
            post(handlers::quiz::bypass),
        )
        .route(
            "/api/admin/quiz/results/:id/reject",
            post(handlers::quiz::reject),
        )
        .route(
            "/api/admin/links",
            get(handlers::links::list_links).post(handlers::links::create_link),
        )
        .route(
            "/api/admin/links/:id",
            put(handlers::links::update_link).delete(handlers::links::delete_link),
        )
        .route(
            "/api/admin/links/:id/qr",
            post(handlers::links::regenerate_qr),
        )
        .route("/api/admin/files/:folder", post(handlers::files::upload))
        // teacher
        .route(
            "/api/teacher/:teacher_id/schedule",
            get(handlers::calendar::teacher_schedule),
        )
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
