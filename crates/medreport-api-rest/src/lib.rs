//! # API REST
//!
//! REST API implementation for MedReport.
//!
//! Handles:
//! - HTTP endpoints with axum for the landing, form and report views
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, redirects)
//!
//! The form and report views share one [`RecordStore`]; submitting the form writes the
//! record under the configured key and the report view reads it back.

#![warn(rust_2018_idioms)]

pub mod wire;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Redirect, Response},
    routing::get,
    Router,
};
use chrono::Local;
use medreport_core::{
    catalogue::form_fields, landing_page, load_report, CoreConfig, FormState, IntakeError,
    RecordStore, ReportPage, Submission,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use wire::{
    ErrorRes, FieldSpecRes, FormFieldsRes, HealthRes, LandingRes, PatientRecordReq, RejectedRes,
    ReportRes, SubmitRes,
};

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    cfg: Arc<CoreConfig>,
    store: Arc<dyn RecordStore>,
}

impl AppState {
    pub fn new(cfg: Arc<CoreConfig>, store: Arc<dyn RecordStore>) -> Self {
        Self { cfg, store }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, landing, form_fields_handler, submit_form, report),
    components(schemas(
        HealthRes,
        LandingRes,
        wire::LinkRes,
        FormFieldsRes,
        FieldSpecRes,
        wire::FieldOptionRes,
        PatientRecordReq,
        SubmitRes,
        RejectedRes,
        wire::NotificationRes,
        ReportRes,
        ErrorRes,
    ))
)]
pub struct ApiDoc;

/// Builds the REST router with Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(landing))
        .route("/health", get(health))
        .route("/form", get(form_fields_handler).post(submit_form))
        .route("/report", get(report))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn internal_error(context: &str, err: IntakeError) -> Response {
    tracing::error!("{context}: {:?}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorRes {
            message: "Internal error".into(),
        }),
    )
        .into_response()
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for monitoring and load balancers.
async fn health() -> Json<HealthRes> {
    Json(HealthRes {
        status: "ok".into(),
    })
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Landing page content", body = LandingRes)
    )
)]
/// Landing page: product summary and links into the form.
async fn landing() -> Json<LandingRes> {
    Json(landing_page().into())
}

#[utoipa::path(
    get,
    path = "/form",
    responses(
        (status = 200, description = "Fields of the intake form", body = FormFieldsRes)
    )
)]
/// Describes the intake form: labels, placeholders, help text and select options.
async fn form_fields_handler() -> Json<FormFieldsRes> {
    let fields = form_fields().iter().map(FieldSpecRes::from).collect();
    Json(FormFieldsRes { fields })
}

#[utoipa::path(
    post,
    path = "/form",
    request_body = PatientRecordReq,
    responses(
        (status = 200, description = "Record accepted and stored", body = SubmitRes),
        (status = 400, description = "Malformed date", body = ErrorRes),
        (status = 422, description = "Validation failed; nothing stored", body = RejectedRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Submits the intake form.
///
/// Validates the record and, when it passes, stores it under the configured key. A
/// rejected submission returns the message for every failing field.
///
/// # Errors
/// - `400 Bad Request` if a date cannot be parsed.
/// - `422 Unprocessable Entity` if any field is missing or the age is invalid.
/// - `500 Internal Server Error` if the record cannot be stored.
#[axum::debug_handler]
async fn submit_form(State(state): State<AppState>, Json(req): Json<PatientRecordReq>) -> Response {
    let record = match req.into_record() {
        Ok(record) => record,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorRes {
                    message: e.to_string(),
                }),
            )
                .into_response()
        }
    };

    let mut form = FormState::with_draft(record);
    match form.submit(state.store.as_ref(), state.cfg.storage_key()) {
        Ok(Submission::Accepted {
            notification,
            redirect,
            ..
        }) => Json(SubmitRes {
            notification: (&notification).into(),
            redirect: redirect.path().to_string(),
        })
        .into_response(),
        Ok(Submission::Rejected { notification }) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(RejectedRes::new(&notification, form.errors())),
        )
            .into_response(),
        Err(e) => internal_error("Submit form error", e),
    }
}

#[utoipa::path(
    get,
    path = "/report",
    responses(
        (status = 200, description = "Report for the stored record", body = ReportRes),
        (status = 303, description = "No usable record stored; redirect to /form"),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Renders the report for the most recently submitted record.
///
/// Redirects to the form when nothing has been submitted yet.
#[axum::debug_handler]
async fn report(State(state): State<AppState>) -> Response {
    let now = Local::now().naive_local();
    match load_report(state.store.as_ref(), state.cfg.storage_key(), now) {
        Ok(ReportPage::Ready(view)) => Json(ReportRes::from(view)).into_response(),
        Ok(ReportPage::Redirect(route)) => Redirect::to(route.path()).into_response(),
        Err(e) => internal_error("Load report error", e),
    }
}
