//! API request handlers
//!
//! Every view endpoint takes the workbook as the raw request body. Each
//! request is parsed and aggregated on its own; nothing is shared between
//! requests except the read-only configuration.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::{validate_threshold, ReportConfig};
use crate::core::Aggregator;
use crate::error::{ReportError, ReportResult};
use crate::excel::load_rows_from_bytes;
use crate::report::{generate_report, PDF_MIME};
use crate::types::{CellDetail, LowUsageRow, RawRow, UsageRow, VolteRow, ZeroUsageCell};

use super::server::AppState;

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            request_id: Uuid::new_v4().to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            request_id: Uuid::new_v4().to_string(),
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Error half of every handler; maps the error taxonomy onto HTTP statuses
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        let status = match &err {
            e if e.is_ingestion() => StatusCode::UNPROCESSABLE_ENTITY,
            ReportError::EmptyInput => StatusCode::UNPROCESSABLE_ENTITY,
            ReportError::Config(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!(status = %self.status, error = %self.message, "request failed");
        (self.status, Json(ApiResponse::<()>::err(self.message))).into_response()
    }
}

/// Parse the uploaded workbook and run `view` on its rows, off the async runtime
async fn with_rows<T, F>(config: Arc<ReportConfig>, body: Bytes, view: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(Vec<RawRow>, &ReportConfig) -> ReportResult<T> + Send + 'static,
{
    if body.is_empty() {
        return Err(ApiError::bad_request(
            "request body must contain an .xlsx workbook",
        ));
    }

    tokio::task::spawn_blocking(move || {
        let rows = load_rows_from_bytes(&body, &config)?;
        view(rows, &config)
    })
    .await
    .map_err(|e| ApiError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: format!("worker failed: {}", e),
    })?
    .map_err(ApiError::from)
}

/// Root endpoint response
#[derive(Serialize)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Serialize)]
pub struct EndpointInfo {
    pub path: String,
    pub method: String,
    pub description: String,
}

impl EndpointInfo {
    fn new(method: &str, path: &str, description: &str) -> Self {
        Self {
            path: path.to_string(),
            method: method.to_string(),
            description: description.to_string(),
        }
    }
}

/// GET / - Root info
pub async fn root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = RootResponse {
        name: "VLU Report API Server".to_string(),
        version: state.version.clone(),
        description: "4G site telemetry views and PDF reports from uploaded workbooks"
            .to_string(),
        endpoints: vec![
            EndpointInfo::new("GET", "/health", "Health check endpoint"),
            EndpointInfo::new("GET", "/version", "Get server version"),
            EndpointInfo::new("POST", "/api/v1/usage", "Locations by data usage"),
            EndpointInfo::new("POST", "/api/v1/volte", "Locations by VoLTE traffic"),
            EndpointInfo::new("POST", "/api/v1/detail", "Per-cell rows of one location"),
            EndpointInfo::new(
                "POST",
                "/api/v1/low-traffic",
                "Low-usage locations and zero-data cells",
            ),
            EndpointInfo::new("POST", "/api/v1/locations", "Sorted location names"),
            EndpointInfo::new("POST", "/api/v1/report", "Generate the PDF report"),
        ],
    };
    Json(ApiResponse::ok(response))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_message: String,
}

/// GET /health - Health check
pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::ok(HealthResponse {
        status: "healthy".to_string(),
        uptime_message: "Server is running".to_string(),
    }))
}

/// Version response
#[derive(Serialize)]
pub struct VersionResponse {
    pub version: String,
    pub features: Vec<String>,
}

/// GET /version - Server version
pub async fn version(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(VersionResponse {
        version: state.version.clone(),
        features: ["usage", "volte", "detail", "low-traffic", "locations", "report"]
            .iter()
            .map(|f| f.to_string())
            .collect(),
    }))
}

/// Query for the area-filtered views
#[derive(Debug, Default, Deserialize)]
pub struct AreaQuery {
    pub area_code: Option<String>,
}

/// Response of the ranked area views
#[derive(Serialize)]
pub struct ViewResponse<T: Serialize> {
    pub area_code: String,
    pub count: usize,
    pub rows: Vec<T>,
}

impl<T: Serialize> ViewResponse<T> {
    fn new(area_code: String, rows: Vec<T>) -> Self {
        Self {
            area_code,
            count: rows.len(),
            rows,
        }
    }
}

/// POST /api/v1/usage - Locations by data usage
pub async fn usage(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AreaQuery>,
    body: Bytes,
) -> Result<Json<ApiResponse<ViewResponse<UsageRow>>>, ApiError> {
    let area = query
        .area_code
        .unwrap_or_else(|| state.config.default_area_code.clone());

    let view = with_rows(state.config.clone(), body, move |rows, _| {
        let summary = Aggregator::build(&rows);
        Ok(ViewResponse::new(
            area.clone(),
            Aggregator::data_usage_view(&summary, &area),
        ))
    })
    .await?;
    Ok(Json(ApiResponse::ok(view)))
}

/// POST /api/v1/volte - Locations by VoLTE traffic
pub async fn volte(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AreaQuery>,
    body: Bytes,
) -> Result<Json<ApiResponse<ViewResponse<VolteRow>>>, ApiError> {
    let area = query
        .area_code
        .unwrap_or_else(|| state.config.default_area_code.clone());

    let view = with_rows(state.config.clone(), body, move |rows, _| {
        let summary = Aggregator::build(&rows);
        Ok(ViewResponse::new(
            area.clone(),
            Aggregator::volte_view(&summary, &area),
        ))
    })
    .await?;
    Ok(Json(ApiResponse::ok(view)))
}

#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    pub location: String,
}

#[derive(Serialize)]
pub struct DetailResponse {
    pub location: String,
    pub count: usize,
    pub rows: Vec<CellDetail>,
}

/// POST /api/v1/detail - Per-cell rows of one location
pub async fn detail(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DetailQuery>,
    body: Bytes,
) -> Result<Json<ApiResponse<DetailResponse>>, ApiError> {
    let location = query.location;

    let view = with_rows(state.config.clone(), body, move |rows, _| {
        let detail = Aggregator::location_detail(&rows, &location);
        Ok(DetailResponse {
            location,
            count: detail.len(),
            rows: detail,
        })
    })
    .await?;
    Ok(Json(ApiResponse::ok(view)))
}

#[derive(Debug, Default, Deserialize)]
pub struct LowTrafficQuery {
    pub area_code: Option<String>,
    pub threshold: Option<f64>,
}

#[derive(Serialize)]
pub struct LowTrafficResponse {
    pub area_code: String,
    pub threshold: f64,
    pub low_usage: Vec<LowUsageRow>,
    pub zero_usage: Vec<ZeroUsageCell>,
}

/// POST /api/v1/low-traffic - Low-usage locations and zero-data cells
pub async fn low_traffic(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LowTrafficQuery>,
    body: Bytes,
) -> Result<Json<ApiResponse<LowTrafficResponse>>, ApiError> {
    let area = query
        .area_code
        .unwrap_or_else(|| state.config.default_area_code.clone());
    let threshold = query
        .threshold
        .unwrap_or(state.config.low_usage_threshold);
    validate_threshold(threshold)?;

    let view = with_rows(state.config.clone(), body, move |rows, _| {
        let summary = Aggregator::build(&rows);
        let view = Aggregator::new(threshold).low_traffic_view(&summary, &rows, &area);
        Ok(LowTrafficResponse {
            area_code: area,
            threshold,
            low_usage: view.low_usage,
            zero_usage: view.zero_usage,
        })
    })
    .await?;
    Ok(Json(ApiResponse::ok(view)))
}

/// POST /api/v1/locations - Sorted location names
pub async fn locations(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ApiResponse<Vec<String>>>, ApiError> {
    let names = with_rows(state.config.clone(), body, |rows, _| {
        Ok(Aggregator::locations(&Aggregator::build(&rows)))
    })
    .await?;
    Ok(Json(ApiResponse::ok(names)))
}

#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub location: Option<String>,
}

/// POST /api/v1/report - Generate the PDF report
pub async fn report(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReportQuery>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let today = Local::now().date_naive();

    let report = with_rows(state.config.clone(), body, move |rows, config| {
        generate_report(&rows, config, query.location.as_deref(), today)
    })
    .await?;

    info!(file = %report.file_name, bytes = report.pdf.len(), "serving report");
    let headers = [
        (header::CONTENT_TYPE, PDF_MIME.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", report.file_name),
        ),
    ];
    Ok((headers, report.pdf).into_response())
}
