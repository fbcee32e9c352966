use std::io::Cursor;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::AppError;

use super::domain::AuditKey;
use super::import::ReviewCsvImporter;
use super::insights::{self, AuditTrend, InsightPoint};
use super::repository::AuditRepository;
use super::reviews;
use super::service::{AuditError, AuditService, CreditLedger, SignalProvider};
use super::signals::{NormalizedReview, SignalError};

/// Router builder exposing HTTP endpoints for audit runs, lookups,
/// insight queries, and standalone review analysis.
pub fn audit_router<P, R, L>(service: Arc<AuditService<P, R, L>>) -> Router
where
    P: SignalProvider + 'static,
    R: AuditRepository + 'static,
    L: CreditLedger + 'static,
{
    Router::new()
        .route("/api/v1/audits/run", post(run_handler::<P, R, L>))
        .route(
            "/api/v1/audits/:user_id/:entity_id/latest",
            get(latest_handler::<P, R, L>),
        )
        .route(
            "/api/v1/audits/:user_id/:entity_id/insights",
            get(insights_handler::<P, R, L>),
        )
        .route("/api/v1/reviews/analyze", post(analyze_reviews_handler))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub struct RunAuditRequest {
    pub user_id: String,
    pub entity_id: String,
}

#[derive(Debug, Serialize)]
struct InsightsResponse {
    points: Vec<InsightPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trend: Option<AuditTrend>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeReviewsRequest {
    #[serde(default)]
    pub reviews: Vec<NormalizedReview>,
    /// Raw CSV in the platform export layout, appended to `reviews`.
    #[serde(default)]
    pub reviews_csv: Option<String>,
}

pub(crate) async fn run_handler<P, R, L>(
    State(service): State<Arc<AuditService<P, R, L>>>,
    axum::Json(request): axum::Json<RunAuditRequest>,
) -> Response
where
    P: SignalProvider + 'static,
    R: AuditRepository + 'static,
    L: CreditLedger + 'static,
{
    let key = AuditKey::new(request.user_id, request.entity_id);
    match service.run_audit(&key) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => audit_error_response(error),
    }
}

pub(crate) async fn latest_handler<P, R, L>(
    State(service): State<Arc<AuditService<P, R, L>>>,
    Path((user_id, entity_id)): Path<(String, String)>,
) -> Response
where
    P: SignalProvider + 'static,
    R: AuditRepository + 'static,
    L: CreditLedger + 'static,
{
    let key = AuditKey::new(user_id, entity_id);
    match service.latest_audit(&key) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => audit_error_response(error),
    }
}

pub(crate) async fn insights_handler<P, R, L>(
    State(service): State<Arc<AuditService<P, R, L>>>,
    Path((user_id, entity_id)): Path<(String, String)>,
) -> Response
where
    P: SignalProvider + 'static,
    R: AuditRepository + 'static,
    L: CreditLedger + 'static,
{
    let key = AuditKey::new(user_id, entity_id);
    match service.insights(&key) {
        Ok(points) => {
            let trend = insights::trend(&points);
            (StatusCode::OK, axum::Json(InsightsResponse { points, trend })).into_response()
        }
        Err(error) => audit_error_response(error),
    }
}

pub(crate) async fn analyze_reviews_handler(
    axum::Json(request): axum::Json<AnalyzeReviewsRequest>,
) -> Result<axum::Json<reviews::ReviewAnalysis>, AppError> {
    let mut reviews = request.reviews;
    if let Some(csv) = request.reviews_csv {
        let imported = ReviewCsvImporter::from_reader(Cursor::new(csv.into_bytes()))?;
        reviews.extend(imported);
    }

    if let Some(review) = reviews
        .iter()
        .find(|review| !(1..=5).contains(&review.rating))
    {
        return Err(AppError::Audit(AuditError::Signal(SignalError::Invalid {
            field: "reviews.rating",
            detail: format!(
                "review {} has rating {} outside 1..=5",
                review.review_id, review.rating
            ),
        })));
    }

    Ok(axum::Json(reviews::analyze(&reviews, Utc::now())))
}

fn audit_error_response(error: AuditError) -> Response {
    let status = crate::error::audit_status(&error);
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
