//! Job CRUD and bulk upsert endpoints.
//!
//! Reads are public; every mutation requires a valid bearer token via the
//! [`AuthenticatedUser`] extractor.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{JobPayload, JobWithTags};
use crate::inbound::http::bearer::AuthenticatedUser;
use crate::inbound::http::error::{ApiError, ApiResult};
use crate::inbound::http::state::HttpState;

/// Response body for job deletion.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteJobResponse {
    pub message: String,
}

/// List all jobs with their tag sets.
#[utoipa::path(
    get,
    path = "/jobs",
    responses(
        (status = 200, description = "All jobs", body = [JobWithTags]),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["jobs"],
    operation_id = "listJobs"
)]
#[get("/jobs")]
pub async fn list_jobs(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<JobWithTags>>> {
    let jobs = state.jobs.list_jobs().await.map_err(ApiError::from)?;
    Ok(web::Json(jobs))
}

/// Fetch one job with its tag sets.
#[utoipa::path(
    get,
    path = "/jobs/{id}",
    params(("id" = Uuid, Path, description = "Job identifier")),
    responses(
        (status = 200, description = "The job", body = JobWithTags),
        (status = 404, description = "Unknown job", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["jobs"],
    operation_id = "getJob"
)]
#[get("/jobs/{id}")]
pub async fn get_job(
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
) -> ApiResult<web::Json<JobWithTags>> {
    let job = state
        .jobs
        .get_job(id.into_inner())
        .await
        .map_err(ApiError::from)?;
    Ok(web::Json(job))
}

/// Create a job with optional skill/benefit/requirement tags.
#[utoipa::path(
    post,
    path = "/jobs",
    request_body = JobPayload,
    responses(
        (status = 201, description = "Job created", body = JobWithTags),
        (status = 400, description = "Validation failure", body = ApiError),
        (status = 401, description = "Missing or invalid token", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["jobs"],
    operation_id = "createJob",
    security(("bearer" = []))
)]
#[post("/jobs")]
pub async fn create_job(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<JobPayload>,
) -> ApiResult<HttpResponse> {
    let job = state
        .jobs
        .create_job(payload.into_inner())
        .await
        .map_err(ApiError::from)?;
    info!(user_id = %user.user_id, job_id = %job.job.id, "job created");
    Ok(HttpResponse::Created().json(job))
}

/// Upsert a batch of jobs keyed by `(title, company, location)`.
#[utoipa::path(
    post,
    path = "/jobs/bulk",
    request_body = [JobPayload],
    responses(
        (status = 201, description = "Processed jobs", body = [JobWithTags]),
        (status = 400, description = "Validation failure", body = ApiError),
        (status = 401, description = "Missing or invalid token", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["jobs"],
    operation_id = "bulkUpsertJobs",
    security(("bearer" = []))
)]
#[post("/jobs/bulk")]
pub async fn bulk_upsert_jobs(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<Vec<JobPayload>>,
) -> ApiResult<HttpResponse> {
    let jobs = state
        .jobs
        .bulk_upsert_jobs(payload.into_inner())
        .await
        .map_err(ApiError::from)?;
    info!(user_id = %user.user_id, count = jobs.len(), "bulk upsert processed");
    Ok(HttpResponse::Created().json(jobs))
}

/// Apply a partial update to a job.
#[utoipa::path(
    put,
    path = "/jobs/{id}",
    params(("id" = Uuid, Path, description = "Job identifier")),
    request_body = JobPayload,
    responses(
        (status = 200, description = "Updated job", body = JobWithTags),
        (status = 400, description = "Validation failure", body = ApiError),
        (status = 401, description = "Missing or invalid token", body = ApiError),
        (status = 404, description = "Unknown job", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["jobs"],
    operation_id = "updateJob",
    security(("bearer" = []))
)]
#[put("/jobs/{id}")]
pub async fn update_job(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    id: web::Path<Uuid>,
    payload: web::Json<JobPayload>,
) -> ApiResult<web::Json<JobWithTags>> {
    let id = id.into_inner();
    let job = state
        .jobs
        .update_job(id, payload.into_inner())
        .await
        .map_err(ApiError::from)?;
    info!(user_id = %user.user_id, job_id = %id, "job updated");
    Ok(web::Json(job))
}

/// Delete a job and its tag links. Tag entities are never cascaded.
#[utoipa::path(
    delete,
    path = "/jobs/{id}",
    params(("id" = Uuid, Path, description = "Job identifier")),
    responses(
        (status = 200, description = "Job deleted", body = DeleteJobResponse),
        (status = 401, description = "Missing or invalid token", body = ApiError),
        (status = 404, description = "Unknown job", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["jobs"],
    operation_id = "deleteJob",
    security(("bearer" = []))
)]
#[delete("/jobs/{id}")]
pub async fn delete_job(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    id: web::Path<Uuid>,
) -> ApiResult<web::Json<DeleteJobResponse>> {
    let id = id.into_inner();
    state.jobs.delete_job(id).await.map_err(ApiError::from)?;
    info!(user_id = %user.user_id, job_id = %id, "job deleted");
    Ok(web::Json(DeleteJobResponse {
        message: "job deleted".to_owned(),
    }))
}
