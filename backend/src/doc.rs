//! OpenAPI documentation configuration.
//!
//! Generates the specification consumed by Swagger UI in debug builds. All
//! REST endpoints and their request/response schemas are registered here,
//! together with the bearer token security scheme used by the protected job
//! mutations.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::error::{Error, ErrorCode};
use crate::domain::job::{
    Benefit, Job, JobCategory, JobPayload, JobStatus, JobType, JobWithTags, Requirement,
    RequirementFields, RequirementInput, RequirementPriority, RequirementType, Skill,
};
use crate::domain::user::UserProfile;
use crate::inbound::http::auth::{LoginRequest, LoginResponse, SignupRequest, SignupResponse};
use crate::inbound::http::error::ApiError;
use crate::inbound::http::jobs::DeleteJobResponse;

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token issued by POST /auth/login, valid for one hour."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "DevJobs backend API",
        description = "Job board HTTP interface: authentication plus job CRUD with skill, benefit, and requirement tags."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::auth::signup,
        crate::inbound::http::auth::login,
        crate::inbound::http::jobs::list_jobs,
        crate::inbound::http::jobs::get_job,
        crate::inbound::http::jobs::create_job,
        crate::inbound::http::jobs::bulk_upsert_jobs,
        crate::inbound::http::jobs::update_job,
        crate::inbound::http::jobs::delete_job,
    ),
    components(schemas(
        ApiError,
        Error,
        ErrorCode,
        Job,
        JobWithTags,
        JobPayload,
        JobType,
        JobCategory,
        JobStatus,
        Skill,
        Benefit,
        Requirement,
        RequirementInput,
        RequirementFields,
        RequirementType,
        RequirementPriority,
        UserProfile,
        SignupRequest,
        SignupResponse,
        LoginRequest,
        LoginResponse,
        DeleteJobResponse,
    )),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "jobs", description = "Job postings and their tags")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_registers_all_endpoints() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in ["/auth/signup", "/auth/login", "/jobs", "/jobs/{id}", "/jobs/bulk"] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing path {expected}, got {paths:?}"
            );
        }
    }

    #[test]
    fn document_registers_the_bearer_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components present");
        assert!(components.security_schemes.contains_key("bearer"));
    }
}
