//! Server construction and wiring.

mod config;

pub use config::{AppConfig, ConfigError};

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use backend::ApiDoc;
use backend::RequestTracking;
use backend::domain::{AuthService, Error, JobService, TagVocabulary, TokenSigner};
use backend::inbound::http::auth::{login, signup};
use backend::inbound::http::error::ApiError;
use backend::inbound::http::jobs::{
    bulk_upsert_jobs, create_job, delete_job, get_job, list_jobs, update_job,
};
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{DbPool, DieselJobRepository, DieselUserRepository};

/// Wire the services over their Diesel adapters.
pub fn build_state(config: &AppConfig, pool: DbPool) -> web::Data<HttpState> {
    let vocabulary = Arc::new(TagVocabulary::new());
    let tokens = Arc::new(TokenSigner::new(&config.jwt_secret));
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let jobs = Arc::new(DieselJobRepository::new(pool));
    web::Data::new(HttpState::new(
        Arc::new(AuthService::new(users, tokens.clone())),
        Arc::new(JobService::new(vocabulary, jobs)),
        tokens,
    ))
}

/// Map body deserialisation failures into the standard error envelope.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::from(Error::invalid_request(format!("invalid JSON body: {err}"))).into()
    })
}

async fn index() -> HttpResponse {
    HttpResponse::Ok().body("DevJobs API is running!")
}

/// Assemble the application with all routes and middleware.
pub fn build_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(state)
        .app_data(json_config())
        .wrap(RequestTracking)
        .route("/", web::get().to(index))
        .service(signup)
        .service(login)
        .service(bulk_upsert_jobs)
        .service(list_jobs)
        .service(create_job)
        .service(get_job)
        .service(update_job)
        .service(delete_job);

    #[cfg(debug_assertions)]
    let app =
        app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}
