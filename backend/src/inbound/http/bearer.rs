//! Bearer-token access guard for protected routes.
//!
//! [`AuthenticatedUser`] is an extractor: adding it to a handler's signature
//! gates the route. The token is read from the `Authorization` header,
//! verified against the configured signer, and the decoded user id handed to
//! the handler. Reads stay public by simply not taking the extractor.

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::{Ready, ready};
use uuid::Uuid;

use crate::domain::Error;
use crate::inbound::http::error::ApiError;
use crate::inbound::http::state::HttpState;

/// Identity decoded from a valid bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Subject of the verified token.
    pub user_id: Uuid,
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("http state is not configured"))?;

    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("missing authorization header"))?;
    let raw = header
        .to_str()
        .map_err(|_| Error::unauthorized("malformed authorization header"))?;
    let token = raw
        .strip_prefix("Bearer ")
        .ok_or_else(|| Error::unauthorized("authorization header must use the Bearer scheme"))?;
    if token.trim().is_empty() {
        return Err(Error::unauthorized("missing bearer token"));
    }

    let claims = state.tokens.verify(token)?;
    Ok(AuthenticatedUser {
        user_id: claims.sub,
    })
}

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).map_err(ApiError::from))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test};
    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::{
        JobPersistenceError, JobRepository, UserPersistenceError, UserRepository,
    };
    use crate::domain::{
        AuthService, JobDraft, JobPatch, JobService, JobTags, JobTagsPatch, JobWithTags, NewUser,
        TagVocabulary, TokenSigner, User,
    };

    struct UnusedJobRepository;

    #[async_trait]
    impl JobRepository for UnusedJobRepository {
        async fn create_job(
            &self,
            _draft: &JobDraft,
            _tags: &JobTags,
        ) -> Result<JobWithTags, JobPersistenceError> {
            Err(JobPersistenceError::query("unused"))
        }

        async fn upsert_job(
            &self,
            _draft: &JobDraft,
            _tags: &JobTags,
        ) -> Result<JobWithTags, JobPersistenceError> {
            Err(JobPersistenceError::query("unused"))
        }

        async fn list_jobs(&self) -> Result<Vec<JobWithTags>, JobPersistenceError> {
            Ok(Vec::new())
        }

        async fn find_job(
            &self,
            _id: Uuid,
        ) -> Result<Option<JobWithTags>, JobPersistenceError> {
            Ok(None)
        }

        async fn update_job(
            &self,
            _id: Uuid,
            _patch: &JobPatch,
            _tags: &JobTagsPatch,
        ) -> Result<Option<JobWithTags>, JobPersistenceError> {
            Ok(None)
        }

        async fn delete_job(&self, _id: Uuid) -> Result<bool, JobPersistenceError> {
            Ok(false)
        }
    }

    struct UnusedUserRepository;

    #[async_trait]
    impl UserRepository for UnusedUserRepository {
        async fn create_user(&self, _user: &NewUser) -> Result<User, UserPersistenceError> {
            Err(UserPersistenceError::query("unused"))
        }

        async fn find_by_email(
            &self,
            _email: &str,
        ) -> Result<Option<User>, UserPersistenceError> {
            Ok(None)
        }
    }

    fn state(signer: Arc<TokenSigner>) -> web::Data<HttpState> {
        let vocabulary = Arc::new(TagVocabulary::new());
        web::Data::new(HttpState::new(
            Arc::new(AuthService::new(
                Arc::new(UnusedUserRepository),
                signer.clone(),
            )),
            Arc::new(JobService::new(vocabulary, Arc::new(UnusedJobRepository))),
            signer,
        ))
    }

    async fn call_protected(authorization: Option<&str>, signer: Arc<TokenSigner>) -> StatusCode {
        let app = test::init_service(App::new().app_data(state(signer)).route(
            "/protected",
            web::get().to(|user: AuthenticatedUser| async move {
                HttpResponse::Ok().body(user.user_id.to_string())
            }),
        ))
        .await;

        let mut request = test::TestRequest::get().uri("/protected");
        if let Some(value) = authorization {
            request = request.insert_header((AUTHORIZATION, value));
        }
        test::call_service(&app, request.to_request()).await.status()
    }

    #[actix_web::test]
    async fn valid_tokens_are_accepted() {
        let signer = Arc::new(TokenSigner::new("test-secret"));
        let token = signer.issue(Uuid::new_v4()).expect("token issued");
        let status = call_protected(Some(&format!("Bearer {token}")), signer).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[rstest]
    #[case(None)]
    #[case(Some("Basic dXNlcjpwdw=="))]
    #[case(Some("Bearer "))]
    #[case(Some("Bearer not.a.token"))]
    #[actix_web::test]
    async fn invalid_headers_are_unauthorized(#[case] authorization: Option<&str>) {
        let signer = Arc::new(TokenSigner::new("test-secret"));
        let status = call_protected(authorization, signer).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn expired_tokens_are_unauthorized() {
        let signer = Arc::new(TokenSigner::new("test-secret"));
        let token = signer
            .issue_at(Uuid::new_v4(), Utc::now() - Duration::hours(2))
            .expect("token issued");
        let status = call_protected(Some(&format!("Bearer {token}")), signer).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn tokens_from_another_secret_are_unauthorized() {
        let signer = Arc::new(TokenSigner::new("test-secret"));
        let foreign = TokenSigner::new("other-secret")
            .issue(Uuid::new_v4())
            .expect("token issued");
        let status = call_protected(Some(&format!("Bearer {foreign}")), signer).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
