//! Job orchestration service.
//!
//! Validates and normalises client payloads against the tag vocabulary, then
//! drives the [`JobRepository`] port. All storage-shape concerns (transactions,
//! find-or-create, link replacement) live behind the port; this service owns
//! the validation rules and the error taxonomy presented to adapters.

use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::domain::ports::{JobPersistenceError, JobRepository};
use crate::domain::{
    BenefitSeed, Error, JobDraft, JobPatch, JobPayload, JobStatus, JobTags, JobTagsPatch,
    JobWithTags, ParseEnumError, RequirementDraft, RequirementInput, RequirementPriority,
    RequirementType, SkillSeed, TagVocabulary,
};

/// Service implementing job create/read/update/delete and bulk upsert.
#[derive(Clone)]
pub struct JobService {
    vocabulary: Arc<TagVocabulary>,
    repository: Arc<dyn JobRepository>,
}

fn map_persistence_error(error: JobPersistenceError) -> Error {
    match error {
        JobPersistenceError::Connection { message } => Error::service_unavailable(message),
        JobPersistenceError::Query { message } => Error::internal(message),
    }
}

fn map_parse_error(error: ParseEnumError) -> Error {
    Error::invalid_request(format!("invalid {} value: {}", error.field, error.value))
        .with_details(json!({
            "field": error.field,
            "value": error.value,
            "allowed": error.allowed,
        }))
}

fn required_text(field: &'static str, value: Option<&str>) -> Result<String, Error> {
    match value {
        Some(raw) if !raw.trim().is_empty() => Ok(raw.to_owned()),
        _ => Err(
            Error::invalid_request(format!("{field} is required"))
                .with_details(json!({ "field": field })),
        ),
    }
}

fn parse_present<T>(value: Option<&str>) -> Result<Option<T>, Error>
where
    T: FromStr<Err = ParseEnumError>,
{
    value
        .map(|raw| raw.parse::<T>().map_err(map_parse_error))
        .transpose()
}

impl JobService {
    /// Create a new service over the vocabulary registry and a repository.
    pub fn new(vocabulary: Arc<TagVocabulary>, repository: Arc<dyn JobRepository>) -> Self {
        Self {
            vocabulary,
            repository,
        }
    }

    /// Validate and persist a new job with its tag sets.
    pub async fn create_job(&self, payload: JobPayload) -> Result<JobWithTags, Error> {
        let (draft, tags) = self.validate_draft(&payload)?;
        self.repository
            .create_job(&draft, &tags)
            .await
            .map_err(map_persistence_error)
    }

    /// Validate and upsert a batch of jobs, sequentially and independently.
    ///
    /// Each entry commits on its own; a failure aborts the remaining entries
    /// while everything already processed stays committed.
    pub async fn bulk_upsert_jobs(
        &self,
        entries: Vec<JobPayload>,
    ) -> Result<Vec<JobWithTags>, Error> {
        let mut processed = Vec::with_capacity(entries.len());
        for (index, payload) in entries.iter().enumerate() {
            let (draft, tags) = self
                .validate_draft(payload)
                .map_err(|err| annotate_entry(err, index))?;
            let job = self
                .repository
                .upsert_job(&draft, &tags)
                .await
                .map_err(map_persistence_error)
                .map_err(|err| annotate_entry(err, index))?;
            processed.push(job);
        }
        Ok(processed)
    }

    /// All jobs with their tag sets.
    pub async fn list_jobs(&self) -> Result<Vec<JobWithTags>, Error> {
        self.repository
            .list_jobs()
            .await
            .map_err(map_persistence_error)
    }

    /// One job with its tag sets.
    pub async fn get_job(&self, id: Uuid) -> Result<JobWithTags, Error> {
        self.repository
            .find_job(id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| job_not_found(id))
    }

    /// Apply a partial update to a job's scalar fields and tag sets.
    pub async fn update_job(&self, id: Uuid, payload: JobPayload) -> Result<JobWithTags, Error> {
        let (patch, tags) = self.validate_patch(&payload)?;
        self.repository
            .update_job(id, &patch, &tags)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| job_not_found(id))
    }

    /// Delete a job, clearing its link sets first. Tag entities survive.
    pub async fn delete_job(&self, id: Uuid) -> Result<(), Error> {
        let deleted = self
            .repository
            .delete_job(id)
            .await
            .map_err(map_persistence_error)?;
        if deleted { Ok(()) } else { Err(job_not_found(id)) }
    }

    /// Validate a full create payload into a draft plus tag sets.
    fn validate_draft(&self, payload: &JobPayload) -> Result<(JobDraft, JobTags), Error> {
        let title = required_text("title", payload.title.as_deref())?;
        let company = required_text("company", payload.company.as_deref())?;
        let location = required_text("location", payload.location.as_deref())?;
        let description = required_text("description", payload.description.as_deref())?;
        let job_type = required_text("jobType", payload.job_type.as_deref())?
            .parse()
            .map_err(map_parse_error)?;
        let category = required_text("category", payload.category.as_deref())?
            .parse()
            .map_err(map_parse_error)?;
        let status = parse_present(payload.status.as_deref())?.unwrap_or(JobStatus::Active);

        let draft = JobDraft {
            title,
            company,
            location,
            description,
            salary: payload.salary.clone(),
            experience: payload.experience.clone().unwrap_or_default(),
            job_type,
            category,
            posted_date: payload.posted_date.unwrap_or_else(Utc::now),
            expiry_date: payload.expiry_date,
            remote: payload.remote.unwrap_or(false),
            status,
        };

        let tags = JobTags {
            skills: self.validate_skills(payload.skills.as_deref().unwrap_or_default())?,
            benefits: self.validate_benefits(payload.benefits.as_deref().unwrap_or_default())?,
            requirements: normalize_requirements(
                payload.requirements.as_deref().unwrap_or_default(),
            )?,
        };

        Ok((draft, tags))
    }

    /// Validate a partial update payload. Absent fields stay untouched;
    /// present fields obey the same rules as the create path.
    fn validate_patch(&self, payload: &JobPayload) -> Result<(JobPatch, JobTagsPatch), Error> {
        for (field, value) in [
            ("title", &payload.title),
            ("company", &payload.company),
            ("location", &payload.location),
            ("description", &payload.description),
        ] {
            if value.as_ref().is_some_and(|v| v.trim().is_empty()) {
                return Err(
                    Error::invalid_request(format!("{field} must not be empty"))
                        .with_details(json!({ "field": field })),
                );
            }
        }

        let patch = JobPatch {
            title: payload.title.clone(),
            company: payload.company.clone(),
            location: payload.location.clone(),
            description: payload.description.clone(),
            salary: payload.salary.clone(),
            experience: payload.experience.clone(),
            job_type: parse_present(payload.job_type.as_deref())?,
            category: parse_present(payload.category.as_deref())?,
            posted_date: payload.posted_date,
            expiry_date: payload.expiry_date,
            remote: payload.remote,
            status: parse_present(payload.status.as_deref())?,
        };

        let tags = JobTagsPatch {
            skills: payload
                .skills
                .as_deref()
                .map(|names| self.validate_skills(names))
                .transpose()?,
            benefits: payload
                .benefits
                .as_deref()
                .map(|names| self.validate_benefits(names))
                .transpose()?,
            requirements: payload
                .requirements
                .as_deref()
                .map(normalize_requirements)
                .transpose()?,
        };

        Ok((patch, tags))
    }

    /// Check every skill name against the vocabulary and derive categories.
    fn validate_skills(&self, names: &[String]) -> Result<Vec<SkillSeed>, Error> {
        let invalid: Vec<&str> = names
            .iter()
            .filter(|name| !self.vocabulary.is_valid_skill(name))
            .map(String::as_str)
            .collect();
        if !invalid.is_empty() {
            return Err(Error::invalid_request("invalid skill values").with_details(json!({
                "invalidSkills": invalid,
                "validSkills": self.vocabulary.skill_names(),
            })));
        }
        names
            .iter()
            .map(|name| {
                let category = self
                    .vocabulary
                    .skill_category(name)
                    .map_err(|err| Error::internal(err.to_string()))?;
                Ok(SkillSeed {
                    name: name.clone(),
                    category,
                })
            })
            .collect()
    }

    /// Check every benefit name against the vocabulary and derive categories.
    fn validate_benefits(&self, names: &[String]) -> Result<Vec<BenefitSeed>, Error> {
        let invalid: Vec<&str> = names
            .iter()
            .filter(|name| !self.vocabulary.is_valid_benefit(name))
            .map(String::as_str)
            .collect();
        if !invalid.is_empty() {
            return Err(
                Error::invalid_request("invalid benefit values").with_details(json!({
                    "invalidBenefits": invalid,
                    "validBenefits": self.vocabulary.benefit_names(),
                })),
            );
        }
        names
            .iter()
            .map(|name| {
                let category = self
                    .vocabulary
                    .benefit_category(name)
                    .map_err(|err| Error::internal(err.to_string()))?;
                Ok(BenefitSeed {
                    name: name.clone(),
                    category,
                })
            })
            .collect()
    }
}

fn job_not_found(id: Uuid) -> Error {
    Error::not_found("job not found").with_details(json!({ "id": id }))
}

fn annotate_entry(error: Error, index: usize) -> Error {
    let details = error.details().cloned();
    let annotated = Error::new(error.code(), format!("entry {index}: {}", error.message()));
    match details {
        Some(details) => annotated.with_details(details),
        None => annotated,
    }
}

/// Normalise submitted requirements: bare strings become other/required
/// entries, objects take defaults for missing type and priority.
fn normalize_requirements(inputs: &[RequirementInput]) -> Result<Vec<RequirementDraft>, Error> {
    inputs
        .iter()
        .map(|input| match input {
            RequirementInput::Text(description) => {
                let description = required_text("requirements.description", Some(description))?;
                Ok(RequirementDraft {
                    description,
                    requirement_type: RequirementType::Other,
                    priority: RequirementPriority::Required,
                    value: None,
                    unit: None,
                })
            }
            RequirementInput::Detailed(fields) => Ok(RequirementDraft {
                description: required_text(
                    "requirements.description",
                    fields.description.as_deref(),
                )?,
                requirement_type: parse_present(fields.requirement_type.as_deref())?
                    .unwrap_or(RequirementType::Other),
                priority: parse_present(fields.priority.as_deref())?
                    .unwrap_or(RequirementPriority::Required),
                value: fields.value.clone(),
                unit: fields.unit.clone(),
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use rstest::rstest;

    use super::*;
    use crate::domain::{ErrorCode, Job, JobCategory, JobType, RequirementFields};

    #[derive(Debug, Clone, PartialEq)]
    enum RepositoryCall {
        Create(JobDraft, JobTags),
        Upsert(JobDraft, JobTags),
        Update(Uuid, JobPatch, JobTagsPatch),
        Delete(Uuid),
    }

    #[derive(Default)]
    struct RecordingJobRepository {
        calls: Mutex<Vec<RepositoryCall>>,
        missing: bool,
        failure: Option<JobPersistenceError>,
    }

    impl RecordingJobRepository {
        fn missing() -> Self {
            Self {
                missing: true,
                ..Self::default()
            }
        }

        fn failing(failure: JobPersistenceError) -> Self {
            Self {
                failure: Some(failure),
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<RepositoryCall> {
            self.calls.lock().expect("calls lock").clone()
        }

        fn record(&self, call: RepositoryCall) -> Result<(), JobPersistenceError> {
            if let Some(failure) = &self.failure {
                return Err(failure.clone());
            }
            self.calls.lock().expect("calls lock").push(call);
            Ok(())
        }
    }

    fn sample_job() -> JobWithTags {
        JobWithTags {
            job: Job {
                id: Uuid::nil(),
                title: "Backend Engineer".into(),
                company: "Acme".into(),
                location: "Remote".into(),
                description: "Build APIs".into(),
                salary: None,
                experience: String::new(),
                job_type: JobType::FullTime,
                category: JobCategory::Backend,
                posted_date: DateTime::<Utc>::UNIX_EPOCH,
                expiry_date: None,
                remote: false,
                status: JobStatus::Active,
                created_at: DateTime::<Utc>::UNIX_EPOCH,
                updated_at: DateTime::<Utc>::UNIX_EPOCH,
            },
            skills: Vec::new(),
            benefits: Vec::new(),
            requirements: Vec::new(),
        }
    }

    #[async_trait]
    impl JobRepository for RecordingJobRepository {
        async fn create_job(
            &self,
            draft: &JobDraft,
            tags: &JobTags,
        ) -> Result<JobWithTags, JobPersistenceError> {
            self.record(RepositoryCall::Create(draft.clone(), tags.clone()))?;
            Ok(sample_job())
        }

        async fn upsert_job(
            &self,
            draft: &JobDraft,
            tags: &JobTags,
        ) -> Result<JobWithTags, JobPersistenceError> {
            self.record(RepositoryCall::Upsert(draft.clone(), tags.clone()))?;
            Ok(sample_job())
        }

        async fn list_jobs(&self) -> Result<Vec<JobWithTags>, JobPersistenceError> {
            if let Some(failure) = &self.failure {
                return Err(failure.clone());
            }
            Ok(vec![sample_job()])
        }

        async fn find_job(
            &self,
            _id: Uuid,
        ) -> Result<Option<JobWithTags>, JobPersistenceError> {
            if let Some(failure) = &self.failure {
                return Err(failure.clone());
            }
            Ok((!self.missing).then(sample_job))
        }

        async fn update_job(
            &self,
            id: Uuid,
            patch: &JobPatch,
            tags: &JobTagsPatch,
        ) -> Result<Option<JobWithTags>, JobPersistenceError> {
            self.record(RepositoryCall::Update(id, patch.clone(), tags.clone()))?;
            Ok((!self.missing).then(sample_job))
        }

        async fn delete_job(&self, id: Uuid) -> Result<bool, JobPersistenceError> {
            self.record(RepositoryCall::Delete(id))?;
            Ok(!self.missing)
        }
    }

    fn service(repository: Arc<RecordingJobRepository>) -> JobService {
        JobService::new(Arc::new(TagVocabulary::new()), repository)
    }

    fn valid_payload() -> JobPayload {
        JobPayload {
            title: Some("Backend Engineer".into()),
            company: Some("Acme".into()),
            location: Some("Remote".into()),
            description: Some("Build APIs".into()),
            job_type: Some("Full-time".into()),
            category: Some("Backend".into()),
            ..JobPayload::default()
        }
    }

    #[rstest]
    #[case("title")]
    #[case("company")]
    #[case("location")]
    #[case("description")]
    #[tokio::test]
    async fn create_requires_non_empty_scalars(#[case] field: &str) {
        let repository = Arc::new(RecordingJobRepository::default());
        let mut payload = valid_payload();
        match field {
            "title" => payload.title = Some("  ".into()),
            "company" => payload.company = None,
            "location" => payload.location = Some(String::new()),
            _ => payload.description = None,
        }

        let err = service(repository.clone())
            .create_job(payload)
            .await
            .expect_err("missing scalar must be rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.details().and_then(|d| d["field"].as_str()), Some(field));
        assert!(repository.calls().is_empty(), "nothing may be persisted");
    }

    #[tokio::test]
    async fn create_rejects_unknown_job_type_with_allowed_set() {
        let repository = Arc::new(RecordingJobRepository::default());
        let mut payload = valid_payload();
        payload.job_type = Some("Gig".into());

        let err = service(repository)
            .create_job(payload)
            .await
            .expect_err("unknown job type must be rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        let allowed = err.details().map(|d| d["allowed"].clone()).expect("details");
        assert!(allowed.as_array().expect("array").len() == 5);
    }

    #[tokio::test]
    async fn create_rejects_unknown_skills_listing_the_valid_set() {
        let repository = Arc::new(RecordingJobRepository::default());
        let mut payload = valid_payload();
        payload.skills = Some(vec!["Node.js".into(), "COBOL".into()]);

        let err = service(repository.clone())
            .create_job(payload)
            .await
            .expect_err("unknown skill must be rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        let details = err.details().expect("details");
        assert_eq!(details["invalidSkills"], json!(["COBOL"]));
        assert_eq!(
            details["validSkills"].as_array().expect("valid set").len(),
            75
        );
        assert!(repository.calls().is_empty());
    }

    #[tokio::test]
    async fn create_derives_tag_categories_from_the_vocabulary() {
        let repository = Arc::new(RecordingJobRepository::default());
        let mut payload = valid_payload();
        payload.skills = Some(vec!["Node.js".into(), "PostgreSQL".into()]);
        payload.benefits = Some(vec!["Health_Insurance".into()]);

        service(repository.clone())
            .create_job(payload)
            .await
            .expect("valid payload");

        let calls = repository.calls();
        let Some(RepositoryCall::Create(_, tags)) = calls.first() else {
            panic!("expected a create call");
        };
        assert_eq!(
            tags.skills,
            vec![
                SkillSeed {
                    name: "Node.js".into(),
                    category: "Backend"
                },
                SkillSeed {
                    name: "PostgreSQL".into(),
                    category: "Database"
                },
            ]
        );
        assert_eq!(
            tags.benefits,
            vec![BenefitSeed {
                name: "Health_Insurance".into(),
                category: "Healthcare"
            }]
        );
    }

    #[tokio::test]
    async fn create_applies_scalar_defaults() {
        let repository = Arc::new(RecordingJobRepository::default());
        service(repository.clone())
            .create_job(valid_payload())
            .await
            .expect("valid payload");

        let calls = repository.calls();
        let Some(RepositoryCall::Create(draft, _)) = calls.first() else {
            panic!("expected a create call");
        };
        assert_eq!(draft.status, JobStatus::Active);
        assert!(!draft.remote);
        assert_eq!(draft.experience, "");
        assert!(draft.salary.is_none());
    }

    #[tokio::test]
    async fn create_normalises_requirements() {
        let repository = Arc::new(RecordingJobRepository::default());
        let mut payload = valid_payload();
        payload.requirements = Some(vec![
            RequirementInput::Text("Ship production Rust".into()),
            RequirementInput::Detailed(RequirementFields {
                description: Some("BSc in CS".into()),
                requirement_type: Some("education".into()),
                priority: Some("preferred".into()),
                value: Some("4".into()),
                unit: Some("years".into()),
            }),
            RequirementInput::Detailed(RequirementFields {
                description: Some("Communicates clearly".into()),
                ..RequirementFields::default()
            }),
        ]);

        service(repository.clone())
            .create_job(payload)
            .await
            .expect("valid payload");

        let calls = repository.calls();
        let Some(RepositoryCall::Create(_, tags)) = calls.first() else {
            panic!("expected a create call");
        };
        assert_eq!(tags.requirements.len(), 3);
        assert_eq!(
            tags.requirements[0],
            RequirementDraft {
                description: "Ship production Rust".into(),
                requirement_type: RequirementType::Other,
                priority: RequirementPriority::Required,
                value: None,
                unit: None,
            }
        );
        assert_eq!(
            tags.requirements[1].requirement_type,
            RequirementType::Education
        );
        assert_eq!(
            tags.requirements[1].priority,
            RequirementPriority::Preferred
        );
        assert_eq!(
            tags.requirements[2].requirement_type,
            RequirementType::Other
        );
        assert_eq!(tags.requirements[2].priority, RequirementPriority::Required);
    }

    #[tokio::test]
    async fn create_rejects_requirement_without_description() {
        let repository = Arc::new(RecordingJobRepository::default());
        let mut payload = valid_payload();
        payload.requirements = Some(vec![RequirementInput::Detailed(
            RequirementFields::default(),
        )]);

        let err = service(repository)
            .create_job(payload)
            .await
            .expect_err("description is required");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn update_with_only_salary_touches_nothing_else() {
        let repository = Arc::new(RecordingJobRepository::default());
        let id = Uuid::new_v4();
        let payload = JobPayload {
            salary: Some("120k".into()),
            ..JobPayload::default()
        };

        service(repository.clone())
            .update_job(id, payload)
            .await
            .expect("update succeeds");

        let calls = repository.calls();
        let Some(RepositoryCall::Update(seen_id, patch, tags)) = calls.first() else {
            panic!("expected an update call");
        };
        assert_eq!(*seen_id, id);
        assert_eq!(
            *patch,
            JobPatch {
                salary: Some("120k".into()),
                ..JobPatch::default()
            }
        );
        assert_eq!(*tags, JobTagsPatch::default());
    }

    #[tokio::test]
    async fn update_rejects_present_but_empty_required_field() {
        let repository = Arc::new(RecordingJobRepository::default());
        let payload = JobPayload {
            title: Some("   ".into()),
            ..JobPayload::default()
        };

        let err = service(repository)
            .update_job(Uuid::new_v4(), payload)
            .await
            .expect_err("blank title must be rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn update_validates_tag_lists_like_create() {
        let repository = Arc::new(RecordingJobRepository::default());
        let payload = JobPayload {
            benefits: Some(vec!["Unlimited_Snacks".into()]),
            ..JobPayload::default()
        };

        let err = service(repository)
            .update_job(Uuid::new_v4(), payload)
            .await
            .expect_err("unknown benefit must be rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        let details = err.details().expect("details");
        assert_eq!(details["invalidBenefits"], json!(["Unlimited_Snacks"]));
    }

    #[tokio::test]
    async fn update_with_empty_skill_list_still_replaces_links() {
        let repository = Arc::new(RecordingJobRepository::default());
        let payload = JobPayload {
            skills: Some(Vec::new()),
            ..JobPayload::default()
        };

        service(repository.clone())
            .update_job(Uuid::new_v4(), payload)
            .await
            .expect("update succeeds");

        let calls = repository.calls();
        let Some(RepositoryCall::Update(_, _, tags)) = calls.first() else {
            panic!("expected an update call");
        };
        assert_eq!(tags.skills, Some(Vec::new()));
        assert_eq!(tags.benefits, None);
    }

    #[tokio::test]
    async fn missing_job_maps_to_not_found() {
        let repository = Arc::new(RecordingJobRepository::missing());
        let svc = service(repository);

        let err = svc.get_job(Uuid::new_v4()).await.expect_err("absent job");
        assert_eq!(err.code(), ErrorCode::NotFound);

        let err = svc
            .update_job(Uuid::new_v4(), JobPayload::default())
            .await
            .expect_err("absent job");
        assert_eq!(err.code(), ErrorCode::NotFound);

        let err = svc
            .delete_job(Uuid::new_v4())
            .await
            .expect_err("absent job");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn bulk_upsert_aborts_on_first_invalid_entry() {
        let repository = Arc::new(RecordingJobRepository::default());
        let mut invalid = valid_payload();
        invalid.category = Some("Gardening".into());
        let entries = vec![valid_payload(), invalid, valid_payload()];

        let err = service(repository.clone())
            .bulk_upsert_jobs(entries)
            .await
            .expect_err("second entry must abort the batch");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert!(err.message().starts_with("entry 1:"));

        let calls = repository.calls();
        assert_eq!(calls.len(), 1, "only the first entry was processed");
        assert!(matches!(calls[0], RepositoryCall::Upsert(..)));
    }

    #[rstest]
    #[case(
        JobPersistenceError::connection("pool exhausted"),
        ErrorCode::ServiceUnavailable
    )]
    #[case(JobPersistenceError::query("syntax error"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn persistence_failures_map_to_domain_codes(
        #[case] failure: JobPersistenceError,
        #[case] expected: ErrorCode,
    ) {
        let repository = Arc::new(RecordingJobRepository::failing(failure));
        let err = service(repository)
            .list_jobs()
            .await
            .expect_err("repository failure surfaces");
        assert_eq!(err.code(), expected);
    }
}
