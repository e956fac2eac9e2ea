//! Domain types and services.
//!
//! Everything in this module is transport and storage agnostic: entities and
//! payloads with their invariants, the tag vocabulary, the two services, and
//! the ports they drive. Adapters live under `inbound` and `outbound`.

pub mod auth_service;
pub mod error;
pub mod job;
pub mod job_service;
pub mod password;
pub mod ports;
pub mod token;
pub mod user;
pub mod vocabulary;

pub use self::auth_service::{AuthService, LoginPayload, SignupPayload};
pub use self::error::{Error, ErrorCode};
pub use self::job::{
    Benefit, BenefitSeed, Job, JobCategory, JobDraft, JobPatch, JobPayload, JobStatus, JobTags,
    JobTagsPatch, JobType, JobWithTags, ParseEnumError, Requirement, RequirementDraft,
    RequirementFields, RequirementInput, RequirementPriority, RequirementType, Skill, SkillSeed,
};
pub use self::job_service::JobService;
pub use self::token::{Claims, TokenSigner};
pub use self::user::{
    CredentialsValidationError, LoginCredentials, NewUser, SignupCredentials, User, UserProfile,
};
pub use self::vocabulary::{TagVocabulary, UnknownTermError};
