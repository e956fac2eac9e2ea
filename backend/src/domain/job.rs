//! Job aggregate and its tag entities.
//!
//! The enums in this module are stored as their wire strings and parsed
//! strictly: an unrecognised value is an error carrying the allowed set,
//! never a silent default.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Error raised when a string does not name a variant of a closed enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field} value: {value}")]
pub struct ParseEnumError {
    /// The field being parsed.
    pub field: &'static str,
    /// The rejected input.
    pub value: String,
    /// All accepted values.
    pub allowed: &'static [&'static str],
}

macro_rules! wire_enum {
    (
        $(#[$outer:meta])*
        $name:ident as $field:literal {
            $( $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
        pub enum $name {
            $( #[serde(rename = $wire)] $variant, )+
        }

        impl $name {
            /// All accepted wire values.
            pub const ALLOWED: &'static [&'static str] = &[ $( $wire, )+ ];

            /// The wire representation of this variant.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $wire, )+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $( $wire => Ok(Self::$variant), )+
                    other => Err(ParseEnumError {
                        field: $field,
                        value: other.to_owned(),
                        allowed: Self::ALLOWED,
                    }),
                }
            }
        }
    };
}

wire_enum! {
    /// Employment arrangement of a posting.
    JobType as "jobType" {
        FullTime => "Full-time",
        PartTime => "Part-time",
        Contract => "Contract",
        Internship => "Internship",
        Freelance => "Freelance",
    }
}

wire_enum! {
    /// Discipline a posting belongs to.
    JobCategory as "category" {
        Frontend => "Frontend",
        Backend => "Backend",
        FullStack => "Full Stack",
        DevOps => "DevOps",
        Mobile => "Mobile",
        DataScience => "Data Science",
        AiMl => "AI/ML",
        Qa => "QA",
        UiUx => "UI/UX",
        Other => "Other",
    }
}

wire_enum! {
    /// Lifecycle state of a posting.
    JobStatus as "status" {
        Active => "Active",
        Closed => "Closed",
        Draft => "Draft",
    }
}

wire_enum! {
    /// Kind of a job requirement.
    RequirementType as "type" {
        Education => "education",
        Experience => "experience",
        Technical => "technical",
        Certification => "certification",
        SoftSkill => "soft_skill",
        Other => "other",
    }
}

wire_enum! {
    /// How strongly a requirement is weighted.
    RequirementPriority as "priority" {
        Required => "required",
        Preferred => "preferred",
        Bonus => "bonus",
    }
}

/// A job posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// Stable identifier.
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    /// Free-text experience expectation, e.g. "3-5 years".
    pub experience: String,
    pub job_type: JobType,
    pub category: JobCategory,
    pub posted_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<DateTime<Utc>>,
    pub remote: bool,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A reusable skill tag. The category is always derived from the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: Uuid,
    #[schema(example = "Node.js")]
    pub name: String,
    #[schema(example = "Backend")]
    pub category: String,
}

/// A reusable benefit tag. The category is always derived from the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Benefit {
    pub id: Uuid,
    #[schema(example = "Health_Insurance")]
    pub name: String,
    #[schema(example = "Healthcare")]
    pub category: String,
}

/// A free-text requirement attached to one job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    pub id: Uuid,
    pub description: String,
    #[serde(rename = "type")]
    pub requirement_type: RequirementType,
    pub priority: RequirementPriority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// A job with its tag sets eagerly attached, junction metadata stripped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobWithTags {
    #[serde(flatten)]
    pub job: Job,
    pub skills: Vec<Skill>,
    pub benefits: Vec<Benefit>,
    pub requirements: Vec<Requirement>,
}

/// Client-supplied job fields, shared by the create, bulk, and update paths.
///
/// Every field is optional at this level; the job service decides which are
/// required for the operation at hand. Enum-typed fields arrive as strings so
/// that validation failures surface as domain errors naming the allowed set
/// instead of opaque deserialisation failures.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobPayload {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub salary: Option<String>,
    pub experience: Option<String>,
    #[schema(example = "Full-time")]
    pub job_type: Option<String>,
    #[schema(example = "Backend")]
    pub category: Option<String>,
    pub posted_date: Option<DateTime<Utc>>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub remote: Option<bool>,
    #[schema(example = "Active")]
    pub status: Option<String>,
    pub skills: Option<Vec<String>>,
    pub benefits: Option<Vec<String>>,
    pub requirements: Option<Vec<RequirementInput>>,
}

/// A requirement as submitted by clients: either a bare description string or
/// an object with typed metadata.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum RequirementInput {
    /// Bare description, normalised to `type: other`, `priority: required`.
    Text(String),
    /// Structured requirement; missing `type`/`priority` take the defaults.
    Detailed(RequirementFields),
}

/// Structured requirement fields as submitted by clients.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequirementFields {
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub requirement_type: Option<String>,
    pub priority: Option<String>,
    pub value: Option<String>,
    pub unit: Option<String>,
}

/// Validated scalar fields for a job row about to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct JobDraft {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub salary: Option<String>,
    pub experience: String,
    pub job_type: JobType,
    pub category: JobCategory,
    pub posted_date: DateTime<Utc>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub remote: bool,
    pub status: JobStatus,
}

/// Validated partial update for a job's scalar fields.
///
/// `None` means "leave untouched"; there is no way to null a field out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobPatch {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub salary: Option<String>,
    pub experience: Option<String>,
    pub job_type: Option<JobType>,
    pub category: Option<JobCategory>,
    pub posted_date: Option<DateTime<Utc>>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub remote: Option<bool>,
    pub status: Option<JobStatus>,
}

impl JobPatch {
    /// Whether any scalar field is present.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.company.is_none()
            && self.location.is_none()
            && self.description.is_none()
            && self.salary.is_none()
            && self.experience.is_none()
            && self.job_type.is_none()
            && self.category.is_none()
            && self.posted_date.is_none()
            && self.expiry_date.is_none()
            && self.remote.is_none()
            && self.status.is_none()
    }
}

/// A vocabulary-validated skill about to be resolved or created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillSeed {
    pub name: String,
    /// Derived from the vocabulary registry, never caller-supplied.
    pub category: &'static str,
}

/// A vocabulary-validated benefit about to be resolved or created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenefitSeed {
    pub name: String,
    /// Derived from the vocabulary registry, never caller-supplied.
    pub category: &'static str,
}

/// A normalised requirement about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementDraft {
    pub description: String,
    pub requirement_type: RequirementType,
    pub priority: RequirementPriority,
    pub value: Option<String>,
    pub unit: Option<String>,
}

/// Validated tag sets for a create or bulk-upsert operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobTags {
    pub skills: Vec<SkillSeed>,
    pub benefits: Vec<BenefitSeed>,
    pub requirements: Vec<RequirementDraft>,
}

/// Validated tag replacements for an update operation.
///
/// `None` leaves the corresponding link set untouched; `Some` replaces it
/// entirely, even when the list is empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobTagsPatch {
    pub skills: Option<Vec<SkillSeed>>,
    pub benefits: Option<Vec<BenefitSeed>>,
    pub requirements: Option<Vec<RequirementDraft>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Full-time", JobType::FullTime)]
    #[case("Freelance", JobType::Freelance)]
    fn job_type_parses_wire_values(#[case] wire: &str, #[case] expected: JobType) {
        assert_eq!(wire.parse::<JobType>(), Ok(expected));
        assert_eq!(expected.as_str(), wire);
    }

    #[rstest]
    #[case("Full Stack", JobCategory::FullStack)]
    #[case("AI/ML", JobCategory::AiMl)]
    #[case("UI/UX", JobCategory::UiUx)]
    fn category_parses_wire_values(#[case] wire: &str, #[case] expected: JobCategory) {
        assert_eq!(wire.parse::<JobCategory>(), Ok(expected));
        assert_eq!(expected.as_str(), wire);
    }

    #[test]
    fn unrecognised_enum_values_are_rejected_with_allowed_set() {
        let err = "full-time"
            .parse::<JobType>()
            .expect_err("lowercase spelling must not be coerced");
        assert_eq!(err.field, "jobType");
        assert_eq!(err.value, "full-time");
        assert!(err.allowed.contains(&"Full-time"));

        let err = "open"
            .parse::<JobStatus>()
            .expect_err("unknown status must be rejected");
        assert_eq!(err.allowed, JobStatus::ALLOWED);
    }

    #[test]
    fn requirement_enums_use_snake_case_wire_values() {
        assert_eq!(
            "soft_skill".parse::<RequirementType>(),
            Ok(RequirementType::SoftSkill)
        );
        assert_eq!(
            "preferred".parse::<RequirementPriority>(),
            Ok(RequirementPriority::Preferred)
        );
    }

    #[test]
    fn requirement_input_deserialises_both_shapes() {
        let bare: RequirementInput =
            serde_json::from_value(serde_json::json!("5 years of Rust")).expect("bare string");
        assert!(matches!(bare, RequirementInput::Text(ref s) if s == "5 years of Rust"));

        let detailed: RequirementInput = serde_json::from_value(serde_json::json!({
            "description": "BSc in CS",
            "type": "education",
            "priority": "preferred"
        }))
        .expect("detailed object");
        let RequirementInput::Detailed(fields) = detailed else {
            panic!("expected detailed variant");
        };
        assert_eq!(fields.description.as_deref(), Some("BSc in CS"));
        assert_eq!(fields.requirement_type.as_deref(), Some("education"));
    }

    #[test]
    fn job_serialises_enums_as_wire_strings() {
        let job = Job {
            id: Uuid::nil(),
            title: "Backend Engineer".into(),
            company: "Acme".into(),
            location: "Remote".into(),
            description: "Build APIs".into(),
            salary: None,
            experience: "3+ years".into(),
            job_type: JobType::FullTime,
            category: JobCategory::Backend,
            posted_date: DateTime::<Utc>::UNIX_EPOCH,
            expiry_date: None,
            remote: true,
            status: JobStatus::Active,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            updated_at: DateTime::<Utc>::UNIX_EPOCH,
        };
        let value = serde_json::to_value(&job).expect("serializable job");
        assert_eq!(value["jobType"], "Full-time");
        assert_eq!(value["category"], "Backend");
        assert_eq!(value["status"], "Active");
        assert!(value.get("salary").is_none());
    }
}
