//! Controlled vocabularies for job tags.
//!
//! Skill and benefit names form closed sets grouped into categories. The
//! category of a tag is always derived from its name through this registry;
//! caller-supplied categories are never trusted. The registry is built once at
//! process start and shared immutably, so concurrent reads need no
//! synchronisation.

use std::collections::HashMap;

/// Skill categories and their member names.
const SKILL_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Programming Language",
        &[
            "JavaScript",
            "Python",
            "Java",
            "C++",
            "C#",
            "Ruby",
            "PHP",
            "Swift",
            "Kotlin",
            "Go",
            "TypeScript",
            "Rust",
            "Scala",
            "R",
        ],
    ),
    (
        "Frontend",
        &[
            "React.js",
            "Angular",
            "Vue.js",
            "Next.js",
            "HTML5",
            "CSS3",
            "SASS",
            "Tailwind",
            "Bootstrap",
            "Material_UI",
            "Redux",
            "jQuery",
        ],
    ),
    (
        "Backend",
        &[
            "Node.js",
            "Express.js",
            "Django",
            "Spring_Boot",
            "Laravel",
            "ASP.NET",
            "Flask",
            "FastAPI",
            "Ruby_on_Rails",
            "NestJS",
        ],
    ),
    (
        "Database",
        &[
            "MongoDB",
            "PostgreSQL",
            "MySQL",
            "Redis",
            "Oracle",
            "SQL_Server",
            "Elasticsearch",
            "Cassandra",
            "DynamoDB",
        ],
    ),
    (
        "Cloud & DevOps",
        &[
            "AWS",
            "Azure",
            "GCP",
            "Docker",
            "Kubernetes",
            "Jenkins",
            "GitLab_CI",
            "Terraform",
            "Ansible",
            "Linux",
        ],
    ),
    (
        "Mobile",
        &["React_Native", "Flutter", "iOS", "Android", "Xamarin"],
    ),
    (
        "AI/ML",
        &["TensorFlow", "PyTorch", "Scikit_learn", "OpenCV", "NLTK"],
    ),
    ("Testing", &["Jest", "Mocha", "Selenium", "Cypress", "JUnit"]),
    (
        "Other",
        &["Git", "GraphQL", "WebSocket", "REST_API", "gRPC"],
    ),
];

/// Benefit categories and their member names.
const BENEFIT_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Healthcare",
        &[
            "Health_Insurance",
            "Dental_Insurance",
            "Vision_Insurance",
            "Life_Insurance",
            "Mental_Health_Coverage",
            "Disability_Insurance",
            "Health_Savings_Account",
            "Wellness_Programs",
        ],
    ),
    (
        "Work-Life Balance",
        &[
            "Flexible_Hours",
            "Remote_Work",
            "Unlimited_PTO",
            "Paid_Vacation",
            "Paid_Sick_Leave",
            "Paid_Parental_Leave",
            "Four_Day_Work_Week",
            "Sabbatical_Leave",
        ],
    ),
    (
        "Financial",
        &[
            "Competitive_Salary",
            "401k_Match",
            "Stock_Options",
            "Performance_Bonus",
            "Sign_On_Bonus",
            "Profit_Sharing",
            "Employee_Discounts",
            "Student_Loan_Assistance",
        ],
    ),
    (
        "Professional Development",
        &[
            "Training_Budget",
            "Conference_Budget",
            "Education_Reimbursement",
            "Professional_Certifications",
            "Career_Coaching",
            "Mentorship_Program",
            "Leadership_Development",
        ],
    ),
    (
        "Lifestyle",
        &[
            "Gym_Membership",
            "Company_Events",
            "Free_Meals",
            "Transportation_Allowance",
            "Phone_Allowance",
            "Internet_Allowance",
            "Child_Care_Benefits",
            "Pet_Friendly_Office",
        ],
    ),
];

/// Error raised when a name is not part of a vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown vocabulary term: {term}")]
pub struct UnknownTermError {
    /// The rejected name.
    pub term: String,
}

impl UnknownTermError {
    fn new(term: impl Into<String>) -> Self {
        Self { term: term.into() }
    }
}

/// Immutable name-to-category registry for skill and benefit tags.
///
/// # Examples
/// ```
/// use backend::domain::TagVocabulary;
///
/// let vocabulary = TagVocabulary::new();
/// assert!(vocabulary.is_valid_skill("Rust"));
/// assert_eq!(vocabulary.skill_category("Node.js"), Ok("Backend"));
/// ```
#[derive(Debug, Clone)]
pub struct TagVocabulary {
    skill_categories: HashMap<&'static str, &'static str>,
    benefit_categories: HashMap<&'static str, &'static str>,
    skill_names: Vec<&'static str>,
    benefit_names: Vec<&'static str>,
}

fn build_lookup(
    groups: &'static [(&'static str, &'static [&'static str])],
) -> (HashMap<&'static str, &'static str>, Vec<&'static str>) {
    let mut lookup = HashMap::new();
    let mut names = Vec::new();
    for (category, members) in groups {
        for name in *members {
            lookup.insert(*name, *category);
            names.push(*name);
        }
    }
    (lookup, names)
}

impl TagVocabulary {
    /// Build the registry from the static category tables.
    pub fn new() -> Self {
        let (skill_categories, skill_names) = build_lookup(SKILL_CATEGORIES);
        let (benefit_categories, benefit_names) = build_lookup(BENEFIT_CATEGORIES);
        Self {
            skill_categories,
            benefit_categories,
            skill_names,
            benefit_names,
        }
    }

    /// Whether `name` is a known skill.
    pub fn is_valid_skill(&self, name: &str) -> bool {
        self.skill_categories.contains_key(name)
    }

    /// Whether `name` is a known benefit.
    pub fn is_valid_benefit(&self, name: &str) -> bool {
        self.benefit_categories.contains_key(name)
    }

    /// Category of the skill `name`, derived from the registry.
    pub fn skill_category(&self, name: &str) -> Result<&'static str, UnknownTermError> {
        self.skill_categories
            .get(name)
            .copied()
            .ok_or_else(|| UnknownTermError::new(name))
    }

    /// Category of the benefit `name`, derived from the registry.
    pub fn benefit_category(&self, name: &str) -> Result<&'static str, UnknownTermError> {
        self.benefit_categories
            .get(name)
            .copied()
            .ok_or_else(|| UnknownTermError::new(name))
    }

    /// All valid skill names in table order, for validation error details.
    pub fn skill_names(&self) -> &[&'static str] {
        &self.skill_names
    }

    /// All valid benefit names in table order, for validation error details.
    pub fn benefit_names(&self) -> &[&'static str] {
        &self.benefit_names
    }
}

impl Default for TagVocabulary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Node.js", "Backend")]
    #[case("PostgreSQL", "Database")]
    #[case("Rust", "Programming Language")]
    #[case("React_Native", "Mobile")]
    #[case("Cypress", "Testing")]
    #[case("gRPC", "Other")]
    fn skill_categories_derive_from_name(#[case] name: &str, #[case] category: &str) {
        let vocabulary = TagVocabulary::new();
        assert_eq!(vocabulary.skill_category(name), Ok(category));
    }

    #[rstest]
    #[case("Health_Insurance", "Healthcare")]
    #[case("Remote_Work", "Work-Life Balance")]
    #[case("401k_Match", "Financial")]
    #[case("Career_Coaching", "Professional Development")]
    #[case("Free_Meals", "Lifestyle")]
    fn benefit_categories_derive_from_name(#[case] name: &str, #[case] category: &str) {
        let vocabulary = TagVocabulary::new();
        assert_eq!(vocabulary.benefit_category(name), Ok(category));
    }

    #[test]
    fn every_listed_skill_is_valid() {
        let vocabulary = TagVocabulary::new();
        for name in vocabulary.skill_names().to_vec() {
            assert!(vocabulary.is_valid_skill(name), "{name} should be valid");
        }
    }

    #[test]
    fn every_listed_benefit_is_valid() {
        let vocabulary = TagVocabulary::new();
        for name in vocabulary.benefit_names().to_vec() {
            assert!(vocabulary.is_valid_benefit(name), "{name} should be valid");
        }
    }

    #[test]
    fn unknown_terms_are_rejected() {
        let vocabulary = TagVocabulary::new();
        assert!(!vocabulary.is_valid_skill("COBOL"));
        assert!(!vocabulary.is_valid_benefit("Unlimited_Snacks"));
        let err = vocabulary
            .skill_category("COBOL")
            .expect_err("unknown skill must be rejected");
        assert_eq!(err.term, "COBOL");
    }

    #[test]
    fn lookup_covers_all_table_entries() {
        let vocabulary = TagVocabulary::new();
        assert_eq!(vocabulary.skill_names().len(), 75);
        assert_eq!(vocabulary.benefit_names().len(), 39);
    }
}
