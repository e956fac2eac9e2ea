//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match the migrations exactly; regenerate with
//! `diesel print-schema` after schema changes.

diesel::table! {
    /// Registered users.
    users (id) {
        id -> Uuid,
        username -> Varchar,
        email -> Varchar,
        password_hash -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Job postings.
    jobs (id) {
        id -> Uuid,
        title -> Varchar,
        company -> Varchar,
        location -> Varchar,
        description -> Text,
        salary -> Nullable<Varchar>,
        experience -> Varchar,
        job_type -> Varchar,
        category -> Varchar,
        posted_date -> Timestamptz,
        expiry_date -> Nullable<Timestamptz>,
        remote -> Bool,
        status -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Shared skill tags, unique by name.
    skills (id) {
        id -> Uuid,
        name -> Varchar,
        category -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Shared benefit tags, unique by name.
    benefits (id) {
        id -> Uuid,
        name -> Varchar,
        category -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Per-job requirements, created fresh for every association.
    requirements (id) {
        id -> Uuid,
        description -> Varchar,
        requirement_type -> Varchar,
        priority -> Varchar,
        value -> Nullable<Varchar>,
        unit -> Nullable<Varchar>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Job to skill links.
    job_skills (id) {
        id -> Uuid,
        job_id -> Uuid,
        skill_id -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Job to benefit links.
    job_benefits (id) {
        id -> Uuid,
        job_id -> Uuid,
        benefit_id -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Job to requirement links.
    job_requirements (id) {
        id -> Uuid,
        job_id -> Uuid,
        requirement_id -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(job_skills -> jobs (job_id));
diesel::joinable!(job_skills -> skills (skill_id));
diesel::joinable!(job_benefits -> jobs (job_id));
diesel::joinable!(job_benefits -> benefits (benefit_id));
diesel::joinable!(job_requirements -> jobs (job_id));
diesel::joinable!(job_requirements -> requirements (requirement_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    jobs,
    skills,
    benefits,
    requirements,
    job_skills,
    job_benefits,
    job_requirements,
);
