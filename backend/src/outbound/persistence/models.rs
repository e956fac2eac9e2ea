//! Internal Diesel row structs.
//!
//! Implementation details of the persistence layer; never exposed to the
//! domain. Conversions into domain types live next to each repository.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{
    benefits, job_benefits, job_requirements, job_skills, jobs, requirements, skills, users,
};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

/// Row struct for reading from the jobs table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = jobs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct JobRow {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub salary: Option<String>,
    pub experience: String,
    pub job_type: String,
    pub category: String,
    pub posted_date: DateTime<Utc>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub remote: bool,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating job records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = jobs)]
pub(crate) struct NewJobRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub company: &'a str,
    pub location: &'a str,
    pub description: &'a str,
    pub salary: Option<&'a str>,
    pub experience: &'a str,
    pub job_type: &'a str,
    pub category: &'a str,
    pub posted_date: DateTime<Utc>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub remote: bool,
    pub status: &'a str,
}

/// Changeset for partial job updates; `None` fields are left untouched.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = jobs)]
pub(crate) struct JobChangeset<'a> {
    pub title: Option<&'a str>,
    pub company: Option<&'a str>,
    pub location: Option<&'a str>,
    pub description: Option<&'a str>,
    pub salary: Option<&'a str>,
    pub experience: Option<&'a str>,
    pub job_type: Option<&'a str>,
    pub category: Option<&'a str>,
    pub posted_date: Option<DateTime<Utc>>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub remote: Option<bool>,
    pub status: Option<&'a str>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Row struct for reading from the skills table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = skills)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SkillRow {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    #[expect(dead_code, reason = "junction metadata is stripped from responses")]
    pub created_at: DateTime<Utc>,
    #[expect(dead_code, reason = "junction metadata is stripped from responses")]
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating skill records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = skills)]
pub(crate) struct NewSkillRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub category: &'a str,
}

/// Row struct for reading from the benefits table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = benefits)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BenefitRow {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    #[expect(dead_code, reason = "junction metadata is stripped from responses")]
    pub created_at: DateTime<Utc>,
    #[expect(dead_code, reason = "junction metadata is stripped from responses")]
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating benefit records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = benefits)]
pub(crate) struct NewBenefitRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub category: &'a str,
}

/// Row struct for reading from the requirements table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = requirements)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RequirementRow {
    pub id: Uuid,
    pub description: String,
    pub requirement_type: String,
    pub priority: String,
    pub value: Option<String>,
    pub unit: Option<String>,
    #[expect(dead_code, reason = "junction metadata is stripped from responses")]
    pub created_at: DateTime<Utc>,
    #[expect(dead_code, reason = "junction metadata is stripped from responses")]
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating requirement records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = requirements)]
pub(crate) struct NewRequirementRow<'a> {
    pub id: Uuid,
    pub description: &'a str,
    pub requirement_type: &'a str,
    pub priority: &'a str,
    pub value: Option<&'a str>,
    pub unit: Option<&'a str>,
}

/// Insertable struct for job-skill links.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = job_skills)]
pub(crate) struct NewJobSkillRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub skill_id: Uuid,
}

/// Insertable struct for job-benefit links.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = job_benefits)]
pub(crate) struct NewJobBenefitRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub benefit_id: Uuid,
}

/// Insertable struct for job-requirement links.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = job_requirements)]
pub(crate) struct NewJobRequirementRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub requirement_id: Uuid,
}
