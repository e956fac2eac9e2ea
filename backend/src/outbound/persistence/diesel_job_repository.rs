//! PostgreSQL-backed `JobRepository` implementation using Diesel.
//!
//! Every mutation runs in one transaction: the job row, resolved tag
//! entities, and link rows commit or roll back together, so a failure can
//! never leave orphaned links behind. Skills and benefits are resolved
//! find-or-create by name; requirement rows are always created fresh and are
//! deliberately left in place when unlinked.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{JobPersistenceError, JobRepository};
use crate::domain::{
    Benefit, BenefitSeed, Job, JobDraft, JobPatch, JobTags, JobTagsPatch, JobWithTags,
    Requirement, RequirementDraft, Skill, SkillSeed,
};

use super::models::{
    BenefitRow, JobChangeset, JobRow, NewBenefitRow, NewJobBenefitRow, NewJobRequirementRow,
    NewJobRow, NewJobSkillRow, NewRequirementRow, NewSkillRow, RequirementRow, SkillRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{benefits, job_benefits, job_requirements, job_skills, jobs, requirements, skills};

/// Diesel-backed implementation of the `JobRepository` port.
#[derive(Clone)]
pub struct DieselJobRepository {
    pool: DbPool,
}

impl DieselJobRepository {
    /// Create a new repository over the shared connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Failures inside a transaction: either the database itself, or a stored
/// value that no longer satisfies a domain invariant.
#[derive(Debug)]
enum TxError {
    Db(diesel::result::Error),
    Corrupt(String),
}

impl From<diesel::result::Error> for TxError {
    fn from(error: diesel::result::Error) -> Self {
        Self::Db(error)
    }
}

fn map_pool_error(error: PoolError) -> JobPersistenceError {
    match error {
        PoolError::Build { message } | PoolError::Checkout { message } => {
            JobPersistenceError::connection(message)
        }
    }
}

fn map_tx_error(error: TxError) -> JobPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        TxError::Db(error) => {
            debug!(%error, "diesel operation failed");
            match error {
                DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
                    JobPersistenceError::connection("database connection error")
                }
                _ => JobPersistenceError::query("database error"),
            }
        }
        TxError::Corrupt(message) => JobPersistenceError::query(message),
    }
}

fn row_to_job(row: JobRow) -> Result<Job, TxError> {
    let corrupt = |field: &str, value: &str| {
        TxError::Corrupt(format!("stored job has invalid {field} value: {value}"))
    };
    Ok(Job {
        id: row.id,
        job_type: row
            .job_type
            .parse()
            .map_err(|_| corrupt("job_type", &row.job_type))?,
        category: row
            .category
            .parse()
            .map_err(|_| corrupt("category", &row.category))?,
        status: row
            .status
            .parse()
            .map_err(|_| corrupt("status", &row.status))?,
        title: row.title,
        company: row.company,
        location: row.location,
        description: row.description,
        salary: row.salary,
        experience: row.experience,
        posted_date: row.posted_date,
        expiry_date: row.expiry_date,
        remote: row.remote,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn row_to_skill(row: SkillRow) -> Skill {
    Skill {
        id: row.id,
        name: row.name,
        category: row.category,
    }
}

fn row_to_benefit(row: BenefitRow) -> Benefit {
    Benefit {
        id: row.id,
        name: row.name,
        category: row.category,
    }
}

fn row_to_requirement(row: RequirementRow) -> Result<Requirement, TxError> {
    let corrupt = |field: &str, value: &str| {
        TxError::Corrupt(format!("stored requirement has invalid {field} value: {value}"))
    };
    Ok(Requirement {
        id: row.id,
        requirement_type: row
            .requirement_type
            .parse()
            .map_err(|_| corrupt("type", &row.requirement_type))?,
        priority: row
            .priority
            .parse()
            .map_err(|_| corrupt("priority", &row.priority))?,
        description: row.description,
        value: row.value,
        unit: row.unit,
    })
}

/// Resolve a skill by name, creating it when absent.
async fn resolve_skill(
    conn: &mut AsyncPgConnection,
    seed: &SkillSeed,
) -> Result<Uuid, TxError> {
    let existing = skills::table
        .filter(skills::name.eq(&seed.name))
        .select(skills::id)
        .first::<Uuid>(conn)
        .await
        .optional()?;
    if let Some(id) = existing {
        return Ok(id);
    }
    diesel::insert_into(skills::table)
        .values(&NewSkillRow {
            id: Uuid::new_v4(),
            name: &seed.name,
            category: seed.category,
        })
        .on_conflict(skills::name)
        .do_nothing()
        .execute(conn)
        .await?;
    Ok(skills::table
        .filter(skills::name.eq(&seed.name))
        .select(skills::id)
        .first::<Uuid>(conn)
        .await?)
}

/// Resolve a benefit by name, creating it when absent.
async fn resolve_benefit(
    conn: &mut AsyncPgConnection,
    seed: &BenefitSeed,
) -> Result<Uuid, TxError> {
    let existing = benefits::table
        .filter(benefits::name.eq(&seed.name))
        .select(benefits::id)
        .first::<Uuid>(conn)
        .await
        .optional()?;
    if let Some(id) = existing {
        return Ok(id);
    }
    diesel::insert_into(benefits::table)
        .values(&NewBenefitRow {
            id: Uuid::new_v4(),
            name: &seed.name,
            category: seed.category,
        })
        .on_conflict(benefits::name)
        .do_nothing()
        .execute(conn)
        .await?;
    Ok(benefits::table
        .filter(benefits::name.eq(&seed.name))
        .select(benefits::id)
        .first::<Uuid>(conn)
        .await?)
}

/// Insert job-skill links for the given seeds.
async fn insert_skill_links(
    conn: &mut AsyncPgConnection,
    job_id: Uuid,
    seeds: &[SkillSeed],
) -> Result<(), TxError> {
    let mut rows = Vec::with_capacity(seeds.len());
    for seed in seeds {
        let skill_id = resolve_skill(conn, seed).await?;
        rows.push(NewJobSkillRow {
            id: Uuid::new_v4(),
            job_id,
            skill_id,
        });
    }
    if !rows.is_empty() {
        diesel::insert_into(job_skills::table)
            .values(&rows)
            .execute(conn)
            .await?;
    }
    Ok(())
}

/// Insert job-benefit links for the given seeds.
async fn insert_benefit_links(
    conn: &mut AsyncPgConnection,
    job_id: Uuid,
    seeds: &[BenefitSeed],
) -> Result<(), TxError> {
    let mut rows = Vec::with_capacity(seeds.len());
    for seed in seeds {
        let benefit_id = resolve_benefit(conn, seed).await?;
        rows.push(NewJobBenefitRow {
            id: Uuid::new_v4(),
            job_id,
            benefit_id,
        });
    }
    if !rows.is_empty() {
        diesel::insert_into(job_benefits::table)
            .values(&rows)
            .execute(conn)
            .await?;
    }
    Ok(())
}

/// Create fresh requirement rows and link them to the job.
async fn insert_requirement_links(
    conn: &mut AsyncPgConnection,
    job_id: Uuid,
    drafts: &[RequirementDraft],
) -> Result<(), TxError> {
    if drafts.is_empty() {
        return Ok(());
    }
    let requirement_rows: Vec<NewRequirementRow<'_>> = drafts
        .iter()
        .map(|draft| NewRequirementRow {
            id: Uuid::new_v4(),
            description: &draft.description,
            requirement_type: draft.requirement_type.as_str(),
            priority: draft.priority.as_str(),
            value: draft.value.as_deref(),
            unit: draft.unit.as_deref(),
        })
        .collect();
    diesel::insert_into(requirements::table)
        .values(&requirement_rows)
        .execute(conn)
        .await?;

    let link_rows: Vec<NewJobRequirementRow> = requirement_rows
        .iter()
        .map(|row| NewJobRequirementRow {
            id: Uuid::new_v4(),
            job_id,
            requirement_id: row.id,
        })
        .collect();
    diesel::insert_into(job_requirements::table)
        .values(&link_rows)
        .execute(conn)
        .await?;
    Ok(())
}

/// Replace the job's skill link set.
async fn replace_skill_links(
    conn: &mut AsyncPgConnection,
    job_id: Uuid,
    seeds: &[SkillSeed],
) -> Result<(), TxError> {
    diesel::delete(job_skills::table.filter(job_skills::job_id.eq(job_id)))
        .execute(conn)
        .await?;
    insert_skill_links(conn, job_id, seeds).await
}

/// Replace the job's benefit link set.
async fn replace_benefit_links(
    conn: &mut AsyncPgConnection,
    job_id: Uuid,
    seeds: &[BenefitSeed],
) -> Result<(), TxError> {
    diesel::delete(job_benefits::table.filter(job_benefits::job_id.eq(job_id)))
        .execute(conn)
        .await?;
    insert_benefit_links(conn, job_id, seeds).await
}

/// Replace the job's requirement link set with freshly created rows.
///
/// Unlinked requirement rows stay behind; they are job-specific free text and
/// nothing else references them.
async fn replace_requirement_links(
    conn: &mut AsyncPgConnection,
    job_id: Uuid,
    drafts: &[RequirementDraft],
) -> Result<(), TxError> {
    diesel::delete(job_requirements::table.filter(job_requirements::job_id.eq(job_id)))
        .execute(conn)
        .await?;
    insert_requirement_links(conn, job_id, drafts).await
}

/// Attach the three tag sets to the given job rows.
async fn load_tags(
    conn: &mut AsyncPgConnection,
    rows: Vec<JobRow>,
) -> Result<Vec<JobWithTags>, TxError> {
    let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();

    let mut skills_by_job: HashMap<Uuid, Vec<Skill>> = HashMap::new();
    let skill_pairs: Vec<(Uuid, SkillRow)> = job_skills::table
        .inner_join(skills::table)
        .filter(job_skills::job_id.eq_any(ids.clone()))
        .order(job_skills::created_at.asc())
        .select((job_skills::job_id, SkillRow::as_select()))
        .load(conn)
        .await?;
    for (job_id, row) in skill_pairs {
        skills_by_job.entry(job_id).or_default().push(row_to_skill(row));
    }

    let mut benefits_by_job: HashMap<Uuid, Vec<Benefit>> = HashMap::new();
    let benefit_pairs: Vec<(Uuid, BenefitRow)> = job_benefits::table
        .inner_join(benefits::table)
        .filter(job_benefits::job_id.eq_any(ids.clone()))
        .order(job_benefits::created_at.asc())
        .select((job_benefits::job_id, BenefitRow::as_select()))
        .load(conn)
        .await?;
    for (job_id, row) in benefit_pairs {
        benefits_by_job
            .entry(job_id)
            .or_default()
            .push(row_to_benefit(row));
    }

    let mut requirements_by_job: HashMap<Uuid, Vec<Requirement>> = HashMap::new();
    let requirement_pairs: Vec<(Uuid, RequirementRow)> = job_requirements::table
        .inner_join(requirements::table)
        .filter(job_requirements::job_id.eq_any(ids.clone()))
        .order(job_requirements::created_at.asc())
        .select((job_requirements::job_id, RequirementRow::as_select()))
        .load(conn)
        .await?;
    for (job_id, row) in requirement_pairs {
        requirements_by_job
            .entry(job_id)
            .or_default()
            .push(row_to_requirement(row)?);
    }

    rows.into_iter()
        .map(|row| {
            let job_id = row.id;
            Ok(JobWithTags {
                job: row_to_job(row)?,
                skills: skills_by_job.remove(&job_id).unwrap_or_default(),
                benefits: benefits_by_job.remove(&job_id).unwrap_or_default(),
                requirements: requirements_by_job.remove(&job_id).unwrap_or_default(),
            })
        })
        .collect()
}

/// Load one job with tags, or `None` when absent.
async fn load_job(
    conn: &mut AsyncPgConnection,
    id: Uuid,
) -> Result<Option<JobWithTags>, TxError> {
    let row = jobs::table
        .find(id)
        .select(JobRow::as_select())
        .first(conn)
        .await
        .optional()?;
    match row {
        Some(row) => Ok(load_tags(conn, vec![row]).await?.pop()),
        None => Ok(None),
    }
}

/// Load one job that is known to exist inside the current transaction.
async fn load_existing_job(
    conn: &mut AsyncPgConnection,
    id: Uuid,
) -> Result<JobWithTags, TxError> {
    load_job(conn, id)
        .await?
        .ok_or_else(|| TxError::Corrupt(format!("job {id} vanished mid-transaction")))
}

fn new_job_row<'a>(id: Uuid, draft: &'a JobDraft) -> NewJobRow<'a> {
    NewJobRow {
        id,
        title: &draft.title,
        company: &draft.company,
        location: &draft.location,
        description: &draft.description,
        salary: draft.salary.as_deref(),
        experience: &draft.experience,
        job_type: draft.job_type.as_str(),
        category: draft.category.as_str(),
        posted_date: draft.posted_date,
        expiry_date: draft.expiry_date,
        remote: draft.remote,
        status: draft.status.as_str(),
    }
}

fn changeset_from_patch<'a>(patch: &'a JobPatch) -> JobChangeset<'a> {
    JobChangeset {
        title: patch.title.as_deref(),
        company: patch.company.as_deref(),
        location: patch.location.as_deref(),
        description: patch.description.as_deref(),
        salary: patch.salary.as_deref(),
        experience: patch.experience.as_deref(),
        job_type: patch.job_type.map(|v| v.as_str()),
        category: patch.category.map(|v| v.as_str()),
        posted_date: patch.posted_date,
        expiry_date: patch.expiry_date,
        remote: patch.remote,
        status: patch.status.map(|v| v.as_str()),
        updated_at: Some(chrono::Utc::now()),
    }
}

#[async_trait]
impl JobRepository for DieselJobRepository {
    async fn create_job(
        &self,
        draft: &JobDraft,
        tags: &JobTags,
    ) -> Result<JobWithTags, JobPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let job_id = Uuid::new_v4();
        conn.transaction(|conn| {
            async move {
                diesel::insert_into(jobs::table)
                    .values(&new_job_row(job_id, draft))
                    .execute(conn)
                    .await?;
                insert_skill_links(conn, job_id, &tags.skills).await?;
                insert_benefit_links(conn, job_id, &tags.benefits).await?;
                insert_requirement_links(conn, job_id, &tags.requirements).await?;
                load_existing_job(conn, job_id).await
            }
            .scope_boxed()
        })
        .await
        .map_err(map_tx_error)
    }

    async fn upsert_job(
        &self,
        draft: &JobDraft,
        tags: &JobTags,
    ) -> Result<JobWithTags, JobPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                let existing = jobs::table
                    .filter(jobs::title.eq(&draft.title))
                    .filter(jobs::company.eq(&draft.company))
                    .filter(jobs::location.eq(&draft.location))
                    .select(jobs::id)
                    .first::<Uuid>(conn)
                    .await
                    .optional()?;
                // Scalar fields of a reused job are deliberately left as-is.
                let job_id = match existing {
                    Some(id) => id,
                    None => {
                        let id = Uuid::new_v4();
                        diesel::insert_into(jobs::table)
                            .values(&new_job_row(id, draft))
                            .execute(conn)
                            .await?;
                        id
                    }
                };
                replace_skill_links(conn, job_id, &tags.skills).await?;
                replace_benefit_links(conn, job_id, &tags.benefits).await?;
                replace_requirement_links(conn, job_id, &tags.requirements).await?;
                load_existing_job(conn, job_id).await
            }
            .scope_boxed()
        })
        .await
        .map_err(map_tx_error)
    }

    async fn list_jobs(&self) -> Result<Vec<JobWithTags>, JobPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        // One transaction so the job rows and their tags observe a single
        // consistent snapshot.
        conn.transaction(|conn| {
            async move {
                let rows = jobs::table
                    .order(jobs::posted_date.desc())
                    .select(JobRow::as_select())
                    .load(conn)
                    .await?;
                load_tags(conn, rows).await
            }
            .scope_boxed()
        })
        .await
        .map_err(map_tx_error)
    }

    async fn find_job(&self, id: Uuid) -> Result<Option<JobWithTags>, JobPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| async move { load_job(conn, id).await }.scope_boxed())
            .await
            .map_err(map_tx_error)
    }

    async fn update_job(
        &self,
        id: Uuid,
        patch: &JobPatch,
        tags: &JobTagsPatch,
    ) -> Result<Option<JobWithTags>, JobPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                let existing = jobs::table
                    .find(id)
                    .select(jobs::id)
                    .first::<Uuid>(conn)
                    .await
                    .optional()?;
                if existing.is_none() {
                    return Ok(None);
                }
                if !patch.is_empty() {
                    diesel::update(jobs::table.find(id))
                        .set(&changeset_from_patch(patch))
                        .execute(conn)
                        .await?;
                }
                if let Some(seeds) = &tags.skills {
                    replace_skill_links(conn, id, seeds).await?;
                }
                if let Some(seeds) = &tags.benefits {
                    replace_benefit_links(conn, id, seeds).await?;
                }
                if let Some(drafts) = &tags.requirements {
                    replace_requirement_links(conn, id, drafts).await?;
                }
                load_job(conn, id).await
            }
            .scope_boxed()
        })
        .await
        .map_err(map_tx_error)
    }

    async fn delete_job(&self, id: Uuid) -> Result<bool, JobPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                let existing = jobs::table
                    .find(id)
                    .select(jobs::id)
                    .first::<Uuid>(conn)
                    .await
                    .optional()?;
                if existing.is_none() {
                    return Ok(false);
                }
                // Links first, then the job row, preserving referential
                // integrity throughout. Skill and benefit entities survive.
                diesel::delete(job_skills::table.filter(job_skills::job_id.eq(id)))
                    .execute(conn)
                    .await?;
                diesel::delete(job_benefits::table.filter(job_benefits::job_id.eq(id)))
                    .execute(conn)
                    .await?;
                diesel::delete(job_requirements::table.filter(job_requirements::job_id.eq(id)))
                    .execute(conn)
                    .await?;
                diesel::delete(jobs::table.find(id)).execute(conn).await?;
                Ok(true)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_tx_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_connections_map_to_connection_errors() {
        use diesel::result::{DatabaseErrorKind, Error as DieselError};

        let err = map_tx_error(TxError::Db(DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection".to_owned()),
        )));
        assert!(matches!(err, JobPersistenceError::Connection { .. }));

        let err = map_tx_error(TxError::Db(DieselError::NotFound));
        assert!(matches!(err, JobPersistenceError::Query { .. }));
    }

    #[test]
    fn corrupt_rows_map_to_query_errors() {
        let err = map_tx_error(TxError::Corrupt("stored job has invalid status".into()));
        assert_eq!(
            err,
            JobPersistenceError::query("stored job has invalid status")
        );
    }

    #[test]
    fn row_conversion_rejects_unknown_enum_values() {
        let row = JobRow {
            id: Uuid::new_v4(),
            title: "t".into(),
            company: "c".into(),
            location: "l".into(),
            description: "d".into(),
            salary: None,
            experience: String::new(),
            job_type: "Gig".into(),
            category: "Backend".into(),
            posted_date: chrono::Utc::now(),
            expiry_date: None,
            remote: false,
            status: "Active".into(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        assert!(matches!(row_to_job(row), Err(TxError::Corrupt(_))));
    }
}
