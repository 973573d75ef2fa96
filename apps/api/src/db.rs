use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::scan::{NewScanRecord, SavedScan};

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Persistence collaborator for completed scans. Only `save` is in scope.
#[async_trait]
pub trait ScanRepository: Send + Sync {
    async fn save(&self, record: &NewScanRecord<'_>) -> Result<SavedScan, sqlx::Error>;
}

pub struct PgScanRepository {
    pool: PgPool,
}

impl PgScanRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScanRepository for PgScanRepository {
    async fn save(&self, record: &NewScanRecord<'_>) -> Result<SavedScan, sqlx::Error> {
        let result = record.result;
        let sections = &result.sections;

        let (id, created_at): (Uuid, DateTime<Utc>) = sqlx::query_as(
            r#"
            INSERT INTO scans
                (id, user_id, resume_file_url, job_description, jd_skills, resume_skills,
                 match_score, missing_keywords, missing_keyword_reasons, rewrite_suggestions,
                 improved_resume_content, objective, experience, education,
                 skills_technical, skills_soft, projects, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, 'success')
            RETURNING id, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(record.owner_id)
        .bind(record.resume_file_url)
        .bind(record.job_description)
        .bind(&result.jd_skills)
        .bind(&result.resume_skills)
        .bind(result.score as i32)
        .bind(&result.missing_keywords)
        .bind(&result.missing_keyword_reasons)
        .bind(&result.rewrite_suggestions)
        .bind(&result.improved_resume_content)
        .bind(&sections.objective)
        .bind(&sections.experience)
        .bind(&sections.education)
        .bind(&sections.skills_technical)
        .bind(&sections.skills_soft)
        .bind(&sections.projects)
        .fetch_one(&self.pool)
        .await?;

        info!("Saved scan {id} (score {})", result.score);
        Ok(SavedScan { id, created_at })
    }
}
