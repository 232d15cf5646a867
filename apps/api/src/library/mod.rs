//! Resume Library: saved resume packages and markdown export.
//!
//! A package is the resume and cover letter produced from one form, saved
//! under the user's name. Rows are shown newest first.

pub mod handlers;

use std::sync::LazyLock;

use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::document::{GeneratedContent, SavedResumeRow};

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Which half of a saved package to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportKind {
    Resume,
    CoverLetter,
}

impl ExportKind {
    fn file_suffix(&self) -> &'static str {
        match self {
            ExportKind::Resume => "Resume",
            ExportKind::CoverLetter => "Cover_Letter",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ExportKind::Resume => "resume",
            ExportKind::CoverLetter => "cover letter",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportedFile {
    pub s3_key: String,
    pub filename: String,
}

pub fn resume_title(name: &str) -> String {
    format!("{name}'s Resume")
}

/// `"Ada  King Lovelace"` + resume → `"Ada_King_Lovelace_Resume.md"`.
pub fn export_filename(name: &str, kind: ExportKind) -> String {
    format!(
        "{}_{}.md",
        WHITESPACE_RUN.replace_all(name, "_"),
        kind.file_suffix()
    )
}

/// The name a package was saved under, recovered from its title.
fn owner_name(title: &str) -> &str {
    title.strip_suffix("'s Resume").unwrap_or(title)
}

pub async fn save_resume(
    pool: &PgPool,
    user_id: Uuid,
    name: &str,
    content: &GeneratedContent,
) -> Result<SavedResumeRow, AppError> {
    let row = sqlx::query_as::<_, SavedResumeRow>(
        r#"
        INSERT INTO saved_resumes (id, user_id, title, resume_content, cover_letter_content)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(resume_title(name))
    .bind(&content.resume_content)
    .bind(&content.cover_letter_content)
    .fetch_one(pool)
    .await?;

    info!("Saved resume {} for user {user_id}", row.id);
    Ok(row)
}

pub async fn list_resumes(pool: &PgPool, user_id: Uuid) -> Result<Vec<SavedResumeRow>, AppError> {
    let rows = sqlx::query_as::<_, SavedResumeRow>(
        "SELECT * FROM saved_resumes WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn get_resume(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<SavedResumeRow, AppError> {
    sqlx::query_as::<_, SavedResumeRow>(
        "SELECT * FROM saved_resumes WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Saved resume {id} not found")))
}

pub async fn delete_resume(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM saved_resumes WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Saved resume {id} not found")));
    }
    info!("Deleted resume {id} for user {user_id}");
    Ok(())
}

/// Uploads one half of a saved package to
/// `exports/{user_id}/{id}/{filename}`.
pub async fn export_markdown(
    s3: &aws_sdk_s3::Client,
    s3_bucket: &str,
    row: &SavedResumeRow,
    kind: ExportKind,
) -> Result<ExportedFile, AppError> {
    let filename = export_filename(owner_name(&row.title), kind);
    let s3_key = format!("exports/{}/{}/{}", row.user_id, row.id, filename);
    let body = match kind {
        ExportKind::Resume => &row.resume_content,
        ExportKind::CoverLetter => &row.cover_letter_content,
    };
    if body.trim().is_empty() {
        return Err(AppError::UnprocessableEntity(format!(
            "Saved resume {} has no {} to export",
            row.id,
            kind.label()
        )));
    }

    s3.put_object()
        .bucket(s3_bucket)
        .key(&s3_key)
        .body(ByteStream::from(Bytes::copy_from_slice(body.as_bytes())))
        .content_type("text/markdown")
        .send()
        .await
        .map_err(|e| AppError::S3(format!("Export upload failed: {e}")))?;

    info!("Exported s3://{s3_bucket}/{s3_key}");
    Ok(ExportedFile { s3_key, filename })
}
