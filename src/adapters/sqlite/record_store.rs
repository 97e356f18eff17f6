//! SQLite implementation of the RecordStore.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::errors::DomainResult;
use crate::domain::models::{IssueRow, PullRow, UpsertOutcome};
use crate::domain::ports::RecordStore;

pub struct SqliteRecordStore {
    pool: SqlitePool,
}

impl SqliteRecordStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn upsert_issue(&self, row: &IssueRow) -> DomainResult<UpsertOutcome> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query("SELECT id FROM issue WHERE link = ?")
            .bind(&row.link)
            .fetch_optional(&mut *tx)
            .await?;

        sqlx::query(
            r#"INSERT INTO issue (sig, repo, link, number, issueType, issueState, author, createdAt)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)
               ON CONFLICT(link) DO UPDATE SET
                   sig = excluded.sig,
                   issueType = excluded.issueType,
                   issueState = excluded.issueState"#,
        )
        .bind(&row.sig)
        .bind(&row.repo)
        .bind(&row.link)
        .bind(&row.number)
        .bind(&row.issue_type)
        .bind(&row.issue_state)
        .bind(&row.author)
        .bind(&row.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(if existing.is_some() {
            UpsertOutcome::Updated
        } else {
            UpsertOutcome::Inserted
        })
    }

    async fn upsert_pull(&self, row: &PullRow) -> DomainResult<UpsertOutcome> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query("SELECT id FROM pull WHERE link = ?")
            .bind(&row.link)
            .fetch_optional(&mut *tx)
            .await?;

        sqlx::query(
            r#"INSERT INTO pull (sig, link, status, author, createdAt)
               VALUES (?, ?, ?, ?, ?)
               ON CONFLICT(link) DO UPDATE SET
                   sig = excluded.sig,
                   status = excluded.status"#,
        )
        .bind(&row.sig)
        .bind(&row.link)
        .bind(&row.status)
        .bind(&row.author)
        .bind(&row.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(if existing.is_some() {
            UpsertOutcome::Updated
        } else {
            UpsertOutcome::Inserted
        })
    }

    async fn find_issue(&self, link: &str) -> DomainResult<Option<IssueRow>> {
        let row: Option<IssueRow> = sqlx::query_as(
            "SELECT sig, repo, link, number, issueType, issueState, author, createdAt FROM issue WHERE link = ?"
        )
        .bind(link)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_pull(&self, link: &str) -> DomainResult<Option<PullRow>> {
        let row: Option<PullRow> = sqlx::query_as(
            "SELECT sig, link, status, author, createdAt FROM pull WHERE link = ?"
        )
        .bind(link)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn count_issues(&self) -> DomainResult<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM issue")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.unsigned_abs())
    }

    async fn count_pulls(&self) -> DomainResult<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM pull")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.unsigned_abs())
    }
}
