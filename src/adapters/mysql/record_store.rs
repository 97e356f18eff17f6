//! MySQL implementation of the RecordStore.
//!
//! The deployed tables are not guaranteed to carry a unique index on `link`,
//! so each upsert locks the matching row with `SELECT ... FOR UPDATE` and then
//! updates or inserts inside the same transaction.
//!
//! The lock only serializes two writers of the same new link under InnoDB's
//! default REPEATABLE READ, where the locking read also takes a gap lock. Under
//! READ COMMITTED no gap lock is taken, so concurrent runs can still insert a
//! duplicate row for a link that did not exist yet. A unique index on `link`
//! closes that for every isolation level.

use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::domain::errors::DomainResult;
use crate::domain::models::{IssueRow, PullRow, UpsertOutcome};
use crate::domain::ports::RecordStore;

pub struct MySqlRecordStore {
    pool: MySqlPool,
}

impl MySqlRecordStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for MySqlRecordStore {
    async fn upsert_issue(&self, row: &IssueRow) -> DomainResult<UpsertOutcome> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query("SELECT id FROM issue WHERE link = ? LIMIT 1 FOR UPDATE")
            .bind(&row.link)
            .fetch_optional(&mut *tx)
            .await?;

        let outcome = if existing.is_some() {
            sqlx::query("UPDATE issue SET sig = ?, issueType = ?, issueState = ? WHERE link = ?")
                .bind(&row.sig)
                .bind(&row.issue_type)
                .bind(&row.issue_state)
                .bind(&row.link)
                .execute(&mut *tx)
                .await?;
            UpsertOutcome::Updated
        } else {
            sqlx::query(
                r#"INSERT INTO issue (sig, repo, link, number, issueType, issueState, author, createdAt)
                   VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
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
            UpsertOutcome::Inserted
        };

        tx.commit().await?;
        Ok(outcome)
    }

    async fn upsert_pull(&self, row: &PullRow) -> DomainResult<UpsertOutcome> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query("SELECT id FROM pull WHERE link = ? LIMIT 1 FOR UPDATE")
            .bind(&row.link)
            .fetch_optional(&mut *tx)
            .await?;

        let outcome = if existing.is_some() {
            sqlx::query("UPDATE pull SET sig = ?, status = ? WHERE link = ?")
                .bind(&row.sig)
                .bind(&row.status)
                .bind(&row.link)
                .execute(&mut *tx)
                .await?;
            UpsertOutcome::Updated
        } else {
            sqlx::query("INSERT INTO pull (sig, link, status, author, createdAt) VALUES (?, ?, ?, ?, ?)")
                .bind(&row.sig)
                .bind(&row.link)
                .bind(&row.status)
                .bind(&row.author)
                .bind(&row.created_at)
                .execute(&mut *tx)
                .await?;
            UpsertOutcome::Inserted
        };

        tx.commit().await?;
        Ok(outcome)
    }

    async fn find_issue(&self, link: &str) -> DomainResult<Option<IssueRow>> {
        let row: Option<IssueRow> = sqlx::query_as(
            r#"SELECT sig, repo, link, CAST(number AS CHAR) AS number, issueType, issueState, author,
                      CAST(createdAt AS CHAR) AS createdAt
               FROM issue WHERE link = ? LIMIT 1"#,
        )
        .bind(link)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_pull(&self, link: &str) -> DomainResult<Option<PullRow>> {
        let row: Option<PullRow> = sqlx::query_as(
            r#"SELECT sig, link, status, author, CAST(createdAt AS CHAR) AS createdAt
               FROM pull WHERE link = ? LIMIT 1"#,
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
