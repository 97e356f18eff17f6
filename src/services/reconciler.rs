//! Reconciliation of remote listings into the record store.
//!
//! A run walks the listing for one record kind page by page. Each record that
//! passes the organization filter gets its owning group, age and (for pulls)
//! aggregate status, is upserted by link and contributes one report row.
//!
//! Fetch errors abort the run and discard the report buffer. Per-record
//! problems (bad timestamps, store failures) are logged and counted instead.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use crate::domain::models::{
    GroupMap, Issue, IssueRow, PullRequest, PullRow, RecordKind, RemoteConfig, ReportTable,
    UpsertOutcome,
};
use crate::domain::ports::{FetchError, RecordStore, RemoteSource};
use crate::services::age::age_in_days;
use crate::services::ownership::resolve_groups;
use crate::services::status_classifier::StatusClassifier;

/// Counters for a single run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub kind: RecordKind,
    pub pages: u32,
    pub fetched: u64,
    pub inserted: u64,
    pub updated: u64,
    pub skipped: u64,
    pub failed: u64,
}

impl RunSummary {
    pub fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            pages: 0,
            fetched: 0,
            inserted: 0,
            updated: 0,
            skipped: 0,
            failed: 0,
        }
    }

    fn record(&mut self, outcome: UpsertOutcome) {
        match outcome {
            UpsertOutcome::Inserted => self.inserted += 1,
            UpsertOutcome::Updated => self.updated += 1,
        }
    }
}

/// Result of a completed run: the report buffer and its counters.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub summary: RunSummary,
    pub table: ReportTable,
}

impl RunOutcome {
    fn new(kind: RecordKind) -> Self {
        Self {
            summary: RunSummary::new(kind),
            table: ReportTable::for_kind(kind),
        }
    }
}

pub struct Reconciler<'a> {
    remote: &'a RemoteConfig,
    source: &'a dyn RemoteSource,
    store: &'a dyn RecordStore,
    classifier: StatusClassifier,
    now: DateTime<Utc>,
}

impl<'a> Reconciler<'a> {
    pub fn new(
        remote: &'a RemoteConfig,
        source: &'a dyn RemoteSource,
        store: &'a dyn RecordStore,
    ) -> Self {
        Self {
            remote,
            source,
            store,
            classifier: StatusClassifier::default(),
            now: Utc::now(),
        }
    }

    /// Pin the instant ages are measured against.
    #[must_use]
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// Resolve ownership, then reconcile every open record of `kind`.
    #[instrument(skip(self))]
    pub async fn run(&self, kind: RecordKind) -> Result<RunOutcome, FetchError> {
        let groups = resolve_groups(self.source).await;
        let outcome = match kind {
            RecordKind::Issues => self.run_issues(&groups).await?,
            RecordKind::Pulls => self.run_pulls(&groups).await?,
        };

        let s = &outcome.summary;
        info!(
            pages = s.pages,
            fetched = s.fetched,
            inserted = s.inserted,
            updated = s.updated,
            skipped = s.skipped,
            failed = s.failed,
            "reconciliation finished"
        );
        Ok(outcome)
    }

    pub async fn run_issues(&self, groups: &GroupMap) -> Result<RunOutcome, FetchError> {
        let mut outcome = RunOutcome::new(RecordKind::Issues);
        let mut page = 1;
        while let Some(issues) = self.source.fetch_issue_page(page).await? {
            info!(page, count = issues.len(), "fetched issue page");
            outcome.summary.pages += 1;
            outcome.summary.fetched += issues.len() as u64;
            for issue in &issues {
                self.reconcile_issue(issue, groups, &mut outcome).await;
            }
            page += 1;
        }
        Ok(outcome)
    }

    pub async fn run_pulls(&self, groups: &GroupMap) -> Result<RunOutcome, FetchError> {
        let mut outcome = RunOutcome::new(RecordKind::Pulls);
        let mut page = 1;
        while let Some(pulls) = self.source.fetch_pull_page(page).await? {
            info!(page, count = pulls.len(), "fetched pull request page");
            outcome.summary.pages += 1;
            outcome.summary.fetched += pulls.len() as u64;
            for pull in &pulls {
                self.reconcile_pull(pull, groups, &mut outcome).await;
            }
            page += 1;
        }
        Ok(outcome)
    }

    async fn reconcile_issue(&self, issue: &Issue, groups: &GroupMap, outcome: &mut RunOutcome) {
        let link = issue.html_url.as_str();
        let Some(repository) = issue.repository.as_ref() else {
            debug!(link, "skipping issue without repository");
            outcome.summary.skipped += 1;
            return;
        };
        if !self.is_allowed(issue.organization()) {
            debug!(link, "skipping issue outside allowed organizations");
            outcome.summary.skipped += 1;
            return;
        }
        let days = match age_in_days(&issue.created_at, self.now) {
            Ok(days) => days,
            Err(err) => {
                warn!(link, error = %err, "skipping issue with unreadable creation time");
                outcome.summary.failed += 1;
                return;
            }
        };

        let sig = groups.group_of(&repository.full_name);
        let row = IssueRow {
            sig: sig.to_string(),
            repo: repository.full_name.clone(),
            link: link.to_string(),
            number: issue.number.clone(),
            issue_type: issue.issue_type.clone(),
            issue_state: issue.issue_state_detail.title.clone(),
            author: issue.user.login.clone(),
            created_at: issue.created_at.clone(),
        };
        match self.store.upsert_issue(&row).await {
            Ok(result) => {
                debug!(link, ?result, "issue stored");
                outcome.summary.record(result);
            }
            Err(err) => {
                error!(link, error = %err, "failed to store issue");
                outcome.summary.failed += 1;
            }
        }

        let labels = serde_json::Value::from(issue.label_names()).to_string();
        outcome.table.push(vec![
            row.sig,
            row.repo,
            row.link,
            row.issue_type,
            row.issue_state,
            days.to_string(),
            labels,
            row.author,
            issue.title.clone(),
        ]);
    }

    async fn reconcile_pull(&self, pull: &PullRequest, groups: &GroupMap, outcome: &mut RunOutcome) {
        let link = pull.html_url.as_str();
        if !self.is_allowed(pull.organization()) {
            debug!(link, "skipping pull request outside allowed organizations");
            outcome.summary.skipped += 1;
            return;
        }
        let Some(repo) = pull.repository() else {
            debug!(link, "skipping pull request without repository in link");
            outcome.summary.skipped += 1;
            return;
        };
        let days = match age_in_days(&pull.created_at, self.now) {
            Ok(days) => days,
            Err(err) => {
                warn!(link, error = %err, "skipping pull request with unreadable creation time");
                outcome.summary.failed += 1;
                return;
            }
        };

        let status = self
            .classifier
            .classify(&pull.label_names(), pull.draft, pull.mergeable);
        let row = PullRow {
            sig: groups.group_of(&repo).to_string(),
            link: link.to_string(),
            status,
            author: pull.user.login.clone(),
            created_at: pull.created_at.clone(),
        };
        match self.store.upsert_pull(&row).await {
            Ok(result) => {
                debug!(link, ?result, "pull request stored");
                outcome.summary.record(result);
            }
            Err(err) => {
                error!(link, error = %err, "failed to store pull request");
                outcome.summary.failed += 1;
            }
        }

        outcome.table.push(vec![
            row.sig,
            row.link,
            days.to_string(),
            row.status,
            row.author,
        ]);
    }

    fn is_allowed(&self, org: Option<&str>) -> bool {
        org.is_some_and(|o| self.remote.is_allowed_org(o))
    }
}
