//! `sigstats run`: reconcile one record kind and write its report.

use anyhow::{Context, Result};
use comfy_table::Cell;
use tracing::{error, info};

use crate::adapters::{open_record_store, CsvReportSink, GiteeClient};
use crate::cli::display::{count_cell, list_table};
use crate::cli::output::{output, CommandOutput};
use crate::cli::types::RunArgs;
use crate::domain::models::{Config, RecordKind};
use crate::domain::ports::ReportSink;
use crate::infrastructure::config::{ConfigError, ConfigLoader};
use crate::infrastructure::logging::{LogConfig, LoggerImpl};
use crate::services::{Reconciler, RunOutcome, RunSummary};

#[derive(Debug, serde::Serialize)]
pub struct RunOutput {
    #[serde(flatten)]
    pub summary: RunSummary,
    /// Rows in the report table
    pub rows: usize,
    /// Written report, absent when writing failed
    pub report: Option<String>,
}

impl CommandOutput for RunOutput {
    fn to_human(&self) -> String {
        let s = &self.summary;
        let mut table = list_table(&["metric", "count"]);
        for (name, value) in [
            ("pages", u64::from(s.pages)),
            ("fetched", s.fetched),
            ("inserted", s.inserted),
            ("updated", s.updated),
            ("skipped", s.skipped),
            ("failed", s.failed),
        ] {
            table.add_row(vec![Cell::new(name), count_cell(value)]);
        }

        let report = self
            .report
            .as_deref()
            .map_or_else(|| "Report: not written".to_string(), |p| format!("Report: {p} ({} rows)", self.rows));
        format!("Reconciled {}:\n{table}\n{report}", s.kind)
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: RunArgs, json_mode: bool) -> Result<()> {
    let mut config = ConfigLoader::load(args.config.as_deref())?;
    args.apply(&mut config);
    ConfigLoader::validate_for_run(&config)?;

    let _logger = LoggerImpl::init(&LogConfig::from(&config.logging))?;

    let out = run_with_config(&config, args.kind()).await?;
    output(&out, json_mode);
    Ok(())
}

/// Run the pipeline for `kind` against the stores and endpoints in `config`.
///
/// Fetch failures abort the run before any report is written. A failure to
/// write the report is logged and reflected in [`RunOutput::report`].
pub async fn run_with_config(config: &Config, kind: RecordKind) -> Result<RunOutput> {
    let token = config
        .remote
        .token
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .ok_or(ConfigError::MissingToken)?;

    let store = open_record_store(&config.database)
        .await
        .context("Failed to open record store")?;
    let client = GiteeClient::new(&config.remote, token).context("Failed to create Gitee client")?;

    let reconciler = Reconciler::new(&config.remote, &client, store.as_ref());
    let RunOutcome { summary, table } = reconciler
        .run(kind)
        .await
        .with_context(|| format!("Failed to reconcile {kind}"))?;

    let sink = CsvReportSink::new(&config.report.output_dir);
    let report = match sink.write(&table, kind.report_basename()) {
        Ok(path) => Some(path.display().to_string()),
        Err(err) => {
            error!(error = %err, "failed to write report");
            None
        }
    };
    info!(kind = %kind, rows = table.len(), "run complete");

    Ok(RunOutput {
        summary,
        rows: table.len(),
        report,
    })
}
