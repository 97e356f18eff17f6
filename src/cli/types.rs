use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::models::{Config, RecordKind};

#[derive(Parser)]
#[command(name = "sigstats")]
#[command(about = "Reconcile open Gitee issues and pull requests into a record store", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch open records, reconcile them into the store and write a CSV report
    Run(RunArgs),

    /// List the repositories owned by each group
    Sigs(SigsArgs),
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Reconcile issues instead of pull requests
    #[arg(short, long)]
    pub issues: bool,

    /// Gitee access token
    #[arg(short, long)]
    pub token: Option<String>,

    /// Database host
    #[arg(long)]
    pub host: Option<String>,

    /// Database port
    #[arg(long)]
    pub port: Option<u16>,

    /// Database user
    #[arg(long)]
    pub user: Option<String>,

    /// Database password
    #[arg(long = "pass")]
    pub password: Option<String>,

    /// Database name
    #[arg(long)]
    pub database: Option<String>,

    /// Full database URL (`mysql://…` or `sqlite:…`); overrides the individual fields
    #[arg(long)]
    pub database_url: Option<String>,

    /// Directory the CSV report is written to
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Configuration file (defaults to ./sigstats.yaml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl RunArgs {
    pub fn kind(&self) -> RecordKind {
        if self.issues {
            RecordKind::Issues
        } else {
            RecordKind::Pulls
        }
    }

    /// Apply the flags that were given on top of the loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(token) = &self.token {
            config.remote.token = Some(token.clone());
        }
        if let Some(host) = &self.host {
            config.database.host.clone_from(host);
        }
        if let Some(port) = self.port {
            config.database.port = port;
        }
        if let Some(user) = &self.user {
            config.database.user.clone_from(user);
        }
        if let Some(password) = &self.password {
            config.database.password.clone_from(password);
        }
        if let Some(name) = &self.database {
            config.database.name.clone_from(name);
        }
        if let Some(url) = &self.database_url {
            config.database.url = Some(url.clone());
        }
        if let Some(dir) = &self.output_dir {
            config.report.output_dir = dir.display().to_string();
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct SigsArgs {
    /// Only show this group
    #[arg(short, long)]
    pub group: Option<String>,

    /// Gitee access token (optional for public trees)
    #[arg(short, long)]
    pub token: Option<String>,

    /// Configuration file (defaults to ./sigstats.yaml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_defaults_to_pulls() {
        let cli = Cli::try_parse_from(["sigstats", "run", "-t", "abc"]).unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.kind(), RecordKind::Pulls);
        assert_eq!(args.token.as_deref(), Some("abc"));
        assert!(!cli.json);
    }

    #[test]
    fn test_run_flags_override_config() {
        let cli = Cli::try_parse_from([
            "sigstats", "run", "-i", "--token", "abc", "--host", "db", "--port", "3307", "--user", "u",
            "--pass", "p", "--database", "gitee", "--output-dir", "/tmp/reports", "--json",
        ])
        .unwrap();
        assert!(cli.json);
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.kind(), RecordKind::Issues);

        let mut config = Config::default();
        args.apply(&mut config);
        assert_eq!(config.remote.token.as_deref(), Some("abc"));
        assert_eq!(config.database.host, "db");
        assert_eq!(config.database.port, 3307);
        assert_eq!(config.database.user, "u");
        assert_eq!(config.database.password, "p");
        assert_eq!(config.database.name, "gitee");
        assert_eq!(config.report.output_dir, "/tmp/reports");
        assert!(config.database.explicit_url().is_none());
    }

    #[test]
    fn test_unset_flags_leave_config_alone() {
        let mut config = Config::default();
        config.remote.token = Some("from-file".to_string());
        RunArgs::default().apply(&mut config);
        assert_eq!(config.remote.token.as_deref(), Some("from-file"));
        assert_eq!(config.database.port, 3306);
    }

    #[test]
    fn test_sigs_group_filter() {
        let cli = Cli::try_parse_from(["sigstats", "sigs", "--group", "Kernel"]).unwrap();
        let Commands::Sigs(args) = cli.command else {
            panic!("expected sigs");
        };
        assert_eq!(args.group.as_deref(), Some("Kernel"));
    }
}
