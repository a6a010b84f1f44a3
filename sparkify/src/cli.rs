// sparkify/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sparkify")]
#[command(about = "Loads Sparkify activity logs and song metadata into a star schema", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🚀 Runs the ETL (collect -> transform -> load)
    Run {
        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// DuckDB file, overrides `db-path` from sparkify.yaml
        #[arg(long)]
        db_path: Option<String>,
    },

    /// 🔍 Inspects a loaded table (schema + sample rows)
    Inspect {
        /// Path to the DuckDB database file
        #[arg(long, default_value = "sparkify.duckdb")]
        db_path: String,

        /// Table name to inspect
        #[arg(long, short)]
        table: String,

        /// Number of sample rows to display
        #[arg(long, default_value = "5")]
        limit: usize,
    },

    /// ⚡ Executes a raw SQL query (Ad-hoc)
    Query {
        query: String,
        #[arg(long, default_value = "sparkify.duckdb")]
        db_path: String,

        /// Maximum rows printed for SELECT statements
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// 📜 Prints the DDL executed before each load
    Ddl,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, bail};
    use clap::Parser;

    #[test]
    fn test_cli_parse_run_defaults() -> Result<()> {
        let args = Cli::parse_from(["sparkify", "run"]);
        match args.command {
            Commands::Run {
                project_dir,
                db_path,
            } => {
                assert_eq!(project_dir.to_string_lossy(), ".");
                assert_eq!(db_path, None);
                Ok(())
            }
            _ => bail!("Expected Run command"),
        }
    }

    #[test]
    fn test_cli_parse_run_overrides() -> Result<()> {
        let args = Cli::parse_from([
            "sparkify",
            "run",
            "--db-path",
            ":memory:",
            "--project-dir",
            "/tmp",
        ]);
        match args.command {
            Commands::Run {
                project_dir,
                db_path,
            } => {
                assert_eq!(project_dir.to_string_lossy(), "/tmp");
                assert_eq!(db_path.as_deref(), Some(":memory:"));
                Ok(())
            }
            _ => bail!("Expected Run command"),
        }
    }

    #[test]
    fn test_cli_parse_inspect() -> Result<()> {
        let args = Cli::parse_from(["sparkify", "inspect", "--table", "users", "--limit", "10"]);
        match args.command {
            Commands::Inspect {
                table,
                limit,
                db_path,
            } => {
                assert_eq!(table, "users");
                assert_eq!(limit, 10);
                assert_eq!(db_path, "sparkify.duckdb");
                Ok(())
            }
            _ => bail!("Expected Inspect command"),
        }
    }

    #[test]
    fn test_cli_parse_query() -> Result<()> {
        let args = Cli::parse_from(["sparkify", "query", "SELECT 1", "--db-path", "x.duckdb"]);
        match args.command {
            Commands::Query {
                query,
                db_path,
                limit,
            } => {
                assert_eq!(query, "SELECT 1");
                assert_eq!(db_path, "x.duckdb");
                assert_eq!(limit, 20);
                Ok(())
            }
            _ => bail!("Expected Query command"),
        }
    }

    #[test]
    fn test_cli_parse_ddl() {
        let args = Cli::parse_from(["sparkify", "ddl"]);
        assert!(matches!(args.command, Commands::Ddl));
    }
}
