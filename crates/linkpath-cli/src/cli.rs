use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "linkpath",
    about = "Resolve dotted paths across linked JSON objects",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML settings file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve a dotted path starting from an object
    Crawl(CrawlArgs),
    /// Serve objects and schemas from a data directory
    Serve(ServeArgs),
    /// Compute an operation and append it to a CSV ledger
    Calc(CalcArgs),
    /// Write a multiplication table to a CSV ledger
    Table(TableArgs),
    /// Print rows of a CSV ledger
    Rows(RowsArgs),
}

#[derive(Args)]
pub struct CrawlArgs {
    /// Identifier of the starting object
    pub id: String,
    /// Dotted field path, e.g. `owner.name`
    pub path: String,
    /// Base URL objects are fetched from
    #[arg(long)]
    pub server: Option<String>,
    /// Base URL schemas are fetched from
    #[arg(long)]
    pub schemas: Option<String>,
    /// Local data root instead of HTTP
    #[arg(long)]
    pub data: Option<PathBuf>,
    #[arg(long)]
    pub max_fan_out: Option<usize>,
    /// Per-fetch timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

#[derive(Args)]
pub struct ServeArgs {
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    #[arg(long)]
    pub data: Option<PathBuf>,
}

#[derive(Args)]
pub struct CalcArgs {
    /// Ledger file, created if absent
    pub file: PathBuf,
    /// add, subtract, multiply or divide
    pub operator: String,
    #[arg(allow_negative_numbers = true)]
    pub int1: i64,
    #[arg(allow_negative_numbers = true)]
    pub int2: i64,
}

#[derive(Args)]
pub struct TableArgs {
    pub file: PathBuf,
    #[arg(long, default_value = "9999")]
    pub max: i64,
}

#[derive(Args)]
pub struct RowsArgs {
    pub file: PathBuf,
    /// Row to print; repeatable. Index 0 is the first data row.
    #[arg(short, long = "index")]
    pub indices: Vec<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_crawl() {
        let cli = Cli::try_parse_from(["linkpath", "crawl", "/x/1", "owner.name"]).unwrap();
        if let Command::Crawl(args) = cli.command {
            assert_eq!(args.id, "/x/1");
            assert_eq!(args.path, "owner.name");
            assert!(args.server.is_none());
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_crawl_with_sources() {
        let cli = Cli::try_parse_from([
            "linkpath", "crawl", "/x/1", "tags",
            "--server", "http://localhost:8700",
            "--max-fan-out", "2",
            "--timeout", "5",
        ])
        .unwrap();
        if let Command::Crawl(args) = cli.command {
            assert_eq!(args.server.as_deref(), Some("http://localhost:8700"));
            assert_eq!(args.max_fan_out, Some(2));
            assert_eq!(args.timeout, Some(5));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_serve() {
        let cli = Cli::try_parse_from(["linkpath", "serve", "--bind", "0.0.0.0:8080"]).unwrap();
        if let Command::Serve(args) = cli.command {
            assert_eq!(args.bind, Some("0.0.0.0:8080".parse().unwrap()));
            assert!(args.data.is_none());
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_calc_with_negative_operand() {
        let cli = Cli::try_parse_from(["linkpath", "calc", "db.csv", "subtract", "-3", "4"]).unwrap();
        if let Command::Calc(args) = cli.command {
            assert_eq!(args.operator, "subtract");
            assert_eq!((args.int1, args.int2), (-3, 4));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_calc_rejects_non_integer() {
        assert!(Cli::try_parse_from(["linkpath", "calc", "db.csv", "add", "1.5", "2"]).is_err());
    }

    #[test]
    fn parse_table_default_max() {
        let cli = Cli::try_parse_from(["linkpath", "table", "db.csv"]).unwrap();
        if let Command::Table(args) = cli.command {
            assert_eq!(args.max, 9999);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_rows_indices() {
        let cli = Cli::try_parse_from(["linkpath", "rows", "db.csv", "-i", "0", "--index", "3"]).unwrap();
        if let Command::Rows(args) = cli.command {
            assert_eq!(args.indices, vec![0, 3]);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["linkpath", "--verbose", "rows", "db.csv"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn parse_json_format_and_config() {
        let cli = Cli::try_parse_from([
            "linkpath", "rows", "db.csv", "--format", "json", "--config", "lp.toml",
        ])
        .unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
        assert_eq!(cli.config, Some(PathBuf::from("lp.toml")));
    }
}
