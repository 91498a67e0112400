use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};
use colored::Colorize;
use serde_json::Value;

use linkpath_client::{HttpObjectSource, InMemoryObjectSource, ObjectClient, ObjectSource};
use linkpath_ledger::{
    write_multiplication_table, ArithmeticRecord, CsvLedger, OpenMode, Operator, RecordReader,
    RecordWriter, DEFAULT_BUFFER_CAPACITY,
};
use linkpath_resolve::{PathResolver, ResolverConfig};
use linkpath_schema::{DirectorySchemaSource, HttpSchemaSource, SchemaRegistry, SchemaSource};
use linkpath_server::LinkpathServer;

use crate::cli::*;
use crate::config::CliConfig;

pub async fn run_command(cli: Cli, config: CliConfig) -> anyhow::Result<()> {
    match cli.command {
        Command::Crawl(args) => cmd_crawl(args, &config, &cli.format).await,
        Command::Serve(args) => cmd_serve(args, config).await,
        Command::Calc(args) => cmd_calc(args, &cli.format),
        Command::Table(args) => cmd_table(args),
        Command::Rows(args) => cmd_rows(args, &cli.format),
    }
}

async fn cmd_crawl(args: CrawlArgs, config: &CliConfig, format: &OutputFormat) -> anyhow::Result<()> {
    let resolver = build_resolver(&args, config)?;
    let values = resolver
        .resolve(&args.id, &args.path)
        .await
        .with_context(|| format!("resolving `{}` from {}", args.path, args.id))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&values)?),
        OutputFormat::Text => {
            for value in &values {
                println!("{}", display_value(value));
            }
            eprintln!("{} {} value(s)", "✓".green().bold(), values.len().to_string().bold());
        }
    }
    Ok(())
}

async fn cmd_serve(args: ServeArgs, config: CliConfig) -> anyhow::Result<()> {
    let mut serve = config.serve;
    if let Some(bind) = args.bind {
        serve.bind_addr = bind;
    }
    if let Some(data) = args.data {
        serve.data_root = data;
    }
    println!(
        "linkpath server on {} (data: {})",
        serve.bind_addr.to_string().bold(),
        serve.data_root.display()
    );
    LinkpathServer::from_data_root(serve)?.serve().await?;
    Ok(())
}

fn cmd_calc(args: CalcArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let operator: Operator = args.operator.parse()?;
    let record = ArithmeticRecord::compute(operator, args.int1, args.int2)?;
    let ledger = CsvLedger::open(&args.file, OpenMode::UseExisting)?;
    ledger.append(&record)?;
    println!("{} {}", "✓".green().bold(), record.to_string().bold());
    print_rows(ledger.read_all()?.into_iter().enumerate(), format)
}

fn cmd_table(args: TableArgs) -> anyhow::Result<()> {
    let ledger = CsvLedger::open(&args.file, OpenMode::UseExisting)?;
    let written = write_multiplication_table(&ledger, args.max, DEFAULT_BUFFER_CAPACITY)?;
    println!(
        "{} Wrote {} rows to {}",
        "✓".green().bold(),
        written.to_string().bold(),
        args.file.display()
    );
    Ok(())
}

fn cmd_rows(args: RowsArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let ledger = open_existing(&args.file)?;
    if args.indices.is_empty() {
        return print_rows(ledger.read_all()?.into_iter().enumerate(), format);
    }
    let rows = ledger.read_by_indices(&args.indices)?;
    print_rows(args.indices.iter().copied().zip(rows), format)
}

/// Pick HTTP or local sources. Flags override the config file.
fn build_resolver(args: &CrawlArgs, config: &CliConfig) -> anyhow::Result<PathResolver> {
    let mut resolver_config: ResolverConfig = config.resolver.clone();
    if let Some(limit) = args.max_fan_out {
        resolver_config.max_fan_out = limit;
    }
    if let Some(secs) = args.timeout {
        resolver_config.fetch_timeout_secs = secs;
    }

    let data = args.data.as_ref().or(config.data.as_ref());
    let server = args.server.as_ref().or(config.server.as_ref());
    let (objects, schemas) = match (data, server) {
        (Some(data), _) => {
            tracing::debug!(data = %data.display(), "crawling local data root");
            let objects: Arc<dyn ObjectSource> = Arc::new(
                InMemoryObjectSource::load_dir(&data.join("objects"))
                    .with_context(|| format!("loading objects from {}", data.display()))?,
            );
            let schemas: Arc<dyn SchemaSource> =
                Arc::new(DirectorySchemaSource::new(data.join("schemas")));
            (objects, schemas)
        }
        (None, Some(server)) => {
            let schemas = args
                .schemas
                .clone()
                .or_else(|| config.schemas.clone())
                .unwrap_or_else(|| format!("{}/_schemas", server.trim_end_matches('/')));
            tracing::debug!(%server, %schemas, "crawling over http");
            let objects: Arc<dyn ObjectSource> = Arc::new(HttpObjectSource::new(server.clone()));
            let schemas: Arc<dyn SchemaSource> = Arc::new(HttpSchemaSource::new(schemas));
            (objects, schemas)
        }
        (None, None) => bail!("no object source; pass --server <url> or --data <dir>"),
    };

    let client = ObjectClient::new(objects).with_timeout(resolver_config.fetch_timeout());
    let registry = Arc::new(SchemaRegistry::new(schemas));
    Ok(PathResolver::new(registry, client).with_config(resolver_config))
}

fn open_existing(file: &Path) -> anyhow::Result<CsvLedger> {
    if !file.is_file() {
        bail!("ledger {} does not exist", file.display());
    }
    Ok(CsvLedger::open(file, OpenMode::UseExisting)?)
}

fn print_rows(
    rows: impl Iterator<Item = (usize, ArithmeticRecord)>,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let records: Vec<ArithmeticRecord> = rows.map(|(_, record)| record).collect();
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        OutputFormat::Text => {
            println!("{}", linkpath_ledger::HEADERS.join(",").dimmed());
            for (index, record) in rows {
                println!("{:>6}  {}", index.to_string().yellow(), record.to_fields().join(","));
            }
        }
    }
    Ok(())
}

/// Strings print bare; everything else as compact JSON.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn crawl_args(data: &Path, path: &str) -> CrawlArgs {
        CrawlArgs {
            id: "/x/1".into(),
            path: path.into(),
            server: None,
            schemas: None,
            data: Some(data.to_path_buf()),
            max_fan_out: Some(1),
            timeout: None,
        }
    }

    fn data_root() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("objects")).unwrap();
        std::fs::create_dir(dir.path().join("schemas")).unwrap();
        std::fs::write(
            dir.path().join("objects/all.json"),
            json!([
                { "@id": "/x/1", "@type": "Item", "tags": ["a", "b"], "owner": "/u/9" },
                { "@id": "/u/9", "@type": "User", "name": "Ada" },
            ])
            .to_string(),
        )
        .unwrap();
        std::fs::write(
            dir.path().join("schemas/Item.json"),
            json!({ "tags": { "type": "array", "items": {} }, "owner": { "linkTo": "User" } })
                .to_string(),
        )
        .unwrap();
        std::fs::write(dir.path().join("schemas/User.json"), r#"{"name":{}}"#).unwrap();
        dir
    }

    #[tokio::test]
    async fn crawl_local_data_root() {
        let dir = data_root();
        let config = CliConfig::default();

        let resolver = build_resolver(&crawl_args(dir.path(), "tags"), &config).unwrap();
        assert_eq!(resolver.config().max_fan_out, 1);
        assert_eq!(
            resolver.resolve("/x/1", "tags").await.unwrap(),
            vec![json!("a"), json!("b")]
        );
        assert_eq!(
            resolver.resolve("/x/1", "owner.name").await.unwrap(),
            vec![json!("Ada")]
        );
    }

    #[test]
    fn crawl_needs_a_source() {
        let args = CrawlArgs {
            data: None,
            ..crawl_args(Path::new("."), "tags")
        };
        assert!(build_resolver(&args, &CliConfig::default()).is_err());
    }

    #[test]
    fn config_file_supplies_server() {
        let args = CrawlArgs {
            data: None,
            max_fan_out: None,
            ..crawl_args(Path::new("."), "tags")
        };
        let config = CliConfig {
            server: Some("http://localhost:8700/".into()),
            ..Default::default()
        };
        let resolver = build_resolver(&args, &config).unwrap();
        assert_eq!(resolver.config().max_fan_out, 8);
    }

    #[test]
    fn calc_appends_to_ledger() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("db.csv");
        for (op, a, b) in [("add", 2, 3), ("divide", 7, 2)] {
            let args = CalcArgs {
                file: file.clone(),
                operator: op.into(),
                int1: a,
                int2: b,
            };
            cmd_calc(args, &OutputFormat::Text).unwrap();
        }
        let text = std::fs::read_to_string(&file).unwrap();
        assert_eq!(text, "operator,int1,int2,answer\nadd,2,3,5\ndivide,7,2,3.5\n");
    }

    #[test]
    fn calc_rejects_unknown_operator() {
        let dir = TempDir::new().unwrap();
        let args = CalcArgs {
            file: dir.path().join("db.csv"),
            operator: "power".into(),
            int1: 2,
            int2: 3,
        };
        let err = cmd_calc(args, &OutputFormat::Text).unwrap_err();
        assert!(err.to_string().contains("add, subtract, multiply, divide"));
        assert!(!dir.path().join("db.csv").exists());
    }

    #[test]
    fn table_then_rows() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("table.csv");
        cmd_table(TableArgs { file: file.clone(), max: 4 }).unwrap();

        let ledger = open_existing(&file).unwrap();
        assert_eq!(ledger.len().unwrap(), 16);

        let args = RowsArgs {
            file: file.clone(),
            indices: vec![15, 0],
        };
        cmd_rows(args, &OutputFormat::Json).unwrap();

        let args = RowsArgs {
            file,
            indices: vec![16],
        };
        assert!(cmd_rows(args, &OutputFormat::Text).is_err());
    }

    #[test]
    fn rows_on_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let args = RowsArgs {
            file: dir.path().join("missing.csv"),
            indices: vec![],
        };
        assert!(cmd_rows(args, &OutputFormat::Text).is_err());
    }

    #[test]
    fn strings_display_bare() {
        assert_eq!(display_value(&json!("Ada")), "Ada");
        assert_eq!(display_value(&json!({ "a": 1 })), r#"{"a":1}"#);
        assert_eq!(display_value(&json!(3)), "3");
    }
}
