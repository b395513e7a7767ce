//! Lease contract generator
//!
//! Reads a contract record (JSON object of field name to value), fills the
//! house lease pages and writes them as `<name>_<n>.html`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use lease_engine::{
    ContractRecord, DirectorySink, DirectoryTemplates, DocumentComposer, DocumentSet,
    EmbeddedTemplates, EngineConfig, GenerationError, MemorySink, OutputSink, PageTable,
    TemplateSource,
};
use tokio_util::sync::CancellationToken;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SUCCESS_MESSAGE: &str = "계약서가 성공적으로 생성되었습니다";
const FAILURE_MESSAGE: &str = "계약서 생성 중 오류가 발생했습니다";

/// Command-line arguments for the lease generator
#[derive(Parser, Debug)]
#[command(name = "lease-cli")]
#[command(version, about = "Generate house lease contract pages from a contract record")]
struct Args {
    /// Contract record (JSON)
    #[arg(short, long)]
    record: PathBuf,

    /// Engine configuration (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Template directory; the embedded pages are used when omitted
    #[arg(long)]
    templates: Option<PathBuf>,

    /// Output directory, overrides `[output] directory`
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Render without writing any files
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_record(path: &Path) -> anyhow::Result<ContractRecord> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read record file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse record file: {}", path.display()))
}

fn load_config(args: &Args) -> anyhow::Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(out) = &args.out {
        config.output.directory = out.clone();
    }
    Ok(config)
}

async fn generate<S, O>(
    source: S,
    sink: O,
    config: EngineConfig,
    record: &ContractRecord,
    cancel: CancellationToken,
) -> anyhow::Result<DocumentSet>
where
    S: TemplateSource,
    O: OutputSink,
{
    let composer = DocumentComposer::new(source, sink, PageTable::house_lease()?, config)
        .with_cancellation(cancel);

    composer.generate(record).await.map_err(|err| {
        if let GenerationError::OutputSink { delivered, .. } = &err {
            tracing::warn!(delivered = delivered.len(), "Pages written before the failure");
        }
        anyhow::Error::new(err)
    })
}

/// Pick the sink, then run
async fn generate_from<S: TemplateSource>(
    source: S,
    args: &Args,
    config: EngineConfig,
    record: &ContractRecord,
    cancel: CancellationToken,
) -> anyhow::Result<DocumentSet> {
    if args.dry_run {
        generate(source, MemorySink::default(), config, record, cancel).await
    } else {
        let sink = DirectorySink::new(config.output.directory.clone(), config.document.clone());
        generate(source, sink, config, record, cancel).await
    }
}

async fn run(args: &Args, cancel: CancellationToken) -> anyhow::Result<DocumentSet> {
    let record = load_record(&args.record)?;
    let config = load_config(args)?;
    info!(fields = record.len(), "Contract record loaded");

    match &args.templates {
        Some(dir) => {
            let source = DirectoryTemplates::new(dir, config.document.clone());
            generate_from(source, args, config, &record, cancel).await
        }
        None => generate_from(EmbeddedTemplates, args, config, &record, cancel).await,
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, stopping after the current page");
            on_interrupt.cancel();
        }
    });

    match run(&args, cancel).await {
        Ok(documents) => {
            if args.dry_run {
                for generated in documents.iter() {
                    println!("{}: {} bytes", generated.page, generated.text.len());
                }
            }
            println!("{}", SUCCESS_MESSAGE);
        }
        Err(err) => {
            eprintln!("{}: {:#}", FAILURE_MESSAGE, err);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(record: PathBuf) -> Args {
        Args {
            record,
            config: None,
            templates: None,
            out: None,
            dry_run: true,
            verbose: false,
        }
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from([
            "lease-cli",
            "--record",
            "contract.json",
            "--out",
            "out",
            "--dry-run",
        ]);
        assert_eq!(args.record, PathBuf::from("contract.json"));
        assert_eq!(args.out, Some(PathBuf::from("out")));
        assert!(args.dry_run);
        assert!(!args.verbose);
    }

    #[test]
    fn test_out_overrides_config() {
        let mut args = args(PathBuf::from("contract.json"));
        args.out = Some(PathBuf::from("elsewhere"));

        let config = load_config(&args).unwrap();
        assert_eq!(config.output.directory, PathBuf::from("elsewhere"));
    }

    #[test]
    fn test_load_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contract.json");
        fs::write(
            &path,
            r#"{"landlord_name": "김철수", "deposit": 100000000, "contract_start": "2024-03-01"}"#,
        )
        .unwrap();

        let record = load_record(&path).unwrap();
        assert_eq!(record.len(), 3);
        assert_eq!(record.text("landlord_name").as_deref(), Some("김철수"));
        assert!(load_record(&dir.path().join("missing.json")).is_err());
    }

    #[tokio::test]
    async fn test_run_writes_pages() {
        let dir = tempfile::tempdir().unwrap();
        let record_path = dir.path().join("contract.json");
        fs::write(&record_path, r#"{"landlord_name": "김철수"}"#).unwrap();

        let mut args = args(record_path);
        args.dry_run = false;
        args.out = Some(dir.path().join("out"));

        let documents = run(&args, CancellationToken::new()).await.unwrap();
        assert_eq!(documents.len(), 5);
        for n in 1..=5 {
            let path = dir.path().join(format!("out/House_Lease_Agreement_{}.html", n));
            assert!(path.exists(), "{} not written", path.display());
        }
    }
}
