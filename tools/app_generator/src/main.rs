use appgen_core::adapters::model::RawResponseFile;
use appgen_core::audit::report::TracingReporter;
use appgen_core::config::GeneratorConfig;
use appgen_core::error::CoreResult;
use appgen_core::run::pipeline::{AppGenerator, GenerationOutcome};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Generate a React project from a model response into a copy of a template.
///
/// Only `src/` (and optionally `public/`) paths are written, and only inside
/// the freshly created output directory.
#[derive(Debug, Parser)]
#[command(name = "app_generator")]
struct Cli {
    /// JSON file with a base configuration; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// User requirement text sent with the request.
    #[arg(long)]
    prompt: Option<String>,

    #[arg(long)]
    model: Option<String>,

    /// Path to the React template root.
    #[arg(long)]
    app_dir: Option<PathBuf>,

    /// Output base dir; each run lands in its own `<uid>` subdirectory.
    #[arg(long)]
    out_root: Option<PathBuf>,

    /// Where parsed responses are archived as `<uid>.json`.
    #[arg(long)]
    responses_dir: Option<PathBuf>,

    /// Allow writing under public/ as well as src/.
    #[arg(long, conflicts_with = "no_public")]
    allow_public: bool,

    /// Only allow writing under src/, even if the config file allows public/.
    #[arg(long)]
    no_public: bool,

    /// Keep files the template already has instead of replacing them.
    #[arg(long)]
    no_overwrite: bool,

    /// Only print the files that would be written.
    #[arg(long)]
    dry_run: bool,

    /// File holding the raw model response text.
    #[arg(long)]
    raw_response_file: PathBuf,

    /// Enable debug logging.
    #[arg(long, short)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> CoreResult<(GeneratorConfig, PathBuf)> {
        let mut cfg = match &self.config {
            Some(path) => GeneratorConfig::from_json_file(path)?,
            None => GeneratorConfig::default(),
        };
        if let Some(p) = self.prompt {
            cfg.prompt = p;
        }
        if let Some(m) = self.model {
            cfg.model = m;
        }
        if let Some(d) = self.app_dir {
            cfg.template_dir = d;
        }
        if let Some(d) = self.out_root {
            cfg.out_root = d;
        }
        if let Some(d) = self.responses_dir {
            cfg.responses_dir = d;
        }
        if self.allow_public {
            cfg.allow_public = true;
        }
        if self.no_public {
            cfg.allow_public = false;
        }
        if self.no_overwrite {
            cfg.overwrite = false;
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
        Ok((cfg, self.raw_response_file))
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> CoreResult<GenerationOutcome> {
    let (cfg, raw_response_file) = cli.into_config()?;
    let client = RawResponseFile::new(raw_response_file);
    let mut reporter = TracingReporter;
    AppGenerator::new(cfg).generate(&client, &mut reporter)
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let outcome = match run(cli) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("generation failed: {}", e);
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    println!("uid: {}", outcome.uid());
    match outcome {
        GenerationOutcome::DryRun { paths, .. } => {
            println!("dry run: {} files would be written", paths.len());
        }
        GenerationOutcome::Generated { summary, result } => {
            tracing::info!(target_dir = %summary.target_dir, "app generated");
            println!(
                "wrote {} files, skipped {}",
                result.written.len(),
                result.skipped.len()
            );
            println!("Steps:");
            println!("Go to folder `cd {}`", summary.target_dir);
            println!("run `npm install` to install dependencies");
            println!("run `npm run dev` to start the app");
            if let Ok(json) = serde_json::to_string_pretty(&summary) {
                tracing::debug!("summary:\n{}", json);
            }
        }
    }
}
