//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use javadocset_core::pipeline::{BuildConfig, BuildReport, ProgressReporter};
use javadocset_shared::{
    AppConfig, DocsetLayout, PlistOptions, expand_home, init_config, load_config,
};
use javadocset_storage::Storage;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Turn generated Javadoc into Dash/Zeal docsets.
#[derive(Parser)]
#[command(
    name = "javadocset",
    version,
    about = "Turn a generated Javadoc tree into an indexed docset for Dash and Zeal.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Build a docset from a Javadoc output directory.
    Build {
        /// Javadoc output directory (contains index-all.html).
        javadoc: PathBuf,

        /// Docset name; the bundle is written to <out>/<name>.docset.
        name: String,

        /// Directory to create the docset in (defaults to config output_dir).
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Replace an existing docset with the same name.
        #[arg(short, long)]
        force: bool,

        /// Landing page recorded in Info.plist.
        #[arg(long)]
        index_page: Option<String>,
    },

    /// Summarize the search index of an existing docset.
    Inspect {
        /// Path to a .docset bundle.
        docset: PathBuf,

        /// List entries whose name starts with this prefix.
        #[arg(short, long)]
        query: Option<String>,

        /// Maximum entries listed for --query.
        #[arg(long, default_value = "20")]
        limit: u32,

        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "javadocset=info",
        1 => "javadocset=debug",
        _ => "javadocset=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Build {
            javadoc,
            name,
            out,
            force,
            index_page,
        } => cmd_build(javadoc, name, out, force, index_page).await,
        Command::Inspect {
            docset,
            query,
            limit,
            json,
        } => cmd_inspect(docset, query.as_deref(), limit, json).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

async fn cmd_build(
    javadoc: PathBuf,
    name: String,
    out: Option<PathBuf>,
    force: bool,
    index_page: Option<String>,
) -> Result<()> {
    let config = load_config()?;

    let output_root = out.unwrap_or_else(|| expand_home(&config.defaults.output_dir));

    let mut plist = PlistOptions::from(&config);
    if let Some(page) = index_page {
        plist.index_page = page;
    }

    let build_config = BuildConfig {
        javadoc_path: javadoc,
        output_root,
        name,
        overwrite: force || config.defaults.overwrite,
        plist,
    };

    info!(
        javadoc = %build_config.javadoc_path.display(),
        name = %build_config.name,
        out = %build_config.output_root.display(),
        "building docset"
    );

    let reporter = CliProgress::new();
    let result = javadocset_core::pipeline::build_docset(&build_config, &reporter).await;
    if result.is_err() {
        reporter.spinner.abandon();
    }
    let report = result?;

    println!();
    println!("  Docset created successfully!");
    println!("  Path:    {}", report.docset_path.display());
    println!("  Entries: {}", report.entries);
    println!("  Skipped: {}", report.skipped);
    println!("  Files:   {}", report.copy.files);
    println!("  Time:    {:.1}s", report.elapsed.as_secs_f64());
    println!();

    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn listing_processed(&self, current: usize, total: usize) {
        if current % 500 == 0 || current == total {
            self.spinner
                .set_message(format!("Indexing symbols [{current}/{total}]"));
        }
    }

    fn done(&self, _report: &BuildReport) {
        self.spinner.finish_and_clear();
    }
}

// ---------------------------------------------------------------------------
// Inspect
// ---------------------------------------------------------------------------

async fn cmd_inspect(docset: PathBuf, query: Option<&str>, limit: u32, json: bool) -> Result<()> {
    let layout = DocsetLayout::at(docset);
    if !layout.root().is_dir() {
        return Err(eyre!(
            "'{}' is not a docset directory",
            layout.root().display()
        ));
    }

    let storage = Storage::open_readonly(&layout.index_db_path()).await?;
    let total = storage.count().await?;
    let by_kind = storage.count_by_kind().await?;
    let matches = match query {
        Some(prefix) => storage.search(prefix, limit).await?,
        None => Vec::new(),
    };

    if json {
        let counts: serde_json::Map<String, serde_json::Value> = by_kind
            .iter()
            .map(|(kind, n)| (kind.clone(), serde_json::Value::from(*n)))
            .collect();
        let output = serde_json::json!({
            "docset": layout.root(),
            "entries": total,
            "by_kind": counts,
            "matches": matches,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!();
    println!("  Docset:  {}", layout.root().display());
    println!("  Entries: {total}");
    for (kind, n) in &by_kind {
        println!("    {kind:<12} {n}");
    }
    if let Some(prefix) = query {
        println!();
        println!("  Matches for '{prefix}':");
        for entry in &matches {
            println!("    {:<12} {}  ({})", entry.kind, entry.name, entry.location);
        }
    }
    println!();

    Ok(())
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
