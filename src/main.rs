//! sehat-admin - member health statistics for the Hidup Sehat admin
//!
//! A CLI that loads the member collection from a JSON key-value store,
//! computes dashboard statistics and renders, lists, exports or edits
//! the members.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (config, store access, write failure, etc.)
//!   2 - Nothing to act on (member not found, nothing to export, store not empty on seed)

mod analysis;
mod cli;
mod config;
mod models;
mod report;
mod store;

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use cli::{Args, Command, OutputFormat};
use config::{Config, CONFIG_FILE_NAME};
use report::{DashboardReport, ExportError, ReportOptions};
use std::path::Path;
use store::{FileStore, LoadOutcome, MemberRepository};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

const EXIT_NOTHING_TO_DO: i32 = 2;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle init-config early (no logging needed)
    if args.command == Command::InitConfig {
        return handle_init_config();
    }

    init_logging(&args);

    info!("sehat-admin v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run(args) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            error!("Command failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle init-config: generate a default .sehat.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!("⚠️  {} already exists. Remove it first or edit it manually.", CONFIG_FILE_NAME);
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to point at your member store and tune the dashboard.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// Logs go to stderr so dashboards and listings can be piped.
fn init_logging(args: &Args) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Run the selected command. Returns the exit code.
fn run(args: Args) -> Result<i32> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let store = FileStore::new(config.store.dir.clone());
    let mut repo = MemberRepository::new(store, config.store.key.clone());
    info!(
        "Member store: {} (key '{}')",
        repo.store().dir().display(),
        repo.key()
    );

    match args.command {
        Command::Dashboard {
            format,
            output,
            sample,
            recent,
        } => {
            let format = format.unwrap_or(config.report.format);
            let output = output.or_else(|| config.report.output.clone());
            let recent = recent.unwrap_or(config.report.recent_count);
            let options = ReportOptions {
                source: store_source(&repo),
                sample_data: false,
                recent_count: recent,
                trend_months: config.report.trend_months,
            };
            handle_dashboard(&repo, format, output.as_deref(), sample, options)
        }
        Command::Members { search, status } => {
            let filter = analysis::MemberFilter {
                search,
                status: status.map(Into::into),
            };
            handle_members(&repo, &filter)
        }
        Command::Show { member } => handle_show(&repo, &member),
        Command::Delete { member } => handle_delete(&mut repo, &member),
        Command::Export { dir } => {
            let dir = dir.unwrap_or_else(|| config.report.export_dir.clone());
            handle_export(&repo, &dir)
        }
        Command::Seed { force } => handle_seed(&mut repo, force),
        Command::InitConfig => {
            handle_init_config()?;
            Ok(0)
        }
    }
}

fn store_source(repo: &MemberRepository<FileStore>) -> String {
    repo.store()
        .dir()
        .join(format!("{}.json", repo.key()))
        .display()
        .to_string()
}

fn handle_dashboard(
    repo: &MemberRepository<FileStore>,
    format: OutputFormat,
    output: Option<&Path>,
    sample: bool,
    options: ReportOptions,
) -> Result<i32> {
    let (members, sample_data) = if sample {
        repo.load_or_sample()
    } else {
        repo.load().map(|members| (members, false))
    }
    .context("Failed to load members")?;

    if members.is_empty() {
        warn!("No members found; rendering an empty dashboard");
    }

    let options = ReportOptions {
        sample_data,
        ..options
    };
    let report = DashboardReport::build(&members, &options, Utc::now());

    let rendered = match format {
        OutputFormat::Json => report::generate_json_report(&report)?,
        OutputFormat::Markdown => report::generate_markdown_report(&report),
    };

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write dashboard to {}", path.display()))?;
            println!("✅ Dashboard saved to: {}", path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(0)
}

fn handle_members(
    repo: &MemberRepository<FileStore>,
    filter: &analysis::MemberFilter,
) -> Result<i32> {
    let members = repo.load().context("Failed to load members")?;
    let matching = analysis::filter_members(&members, filter);
    debug!("{} of {} members match", matching.len(), members.len());

    print!("{}", report::members_table_markdown(&matching));
    Ok(0)
}

fn handle_show(repo: &MemberRepository<FileStore>, key: &str) -> Result<i32> {
    let members = repo.load().context("Failed to load members")?;

    match analysis::find_member(&members, key) {
        Some(member) => {
            print!("{}", report::member_detail(member));
            Ok(0)
        }
        None => {
            eprintln!("⚠️  No member found for '{}'", key);
            Ok(EXIT_NOTHING_TO_DO)
        }
    }
}

fn handle_delete(repo: &mut MemberRepository<FileStore>, key: &str) -> Result<i32> {
    match repo.delete(key).context("Failed to delete member")? {
        Some(member) => {
            println!("🗑️  Deleted {} ({})", member.full_name, member.display_key());
            Ok(0)
        }
        None => {
            eprintln!("⚠️  No member found for '{}'", key);
            Ok(EXIT_NOTHING_TO_DO)
        }
    }
}

fn handle_export(repo: &MemberRepository<FileStore>, dir: &Path) -> Result<i32> {
    let members = repo.load().context("Failed to load members")?;
    let today = Local::now().date_naive();

    match report::export_members(&members, dir, today) {
        Ok(path) => {
            println!("✅ Exported {} members to: {}", members.len(), path.display());
            Ok(0)
        }
        Err(ExportError::NoMembers) => {
            eprintln!("⚠️  No member data to export.");
            Ok(EXIT_NOTHING_TO_DO)
        }
        Err(e) => Err(e.into()),
    }
}

fn handle_seed(repo: &mut MemberRepository<FileStore>, force: bool) -> Result<i32> {
    let existing = repo.load_outcome().context("Failed to load members")?;

    if existing.holds_data() && !force {
        match existing {
            LoadOutcome::Loaded { members, skipped } => eprintln!(
                "⚠️  Store already holds {} members ({} unreadable). Use --force to replace them.",
                members.len(),
                skipped
            ),
            _ => eprintln!(
                "⚠️  Store holds data that could not be read. Use --force to replace it."
            ),
        }
        return Ok(EXIT_NOTHING_TO_DO);
    }

    let count = repo.seed_sample().context("Failed to write sample members")?;
    println!("✅ Seeded {} sample members into {}", count, store_source(repo));
    Ok(0)
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", CONFIG_FILE_NAME);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {:#}", e);
            Ok(Config::default())
        }
    }
}
