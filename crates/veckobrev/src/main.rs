//! `veckobrev` command-line entry point.

#![deny(unsafe_code)]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use veckobrev::RunInput;
use veckobrev::run::{self, resolve_week};
use veckobrev_core::logging::init_subscriber;
use veckobrev_extract::{PageSource, html_to_text, parse_page_text};
use veckobrev_settings::{VeckobrevSettings, load_settings, load_settings_from_path};
use veckobrev_snapshot::FileSnapshotStore;

#[derive(Debug, Parser)]
#[command(
    name = "veckobrev",
    about = "Weekly school and calendar digest with change notifications"
)]
struct Cli {
    /// Settings file (default: ~/.veckobrev/settings.json).
    #[arg(long, global = true, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the highlights of one school page.
    Extract(ExtractArgs),
    /// Render the weekly digest.
    Digest(DigestArgs),
    /// Store this run's snapshot as the baseline for the week.
    Capture(SnapshotArgs),
    /// Print what changed since the stored snapshot.
    Diff(DiffArgs),
}

#[derive(Debug, Args)]
struct ExtractArgs {
    /// Person the page belongs to.
    #[arg(long)]
    person: String,

    /// Class label shown next to the name.
    #[arg(long = "class", value_name = "LABEL")]
    class_label: Option<String>,

    /// Where the page came from.
    #[arg(long, default_value = "")]
    url: String,

    /// The file is HTML rather than plain text.
    #[arg(long)]
    html: bool,

    /// Target ISO week number.
    #[arg(long)]
    week: u32,

    /// Page file.
    file: PathBuf,
}

#[derive(Debug, Args)]
struct WeekArgs {
    /// Run input JSON with fetched pages and calendars.
    #[arg(long, value_name = "RUN.json")]
    input: PathBuf,

    /// Target ISO week (default: next week).
    #[arg(long)]
    week: Option<u32>,

    /// ISO year of the target week.
    #[arg(long)]
    year: Option<i32>,
}

#[derive(Debug, Args)]
struct DigestArgs {
    #[command(flatten)]
    target: WeekArgs,

    /// Write the digest here instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct SnapshotArgs {
    #[command(flatten)]
    target: WeekArgs,

    /// Digest that was sent, to record its school section.
    #[arg(long, value_name = "FILE")]
    digest: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct DiffArgs {
    #[command(flatten)]
    snapshot: SnapshotArgs,

    /// Replace the stored snapshot with the current one afterwards.
    #[arg(long)]
    update: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _ = init_subscriber(cli.verbose);

    let settings = match &cli.settings {
        Some(path) => load_settings_from_path(path),
        None => load_settings(),
    }
    .context("failed to load settings")?;

    match cli.command {
        Command::Extract(args) => extract(&settings, &args),
        Command::Digest(args) => digest(&settings, &args),
        Command::Capture(args) => {
            let snapshot = current_snapshot(&settings, &args)?;
            run::capture(&store(&settings), &snapshot)
        }
        Command::Diff(args) => {
            let snapshot = current_snapshot(&settings, &args.snapshot)?;
            if let Some(message) = run::check_updates(&store(&settings), &snapshot, &settings, args.update)? {
                println!("{message}");
            }
            Ok(())
        }
    }
}

fn extract(settings: &VeckobrevSettings, args: &ExtractArgs) -> Result<()> {
    let content = read_file(&args.file)?;
    let text = if args.html { html_to_text(&content) } else { content };
    let rules = run::compile_rules(settings)?;
    let source = PageSource {
        person_name: &args.person,
        class_label: args.class_label.as_deref(),
        url: &args.url,
    };
    let info = parse_page_text(source, &text, Some(args.week), &rules);
    for line in &info.highlights {
        println!("{line}");
    }
    Ok(())
}

fn digest(settings: &VeckobrevSettings, args: &DigestArgs) -> Result<()> {
    let (input, week) = load_target(&args.target)?;
    let body = run::render(settings, &input, week)?;
    match &args.output {
        Some(path) => std::fs::write(path, format!("{body}\n"))
            .with_context(|| format!("failed to write digest: {}", path.display())),
        None => {
            println!("{body}");
            Ok(())
        }
    }
}

fn current_snapshot(
    settings: &VeckobrevSettings,
    args: &SnapshotArgs,
) -> Result<veckobrev_snapshot::Snapshot> {
    let (input, week) = load_target(&args.target)?;
    let digest = args.digest.as_deref().map(read_file).transpose()?;
    run::build_snapshot(settings, &input, week, digest.as_deref())
}

fn load_target(args: &WeekArgs) -> Result<(RunInput, veckobrev_core::IsoWeek)> {
    let input = RunInput::load(&args.input)?;
    let week = resolve_week(args.week, args.year, Local::now().date_naive())?;
    Ok((input, week))
}

fn store(settings: &VeckobrevSettings) -> FileSnapshotStore {
    FileSnapshotStore::new(settings.snapshot.resolved_dir())
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
