use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use log::info;

use rehearse_core::Clock;
use services::{ArchiveService, FeedbackGenerator, RandomFeedback};
use storage::JsonArchive;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidArchivePath { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidArchivePath { raw } => {
                write!(f, "invalid --archive value: {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--archive <path>] [--seed-demo]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --archive rehearse-archive.json");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  REHEARSE_ARCHIVE, REHEARSE_SEED_DEMO, RUST_LOG");
}

struct Args {
    archive_path: String,
    seed_demo: bool,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut archive_path = std::env::var("REHEARSE_ARCHIVE")
            .ok()
            .unwrap_or_else(|| "rehearse-archive.json".into());
        let mut seed_demo = std::env::var("REHEARSE_SEED_DEMO")
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--archive" => {
                    let value = require_value(args, "--archive")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidArchivePath { raw: value });
                    }
                    archive_path = value;
                }
                "--seed-demo" => {
                    seed_demo = true;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            archive_path,
            seed_demo,
        })
    }
}

struct DesktopApp {
    archive: Arc<ArchiveService>,
    feedback: Arc<dyn FeedbackGenerator>,
    clock: Clock,
}

impl UiApp for DesktopApp {
    fn archive(&self) -> Arc<ArchiveService> {
        Arc::clone(&self.archive)
    }

    fn feedback(&self) -> Arc<dyn FeedbackGenerator> {
        Arc::clone(&self.feedback)
    }

    fn clock(&self) -> Clock {
        self.clock
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Open the archive up front so a malformed file is reported (and
    // recovered from) before any window appears.
    let repository = Arc::new(JsonArchive::open(&args.archive_path)?);
    info!("archive file: {}", repository.path().display());

    let clock = Clock::default_clock();
    let archive =
        Arc::new(ArchiveService::new(clock, repository).with_demo_seed(args.seed_demo));

    let app = DesktopApp {
        archive,
        feedback: Arc::new(RandomFeedback::new()),
        clock,
    };
    let app: Arc<dyn UiApp> = Arc::new(app);
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Rehearse")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::init();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
