use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use whatsnew::config::Config;
use whatsnew::descriptor;
use whatsnew::engine::{PresentationObserver, TerminalCause};
use whatsnew::models::{ContentRef, HapticFeedback, Version, WhatsNew};
use whatsnew::render::render_screen;
use whatsnew::{PresentationEngine, SheetGate};

#[derive(Parser)]
#[command(name = "whatsnew")]
#[command(about = "Present version-gated what's-new screens in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Present the release matching the app version, unless already seen
    Present {
        /// Release descriptor file (JSON)
        file: PathBuf,

        /// App version to present for (defaults to the configured version)
        #[arg(short, long)]
        version: Option<Version>,

        /// Present even if the version was already presented
        #[arg(short, long)]
        force: bool,
    },
    /// Validate a release descriptor file
    Check {
        file: PathBuf,
    },
    /// Show whether a version was already presented
    Status {
        version: Version,
    },
    /// List presented versions
    History,
    /// Forget all presented versions
    Reset,
}

/// Initialize tracing on stderr so stdout stays free for the presentation
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "whatsnew=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = Config::load();

    match cli.command {
        Commands::Present {
            file,
            version,
            force,
        } => {
            let releases = load_releases(&file)?;
            let current = version.unwrap_or_else(|| config.current_version());
            let store = config.open_store()?;
            let gate = SheetGate::with_store(store.clone()).with_advance_policy(config.advance_policy);

            let selected = if force {
                SheetGate::default().select(&releases, &current)
            } else {
                gate.select(&releases, &current)
            };

            let Some(whats_new) = selected.cloned() else {
                println!("Nothing new to present for {}", current);
                return Ok(());
            };

            let engine = if force {
                PresentationEngine::new(whats_new, Some(store))
                    .with_advance_policy(config.advance_policy)
            } else {
                match gate.begin(whats_new) {
                    Some(engine) => engine,
                    None => return Ok(()),
                }
            };

            run_presentation(engine.with_observer(TerminalHost))?;
        }
        Commands::Check { file } => {
            let releases = descriptor::load(&file)
                .with_context(|| format!("Failed to load {}", file.display()))?;

            let mut failed = false;
            for release in releases {
                let version = release.version;
                let missing = release.missing_feature_count();
                match release.into_whats_new() {
                    Ok(whats_new) => {
                        println!(
                            "{}: {} group(s), {} feature(s){}",
                            version,
                            whats_new.group_count(),
                            whats_new
                                .feature_groups
                                .iter()
                                .map(|g| g.features.len())
                                .sum::<usize>(),
                            if missing > 0 {
                                format!(", {} without content", missing)
                            } else {
                                String::new()
                            }
                        );
                    }
                    Err(e) => {
                        failed = true;
                        println!("{}: {}", version, e);
                    }
                }
            }

            if failed {
                anyhow::bail!("{} contains invalid releases", file.display());
            }
        }
        Commands::Status { version } => {
            let store = config.open_store()?;
            if store.has_presented(&version)? {
                println!("{} has been presented", version);
            } else {
                println!("{} has not been presented", version);
            }
        }
        Commands::History => {
            let store = config.open_store()?;
            let versions = store.presented_versions()?;
            if versions.is_empty() {
                println!("No versions presented yet");
            }
            for version in versions {
                println!("{}", version);
            }
        }
        Commands::Reset => {
            let store = config.open_store()?;
            store.remove_all()?;
            println!("Presentation history cleared");
        }
    }

    Ok(())
}

fn load_releases(file: &Path) -> Result<Vec<WhatsNew>> {
    descriptor::load(file)
        .with_context(|| format!("Failed to load {}", file.display()))?
        .into_iter()
        .map(|release| release.into_whats_new().map_err(anyhow::Error::from))
        .collect()
}

/// Read one key per line: Enter or `n` presses the primary action, `s` the
/// secondary action, `q` dismisses.
fn run_presentation(mut engine: PresentationEngine) -> Result<()> {
    engine.start()?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while !engine.is_terminal() {
        print!("{}> ", render_screen(&engine));
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            engine.request_dismiss();
            break;
        };

        match line?.trim() {
            "" | "n" => {
                engine.press_primary()?;
            }
            "s" => {
                engine.press_secondary();
            }
            "q" => {
                engine.request_dismiss();
            }
            other => println!("Unknown key '{}'", other),
        }
    }

    Ok(())
}

struct TerminalHost;

impl PresentationObserver for TerminalHost {
    fn haptic(&mut self, feedback: &HapticFeedback) {
        tracing::debug!("Haptic feedback: {:?}", feedback);
    }

    fn present_custom_view(&mut self, content: &ContentRef) {
        println!("-- {} --", content);
    }

    fn close_requested(&mut self, cause: TerminalCause) {
        match cause {
            TerminalCause::Exhausted => println!("All caught up."),
            TerminalCause::Dismissed => println!("Dismissed."),
        }
    }
}
