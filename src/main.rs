use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use whiteboard::config::Config;
use whiteboard::draw::NullSurface;
use whiteboard::export::default_export_path;
use whiteboard::notification::{DesktopNotifier, LogNotifier, Notifier};
use whiteboard::{InputState, script};

#[derive(Parser, Debug)]
#[command(name = "whiteboard")]
#[command(
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("WHITEBOARD_GIT_HASH"), ")"),
    about = "Freehand whiteboard with undo/redo and PNG/JPEG export"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a JSON event script and save the resulting canvas
    Replay {
        /// Event script to replay
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,

        /// Output image (.png, .jpg or .jpeg); defaults to the export directory
        #[arg(long, short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,

        /// Config file to use instead of ~/.config/whiteboard/config.toml
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,

        /// Report saves as desktop notifications
        #[arg(long, action = ArgAction::SetTrue)]
        notify: bool,
    },
    /// Write a documented default config file
    InitConfig {
        /// Replace an existing config file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
    /// Print the effective configuration as TOML
    PrintConfig {
        /// Config file to use instead of ~/.config/whiteboard/config.toml
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn run_replay(
    script_path: PathBuf,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
    notify: bool,
) -> Result<()> {
    let config = load_config(config_path.as_ref())?;
    let events = script::load_script(&script_path)?;

    let output = match output {
        Some(path) => path,
        None => default_export_path(&config.export)
            .context("Failed to prepare export directory")?,
    };

    let notifier: Box<dyn Notifier> = if notify {
        match DesktopNotifier::new() {
            Ok(notifier) => Box::new(notifier),
            Err(e) => {
                log::warn!("Desktop notifications unavailable: {e}");
                Box::new(LogNotifier)
            }
        }
    } else {
        Box::new(LogNotifier)
    };

    let mut input = InputState::from_config(&config, NullSurface)?.with_notifier(notifier);
    let report = script::replay(&mut input, &events, Some(output.as_path()))?;

    log::info!(
        "Replayed {} event(s): {} stroke(s), {} save(s)",
        report.events,
        input.session().history_len(),
        report.saved.len()
    );

    let saved = input
        .save_to(Some(output.as_path()))
        .with_context(|| format!("Failed to save {}", output.display()))?;
    if let Some(saved) = saved {
        println!("{}", saved.display());
    }

    if report.failed_saves > 0 {
        anyhow::bail!("{} save(s) in the script failed", report.failed_saves);
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Some(Command::Replay {
            script,
            output,
            config,
            notify,
        }) => run_replay(script, output, config, notify)?,
        Some(Command::InitConfig { force }) => {
            let path = Config::get_config_path()?;
            Config::create_default_file(&path, force)?;
            println!("{}", path.display());
        }
        Some(Command::PrintConfig { config }) => {
            let config = load_config(config.as_ref())?;
            print!("{}", config.to_toml()?);
        }
        None => {
            // No subcommand: show usage
            println!("whiteboard: Freehand whiteboard with undo/redo and PNG/JPEG export");
            println!();
            println!("Usage:");
            println!("  whiteboard replay SCRIPT -o board.png   Replay an event script and save");
            println!("  whiteboard init-config                  Write ~/.config/whiteboard/config.toml");
            println!("  whiteboard print-config                 Show the effective configuration");
            println!("  whiteboard --help                       Show help");
            println!();
            println!("Default controls:");
            println!("  - Draw: drag with the left button");
            println!("  - Undo / redo: Ctrl+Z / Ctrl+Y");
            println!("  - Brush / erase: B / E (X toggles)");
            println!("  - Colors: K (black), W (white), G (green), Y (yellow), R (red), Shift+B (blue)");
            println!("  - Width: + / -, presets 1-4");
            println!("  - Clear: Ctrl+C or Delete");
            println!("  - Save: Ctrl+S");
        }
    }

    Ok(())
}
