//! ctr-catalog CLI
//!
//! Command-line interface for cataloging and launching 3DS cartridge images.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use ctr_catalog_core::{ProbeEvent, ProbeObserver, ProbeOutcome};
use ctr_catalog_lib::{
    Catalog, CatalogBuilder, CatalogConfig, EmulatorLauncher, LibrarySettings, load_settings,
    save_settings, settings_path,
};

#[derive(Parser)]
#[command(name = "ctr-catalog")]
#[command(about = "Catalog and launch 3DS cartridge images", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan the games directory and list every cataloged image
    Scan {
        /// Games directory (defaults to the configured roms path)
        #[arg(short, long)]
        roms: Option<PathBuf>,

        /// Emit records as JSON instead of human-readable output
        #[arg(long)]
        json: bool,
    },

    /// Probe a single file and explain the outcome
    Probe {
        /// File to probe
        file: PathBuf,
    },

    /// Launch a cataloged game through the configured emulator
    Launch {
        /// Program id of the game to launch
        program_id: String,

        /// Games directory (defaults to the configured roms path)
        #[arg(long)]
        roms: Option<PathBuf>,

        /// Emulator executable (defaults to the configured emulator path)
        #[arg(long)]
        emulator: Option<PathBuf>,
    },

    /// Manage persisted settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current settings
    Show,

    /// Update settings
    Set {
        /// Games directory to remember
        #[arg(long)]
        roms: Option<PathBuf>,

        /// Emulator executable to remember
        #[arg(long)]
        emulator: Option<PathBuf>,
    },

    /// Print the settings file path
    Path,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan { roms, json } => run_scan(roms, json),
        Commands::Probe { file } => run_probe(file),
        Commands::Launch {
            program_id,
            roms,
            emulator,
        } => run_launch(&program_id, roms, emulator),
        Commands::Config { action } => match action {
            ConfigAction::Show => run_config_show(),
            ConfigAction::Set { roms, emulator } => run_config_set(roms, emulator),
            ConfigAction::Path => {
                println!("{}", settings_path().display());
                ExitCode::SUCCESS
            }
        },
    }
}

/// Resolve the games directory from a flag or persisted settings.
fn resolve_roms_path(flag: Option<PathBuf>, settings: &LibrarySettings) -> Option<PathBuf> {
    flag.or_else(|| settings.roms_path.clone())
}

fn build_catalog(roms: Option<PathBuf>) -> Result<Catalog, ExitCode> {
    let settings = load_settings();
    let Some(roms_path) = resolve_roms_path(roms, &settings) else {
        eprintln!(
            "{} No games directory configured.",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
        );
        eprintln!("Pass --roms <dir> or run 'ctr-catalog config set --roms <dir>'.");
        return Err(ExitCode::FAILURE);
    };

    println!(
        "Scanning games in: {}",
        roms_path.display().if_supports_color(Stdout, |t| t.cyan()),
    );

    CatalogBuilder::new(CatalogConfig { roms_path })
        .build()
        .map_err(|e| {
            eprintln!(
                "{} {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                e,
            );
            ExitCode::FAILURE
        })
}

/// Run the scan command.
fn run_scan(roms: Option<PathBuf>, json: bool) -> ExitCode {
    let catalog = match build_catalog(roms) {
        Ok(catalog) => catalog,
        Err(code) => return code,
    };

    if json {
        match serde_json::to_string_pretty(catalog.games()) {
            Ok(output) => println!("{output}"),
            Err(e) => {
                eprintln!("Error serializing catalog: {e}");
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    println!();
    for game in catalog.games() {
        println!(
            "  {} [{}]",
            game.title.if_supports_color(Stdout, |t| t.bold()),
            game.program_id.if_supports_color(Stdout, |t| t.cyan()),
        );
        println!(
            "    {}",
            game.source_path
                .display()
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    if catalog.is_empty() {
        println!(
            "  {}",
            "No cartridge images found".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    println!();
    println!("{}", "Summary:".if_supports_color(Stdout, |t| t.bold()));
    println!(
        "  {} {} games cataloged, {} files skipped",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        catalog.len(),
        catalog.skipped(),
    );
    for (path, error) in catalog.io_errors() {
        println!(
            "  {} {}: {}",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            path.display(),
            error,
        );
    }

    ExitCode::SUCCESS
}

/// Observer that narrates probe progress for the probe command.
struct EventPrinter;

impl ProbeObserver for EventPrinter {
    fn on_event(&self, event: ProbeEvent<'_>) {
        match event {
            ProbeEvent::PartitionLocated { offset, size } => {
                println!("  content partition at 0x{offset:X} ({size} bytes)");
            }
            ProbeEvent::FileEntry { name, offset, size } => {
                println!("  file table entry \"{name}\" at 0x{offset:X} ({size} bytes)");
            }
            ProbeEvent::Rejected(reason) => {
                println!(
                    "  {} {}",
                    "rejected:".if_supports_color(Stdout, |t| t.yellow()),
                    reason.description(),
                );
            }
        }
    }
}

/// Run the probe command. Exit status: 0 = game, 1 = not a game, 2 = error.
fn run_probe(file: PathBuf) -> ExitCode {
    println!("Probing: {}", file.display());

    match ctr_catalog_core::probe_with_observer(&file, &EventPrinter) {
        Ok(ProbeOutcome::Game(record)) => {
            println!(
                "{} {} [{}]",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                record.title.if_supports_color(Stdout, |t| t.bold()),
                record.program_id.if_supports_color(Stdout, |t| t.cyan()),
            );
            ExitCode::SUCCESS
        }
        Ok(ProbeOutcome::NotAGame) => {
            println!(
                "{}",
                "Not a recognized cartridge image".if_supports_color(Stdout, |t| t.dimmed()),
            );
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!(
                "{} {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                e,
            );
            ExitCode::from(2)
        }
    }
}

/// Run the launch command.
fn run_launch(program_id: &str, roms: Option<PathBuf>, emulator: Option<PathBuf>) -> ExitCode {
    let settings = load_settings();
    let Some(emulator_path) = emulator.or_else(|| settings.emulator_path.clone()) else {
        eprintln!(
            "{} No emulator configured.",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
        );
        eprintln!("Pass --emulator <path> or run 'ctr-catalog config set --emulator <path>'.");
        return ExitCode::FAILURE;
    };

    let catalog = match build_catalog(roms) {
        Ok(catalog) => catalog,
        Err(code) => return code,
    };

    let Some(game) = catalog.get(program_id) else {
        eprintln!(
            "{} No cataloged game with program id {}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            program_id,
        );
        return ExitCode::FAILURE;
    };

    match EmulatorLauncher::new(emulator_path).launch(game) {
        Ok(child) => {
            println!(
                "{} Launched {} (pid {})",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                game.title.if_supports_color(Stdout, |t| t.bold()),
                child.id(),
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!(
                "{} {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                e,
            );
            ExitCode::FAILURE
        }
    }
}

/// Show current settings.
fn run_config_show() -> ExitCode {
    let settings = load_settings();
    let show = |label: &str, value: &Option<PathBuf>| match value {
        Some(path) => println!(
            "  {} {}",
            format!("{label}:").if_supports_color(Stdout, |t| t.cyan()),
            path.display(),
        ),
        None => println!(
            "  {} {}",
            format!("{label}:").if_supports_color(Stdout, |t| t.cyan()),
            "not set".if_supports_color(Stdout, |t| t.yellow()),
        ),
    };

    show("roms_path", &settings.roms_path);
    show("emulator_path", &settings.emulator_path);
    ExitCode::SUCCESS
}

/// Update and persist settings.
fn run_config_set(roms: Option<PathBuf>, emulator: Option<PathBuf>) -> ExitCode {
    if roms.is_none() && emulator.is_none() {
        eprintln!("Nothing to set. Pass --roms and/or --emulator.");
        return ExitCode::FAILURE;
    }

    let mut settings = load_settings();
    if let Some(path) = roms {
        settings.roms_path = Some(path);
    }
    if let Some(path) = emulator {
        settings.emulator_path = Some(path);
    }

    match save_settings(&settings) {
        Ok(()) => {
            println!(
                "{} Settings saved to {}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                settings_path().display().if_supports_color(Stdout, |t| t.cyan()),
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!(
                "{} Failed to save settings: {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                e,
            );
            ExitCode::FAILURE
        }
    }
}
