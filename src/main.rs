//! CLI entry point for hotkey-manager
//!
//! Provides command-line interface for validating descriptors, checking
//! them for conflicts, formatting them per platform and replaying scripted
//! keyboard sessions.

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::*;
use hotkey_manager::config::{expand_path, ManagerConfig};
use hotkey_manager::core::{
    format_for_display, format_with_labels, parse_hotkey, validate_hotkey, ConflictDetector,
    EventType, FormatDisplayOptions, KeyEvent, KeyPhase, ModifierState, Platform,
};
use hotkey_manager::manager::{HotkeyManager, HotkeyOptions, SequenceOptions};
use parking_lot::Mutex;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hotkey-manager")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate descriptors and check them for conflicts
    Check {
        /// Descriptors to check
        descriptors: Vec<String>,

        /// File with one descriptor per line (`#` starts a comment)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Platform used to resolve `Mod` (mac, windows, linux)
        #[arg(short, long)]
        platform: Option<Platform>,
    },

    /// Print the canonical form of a descriptor
    Parse {
        descriptor: String,

        #[arg(short, long)]
        platform: Option<Platform>,

        /// Print the parsed hotkey as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the display label of a descriptor
    Format {
        descriptor: String,

        #[arg(short, long)]
        platform: Option<Platform>,

        /// Use text labels instead of platform symbols
        #[arg(long)]
        labels: bool,

        /// Separator between parts on windows and linux
        #[arg(long)]
        separator: Option<String>,
    },

    /// Run a JSON script of registrations and key events
    Replay {
        /// Path to the replay script
        script: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            descriptors,
            file,
            platform,
        } => check_descriptors(descriptors, file.as_deref(), platform)?,
        Commands::Parse {
            descriptor,
            platform,
            json,
        } => parse_descriptor(&descriptor, platform, json)?,
        Commands::Format {
            descriptor,
            platform,
            labels,
            separator,
        } => format_descriptor(&descriptor, platform, labels, separator)?,
        Commands::Replay { script } => replay_script(&script)?,
    }

    Ok(())
}

/// Validate every descriptor and report conflicts between them
fn check_descriptors(
    mut descriptors: Vec<String>,
    file: Option<&Path>,
    platform: Option<Platform>,
) -> anyhow::Result<()> {
    if let Some(file) = file {
        let path = expand_path(file)?;
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        println!("{} Reading descriptors: {}", "→".cyan(), path.display());
        descriptors.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(str::to_string),
        );
    }

    if descriptors.is_empty() {
        anyhow::bail!("No descriptors given (pass them as arguments or with --file)");
    }

    let platform = platform.unwrap_or_else(hotkey_manager::core::detect_platform);
    let mut detector = ConflictDetector::new(platform);
    let mut invalid = 0;

    for descriptor in &descriptors {
        let result = validate_hotkey(descriptor);

        if result.valid {
            println!("{} {}", "✓".green(), descriptor.bold());
            detector.add_descriptor(descriptor, EventType::Keydown)?;
        } else {
            invalid += 1;
            println!("{} {}", "✗".red().bold(), descriptor.bold());
            for error in &result.errors {
                println!("    {} {}", "error:".red(), error);
            }
        }

        for warning in &result.warnings {
            println!("    {} {}", "warning:".yellow(), warning);
        }
    }

    let conflicts = detector.find_conflicts();
    if !conflicts.is_empty() {
        println!(
            "\n{} Found {} conflict{} on {}:\n",
            "✗".red().bold(),
            conflicts.len(),
            if conflicts.len() == 1 { "" } else { "s" },
            platform
        );

        for (i, conflict) in conflicts.iter().enumerate() {
            println!(
                "{} {}",
                format!("Conflict {}", i + 1).yellow().bold(),
                conflict.hotkey.to_string().cyan()
            );
            for (idx, entry) in conflict.conflicting_entries.iter().enumerate() {
                println!("  {} {}", format!("{}.", idx + 1).dimmed(), entry.descriptor);
            }
            println!();
        }
    }

    if invalid > 0 || !conflicts.is_empty() {
        println!(
            "{} {} invalid, {} conflicting",
            "⚠".yellow(),
            invalid,
            conflicts.len()
        );
        std::process::exit(1);
    }

    println!("\n{} {}", "✓".green().bold(), "All hotkeys valid, no conflicts".bold());
    Ok(())
}

fn parse_descriptor(descriptor: &str, platform: Option<Platform>, json: bool) -> anyhow::Result<()> {
    let parsed = parse_hotkey(descriptor, platform)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&parsed)?);
    } else {
        println!("{}", parsed.to_string().cyan().bold());
    }

    Ok(())
}

fn format_descriptor(
    descriptor: &str,
    platform: Option<Platform>,
    labels: bool,
    separator: Option<String>,
) -> anyhow::Result<()> {
    let label = if labels {
        format_with_labels(descriptor, platform)?
    } else {
        format_for_display(descriptor, &FormatDisplayOptions { platform, separator })?
    };

    println!("{}", label);
    Ok(())
}

// ============================================================================
// Replay
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ReplayScript {
    #[serde(default)]
    config: ManagerConfig,
    #[serde(default)]
    hotkeys: Vec<ScriptHotkey>,
    #[serde(default)]
    sequences: Vec<ScriptSequence>,
    events: Vec<ScriptEvent>,
}

#[derive(Debug, Deserialize)]
struct ScriptHotkey {
    name: String,
    hotkey: String,
    #[serde(default)]
    options: HotkeyOptions,
}

#[derive(Debug, Deserialize)]
struct ScriptSequence {
    name: String,
    steps: Vec<String>,
    timeout_ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ScriptEvent {
    Key {
        at_ms: u64,
        key: String,
        phase: KeyPhase,
        #[serde(default)]
        modifiers: ModifierState,
        #[serde(default)]
        repeat: bool,
    },
    Blur {
        at_ms: u64,
    },
}

/// Feed a scripted session through a manager and print what fired
fn replay_script(path: &Path) -> anyhow::Result<()> {
    let path = expand_path(path)?;
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read script: {}", path.display()))?;
    let script: ReplayScript = serde_json::from_str(&content)
        .with_context(|| format!("Invalid replay script: {}", path.display()))?;
    script.config.validate()?;

    let manager = HotkeyManager::new(script.config);
    let fired: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

    println!(
        "{} Replaying {} events on {}",
        "→".cyan(),
        script.events.len(),
        manager.platform()
    );

    for entry in script.hotkeys {
        let log = Arc::clone(&fired);
        let name = entry.name;
        manager
            .register(
                entry.hotkey.as_str(),
                move |_, ctx| {
                    log.lock().push(format!("{} ({})", name, ctx.parsed_hotkey));
                    Ok(())
                },
                entry.options,
            )
            .with_context(|| format!("Cannot register hotkey '{}'", entry.hotkey))?;
    }

    for entry in script.sequences {
        let log = Arc::clone(&fired);
        let name = entry.name;
        let options = SequenceOptions {
            timeout: entry.timeout_ms.map(Duration::from_millis),
            ..Default::default()
        };
        let label = entry.steps.join(" ");
        manager
            .register_sequence(
                entry.steps,
                move |_, _| {
                    log.lock().push(format!("{} (sequence)", name));
                    Ok(())
                },
                options,
            )
            .with_context(|| format!("Cannot register sequence '{}'", label))?;
    }

    let start = Instant::now();
    for event in script.events {
        match event {
            ScriptEvent::Key {
                at_ms,
                key,
                phase,
                modifiers,
                repeat,
            } => {
                let mut key_event = KeyEvent::new(&key, phase).with_modifiers(modifiers);
                key_event.repeat = repeat;
                debug!(at_ms, key = %key, "replaying key event");
                manager.handle_event_at(&mut key_event, start + Duration::from_millis(at_ms));

                for name in fired.lock().drain(..) {
                    println!(
                        "{:>6}ms  {} {}  {} {}",
                        at_ms,
                        phase.event_type().to_string().dimmed(),
                        key.cyan(),
                        "→".green(),
                        name.bold()
                    );
                }
            }
            ScriptEvent::Blur { at_ms } => {
                manager.handle_blur();
                println!("{:>6}ms  {}", at_ms, "blur".magenta());
            }
        }
    }

    let held = manager.held_keys();
    if !held.is_empty() {
        println!("\n{} Still held: {}", "⚠".yellow(), held.join(", "));
    }
    if manager.callback_failures() > 0 {
        println!("{} {} callback failure(s)", "✗".red(), manager.callback_failures());
    }

    Ok(())
}
