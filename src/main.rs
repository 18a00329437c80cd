//! CLI entry point for shortcut-capture
//!
//! Provides a command-line interface for checking menu snapshots for
//! duplicate key equivalents, listing equivalents, and dry-running the
//! validation pipeline against a proposed combination.

use clap::{Parser, Subcommand};
use colored::*;
use shortcut_capture::core::conflict::ConflictDetector;
use shortcut_capture::core::keys;
use shortcut_capture::core::menu::MenuSnapshot;
use shortcut_capture::core::parser::{parse_menu_file, parse_modifier_tokens};
use shortcut_capture::core::types::{FlagPolicy, KeyCombo, ModifierFlags};
use shortcut_capture::core::validator::validate_combo;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "shortcut-capture")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a menu definition for duplicate key equivalents
    Check {
        /// Path to the menu definition file
        #[arg(short, long)]
        menu: PathBuf,
    },

    /// List all key equivalents in a menu definition
    List {
        /// Path to the menu definition file
        #[arg(short, long)]
        menu: PathBuf,
    },

    /// Run the validation pipeline against a proposed combination
    Validate {
        /// Key name (letter, digit, or named key such as Space)
        #[arg(short, long)]
        key: String,

        /// Held modifiers, e.g. "cmd,shift"
        #[arg(short, long, default_value = "none")]
        mods: String,

        /// Allowed modifier mask, e.g. "cmd,shift" (default: all)
        #[arg(long)]
        allowed: Option<String>,

        /// Required modifier mask, e.g. "cmd"
        #[arg(long)]
        required: Option<String>,

        /// Permit a combination with zero modifiers
        #[arg(long)]
        key_only: bool,

        /// Menu definition to scan for conflicts
        #[arg(long)]
        menu: Option<PathBuf>,

        /// Menu item titles to exclude from the conflict scan
        #[arg(long)]
        exclude: Vec<String>,
    },

    /// Print the display string for a combination
    Show {
        /// Key name (letter, digit, or named key such as Space)
        #[arg(short, long)]
        key: String,

        /// Held modifiers, e.g. "cmd,shift"
        #[arg(short, long, default_value = "none")]
        mods: String,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { menu } => check_menu(&menu)?,
        Commands::List { menu } => list_equivalents(&menu)?,
        Commands::Validate {
            key,
            mods,
            allowed,
            required,
            key_only,
            menu,
            exclude,
        } => validate(key, mods, allowed, required, key_only, menu, exclude)?,
        Commands::Show { key, mods } => show(key, mods)?,
    }

    Ok(())
}

/// Read and parse a menu definition, expanding a leading tilde
fn read_menu(menu_path: &PathBuf) -> anyhow::Result<MenuSnapshot> {
    let expanded_path = shellexpand::tilde(
        menu_path
            .to_str()
            .ok_or_else(|| anyhow::anyhow!("Invalid path encoding"))?,
    );
    let path = std::path::Path::new(expanded_path.as_ref());

    let content = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file: {}", e))?;

    Ok(parse_menu_file(&content)?)
}

fn parse_mods(input: &str) -> anyhow::Result<ModifierFlags> {
    parse_modifier_tokens(input).map_err(|token| anyhow::anyhow!("Unknown modifier: {}", token))
}

fn parse_key(name: &str) -> anyhow::Result<i32> {
    keys::key_code_for_name(name).ok_or_else(|| anyhow::anyhow!("Unknown key: {}", name))
}

/// Check a menu definition for duplicate key equivalents
fn check_menu(menu_path: &PathBuf) -> anyhow::Result<()> {
    println!("{} Parsing menu: {}", "→".cyan(), menu_path.display());

    let snapshot = read_menu(menu_path)?;
    let detector = ConflictDetector::from_snapshot(&snapshot);

    println!(
        "{} Found {} key equivalents\n",
        "✓".green(),
        detector.total_equivalents()
    );

    let conflicts = detector.find_conflicts();

    if conflicts.is_empty() {
        println!("{} {}", "✓".green().bold(), "No duplicates detected!".bold());
    } else {
        println!(
            "{} Found {} duplicate{}:\n",
            "✗".red().bold(),
            conflicts.len(),
            if conflicts.len() == 1 { "" } else { "s" }
        );

        for (i, conflict) in conflicts.iter().enumerate() {
            let combo = format!("{}{}", conflict.flags, conflict.character.to_uppercase());
            println!(
                "{} {}",
                format!("Duplicate {}", i + 1).yellow().bold(),
                combo.cyan()
            );

            for (idx, claimant) in conflict.claimants.iter().enumerate() {
                println!(
                    "  {} {}",
                    format!("{}.", idx + 1).dimmed(),
                    claimant.title
                );
            }
            println!();
        }

        println!(
            "{}",
            "⚠ These menu items will fight over the same keystroke!".yellow()
        );
        std::process::exit(1);
    }

    Ok(())
}

/// List all key equivalents in a menu definition
fn list_equivalents(menu_path: &PathBuf) -> anyhow::Result<()> {
    let snapshot = read_menu(menu_path)?;
    let equivalents = snapshot.key_equivalents();

    println!(
        "{}",
        format!("Key equivalents from: {}\n", menu_path.display()).bold()
    );

    let total = equivalents.len();

    for equivalent in equivalents {
        let combo = format!(
            "{}{}",
            equivalent.flags,
            equivalent.character.to_uppercase()
        );
        println!("{} → {}", combo.cyan().bold(), equivalent.title);
    }

    println!("\n{} Total: {} equivalents", "✓".green(), total);

    Ok(())
}

/// Dry-run the validation pipeline against a proposed combination
fn validate(
    key: String,
    mods: String,
    allowed: Option<String>,
    required: Option<String>,
    key_only: bool,
    menu_path: Option<PathBuf>,
    exclude: Vec<String>,
) -> anyhow::Result<()> {
    let key_code = parse_key(&key)?;
    let flags = parse_mods(&mods)?;

    let policy = FlagPolicy {
        allowed_flags: allowed
            .as_deref()
            .map(parse_mods)
            .transpose()?
            .unwrap_or(ModifierFlags::ALL),
        required_flags: required
            .as_deref()
            .map(parse_mods)
            .transpose()?
            .unwrap_or(ModifierFlags::NONE),
        allows_key_only: key_only,
        escape_keys_record: false,
    };

    if !policy.is_reconciled() {
        println!(
            "{} required modifiers extend the allowed mask",
            "⚠".yellow()
        );
    }
    let policy = policy.reconciled();

    let menu = menu_path.as_ref().map(read_menu).transpose()?;

    match validate_combo(key_code, flags, &policy, menu.as_ref(), &exclude, None) {
        Ok(combo) => {
            println!("{} Accepted: {}", "✓".green().bold(), combo.to_string().cyan());
        }
        Err(reason) => {
            println!("{} Rejected: {}", "✗".red().bold(), reason);
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Print the display string for a combination
fn show(key: String, mods: String) -> anyhow::Result<()> {
    let combo = KeyCombo::new(parse_key(&key)?, parse_mods(&mods)?);
    println!("{}", combo);
    Ok(())
}
