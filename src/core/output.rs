//! Terminal output for the human-facing commands.
//!
//! Machine-facing commands print bare JSON on stdout and nothing else, so
//! messages from this module that can accompany JSON go to stderr.
//!
//! # Color Scheme
//! - **Modified**: Yellow
//! - **Added**: Green
//! - **Deleted**: Red
//! - **Renamed/Copied**: Blue
//! - **Untracked**: Cyan
//! - **Unmerged**: Red bold

use crate::core::registry::{ChangeSetRegistry, ChangedItem, ItemType};
use crate::core::status_flag::StatusFlag;
use colored::*;

/// Formats and prints an error message on stderr
///
/// # Format
/// ```text
///
/// ✕ Error: <message>
///
/// ```
pub fn print_error(message: &str) {
    eprintln!("\n{} {}\n", "✕ Error:".red(), message.white());
}

pub fn print_success(message: &str) {
    println!("\n{} {}", "✓".green(), message.white());
}

pub fn print_info(message: &str) {
    println!("\n{}\n", message.white());
}

pub fn print_section_header(header: &str) {
    println!("\n{}:\n", header.white());
}

/// Apply the status color to any text
pub fn colorize(flag: StatusFlag, text: &str) -> ColoredString {
    match flag {
        StatusFlag::Modified => text.yellow(),
        StatusFlag::Untracked => text.cyan(),
        StatusFlag::Deleted => text.red(),
        StatusFlag::Added => text.green(),
        StatusFlag::Renamed | StatusFlag::Copied => text.blue(),
        StatusFlag::TypeChanged => text.magenta(),
        StatusFlag::Unmerged => text.red().bold(),
        StatusFlag::Unmodified | StatusFlag::Ignored => text.normal(),
        StatusFlag::Unknown(_) => text.red(),
    }
}

fn type_label(item_type: ItemType) -> ColoredString {
    let label = format!("{:<7}", item_type.as_str());
    match item_type {
        ItemType::Page => label.white(),
        ItemType::Module => label.bright_white(),
        ItemType::Config => label.bright_black(),
        ItemType::Other => label.bright_black(),
    }
}

/// One listing line: marker pair, type, path, and the title when known
pub fn format_item(item: &ChangedItem) -> String {
    let flag = item.display_flag();
    let markers = format!("{}{}", item.index().as_char(), item.working().as_char());
    let path = match item.orig_path() {
        Some(orig) => format!("{orig} -> {}", item.path()),
        None => item.path().to_string(),
    };

    let mut line = format!(
        "  {} {} {} {}",
        colorize(flag, &markers),
        type_label(item.item_type()),
        colorize(flag, &path),
        format!("({})", flag.description().to_lowercase()).bright_black()
    );
    if !item.title().is_empty() {
        line.push_str(&format!(" {}", item.title().white().bold()));
    }
    line
}

pub fn print_items(registry: &ChangeSetRegistry) {
    for (_, item) in registry.iter() {
        println!("{}", format_item(item));
    }
}
