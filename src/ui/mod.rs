use colored::Colorize;
use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::atomic::{AtomicBool, Ordering};

pub mod help;
pub mod list;

static QUIET: AtomicBool = AtomicBool::new(false);
static DEBUG: AtomicBool = AtomicBool::new(false);
static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Honor NO_COLOR and non-terminal stdout before anything is printed.
pub fn init_colors() {
    if std::env::var_os("NO_COLOR").is_some() || !io::stdout().is_terminal() {
        colored::control::set_override(false);
    }
}

pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub fn set_debug(debug: bool) {
    DEBUG.store(debug, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

pub fn mark_interrupted() {
    INTERRUPTED.store(true, Ordering::Relaxed);
}

pub fn was_interrupted() -> bool {
    INTERRUPTED.load(Ordering::Relaxed)
}

pub fn success(msg: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", "✓".green().bold(), msg);
}

pub fn info(msg: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", "ℹ".blue().bold(), msg);
}

pub fn warning(msg: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), msg);
}

pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg);
}

/// Diagnostic line, shown only with --debug
pub fn debug(msg: &str) {
    if DEBUG.load(Ordering::Relaxed) {
        eprintln!("{} {}", "·".bright_black(), msg.bright_black());
    }
}

pub fn separator() {
    println!("{}", "─".repeat(30).bright_black());
}

pub fn keyval(key: &str, val: &str) {
    println!("{}: {}", key.magenta().bold(), val);
}

/// Ask for a line of input, falling back to `default` on empty input,
/// closed stdin, or a non-interactive session.
pub fn prompt_line(question: &str, default: &str) -> String {
    if !io::stdin().is_terminal() {
        return default.to_string();
    }

    if default.is_empty() {
        print!("{} {}: ", "?".yellow().bold(), question);
    } else {
        print!("{} {} ({}): ", "?".yellow().bold(), question, default.dimmed());
    }

    if let Err(e) = io::stdout().flush() {
        eprintln!("\nWarning: Failed to flush terminal: {}", e);
        return default.to_string();
    }

    let mut input = String::new();
    match io::stdin().lock().read_line(&mut input) {
        Ok(_) => {
            let input = input.trim();
            if input.is_empty() {
                default.to_string()
            } else {
                input.to_string()
            }
        }
        Err(e) => {
            eprintln!("\nWarning: Failed to read input: {}", e);
            default.to_string()
        }
    }
}
