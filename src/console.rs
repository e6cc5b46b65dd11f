//! Pretty terminal output with colors and badges.

use colored::Colorize;

use crate::render::list::DisplayZone;
use crate::renderer::{LoadGuard, LoadOutcome};

// === Startup ===

pub fn print_banner() {
    println!();
    println!("{}", "╔═══════════════════════════════════════════════════════════╗".cyan());
    println!("{}", "║                                                           ║".cyan());
    println!("║     {}                                  ║", "📜 auditview v0.1.0".bold().white());
    println!("║     {}          ║", "Sorted, escaped audit logs from your backend".dimmed());
    println!("{}", "║                                                           ║".cyan());
    println!("{}", "╚═══════════════════════════════════════════════════════════╝".cyan());
    println!();
}

pub fn print_startup(addr: &str, backend: &str, guard: LoadGuard, zone: DisplayZone) {
    println!("{} {}", "✓".green().bold(), "Server ready".white().bold());
    println!("  {} {}", "→".dimmed(), format!("http://{}", addr).cyan().underline());
    println!("  {} {} {}", "←".dimmed(), "backend:".dimmed(), backend.white());
    let guard = match guard {
        LoadGuard::Unguarded => "none (last completion wins)",
        LoadGuard::LatestWins => "latest (stale loads discarded)",
    };
    println!("  {} {} {}", "⚑".dimmed(), "load guard:".dimmed(), guard.white());
    let zone = match zone {
        DisplayZone::Local => "local",
        DisplayZone::Utc => "utc",
    };
    println!("  {} {} {}", "◷".dimmed(), "times shown in:".dimmed(), zone.white());
    println!();
    println!("{}", "Endpoints:".white().bold());
    println!("  {} {}         {}", "GET ".green(), "/".white(), "Audit log page".dimmed());
    println!("  {} {}     {}", "POST".yellow(), "/load".white(), "Fetch and render audit logs".dimmed());
    println!("  {} {}   {}", "GET ".green(), "/status".white(), "Current status".dimmed());
    println!("  {} {}  {}", "GET ".green(), "/metrics".white(), "Load counters".dimmed());
    println!("  {} {}   {}", "GET ".green(), "/health".white(), "Health check".dimmed());
    println!();
}

// === Badges ===

fn badge(text: &str, fg: colored::Color, bg: colored::Color) -> colored::ColoredString {
    format!(" {} ", text).color(fg).on_color(bg).bold()
}

// === Load cycle ===

pub fn log_outcome(outcome: &LoadOutcome, elapsed_ms: u128) {
    match outcome {
        LoadOutcome::Loaded(n) => log_loaded(*n, elapsed_ms),
        LoadOutcome::Empty => log_empty(elapsed_ms),
        LoadOutcome::Failed(message) => log_failed(message),
        LoadOutcome::Stale => log_stale(),
    }
}

fn log_loaded(count: usize, elapsed_ms: u128) {
    println!(
        "{} {} {} {}",
        badge("LOAD", colored::Color::Black, colored::Color::Green),
        format!("{} record(s)", count).white(),
        format!("{}ms", elapsed_ms).green(),
        "✓".green().bold()
    );
}

fn log_empty(elapsed_ms: u128) {
    println!(
        "{} {} {}",
        badge("EMPTY", colored::Color::Black, colored::Color::Blue),
        "no audit logs found".white(),
        format!("{}ms", elapsed_ms).dimmed()
    );
}

fn log_failed(message: &str) {
    println!(
        "{} {} {}",
        badge("FAIL", colored::Color::White, colored::Color::Red),
        "backend:".dimmed(),
        message.red()
    );
}

fn log_stale() {
    println!(
        "{} {}",
        badge("STALE", colored::Color::Black, colored::Color::Yellow),
        "superseded load discarded".yellow()
    );
}
