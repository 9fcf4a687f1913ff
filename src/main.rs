// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use std::env;
use tracing::info;

use pocket_ledger::format::format_currency;
use pocket_ledger::{ledger_from_config, LedgerConfig, SystemClock};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let config = LedgerConfig::load()?;
    init_logging(&config)?;
    info!(version = pocket_ledger::VERSION, "Pocket Ledger starting");

    if args.len() > 1 && args[1] == "summary" {
        // Summary mode
        run_summary(&config)?;
    } else {
        // UI mode (default)
        run_ui_mode(&config)?;
    }

    Ok(())
}

/// Daily-rotated log file; the terminal belongs to the TUI
fn init_logging(config: &LedgerConfig) -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    std::fs::create_dir_all(&config.log_dir).with_context(|| {
        format!("Failed to create log directory {}", config.log_dir.display())
    })?;

    let file_appender =
        RollingFileAppender::new(Rotation::DAILY, config.log_dir.clone(), "pocket-ledger.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter.clone())),
        )
        .try_init()
        .context("Failed to initialise logging")?;

    Ok(())
}

fn run_summary(config: &LedgerConfig) -> Result<()> {
    println!("📒 Pocket Ledger - Summary");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let ledger = ledger_from_config(config, SystemClock);
    let stats = ledger.compute_statistics();

    println!("\n💰 Totals");
    println!("   Total balance:   {}", format_currency(stats.total_balance));
    println!("   7-day expense:   {}", format_currency(stats.weekly_expense));
    println!("   7-day income:    {}", format_currency(stats.weekly_income));
    println!("   7-day net:       {}", format_currency(stats.weekly_net()));
    println!("   Month expense:   {}", format_currency(stats.month_expense));

    println!("\n👛 Wallets");
    for summary in ledger.wallet_summaries() {
        println!(
            "   {:<20} {:>16}{}  {} txs  in {}  out {}  net {}",
            summary.wallet_name,
            format_currency(summary.balance),
            if summary.overdrawn { " (overdrawn)" } else { "" },
            summary.transaction_count,
            format_currency(summary.total_income),
            format_currency(summary.total_expense),
            format_currency(summary.net_flow()),
        );
    }

    if let Some(event) = ledger.events().latest() {
        println!("\n📰 Latest event: {} ({})", event.title, event.source.as_str());
    }

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(config: &LedgerConfig) -> Result<()> {
    let ledger = ledger_from_config(config, SystemClock);

    let mut app = ui::App::new(ledger, config.default_date_range);
    ui::run_ui(&mut app)?;

    println!("\n✅ Pocket Ledger closed");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_config: &LedgerConfig) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or print totals: pocket-ledger summary");
    std::process::exit(1);
}
