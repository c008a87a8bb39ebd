use colored::Colorize;
use thoughtverse::{describe, Error, Receipt, U256};

pub fn status(message: impl AsRef<str>) {
    eprintln!("{} {}", "==>".blue().bold(), message.as_ref());
}

pub fn success(message: impl AsRef<str>) {
    eprintln!("{} {}", "ok".green().bold(), message.as_ref());
}

pub fn warn(message: impl AsRef<str>) {
    eprintln!("{} {}", "warn".yellow().bold(), message.as_ref());
}

pub fn error(message: impl AsRef<str>) {
    eprintln!("{} {}", "error".red().bold(), message.as_ref());
}

pub fn heading(title: impl AsRef<str>) {
    println!("{}", title.as_ref().bold());
}

pub fn field(label: &str, value: impl std::fmt::Display) {
    println!("{}: {value}", format!("{label:>10}").dimmed());
}

pub fn confirmed(receipt: &Receipt) {
    let mut line = format!("Transaction {} confirmed", receipt.transaction_hash);
    if let Some(block) = receipt.block_number {
        line.push_str(&format!(" in block {block}"));
    }
    if let Some(gas) = receipt.gas_used {
        line.push_str(&format!(" ({gas} gas)"));
    }
    status(line);
}

/// Warns that the displayed state predates a confirmed transaction.
pub fn stale(err: &Error) {
    warn(format!(
        "The transaction went through, but reloading failed: {}",
        describe(err)
    ));
}

pub fn ether(amount: U256) -> String {
    format!("{} ETH", thoughtverse::units::format_ether(amount))
}
