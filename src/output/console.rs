//! Console output utilities.

use console::style;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("OK").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     X Media Archiver                                  ║
║     Posts and media of one account, kept locally      ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print the run settings before scraping starts.
pub fn print_config_summary(account: &str, limit: Option<u64>, since: Option<&str>, base_dir: &str) {
    let limit = limit.map_or_else(|| "ALL".to_string(), |n| n.to_string());

    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Account:   @{}", account);
    println!("  Limit:     {}", limit);
    if let Some(since) = since {
        println!("  Since:     {}", since);
    }
    println!("  Directory: {}", base_dir);
    println!();
}
