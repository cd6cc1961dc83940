//! Logging for the scanner: records are prefixed with the crate name so
//! worker warnings stand out between kdam progress lines.

use colored::Colorize;
use env_logger::Builder;
use log::{Level, LevelFilter};
use std::io::Write;

/// Render one record the way catscan prints it: `[catscan] msg` for info and
/// below, `[catscan WARN target] msg` for warnings and errors so the failing
/// worker's module is visible.
pub fn format_record(level: Level, target: &str, msg: &str) -> String {
    let name = env!("CARGO_PKG_NAME");
    match level {
        Level::Error | Level::Warn => {
            let level_str = if level == Level::Error {
                "ERROR".red()
            } else {
                "WARN".yellow()
            };
            format!(
                "[{} {} {}] {}",
                name.cyan(),
                level_str,
                target.white(),
                msg
            )
        }
        _ => format!("[{}] {}", name.cyan(), msg),
    }
}

/// Debug level for catscan itself when `verbose`. The dependency stack
/// (reqwest and friends) stays at warnings either way, so per-item debug
/// lines are always ours.
pub fn setup_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    Builder::from_default_env()
        .filter_level(LevelFilter::Warn)
        .filter_module(env!("CARGO_PKG_NAME"), level)
        .format(|buf, record| {
            writeln!(
                buf,
                "{}",
                format_record(record.level(), record.target(), &record.args().to_string())
            )
        })
        .init();
}
