//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use pairlab_core::listing::ListView;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a dimmed note on stderr.
pub fn note(msg: &str) {
    eprintln!("{}", msg.dimmed());
}

/// Print a value as compact JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Render a progress bar such as `[#####-----]  50%`.
pub fn progress_bar(percent: f64) -> String {
    let percent = percent.clamp(0.0, 100.0);
    let filled = (percent / 10.0).round() as usize;
    format!(
        "[{}{}] {:>3.0}%",
        "#".repeat(filled),
        "-".repeat(10 - filled),
        percent
    )
}

/// Print the page line and active filters under a list.
pub fn page_footer<R>(view: &ListView<R>) {
    let mut line = format!(
        "Page {}/{} ({} items)",
        view.current_page, view.total_pages, view.total_items
    );
    if let Some(term) = &view.summary.search_term {
        line.push_str(&format!(", search \"{}\"", term));
    }
    if !view.summary.flags.is_empty() {
        line.push_str(&format!(", status {}", view.summary.flags.join("|")));
    }
    line.push_str(&format!(", sort {}", view.summary.sort));
    eprintln!("{}", line.dimmed());
}
