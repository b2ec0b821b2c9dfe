use crate::manifest::ManifestSummary;
use colored::Colorize;
use terminal_size::{Width, terminal_size};

const BOX_WIDTH: usize = 36;

pub fn print_list(summary: &ManifestSummary) {
    let term_width = terminal_size()
        .map(|(Width(w), _)| w as usize)
        .unwrap_or(80);
    println!("{}", render_list(summary, term_width));
}

/// Boxed `name version` header followed by each dependency map
pub fn render_list(summary: &ManifestSummary, term_width: usize) -> String {
    let inner = BOX_WIDTH.min(term_width.saturating_sub(2)).max(4);
    let name = summary.name.as_deref().unwrap_or("unnamed-project");
    let title = match summary.version.as_deref() {
        Some(version) if !version.is_empty() => format!("{} {}", name, version),
        _ => name.to_string(),
    };
    let title = fit_label(&title, inner - 2);

    let mut lines = vec![
        format!("╭{}╮", "─".repeat(inner)).purple().to_string(),
        format!(
            "{}{}{}",
            "│".purple(),
            format!(" {:<width$}", title, width = inner - 1).magenta().bold(),
            "│".purple()
        ),
        format!("╰{}╯", "─".repeat(inner)).purple().to_string(),
    ];

    let mut any = false;
    for (kind, deps) in summary.dependencies.iter() {
        any = true;
        lines.push(String::new());
        lines.push(format!("{}:", kind.manifest_key()).purple().to_string());
        for (pkg, version) in deps {
            lines.push(format!("  {} {} {}", "•".magenta(), pkg, version.dimmed()));
        }
    }

    if !any {
        lines.push("No dependencies found".dimmed().to_string());
    }

    lines.join("\n")
}

/// Shorten to `width` characters, marking the cut with an ellipsis
fn fit_label(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        return text.to_string();
    }
    if width <= 1 {
        return text.chars().take(width).collect();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}
