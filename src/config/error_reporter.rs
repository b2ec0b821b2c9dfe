//! One-line error reports for KDL syntax errors
//!
//! Turns the first diagnostic of a `KdlError` into `line:col: message`,
//! with the parser's help text appended when it has one.

use kdl::KdlError;

pub fn format_error_report(content: &str, error: &KdlError) -> String {
    let Some(diag) = error.diagnostics.first() else {
        return "failed to parse KDL document".to_string();
    };

    let (line, col) = offset_to_line_col(content, diag.span.offset());
    let message = diag
        .message
        .clone()
        .unwrap_or_else(|| "parse error".to_string());

    let mut report = format!("{}:{}: {}", line, col, message);
    if let Some(help) = &diag.help {
        report.push_str(&format!(" (help: {})", help));
    }
    if error.diagnostics.len() > 1 {
        report.push_str(&format!(" (+{} more)", error.diagnostics.len() - 1));
    }
    report
}

/// Convert a byte offset to 1-based line and column numbers
pub(crate) fn offset_to_line_col(content: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;

    for (i, c) in content.char_indices() {
        if i >= offset {
            break;
        }
        if c == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }

    (line, col)
}
