//! Text rendering of diagnostics.

use crate::diagnostic::Diagnostic;
use crate::label::LabelStyle;
use crate::severity::Severity;
use archsb_source::SourceDb;

/// Turns a diagnostic into display text.
pub trait DiagnosticRenderer {
    /// Renders one diagnostic, resolving spans through `source_db`.
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String;
}

/// Compiler-style terminal output:
///
/// ```text
/// error[E312]: invalid <wireconn> from_switchpoint '4' on segment 'L4' (must be < 4)
///   --> arch.xml:41:9
///    |
/// 41 |         <wireconn num_conns_type="from" from_type="L4" ... />
///    |         ^^^^^^^^^
///    = note: ...
/// ```
pub struct TerminalRenderer {
    /// Emit ANSI colour escapes.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, text: &str, ansi: &str) -> String {
        if self.color {
            format!("\x1b[{ansi}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }

    fn severity_color(severity: Severity) -> &'static str {
        match severity {
            Severity::Error => "1;31",
            Severity::Warning => "1;33",
            Severity::Note => "1;36",
        }
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String {
        let mut out = String::new();
        let header = format!("{}[{}]", diag.severity, diag.code);
        out.push_str(&format!(
            "{}: {}\n",
            self.paint(&header, Self::severity_color(diag.severity)),
            diag.message
        ));

        if let Some(loc) = source_db.locate(diag.primary_span) {
            let file = source_db.get_file(diag.primary_span.file);
            let line_num = loc.line.to_string();
            let gutter = " ".repeat(line_num.len());
            let carets = "^".repeat(diag.primary_span.len().max(1) as usize);
            let indent = " ".repeat(loc.col as usize - 1);
            let primary_msg = diag
                .labels
                .iter()
                .find(|l| l.style == LabelStyle::Primary)
                .map(|l| format!(" {}", l.message))
                .unwrap_or_default();

            out.push_str(&format!("{gutter}--> {loc}\n"));
            out.push_str(&format!("{gutter} |\n"));
            out.push_str(&format!(
                "{line_num} | {}\n",
                file.line_text(diag.primary_span.start)
            ));
            out.push_str(&format!(
                "{gutter} | {indent}{}{primary_msg}\n",
                self.paint(&carets, Self::severity_color(diag.severity))
            ));
        }

        for label in diag.labels.iter().filter(|l| l.style == LabelStyle::Secondary) {
            match source_db.locate(label.span) {
                Some(loc) => out.push_str(&format!("   = {}: {loc}\n", label.message)),
                None => out.push_str(&format!("   = {}\n", label.message)),
            }
        }
        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }
        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }
        out
    }
}
