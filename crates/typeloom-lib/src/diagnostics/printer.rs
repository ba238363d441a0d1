//! Builder-pattern printer for rendering diagnostics.

use std::fmt::Write;

use typeloom_core::Colors;

use super::Diagnostics;
use super::message::{DiagnosticMessage, Severity};

/// Builder for rendering diagnostics with various options.
pub struct DiagnosticsPrinter<'d, 's> {
    diagnostics: &'d Diagnostics,
    path: Option<&'s str>,
    colored: bool,
    sorted: bool,
}

impl<'d, 's> DiagnosticsPrinter<'d, 's> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self {
            diagnostics,
            path: None,
            colored: false,
            sorted: false,
        }
    }

    /// Input file the diagnostics refer to, shown before each location.
    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    /// Order by kind priority instead of emission order.
    pub fn sorted(mut self, value: bool) -> Self {
        self.sorted = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let messages: Vec<&DiagnosticMessage> = if self.sorted {
            self.diagnostics.by_priority()
        } else {
            self.diagnostics.iter().collect()
        };
        let c = Colors::new(self.colored);

        for (i, diag) in messages.into_iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            let level = match diag.severity {
                Severity::Error => c.red,
                Severity::Warning => c.blue,
            };
            writeln!(w, "{level}{}{}: {}", diag.severity, c.reset, diag.message)?;

            if !diag.location.is_empty() || self.path.is_some() {
                write!(w, "  {}-->{} ", c.dim, c.reset)?;
                match self.path {
                    Some(path) if diag.location.is_empty() => write!(w, "{path}")?,
                    Some(path) => write!(w, "{path}: {}", diag.location)?,
                    None => write!(w, "{}", diag.location)?,
                }
                writeln!(w)?;
            }
            for (location, message) in &diag.related {
                writeln!(w, "  {}= related:{} {message} at {location}", c.dim, c.reset)?;
            }
            for hint in &diag.hints {
                writeln!(w, "  {}= hint:{} {hint}", c.dim, c.reset)?;
            }
        }
        Ok(())
    }
}

impl Diagnostics {
    pub fn printer(&self) -> DiagnosticsPrinter<'_, '_> {
        DiagnosticsPrinter::new(self)
    }
}
