mod message;
mod printer;

#[cfg(test)]
mod tests;

pub use message::{DiagnosticKind, Location, Severity};
pub use printer::DiagnosticsPrinter;

use message::DiagnosticMessage;

use crate::Error;

#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    messages: Vec<DiagnosticMessage>,
}

#[must_use = "diagnostic not emitted, call .emit()"]
pub struct DiagnosticBuilder<'a> {
    diagnostics: &'a mut Diagnostics,
    message: DiagnosticMessage,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Create a diagnostic with the given kind and location.
    ///
    /// Uses the kind's default message. Call `.message()` on the builder to override.
    pub fn report(&mut self, kind: DiagnosticKind, location: Location) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            diagnostics: self,
            message: DiagnosticMessage::with_default_message(kind, location),
        }
    }

    /// Record an error raised during inference.
    ///
    /// The error's own text becomes the message; its subject id, if any,
    /// fills in the node of `location`.
    pub fn report_error(&mut self, error: &Error, location: Location) {
        let location = match error.subject() {
            Some(id) if location.node.is_none() => location.with_node(id),
            _ => location,
        };
        let kind = DiagnosticKind::for_error(error);
        self.messages
            .push(DiagnosticMessage::new(kind, location, error.to_string()));
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|d| d.is_error())
    }

    pub fn has_warnings(&self) -> bool {
        self.messages.iter().any(|d| d.is_warning())
    }

    pub fn error_count(&self) -> usize {
        self.messages.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.messages.iter().filter(|d| d.is_warning()).count()
    }

    /// Kinds in emission order.
    pub fn kinds(&self) -> impl Iterator<Item = DiagnosticKind> + '_ {
        self.messages.iter().map(|m| m.kind)
    }

    /// Messages sorted by kind priority, stable within a kind.
    pub(crate) fn by_priority(&self) -> Vec<&DiagnosticMessage> {
        let mut sorted: Vec<_> = self.messages.iter().collect();
        sorted.sort_by_key(|m| m.kind);
        sorted
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &DiagnosticMessage> {
        self.messages.iter()
    }

    pub fn render(&self) -> String {
        self.printer().render()
    }

    pub fn render_colored(&self, colored: bool) -> String {
        self.printer().colored(colored).render()
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.messages.extend(other.messages);
    }
}

impl DiagnosticKind {
    pub fn for_error(error: &Error) -> Self {
        use typeloom_core::Error as CoreError;
        match error {
            Error::Core(CoreError::ConflictingInferredTypes { .. }) => Self::ConflictingInferredTypes,
            Error::Core(CoreError::ConflictingDeclaredTypes { .. }) => Self::ConflictingDeclaredTypes,
            Error::Core(CoreError::InvalidDefinition(_)) | Error::TypedefSyntax { .. } => {
                Self::InvalidDefinition
            }
            Error::NotCallable { .. } => Self::NotCallable,
            Error::MissingAttribute(_) => Self::MissingAttribute,
            Error::UnknownCustomType(_) => Self::UnknownCustomType,
            Error::UnresolvedParameterType { .. } => Self::UnresolvedParameterType,
            Error::ParameterCountMismatch { .. } => Self::ParameterCountMismatch,
            Error::UnsupportedOperator(_) => Self::UnsupportedOperator,
            Error::Core(_)
            | Error::UnhandledNodeKind(_)
            | Error::MalformedNode { .. }
            | Error::Json(_)
            | Error::Io(_) => Self::MalformedNode,
        }
    }
}

impl<'a> DiagnosticBuilder<'a> {
    /// Provide custom detail for this diagnostic, rendered using the kind's template.
    pub fn message(mut self, msg: impl Into<String>) -> Self {
        let detail = msg.into();
        self.message.message = self.message.kind.message(Some(&detail));
        self
    }

    pub fn related(mut self, location: Location, msg: impl Into<String>) -> Self {
        self.message.related.push((location, msg.into()));
        self
    }

    /// Override the kind's default severity.
    ///
    /// The kind's default hint only applies at its default severity.
    pub fn severity(mut self, severity: Severity) -> Self {
        if severity != self.message.kind.default_severity()
            && let Some(hint) = self.message.kind.default_hint()
        {
            self.message.hints.retain(|h| h != hint);
        }
        self.message.severity = severity;
        self
    }

    pub fn emit(self) {
        self.diagnostics.messages.push(self.message);
    }
}
