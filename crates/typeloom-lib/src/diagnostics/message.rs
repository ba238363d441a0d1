use std::fmt;

/// Diagnostic kinds ordered by priority (highest priority first).
///
/// Priority rationale:
/// - Type conflicts are what the user came for
/// - Binding and annotation problems mean part of the program went unchecked
/// - Malformed input signals a producer bug, not a user error
/// - Declared/inferred mismatches are often consequences of earlier conflicts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Type errors
    ConflictingInferredTypes,
    ConflictingDeclaredTypes,
    IncompatibleBasalTypes,
    NotCallable,

    // Annotation and binding problems
    MissingAttribute,
    UnknownCustomType,
    UnresolvedParameterType,
    ParameterCountMismatch,

    // Malformed input
    UnsupportedOperator,
    MalformedNode,
    InvalidDefinition,

    // Often consequences of earlier errors
    DeclaredInferredMismatch,
}

impl DiagnosticKind {
    /// Default severity for this kind. Can be overridden per diagnostic.
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::DeclaredInferredMismatch => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Default hint for this kind, automatically included in diagnostics.
    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::IncompatibleBasalTypes => {
                Some("some value is used both as the first kind and as the second")
            }
            Self::ParameterCountMismatch => {
                Some("annotate every declared parameter, in declaration order")
            }
            Self::UnknownCustomType => Some("define the type in the `--types` or `--typedefs` input"),
            Self::DeclaredInferredMismatch => Some("rerun with `--strict` to make this an error"),
            _ => None,
        }
    }

    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::ConflictingInferredTypes => "conflicting inferred types",
            Self::ConflictingDeclaredTypes => "declared type conflicts with inferred type",
            Self::IncompatibleBasalTypes => "incompatible types are connected",
            Self::NotCallable => "value is not callable",

            Self::MissingAttribute => "undeclared attribute",
            Self::UnknownCustomType => "unknown custom type",
            Self::UnresolvedParameterType => "unresolved parameter type",
            Self::ParameterCountMismatch => "parameter count mismatch",

            Self::UnsupportedOperator => "unsupported operator",
            Self::MalformedNode => "malformed AST node",
            Self::InvalidDefinition => "invalid type definition",

            Self::DeclaredInferredMismatch => "declared type differs from inferred type",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::IncompatibleBasalTypes => "{} are connected".to_string(),
            Self::DeclaredInferredMismatch => "{}".to_string(),
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Where a diagnostic points: a function, a statement within it, and a node id.
///
/// Every part is optional. Checker diagnostics run on a persisted store and
/// graph and only know node ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub function: Option<String>,
    /// 1-based statement position in the function body.
    pub line: Option<usize>,
    pub node: Option<String>,
}

impl Location {
    pub fn statement(function: impl Into<String>, line: usize) -> Self {
        Self {
            function: Some(function.into()),
            line: Some(line),
            node: None,
        }
    }

    pub fn function(function: impl Into<String>) -> Self {
        Self {
            function: Some(function.into()),
            ..Self::default()
        }
    }

    pub fn node(id: impl Into<String>) -> Self {
        Self {
            node: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn with_node(mut self, id: impl Into<String>) -> Self {
        self.node = Some(id.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.function.is_none() && self.line.is_none() && self.node.is_none()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        if let Some(function) = &self.function {
            write!(f, "{function}")?;
            if let Some(line) = self.line {
                write!(f, ":{line}")?;
            }
            sep = " ";
        }
        if let Some(node) = &self.node {
            write!(f, "{sep}[{node}]")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    pub(crate) location: Location,
    pub(crate) severity: Severity,
    pub(crate) message: String,
    pub(crate) related: Vec<(Location, String)>,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, location: Location, message: impl Into<String>) -> Self {
        Self {
            kind,
            location,
            severity: kind.default_severity(),
            message: message.into(),
            related: Vec::new(),
            hints: kind.default_hint().map(str::to_string).into_iter().collect(),
        }
    }

    pub(crate) fn with_default_message(kind: DiagnosticKind, location: Location) -> Self {
        Self::new(kind, location, kind.fallback_message())
    }

    pub(crate) fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub(crate) fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.severity)?;
        if !self.location.is_empty() {
            write!(f, " at {}", self.location)?;
        }
        write!(f, ": {}", self.message)?;
        for (location, message) in &self.related {
            write!(f, " (related: {message} at {location})")?;
        }
        for hint in &self.hints {
            write!(f, " (hint: {hint})")?;
        }
        Ok(())
    }
}
