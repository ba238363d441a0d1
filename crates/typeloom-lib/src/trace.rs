//! Tracing infrastructure for debugging inference runs.
//!
//! The engine calls a `Tracer` at fixed points of the walk. `NoopTracer` has
//! empty `#[inline(always)]` methods and compiles away; `PrintTracer` collects
//! indented lines for the `trace` command.

use typeloom_core::{Colors, StoreValue, TypeRepr};

use crate::Error;
use crate::ast::Node;

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Default: statements, synthesized types, errors.
    #[default]
    Default,
    /// Verbose (-v): also store writes and edges.
    Verbose,
    /// Very verbose (-vv): also every node entered, with its value.
    VeryVerbose,
}

/// Inference instrumentation.
///
/// - `trace_statement` - before a top-level statement is inferred
/// - `trace_enter` - when the dispatcher enters a node
/// - `trace_exit` - when the dispatcher returns a node's type
/// - `trace_store` - after a successful store write
/// - `trace_edge` - after an edge is added to the equivalence graph
/// - `trace_error` - when a statement fails
pub trait Tracer {
    fn trace_statement(&mut self, function: &str, line: usize);

    fn trace_enter(&mut self, node: &Node);

    fn trace_exit(&mut self, node: &Node, ty: Option<&TypeRepr>);

    fn trace_store(&mut self, id: &str, value: &StoreValue);

    fn trace_edge(&mut self, a: &str, b: &str);

    fn trace_error(&mut self, error: &Error);
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_statement(&mut self, _function: &str, _line: usize) {}

    #[inline(always)]
    fn trace_enter(&mut self, _node: &Node) {}

    #[inline(always)]
    fn trace_exit(&mut self, _node: &Node, _ty: Option<&TypeRepr>) {}

    #[inline(always)]
    fn trace_store(&mut self, _id: &str, _value: &StoreValue) {}

    #[inline(always)]
    fn trace_edge(&mut self, _a: &str, _b: &str) {}

    #[inline(always)]
    fn trace_error(&mut self, _error: &Error) {}
}

/// Tracer that collects an indented log of the walk.
pub struct PrintTracer {
    verbosity: Verbosity,
    colors: Colors,
    lines: Vec<String>,
    depth: usize,
}

impl PrintTracer {
    pub fn new(verbosity: Verbosity, colors: Colors) -> Self {
        Self {
            verbosity,
            colors,
            lines: Vec::new(),
            depth: 0,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Print all trace lines.
    pub fn print(&self) {
        for line in &self.lines {
            println!("{line}");
        }
    }

    fn push(&mut self, content: String) {
        let indent = "  ".repeat(self.depth + 1);
        self.lines.push(format!("{indent}{content}"));
    }
}

impl Tracer for PrintTracer {
    fn trace_statement(&mut self, function: &str, line: usize) {
        let c = self.colors;
        self.depth = 0;
        self.lines
            .push(format!("{}{function}:{line}{}", c.blue, c.reset));
    }

    fn trace_enter(&mut self, node: &Node) {
        if self.verbosity >= Verbosity::VeryVerbose {
            let c = self.colors;
            self.push(format!(
                "{}>{} {} {} {}{:?}{}",
                c.dim, c.reset, node.tag, node.id, c.green, node.value, c.reset
            ));
        }
        self.depth += 1;
    }

    fn trace_exit(&mut self, node: &Node, ty: Option<&TypeRepr>) {
        self.depth = self.depth.saturating_sub(1);
        let c = self.colors;
        let ty = ty.map_or_else(|| "-".to_string(), |t| t.to_string());
        self.push(format!("{}<{} {} {}: {ty}", c.dim, c.reset, node.tag, node.id));
    }

    fn trace_store(&mut self, id: &str, value: &StoreValue) {
        if self.verbosity >= Verbosity::Verbose {
            let c = self.colors;
            self.push(format!(
                "{}store{} {id} = {} (declared {})",
                c.dim, c.reset, value.inferred, value.actual
            ));
        }
    }

    fn trace_edge(&mut self, a: &str, b: &str) {
        if self.verbosity >= Verbosity::Verbose {
            let c = self.colors;
            self.push(format!("{}edge{} {a} — {b}", c.dim, c.reset));
        }
    }

    fn trace_error(&mut self, error: &Error) {
        let c = self.colors;
        self.push(format!("{}error{}: {error}", c.red, c.reset));
    }
}
