//! Inference over a decoded program.
//!
//! A run owns a fresh `Graph` and `Store` and fills them in four passes:
//! 1. custom-type bindings (`bindings`)
//! 2. parameter annotations (`bindings`)
//! 3. every statement of every function body (`expressions`)
//! 4. propagation from each basal node (`propagate`)
//!
//! Statement failures are collected as diagnostics unless `fail_fast` is set.
//!
//! # Module Organization
//!
//! - `expressions`: per-tag synthesis rules
//! - `bindings`: custom-type and parameter binding, syntactic variable lookup
//! - `propagate`: basal-node propagation shared with the checker

mod bindings;
mod expressions;
mod propagate;

#[cfg(test)]
mod bindings_tests;
#[cfg(test)]
mod expressions_tests;

use indexmap::IndexMap;

use typeloom_core::{Graph, Kind, Store, StoreValue, TypeRepr};

use crate::annotations::Annotations;
use crate::ast::{Attribute, Node, Program};
use crate::diagnostics::{Diagnostics, Location};
use crate::trace::{NoopTracer, Tracer};
use crate::Result;

pub use bindings::lookup_variable;
pub use propagate::propagate_infer;

/// Run configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InferOptions {
    /// Treat declared/inferred disagreement during propagation as an error.
    pub check: bool,
    /// Stop at the first failing statement instead of collecting diagnostics.
    pub fail_fast: bool,
    /// Flatten equivalence chains before propagation.
    pub normalize: bool,
}

impl InferOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(mut self, value: bool) -> Self {
        self.check = value;
        self
    }

    pub fn fail_fast(mut self, value: bool) -> Self {
        self.fail_fast = value;
        self
    }

    pub fn normalize(mut self, value: bool) -> Self {
        self.normalize = value;
        self
    }
}

/// Outcome of one run.
#[derive(Debug)]
pub struct Inference {
    pub graph: Graph,
    pub store: Store,
    pub diagnostics: Diagnostics,
}

impl Inference {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }
}

pub fn infer(program: &Program, annotations: &Annotations, options: &InferOptions) -> Result<Inference> {
    infer_with(program, annotations, options, &mut NoopTracer)
}

/// Run inference, reporting each step to `tracer`.
pub fn infer_with<T: Tracer>(
    program: &Program,
    annotations: &Annotations,
    options: &InferOptions,
    tracer: &mut T,
) -> Result<Inference> {
    let mut graph = Graph::new();
    let mut store = Store::new();
    let mut diagnostics = Diagnostics::new();

    {
        let mut engine = Engine {
            graph: &mut graph,
            store: &mut store,
            attributes: &program.attributes,
            tracer,
            diagnostics: &mut diagnostics,
            fail_fast: options.fail_fast,
        };
        engine.bind_custom_types(program, annotations)?;
        engine.bind_parameters(program, annotations)?;
        engine.process_methods(program)?;
    }

    if options.normalize {
        graph.normalize();
    }
    propagate_infer(
        &mut graph,
        &mut store,
        &annotations.typedefs,
        options.check,
        &mut diagnostics,
        options.fail_fast,
    )?;

    log::debug!(
        "inference done: {} store entries, {} graph nodes, {} diagnostic(s)",
        store.len(),
        graph.len(),
        diagnostics.len()
    );
    Ok(Inference {
        graph,
        store,
        diagnostics,
    })
}

/// Mutable state of one run, borrowed for the duration of the walk.
struct Engine<'a, T: Tracer> {
    graph: &'a mut Graph,
    store: &'a mut Store,
    attributes: &'a IndexMap<String, Attribute>,
    tracer: &'a mut T,
    diagnostics: &'a mut Diagnostics,
    fail_fast: bool,
}

impl<T: Tracer> Engine<'_, T> {
    /// Infer every statement of every function in declaration order.
    pub(super) fn process_methods(&mut self, program: &Program) -> Result<()> {
        for (name, function) in &program.methods {
            for statement in &function.body {
                self.tracer.trace_statement(name, statement.line);
                let result = self.process_statement(&statement.node);
                self.absorb(result, Location::statement(name.as_str(), statement.line))?;
            }
        }
        Ok(())
    }

    /// Infer one statement, then record its type and tie it to the type's node.
    fn process_statement(&mut self, node: &Node) -> Result<()> {
        let Some(ty) = self.infer_node(node)? else {
            return Ok(());
        };
        self.record(node, Some(&ty))?;
        if !ty.is_wildcard() {
            self.graph.add_node(ty.name());
            self.add_edge(&node.id, ty.name())?;
        }
        Ok(())
    }

    /// Turn a failure into a diagnostic, or pass it on when failing fast.
    pub(super) fn absorb(&mut self, result: Result<()>, location: Location) -> Result<()> {
        let Err(error) = result else {
            return Ok(());
        };
        self.tracer.trace_error(&error);
        if self.fail_fast {
            return Err(error);
        }
        log::debug!("{location}: {error}");
        self.diagnostics.report_error(&error, location);
        Ok(())
    }

    pub(super) fn add_edge(&mut self, a: &str, b: &str) -> Result<()> {
        self.graph.add_edge(a, b)?;
        self.tracer.trace_edge(a, b);
        Ok(())
    }

    pub(super) fn set(&mut self, id: &str, value: StoreValue) -> Result<()> {
        self.store.set(id, value)?;
        if let Some(stored) = self.store.get(id) {
            self.tracer.trace_store(id, stored);
        }
        Ok(())
    }

    /// Declared type of an entity: what the store already holds, else its AST token.
    pub(super) fn actual_of(&self, node: &Node) -> Result<TypeRepr> {
        if let Some(entry) = self.store.get(&node.id) {
            return Ok(entry.actual.clone());
        }
        Ok(TypeRepr::primitive(node.kind()?))
    }

    /// Store the synthesized type of a child. Operator nodes and untyped
    /// results are skipped.
    pub(super) fn record(&mut self, node: &Node, ty: Option<&TypeRepr>) -> Result<()> {
        let Some(ty) = ty else {
            return Ok(());
        };
        if node.is_operator() {
            return Ok(());
        }
        let actual = self.actual_of(node)?;
        self.set(&node.id, StoreValue::new(node.value.as_str(), actual, ty.clone()))
    }

    /// Edge `node` to the graph node standing for `ty`: the kind node of a
    /// concrete primitive, or the node of a named type already in the graph.
    pub(super) fn link_to_type(&mut self, node: &Node, ty: &TypeRepr) -> Result<()> {
        if ty.is_wildcard() {
            return Ok(());
        }
        let target = match ty.primitive_kind() {
            Some(kind) => kind.name(),
            None if self.graph.contains(ty.name()) => ty.name(),
            None => return Ok(()),
        };
        self.add_edge(&node.id, target)
    }

    /// Wildcard kind nodes never take edges.
    pub(super) fn link_to_kind(&mut self, id: &str, kind: Kind) -> Result<()> {
        if kind.is_wildcard() {
            return Ok(());
        }
        self.add_edge(id, kind.name())
    }
}
