//! Consistency checking over a store and graph, fresh from inference or loaded
//! from disk.
//!
//! Two sweeps run to completion and report everything they find:
//! - no two basal nodes may be connected
//! - every recorded declared type must agree with the inferred one
//!
//! Strict mode first re-runs propagation with declared-type checking on.


use std::collections::{HashSet, VecDeque};

use indexmap::IndexMap;

use typeloom_core::{Graph, Kind, Store, TypeRepr};

use crate::Result;
use crate::diagnostics::{DiagnosticKind, Diagnostics, Location, Severity};
use crate::infer::propagate_infer;

/// Outcome of a consistency check.
#[derive(Debug, Default)]
pub struct CheckReport {
    pub diagnostics: Diagnostics,
}

impl CheckReport {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

pub fn check(
    store: &mut Store,
    graph: &mut Graph,
    typedefs: &IndexMap<String, TypeRepr>,
    strict: bool,
) -> Result<CheckReport> {
    let mut diagnostics = Diagnostics::new();
    if strict {
        propagate_infer(graph, store, typedefs, true, &mut diagnostics, false)?;
    }
    check_basal_paths(graph, &mut diagnostics);
    check_declared_types(store, strict, &mut diagnostics);
    log::debug!(
        "check: {} error(s), {} warning(s)",
        diagnostics.error_count(),
        diagnostics.warning_count()
    );
    Ok(CheckReport { diagnostics })
}

/// Each unordered pair of distinct basal nodes is reported once.
fn check_basal_paths(graph: &Graph, diagnostics: &mut Diagnostics) {
    let basal: Vec<&str> = graph.basal().collect();
    for (i, a) in basal.iter().enumerate() {
        for b in &basal[i + 1..] {
            if !graph.path_exists(a, b) {
                continue;
            }
            let mut report = diagnostics
                .report(DiagnosticKind::IncompatibleBasalTypes, Location::default())
                .message(format!("`{a}` and `{b}`"));
            if let Some(hop) = first_hop(graph, a, b) {
                report = report.related(
                    Location::node(hop),
                    format!("path from `{a}` to `{b}` starts"),
                );
            }
            report.emit();
        }
    }
}

/// Neighbour of `from` on a shortest path to `to`.
fn first_hop<'g>(graph: &'g Graph, from: &str, to: &'g str) -> Option<&'g str> {
    let mut visited = HashSet::from([to]);
    let mut queue = VecDeque::from([to]);
    while let Some(id) = queue.pop_front() {
        for next in graph.node(id)?.edges() {
            if next == from {
                return Some(id);
            }
            if visited.insert(next) {
                queue.push_back(next);
            }
        }
    }
    None
}

/// Operator entries have no declared type of their own and are skipped.
fn check_declared_types(store: &Store, strict: bool, diagnostics: &mut Diagnostics) {
    let severity = if strict {
        Severity::Error
    } else {
        Severity::Warning
    };
    for (id, entry) in store.iter() {
        if entry.actual.is_kind(Kind::InBuiltOperator) || entry.actual == entry.inferred {
            continue;
        }
        diagnostics
            .report(DiagnosticKind::DeclaredInferredMismatch, Location::node(id))
            .message(format!(
                "`{id}` is declared as {} but inferred as {}",
                entry.actual, entry.inferred
            ))
            .severity(severity)
            .emit();
    }
}
