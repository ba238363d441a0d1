#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for typeloom type inference.
//!
//! Three layers, each usable on its own:
//! - **Lattice** (`Kind`, `TypeRepr`): primitive kinds and the representations
//!   built from them, with wildcard-absorbing comparison operators.
//! - **Equivalence graph** (`Graph`): undirected "same type as" relation between
//!   program entities, anchored on basal (kind and custom type) nodes.
//! - **Store** (`Store`): per-id declared and inferred types, with the
//!   monotonicity rules that turn disagreements into errors.
//!
//! Both the graph and the store round-trip through JSON (see `persist`).

mod colors;
pub mod definition;
pub mod dump;
pub mod graph;
mod invariants;
pub mod kind;
pub mod persist;
pub mod repr;
pub mod store;

#[cfg(test)]
mod kind_tests;

pub use colors::Colors;
pub use definition::Definition;
pub use dump::GraphPrinter;
pub use graph::{Graph, Node};
pub use kind::Kind;
pub use repr::{Form, Literal, Meaning, Member, Solved, TypeRepr};
pub use store::{Store, StoreValue};

/// Errors raised by the lattice, graph and store.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A definition is missing its form or meaning, or the meaning does not fit the form.
    #[error("invalid type definition: {0}")]
    InvalidDefinition(String),

    /// An edge endpoint or propagation start is absent from the graph.
    #[error("node `{0}` not found in the equivalence graph")]
    NodeNotFound(String),

    /// A store write would replace an inferred type with one it does not refine.
    #[error("conflicting inferred types for `{id}`: existing {existing}, got {new}")]
    ConflictingInferredTypes {
        id: String,
        existing: Box<TypeRepr>,
        new: Box<TypeRepr>,
    },

    /// Strict mode: a declared type disagrees with the propagated one.
    #[error("`{id}` is declared as {declared} but inferred as {inferred}")]
    ConflictingDeclaredTypes {
        id: String,
        declared: Box<TypeRepr>,
        inferred: Box<TypeRepr>,
    },

    /// Propagation started from a node that has no kind and none was supplied.
    #[error("node `{0}` has no kind to propagate")]
    UntypedNode(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn conflicting_inferred(id: impl Into<String>, existing: &TypeRepr, new: &TypeRepr) -> Self {
        Error::ConflictingInferredTypes {
            id: id.into(),
            existing: Box::new(existing.clone()),
            new: Box::new(new.clone()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
