//! Type store: per-id declared (`actual`) and inferred types.
//!
//! Writes are monotone. An entry is replaced only by a refinement of its
//! inferred type (or when it is still `Any`); anything else is a conflict.
//! Propagation uses the looser `set_on_equivalence`, which also reconciles the
//! declared type with what flowed in through the equivalence graph.

use indexmap::IndexMap;

use crate::kind::Kind;
use crate::repr::{TypeRepr, strip_quotes};
use crate::{Error, Result};

#[derive(Clone, Debug)]
pub struct StoreValue {
    /// Source text or variable name of the entity.
    pub value: String,
    /// Declared or token-derived type.
    pub actual: TypeRepr,
    pub inferred: TypeRepr,
}

impl StoreValue {
    pub fn new(value: impl Into<String>, actual: TypeRepr, inferred: TypeRepr) -> Self {
        Self {
            value: value.into(),
            actual,
            inferred,
        }
    }

    /// `value` with quote characters removed.
    pub fn literal_text(&self) -> &str {
        strip_quotes(&self.value)
    }

    /// The escape hatch for literal constants: the entity's own text is one of
    /// the literals `ty` admits.
    fn is_literal_of(&self, ty: &TypeRepr) -> bool {
        let text = self.literal_text();
        ty.literals()
            .is_some_and(|lits| lits.iter().any(|lit| lit.text() == text))
    }
}

impl PartialEq for StoreValue {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.actual == other.actual && self.inferred == other.inferred
    }
}

#[derive(Clone, Debug, Default)]
pub struct Store {
    entries: IndexMap<String, StoreValue>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&StoreValue> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StoreValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Monotone write.
    ///
    /// Inserts when absent. Replaces when the current inferred type is exactly
    /// `Any` or is a subtype-or-equal of the new one. Otherwise the write is a
    /// `ConflictingInferredTypes` error and the store is unchanged.
    pub fn set(&mut self, id: &str, value: StoreValue) -> Result<()> {
        if let Some(current) = self.entries.get(id)
            && !current.inferred.is_kind(Kind::Any)
            && !current.inferred.is_subtype_or_eq(&value.inferred)
        {
            return Err(Error::conflicting_inferred(
                id,
                &current.inferred,
                &value.inferred,
            ));
        }
        log::debug!("store: `{id}` = {}", value.inferred);
        self.entries.insert(id.to_string(), value);
        Ok(())
    }

    /// Write arriving through graph propagation.
    ///
    /// - Absent: plain `set`.
    /// - Current inferred type does not refine into the new one: accepted only
    ///   if the entity's text is one of the new type's literals, otherwise a
    ///   `ConflictingInferredTypes` error.
    /// - Declared type agrees with the new inferred type: `set`.
    /// - Declared type disagrees: an error when `check` is on, otherwise the
    ///   entry is left as is.
    pub fn set_on_equivalence(&mut self, id: &str, value: StoreValue, check: bool) -> Result<()> {
        let Some(current) = self.entries.get(id) else {
            return self.set(id, value);
        };

        if !current.inferred.is_subtype_or_eq(&value.inferred) {
            if current.is_literal_of(&value.inferred) {
                log::debug!("store: `{id}` admitted as literal of {}", value.inferred);
                self.entries.insert(id.to_string(), value);
                return Ok(());
            }
            return Err(Error::conflicting_inferred(
                id,
                &current.inferred,
                &value.inferred,
            ));
        }

        if current.actual == value.inferred {
            return self.set(id, value);
        }

        if check {
            return Err(Error::ConflictingDeclaredTypes {
                id: id.to_string(),
                declared: Box::new(current.actual.clone()),
                inferred: Box::new(value.inferred),
            });
        }
        log::warn!(
            "`{id}` declared as {} but {} flows in; keeping declared entry",
            current.actual,
            value.inferred
        );
        Ok(())
    }

    /// Insert without any monotonicity check. Used when loading a persisted store.
    pub(crate) fn insert_raw(&mut self, id: String, value: StoreValue) {
        self.entries.insert(id, value);
    }
}
