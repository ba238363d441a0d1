//! Type representations and the relational operators over them.
//!
//! A `TypeRepr` is an immutable value: a name, a form-specific `Meaning`, an
//! optional set of concrete literals, and a `Solved` cache holding the kind-level
//! resolution used by every comparison. The cache is computed once at
//! construction; builder methods that change the meaning or literals return a
//! new value with the cache recomputed.
//!
//! Comparisons are lattice-style, not structural:
//! - `==` absorbs wildcards (`Any`, `Unknown`), compares object field sets,
//!   and checks union membership.
//! - `is_subtype_of` is the strict variant (proper field subset, proper kind subset).
//! - `is_subtype_or_eq` is the disjunction and gates overwrites in the store.
//!
//! Because wildcard absorption is not transitive, `TypeRepr` implements
//! `PartialEq` only.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::definition::Definition;
use crate::kind::Kind;

/// Prefix of synthesized names. Such names key graph nodes and store entries
/// but carry no meaning and are never compared for semantic equality.
pub const ANON_PREFIX: &str = "_t";

static NEXT_ANON: AtomicU64 = AtomicU64::new(0);

/// Synthesize a fresh opaque name for a representation declared without one.
pub fn fresh_name() -> String {
    let n = NEXT_ANON.fetch_add(1, Ordering::Relaxed);
    format!("{ANON_PREFIX}{n:08x}")
}

pub fn is_generated_name(name: &str) -> bool {
    name.starts_with(ANON_PREFIX)
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Form {
    Primitive,
    Union,
    Intersect,
    Alias,
    Object,
    Function,
}

/// A concrete value appearing in a union or attached to a constant.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl Literal {
    pub fn kind(&self) -> Kind {
        match self {
            Literal::Bool(_) => Kind::Boolean,
            Literal::Int(_) => Kind::Number,
            Literal::Str(_) => Kind::String,
        }
    }

    /// Literal for a constant's source text, if the kind admits one.
    ///
    /// String constants are quote-stripped; numbers that do not fit an `i64`
    /// (floats, hex) carry no literal.
    pub fn from_constant(kind: Kind, text: &str) -> Option<Literal> {
        match kind {
            Kind::String => Some(Literal::Str(strip_quotes(text).to_string())),
            Kind::Number => text.trim().parse().ok().map(Literal::Int),
            Kind::Boolean => match text.trim() {
                "true" => Some(Literal::Bool(true)),
                "false" => Some(Literal::Bool(false)),
                _ => None,
            },
            _ => None,
        }
    }

    /// Unquoted text, used when matching a stored value against a literal set.
    pub fn text(&self) -> String {
        match self {
            Literal::Bool(b) => b.to_string(),
            Literal::Int(n) => n.to_string(),
            Literal::Str(s) => s.clone(),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Str(s) => write!(f, "{s:?}"),
            other => f.write_str(&other.text()),
        }
    }
}

pub(crate) fn strip_quotes(text: &str) -> &str {
    text.trim_matches(|c| c == '"' || c == '\'')
}

/// One entry of a union or intersection.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Member {
    Literal(Literal),
    Kind(Kind),
}

impl Member {
    pub fn kind(&self) -> Kind {
        match self {
            Member::Literal(lit) => lit.kind(),
            Member::Kind(kind) => *kind,
        }
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Member::Literal(lit) => write!(f, "{lit}"),
            Member::Kind(kind) => write!(f, "{kind}"),
        }
    }
}

/// Form-specific payload of a representation.
#[derive(Clone, Debug)]
pub enum Meaning {
    Primitive(Kind),
    Union(Vec<Member>),
    Intersect(Vec<Member>),
    Alias(Box<TypeRepr>),
    Object(IndexMap<String, TypeRepr>),
    Function {
        params: IndexMap<String, TypeRepr>,
        ret: Box<TypeRepr>,
    },
}

impl Meaning {
    pub fn form(&self) -> Form {
        match self {
            Meaning::Primitive(_) => Form::Primitive,
            Meaning::Union(_) => Form::Union,
            Meaning::Intersect(_) => Form::Intersect,
            Meaning::Alias(_) => Form::Alias,
            Meaning::Object(_) => Form::Object,
            Meaning::Function { .. } => Form::Function,
        }
    }
}

/// Kind-level resolution cached on every representation.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Solved {
    /// Deduplicated kinds (primitive: one; union: one per distinct member kind).
    Kinds(IndexSet<Kind>),
    /// Object field names.
    Fields(IndexSet<String>),
}

impl Solved {
    fn of(meaning: &Meaning) -> Solved {
        match meaning {
            Meaning::Primitive(kind) => Solved::Kinds(IndexSet::from([*kind])),
            Meaning::Union(members) | Meaning::Intersect(members) => {
                Solved::Kinds(members.iter().map(Member::kind).collect())
            }
            Meaning::Alias(target) => target.solved.clone(),
            Meaning::Object(fields) => Solved::Fields(fields.keys().cloned().collect()),
            Meaning::Function { .. } => Solved::Kinds(IndexSet::from([Kind::Function])),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "Definition", into = "Definition")]
pub struct TypeRepr {
    name: String,
    meaning: Meaning,
    literals: Option<IndexSet<Literal>>,
    solved: Solved,
}

impl TypeRepr {
    /// Build a representation, synthesizing a name when none is given.
    pub fn new(name: Option<String>, meaning: Meaning) -> Self {
        let name = name.unwrap_or_else(fresh_name);
        let solved = Solved::of(&meaning);
        let literals = member_literals(&meaning);
        Self {
            name,
            meaning,
            literals,
            solved,
        }
    }

    /// Wrap a single kind. The name is the kind's name, which is also the id of
    /// its basal node in the equivalence graph.
    pub fn primitive(kind: Kind) -> Self {
        Self::new(Some(kind.name().to_string()), Meaning::Primitive(kind))
    }

    /// Attach concrete literal values, merging with any the meaning already carries.
    pub fn with_literals(self, literals: impl IntoIterator<Item = Literal>) -> Self {
        let mut merged = self.literals.unwrap_or_default();
        merged.extend(literals);
        Self {
            literals: (!merged.is_empty()).then_some(merged),
            ..self
        }
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }

    /// Drop the literals of a primitive. Other forms are returned unchanged,
    /// since union literals are part of their meaning.
    pub fn widened(&self) -> TypeRepr {
        match self.meaning {
            Meaning::Primitive(_) => Self {
                literals: None,
                ..self.clone()
            },
            _ => self.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn meaning(&self) -> &Meaning {
        &self.meaning
    }

    pub fn form(&self) -> Form {
        self.meaning.form()
    }

    pub fn literals(&self) -> Option<&IndexSet<Literal>> {
        self.literals.as_ref()
    }

    pub fn is_literal(&self) -> bool {
        self.literals.is_some()
    }

    pub fn solved(&self) -> &Solved {
        &self.solved
    }

    /// Solved kinds, or `None` for objects.
    pub fn kinds(&self) -> Option<&IndexSet<Kind>> {
        match &self.solved {
            Solved::Kinds(kinds) => Some(kinds),
            Solved::Fields(_) => None,
        }
    }

    pub fn fields(&self) -> Option<&IndexMap<String, TypeRepr>> {
        match &self.target().meaning {
            Meaning::Object(fields) => Some(fields),
            _ => None,
        }
    }

    /// The kind of a `Primitive` form.
    pub fn primitive_kind(&self) -> Option<Kind> {
        match self.meaning {
            Meaning::Primitive(kind) => Some(kind),
            _ => None,
        }
    }

    /// Exactly the primitive `kind`, with no wildcard absorption.
    pub fn is_kind(&self, kind: Kind) -> bool {
        self.primitive_kind() == Some(kind)
    }

    /// Sole solved kind is `Any` or `Unknown`.
    pub fn is_wildcard(&self) -> bool {
        match &self.solved {
            Solved::Kinds(kinds) => kinds.len() == 1 && kinds.iter().all(|k| k.is_wildcard()),
            Solved::Fields(_) => false,
        }
    }

    /// Follow alias chains to the aliased representation.
    pub fn target(&self) -> &TypeRepr {
        let mut current = self;
        while let Meaning::Alias(inner) = &current.meaning {
            current = inner;
        }
        current
    }

    fn is_union(&self) -> bool {
        self.form() == Form::Union
    }

    /// Kinds admitted wholesale by a union (members written as kinds, not literals).
    fn member_kinds(&self) -> IndexSet<Kind> {
        match &self.meaning {
            Meaning::Union(members) | Meaning::Intersect(members) => members
                .iter()
                .filter_map(|m| match m {
                    Member::Kind(kind) => Some(*kind),
                    Member::Literal(_) => None,
                })
                .collect(),
            _ => IndexSet::new(),
        }
    }

    /// Union membership: `self` is in `union` if each of its literals is a union
    /// literal (or of a kind the union admits wholesale), or, when `self` carries
    /// no literals, if its solved kinds are a subset of the union's.
    pub fn is_member_of(&self, union: &TypeRepr) -> bool {
        let union = union.target();
        if let Some(literals) = &self.literals {
            let member_kinds = union.member_kinds();
            return literals.iter().all(|lit| {
                union.literals.as_ref().is_some_and(|u| u.contains(lit))
                    || member_kinds.contains(&lit.kind())
            });
        }
        match (self.kinds(), union.kinds()) {
            (Some(mine), Some(theirs)) => mine.is_subset(theirs),
            _ => false,
        }
    }

    /// Strict subtype (`<`).
    pub fn is_subtype_of(&self, other: &TypeRepr) -> bool {
        if self.is_wildcard() || other.is_wildcard() {
            return true;
        }
        let (a, b) = (self.target(), other.target());
        match (&a.solved, &b.solved) {
            (Solved::Fields(x), Solved::Fields(y)) => return x.len() < y.len() && x.is_subset(y),
            (Solved::Fields(_), _) | (_, Solved::Fields(_)) => return false,
            _ => {}
        }
        match (a.is_union(), b.is_union()) {
            (true, true) => match (&a.literals, &b.literals) {
                (Some(x), Some(y)) => x.len() < y.len() && x.is_subset(y),
                _ => proper_kind_subset(a, b),
            },
            (false, true) => a.is_member_of(b),
            (true, false) => false,
            (false, false) => proper_kind_subset(a, b),
        }
    }

    /// Subtype-or-equal (`<=`).
    pub fn is_subtype_or_eq(&self, other: &TypeRepr) -> bool {
        self == other || self.is_subtype_of(other)
    }
}

fn proper_kind_subset(a: &TypeRepr, b: &TypeRepr) -> bool {
    match (a.kinds(), b.kinds()) {
        (Some(x), Some(y)) => x.len() < y.len() && x.is_subset(y),
        _ => false,
    }
}

fn member_literals(meaning: &Meaning) -> Option<IndexSet<Literal>> {
    let (Meaning::Union(members) | Meaning::Intersect(members)) = meaning else {
        return None;
    };
    let literals: IndexSet<Literal> = members
        .iter()
        .filter_map(|m| match m {
            Member::Literal(lit) => Some(lit.clone()),
            Member::Kind(_) => None,
        })
        .collect();
    (!literals.is_empty()).then_some(literals)
}

impl PartialEq for TypeRepr {
    fn eq(&self, other: &Self) -> bool {
        if self.is_wildcard() || other.is_wildcard() {
            return true;
        }
        let (a, b) = (self.target(), other.target());
        match (&a.solved, &b.solved) {
            (Solved::Fields(x), Solved::Fields(y)) => return x.len() == y.len() && x.is_subset(y),
            (Solved::Fields(_), _) | (_, Solved::Fields(_)) => return false,
            _ => {}
        }
        match (a.is_union(), b.is_union()) {
            (true, true) => a.is_member_of(b) && b.is_member_of(a),
            (true, false) => b.is_member_of(a),
            (false, true) => a.is_member_of(b),
            (false, false) => match (a.kinds(), b.kinds()) {
                (Some(x), Some(y)) => x.len() == y.len() && x.is_subset(y),
                _ => false,
            },
        }
    }
}

impl fmt::Display for TypeRepr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let named = !is_generated_name(&self.name) && self.primitive_kind().is_none();
        if named {
            write!(f, "{} = ", self.name)?;
        }
        match &self.meaning {
            Meaning::Primitive(kind) => {
                write!(f, "{kind}")?;
                if let Some(literals) = &self.literals {
                    write!(f, "(")?;
                    write_joined(f, literals, ", ")?;
                    write!(f, ")")?;
                }
                Ok(())
            }
            Meaning::Union(members) => write_joined(f, members, " | "),
            Meaning::Intersect(members) => write_joined(f, members, " & "),
            Meaning::Alias(target) => write!(f, "{}", Ref(target)),
            Meaning::Object(fields) => {
                write!(f, "{{")?;
                write_fields(f, fields)?;
                write!(f, "}}")
            }
            Meaning::Function { params, ret } => {
                write!(f, "fn(")?;
                write_fields(f, params)?;
                write!(f, ") -> {}", Ref(ret))
            }
        }
    }
}

fn write_joined<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: impl IntoIterator<Item = T>,
    sep: &str,
) -> fmt::Result {
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

fn write_fields(f: &mut fmt::Formatter<'_>, fields: &IndexMap<String, TypeRepr>) -> fmt::Result {
    for (i, (name, ty)) in fields.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{name}: {}", Ref(ty))?;
    }
    Ok(())
}

/// Nested position: named types print by name only.
struct Ref<'a>(&'a TypeRepr);

impl fmt::Display for Ref<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ty = self.0;
        if ty.primitive_kind().is_none() && !is_generated_name(&ty.name) {
            f.write_str(&ty.name)
        } else {
            write!(f, "{ty}")
        }
    }
}
