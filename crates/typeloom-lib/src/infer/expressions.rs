//! Per-tag synthesis rules.
//!
//! `infer_node` returns the synthesized type of a node, or `None` for nodes
//! that constrain nothing further (an `If`, an assignment between two typed
//! sides). Every node visited gets a graph node keyed by its id.

use indexmap::IndexMap;

use typeloom_core::{Error as CoreError, Kind, Literal, Meaning, StoreValue, TypeRepr};

use super::Engine;
use crate::ast::{Node, Tag};
use crate::operators::{assertion_kind, is_passthrough, required_kind};
use crate::trace::Tracer;
use crate::{Error, Result};

impl<T: Tracer> Engine<'_, T> {
    pub(super) fn infer_node(&mut self, node: &Node) -> Result<Option<TypeRepr>> {
        self.tracer.trace_enter(node);
        self.graph.add_node(node.id.as_str());
        let ty = match node.tag {
            Tag::Constant => self.infer_constant(node).map(Some),
            Tag::Identifier => Ok(Some(self.infer_identifier(node))),
            Tag::Unary => self.infer_unary(node),
            Tag::Binary => self.infer_binary(node),
            Tag::Nary => self.infer_nary(node).map(Some),
            Tag::If => self.infer_if(node).map(|()| None),
            Tag::Compound => self.infer_compound(node),
            Tag::Return => self.infer_return(node),
            Tag::Object => self.infer_object(node).map(Some),
            Tag::Member => self.infer_member(node).map(Some),
            Tag::Call => self.infer_call(node),
        }?;
        self.tracer.trace_exit(node, ty.as_ref());
        Ok(ty)
    }

    /// The declared kind, carrying the constant's own value as its literal.
    fn infer_constant(&mut self, node: &Node) -> Result<TypeRepr> {
        let kind = node.kind()?;
        let ty = TypeRepr::primitive(kind);
        Ok(match Literal::from_constant(kind, &node.value) {
            Some(literal) => ty.with_literals([literal]),
            None => ty,
        })
    }

    /// First mention is unconstrained.
    fn infer_identifier(&mut self, node: &Node) -> TypeRepr {
        self.store
            .get(&node.id)
            .map(|entry| entry.inferred.clone())
            .unwrap_or_else(|| TypeRepr::primitive(Kind::Any))
    }

    fn infer_unary(&mut self, node: &Node) -> Result<Option<TypeRepr>> {
        let operand = node.arg(0)?;
        if is_passthrough(&node.value) {
            let ty = self.infer_node(operand)?;
            self.record(operand, ty.as_ref())?;
            return Ok(ty);
        }

        let kind = required_kind(&node.value)?;
        let required = TypeRepr::primitive(kind);
        let ty = self.infer_node(operand)?;
        if let Some(ty) = &ty
            && !ty.is_wildcard()
            && *ty != required
        {
            return Err(CoreError::conflicting_inferred(&operand.id, ty, &required).into());
        }
        if !operand.is_operator() {
            let actual = self.actual_of(operand)?;
            self.set(
                &operand.id,
                StoreValue::new(operand.value.as_str(), actual, required.clone()),
            )?;
        }
        self.link_to_kind(&operand.id, kind)?;
        Ok(Some(required))
    }

    /// Both sides must end up with the same type. An `Any` side is widened to
    /// the other side's type, which becomes the result.
    fn infer_binary(&mut self, node: &Node) -> Result<Option<TypeRepr>> {
        let lhs = node.arg(0)?;
        let rhs = node.arg(1)?;

        let lhs_ty = self.infer_node(lhs)?;
        self.record(lhs, lhs_ty.as_ref())?;
        let rhs_ty = self.infer_node(rhs)?;
        self.record(rhs, rhs_ty.as_ref())?;

        self.add_edge(&lhs.id, &rhs.id)?;

        let (Some(lhs_ty), Some(rhs_ty)) = (lhs_ty, rhs_ty) else {
            return Ok(None);
        };
        if lhs_ty != rhs_ty {
            return Err(CoreError::conflicting_inferred(&lhs.id, &lhs_ty, &rhs_ty).into());
        }
        if lhs_ty.is_kind(Kind::Any) {
            self.widen(lhs, rhs, &rhs_ty)?;
            return Ok(Some(rhs_ty));
        }
        if rhs_ty.is_kind(Kind::Any) {
            self.widen(rhs, lhs, &lhs_ty)?;
            return Ok(Some(lhs_ty));
        }
        Ok(None)
    }

    /// Replace the `Any` entry of `target` with the type flowing from `source`.
    fn widen(&mut self, target: &Node, source: &Node, ty: &TypeRepr) -> Result<()> {
        if target.is_operator() {
            return Ok(());
        }
        let actual = TypeRepr::primitive(source.kind()?);
        self.set(
            &target.id,
            StoreValue::new(target.value.as_str(), actual, ty.widened()),
        )
    }

    /// Every argument must have the operator's kind. Arguments are chained to
    /// each other and the last one to the kind node.
    fn infer_nary(&mut self, node: &Node) -> Result<TypeRepr> {
        let kind = required_kind(&node.value)?;
        let required = TypeRepr::primitive(kind);

        let mut prev: Option<&Node> = None;
        for arg in &node.args {
            let ty = if self.infer_assertion(arg)? {
                Some(TypeRepr::primitive(Kind::Boolean))
            } else {
                self.infer_node(arg)?
            };
            if let Some(ty) = &ty
                && !ty.is_wildcard()
                && *ty != required
            {
                return Err(CoreError::conflicting_inferred(&arg.id, ty, &required).into());
            }
            if !arg.is_operator() {
                let actual = self.actual_of(arg)?;
                self.set(
                    &arg.id,
                    StoreValue::new(arg.value.as_str(), actual, required.clone()),
                )?;
            }
            if let Some(prev) = prev {
                self.add_edge(&prev.id, &arg.id)?;
            }
            prev = Some(arg);
        }

        if let Some(last) = prev {
            self.link_to_kind(&last.id, kind)?;
        }
        Ok(required)
    }

    /// A call to a type-assertion function such as `Number?(x)` pins its
    /// subject to the asserted kind. Returns `false` for any other node.
    fn infer_assertion(&mut self, arg: &Node) -> Result<bool> {
        if arg.tag != Tag::Call {
            return Ok(false);
        }
        let Some(callee) = arg.args.first() else {
            return Ok(false);
        };
        let Some(kind) = assertion_kind(&callee.value) else {
            return Ok(false);
        };

        self.tracer.trace_enter(arg);
        self.graph.add_node(arg.id.as_str());
        let subject = callee.arg(0)?;
        self.graph.add_node(subject.id.as_str());
        let actual = self.actual_of(subject)?;
        self.set(
            &subject.id,
            StoreValue::new(subject.value.as_str(), actual, TypeRepr::primitive(kind)),
        )?;
        self.link_to_kind(&subject.id, kind)?;
        self.tracer
            .trace_exit(arg, Some(&TypeRepr::primitive(Kind::Boolean)));
        Ok(true)
    }

    /// Condition and branches are recorded independently. The statement itself
    /// has no type.
    fn infer_if(&mut self, node: &Node) -> Result<()> {
        node.arg(1)?;
        for branch in node.args.iter().take(3) {
            let ty = self.infer_node(branch)?;
            self.record(branch, ty.as_ref())?;
        }
        Ok(())
    }

    /// Every child is inferred; the first one gives the type.
    fn infer_compound(&mut self, node: &Node) -> Result<Option<TypeRepr>> {
        let mut first = None;
        for (i, child) in node.args.iter().enumerate() {
            let ty = self.infer_node(child)?;
            if i == 0 {
                first = ty;
            }
        }
        Ok(first)
    }

    fn infer_return(&mut self, node: &Node) -> Result<Option<TypeRepr>> {
        match node.args.first() {
            Some(value) => self.infer_node(value),
            None => Ok(None),
        }
    }

    /// Each argument is a field entry: its value names the field and its first
    /// child is the field's expression.
    fn infer_object(&mut self, node: &Node) -> Result<TypeRepr> {
        let mut fields = IndexMap::new();
        for field in &node.args {
            let expr = field.arg(0)?;
            let ty = self
                .infer_node(expr)?
                .unwrap_or_else(|| TypeRepr::primitive(Kind::Any));
            self.record(expr, Some(&ty))?;
            self.link_to_type(expr, &ty)?;
            fields.insert(field.value.clone(), ty.widened());
        }
        Ok(TypeRepr::new(None, Meaning::Object(fields)))
    }

    fn infer_member(&mut self, node: &Node) -> Result<TypeRepr> {
        let attribute = self
            .attributes
            .get(&node.value)
            .ok_or_else(|| Error::MissingAttribute(node.value.clone()))?;
        let kind = Kind::from_token(&attribute.type_t)?;
        let ty = TypeRepr::primitive(kind);

        let actual = self.actual_of(node)?;
        self.set(
            &node.id,
            StoreValue::new(node.value.as_str(), actual, ty.clone()),
        )?;
        self.link_to_kind(&node.id, kind)?;
        Ok(ty)
    }

    /// The callee is the first child. A callee already in the store must be a
    /// function; the call takes the callee's inferred type.
    fn infer_call(&mut self, node: &Node) -> Result<Option<TypeRepr>> {
        let callee = node.arg(0)?;
        if let Some(entry) = self.store.get(&callee.id)
            && entry.inferred != TypeRepr::primitive(Kind::Function)
        {
            return Err(Error::NotCallable {
                id: callee.id.clone(),
                value: entry.value.clone(),
                found: Box::new(entry.inferred.clone()),
            });
        }
        self.infer_node(callee)
    }
}
