//! Custom-type and parameter bindings, applied before any statement is inferred.

use indexmap::IndexMap;

use typeloom_core::{Kind, StoreValue, TypeRepr};

use super::Engine;
use crate::annotations::Annotations;
use crate::ast::{Function, Node, Program, Tag};
use crate::diagnostics::Location;
use crate::trace::Tracer;
use crate::{Error, Result};

/// Id of the first identifier named `variable` in `node`, in pre-order.
///
/// Purely syntactic: nothing is inferred and nothing is recorded.
pub fn lookup_variable<'a>(variable: &str, node: &'a Node) -> Option<&'a str> {
    node.walk()
        .find(|n| n.tag == Tag::Identifier && n.value == variable)
        .map(|n| n.id.as_str())
}

/// Split a `function_variable` binding key. The longest function name that
/// prefixes the key wins, so `pay_total_amount` binds `amount` in `pay_total`
/// when both `pay` and `pay_total` exist.
fn split_binding<'k>(key: &'k str, program: &Program) -> Option<(&'k str, &'k str)> {
    program
        .methods
        .keys()
        .filter_map(|name| {
            let rest = key.strip_prefix(name.as_str())?.strip_prefix('_')?;
            (!rest.is_empty()).then(|| key.split_at(name.len()))
        })
        .max_by_key(|(function, _)| function.len())
        .map(|(function, rest)| (function, &rest[1..]))
}

impl<T: Tracer> Engine<'_, T> {
    pub(super) fn bind_custom_types(&mut self, program: &Program, annotations: &Annotations) -> Result<()> {
        for (key, type_name) in &annotations.bindings {
            let Some((name, variable)) = split_binding(key, program) else {
                log::warn!("binding `{key}` does not name a known function");
                continue;
            };
            let Some(function) = program.methods.get(name) else {
                continue;
            };
            let result = self.bind_custom_type(function, variable, type_name, annotations);
            self.absorb(result, Location::function(name))?;
        }
        Ok(())
    }

    /// Bind `type_name` to the first use of `variable` in the body, or to the
    /// parameter of that name when the body never mentions it.
    fn bind_custom_type(
        &mut self,
        function: &Function,
        variable: &str,
        type_name: &str,
        annotations: &Annotations,
    ) -> Result<()> {
        let typedef = annotations
            .typedefs
            .get(type_name)
            .ok_or_else(|| Error::UnknownCustomType(type_name.to_string()))?;

        let id = function
            .body
            .iter()
            .find_map(|statement| lookup_variable(variable, &statement.node))
            .or_else(|| {
                function
                    .parameters
                    .iter()
                    .find(|p| p.value == variable)
                    .map(|p| p.id.as_str())
            });
        let Some(id) = id else {
            log::warn!(
                "custom type `{type_name}` is bound to `{variable}`, which `{}` never mentions",
                function.name
            );
            return Ok(());
        };

        log::debug!("bind `{id}` to custom type `{type_name}`");
        self.graph.add_basal_type(type_name);
        self.graph.add_node(id);
        self.set(
            id,
            StoreValue::new(variable, TypeRepr::primitive(Kind::Unknown), typedef.clone()),
        )?;
        self.add_edge(id, type_name)
    }

    pub(super) fn bind_parameters(&mut self, program: &Program, annotations: &Annotations) -> Result<()> {
        for (name, function) in &program.methods {
            if function.parameters.is_empty() {
                continue;
            }
            let Some(params) = annotations.params.get(name) else {
                continue;
            };
            let result = self.bind_function_parameters(name, function, params, annotations);
            self.absorb(result, Location::function(name.as_str()))?;
        }
        Ok(())
    }

    fn bind_function_parameters(
        &mut self,
        name: &str,
        function: &Function,
        params: &IndexMap<String, TypeRepr>,
        annotations: &Annotations,
    ) -> Result<()> {
        if function.parameters.len() != params.len() {
            return Err(Error::ParameterCountMismatch {
                function: name.to_string(),
                expected: params.len(),
                found: function.parameters.len(),
            });
        }

        for param in &function.parameters {
            let Some(ty) = params.get(&param.value) else {
                continue;
            };
            self.graph.add_node(param.id.as_str());
            self.set(
                &param.id,
                StoreValue::new(param.id.as_str(), ty.clone(), ty.clone()),
            )?;
            if ty.is_wildcard() {
                continue;
            }
            let anchor = self.parameter_anchor(name, &param.value, ty, annotations)?;
            self.add_edge(&param.id, &anchor)?;
        }
        Ok(())
    }

    /// Graph node a parameter of type `ty` hangs off: the type's own node, the
    /// kind node an alias resolves to, or the custom type bound to the parameter.
    fn parameter_anchor(
        &self,
        function: &str,
        parameter: &str,
        ty: &TypeRepr,
        annotations: &Annotations,
    ) -> Result<String> {
        if self.graph.contains(ty.name()) {
            return Ok(ty.name().to_string());
        }
        if let Some(kind) = ty.target().primitive_kind() {
            return Ok(kind.name().to_string());
        }
        if let Some(bound) = annotations.binding(function, parameter)
            && self.graph.contains(bound)
        {
            return Ok(bound.to_string());
        }
        Err(Error::UnresolvedParameterType {
            function: function.to_string(),
            parameter: parameter.to_string(),
        })
    }
}
