//! External annotations fed to inference.
//!
//! - `params`: `{function: {parameter: definition}}`, declared parameter types
//! - `typedefs`: `{TypeName: definition}`, or source in the definition language
//! - `bindings`: `{"function_variable": "TypeName"}`, custom types bound to variables
//!
//! A parameter definition is a kind name, the name of a loaded typedef, or a
//! full `{form, meaning}` object. Load typedefs before parameters so names resolve.

use indexmap::IndexMap;
use serde_json::Value;

use typeloom_core::repr::is_generated_name;
use typeloom_core::{Definition, Kind, TypeRepr};

use crate::{Error, Result, typedef};

#[derive(Clone, Debug, Default)]
pub struct Annotations {
    pub params: IndexMap<String, IndexMap<String, TypeRepr>>,
    pub typedefs: IndexMap<String, TypeRepr>,
    pub bindings: IndexMap<String, String>,
}

impl Annotations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `{TypeName: definition}`. Unnamed definitions take their key as name.
    pub fn load_typedefs_json(&mut self, json: &str) -> Result<()> {
        let raw: IndexMap<String, Definition> = serde_json::from_str(json)?;
        for (key, def) in raw {
            let repr = TypeRepr::try_from(def)?;
            let repr = if is_generated_name(repr.name()) {
                repr.with_name(key.clone())
            } else {
                repr
            };
            log::debug!("typedef `{key}` = {repr}");
            self.typedefs.insert(key, repr);
        }
        Ok(())
    }

    /// Load definitions written in the definition language.
    pub fn load_typedef_source(&mut self, source: &str) -> Result<()> {
        self.typedefs.extend(typedef::parse(source)?);
        Ok(())
    }

    /// Load `{function: {parameter: definition}}`.
    pub fn load_params_json(&mut self, json: &str) -> Result<()> {
        let raw: IndexMap<String, IndexMap<String, Value>> = serde_json::from_str(json)?;
        for (function, params) in raw {
            let mut resolved = IndexMap::new();
            for (param, def) in params {
                resolved.insert(param, self.resolve_definition(def)?);
            }
            self.params.insert(function, resolved);
        }
        Ok(())
    }

    /// Load `{"function_variable": "TypeName"}`.
    pub fn load_bindings_json(&mut self, json: &str) -> Result<()> {
        let raw: IndexMap<String, String> = serde_json::from_str(json)?;
        self.bindings.extend(raw);
        Ok(())
    }

    /// Custom type bound to `variable` inside `function`.
    pub fn binding(&self, function: &str, variable: &str) -> Option<&str> {
        self.bindings
            .get(&format!("{function}_{variable}"))
            .map(String::as_str)
    }

    fn resolve_definition(&self, def: Value) -> Result<TypeRepr> {
        match def {
            Value::String(name) => {
                if let Some(repr) = self.typedefs.get(&name) {
                    return Ok(repr.clone());
                }
                match Kind::from_token(&name) {
                    Ok(kind) => Ok(TypeRepr::primitive(kind)),
                    Err(_) => Err(Error::UnknownCustomType(name)),
                }
            }
            other => {
                let def: Definition = serde_json::from_value(other)?;
                Ok(TypeRepr::try_from(def)?)
            }
        }
    }
}
