//! JSON persistence for `Store` and `Graph`.
//!
//! Store format:
//! ```json
//! {"x": {"value": "x",
//!        "actual":   {"name": "Number", "definition": "{\"form\":\"Primitive\",\"meaning\":[\"Number\"]}"},
//!        "inferred": {"name": "Number", "definition": "..."}}}
//! ```
//! `definition` is itself a JSON-encoded string of `{form, meaning, value?}`.
//!
//! Graph format: `{"nodes": [{"value": id, "edges": [id, ...]}], "basal": [id, ...]}`.
//! `basal` is optional on input; without it only the primitive kinds are basal.
//! Loading creates every node before any edge, so edge order in the file is free.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::definition::Definition;
use crate::graph::{Graph, Node};
use crate::kind::Kind;
use crate::repr::TypeRepr;
use crate::store::{Store, StoreValue};
use crate::{Error, Result};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PersistedType {
    pub name: String,
    pub definition: String,
}

impl From<&TypeRepr> for PersistedType {
    fn from(repr: &TypeRepr) -> Self {
        let mut def = Definition::from(repr);
        def.name = None;
        Self {
            name: repr.name().to_string(),
            definition: def.to_value().to_string(),
        }
    }
}

impl TryFrom<PersistedType> for TypeRepr {
    type Error = Error;

    fn try_from(persisted: PersistedType) -> Result<Self> {
        let mut def = Definition::from_json(&persisted.definition)?;
        def.name = Some(persisted.name);
        TypeRepr::try_from(def)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PersistedValue {
    pub value: String,
    pub actual: PersistedType,
    pub inferred: PersistedType,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PersistedNode {
    pub value: String,
    #[serde(default)]
    pub edges: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PersistedGraph {
    pub nodes: Vec<PersistedNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basal: Option<Vec<String>>,
}

impl Store {
    pub fn to_persisted(&self) -> IndexMap<String, PersistedValue> {
        self.iter()
            .map(|(id, v)| {
                let persisted = PersistedValue {
                    value: v.value.clone(),
                    actual: (&v.actual).into(),
                    inferred: (&v.inferred).into(),
                };
                (id.to_string(), persisted)
            })
            .collect()
    }

    pub fn from_persisted(entries: IndexMap<String, PersistedValue>) -> Result<Self> {
        let mut store = Store::new();
        for (id, entry) in entries {
            let value = StoreValue::new(
                entry.value,
                TypeRepr::try_from(entry.actual)?,
                TypeRepr::try_from(entry.inferred)?,
            );
            store.insert_raw(id, value);
        }
        Ok(store)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_persisted(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_persisted())?)
    }
}

impl Graph {
    pub fn to_persisted(&self) -> PersistedGraph {
        let nodes = self
            .nodes()
            .map(|n| PersistedNode {
                value: n.id().to_string(),
                edges: n.edges().map(str::to_string).collect(),
            })
            .collect();
        PersistedGraph {
            nodes,
            basal: Some(self.basal().map(str::to_string).collect()),
        }
    }

    pub fn from_persisted(persisted: PersistedGraph) -> Result<Self> {
        let mut graph = Graph::empty();
        for node in &persisted.nodes {
            graph.insert_node(Node::new(node.value.clone()));
        }
        let basal: Vec<String> = match persisted.basal {
            Some(basal) => basal,
            None => Kind::ALL.iter().map(|k| k.name().to_string()).collect(),
        };
        for id in &basal {
            if graph.contains(id) {
                graph.mark_basal(id);
            } else {
                graph.add_basal_type(id.clone());
            }
        }
        for node in &persisted.nodes {
            for edge in &node.edges {
                graph.add_edge(&node.value, edge)?;
            }
        }
        Ok(graph)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_persisted(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_persisted())?)
    }
}
