//! Equivalence graph: undirected "has the same type as" relation.
//!
//! Nodes are keyed by string ids. Basal nodes are the anchors types flow out
//! of: one per primitive kind (seeded on construction) plus one per custom type
//! name bound during inference. Everything else is an expression, variable or
//! parameter id that inference linked to something.
//!
//! Edges are symmetric and deduplicated; self-loops are never stored.

use std::collections::{HashSet, VecDeque};

use indexmap::{IndexMap, IndexSet};

use crate::kind::Kind;
use crate::repr::TypeRepr;
use crate::store::{Store, StoreValue};
use crate::{Error, Result};

#[derive(Clone, Debug)]
pub struct Node {
    id: String,
    edges: IndexSet<String>,
    /// Set by propagation; never persisted.
    kind: Option<TypeRepr>,
}

impl Node {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            edges: IndexSet::new(),
            kind: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn edges(&self) -> impl Iterator<Item = &str> {
        self.edges.iter().map(String::as_str)
    }

    pub fn degree(&self) -> usize {
        self.edges.len()
    }

    pub fn kind(&self) -> Option<&TypeRepr> {
        self.kind.as_ref()
    }

    pub fn set_kind(&mut self, kind: TypeRepr) {
        self.kind = Some(kind);
    }

    fn link(&mut self, other: &str) -> bool {
        other != self.id && self.edges.insert(other.to_string())
    }

    fn unlink(&mut self, other: &str) -> bool {
        self.edges.shift_remove(other)
    }
}

#[derive(Clone, Debug)]
pub struct Graph {
    nodes: IndexMap<String, Node>,
    basal: IndexSet<String>,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    /// Graph seeded with one basal node per primitive kind.
    pub fn new() -> Self {
        let mut graph = Self::empty();
        for kind in Kind::ALL {
            graph.add_basal_type(kind.name());
        }
        graph
    }

    /// Graph with no nodes at all.
    pub fn empty() -> Self {
        Self {
            nodes: IndexMap::new(),
            basal: IndexSet::new(),
        }
    }

    /// Add a node; returns `false` if it already existed.
    pub fn add_node(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.nodes.contains_key(&id) {
            return false;
        }
        log::trace!("graph: add node `{id}`");
        self.nodes.insert(id.clone(), Node::new(id));
        true
    }

    /// Add a node and mark it basal. Idempotent.
    pub fn add_basal_type(&mut self, id: impl Into<String>) {
        let id = id.into();
        self.add_node(id.clone());
        self.basal.insert(id);
    }

    /// Link two existing nodes. Self-edges are silently ignored.
    pub fn add_edge(&mut self, a: &str, b: &str) -> Result<()> {
        for id in [a, b] {
            if !self.nodes.contains_key(id) {
                return Err(Error::NodeNotFound(id.to_string()));
            }
        }
        if a == b {
            return Ok(());
        }
        log::trace!("graph: edge `{a}` -- `{b}`");
        self.ensure_node_mut(a).link(b);
        self.ensure_node_mut(b).link(a);
        Ok(())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn is_basal(&self, id: &str) -> bool {
        self.basal.contains(id)
    }

    pub fn basal(&self) -> impl Iterator<Item = &str> {
        self.basal.iter().map(String::as_str)
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(Node::degree).sum::<usize>() / 2
    }

    /// Direct adjacency.
    pub fn connected(&self, a: &str, b: &str) -> bool {
        self.nodes.get(a).is_some_and(|n| n.edges.contains(b))
    }

    /// Breadth-first reachability from `a` to `b`.
    ///
    /// Succeeds the first time `b` shows up as a neighbor, so `a` reaches
    /// itself only through a cycle or a back-and-forth over one edge.
    pub fn path_exists(&self, a: &str, b: &str) -> bool {
        let Some(start) = self.nodes.get(a) else {
            return false;
        };
        let mut visited: HashSet<&str> = HashSet::from([start.id.as_str()]);
        let mut queue = VecDeque::from([start]);
        while let Some(node) = queue.pop_front() {
            for next in &node.edges {
                if next == b {
                    return true;
                }
                if visited.insert(next.as_str())
                    && let Some(n) = self.nodes.get(next)
                {
                    queue.push_back(n);
                }
            }
        }
        false
    }

    /// Assign `kind` to every node reachable from `start` not yet in `visited`.
    ///
    /// Without an explicit kind the start node's current kind is used. Each
    /// non-basal node gets a store write through `Store::set_on_equivalence`,
    /// so propagation fails exactly where the store rejects a refinement.
    pub fn propagate(
        &mut self,
        store: &mut Store,
        start: &str,
        kind: Option<TypeRepr>,
        visited: &mut HashSet<String>,
        check: bool,
    ) -> Result<()> {
        let node = self
            .nodes
            .get(start)
            .ok_or_else(|| Error::NodeNotFound(start.to_string()))?;
        let kind = match kind {
            Some(kind) => kind,
            None => node
                .kind
                .clone()
                .ok_or_else(|| Error::UntypedNode(start.to_string()))?,
        };
        log::debug!("propagate {kind} from `{start}`");

        let mut stack = vec![start.to_string()];
        while let Some(id) = stack.pop() {
            if !visited.insert(id.clone()) {
                continue;
            }
            let node = self.ensure_node_mut(&id);
            node.set_kind(kind.clone());
            // Reverse so neighbors are visited in insertion order.
            stack.extend(node.edges.iter().rev().filter(|n| !visited.contains(*n)).cloned());
            if !self.basal.contains(&id) {
                let value = StoreValue::new(id.clone(), kind.clone(), kind.clone());
                store.set_on_equivalence(&id, value, check)?;
            }
        }
        Ok(())
    }

    /// Flatten chains of non-basal nodes so each hangs directly off its basal anchor.
    ///
    /// For every basal node, the non-basal nodes it reaches without passing
    /// through another basal node are re-linked to it directly and the edges
    /// among them are dropped. Connectivity between basal nodes is preserved;
    /// nodes themselves are kept since store entries refer to them.
    pub fn normalize(&mut self) {
        let basal: Vec<String> = self.basal.iter().cloned().collect();
        for anchor in &basal {
            let region = self.non_basal_region(anchor);
            if region.is_empty() {
                continue;
            }
            log::debug!("normalize: {} node(s) under `{anchor}`", region.len());
            for id in &region {
                let node = self.ensure_node_mut(id);
                let inner: Vec<String> = node
                    .edges
                    .iter()
                    .filter(|n| region.contains(*n))
                    .cloned()
                    .collect();
                for other in inner {
                    node.unlink(&other);
                }
            }
            for id in &region {
                self.ensure_node_mut(id).link(anchor);
                self.ensure_node_mut(anchor).link(id);
            }
        }
    }

    /// Non-basal nodes reachable from `anchor` along non-basal paths.
    fn non_basal_region(&self, anchor: &str) -> IndexSet<String> {
        let mut region = IndexSet::new();
        let Some(node) = self.nodes.get(anchor) else {
            return region;
        };
        let mut stack: Vec<&str> = node.edges().collect();
        while let Some(id) = stack.pop() {
            if self.basal.contains(id) || !region.insert(id.to_string()) {
                continue;
            }
            if let Some(n) = self.nodes.get(id) {
                stack.extend(n.edges());
            }
        }
        region
    }

    /// Insert a node exactly as persisted, without edges.
    pub(crate) fn insert_node(&mut self, node: Node) {
        self.nodes.insert(node.id.clone(), node);
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut IndexMap<String, Node> {
        &mut self.nodes
    }

    pub(crate) fn mark_basal(&mut self, id: &str) {
        self.basal.insert(id.to_string());
    }
}
