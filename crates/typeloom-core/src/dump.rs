//! Text dump of the equivalence graph for inspection and tests.

use std::fmt::Write;

use crate::colors::Colors;
use crate::graph::Graph;
use crate::store::Store;

/// Printer for `Graph` with configurable output options.
///
/// One line per node with at least one edge: basal nodes first, then the rest
/// in insertion order. Isolated nodes are skipped unless `show_isolated` is set.
pub struct GraphPrinter<'a> {
    graph: &'a Graph,
    store: Option<&'a Store>,
    show_isolated: bool,
    colors: Colors,
}

impl<'a> GraphPrinter<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Self {
            graph,
            store: None,
            show_isolated: false,
            colors: Colors::OFF,
        }
    }

    /// Annotate non-basal nodes with their inferred type from `store`.
    pub fn with_store(mut self, store: &'a Store) -> Self {
        self.store = Some(store);
        self
    }

    pub fn show_isolated(mut self, show: bool) -> Self {
        self.show_isolated = show;
        self
    }

    pub fn colored(mut self, enabled: bool) -> Self {
        self.colors = Colors::new(enabled);
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    fn format(&self, w: &mut String) -> std::fmt::Result {
        let c = self.colors;
        let basal = self.graph.nodes().filter(|n| self.graph.is_basal(n.id()));
        let rest = self.graph.nodes().filter(|n| !self.graph.is_basal(n.id()));

        for node in basal.chain(rest) {
            if node.degree() == 0 && !self.show_isolated {
                continue;
            }
            let is_basal = self.graph.is_basal(node.id());
            if is_basal {
                write!(w, "{}[{}]{}", c.blue, node.id(), c.reset)?;
            } else {
                write!(w, "{}", node.id())?;
            }

            if !is_basal
                && let Some(entry) = self.store.and_then(|s| s.get(node.id()))
            {
                write!(w, "{}: {}{}", c.dim, entry.inferred, c.reset)?;
            }

            write!(w, " {}—{} ", c.dim, c.reset)?;
            for (i, edge) in node.edges().enumerate() {
                if i > 0 {
                    write!(w, ", ")?;
                }
                if self.graph.is_basal(edge) {
                    write!(w, "{}[{}]{}", c.blue, edge, c.reset)?;
                } else {
                    write!(w, "{edge}")?;
                }
            }
            writeln!(w)?;
        }
        Ok(())
    }
}
