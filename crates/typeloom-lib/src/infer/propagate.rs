use std::collections::HashSet;

use indexmap::IndexMap;

use typeloom_core::{Graph, Kind, Store, TypeRepr};

use crate::diagnostics::{Diagnostics, Location};
use crate::{Error, Result};

/// Push each basal node's type across its component of the equivalence graph.
///
/// Kind nodes push their kind, custom-type nodes the matching typedef. The
/// wildcard kind nodes (`Any`, `Unknown`) are skipped. Failures are reported
/// per basal node; with `fail_fast` the first one is returned instead.
pub fn propagate_infer(
    graph: &mut Graph,
    store: &mut Store,
    typedefs: &IndexMap<String, TypeRepr>,
    check: bool,
    diagnostics: &mut Diagnostics,
    fail_fast: bool,
) -> Result<()> {
    let basal: Vec<String> = graph.basal().map(str::to_string).collect();
    for id in basal {
        let Err(error) = propagate_from(graph, store, typedefs, &id, check) else {
            continue;
        };
        if fail_fast {
            return Err(error);
        }
        log::debug!("propagation from `{id}` failed: {error}");
        let location = match error.subject() {
            Some(_) => Location::default(),
            None => Location::node(id),
        };
        diagnostics.report_error(&error, location);
    }
    Ok(())
}

fn propagate_from(
    graph: &mut Graph,
    store: &mut Store,
    typedefs: &IndexMap<String, TypeRepr>,
    id: &str,
    check: bool,
) -> Result<()> {
    if graph.node(id).is_none_or(|node| node.degree() == 0) {
        return Ok(());
    }
    let ty = match Kind::from_name(id) {
        Some(kind) if kind.is_wildcard() => return Ok(()),
        Some(kind) => TypeRepr::primitive(kind),
        None => typedefs
            .get(id)
            .cloned()
            .ok_or_else(|| Error::UnknownCustomType(id.to_string()))?,
    };
    let mut visited = HashSet::new();
    graph.propagate(store, id, Some(ty), &mut visited, check)?;
    Ok(())
}
