//! Check a persisted store and graph.

use std::path::PathBuf;

use typeloom_lib::check;

use super::exit_with;
use super::loader::{AnnotationInputs, load_annotations, load_graph, load_store};

pub struct CheckArgs {
    pub store_path: PathBuf,
    pub graph_path: PathBuf,
    pub inputs: AnnotationInputs,
    pub strict: bool,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let mut store = load_store(&args.store_path).unwrap_or_else(|msg| exit_with(msg));
    let mut graph = load_graph(&args.graph_path).unwrap_or_else(|msg| exit_with(msg));
    let annotations = load_annotations(&args.inputs).unwrap_or_else(|msg| exit_with(msg));

    let report = check(&mut store, &mut graph, &annotations.typedefs, args.strict)
        .unwrap_or_else(|e| exit_with(e));

    if !report.is_clean() {
        eprint!("{}", report.diagnostics.render_colored(args.color));
    }
    if report.has_errors() {
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}
