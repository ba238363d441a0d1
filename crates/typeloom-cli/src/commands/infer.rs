//! Run inference and persist the store and graph.

use std::path::PathBuf;

use typeloom_core::GraphPrinter;
use typeloom_lib::{InferOptions, infer};

use super::exit_with;
use super::loader::{AnnotationInputs, load_annotations, load_program, write_file};

pub struct InferArgs {
    pub ast_path: PathBuf,
    pub inputs: AnnotationInputs,
    pub store_out: PathBuf,
    pub graph_out: PathBuf,
    pub check: bool,
    pub fail_fast: bool,
    pub normalize: bool,
    pub dump_graph: bool,
    pub color: bool,
}

pub fn run(args: InferArgs) {
    let program = load_program(&args.ast_path).unwrap_or_else(|msg| exit_with(msg));
    let annotations = load_annotations(&args.inputs).unwrap_or_else(|msg| exit_with(msg));

    let options = InferOptions::new()
        .check(args.check)
        .fail_fast(args.fail_fast)
        .normalize(args.normalize);
    let inference = infer(&program, &annotations, &options).unwrap_or_else(|e| exit_with(e));

    let store = inference
        .store
        .to_json_pretty()
        .unwrap_or_else(|e| exit_with(e));
    let graph = inference
        .graph
        .to_json_pretty()
        .unwrap_or_else(|e| exit_with(e));
    write_file(&args.store_out, &store).unwrap_or_else(|msg| exit_with(msg));
    write_file(&args.graph_out, &graph).unwrap_or_else(|msg| exit_with(msg));

    if args.dump_graph {
        let dump = GraphPrinter::new(&inference.graph)
            .with_store(&inference.store)
            .colored(args.color)
            .dump();
        print!("{dump}");
    }

    if inference.diagnostics.is_empty() {
        return;
    }
    let path = args.ast_path.to_string_lossy();
    eprint!(
        "{}",
        inference
            .diagnostics
            .printer()
            .path(&path)
            .colored(args.color)
            .sorted(true)
            .render()
    );
    if inference.has_errors() {
        std::process::exit(1);
    }
}
