//! Trace an inference run for debugging.

use std::path::PathBuf;

use typeloom_lib::{Colors, InferOptions, PrintTracer, Verbosity, infer_with};

use super::exit_with;
use super::loader::{AnnotationInputs, load_annotations, load_program};

pub struct TraceArgs {
    pub ast_path: PathBuf,
    pub inputs: AnnotationInputs,
    pub check: bool,
    pub fail_fast: bool,
    pub normalize: bool,
    pub verbosity: Verbosity,
    pub color: bool,
}

pub fn run(args: TraceArgs) {
    let program = load_program(&args.ast_path).unwrap_or_else(|msg| exit_with(msg));
    let annotations = load_annotations(&args.inputs).unwrap_or_else(|msg| exit_with(msg));

    let options = InferOptions::new()
        .check(args.check)
        .fail_fast(args.fail_fast)
        .normalize(args.normalize);
    let mut tracer = PrintTracer::new(args.verbosity, Colors::new(args.color));

    let inference = match infer_with(&program, &annotations, &options, &mut tracer) {
        Ok(inference) => {
            tracer.print();
            inference
        }
        Err(e) => {
            tracer.print();
            eprintln!("type error: {}", e);
            std::process::exit(1);
        }
    };

    let colors = Colors::new(args.color);
    println!("{}---{}", colors.dim, colors.reset);
    for (id, entry) in inference.store.iter() {
        println!("{id}: {}", entry.inferred);
    }

    if !inference.diagnostics.is_empty() {
        eprint!("{}", inference.diagnostics.render_colored(args.color));
    }
    if inference.has_errors() {
        std::process::exit(1);
    }
}
