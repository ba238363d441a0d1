//! Command builders for the CLI.
//!
//! `infer` and `trace` run the same pipeline and accept each other's flags,
//! with the ones a command ignores hidden from `--help`.

use clap::Command;

use super::args::*;

/// Annotation inputs shared by every command that runs inference.
fn with_annotation_args(cmd: Command) -> Command {
    cmd.arg(params_arg())
        .arg(types_arg())
        .arg(typedefs_arg())
        .arg(bindings_arg())
}

/// Inference run options.
fn with_run_args(cmd: Command) -> Command {
    cmd.arg(check_arg())
        .arg(fail_fast_arg())
        .arg(normalize_arg())
}

/// Add hidden output args (for trace, which writes nothing).
fn with_hidden_output_args(cmd: Command) -> Command {
    cmd.arg(store_out_arg().hide(true))
        .arg(graph_out_arg().hide(true))
        .arg(dump_graph_arg().hide(true))
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("typeloom")
        .about("Type inference and consistency checking over a JSON AST")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(infer_command())
        .subcommand(check_command())
        .subcommand(trace_command())
}

/// Infer types and persist the store and graph.
pub fn infer_command() -> Command {
    let cmd = Command::new("infer")
        .about("Infer types and write the type store and equivalence graph")
        .override_usage("  typeloom infer <AST> [--params FILE] [--typedefs FILE] [--bindings FILE]")
        .after_help(
            r#"EXAMPLES:
  typeloom infer ast.json                          # writes type_store.json, type_graph.json
  typeloom infer ast.json --params params.json     # with parameter annotations
  typeloom infer ast.json --typedefs types.tl --bindings bindings.json
  typeloom infer ast.json --fail-fast --dump-graph"#,
        )
        .arg(ast_path_arg());
    let cmd = with_run_args(with_annotation_args(cmd))
        .arg(store_out_arg())
        .arg(graph_out_arg())
        .arg(dump_graph_arg())
        .arg(color_arg());

    // Hidden unified flags
    cmd.arg(verbose_arg().hide(true))
}

/// Check a persisted store and graph.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Check a persisted type store and equivalence graph")
        .override_usage("  typeloom check [--store FILE] [--graph FILE] [--strict]")
        .after_help(
            r#"EXAMPLES:
  typeloom check                                   # type_store.json + type_graph.json
  typeloom check --store out/store.json --graph out/graph.json
  typeloom check --typedefs types.tl --strict"#,
        )
        .arg(store_arg())
        .arg(graph_arg())
        .arg(types_arg())
        .arg(typedefs_arg())
        .arg(strict_arg())
        .arg(color_arg())
}

/// Trace an inference run.
pub fn trace_command() -> Command {
    let cmd = Command::new("trace")
        .about("Trace an inference run node by node")
        .override_usage("  typeloom trace <AST> [-v|-vv]")
        .after_help(
            r#"EXAMPLES:
  typeloom trace ast.json                          # statements and synthesized types
  typeloom trace ast.json -v                       # plus store writes and edges
  typeloom trace ast.json -vv --params params.json # plus every node entered"#,
        )
        .arg(ast_path_arg());
    let cmd = with_run_args(with_annotation_args(cmd))
        .arg(verbose_arg())
        .arg(color_arg());

    // Hidden unified flags
    with_hidden_output_args(cmd)
}
