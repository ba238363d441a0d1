//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.
//! The same definition is reused across commands, hidden with `.hide(true)`
//! where a command accepts a flag but ignores it.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Default path of the persisted store.
pub const STORE_FILE: &str = "type_store.json";

/// Default path of the persisted graph.
pub const GRAPH_FILE: &str = "type_graph.json";

/// AST JSON file (positional).
pub fn ast_path_arg() -> Arg {
    Arg::new("ast_path")
        .value_name("AST")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("AST JSON file (use \"-\" for stdin)")
}

/// Parameter annotations (--params).
pub fn params_arg() -> Arg {
    Arg::new("params")
        .long("params")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Parameter annotations JSON: {function: {parameter: type}}")
}

/// Type definitions as JSON (--types).
pub fn types_arg() -> Arg {
    Arg::new("types")
        .long("types")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Type definitions JSON: {name: definition}")
}

/// Type definitions in the definition language (--typedefs).
pub fn typedefs_arg() -> Arg {
    Arg::new("typedefs")
        .long("typedefs")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Type definitions, one `type Name >>= ...` per line")
}

/// Custom-type bindings (--bindings).
pub fn bindings_arg() -> Arg {
    Arg::new("bindings")
        .long("bindings")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Custom-type bindings JSON: {\"function_variable\": type}")
}

/// Where to write the store (--store-out).
pub fn store_out_arg() -> Arg {
    Arg::new("store_out")
        .long("store-out")
        .value_name("FILE")
        .default_value(STORE_FILE)
        .value_parser(value_parser!(PathBuf))
        .help("Write the type store to file")
}

/// Where to write the graph (--graph-out).
pub fn graph_out_arg() -> Arg {
    Arg::new("graph_out")
        .long("graph-out")
        .value_name("FILE")
        .default_value(GRAPH_FILE)
        .value_parser(value_parser!(PathBuf))
        .help("Write the equivalence graph to file")
}

/// Print the graph after inference (--dump-graph).
pub fn dump_graph_arg() -> Arg {
    Arg::new("dump_graph")
        .long("dump-graph")
        .action(ArgAction::SetTrue)
        .help("Print the equivalence graph to stdout")
}

/// Persisted store to check (--store).
pub fn store_arg() -> Arg {
    Arg::new("store")
        .long("store")
        .value_name("FILE")
        .default_value(STORE_FILE)
        .value_parser(value_parser!(PathBuf))
        .help("Type store written by `infer`")
}

/// Persisted graph to check (--graph).
pub fn graph_arg() -> Arg {
    Arg::new("graph")
        .long("graph")
        .value_name("FILE")
        .default_value(GRAPH_FILE)
        .value_parser(value_parser!(PathBuf))
        .help("Equivalence graph written by `infer`")
}

/// Check declared types during propagation (--check).
pub fn check_arg() -> Arg {
    Arg::new("check")
        .long("check")
        .action(ArgAction::SetTrue)
        .help("Fail propagation where a declared type disagrees with the inferred one")
}

/// Stop at the first error (--fail-fast).
pub fn fail_fast_arg() -> Arg {
    Arg::new("fail_fast")
        .long("fail-fast")
        .action(ArgAction::SetTrue)
        .help("Stop at the first error instead of collecting diagnostics")
}

/// Flatten the graph before propagation (--normalize).
pub fn normalize_arg() -> Arg {
    Arg::new("normalize")
        .long("normalize")
        .action(ArgAction::SetTrue)
        .help("Hang every node directly off its basal node before propagation")
}

/// Treat warnings as errors (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Re-run propagation with checking and treat mismatches as errors")
}

/// Verbosity level (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Verbosity level (-v for verbose, -vv for very verbose)")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}
