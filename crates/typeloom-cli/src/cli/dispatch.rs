//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! - `*Params` structs are populated from clap matches, ignoring hidden flags
//! - `Into<*Args>` impls bridge dispatch to the command handlers

use std::path::PathBuf;

use clap::ArgMatches;
use typeloom_lib::Verbosity;

use super::ColorChoice;
use super::args::{GRAPH_FILE, STORE_FILE};
use crate::commands::check::CheckArgs;
use crate::commands::infer::InferArgs;
use crate::commands::loader::AnnotationInputs;
use crate::commands::trace::TraceArgs;

pub struct InferParams {
    pub ast_path: PathBuf,
    pub params: Option<PathBuf>,
    pub types: Option<PathBuf>,
    pub typedefs: Option<PathBuf>,
    pub bindings: Option<PathBuf>,
    pub store_out: PathBuf,
    pub graph_out: PathBuf,
    pub check: bool,
    pub fail_fast: bool,
    pub normalize: bool,
    pub dump_graph: bool,
    pub color: ColorChoice,
    // Note: verbose is parsed but not extracted (unified flags)
}

impl InferParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            // Inputs
            ast_path: ast_path(m),
            params: m.get_one::<PathBuf>("params").cloned(),
            types: m.get_one::<PathBuf>("types").cloned(),
            typedefs: m.get_one::<PathBuf>("typedefs").cloned(),
            bindings: m.get_one::<PathBuf>("bindings").cloned(),

            // Outputs
            store_out: path_or(m, "store_out", STORE_FILE),
            graph_out: path_or(m, "graph_out", GRAPH_FILE),
            dump_graph: m.get_flag("dump_graph"),

            // Run options
            check: m.get_flag("check"),
            fail_fast: m.get_flag("fail_fast"),
            normalize: m.get_flag("normalize"),
            color: parse_color(m),
        }
    }
}

impl From<InferParams> for InferArgs {
    fn from(p: InferParams) -> Self {
        Self {
            ast_path: p.ast_path,
            inputs: AnnotationInputs {
                params: p.params,
                types: p.types,
                typedefs: p.typedefs,
                bindings: p.bindings,
            },
            store_out: p.store_out,
            graph_out: p.graph_out,
            check: p.check,
            fail_fast: p.fail_fast,
            normalize: p.normalize,
            dump_graph: p.dump_graph,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub store: PathBuf,
    pub graph: PathBuf,
    pub types: Option<PathBuf>,
    pub typedefs: Option<PathBuf>,
    pub strict: bool,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            store: path_or(m, "store", STORE_FILE),
            graph: path_or(m, "graph", GRAPH_FILE),
            types: m.get_one::<PathBuf>("types").cloned(),
            typedefs: m.get_one::<PathBuf>("typedefs").cloned(),
            strict: m.get_flag("strict"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            store_path: p.store,
            graph_path: p.graph,
            inputs: AnnotationInputs {
                types: p.types,
                typedefs: p.typedefs,
                ..AnnotationInputs::default()
            },
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

pub struct TraceParams {
    pub ast_path: PathBuf,
    pub params: Option<PathBuf>,
    pub types: Option<PathBuf>,
    pub typedefs: Option<PathBuf>,
    pub bindings: Option<PathBuf>,
    pub check: bool,
    pub fail_fast: bool,
    pub normalize: bool,
    pub verbose: u8,
    pub color: ColorChoice,
    // Note: store_out, graph_out, dump_graph are parsed but not extracted (unified flags)
}

impl TraceParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            ast_path: ast_path(m),
            params: m.get_one::<PathBuf>("params").cloned(),
            types: m.get_one::<PathBuf>("types").cloned(),
            typedefs: m.get_one::<PathBuf>("typedefs").cloned(),
            bindings: m.get_one::<PathBuf>("bindings").cloned(),
            check: m.get_flag("check"),
            fail_fast: m.get_flag("fail_fast"),
            normalize: m.get_flag("normalize"),
            verbose: m.get_count("verbose"),
            color: parse_color(m),
        }
    }
}

impl From<TraceParams> for TraceArgs {
    fn from(p: TraceParams) -> Self {
        let verbosity = match p.verbose {
            0 => Verbosity::Default,
            1 => Verbosity::Verbose,
            _ => Verbosity::VeryVerbose,
        };

        Self {
            ast_path: p.ast_path,
            inputs: AnnotationInputs {
                params: p.params,
                types: p.types,
                typedefs: p.typedefs,
                bindings: p.bindings,
            },
            check: p.check,
            fail_fast: p.fail_fast,
            normalize: p.normalize,
            verbosity,
            color: p.color.should_colorize(),
        }
    }
}

/// The positional is required, so clap has already rejected its absence.
fn ast_path(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("ast_path").cloned().unwrap_or_default()
}

fn path_or(m: &ArgMatches, id: &str, default: &str) -> PathBuf {
    m.get_one::<PathBuf>(id)
        .cloned()
        .unwrap_or_else(|| PathBuf::from(default))
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
