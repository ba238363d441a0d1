mod cli;
mod commands;

use cli::{CheckParams, InferParams, TraceParams, build_cli};

fn main() {
    env_logger::init();
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("infer", m)) => {
            let params = InferParams::from_matches(m);
            commands::infer::run(params.into());
        }
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        Some(("trace", m)) => {
            let params = TraceParams::from_matches(m);
            commands::trace::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
