pub mod check;
pub mod infer;
pub mod loader;
pub mod trace;

#[cfg(test)]
mod loader_tests;

use std::fmt::Display;

/// Print `error: {message}` to stderr and exit with status 1.
pub fn exit_with(message: impl Display) -> ! {
    eprintln!("error: {message}");
    std::process::exit(1);
}
