//! Reading command inputs from disk and writing results back.

use std::fmt::Display;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use typeloom_core::{Graph, Store};
use typeloom_lib::{Annotations, Program};

/// Optional annotation files shared by `infer`, `trace` and `check`.
#[derive(Debug, Default, Clone)]
pub struct AnnotationInputs {
    pub params: Option<PathBuf>,
    pub types: Option<PathBuf>,
    pub typedefs: Option<PathBuf>,
    pub bindings: Option<PathBuf>,
}

pub fn load_program(path: &Path) -> Result<Program, String> {
    let json = if path.as_os_str() == "-" {
        load_stdin()?
    } else {
        read_file(path)?
    };
    Program::from_json(&json).map_err(|e| format!("invalid AST in '{}': {}", path.display(), e))
}

/// Type definitions load first: parameters and bindings refer to them by name.
pub fn load_annotations(inputs: &AnnotationInputs) -> Result<Annotations, String> {
    let mut annotations = Annotations::new();
    if let Some(path) = &inputs.types {
        annotations
            .load_typedefs_json(&read_file(path)?)
            .map_err(|e| invalid(path, e))?;
    }
    if let Some(path) = &inputs.typedefs {
        annotations
            .load_typedef_source(&read_file(path)?)
            .map_err(|e| invalid(path, e))?;
    }
    if let Some(path) = &inputs.params {
        annotations
            .load_params_json(&read_file(path)?)
            .map_err(|e| invalid(path, e))?;
    }
    if let Some(path) = &inputs.bindings {
        annotations
            .load_bindings_json(&read_file(path)?)
            .map_err(|e| invalid(path, e))?;
    }
    log::debug!(
        "loaded {} typedef(s), {} annotated function(s), {} binding(s)",
        annotations.typedefs.len(),
        annotations.params.len(),
        annotations.bindings.len()
    );
    Ok(annotations)
}

pub fn load_store(path: &Path) -> Result<Store, String> {
    Store::from_json(&read_file(path)?).map_err(|e| invalid(path, e))
}

pub fn load_graph(path: &Path) -> Result<Graph, String> {
    Graph::from_json(&read_file(path)?).map_err(|e| invalid(path, e))
}

pub fn write_file(path: &Path, contents: &str) -> Result<(), String> {
    fs::write(path, contents).map_err(|e| format!("failed to write '{}': {}", path.display(), e))?;
    log::debug!("wrote {}", path.display());
    Ok(())
}

fn read_file(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("failed to read '{}': {}", path.display(), e))
}

fn load_stdin() -> Result<String, String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| format!("failed to read stdin: {}", e))?;
    Ok(buf)
}

fn invalid(path: &Path, error: impl Display) -> String {
    format!("'{}': {}", path.display(), error)
}
