use std::fs;

use typeloom_core::{Kind, StoreValue, TypeRepr};

use super::loader::*;

fn write(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn annotations_resolve_across_files() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = AnnotationInputs {
        typedefs: Some(write(&dir, "types.tl", "type Currency >>= \"USD\" | \"CAD\"\n")),
        params: Some(write(&dir, "params.json", r#"{"pay": {"unit": "Currency"}}"#)),
        bindings: Some(write(&dir, "bindings.json", r#"{"pay_unit": "Currency"}"#)),
        types: None,
    };

    let annotations = load_annotations(&inputs).unwrap();

    assert_eq!(annotations.params["pay"]["unit"].name(), "Currency");
    assert_eq!(annotations.binding("pay", "unit"), Some("Currency"));
}

#[test]
fn no_inputs_load_nothing() {
    let annotations = load_annotations(&AnnotationInputs::default()).unwrap();

    assert!(annotations.typedefs.is_empty());
    assert!(annotations.params.is_empty());
    assert!(annotations.bindings.is_empty());
}

#[test]
fn missing_file_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");

    let err = load_program(&path).unwrap_err();

    assert!(err.starts_with("failed to read '"), "{err}");
    assert!(err.contains("missing.json"), "{err}");
}

#[test]
fn invalid_ast_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "ast.json", "{");

    let err = load_program(&path).unwrap_err();

    assert!(err.starts_with("invalid AST in '"), "{err}");
}

#[test]
fn params_referring_to_unknown_type() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = AnnotationInputs {
        params: Some(write(&dir, "params.json", r#"{"pay": {"unit": "Currency"}}"#)),
        ..AnnotationInputs::default()
    };

    let err = load_annotations(&inputs).unwrap_err();

    assert!(err.ends_with("custom type `Currency` is not defined"), "{err}");
}

#[test]
fn store_and_graph_survive_the_disk() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = typeloom_core::Store::new();
    store
        .set(
            "x",
            StoreValue::new(
                "x",
                TypeRepr::primitive(Kind::Number),
                TypeRepr::primitive(Kind::Number),
            ),
        )
        .unwrap();
    let mut graph = typeloom_core::Graph::new();
    graph.add_node("x");
    graph.add_edge("x", "Number").unwrap();

    let store_path = dir.path().join("type_store.json");
    let graph_path = dir.path().join("type_graph.json");
    write_file(&store_path, &store.to_json_pretty().unwrap()).unwrap();
    write_file(&graph_path, &graph.to_json_pretty().unwrap()).unwrap();

    let store = load_store(&store_path).unwrap();
    let graph = load_graph(&graph_path).unwrap();
    assert!(store.get("x").unwrap().inferred.is_kind(Kind::Number));
    assert!(graph.connected("x", "Number"));
    assert!(graph.is_basal("Number"));
}
