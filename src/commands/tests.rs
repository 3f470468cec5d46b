use super::*;
use crate::error::BuildEnvError;
use crate::output::OutputFormat;
use crate::test_support::{MemoryStore, create_two_document_workspace, names};
use serde_json::Value;
use std::path::Path;

fn options(root: &Path) -> InspectOptions {
    InspectOptions {
        filename: root.join("skaffold.yaml"),
        format: OutputFormat::Json,
        modules: Vec::new(),
        build_env: BuildEnvOptions::default(),
    }
}

fn list_json(opts: &InspectOptions) -> Value {
    let mut out = Vec::new();
    cmd_list(opts, &CancelToken::new(), &mut out).unwrap();
    serde_json::from_slice(&out).unwrap()
}

fn project_ids(listing: &Value) -> Vec<(String, Value)> {
    listing["buildEnvs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| {
            (
                row["module"].as_str().unwrap().to_string(),
                row["buildEnv"]
                    .get("projectId")
                    .cloned()
                    .unwrap_or(Value::Null),
            )
        })
        .collect()
}

#[test]
fn list_reports_every_module_without_build_env() {
    let dir = create_two_document_workspace();
    let listing = list_json(&options(dir.path()));

    let rows = listing["buildEnvs"].as_array().unwrap();
    let modules: Vec<&str> = rows.iter().map(|r| r["module"].as_str().unwrap()).collect();
    assert_eq!(modules, vec!["app", "web", "lib"]);
    assert!(rows.iter().all(|r| r["buildEnv"].is_null()));
}

#[test]
fn add_to_default_pipeline_then_list() {
    let dir = create_two_document_workspace();
    let mut opts = options(dir.path());
    opts.build_env.project_id = "1234".to_string();
    opts.build_env.disk_size_gb = 100;

    cmd_add_gcb(&opts, &CancelToken::new(), &mut FileStore).unwrap();

    let listing = list_json(&options(dir.path()));
    assert_eq!(
        project_ids(&listing),
        vec![
            ("app".to_string(), Value::from("1234")),
            ("web".to_string(), Value::from("1234")),
            ("lib".to_string(), Value::Null),
        ]
    );
    assert_eq!(listing["buildEnvs"][0]["buildEnv"]["diskSizeGb"], 100);
    assert_eq!(listing["buildEnvs"][0]["buildEnv"]["type"], "googleCloudBuild");
}

#[test]
fn add_twice_fails_with_already_exists() {
    let dir = create_two_document_workspace();
    let mut opts = options(dir.path());
    opts.modules = names(&["app"]);
    opts.build_env.project_id = "1234".to_string();

    cmd_add_gcb(&opts, &CancelToken::new(), &mut FileStore).unwrap();
    let before = std::fs::read_to_string(&opts.filename).unwrap();

    let err = cmd_add_gcb(&opts, &CancelToken::new(), &mut FileStore).unwrap_err();
    assert!(matches!(err, BuildEnvError::AlreadyExists { .. }));
    assert_eq!(std::fs::read_to_string(&opts.filename).unwrap(), before);
}

#[test]
fn add_profile_reaches_imports_and_activates_on_list() {
    let dir = create_two_document_workspace();
    let mut opts = options(dir.path());
    opts.build_env.profile = "cloud".to_string();
    opts.build_env.project_id = "p".to_string();

    cmd_add_gcb(&opts, &CancelToken::new(), &mut FileStore).unwrap();

    let inactive = list_json(&options(dir.path()));
    assert!(project_ids(&inactive).iter().all(|(_, id)| id.is_null()));

    let mut list_opts = options(dir.path());
    list_opts.build_env.profiles = names(&["cloud"]);
    let active = list_json(&list_opts);
    assert!(project_ids(&active).iter().all(|(_, id)| id == "p"));

    let lib = std::fs::read_to_string(dir.path().join("lib/skaffold.yaml")).unwrap();
    assert!(lib.contains("name: cloud"));
}

#[test]
fn add_with_unknown_module_is_not_found() {
    let dir = create_two_document_workspace();
    let mut opts = options(dir.path());
    opts.modules = names(&["missing"]);

    let mut store = MemoryStore::default();
    let err = cmd_add_gcb(&opts, &CancelToken::new(), &mut store).unwrap_err();

    assert!(matches!(err, BuildEnvError::NotFound { .. }));
    assert!(store.saved.is_empty());
}

#[test]
fn add_with_negative_disk_size_is_rejected() {
    let dir = create_two_document_workspace();
    let mut opts = options(dir.path());
    opts.build_env.disk_size_gb = -10;

    let mut store = MemoryStore::default();
    let err = cmd_add_gcb(&opts, &CancelToken::new(), &mut store).unwrap_err();

    assert!(matches!(err, BuildEnvError::ValidationError(_)));
    assert!(store.saved.is_empty());
}

#[test]
fn cancelled_add_writes_nothing() {
    let dir = create_two_document_workspace();
    let opts = options(dir.path());
    let cancel = CancelToken::new();
    cancel.cancel();

    let mut store = MemoryStore::default();
    let err = cmd_add_gcb(&opts, &cancel, &mut store).unwrap_err();

    assert!(matches!(err, BuildEnvError::Cancelled));
    assert!(store.saved.is_empty());
}

#[test]
fn list_missing_root_is_a_user_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut out = Vec::new();
    let err = cmd_list(&options(dir.path()), &CancelToken::new(), &mut out).unwrap_err();

    assert!(matches!(err, BuildEnvError::UserError(_)));
    assert!(out.is_empty());
}

#[test]
fn list_text_format() {
    let dir = create_two_document_workspace();
    let mut opts = options(dir.path());
    opts.format = OutputFormat::Text;
    opts.modules = names(&["lib"]);

    let mut out = Vec::new();
    cmd_list(&opts, &CancelToken::new(), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(text.lines().count(), 2);
    assert!(text.lines().nth(1).unwrap().starts_with("lib"));
}

#[test]
fn add_to_document_without_modules_writes_nothing() {
    let dir = tempfile::TempDir::new().unwrap();
    crate::test_support::write_doc(dir.path(), "skaffold.yaml", "apiVersion: v4\n");

    let mut store = MemoryStore::default();
    cmd_add_gcb(&options(dir.path()), &CancelToken::new(), &mut store).unwrap();

    assert!(store.saved.is_empty());
}
