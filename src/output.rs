//! Rendering results and errors in the selected output format.

use crate::buildenv::BuildEnvEntry;
use crate::config::BuildEnv;
use crate::error::{BuildEnvError, Result};
use clap::ValueEnum;
use serde_json::{Map, Value, json};
use std::io::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

/// Render a build environment listing.
pub fn render_list<W: Write>(format: OutputFormat, entries: &[BuildEnvEntry], out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Json => list_json(entries, out),
        OutputFormat::Text => list_text(entries, out),
    }
}

/// Report a failed command: JSON on stdout, or `Error: ...` on stderr.
pub fn report_error(format: OutputFormat, err: &BuildEnvError) {
    match format {
        OutputFormat::Json => {
            let body = json!({
                "errorCode": err.code(),
                "errorMessage": err.to_string(),
            });
            println!("{}", body);
        }
        OutputFormat::Text => eprintln!("Error: {}", err),
    }
}

fn list_json<W: Write>(entries: &[BuildEnvEntry], out: &mut W) -> Result<()> {
    let mut rows = Vec::with_capacity(entries.len());
    for entry in entries {
        let build_env = match &entry.build_env {
            Some(env) => build_env_json(env)?,
            None => Value::Null,
        };
        rows.push(json!({
            "module": entry.module,
            "path": entry.source.display().to_string(),
            "buildEnv": build_env,
        }));
    }

    let body = json!({ "buildEnvs": rows });
    writeln!(out, "{}", body).map_err(write_err)
}

/// `{"type": <kind>, ...fields}` for one definition.
fn build_env_json(env: &BuildEnv) -> Result<Value> {
    let fields = match env {
        BuildEnv::Local(local) => serde_json::to_value(local),
        BuildEnv::Cluster(cluster) => serde_json::to_value(cluster),
        BuildEnv::GoogleCloudBuild(gcb) => serde_json::to_value(gcb),
    }
    .map_err(|e| BuildEnvError::UserError(format!("failed to encode build environment: {}", e)))?;

    let mut object = Map::new();
    object.insert("type".to_string(), Value::String(env.kind().to_string()));
    if let Value::Object(fields) = fields {
        object.extend(fields);
    }
    Ok(Value::Object(object))
}

fn list_text<W: Write>(entries: &[BuildEnvEntry], out: &mut W) -> Result<()> {
    let module_width = entries
        .iter()
        .map(|e| e.module.len())
        .max()
        .unwrap_or(0)
        .max("MODULE".len());

    let rows: Vec<(String, String)> = entries
        .iter()
        .map(|e| match &e.build_env {
            Some(env) => (env.kind().to_string(), details(env)),
            None => ("<none>".to_string(), String::new()),
        })
        .collect();
    let kind_width = rows
        .iter()
        .map(|(kind, _)| kind.len())
        .max()
        .unwrap_or(0)
        .max("BUILD ENV".len());

    writeln!(
        out,
        "{:<mw$}  {:<kw$}  SOURCE",
        "MODULE",
        "BUILD ENV",
        mw = module_width,
        kw = kind_width
    )
    .map_err(write_err)?;

    for (entry, (kind, details)) in entries.iter().zip(rows) {
        let mut line = format!(
            "{:<mw$}  {:<kw$}  {}",
            entry.module,
            kind,
            entry.source.display(),
            mw = module_width,
            kw = kind_width
        );
        if !details.is_empty() {
            line.push_str("  ");
            line.push_str(&details);
        }
        writeln!(out, "{}", line).map_err(write_err)?;
    }
    Ok(())
}

/// `key=value` pairs of the fields that are set.
fn details(env: &BuildEnv) -> String {
    let mut pairs: Vec<String> = Vec::new();
    let mut push = |key: &str, value: Option<String>| {
        if let Some(value) = value {
            pairs.push(format!("{}={}", key, value));
        }
    };

    match env {
        BuildEnv::GoogleCloudBuild(gcb) => {
            push("projectId", gcb.project_id.clone());
            push("diskSizeGb", gcb.disk_size_gb.map(|v| v.to_string()));
            push("machineType", gcb.machine_type.clone());
            push("timeout", gcb.timeout.clone());
            push("concurrency", gcb.concurrency.map(|v| v.to_string()));
        }
        BuildEnv::Cluster(cluster) => {
            push("namespace", cluster.namespace.clone());
            push("timeout", cluster.timeout.clone());
            push("concurrency", cluster.concurrency.map(|v| v.to_string()));
        }
        BuildEnv::Local(local) => {
            push("push", local.push.map(|v| v.to_string()));
            push("concurrency", local.concurrency.map(|v| v.to_string()));
        }
    }
    pairs.join(" ")
}

fn write_err(e: std::io::Error) -> BuildEnvError {
    BuildEnvError::UserError(format!("failed to write output: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::gcb;
    use std::path::PathBuf;

    fn entries() -> Vec<BuildEnvEntry> {
        vec![
            BuildEnvEntry {
                module: "frontend".to_string(),
                source: PathBuf::from("/ws/skaffold.yaml"),
                build_env: Some(gcb("123")),
            },
            BuildEnvEntry {
                module: "lib".to_string(),
                source: PathBuf::from("/ws/lib/skaffold.yaml"),
                build_env: None,
            },
        ]
    }

    fn render(format: OutputFormat) -> String {
        let mut out = Vec::new();
        render_list(format, &entries(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn json_listing_reports_absent_as_null() {
        let value: Value = serde_json::from_str(&render(OutputFormat::Json)).unwrap();
        let rows = value["buildEnvs"].as_array().unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["module"], "frontend");
        assert_eq!(rows[0]["path"], "/ws/skaffold.yaml");
        assert_eq!(rows[0]["buildEnv"]["type"], "googleCloudBuild");
        assert_eq!(rows[0]["buildEnv"]["projectId"], "123");
        assert!(rows[0]["buildEnv"].get("diskSizeGb").is_none());
        assert_eq!(rows[1]["buildEnv"], Value::Null);
    }

    #[test]
    fn text_listing_has_one_row_per_module() {
        let text = render(OutputFormat::Text);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("MODULE"));
        assert!(lines[1].starts_with("frontend"));
        assert!(lines[1].contains("googleCloudBuild"));
        assert!(lines[1].ends_with("projectId=123"));
        let source = lines[1].find("/ws/skaffold.yaml").unwrap();
        let kind = lines[1].find("googleCloudBuild").unwrap();
        assert!(kind < source);
        assert!(source < lines[1].find("projectId=123").unwrap());
        assert!(lines[2].contains("<none>"));
        assert!(lines[2].contains("/ws/lib/skaffold.yaml"));
    }

    #[test]
    fn empty_json_listing_is_an_empty_array() {
        let mut out = Vec::new();
        render_list(OutputFormat::Json, &[], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().trim(), r#"{"buildEnvs":[]}"#);
    }

    #[test]
    fn default_format_is_json() {
        assert_eq!(OutputFormat::default(), OutputFormat::Json);
    }
}
