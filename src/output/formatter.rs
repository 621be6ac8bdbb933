use std::io::Write;
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::rewriter::replacement::LiteralReplacement;

/// How the CLI prints a replacement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The rewritten SQL only, exactly as produced.
    #[default]
    Text,
    /// The rewritten SQL and both maps as a JSON document.
    Json,
}

/// Render `replacement` in the requested format.
pub fn render(replacement: &LiteralReplacement, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Text => Ok(replacement.result_sql.clone()),
        OutputFormat::Json => serde_json::to_string_pretty(replacement)
            .map(|mut json| {
                json.push('\n');
                json
            })
            .map_err(|e| format!("Failed to serialize replacement: {e}")),
    }
}

/// Write rendered output to `path`, or to standard output when `path` is
/// `None`.
pub fn write_output(path: Option<&Path>, content: &str) -> Result<(), String> {
    match path {
        Some(path) => std::fs::write(path, content)
            .map_err(|e| format!("Failed to write {}: {e}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|e| format!("Failed to write to standard output: {e}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewriter::collector::NodeId;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn sample() -> LiteralReplacement {
        let mut replacement = LiteralReplacement {
            result_sql: "SELECT @_p0_INT64".to_string(),
            ..LiteralReplacement::default()
        };
        replacement.bind_literal(NodeId(2), "_p0_INT64").unwrap();
        replacement.bind_parameter("_p0_INT64", "1").unwrap();
        replacement
    }

    #[test]
    fn text_output_is_the_rewritten_sql() {
        assert_eq!(render(&sample(), OutputFormat::Text).unwrap(), "SELECT @_p0_INT64");
    }

    #[test]
    fn json_output_includes_both_maps() {
        let json = render(&sample(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["result_sql"], "SELECT @_p0_INT64");
        assert_eq!(value["literal_map"]["2"], "_p0_INT64");
        assert_eq!(value["parameters"]["_p0_INT64"], "1");
    }

    #[test]
    fn write_output_writes_files() {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!("sqlparam_formatter_{nanos}.sql"));
        write_output(Some(&path), "SELECT @_p0_INT64").expect("write should succeed");
        assert_eq!(
            std::fs::read_to_string(&path).expect("file should exist"),
            "SELECT @_p0_INT64"
        );
    }

    #[test]
    fn write_output_reports_failures() {
        let dir = std::env::temp_dir();
        let err = write_output(Some(&dir), "x").expect_err("writing to a directory should fail");
        assert!(err.contains("Failed to write"));
    }
}
