//! Result printing (stdout only; logs go to stderr).

use std::io::Write;

use anyhow::Context;
use clap::ValueEnum;
use nimbus_core::TaskId;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `key: value` lines
    Text,
    /// Pretty printed JSON
    Json,
}

/// Writes command results in the selected format.
pub struct Printer<W> {
    format: OutputFormat,
    out: W,
}

impl<W: Write> Printer<W> {
    pub fn new(format: OutputFormat, out: W) -> Self {
        Self { format, out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Print any serializable result.
    pub fn show<T: Serialize + ?Sized>(&mut self, value: &T) -> anyhow::Result<()> {
        let value = serde_json::to_value(value).context("failed to serialize result")?;
        match self.format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut self.out, &value)?;
                writeln!(self.out)?;
            }
            OutputFormat::Text => {
                let mut lines = Vec::new();
                render_text(&value, &mut lines);
                for line in lines {
                    writeln!(self.out, "{line}")?;
                }
            }
        }
        Ok(())
    }

    /// Confirmation for tasks whose result is "it worked" rather than a resource.
    pub fn task_finished(&mut self, task_id: &TaskId) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => self.show(&serde_json::json!({
                "task": task_id,
                "state": "FINISHED",
            })),
            OutputFormat::Text => {
                writeln!(self.out, "Task {task_id} finished")?;
                Ok(())
            }
        }
    }
}

fn render_text(value: &Value, lines: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, field) in map {
                if !field.is_null() {
                    lines.push(format!("{key}: {}", inline(field)));
                }
            }
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 && item.is_object() {
                    lines.push(String::new());
                }
                render_text(item, lines);
            }
        }
        other => lines.push(inline(other)),
    }
}

/// One-line form of a value: bare strings, comma separated scalar lists,
/// compact JSON for anything nested.
fn inline(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) if items.iter().all(|v| !v.is_object() && !v.is_array()) => items
            .iter()
            .map(inline)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}
