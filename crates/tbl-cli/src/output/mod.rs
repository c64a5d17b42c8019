use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render `value` in the requested format. Text mode prints `text` lines.
pub fn render<T: Serialize>(value: &T, format: OutputFormat, text: &[String]) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(text.join("\n")),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
    }
}

/// Print a response in the requested format. Nothing is printed for an empty
/// text report.
pub fn output<T: Serialize>(value: &T, format: OutputFormat, text: &[String]) -> anyhow::Result<()> {
    let rendered = render(value, format, text)?;
    if !rendered.is_empty() {
        println!("{rendered}");
    }
    Ok(())
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let prefs = ui::prefs();
    let options = table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    };

    let items = match serde_json::to_value(value)? {
        Value::Array(items) => items,
        other => vec![other],
    };
    if items.is_empty() {
        return Ok(String::from("(no rows)"));
    }

    // Columns in first-seen field order.
    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }
    if headers.is_empty() {
        let rows = items.iter().map(|item| vec![value_to_cell(item)]).collect::<Vec<_>>();
        return Ok(table::render_table(&["value"], &rows, options));
    }

    let rows = items
        .iter()
        .map(|item| {
            headers
                .iter()
                .map(|header| item.get(header).map_or_else(|| String::from("-"), value_to_cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    Ok(table::render_table(&header_refs, &rows, options))
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) => items.iter().map(value_to_cell).collect::<Vec<_>>().join("; "),
        other @ Value::Object(_) => other.to_string(),
    }
}
