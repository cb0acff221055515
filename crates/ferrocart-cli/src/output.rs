use ferrocart_core::{RecordTable, ResponseEnvelope};
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Rows shown by the table renderer before truncating.
pub const TABLE_ROW_LIMIT: usize = 20;

const MAX_CELL_WIDTH: usize = 32;

pub fn render(
    envelope: &ResponseEnvelope,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => println!("{}", envelope.to_json(pretty)?),
        OutputFormat::Csv => print!("{}", envelope.to_csv()?),
        OutputFormat::Table => print!("{}", format_envelope(envelope)?),
    }

    Ok(())
}

fn format_envelope(envelope: &ResponseEnvelope) -> Result<String, CliError> {
    let mut output = String::new();
    output.push_str(&format!("command     : {}\n", envelope.command()));
    output.push_str(&format!("provider    : {}\n", envelope.provider()));
    if !envelope.model().is_empty() {
        output.push_str(&format!("model       : {}\n", envelope.model()));
    }
    output.push_str(&format!("generated_at: {}\n", envelope.timestamp()));
    output.push_str(&format!("records     : {}\n", envelope.len()));

    if !envelope.warnings().is_empty() {
        output.push_str("warnings:\n");
        for warning in envelope.warnings() {
            output.push_str(&format!("  - {warning}\n"));
        }
    }

    output.push('\n');
    output.push_str(&format_table(&envelope.to_table()?, TABLE_ROW_LIMIT));
    Ok(output)
}

/// Aligned plain-text table showing at most `limit` rows.
pub fn format_table(table: &RecordTable, limit: usize) -> String {
    format_table_clipped(table, limit, MAX_CELL_WIDTH)
}

/// Like [`format_table`], clipping cells at `max_width` characters.
pub fn format_table_clipped(table: &RecordTable, limit: usize, max_width: usize) -> String {
    if table.is_empty() {
        return String::from("(no results)\n");
    }

    let shown = &table.rows[..table.rows.len().min(limit)];
    let cells = shown
        .iter()
        .map(|row| row.iter().map(|value| cell_text(value, max_width)).collect::<Vec<_>>())
        .collect::<Vec<_>>();
    let widths = table
        .columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            cells
                .iter()
                .map(|row| row[index].chars().count())
                .chain(std::iter::once(column.chars().count()))
                .max()
                .unwrap_or_default()
        })
        .collect::<Vec<_>>();

    let mut output = String::new();
    push_line(&mut output, &table.columns, &widths);
    let rule = widths.iter().map(|width| "-".repeat(*width)).collect::<Vec<_>>();
    push_line(&mut output, &rule, &widths);
    for row in &cells {
        push_line(&mut output, row, &widths);
    }

    let hidden = table.rows.len() - shown.len();
    if hidden > 0 {
        output.push_str(&format!("... {hidden} more rows (use -o json or -o csv for all)\n"));
    }
    output
}

fn push_line(output: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    output.push_str(line.trim_end());
    output.push('\n');
}

fn cell_text(value: &Value, max_width: usize) -> String {
    let text = match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    };
    if text.chars().count() > max_width {
        let mut clipped = text.chars().take(max_width.saturating_sub(3)).collect::<String>();
        clipped.push_str("...");
        clipped
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table(rows: usize) -> RecordTable {
        RecordTable {
            columns: vec![String::from("sku"), String::from("quantity")],
            rows: (0..rows).map(|index| vec![json!(format!("EC-{index}")), json!(index)]).collect(),
        }
    }

    #[test]
    fn aligns_columns_to_widest_cell() {
        let text = format_table(&table(2), TABLE_ROW_LIMIT);

        assert_eq!(text, "sku   quantity\n----  --------\nEC-0  0\nEC-1  1\n");
    }

    #[test]
    fn truncates_after_limit() {
        let text = format_table(&table(25), TABLE_ROW_LIMIT);

        assert_eq!(text.lines().count(), 2 + TABLE_ROW_LIMIT + 1);
        assert!(text.ends_with("... 5 more rows (use -o json or -o csv for all)\n"));
    }

    #[test]
    fn empty_table_says_so() {
        assert_eq!(format_table(&RecordTable::default(), TABLE_ROW_LIMIT), "(no results)\n");
    }

    #[test]
    fn long_cells_are_clipped() {
        let long = "x".repeat(40);
        let text = cell_text(&json!(long), MAX_CELL_WIDTH);

        assert_eq!(text.chars().count(), MAX_CELL_WIDTH);
        assert!(text.ends_with("..."));
        assert_eq!(cell_text(&Value::Null, MAX_CELL_WIDTH), "");
    }

    #[test]
    fn unbounded_width_keeps_long_cells() {
        let long = "OrderSummary, OrderDetail, FulfillmentStatus, ReturnsSummary";
        let table = RecordTable {
            columns: vec![String::from("models")],
            rows: vec![vec![json!(long)]],
        };

        let text = format_table_clipped(&table, usize::MAX, usize::MAX);
        assert!(text.lines().any(|line| line == long));
    }
}
