#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

const MIN_COLUMN_WIDTH: usize = 6;
const SEPARATOR: &str = "  ";

/// Render an aligned table. Only the last column is shrunk to fit
/// `max_width`; earlier columns (identifiers) are never truncated.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    if let (Some(max_width), Some((last, leading))) = (options.max_width, widths.split_last_mut()) {
        let used = leading.iter().sum::<usize>() + leading.len() * SEPARATOR.len();
        *last = (*last).min(max_width.saturating_sub(used).max(MIN_COLUMN_WIDTH));
    }

    let header_line = join_cells(headers.iter().copied(), &widths, |cell| cell.to_string());
    let divider = "-".repeat(header_line.chars().count());

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line);
    lines.push(divider);
    for row in rows {
        let cells = (0..widths.len()).map(|index| row.get(index).map_or("-", String::as_str));
        lines.push(join_cells(cells, &widths, |cell| {
            if options.color {
                colorize(cell)
            } else {
                cell.to_string()
            }
        }));
    }
    lines.join("\n")
}

fn join_cells<'a>(
    cells: impl Iterator<Item = &'a str>,
    widths: &[usize],
    style: impl Fn(&str) -> String,
) -> String {
    let line = cells
        .zip(widths)
        .map(|(cell, width)| {
            let text = truncate(cell, *width);
            let pad = width.saturating_sub(text.chars().count());
            format!("{}{}", style(&text), " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join(SEPARATOR);
    line.trim_end().to_string()
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn colorize(value: &str) -> String {
    let code = match value {
        "error" => "31",
        "warning" => "33",
        _ => return value.to_string(),
    };
    format!("\u{1b}[{code}m{value}\u{1b}[0m")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn rows() -> Vec<Vec<String>> {
        vec![
            vec!["p:d.t".into(), "short".into()],
            vec!["p:d.events_20200101".into(), "a much longer reason".into()],
        ]
    }

    #[test]
    fn columns_are_aligned() {
        let out = render_table(
            &["table", "reasons"],
            &rows(),
            TableOptions {
                max_width: None,
                color: false,
            },
        );
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "table                reasons");
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(lines[2], "p:d.t                short");
        assert_eq!(lines[3], "p:d.events_20200101  a much longer reason");
    }

    #[test]
    fn last_column_shrinks_to_fit() {
        let out = render_table(
            &["table", "reasons"],
            &rows(),
            TableOptions {
                max_width: Some(31),
                color: false,
            },
        );
        assert_eq!(out.lines().nth(3), Some("p:d.events_20200101  a much lo…"));
    }

    #[test]
    fn missing_cells_render_as_dash() {
        let out = render_table(
            &["a", "b"],
            &[vec!["x".into()]],
            TableOptions {
                max_width: None,
                color: false,
            },
        );
        assert_eq!(out.lines().last(), Some("x  -"));
    }
}
