use std::fmt::Write as _;

/// Renders an elastic-width text table: two spaces between columns, a dashed
/// separator under the header row, no trailing whitespace on any line.
pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|header| header.chars().count()).collect();
    for row in rows {
        for (idx, cell) in row.iter().enumerate().take(widths.len()) {
            widths[idx] = widths[idx].max(cell.chars().count());
        }
    }

    let mut output = String::new();
    push_row(&mut output, headers, &widths);
    let separator_widths: Vec<usize> = widths.iter().map(|width| (*width).max(3)).collect();
    let separator: Vec<String> = separator_widths
        .iter()
        .map(|width| "-".repeat(*width))
        .collect();
    push_row(&mut output, &separator, &separator_widths);
    for row in rows {
        push_row(&mut output, row, &widths);
    }
    output
}

pub fn print_table(headers: &[String], rows: &[Vec<String>]) {
    print!("{}", render_table(headers, rows));
}

fn push_row(output: &mut String, cells: &[String], widths: &[usize]) {
    let mut line = String::new();
    for (idx, cell) in cells.iter().enumerate().take(widths.len()) {
        if idx > 0 {
            line.push_str("  ");
        }
        let clean = sanitize_cell(cell);
        let width = widths[idx];
        let _ = write!(line, "{clean:<width$}");
    }
    let _ = writeln!(output, "{}", line.trim_end());
}

// Newlines and tabs would break column alignment.
fn sanitize_cell(value: &str) -> String {
    value
        .chars()
        .map(|ch| match ch {
            '\n' | '\r' | '\t' => ' ',
            other => other,
        })
        .collect()
}
