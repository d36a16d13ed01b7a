use super::escape_html;

/// A simple HTML table generator for the dashboard's data views
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    numeric_cols: Vec<bool>,
}

impl Table {
    /// Create a new table with the given headers
    pub fn new(headers: Vec<&str>) -> Self {
        let numeric_cols = vec![false; headers.len()];
        let headers = headers.iter().map(|h| h.to_string()).collect();
        Table {
            headers,
            rows: Vec::new(),
            numeric_cols,
        }
    }

    /// Right-align a column (used for numbers)
    pub fn numeric(mut self, col: usize) -> Self {
        if let Some(flag) = self.numeric_cols.get_mut(col) {
            *flag = true;
        }
        self
    }

    /// Add a row to the table; cells past the header count are dropped
    pub fn add_row(&mut self, row: Vec<String>) {
        let mut row = row;
        row.truncate(self.headers.len());
        self.rows.push(row);
    }

    /// Render the table as an HTML fragment
    pub fn render(&self) -> String {
        let mut output = String::from("<table class=\"data\">\n");

        // Add header
        output.push_str("<thead><tr>");
        for header in &self.headers {
            output.push_str(&format!("<th>{}</th>", escape_html(header)));
        }
        output.push_str("</tr></thead>\n");

        // Add rows
        output.push_str("<tbody>\n");
        for row in &self.rows {
            output.push_str(&self.render_row(row));
            output.push('\n');
        }
        output.push_str("</tbody>\n</table>");
        output
    }

    /// Render a single body row
    fn render_row(&self, row: &[String]) -> String {
        let mut line = String::from("<tr>");
        for (i, col) in row.iter().enumerate() {
            if self.numeric_cols.get(i).copied().unwrap_or(false) {
                line.push_str(&format!("<td class=\"num\">{}</td>", escape_html(col)));
            } else {
                line.push_str(&format!("<td>{}</td>", escape_html(col)));
            }
        }
        line.push_str("</tr>");
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_table() {
        let mut table = Table::new(vec!["date", "value"]).numeric(1);
        table.add_row(vec!["2023-01-01".to_string(), "0.1234".to_string()]);
        table.add_row(vec!["2023-01-02".to_string(), "-1.5000".to_string()]);

        let rendered = table.render();
        assert_eq!(rendered.matches("<tr>").count(), 3);
        assert!(rendered.contains("<th>date</th>"));
        assert!(rendered.contains("<th>value</th>"));
        assert!(rendered.contains("<td>2023-01-01</td>"));
        assert!(rendered.contains("<td class=\"num\">-1.5000</td>"));
    }

    #[test]
    fn test_cells_are_escaped() {
        let mut table = Table::new(vec!["<name>"]);
        table.add_row(vec!["<script>alert(1)</script>".to_string(), "extra".to_string()]);

        let rendered = table.render();
        assert!(rendered.contains("<th>&lt;name&gt;</th>"));
        assert!(rendered.contains("&lt;script&gt;"));
        assert!(!rendered.contains("<script>"));
        assert!(!rendered.contains("extra"));
    }
}
