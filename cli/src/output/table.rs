//! Grid tables for terminal reports.
//!
//! ```text
//! +-----------+--------+
//! | Medicine  | Annual |
//! +===========+========+
//! | Metformin |   $120 |
//! +-----------+--------+
//! ```

use console::{Alignment, measure_text_width, pad_str};

/// A grid table with an optional header row.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    right_aligned: Vec<usize>,
}

impl Table {
    #[must_use]
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Right-align the given zero-based columns (numbers, money).
    #[must_use]
    pub fn right_align(mut self, columns: &[usize]) -> Self {
        self.right_aligned.extend_from_slice(columns);
        self
    }

    pub fn push_row<S: Into<String>>(&mut self, row: impl IntoIterator<Item = S>) {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0)
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths = vec![0; self.column_count()];
        for row in std::iter::once(&self.headers).chain(&self.rows) {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(measure_text_width(cell));
            }
        }
        widths
    }

    /// Render the table in grid format, one line per `\n`, no trailing newline.
    #[must_use]
    pub fn render(&self) -> String {
        let widths = self.widths();
        if widths.is_empty() {
            return String::new();
        }
        let rule = |fill: char| -> String {
            let mut line = String::from("+");
            for w in &widths {
                line.extend(std::iter::repeat_n(fill, w + 2));
                line.push('+');
            }
            line
        };
        let line = |cells: &[String], header: bool| -> String {
            let mut out = String::from("|");
            for (i, w) in widths.iter().enumerate() {
                let cell = cells.get(i).map_or("", String::as_str);
                let align = if !header && self.right_aligned.contains(&i) {
                    Alignment::Right
                } else {
                    Alignment::Left
                };
                out.push(' ');
                out.push_str(&pad_str(cell, *w, align, None));
                out.push_str(" |");
            }
            out
        };

        let mut lines = vec![rule('-')];
        if !self.headers.is_empty() {
            lines.push(line(&self.headers, true));
            lines.push(rule('='));
        }
        for row in &self.rows {
            lines.push(line(row, false));
            lines.push(rule('-'));
        }
        lines.join("\n")
    }
}
