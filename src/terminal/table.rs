use console::{measure_text_width, pad_str, style, Alignment};

const COLUMN_GAP: &str = "  ";

pub struct Table {
    headers: Vec<(&'static str, Alignment)>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[(&'static str, Alignment)]) -> Self {
        Self {
            headers: headers.to_vec(),
            rows: vec![],
        }
    }

    /// Cells may be styled, widths are measured without escape codes.
    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> Vec<String> {
        let widths: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .map(|(index, (header, _))| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(index))
                    .map(|cell| measure_text_width(cell))
                    .chain([measure_text_width(header)])
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let line = |cells: Vec<String>| {
            cells
                .iter()
                .zip(&self.headers)
                .zip(&widths)
                .map(|((cell, (_, alignment)), width)| {
                    pad_str(cell, *width, *alignment, None).into_owned()
                })
                .collect::<Vec<_>>()
                .join(COLUMN_GAP)
                .trim_end()
                .to_string()
        };

        let header = line(
            self.headers
                .iter()
                .map(|(header, _)| style(header).bold().underlined().to_string())
                .collect(),
        );
        std::iter::once(header)
            .chain(self.rows.iter().map(|row| line(row.clone())))
            .collect()
    }

    pub fn print(&self) {
        for line in self.render() {
            println!("{line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligns_columns() {
        console::set_colors_enabled(false);
        let mut table = Table::new(&[("Name", Alignment::Left), ("Amount", Alignment::Right)]);
        table.add_row(vec!["Rent".to_string(), "1200.00".to_string()]);
        table.add_row(vec!["Coffee subscription".to_string(), "9.50".to_string()]);
        assert_eq!(
            vec![
                "Name                  Amount",
                "Rent                 1200.00",
                "Coffee subscription     9.50",
            ],
            table.render()
        );
    }

    #[test]
    fn header_only() {
        console::set_colors_enabled(false);
        let table = Table::new(&[("Title", Alignment::Left)]);
        assert!(table.is_empty());
        assert_eq!(vec!["Title"], table.render());
    }
}
