use super::duration::format_for_display;
use super::entry::TimeEntry;
use super::formatter::{format_decimal, FormattedEntry};
use super::week::WeekGrid;
use anyhow::Result;
use prettytable::{row, Cell, Row, Table};

pub struct View {}

impl View {
    pub fn entries(entries: &[TimeEntry]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "DATE", "PROJECT", "TASK", "TIME", "HOURS", "NOTES"]);
        for entry in entries.iter().map(FormattedEntry::from) {
            table.add_row(row![
                entry.id,
                entry.date,
                entry.project,
                entry.task,
                entry.duration,
                entry.hours,
                entry.notes
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn week(grid: &WeekGrid) -> Result<()> {
        let mut table = Table::new();

        let mut header = vec![Cell::new("ROW")];
        header.extend(grid.days().iter().map(|d| Cell::new(&d.format("%a %d").to_string())));
        header.push(Cell::new("TOTAL"));
        table.add_row(Row::new(header));

        for grid_row in &grid.rows {
            let mut cells = vec![Cell::new(&grid_row.row.to_string())];
            cells.extend(grid_row.days.iter().map(|h| Cell::new(&WeekGrid::display_cell(*h))));
            cells.push(Cell::new(&format_for_display(grid_row.total)));
            table.add_row(Row::new(cells));
        }

        let mut totals = vec![Cell::new("TOTAL")];
        totals.extend(grid.day_totals.iter().map(|h| Cell::new(&WeekGrid::display_cell(*h))));
        totals.push(Cell::new(&format_for_display(grid.total)));
        table.add_row(Row::new(totals));

        table.printstd();

        Ok(())
    }

    /// Shows every representation of one typed duration.
    pub fn parsed(raw: &str, canonical: &str, decimal: f64, stored: f64) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["INPUT", "CANONICAL", "DECIMAL", "STORED"]);
        table.add_row(row![raw, canonical, format!("{:.4}", decimal), format_decimal(stored)]);
        table.printstd();

        Ok(())
    }
}
