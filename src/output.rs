use serde::Serialize;
use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};

/// One header line from the row type's serde names, then one line per row.
pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), Box<dyn Error>> {
    let mut wtr = csv::Writer::from_path(path)?;
    rows.iter().try_for_each(|row| wtr.serialize(row))?;
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), Box<dyn Error>> {
    let mut file = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut file, value)?;
    file.flush()?;
    Ok(())
}

pub fn write_svg(path: &Path, svg: &str) -> Result<(), Box<dyn Error>> {
    std::fs::write(path, svg)?;
    Ok(())
}

/// Render rows as a Markdown table, or `(no rows)` when there is nothing
/// to show.
pub fn render_table<T>(rows: &[T], max_rows: usize) -> String
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().take(max_rows).cloned().collect();
    if slice.is_empty() {
        return "(no rows)".to_string();
    }
    Table::new(slice).with(Style::markdown()).to_string()
}

/// Print one dashboard section: a heading, an optional note, and up to
/// `max_rows` rows of the table.
pub fn preview_table<T>(title: &str, note: Option<&str>, rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    println!("\n{}", title);
    println!("{}", "-".repeat(title.chars().count()));
    if let Some(n) = note {
        println!("({})", n);
    }
    println!();
    println!("{}\n", render_table(rows, max_rows));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ActorRow;

    #[test]
    fn markdown_table_is_truncated() {
        let rows: Vec<ActorRow> = ["Alpha", "Beta", "Gamma"]
            .iter()
            .map(|a| ActorRow {
                actor: a.to_string(),
                appearances: 1,
            })
            .collect();
        let table = render_table(&rows, 2);
        assert!(table.contains("| Actor"));
        assert!(table.contains("Alpha"));
        assert!(table.contains("Beta"));
        assert!(!table.contains("Gamma"));
    }

    #[test]
    fn empty_table_says_so() {
        let rows: Vec<ActorRow> = Vec::new();
        assert_eq!(render_table(&rows, 5), "(no rows)");
    }

    #[test]
    fn csv_export_uses_column_names() {
        let dir = std::env::temp_dir().join(format!("marvel_dc_report_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("actors.csv");
        let rows = vec![ActorRow {
            actor: "Chris Evans".to_string(),
            appearances: 7,
        }];
        write_csv(&path, &rows).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "Actor,Appearances\nChris Evans,7\n");
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn json_export_is_pretty_printed() {
        let dir = std::env::temp_dir().join(format!("marvel_dc_json_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("actors.json");
        let rows = vec![ActorRow {
            actor: "Gal Gadot".to_string(),
            appearances: 4,
        }];
        write_json(&path, &rows).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n  {"));
        assert!(text.contains("\"Actor\": \"Gal Gadot\""));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
