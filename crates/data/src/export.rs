use anyhow::{Context, Result};
use csv::Writer;
use std::fs::File;
use std::io::Write;

use fx_bias_core::SnapshotRow;

pub struct CsvExporter;

impl CsvExporter {
    /// Writes snapshot rows as CSV, one line per stored row.
    ///
    /// Format: date,currency,indicator,actual,forecast,previous,surprise,bias
    /// with empty cells for values the source never reported. Rows are
    /// sorted oldest first for spreadsheet-friendly output.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_rows<W: Write>(writer: W, rows: &[SnapshotRow]) -> Result<()> {
        let mut w = Writer::from_writer(writer);

        w.write_record([
            "date",
            "currency",
            "indicator",
            "actual",
            "forecast",
            "previous",
            "surprise",
            "bias",
        ])?;

        let mut sorted = rows.to_vec();
        sorted.sort_by(|a, b| {
            (a.date, &a.currency, &a.indicator).cmp(&(b.date, &b.currency, &b.indicator))
        });

        for row in sorted {
            w.write_record(&[
                row.date.to_string(),
                row.currency.clone(),
                row.indicator.clone(),
                row.actual.to_string(),
                row.forecast.map(|v| v.to_string()).unwrap_or_default(),
                row.previous.map(|v| v.to_string()).unwrap_or_default(),
                row.surprise.to_string(),
                row.bias.to_string(),
            ])?;
        }

        w.flush()?;
        Ok(())
    }

    /// Writes snapshot rows to a CSV file at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or writing fails.
    pub fn write_file(path: &str, rows: &[SnapshotRow]) -> Result<()> {
        let file =
            File::create(path).with_context(|| format!("failed to create CSV file: {path}"))?;
        Self::write_rows(file, rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fx_bias_core::Bias;

    fn sample_rows() -> Vec<SnapshotRow> {
        let d14 = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let d12 = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();
        vec![
            SnapshotRow {
                date: d14,
                currency: "USD".to_string(),
                indicator: "Core CPI m/m".to_string(),
                actual: 3.4,
                forecast: Some(3.1),
                previous: Some(3.2),
                surprise: 0.3,
                bias: Bias::Bearish,
            },
            SnapshotRow {
                date: d12,
                currency: "USD".to_string(),
                indicator: "Unemployment Rate".to_string(),
                actual: 4.2,
                forecast: None,
                previous: Some(4.1),
                surprise: 0.1,
                bias: Bias::Bearish,
            },
        ]
    }

    fn export_to_string(rows: &[SnapshotRow]) -> String {
        let mut buf = Vec::new();
        CsvExporter::write_rows(&mut buf, rows).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn header_matches_the_store_schema() {
        let text = export_to_string(&[]);
        assert_eq!(
            text.lines().next().unwrap(),
            "date,currency,indicator,actual,forecast,previous,surprise,bias"
        );
    }

    #[test]
    fn rows_are_sorted_oldest_first() {
        let text = export_to_string(&sample_rows());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("2025-03-12,USD,Unemployment Rate,4.2"));
        assert!(lines[2].starts_with("2025-03-14,USD,Core CPI m/m,3.4"));
    }

    #[test]
    fn missing_values_export_as_empty_cells() {
        let text = export_to_string(&sample_rows());
        let unemployment = text
            .lines()
            .find(|l| l.contains("Unemployment Rate"))
            .unwrap();
        assert_eq!(unemployment, "2025-03-12,USD,Unemployment Rate,4.2,,4.1,0.1,Bearish");
    }

    #[test]
    fn writes_a_file_on_disk() {
        let dir = std::env::temp_dir().join(format!("fx_bias_export_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("snapshots.csv");

        CsvExporter::write_file(path.to_str().unwrap(), &sample_rows()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("date,currency,indicator"));
        assert_eq!(text.lines().count(), 3);

        std::fs::remove_dir_all(&dir).ok();
    }
}
