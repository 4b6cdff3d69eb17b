//! Writing derived tables to stdout as JSON or CSV.

use clap::ValueEnum;
use serde::Serialize;
use std::collections::BTreeSet;
use std::io::Write;
use wbd_data::YearRow;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Pretty-printed JSON array
    #[default]
    Json,
    /// CSV with a header row
    Csv,
}

/// Write flat rows in `format`.
pub fn write_rows<T: Serialize, W: Write>(
    rows: &[T],
    format: OutputFormat,
    out: &mut W,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, rows)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(&mut *out);
            for row in rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
    }
    Ok(())
}

/// Write the year pivot. CSV gets one column per country seen in any row;
/// a missing value is an empty cell, not zero.
pub fn write_years<W: Write>(
    rows: &[YearRow],
    format: OutputFormat,
    out: &mut W,
) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        return write_rows(rows, format, out);
    }

    let columns: BTreeSet<&str> = rows
        .iter()
        .flat_map(|row| row.values.keys().map(String::as_str))
        .collect();

    let mut wtr = csv::Writer::from_writer(&mut *out);
    let mut header = vec!["year"];
    header.extend(columns.iter().copied());
    wtr.write_record(&header)?;

    for row in rows {
        let mut record = vec![row.year.to_string()];
        record.extend(
            columns
                .iter()
                .map(|c| row.get(c).map(|v| v.to_string()).unwrap_or_default()),
        );
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    struct Row {
        id: &'static str,
        value: Option<f64>,
    }

    #[test]
    fn test_csv_rows_with_header() {
        let rows = vec![
            Row { id: "ID", value: Some(3.2) },
            Row { id: "TH", value: None },
        ];
        let mut out = Vec::new();
        write_rows(&rows, OutputFormat::Csv, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "id,value\nID,3.2\nTH,\n");
    }

    #[test]
    fn test_json_rows() {
        let rows = vec![Row { id: "ID", value: Some(3.2) }];
        let mut out = Vec::new();
        write_rows(&rows, OutputFormat::Json, &mut out).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, serde_json::json!([{ "id": "ID", "value": 3.2 }]));
    }

    #[test]
    fn test_years_csv_leaves_gaps_empty() {
        let rows = vec![
            YearRow {
                year: 2019,
                values: BTreeMap::from([("ID".to_string(), 1.5), ("TH".to_string(), 2.0)]),
            },
            YearRow {
                year: 2020,
                values: BTreeMap::from([("TH".to_string(), 2.5)]),
            },
        ];
        let mut out = Vec::new();
        write_years(&rows, OutputFormat::Csv, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "year,ID,TH\n2019,1.5,2\n2020,,2.5\n"
        );
    }
}
