//! Delimited-text input and output.
//!
//! Input layout: a header row, one row per sample, one numeric column per
//! marker plus a group-membership column (named `group` by default) holding
//! 0 or 1. Every cell must be present.

use crate::config::AnalysisConfig;
use crate::data::{GroupLabels, MarkerTable};
use crate::error::{MarkerError, Result};
use crate::testing::correction::CorrectedStatistics;
use log::info;
use ndarray::Array2;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Read a marker table and its group labels from a delimited file.
pub fn read_marker_table<P: AsRef<Path>>(
    path: P,
    config: &AnalysisConfig,
) -> Result<(MarkerTable, GroupLabels)> {
    let file = File::open(path.as_ref())?;
    let (table, labels) = read_marker_table_from_reader(file, config)?;
    info!(
        "Loaded {} samples x {} markers from {}",
        table.n_samples(),
        table.n_markers(),
        path.as_ref().display()
    );
    Ok((table, labels))
}

/// Read a marker table and its group labels from any reader.
pub fn read_marker_table_from_reader<R: Read>(
    reader: R,
    config: &AnalysisConfig,
) -> Result<(MarkerTable, GroupLabels)> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();
    let group_idx = headers
        .iter()
        .position(|h| *h == config.group_column)
        .ok_or_else(|| MarkerError::MissingGroupColumn {
            column: config.group_column.clone(),
        })?;

    let markers: Vec<String> = headers
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != group_idx)
        .map(|(_, h)| h.clone())
        .collect();

    let mut values = Vec::new();
    let mut labels = Vec::new();
    let mut n_samples = 0;

    for (row, result) in reader.records().enumerate() {
        let record = result?;
        for (col, field) in record.iter().enumerate() {
            let field = field.trim();
            let column = &headers[col];
            if field.is_empty() {
                return Err(MarkerError::MissingValue {
                    row,
                    column: column.clone(),
                });
            }

            if col == group_idx {
                labels.push(parse_label(field, row, column)?);
            } else {
                values.push(parse_value(field, row, column)?);
            }
        }
        n_samples += 1;
    }

    let values = Array2::from_shape_vec((n_samples, markers.len()), values).map_err(|e| {
        MarkerError::DimensionMismatch {
            expected: format!("{} x {} values", n_samples, markers.len()),
            got: e.to_string(),
        }
    })?;

    Ok((MarkerTable::new(markers, values)?, GroupLabels::new(labels)))
}

fn parse_value(field: &str, row: usize, column: &str) -> Result<f64> {
    field.parse::<f64>().map_err(|_| MarkerError::ParseValue {
        row,
        column: column.to_string(),
        value: field.to_string(),
    })
}

/// Labels are integers; "1.0" style floats are accepted when integral.
fn parse_label(field: &str, row: usize, column: &str) -> Result<i64> {
    if let Ok(label) = field.parse::<i64>() {
        return Ok(label);
    }
    match field.parse::<f64>() {
        Ok(value) if value.fract() == 0.0 && value.is_finite() => Ok(value as i64),
        _ => Err(MarkerError::ParseValue {
            row,
            column: column.to_string(),
            value: field.to_string(),
        }),
    }
}

/// Write the corrected statistics table, one row per marker in column order.
pub fn write_statistics<W: Write>(
    writer: W,
    corrected: &CorrectedStatistics,
    delimiter: u8,
) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);
    for record in &corrected.records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the corrected statistics table to a file.
pub fn write_statistics_to_path<P: AsRef<Path>>(
    path: P,
    corrected: &CorrectedStatistics,
    delimiter: u8,
) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_statistics(file, corrected, delimiter)?;
    info!(
        "Wrote {} marker statistics to {}",
        corrected.len(),
        path.as_ref().display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::correction::correct;
    use crate::testing::MarkerStatistic;
    use ndarray::array;

    const TABLE: &str = "CD4\tgroup\tMS4A1\n1.5\t0\t2.0\n2.5\t1\t3.0\n3.5\t1\t4.0\n";

    #[test]
    fn test_read_table_skips_group_column() {
        let config = AnalysisConfig::default();
        let (table, labels) = read_marker_table_from_reader(TABLE.as_bytes(), &config).unwrap();

        assert_eq!(table.markers(), &["CD4".to_string(), "MS4A1".to_string()][..]);
        assert_eq!(table.values(), &array![[1.5, 2.0], [2.5, 3.0], [3.5, 4.0]]);
        assert_eq!(labels.as_slice(), &[0, 1, 1]);
    }

    #[test]
    fn test_read_table_custom_group_column_and_delimiter() {
        let data = "condition,a\n1.0,4\n0,5\n";
        let config = AnalysisConfig::default()
            .with_group_column("condition")
            .with_delimiter(b',');
        let (table, labels) = read_marker_table_from_reader(data.as_bytes(), &config).unwrap();
        assert_eq!(labels.as_slice(), &[1, 0]);
        assert_eq!(table.values(), &array![[4.0], [5.0]]);
    }

    #[test]
    fn test_missing_group_column() {
        let data = "a\tb\n1\t2\n";
        match read_marker_table_from_reader(data.as_bytes(), &AnalysisConfig::default()) {
            Err(MarkerError::MissingGroupColumn { column }) => assert_eq!(column, "group"),
            other => panic!("expected missing group column, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_and_bad_values() {
        let missing = "a\tgroup\n\t0\n";
        match read_marker_table_from_reader(missing.as_bytes(), &AnalysisConfig::default()) {
            Err(MarkerError::MissingValue { row, column }) => {
                assert_eq!(row, 0);
                assert_eq!(column, "a");
            }
            other => panic!("expected missing value, got {:?}", other),
        }

        let bad = "a\tgroup\n1.0\t0\nNA?\t1\n";
        assert!(matches!(
            read_marker_table_from_reader(bad.as_bytes(), &AnalysisConfig::default()),
            Err(MarkerError::ParseValue { row: 1, .. })
        ));

        let bad_label = "a\tgroup\n1.0\t0.5\n";
        assert!(matches!(
            read_marker_table_from_reader(bad_label.as_bytes(), &AnalysisConfig::default()),
            Err(MarkerError::ParseValue { .. })
        ));
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        let ragged = "a\tgroup\n1.0\t0\n2.0\n";
        assert!(matches!(
            read_marker_table_from_reader(ragged.as_bytes(), &AnalysisConfig::default()),
            Err(MarkerError::Csv(_))
        ));
    }

    #[test]
    fn test_write_statistics() {
        let stats = vec![
            MarkerStatistic {
                marker: "a".to_string(),
                statistic: -3.0,
                degrees_of_freedom: 4.0,
                p_value: 0.01,
                log2_fold_change: 2.0,
            },
            MarkerStatistic {
                marker: "b".to_string(),
                statistic: 0.5,
                degrees_of_freedom: 4.0,
                p_value: 0.5,
                log2_fold_change: -0.25,
            },
        ];
        let corrected = correct(&stats, 0.05).unwrap();

        let mut buffer = Vec::new();
        write_statistics(&mut buffer, &corrected, b'\t').unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "marker\tstatistic\tdegrees_of_freedom\tp_value\tlog2_fold_change\tpasses_alpha_threshold\tbonferroni_p_value\tfdr_p_value"
        );
        assert!(lines[1].starts_with("a\t-3.0\t4.0\t0.01\t2.0\ttrue\t0.02\t"));
        assert!(lines[2].starts_with("b\t"));
    }
}
