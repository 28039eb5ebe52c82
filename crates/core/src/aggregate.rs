//! Grouping and averaging of decoded results

use crate::data::{AveragedSeries, GroupedResults, Record, ResultSet};
use crate::error::{Error, Result};
use tracing::debug;

/// Column holding the command label
pub const COMMAND_COLUMN: &str = "file";
/// Column holding the input size
pub const SIZE_COLUMN: &str = "n";
/// Column holding the exit status
pub const CODE_COLUMN: &str = "code";
/// Exit status every run must report
pub const SUCCESS_CODE: &str = "0";

/// Group one metric's values by (command, size)
///
/// Aborts on the first record whose `code` is not `"0"`: a failed run
/// anywhere invalidates the whole aggregation. A missing column or a cell
/// that does not parse as a number is a [`Error::ParseError`].
pub fn group(results: &ResultSet, metric: &str) -> Result<GroupedResults> {
    let mut grouped = GroupedResults::new(metric);

    for (index, record) in results.records().iter().enumerate() {
        if record.get(CODE_COLUMN) != Some(SUCCESS_CODE) {
            return Err(Error::ValidationError {
                index,
                record: record.render(results.columns()),
            });
        }

        let command = required(record, COMMAND_COLUMN, index)?.trim();
        let size = parse_cell::<u64>(record, SIZE_COLUMN, index)?;
        let value = parse_value(record, metric, index)?;

        grouped.push(command, size, value);
    }

    debug!(
        metric,
        commands = grouped.commands.len(),
        records = results.len(),
        "grouped results"
    );

    Ok(grouped)
}

/// Reduce each (command, size) bucket to its arithmetic mean
pub fn average(grouped: &GroupedResults) -> AveragedSeries {
    let mut averaged = AveragedSeries::new();

    for (command, buckets) in &grouped.commands {
        let points = buckets.iter().map(|b| (b.size, b.mean())).collect();
        averaged.insert(command.clone(), points);
    }

    averaged
}

fn required<'a>(record: &'a Record, column: &str, index: usize) -> Result<&'a str> {
    record.get(column).ok_or_else(|| {
        Error::ParseError(format!("record {} has no \"{}\" column", index, column))
    })
}

fn parse_cell<T: std::str::FromStr>(record: &Record, column: &str, index: usize) -> Result<T> {
    let raw = required(record, column, index)?;
    raw.trim().parse().map_err(|_| {
        Error::ParseError(format!(
            "record {} has non-numeric \"{}\" value {:?}",
            index, column, raw
        ))
    })
}

/// Metric cell; `NaN` and infinities parse as `f64` but are not measurements
fn parse_value(record: &Record, column: &str, index: usize) -> Result<f64> {
    let value = parse_cell::<f64>(record, column, index)?;
    if !value.is_finite() {
        return Err(Error::ParseError(format!(
            "record {} has non-finite \"{}\" value {}",
            index, column, value
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::decode;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "file,n,code,user\nrs/a,10,0,1.0\nrs/a,10,0,3.0\nrs/a,20,0,2.0\n";

    #[test]
    fn test_group_and_average() {
        let results = decode(SAMPLE).unwrap();
        let averaged = average(&group(&results, "user").unwrap());

        assert_eq!(
            serde_json::to_value(&averaged).unwrap(),
            serde_json::json!({"rs/a": [[10, 2.0], [20, 2.0]]})
        );
    }

    #[test]
    fn test_group_fails_on_bad_code() {
        let text = SAMPLE.replacen("rs/a,10,0,3.0", "rs/a,10,1,3.0", 1);
        let results = decode(&text).unwrap();

        match group(&results, "user") {
            Err(Error::ValidationError { index, record }) => {
                assert_eq!(index, 1);
                assert!(record.contains("\"code\":\"1\""));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_group_fails_regardless_of_position() {
        for bad in 0..3 {
            let lines: Vec<String> = (0..3)
                .map(|i| format!("py/x,{},{},0.5", 10 * (i + 1), if i == bad { 2 } else { 0 }))
                .collect();
            let text = format!("file,n,code,user\n{}\n", lines.join("\n"));
            let results = decode(&text).unwrap();

            assert!(matches!(
                group(&results, "user"),
                Err(Error::ValidationError { index, .. }) if index == bad
            ));
        }
    }

    #[test]
    fn test_group_missing_code_is_validation_failure() {
        let results = decode("file,n,user\nrs/a,10,1.0\n").unwrap();
        assert!(matches!(
            group(&results, "user"),
            Err(Error::ValidationError { .. })
        ));
    }

    #[test]
    fn test_group_mean_ignores_row_order_within_bucket() {
        let forward = "file,n,code,sys\njs/a,5,0,1.0\njs/a,5,0,2.0\njs/a,5,0,6.0\n";
        let backward = "file,n,code,sys\njs/a,5,0,6.0\njs/a,5,0,1.0\njs/a,5,0,2.0\n";

        let a = average(&group(&decode(forward).unwrap(), "sys").unwrap());
        let b = average(&group(&decode(backward).unwrap(), "sys").unwrap());

        assert_eq!(a, b);
        assert_eq!(a.get("js/a").unwrap(), &[(5, 3.0)]);
    }

    #[test]
    fn test_average_sorted_ascending_for_unordered_input() {
        let text = "file,n,code,user\n\
                    rs/a,1000,0,3.0\n\
                    rs/a,10,0,1.0\n\
                    rs/a,100,0,2.0\n\
                    py/b,50,0,9.0\n\
                    py/b,5,0,4.0\n";
        let averaged = average(&group(&decode(text).unwrap(), "user").unwrap());

        for (_, points) in averaged.iter() {
            assert!(points.windows(2).all(|w| w[0].0 < w[1].0));
        }
        assert_eq!(
            averaged.get("rs/a").unwrap(),
            &[(10, 1.0), (100, 2.0), (1000, 3.0)]
        );
    }

    #[test]
    fn test_group_selects_metric_column() {
        let text = "file,n,code,user,maxrss\nrs/a,10,0,0.5,2048\nrs/a,10,0,0.7,4096\n";
        let averaged = average(&group(&decode(text).unwrap(), "maxrss").unwrap());

        assert_eq!(averaged.get("rs/a").unwrap(), &[(10, 3072.0)]);
    }

    #[test]
    fn test_group_non_numeric_metric_fails() {
        let results = decode("file,n,code,user\nrs/a,10,0,fast\n").unwrap();
        assert!(matches!(
            group(&results, "user"),
            Err(Error::ParseError(msg)) if msg.contains("user")
        ));
    }

    #[test]
    fn test_group_non_finite_metric_fails() {
        for cell in ["NaN", "inf", "-infinity"] {
            let text = format!("file,n,code,user\nrs/a,10,0,1.0\nrs/b,10,0,{}\n", cell);
            let results = decode(&text).unwrap();
            assert!(
                matches!(
                    group(&results, "user"),
                    Err(Error::ParseError(msg)) if msg.contains("record 1")
                ),
                "{} was accepted",
                cell
            );
        }
    }

    #[test]
    fn test_group_trims_command_labels() {
        let results = decode("file,n,code,user\n rs/a ,10,0,1.0\nrs/a,10,0,3.0\n").unwrap();
        let averaged = average(&group(&results, "user").unwrap());

        assert_eq!(averaged.commands().collect::<Vec<_>>(), vec!["rs/a"]);
        assert_eq!(averaged.get("rs/a").unwrap(), &[(10, 2.0)]);
    }

    #[test]
    fn test_group_non_integer_size_fails() {
        let results = decode("file,n,code,user\nrs/a,ten,0,1.0\n").unwrap();
        assert!(matches!(group(&results, "user"), Err(Error::ParseError(_))));
    }

    #[test]
    fn test_group_missing_metric_column_fails() {
        let results = decode(SAMPLE).unwrap();
        assert!(matches!(group(&results, "sys"), Err(Error::ParseError(_))));
    }
}
