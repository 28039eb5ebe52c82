//! Data structures for decoded and aggregated benchmark results

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// One data row of a results file, keyed by column name
///
/// The column set is only known once the header has been read, so a
/// record stays an open mapping rather than a fixed struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: HashMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }

    /// Raw cell value for a column
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Column names present in this record (unordered)
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Render the record as JSON for error messages, columns ordered like `order`
    pub fn render(&self, order: &[String]) -> String {
        use serde_json::Value;

        let pairs: Vec<String> = order
            .iter()
            .filter_map(|col| {
                self.fields.get(col).map(|v| {
                    format!("{}:{}", Value::String(col.clone()), Value::String(v.clone()))
                })
            })
            .collect();
        format!("{{{}}}", pairs.join(","))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Decoded results file: header columns plus records in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    columns: Vec<String>,
    records: Vec<Record>,
}

impl ResultSet {
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> Self {
        Self { columns, records }
    }

    /// Header column names, in header order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// All metric values observed for one input size of one command
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub size: u64,
    pub values: Vec<f64>,
}

impl Bucket {
    /// Arithmetic mean of the bucket's values
    pub fn mean(&self) -> f64 {
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }
}

/// Metric values grouped by command, then by size in first-observed order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedResults {
    pub metric: String,
    pub commands: BTreeMap<String, Vec<Bucket>>,
}

impl GroupedResults {
    pub fn new(metric: impl Into<String>) -> Self {
        Self {
            metric: metric.into(),
            commands: BTreeMap::new(),
        }
    }

    /// Record one value under (command, size)
    pub fn push(&mut self, command: &str, size: u64, value: f64) {
        let buckets = self.commands.entry(command.to_string()).or_default();
        match buckets.iter_mut().find(|b| b.size == size) {
            Some(bucket) => bucket.values.push(value),
            None => buckets.push(Bucket {
                size,
                values: vec![value],
            }),
        }
    }
}

/// Mean value per (command, size), each command's points ascending by size
///
/// Serializes as `{"rs/a": [[10, 2.0], [20, 2.0]]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AveragedSeries {
    series: BTreeMap<String, Vec<(u64, f64)>>,
}

impl AveragedSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a command's points, sorting them ascending by size
    pub fn insert(&mut self, command: impl Into<String>, mut points: Vec<(u64, f64)>) {
        points.sort_by_key(|(size, _)| *size);
        self.series.insert(command.into(), points);
    }

    pub fn get(&self, command: &str) -> Option<&[(u64, f64)]> {
        self.series.get(command).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[(u64, f64)])> {
        self.series
            .iter()
            .map(|(command, points)| (command.as_str(), points.as_slice()))
    }

    pub fn commands(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouped_push_keeps_first_observed_order() {
        let mut grouped = GroupedResults::new("user");
        grouped.push("rs/a", 20, 1.0);
        grouped.push("rs/a", 10, 2.0);
        grouped.push("rs/a", 20, 3.0);

        let buckets = &grouped.commands["rs/a"];
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].size, 20);
        assert_eq!(buckets[0].values, vec![1.0, 3.0]);
        assert_eq!(buckets[1].size, 10);
        assert_eq!(buckets[0].mean(), 2.0);
    }

    #[test]
    fn test_averaged_insert_sorts_by_size() {
        let mut averaged = AveragedSeries::new();
        averaged.insert("py/b", vec![(300, 1.0), (100, 2.0), (200, 3.0)]);

        assert_eq!(
            averaged.get("py/b").unwrap(),
            &[(100, 2.0), (200, 3.0), (300, 1.0)]
        );
    }

    #[test]
    fn test_averaged_json_shape() {
        let mut averaged = AveragedSeries::new();
        averaged.insert("rs/a", vec![(10, 2.0), (20, 2.5)]);

        let json = serde_json::to_string(&averaged).unwrap();
        assert_eq!(json, r#"{"rs/a":[[10,2.0],[20,2.5]]}"#);
    }

    #[test]
    fn test_record_render_follows_column_order() {
        let record: Record = [("n", "10"), ("file", "rs/a"), ("code", "1")]
            .into_iter()
            .collect();
        let order = vec!["file".to_string(), "n".to_string(), "code".to_string()];

        assert_eq!(
            record.render(&order),
            r#"{"file":"rs/a","n":"10","code":"1"}"#
        );
    }
}
