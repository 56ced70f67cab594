use crate::record::{Category, LookupOutcome};

// One host's result for one category. Rows keep their own width; the writer pads nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub host: String,
    pub outcome: LookupOutcome,
}

impl Row {
    /// The row as written to a sheet: the host followed by the outcome's values.
    pub fn cells(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.host.as_str()).chain(self.outcome.values().iter().map(String::as_str))
    }
}

/// The rows of one category, plus the widest outcome seen so far. The header of the sheet is
/// sized from `max_cols`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Bucket {
    max_cols: usize,
    rows: Vec<Row>,
}

impl Bucket {
    pub fn max_cols(&self) -> usize {
        self.max_cols
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    fn push(&mut self, host: String, outcome: LookupOutcome) {
        self.max_cols = self.max_cols.max(outcome.width());
        self.rows.push(Row { host, outcome });
    }
}

// The Report collects every outcome of a run, grouped per category. A bucket only exists once
// something was recorded for its category, and buckets keep the order they were created in.
#[derive(Debug, Default)]
pub struct Report {
    buckets: Vec<(Category, Bucket)>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    // Appends a row to the category's bucket, creating the bucket on first use.
    pub fn record(&mut self, category: Category, host: &str, outcome: LookupOutcome) {
        let index = match self.buckets.iter().position(|(c, _)| *c == category) {
            Some(index) => index,
            None => {
                self.buckets.push((category, Bucket::default()));
                self.buckets.len() - 1
            }
        };
        self.buckets[index].1.push(host.to_string(), outcome);
    }

    pub fn bucket(&self, category: Category) -> Option<&Bucket> {
        self.buckets
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, bucket)| bucket)
    }

    pub fn buckets(&self) -> impl Iterator<Item = (Category, &Bucket)> {
        self.buckets.iter().map(|(c, bucket)| (*c, bucket))
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    // Returns the number of failed lookups across all buckets
    pub fn num_failures(&self) -> usize {
        self.buckets
            .iter()
            .flat_map(|(_, bucket)| bucket.rows.iter())
            .filter(|row| row.outcome.is_failed())
            .count()
    }
}
