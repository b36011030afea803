use std::collections::HashSet;
use std::slice;
use std::vec;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Record;

static NULL: Value = Value::Null;

/// An ordered sequence of records, decoded from a JSON array of objects.
///
/// Rows are not required to share the same keys. [`Table::columns`] is the union of keys
/// across all rows in the order they were first seen, and [`Table::rows`] reads cells aligned
/// to those columns, treating a missing key as JSON `null`.
///
/// Tables from several calls can be combined with [`Extend`]:
///
/// ```
/// use serde_json::json;
/// use topaz_client_sdk::types::Table;
///
/// let mut races: Table = serde_json::from_value(json!([{ "raceId": 1, "trackCode": "WPK" }]))?;
/// let more: Table = serde_json::from_value(json!([{ "raceId": 2, "distance": 520 }]))?;
///
/// races.extend(more);
///
/// assert_eq!(races.len(), 2);
/// assert_eq!(races.columns(), ["raceId", "trackCode", "distance"]);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table {
    records: Vec<Record>,
}

impl Table {
    #[must_use]
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Returns the row at `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Union of keys across all rows, in first-seen order.
    #[must_use]
    pub fn columns(&self) -> Vec<&str> {
        let mut seen = HashSet::new();

        self.records
            .iter()
            .flat_map(|record| record.keys())
            .map(String::as_str)
            .filter(|key| seen.insert(*key))
            .collect()
    }

    /// One cell per row for the column `name`; `None` where a row does not carry the key.
    pub fn column<'table, 'name>(
        &'table self,
        name: &'name str,
    ) -> impl Iterator<Item = Option<&'table Value>> + use<'table, 'name> {
        self.records.iter().map(move |record| record.get(name))
    }

    /// Rows as cells aligned to [`Table::columns`]. Missing cells read as JSON `null`.
    #[must_use]
    pub fn rows(&self) -> Vec<Vec<&Value>> {
        let columns = self.columns();

        self.records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|column| record.get(*column).unwrap_or(&NULL))
                    .collect()
            })
            .collect()
    }
}

impl From<Vec<Record>> for Table {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<Record> for Table {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Extend<Record> for Table {
    fn extend<I: IntoIterator<Item = Record>>(&mut self, iter: I) {
        self.records.extend(iter);
    }
}

impl IntoIterator for Table {
    type Item = Record;
    type IntoIter = vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'table> IntoIterator for &'table Table {
    type Item = &'table Record;
    type IntoIter = slice::Iter<'table, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Response of the meeting details endpoint, whose shape depends on the requested
/// [`MeetingFormat`](super::MeetingFormat).
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum MeetingDetails {
    /// Returned for [`MeetingFormat::All`](super::MeetingFormat::All): the meeting with its
    /// races and runs nested inside.
    Record(Record),
    /// Returned for every other format: one row per run.
    Table(Table),
}

impl MeetingDetails {
    #[must_use]
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            Self::Table(_) => None,
        }
    }

    #[must_use]
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Self::Table(table) => Some(table),
            Self::Record(_) => None,
        }
    }

    #[must_use]
    pub fn into_record(self) -> Option<Record> {
        match self {
            Self::Record(record) => Some(record),
            Self::Table(_) => None,
        }
    }

    #[must_use]
    pub fn into_table(self) -> Option<Table> {
        match self {
            Self::Table(table) => Some(table),
            Self::Record(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn table() -> Table {
        serde_json::from_value(json!([
            { "raceId": 972_428_497, "raceNumber": 1, "trackCode": "SAN" },
            { "raceId": 972_428_498, "raceNumber": 2, "distance": 515 },
            { "trackCode": "SAN", "raceId": 972_428_499 }
        ]))
        .expect("valid table")
    }

    #[test]
    fn columns_should_be_first_seen_union() {
        assert_eq!(
            table().columns(),
            ["raceId", "raceNumber", "trackCode", "distance"]
        );
    }

    #[test]
    fn column_should_yield_none_for_missing_keys() {
        let table = table();
        let distances: Vec<_> = table.column("distance").collect();

        assert_eq!(distances, [None, Some(&json!(515)), None]);
    }

    #[test]
    fn column_values_should_outlive_name() {
        let table = table();

        let cells = {
            let name = String::from("trackCode");
            table.column(&name).flatten().collect::<Vec<_>>()
        };

        assert_eq!(cells, [&json!("SAN"), &json!("SAN")]);
    }

    #[test]
    fn rows_should_align_to_columns() {
        let table = table();
        let rows = table.rows();

        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[2],
            [
                &json!(972_428_499),
                &Value::Null,
                &json!("SAN"),
                &Value::Null
            ]
        );
    }

    #[test]
    fn extend_should_append_rows() {
        let mut first = table();
        let second: Table = vec![Record::new()].into();

        first.extend(second);

        assert_eq!(first.len(), 4);
        assert!(first.get(3).is_some_and(Record::is_empty));
    }

    #[test]
    fn empty_table_has_no_columns() {
        let table = Table::default();

        assert!(table.is_empty());
        assert!(table.columns().is_empty());
        assert!(table.rows().is_empty());
    }

    #[test]
    fn meeting_details_accessors() {
        let record = MeetingDetails::Record(Record::new());
        let table = MeetingDetails::Table(Table::default());

        assert!(record.as_record().is_some());
        assert!(record.as_table().is_none());
        assert!(table.as_table().is_some());
        assert!(table.into_record().is_none());
        assert!(record.into_record().is_some());
    }
}
