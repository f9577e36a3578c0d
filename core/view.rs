use crate::{
	record::{cell_text, Record},
	schema::Schema,
};
use num_traits::ToPrimitive;
use std::collections::BTreeMap;
use vantage_util::format::format_number;

/// One "max value" card for a numeric column. `formatted` carries the value
/// rendered with two decimal places for display.
#[derive(serde::Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SummaryCard {
	pub column: String,
	pub max: f64,
	pub formatted: String,
}

/// Computes one summary card per numeric column, holding the maximum value
/// of that column across the record set. A null, missing, or non-numeric
/// value counts as zero rather than being skipped, so a column of all nulls
/// reports a maximum of zero. Returns `None` when there are no records or no
/// numeric columns.
pub fn summarize(records: &[Record]) -> Option<Vec<SummaryCard>> {
	let schema = Schema::infer(records);
	if records.is_empty() || schema.numeric_columns.is_empty() {
		return None;
	}
	let cards = schema
		.numeric_columns
		.iter()
		.map(|column| {
			let max = records
				.iter()
				.map(|record| {
					record
						.get(column)
						.and_then(|value| value.as_f64())
						.unwrap_or(0.0)
				})
				.fold(f64::NEG_INFINITY, f64::max);
			SummaryCard {
				column: column.clone(),
				formatted: format_number(max),
				max,
			}
		})
		.collect();
	Some(cards)
}

/// A table of every record, with every cell rendered as text.
#[derive(serde::Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
	pub columns: Vec<String>,
	pub rows: Vec<Vec<String>>,
}

impl TableView {
	/// Returns a copy of this table keeping only the named columns, in this
	/// table's column order. Unknown names are ignored.
	pub fn select_columns(&self, columns: &[String]) -> TableView {
		let indexes: Vec<usize> = self
			.columns
			.iter()
			.enumerate()
			.filter(|(_, column)| columns.contains(column))
			.map(|(index, _)| index)
			.collect();
		TableView {
			columns: indexes
				.iter()
				.map(|index| self.columns[*index].clone())
				.collect(),
			rows: self
				.rows
				.iter()
				.map(|row| indexes.iter().map(|index| row[*index].clone()).collect())
				.collect(),
		}
	}
}

/// Renders a record set as a table. Columns come from the first record's
/// key order and include every column, not just the classified ones. Later
/// records missing a column get an empty cell. Returns `None` when there are
/// no records.
pub fn tabulate(records: &[Record]) -> Option<TableView> {
	let exemplar = records.first()?;
	let columns: Vec<String> = exemplar.keys().cloned().collect();
	let rows = records
		.iter()
		.map(|record| {
			columns
				.iter()
				.map(|column| cell_text(record.get(column)))
				.collect()
		})
		.collect();
	Some(TableView { columns, rows })
}

/// The column choices offered for building a custom chart. Both axes offer
/// the numeric columns, so a histogram's ignored x choice is still a valid
/// pairing for the other chart kinds.
#[derive(serde::Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AxisOptions {
	pub x: Vec<String>,
	pub y: Vec<String>,
}

pub fn axis_options(schema: &Schema) -> AxisOptions {
	AxisOptions {
		x: schema.numeric_columns.clone(),
		y: schema.numeric_columns.clone(),
	}
}

/// Computes the mean of a numeric column within each group of a categorical
/// column, sorted by group value. Records whose category value is not a
/// string form no group, null and missing numeric values are skipped rather
/// than zero filled, and a group with no numeric values at all is dropped.
/// Returns `None` when no group has a mean.
pub fn mean_by_category(
	records: &[Record],
	category: &str,
	numeric: &str,
) -> Option<Vec<(String, f64)>> {
	let mut groups: BTreeMap<String, (f64, u64)> = BTreeMap::new();
	for record in records {
		let key = match record.get(category).and_then(|value| value.as_str()) {
			Some(key) => key,
			None => continue,
		};
		let entry = groups.entry(key.to_owned()).or_insert((0.0, 0));
		if let Some(value) = record.get(numeric).and_then(|value| value.as_f64()) {
			entry.0 += value;
			entry.1 += 1;
		}
	}
	let means: Vec<(String, f64)> = groups
		.into_iter()
		.filter(|(_, (_, count))| *count > 0)
		.map(|(key, (sum, count))| (key, sum / count.to_f64().unwrap()))
		.collect();
	if means.is_empty() {
		None
	} else {
		Some(means)
	}
}

#[cfg(test)]
use crate::record::test_records;

#[test]
fn test_summarize() {
	let records = test_records(serde_json::json!([
		{ "city": "A", "sales": 10, "count": 3 },
		{ "city": "B", "sales": 20, "count": 1 },
	]));
	let cards = summarize(&records).unwrap();
	insta::assert_debug_snapshot!(cards, @r###"
 [
     SummaryCard {
         column: "sales",
         max: 20.0,
         formatted: "20.00",
     },
     SummaryCard {
         column: "count",
         max: 3.0,
         formatted: "3.00",
     },
 ]
 "###);
}

#[test]
fn test_summarize_zero_fills() {
	let records = test_records(serde_json::json!([
		{ "sales": -5 },
		{ "sales": null },
		{ "other": 1 },
	]));
	let cards = summarize(&records).unwrap();
	// The null and the missing value count as zero, which beats -5.
	assert_eq!(cards[0].max, 0.0);
	assert_eq!(cards[0].formatted, "0.00");
}

#[test]
fn test_summarize_no_data() {
	assert_eq!(summarize(&[]), None);
	let records = test_records(serde_json::json!([
		{ "city": "A" },
	]));
	assert_eq!(summarize(&records), None);
}

#[test]
fn test_tabulate() {
	let records = test_records(serde_json::json!([
		{ "city": "A", "sales": 10, "active": true },
		{ "city": "B", "active": null },
	]));
	let table = tabulate(&records).unwrap();
	assert_eq!(
		table.columns,
		vec!["city".to_owned(), "sales".to_owned(), "active".to_owned()]
	);
	assert_eq!(
		table.rows,
		vec![
			vec!["A".to_owned(), "10".to_owned(), "true".to_owned()],
			vec!["B".to_owned(), String::new(), "null".to_owned()],
		]
	);
	assert_eq!(tabulate(&[]), None);
}

#[test]
fn test_select_columns() {
	let table = TableView {
		columns: vec!["city".to_owned(), "sales".to_owned(), "count".to_owned()],
		rows: vec![vec!["A".to_owned(), "10".to_owned(), "3".to_owned()]],
	};
	let selected = table.select_columns(&["count".to_owned(), "city".to_owned()]);
	assert_eq!(selected.columns, vec!["city".to_owned(), "count".to_owned()]);
	assert_eq!(selected.rows, vec![vec!["A".to_owned(), "3".to_owned()]]);
	let none = table.select_columns(&["bogus".to_owned()]);
	assert!(none.columns.is_empty());
	assert_eq!(none.rows, vec![Vec::<String>::new()]);
}

#[test]
fn test_mean_by_category() {
	let records = test_records(serde_json::json!([
		{ "city": "B", "sales": 30 },
		{ "city": "A", "sales": 10 },
		{ "city": "A", "sales": 20 },
		{ "city": "A", "sales": null },
	]));
	let means = mean_by_category(&records, "city", "sales").unwrap();
	assert_eq!(means, vec![("A".to_owned(), 15.0), ("B".to_owned(), 30.0)]);
}

#[test]
fn test_mean_by_category_drops_empty_groups() {
	let records = test_records(serde_json::json!([
		{ "city": "A", "sales": null },
		{ "city": "B", "sales": 10 },
	]));
	let means = mean_by_category(&records, "city", "sales").unwrap();
	assert_eq!(means, vec![("B".to_owned(), 10.0)]);
	assert_eq!(mean_by_category(&records, "missing", "sales"), None);
	assert_eq!(mean_by_category(&[], "city", "sales"), None);
}
