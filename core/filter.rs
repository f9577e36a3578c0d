use crate::{record::Record, schema::Schema};
use std::collections::BTreeSet;

/// The durable filter state for one loaded record set. There is one entry
/// per categorical column of the original records, in schema order. State
/// is rebuilt only when a new record set is loaded, never when a selection
/// changes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterState {
	pub filters: Vec<ColumnFilter>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ColumnFilter {
	pub column: String,
	pub selected: BTreeSet<String>,
}

impl FilterState {
	/// Builds the filter state for a freshly loaded record set, with every
	/// distinct value of every categorical column selected. Applying this
	/// state returns the record set unchanged.
	pub fn build(records: &[Record]) -> FilterState {
		let schema = Schema::infer(records);
		let filters = schema
			.categorical_columns
			.iter()
			.map(|column| ColumnFilter {
				column: column.clone(),
				selected: distinct_values(records, column).into_iter().collect(),
			})
			.collect();
		FilterState { filters }
	}

	/// Replaces the selected set for one column. A column with no filter
	/// entry is left untouched.
	pub fn set_selected(&mut self, column: &str, values: Vec<String>) {
		if let Some(filter) = self
			.filters
			.iter_mut()
			.find(|filter| filter.column == column)
		{
			filter.selected = values.into_iter().collect();
		}
	}

	/// Filters the original record set down to the records that match every
	/// column filter. A record matches a filter when its value for that
	/// column is a string in the selected set, so a record with a missing,
	/// null, or non-string value for a filtered column never matches, and an
	/// empty selected set matches nothing at all.
	pub fn apply(&self, original: &[Record]) -> Vec<Record> {
		original
			.iter()
			.filter(|record| {
				self.filters.iter().all(|filter| {
					record
						.get(&filter.column)
						.and_then(|value| value.as_str())
						.map(|value| filter.selected.contains(value))
						.unwrap_or(false)
				})
			})
			.cloned()
			.collect()
	}
}

/// Returns the sorted distinct string values of a column across a record
/// set.
pub fn distinct_values(records: &[Record], column: &str) -> Vec<String> {
	let values: BTreeSet<String> = records
		.iter()
		.filter_map(|record| record.get(column))
		.filter_map(|value| value.as_str())
		.map(|value| value.to_owned())
		.collect();
	values.into_iter().collect()
}

#[cfg(test)]
use crate::record::test_records;

#[test]
fn test_build_selects_everything() {
	let records = test_records(serde_json::json!([
		{ "city": "B", "sales": 10 },
		{ "city": "A", "sales": 20 },
		{ "city": "B", "sales": 30 },
	]));
	let filters = FilterState::build(&records);
	assert_eq!(filters.filters.len(), 1);
	assert_eq!(filters.filters[0].column, "city");
	let selected: Vec<&str> = filters.filters[0]
		.selected
		.iter()
		.map(|value| value.as_str())
		.collect();
	assert_eq!(selected, vec!["A", "B"]);
	// The freshly built state passes every record through.
	assert_eq!(filters.apply(&records), records);
}

#[test]
fn test_apply_narrows() {
	let records = test_records(serde_json::json!([
		{ "city": "A", "sales": 10 },
		{ "city": "B", "sales": 20 },
	]));
	let mut filters = FilterState::build(&records);
	filters.set_selected("city", vec!["A".to_owned()]);
	let filtered = filters.apply(&records);
	assert_eq!(filtered.len(), 1);
	assert_eq!(filtered[0].get("city"), Some(&serde_json::json!("A")));
	// Applying is idempotent.
	assert_eq!(filters.apply(&filtered), filtered);
}

#[test]
fn test_apply_refilters_from_original() {
	// Selections always apply to the original records, so widening a
	// selection after narrowing it brings records back.
	let records = test_records(serde_json::json!([
		{ "city": "A", "sales": 10 },
		{ "city": "B", "sales": 20 },
	]));
	let mut filters = FilterState::build(&records);
	filters.set_selected("city", vec!["A".to_owned()]);
	assert_eq!(filters.apply(&records).len(), 1);
	filters.set_selected("city", vec!["A".to_owned(), "B".to_owned()]);
	assert_eq!(filters.apply(&records).len(), 2);
}

#[test]
fn test_apply_empty_selection_matches_nothing() {
	let records = test_records(serde_json::json!([
		{ "city": "A", "sales": 10 },
		{ "city": "B", "sales": 20 },
	]));
	let mut filters = FilterState::build(&records);
	filters.set_selected("city", Vec::new());
	assert!(filters.apply(&records).is_empty());
}

#[test]
fn test_apply_skips_non_string_values() {
	// The second record holds a number where the filter expects a string
	// and the third is missing the key entirely, so neither matches.
	let records = test_records(serde_json::json!([
		{ "city": "A", "sales": 10 },
		{ "city": 7, "sales": 20 },
		{ "sales": 30 },
	]));
	let mut filters = FilterState::build(&records);
	filters.set_selected("city", vec!["A".to_owned(), "7".to_owned()]);
	assert_eq!(filters.apply(&records).len(), 1);
}

#[test]
fn test_set_selected_unknown_column() {
	let records = test_records(serde_json::json!([
		{ "city": "A", "sales": 10 },
	]));
	let mut filters = FilterState::build(&records);
	let before = filters.clone();
	filters.set_selected("sales", vec!["10".to_owned()]);
	assert_eq!(filters, before);
}

#[test]
fn test_distinct_values() {
	let records = test_records(serde_json::json!([
		{ "city": "B" },
		{ "city": "A" },
		{ "city": "B" },
		{ "city": null },
		{ "other": "C" },
	]));
	assert_eq!(
		distinct_values(&records, "city"),
		vec!["A".to_owned(), "B".to_owned()]
	);
	assert!(distinct_values(&records, "missing").is_empty());
}
