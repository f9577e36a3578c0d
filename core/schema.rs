use crate::record::Record;
use serde_json::Value;

/// The schema splits the columns of a record set into numeric and
/// categorical, in the first record's key order.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
	pub numeric_columns: Vec<String>,
	pub categorical_columns: Vec<String>,
}

impl Schema {
	/// Classifies columns by examining only the first record. A key whose
	/// value there is a JSON number is numeric, a key whose value is a JSON
	/// string is categorical, and a key whose value is null, boolean, or
	/// nested belongs to neither set. Classification never looks past the
	/// first record, so a column that holds numbers everywhere except the
	/// first record is not numeric.
	pub fn infer(records: &[Record]) -> Schema {
		let exemplar = match records.first() {
			Some(exemplar) => exemplar,
			None => return Schema::default(),
		};
		let mut numeric_columns = Vec::new();
		let mut categorical_columns = Vec::new();
		for (key, value) in exemplar.iter() {
			match value {
				Value::Number(_) => numeric_columns.push(key.clone()),
				Value::String(_) => categorical_columns.push(key.clone()),
				_ => {}
			}
		}
		Schema {
			numeric_columns,
			categorical_columns,
		}
	}
}

#[cfg(test)]
use crate::record::test_records;

#[test]
fn test_infer() {
	let records = test_records(serde_json::json!([
		{ "city": "A", "sales": 10, "active": true },
		{ "city": "B", "sales": 20, "active": false },
	]));
	let schema = Schema::infer(&records);
	insta::assert_debug_snapshot!(schema, @r###"
 Schema {
     numeric_columns: [
         "sales",
     ],
     categorical_columns: [
         "city",
     ],
 }
 "###);
}

#[test]
fn test_infer_empty() {
	let schema = Schema::infer(&[]);
	assert!(schema.numeric_columns.is_empty());
	assert!(schema.categorical_columns.is_empty());
}

#[test]
fn test_infer_uses_first_record_only() {
	// The exemplar holds null for sales, so sales is unclassified even
	// though every later record holds a number there.
	let records = test_records(serde_json::json!([
		{ "city": "A", "sales": null },
		{ "city": "B", "sales": 20 },
		{ "city": "C", "sales": 30 },
	]));
	let schema = Schema::infer(&records);
	assert_eq!(schema.categorical_columns, vec!["city".to_owned()]);
	assert!(schema.numeric_columns.is_empty());
}

#[test]
fn test_infer_preserves_key_order() {
	let records = test_records(serde_json::json!([
		{ "b": 1, "a": 2, "z": "x", "c": "y" },
	]));
	let schema = Schema::infer(&records);
	assert_eq!(schema.numeric_columns, vec!["b".to_owned(), "a".to_owned()]);
	assert_eq!(schema.categorical_columns, vec!["z".to_owned(), "c".to_owned()]);
}
