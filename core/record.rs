use serde_json::Value;

/// A record is one flat JSON object from the loaded array. Records are kept
/// untyped so heterogeneous and sparse data survive loading unchanged, and
/// key order is preserved so the first record's key order can drive column
/// order everywhere else.
pub type Record = serde_json::Map<String, Value>;

/// Renders one cell of a record for display in a table.
///
/// A missing key renders as the empty string, an explicit null renders as
/// the text "null", strings render verbatim without quotes, and every other
/// value renders as its JSON text.
pub fn cell_text(value: Option<&Value>) -> String {
	match value {
		None => String::new(),
		Some(Value::String(value)) => value.clone(),
		Some(value) => value.to_string(),
	}
}

#[cfg(test)]
pub fn test_records(value: Value) -> Vec<Record> {
	serde_json::from_value(value).unwrap()
}

#[test]
fn test_cell_text() {
	assert_eq!(cell_text(None), "");
	assert_eq!(cell_text(Some(&Value::Null)), "null");
	assert_eq!(cell_text(Some(&serde_json::json!("East"))), "East");
	assert_eq!(cell_text(Some(&serde_json::json!(10))), "10");
	assert_eq!(cell_text(Some(&serde_json::json!(2.5))), "2.5");
	assert_eq!(cell_text(Some(&serde_json::json!(true))), "true");
	assert_eq!(cell_text(Some(&serde_json::json!([1, 2]))), "[1,2]");
}
