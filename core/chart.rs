use crate::{record::Record, schema::Schema, view};
use itertools::izip;
use num_traits::ToPrimitive;
use vantage_charts::{ChartKind, ChartLayout, ChartPoint, ChartSeries, ChartSpec};

/// The preview chart plots only the first records of the set.
pub const PREVIEW_RECORD_COUNT: usize = 5;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ChartError {
	#[error("select both the x and the y column")]
	MissingAxis,
	#[error("there are no records to chart")]
	NoRecords,
}

/// Builds the default preview chart: a bar chart of the first numeric column
/// over the first categorical column, limited to the first
/// [`PREVIEW_RECORD_COUNT`] records. Returns `None` when the record set has
/// no categorical or no numeric column.
pub fn default_preview(records: &[Record]) -> Option<ChartSpec> {
	let schema = Schema::infer(records);
	let x_column = schema.categorical_columns.first()?;
	let y_column = schema.numeric_columns.first()?;
	let labels = records.iter().take(PREVIEW_RECORD_COUNT).map(|record| {
		record
			.get(x_column)
			.and_then(|value| value.as_str())
			.map(str::to_owned)
	});
	let values = records
		.iter()
		.take(PREVIEW_RECORD_COUNT)
		.map(|record| record.get(y_column).and_then(|value| value.as_f64()));
	let points = izip!(labels, values)
		.enumerate()
		.map(|(index, (label, y))| ChartPoint {
			label,
			x: index.to_f64(),
			y,
		})
		.collect();
	Some(ChartSpec {
		kind: ChartKind::Bar,
		x_column: Some(x_column.clone()),
		y_column: y_column.clone(),
		series: ChartSeries::Points(points),
		layout: ChartLayout {
			title: format!("{} vs {}", x_column, y_column),
			x_axis_title: None,
			y_axis_title: None,
		},
	})
}

/// Builds a chart of the caller's choosing from two named columns.
///
/// A histogram reads only the y column and carries its values as a bare
/// series with no x binding. Every other kind pairs the two columns row by
/// row, keeping record order and passing null and non-numeric values through
/// as gaps for the renderer to skip.
pub fn custom_chart(
	records: &[Record],
	x_field: &str,
	y_field: &str,
	kind: ChartKind,
) -> Result<ChartSpec, ChartError> {
	if x_field.is_empty() || y_field.is_empty() {
		return Err(ChartError::MissingAxis);
	}
	if records.is_empty() {
		return Err(ChartError::NoRecords);
	}
	let spec = match kind {
		ChartKind::Histogram => {
			let values = records
				.iter()
				.map(|record| record.get(y_field).and_then(|value| value.as_f64()))
				.collect();
			ChartSpec {
				kind,
				x_column: None,
				y_column: y_field.to_owned(),
				series: ChartSeries::Values(values),
				layout: ChartLayout {
					title: format!("histogram of {}", y_field),
					x_axis_title: None,
					y_axis_title: Some(y_field.to_owned()),
				},
			}
		}
		_ => {
			let points = records
				.iter()
				.map(|record| ChartPoint {
					label: None,
					x: record.get(x_field).and_then(|value| value.as_f64()),
					y: record.get(y_field).and_then(|value| value.as_f64()),
				})
				.collect();
			ChartSpec {
				kind,
				x_column: Some(x_field.to_owned()),
				y_column: y_field.to_owned(),
				series: ChartSeries::Points(points),
				layout: ChartLayout {
					title: format!("{} chart of {} vs {}", kind.as_str(), y_field, x_field),
					x_axis_title: Some(x_field.to_owned()),
					y_axis_title: Some(y_field.to_owned()),
				},
			}
		}
	};
	Ok(spec)
}

/// Builds a bar chart of the mean of a numeric column per category. Returns
/// `None` when no group has a mean.
pub fn mean_chart(records: &[Record], category: &str, numeric: &str) -> Option<ChartSpec> {
	let means = view::mean_by_category(records, category, numeric)?;
	let points = means
		.into_iter()
		.enumerate()
		.map(|(index, (label, mean))| ChartPoint {
			label: Some(label),
			x: index.to_f64(),
			y: Some(mean),
		})
		.collect();
	Some(ChartSpec {
		kind: ChartKind::Bar,
		x_column: Some(category.to_owned()),
		y_column: numeric.to_owned(),
		series: ChartSeries::Points(points),
		layout: ChartLayout {
			title: format!("mean {} by {}", numeric, category),
			x_axis_title: Some(category.to_owned()),
			y_axis_title: Some(numeric.to_owned()),
		},
	})
}

#[cfg(test)]
use crate::record::test_records;

#[test]
fn test_default_preview() {
	let records = test_records(serde_json::json!([
		{ "city": "A", "sales": 10 },
		{ "city": "B", "sales": 20 },
		{ "city": "C", "sales": 30 },
		{ "city": "D", "sales": 40 },
		{ "city": "E", "sales": 50 },
		{ "city": "F", "sales": 60 },
	]));
	let spec = default_preview(&records).unwrap();
	assert_eq!(spec.kind, ChartKind::Bar);
	assert_eq!(spec.x_column.as_deref(), Some("city"));
	assert_eq!(spec.y_column, "sales");
	assert_eq!(spec.layout.title, "city vs sales");
	// Only the first five records are plotted.
	assert_eq!(spec.series.len(), 5);
	match &spec.series {
		ChartSeries::Points(points) => {
			assert_eq!(points[0].label.as_deref(), Some("A"));
			assert_eq!(points[0].y, Some(10.0));
			assert_eq!(points[4].label.as_deref(), Some("E"));
			assert_eq!(points[4].y, Some(50.0));
		}
		ChartSeries::Values(_) => panic!("expected points"),
	}
}

#[test]
fn test_default_preview_requires_both_kinds() {
	let numeric_only = test_records(serde_json::json!([{ "sales": 10 }]));
	assert_eq!(default_preview(&numeric_only), None);
	let categorical_only = test_records(serde_json::json!([{ "city": "A" }]));
	assert_eq!(default_preview(&categorical_only), None);
	assert_eq!(default_preview(&[]), None);
}

#[test]
fn test_custom_chart_histogram_ignores_x() {
	let records = test_records(serde_json::json!([
		{ "sales": 10, "count": 1 },
		{ "sales": 20, "count": 2 },
	]));
	let spec = custom_chart(&records, "count", "sales", ChartKind::Histogram).unwrap();
	assert_eq!(spec.x_column, None);
	assert_eq!(spec.y_column, "sales");
	assert_eq!(
		spec.series,
		ChartSeries::Values(vec![Some(10.0), Some(20.0)])
	);
	assert_eq!(spec.layout.title, "histogram of sales");
}

#[test]
fn test_custom_chart_pairs_rows() {
	let records = test_records(serde_json::json!([
		{ "sales": 10, "count": 1 },
		{ "sales": null, "count": 2 },
		{ "count": 3 },
	]));
	let spec = custom_chart(&records, "count", "sales", ChartKind::Line).unwrap();
	assert_eq!(spec.x_column.as_deref(), Some("count"));
	match &spec.series {
		ChartSeries::Points(points) => {
			assert_eq!(points.len(), 3);
			assert_eq!(points[0].x, Some(1.0));
			assert_eq!(points[0].y, Some(10.0));
			assert_eq!(points[1].y, None);
			assert_eq!(points[2].y, None);
		}
		ChartSeries::Values(_) => panic!("expected points"),
	}
	assert_eq!(spec.layout.title, "line chart of sales vs count");
}

#[test]
fn test_custom_chart_errors() {
	let records = test_records(serde_json::json!([{ "sales": 10 }]));
	assert_eq!(
		custom_chart(&records, "", "sales", ChartKind::Bar),
		Err(ChartError::MissingAxis)
	);
	assert_eq!(
		custom_chart(&records, "sales", "", ChartKind::Bar),
		Err(ChartError::MissingAxis)
	);
	assert_eq!(
		custom_chart(&[], "sales", "sales", ChartKind::Bar),
		Err(ChartError::NoRecords)
	);
}

#[test]
fn test_mean_chart() {
	let records = test_records(serde_json::json!([
		{ "city": "A", "sales": 10 },
		{ "city": "B", "sales": 30 },
		{ "city": "A", "sales": 20 },
	]));
	let spec = mean_chart(&records, "city", "sales").unwrap();
	assert_eq!(spec.kind, ChartKind::Bar);
	assert_eq!(spec.layout.title, "mean sales by city");
	match &spec.series {
		ChartSeries::Points(points) => {
			assert_eq!(points[0].label.as_deref(), Some("A"));
			assert_eq!(points[0].y, Some(15.0));
			assert_eq!(points[1].label.as_deref(), Some("B"));
			assert_eq!(points[1].y, Some(30.0));
		}
		ChartSeries::Values(_) => panic!("expected points"),
	}
}
