use crate::common::ChartLayout;
use std::cmp::Ordering;
use thiserror::Error;

#[derive(serde::Deserialize, serde::Serialize, Clone, Copy, Debug, Eq, PartialEq)]
pub enum ChartKind {
	#[serde(rename = "bar")]
	Bar,
	#[serde(rename = "line")]
	Line,
	#[serde(rename = "scatter")]
	Scatter,
	#[serde(rename = "histogram")]
	Histogram,
}

impl ChartKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			ChartKind::Bar => "bar",
			ChartKind::Line => "line",
			ChartKind::Scatter => "scatter",
			ChartKind::Histogram => "histogram",
		}
	}
}

#[derive(Debug, Error)]
#[error("unknown chart kind {0:?}")]
pub struct UnknownChartKindError(pub String);

impl std::str::FromStr for ChartKind {
	type Err = UnknownChartKindError;
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"bar" => Ok(ChartKind::Bar),
			"line" => Ok(ChartKind::Line),
			"scatter" => Ok(ChartKind::Scatter),
			"histogram" => Ok(ChartKind::Histogram),
			_ => Err(UnknownChartKindError(s.to_owned())),
		}
	}
}

/// A chart specification is an immutable value object: the chart kind, the
/// column bindings, the series data, and the layout metadata. It is produced
/// on demand and never cached.
#[derive(serde::Deserialize, serde::Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
	pub kind: ChartKind,
	pub x_column: Option<String>,
	pub y_column: String,
	pub series: ChartSeries,
	pub layout: ChartLayout,
}

#[derive(serde::Deserialize, serde::Serialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum ChartSeries {
	/// Paired (x, y) points in row order.
	Points(Vec<ChartPoint>),
	/// A single variable's values, the input to a histogram.
	Values(Vec<Option<f64>>),
}

#[derive(serde::Deserialize, serde::Serialize, Clone, Debug, PartialEq)]
pub struct ChartPoint {
	pub label: Option<String>,
	pub x: Option<f64>,
	pub y: Option<f64>,
}

impl ChartSeries {
	pub fn len(&self) -> usize {
		match self {
			ChartSeries::Points(points) => points.len(),
			ChartSeries::Values(values) => values.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		match self {
			ChartSeries::Points(points) => points.is_empty(),
			ChartSeries::Values(values) => values.is_empty(),
		}
	}

	pub fn y_values(&self) -> Box<dyn Iterator<Item = Option<f64>> + '_> {
		match self {
			ChartSeries::Points(points) => Box::new(points.iter().map(|point| point.y)),
			ChartSeries::Values(values) => Box::new(values.iter().copied()),
		}
	}
}

impl ChartSpec {
	/// Computes the y axis bounds for this spec's series. The bounds are
	/// anchored at zero and widened by one when the series is flat, so a
	/// render sink always has a non-degenerate range to draw into.
	pub fn y_bounds(&self) -> (f64, f64) {
		let y_min = 0.0f64.min(
			self.series
				.y_values()
				.map(|y| y.unwrap_or(f64::INFINITY))
				.min_by(|a, b| a.partial_cmp(b).unwrap())
				.unwrap_or(0.0),
		);
		let mut y_max = 0.0f64.max(
			self.series
				.y_values()
				.map(|y| y.unwrap_or(f64::NEG_INFINITY))
				.max_by(|a, b| a.partial_cmp(b).unwrap())
				.unwrap_or(0.0),
		);
		if let Some(Ordering::Equal) = y_max.partial_cmp(&y_min) {
			y_max = y_min + 1.0;
		}
		(y_min, y_max)
	}
}

#[cfg(test)]
fn test_spec(series: ChartSeries) -> ChartSpec {
	ChartSpec {
		kind: ChartKind::Bar,
		x_column: Some("city".to_owned()),
		y_column: "sales".to_owned(),
		series,
		layout: ChartLayout {
			title: "test".to_owned(),
			x_axis_title: None,
			y_axis_title: None,
		},
	}
}

#[test]
fn test_y_bounds() {
	let spec = test_spec(ChartSeries::Values(vec![Some(10.0), Some(20.0), None]));
	assert_eq!(spec.y_bounds(), (0.0, 20.0));
	let spec = test_spec(ChartSeries::Values(vec![Some(-5.0), Some(3.0)]));
	assert_eq!(spec.y_bounds(), (-5.0, 3.0));
	let spec = test_spec(ChartSeries::Values(vec![Some(0.0), Some(0.0)]));
	assert_eq!(spec.y_bounds(), (0.0, 1.0));
	let spec = test_spec(ChartSeries::Values(Vec::new()));
	assert_eq!(spec.y_bounds(), (0.0, 1.0));
}

#[test]
fn test_chart_kind_from_str() {
	assert_eq!("histogram".parse::<ChartKind>().unwrap(), ChartKind::Histogram);
	assert!("pie".parse::<ChartKind>().is_err());
}

#[test]
fn test_series_serialization() {
	let series = ChartSeries::Values(vec![Some(10.0), Some(20.0)]);
	let json = serde_json::to_value(&series).unwrap();
	assert_eq!(json, serde_json::json!([10.0, 20.0]));
	let series = ChartSeries::Points(vec![ChartPoint {
		label: Some("A".to_owned()),
		x: Some(0.0),
		y: Some(10.0),
	}]);
	let json = serde_json::to_value(&series).unwrap();
	assert_eq!(
		json,
		serde_json::json!([{"label": "A", "x": 0.0, "y": 10.0}])
	);
}
