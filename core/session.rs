use crate::{
	chart::{self, ChartError},
	filter::{distinct_values, FilterState},
	record::Record,
	schema::Schema,
	view::{self, AxisOptions, SummaryCard, TableView},
};
use vantage_charts::{ChartKind, ChartSpec};

/// A session owns one loaded record set and the durable state layered on
/// top of it: the per-column filter selections and the table column picks.
/// Every view is derived from the original records and that state, so a
/// command handler mutates the state and rebuilds the whole dashboard
/// rather than patching views in place.
#[derive(Clone, Debug, Default)]
pub struct Session {
	original: Vec<Record>,
	filters: FilterState,
	table_columns: Option<Vec<String>>,
}

/// Everything a rendering surface needs to draw the dashboard. Each
/// optional section is `None` when the current record set cannot support
/// it, which the surface must render as an explicit no-data state.
#[derive(serde::Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
	pub row_count: usize,
	pub summary: Option<Vec<SummaryCard>>,
	pub filters: Vec<FilterControl>,
	pub table: Option<TableView>,
	pub preview_chart: Option<ChartSpec>,
	pub mean_charts: Option<Vec<ChartSpec>>,
	pub axis_options: AxisOptions,
}

/// One multi-select filter control. `options` lists the values present in
/// the records currently shown, and `selected` is the subset of those that
/// are selected, so both narrow along with the data.
#[derive(serde::Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FilterControl {
	pub column: String,
	pub options: Vec<String>,
	pub selected: Vec<String>,
}

impl Session {
	pub fn new() -> Session {
		Session::default()
	}

	/// Replaces the loaded record set. Filter state is rebuilt from scratch
	/// with everything selected and the table column picks are cleared, so
	/// the dashboard for a fresh load always shows every record.
	pub fn load(&mut self, records: Vec<Record>) -> Dashboard {
		self.filters = FilterState::build(&records);
		self.original = records;
		self.table_columns = None;
		self.dashboard()
	}

	/// Replaces the selection for one filter column and rebuilds the
	/// dashboard. Filtering always starts over from the original records,
	/// so widening a selection brings records back.
	pub fn set_filter(&mut self, column: &str, values: Vec<String>) -> Dashboard {
		self.filters.set_selected(column, values);
		self.dashboard()
	}

	/// Restricts the table to the named columns, or restores every column
	/// when passed `None`.
	pub fn set_table_columns(&mut self, columns: Option<Vec<String>>) -> Dashboard {
		self.table_columns = columns;
		self.dashboard()
	}

	/// Builds a chart of the caller's choosing over the filtered records.
	pub fn custom_chart(
		&self,
		x_field: &str,
		y_field: &str,
		kind: ChartKind,
	) -> Result<ChartSpec, ChartError> {
		chart::custom_chart(&self.filtered(), x_field, y_field, kind)
	}

	/// The records that pass the current filter selections.
	pub fn filtered(&self) -> Vec<Record> {
		self.filters.apply(&self.original)
	}

	/// Derives the complete dashboard from the current state. The schema is
	/// re-inferred from the filtered records, so filtering out the first
	/// record can reclassify columns, and filtering out everything empties
	/// every section.
	pub fn dashboard(&self) -> Dashboard {
		let filtered = self.filtered();
		let schema = Schema::infer(&filtered);
		Dashboard {
			row_count: filtered.len(),
			summary: view::summarize(&filtered),
			filters: self.filter_controls(&filtered),
			table: self.table(&filtered),
			preview_chart: chart::default_preview(&filtered),
			mean_charts: mean_charts(&filtered, &schema),
			axis_options: view::axis_options(&schema),
		}
	}

	fn filter_controls(&self, filtered: &[Record]) -> Vec<FilterControl> {
		self.filters
			.filters
			.iter()
			.map(|filter| {
				let options = distinct_values(filtered, &filter.column);
				let selected = options
					.iter()
					.filter(|option| filter.selected.contains(option.as_str()))
					.cloned()
					.collect();
				FilterControl {
					column: filter.column.clone(),
					options,
					selected,
				}
			})
			.collect()
	}

	fn table(&self, filtered: &[Record]) -> Option<TableView> {
		let table = view::tabulate(filtered)?;
		match &self.table_columns {
			Some(columns) => Some(table.select_columns(columns)),
			None => Some(table),
		}
	}
}

/// One mean bar chart per numeric column, each grouped by the first
/// categorical column. `None` when the record set lacks either kind of
/// column.
fn mean_charts(filtered: &[Record], schema: &Schema) -> Option<Vec<ChartSpec>> {
	let category = schema.categorical_columns.first()?;
	let charts: Vec<ChartSpec> = schema
		.numeric_columns
		.iter()
		.filter_map(|numeric| chart::mean_chart(filtered, category, numeric))
		.collect();
	if charts.is_empty() {
		None
	} else {
		Some(charts)
	}
}

#[cfg(test)]
use crate::record::test_records;
#[cfg(test)]
use vantage_charts::ChartSeries;

#[cfg(test)]
fn test_session() -> Session {
	let mut session = Session::new();
	session.load(test_records(serde_json::json!([
		{ "city": "A", "sales": 10 },
		{ "city": "B", "sales": 20 },
		{ "city": "A", "sales": 30 },
	])));
	session
}

#[test]
fn test_load() {
	let mut session = Session::new();
	let dashboard = session.load(test_records(serde_json::json!([
		{ "city": "A", "sales": 10 },
		{ "city": "B", "sales": 20 },
	])));
	assert_eq!(dashboard.row_count, 2);
	let summary = dashboard.summary.unwrap();
	assert_eq!(summary[0].column, "sales");
	assert_eq!(summary[0].formatted, "20.00");
	assert_eq!(dashboard.filters.len(), 1);
	assert_eq!(dashboard.filters[0].options, dashboard.filters[0].selected);
	assert_eq!(dashboard.table.unwrap().rows.len(), 2);
	assert!(dashboard.preview_chart.is_some());
	assert_eq!(dashboard.mean_charts.unwrap().len(), 1);
	assert_eq!(dashboard.axis_options.x, vec!["sales".to_owned()]);
}

#[test]
fn test_load_empty() {
	let mut session = Session::new();
	let dashboard = session.load(Vec::new());
	assert_eq!(dashboard.row_count, 0);
	assert_eq!(dashboard.summary, None);
	assert!(dashboard.filters.is_empty());
	assert_eq!(dashboard.table, None);
	assert_eq!(dashboard.preview_chart, None);
	assert_eq!(dashboard.mean_charts, None);
	assert!(dashboard.axis_options.x.is_empty());
}

#[test]
fn test_set_filter() {
	let mut session = test_session();
	let dashboard = session.set_filter("city", vec!["A".to_owned()]);
	assert_eq!(dashboard.row_count, 2);
	let summary = dashboard.summary.unwrap();
	assert_eq!(summary[0].formatted, "30.00");
	// The control narrows to the values still shown.
	assert_eq!(dashboard.filters[0].options, vec!["A".to_owned()]);
	assert_eq!(dashboard.filters[0].selected, vec!["A".to_owned()]);
	let table = dashboard.table.unwrap();
	assert_eq!(table.rows.len(), 2);
	assert_eq!(table.rows[0][0], "A");
	// Widening starts over from the original records.
	let dashboard = session.set_filter("city", vec!["A".to_owned(), "B".to_owned()]);
	assert_eq!(dashboard.row_count, 3);
}

#[test]
fn test_set_filter_to_single_value() {
	let mut session = Session::new();
	session.load(test_records(serde_json::json!([
		{ "city": "A", "sales": 10 },
		{ "city": "B", "sales": 20 },
	])));
	let dashboard = session.set_filter("city", vec!["A".to_owned()]);
	assert_eq!(dashboard.row_count, 1);
	assert_eq!(dashboard.summary.unwrap()[0].formatted, "10.00");
}

#[test]
fn test_set_filter_to_nothing() {
	let mut session = test_session();
	let dashboard = session.set_filter("city", Vec::new());
	assert_eq!(dashboard.row_count, 0);
	assert_eq!(dashboard.summary, None);
	assert_eq!(dashboard.table, None);
	assert_eq!(dashboard.preview_chart, None);
	assert_eq!(dashboard.mean_charts, None);
	assert!(dashboard.filters[0].options.is_empty());
	assert!(dashboard.axis_options.y.is_empty());
}

#[test]
fn test_set_table_columns() {
	let mut session = test_session();
	let dashboard = session.set_table_columns(Some(vec!["sales".to_owned()]));
	let table = dashboard.table.unwrap();
	assert_eq!(table.columns, vec!["sales".to_owned()]);
	assert_eq!(table.rows[0], vec!["10".to_owned()]);
	let dashboard = session.set_table_columns(None);
	assert_eq!(dashboard.table.unwrap().columns.len(), 2);
}

#[test]
fn test_custom_chart_uses_filtered_records() {
	let mut session = test_session();
	session.set_filter("city", vec!["B".to_owned()]);
	let spec = session
		.custom_chart("sales", "sales", ChartKind::Histogram)
		.unwrap();
	assert_eq!(spec.series, ChartSeries::Values(vec![Some(20.0)]));
	session.set_filter("city", Vec::new());
	assert_eq!(
		session.custom_chart("sales", "sales", ChartKind::Histogram),
		Err(ChartError::NoRecords)
	);
}

#[test]
fn test_load_resets_state() {
	let mut session = test_session();
	session.set_filter("city", Vec::new());
	session.set_table_columns(Some(vec!["sales".to_owned()]));
	let dashboard = session.load(test_records(serde_json::json!([
		{ "region": "East", "total": 5 },
	])));
	assert_eq!(dashboard.row_count, 1);
	assert_eq!(dashboard.filters[0].column, "region");
	assert_eq!(dashboard.filters[0].selected, vec!["East".to_owned()]);
	let table = dashboard.table.unwrap();
	assert_eq!(table.columns, vec!["region".to_owned(), "total".to_owned()]);
}

#[test]
fn test_reclassification_follows_filtered_records() {
	// After filtering, the first surviving record is the exemplar, so a
	// column can change class when the old exemplar is filtered out.
	let mut session = Session::new();
	session.load(test_records(serde_json::json!([
		{ "city": "A", "sales": 10 },
		{ "city": "B", "sales": "n/a" },
	])));
	let dashboard = session.set_filter("city", vec!["B".to_owned()]);
	assert!(dashboard.axis_options.y.is_empty());
	assert_eq!(dashboard.summary, None);
	assert_eq!(dashboard.preview_chart, None);
}
