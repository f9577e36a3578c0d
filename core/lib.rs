/*!
This crate implements the engine behind the records dashboard: schema
inference over untyped JSON records, categorical filter state, derived
summary/table views, chart spec generation, and the session that ties them
together. Everything downstream of a loaded record set is a pure function of
the original records and the current filter selections.
*/

pub mod chart;
pub mod filter;
pub mod record;
pub mod schema;
pub mod session;
pub mod view;

pub use self::chart::{custom_chart, default_preview, mean_chart, ChartError};
pub use self::filter::{distinct_values, ColumnFilter, FilterState};
pub use self::record::{cell_text, Record};
pub use self::schema::Schema;
pub use self::session::{Dashboard, FilterControl, Session};
pub use self::view::{
	axis_options, mean_by_category, summarize, tabulate, AxisOptions, SummaryCard, TableView,
};
