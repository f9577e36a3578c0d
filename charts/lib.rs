/*!
This crate defines the chart specification value objects handed to a plotting
backend: the chart kind, the column bindings, the series data, and the layout
metadata. It owns no drawing; a render sink consumes the serialized specs and
is responsible for all presentation.
*/

mod chart;
mod common;

pub use self::chart::*;
pub use self::common::*;
