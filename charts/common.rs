#[derive(serde::Deserialize, serde::Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartLayout {
	pub title: String,
	pub x_axis_title: Option<String>,
	pub y_axis_title: Option<String>,
}
