/// Formats a value the way the summary cards display it, with exactly two
/// decimal places.
pub fn format_number(value: f64) -> String {
	format!("{:.2}", value)
}

#[test]
fn test_format_number() {
	assert_eq!(format_number(20.0), "20.00");
	assert_eq!(format_number(10.0), "10.00");
	assert_eq!(format_number(0.126), "0.13");
	assert_eq!(format_number(-3.5), "-3.50");
}
