//! This module contains the main entrypoint to the vantage cli.

use clap::Parser;
use colored::Colorize;
use url::Url;
use vantage_charts::{ChartKind, ChartSeries, ChartSpec};
use vantage_core::{Dashboard, Session};
use vantage_util::{err, error::Result, format::format_number, table::Table};

#[derive(Parser)]
#[clap(
	about = "Explore a json records endpoint as a filterable dashboard.",
	disable_help_subcommand = true
)]
enum Options {
	#[clap(name = "view")]
	View(ViewOptions),
	#[clap(name = "app")]
	App(AppOptions),
}

#[derive(Parser, Debug)]
#[clap(about = "view a dashboard once")]
#[clap(long_about = "fetch json records once and print the dashboard views as text")]
struct ViewOptions {
	#[clap(long, help = "the url of the json records endpoint")]
	url: Url,
	#[clap(
		long,
		help = "the x column of a custom chart",
		requires = "y"
	)]
	x: Option<String>,
	#[clap(long, help = "the y column of a custom chart", requires = "x")]
	y: Option<String>,
	#[clap(
		long,
		help = "the custom chart kind, one of bar, line, scatter, histogram",
		requires = "y"
	)]
	kind: Option<ChartKind>,
	#[clap(long, help = "print json instead of text")]
	json: bool,
}

#[derive(Parser)]
#[clap(about = "run the app")]
#[clap(long_about = "run the dashboard web app")]
struct AppOptions {
	#[clap(long, default_value = "0.0.0.0")]
	host: std::net::IpAddr,
	#[clap(long, env = "PORT", default_value = "8080")]
	port: u16,
	#[clap(
		long,
		env = "SOURCE_URL",
		help = "the url of a json records endpoint to load at startup"
	)]
	url: Option<Url>,
}

fn main() {
	let options = Options::parse();
	let result = match options {
		Options::View(options) => cli_view(options),
		Options::App(options) => cli_app(options),
	};
	if let Err(error) = result {
		eprintln!("{}: {}", "error".red().bold(), error);
		std::process::exit(1);
	}
}

fn cli_view(options: ViewOptions) -> Result<()> {
	let records = vantage_app::provider::fetch_records_blocking(&options.url)?;
	let mut session = Session::new();
	let dashboard = session.load(records);
	if let (Some(x_field), Some(y_field)) = (&options.x, &options.y) {
		let kind = options.kind.unwrap_or(ChartKind::Bar);
		let spec = session.custom_chart(x_field, y_field, kind)?;
		if options.json {
			println!("{}", serde_json::to_string_pretty(&spec)?);
		} else {
			print_chart(&spec);
		}
		return Ok(());
	}
	if options.json {
		println!("{}", serde_json::to_string_pretty(&dashboard)?);
	} else {
		print_dashboard(&dashboard);
	}
	Ok(())
}

fn cli_app(options: AppOptions) -> Result<()> {
	if let Some(url) = &options.url {
		if url.scheme() != "http" && url.scheme() != "https" {
			return Err(err!("SOURCE_URL must be an http or https url"));
		}
	}
	vantage_app::run(vantage_app::Options {
		host: options.host,
		port: options.port,
		source_url: options.url,
	})
}

fn print_dashboard(dashboard: &Dashboard) {
	println!("{} records", dashboard.row_count);
	match &dashboard.summary {
		Some(cards) => {
			println!();
			for card in cards {
				println!("max {}: {}", card.column, card.formatted);
			}
		}
		None => println!("no numeric columns to summarize"),
	}
	if !dashboard.filters.is_empty() {
		println!();
		for filter in &dashboard.filters {
			println!("{}: {}", filter.column, filter.options.join(", "));
		}
	}
	match &dashboard.table {
		Some(table) => {
			println!();
			print!("{}", Table::new(&table.columns, &table.rows));
		}
		None => println!("no records to tabulate"),
	}
	if let Some(spec) = &dashboard.preview_chart {
		println!();
		print_chart(spec);
	}
	if let Some(specs) = &dashboard.mean_charts {
		for spec in specs {
			println!();
			print_chart(spec);
		}
	}
}

const CHART_WIDTH: usize = 40;

fn print_chart(spec: &ChartSpec) {
	println!("{}", spec.layout.title);
	let (y_min, y_max) = spec.y_bounds();
	let range = y_max - y_min;
	let labels: Vec<String> = match &spec.series {
		ChartSeries::Points(points) => points
			.iter()
			.enumerate()
			.map(|(index, point)| match (&point.label, point.x) {
				(Some(label), _) => label.clone(),
				(None, Some(x)) => format_number(x),
				(None, None) => index.to_string(),
			})
			.collect(),
		ChartSeries::Values(values) => (0..values.len()).map(|index| index.to_string()).collect(),
	};
	let label_width = labels.iter().map(String::len).max().unwrap_or(0);
	for (label, y) in labels.iter().zip(spec.series.y_values()) {
		match y {
			Some(y) => {
				let filled = (((y - y_min) / range) * CHART_WIDTH as f64).round() as usize;
				println!(
					"{:>width$} | {} {}",
					label,
					"#".repeat(filled),
					format_number(y),
					width = label_width
				);
			}
			None => println!("{:>width$} |", label, width = label_width),
		}
	}
}

#[test]
fn test_view_chart_columns_require_each_other() {
	let result = Options::try_parse_from([
		"vantage",
		"view",
		"--url",
		"http://localhost/records",
		"--y",
		"sales",
	]);
	assert!(result.is_err());
	let result = Options::try_parse_from([
		"vantage",
		"view",
		"--url",
		"http://localhost/records",
		"--x",
		"city",
	]);
	assert!(result.is_err());
	let result = Options::try_parse_from([
		"vantage",
		"view",
		"--url",
		"http://localhost/records",
		"--x",
		"city",
		"--y",
		"sales",
		"--kind",
		"histogram",
	]);
	assert!(result.is_ok());
}
