pub struct Table<'a> {
	padding: usize,
	header: &'a [String],
	rows: &'a [Vec<String>],
}

impl<'a> Table<'a> {
	pub fn new(header: &'a [String], rows: &'a [Vec<String>]) -> Self {
		Self {
			padding: 1,
			header,
			rows,
		}
	}
}

impl<'a> std::fmt::Display for Table<'a> {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		let n_columns = self.header.len();
		let mut column_widths: Vec<_> = vec![0; n_columns];
		// update column widths with header
		column_widths
			.iter_mut()
			.zip(self.header)
			.for_each(|(column_width, header)| *column_width = header.len());
		// update column widths with values
		for row in self.rows {
			column_widths
				.iter_mut()
				.zip(row)
				.for_each(|(column_width, value)| {
					*column_width = usize::max(*column_width, value.len());
				});
		}
		// write header
		let line = Line {
			column_widths: &column_widths,
			padding: self.padding,
		};
		let row = Row {
			column_widths: &column_widths,
			padding: self.padding,
			values: self.header,
		};
		writeln!(f, "{}", row)?;
		writeln!(f, "{}", line)?;
		// write values
		for row in self.rows {
			let row = Row {
				column_widths: &column_widths,
				padding: self.padding,
				values: row,
			};
			writeln!(f, "{}", row)?;
		}
		Ok(())
	}
}

struct Line<'a> {
	column_widths: &'a [usize],
	padding: usize,
}

impl<'a> std::fmt::Display for Line<'a> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "|")?;
		for column_width in self.column_widths.iter() {
			for _ in 0..column_width + 2 * self.padding {
				write!(f, "-")?;
			}
			write!(f, "|")?;
		}
		Ok(())
	}
}

struct Row<'a> {
	column_widths: &'a [usize],
	padding: usize,
	values: &'a [String],
}

impl<'a> std::fmt::Display for Row<'a> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "|")?;
		for (column_width, value) in self.column_widths.iter().zip(self.values) {
			for _ in 0..self.padding {
				write!(f, " ")?;
			}
			write!(f, "{}", value)?;
			for _ in 0..column_width - value.len() + self.padding {
				write!(f, " ")?;
			}
			write!(f, "|")?;
		}
		Ok(())
	}
}

#[test]
fn test_table_display() {
	let header = vec!["city".to_owned(), "sales".to_owned()];
	let rows = vec![
		vec!["A".to_owned(), "10".to_owned()],
		vec!["B".to_owned(), "20".to_owned()],
	];
	let table = Table::new(&header, &rows).to_string();
	let expected = "\
| city | sales |\n\
|------|-------|\n\
| A    | 10    |\n\
| B    | 20    |\n";
	assert_eq!(table, expected);
}
