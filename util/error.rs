pub use anyhow::{anyhow, bail, Error, Result};

#[macro_export]
macro_rules! err {
	($($tt:tt)*) => {
		$crate::error::anyhow!($($tt)*)
	};
}
