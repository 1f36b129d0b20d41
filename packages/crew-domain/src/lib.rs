pub mod signals;
pub mod tokens;

pub use signals::{
	PatternSignalExtractor, QuerySignalExtractor, QuerySignals, parse_requested_years,
};
