//! Presentation layer: turns a `ResultTable` into chart and CSV output

mod format;
mod line;
mod export;

pub use format::CurrencyFormat;
pub use line::{ChartData, ChartOptions, Dataset, LineChart, Title, DEFAULT_TITLE};
pub use export::write_csv;
