//! # Price data
//!
//! Loading of daily price CSV files and a descriptive summary of what was
//! loaded.
//!
//! ```rust,no_run
//! use stock_rnn::data::{describe, load_price_series};
//!
//! let series = load_price_series("data/AAPL.csv")?;
//! println!("{}", describe(&series));
//! # Ok::<(), stock_rnn::Error>(())
//! ```

mod loader;
mod summary;
mod types;

pub use loader::{load_price_series, parse_date, read_records, ticker_from_path};
pub use summary::{describe, quantile, ColumnStats, SeriesSummary};
pub use types::{PriceRecord, PriceSeries};
