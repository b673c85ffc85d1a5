//! Market data layer — provider trait, Yahoo and synthetic implementations,
//! and the file-backed ticker universe.

pub mod provider;
pub mod synthetic;
pub mod universe;
pub mod yahoo;

pub use provider::{
    DataError, DataSource, FetchProgress, FetchResult, MarketDataProvider, NullProgress, RawBar,
    StdoutProgress,
};
pub use synthetic::SyntheticProvider;
pub use universe::Universe;
pub use yahoo::YahooProvider;
