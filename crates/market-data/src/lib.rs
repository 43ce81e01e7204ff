//! mfolio Market Data Crate
//!
//! This crate fetches and reads the public daily NAV catalog used to price
//! mutual fund holdings.
//!
//! # Overview
//!
//! ```text
//! +------------------+     +------------------+     +------------------+
//! | NavFeedProvider  | --> |   Vec<String>    | --> |    parse_nav     |
//! |  (AMFI over TLS) |     |  (catalog lines) |     | (symbol -> NAV)  |
//! +------------------+     +------------------+     +------------------+
//! ```
//!
//! The feed is fetched fresh for every valuation; nothing is cached.

pub mod errors;
pub mod parser;
pub mod provider;

pub use errors::MarketDataError;
pub use parser::{parse_nav, NAV_FIELD_INDEX, NAV_FIELD_SEPARATOR};
pub use provider::amfi::{AmfiNavProvider, AMFI_NAV_URL};
pub use provider::NavFeedProvider;
