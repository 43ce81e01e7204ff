//! NAV feed provider abstraction and the AMFI implementation.
//!
//! The valuation pipeline only needs the raw catalog lines; reading a NAV
//! out of them is the job of [`crate::parser`].

mod traits;

pub mod amfi;

pub use traits::NavFeedProvider;
