//! mfolio Connect - broker login and holdings sync.
//!
//! This crate wraps the Kite Connect API used to log in to each broker
//! account and list its mutual fund holdings, and the service that turns a
//! successful login into a saved snapshot.

pub mod broker;
pub mod client;

// Re-export commonly used types
pub use broker::{
    BrokerApiClient, HoldingsSyncService, HoldingsSyncServiceTrait, KiteCredentials,
    KiteEnvelope, KiteMfHolding, KiteSession,
};
pub use client::{session_checksum, KiteApiClient, DEFAULT_KITE_API_URL, DEFAULT_KITE_LOGIN_URL};
