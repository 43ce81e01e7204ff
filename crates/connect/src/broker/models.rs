//! Kite Connect wire models and account credentials.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mfolio_core::errors::{Error, Result};
use mfolio_core::funds::RawHolding;

/// API key and secret of one Kite Connect app.
#[derive(Clone, PartialEq, Eq)]
pub struct KiteCredentials {
    pub api_key: String,
    pub api_secret: String,
}

impl KiteCredentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }
}

impl fmt::Debug for KiteCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KiteCredentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// Envelope wrapping every Kite Connect response.
#[derive(Debug, Deserialize)]
pub struct KiteEnvelope<T> {
    pub status: String,
    pub data: Option<T>,
    pub message: Option<String>,
    #[serde(default)]
    pub error_type: Option<String>,
}

impl<T> KiteEnvelope<T> {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    /// Human readable failure reason.
    pub fn error_message(&self) -> String {
        match (&self.error_type, &self.message) {
            (Some(kind), Some(message)) => format!("{}: {}", kind, message),
            (None, Some(message)) => message.clone(),
            (Some(kind), None) => kind.clone(),
            (None, None) => format!("status {}", self.status),
        }
    }
}

/// `data` of a successful `/session/token` call.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KiteSession {
    pub access_token: String,
    #[serde(default)]
    pub public_token: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// One entry of `/mf/holdings`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KiteMfHolding {
    #[serde(default)]
    pub folio: Option<String>,
    pub fund: String,
    pub tradingsymbol: String,
    pub quantity: f64,
    #[serde(default)]
    pub average_price: Option<f64>,
    #[serde(default)]
    pub last_price: Option<f64>,
}

impl TryFrom<KiteMfHolding> for RawHolding {
    type Error = Error;

    fn try_from(holding: KiteMfHolding) -> Result<Self> {
        let quantity = Decimal::try_from(holding.quantity).map_err(|e| {
            Error::HoldingsFetchFailed(format!(
                "invalid quantity {} for {}: {}",
                holding.quantity, holding.tradingsymbol, e
            ))
        })?;
        if quantity.is_sign_negative() && !quantity.is_zero() {
            return Err(Error::HoldingsFetchFailed(format!(
                "negative quantity {} for {}",
                holding.quantity, holding.tradingsymbol
            )));
        }

        Ok(RawHolding {
            fund: holding.fund,
            trading_symbol: holding.tradingsymbol,
            quantity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_holdings_envelope() {
        let body = r#"{
            "status": "success",
            "data": [{
                "folio": "123123/123",
                "fund": "Kotak Select Focus Fund - Direct Plan",
                "tradingsymbol": "INF174K01LS2",
                "average_price": 30.729,
                "last_price": 33.014,
                "last_price_date": "2026-10-17",
                "pnl": 3.2,
                "quantity": 1.2
            }]
        }"#;
        let envelope: KiteEnvelope<Vec<KiteMfHolding>> = serde_json::from_str(body).unwrap();
        assert!(envelope.is_success());

        let holdings = envelope.data.unwrap();
        let raw = RawHolding::try_from(holdings[0].clone()).unwrap();
        assert_eq!(raw.fund, "Kotak Select Focus Fund - Direct Plan");
        assert_eq!(raw.trading_symbol, "INF174K01LS2");
        assert_eq!(raw.quantity, dec!(1.2));
    }

    #[test]
    fn test_error_envelope() {
        let body = r#"{"status":"error","message":"Invalid `checksum`.","data":null,"error_type":"TokenException"}"#;
        let envelope: KiteEnvelope<KiteSession> = serde_json::from_str(body).unwrap();
        assert!(!envelope.is_success());
        assert_eq!(
            envelope.error_message(),
            "TokenException: Invalid `checksum`."
        );
    }

    #[test]
    fn test_negative_quantity_is_rejected() {
        let holding = KiteMfHolding {
            folio: None,
            fund: "X".to_string(),
            tradingsymbol: "Y".to_string(),
            quantity: -1.0,
            average_price: None,
            last_price: None,
        };
        assert!(matches!(
            RawHolding::try_from(holding),
            Err(Error::HoldingsFetchFailed(_))
        ));
    }

    #[test]
    fn test_credentials_debug_hides_secret() {
        let creds = KiteCredentials::new("key", "very-secret");
        let printed = format!("{:?}", creds);
        assert!(printed.contains("key"));
        assert!(!printed.contains("very-secret"));
    }
}
