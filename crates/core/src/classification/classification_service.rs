use log::debug;

use crate::errors::{Error, Result, ValidationError};
use crate::funds::{Account, AssetClass, RawHolding, StoredFund};

use super::{ClassificationRule, RuleAction};

/// Ordered list of classification rules.
///
/// Rules are evaluated in order for each holding and the first match
/// decides. A holding matched by no rule is dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationRules {
    rules: Vec<ClassificationRule>,
}

impl Default for ClassificationRules {
    /// Everything in the equity account is equity. The debt account keeps
    /// liquid funds as debt and gold ETF funds as gold.
    fn default() -> Self {
        Self::new(vec![
            ClassificationRule::include(Account::Equity, None, AssetClass::Equity),
            ClassificationRule::include(Account::Debt, Some("LIQUID FUND"), AssetClass::Debt),
            ClassificationRule::include(Account::Debt, Some("GOLD ETF FUND"), AssetClass::Gold),
        ])
    }
}

impl ClassificationRules {
    pub fn new(rules: Vec<ClassificationRule>) -> Self {
        Self { rules }
    }

    /// Parse a JSON array of rules.
    pub fn from_json(json: &str) -> Result<Self> {
        let rules: Vec<ClassificationRule> = serde_json::from_str(json).map_err(|e| {
            Error::Validation(ValidationError::InvalidInput(format!(
                "invalid classification rules: {}",
                e
            )))
        })?;
        if rules.is_empty() {
            return Err(ValidationError::InvalidInput(
                "classification rules must not be empty".to_string(),
            )
            .into());
        }
        Ok(Self::new(rules))
    }

    pub fn rules(&self) -> &[ClassificationRule] {
        &self.rules
    }

    /// Class of a single holding, or `None` when it is dropped.
    pub fn classify_one(&self, account: Account, fund_name: &str) -> Option<AssetClass> {
        let rule = self
            .rules
            .iter()
            .find(|rule| rule.matches(account, fund_name))?;
        match rule.action {
            RuleAction::Include => Some(rule.class),
            RuleAction::Drop => None,
        }
    }

    /// Classify every holding fetched under `account`.
    pub fn classify(&self, account: Account, holdings: Vec<RawHolding>) -> Vec<StoredFund> {
        holdings
            .into_iter()
            .filter_map(|holding| match self.classify_one(account, &holding.fund) {
                Some(class) => Some(StoredFund::from_holding(holding, class)),
                None => {
                    debug!(
                        "[Classifier] Dropping '{}' from {} account",
                        holding.fund, account
                    );
                    None
                }
            })
            .collect()
    }
}
