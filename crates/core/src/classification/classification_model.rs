use serde::{Deserialize, Serialize};

use crate::funds::{Account, AssetClass};

/// What happens to a holding matched by a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuleAction {
    #[default]
    Include,
    Drop,
}

/// One classification rule.
///
/// A rule applies to holdings fetched under `account` whose fund name
/// contains `pattern` (case-sensitive). A rule without a pattern matches
/// every name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRule {
    pub account: Account,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    pub class: AssetClass,
    #[serde(default)]
    pub action: RuleAction,
}

impl ClassificationRule {
    pub fn include(account: Account, pattern: Option<&str>, class: AssetClass) -> Self {
        Self {
            account,
            pattern: pattern.map(str::to_string),
            class,
            action: RuleAction::Include,
        }
    }

    pub fn matches(&self, account: Account, fund_name: &str) -> bool {
        self.account == account
            && self
                .pattern
                .as_deref()
                .map_or(true, |pattern| fund_name.contains(pattern))
    }
}
