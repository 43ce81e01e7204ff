//! Classification module - routes broker holdings to asset classes.

mod classification_model;
mod classification_service;

pub use classification_model::{ClassificationRule, RuleAction};
pub use classification_service::ClassificationRules;
