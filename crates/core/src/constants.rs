/// Symbol marking a fund that is not priced from the NAV feed.
pub const UNPRICED_SYMBOL: &str = "NA";

/// Name suffix of unpriced funds whose units are a count of elapsed months.
pub const MONTHLY_NAME_SUFFIX: &str = "monthly";
