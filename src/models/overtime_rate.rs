//! Overtime rate configuration models.
//!
//! Overtime pay weighting is driven by a tiered rate table: each tier caps a
//! number of overtime hours and carries a multiplier. Hours beyond all tier
//! caps use the highest tier's multiplier.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One tier of the overtime rate table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeRateDetail {
    /// Tier ordering; consumed ascending.
    pub level: u32,
    /// Hour cap for this tier; `None` means uncapped.
    #[serde(default)]
    pub max_hours: Option<Decimal>,
    /// Pay multiplier applied to hours consumed by this tier.
    pub multiplier: Decimal,
}

/// A company's tiered overtime rate table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeRate {
    /// Key of the company the table applies to.
    pub company_key: String,
    /// The rate tiers, in any order; consumers sort by level.
    #[serde(default)]
    pub details: Vec<OvertimeRateDetail>,
}

impl OvertimeRate {
    /// The tiers sorted ascending by level.
    pub fn sorted_details(&self) -> Vec<OvertimeRateDetail> {
        let mut details = self.details.clone();
        details.sort_by_key(|d| d.level);
        details
    }
}
