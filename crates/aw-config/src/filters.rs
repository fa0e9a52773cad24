use serde::Deserialize;

/// Baseline structural filters applied to every rule. All fields have
/// defaults so the entire `[global_filters]` section may be omitted.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GlobalFilters {
    /// Listing types to accept (e.g. `"fixed_price"`, `"auction"`). Empty
    /// means every type is accepted.
    pub listing_types: Vec<String>,
    /// Destinations the listing must ship to. Empty means no constraint.
    pub ships_to: Vec<String>,
    /// Listing statuses to drop before rule evaluation.
    pub exclude_status: Vec<String>,
    /// Minimum seller reputation score. Listings without a reputation value
    /// are not rejected by this check.
    pub min_seller_reputation: Option<i64>,
}

impl Default for GlobalFilters {
    fn default() -> Self {
        Self {
            listing_types: Vec::new(),
            ships_to: Vec::new(),
            exclude_status: vec![
                "sold".to_string(),
                "expired".to_string(),
                "deleted".to_string(),
            ],
            min_seller_reputation: None,
        }
    }
}

/// Per-rule filter overrides from a `[rules.filters]` table. A field that is
/// present replaces the global value for that dimension entirely; an absent
/// field inherits the global value. In particular `exclude_status = []`
/// clears the global exclusion list rather than merging with it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleFilters {
    pub listing_types: Option<Vec<String>>,
    pub ships_to: Option<Vec<String>>,
    pub exclude_status: Option<Vec<String>>,
    pub min_seller_reputation: Option<i64>,
}
