use aw_config::{GlobalFilters, RuleFilters};

use crate::listing::Listing;

/// Filters as they apply to one rule, after merging the global layer with the
/// rule's override. Resolved once when the registry is built.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveFilters {
    pub listing_types: Vec<String>,
    pub ships_to: Vec<String>,
    pub exclude_status: Vec<String>,
    pub min_seller_reputation: Option<i64>,
}

impl EffectiveFilters {
    /// Merge per dimension: a dimension present in the override replaces the
    /// global value outright, even when the override list is empty.
    pub fn resolve(global: &GlobalFilters, overrides: Option<&RuleFilters>) -> Self {
        let pick = |field: Option<&Vec<String>>, base: &[String]| {
            field.cloned().unwrap_or_else(|| base.to_vec())
        };
        match overrides {
            Some(o) => EffectiveFilters {
                listing_types: pick(o.listing_types.as_ref(), &global.listing_types),
                ships_to: pick(o.ships_to.as_ref(), &global.ships_to),
                exclude_status: pick(o.exclude_status.as_ref(), &global.exclude_status),
                min_seller_reputation: o
                    .min_seller_reputation
                    .or(global.min_seller_reputation),
            },
            None => EffectiveFilters {
                listing_types: global.listing_types.clone(),
                ships_to: global.ships_to.clone(),
                exclude_status: global.exclude_status.clone(),
                min_seller_reputation: global.min_seller_reputation,
            },
        }
    }

    /// Does the listing clear every filter dimension? Runs before the rule
    /// expression; a listing that fails here is never evaluated.
    pub fn passes(&self, listing: &Listing) -> bool {
        if !self.listing_types.is_empty() {
            let Some(lt) = listing.listing_type.as_deref() else {
                return false;
            };
            if !self
                .listing_types
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(lt))
            {
                return false;
            }
        }

        // A listing that does not declare shipping regions is not excluded by
        // a ships_to filter.
        if !self.ships_to.is_empty() && !listing.ships_to.is_empty() {
            let passes = listing.ships_to.iter().any(|region| {
                let region = region.to_lowercase();
                self.ships_to
                    .iter()
                    .any(|wanted| region.contains(&wanted.to_lowercase()))
            });
            if !passes {
                return false;
            }
        }

        if self
            .exclude_status
            .iter()
            .any(|status| status.eq_ignore_ascii_case(&listing.status))
        {
            return false;
        }

        if let (Some(min), Some(rep)) = (self.min_seller_reputation, listing.seller_reputation) {
            if rep < min {
                return false;
            }
        }

        true
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(json: &str) -> Listing {
        serde_json::from_str(json).expect("test listing should decode")
    }

    fn global() -> GlobalFilters {
        GlobalFilters {
            listing_types: vec!["fixed_price".to_string()],
            ships_to: vec!["US".to_string()],
            exclude_status: vec!["sold".to_string(), "expired".to_string()],
            min_seller_reputation: Some(10),
        }
    }

    // -- 1. resolution --------------------------------------------------------

    #[test]
    fn no_override_keeps_global() {
        let eff = EffectiveFilters::resolve(&global(), None);
        assert_eq!(eff.listing_types, vec!["fixed_price"]);
        assert_eq!(eff.ships_to, vec!["US"]);
        assert_eq!(eff.min_seller_reputation, Some(10));
    }

    #[test]
    fn override_replaces_only_its_dimension() {
        let overrides = RuleFilters {
            ships_to: Some(vec!["EU".to_string(), "UK".to_string()]),
            ..RuleFilters::default()
        };
        let eff = EffectiveFilters::resolve(&global(), Some(&overrides));
        assert_eq!(eff.ships_to, vec!["EU", "UK"]);
        assert_eq!(eff.listing_types, vec!["fixed_price"]);
        assert_eq!(eff.exclude_status, vec!["sold", "expired"]);
    }

    #[test]
    fn empty_override_clears_the_global_list() {
        let overrides = RuleFilters {
            exclude_status: Some(vec![]),
            ..RuleFilters::default()
        };
        let eff = EffectiveFilters::resolve(&global(), Some(&overrides));
        assert!(eff.exclude_status.is_empty());
        let sold = listing(r#"{"id": "1", "title": "x", "status": "sold",
                               "listing_type": "fixed_price", "ships_to": ["US"],
                               "seller_reputation": 50}"#);
        assert!(eff.passes(&sold));
    }

    // -- 2. listing type ------------------------------------------------------

    #[test]
    fn listing_type_allow_list() {
        let eff = EffectiveFilters::resolve(&global(), None);
        let fixed = listing(r#"{"id": "1", "title": "x", "listing_type": "Fixed_Price",
                                "ships_to": ["US"], "seller_reputation": 50}"#);
        let auction = listing(r#"{"id": "2", "title": "x", "listing_type": "auction",
                                  "ships_to": ["US"], "seller_reputation": 50}"#);
        let untyped = listing(r#"{"id": "3", "title": "x",
                                  "ships_to": ["US"], "seller_reputation": 50}"#);
        assert!(eff.passes(&fixed));
        assert!(!eff.passes(&auction));
        assert!(!eff.passes(&untyped));
    }

    #[test]
    fn empty_type_list_allows_everything() {
        let eff = EffectiveFilters {
            listing_types: vec![],
            ships_to: vec![],
            exclude_status: vec![],
            min_seller_reputation: None,
        };
        let auction = listing(r#"{"id": "1", "title": "x", "listing_type": "auction"}"#);
        assert!(eff.passes(&auction));
    }

    // -- 3. shipping ------------------------------------------------------------

    #[test]
    fn ships_to_matches_on_substring() {
        let eff = EffectiveFilters::resolve(&global(), None);
        let conus = listing(r#"{"id": "1", "title": "x", "listing_type": "fixed_price",
                                "ships_to": ["CONUS only"], "seller_reputation": 50}"#);
        let eu = listing(r#"{"id": "2", "title": "x", "listing_type": "fixed_price",
                             "ships_to": ["EU", "UK"], "seller_reputation": 50}"#);
        assert!(eff.passes(&conus));
        assert!(!eff.passes(&eu));
    }

    #[test]
    fn undeclared_shipping_passes() {
        let eff = EffectiveFilters::resolve(&global(), None);
        let silent = listing(r#"{"id": "1", "title": "x", "listing_type": "fixed_price",
                                 "seller_reputation": 50}"#);
        assert!(eff.passes(&silent));
    }

    // -- 4. status and reputation ---------------------------------------------------

    #[test]
    fn excluded_status_is_caseless() {
        let eff = EffectiveFilters::resolve(&global(), None);
        let sold = listing(r#"{"id": "1", "title": "x", "status": "SOLD",
                               "listing_type": "fixed_price", "ships_to": ["US"],
                               "seller_reputation": 50}"#);
        assert!(!eff.passes(&sold));
    }

    #[test]
    fn reputation_threshold() {
        let eff = EffectiveFilters::resolve(&global(), None);
        let low = listing(r#"{"id": "1", "title": "x", "listing_type": "fixed_price",
                              "ships_to": ["US"], "seller_reputation": 3}"#);
        let unknown = listing(r#"{"id": "2", "title": "x", "listing_type": "fixed_price",
                                  "ships_to": ["US"]}"#);
        assert!(!eff.passes(&low));
        assert!(eff.passes(&unknown));
    }
}
