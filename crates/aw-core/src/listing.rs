use std::io::BufRead;

use aw_lang::Field;
use orion_error::prelude::*;
use orion_error::{ErrorOwe, ErrorOweBase};
use serde::Deserialize;

use crate::error::{WatchReason, WatchResult};

// ---------------------------------------------------------------------------
// Listing record
// ---------------------------------------------------------------------------

/// One marketplace listing as supplied by the scraper, one JSON object per
/// line. Only `id` and `title` are required; everything else is nullable and
/// unknown keys are ignored, so feed schema changes don't break decoding.
#[derive(Debug, Clone, Deserialize)]
pub struct Listing {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub listing_type: Option<String>,
    #[serde(default)]
    pub ships_to: Vec<String>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub seller: Option<String>,
    #[serde(default)]
    pub seller_reputation: Option<i64>,
    /// ISO 8601; kept opaque, the engine never computes with it.
    #[serde(default)]
    pub listed_at: Option<String>,
    #[serde(default)]
    pub last_edited_at: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_status() -> String {
    "active".to_string()
}

// ---------------------------------------------------------------------------
// Typed field access
// ---------------------------------------------------------------------------

/// A typed view of one listing field, borrowed for the duration of an
/// evaluation pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Number(f64),
    Text(&'a str),
    Set(&'a [String]),
}

impl Listing {
    /// Typed accessor used by the evaluator. `None` means the field is absent
    /// on this listing (an empty `ships_to` set counts as absent); every
    /// condition on an absent field evaluates to false.
    pub fn field_value(&self, field: Field) -> Option<FieldValue<'_>> {
        match field {
            Field::Title => Some(FieldValue::Text(&self.title)),
            Field::Description => self.description.as_deref().map(FieldValue::Text),
            Field::Price => self.price.map(FieldValue::Number),
            Field::Currency => Some(FieldValue::Text(&self.currency)),
            Field::Category => self.category.as_deref().map(FieldValue::Text),
            Field::Condition => self.condition.as_deref().map(FieldValue::Text),
            Field::ListingType => self.listing_type.as_deref().map(FieldValue::Text),
            Field::ShipsTo => {
                if self.ships_to.is_empty() {
                    None
                } else {
                    Some(FieldValue::Set(&self.ships_to))
                }
            }
            Field::Seller => self.seller.as_deref().map(FieldValue::Text),
            Field::SellerReputation => self
                .seller_reputation
                .map(|r| FieldValue::Number(r as f64)),
        }
    }
}

// ---------------------------------------------------------------------------
// JSON Lines input
// ---------------------------------------------------------------------------

/// Read listings from a JSON Lines stream. Blank lines are skipped; a
/// malformed line aborts the read and reports its 1-based line number.
pub fn read_jsonl(reader: impl BufRead) -> WatchResult<Vec<Listing>> {
    let mut listings = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.owe_sys().position(format!("line {}", idx + 1))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let listing: Listing = serde_json::from_str(trimmed)
            .owe(WatchReason::ListingDecode)
            .position(format!("line {}", idx + 1))?;
        listings.push(listing);
    }
    Ok(listings)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
