use serde::Serialize;

/// One rule matching one listing. `matched_at` is stamped by the caller so a
/// whole batch shares the same timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchEvent {
    pub listing_id: String,
    pub rule_name: String,
    pub matched_at: String,
    pub channels: Vec<String>,
}
