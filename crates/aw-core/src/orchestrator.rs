use chrono::{DateTime, SecondsFormat, Utc};
use orion_error::prelude::*;
use orion_error::ErrorOweBase;

use crate::error::{WatchReason, WatchResult};
use crate::eval::evaluate;
use crate::event::MatchEvent;
use crate::listing::Listing;
use crate::registry::RuleRegistry;
use crate::sink::MatchSink;

/// Run every enabled rule over every listing.
///
/// Events come out listing-major: all matches for the first listing, then the
/// second, rules in registry order within each. One listing can produce one
/// event per rule it matches; nothing is deduplicated here. `matched_at` is
/// taken as an argument so the whole batch carries one timestamp and the pass
/// stays replayable.
pub fn evaluate_batch(
    registry: &RuleRegistry,
    listings: &[Listing],
    matched_at: DateTime<Utc>,
) -> Vec<MatchEvent> {
    let stamp = matched_at.to_rfc3339_opts(SecondsFormat::Millis, true);
    let mut events = Vec::new();

    for listing in listings {
        for rule in registry.iter() {
            if !rule.enabled {
                continue;
            }
            if !rule.filters.passes(listing) {
                continue;
            }
            if evaluate(&rule.expr, listing) {
                tracing::debug!(listing = %listing.id, rule = %rule.name, "rule matched");
                events.push(MatchEvent {
                    listing_id: listing.id.clone(),
                    rule_name: rule.name.clone(),
                    matched_at: stamp.clone(),
                    channels: rule.channels.clone(),
                });
            }
        }
    }

    tracing::info!(
        listings = listings.len(),
        rules = registry.len(),
        matches = events.len(),
        "batch evaluated"
    );
    events
}

/// Push a batch of events into a sink, stopping at the first failure.
pub fn dispatch(events: &[MatchEvent], sink: &dyn MatchSink) -> WatchResult<usize> {
    for event in events {
        sink.send(event)
            .owe(WatchReason::EventSink)
            .position(format!("rule {}", event.rule_name))?;
    }
    Ok(events.len())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
