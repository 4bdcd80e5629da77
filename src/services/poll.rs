// src/services/poll.rs

//! Poll reduction.
//!
//! Reduces raw multi-valued polls into scalar decisions: the
//! community-preferred player count for the `suggested_numplayers`
//! poll, and the winning option per bucket for every other poll.

use crate::models::{Poll, PollOption, PollResult, PollValue};

/// Name of the player count poll, which gets dedicated reduction.
const SUGGESTED_NUMPLAYERS: &str = "suggested_numplayers";

/// Reduce each poll with recorded votes into scalar results.
///
/// Polls with no result buckets are skipped entirely; a `totalvotes`
/// attribute alone does not guarantee non-empty buckets.
pub fn reduce_polls(polls: &[Poll]) -> Vec<PollResult> {
    let mut results = Vec::new();

    for poll in polls {
        if poll.buckets.is_empty() {
            continue;
        }
        if poll.name == SUGGESTED_NUMPLAYERS {
            if let Some(result) = reduce_player_count(poll) {
                results.push(result);
            }
        } else {
            for bucket in &poll.buckets {
                if let Some(winner) = winning_option(&bucket.options) {
                    results.push(PollResult::Named {
                        name: poll.name.clone(),
                        value: coerce_value(&winner.value),
                    });
                }
            }
        }
    }

    results
}

/// Find the bucket whose "Best" option drew the most votes and parse
/// its label.
///
/// Labels are either a plain count (`"4"`) or a compound `"4+"`
/// encoding; a `"+"` marker sets `has_upper_limit`. Ties are resolved
/// by first encounter in bucket order.
fn reduce_player_count(poll: &Poll) -> Option<PollResult> {
    let mut best_label: Option<&str> = None;
    let mut most_votes = 0;

    for bucket in &poll.buckets {
        let Some(label) = bucket.num_players.as_deref() else {
            continue;
        };
        for option in &bucket.options {
            if option.value == "Best" && (best_label.is_none() || option.num_votes > most_votes) {
                best_label = Some(label);
                most_votes = option.num_votes;
            }
        }
    }

    let parts: Vec<&str> = best_label?.split('+').collect();
    let num = parts[0].parse().ok()?;
    Some(PollResult::PlayerCount {
        name: poll.name.clone(),
        num,
        has_upper_limit: parts.len() > 1,
    })
}

/// The option with the most votes; ties go to the first encountered.
fn winning_option(options: &[PollOption]) -> Option<&PollOption> {
    let mut winner: Option<&PollOption> = None;
    for option in options {
        match winner {
            Some(w) if option.num_votes <= w.num_votes => {}
            _ => winner = Some(option),
        }
    }
    winner
}

fn coerce_value(value: &str) -> PollValue {
    value
        .parse::<f64>()
        .map(PollValue::Number)
        .unwrap_or_else(|_| PollValue::Text(value.to_string()))
}
