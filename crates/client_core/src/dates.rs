//! Occurrence normalization and validation for the dates editor.

use std::collections::BTreeSet;

use shared::domain::Occurrence;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatesError {
    #[error("an event needs at least one date")]
    Empty,
    #[error("occurrence on {date} ends at {end} but starts at {start}")]
    EndsBeforeStart {
        date: chrono::NaiveDate,
        start: chrono::NaiveTime,
        end: chrono::NaiveTime,
    },
}

/// Sorted by date, then start and end time, with exact duplicates removed.
pub fn normalize(occurrences: &[Occurrence]) -> Vec<Occurrence> {
    occurrences
        .iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn validate(occurrences: &[Occurrence]) -> Result<(), DatesError> {
    if occurrences.is_empty() {
        return Err(DatesError::Empty);
    }
    match occurrences.iter().find(|o| !o.ends_after_start()) {
        Some(bad) => Err(DatesError::EndsBeforeStart {
            date: bad.start_date,
            start: bad.start_time,
            end: bad.end_time,
        }),
        None => Ok(()),
    }
}

/// True when every occurrence shares one start/end time pair.
pub fn has_uniform_times(occurrences: &[Occurrence]) -> bool {
    occurrences.windows(2).all(|pair| {
        pair[0].start_time == pair[1].start_time && pair[0].end_time == pair[1].end_time
    })
}

/// Summary lines for the date panel, e.g. `Wed, May 1 2024 · 09:00 – 10:00`.
pub fn describe_occurrences(occurrences: &[Occurrence]) -> Vec<String> {
    let format_one = |o: &Occurrence| {
        format!(
            "{} · {} – {}",
            o.start_date.format("%a, %b %-d %Y"),
            o.start_time.format("%H:%M"),
            o.end_time.format("%H:%M")
        )
    };

    match occurrences {
        [] => vec!["No dates yet".to_string()],
        [first, .., last] if occurrences.len() > 3 && has_uniform_times(occurrences) => vec![
            format!(
                "{} – {}",
                first.start_date.format("%b %-d"),
                last.start_date.format("%b %-d %Y")
            ),
            format!(
                "{} dates · {} – {}",
                occurrences.len(),
                first.start_time.format("%H:%M"),
                first.end_time.format("%H:%M")
            ),
        ],
        _ => occurrences.iter().map(format_one).collect(),
    }
}

#[cfg(test)]
#[path = "tests/dates_tests.rs"]
mod tests;
