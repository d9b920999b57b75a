use crate::error::{CashflowSimError, Result};
use crate::recurrence::Frequency;
use crate::schema::{CashflowEntry, CashflowItem, Event};
use chrono::NaiveDate;
use log::debug;
use std::collections::HashMap;

/// First date from which `event` is expanded over `[window_begin, window_end]`,
/// or `None` when it cannot fire inside the window.
///
/// Two shortcuts apply once the event overlaps the window at all:
/// - one-time events report their `start_date`, even when it precedes the window;
/// - daily events report `window_begin` without aligning to `start_date`.
pub fn first_occurrence(
    event: &Event,
    window_begin: NaiveDate,
    window_end: NaiveDate,
) -> Option<NaiveDate> {
    if event.start_date > window_end {
        return None;
    }

    if matches!(event.end_date, Some(end) if end < window_begin) {
        return None;
    }

    let frequency = match event.frequency {
        Some(frequency) if !event.is_one_time() => frequency,
        _ => return Some(event.start_date),
    };

    if frequency == Frequency::Daily {
        return Some(window_begin);
    }

    let mut current = event.start_date;
    while current < window_begin {
        current = frequency.advance(current).ok()?;
    }

    Some(current)
}

/// Expands events into per-date cashflow entries over a window.
pub struct CashflowGenerator {
    window_begin: NaiveDate,
    window_end: NaiveDate,
}

impl CashflowGenerator {
    pub fn new(window_begin: NaiveDate, window_end: NaiveDate) -> Result<Self> {
        if window_begin > window_end {
            return Err(CashflowSimError::InvalidWindow {
                begin: window_begin,
                end: window_end,
            });
        }

        Ok(Self {
            window_begin,
            window_end,
        })
    }

    pub fn generate(&self, events: &[Event]) -> Vec<CashflowEntry> {
        let mut by_date: HashMap<NaiveDate, Vec<CashflowItem>> = HashMap::new();

        for event in events {
            if event.value == 0.0 {
                debug!("Skipping zero-valued event '{}'", event.name);
                continue;
            }

            for date in self.occurrences(event) {
                by_date.entry(date).or_default().push(CashflowItem {
                    name: event.name.clone(),
                    value: event.value,
                });
            }
        }

        let mut cashflows: Vec<CashflowEntry> = by_date
            .into_iter()
            .map(|(date, items)| CashflowEntry::from_items(date, items))
            .collect();
        cashflows.sort_by_key(|entry| entry.date);

        debug!(
            "Generated {} cashflow entries from {} events between {} and {}",
            cashflows.len(),
            events.len(),
            self.window_begin,
            self.window_end
        );

        cashflows
    }

    /// Dates on which `event` contributes, in increasing order and clipped to the window.
    fn occurrences(&self, event: &Event) -> Vec<NaiveDate> {
        let mut dates = Vec::new();

        let Some(mut current) = first_occurrence(event, self.window_begin, self.window_end) else {
            debug!("Event '{}' never fires inside the window", event.name);
            return dates;
        };

        let recurrence = if event.is_one_time() {
            None
        } else {
            event.frequency
        };

        loop {
            if current > self.window_end {
                break;
            }
            if matches!(event.end_date, Some(end) if current > end) {
                break;
            }

            // One-time events may report a start date before the window opens.
            if current >= self.window_begin {
                dates.push(current);
            }

            let Some(frequency) = recurrence else {
                break;
            };
            match frequency.advance(current) {
                Ok(next) => current = next,
                Err(e) => {
                    debug!("Stopped expanding '{}': {}", event.name, e);
                    break;
                }
            }
        }

        dates
    }
}

/// Builds the date-sorted, not yet balanced cashflow list for `events` over
/// `[window_begin, window_end]`.
pub fn generate_cashflows(
    events: &[Event],
    window_begin: NaiveDate,
    window_end: NaiveDate,
) -> Result<Vec<CashflowEntry>> {
    let generator = CashflowGenerator::new(window_begin, window_end)?;
    Ok(generator.generate(events))
}
