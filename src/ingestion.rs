use crate::error::{CashflowSimError, Result};
use crate::recurrence::Frequency;
use crate::schema::{CashflowEntry, Event};
use crate::utils::{parse_date, parse_optional_date};
use serde::Deserialize;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// One row of an event table: `name,start_date,end_date,frequency,value,obs`.
/// Columns not listed here (e.g. `currency`) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct EventRow {
    #[serde(default)]
    pub name: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub frequency: Option<String>,
    pub value: f64,
    pub obs: Option<String>,
}

impl EventRow {
    pub fn into_event(self) -> Result<Event> {
        let frequency = Frequency::parse_optional(self.frequency.as_deref())?;
        if !self.value.is_finite() {
            return Err(CashflowSimError::InvalidAmount(format!(
                "value must be a finite number, got {}",
                self.value
            )));
        }

        Ok(Event {
            name: self.name,
            start_date: parse_date(&self.start_date)?,
            end_date: parse_optional_date(self.end_date.as_deref())?,
            frequency,
            value: self.value,
            obs: self.obs.filter(|obs| !obs.is_empty()),
        })
    }
}

pub fn events_from_csv<R: Read>(reader: R) -> Result<Vec<Event>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut events = Vec::new();
    for (idx, record) in csv_reader.deserialize::<EventRow>().enumerate() {
        let row = idx + 1;
        let event = record
            .map_err(CashflowSimError::from)
            .and_then(EventRow::into_event)
            .map_err(|e| CashflowSimError::InvalidEventRow {
                row,
                details: e.to_string(),
            })?;
        events.push(event);
    }

    Ok(events)
}

pub fn read_events_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Event>> {
    let file = File::open(path)?;
    events_from_csv(file)
}

/// Writes `date,cashflow,balance,items`, one line per ledger entry. Items are
/// rendered as `name:value` joined by `; `.
pub fn write_ledger_csv<W: Write>(ledger: &[CashflowEntry], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["date", "cashflow", "balance", "items"])?;

    for entry in ledger {
        let items = entry
            .items
            .iter()
            .map(|item| format!("{}:{:.2}", item.name, item.value))
            .collect::<Vec<_>>()
            .join("; ");

        csv_writer.write_record([
            entry.date.format("%Y-%m-%d").to_string(),
            format!("{:.2}", entry.cashflow),
            format!("{:.2}", entry.balance),
            items,
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}
