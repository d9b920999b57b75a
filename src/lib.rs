//! # Cashflow Simulator
//!
//! A library for projecting an account balance over time from recurring and one-time
//! income/expense events.
//!
//! ## Core Concepts
//!
//! - **Event**: A rule that contributes a signed amount once, or repeatedly on a
//!   `daily`, `weekly`, `monthly`, `quarterly`, `semi-annual` or `annual` schedule
//! - **Window**: The inclusive date range `[sim_start, sim_end]` being projected
//! - **Cashflow Entry**: The net of every event firing on one date, with its items
//! - **Ledger**: An opening-balance row followed by one entry per active date, each
//!   carrying the running balance
//!
//! ## Example
//!
//! ```rust,ignore
//! use cashflow_sim::*;
//! use chrono::NaiveDate;
//!
//! let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
//! let end = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
//!
//! let events = vec![
//!     Event::recurring("Salary", start, Frequency::Monthly, 5000.0),
//!     Event::recurring("Rent", start, Frequency::Monthly, -1500.0),
//! ];
//!
//! let ledger = run_simulation(&events, 1000.0, start, end).unwrap();
//! assert_eq!(ledger.last().unwrap().balance, 11500.0);
//! ```

pub mod api;
pub mod balancer;
pub mod engine;
pub mod error;
pub mod ingestion;
pub mod recurrence;
pub mod schema;
pub mod utils;

pub use api::{ApiResponse, ErrorBody, SimulationService};
pub use balancer::{balance_from_cashflows, BalanceAccumulator, LedgerSummary};
pub use engine::{first_occurrence, generate_cashflows, CashflowGenerator};
pub use error::{CashflowSimError, Result};
pub use ingestion::{events_from_csv, read_events_csv, write_ledger_csv, EventRow};
pub use recurrence::{is_valid_frequency, next_date, Frequency};
pub use schema::*;

use chrono::NaiveDate;
use log::{debug, info};

pub struct CashflowSimulator;

impl CashflowSimulator {
    pub fn run(request: &SimulationRequest) -> Result<SimulationResponse> {
        let cashflows = Self::simulate(
            &request.events,
            request.initial_balance,
            request.sim_start,
            request.sim_end,
        )?;

        Ok(SimulationResponse { cashflows })
    }

    pub fn simulate(
        events: &[Event],
        initial_balance: f64,
        sim_start: NaiveDate,
        sim_end: NaiveDate,
    ) -> Result<Ledger> {
        info!(
            "Running cashflow simulation: {} events from {} to {}",
            events.len(),
            sim_start,
            sim_end
        );

        let cashflows = generate_cashflows(events, sim_start, sim_end).map_err(|e| {
            CashflowSimError::Simulation {
                source: Box::new(e),
            }
        })?;
        debug!("{} active dates in the window", cashflows.len());

        let ledger = BalanceAccumulator::new(initial_balance, sim_start).accumulate(cashflows);

        if let Some(last) = ledger.last() {
            info!("Projected closing balance on {}: {:.2}", last.date, last.balance);
        }

        Ok(ledger)
    }
}

pub fn run_simulation(
    events: &[Event],
    initial_balance: f64,
    sim_start: NaiveDate,
    sim_end: NaiveDate,
) -> Result<Ledger> {
    CashflowSimulator::simulate(events, initial_balance, sim_start, sim_end)
}
