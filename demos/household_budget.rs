use cashflow_sim::*;
use chrono::NaiveDate;
use std::env;
use std::io;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_events() -> Vec<Event> {
    vec![
        Event::recurring("Salary", date(2025, 1, 25), Frequency::Monthly, 4200.0),
        Event::recurring("Rent", date(2025, 1, 1), Frequency::Monthly, -1350.0),
        Event::recurring("Groceries", date(2025, 1, 4), Frequency::Weekly, -160.0),
        Event::recurring("Car insurance", date(2024, 10, 10), Frequency::SemiAnnual, -540.0),
        Event::recurring("Streaming", date(2025, 1, 31), Frequency::Monthly, -15.99)
            .with_obs("billed on the 31st, rolls into the next month when short"),
        Event::one_time("Holiday", date(2025, 8, 2), -2400.0),
    ]
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    println!("=== Cashflow Simulator: Household Budget ===\n");

    // Optional first argument: a CSV file with name,start_date,end_date,frequency,value,obs
    let events = match env::args().nth(1) {
        Some(path) => {
            println!("Loading events from {}", path);
            read_events_csv(path)?
        }
        None => sample_events(),
    };

    let sim_start = date(2025, 1, 1);
    let sim_end = date(2025, 12, 31);

    let ledger = run_simulation(&events, 3000.0, sim_start, sim_end)?;
    BalanceAccumulator::verify(&ledger, 0.005)?;

    if let Some(summary) = LedgerSummary::from_ledger(&ledger) {
        println!("Opening balance:  {:>12.2}", summary.opening_balance);
        println!("Total inflow:     {:>12.2}", summary.total_inflow);
        println!("Total outflow:    {:>12.2}", summary.total_outflow);
        println!("Closing balance:  {:>12.2}", summary.closing_balance);
        println!(
            "Lowest balance:   {:>12.2} on {}",
            summary.lowest_balance, summary.lowest_balance_date
        );
    }

    println!("\n--- Ledger ({} rows) ---", ledger.len());
    write_ledger_csv(&ledger, io::stdout())?;

    Ok(())
}
