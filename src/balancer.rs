use crate::error::{CashflowSimError, Result};
use crate::schema::{CashflowEntry, Ledger};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub struct BalanceAccumulator {
    initial_balance: f64,
    sim_start: NaiveDate,
}

impl BalanceAccumulator {
    pub fn new(initial_balance: f64, sim_start: NaiveDate) -> Self {
        Self {
            initial_balance,
            sim_start,
        }
    }

    /// Prepends the opening entry at `sim_start` and fills in running balances,
    /// taking `cashflows` in the order given.
    pub fn accumulate(&self, cashflows: Vec<CashflowEntry>) -> Ledger {
        let mut ledger = Vec::with_capacity(cashflows.len() + 1);
        ledger.push(CashflowEntry::opening(self.sim_start, self.initial_balance));

        let mut running_balance = self.initial_balance;
        for mut entry in cashflows {
            running_balance += entry.cashflow;
            entry.balance = running_balance;
            ledger.push(entry);
        }

        ledger
    }

    /// Checks that every entry's cashflow matches its items and that every balance
    /// equals the previous balance plus the entry's cashflow, within `tolerance`.
    pub fn verify(ledger: &[CashflowEntry], tolerance: f64) -> Result<()> {
        let Some(opening) = ledger.first() else {
            return Ok(());
        };

        let mut expected_balance = opening.balance;
        for entry in ledger.iter().skip(1) {
            let items_total: f64 = entry.items.iter().map(|item| item.value).sum();
            if (items_total - entry.cashflow).abs() > tolerance {
                return Err(CashflowSimError::BalanceMismatch {
                    date: entry.date,
                    expected: items_total,
                    actual: entry.cashflow,
                });
            }

            expected_balance += entry.cashflow;
            if (expected_balance - entry.balance).abs() > tolerance {
                return Err(CashflowSimError::BalanceMismatch {
                    date: entry.date,
                    expected: expected_balance,
                    actual: entry.balance,
                });
            }
        }

        Ok(())
    }
}

pub fn balance_from_cashflows(
    initial_balance: f64,
    sim_start: NaiveDate,
    cashflows: Vec<CashflowEntry>,
) -> Ledger {
    BalanceAccumulator::new(initial_balance, sim_start).accumulate(cashflows)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub opening_balance: f64,
    pub closing_balance: f64,
    pub total_inflow: f64,
    pub total_outflow: f64,
    pub lowest_balance: f64,
    pub lowest_balance_date: NaiveDate,
}

impl LedgerSummary {
    /// `None` for an empty ledger. Outflow is reported as a negative total.
    pub fn from_ledger(ledger: &[CashflowEntry]) -> Option<Self> {
        let opening = ledger.first()?;
        let closing = ledger.last()?;

        let mut summary = Self {
            opening_balance: opening.balance,
            closing_balance: closing.balance,
            total_inflow: 0.0,
            total_outflow: 0.0,
            lowest_balance: opening.balance,
            lowest_balance_date: opening.date,
        };

        for entry in ledger {
            for item in &entry.items {
                if item.value > 0.0 {
                    summary.total_inflow += item.value;
                } else {
                    summary.total_outflow += item.value;
                }
            }
            if entry.balance < summary.lowest_balance {
                summary.lowest_balance = entry.balance;
                summary.lowest_balance_date = entry.date;
            }
        }

        Some(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::CashflowItem;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(day: NaiveDate, values: &[f64]) -> CashflowEntry {
        CashflowEntry::from_items(
            day,
            values
                .iter()
                .map(|&value| CashflowItem {
                    name: format!("item {}", value),
                    value,
                })
                .collect(),
        )
    }

    #[test]
    fn test_running_balances() {
        let cashflows = vec![
            entry(date(2025, 1, 15), &[1000.0]),
            entry(date(2025, 2, 15), &[2000.0]),
            entry(date(2025, 3, 15), &[-500.0]),
        ];

        let ledger = balance_from_cashflows(5000.0, date(2025, 1, 1), cashflows);

        assert_eq!(ledger.len(), 4);
        let balances: Vec<f64> = ledger.iter().map(|e| e.balance).collect();
        assert_eq!(balances, vec![5000.0, 6000.0, 8000.0, 7500.0]);

        assert_eq!(ledger[0].date, date(2025, 1, 1));
        assert_eq!(ledger[0].cashflow, 0.0);
        assert!(ledger[0].items.is_empty());
        assert!(BalanceAccumulator::verify(&ledger, 1e-9).is_ok());
    }

    #[test]
    fn test_empty_cashflows_yield_opening_entry() {
        let ledger = balance_from_cashflows(1000.0, date(2025, 1, 1), Vec::new());

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].balance, 1000.0);
        assert!(ledger[0].items.is_empty());
    }

    #[test]
    fn test_fold_follows_input_order() {
        // Accumulation does not re-sort; order is the caller's responsibility.
        let cashflows = vec![entry(date(2025, 3, 1), &[300.0]), entry(date(2025, 1, 1), &[-100.0])];
        let ledger = balance_from_cashflows(0.0, date(2025, 1, 1), cashflows);

        assert_eq!(ledger[1].balance, 300.0);
        assert_eq!(ledger[2].balance, 200.0);
    }

    #[test]
    fn test_verify_detects_tampered_balance() {
        let mut ledger = balance_from_cashflows(
            100.0,
            date(2025, 1, 1),
            vec![entry(date(2025, 1, 2), &[10.0]), entry(date(2025, 1, 3), &[-5.0])],
        );
        ledger[2].balance = 0.0;

        let err = BalanceAccumulator::verify(&ledger, 0.01).unwrap_err();
        assert!(matches!(
            err,
            CashflowSimError::BalanceMismatch { date: d, expected, .. } if d == date(2025, 1, 3) && expected == 105.0
        ));
    }

    #[test]
    fn test_verify_detects_items_mismatch() {
        let mut ledger = balance_from_cashflows(
            0.0,
            date(2025, 1, 1),
            vec![entry(date(2025, 1, 2), &[10.0, 20.0])],
        );
        ledger[1].cashflow = 25.0;

        assert!(BalanceAccumulator::verify(&ledger, 0.01).is_err());
    }

    #[test]
    fn test_summary() {
        let ledger = balance_from_cashflows(
            500.0,
            date(2025, 1, 1),
            vec![
                entry(date(2025, 1, 5), &[-800.0, 100.0]),
                entry(date(2025, 1, 20), &[2000.0]),
            ],
        );

        let summary = LedgerSummary::from_ledger(&ledger).unwrap();
        assert_eq!(summary.opening_balance, 500.0);
        assert_eq!(summary.closing_balance, 1800.0);
        assert_eq!(summary.total_inflow, 2100.0);
        assert_eq!(summary.total_outflow, -800.0);
        assert_eq!(summary.lowest_balance, -200.0);
        assert_eq!(summary.lowest_balance_date, date(2025, 1, 5));

        assert!(LedgerSummary::from_ledger(&[]).is_none());
    }
}
