use crate::recurrence::{deserialize_optional_frequency, Frequency};
use crate::utils::{deserialize_date, deserialize_optional_date};
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct Event {
    #[schemars(description = "Display label for the income or expense (e.g., 'Salary', 'Rent'). Does not need to be unique.")]
    #[serde(default)]
    pub name: String,

    #[schemars(description = "First date on which the event can fire (inclusive). YYYY-MM-DD or an RFC 3339 timestamp.")]
    #[serde(deserialize_with = "deserialize_date")]
    pub start_date: NaiveDate,

    #[schemars(description = "Optional inclusive cutoff. Omit, null or empty string for an open-ended event.")]
    #[serde(
        default,
        deserialize_with = "deserialize_optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<NaiveDate>,

    #[schemars(description = "Recurrence tag. Omit, null or empty string for a one-time event on start_date.")]
    #[serde(
        default,
        deserialize_with = "deserialize_optional_frequency",
        skip_serializing_if = "Option::is_none"
    )]
    pub frequency: Option<Frequency>,

    #[schemars(description = "Signed amount: positive for income, negative for expenses. Zero-valued events are ignored.")]
    pub value: f64,

    #[schemars(description = "Free-text observation. Carried along, never used in the projection.")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obs: Option<String>,
}

impl Event {
    pub fn one_time(name: impl Into<String>, date: NaiveDate, value: f64) -> Self {
        Self {
            name: name.into(),
            start_date: date,
            end_date: None,
            frequency: None,
            value,
            obs: None,
        }
    }

    pub fn recurring(
        name: impl Into<String>,
        start_date: NaiveDate,
        frequency: Frequency,
        value: f64,
    ) -> Self {
        Self {
            name: name.into(),
            start_date,
            end_date: None,
            frequency: Some(frequency),
            value,
            obs: None,
        }
    }

    pub fn ending(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn with_obs(mut self, obs: impl Into<String>) -> Self {
        self.obs = Some(obs.into());
        self
    }

    /// An event without recurrence, or whose end date equals its start date,
    /// fires at most once: on `start_date`.
    pub fn is_one_time(&self) -> bool {
        self.frequency.is_none() || self.end_date == Some(self.start_date)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct CashflowItem {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct CashflowEntry {
    pub date: NaiveDate,
    /// Net of all items on this date.
    pub cashflow: f64,
    /// Running balance after this entry. Zero until the ledger is accumulated.
    pub balance: f64,
    pub items: Vec<CashflowItem>,
}

impl CashflowEntry {
    pub fn from_items(date: NaiveDate, items: Vec<CashflowItem>) -> Self {
        let cashflow = items.iter().map(|item| item.value).sum();
        Self {
            date,
            cashflow,
            balance: 0.0,
            items,
        }
    }

    pub fn opening(date: NaiveDate, balance: f64) -> Self {
        Self {
            date,
            cashflow: 0.0,
            balance,
            items: Vec::new(),
        }
    }
}

pub type Ledger = Vec<CashflowEntry>;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SimulationRequest {
    #[schemars(description = "Income and expense events, in the order their items should be listed within a day.")]
    #[serde(default)]
    pub events: Vec<Event>,

    #[schemars(description = "Account balance at sim_start, before any event is applied.")]
    #[serde(default)]
    pub initial_balance: f64,

    #[schemars(description = "First day of the projection (inclusive).")]
    #[serde(deserialize_with = "deserialize_date")]
    pub sim_start: NaiveDate,

    #[schemars(description = "Last day of the projection (inclusive). Must not be before sim_start.")]
    #[serde(deserialize_with = "deserialize_date")]
    pub sim_end: NaiveDate,
}

impl SimulationRequest {
    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(SimulationRequest)
    }

    pub fn schema_as_json() -> Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct SimulationResponse {
    pub cashflows: Ledger,
}
