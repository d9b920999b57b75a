use crate::error::{CashflowSimError, Result};
use crate::utils::{add_days, add_months_rolling};
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    #[schemars(description = "Every calendar day")]
    Daily,

    #[schemars(description = "Every 7 days")]
    Weekly,

    #[schemars(description = "Same day of every month")]
    Monthly,

    #[schemars(description = "Every 3 calendar months")]
    Quarterly,

    #[schemars(description = "Every 6 calendar months")]
    SemiAnnual,

    #[schemars(description = "Same day of every year")]
    Annual,
}

impl Frequency {
    pub const ALL: [Frequency; 6] = [
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::Monthly,
        Frequency::Quarterly,
        Frequency::SemiAnnual,
        Frequency::Annual,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Quarterly => "quarterly",
            Frequency::SemiAnnual => "semi-annual",
            Frequency::Annual => "annual",
        }
    }

    /// Next occurrence after `date`. Month-based steps roll over short months
    /// (see [`add_months_rolling`]).
    pub fn advance(&self, date: NaiveDate) -> Result<NaiveDate> {
        match self {
            Frequency::Daily => add_days(date, 1),
            Frequency::Weekly => add_days(date, 7),
            Frequency::Monthly => add_months_rolling(date, 1),
            Frequency::Quarterly => add_months_rolling(date, 3),
            Frequency::SemiAnnual => add_months_rolling(date, 6),
            Frequency::Annual => add_months_rolling(date, 12),
        }
    }

    /// Reads an optional tag where the empty string means "no recurrence".
    pub fn parse_optional(label: Option<&str>) -> Result<Option<Frequency>> {
        match label {
            None | Some("") => Ok(None),
            Some(tag) => tag.parse().map(Some),
        }
    }
}

impl FromStr for Frequency {
    type Err = CashflowSimError;

    fn from_str(s: &str) -> Result<Self> {
        Frequency::ALL
            .into_iter()
            .find(|frequency| frequency.as_str() == s)
            .ok_or_else(|| CashflowSimError::InvalidFrequency(s.to_string()))
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reports whether `label` is one of the recognized recurrence tags. Tags are
/// case-sensitive and the empty string is not a tag.
pub fn is_valid_frequency(label: &str) -> bool {
    label.parse::<Frequency>().is_ok()
}

/// Advances `date` by the recurrence named `label`.
pub fn next_date(date: NaiveDate, label: &str) -> Result<NaiveDate> {
    label.parse::<Frequency>()?.advance(date)
}

pub(crate) fn deserialize_optional_frequency<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Frequency>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Frequency::parse_optional(raw.as_deref()).map_err(serde::de::Error::custom)
}
