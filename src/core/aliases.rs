use serde::{Deserialize, Serialize};
use serde_json::Value;
use smallvec::SmallVec;

use crate::core::RawResultRow;

/// Value column names, highest priority first.
pub const DEFAULT_VALUE_ALIASES: [&str; 6] = [
    "total_value",
    "portfolio_value",
    "value",
    "equity",
    "capital",
    "balance",
];

/// Date column names, highest priority first.
pub const DEFAULT_DATE_ALIASES: [&str; 5] = ["date", "Date", "index", "timestamp", "time"];

pub type AliasList = SmallVec<[String; 8]>;

/// Ordered candidate column names used to locate the value and date cells of
/// a result row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldAliases {
    #[serde(default = "default_value_aliases")]
    pub value: AliasList,
    #[serde(default = "default_date_aliases")]
    pub date: AliasList,
}

impl Default for FieldAliases {
    fn default() -> Self {
        Self {
            value: default_value_aliases(),
            date: default_date_aliases(),
        }
    }
}

impl FieldAliases {
    /// Replaces the value alias list. Order is priority.
    #[must_use]
    pub fn with_value_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.value = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the date alias list. Order is priority.
    #[must_use]
    pub fn with_date_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.date = aliases.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn is_date_alias(&self, key: &str) -> bool {
        self.date.iter().any(|alias| alias == key)
    }
}

/// Returns the first candidate field that is present and non-null.
#[must_use]
pub fn lookup_first<'a, S: AsRef<str>>(
    row: &'a RawResultRow,
    candidates: &[S],
) -> Option<&'a Value> {
    candidates
        .iter()
        .filter_map(|key| row.get(key.as_ref()))
        .find(|value| !value.is_null())
}

/// Fallback value scan: the first field, in natural order, holding a number
/// strictly greater than zero whose key is not a date alias.
#[must_use]
pub fn fallback_value(row: &RawResultRow, aliases: &FieldAliases) -> Option<f64> {
    row.fields().find_map(|(key, value)| {
        if aliases.is_date_alias(key) {
            return None;
        }
        value.as_f64().filter(|number| *number > 0.0)
    })
}

fn default_value_aliases() -> AliasList {
    DEFAULT_VALUE_ALIASES.iter().map(|alias| (*alias).to_owned()).collect()
}

fn default_date_aliases() -> AliasList {
    DEFAULT_DATE_ALIASES.iter().map(|alias| (*alias).to_owned()).collect()
}
