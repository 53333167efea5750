// 🏷️ Entry kind - the two-valued income/expense tag of a ledger entry

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum EntryKind {
    /// Money coming in
    Income,

    /// Money going out
    Expense,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Income => "income",
            EntryKind::Expense => "expense",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = Error;

    /// Exact match only: "Income" or " income" are rejected
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(EntryKind::Income),
            "expense" => Ok(EntryKind::Expense),
            other => Err(Error::InvalidKind(other.to_string())),
        }
    }
}

impl TryFrom<String> for EntryKind {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert_eq!("income".parse::<EntryKind>(), Ok(EntryKind::Income));
        assert_eq!("expense".parse::<EntryKind>(), Ok(EntryKind::Expense));
        assert_eq!(
            "Income".parse::<EntryKind>(),
            Err(Error::InvalidKind("Income".to_string()))
        );
    }

    #[test]
    fn test_kind_serde() {
        let json = serde_json::to_string(&EntryKind::Expense).unwrap();
        assert_eq!(json, "\"expense\"");

        let kind: EntryKind = serde_json::from_str("\"income\"").unwrap();
        assert_eq!(kind, EntryKind::Income);

        let err = serde_json::from_str::<EntryKind>("\"loan\"").unwrap_err();
        assert!(err.to_string().contains("invalid kind 'loan'"));
    }
}
