//! Transaction model
//!
//! A deposit into or withdrawal from one child's account. Transactions are
//! created once and never edited; the amount is always positive and the
//! kind carries the direction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, TransactionId};
use super::money::Money;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdraw,
}

impl TransactionKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "deposit" | "in" => Some(Self::Deposit),
            "withdraw" | "withdrawal" | "out" => Some(Self::Withdraw),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deposit => write!(f, "Deposit"),
            Self::Withdraw => write!(f, "Withdraw"),
        }
    }
}

/// A deposit or withdrawal record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,

    /// The account this transaction was recorded against
    #[serde(rename = "childId", alias = "accountId")]
    pub account_id: AccountId,

    /// Always positive; see `kind` for the direction
    pub amount: Money,

    /// When the transaction was recorded
    pub date: DateTime<Utc>,

    #[serde(rename = "type")]
    pub kind: TransactionKind,

    #[serde(default)]
    pub note: String,
}

impl Transaction {
    /// Create a transaction stamped with the current time
    pub fn new(
        account_id: AccountId,
        amount: Money,
        kind: TransactionKind,
        note: impl Into<String>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            account_id,
            amount,
            date: Utc::now(),
            kind,
            note: note.into(),
        }
    }

    /// Amount with the direction applied (negative for withdrawals)
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionKind::Deposit => self.amount,
            TransactionKind::Withdraw => -self.amount,
        }
    }

    pub fn is_deposit(&self) -> bool {
        self.kind == TransactionKind::Deposit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_amount() {
        let account = AccountId::new();
        let deposit = Transaction::new(account, Money::new(20.0), TransactionKind::Deposit, "");
        let withdraw = Transaction::new(account, Money::new(5.0), TransactionKind::Withdraw, "");

        assert_eq!(deposit.signed_amount(), Money::new(20.0));
        assert_eq!(withdraw.signed_amount(), Money::new(-5.0));
        assert!(deposit.is_deposit());
        assert!(!withdraw.is_deposit());
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!(TransactionKind::parse("Deposit"), Some(TransactionKind::Deposit));
        assert_eq!(TransactionKind::parse("withdrawal"), Some(TransactionKind::Withdraw));
        assert_eq!(TransactionKind::parse("transfer"), None);
    }

    #[test]
    fn test_json_shape() {
        let txn = Transaction::new(AccountId::new(), Money::new(2.5), TransactionKind::Withdraw, "toy");
        let value = serde_json::to_value(&txn).unwrap();

        assert_eq!(value["type"], "withdraw");
        assert_eq!(value["amount"], 2.5);
        assert_eq!(value["note"], "toy");
        assert_eq!(value["childId"], txn.account_id.as_uuid().to_string());
        assert!(value.get("accountId").is_none());
        assert!(value["date"].is_string());
    }

    #[test]
    fn test_accepts_child_id_and_plain_iso_dates() {
        let json = r#"{
            "id": "6F9619FF-8B86-D011-B42D-00C04FC964FF",
            "childId": "550E8400-E29B-41D4-A716-446655440000",
            "amount": 3,
            "date": "2024-03-01T09:30:00Z",
            "type": "deposit",
            "note": "chores"
        }"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.amount, Money::new(3.0));
        assert_eq!(txn.kind, TransactionKind::Deposit);
        assert_eq!(txn.date.to_rfc3339(), "2024-03-01T09:30:00+00:00");
    }

    #[test]
    fn test_accepts_account_id_key() {
        let json = r#"{
            "id": "6F9619FF-8B86-D011-B42D-00C04FC964FF",
            "accountId": "550E8400-E29B-41D4-A716-446655440000",
            "amount": 1.5,
            "date": "2024-03-01T09:30:00Z",
            "type": "withdraw"
        }"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.kind, TransactionKind::Withdraw);
        assert!(txn.note.is_empty());
    }
}
