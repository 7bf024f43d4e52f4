//! Account model
//!
//! Represents one child's savings account, including the wishes and savings
//! goals shown alongside the balance, and the account's own transactions.

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::ids::AccountId;
use super::money::Money;
use super::transaction::Transaction;

const BIRTHDAY_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT00:00:00Z";

/// Gender tag shown next to the account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Other,
}

impl Gender {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "male" | "m" | "boy" => Some(Self::Male),
            "female" | "f" | "girl" => Some(Self::Female),
            "other" | "o" => Some(Self::Other),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => write!(f, "Male"),
            Self::Female => write!(f, "Female"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// Fields supplied when opening a new account
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub gender: Gender,
    pub birthday: NaiveDate,
    pub short_term_wish: String,
    pub long_term_wish: String,
    pub short_term_savings_goal: Money,
    pub long_term_savings_goal: Money,
    pub avatar_data: Option<Vec<u8>>,
}

impl NewAccount {
    /// Defaults for everything but the name: gender `other`, born today,
    /// no wishes, zero goals, no avatar
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            gender: Gender::Other,
            birthday: Utc::now().date_naive(),
            short_term_wish: String::new(),
            long_term_wish: String::new(),
            short_term_savings_goal: Money::zero(),
            long_term_savings_goal: Money::zero(),
            avatar_data: None,
        }
    }
}

/// A child's savings account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: AccountId,

    pub name: String,

    /// Running balance; always the signed sum of `transactions`
    pub balance: Money,

    /// Raw avatar image bytes, stored as base64 text
    #[serde(
        default,
        with = "avatar_base64",
        skip_serializing_if = "Option::is_none"
    )]
    pub avatar_data: Option<Vec<u8>>,

    /// Append-only, in order of creation
    #[serde(default)]
    pub transactions: Vec<Transaction>,

    #[serde(default)]
    pub gender: Gender,

    #[serde(
        serialize_with = "serialize_birthday",
        deserialize_with = "deserialize_birthday"
    )]
    pub birthday: NaiveDate,

    #[serde(default)]
    pub short_term_wish: String,

    #[serde(default)]
    pub long_term_wish: String,

    #[serde(default)]
    pub short_term_savings_goal: Money,

    #[serde(default)]
    pub long_term_savings_goal: Money,
}

impl Account {
    /// Open a new account with a zero balance and no transactions
    pub fn new(fields: NewAccount) -> Self {
        Self {
            id: AccountId::new(),
            name: fields.name.trim().to_string(),
            balance: Money::zero(),
            avatar_data: fields.avatar_data,
            transactions: Vec::new(),
            gender: fields.gender,
            birthday: fields.birthday,
            short_term_wish: fields.short_term_wish,
            long_term_wish: fields.long_term_wish,
            short_term_savings_goal: fields.short_term_savings_goal.sanitized(),
            long_term_savings_goal: fields.long_term_savings_goal.sanitized(),
        }
    }

    /// Copy the user-editable fields of `other` onto this account.
    ///
    /// Identity, balance and transactions are left alone.
    pub fn apply_edits(&mut self, other: &Account) {
        self.name = other.name.clone();
        self.avatar_data = other.avatar_data.clone();
        self.gender = other.gender;
        self.birthday = other.birthday;
        self.short_term_wish = other.short_term_wish.clone();
        self.long_term_wish = other.long_term_wish.clone();
        self.short_term_savings_goal = other.short_term_savings_goal.sanitized();
        self.long_term_savings_goal = other.long_term_savings_goal.sanitized();
    }

    /// Balance recomputed from the transaction list
    pub fn computed_balance(&self) -> Money {
        self.transactions.iter().map(Transaction::signed_amount).sum()
    }

    /// Whole years of age on the given date
    pub fn age_on(&self, date: NaiveDate) -> u32 {
        let mut years = date.year() - self.birthday.year();
        if (date.month(), date.day()) < (self.birthday.month(), self.birthday.day()) {
            years -= 1;
        }
        years.max(0) as u32
    }

    /// Fraction of `goal` covered by the current balance, clamped to `[0, 1]`
    pub fn goal_progress(&self, goal: Money) -> Option<f64> {
        if !goal.is_valid_amount() {
            return None;
        }
        let ratio = self.balance.sanitized().value() / goal.value();
        Some(ratio.clamp(0.0, 1.0))
    }

    pub fn has_avatar(&self) -> bool {
        self.avatar_data.as_ref().is_some_and(|d| !d.is_empty())
    }

    /// Validate the account
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if self.name.trim().is_empty() {
            return Err(AccountValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(AccountValidationError::NameTooLong(self.name.len()));
        }

        for goal in [self.short_term_savings_goal, self.long_term_savings_goal] {
            if !goal.is_finite() || goal.is_negative() {
                return Err(AccountValidationError::InvalidGoal(goal.value()));
            }
        }

        Ok(())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.balance)
    }
}

/// Validation errors for accounts
#[derive(Debug, Clone, PartialEq)]
pub enum AccountValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidGoal(f64),
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Account name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Account name too long ({} chars, max 100)", len)
            }
            Self::InvalidGoal(goal) => {
                write!(f, "Savings goal must be a non-negative number, got {}", goal)
            }
        }
    }
}

impl std::error::Error for AccountValidationError {}

/// Birthdays are written as an ISO-8601 timestamp at midnight UTC.
fn serialize_birthday<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&date.format(BIRTHDAY_TIMESTAMP_FORMAT))
}

/// Both full timestamps and bare `YYYY-MM-DD` dates are accepted; a
/// timestamp is truncated to its date.
fn deserialize_birthday<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(date) = NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.date_naive())
        .map_err(|_| serde::de::Error::custom(format!("invalid birthday '{}'", raw)))
}

mod avatar_base64 {
    use super::*;

    pub fn serialize<S>(data: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match data {
            Some(bytes) => serializer.serialize_some(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded: Option<String> = Option::deserialize(deserializer)?;
        encoded
            .map(|s| STANDARD.decode(s.as_bytes()).map_err(serde::de::Error::custom))
            .transpose()
    }
}
