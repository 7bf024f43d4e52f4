//! Transaction service
//!
//! Deposits, withdrawals and the transaction history views. Amount rules
//! live in the ledger store; this layer adds audit entries and the
//! presentation ordering.

use std::collections::HashMap;

use crate::audit::{AuditEntry, Operation};
use crate::error::{PiggyError, PiggyResult};
use crate::models::{AccountId, Money, Transaction, TransactionKind};
use crate::storage::Storage;

/// Name shown for a transaction whose account no longer exists
pub const UNKNOWN_ACCOUNT: &str = "Unknown";

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Options for filtering transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Filter by account
    pub account_id: Option<AccountId>,
    /// Only deposits or only withdrawals
    pub kind: Option<TransactionKind>,
    /// Maximum number of transactions to return
    pub limit: Option<usize>,
}

impl TransactionFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by account
    pub fn account(mut self, account_id: AccountId) -> Self {
        self.account_id = Some(account_id);
        self
    }

    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Limit results
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// A transaction together with the name of the account it belongs to
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub transaction: Transaction,
    pub account_name: String,
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a deposit or withdrawal and audit it
    pub fn record(
        &self,
        account_id: AccountId,
        amount: Money,
        kind: TransactionKind,
        note: &str,
    ) -> PiggyResult<Transaction> {
        let account = self
            .storage
            .ledger
            .get(account_id)?
            .ok_or_else(|| PiggyError::account_not_found(account_id.to_string()))?;

        let note = note.trim();
        let transaction = self
            .storage
            .ledger
            .record_transaction(account_id, amount, kind, note)?;

        let (operation, sign) = match kind {
            TransactionKind::Deposit => (Operation::Deposit, "+"),
            TransactionKind::Withdraw => (Operation::Withdraw, "-"),
        };
        let mut summary = format!("{}{}", sign, transaction.amount);
        if !note.is_empty() {
            summary.push(' ');
            summary.push_str(note);
        }

        self.storage.audit(AuditEntry::transaction(
            operation,
            transaction.id.to_string(),
            Some(account.name),
            &transaction,
            summary,
        ));

        Ok(transaction)
    }

    pub fn deposit(&self, account_id: AccountId, amount: Money, note: &str) -> PiggyResult<Transaction> {
        self.record(account_id, amount, TransactionKind::Deposit, note)
    }

    pub fn withdraw(&self, account_id: AccountId, amount: Money, note: &str) -> PiggyResult<Transaction> {
        self.record(account_id, amount, TransactionKind::Withdraw, note)
    }

    /// Transactions matching `filter`, newest first
    pub fn list(&self, filter: &TransactionFilter) -> PiggyResult<Vec<Transaction>> {
        let transactions = self
            .storage
            .ledger
            .transactions_newest_first(filter.account_id)?
            .into_iter()
            .filter(|t| filter.kind.map_or(true, |kind| t.kind == kind));

        Ok(match filter.limit {
            Some(limit) => transactions.take(limit).collect(),
            None => transactions.collect(),
        })
    }

    /// Transactions matching `filter`, newest first, labelled with their
    /// account's current name
    pub fn history(&self, filter: &TransactionFilter) -> PiggyResult<Vec<HistoryEntry>> {
        let names: HashMap<AccountId, String> = self
            .storage
            .ledger
            .accounts()?
            .into_iter()
            .map(|a| (a.id, a.name))
            .collect();

        Ok(self
            .list(filter)?
            .into_iter()
            .map(|transaction| HistoryEntry {
                account_name: names
                    .get(&transaction.account_id)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_ACCOUNT.to_string()),
                transaction,
            })
            .collect())
    }
}
