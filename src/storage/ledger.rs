//! Ledger store
//!
//! Holds every account (with its nested transactions) in memory and writes
//! the whole collection to `bankData.json` after each mutation. All reads,
//! mutations and saves go through one mutex, so a save always sees a
//! consistent ledger and concurrent writers cannot lose each other's updates.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::error::{PiggyError, PiggyResult};
use crate::events::{EventBus, LedgerEvent};
use crate::models::{
    Account, AccountId, Ledger, Money, NewAccount, Transaction, TransactionKind,
};

use super::file_io::{read_json, write_json_atomic};

/// In-memory ledger persisted as a single JSON document
pub struct LedgerStore {
    path: PathBuf,
    data: Mutex<Ledger>,
    events: EventBus,
}

impl LedgerStore {
    /// Create an empty store backed by `path`; call `load` to read it
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: Mutex::new(Vec::new()),
            events: EventBus::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    fn lock(&self) -> PiggyResult<MutexGuard<'_, Ledger>> {
        self.data
            .lock()
            .map_err(|e| PiggyError::Storage(format!("Failed to acquire ledger lock: {}", e)))
    }

    fn persist(&self, data: &Ledger) -> PiggyResult<()> {
        write_json_atomic(&self.path, data)?;
        tracing::debug!(path = %self.path.display(), accounts = data.len(), "ledger saved");
        Ok(())
    }

    /// Apply `change` under the lock and save the result.
    ///
    /// `change` returns `None` when it left the ledger untouched, in which
    /// case nothing is written. If `change` or the save fails, the in-memory
    /// ledger is put back as it was.
    fn mutate<T>(
        &self,
        change: impl FnOnce(&mut Ledger) -> PiggyResult<Option<T>>,
    ) -> PiggyResult<Option<T>> {
        let mut data = self.lock()?;
        let snapshot = data.clone();

        let outcome = match change(&mut *data) {
            Ok(Some(value)) => self.persist(&data).map(|_| Some(value)),
            other => other,
        };

        if outcome.is_err() {
            *data = snapshot;
        }
        outcome
    }

    /// Load the ledger from disk, replacing whatever is in memory.
    ///
    /// A missing file gives an empty ledger. So does a file that fails to
    /// decode: the problem is logged and the process carries on.
    pub fn load(&self) -> PiggyResult<usize> {
        let mut data = self.lock()?;

        let loaded: Ledger = match read_json(&self.path) {
            Ok(ledger) => ledger,
            Err(PiggyError::Decode(reason)) => {
                tracing::warn!(%reason, "ledger file could not be decoded, starting empty");
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        for account in &loaded {
            let computed = account.computed_balance();
            if (computed.value() - account.balance.value()).abs() > 0.005 {
                tracing::warn!(
                    account = %account.id,
                    stored = %account.balance,
                    computed = %computed,
                    "stored balance does not match transaction history"
                );
            }
        }

        *data = loaded;
        let count = data.len();
        drop(data);

        tracing::debug!(path = %self.path.display(), accounts = count, "ledger loaded");
        self.events.publish(LedgerEvent::Loaded { accounts: count });
        Ok(count)
    }

    /// Write the current ledger to disk
    pub fn save(&self) -> PiggyResult<()> {
        let data = self.lock()?;
        self.persist(&data)
    }

    /// Open a new account with a zero balance and append it to the ledger
    pub fn create_account(&self, fields: NewAccount) -> PiggyResult<Account> {
        let account = Account::new(fields);
        let created = account.clone();

        self.mutate(move |data| {
            data.push(account);
            Ok(Some(()))
        })?;

        self.events.publish(LedgerEvent::AccountCreated(created.id));
        Ok(created)
    }

    /// Record a deposit or withdrawal against an account.
    ///
    /// Rejects amounts that are NaN, infinite, zero or negative, and
    /// withdrawals larger than the current balance. A rejected call changes
    /// nothing.
    pub fn record_transaction(
        &self,
        account_id: AccountId,
        amount: Money,
        kind: TransactionKind,
        note: &str,
    ) -> PiggyResult<Transaction> {
        if !amount.is_valid_amount() {
            return Err(PiggyError::InvalidAmount(format!(
                "{} must be a positive, finite number",
                amount.value()
            )));
        }

        let transaction = self
            .mutate(|data| {
                let account = data
                    .iter_mut()
                    .find(|a| a.id == account_id)
                    .ok_or_else(|| PiggyError::account_not_found(account_id.to_string()))?;

                if kind == TransactionKind::Withdraw && amount.value() > account.balance.value() {
                    return Err(PiggyError::InvalidAmount(format!(
                        "cannot withdraw {} from {} with a balance of {}",
                        amount, account.name, account.balance
                    )));
                }

                let transaction = Transaction::new(account_id, amount, kind, note);
                account.balance = (account.balance + transaction.signed_amount()).sanitized();
                account.transactions.push(transaction.clone());
                Ok(Some(transaction))
            })?
            .ok_or_else(|| PiggyError::Storage("transaction was not recorded".into()))?;

        self.events.publish(LedgerEvent::TransactionRecorded {
            account_id,
            transaction_id: transaction.id,
        });
        Ok(transaction)
    }

    pub fn deposit(&self, account_id: AccountId, amount: Money, note: &str) -> PiggyResult<Transaction> {
        self.record_transaction(account_id, amount, TransactionKind::Deposit, note)
    }

    pub fn withdraw(&self, account_id: AccountId, amount: Money, note: &str) -> PiggyResult<Transaction> {
        self.record_transaction(account_id, amount, TransactionKind::Withdraw, note)
    }

    /// Replace the editable fields of the stored account with the same id.
    ///
    /// Balance and transactions are kept as stored. Returns `false` without
    /// writing anything when no account has that id.
    pub fn update_account(&self, updated: &Account) -> PiggyResult<bool> {
        let changed = self.mutate(|data| {
            Ok(data.iter_mut().find(|a| a.id == updated.id).map(|stored| {
                stored.apply_edits(updated);
            }))
        })?;

        match changed {
            Some(()) => {
                self.events.publish(LedgerEvent::AccountUpdated(updated.id));
                Ok(true)
            }
            None => {
                tracing::debug!(account = %updated.id, "update ignored, no such account");
                Ok(false)
            }
        }
    }

    /// Remove an account together with all of its transactions
    ///
    /// Returns the removed account, or `None` if the id was unknown.
    pub fn delete_account(&self, id: AccountId) -> PiggyResult<Option<Account>> {
        let removed = self.mutate(|data| {
            Ok(data
                .iter()
                .position(|a| a.id == id)
                .map(|index| data.remove(index)))
        })?;

        if removed.is_some() {
            self.events.publish(LedgerEvent::AccountDeleted(id));
        }
        Ok(removed)
    }

    /// Replace the entire ledger (used by restore) and save it
    pub fn replace_all(&self, accounts: Ledger) -> PiggyResult<usize> {
        let count = accounts.len();
        self.mutate(move |data| {
            *data = accounts;
            Ok(Some(()))
        })?;

        self.events.publish(LedgerEvent::Replaced { accounts: count });
        Ok(count)
    }

    /// Every transaction of every account, in no particular order
    pub fn list_all_transactions(&self) -> PiggyResult<Vec<Transaction>> {
        let data = self.lock()?;
        Ok(data
            .iter()
            .flat_map(|a| a.transactions.iter().cloned())
            .collect())
    }

    /// Transactions sorted newest first, optionally for a single account
    pub fn transactions_newest_first(
        &self,
        account_id: Option<AccountId>,
    ) -> PiggyResult<Vec<Transaction>> {
        let mut transactions: Vec<_> = self
            .list_all_transactions()?
            .into_iter()
            .filter(|t| account_id.map_or(true, |id| t.account_id == id))
            .collect();
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(transactions)
    }

    pub fn get(&self, id: AccountId) -> PiggyResult<Option<Account>> {
        let data = self.lock()?;
        Ok(data.iter().find(|a| a.id == id).cloned())
    }

    /// Get an account by name (case-insensitive)
    pub fn find_by_name(&self, name: &str) -> PiggyResult<Option<Account>> {
        let data = self.lock()?;
        let name_lower = name.trim().to_lowercase();
        Ok(data
            .iter()
            .find(|a| a.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// Find an account by name, full id, or short id
    pub fn find(&self, identifier: &str) -> PiggyResult<Option<Account>> {
        if let Some(account) = self.find_by_name(identifier)? {
            return Ok(Some(account));
        }
        let data = self.lock()?;
        Ok(data.iter().find(|a| a.id.matches(identifier)).cloned())
    }

    /// Snapshot of all accounts in ledger order
    pub fn accounts(&self) -> PiggyResult<Ledger> {
        Ok(self.lock()?.clone())
    }

    pub fn count(&self) -> PiggyResult<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> PiggyResult<bool> {
        Ok(self.lock()?.is_empty())
    }

    /// Check whether an account name is already taken
    pub fn name_exists(&self, name: &str, exclude_id: Option<AccountId>) -> PiggyResult<bool> {
        let data = self.lock()?;
        let name_lower = name.trim().to_lowercase();
        Ok(data
            .iter()
            .any(|a| a.name.to_lowercase() == name_lower && Some(a.id) != exclude_id))
    }

    /// Sum of all account balances
    pub fn total_balance(&self) -> PiggyResult<Money> {
        let data = self.lock()?;
        Ok(data.iter().map(|a| a.balance).sum())
    }
}
