//! Account service
//!
//! Business rules for opening, editing and closing children's accounts on
//! top of the ledger store: name checks, lookups by name or id, audit
//! entries and the computed summary shown next to each account.

use chrono::NaiveDate;

use crate::audit::{AuditEntry, EntityType};
use crate::error::{PiggyError, PiggyResult};
use crate::models::{Account, AccountId, Gender, Money, NewAccount};
use crate::storage::Storage;

/// Service for account management
pub struct AccountService<'a> {
    storage: &'a Storage,
}

/// Summary of an account with computed fields
#[derive(Debug, Clone)]
pub struct AccountSummary {
    pub account: Account,
    /// Age in whole years on the day the summary was taken
    pub age: u32,
    pub transaction_count: usize,
    pub total_deposited: Money,
    pub total_withdrawn: Money,
    pub short_term_progress: Option<f64>,
    pub long_term_progress: Option<f64>,
}

/// Edits to an existing account; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct AccountChanges {
    pub name: Option<String>,
    pub gender: Option<Gender>,
    pub birthday: Option<NaiveDate>,
    pub short_term_wish: Option<String>,
    pub long_term_wish: Option<String>,
    pub short_term_savings_goal: Option<Money>,
    pub long_term_savings_goal: Option<Money>,
}

impl AccountChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.gender.is_none()
            && self.birthday.is_none()
            && self.short_term_wish.is_none()
            && self.long_term_wish.is_none()
            && self.short_term_savings_goal.is_none()
            && self.long_term_savings_goal.is_none()
    }

    fn apply_to(self, account: &mut Account) -> Vec<String> {
        let mut diff = Vec::new();

        if let Some(name) = self.name {
            let name = name.trim().to_string();
            if name != account.name {
                diff.push(format!("name: {} -> {}", account.name, name));
                account.name = name;
            }
        }
        if let Some(gender) = self.gender {
            if gender != account.gender {
                diff.push(format!("gender: {} -> {}", account.gender, gender));
                account.gender = gender;
            }
        }
        if let Some(birthday) = self.birthday {
            if birthday != account.birthday {
                diff.push(format!("birthday: {} -> {}", account.birthday, birthday));
                account.birthday = birthday;
            }
        }
        if let Some(wish) = self.short_term_wish {
            if wish != account.short_term_wish {
                diff.push("short-term wish".to_string());
                account.short_term_wish = wish;
            }
        }
        if let Some(wish) = self.long_term_wish {
            if wish != account.long_term_wish {
                diff.push("long-term wish".to_string());
                account.long_term_wish = wish;
            }
        }
        if let Some(goal) = self.short_term_savings_goal {
            if goal != account.short_term_savings_goal {
                diff.push(format!(
                    "short-term goal: {} -> {}",
                    account.short_term_savings_goal, goal
                ));
                account.short_term_savings_goal = goal;
            }
        }
        if let Some(goal) = self.long_term_savings_goal {
            if goal != account.long_term_savings_goal {
                diff.push(format!(
                    "long-term goal: {} -> {}",
                    account.long_term_savings_goal, goal
                ));
                account.long_term_savings_goal = goal;
            }
        }

        diff
    }
}

impl<'a> AccountService<'a> {
    /// Create a new account service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Open a new account
    pub fn create(&self, fields: NewAccount) -> PiggyResult<Account> {
        let candidate = Account::new(fields.clone());
        candidate
            .validate()
            .map_err(|e| PiggyError::Validation(e.to_string()))?;

        if self.storage.ledger.name_exists(&candidate.name, None)? {
            return Err(PiggyError::Duplicate {
                entity_type: "Account",
                identifier: candidate.name,
            });
        }

        let account = self.storage.ledger.create_account(fields)?;

        self.storage.audit(AuditEntry::create(
            EntityType::Account,
            account.id.to_string(),
            Some(account.name.clone()),
            &account,
        ));

        Ok(account)
    }

    /// Get an account by ID
    pub fn get(&self, id: AccountId) -> PiggyResult<Option<Account>> {
        self.storage.ledger.get(id)
    }

    /// Find an account by name, full id, or short id
    pub fn find(&self, identifier: &str) -> PiggyResult<Option<Account>> {
        self.storage.ledger.find(identifier)
    }

    /// Like `find`, but a missing account is an error
    pub fn find_required(&self, identifier: &str) -> PiggyResult<Account> {
        self.find(identifier)?
            .ok_or_else(|| PiggyError::account_not_found(identifier))
    }

    /// All accounts in ledger order
    pub fn list(&self) -> PiggyResult<Vec<Account>> {
        self.storage.ledger.accounts()
    }

    /// Computed figures for one account as of `today`
    pub fn summary(&self, account: &Account, today: NaiveDate) -> AccountSummary {
        let (deposits, withdrawals): (Vec<_>, Vec<_>) =
            account.transactions.iter().partition(|t| t.is_deposit());

        AccountSummary {
            account: account.clone(),
            age: account.age_on(today),
            transaction_count: account.transactions.len(),
            total_deposited: deposits.iter().map(|t| t.amount).sum(),
            total_withdrawn: withdrawals.iter().map(|t| t.amount).sum(),
            short_term_progress: account.goal_progress(account.short_term_savings_goal),
            long_term_progress: account.goal_progress(account.long_term_savings_goal),
        }
    }

    /// Summaries for every account
    pub fn list_summaries(&self, today: NaiveDate) -> PiggyResult<Vec<AccountSummary>> {
        Ok(self
            .list()?
            .iter()
            .map(|account| self.summary(account, today))
            .collect())
    }

    /// Apply edits to an account's editable fields
    pub fn update(&self, id: AccountId, changes: AccountChanges) -> PiggyResult<Account> {
        let mut account = self
            .get(id)?
            .ok_or_else(|| PiggyError::account_not_found(id.to_string()))?;
        let before = account.clone();

        let diff = changes.apply_to(&mut account);

        account
            .validate()
            .map_err(|e| PiggyError::Validation(e.to_string()))?;

        if self.storage.ledger.name_exists(&account.name, Some(id))? {
            return Err(PiggyError::Duplicate {
                entity_type: "Account",
                identifier: account.name,
            });
        }

        self.store_update(&before, account, diff)
    }

    /// Replace or clear the account's avatar image
    pub fn set_avatar(&self, id: AccountId, avatar: Option<Vec<u8>>) -> PiggyResult<Account> {
        let mut account = self
            .get(id)?
            .ok_or_else(|| PiggyError::account_not_found(id.to_string()))?;
        let before = account.clone();

        let diff = match &avatar {
            Some(bytes) => vec![format!("avatar: {} bytes", bytes.len())],
            None => vec!["avatar removed".to_string()],
        };
        account.avatar_data = avatar;

        self.store_update(&before, account, diff)
    }

    fn store_update(
        &self,
        before: &Account,
        account: Account,
        diff: Vec<String>,
    ) -> PiggyResult<Account> {
        if !self.storage.ledger.update_account(&account)? {
            // Deleted between the read and the write
            return Err(PiggyError::account_not_found(account.id.to_string()));
        }

        let stored = self
            .get(account.id)?
            .ok_or_else(|| PiggyError::account_not_found(account.id.to_string()))?;

        self.storage.audit(AuditEntry::update(
            EntityType::Account,
            stored.id.to_string(),
            Some(stored.name.clone()),
            before,
            &stored,
            (!diff.is_empty()).then(|| diff.join(", ")),
        ));

        Ok(stored)
    }

    /// Close an account, dropping its transactions with it
    pub fn delete(&self, id: AccountId) -> PiggyResult<Account> {
        let removed = self
            .storage
            .ledger
            .delete_account(id)?
            .ok_or_else(|| PiggyError::account_not_found(id.to_string()))?;

        self.storage.audit(AuditEntry::delete(
            EntityType::Account,
            removed.id.to_string(),
            Some(removed.name.clone()),
            &removed,
        ));

        Ok(removed)
    }

    /// Sum of every account's balance
    pub fn total_balance(&self) -> PiggyResult<Money> {
        self.storage.ledger.total_balance()
    }
}
