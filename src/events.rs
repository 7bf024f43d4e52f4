//! Change notifications for ledger consumers
//!
//! Views that display the ledger subscribe here instead of polling the
//! store. Every successful mutation publishes one event after the ledger has
//! been saved.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Mutex;

use crate::models::{AccountId, TransactionId};

/// Something changed in the ledger
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerEvent {
    /// The ledger was (re)loaded from disk
    Loaded { accounts: usize },
    AccountCreated(AccountId),
    AccountUpdated(AccountId),
    AccountDeleted(AccountId),
    TransactionRecorded {
        account_id: AccountId,
        transaction_id: TransactionId,
    },
    /// The whole ledger was replaced from a backup
    Replaced { accounts: usize },
}

/// Fan-out of ledger events to any number of subscribers
#[derive(Default)]
pub struct EventBus {
    subscribers: Mutex<Vec<Sender<LedgerEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new listener
    pub fn subscribe(&self) -> Receiver<LedgerEvent> {
        let (sender, receiver) = mpsc::channel();
        self.subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(sender);
        receiver
    }

    /// Deliver an event to every live subscriber
    pub fn publish(&self, event: LedgerEvent) {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        // Dropped receivers are pruned rather than treated as errors.
        subscribers.retain(|sender| sender.send(event.clone()).is_ok());
    }
}
