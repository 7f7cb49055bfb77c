//! Store: a small observable container, and the session built on it.
//!
//! `Store<T>` knows nothing about finance data. It holds one value, hands out
//! read access, and notifies subscribers after every change. `Session` layers
//! the bank-link flag and seed loading on top of a `Store<Snapshot>`.
//!
//! Single-threaded by design of the app: subscribers run synchronously inside
//! `update`/`set`, in subscription order.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::error::ModelError;
use crate::finance::{Goal, Snapshot, Transaction};
use crate::link::{BankLink, LinkError};
use crate::seed::seed_snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Listener<T> = Box<dyn FnMut(&T)>;

pub struct Store<T> {
    value: T,
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener<T>)>,
}

impl<T: Default> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Store<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            next_id: 0,
            listeners: Vec::new(),
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    /// Mutate the value in place, then notify.
    pub fn update(&mut self, f: impl FnOnce(&mut T)) {
        f(&mut self.value);
        self.notify();
    }

    /// Replace the value, then notify.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.notify();
    }

    fn notify(&mut self) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.value);
        }
    }
}

/// Session-scoped data. Nothing survives the process.
#[derive(Default)]
pub struct Session {
    bank_linked: bool,
    data: Store<Snapshot>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an externally supplied snapshot (already linked).
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            bank_linked: true,
            data: Store::new(snapshot),
        }
    }

    pub fn bank_linked(&self) -> bool {
        self.bank_linked
    }

    pub fn snapshot(&self) -> &Snapshot {
        self.data.get()
    }

    pub fn store_mut(&mut self) -> &mut Store<Snapshot> {
        &mut self.data
    }

    /// Mark the bank as linked and load data.
    pub fn link_bank(&mut self, now: DateTime<Utc>) {
        self.bank_linked = true;
        info!("bank linked");
        self.refresh(now);
    }

    /// Finish a [`BankLink`] flow (linked or skipped) and load data.
    pub fn complete_link(&mut self, link: &BankLink, now: DateTime<Utc>) -> Result<(), LinkError> {
        match link {
            BankLink::Linked { .. } => {
                self.link_bank(now);
                Ok(())
            }
            BankLink::Select => Err(LinkError::NoBankSelected),
            BankLink::Otp { bank } => Err(LinkError::OtpPending(bank.name)),
        }
    }

    /// Reload the seed dataset. Does nothing until a bank is linked.
    /// Returns whether data was loaded.
    pub fn refresh(&mut self, now: DateTime<Utc>) -> bool {
        if !self.bank_linked {
            debug!("refresh skipped: no linked bank");
            return false;
        }
        self.data.set(seed_snapshot(now));
        true
    }

    /// Record a new expense at the top of the transaction list.
    pub fn add_transaction(&mut self, txn: Transaction) {
        debug!(id = %txn.id, amount = txn.amount, "adding transaction");
        self.data.update(|snap| snap.transactions.insert(0, txn));
    }

    /// Append a goal after validating it. Invalid goals leave the store untouched.
    pub fn add_goal(&mut self, goal: Goal) -> Result<(), ModelError> {
        goal.validate()?;
        info!(id = %goal.id, title = %goal.title, target = goal.target_amount, "adding goal");
        self.data.update(|snap| snap.goals.push(goal));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finance::Direction;
    use chrono::NaiveDate;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_subscribe_and_notify() {
        let mut store = Store::new(0_i32);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        store.subscribe(move |v| sink.borrow_mut().push(*v));

        store.set(3);
        store.update(|v| *v += 1);
        assert_eq!(*seen.borrow(), vec![3, 4]);
        assert_eq!(*store.get(), 4);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut store = Store::new(String::new());
        let count = Rc::new(RefCell::new(0));
        let c = count.clone();
        let id = store.subscribe(move |_| *c.borrow_mut() += 1);

        store.set("a".into());
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.set("b".into());
        assert_eq!(*count.borrow(), 1);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_session_refresh_requires_link() {
        let mut session = Session::new();
        assert!(!session.refresh(Utc::now()));
        assert!(session.snapshot().is_empty());

        session.link_bank(Utc::now());
        assert!(session.bank_linked());
        assert_eq!(session.snapshot().accounts.len(), 3);
    }

    #[test]
    fn test_add_transaction_goes_first() {
        let mut session = Session::new();
        session.link_bank(Utc::now());
        let date = NaiveDate::from_ymd_opt(2025, 1, 12).unwrap();
        session.add_transaction(Transaction::new("r1", 450.0, "Cafe Mocha", "Other", date, Direction::Debit, "HDFC Savings"));
        assert_eq!(session.snapshot().transactions[0].id, "r1");
        assert_eq!(session.snapshot().transactions.len(), 5);
    }

    #[test]
    fn test_complete_link_requires_finished_flow() {
        let mut link = BankLink::new();
        let mut session = Session::new();
        assert_eq!(session.complete_link(&link, Utc::now()), Err(LinkError::NoBankSelected));

        link.select_bank("icici").unwrap();
        assert_eq!(
            session.complete_link(&link, Utc::now()),
            Err(LinkError::OtpPending("ICICI Bank"))
        );
        assert!(!session.bank_linked());

        link.skip();
        session.complete_link(&link, Utc::now()).unwrap();
        assert!(session.bank_linked());
        assert_eq!(session.snapshot().accounts.len(), 3);
    }

    #[test]
    fn test_add_goal_validates() {
        let mut session = Session::new();
        session.link_bank(Utc::now());
        let notified = Rc::new(RefCell::new(0));
        let n = notified.clone();
        session.store_mut().subscribe(move |_| *n.borrow_mut() += 1);

        let deadline = NaiveDate::from_ymd_opt(2026, 6, 30).unwrap();
        let mut goal = Goal {
            id: "g3".into(),
            title: "New Laptop".into(),
            target_amount: 0.0,
            current_amount: 0.0,
            deadline,
            category: "Other".into(),
        };
        assert!(matches!(session.add_goal(goal.clone()), Err(ModelError::NonPositive { .. })));
        assert_eq!(session.snapshot().goals.len(), 2);
        assert_eq!(*notified.borrow(), 0);

        goal.target_amount = 90000.0;
        session.add_goal(goal).unwrap();
        assert_eq!(session.snapshot().goals.last().unwrap().title, "New Laptop");
        assert_eq!(*notified.borrow(), 1);
    }
}
