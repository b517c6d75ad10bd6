//! The ledger aggregator: balance and history, derived per request.

use rust_decimal::Decimal;

use brewtab_core::{AccountId, DepositId, DomainError, DomainResult, PurchaseId};

use crate::deposit::Deposit;
use crate::history::{TransactionHistory, TransactionView};
use crate::purchase::Purchase;

/// Append-only purchase log contract. Events are never updated; only
/// create and delete exist.
pub trait PurchaseLog: Send + Sync {
    fn create(&self, purchase: Purchase) -> DomainResult<()>;

    /// All purchases owned by `account_id`, in insertion order.
    fn find_by_account(&self, account_id: AccountId) -> DomainResult<Vec<Purchase>>;

    /// `RecordNotFound` when no such purchase exists.
    fn delete_by_id(&self, id: PurchaseId) -> DomainResult<()>;
}

/// Append-only deposit log contract.
pub trait DepositLog: Send + Sync {
    fn create(&self, deposit: Deposit) -> DomainResult<()>;

    /// All deposits owned by `account_id`, in insertion order.
    fn find_by_account(&self, account_id: AccountId) -> DomainResult<Vec<Deposit>>;

    /// `RecordNotFound` when no such deposit exists.
    fn delete_by_id(&self, id: DepositId) -> DomainResult<()>;
}

/// Minimal account-existence check the aggregator depends on.
pub trait AccountDirectory: Send + Sync {
    fn exists(&self, account_id: AccountId) -> DomainResult<bool>;
}

impl<P> PurchaseLog for std::sync::Arc<P>
where
    P: PurchaseLog + ?Sized,
{
    fn create(&self, purchase: Purchase) -> DomainResult<()> {
        (**self).create(purchase)
    }

    fn find_by_account(&self, account_id: AccountId) -> DomainResult<Vec<Purchase>> {
        (**self).find_by_account(account_id)
    }

    fn delete_by_id(&self, id: PurchaseId) -> DomainResult<()> {
        (**self).delete_by_id(id)
    }
}

impl<D> DepositLog for std::sync::Arc<D>
where
    D: DepositLog + ?Sized,
{
    fn create(&self, deposit: Deposit) -> DomainResult<()> {
        (**self).create(deposit)
    }

    fn find_by_account(&self, account_id: AccountId) -> DomainResult<Vec<Deposit>> {
        (**self).find_by_account(account_id)
    }

    fn delete_by_id(&self, id: DepositId) -> DomainResult<()> {
        (**self).delete_by_id(id)
    }
}

impl<A> AccountDirectory for std::sync::Arc<A>
where
    A: AccountDirectory + ?Sized,
{
    fn exists(&self, account_id: AccountId) -> DomainResult<bool> {
        (**self).exists(account_id)
    }
}

/// Per-request balance/history computation over the two event logs.
///
/// Both operations are total and side-effect-free: they return a fully
/// aggregated result or a single terminal error, never partial data.
/// There is no snapshot isolation across the two log reads; an event
/// inserted between them is simply included (accepted relaxation).
pub struct LedgerAggregator<A, P, D> {
    accounts: A,
    purchases: P,
    deposits: D,
}

impl<A, P, D> LedgerAggregator<A, P, D>
where
    A: AccountDirectory,
    P: PurchaseLog,
    D: DepositLog,
{
    pub fn new(accounts: A, purchases: P, deposits: D) -> Self {
        Self {
            accounts,
            purchases,
            deposits,
        }
    }

    /// Current balance: credits minus debits over every event of the
    /// account. Decimal accumulation throughout; quantity defaults were
    /// already applied when the purchase was recorded.
    pub fn balance(&self, account_id: AccountId) -> DomainResult<Decimal> {
        self.ensure_account(account_id)?;

        let purchases = self.purchases.find_by_account(account_id)?;
        let deposits = self.deposits.find_by_account(account_id)?;

        let debit: Decimal = purchases.iter().map(Purchase::total).sum();
        let credit: Decimal = deposits.iter().map(|d| d.amount).sum();

        Ok(credit - debit)
    }

    /// Unified history, most recent first.
    ///
    /// The comparator is `Ord` on the timestamps themselves and the sort
    /// is stable, so entries with equal timestamps keep their original
    /// relative order (purchases ahead of deposits, each in insertion
    /// order).
    pub fn history(&self, account_id: AccountId) -> DomainResult<TransactionHistory> {
        self.ensure_account(account_id)?;

        let purchases = self.purchases.find_by_account(account_id)?;
        let deposits = self.deposits.find_by_account(account_id)?;

        let mut entries: Vec<TransactionView> = purchases
            .into_iter()
            .map(TransactionView::from)
            .chain(deposits.into_iter().map(TransactionView::from))
            .collect();

        if entries.is_empty() {
            return Ok(TransactionHistory::Empty);
        }

        entries.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

        Ok(TransactionHistory::Entries(entries))
    }

    fn ensure_account(&self, account_id: AccountId) -> DomainResult<()> {
        if self.accounts.exists(account_id)? {
            Ok(())
        } else {
            Err(DomainError::AccountNotFound)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::{Arc, RwLock};

    use chrono::{Duration, Utc};
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    use super::*;

    /// Vec-backed test doubles for the three collaborator contracts.
    #[derive(Default)]
    struct FakeLedgerStore {
        accounts: RwLock<HashSet<AccountId>>,
        purchases: RwLock<Vec<Purchase>>,
        deposits: RwLock<Vec<Deposit>>,
    }

    impl FakeLedgerStore {
        fn with_account() -> (Arc<Self>, AccountId) {
            let store = Arc::new(Self::default());
            let id = AccountId::new();
            store.accounts.write().unwrap().insert(id);
            (store, id)
        }
    }

    impl AccountDirectory for FakeLedgerStore {
        fn exists(&self, account_id: AccountId) -> DomainResult<bool> {
            Ok(self.accounts.read().unwrap().contains(&account_id))
        }
    }

    impl PurchaseLog for FakeLedgerStore {
        fn create(&self, purchase: Purchase) -> DomainResult<()> {
            self.purchases.write().unwrap().push(purchase);
            Ok(())
        }

        fn find_by_account(&self, account_id: AccountId) -> DomainResult<Vec<Purchase>> {
            Ok(self
                .purchases
                .read()
                .unwrap()
                .iter()
                .filter(|p| p.account_id == account_id)
                .cloned()
                .collect())
        }

        fn delete_by_id(&self, id: PurchaseId) -> DomainResult<()> {
            let mut purchases = self.purchases.write().unwrap();
            let before = purchases.len();
            purchases.retain(|p| p.id != id);
            if purchases.len() == before {
                return Err(DomainError::RecordNotFound);
            }
            Ok(())
        }
    }

    impl DepositLog for FakeLedgerStore {
        fn create(&self, deposit: Deposit) -> DomainResult<()> {
            self.deposits.write().unwrap().push(deposit);
            Ok(())
        }

        fn find_by_account(&self, account_id: AccountId) -> DomainResult<Vec<Deposit>> {
            Ok(self
                .deposits
                .read()
                .unwrap()
                .iter()
                .filter(|d| d.account_id == account_id)
                .cloned()
                .collect())
        }

        fn delete_by_id(&self, id: DepositId) -> DomainResult<()> {
            let mut deposits = self.deposits.write().unwrap();
            let before = deposits.len();
            deposits.retain(|d| d.id != id);
            if deposits.len() == before {
                return Err(DomainError::RecordNotFound);
            }
            Ok(())
        }
    }

    fn aggregator(
        store: &Arc<FakeLedgerStore>,
    ) -> LedgerAggregator<Arc<FakeLedgerStore>, Arc<FakeLedgerStore>, Arc<FakeLedgerStore>> {
        LedgerAggregator::new(Arc::clone(store), Arc::clone(store), Arc::clone(store))
    }

    #[test]
    fn balance_is_credits_minus_debits() {
        let (store, id) = FakeLedgerStore::with_account();

        // 0.5 + 0.5 + 3×0.5 debit, 10 credit.
        PurchaseLog::create(&*store, Purchase::new(id, "coffee", Some(1), dec!(0.5))).unwrap();
        PurchaseLog::create(&*store, Purchase::new(id, "coffee", Some(1), dec!(0.5))).unwrap();
        PurchaseLog::create(&*store, Purchase::new(id, "coffee", Some(3), dec!(0.5))).unwrap();
        DepositLog::create(&*store, Deposit::new(id, "top-up", dec!(10))).unwrap();

        assert_eq!(aggregator(&store).balance(id).unwrap(), dec!(7.5));
    }

    #[test]
    fn balance_with_no_events_is_zero() {
        let (store, id) = FakeLedgerStore::with_account();
        assert_eq!(aggregator(&store).balance(id).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn purchase_without_quantity_debits_one_unit() {
        let (store, id) = FakeLedgerStore::with_account();
        PurchaseLog::create(&*store, Purchase::new(id, "coffee", None, dec!(0.5))).unwrap();

        assert_eq!(aggregator(&store).balance(id).unwrap(), dec!(-0.5));
    }

    #[test]
    fn unknown_account_fails_not_found() {
        let (store, _) = FakeLedgerStore::with_account();
        let agg = aggregator(&store);
        let missing = AccountId::new();

        assert_eq!(agg.balance(missing), Err(DomainError::AccountNotFound));
        assert_eq!(agg.history(missing), Err(DomainError::AccountNotFound));
    }

    #[test]
    fn history_contains_every_event_of_the_account() {
        let (store, id) = FakeLedgerStore::with_account();
        let other = AccountId::new();
        store.accounts.write().unwrap().insert(other);

        PurchaseLog::create(&*store, Purchase::new(id, "coffee", None, dec!(0.5))).unwrap();
        DepositLog::create(&*store, Deposit::new(id, "top-up", dec!(5))).unwrap();
        DepositLog::create(&*store, Deposit::new(other, "other top-up", dec!(1))).unwrap();

        let history = aggregator(&store).history(id).unwrap();
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn history_is_ordered_most_recent_first() {
        let (store, id) = FakeLedgerStore::with_account();
        let base = Utc::now();

        let mut old = Purchase::new(id, "old", None, dec!(1));
        old.created_at = base - Duration::minutes(10);
        let mut mid = Deposit::new(id, "mid", dec!(2));
        mid.created_at = base - Duration::minutes(5);
        let mut new = Purchase::new(id, "new", None, dec!(3));
        new.created_at = base;

        // Insert out of order on purpose.
        PurchaseLog::create(&*store, old).unwrap();
        PurchaseLog::create(&*store, new).unwrap();
        DepositLog::create(&*store, mid).unwrap();

        let TransactionHistory::Entries(entries) = aggregator(&store).history(id).unwrap() else {
            panic!("expected entries");
        };

        let labels: Vec<&str> = entries.iter().map(|e| e.label()).collect();
        assert_eq!(labels, vec!["new", "mid", "old"]);

        for pair in entries.windows(2) {
            assert!(pair[0].created_at() >= pair[1].created_at());
        }
    }

    #[test]
    fn equal_timestamps_keep_insertion_order() {
        let (store, id) = FakeLedgerStore::with_account();
        let at = Utc::now();

        for label in ["first", "second", "third"] {
            let mut p = Purchase::new(id, label, None, dec!(1));
            p.created_at = at;
            PurchaseLog::create(&*store, p).unwrap();
        }
        let mut d = Deposit::new(id, "fourth", dec!(1));
        d.created_at = at;
        DepositLog::create(&*store, d).unwrap();

        let TransactionHistory::Entries(entries) = aggregator(&store).history(id).unwrap() else {
            panic!("expected entries");
        };

        let labels: Vec<&str> = entries.iter().map(|e| e.label()).collect();
        assert_eq!(labels, vec!["first", "second", "third", "fourth"]);
    }

    #[test]
    fn empty_history_is_a_distinct_signal() {
        let (store, id) = FakeLedgerStore::with_account();
        assert_eq!(
            aggregator(&store).history(id).unwrap(),
            TransactionHistory::Empty
        );
    }

    #[test]
    fn reads_are_idempotent_without_intervening_writes() {
        let (store, id) = FakeLedgerStore::with_account();
        PurchaseLog::create(&*store, Purchase::new(id, "coffee", Some(2), dec!(0.5))).unwrap();
        DepositLog::create(&*store, Deposit::new(id, "top-up", dec!(3))).unwrap();

        let agg = aggregator(&store);
        assert_eq!(agg.balance(id).unwrap(), agg.balance(id).unwrap());
        assert_eq!(agg.history(id).unwrap(), agg.history(id).unwrap());
    }

    #[test]
    fn history_signed_amounts_sum_to_the_balance() {
        let (store, id) = FakeLedgerStore::with_account();
        PurchaseLog::create(&*store, Purchase::new(id, "coffee", Some(3), dec!(0.5))).unwrap();
        DepositLog::create(&*store, Deposit::new(id, "top-up", dec!(10))).unwrap();

        let agg = aggregator(&store);
        let TransactionHistory::Entries(entries) = agg.history(id).unwrap() else {
            panic!("expected entries");
        };
        let summed: Decimal = entries.iter().map(TransactionView::signed_amount).sum();

        assert_eq!(summed, agg.balance(id).unwrap());
    }

    proptest! {
        #[test]
        fn balance_matches_the_naive_formula(
            purchases in proptest::collection::vec((0u32..50, 0i64..10_000), 0..20),
            deposits in proptest::collection::vec(1i64..10_000, 0..20),
        ) {
            let (store, id) = FakeLedgerStore::with_account();

            let mut expected = Decimal::ZERO;
            for &(qty, cents) in &purchases {
                let price = Decimal::new(cents, 2);
                expected -= Decimal::from(qty) * price;
                PurchaseLog::create(&*store, Purchase::new(id, "p", Some(qty), price)).unwrap();
            }
            for &cents in &deposits {
                let amount = Decimal::new(cents, 2);
                expected += amount;
                DepositLog::create(&*store, Deposit::new(id, "d", amount)).unwrap();
            }

            prop_assert_eq!(aggregator(&store).balance(id).unwrap(), expected);
        }

        #[test]
        fn history_len_is_purchases_plus_deposits(
            n_purchases in 0usize..10,
            n_deposits in 0usize..10,
        ) {
            let (store, id) = FakeLedgerStore::with_account();
            for _ in 0..n_purchases {
                PurchaseLog::create(&*store, Purchase::new(id, "p", None, dec!(1))).unwrap();
            }
            for _ in 0..n_deposits {
                DepositLog::create(&*store, Deposit::new(id, "d", dec!(1))).unwrap();
            }

            let history = aggregator(&store).history(id).unwrap();
            prop_assert_eq!(history.len(), n_purchases + n_deposits);
            prop_assert_eq!(history.is_empty(), n_purchases + n_deposits == 0);
        }
    }
}
