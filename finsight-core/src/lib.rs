//! finsight-core: finance record types, seed data, session store and aggregates

pub mod calendar;
pub mod error;
pub mod finance;
pub mod format;
pub mod goals;
pub mod insights;
pub mod link;
pub mod search;
pub mod seed;
pub mod store;
pub mod summary;
pub mod time;

pub use error::ModelError;
pub use finance::{
    Account, AccountKind, Bill, BillCategory, Budget, BudgetPeriod, Direction, Goal, Snapshot,
    Transaction,
};
pub use format::{format_currency, format_date, format_percentage};
pub use goals::ProgressTier;
pub use insights::Period;
pub use link::{BankLink, LinkError, BANKS};
pub use search::{DateRange, SearchSummary, TransactionFilter};
pub use seed::seed_snapshot;
pub use store::{Session, Store, SubscriptionId};
pub use summary::{BudgetHealth, BudgetStatus, DashboardSummary};
