//! Ordered keyword rules mapping a spoken or typed question to a canned,
//! data-backed answer.
//!
//! Rules are checked top to bottom and the first match wins. Keywords overlap
//! ("what's my food budget balance" hits both balance and budget), so the
//! order of `RULES` is the tie-break.

use finsight_core::format::format_currency;
use finsight_core::{Snapshot, Transaction};
use rand::seq::SliceRandom;
use rand::RngCore;
use serde::Serialize;
use tracing::debug;

/// Reply for anything no rule recognizes.
pub const FALLBACK: &str =
    "I'm sorry, I didn't understand that. You can ask about your balance, spending, budgets, or savings tips.";

pub const SAVINGS_TIPS: [&str; 4] = [
    "Try the 50-30-20 rule: 50% needs, 30% wants, 20% savings",
    "Set up automatic transfers to your savings account",
    "Track your daily expenses to identify spending patterns",
    "Consider cooking at home more often to reduce food expenses",
];

pub const NO_BUDGETS: &str =
    "You haven't set up any budgets yet. Would you like me to help you create one?";
pub const BUDGETS_OK: &str = "You're doing well with your budgets this month!";
pub const NO_TRANSACTIONS: &str = "No recent transactions found";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum Intent {
    #[serde(rename = "balance")]
    Balance,
    #[serde(rename = "food-spending")]
    FoodSpending,
    #[serde(rename = "budget-status")]
    BudgetStatus,
    #[serde(rename = "savings-tips")]
    SavingsTips,
    #[serde(rename = "last-transaction")]
    LastTransaction,
    #[serde(rename = "unknown")]
    Unknown,
}

/// One row of the rule table
pub struct Rule {
    pub intent: Intent,
    /// Receives the lowercased command
    pub matches: fn(&str) -> bool,
    pub respond: fn(&Snapshot, &mut dyn RngCore) -> String,
}

pub const RULES: &[Rule] = &[
    Rule { intent: Intent::Balance, matches: asks_balance, respond: answer_balance },
    Rule { intent: Intent::FoodSpending, matches: asks_food_spending, respond: answer_food_spending },
    Rule { intent: Intent::BudgetStatus, matches: asks_budget, respond: answer_budget },
    Rule { intent: Intent::SavingsTips, matches: asks_savings_tips, respond: answer_savings_tip },
    Rule { intent: Intent::LastTransaction, matches: asks_last_transaction, respond: answer_last_transaction },
];

fn matching_rule(lowered: &str) -> Option<&'static Rule> {
    RULES.iter().find(|r| (r.matches)(lowered))
}

/// Which rule would answer `command`.
pub fn classify(command: &str) -> Intent {
    matching_rule(&command.to_lowercase())
        .map(|r| r.intent)
        .unwrap_or(Intent::Unknown)
}

/// Answer `command` from `snapshot`. Never fails; unknown input gets [`FALLBACK`].
pub fn interpret(command: &str, snapshot: &Snapshot) -> String {
    interpret_with_rng(command, snapshot, &mut rand::thread_rng())
}

/// [`interpret`] with an explicit source of randomness for the tips rule.
pub fn interpret_with_rng<R: RngCore>(command: &str, snapshot: &Snapshot, rng: &mut R) -> String {
    let lowered = command.to_lowercase();
    match matching_rule(&lowered) {
        Some(rule) => {
            debug!(intent = ?rule.intent, "command matched");
            (rule.respond)(snapshot, rng)
        }
        None => {
            debug!(command = %lowered, "no rule matched");
            FALLBACK.to_string()
        }
    }
}

// --- predicates ---

fn asks_balance(c: &str) -> bool {
    c.contains("balance") || c.contains("total money")
}

fn asks_food_spending(c: &str) -> bool {
    c.contains("spent") && (c.contains("food") || c.contains("grocery"))
}

fn asks_budget(c: &str) -> bool {
    c.contains("budget")
}

fn asks_savings_tips(c: &str) -> bool {
    c.contains("save money") || c.contains("savings tips")
}

fn asks_last_transaction(c: &str) -> bool {
    c.contains("last transaction") || c.contains("recent spending")
}

// --- responders ---

fn answer_balance(snap: &Snapshot, _rng: &mut dyn RngCore) -> String {
    let total = finsight_core::summary::total_balance(&snap.accounts);
    format!("Your total balance is {}", format_currency(total))
}

fn answer_food_spending(snap: &Snapshot, _rng: &mut dyn RngCore) -> String {
    let spent: f64 = snap
        .transactions
        .iter()
        .filter(|t| t.is_debit() && t.category.to_lowercase().contains("food"))
        .map(|t| t.amount)
        .sum();
    format!("You've spent {} on food this month", format_currency(spent))
}

fn answer_budget(snap: &Snapshot, _rng: &mut dyn RngCore) -> String {
    if snap.budgets.is_empty() {
        return NO_BUDGETS.to_string();
    }
    let over: Vec<_> = snap.budgets.iter().filter(|b| b.is_over()).collect();
    match over.first() {
        Some(first) => format!(
            "You're over budget in {} categories. Consider reducing spending in {}",
            over.len(),
            first.category
        ),
        None => BUDGETS_OK.to_string(),
    }
}

fn answer_savings_tip(_snap: &Snapshot, rng: &mut dyn RngCore) -> String {
    SAVINGS_TIPS
        .choose(rng)
        .copied()
        .unwrap_or(SAVINGS_TIPS[0])
        .to_string()
}

fn answer_last_transaction(snap: &Snapshot, _rng: &mut dyn RngCore) -> String {
    match most_recent(&snap.transactions) {
        Some(t) => format!(
            "Your last transaction was {} for {}",
            format_currency(t.amount),
            t.description
        ),
        None => NO_TRANSACTIONS.to_string(),
    }
}

/// Latest by date; on a tie the one listed first wins.
fn most_recent(transactions: &[Transaction]) -> Option<&Transaction> {
    transactions
        .iter()
        .fold(None, |best: Option<&Transaction>, t| match best {
            Some(b) if b.date >= t.date => Some(b),
            _ => Some(t),
        })
}
