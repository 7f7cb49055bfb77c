//! Plain-text views printed by the read-only commands.

use chrono::NaiveDate;
use finsight_core::calendar;
use finsight_core::goals::{completed_count, total_saved};
use finsight_core::insights::{self, Period};
use finsight_core::search::{categories, summarize};
use finsight_core::summary::{budget_status, dashboard, recent_transactions, BudgetHealth};
use finsight_core::{format_currency, format_date, format_percentage, ProgressTier, Snapshot, Transaction};

const RECENT_ON_DASHBOARD: usize = 5;

pub fn txn_line(t: &Transaction) -> String {
    format!(
        "{:>11}  {:<24} {:<14} {:>12}",
        format_date(t.date),
        t.description,
        t.category,
        format_currency(t.signed_amount())
    )
}

pub fn print_summary(snap: &Snapshot, today: NaiveDate) {
    let d = dashboard(&snap.accounts, &snap.transactions, today);
    println!("Total balance:      {}", format_currency(d.total_balance));
    println!("Accounts:           {}", d.account_count);
    println!("Income this month:  {}", format_currency(d.month_income));
    println!("Spent this month:   {}", format_currency(d.month_expenses));

    let recent = recent_transactions(&snap.transactions, RECENT_ON_DASHBOARD);
    if recent.is_empty() {
        println!("\nNo transactions yet.");
        return;
    }
    println!("\nRecent transactions:");
    for t in recent {
        println!("  {}", txn_line(t));
    }
}

pub fn print_accounts(snap: &Snapshot) {
    if snap.accounts.is_empty() {
        println!("No linked accounts.");
        return;
    }
    for a in &snap.accounts {
        println!(
            "{:<22} {:<12} {:>12}   updated {}",
            a.name,
            a.kind.label(),
            format_currency(a.balance),
            a.last_updated.format("%Y-%m-%d %H:%M UTC")
        );
    }
}

pub fn print_goals(snap: &Snapshot, today: NaiveDate) {
    if snap.goals.is_empty() {
        println!("No goals set.");
        return;
    }
    for g in &snap.goals {
        let marker = match g.tier() {
            ProgressTier::Complete => "done",
            ProgressTier::High => "high",
            ProgressTier::Medium => "mid ",
            ProgressTier::Low => "low ",
        };
        let days = g.days_remaining(today);
        let due = if days >= 0 {
            format!("{days} days left")
        } else {
            format!("{} days past deadline", -days)
        };
        println!(
            "[{marker}] {:<20} {} of {} ({})  {}, {} to go",
            g.title,
            format_currency(g.current_amount),
            format_currency(g.target_amount),
            format_percentage(g.progress_percent()),
            due,
            format_currency(g.amount_remaining())
        );
    }
    println!(
        "\n{} of {} complete, {} saved",
        completed_count(&snap.goals),
        snap.goals.len(),
        format_currency(total_saved(&snap.goals))
    );
}

pub fn print_budgets(snap: &Snapshot) {
    if snap.budgets.is_empty() {
        println!("No budgets set.");
        return;
    }
    for b in &snap.budgets {
        let s = budget_status(b);
        let flag = match s.health {
            BudgetHealth::Ok => "",
            BudgetHealth::NearLimit => "  near limit",
            BudgetHealth::Over => "  OVER",
        };
        println!(
            "{:<14} {:>10} / {:<10} {:>5}{}",
            s.category,
            format_currency(s.spent),
            format_currency(s.limit),
            format_percentage(s.percent),
            flag
        );
    }
}

pub fn print_bills(snap: &Snapshot, today: NaiveDate) {
    let upcoming = calendar::upcoming(&snap.bills, today);
    let overdue = calendar::overdue(&snap.bills, today);

    if !overdue.is_empty() {
        println!("Overdue ({}):", format_currency(calendar::total(&overdue)));
        for b in &overdue {
            println!(
                "  {:<18} {:>10}  was due {}",
                b.title,
                format_currency(b.amount),
                format_date(b.due_date)
            );
        }
        println!();
    }

    if upcoming.is_empty() {
        println!("No upcoming bills.");
        return;
    }
    println!("Upcoming ({}):", format_currency(calendar::total(&upcoming)));
    for b in &upcoming {
        let days = calendar::days_until_due(b, today);
        let when = match days {
            0 => "today".to_string(),
            1 => "tomorrow".to_string(),
            n => format!("in {n} days"),
        };
        println!(
            "  {:<18} {:>10}  {:<12} {} ({}){}",
            b.title,
            format_currency(b.amount),
            b.category.label(),
            format_date(b.due_date),
            when,
            if b.is_recurring { "  recurring" } else { "" }
        );
    }
}

pub fn print_search(snap: &Snapshot, results: &[&Transaction]) {
    if results.is_empty() {
        println!("No matching transactions.");
        let known = categories(&snap.transactions);
        if !known.is_empty() {
            println!("Categories: {}", known.join(", "));
        }
        return;
    }
    for t in results {
        println!("{}", txn_line(t));
    }
    let s = summarize(results);
    println!(
        "\n{} transactions, in {}, out {}, net {}",
        s.count,
        format_currency(s.credits),
        format_currency(s.debits),
        format_currency(s.net)
    );
}

pub fn print_insights(snap: &Snapshot, period: Period, today: NaiveDate) {
    let txns = insights::in_period(&snap.transactions, period, today);
    let total = insights::total_spending(&txns);
    println!(
        "Spending since {}: {}",
        format_date(period.start(today)),
        format_currency(total)
    );

    let by_category = insights::spending_by_category(&txns);
    if by_category.is_empty() {
        println!("  no spending in this period");
    }
    for c in &by_category {
        println!(
            "  {:<14} {:>10}  {:>4}",
            c.category,
            format_currency(c.amount),
            format_percentage(c.share)
        );
    }

    println!("\nLast 7 days:");
    for d in insights::daily_spending(&snap.transactions, today) {
        println!("  {} {:>10}", d.day, format_currency(d.spending));
    }

    println!("\nLast 12 months:");
    for m in insights::monthly_trend(&snap.transactions, today) {
        println!(
            "  {} {}  in {:>10}  out {:>10}  saved {:>10}",
            m.month,
            m.year,
            format_currency(m.income),
            format_currency(m.expenses),
            format_currency(m.savings)
        );
    }
}
