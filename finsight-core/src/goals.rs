//! Goal progress and deadline helpers

use chrono::NaiveDate;
use serde::Serialize;

use crate::finance::Goal;
use crate::time::days_between;

/// Categories offered when creating a goal.
pub const GOAL_CATEGORIES: &[&str] = &[
    "Savings",
    "Travel",
    "Education",
    "Health",
    "Investment",
    "Emergency",
    "Other",
];

/// Progress band, used for coloring progress bars
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum ProgressTier {
    Complete,
    High,
    Medium,
    Low,
}

impl ProgressTier {
    pub fn from_percent(p: f64) -> Self {
        if p >= 100.0 {
            ProgressTier::Complete
        } else if p >= 75.0 {
            ProgressTier::High
        } else if p >= 50.0 {
            ProgressTier::Medium
        } else {
            ProgressTier::Low
        }
    }
}

impl Goal {
    /// Percent of target reached. Not capped at 100.
    pub fn progress_percent(&self) -> f64 {
        if self.target_amount <= 0.0 {
            return 0.0;
        }
        self.current_amount * 100.0 / self.target_amount
    }

    pub fn tier(&self) -> ProgressTier {
        ProgressTier::from_percent(self.progress_percent())
    }

    pub fn is_complete(&self) -> bool {
        self.current_amount >= self.target_amount
    }

    /// Days left until the deadline; negative once it has passed.
    pub fn days_remaining(&self, today: NaiveDate) -> i64 {
        days_between(today, self.deadline)
    }

    pub fn amount_remaining(&self) -> f64 {
        (self.target_amount - self.current_amount).max(0.0)
    }
}

pub fn completed_count(goals: &[Goal]) -> usize {
    goals.iter().filter(|g| g.is_complete()).count()
}

pub fn total_saved(goals: &[Goal]) -> f64 {
    goals.iter().map(|g| g.current_amount).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_goals;

    #[test]
    fn test_progress_and_tier() {
        let goals = seed_goals();
        assert_eq!(goals[0].progress_percent(), 45.0);
        assert_eq!(goals[0].tier(), ProgressTier::Low);
        assert_eq!(goals[1].progress_percent(), 32.0);
        assert_eq!(ProgressTier::from_percent(75.0), ProgressTier::High);
        assert_eq!(ProgressTier::from_percent(120.0), ProgressTier::Complete);
    }

    #[test]
    fn test_days_remaining() {
        let goals = seed_goals();
        let today = NaiveDate::from_ymd_opt(2025, 6, 20).unwrap();
        assert_eq!(goals[1].days_remaining(today), 10);
        let later = NaiveDate::from_ymd_opt(2025, 7, 2).unwrap();
        assert_eq!(goals[1].days_remaining(later), -2);
    }

    #[test]
    fn test_totals() {
        let mut goals = seed_goals();
        assert_eq!(completed_count(&goals), 0);
        assert_eq!(total_saved(&goals), 53000.0);
        goals[1].current_amount = 25000.0;
        assert_eq!(completed_count(&goals), 1);
        assert_eq!(goals[1].amount_remaining(), 0.0);
    }
}
