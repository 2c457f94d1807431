//! Expense aggregation and budget comparison.
//!
//! [compute_summary] totals a trip's expenses, breaks the total down by
//! category and compares it against the trip's budget.

use serde::{Serialize, ser::SerializeMap};

use crate::{Expense, ExpenseCategory, currency::round_to_cents};

/// The amount spent in each category.
///
/// Every category always has an entry, categories without expenses are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CategoryTotals([f64; ExpenseCategory::COUNT]);

impl CategoryTotals {
    /// The amount spent in `category`.
    pub fn get(&self, category: ExpenseCategory) -> f64 {
        self.0[category.index()]
    }

    fn add(&mut self, category: ExpenseCategory, amount: f64) {
        self.0[category.index()] += amount;
    }

    /// Every category and its total, in canonical category order.
    pub fn iter(&self) -> impl Iterator<Item = (ExpenseCategory, f64)> + '_ {
        ExpenseCategory::ALL
            .into_iter()
            .map(|category| (category, self.get(category)))
    }

    /// The sum over all categories.
    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }
}

impl Serialize for CategoryTotals {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(ExpenseCategory::COUNT))?;

        for (category, amount) in self.iter() {
            map.serialize_entry(category.as_str(), &amount)?;
        }

        map.end()
    }
}

/// How spending compares against the budget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetComparison {
    /// The trip's budget.
    pub budget: f64,
    /// The total spent.
    pub spent: f64,
    /// `budget - spent`, negative when the budget has been exceeded.
    pub remaining: f64,
    /// `spent` as a percentage of `budget`, or zero when the budget is zero.
    pub percentage_used: f64,
}

impl BudgetComparison {
    /// Whether more has been spent than was budgeted.
    ///
    /// Overspending by less than half a cent does not count, so a budget
    /// spent exactly is not reported as exceeded because of float rounding.
    pub fn is_over_budget(&self) -> bool {
        round_to_cents(self.remaining) < 0.0
    }

    /// How close spending is to the budget.
    pub fn status(&self) -> BudgetStatus {
        if self.is_over_budget() {
            BudgetStatus::Exceeded
        } else if self.percentage_used > NEAR_LIMIT_PERCENTAGE {
            BudgetStatus::NearLimit
        } else {
            BudgetStatus::OnTrack
        }
    }
}

/// Spending above this percentage of the budget counts as near the limit.
pub const NEAR_LIMIT_PERCENTAGE: f64 = 80.0;

/// A coarse reading of how much of the budget is used, used to colour
/// progress bars.
///
/// Any spending against a zero budget reads as [BudgetStatus::Exceeded] even
/// though its percentage is defined as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    /// At most 80% of the budget is used.
    OnTrack,
    /// More than 80% of the budget is used but not more than all of it.
    NearLimit,
    /// More than the whole budget is used, see
    /// [BudgetComparison::is_over_budget].
    Exceeded,
}

/// The aggregate view of a trip's expenses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseSummary {
    /// The sum of every expense amount.
    pub total: f64,
    /// The sum of expense amounts per category.
    pub by_category: CategoryTotals,
    /// How `total` compares against the budget.
    pub budget_comparison: BudgetComparison,
}

impl ExpenseSummary {
    /// The categories with any spending, largest first.
    ///
    /// Categories with equal totals keep their canonical order.
    pub fn categories_by_amount(&self) -> Vec<(ExpenseCategory, f64)> {
        let mut categories: Vec<_> = self
            .by_category
            .iter()
            .filter(|(_, amount)| *amount > 0.0)
            .collect();

        categories.sort_by(|(_, left), (_, right)| right.total_cmp(left));

        categories
    }
}

/// Total `expenses` by category and compare the total against `budget`.
///
/// The order of `expenses` does not matter. The budget is not validated: a
/// negative budget is compared like any other. A budget of zero gives a
/// `percentage_used` of zero no matter how much was spent.
pub fn compute_summary(expenses: &[Expense], budget: f64) -> ExpenseSummary {
    let mut by_category = CategoryTotals::default();
    let mut total = 0.0;

    for expense in expenses {
        total += expense.amount;
        by_category.add(expense.category, expense.amount);
    }

    let percentage_used = if budget > 0.0 {
        total / budget * 100.0
    } else {
        0.0
    };

    ExpenseSummary {
        total,
        by_category,
        budget_comparison: BudgetComparison {
            budget,
            spent: total,
            remaining: budget - total,
            percentage_used,
        },
    }
}
