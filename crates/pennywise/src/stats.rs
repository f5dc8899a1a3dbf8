//! Dashboard aggregation.
//!
//! Pure functions over snapshots of the expense/income collections: no I/O,
//! no store access, safe to call from any view at any time. Callers pass the
//! slice they care about (typically the filtered view).

use std::collections::{BTreeMap, HashMap};

use api_types::Category;
use api_types::expense::ExpenseView;
use api_types::income::IncomeView;
use chrono::{DateTime, Months, Utc};

/// Total spent in one category.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryTotal {
    pub category: Category,
    pub amount: f64,
}

/// Total spent in one calendar month (`YYYY-MM`).
#[derive(Clone, Debug, PartialEq)]
pub struct MonthlyTotal {
    pub month: String,
    pub amount: f64,
}

/// Month-over-month spending movement relative to a reference instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trend {
    pub recent: f64,
    pub previous: f64,
    /// `(recent - previous) / previous * 100`; 0 when there is no previous
    /// spending to compare against.
    pub percent_change: f64,
}

pub fn total(expenses: &[ExpenseView]) -> f64 {
    expenses.iter().map(|e| e.amount).sum()
}

/// Mean expense amount; 0 for an empty slice.
pub fn average(expenses: &[ExpenseView]) -> f64 {
    if expenses.is_empty() {
        return 0.0;
    }
    total(expenses) / expenses.len() as f64
}

/// Groups by category, largest spend first. Categories without expenses in
/// the input do not appear.
pub fn by_category(expenses: &[ExpenseView]) -> Vec<CategoryTotal> {
    let mut sums: HashMap<Category, f64> = HashMap::new();
    for expense in expenses {
        *sums.entry(expense.category).or_insert(0.0) += expense.amount;
    }
    let mut totals: Vec<CategoryTotal> = sums
        .into_iter()
        .map(|(category, amount)| CategoryTotal { category, amount })
        .collect();
    totals.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    totals
}

/// Groups by the `YYYY-MM` truncation of each expense's date, in month
/// order (chart x-axis order).
pub fn by_month(expenses: &[ExpenseView]) -> Vec<MonthlyTotal> {
    let mut sums: BTreeMap<String, f64> = BTreeMap::new();
    for expense in expenses {
        let month = expense.date.format("%Y-%m").to_string();
        *sums.entry(month).or_insert(0.0) += expense.amount;
    }
    sums.into_iter()
        .map(|(month, amount)| MonthlyTotal { month, amount })
        .collect()
}

/// Partitions expenses into "last month" and "the month before that" using
/// calendar-month arithmetic from `now`, then compares the two sums.
///
/// With no previous spending the percent change is reported as 0 rather
/// than infinity; the dashboard trend arrow treats that as flat.
pub fn month_over_month(expenses: &[ExpenseView], now: DateTime<Utc>) -> Trend {
    let one_month_ago = now.checked_sub_months(Months::new(1)).unwrap_or(now);
    let two_months_ago = now
        .checked_sub_months(Months::new(2))
        .unwrap_or(one_month_ago);

    let recent: f64 = expenses
        .iter()
        .filter(|e| e.date > one_month_ago)
        .map(|e| e.amount)
        .sum();
    let previous: f64 = expenses
        .iter()
        .filter(|e| e.date > two_months_ago && e.date < one_month_ago)
        .map(|e| e.amount)
        .sum();

    let percent_change = if previous > 0.0 {
        (recent - previous) / previous * 100.0
    } else {
        0.0
    };

    Trend {
        recent,
        previous,
        percent_change,
    }
}

pub fn total_income(incomes: &[IncomeView]) -> f64 {
    incomes.iter().map(|i| i.amount).sum()
}

/// Income minus expenses over the given snapshots.
pub fn net_balance(incomes: &[IncomeView], expenses: &[ExpenseView]) -> f64 {
    total_income(incomes) - total(expenses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_types::income::IncomeKind;

    fn expense(amount: f64, category: Category, date: &str) -> ExpenseView {
        ExpenseView {
            id: 0,
            description: String::new(),
            amount,
            category,
            date: date.parse().unwrap(),
        }
    }

    fn sample() -> Vec<ExpenseView> {
        vec![
            expense(40.0, Category::Food, "2024-01-10T12:00:00Z"),
            expense(60.0, Category::Food, "2024-02-05T12:00:00Z"),
            expense(25.0, Category::Transportation, "2024-02-12T12:00:00Z"),
            expense(75.0, Category::Housing, "2024-03-01T12:00:00Z"),
        ]
    }

    #[test]
    fn total_sums_amounts() {
        assert_eq!(total(&sample()), 200.0);
        assert_eq!(total(&[]), 0.0);
    }

    #[test]
    fn average_is_total_over_count() {
        assert_eq!(average(&sample()), 50.0);
        assert_eq!(average(&[]), 0.0);
    }

    #[test]
    fn by_category_partitions_the_total() {
        let totals = by_category(&sample());
        assert_eq!(totals.len(), 3);
        let sum: f64 = totals.iter().map(|t| t.amount).sum();
        assert_eq!(sum, total(&sample()));
        // Largest spend first.
        assert_eq!(totals[0].category, Category::Food);
        assert_eq!(totals[0].amount, 100.0);
    }

    #[test]
    fn by_category_skips_absent_categories() {
        let totals = by_category(&sample());
        assert!(totals.iter().all(|t| t.category != Category::Shopping));
    }

    #[test]
    fn by_month_buckets_in_order() {
        let totals = by_month(&sample());
        let months: Vec<&str> = totals.iter().map(|t| t.month.as_str()).collect();
        assert_eq!(months, vec!["2024-01", "2024-02", "2024-03"]);
        assert_eq!(totals[1].amount, 85.0);
    }

    #[test]
    fn trend_compares_calendar_months() {
        let now: DateTime<Utc> = "2024-03-10T00:00:00Z".parse().unwrap();
        let expenses = vec![
            // Recent window: after 2024-02-10.
            expense(50.0, Category::Food, "2024-02-20T12:00:00Z"),
            expense(30.0, Category::Food, "2024-03-05T12:00:00Z"),
            // Previous window: between 2024-01-10 and 2024-02-10.
            expense(40.0, Category::Food, "2024-01-15T12:00:00Z"),
            // Outside both windows.
            expense(99.0, Category::Food, "2023-12-25T12:00:00Z"),
        ];
        let trend = month_over_month(&expenses, now);
        assert_eq!(trend.recent, 80.0);
        assert_eq!(trend.previous, 40.0);
        assert_eq!(trend.percent_change, 100.0);
    }

    #[test]
    fn trend_with_no_previous_spending_reports_zero_change() {
        let now: DateTime<Utc> = "2024-03-10T00:00:00Z".parse().unwrap();
        let expenses = vec![expense(50.0, Category::Food, "2024-03-01T12:00:00Z")];
        let trend = month_over_month(&expenses, now);
        assert_eq!(trend.recent, 50.0);
        assert_eq!(trend.previous, 0.0);
        assert_eq!(trend.percent_change, 0.0);
        assert!(trend.percent_change.is_finite());
    }

    #[test]
    fn net_balance_subtracts_expenses_from_income() {
        let incomes = vec![IncomeView {
            id: 1,
            amount: 500.0,
            date: "2024-03-01T00:00:00Z".parse().unwrap(),
            is_recurring: true,
            kind: IncomeKind::Salary,
            recurrence_pattern: Some("MONTHLY".to_string()),
        }];
        assert_eq!(net_balance(&incomes, &sample()), 300.0);
        assert_eq!(net_balance(&[], &[]), 0.0);
    }
}
