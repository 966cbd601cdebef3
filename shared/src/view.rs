//! Display strings derived from a dashboard snapshot.
//!
//! Everything the frontend writes into the page is computed here, so the
//! DOM layer only copies strings into elements.

use crate::currency::Currency;
use crate::month::{CurrentMonth, DateFormat};
use crate::{DashboardSnapshot, RecentExpense};

/// Labels and values of the daily spending chart
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    pub fn new(labels: Vec<String>, values: Vec<f64>) -> Self {
        Self { labels, values }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() || self.values.is_empty()
    }

    /// `(label, value)` pairs; a longer side is cut to the shorter one
    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    /// Top of the y axis: the largest value plus 10% headroom, at least 1
    pub fn y_max(&self) -> f64 {
        let max = self
            .values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(0.0_f64, f64::max);
        (max * 1.1).max(1.0)
    }
}

/// One row of the recent expenses table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseRow {
    pub date: String,
    pub category: String,
    pub badge_class: String,
    pub description: String,
    pub amount: String,
}

impl ExpenseRow {
    pub fn from_expense(expense: &RecentExpense, currency: Currency, date_format: DateFormat) -> Self {
        Self {
            date: date_format.format(&expense.date),
            category: expense.category.clone(),
            badge_class: format!("badge bg-{}", expense.category_color),
            description: expense.description.clone(),
            amount: currency.format(expense.amount),
        }
    }
}

/// Budget progress bar state. The percentage is passed through unclamped.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetProgress {
    pub percentage: f64,
    pub width: String,
    pub label: String,
}

impl BudgetProgress {
    pub fn new(percentage: f64) -> Self {
        let text = format!("{}%", percentage);
        Self {
            percentage,
            width: text.clone(),
            label: text,
        }
    }

    pub fn is_out_of_range(&self) -> bool {
        !(0.0..=100.0).contains(&self.percentage)
    }
}

/// Everything a successful dashboard refresh writes into the page
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub month_label: String,
    pub chart: ChartSeries,
    pub monthly_total: String,
    pub daily_average: String,
    pub budget: BudgetProgress,
    pub rows: Vec<ExpenseRow>,
}

impl DashboardView {
    pub fn build(
        month: &CurrentMonth,
        snapshot: DashboardSnapshot,
        currency: Currency,
        date_format: DateFormat,
    ) -> Self {
        let rows = snapshot
            .recent_expenses
            .iter()
            .map(|expense| ExpenseRow::from_expense(expense, currency, date_format))
            .collect();

        Self {
            month_label: month.label(),
            chart: ChartSeries::new(snapshot.dates, snapshot.daily_expenses),
            monthly_total: currency.format(snapshot.monthly_total),
            daily_average: currency.format(snapshot.daily_average),
            budget: BudgetProgress::new(snapshot.budget_percentage),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn lunch() -> RecentExpense {
        RecentExpense {
            date: "2024-03-01".to_string(),
            category: "Food".to_string(),
            category_color: "success".to_string(),
            description: "Lunch".to_string(),
            amount: 12.5,
        }
    }

    fn snapshot() -> DashboardSnapshot {
        DashboardSnapshot {
            dates: vec!["2024-03-01".to_string(), "2024-03-02".to_string()],
            daily_expenses: vec![12.5, 40.0],
            monthly_total: 1234.5,
            daily_average: 26.25,
            budget_percentage: 61.7,
            recent_expenses: vec![lunch()],
        }
    }

    fn march() -> CurrentMonth {
        CurrentMonth::today(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
    }

    #[test]
    fn test_recent_expense_row() {
        let row = ExpenseRow::from_expense(&lunch(), Currency::Usd, DateFormat::Us);
        assert_eq!(
            row,
            ExpenseRow {
                date: "3/1/2024".to_string(),
                category: "Food".to_string(),
                badge_class: "badge bg-success".to_string(),
                description: "Lunch".to_string(),
                amount: "$12.50".to_string(),
            }
        );
    }

    #[test]
    fn test_build_dashboard_view() {
        let view = DashboardView::build(&march(), snapshot(), Currency::Usd, DateFormat::Us);

        assert_eq!(view.month_label, "March 2024");
        assert_eq!(view.monthly_total, "$1,234.50");
        assert_eq!(view.daily_average, "$26.25");
        assert_eq!(view.budget.width, "61.7%");
        assert_eq!(view.budget.label, "61.7%");
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.chart.labels, vec!["2024-03-01", "2024-03-02"]);
        assert_eq!(view.chart.values, vec![12.5, 40.0]);
    }

    #[test]
    fn test_view_is_deterministic() {
        let first = DashboardView::build(&march(), snapshot(), Currency::Usd, DateFormat::Us);
        let second = DashboardView::build(&march(), snapshot(), Currency::Usd, DateFormat::Us);
        assert_eq!(first, second);
    }

    #[test]
    fn test_budget_percentage_is_not_clamped() {
        let over = BudgetProgress::new(135.0);
        assert_eq!(over.width, "135%");
        assert!(over.is_out_of_range());

        let under = BudgetProgress::new(-5.5);
        assert_eq!(under.label, "-5.5%");
        assert!(under.is_out_of_range());

        assert!(!BudgetProgress::new(100.0).is_out_of_range());
    }

    #[test]
    fn test_empty_recent_expenses_render_no_rows() {
        let mut data = snapshot();
        data.recent_expenses.clear();
        let view = DashboardView::build(&march(), data, Currency::Eur, DateFormat::Eu);
        assert!(view.rows.is_empty());
        assert_eq!(view.monthly_total, "€1,234.50");
    }

    #[test]
    fn test_chart_series_bounds() {
        let series = ChartSeries::new(
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            vec![10.0, 50.0],
        );
        assert_eq!(series.points().count(), 2);
        assert!((series.y_max() - 55.0).abs() < 1e-9);

        let flat = ChartSeries::new(vec!["a".to_string()], vec![0.0]);
        assert_eq!(flat.y_max(), 1.0);
        assert!(ChartSeries::default().is_empty());
    }
}
