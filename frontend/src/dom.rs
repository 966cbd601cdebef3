//! Dashboard elements patched after a refresh.
//!
//! Elements are looked up once when the controller starts. Pages that lack
//! some of them simply skip the matching patch.

use shared::view::BudgetProgress;
use shared::{DashboardView, ExpenseRow};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

pub struct DashboardDom {
    document: Document,
    month_label: Option<Element>,
    monthly_total: Option<Element>,
    daily_average: Option<Element>,
    progress_bar: Option<HtmlElement>,
    table_body: Option<Element>,
}

impl DashboardDom {
    pub fn resolve(document: &Document) -> Self {
        let by_id = |id: &str| document.get_element_by_id(id);
        let query = |selector: &str| document.query_selector(selector).ok().flatten();

        Self {
            document: document.clone(),
            // pages without a dedicated label show the month on the "current month" button
            month_label: by_id("monthLabel").or_else(|| by_id("currentMonth")),
            monthly_total: by_id("monthlyTotal"),
            daily_average: by_id("dailyAverage"),
            progress_bar: query(".progress-bar").and_then(|el| el.dyn_into::<HtmlElement>().ok()),
            table_body: query("table tbody"),
        }
    }

    /// Write a refreshed dashboard into the page. Applying the same view
    /// again leaves the page unchanged.
    pub fn apply(&self, view: &DashboardView) -> Result<(), JsValue> {
        set_text(&self.month_label, &view.month_label);
        set_text(&self.monthly_total, &view.monthly_total);
        set_text(&self.daily_average, &view.daily_average);
        if let Some(bar) = &self.progress_bar {
            apply_budget(bar, &view.budget)?;
        }
        if let Some(body) = &self.table_body {
            self.replace_rows(body, &view.rows)?;
        }
        Ok(())
    }

    fn replace_rows(&self, body: &Element, rows: &[ExpenseRow]) -> Result<(), JsValue> {
        body.set_text_content(None);
        for row in rows {
            body.append_child(&self.render_row(row)?.into())?;
        }
        Ok(())
    }

    fn render_row(&self, row: &ExpenseRow) -> Result<Element, JsValue> {
        let tr = self.document.create_element("tr")?;

        tr.append_child(&self.cell(&row.date)?.into())?;

        let badge = self.document.create_element("span")?;
        badge.set_class_name(&row.badge_class);
        badge.set_text_content(Some(&row.category));
        let category = self.document.create_element("td")?;
        category.append_child(&badge)?;
        tr.append_child(&category)?;

        tr.append_child(&self.cell(&row.description)?.into())?;
        tr.append_child(&self.cell(&row.amount)?.into())?;
        Ok(tr)
    }

    fn cell(&self, text: &str) -> Result<Element, JsValue> {
        let td = self.document.create_element("td")?;
        td.set_text_content(Some(text));
        Ok(td)
    }
}

fn set_text(element: &Option<Element>, text: &str) {
    if let Some(element) = element {
        element.set_text_content(Some(text));
    }
}

fn apply_budget(bar: &HtmlElement, budget: &BudgetProgress) -> Result<(), JsValue> {
    bar.style().set_property("width", &budget.width)?;
    bar.set_attribute("aria-valuenow", &budget.percentage.to_string())?;
    bar.set_text_content(Some(&budget.label));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::{Currency, CurrentMonth, DashboardSnapshot, DateFormat, RecentExpense};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const FIXTURE: &str = r#"
        <h5 id="monthLabel">January 2024</h5>
        <span id="monthlyTotal">$0.00</span>
        <span id="dailyAverage">$0.00</span>
        <div class="progress"><div class="progress-bar" style="width: 10%">10%</div></div>
        <table><tbody><tr><td>stale</td></tr><tr><td>rows</td></tr></tbody></table>
    "#;

    fn mount_fixture() -> Element {
        let document = gloo::utils::document();
        let container = document.create_element("div").unwrap();
        container.set_inner_html(FIXTURE);
        gloo::utils::body().append_child(&container).unwrap();
        container
    }

    fn lunch_view() -> DashboardView {
        let snapshot = DashboardSnapshot {
            dates: vec!["2024-03-01".to_string()],
            daily_expenses: vec![12.5],
            monthly_total: 1234.5,
            daily_average: 39.82,
            budget_percentage: 42.5,
            recent_expenses: vec![RecentExpense {
                date: "2024-03-01".to_string(),
                category: "Food".to_string(),
                category_color: "success".to_string(),
                description: "Lunch".to_string(),
                amount: 12.5,
            }],
        };
        let month = CurrentMonth::today(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        DashboardView::build(&month, snapshot, Currency::Usd, DateFormat::Us)
    }

    fn text_of(selector: &str) -> String {
        gloo::utils::document()
            .query_selector(selector)
            .unwrap()
            .unwrap()
            .text_content()
            .unwrap_or_default()
    }

    #[wasm_bindgen_test]
    fn test_apply_patches_every_target() {
        let container = mount_fixture();
        let dom = DashboardDom::resolve(&gloo::utils::document());

        dom.apply(&lunch_view()).unwrap();

        assert_eq!(text_of("#monthLabel"), "March 2024");
        assert_eq!(text_of("#monthlyTotal"), "$1,234.50");
        assert_eq!(text_of("#dailyAverage"), "$39.82");
        assert_eq!(text_of(".progress-bar"), "42.5%");

        let bar: HtmlElement = gloo::utils::document()
            .query_selector(".progress-bar")
            .unwrap()
            .unwrap()
            .dyn_into()
            .unwrap();
        assert_eq!(bar.style().get_property_value("width").unwrap(), "42.5%");

        container.remove();
    }

    #[wasm_bindgen_test]
    fn test_rows_are_replaced_wholesale() {
        let container = mount_fixture();
        let dom = DashboardDom::resolve(&gloo::utils::document());

        dom.apply(&lunch_view()).unwrap();

        let rows = container.query_selector_all("tbody tr").unwrap();
        assert_eq!(rows.length(), 1);

        let badge = container.query_selector("tbody tr span").unwrap().unwrap();
        assert_eq!(badge.class_name(), "badge bg-success");
        assert_eq!(badge.text_content().unwrap(), "Food");

        let cells = container.query_selector_all("tbody tr td").unwrap();
        let cell_text = |i: u32| cells.item(i).unwrap().text_content().unwrap();
        assert_eq!(cell_text(0), "3/1/2024");
        assert_eq!(cell_text(2), "Lunch");
        assert_eq!(cell_text(3), "$12.50");

        container.remove();
    }

    #[wasm_bindgen_test]
    fn test_apply_twice_matches_apply_once() {
        let container = mount_fixture();
        let dom = DashboardDom::resolve(&gloo::utils::document());
        let view = lunch_view();

        dom.apply(&view).unwrap();
        let once = container.inner_html();
        dom.apply(&view).unwrap();
        assert_eq!(container.inner_html(), once);

        container.remove();
    }

    #[wasm_bindgen_test]
    fn test_month_label_falls_back_to_current_month_button() {
        let document = gloo::utils::document();
        let container = document.create_element("div").unwrap();
        container.set_inner_html(r#"<button id="currentMonth">Today</button>"#);
        gloo::utils::body().append_child(&container).unwrap();

        let dom = DashboardDom::resolve(&document);
        dom.apply(&lunch_view()).unwrap();

        assert_eq!(text_of("#currentMonth"), "March 2024");
        container.remove();
    }

    #[wasm_bindgen_test]
    fn test_missing_elements_are_skipped() {
        let document = gloo::utils::document();
        let dom = DashboardDom::resolve(&document);
        assert!(dom.monthly_total.is_none());
        assert!(dom.table_body.is_none());
        assert!(dom.apply(&lunch_view()).is_ok());
    }

    #[wasm_bindgen_test]
    fn test_descriptions_are_not_parsed_as_html() {
        let container = mount_fixture();
        let dom = DashboardDom::resolve(&gloo::utils::document());
        let mut view = lunch_view();
        view.rows[0].description = "<b>bold</b>".to_string();

        dom.apply(&view).unwrap();

        assert!(container.query_selector("tbody b").unwrap().is_none());
        container.remove();
    }
}
