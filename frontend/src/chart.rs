use plotters::prelude::*;
use plotters_canvas::CanvasBackend;
use shared::month::parse_expense_date;
use shared::{ChartSeries, Currency};
use std::cell::RefCell;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement};

pub const CHART_ELEMENT_ID: &str = "monthlyChart";

const DEFAULT_WIDTH: u32 = 800;
const DEFAULT_HEIGHT: u32 = 350;
const BAR_COLOR: RGBColor = RGBColor(102, 126, 234);
const LABEL_COLOR: RGBColor = RGBColor(108, 117, 125);

/// Daily spending bar chart drawn onto the `monthlyChart` canvas
pub struct DailyChart {
    canvas: HtmlCanvasElement,
    currency: Currency,
    series: RefCell<ChartSeries>,
}

impl DailyChart {
    /// `None` when the page has no chart canvas
    pub fn attach(document: &Document, currency: Currency) -> Option<Self> {
        let canvas = document
            .get_element_by_id(CHART_ELEMENT_ID)?
            .dyn_into::<HtmlCanvasElement>()
            .ok()?;

        if canvas.width() == 0 || canvas.height() == 0 {
            canvas.set_width(DEFAULT_WIDTH);
            canvas.set_height(DEFAULT_HEIGHT);
        }

        Some(Self {
            canvas,
            currency,
            series: RefCell::new(ChartSeries::default()),
        })
    }

    /// Replace labels and values, then redraw
    pub fn update(&self, series: ChartSeries) -> Result<(), String> {
        *self.series.borrow_mut() = series;
        self.redraw()
    }

    #[cfg(test)]
    pub fn series(&self) -> ChartSeries {
        self.series.borrow().clone()
    }

    pub fn redraw(&self) -> Result<(), String> {
        let series = self.series.borrow();
        draw(&self.canvas, &series, self.currency)
    }
}

fn draw(canvas: &HtmlCanvasElement, series: &ChartSeries, currency: Currency) -> Result<(), String> {
    let backend = CanvasBackend::with_canvas_object(canvas.clone())
        .ok_or_else(|| "canvas has no 2d context".to_string())?;
    let root = backend.into_drawing_area();
    root.fill(&WHITE).map_err(|e| e.to_string())?;

    if series.is_empty() {
        return root.present().map_err(|e| e.to_string());
    }

    let labels: Vec<String> = series.points().map(|(label, _)| short_label(label)).collect();
    let count = labels.len() as u32;

    let mut chart = ChartBuilder::on(&root)
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d((0..count).into_segmented(), 0.0..series.y_max())
        .map_err(|e| e.to_string())?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len().min(12))
        .x_label_formatter(&|segment| match segment {
            SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
                labels.get(*i as usize).cloned().unwrap_or_default()
            }
            SegmentValue::Last => String::new(),
        })
        .y_labels(6)
        .y_label_formatter(&|v| currency.format(*v))
        .label_style(("sans-serif", 12, &LABEL_COLOR))
        .axis_style(&RGBColor(230, 230, 230))
        .bold_line_style(&RGBColor(240, 240, 240))
        .light_line_style(&RGBColor(250, 250, 250))
        .draw()
        .map_err(|e| e.to_string())?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(BAR_COLOR.filled())
                .margin(3)
                .data(
                    series
                        .points()
                        .enumerate()
                        .map(|(i, (_, value))| (i as u32, value)),
                ),
        )
        .map_err(|e| e.to_string())?;

    root.present().map_err(|e| e.to_string())
}

/// `2024-03-05` -> `03/05`; anything else is kept as is
fn short_label(label: &str) -> String {
    parse_expense_date(label)
        .map(|date| date.format("%m/%d").to_string())
        .unwrap_or_else(|| label.to_string())
}
