//! Chart.js configurations and the render targets that own live chart instances.

use serde::Serialize;
use serde_json::{json, Value};
use wasm_bindgen::{JsCast, JsValue};

use crate::error::{dom_err, AppError, Result};
use crate::models::{CategoryBreakdownPoint, MonthlySpendingPoint};

const GRID_COLOR: &str = "#374151";
const TICK_COLOR: &str = "#e5e7eb";
const LINE_COLOR: &str = "#007bff";
const SLICE_BORDER: &str = "#1f2937";

pub fn monthly_line_config(points: &[MonthlySpendingPoint]) -> Value {
    let labels: Vec<&str> = points.iter().map(|p| p.month.as_str()).collect();
    let data: Vec<f64> = points.iter().map(|p| p.amount).collect();
    json!({
        "type": "line",
        "data": {
            "labels": labels,
            "datasets": [{
                "label": "Monthly Spending",
                "data": data,
                "borderColor": LINE_COLOR,
                "backgroundColor": "rgba(0, 123, 255, 0.1)",
                "fill": true,
                "tension": 0.4,
                "pointBackgroundColor": LINE_COLOR,
                "pointBorderColor": "#ffffff",
                "pointBorderWidth": 2,
                "pointRadius": 6
            }]
        },
        "options": {
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": {
                "legend": { "display": false },
                "tooltip": { "mode": "index", "intersect": false }
            },
            "scales": {
                "y": {
                    "beginAtZero": true,
                    "grid": { "color": GRID_COLOR },
                    "ticks": { "color": TICK_COLOR }
                },
                "x": {
                    "grid": { "color": GRID_COLOR },
                    "ticks": { "color": TICK_COLOR }
                }
            },
            "interaction": { "intersect": false, "mode": "index" }
        }
    })
}

pub fn category_doughnut_config(points: &[CategoryBreakdownPoint], legend_font_size: u32) -> Value {
    let mut labels = Vec::with_capacity(points.len());
    let mut data = Vec::with_capacity(points.len());
    let mut colors = Vec::with_capacity(points.len());
    for p in points {
        labels.push(p.category.as_str());
        data.push(p.amount);
        colors.push(p.color.as_str());
    }
    json!({
        "type": "doughnut",
        "data": {
            "labels": labels,
            "datasets": [{
                "data": data,
                "backgroundColor": colors,
                "borderColor": SLICE_BORDER,
                "borderWidth": 2
            }]
        },
        "options": {
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": {
                "legend": {
                    "position": "bottom",
                    "labels": {
                        "padding": 15,
                        "usePointStyle": true,
                        "font": { "size": legend_font_size },
                        "color": TICK_COLOR
                    }
                }
            }
        }
    })
}

/// Legend text for one doughnut slice: `Food: $12.00 (40.0%)`.
pub fn slice_label(label: &str, value: f64, total: f64, symbol: &str) -> String {
    let percentage = if total > 0.0 { value / total * 100.0 } else { 0.0 };
    format!("{}: {}{:.2} ({:.1}%)", label, symbol, value, percentage)
}

/// A live Chart.js instance.
pub struct ChartHandle(JsValue);

impl ChartHandle {
    fn create(canvas: &web_sys::HtmlCanvasElement, config: &Value) -> Result<Self> {
        let ctor = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("Chart"))
            .map_err(|e| dom_err("looking up Chart", e))?
            .dyn_into::<js_sys::Function>()
            .map_err(|_| AppError::Chart("Chart.js is not loaded".into()))?;
        let config = config
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| AppError::Chart(e.to_string()))?;
        let args = js_sys::Array::of2(canvas, &config);
        let instance = js_sys::Reflect::construct(&ctor, &args)
            .map_err(|e| AppError::Chart(format!("{:?}", e)))?;
        Ok(ChartHandle(instance))
    }

    fn destroy(self) {
        let destroy = js_sys::Reflect::get(&self.0, &JsValue::from_str("destroy"))
            .ok()
            .and_then(|f| f.dyn_into::<js_sys::Function>().ok());
        match destroy {
            Some(f) => {
                if let Err(e) = f.call0(&self.0) {
                    log::warn!("chart destroy failed: {:?}", e);
                }
            }
            None => log::warn!("chart instance has no destroy()"),
        }
    }
}

/// Owns whatever chart is currently drawn on one canvas.
pub struct RenderTarget {
    canvas_id: &'static str,
    current: Option<ChartHandle>,
}

impl RenderTarget {
    pub fn new(canvas_id: &'static str) -> Self {
        RenderTarget {
            canvas_id,
            current: None,
        }
    }

    /// Destroys the previous chart and draws `config` in its place.
    pub fn render(&mut self, config: &Value) -> Result<()> {
        self.clear();
        let canvas = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(self.canvas_id))
            .ok_or_else(|| AppError::Dom(format!("missing canvas #{}", self.canvas_id)))?
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .map_err(|_| AppError::Dom(format!("#{} is not a canvas", self.canvas_id)))?;
        self.current = Some(ChartHandle::create(&canvas, config)?);
        log::debug!("rendered chart on #{}", self.canvas_id);
        Ok(())
    }

    pub fn clear(&mut self) {
        if let Some(chart) = self.current.take() {
            chart.destroy();
        }
    }
}

impl Drop for RenderTarget {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_config_keeps_month_order() {
        let points = vec![
            MonthlySpendingPoint {
                month: "Jan".to_string(),
                amount: 5.0,
            },
            MonthlySpendingPoint {
                month: "Feb".to_string(),
                amount: 7.5,
            },
        ];
        let config = monthly_line_config(&points);
        assert_eq!(config["type"], "line");
        assert_eq!(config["data"]["labels"], json!(["Jan", "Feb"]));
        assert_eq!(config["data"]["datasets"][0]["data"], json!([5.0, 7.5]));
        assert_eq!(config["options"]["scales"]["y"]["beginAtZero"], true);
    }

    #[test]
    fn doughnut_arrays_share_length() {
        let points = vec![
            CategoryBreakdownPoint {
                category: "Food".to_string(),
                amount: 12.0,
                color: "#e74c3c".to_string(),
            },
            CategoryBreakdownPoint {
                category: "Bills".to_string(),
                amount: 30.0,
                color: "#1abc9c".to_string(),
            },
        ];
        let config = category_doughnut_config(&points, 11);
        let data = &config["data"];
        assert_eq!(data["labels"], json!(["Food", "Bills"]));
        assert_eq!(data["datasets"][0]["backgroundColor"], json!(["#e74c3c", "#1abc9c"]));
        assert_eq!(data["datasets"][0]["data"], json!([12.0, 30.0]));
        assert_eq!(config["options"]["plugins"]["legend"]["labels"]["font"]["size"], 11);
    }

    #[test]
    fn slice_label_reports_share() {
        assert_eq!(slice_label("Food", 12.0, 30.0, "$"), "Food: $12.00 (40.0%)");
        assert_eq!(slice_label("Food", 0.0, 0.0, "$"), "Food: $0.00 (0.0%)");
    }

    #[test]
    fn empty_render_target_has_no_chart() {
        let mut target = RenderTarget::new("monthlyChart");
        assert!(target.current.is_none());
        target.clear();
        assert!(target.current.is_none());
    }
}
