use js_sys::{Function, Reflect};
use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::{JsCast, JsValue};

use super::chart_data::ChartSpec;

/// Global installed by the host page's chart script
const RENDER_FN: &str = "renderChart";

/// Call `window.renderChart(canvasId, spec)`.
///
/// Returns `Ok(false)` when the page has no renderer loaded; the chart is
/// skipped in that case.
pub fn render_chart(canvas_id: &str, spec: &ChartSpec) -> Result<bool, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window object"))?;

    let render_value = Reflect::get(&window, &JsValue::from_str(RENDER_FN))?;
    if !render_value.is_function() {
        log::warn!("{} is not available, skipping chart '{}'", RENDER_FN, canvas_id);
        return Ok(false);
    }
    let render_fn: Function = render_value.dyn_into()?;

    let spec_value = spec
        .serialize(&Serializer::json_compatible())
        .map_err(|err| JsValue::from_str(&err.to_string()))?;

    render_fn.call2(&window, &JsValue::from_str(canvas_id), &spec_value)?;
    Ok(true)
}

/// Render or log; used from effects where there is no caller to report to
pub fn render_or_log(canvas_id: &str, spec: Option<&ChartSpec>) {
    let Some(spec) = spec else {
        return;
    };
    if let Err(e) = render_chart(canvas_id, spec) {
        log::error!("Failed to render chart '{}': {:?}", canvas_id, e);
    }
}
