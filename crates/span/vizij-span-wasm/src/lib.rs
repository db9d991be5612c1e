use js_sys::{Float32Array, JSON};
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use vizij_span_core::{Span, SpanOptions, ValueKind};

#[wasm_bindgen]
pub struct VizijSpan {
    core: Span,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

/// Accept either a JSON string or any JSON-compatible JS value (object, number, array).
fn config_json(config: &JsValue, ctx: &str) -> Result<String, JsError> {
    if jsvalue_is_undefined_or_null(config) {
        return Err(JsError::new(&format!("{ctx}: config is null/undefined")));
    }
    if let Some(s) = config.as_string() {
        return Ok(s);
    }
    JSON::stringify(config)
        .map_err(|e| JsError::new(&format!("{ctx} stringify error: {:?}", e)))?
        .as_string()
        .ok_or_else(|| JsError::new(&format!("{ctx}: stringify produced non-string")))
}

fn parse_kind(kind: &str) -> Result<ValueKind, JsError> {
    kind.parse::<ValueKind>()
        .map_err(|e| JsError::new(&format!("kind error: {e}")))
}

#[wasm_bindgen]
impl VizijSpan {
    /// Create a span producing values of `kind` ("float", "vec2", "vec3", "vec4",
    /// "quat", "euler", "color"). `config` is a span configuration object, a bare
    /// literal, or a JSON string. `options` is optional: `{ seed?: number }`.
    /// Example:
    ///   new VizijSpan("vec3", { type: "lerp", start: 0, end: [1, 2, 3] })
    #[wasm_bindgen(constructor)]
    pub fn new(kind: String, config: JsValue, options: JsValue) -> Result<VizijSpan, JsError> {
        console_error_panic_hook::set_once();

        let kind = parse_kind(&kind)?;
        let options: SpanOptions = if jsvalue_is_undefined_or_null(&options) {
            SpanOptions::default()
        } else {
            swb::from_value(options).map_err(|e| JsError::new(&format!("options error: {e}")))?
        };
        let json = config_json(&config, "new")?;
        let input: vizij_span_core::SpanInput = serde_json::from_str(&json)
            .map_err(|e| JsError::new(&format!("config parse error: {e}")))?;
        let core = Span::with_options(kind, input, options)
            .map_err(|e| JsError::new(&format!("config error: {e}")))?;
        Ok(VizijSpan { core })
    }

    /// Replace the configuration in place.
    #[wasm_bindgen]
    pub fn set(&mut self, config: JsValue) -> Result<(), JsError> {
        let json = config_json(&config, "set")?;
        let input: vizij_span_core::SpanInput = serde_json::from_str(&json)
            .map_err(|e| JsError::new(&format!("config parse error: {e}")))?;
        self.core
            .set(input)
            .map_err(|e| JsError::new(&format!("config error: {e}")))
    }

    /// Advance by `input` (a progress delta when temporal fields are set,
    /// absolute progress otherwise). Returns `{ type, data }`.
    #[wasm_bindgen]
    pub fn step(&mut self, input: f32) -> Result<JsValue, JsError> {
        let value = *self.core.step(input);
        swb::to_value(&value).map_err(|e| JsError::new(&format!("value error: {e}")))
    }

    /// Advance from monotonically increasing elapsed time.
    #[wasm_bindgen(js_name = stepElapsed)]
    pub fn step_elapsed(&mut self, time: f32) -> Result<JsValue, JsError> {
        let value = *self.core.step_elapsed(time);
        swb::to_value(&value).map_err(|e| JsError::new(&format!("value error: {e}")))
    }

    /// Evaluate at absolute progress without advancing temporal state.
    #[wasm_bindgen]
    pub fn sample(&mut self, progress: f32) -> Result<JsValue, JsError> {
        let value = *self.core.sample(progress);
        swb::to_value(&value).map_err(|e| JsError::new(&format!("value error: {e}")))
    }

    /// Components of the most recent value, without allocating a JS object per field.
    #[wasm_bindgen]
    pub fn components(&self) -> Float32Array {
        Float32Array::from(self.core.value().components())
    }

    #[wasm_bindgen]
    pub fn kind(&self) -> String {
        self.core.kind().name().to_string()
    }

    #[wasm_bindgen]
    pub fn mode(&self) -> String {
        self.core.mode().name().to_string()
    }

    #[wasm_bindgen(js_name = isExpired)]
    pub fn is_expired(&self) -> bool {
        self.core.is_expired()
    }

    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.core.reset();
    }

    /// Serialized configuration as a plain JS object.
    #[wasm_bindgen(js_name = toJSON)]
    pub fn to_json(&self) -> Result<JsValue, JsError> {
        let json = self
            .core
            .to_json()
            .map_err(|e| JsError::new(&format!("toJSON error: {e}")))?;
        JSON::parse(&json).map_err(|e| JsError::new(&format!("toJSON parse error: {:?}", e)))
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
