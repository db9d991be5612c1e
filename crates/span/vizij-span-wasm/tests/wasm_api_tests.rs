#![cfg(target_arch = "wasm32")]
use serde_wasm_bindgen as swb;
use vizij_span_core::Value;
use vizij_span_wasm::{abi_version, VizijSpan};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use serde_json::json;

fn js(value: serde_json::Value) -> JsValue {
    JsValue::from_str(&value.to_string())
}

fn seed(seed: u64) -> JsValue {
    js_sys::JSON::parse(&json!({ "seed": seed }).to_string()).unwrap()
}

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn abi_is_1() {
    assert_eq!(abi_version(), 1);
}

#[wasm_bindgen_test]
fn lerp_steps_and_samples() {
    let mut span = VizijSpan::new(
        "vec2".into(),
        js(json!({ "type": "lerp", "start": [0, 0], "end": [2, 4] })),
        JsValue::UNDEFINED,
    )
    .unwrap();
    let v: Value = swb::from_value(span.step(0.5).unwrap()).unwrap();
    assert_eq!(v, Value::Vec2([1.0, 2.0]));
    let comps = span.components().to_vec();
    assert_eq!(comps, vec![1.0, 2.0]);
    let v: Value = swb::from_value(span.sample(1.0).unwrap()).unwrap();
    assert_eq!(v, Value::Vec2([2.0, 4.0]));
    assert_eq!(span.kind(), "vec2");
    assert_eq!(span.mode(), "lerp");
}

#[wasm_bindgen_test]
fn bare_literal_config() {
    let mut span = VizijSpan::new("float".into(), JsValue::from_f64(3.0), JsValue::NULL).unwrap();
    let v: Value = swb::from_value(span.step(0.2).unwrap()).unwrap();
    assert_eq!(v, Value::Float(3.0));
}

#[wasm_bindgen_test]
fn temporal_expiry_and_reset() {
    let mut span = VizijSpan::new(
        "float".into(),
        js(json!({ "type": "lerp", "start": 0, "end": 1, "repeat": 1 })),
        seed(1),
    )
    .unwrap();
    span.step_elapsed(1.0).unwrap();
    assert!(span.is_expired());
    span.reset();
    assert!(!span.is_expired());
}

#[wasm_bindgen_test]
fn invalid_config_is_an_error() {
    assert!(VizijSpan::new(
        "float".into(),
        js(json!({ "type": "lerp", "start": 0 })),
        JsValue::UNDEFINED
    )
    .is_err());
    assert!(VizijSpan::new("matrix".into(), JsValue::from_f64(1.0), JsValue::UNDEFINED).is_err());
}

#[wasm_bindgen_test]
fn set_and_to_json() {
    let mut span = VizijSpan::new("float".into(), JsValue::from_f64(1.0), seed(7)).unwrap();
    span.set(js(json!({ "type": "array", "array": [1, 2, 3], "pick": "alternate" })))
        .unwrap();
    let seq: Vec<f32> = (0..5)
        .map(|_| {
            span.step(0.0).unwrap();
            span.components().to_vec()[0]
        })
        .collect();
    assert_eq!(seq, vec![1.0, 2.0, 3.0, 2.0, 1.0]);

    let out = span.to_json().unwrap();
    let text = js_sys::JSON::stringify(&out).unwrap().as_string().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        parsed,
        // JSON.stringify writes whole floats without a fraction
        json!({ "type": "array", "array": [1, 2, 3], "pick": "alternate" })
    );
}
