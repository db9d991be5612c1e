use serde_json::json;
use vizij_span_core::{
    ArrayPick, AxisCurve, CurveConfig, CurveShape, Easing, Span, SpanConfig, SpanError, SpanMode,
    SpanOptions, Value, ValueKind,
};

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn approx_value(a: &Value, b: &Value, eps: f32) {
    assert_eq!(a.kind(), b.kind(), "kind mismatch {a:?} vs {b:?}");
    for (x, y) in a.components().iter().zip(b.components()) {
        assert!((x - y).abs() <= eps, "left={a:?} right={b:?} eps={eps}");
    }
}

fn seeded(kind: ValueKind, config: serde_json::Value) -> Span {
    let config: SpanConfig = serde_json::from_value(config).expect("config parses");
    Span::with_options(kind, config, SpanOptions { seed: Some(99) }).expect("span builds")
}

#[test]
fn lerp_hits_endpoints_for_every_easing() {
    let cases: [(ValueKind, Vec<f32>, Vec<f32>); 5] = [
        (ValueKind::Float, vec![-2.0], vec![8.0]),
        (ValueKind::Vec2, vec![0.0, 1.0], vec![4.0, -1.0]),
        (ValueKind::Color, vec![0.0, 0.2, 0.4, 1.0], vec![1.0, 0.8, 0.6, 0.0]),
        (ValueKind::Quat, vec![0.0, 0.0, 0.0, 1.0], vec![0.0, 0.7071068, 0.0, 0.7071068]),
        (ValueKind::Euler, vec![0.0, 0.0, 0.0], vec![0.3, -0.2, 1.1]),
    ];
    for (kind, start, end) in cases {
        let start_value = Value::from_literal(kind, &start.clone().into()).unwrap();
        let end_value = Value::from_literal(kind, &end.clone().into()).unwrap();
        for easing in Easing::ALL {
            let mut span =
                Span::new(kind, SpanConfig::lerp(start.clone(), end.clone(), easing)).unwrap();
            approx_value(span.sample(0.0), &start_value, 1e-5);
            approx_value(span.sample(1.0), &end_value, 1e-5);
        }
    }
}

#[test]
fn lerp_eases_and_extrapolates_linearly() {
    let mut span = Span::new(ValueKind::Float, SpanConfig::lerp(0.0, 10.0, Easing::EaseInQuad)).unwrap();
    approx(span.step(0.5).components()[0], 2.5, 1e-6);
    let mut linear = Span::new(ValueKind::Float, SpanConfig::lerp(0.0, 10.0, Easing::Linear)).unwrap();
    approx(linear.step(1.5).components()[0], 15.0, 1e-5);
}

#[test]
fn rotation_lerp_is_spherical() {
    let half = std::f32::consts::FRAC_PI_2;
    let mut span = Span::new(
        ValueKind::Euler,
        SpanConfig::lerp([0.0, 0.0, 0.0], [0.0, 0.0, half], Easing::Linear),
    )
    .unwrap();
    match span.sample(0.5) {
        Value::Euler(e) => approx(e[2], half / 2.0, 1e-5),
        other => panic!("unexpected {other:?}"),
    }
    let mut quat = Span::new(
        ValueKind::Quat,
        SpanConfig::lerp([0.0, 0.0, 0.0, 1.0], [0.0, 0.0, 1.0, 0.0], Easing::Linear),
    )
    .unwrap();
    let q = *quat.sample(0.5);
    let len: f32 = q.components().iter().map(|c| c * c).sum::<f32>().sqrt();
    approx(len, 1.0, 1e-5);
    approx(q.components()[2], std::f32::consts::FRAC_1_SQRT_2, 1e-5);
}

#[test]
fn force_integer_rounds_scalar_results() {
    let mut span = Span::new(
        ValueKind::Float,
        SpanConfig::lerp(0.0, 10.0, Easing::Linear).with_force_integer(true),
    )
    .unwrap();
    assert_eq!(*span.sample(0.25), Value::Float(3.0));
    assert_eq!(*span.step(0.12), Value::Float(1.0));

    // vectors are left alone
    let mut vec = Span::new(
        ValueKind::Vec2,
        SpanConfig::lerp([0.0, 0.0], [10.0, 10.0], Easing::Linear).with_force_integer(true),
    )
    .unwrap();
    assert_eq!(*vec.sample(0.25), Value::Vec2([2.5, 2.5]));
}

#[test]
fn value_mode_is_constant() {
    let mut span = Span::from_literal(ValueKind::Vec3, [1.0, 2.0, 3.0]).unwrap();
    assert_eq!(span.mode(), SpanMode::Value);
    for p in [0.0, 0.5, 3.0] {
        assert_eq!(*span.step(p), Value::Vec3([1.0, 2.0, 3.0]));
    }
    let mut bare = Span::from_json(ValueKind::Float, "5").unwrap();
    assert_eq!(*bare.step(0.7), Value::Float(5.0));
}

#[test]
fn random_samples_each_component_within_bounds() {
    let mut span = seeded(
        ValueKind::Vec3,
        json!({ "type": "random", "start": [0, 10, -1], "end": [1, 20, -2] }),
    );
    let first = *span.step(0.5);
    let mut changed = false;
    for _ in 0..100 {
        let v = *span.step(0.5);
        let c = v.components();
        assert!((0.0..=1.0).contains(&c[0]));
        assert!((10.0..=20.0).contains(&c[1]));
        assert!((-2.0..=-1.0).contains(&c[2]));
        changed |= v != first;
    }
    assert!(changed, "random mode should not be idempotent");
}

#[test]
fn random_lerp_stays_on_the_arc() {
    let mut span = seeded(
        ValueKind::Quat,
        json!({ "type": "randomLerp", "start": [0, 0, 0, 1], "end": [0, 0, 0.7071068, 0.7071068] }),
    );
    for _ in 0..50 {
        let q = span.step(0.0).components().to_vec();
        let len: f32 = q.iter().map(|c| c * c).sum::<f32>().sqrt();
        approx(len, 1.0, 1e-5);
        assert!(q[0].abs() < 1e-6 && q[1].abs() < 1e-6);
        assert!(q[2] >= -1e-6 && q[2] <= 0.7072);
    }

    let mut scalar = seeded(
        ValueKind::Float,
        json!({ "type": "randomLerp", "start": 5, "end": 6, "forceInteger": true }),
    );
    for _ in 0..50 {
        let v = scalar.step(0.0).components()[0];
        assert!(v == 5.0 || v == 6.0, "got {v}");
    }
}

#[test]
fn array_alternate_bounces() {
    let mut span = seeded(
        ValueKind::Float,
        json!({ "type": "array", "array": [1, 2, 3], "pick": "alternate" }),
    );
    let seq: Vec<f32> = (0..7).map(|_| span.step(0.9).components()[0]).collect();
    assert_eq!(seq, vec![1.0, 2.0, 3.0, 2.0, 1.0, 2.0, 3.0]);
}

#[test]
fn array_repeat_and_random_picks() {
    let mut repeat = seeded(
        ValueKind::Vec2,
        json!({ "type": "array", "array": [[0, 0], [1, 1]], "pick": "repeat" }),
    );
    let seq: Vec<Value> = (0..3).map(|_| *repeat.step(0.0)).collect();
    assert_eq!(
        seq,
        vec![Value::Vec2([0.0, 0.0]), Value::Vec2([1.0, 1.0]), Value::Vec2([0.0, 0.0])]
    );

    let mut random = seeded(ValueKind::Float, json!({ "type": "array", "array": [1, 2, 3] }));
    for _ in 0..50 {
        let v = random.step(0.0).components()[0];
        assert!([1.0, 2.0, 3.0].contains(&v));
    }
}

#[test]
fn curve_axes_blend_independently() {
    let mut span = seeded(
        ValueKind::Vec2,
        json!({
            "type": "curve",
            "start": [0, 10],
            "end": [4, 20],
            "curveShape": "linear",
            "curve": {
                "x": { "keys": [[0, 0], [0.5, 1], [1, 0.25]] },
                "y": { "keys": [[0, 0], [0.25, 0.5], [1, 1]], "shape": "staircase" }
            }
        }),
    );
    approx_value(span.sample(0.25), &Value::Vec2([2.0, 15.0]), 1e-5);
    approx_value(span.sample(0.1), &Value::Vec2([0.8, 10.0]), 1e-5);
    approx_value(span.sample(1.0), &Value::Vec2([1.0, 20.0]), 1e-5);
}

#[test]
fn sparse_curves_leave_other_axes_at_start() {
    let mut span = Span::new(ValueKind::Vec3, SpanConfig::lerp(0.0, 1.0, Easing::Linear)).unwrap();
    let curve = CurveConfig {
        z: Some(AxisCurve {
            keys: vec![(0.0, 0.0), (1.0, 1.0)],
            shape: None,
        }),
        w: Some(AxisCurve {
            keys: vec![(0.0, 1.0)],
            shape: None,
        }),
        ..CurveConfig::default()
    };
    span.set_curve([1.0, 2.0, 3.0], [5.0, 6.0, 7.0], curve, CurveShape::Linear)
        .unwrap();
    assert_eq!(span.mode(), SpanMode::Curve);
    approx_value(span.sample(0.5), &Value::Vec3([1.0, 2.0, 5.0]), 1e-5);
}

#[test]
fn gradient_clamps_and_interpolates() {
    let mut span = seeded(
        ValueKind::Vec2,
        json!({ "type": "gradient", "steps": [[0, [0, 0]], [0.5, [2, 4]], [1, [4, 0]]] }),
    );
    approx_value(span.sample(0.0), &Value::Vec2([0.0, 0.0]), 1e-6);
    approx_value(span.sample(1.0), &Value::Vec2([4.0, 0.0]), 1e-6);
    approx_value(span.sample(0.25), &Value::Vec2([1.0, 2.0]), 1e-6);
    approx_value(span.sample(-1.0), &Value::Vec2([0.0, 0.0]), 1e-6);
    approx_value(span.sample(2.0), &Value::Vec2([4.0, 0.0]), 1e-6);
}

#[test]
fn gradient_keys_are_normalized_on_any_scale() {
    let mut span = seeded(
        ValueKind::Float,
        json!({ "type": "gradient", "steps": [[200, 3], [100, 1], [150, 2]] }),
    );
    approx(span.sample(0.75).components()[0], 2.5, 1e-6);
    let config = serde_json::to_value(span.to_config()).unwrap();
    assert_eq!(
        config,
        json!({ "type": "gradient", "steps": [[0.0, 1.0], [0.5, 2.0], [1.0, 3.0]] })
    );
}

#[test]
fn mode_switch_replaces_state_but_keeps_shared_fields() {
    let mut span = Span::new(
        ValueKind::Float,
        SpanConfig::lerp(0.0, 10.0, Easing::Linear).with_force_integer(true),
    )
    .unwrap();
    span.set_array(vec![1.4.into(), 2.6.into()], ArrayPick::Repeat)
        .unwrap();
    assert_eq!(span.mode(), SpanMode::Array);
    assert!(span.force_integer());
    assert_eq!(*span.step(0.0), Value::Float(1.0));
    assert_eq!(*span.step(0.0), Value::Float(3.0));

    span.set_gradient(vec![(0.0, 0.0.into()), (1.0, 10.0.into())])
        .unwrap();
    assert_eq!(*span.sample(0.44), Value::Float(4.0));

    span.set_value(7.0).unwrap();
    span.set_force_integer(false);
    assert_eq!(*span.step(0.3), Value::Float(7.0));
}

#[test]
fn set_replaces_everything() {
    let mut span = seeded(
        ValueKind::Float,
        json!({ "type": "lerp", "start": 0, "end": 1, "forceInteger": true, "repeat": 2 }),
    );
    span.set(SpanConfig::lerp(0.0, 4.0, Easing::Linear)).unwrap();
    assert!(!span.force_integer());
    assert!(span.temporal().is_identity());
    assert_eq!(*span.step(0.5), Value::Float(2.0));
}

#[test]
fn missing_fields_are_reported() {
    let err = Span::from_json(ValueKind::Float, r#"{ "type": "lerp", "start": 0 }"#).unwrap_err();
    assert_eq!(
        err,
        SpanError::MissingField {
            mode: "lerp".into(),
            field: "end".into()
        }
    );
    let err = Span::from_json(ValueKind::Float, r#"{ "type": "value" }"#).unwrap_err();
    assert!(matches!(err, SpanError::MissingField { ref field, .. } if field == "value"));
    let err = Span::from_json(ValueKind::Float, r#"{ "type": "curve", "start": 0, "end": 1 }"#)
        .unwrap_err();
    assert!(matches!(err, SpanError::MissingField { ref field, .. } if field == "curve"));
    let err = Span::from_json(ValueKind::Float, r#"{ "type": "array" }"#).unwrap_err();
    assert!(matches!(err, SpanError::MissingField { ref field, .. } if field == "array"));
    let err = Span::from_json(ValueKind::Float, r#"{ "type": "gradient" }"#).unwrap_err();
    assert!(matches!(err, SpanError::MissingField { ref field, .. } if field == "steps"));
    assert_eq!(err.category(), "configuration");
}

#[test]
fn empty_tables_and_bad_names_are_rejected() {
    let err = Span::from_json(ValueKind::Float, r#"{ "type": "array", "array": [] }"#).unwrap_err();
    assert_eq!(err, SpanError::EmptyArray);
    let err = Span::from_json(ValueKind::Float, r#"{ "type": "gradient", "steps": [] }"#)
        .unwrap_err();
    assert!(matches!(err, SpanError::EmptyKeys { .. }));
    let err = Span::from_json(
        ValueKind::Float,
        r#"{ "type": "curve", "start": 0, "end": 1, "curve": { "x": { "keys": [] } } }"#,
    )
    .unwrap_err();
    assert!(matches!(err, SpanError::EmptyKeys { ref mode } if mode == "curve"));

    let err = Span::from_json(
        ValueKind::Float,
        r#"{ "type": "lerp", "start": 0, "end": 1, "easing": "wobble" }"#,
    )
    .unwrap_err();
    assert!(matches!(err, SpanError::InvalidConfiguration { .. }));
    let err = Span::from_json(ValueKind::Float, r#"{ "type": "array", "array": [1], "pick": "shuffle" }"#)
        .unwrap_err();
    assert!(matches!(err, SpanError::InvalidConfiguration { .. }));
}

#[test]
fn shape_mismatch_is_a_configuration_error() {
    let err = Span::from_json(
        ValueKind::Vec4,
        r#"{ "type": "lerp", "start": [0, 0, 0], "end": [1, 1, 1, 1] }"#,
    )
    .unwrap_err();
    assert_eq!(
        err,
        SpanError::ShapeMismatch {
            expected: ValueKind::Vec4,
            actual: 3
        }
    );
}

#[test]
fn failed_set_leaves_span_unchanged() {
    let mut span = Span::new(ValueKind::Float, SpanConfig::lerp(0.0, 2.0, Easing::Linear)).unwrap();
    let before = span.to_config();
    assert!(span.set_lerp(0.0, [1.0, 2.0], Easing::Linear).is_err());
    assert_eq!(span.to_config(), before);
    assert_eq!(*span.sample(0.5), Value::Float(1.0));
}
