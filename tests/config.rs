use powscale::{config::ScaleConfig, scale::Pow, ScaleError, Value};

#[test]
fn test_restore_from_json() {
    let json = r#"{
        "domain": [0, 50, 100],
        "range": ["red", "white", "green"],
        "exponent": 1,
        "clamp": true
    }"#;
    let config = ScaleConfig::from_json(json).unwrap();
    let s = Pow::from_config(&config).unwrap();

    assert_eq!(s.domain(), vec![0.0, 50.0, 100.0]);
    assert!(s.clamp());
    assert_eq!(s.apply(-10.0), "#ff0000");
    assert_eq!(s.apply(50.0), "#ffffff");
}

#[test]
fn test_reader_input() {
    let json = br#"{"exponent": 0.5, "range": [0, 10]}"#;
    let config = ScaleConfig::from_reader(&json[..]).unwrap();
    let s = Pow::from_config(&config).unwrap();
    assert_eq!(s.exponent(), 0.5);
    assert_eq!(s.domain(), vec![0.0, 1.0]);
    assert_eq!(s.apply(0.25), 5.0);
}

#[test]
fn test_snapshot_survives_json() {
    let mut s = Pow::new();
    s.set_exponent(3.0)
        .set_domain([-1.0, 1.0])
        .set_range([Value::from(vec![0.0, 1.0]), Value::from(vec![10.0, 2.0])]);

    let json = s.config().to_json().unwrap();
    let restored = Pow::from_config(&ScaleConfig::from_json(&json).unwrap()).unwrap();

    assert_eq!(restored.config(), s.config());
    assert_eq!(restored.apply(0.0), s.apply(0.0));
    assert_eq!(restored.apply(0.0), Value::from(vec![5.0, 1.5]));
}

#[test]
fn test_rejects_non_finite_exponent() {
    let config = ScaleConfig {
        exponent: f64::NAN,
        ..ScaleConfig::default()
    };
    assert!(matches!(config.validate(), Err(ScaleError::InvalidExponent(k)) if k.is_nan()));
}

#[test]
fn test_wrong_types_are_config_errors() {
    let err = ScaleConfig::from_json(r#"{"clamp": "yes"}"#).unwrap_err();
    assert!(matches!(err, ScaleError::Config(_)));
}
