//! Solver settings loaded from and saved to JSON.

#![cfg(feature = "cg")]

use slinalg::cg::{conjugate_gradient, CgParams, CgResult};
use slinalg::CsrMatrix;

#[test]
fn test_params_json_round_trip() {
    let params = CgParams::default().with_max_iters(250).with_tolerance(1e-6);
    assert_eq!(params, CgParams::new(250, 1e-6));
    let json = serde_json::to_string(&params).unwrap();
    let back: CgParams = serde_json::from_str(&json).unwrap();
    assert_eq!(back, params);
}

#[test]
fn test_partial_config_uses_defaults() {
    let only_iters: CgParams = serde_json::from_str(r#"{ "max_iters": 42 }"#).unwrap();
    assert_eq!(only_iters.max_iters, 42);
    assert_eq!(only_iters.tolerance, CgParams::default().tolerance);

    let empty: CgParams = serde_json::from_str("{}").unwrap();
    assert_eq!(empty, CgParams::default());
}

#[test]
fn test_loaded_params_are_validated_on_use() {
    let params: CgParams = serde_json::from_str(r#"{ "tolerance": -1.0 }"#).unwrap();
    assert!(params.validate().is_err());

    let a = CsrMatrix::<f64>::identity(2);
    let mut x = vec![0.0; 2];
    assert!(conjugate_gradient(&a, &[1.0, 1.0], &mut x, &params).is_err());
}

#[test]
fn test_result_serializes() {
    let a = CsrMatrix::<f64>::identity(3);
    let mut x = vec![0.0; 3];
    let result = conjugate_gradient(&a, &[1.0, 2.0, 3.0], &mut x, &CgParams::default()).unwrap();

    let value = serde_json::to_value(result).unwrap();
    assert_eq!(value["iters"], 1);
    assert_eq!(value["converged"], true);

    let back: CgResult = serde_json::from_value(value).unwrap();
    assert_eq!(back, result);
}
