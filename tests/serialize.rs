#![cfg(feature = "serde")]

use nalgebra::Point3;
use surface_flow::prelude::*;

#[test]
fn test_options_serialization() {
    let options = TraceOptions::<f64>::default()
        .with_field(CurvatureField::Asymptotic {
            branch: AsymptoticBranch::Negative,
        })
        .with_integrator(Integrator::RungeKutta);
    let json = serde_json::to_string_pretty(&options).unwrap();
    let restored: TraceOptions<f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(options, restored);

    let relaxation = RelaxationOptions::<f64>::new(1., 0.9, 1.1).with_damping(0.1);
    let json = serde_json::to_string(&relaxation).unwrap();
    let restored: RelaxationOptions<f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(relaxation, restored);
}

#[test]
fn test_lattice_serialization() {
    let lattice = Lattice::try_new(
        vec![
            Point3::new(0., 0., 0.),
            Point3::new(1., 0., 0.),
            Point3::new(0., 1., 0.),
            Point3::new(1., 1., 0.),
        ],
        2,
        2,
    )
    .unwrap();
    let json = serde_json::to_string_pretty(&lattice).unwrap();
    let restored: Lattice<f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(lattice, restored);
}

#[test]
fn test_lattice_deserialization_checks_shape() {
    let lattice = Lattice::try_new(
        vec![
            Point3::new(0., 0., 0.),
            Point3::new(1., 0., 0.),
            Point3::new(0., 1., 0.),
            Point3::new(1., 1., 0.),
        ],
        2,
        2,
    )
    .unwrap();
    let mut value = serde_json::to_value(&lattice).unwrap();
    value["nu"] = serde_json::json!(3);
    let restored: Result<Lattice<f64>, _> = serde_json::from_value(value);
    assert!(restored.is_err());

    let missing = serde_json::json!({ "nu": 2, "nv": 2 });
    assert!(serde_json::from_value::<Lattice<f64>>(missing).is_err());
}
