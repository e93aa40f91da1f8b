use nalgebra::{Point3, Vector3};
use surface_flow::prelude::*;

/// Elliptic paraboloid `z = (a u^2 + b v^2) / 2`
struct Paraboloid {
    a: f64,
    b: f64,
}

impl ParametricSurface<f64> for Paraboloid {
    fn point_at(&self, u: f64, v: f64) -> Point3<f64> {
        Point3::new(u, v, (self.a * u * u + self.b * v * v) * 0.5)
    }

    fn derivatives(&self, u: f64, v: f64) -> SurfaceDerivatives<f64> {
        SurfaceDerivatives {
            point: self.point_at(u, v),
            su: Vector3::new(1., 0., self.a * u),
            sv: Vector3::new(0., 1., self.b * v),
            suu: Vector3::new(0., 0., self.a),
            suv: Vector3::zeros(),
            svv: Vector3::new(0., 0., self.b),
        }
    }

    fn u_domain(&self) -> Interval<f64> {
        Interval::new(-1., 1.)
    }

    fn v_domain(&self) -> Interval<f64> {
        Interval::new(-1., 1.)
    }
}

fn paraboloid() -> SurfaceEvaluator<Paraboloid, f64> {
    SurfaceEvaluator::new(Paraboloid { a: 1., b: 2. })
}

#[test]
fn principal_lines_respect_symmetry_plane() {
    let surface = paraboloid();
    let start = surface.point_at(0.3, 0.);
    let lines = [true, false].map(|pick_max| {
        let options = TraceOptions::default()
            .with_field(CurvatureField::Principal { pick_max })
            .with_step_length(0.05)
            .with_integrator(Integrator::ModifiedEuler);
        trace_line(&surface, &start, &options).unwrap()
    });

    let in_plane = |line: &CurvatureLine<f64>| line.points().iter().all(|p| p.y.abs() < 1e-6);
    let crossing = |line: &CurvatureLine<f64>| line.points().iter().any(|p| p.y.abs() > 0.1);
    assert!(
        (in_plane(&lines[0]) && crossing(&lines[1]))
            || (in_plane(&lines[1]) && crossing(&lines[0]))
    );
    for line in lines.iter() {
        assert!(line.points().len() > 10);
        for p in line.points() {
            let uv = surface.closest_parameter(p).unwrap();
            assert!((surface.point_at(uv.x, uv.y) - p).norm() < 1e-6);
        }
    }
}

#[test]
fn asymptotic_lines_are_unavailable_on_elliptic_surface() {
    let surface = paraboloid();
    let start = surface.point_at(0.2, -0.1);
    let lines = trace_asymptotic_lines(&surface, &start, &TraceOptions::default()).unwrap();
    for line in lines.iter() {
        assert_eq!(line.points().len(), 1);
        assert_eq!(line.forward_termination(), TraceTermination::SampleUnavailable);
    }
}

#[test]
fn compass_net_then_relaxation() {
    let surface = paraboloid();
    let step = 0.2;
    let row = (0..5)
        .map(|j| surface.point_at(-0.4 + step * j as f64, -0.4))
        .collect::<Vec<_>>();
    let column = (0..5)
        .map(|i| surface.point_at(-0.4, -0.4 + step * i as f64))
        .collect::<Vec<_>>();
    let net = CompassNet::build(&surface, &row, &column, 1e-6).unwrap();
    assert!(net.is_complete());

    let lattice = net.into_lattice().unwrap();
    let options = RelaxationOptions::new(0.2, 0.19, 0.21)
        .with_damping(0.2)
        .with_max_iterations(50);
    let result = relax(&surface, lattice, &options).unwrap();
    assert_eq!(result.iterations, result.history.len());
    assert!(result.iterations >= 1);
    for p in result.lattice.positions() {
        let uv = surface.closest_parameter(p).unwrap();
        assert!((surface.point_at(uv.x, uv.y) - p).norm() < 1e-3);
    }
}

#[test]
fn section_march_on_paraboloid() {
    let surface = paraboloid();
    let result = march_section(
        &surface,
        &surface.point_at(0., 0.),
        &Vector3::y(),
        &Vector3::x(),
        &MarchOptions::default().with_radius(0.1),
    )
    .unwrap();
    assert!(result.points.len() > 5);
    for p in result.points.iter() {
        assert!(p.y.abs() < 1e-9);
        assert!((p.z - p.x * p.x * 0.5).abs() < 1e-9);
    }
}
