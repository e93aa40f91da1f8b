use nalgebra::Point3;

use crate::{
    misc::{all_finite, Circle, FloatingPoint},
    relaxation::Lattice,
    surface::SurfaceOracle,
};

/// Chebyshev net on a surface: every quad is a rhombus of surface points.
///
/// Nodes are stored row-major with `nv` rows and `nu` columns; a node is `None` when
/// its construction failed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompassNet<T: FloatingPoint> {
    nu: usize,
    nv: usize,
    nodes: Vec<Option<Point3<T>>>,
}

impl<T: FloatingPoint> CompassNet<T> {
    /// Build the net from its first row and first column.
    ///
    /// `first_row[0]` is the shared corner, `first_column[0]` is ignored.
    /// Each further node `(i, j)` completes the rhombus over `(i-1, j-1)`, `(i, j-1)` and
    /// `(i-1, j)`: it is the intersection of the surface with the circle of points
    /// equidistant to `(i, j-1)` and `(i-1, j)` passing through `(i-1, j-1)`, taken
    /// farthest from `(i-1, j-1)`.
    pub fn build<O: SurfaceOracle<T>>(
        surface: &O,
        first_row: &[Point3<T>],
        first_column: &[Point3<T>],
        tolerance: T,
    ) -> anyhow::Result<Self> {
        anyhow::ensure!(first_row.len() >= 2, "First row needs at least 2 points");
        anyhow::ensure!(first_column.len() >= 2, "First column needs at least 2 points");
        anyhow::ensure!(
            first_row
                .iter()
                .chain(first_column.iter())
                .all(|p| all_finite(p.coords.iter())),
            "Points must have finite coordinates"
        );
        anyhow::ensure!(
            tolerance.is_finite() && tolerance > T::zero(),
            "Tolerance must be positive and finite"
        );

        let nu = first_row.len();
        let nv = first_column.len();
        let mut net = Self {
            nu,
            nv,
            nodes: vec![None; nu * nv],
        };
        for (i, p) in first_column.iter().enumerate().skip(1) {
            net.nodes[i * nu] = Some(*p);
        }
        for (j, p) in first_row.iter().enumerate() {
            net.nodes[j] = Some(*p);
        }

        for i in 1..nv {
            for j in 1..nu {
                let node = match (net.node(i - 1, j - 1), net.node(i, j - 1), net.node(i - 1, j)) {
                    (Some(p0), Some(p1), Some(p2)) => complete_rhombus(surface, p0, p1, p2, tolerance),
                    _ => None,
                };
                if node.is_none() {
                    log::warn!("compass net node ({i}, {j}) could not be constructed");
                }
                net.nodes[i * nu + j] = node;
            }
        }

        Ok(net)
    }

    pub fn nu(&self) -> usize {
        self.nu
    }

    pub fn nv(&self) -> usize {
        self.nv
    }

    pub fn node(&self, row: usize, column: usize) -> Option<&Point3<T>> {
        self.nodes[row * self.nu + column].as_ref()
    }

    pub fn nodes(&self) -> &[Option<Point3<T>>] {
        &self.nodes
    }

    /// Whether every node was constructed
    pub fn is_complete(&self) -> bool {
        self.nodes.iter().all(|n| n.is_some())
    }

    /// Convert into a lattice, failing if any node is missing
    pub fn into_lattice(self) -> anyhow::Result<Lattice<T>> {
        let missing = self.nodes.iter().filter(|n| n.is_none()).count();
        anyhow::ensure!(missing == 0, "Compass net is missing {missing} nodes");
        let positions = self.nodes.into_iter().flatten().collect();
        Lattice::try_new(positions, self.nu, self.nv)
    }
}

/// Fourth vertex of the rhombus `p0, p1, p2` on the surface
fn complete_rhombus<T: FloatingPoint, O: SurfaceOracle<T>>(
    surface: &O,
    p0: &Point3<T>,
    p1: &Point3<T>,
    p2: &Point3<T>,
    tolerance: T,
) -> Option<Point3<T>> {
    let mid = p1 + (p2 - p1) * T::from_literal(0.5);
    let radius = (p0 - mid).norm();
    let circle = Circle::try_new(mid, &(p2 - p1), radius).ok()?;
    surface
        .intersect_circle(&circle, tolerance)?
        .into_iter()
        .map(|p| ((p - p0).norm(), p))
        .max_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(_, p)| p)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    use super::*;
    use crate::{
        fixtures::{ConstantFieldPlane, HalfCylinder, PlanePatch},
        surface::{ParametricSurface, SurfaceEvaluator},
    };

    #[test]
    fn square_grid_on_a_plane() {
        let surface = SurfaceEvaluator::new(PlanePatch::new((-1., 5.), (-1., 5.)));
        let row = (0..4).map(|j| Point3::new(j as f64, 0., 0.)).collect::<Vec<_>>();
        let column = (0..3).map(|i| Point3::new(0., i as f64, 0.)).collect::<Vec<_>>();
        let net = CompassNet::build(&surface, &row, &column, 1e-6).unwrap();
        assert_eq!((net.nu(), net.nv()), (4, 3));
        assert!(net.is_complete());
        for i in 0..3 {
            for j in 0..4 {
                assert_relative_eq!(
                    *net.node(i, j).unwrap(),
                    Point3::new(j as f64, i as f64, 0.),
                    epsilon = 1e-9
                );
            }
        }
        let lattice = net.into_lattice().unwrap();
        assert_eq!(lattice.positions().len(), 12);
    }

    #[test]
    fn rhombic_net_on_a_cylinder() {
        let cylinder = HalfCylinder::new(1., 3.);
        let surface = SurfaceEvaluator::new(cylinder.clone());
        // first row along the axis, first column around the arc
        let row = (0..4)
            .map(|j| cylinder.point_at(0.5, 0.5 + 0.3 * j as f64))
            .collect::<Vec<_>>();
        let column = (0..4)
            .map(|i| cylinder.point_at(0.5 + 0.3 * i as f64, 0.5))
            .collect::<Vec<_>>();
        let net = CompassNet::build(&surface, &row, &column, 1e-6).unwrap();
        assert!(net.is_complete());
        for i in 1..4 {
            for j in 1..4 {
                let p = net.node(i, j).unwrap();
                let p1 = net.node(i, j - 1).unwrap();
                let p2 = net.node(i - 1, j).unwrap();
                let p0 = net.node(i - 1, j - 1).unwrap();
                let mid = p1 + (p2 - p1) * 0.5;
                assert_relative_eq!((p - p1).norm(), (p - p2).norm(), epsilon = 1e-6);
                assert_relative_eq!((p - mid).norm(), (p0 - mid).norm(), epsilon = 1e-6);
                assert!((p - p0).norm() > (p0 - mid).norm());
                assert_relative_eq!((p.x * p.x + p.y * p.y).sqrt(), 1., epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn missing_intersections_leave_holes() {
        let plane = ConstantFieldPlane::new([0., 0.]);
        let row = vec![Point3::new(0., 0., 0.), Point3::new(1., 0., 0.)];
        let column = vec![Point3::new(0., 0., 0.), Point3::new(0., 1., 0.)];
        let net = CompassNet::build(&plane, &row, &column, 1e-6).unwrap();
        assert!(!net.is_complete());
        assert!(net.node(1, 1).is_none());
        assert!(net.into_lattice().is_err());
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        let plane = ConstantFieldPlane::new([0., 0.]);
        let two = vec![Point3::origin(), Point3::new(1., 0., 0.)];
        let one = vec![Point3::origin()];
        assert!(CompassNet::build(&plane, &one, &two, 1e-6).is_err());
        assert!(CompassNet::build(&plane, &two, &one, 1e-6).is_err());
        assert!(CompassNet::build(&plane, &two, &two, 0.).is_err());
        let nan = vec![Point3::origin(), Point3::new(f64::NAN, 0., 0.)];
        assert!(CompassNet::build(&plane, &two, &nan, 1e-6).is_err());
    }
}
