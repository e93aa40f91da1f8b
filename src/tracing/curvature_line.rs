use itertools::Itertools;
use nalgebra::Point3;

use crate::misc::FloatingPoint;

/// Reason a half trace stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TraceTermination {
    /// The field could not be sampled (no curvature or no asymptotic direction)
    SampleUnavailable,
    /// The candidate point could not be projected onto the surface
    ProjectionFailed,
    /// The projected parameter left the surface domain
    OutOfDomain,
    /// The projected parameter did not move
    Stalled,
    /// The half trace reached the maximum number of points
    RunawayGuard,
}

/// Points of a single traced direction, starting at the start point
#[derive(Debug, Clone, PartialEq)]
pub struct HalfTrace<T: FloatingPoint> {
    pub points: Vec<Point3<T>>,
    pub termination: TraceTermination,
}

/// A polyline traced through a start point in both directions
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurvatureLine<T: FloatingPoint> {
    points: Vec<Point3<T>>,
    start_index: usize,
    forward: TraceTermination,
    backward: TraceTermination,
}

impl<T: FloatingPoint> CurvatureLine<T> {
    /// Join two half traces sharing their first point.
    /// The backward half is reversed in front of the forward half.
    pub fn from_halves(forward: HalfTrace<T>, backward: HalfTrace<T>) -> Self {
        let mut points: Vec<_> = backward.points.into_iter().skip(1).rev().collect();
        let start_index = points.len();
        points.extend(forward.points);
        Self {
            points,
            start_index,
            forward: forward.termination,
            backward: backward.termination,
        }
    }

    pub fn points(&self) -> &[Point3<T>] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point3<T>> {
        self.points
    }

    /// Index of the projected start point in [`Self::points`]
    pub fn start_index(&self) -> usize {
        self.start_index
    }

    pub fn start(&self) -> &Point3<T> {
        &self.points[self.start_index]
    }

    /// Points of the forward half, start point first
    pub fn forward_points(&self) -> &[Point3<T>] {
        &self.points[self.start_index..]
    }

    /// Points of the backward half, start point last
    pub fn backward_points(&self) -> &[Point3<T>] {
        &self.points[..=self.start_index]
    }

    pub fn forward_termination(&self) -> TraceTermination {
        self.forward
    }

    pub fn backward_termination(&self) -> TraceTermination {
        self.backward
    }

    /// Total length of the polyline
    pub fn length(&self) -> T {
        self.points
            .iter()
            .tuple_windows()
            .fold(T::zero(), |acc, (a, b)| acc + (b - a).norm())
    }
}
