use itertools::Itertools;
use nalgebra::Point3;

use crate::{
    misc::{all_finite, FloatingPoint},
    surface::SurfaceOracle,
};

/// Rectangular grid of points with `nv` rows and `nu` columns, stored row-major.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Lattice<T: FloatingPoint> {
    nu: usize,
    nv: usize,
    positions: Vec<Point3<T>>,
}

impl<T: FloatingPoint> Lattice<T> {
    /// Create a lattice from exactly `nu * nv` row-major points
    pub fn try_new(positions: Vec<Point3<T>>, nu: usize, nv: usize) -> anyhow::Result<Self> {
        anyhow::ensure!(nu > 0 && nv > 0, "Lattice must have at least one row and column");
        anyhow::ensure!(
            positions.len() == nu * nv,
            "Expected {} points for a {} x {} lattice, got {}",
            nu * nv,
            nu,
            nv,
            positions.len()
        );
        anyhow::ensure!(
            positions.iter().all(|p| all_finite(p.coords.iter())),
            "Lattice points must have finite coordinates"
        );
        Ok(Self { nu, nv, positions })
    }

    /// Create a lattice by projecting each point onto the surface
    pub fn project<O: SurfaceOracle<T>>(
        surface: &O,
        points: &[Point3<T>],
        nu: usize,
        nv: usize,
    ) -> anyhow::Result<Self> {
        let positions = points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let uv = surface
                    .closest_parameter(p)
                    .ok_or(anyhow::anyhow!("Failed to project lattice point {i}"))?;
                Ok(surface.point_at(uv.x, uv.y))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        Self::try_new(positions, nu, nv)
    }

    pub fn nu(&self) -> usize {
        self.nu
    }

    pub fn nv(&self) -> usize {
        self.nv
    }

    pub fn positions(&self) -> &[Point3<T>] {
        &self.positions
    }

    pub fn positions_mut(&mut self) -> &mut [Point3<T>] {
        &mut self.positions
    }

    pub fn into_positions(self) -> Vec<Point3<T>> {
        self.positions
    }

    /// Storage index of the node at `row`, `column`
    pub fn index(&self, row: usize, column: usize) -> usize {
        row * self.nu + column
    }

    pub fn node(&self, row: usize, column: usize) -> &Point3<T> {
        &self.positions[self.index(row, column)]
    }

    /// Indices of the 4-connected neighbours (right, down, left, up)
    pub fn neighbors(&self, row: usize, column: usize) -> impl Iterator<Item = usize> + '_ {
        let right = (column + 1 < self.nu).then(|| self.index(row, column + 1));
        let down = (row + 1 < self.nv).then(|| self.index(row + 1, column));
        let left = (column > 0).then(|| self.index(row, column - 1));
        let up = (row > 0).then(|| self.index(row - 1, column));
        [right, down, left, up].into_iter().flatten()
    }

    /// Edges along the rows (u direction) then along the columns (v direction)
    pub fn edges(&self) -> impl Iterator<Item = (&Point3<T>, &Point3<T>)> + '_ {
        let rows = self
            .positions
            .chunks(self.nu)
            .flat_map(|row| row.iter().tuple_windows());
        let columns = (0..self.nu).flat_map(move |j| {
            (0..self.nv)
                .map(move |i| self.node(i, j))
                .tuple_windows()
        });
        rows.chain(columns)
    }

    /// Lengths of all edges
    pub fn edge_lengths(&self) -> impl Iterator<Item = T> + '_ {
        self.edges().map(|(a, b)| (b - a).norm())
    }

    /// `(min, max)` edge length, `None` for a single node
    pub fn edge_length_range(&self) -> Option<(T, T)> {
        self.edge_lengths().fold(None, |acc, l| match acc {
            None => Some((l, l)),
            Some((lo, hi)) => Some((if l < lo { l } else { lo }, if l > hi { l } else { hi })),
        })
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for Lattice<T>
where
    T: FloatingPoint + serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};

        #[derive(Debug)]
        enum Field {
            Nu,
            Nv,
            Positions,
        }

        impl<'de> serde::Deserialize<'de> for Field {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                struct FieldVisitor;

                impl Visitor<'_> for FieldVisitor {
                    type Value = Field;

                    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                        formatter.write_str("`nu` or `nv` or `positions`")
                    }

                    fn visit_str<E>(self, value: &str) -> Result<Field, E>
                    where
                        E: de::Error,
                    {
                        match value {
                            "nu" => Ok(Field::Nu),
                            "nv" => Ok(Field::Nv),
                            "positions" => Ok(Field::Positions),
                            _ => Err(de::Error::unknown_field(value, FIELDS)),
                        }
                    }
                }

                deserializer.deserialize_identifier(FieldVisitor)
            }
        }

        struct LatticeVisitor<T>(std::marker::PhantomData<T>);

        impl<'de, T> Visitor<'de> for LatticeVisitor<T>
        where
            T: FloatingPoint + serde::Deserialize<'de>,
        {
            type Value = Lattice<T>;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("struct Lattice")
            }

            fn visit_map<V>(self, mut map: V) -> Result<Self::Value, V::Error>
            where
                V: MapAccess<'de>,
            {
                let mut nu = None;
                let mut nv = None;
                let mut positions = None;
                while let Some(key) = map.next_key()? {
                    match key {
                        Field::Nu => {
                            if nu.is_some() {
                                return Err(de::Error::duplicate_field("nu"));
                            }
                            nu = Some(map.next_value()?);
                        }
                        Field::Nv => {
                            if nv.is_some() {
                                return Err(de::Error::duplicate_field("nv"));
                            }
                            nv = Some(map.next_value()?);
                        }
                        Field::Positions => {
                            if positions.is_some() {
                                return Err(de::Error::duplicate_field("positions"));
                            }
                            positions = Some(map.next_value()?);
                        }
                    }
                }

                let nu = nu.ok_or_else(|| de::Error::missing_field("nu"))?;
                let nv = nv.ok_or_else(|| de::Error::missing_field("nv"))?;
                let positions = positions.ok_or_else(|| de::Error::missing_field("positions"))?;
                Lattice::try_new(positions, nu, nv).map_err(de::Error::custom)
            }
        }

        const FIELDS: &[&str] = &["nu", "nv", "positions"];
        deserializer.deserialize_struct("Lattice", FIELDS, LatticeVisitor(std::marker::PhantomData))
    }
}
