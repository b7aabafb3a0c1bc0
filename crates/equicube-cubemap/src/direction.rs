//! Per-pixel view directions for one cube face.
//!
//! A face of edge length `n` is parameterized by `u` (columns) and `v` (rows),
//! each spaced evenly over `[-1, 1]`. Each `(u, v)` pair is turned into a raw
//! direction by the face's formula and then normalized:
//!
//! ```text
//! Front   ( u,  v,  1)      Back    (-u,  v, -1)
//! Left    (-1,  v, -u)      Right   ( 1,  v,  u)
//! Top     ( u,  1, -v)      Bottom  ( u, -1,  v)
//! ```

use std::fmt;
use std::str::FromStr;

use glam::DVec3;

use crate::CubemapError;

/// Which axis a face looks along, selecting its direction formula.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum DirectionKind {
    /// +Z
    Front = 0,
    /// −Z
    Back = 1,
    /// −X
    Left = 2,
    /// +X
    Right = 3,
    /// +Y
    Top = 4,
    /// −Y
    Bottom = 5,
}

impl DirectionKind {
    /// All six direction kinds.
    pub const ALL: [DirectionKind; 6] = [
        DirectionKind::Front,
        DirectionKind::Back,
        DirectionKind::Left,
        DirectionKind::Right,
        DirectionKind::Top,
        DirectionKind::Bottom,
    ];

    /// Unnormalized direction for face parameters `u`, `v` in `[-1, 1]`.
    #[inline]
    #[must_use]
    pub fn raw_direction(self, u: f64, v: f64) -> DVec3 {
        match self {
            DirectionKind::Front => DVec3::new(u, v, 1.0),
            DirectionKind::Back => DVec3::new(-u, v, -1.0),
            DirectionKind::Left => DVec3::new(-1.0, v, -u),
            DirectionKind::Right => DVec3::new(1.0, v, u),
            DirectionKind::Top => DVec3::new(u, 1.0, -v),
            DirectionKind::Bottom => DVec3::new(u, -1.0, v),
        }
    }

    /// Unit direction for face parameters `u`, `v`.
    ///
    /// One component of the raw vector is always ±1, so the norm is never zero.
    #[inline]
    #[must_use]
    pub fn direction(self, u: f64, v: f64) -> DVec3 {
        self.raw_direction(u, v).normalize()
    }

    /// The direction through the face center.
    #[must_use]
    pub fn axis(self) -> DVec3 {
        self.raw_direction(0.0, 0.0)
    }

    /// Lowercase name, as accepted by [`FromStr`].
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            DirectionKind::Front => "front",
            DirectionKind::Back => "back",
            DirectionKind::Left => "left",
            DirectionKind::Right => "right",
            DirectionKind::Top => "top",
            DirectionKind::Bottom => "bottom",
        }
    }
}

impl fmt::Display for DirectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DirectionKind {
    type Err = CubemapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DirectionKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CubemapError::UnknownDirection(s.to_string()))
    }
}

/// `n` samples spaced evenly over `[-1, 1]`, both ends included.
///
/// A single sample sits at `-1`.
#[must_use]
pub fn face_axis(n: u32) -> Vec<f64> {
    if n == 1 {
        return vec![-1.0];
    }
    let step = 2.0 / f64::from(n - 1);
    (0..n).map(|i| -1.0 + step * f64::from(i)).collect()
}

/// A square grid of unit view directions, one per output pixel, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectionField {
    size: u32,
    directions: Vec<DVec3>,
}

impl DirectionField {
    /// Generate the direction field of `kind` at `face_size` × `face_size`.
    pub fn generate(kind: DirectionKind, face_size: u32) -> Result<Self, CubemapError> {
        if face_size == 0 {
            return Err(CubemapError::InvalidFaceSize(face_size));
        }

        let axis = face_axis(face_size);
        let mut directions = Vec::with_capacity(axis.len() * axis.len());
        for &v in &axis {
            for &u in &axis {
                directions.push(kind.direction(u, v));
            }
        }

        Ok(Self {
            size: face_size,
            directions,
        })
    }

    /// Edge length in pixels.
    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Direction of the pixel at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `x` or `y` is not less than [`size`](Self::size).
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> DVec3 {
        assert!(x < self.size && y < self.size, "({x}, {y}) outside face");
        self.directions[self.index(x, y)]
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.size as usize + x as usize
    }

    /// All directions in row-major order.
    #[must_use]
    pub fn as_slice(&self) -> &[DVec3] {
        &self.directions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-5;

    #[test]
    fn test_face_axis_endpoints() {
        let axis = face_axis(5);
        assert_eq!(axis, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
        assert_eq!(face_axis(2), vec![-1.0, 1.0]);
    }

    #[test]
    fn test_face_axis_single_sample() {
        assert_eq!(face_axis(1), vec![-1.0]);
    }

    #[test]
    fn test_raw_direction_table() {
        let (u, v) = (0.25, -0.5);
        assert_eq!(DirectionKind::Front.raw_direction(u, v), DVec3::new(u, v, 1.0));
        assert_eq!(DirectionKind::Back.raw_direction(u, v), DVec3::new(-u, v, -1.0));
        assert_eq!(DirectionKind::Left.raw_direction(u, v), DVec3::new(-1.0, v, -u));
        assert_eq!(DirectionKind::Right.raw_direction(u, v), DVec3::new(1.0, v, u));
        assert_eq!(DirectionKind::Top.raw_direction(u, v), DVec3::new(u, 1.0, -v));
        assert_eq!(DirectionKind::Bottom.raw_direction(u, v), DVec3::new(u, -1.0, v));
    }

    #[test]
    fn test_all_directions_unit_length() {
        for kind in DirectionKind::ALL {
            for i in 0..=20 {
                for j in 0..=20 {
                    let u = -1.0 + f64::from(i) * 0.1;
                    let v = -1.0 + f64::from(j) * 0.1;
                    let d = kind.direction(u, v);
                    assert!(
                        (d.length() - 1.0).abs() < EPSILON,
                        "{kind:?} at ({u}, {v}) has length {}",
                        d.length()
                    );
                }
            }
        }
    }

    #[test]
    fn test_field_vectors_unit_length() {
        for kind in DirectionKind::ALL {
            let field = DirectionField::generate(kind, 17).unwrap();
            assert_eq!(field.as_slice().len(), 17 * 17);
            for d in field.as_slice() {
                assert!((d.length() - 1.0).abs() < EPSILON, "{kind:?}: {d:?}");
            }
        }
    }

    #[test]
    fn test_face_center_is_axis() {
        for kind in DirectionKind::ALL {
            let field = DirectionField::generate(kind, 3).unwrap();
            let center = field.get(1, 1);
            assert!((center - kind.axis()).length() < 1e-12, "{kind:?}: {center:?}");
            assert_eq!(kind.axis().length(), 1.0);
        }
    }

    #[test]
    fn test_u_follows_columns_v_follows_rows() {
        let field = DirectionField::generate(DirectionKind::Front, 2).unwrap();
        let s = 1.0 / 3.0_f64.sqrt();
        let expected = [
            DVec3::new(-s, -s, s),
            DVec3::new(s, -s, s),
            DVec3::new(-s, s, s),
            DVec3::new(s, s, s),
        ];
        for (got, want) in field.as_slice().iter().zip(expected) {
            assert!((*got - want).length() < 1e-12, "got {got:?}, want {want:?}");
        }
    }

    #[test]
    fn test_index_does_not_overflow_large_faces() {
        let field = DirectionField {
            size: 70_000,
            directions: Vec::new(),
        };
        assert_eq!(field.index(69_999, 69_999), 70_000 * 70_000 - 1);
    }

    #[test]
    fn test_zero_face_size_rejected() {
        assert_eq!(
            DirectionField::generate(DirectionKind::Top, 0),
            Err(CubemapError::InvalidFaceSize(0))
        );
    }

    #[test]
    fn test_parse_direction_kind() {
        for kind in DirectionKind::ALL {
            assert_eq!(kind.name().parse::<DirectionKind>(), Ok(kind));
        }
        assert_eq!("TOP".parse::<DirectionKind>(), Ok(DirectionKind::Top));
    }

    #[test]
    fn test_unknown_direction_is_configuration_error() {
        assert_eq!(
            "sideways".parse::<DirectionKind>(),
            Err(CubemapError::UnknownDirection("sideways".to_string()))
        );
    }
}
