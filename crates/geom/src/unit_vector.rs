use crate::scalar::Float;
use crate::utils::safe_sqrt;
use crate::{vector, Vector};

/// A vector of length one, used as a rotation by the angle it forms with the x axis.
///
/// Composing and halving rotations this way only involves multiplications and
/// square roots, which is how arcs are split into quadrants without trigonometry.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct UnitVector(pub Vector);

impl UnitVector {
    /// The rotation by `theta` radians.
    #[inline]
    pub fn from_angle(theta: f32) -> Self {
        let (sin, cos) = Float::sin_cos(theta);
        UnitVector(vector(cos, sin))
    }

    /// Normalizes `v`, which must not have zero length.
    #[inline]
    pub fn normalize(v: Vector) -> Self {
        let length = Float::sqrt(v.square_length());
        UnitVector(v / length)
    }

    #[inline]
    pub fn cos(self) -> f32 {
        self.0.x
    }

    #[inline]
    pub fn sin(self) -> f32 {
        self.0.y
    }

    /// Adds the angle of `other` to this one.
    #[inline]
    pub fn rotate_by(self, other: UnitVector) -> UnitVector {
        let (a, b) = (self.0, other.0);
        UnitVector(vector(a.x * b.x - a.y * b.y, a.y * b.x + a.x * b.y))
    }

    /// Subtracts the angle of `other` from this one.
    #[inline]
    pub fn rev_rotate_by(self, other: UnitVector) -> UnitVector {
        let (a, b) = (self.0, other.0);
        UnitVector(vector(a.x * b.x + a.y * b.y, a.y * b.x - a.x * b.y))
    }

    /// Half of this angle, taken in `[-π/2, π/2]`.
    #[inline]
    pub fn halve_angle(self) -> UnitVector {
        let x = self.0.x;
        let y = self.0.y;
        UnitVector(vector(
            safe_sqrt(0.5 * (1.0 + x)),
            safe_sqrt(0.5 * (1.0 - x)) * Float::signum(y),
        ))
    }
}

#[cfg(test)]
use crate::utils::approx_eq_vector;

#[test]
fn rotations_compose() {
    use core::f32::consts::PI;

    let a = UnitVector::from_angle(PI / 6.0);
    let b = UnitVector::from_angle(PI / 3.0);

    assert!(approx_eq_vector(a.rotate_by(b).0, UnitVector::from_angle(PI / 2.0).0, 1e-5));
    assert!(approx_eq_vector(b.rev_rotate_by(a).0, a.0, 1e-5));
    assert!(approx_eq_vector(a.rev_rotate_by(b).0, UnitVector::from_angle(-PI / 6.0).0, 1e-5));
}

#[test]
fn halve_angle_keeps_side() {
    use core::f32::consts::PI;

    let up = UnitVector::from_angle(2.0 * PI / 3.0).halve_angle();
    assert!(approx_eq_vector(up.0, UnitVector::from_angle(PI / 3.0).0, 1e-5));

    let down = UnitVector::from_angle(-2.0 * PI / 3.0).halve_angle();
    assert!(approx_eq_vector(down.0, UnitVector::from_angle(-PI / 3.0).0, 1e-5));
}

#[test]
fn normalize_vector() {
    let v = UnitVector::normalize(vector(3.0, 4.0));
    assert!(approx_eq_vector(v.0, vector(0.6, 0.8), 1e-6));
    assert!(crate::utils::approx_eq_eps(v.cos() * v.cos() + v.sin() * v.sin(), 1.0, 1e-6));
}
