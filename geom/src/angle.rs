use std::f64;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Stores in radians
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Angle(f64);

impl Angle {
    pub fn new_rads(rads: f64) -> Angle {
        Angle(rads)
    }

    pub fn degrees(degs: f64) -> Angle {
        Angle(degs.to_radians())
    }

    /// In [0, 2pi)
    pub fn normalized_radians(self) -> f64 {
        self.0.rem_euclid(2.0 * f64::consts::PI)
    }

    pub fn normalized_degrees(self) -> f64 {
        self.normalized_radians().to_degrees()
    }

    /// How far to rotate from this angle to reach `other`, in [-pi, pi). Positive is
    /// counter-clockwise (y-up).
    pub fn signed_rotation_to(self, other: Angle) -> f64 {
        let pi = f64::consts::PI;
        (other.0 - self.0 + pi).rem_euclid(2.0 * pi) - pi
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Angle({} degrees)", self.normalized_degrees())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_rotation() {
        let east = Angle::degrees(0.0);
        let north = Angle::degrees(90.0);
        assert!((east.signed_rotation_to(north) - f64::consts::FRAC_PI_2).abs() < 1e-9);
        assert!((north.signed_rotation_to(east) + f64::consts::FRAC_PI_2).abs() < 1e-9);
        assert!((Angle::degrees(350.0).normalized_degrees() - 350.0).abs() < 1e-9);
        assert!((Angle::degrees(-10.0).normalized_degrees() - 350.0).abs() < 1e-9);
    }
}
