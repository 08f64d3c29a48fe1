//! Uncertain floating-point values
//!
//! This module provides the [`UFloat`] type, a value-with-uncertainty pair
//! (nominal value plus standard deviation) with first-order error propagation
//! through arithmetic and a small set of transcendental operations, and the
//! [`Scalar`] trait that lets curve formulas be written once and evaluated on
//! plain floats or uncertain floats alike.
//!
//! Propagation treats operands as independent: for `f(a, b)` the resulting
//! standard deviation is `sqrt((df/da * sa)^2 + (df/db * sb)^2)`. Correlation
//! between values is not tracked.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A floating-point value with an associated uncertainty.
///
/// Ordering-sensitive operations (boundary checks, curve breakpoints) use the
/// nominal value only; the standard deviation rides along through arithmetic.
///
/// # Examples
///
/// ```
/// use scorekit::uncertain::UFloat;
///
/// let a = UFloat::new(2.0, 0.1);
/// let b = UFloat::new(3.0, 0.2);
/// let sum = a + b;
/// assert_eq!(sum.nominal(), 5.0);
/// assert!((sum.std_dev() - (0.1f64.powi(2) + 0.2f64.powi(2)).sqrt()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UFloat {
    nominal: f64,
    std_dev: f64,
}

impl UFloat {
    /// Create a new uncertain value. The standard deviation is stored as its
    /// absolute value.
    pub fn new(nominal: f64, std_dev: f64) -> Self {
        Self {
            nominal,
            std_dev: std_dev.abs(),
        }
    }

    /// The nominal (central) value.
    pub fn nominal(&self) -> f64 {
        self.nominal
    }

    /// The standard deviation of the value.
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Exponential, `e^x`.
    pub fn exp(self) -> Self {
        let v = self.nominal.exp();
        Self::new(v, v * self.std_dev)
    }

    /// Natural logarithm.
    pub fn ln(self) -> Self {
        Self::new(self.nominal.ln(), self.std_dev / self.nominal.abs())
    }

    /// Raise to a constant power.
    pub fn powf(self, exp: f64) -> Self {
        let v = self.nominal.powf(exp);
        let deriv = exp * self.nominal.powf(exp - 1.0);
        Self::new(v, deriv.abs() * self.std_dev)
    }

    /// Absolute value of the nominal component.
    pub fn abs(self) -> Self {
        Self::new(self.nominal.abs(), self.std_dev)
    }
}

impl Add for UFloat {
    type Output = UFloat;

    fn add(self, rhs: UFloat) -> UFloat {
        UFloat::new(self.nominal + rhs.nominal, self.std_dev.hypot(rhs.std_dev))
    }
}

impl Sub for UFloat {
    type Output = UFloat;

    fn sub(self, rhs: UFloat) -> UFloat {
        UFloat::new(self.nominal - rhs.nominal, self.std_dev.hypot(rhs.std_dev))
    }
}

impl Mul for UFloat {
    type Output = UFloat;

    fn mul(self, rhs: UFloat) -> UFloat {
        let sigma = (rhs.nominal * self.std_dev).hypot(self.nominal * rhs.std_dev);
        UFloat::new(self.nominal * rhs.nominal, sigma)
    }
}

impl Div for UFloat {
    type Output = UFloat;

    fn div(self, rhs: UFloat) -> UFloat {
        let v = self.nominal / rhs.nominal;
        let sigma =
            (self.std_dev / rhs.nominal).hypot(self.nominal * rhs.std_dev / rhs.nominal.powi(2));
        UFloat::new(v, sigma)
    }
}

impl Neg for UFloat {
    type Output = UFloat;

    fn neg(self) -> UFloat {
        UFloat::new(-self.nominal, self.std_dev)
    }
}

impl Add<f64> for UFloat {
    type Output = UFloat;

    fn add(self, rhs: f64) -> UFloat {
        UFloat::new(self.nominal + rhs, self.std_dev)
    }
}

impl Sub<f64> for UFloat {
    type Output = UFloat;

    fn sub(self, rhs: f64) -> UFloat {
        UFloat::new(self.nominal - rhs, self.std_dev)
    }
}

impl Mul<f64> for UFloat {
    type Output = UFloat;

    fn mul(self, rhs: f64) -> UFloat {
        UFloat::new(self.nominal * rhs, self.std_dev * rhs.abs())
    }
}

impl Div<f64> for UFloat {
    type Output = UFloat;

    fn div(self, rhs: f64) -> UFloat {
        UFloat::new(self.nominal / rhs, self.std_dev / rhs.abs())
    }
}

/// Numeric abstraction over `f64` and [`UFloat`].
///
/// Desirability formulas are written once against this trait; evaluated with
/// `f64` they produce plain scores, evaluated with [`UFloat`] the uncertainty
/// propagates through every arithmetic step.
pub trait Scalar:
    Copy
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Add<f64, Output = Self>
    + Sub<f64, Output = Self>
    + Mul<f64, Output = Self>
    + Div<f64, Output = Self>
{
    /// Lift a plain float into the scalar type (zero uncertainty).
    fn from_f64(v: f64) -> Self;

    /// The nominal value, used for comparisons and branching.
    fn nominal(self) -> f64;

    fn exp(self) -> Self;

    fn ln(self) -> Self;

    fn powf(self, exp: f64) -> Self;

    fn abs(self) -> Self;
}

impl Scalar for f64 {
    fn from_f64(v: f64) -> Self {
        v
    }

    fn nominal(self) -> f64 {
        self
    }

    fn exp(self) -> Self {
        f64::exp(self)
    }

    fn ln(self) -> Self {
        f64::ln(self)
    }

    fn powf(self, exp: f64) -> Self {
        f64::powf(self, exp)
    }

    fn abs(self) -> Self {
        f64::abs(self)
    }
}

impl Scalar for UFloat {
    fn from_f64(v: f64) -> Self {
        UFloat::new(v, 0.0)
    }

    fn nominal(self) -> f64 {
        UFloat::nominal(&self)
    }

    fn exp(self) -> Self {
        UFloat::exp(self)
    }

    fn ln(self) -> Self {
        UFloat::ln(self)
    }

    fn powf(self, exp: f64) -> Self {
        UFloat::powf(self, exp)
    }

    fn abs(self) -> Self {
        UFloat::abs(self)
    }
}
