use std::{fmt, ops};

use derive_more::IsVariant;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A numeric scalar: either an exact integer or a float.
///
/// Arithmetic stays integral as long as both operands are integers and the
/// operation is exact; everything else promotes to float. Floats are wrapped
/// in [`OrderedFloat`] so the whole expression tree is `Eq + Hash`. Equality
/// is structural: `Int(2) != Float(2.0)`.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, IsVariant, Serialize, Deserialize,
)]
pub enum Number {
    Int(i64),
    Float(OrderedFloat<f64>),
}

impl Number {
    pub const ZERO: Number = Number::Int(0);
    pub const ONE: Number = Number::Int(1);

    #[inline]
    pub fn is_zero(&self) -> bool {
        match self {
            Number::Int(n) => *n == 0,
            Number::Float(x) => x.into_inner() == 0.0,
        }
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        match self {
            Number::Int(n) => *n == 1,
            Number::Float(x) => x.into_inner() == 1.0,
        }
    }

    #[inline]
    pub fn to_f64(&self) -> f64 {
        match self {
            Number::Int(n) => *n as f64,
            Number::Float(x) => x.into_inner(),
        }
    }

    pub fn add(self, rhs: Self) -> Self {
        use Number as N;
        match (self, rhs) {
            (N::Int(a), N::Int(b)) => match a.checked_add(b) {
                Some(n) => N::Int(n),
                None => (a as f64 + b as f64).into(),
            },
            _ => (self.to_f64() + rhs.to_f64()).into(),
        }
    }

    pub fn sub(self, rhs: Self) -> Self {
        use Number as N;
        match (self, rhs) {
            (N::Int(a), N::Int(b)) => match a.checked_sub(b) {
                Some(n) => N::Int(n),
                None => (a as f64 - b as f64).into(),
            },
            _ => (self.to_f64() - rhs.to_f64()).into(),
        }
    }

    pub fn mul(self, rhs: Self) -> Self {
        use Number as N;
        match (self, rhs) {
            (N::Int(a), N::Int(b)) => match a.checked_mul(b) {
                Some(n) => N::Int(n),
                None => (a as f64 * b as f64).into(),
            },
            _ => (self.to_f64() * rhs.to_f64()).into(),
        }
    }

    /// True division: the result is always a float, a zero divisor is an
    /// error.
    pub fn try_div(self, rhs: Self) -> Result<Self> {
        if rhs.is_zero() {
            return Err(Error::DivisionByZero);
        }
        Ok((self.to_f64() / rhs.to_f64()).into())
    }

    /// `self ^ rhs`. An integer base with a non-negative integer exponent
    /// stays integral (`0 ^ 0 == 1`); any other combination is a float.
    /// Raising zero to a negative power is an error.
    pub fn try_pow(self, rhs: Self) -> Result<Self> {
        use Number as N;
        match (self, rhs) {
            (N::Int(b), N::Int(e)) if e >= 0 => {
                match u32::try_from(e).ok().and_then(|exp| b.checked_pow(exp)) {
                    Some(n) => Ok(N::Int(n)),
                    None => Ok((b as f64).powf(e as f64).into()),
                }
            }
            _ => {
                let (b, e) = (self.to_f64(), rhs.to_f64());
                if b == 0.0 && e < 0.0 {
                    return Err(Error::DivisionByZero);
                }
                Ok(b.powf(e).into())
            }
        }
    }
}

impl ops::Neg for Number {
    type Output = Number;

    fn neg(self) -> Self::Output {
        match self {
            Number::Int(n) => match n.checked_neg() {
                Some(n) => Number::Int(n),
                None => (-(n as f64)).into(),
            },
            Number::Float(x) => Number::Float(-x),
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int(value)
    }
}
impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Int(value.into())
    }
}
impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(OrderedFloat(value))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{n}"),
            // {:?} keeps the decimal point: 2.0 renders as "2.0", not "2"
            Number::Float(x) => write!(f, "{:?}", x.into_inner()),
        }
    }
}
impl fmt::Debug for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}
