//! Grid element trait for generic pixel values

use num_traits::{NumCast, Zero};
use std::fmt::Debug;

/// Trait for types that can be stored in a grid pixel.
///
/// Boolean images are represented as `u8` grids holding 0 or 1.
pub trait GridElement:
    Copy + Clone + Debug + PartialOrd + PartialEq + NumCast + Zero + Send + Sync + 'static
{
    /// Minimum value representable by this type
    fn min_value() -> Self;

    /// Maximum value representable by this type
    fn max_value() -> Self;

    /// Whether this type is a floating point type
    fn is_float() -> bool;

    /// Convert self to f64
    fn to_f64(self) -> f64 {
        NumCast::from(self).unwrap_or(f64::NAN)
    }

    /// Convert an f64 into this type, saturating at the type bounds.
    ///
    /// Integer targets round to the nearest value; NaN maps to zero.
    fn from_f64(value: f64) -> Self {
        if value.is_nan() && !Self::is_float() {
            return Self::zero();
        }
        let lo = Self::min_value().to_f64();
        let hi = Self::max_value().to_f64();
        let v = if Self::is_float() { value } else { value.round() };
        NumCast::from(v.clamp(lo, hi)).unwrap_or_else(Self::zero)
    }
}

macro_rules! impl_grid_element {
    ($t:ty, $float:expr) => {
        impl GridElement for $t {
            fn min_value() -> Self {
                <$t>::MIN
            }

            fn max_value() -> Self {
                <$t>::MAX
            }

            fn is_float() -> bool {
                $float
            }
        }
    };
}

impl_grid_element!(u8, false);
impl_grid_element!(u16, false);
impl_grid_element!(i32, false);
impl_grid_element!(i64, false);
impl_grid_element!(f32, true);
impl_grid_element!(f64, true);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_f64_saturates() {
        assert_eq!(u8::from_f64(300.0), 255);
        assert_eq!(u8::from_f64(-4.0), 0);
        assert_eq!(u8::from_f64(12.6), 13);
        assert_eq!(i32::from_f64(f64::NAN), 0);
    }

    #[test]
    fn test_float_passthrough() {
        assert_eq!(f64::from_f64(1.25), 1.25);
        assert!(f64::from_f64(f64::NAN).is_nan());
        assert_eq!(7u16.to_f64(), 7.0);
    }

    #[test]
    fn test_f32_round_trip_precision() {
        let v = f32::from_f64(0.1).to_f64();
        approx::assert_relative_eq!(v, 0.1, epsilon = 1e-7);
        assert_eq!(f32::from_f64(1e300), f32::MAX);
    }
}
