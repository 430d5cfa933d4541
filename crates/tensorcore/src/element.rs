//! Element types for tensors.
//!
//! Every tensor element implements [`Element`]. The trait carries the small
//! arithmetic vocabulary the algebra needs (a zero, a one, a sum and a product),
//! plus the hooks used by equality, hashing and the GEMM kernel.
//!
//! Supported element types:
//!
//! ```text
//! bool  i8  i16  i32  i64  f32  f64  c64
//! ```
//!
//! Conversions between element types come in two flavours:
//!
//! - [`CastFrom`]: a value cast in the spirit of `as` (may lose information).
//! - [`convert_exact`]: a cast whose reverse cast must reproduce the input,
//!   otherwise [`TensorError::InexactConversion`] is returned.
//!
//! [`Promote`] gives the common type two element types combine into.

use std::fmt::Debug;
use std::hash::{Hash, Hasher};

use crate::backend::{GemmBackend, GenericBackend, faer_gemm_c64, faer_gemm_f64};
use crate::error::TensorError;

pub use faer::c64;

/// Trait for tensor element types.
pub trait Element: Copy + Debug + PartialEq + Default + 'static {
    /// Name of the element type.
    const NAME: &'static str;

    /// Returns the additive identity (zero).
    fn zero() -> Self {
        Self::default()
    }

    /// Returns the multiplicative identity (one).
    fn one() -> Self;

    /// Sum of two elements. Integers wrap on overflow, `bool` is `or`.
    fn add_elem(self, rhs: Self) -> Self;

    /// Product of two elements. Integers wrap on overflow, `bool` is `and`.
    fn mul_elem(self, rhs: Self) -> Self;

    /// Complex conjugate. Identity for real types.
    #[inline]
    fn conj(self) -> Self {
        self
    }

    /// Absolute value as `f64`.
    fn magnitude(self) -> f64;

    /// `|self - other|` as `f64`.
    fn distance(self, other: Self) -> f64;

    /// Feed the element into a hasher. Equal elements hash equally.
    fn hash_elem<H: Hasher>(&self, state: &mut H);

    /// Column-major `c = a * b` with `a: m x k`, `b: k x n`, `c: m x n`.
    ///
    /// `c` is overwritten. The default is the naive loop of [`GenericBackend`].
    fn gemm(c: &mut [Self], a: &[Self], b: &[Self], m: usize, k: usize, n: usize) {
        GenericBackend::gemm_into(c, a, b, m, k, n);
    }
}

/// Element types with an additive inverse.
pub trait SignedElement: Element {
    /// Returns `-self`.
    fn negate(self) -> Self;
}

impl Element for bool {
    const NAME: &'static str = "bool";

    fn one() -> Self {
        true
    }

    #[inline]
    fn add_elem(self, rhs: Self) -> Self {
        self | rhs
    }

    #[inline]
    fn mul_elem(self, rhs: Self) -> Self {
        self & rhs
    }

    fn magnitude(self) -> f64 {
        if self { 1.0 } else { 0.0 }
    }

    fn distance(self, other: Self) -> f64 {
        if self == other { 0.0 } else { 1.0 }
    }

    fn hash_elem<H: Hasher>(&self, state: &mut H) {
        self.hash(state);
    }
}

macro_rules! impl_int_element {
    ($($t:ident),*) => {$(
        impl Element for $t {
            const NAME: &'static str = stringify!($t);

            fn one() -> Self {
                1
            }

            #[inline]
            fn add_elem(self, rhs: Self) -> Self {
                self.wrapping_add(rhs)
            }

            #[inline]
            fn mul_elem(self, rhs: Self) -> Self {
                self.wrapping_mul(rhs)
            }

            fn magnitude(self) -> f64 {
                (self as f64).abs()
            }

            fn distance(self, other: Self) -> f64 {
                (self as f64 - other as f64).abs()
            }

            fn hash_elem<H: Hasher>(&self, state: &mut H) {
                self.hash(state);
            }
        }

        impl SignedElement for $t {
            #[inline]
            fn negate(self) -> Self {
                self.wrapping_neg()
            }
        }
    )*};
}

impl_int_element!(i8, i16, i32, i64);

macro_rules! impl_float_element {
    ($($t:ident => $bits:ident),*) => {$(
        impl Element for $t {
            const NAME: &'static str = stringify!($t);

            fn one() -> Self {
                1.0
            }

            #[inline]
            fn add_elem(self, rhs: Self) -> Self {
                self + rhs
            }

            #[inline]
            fn mul_elem(self, rhs: Self) -> Self {
                self * rhs
            }

            fn magnitude(self) -> f64 {
                (self as f64).abs()
            }

            fn distance(self, other: Self) -> f64 {
                (self as f64 - other as f64).abs()
            }

            fn hash_elem<H: Hasher>(&self, state: &mut H) {
                // -0.0 == 0.0, so both must hash alike
                let v = if *self == 0.0 { 0.0 } else { *self };
                state.$bits(v.to_bits());
            }

            fn gemm(c: &mut [Self], a: &[Self], b: &[Self], m: usize, k: usize, n: usize) {
                float_gemm!($t, c, a, b, m, k, n);
            }
        }

        impl SignedElement for $t {
            #[inline]
            fn negate(self) -> Self {
                -self
            }
        }
    )*};
}

macro_rules! float_gemm {
    (f64, $c:ident, $a:ident, $b:ident, $m:ident, $k:ident, $n:ident) => {
        faer_gemm_f64($c, $a, $b, $m, $k, $n)
    };
    (f32, $c:ident, $a:ident, $b:ident, $m:ident, $k:ident, $n:ident) => {
        GenericBackend::gemm_into($c, $a, $b, $m, $k, $n)
    };
}

impl_float_element!(f32 => write_u32, f64 => write_u64);

impl Element for c64 {
    const NAME: &'static str = "c64";

    fn one() -> Self {
        c64::new(1.0, 0.0)
    }

    #[inline]
    fn add_elem(self, rhs: Self) -> Self {
        c64::new(self.re + rhs.re, self.im + rhs.im)
    }

    #[inline]
    fn mul_elem(self, rhs: Self) -> Self {
        c64::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }

    #[inline]
    fn conj(self) -> Self {
        c64::new(self.re, -self.im)
    }

    fn magnitude(self) -> f64 {
        self.re.hypot(self.im)
    }

    fn distance(self, other: Self) -> f64 {
        (self.re - other.re).hypot(self.im - other.im)
    }

    fn hash_elem<H: Hasher>(&self, state: &mut H) {
        self.re.hash_elem(state);
        self.im.hash_elem(state);
    }

    fn gemm(c: &mut [Self], a: &[Self], b: &[Self], m: usize, k: usize, n: usize) {
        faer_gemm_c64(c, a, b, m, k, n);
    }
}

impl SignedElement for c64 {
    #[inline]
    fn negate(self) -> Self {
        c64::new(-self.re, -self.im)
    }
}

/// Value cast between element types, in the spirit of `as`.
///
/// The cast may lose information (truncation, rounding, dropping an imaginary
/// part). Use [`convert_exact`] when the value must be preserved.
pub trait CastFrom<S>: Sized {
    /// Cast `value` into `Self`.
    fn cast_from(value: S) -> Self;

    /// Whether `value` lies inside the range of `Self`, so that the cast
    /// does not saturate.
    #[inline]
    fn in_range(_value: &S) -> bool {
        true
    }
}

macro_rules! impl_cast_primitive {
    (@plain $src:ident => $($dst:ident),*) => {$(
        impl CastFrom<$src> for $dst {
            #[inline]
            #[allow(clippy::unnecessary_cast)]
            fn cast_from(value: $src) -> Self {
                value as $dst
            }
        }
    )*};
    (@float_to_int $src:ident => $($dst:ident),*) => {$(
        impl CastFrom<$src> for $dst {
            #[inline]
            fn cast_from(value: $src) -> Self {
                value as $dst
            }

            // -MIN is a power of two, so both bounds are exact floats
            #[inline]
            fn in_range(value: &$src) -> bool {
                let v = f64::from(*value);
                v >= $dst::MIN as f64 && v < -($dst::MIN as f64)
            }
        }
    )*};
}

impl_cast_primitive!(@plain i8 => i8, i16, i32, i64, f32, f64);
impl_cast_primitive!(@plain i16 => i8, i16, i32, i64, f32, f64);
impl_cast_primitive!(@plain i32 => i8, i16, i32, i64, f32, f64);
impl_cast_primitive!(@plain i64 => i8, i16, i32, i64, f32, f64);
impl_cast_primitive!(@plain f32 => f32, f64);
impl_cast_primitive!(@plain f64 => f32, f64);
impl_cast_primitive!(@float_to_int f32 => i8, i16, i32, i64);
impl_cast_primitive!(@float_to_int f64 => i8, i16, i32, i64);

macro_rules! impl_cast_bool_complex {
    ($($t:ident),*) => {$(
        impl CastFrom<bool> for $t {
            #[inline]
            fn cast_from(value: bool) -> Self {
                u8::from(value) as $t
            }
        }

        impl CastFrom<$t> for bool {
            #[inline]
            fn cast_from(value: $t) -> Self {
                value != (0 as $t)
            }
        }

        impl CastFrom<c64> for $t {
            #[inline]
            fn cast_from(value: c64) -> Self {
                value.re as $t
            }

            #[inline]
            fn in_range(value: &c64) -> bool {
                <$t as CastFrom<f64>>::in_range(&value.re)
            }
        }

        impl CastFrom<$t> for c64 {
            #[inline]
            fn cast_from(value: $t) -> Self {
                c64::new(value as f64, 0.0)
            }
        }
    )*};
}

impl_cast_bool_complex!(i8, i16, i32, i64, f32, f64);

impl CastFrom<bool> for bool {
    #[inline]
    fn cast_from(value: bool) -> Self {
        value
    }
}

impl CastFrom<c64> for c64 {
    #[inline]
    fn cast_from(value: c64) -> Self {
        value
    }
}

impl CastFrom<bool> for c64 {
    #[inline]
    fn cast_from(value: bool) -> Self {
        c64::new(f64::from(u8::from(value)), 0.0)
    }
}

impl CastFrom<c64> for bool {
    #[inline]
    fn cast_from(value: c64) -> Self {
        value.re != 0.0
    }
}

#[allow(clippy::eq_op)]
fn is_unordered<T: PartialEq>(value: &T) -> bool {
    value != value
}

/// Convert `value` to `T`, failing if the result does not represent it exactly.
///
/// The conversion is exact when neither the cast nor the cast back saturates
/// and the cast back reproduces `value`. NaN is preserved between float types.
///
/// # Examples
///
/// ```
/// use tensorcore::element::convert_exact;
///
/// assert_eq!(convert_exact::<f64, i64>(3.0).unwrap(), 3);
/// assert!(convert_exact::<f64, i64>(3.5).is_err());
/// assert!(convert_exact::<i64, i8>(300).is_err());
/// ```
pub fn convert_exact<S, T>(value: S) -> Result<T, TensorError>
where
    S: Element + CastFrom<T>,
    T: Element + CastFrom<S>,
{
    let converted = T::cast_from(value);
    let back = S::cast_from(converted);
    let round_trips = back == value || (is_unordered(&value) && is_unordered(&back));
    let in_range =
        <T as CastFrom<S>>::in_range(&value) && <S as CastFrom<T>>::in_range(&converted);
    if in_range && round_trips {
        Ok(converted)
    } else {
        Err(TensorError::InexactConversion {
            value: format!("{value:?}"),
            target: T::NAME,
        })
    }
}

/// The common type two element types promote to when combined.
///
/// `bool` defers to the other operand, integers widen, integers combined with
/// a float become that float, `f32` with `f64` is `f64`, and anything combined
/// with `c64` is `c64`.
pub trait Promote<Rhs: Element>: Element {
    /// The promoted element type.
    type Output: Element + CastFrom<Self> + CastFrom<Rhs>;
}

macro_rules! promote {
    ($a:ident => $out:ident) => {
        impl Promote<$a> for $a {
            type Output = $out;
        }
    };
    ($a:ident, $b:ident => $out:ident) => {
        impl Promote<$b> for $a {
            type Output = $out;
        }

        impl Promote<$a> for $b {
            type Output = $out;
        }
    };
}

promote!(bool => bool);
promote!(i8 => i8);
promote!(i16 => i16);
promote!(i32 => i32);
promote!(i64 => i64);
promote!(f32 => f32);
promote!(f64 => f64);
promote!(c64 => c64);

promote!(bool, i8 => i8);
promote!(bool, i16 => i16);
promote!(bool, i32 => i32);
promote!(bool, i64 => i64);
promote!(bool, f32 => f32);
promote!(bool, f64 => f64);
promote!(bool, c64 => c64);

promote!(i8, i16 => i16);
promote!(i8, i32 => i32);
promote!(i8, i64 => i64);
promote!(i8, f32 => f32);
promote!(i8, f64 => f64);
promote!(i8, c64 => c64);

promote!(i16, i32 => i32);
promote!(i16, i64 => i64);
promote!(i16, f32 => f32);
promote!(i16, f64 => f64);
promote!(i16, c64 => c64);

promote!(i32, i64 => i64);
promote!(i32, f32 => f32);
promote!(i32, f64 => f64);
promote!(i32, c64 => c64);

promote!(i64, f32 => f32);
promote!(i64, f64 => f64);
promote!(i64, c64 => c64);

promote!(f32, f64 => f64);
promote!(f32, c64 => c64);

promote!(f64, c64 => c64);
