//! Random tensors.
//!
//! Every entry is an independent draw from a `rand` distribution, filled in
//! column-major order, so a seeded RNG always gives the same tensor.
//!
//! | constructor              | entries                                  |
//! |--------------------------|------------------------------------------|
//! | [`Tensor::random`]       | [`UnitUniform`]: `[0, 1)`, per part for `c64` |
//! | [`Tensor::randn`]        | [`Gaussian`]: mean 0, `E|x|^2 = 1`       |
//! | [`Tensor::random_range`] | uniform over `start..end`, any numeric type |
//! | [`Tensor::sample_with_rng`] | any `Distribution<T>`                 |
//!
//! Integer tensors from [`Tensor::random_range`] keep contraction results
//! exact, which is what the algebra tests rely on.

use std::ops::Range;

use rand::Rng;
use rand::distr::uniform::SampleUniform;
use rand::distr::{Distribution, StandardUniform, Uniform};
use rand_distr::StandardNormal;

use crate::element::{Element, c64};
use crate::error::TensorError;
use crate::strides::shape_len;
use crate::tensor::Tensor;

/// Uniform on `[0, 1)`. Real and imaginary parts of a `c64` are drawn
/// independently.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitUniform;

impl Distribution<f32> for UnitUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        StandardUniform.sample(rng)
    }
}

impl Distribution<f64> for UnitUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        StandardUniform.sample(rng)
    }
}

impl Distribution<c64> for UnitUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> c64 {
        c64::new(StandardUniform.sample(rng), StandardUniform.sample(rng))
    }
}

/// Standard normal with unit second moment.
///
/// For `c64` the two parts are independent `N(0, 1/2)`, so `E|z|^2 = 1`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gaussian;

impl Distribution<f32> for Gaussian {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        StandardNormal.sample(rng)
    }
}

impl Distribution<f64> for Gaussian {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        StandardNormal.sample(rng)
    }
}

impl Distribution<c64> for Gaussian {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> c64 {
        let part = |rng: &mut R| -> f64 {
            let x: f64 = StandardNormal.sample(rng);
            x * std::f64::consts::FRAC_1_SQRT_2
        };
        let re = part(rng);
        c64::new(re, part(rng))
    }
}

impl<T: Element> Tensor<T> {
    /// Tensor of the given shape with entries drawn from `dist`.
    ///
    /// ```
    /// use rand::SeedableRng;
    /// use rand::distr::Bernoulli;
    /// use rand::rngs::StdRng;
    /// use tensorcore::Tensor;
    ///
    /// let mut rng = StdRng::seed_from_u64(1);
    /// let mask: Tensor<bool> =
    ///     Tensor::sample_with_rng(&[4, 4], &Bernoulli::new(0.5).unwrap(), &mut rng);
    /// assert_eq!(mask.len(), 16);
    /// ```
    pub fn sample_with_rng<D, R>(shape: &[usize], dist: &D, rng: &mut R) -> Self
    where
        D: Distribution<T>,
        R: Rng + ?Sized,
    {
        let data: Vec<T> = (0..shape_len(shape)).map(|_| dist.sample(rng)).collect();
        Self::from_vec_trusted(data, shape)
    }

    /// Tensor with entries uniform over `range`, using the thread RNG.
    pub fn random_range(shape: &[usize], range: Range<T>) -> Result<Self, TensorError>
    where
        T: SampleUniform,
    {
        Self::random_range_with_rng(shape, range, &mut rand::rng())
    }

    /// Tensor with entries uniform over `range`.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::EmptySampleRange` when `range` holds no values.
    ///
    /// ```
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    /// use tensorcore::Tensor;
    ///
    /// let mut rng = StdRng::seed_from_u64(5);
    /// let t = Tensor::<i64>::random_range_with_rng(&[3, 3], -4..5, &mut rng).unwrap();
    /// assert!(t.to_vec().iter().all(|v| (-4..5).contains(v)));
    /// ```
    pub fn random_range_with_rng<R>(
        shape: &[usize],
        range: Range<T>,
        rng: &mut R,
    ) -> Result<Self, TensorError>
    where
        T: SampleUniform,
        R: Rng + ?Sized,
    {
        let dist = Uniform::new(range.start, range.end).map_err(|_| {
            TensorError::EmptySampleRange {
                range: format!("{:?}..{:?}", range.start, range.end),
            }
        })?;
        Ok(Self::sample_with_rng(shape, &dist, rng))
    }
}

impl<T: Element> Tensor<T>
where
    UnitUniform: Distribution<T>,
{
    /// Tensor with entries uniform on `[0, 1)`, using the thread RNG.
    ///
    /// ```
    /// use tensorcore::Tensor;
    ///
    /// let t: Tensor<f64> = Tensor::random(&[2, 3]);
    /// assert!(t.to_vec().iter().all(|v| (0.0..1.0).contains(v)));
    /// ```
    pub fn random(shape: &[usize]) -> Self {
        Self::random_with_rng(shape, &mut rand::rng())
    }

    pub fn random_with_rng<R: Rng + ?Sized>(shape: &[usize], rng: &mut R) -> Self {
        Self::sample_with_rng(shape, &UnitUniform, rng)
    }
}

impl<T: Element> Tensor<T>
where
    Gaussian: Distribution<T>,
{
    /// Tensor with [`Gaussian`] entries, using the thread RNG.
    pub fn randn(shape: &[usize]) -> Self {
        Self::randn_with_rng(shape, &mut rand::rng())
    }

    pub fn randn_with_rng<R: Rng + ?Sized>(shape: &[usize], rng: &mut R) -> Self {
        Self::sample_with_rng(shape, &Gaussian, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use rand::SeedableRng;
    use rand::distr::Bernoulli;
    use rand::rngs::StdRng;

    #[test]
    fn test_unit_uniform_c64_parts() {
        let mut rng = StdRng::seed_from_u64(9);
        let t: Tensor<c64> = Tensor::random_with_rng(&[5, 4], &mut rng);
        for z in t.to_vec() {
            assert!((0.0..1.0).contains(&z.re) && (0.0..1.0).contains(&z.im), "{z:?}");
        }
    }

    #[test]
    fn test_seed_fixes_tensor() {
        let a: Tensor<f32> = Tensor::randn_with_rng(&[2, 5], &mut StdRng::seed_from_u64(3));
        let b: Tensor<f32> = Tensor::randn_with_rng(&[2, 5], &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
        assert!(!a.same_storage(&b));
    }

    #[test]
    fn test_gaussian_second_moment() {
        let mut rng = StdRng::seed_from_u64(21);
        let x: Tensor<f64> = Tensor::randn_with_rng(&[400], &mut rng);
        let z: Tensor<c64> = Tensor::randn_with_rng(&[400], &mut rng);

        let m_x = x.to_vec().iter().map(|v| v * v).sum::<f64>() / 400.0;
        let m_z = z.to_vec().iter().map(|v| v.re * v.re + v.im * v.im).sum::<f64>() / 400.0;
        for m in [m_x, m_z] {
            assert!((0.7..1.3).contains(&m), "second moment {m}");
        }
    }

    #[test]
    fn test_random_range_integers() {
        let mut rng = StdRng::seed_from_u64(17);
        let t = Tensor::<i8>::random_range_with_rng(&[6, 6], -2..3, &mut rng).unwrap();
        assert_eq!(t.shape(), &[6, 6]);
        let values = t.to_vec();
        assert!(values.iter().all(|v| (-2..3).contains(v)));
        assert!(values.iter().any(|&v| v != values[0]));
    }

    #[test]
    fn test_random_range_empty() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = Tensor::<i32>::random_range_with_rng(&[2], 3..3, &mut rng).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentError);
        assert_eq!(
            err,
            TensorError::EmptySampleRange {
                range: "3..3".to_string()
            }
        );
        assert!(Tensor::<f64>::random_range(&[2], 1.0..0.0).is_err());
    }

    #[test]
    fn test_sample_bool_and_degenerate_shapes() {
        let mut rng = StdRng::seed_from_u64(4);
        let always = Bernoulli::new(1.0).unwrap();
        let t: Tensor<bool> = Tensor::sample_with_rng(&[3, 2], &always, &mut rng);
        assert_eq!(t, Tensor::ones(&[3, 2]));

        let s: Tensor<f64> = Tensor::random(&[]);
        assert_eq!(s.ndim(), 0);
        assert_eq!(s.len(), 1);
        let e: Tensor<c64> = Tensor::randn(&[3, 0]);
        assert!(e.is_empty());
    }
}
