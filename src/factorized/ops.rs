use std::cmp::Ordering;
use std::ops::{Add, Mul, Neg, Sub};

use tracing::{event, instrument, Level};

use crate::algorithms::eea::poly_gcd;
use crate::coefficient::*;
use crate::factorized::{Factorization, FactorizedPolynomial};
use crate::variable::Variable;

fn assert_same_cache<C: RationalCoefficient>(lhs: &FactorizedPolynomial<C>, rhs: &FactorizedPolynomial<C>) {
    assert!(lhs.uses_same_cache(rhs), "factorized polynomials use different caches");
}

fn common_var<C: RationalCoefficient>(lhs: &FactorizedPolynomial<C>, rhs: &FactorizedPolynomial<C>) -> Variable {
    if lhs.is_constant() { rhs.main_var } else { lhs.main_var }
}

///
/// Walks through both factorizations in order, and returns every factor that occurs in
/// one of them, together with its multiplicity in `lhs` and in `rhs`.
///
fn merge_factorizations<C: RationalCoefficient>(lhs: Factorization<C>, rhs: Factorization<C>) -> Vec<(FactorizedPolynomial<C>, usize, usize)> {
    let mut lhs_iter = lhs.into_iter().peekable();
    let mut rhs_iter = rhs.into_iter().peekable();
    let mut result = Vec::new();
    loop {
        let order = match (lhs_iter.peek(), rhs_iter.peek()) {
            (Some((lhs_factor, _)), Some((rhs_factor, _))) => lhs_factor.cmp(rhs_factor),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => return result
        };
        match order {
            Ordering::Less => {
                let (factor, multiplicity) = lhs_iter.next().unwrap();
                result.push((factor, multiplicity, 0));
            },
            Ordering::Greater => {
                let (factor, multiplicity) = rhs_iter.next().unwrap();
                result.push((factor, 0, multiplicity));
            },
            Ordering::Equal => {
                let (factor, lhs_multiplicity) = lhs_iter.next().unwrap();
                let (_, rhs_multiplicity) = rhs_iter.next().unwrap();
                result.push((factor, lhs_multiplicity, rhs_multiplicity));
            }
        }
    }
}

///
/// Computes `lhs / rhs`, assuming that every factor of `rhs` occurs in the factorization
/// of `lhs` with at least the same multiplicity. No polynomial division is performed,
/// the result is obtained by subtracting multiplicities. Panics if `rhs` is zero, or if the
/// factorizations do not satisfy this condition.
///
pub fn lazy_div<C: RationalCoefficient>(lhs: &FactorizedPolynomial<C>, rhs: &FactorizedPolynomial<C>) -> FactorizedPolynomial<C> {
    assert_same_cache(lhs, rhs);
    assert!(!rhs.is_zero(), "division by zero");
    if lhs.is_zero() {
        return lhs.clone();
    }
    let coefficient = lhs.coefficient.div_exact(&rhs.coefficient);
    let mut result = Factorization::new();
    for (factor, lhs_multiplicity, rhs_multiplicity) in merge_factorizations(lhs.factorization(), rhs.factorization()) {
        assert!(lhs_multiplicity >= rhs_multiplicity, "the factor {} of the divisor does not occur in the factorization of the dividend", factor);
        if lhs_multiplicity > rhs_multiplicity {
            result.insert(factor, lhs_multiplicity - rhs_multiplicity);
        }
    }
    return FactorizedPolynomial::from_factorization(&lhs.cache(), common_var(lhs, rhs), result, coefficient);
}

///
/// Computes a common divisor `d` of `lhs` and `rhs` that is visible from the current
/// factorizations, i.e. the product of all common factors with their minimal multiplicity,
/// times the gcd of the coefficients. Returns `(d, lhs / d, rhs / d)`.
///
/// If one operand is zero, the other one is returned as common divisor. If both are zero,
/// the common divisor is zero, and both cofactors are one.
///
pub fn common_divisor<C: RationalCoefficient>(lhs: &FactorizedPolynomial<C>, rhs: &FactorizedPolynomial<C>) -> (FactorizedPolynomial<C>, FactorizedPolynomial<C>, FactorizedPolynomial<C>) {
    assert_same_cache(lhs, rhs);
    let cache = lhs.cache();
    let var = common_var(lhs, rhs);
    if lhs.is_zero() && rhs.is_zero() {
        return (FactorizedPolynomial::zero(&cache, var), FactorizedPolynomial::one(&cache, var), FactorizedPolynomial::one(&cache, var));
    } else if lhs.is_zero() {
        return (rhs.clone(), FactorizedPolynomial::zero(&cache, var), FactorizedPolynomial::one(&cache, var));
    } else if rhs.is_zero() {
        return (lhs.clone(), FactorizedPolynomial::one(&cache, var), FactorizedPolynomial::zero(&cache, var));
    }
    let mut divisor = Factorization::new();
    let mut lhs_rest = Factorization::new();
    let mut rhs_rest = Factorization::new();
    for (factor, lhs_multiplicity, rhs_multiplicity) in merge_factorizations(lhs.factorization(), rhs.factorization()) {
        let common = std::cmp::min(lhs_multiplicity, rhs_multiplicity);
        if lhs_multiplicity > common {
            lhs_rest.insert(factor.clone(), lhs_multiplicity - common);
        }
        if rhs_multiplicity > common {
            rhs_rest.insert(factor.clone(), rhs_multiplicity - common);
        }
        if common > 0 {
            divisor.insert(factor, common);
        }
    }
    let coefficient = RationalCoefficient::gcd(&lhs.coefficient, &rhs.coefficient);
    let lhs_coefficient = lhs.coefficient.div_exact(&coefficient);
    let rhs_coefficient = rhs.coefficient.div_exact(&coefficient);
    return (
        FactorizedPolynomial::from_factorization(&cache, var, divisor, coefficient),
        FactorizedPolynomial::from_factorization(&cache, var, lhs_rest, lhs_coefficient),
        FactorizedPolynomial::from_factorization(&cache, var, rhs_rest, rhs_coefficient)
    );
}

///
/// Computes a common multiple of `lhs` and `rhs` that is visible from the current
/// factorizations, i.e. the product of all factors with their maximal multiplicity, times
/// the lcm of the coefficients. If one operand is zero, the result is zero.
///
pub fn common_multiple<C: RationalCoefficient>(lhs: &FactorizedPolynomial<C>, rhs: &FactorizedPolynomial<C>) -> FactorizedPolynomial<C> {
    assert_same_cache(lhs, rhs);
    let var = common_var(lhs, rhs);
    if lhs.is_zero() || rhs.is_zero() {
        return FactorizedPolynomial::zero(&lhs.cache(), var);
    }
    let mut result = Factorization::new();
    for (factor, lhs_multiplicity, rhs_multiplicity) in merge_factorizations(lhs.factorization(), rhs.factorization()) {
        result.insert(factor, std::cmp::max(lhs_multiplicity, rhs_multiplicity));
    }
    let coefficient = RationalCoefficient::lcm(&lhs.coefficient, &rhs.coefficient);
    return FactorizedPolynomial::from_factorization(&lhs.cache(), var, result, coefficient);
}

///
/// Refines the cached factorization of `target` to `lhs * rhs`, if the current factorization
/// of `target` is trivial and the product of the primitive parts of `lhs` and `rhs` is the
/// primitive part of `target`.
///
fn refine_by_split<C: RationalCoefficient>(target: &FactorizedPolynomial<C>, lhs: &FactorizedPolynomial<C>, rhs: &FactorizedPolynomial<C>) {
    if target.is_constant() || lhs.is_constant() || rhs.is_constant() {
        return;
    }
    if &lhs.polynomial() * &rhs.polynomial() != target.polynomial() {
        return;
    }
    let mut factorization = lhs.factorization();
    for (factor, multiplicity) in rhs.factorization() {
        *factorization.entry(factor).or_insert(0) += multiplicity;
    }
    target.refine_factorization(factorization);
}

///
/// Computes the greatest common divisor `g` of `lhs` and `rhs`, and returns `(g, lhs / g, rhs / g)`.
///
/// First, the common factors visible from the factorizations are split off by [`common_divisor()`].
/// The gcd of the remaining parts is then computed by the euclidean algorithm. If this finds a
/// nontrivial common factor, the cached factorizations of the remaining parts are refined
/// accordingly (if they are not yet factorized), so that later operations on `lhs` and `rhs`
/// find the common factor without polynomial arithmetic.
///
/// The polynomial part of `g` is monic, up to the factor that is also visible from the
/// factorizations.
///
#[instrument(skip_all, level = "trace")]
pub fn gcd<C: RationalCoefficient>(lhs: &FactorizedPolynomial<C>, rhs: &FactorizedPolynomial<C>) -> (FactorizedPolynomial<C>, FactorizedPolynomial<C>, FactorizedPolynomial<C>) {
    let (divisor, lhs_rest, rhs_rest) = common_divisor(lhs, rhs);
    if lhs_rest.is_constant() || rhs_rest.is_constant() {
        return (divisor, lhs_rest, rhs_rest);
    }
    let lhs_content = lhs_rest.content();
    let rhs_content = rhs_rest.content();
    let common = poly_gcd(&lhs_content, &rhs_content);
    if common.is_constant() {
        return (divisor, lhs_rest, rhs_rest);
    }
    event!(Level::DEBUG, degree = common.degree(), "found_common_factor");
    let cache = lhs.cache();
    let common = FactorizedPolynomial::from_polynomial(&cache, &common);
    let lhs_cofactor = FactorizedPolynomial::from_polynomial(&cache, &lhs_content.quotient(&common.content()));
    let rhs_cofactor = FactorizedPolynomial::from_polynomial(&cache, &rhs_content.quotient(&common.content()));
    refine_by_split(&lhs_rest, &common, &lhs_cofactor);
    refine_by_split(&rhs_rest, &common, &rhs_cofactor);
    return (&divisor * &common, lhs_cofactor, rhs_cofactor);
}

impl<C: RationalCoefficient> FactorizedPolynomial<C> {

    pub fn pow(&self, exp: usize) -> Self {
        if exp == 0 {
            return Self::one(&self.cache(), self.main_var);
        } else if self.is_constant() {
            return Self::constant(&self.cache(), self.main_var, self.coefficient.pow(exp));
        }
        let factorization = self.factorization().into_iter().map(|(factor, multiplicity)| (factor, multiplicity * exp)).collect();
        return Self::from_factorization(&self.cache(), self.main_var, factorization, self.coefficient.pow(exp));
    }

    ///
    /// See [`lazy_div()`].
    ///
    pub fn lazy_div(&self, rhs: &Self) -> Self {
        lazy_div(self, rhs)
    }

    ///
    /// See [`common_divisor()`].
    ///
    pub fn common_divisor(lhs: &Self, rhs: &Self) -> (Self, Self, Self) {
        common_divisor(lhs, rhs)
    }

    ///
    /// See [`common_multiple()`].
    ///
    pub fn common_multiple(lhs: &Self, rhs: &Self) -> Self {
        common_multiple(lhs, rhs)
    }

    ///
    /// See [`gcd()`].
    ///
    pub fn gcd(lhs: &Self, rhs: &Self) -> (Self, Self, Self) {
        gcd(lhs, rhs)
    }
}

impl<'a, 'b, C: RationalCoefficient> Mul<&'b FactorizedPolynomial<C>> for &'a FactorizedPolynomial<C> {

    type Output = FactorizedPolynomial<C>;

    fn mul(self, rhs: &'b FactorizedPolynomial<C>) -> FactorizedPolynomial<C> {
        assert_same_cache(self, rhs);
        let var = common_var(self, rhs);
        if self.is_zero() || rhs.is_zero() {
            return FactorizedPolynomial::zero(&self.cache(), var);
        }
        let mut factorization = self.factorization();
        for (factor, multiplicity) in rhs.factorization() {
            *factorization.entry(factor).or_insert(0) += multiplicity;
        }
        return FactorizedPolynomial::from_factorization(&self.cache(), var, factorization, self.coefficient.clone() * rhs.coefficient.clone());
    }
}

impl<'a, 'b, C: RationalCoefficient> Add<&'b FactorizedPolynomial<C>> for &'a FactorizedPolynomial<C> {

    type Output = FactorizedPolynomial<C>;

    fn add(self, rhs: &'b FactorizedPolynomial<C>) -> FactorizedPolynomial<C> {
        let (divisor, lhs_rest, rhs_rest) = common_divisor(self, rhs);
        let sum = &lhs_rest.content() + &rhs_rest.content();
        return &divisor * &FactorizedPolynomial::from_polynomial(&self.cache(), &sum);
    }
}

impl<'a, 'b, C: RationalCoefficient> Sub<&'b FactorizedPolynomial<C>> for &'a FactorizedPolynomial<C> {

    type Output = FactorizedPolynomial<C>;

    fn sub(self, rhs: &'b FactorizedPolynomial<C>) -> FactorizedPolynomial<C> {
        let (divisor, lhs_rest, rhs_rest) = common_divisor(self, rhs);
        let difference = &lhs_rest.content() - &rhs_rest.content();
        return &divisor * &FactorizedPolynomial::from_polynomial(&self.cache(), &difference);
    }
}

impl<'a, C: RationalCoefficient> Neg for &'a FactorizedPolynomial<C> {

    type Output = FactorizedPolynomial<C>;

    fn neg(self) -> FactorizedPolynomial<C> {
        let coefficient = -self.coefficient.clone();
        return self.clone().with_coefficient(coefficient);
    }
}

impl<C: RationalCoefficient> Mul for FactorizedPolynomial<C> {

    type Output = FactorizedPolynomial<C>;

    fn mul(self, rhs: FactorizedPolynomial<C>) -> FactorizedPolynomial<C> {
        &self * &rhs
    }
}

impl<C: RationalCoefficient> Add for FactorizedPolynomial<C> {

    type Output = FactorizedPolynomial<C>;

    fn add(self, rhs: FactorizedPolynomial<C>) -> FactorizedPolynomial<C> {
        &self + &rhs
    }
}

impl<C: RationalCoefficient> Sub for FactorizedPolynomial<C> {

    type Output = FactorizedPolynomial<C>;

    fn sub(self, rhs: FactorizedPolynomial<C>) -> FactorizedPolynomial<C> {
        &self - &rhs
    }
}

impl<C: RationalCoefficient> Neg for FactorizedPolynomial<C> {

    type Output = FactorizedPolynomial<C>;

    fn neg(self) -> FactorizedPolynomial<C> {
        -&self
    }
}

#[cfg(test)]
use std::sync::Arc;
#[cfg(test)]
use num_rational::BigRational;
#[cfg(test)]
use crate::factorized::FactorizationCache;
#[cfg(test)]
use crate::rings::poly::UnivariatePolynomial;
#[cfg(test)]
use crate::rings::rational::rational;
#[cfg(test)]
use crate::tracing::LogAlgorithmSubscriber;

#[cfg(test)]
const X: Variable = Variable::new(0, "x");

#[cfg(test)]
fn poly(coefficients: &[i64]) -> UnivariatePolynomial<BigRational> {
    UnivariatePolynomial::from_coefficients(X, coefficients.iter().map(|c| rational(*c, 1)).collect())
}

#[cfg(test)]
fn product(cache: &Arc<FactorizationCache<BigRational>>, coefficient: i64, factors: &[(&[i64], usize)]) -> FactorizedPolynomial<BigRational> {
    let mut factorization = Factorization::new();
    for (factor, multiplicity) in factors {
        *factorization.entry(FactorizedPolynomial::from_polynomial(&cache, &poly(factor))).or_insert(0) += *multiplicity;
    }
    return FactorizedPolynomial::from_factorization(cache, X, factorization, rational(coefficient, 1));
}

#[cfg(test)]
fn random_poly(rng: &mut oorandom::Rand64, degree: usize) -> UnivariatePolynomial<BigRational> {
    let mut coefficients = (0..degree).map(|_| rational(rng.rand_range(0..21) as i64 - 10, rng.rand_range(1..4) as i64)).collect::<Vec<_>>();
    coefficients.push(rational(rng.rand_range(1..6) as i64, 1));
    return UnivariatePolynomial::from_coefficients(X, coefficients);
}

#[test]
fn test_mul() {
    LogAlgorithmSubscriber::init_test();
    let cache = Arc::new(FactorizationCache::new());
    let f = FactorizedPolynomial::from_polynomial(&cache, &poly(&[-2, 2]));
    let g = FactorizedPolynomial::from_polynomial(&cache, &poly(&[1, 1]));
    let fg = &f * &g;
    assert_eq!(&poly(&[-2, 2]) * &poly(&[1, 1]), fg.content());
    assert_eq!(2, fg.factorization().len());
    let ffg = &fg * &f;
    assert_eq!(Some(&2), ffg.factorization().get(&f.primitive()));
    assert_eq!(&rational(4, 1), ffg.coefficient());
    assert!((&f * &FactorizedPolynomial::zero(&cache, X)).is_zero());
    assert_eq!(f.cache_ref(), (&f * &FactorizedPolynomial::constant(&cache, X, rational(3, 1))).cache_ref());
}

#[test]
fn test_add_sub() {
    LogAlgorithmSubscriber::init_test();
    let cache = Arc::new(FactorizationCache::new());
    // (x + 1)^2 (x - 1) and (x + 1) x
    let f = product(&cache, 1, &[(&[1, 1], 2), (&[-1, 1], 1)]);
    let g = product(&cache, 2, &[(&[1, 1], 1), (&[0, 1], 1)]);
    let sum = &f + &g;
    assert_eq!(&f.content() + &g.content(), sum.content());
    // the common factor x + 1 is kept
    assert_eq!(Some(&1), sum.factorization().get(&FactorizedPolynomial::from_polynomial(&cache, &poly(&[1, 1]))));
    let difference = &f - &g;
    assert_eq!(&f.content() - &g.content(), difference.content());
    assert!((&f - &f).is_zero());

    let zero = FactorizedPolynomial::zero(&cache, X);
    assert!(&f + &zero == f);
    assert!(&zero - &f == -&f);
    assert_eq!(&rational(-1, 1), (-f.clone()).coefficient());
}

#[test]
fn test_pow() {
    LogAlgorithmSubscriber::init_test();
    let cache = Arc::new(FactorizationCache::new());
    let f = product(&cache, 3, &[(&[1, 1], 1), (&[-1, 1], 2)]);
    let cube = f.pow(3);
    assert_eq!(f.content().pow(3), cube.content());
    assert_eq!(Some(&6), cube.factorization().get(&FactorizedPolynomial::from_polynomial(&cache, &poly(&[-1, 1]))));
    assert!(f.pow(0).is_one());
    assert_eq!(poly(&[8]), FactorizedPolynomial::constant(&cache, X, rational(2, 1)).pow(3).content());
}

#[test]
fn test_lazy_div() {
    LogAlgorithmSubscriber::init_test();
    let cache = Arc::new(FactorizationCache::new());
    let f = product(&cache, 6, &[(&[1, 1], 2), (&[-1, 1], 1), (&[0, 1], 1)]);
    let g = product(&cache, 2, &[(&[1, 1], 1), (&[0, 1], 1)]);
    let quotient = f.lazy_div(&g);
    assert_eq!(&rational(3, 1), quotient.coefficient());
    assert_eq!(&poly(&[1, 1]) * &poly(&[-1, 1]).mul_scalar(&rational(3, 1)), quotient.content());
    assert_eq!(f.content(), (&quotient * &g).content());
    assert!(f.lazy_div(&f).is_one());
}

#[test]
#[should_panic]
fn test_lazy_div_not_a_factor() {
    LogAlgorithmSubscriber::init_test();
    let cache = Arc::new(FactorizationCache::new());
    let f = product(&cache, 1, &[(&[1, 1], 1)]);
    let g = product(&cache, 1, &[(&[-1, 1], 1)]);
    let _ = f.lazy_div(&g);
}

#[test]
fn test_common_divisor() {
    LogAlgorithmSubscriber::init_test();
    let cache = Arc::new(FactorizationCache::new());
    let a = product(&cache, 4, &[(&[1, 1], 2), (&[-1, 1], 1)]);
    let b = product(&cache, 6, &[(&[1, 1], 1), (&[0, 1], 3)]);
    let (d, a_rest, b_rest) = FactorizedPolynomial::common_divisor(&a, &b);
    assert_eq!(poly(&[2, 2]), d.content());
    assert!(&d * &a_rest == a);
    assert!(&d * &b_rest == b);
    assert_eq!(&poly(&[1, 1]) * &poly(&[-1, 1]).mul_scalar(&rational(2, 1)), a_rest.content());
}

#[test]
fn test_common_divisor_zero() {
    LogAlgorithmSubscriber::init_test();
    let cache = Arc::new(FactorizationCache::new());
    let a = product(&cache, 4, &[(&[1, 1], 2)]);
    let zero = FactorizedPolynomial::zero(&cache, X);
    let (d, a_rest, zero_rest) = common_divisor(&a, &zero);
    assert!(d == a);
    assert!(a_rest.is_one());
    assert!(zero_rest.is_zero());
    let (d, zero_rest, a_rest) = common_divisor(&zero, &a);
    assert!(d == a);
    assert!(a_rest.is_one());
    assert!(zero_rest.is_zero());
    let (d, lhs_rest, rhs_rest) = common_divisor(&zero, &zero);
    assert!(d.is_zero());
    assert!(lhs_rest.is_one() && rhs_rest.is_one());
}

#[test]
fn test_common_multiple() {
    LogAlgorithmSubscriber::init_test();
    let cache = Arc::new(FactorizationCache::new());
    let a = product(&cache, 4, &[(&[1, 1], 2), (&[-1, 1], 1)]);
    let b = product(&cache, 6, &[(&[1, 1], 1), (&[0, 1], 3)]);
    let multiple = FactorizedPolynomial::common_multiple(&a, &b);
    let expected = &(&poly(&[1, 1]).pow(2) * &poly(&[-1, 1])) * &poly(&[0, 1]).pow(3);
    assert_eq!(expected.mul_scalar(&rational(12, 1)), multiple.content());
    let _ = lazy_div(&multiple, &a);
    let _ = lazy_div(&multiple, &b);
    assert!(common_multiple(&a, &FactorizedPolynomial::zero(&cache, X)).is_zero());
}

#[test]
fn test_gcd() {
    LogAlgorithmSubscriber::init_test();
    let cache = Arc::new(FactorizationCache::new());
    let a = FactorizedPolynomial::from_polynomial(&cache, &poly(&[-1, 0, 1]));
    let b = FactorizedPolynomial::from_polynomial(&cache, &poly(&[1, 2, 1]));
    let (g, a_rest, b_rest) = gcd(&a, &b);
    assert_eq!(poly(&[1, 1]), g.content());
    assert_eq!(poly(&[-1, 1]), a_rest.content());
    assert_eq!(poly(&[1, 1]), b_rest.content());

    // the cached factorizations have been refined
    let factor = FactorizedPolynomial::from_polynomial(&cache, &poly(&[1, 1]));
    assert_eq!(2, a.factorization().len());
    assert_eq!(Some(&1), a.factorization().get(&factor));
    assert_eq!(Some(&2), b.factorization().get(&factor));
    assert_eq!(poly(&[-1, 0, 1]), a.content());
    assert_eq!(poly(&[1, 2, 1]), b.content());

    // now the common factor is visible without polynomial arithmetic
    let (d, _, _) = common_divisor(&a, &b);
    assert_eq!(poly(&[1, 1]), d.content());
}

#[test]
fn test_gcd_coprime_and_zero() {
    LogAlgorithmSubscriber::init_test();
    let cache = Arc::new(FactorizationCache::new());
    let a = FactorizedPolynomial::from_polynomial(&cache, &poly(&[1, 0, 1]));
    let b = FactorizedPolynomial::from_polynomial(&cache, &poly(&[-2, 2]));
    let (g, a_rest, b_rest) = gcd(&a, &b);
    assert!(g.is_one());
    assert!(a_rest == a);
    assert!(b_rest == b);
    assert_eq!(1, a.factorization().len());

    let zero = FactorizedPolynomial::zero(&cache, X);
    let (g, zero_rest, b_rest) = gcd(&zero, &b);
    assert!(g == b);
    assert!(zero_rest.is_zero());
    assert!(b_rest.is_one());
}

#[test]
fn test_gcd_random() {
    LogAlgorithmSubscriber::init_test();
    let mut rng = oorandom::Rand64::new(1);
    let cache = Arc::new(FactorizationCache::new());
    for _ in 0..crate::RANDOM_TEST_INSTANCE_COUNT {
        let common_deg = rng.rand_range(1..3) as usize;
        let lhs_deg = rng.rand_range(0..3) as usize;
        let rhs_deg = rng.rand_range(0..3) as usize;
        let common = random_poly(&mut rng, common_deg);
        let lhs = &common * &random_poly(&mut rng, lhs_deg);
        let rhs = &common * &random_poly(&mut rng, rhs_deg);
        let a = FactorizedPolynomial::from_polynomial(&cache, &lhs);
        let b = FactorizedPolynomial::from_polynomial(&cache, &rhs);
        let (g, a_rest, b_rest) = gcd(&a, &b);
        assert!(common.divides(&g.content()));
        assert_eq!(lhs, (&g * &a_rest).content());
        assert_eq!(rhs, (&g * &b_rest).content());
        assert_eq!(poly_gcd(&lhs, &rhs), g.content().normalized());
    }
}
