use std::collections::BTreeMap;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use tracing::{event, instrument, Level};

use crate::algorithms::poly_squarefree::poly_square_free_factorization;
use crate::coefficient::*;
use crate::computation::*;
use crate::rings::poly::UnivariatePolynomial;
use crate::DEFAULT_LINEAR_FACTOR_BOUND;

fn add_factor<C: Coefficient>(factors: &mut BTreeMap<UnivariatePolynomial<C>, usize>, factor: UnivariatePolynomial<C>, multiplicity: usize) {
    *factors.entry(factor).or_insert(0) += multiplicity;
}

///
/// Returns all candidates `p/q` for rational roots of `poly` according to the rational root
/// theorem, where `p | tc` and `q | lc`.
///
/// Candidates are filtered using the values of `poly` at some small integers `k`: if `p/q`
/// is a root, then `qX - p` divides `poly` over the integers, and thus `qk - p` divides
/// `poly(k)`.
///
fn rational_root_candidates<C: RationalCoefficient>(poly: &UnivariatePolynomial<C>, lc: &BigInt, tc: &BigInt) -> Vec<C> {
    let shifts = [1, -1, 2, -2].into_iter()
        .map(|k| (BigInt::from(k), poly.evaluate(&C::from_int(k)).numerator()))
        .filter(|(_, value)| !value.is_zero())
        .collect::<Vec<_>>();
    let lc_divisors = positive_divisors(lc);
    let mut result = Vec::new();
    for p in positive_divisors(tc) {
        for q in &lc_divisors {
            if !Integer::gcd(&p, q).is_one() {
                continue;
            }
            for numerator in [p.clone(), -p.clone()] {
                let passes_shifts = shifts.iter().all(|(k, value)| {
                    let shifted = q * k - &numerator;
                    !shifted.is_zero() && value.is_multiple_of(&shifted)
                });
                if passes_shifts {
                    result.push(C::from_fraction(numerator, q.clone()));
                }
            }
        }
    }
    return result;
}

///
/// Removes all linear factors from `poly`, which must have integral coefficients, and adds
/// them to `linear_factors`. Returns the remaining polynomial, such that `poly` is the product
/// of the returned polynomial and all factors `f^k` that were added to `linear_factors`.
///
/// Factors `x^k` are removed directly. The remaining linear factors `x - r` are found by a
/// search for rational roots `r`, which are confirmed and removed using
/// [`UnivariatePolynomial::synthetic_division()`]. All added factors are monic.
///
/// The rational root search has to enumerate the divisors of the leading and the trailing
/// coefficient. If one of them exceeds `max_int` in absolute value, the search is aborted
/// and the partially reduced polynomial is returned. A remaining polynomial of degree one
/// is not searched for a root, but returned as it is.
///
#[instrument(skip_all, level = "trace")]
pub fn exclude_linear_factors<C, Controller>(poly: &UnivariatePolynomial<C>, linear_factors: &mut BTreeMap<UnivariatePolynomial<C>, usize>, max_int: u64, controller: Controller) -> UnivariatePolynomial<C>
    where C: RationalCoefficient,
        Controller: ComputationController
{
    assert!(!poly.is_zero(), "cannot exclude linear factors from the zero polynomial");
    assert!(poly.coefficients().iter().all(|c| c.is_integral()), "exclude_linear_factors() requires integral coefficients");
    let var = poly.main_var();
    let zero_roots = poly.coefficients().iter().take_while(|c| c.is_zero()).count();
    let mut result = if zero_roots > 0 {
        add_factor(linear_factors, UnivariatePolynomial::variable(var), zero_roots);
        UnivariatePolynomial::from_coefficients(var, poly.coefficients()[zero_roots..].to_vec())
    } else {
        poly.clone()
    };
    let bound = BigInt::from(max_int);
    while !result.is_linear() {
        let lc = result.lcoeff().numerator();
        let tc = result.tcoeff().numerator();
        if Signed::abs(&lc) > bound || Signed::abs(&tc) > bound {
            event!(Level::INFO, degree = result.degree(), bound = max_int, "root_search_aborted");
            return result;
        }
        let mut root = None;
        for candidate in rational_root_candidates(&result, &lc, &tc) {
            if result.synthetic_division(&candidate).is_zero() {
                root = Some(candidate);
                break;
            }
        }
        let Some(root) = root else {
            break;
        };
        let mut multiplicity = 1;
        while result.synthetic_division(&root).is_zero() {
            multiplicity += 1;
        }
        log_progress!(controller, "(root={})", root);
        event!(Level::DEBUG, root = %root, multiplicity = multiplicity, "found_root");
        add_factor(linear_factors, UnivariatePolynomial::from_coefficients(var, vec![-root, C::one()]), multiplicity);
    }
    return result;
}

///
/// Factors the given polynomial into linear factors, a constant factor, and the square-free
/// factorization of the remaining part. Returns a map from factor to multiplicity, such that
/// `poly` is exactly the product of all `f^k`. The nonconstant factors are monic, and
/// the constant factor is present only if it is not `1`.
///
/// A constant polynomial is returned as its own only factor.
///
/// The factors are pairwise coprime and square-free, but not necessarily irreducible, as only
/// the linear factors are split off completely. See [`exclude_linear_factors()`] for the meaning
/// of `max_int`.
///
/// # Example
/// ```
/// # use factorized_poly::variable::*;
/// # use factorized_poly::rings::poly::*;
/// # use factorized_poly::rings::rational::*;
/// let x = Variable::new(0, "x");
/// let poly = |coefficients: [i64; 3]| UnivariatePolynomial::from_coefficients(x, coefficients.iter().map(|c| rational(*c, 1)).collect());
/// let factorization = poly([-1, 0, 1]).factorization();
/// assert_eq!(2, factorization.len());
/// assert_eq!(Some(&1), factorization.get(&poly([-1, 1, 0])));
/// assert_eq!(Some(&1), factorization.get(&poly([1, 1, 0])));
/// ```
///
#[instrument(skip_all, level = "trace")]
pub fn poly_factor<C, Controller>(poly: &UnivariatePolynomial<C>, max_int: u64, controller: Controller) -> BTreeMap<UnivariatePolynomial<C>, usize>
    where C: RationalCoefficient,
        Controller: ComputationController
{
    let mut result = BTreeMap::new();
    if poly.is_constant() {
        result.insert(poly.clone(), 1);
        return result;
    }
    let var = poly.main_var();
    log_progress!(controller, "(deg={})", poly.degree());
    let coprime_factor = poly.coprime_factor();
    let primitive = poly.mul_scalar(&coprime_factor);
    let remaining = exclude_linear_factors(&primitive, &mut result, max_int, controller.clone());
    let unit = C::one().div_exact(&coprime_factor) * remaining.lcoeff();
    if !remaining.is_constant() {
        for (multiplicity, factor) in poly_square_free_factorization(&remaining, controller.clone()) {
            if !factor.is_constant() {
                add_factor(&mut result, factor.normalized(), multiplicity);
            }
        }
    }
    if !unit.is_one() {
        add_factor(&mut result, UnivariatePolynomial::constant(var, unit), 1);
    }
    debug_assert!(*poly == result.iter().fold(UnivariatePolynomial::one(var), |current, (f, k)| &current * &f.pow(*k)));
    return result;
}

impl<C: RationalCoefficient> UnivariatePolynomial<C> {

    ///
    /// Factors the polynomial as described in [`poly_factor()`], searching for rational roots
    /// as long as the leading and trailing coefficients are bounded by [`DEFAULT_LINEAR_FACTOR_BOUND`].
    ///
    pub fn factorization(&self) -> BTreeMap<Self, usize> {
        poly_factor(self, DEFAULT_LINEAR_FACTOR_BOUND, DontObserve)
    }

    pub fn factorization_with_bound(&self, max_int: u64) -> BTreeMap<Self, usize> {
        poly_factor(self, max_int, DontObserve)
    }

    pub fn factorization_with_controller<Controller: ComputationController>(&self, max_int: u64, controller: Controller) -> BTreeMap<Self, usize> {
        poly_factor(self, max_int, controller)
    }

    ///
    /// See [`exclude_linear_factors()`].
    ///
    pub fn exclude_linear_factors(poly: &Self, linear_factors: &mut BTreeMap<Self, usize>, max_int: u64) -> Self {
        exclude_linear_factors(poly, linear_factors, max_int, DontObserve)
    }
}

#[cfg(test)]
use num_rational::BigRational;
#[cfg(test)]
use crate::rings::rational::rational;
#[cfg(test)]
use crate::variable::Variable;
#[cfg(test)]
use crate::tracing::LogAlgorithmSubscriber;

#[cfg(test)]
const X: Variable = Variable::new(0, "x");

#[cfg(test)]
fn poly(coefficients: &[i64]) -> UnivariatePolynomial<BigRational> {
    UnivariatePolynomial::from_coefficients(X, coefficients.iter().map(|c| rational(*c, 1)).collect())
}

#[cfg(test)]
fn product(factors: &BTreeMap<UnivariatePolynomial<BigRational>, usize>) -> UnivariatePolynomial<BigRational> {
    factors.iter().fold(poly(&[1]), |current, (f, k)| &current * &f.pow(*k))
}

#[test]
fn test_factorization_difference_of_squares() {
    LogAlgorithmSubscriber::init_test();
    let factorization = poly(&[-1, 0, 1]).factorization();
    let expected = [(poly(&[-1, 1]), 1), (poly(&[1, 1]), 1)].into_iter().collect::<BTreeMap<_, _>>();
    assert_eq!(expected, factorization);
}

#[test]
fn test_factorization_with_content() {
    LogAlgorithmSubscriber::init_test();
    // 6x^3 - 6x
    let f = poly(&[0, -6, 0, 6]);
    let factorization = f.factorization();
    let expected = [(poly(&[0, 1]), 1), (poly(&[-1, 1]), 1), (poly(&[1, 1]), 1), (poly(&[6]), 1)].into_iter().collect::<BTreeMap<_, _>>();
    assert_eq!(expected, factorization);

    // 1/2 (x - 1)^2 (x^2 + 1)
    let f = (&poly(&[-1, 1]).pow(2) * &poly(&[1, 0, 1])).mul_scalar(&rational(1, 2));
    let factorization = f.factorization();
    let expected = [(poly(&[-1, 1]), 2), (poly(&[1, 0, 1]), 1), (UnivariatePolynomial::constant(X, rational(1, 2)), 1)].into_iter().collect::<BTreeMap<_, _>>();
    assert_eq!(expected, factorization);
    assert_eq!(f, product(&factorization));
}

#[test]
fn test_factorization_rational_roots() {
    LogAlgorithmSubscriber::init_test();
    // (2x - 1)(3x + 2)(x^2 + x + 1)^2
    let f = &(&poly(&[-1, 2]) * &poly(&[2, 3])) * &poly(&[1, 1, 1]).pow(2);
    let factorization = f.factorization();
    assert_eq!(Some(&1), factorization.get(&UnivariatePolynomial::from_coefficients(X, vec![rational(-1, 2), rational(1, 1)])));
    assert_eq!(Some(&1), factorization.get(&UnivariatePolynomial::from_coefficients(X, vec![rational(2, 3), rational(1, 1)])));
    assert_eq!(Some(&2), factorization.get(&poly(&[1, 1, 1])));
    assert_eq!(Some(&1), factorization.get(&poly(&[6])));
    assert_eq!(4, factorization.len());
    assert_eq!(f, product(&factorization));
}

#[test]
fn test_factorization_constant_and_linear() {
    LogAlgorithmSubscriber::init_test();
    let factorization = poly(&[-4]).factorization();
    assert_eq!(Some(&1), factorization.get(&poly(&[-4])));
    assert_eq!(1, factorization.len());

    let f = poly(&[1, 2]);
    let factorization = f.factorization();
    assert_eq!(Some(&1), factorization.get(&UnivariatePolynomial::from_coefficients(X, vec![rational(1, 2), rational(1, 1)])));
    assert_eq!(Some(&1), factorization.get(&poly(&[2])));
    assert_eq!(f, product(&factorization));
}

#[test]
fn test_factorization_random() {
    LogAlgorithmSubscriber::init_test();
    let mut rng = oorandom::Rand64::new(1);
    for _ in 0..crate::RANDOM_TEST_INSTANCE_COUNT {
        let mut f = UnivariatePolynomial::constant(X, rational(rng.rand_range(1..10) as i64, rng.rand_range(1..10) as i64));
        for _ in 0..rng.rand_range(1..5) {
            let numerator = rng.rand_range(0..7) as i64 - 3;
            let denominator = rng.rand_range(1..4) as i64;
            f = &f * &UnivariatePolynomial::from_coefficients(X, vec![rational(numerator, denominator), rational(1, 1)]);
        }
        let factorization = f.factorization();
        assert_eq!(f, product(&factorization));
        for (factor, _) in &factorization {
            assert!(factor.is_linear());
        }
    }
}

#[test]
fn test_exclude_linear_factors() {
    LogAlgorithmSubscriber::init_test();
    // x^2 (2x - 1)(x - 1)(x^2 + 2)
    let f = &(&poly(&[0, 0, 1]) * &poly(&[-1, 2])) * &(&poly(&[-1, 1]) * &poly(&[2, 0, 1]));
    let mut factors = BTreeMap::new();
    let remaining = UnivariatePolynomial::exclude_linear_factors(&f, &mut factors, DEFAULT_LINEAR_FACTOR_BOUND);
    assert_eq!(Some(&2), factors.get(&poly(&[0, 1])));
    assert_eq!(Some(&1), factors.get(&poly(&[-1, 1])));
    assert_eq!(Some(&1), factors.get(&UnivariatePolynomial::from_coefficients(X, vec![rational(-1, 2), rational(1, 1)])));
    assert_eq!(3, factors.len());
    assert_eq!(poly(&[4, 0, 2]), remaining);
    assert_eq!(f, &product(&factors) * &remaining);
}

#[test]
fn test_exclude_linear_factors_bound() {
    LogAlgorithmSubscriber::init_test();
    // (2x - 1)(x - 1)
    let f = poly(&[1, -3, 2]);
    let mut factors = BTreeMap::new();
    assert_eq!(f, exclude_linear_factors(&f, &mut factors, 1, DontObserve));
    assert!(factors.is_empty());

    let remaining = exclude_linear_factors(&f, &mut factors, 2, DontObserve);
    assert_eq!(poly(&[-1, 2]), remaining);
    assert_eq!(Some(&1), factors.get(&poly(&[-1, 1])));
}

#[test]
fn test_factorization_reports_progress() {
    LogAlgorithmSubscriber::init_test();
    let controller = RecordProgress::default();
    let _ = poly(&[-1, 0, 1]).factorization_with_controller(DEFAULT_LINEAR_FACTOR_BOUND, controller.clone());
    assert!(controller.messages.borrow().starts_with("(deg=2)"));
    assert!(controller.messages.borrow().contains("(root="));
}
