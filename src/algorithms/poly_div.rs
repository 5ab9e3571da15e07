use num_traits::Zero;
use tracing::instrument;

use crate::coefficient::Coefficient;
use crate::rings::poly::UnivariatePolynomial;

///
/// Quotient and remainder of a polynomial division, as returned by [`poly_div_rem()`].
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DivisionResult<C: Coefficient> {
    pub quotient: UnivariatePolynomial<C>,
    pub remainder: UnivariatePolynomial<C>
}

fn strip_leading_zeros<C: Coefficient>(coefficients: &mut Vec<C>) {
    while coefficients.last().map(|c| c.is_zero()).unwrap_or(false) {
        coefficients.pop();
    }
}

///
/// Subtracts `factor * x^shift * rhs` from the polynomial given by `coefficients`.
///
fn sub_scaled_shifted<C: Coefficient>(coefficients: &mut Vec<C>, rhs: &UnivariatePolynomial<C>, factor: &C, shift: usize) {
    for (j, c) in rhs.coefficients().iter().enumerate() {
        coefficients[shift + j] = coefficients[shift + j].clone() - factor.clone() * c.clone();
    }
    strip_leading_zeros(coefficients);
}

///
/// Computes the polynomial division of `lhs` by `rhs`, i.e. `lhs = q * rhs + r` with
/// `deg(r) < deg(rhs)`.
///
/// If the coefficients do not form a field, the division stops as soon as the leading
/// coefficient of the remainder is not divisible by the leading coefficient of `rhs`.
/// In this case, the remainder may have degree `>= deg(rhs)`, but `lhs = q * rhs + r`
/// still holds.
///
/// # Example
/// ```
/// # use factorized_poly::variable::*;
/// # use factorized_poly::rings::poly::*;
/// # use factorized_poly::rings::rational::*;
/// # use factorized_poly::algorithms::poly_div::*;
/// let x = Variable::new(0, "x");
/// let f = UnivariatePolynomial::from_coefficients(x, vec![rational(1, 1), rational(0, 1), rational(1, 1)]);
/// let g = UnivariatePolynomial::from_coefficients(x, vec![rational(1, 1), rational(1, 1)]);
/// let DivisionResult { quotient, remainder } = poly_div_rem(&f, &g);
/// assert_eq!("x - 1", format!("{}", quotient));
/// assert_eq!("2", format!("{}", remainder));
/// ```
///
#[instrument(skip_all, level = "trace")]
pub fn poly_div_rem<C: Coefficient>(lhs: &UnivariatePolynomial<C>, rhs: &UnivariatePolynomial<C>) -> DivisionResult<C> {
    assert!(!rhs.is_zero(), "division by the zero polynomial");
    let var = lhs.common_var(rhs);
    let rhs_deg = rhs.degree();
    let lc = rhs.lcoeff();
    let mut remainder = lhs.coefficients().to_vec();
    let mut quotient = vec![C::zero(); (remainder.len() + 1).saturating_sub(rhs.coefficients().len())];
    while remainder.len() > rhs_deg {
        let top = remainder.len() - 1;
        let shift = top - rhs_deg;
        let factor = match remainder[top].checked_div(&lc) {
            Some(factor) => factor,
            None => break
        };
        sub_scaled_shifted(&mut remainder, rhs, &factor, shift);
        debug_assert!(remainder.len() <= top);
        quotient[shift] = factor;
    }
    return DivisionResult {
        quotient: UnivariatePolynomial::from_coefficients(var, quotient),
        remainder: UnivariatePolynomial::from_coefficients(var, remainder)
    };
}

///
/// Repeatedly eliminates the leading term of `poly` using the leading term of `divisor`,
/// until the degree is smaller than the degree of `divisor`. Requires `deg(poly) >= deg(divisor)`.
///
/// Over a field, this is the remainder of the division of `poly` by `divisor`. Over other
/// rings, whenever the leading coefficient is not divisible by the leading coefficient `l`
/// of `divisor`, the current polynomial is first multiplied by `l`. Hence, in this case the
/// result is a remainder of `l^k poly` for some `k >= 0`.
///
#[instrument(skip_all, level = "trace")]
pub fn poly_reduce<C: Coefficient>(poly: &UnivariatePolynomial<C>, divisor: &UnivariatePolynomial<C>) -> UnivariatePolynomial<C> {
    assert!(!divisor.is_zero(), "reduction by the zero polynomial");
    assert!(poly.degree() >= divisor.degree(), "cannot reduce a polynomial of degree {} by one of larger degree {}", poly.degree(), divisor.degree());
    let var = poly.common_var(divisor);
    let divisor_deg = divisor.degree();
    let lc = divisor.lcoeff();
    let mut current = poly.coefficients().to_vec();
    while current.len() > divisor_deg {
        let top = current.len() - 1;
        let factor = match current[top].checked_div(&lc) {
            Some(factor) => factor,
            None => {
                let factor = current[top].clone();
                for c in &mut current {
                    *c = c.clone() * lc.clone();
                }
                factor
            }
        };
        sub_scaled_shifted(&mut current, divisor, &factor, top - divisor_deg);
    }
    return UnivariatePolynomial::from_coefficients(var, current);
}

impl<C: Coefficient> UnivariatePolynomial<C> {

    ///
    /// See [`poly_div_rem()`].
    ///
    pub fn divide(&self, divisor: &Self) -> DivisionResult<C> {
        poly_div_rem(self, divisor)
    }

    ///
    /// See [`poly_reduce()`].
    ///
    pub fn reduce(&self, divisor: &Self) -> Self {
        poly_reduce(self, divisor)
    }

    pub fn quotient(&self, divisor: &Self) -> Self {
        poly_div_rem(self, divisor).quotient
    }

    pub fn remainder(&self, divisor: &Self) -> Self {
        poly_div_rem(self, divisor).remainder
    }

    ///
    /// Returns `q` with `self = q * divisor`, if it exists. Returns `None` if `divisor`
    /// is zero.
    ///
    pub fn checked_div(&self, divisor: &Self) -> Option<Self> {
        if divisor.is_zero() {
            return None;
        }
        let DivisionResult { quotient, remainder } = poly_div_rem(self, divisor);
        if remainder.is_zero() {
            Some(quotient)
        } else {
            None
        }
    }

    ///
    /// Checks whether `self` divides `other`.
    ///
    pub fn divides(&self, other: &Self) -> bool {
        if self.is_zero() {
            other.is_zero()
        } else {
            other.checked_div(self).is_some()
        }
    }
}

#[cfg(test)]
use num_bigint::BigInt;
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
fn int_poly(coefficients: &[i64]) -> UnivariatePolynomial<BigInt> {
    UnivariatePolynomial::from_coefficients(X, coefficients.iter().map(|c| BigInt::from(*c)).collect())
}

#[cfg(test)]
fn random_poly(rng: &mut oorandom::Rand64, degree: usize) -> UnivariatePolynomial<BigRational> {
    let mut coefficients = (0..degree).map(|_| rational(rng.rand_range(0..21) as i64 - 10, rng.rand_range(1..4) as i64)).collect::<Vec<_>>();
    coefficients.push(rational(rng.rand_range(1..6) as i64, rng.rand_range(1..4) as i64));
    return UnivariatePolynomial::from_coefficients(X, coefficients);
}

#[test]
fn test_poly_div_rem() {
    LogAlgorithmSubscriber::init_test();
    let f = poly(&[-1, 0, 0, 1]);
    let g = poly(&[-1, 1]);
    assert_eq!(DivisionResult { quotient: poly(&[1, 1, 1]), remainder: poly(&[]) }, poly_div_rem(&f, &g));

    let f = poly(&[1, 0, 1]);
    let g = poly(&[0, 2]);
    let DivisionResult { quotient, remainder } = poly_div_rem(&f, &g);
    assert_eq!(UnivariatePolynomial::from_coefficients(X, vec![rational(0, 1), rational(1, 2)]), quotient);
    assert_eq!(poly(&[1]), remainder);

    let DivisionResult { quotient, remainder } = poly_div_rem(&g, &f);
    assert!(quotient.is_zero());
    assert_eq!(g, remainder);

    let DivisionResult { quotient, remainder } = poly_div_rem(&f, &poly(&[3]));
    assert!(remainder.is_zero());
    assert_eq!(f, quotient.mul_scalar(&rational(3, 1)));
}

#[test]
fn test_poly_div_rem_random() {
    LogAlgorithmSubscriber::init_test();
    let mut rng = oorandom::Rand64::new(1);
    for _ in 0..crate::RANDOM_TEST_INSTANCE_COUNT {
        let lhs_deg = rng.rand_range(0..8) as usize;
        let rhs_deg = rng.rand_range(0..5) as usize;
        let lhs = random_poly(&mut rng, lhs_deg);
        let rhs = random_poly(&mut rng, rhs_deg);
        let DivisionResult { quotient, remainder } = lhs.divide(&rhs);
        assert_eq!(lhs, &(&quotient * &rhs) + &remainder);
        assert!(remainder.is_zero() || remainder.degree() < rhs.degree());
        assert_eq!(Some(quotient.clone()), (&quotient * &rhs).checked_div(&rhs));
    }
}

#[test]
fn test_poly_div_rem_over_integers() {
    LogAlgorithmSubscriber::init_test();
    let f = int_poly(&[1, 0, 4, 6]);
    let g = int_poly(&[1, 2]);
    let DivisionResult { quotient, remainder } = poly_div_rem(&f, &g);
    assert_eq!(int_poly(&[0, 0, 3]), quotient);
    assert_eq!(int_poly(&[1, 0, 1]), remainder);
    assert_eq!(f, &(&quotient * &g) + &remainder);

    let f = int_poly(&[1, 0, 3]);
    let DivisionResult { quotient, remainder } = poly_div_rem(&f, &g);
    assert!(quotient.is_zero());
    assert_eq!(f, remainder);
}

#[test]
#[should_panic]
fn test_poly_div_rem_by_zero() {
    let _ = poly_div_rem(&poly(&[1, 1]), &poly(&[]));
}

#[test]
fn test_poly_reduce() {
    LogAlgorithmSubscriber::init_test();
    assert!(poly(&[1, 0, 0, 1]).reduce(&poly(&[1, 1])).is_zero());
    assert_eq!(poly(&[2]), poly(&[1, 0, 1]).reduce(&poly(&[1, 1])));
    assert!(poly(&[1, 2, 3]).reduce(&poly(&[5])).is_zero());
    assert_eq!(poly(&[1, 3, 1]).remainder(&poly(&[2, 1])), poly(&[1, 3, 1]).reduce(&poly(&[2, 1])));

    // 4 (x^2 + 1) = (2x + 1)(2x - 1) + 5
    assert_eq!(int_poly(&[5]), int_poly(&[1, 0, 1]).reduce(&int_poly(&[1, 2])));
}

#[test]
#[should_panic]
fn test_poly_reduce_degree_precondition() {
    let _ = poly(&[1, 1]).reduce(&poly(&[1, 0, 1]));
}

#[test]
fn test_divides() {
    LogAlgorithmSubscriber::init_test();
    assert!(poly(&[-1, 1]).divides(&poly(&[-1, 0, 1])));
    assert!(!poly(&[1, 0, 1]).divides(&poly(&[-1, 0, 1])));
    assert!(poly(&[]).divides(&poly(&[])));
    assert!(!poly(&[]).divides(&poly(&[1])));
    assert!(int_poly(&[1, 1]).divides(&int_poly(&[2, 2])));
    assert!(!int_poly(&[1, 2]).divides(&int_poly(&[1, 1])));
    assert_eq!(None, poly(&[1, 1]).checked_div(&poly(&[])));
}
