use tracing::instrument;

use crate::algorithms::poly_div::*;
use crate::coefficient::Coefficient;
use crate::computation::*;
use crate::rings::poly::UnivariatePolynomial;

type BezoutRow<C> = (UnivariatePolynomial<C>, UnivariatePolynomial<C>, UnivariatePolynomial<C>);

///
/// Divides all entries of a row `(r, r1, r2)` with `r = r1 a + r2 b` by the leading
/// coefficient of `r`, so that the invariant is kept and `r` becomes monic.
///
fn normalize_row<C: Coefficient>(row: BezoutRow<C>) -> BezoutRow<C> {
    let (r, r1, r2) = row;
    if r.is_zero() {
        return (r, r1, r2);
    }
    let lc = r.lcoeff();
    return (r.div_scalar(&lc), r1.div_scalar(&lc), r2.div_scalar(&lc));
}

///
/// Computes the monic greatest common divisor `d` of `lhs` and `rhs`, together with
/// Bezout coefficients `s, t` such that `d = s * lhs + t * rhs`. Returns `(d, s, t)`.
///
/// If both inputs are zero, all three results are zero. The coefficients must form a field.
///
/// # Example
/// ```
/// # use factorized_poly::variable::*;
/// # use factorized_poly::rings::poly::*;
/// # use factorized_poly::rings::rational::*;
/// # use factorized_poly::algorithms::eea::*;
/// # use factorized_poly::computation::*;
/// let x = Variable::new(0, "x");
/// let poly = |coefficients: [i64; 3]| UnivariatePolynomial::from_coefficients(x, coefficients.iter().map(|c| rational(*c, 1)).collect());
/// // (x - 1)(x + 2) and (x - 1)(x + 3)
/// let f = poly([-2, 1, 1]);
/// let g = poly([-3, 2, 1]);
/// let (d, s, t) = poly_eea(&f, &g, DontObserve);
/// assert_eq!("x - 1", format!("{}", d));
/// assert_eq!(d, &(&s * &f) + &(&t * &g));
/// ```
///
#[instrument(skip_all, level = "trace")]
pub fn poly_eea<C, Controller>(lhs: &UnivariatePolynomial<C>, rhs: &UnivariatePolynomial<C>, controller: Controller) -> BezoutRow<C>
    where C: Coefficient,
        Controller: ComputationController
{
    assert!(C::IS_FIELD, "the extended euclidean algorithm requires coefficients that form a field");
    let var = lhs.common_var(rhs);
    if lhs.is_zero() && rhs.is_zero() {
        return (UnivariatePolynomial::zero(var), UnivariatePolynomial::zero(var), UnivariatePolynomial::zero(var));
    }
    // invariants: c = c1 lhs + c2 rhs and d = d1 lhs + d2 rhs
    let (mut c, mut c1, mut c2) = normalize_row((lhs.clone(), UnivariatePolynomial::one(var), UnivariatePolynomial::zero(var)));
    let (mut d, mut d1, mut d2) = normalize_row((rhs.clone(), UnivariatePolynomial::zero(var), UnivariatePolynomial::one(var)));
    while !d.is_zero() {
        let DivisionResult { quotient, remainder } = poly_div_rem(&c, &d);
        let r1 = &c1 - &(&quotient * &d1);
        let r2 = &c2 - &(&quotient * &d2);
        (c, c1, c2) = (d, d1, d2);
        (d, d1, d2) = normalize_row((remainder, r1, r2));
        log_progress!(controller, ".");
    }
    let (gcd, s, t) = normalize_row((c, c1, c2));
    debug_assert!(gcd == &(&s * lhs) + &(&t * rhs));
    return (gcd, s, t);
}

///
/// Computes the monic greatest common divisor of `lhs` and `rhs`, which is zero if both
/// are zero. The coefficients must form a field.
///
#[instrument(skip_all, level = "trace")]
pub fn poly_gcd<C: Coefficient>(lhs: &UnivariatePolynomial<C>, rhs: &UnivariatePolynomial<C>) -> UnivariatePolynomial<C> {
    if lhs.degree() < rhs.degree() {
        poly_gcd_recursive(&rhs.normalized(), &lhs.normalized()).normalized()
    } else {
        poly_gcd_recursive(&lhs.normalized(), &rhs.normalized()).normalized()
    }
}

///
/// Computes a greatest common divisor of `lhs` and `rhs` by the euclidean algorithm, with
/// one recursion step per remainder. In each step, the operand of higher degree is reduced
/// by the other one, thus the operands may be given in any order.
///
/// The result is only determined up to a unit, use [`poly_gcd()`] for the monic gcd.
///
#[stability::unstable(feature = "enable")]
pub fn poly_gcd_recursive<C: Coefficient>(lhs: &UnivariatePolynomial<C>, rhs: &UnivariatePolynomial<C>) -> UnivariatePolynomial<C> {
    if !rhs.is_zero() && (lhs.is_zero() || lhs.degree() < rhs.degree()) {
        return poly_gcd_recursive(rhs, lhs);
    }
    if rhs.is_zero() {
        return lhs.clone();
    }
    return poly_gcd_recursive(rhs, &poly_reduce(lhs, rhs));
}

impl<C: Coefficient> UnivariatePolynomial<C> {

    ///
    /// See [`poly_eea()`].
    ///
    pub fn extended_gcd(lhs: &Self, rhs: &Self) -> BezoutRow<C> {
        poly_eea(lhs, rhs, DontObserve)
    }

    pub fn extended_gcd_with_controller<Controller: ComputationController>(lhs: &Self, rhs: &Self, controller: Controller) -> BezoutRow<C> {
        poly_eea(lhs, rhs, controller)
    }

    ///
    /// See [`poly_gcd()`].
    ///
    pub fn gcd(lhs: &Self, rhs: &Self) -> Self {
        poly_gcd(lhs, rhs)
    }

    ///
    /// See [`poly_gcd_recursive()`].
    ///
    pub fn gcd_recursive(lhs: &Self, rhs: &Self) -> Self {
        poly_gcd_recursive(lhs, rhs)
    }
}

#[cfg(test)]
use num_rational::BigRational;
#[cfg(test)]
use crate::rings::rational::rational;
#[cfg(test)]
use crate::rings::zn::Fp;
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
fn random_poly(rng: &mut oorandom::Rand64, degree: usize) -> UnivariatePolynomial<BigRational> {
    let mut coefficients = (0..degree).map(|_| rational(rng.rand_range(0..21) as i64 - 10, rng.rand_range(1..4) as i64)).collect::<Vec<_>>();
    coefficients.push(rational(rng.rand_range(1..6) as i64, 1));
    return UnivariatePolynomial::from_coefficients(X, coefficients);
}

#[test]
fn test_poly_eea() {
    LogAlgorithmSubscriber::init_test();
    let f = poly(&[-2, 1, 1]);
    let g = poly(&[-3, 2, 1]);
    let (d, s, t) = UnivariatePolynomial::extended_gcd(&f, &g);
    assert_eq!(poly(&[-1, 1]), d);
    assert_eq!(d, &(&s * &f) + &(&t * &g));

    let f = poly(&[2, 0, 4]);
    let g = poly(&[0, 3]);
    let (d, s, t) = UnivariatePolynomial::extended_gcd(&f, &g);
    assert_eq!(poly(&[1]), d);
    assert_eq!(d, &(&s * &f) + &(&t * &g));
}

#[test]
fn test_poly_eea_zero() {
    LogAlgorithmSubscriber::init_test();
    let f = poly(&[3, 6]);
    let zero = poly(&[]);
    let (d, s, t) = UnivariatePolynomial::extended_gcd(&f, &zero);
    assert_eq!(UnivariatePolynomial::from_coefficients(X, vec![rational(1, 2), rational(1, 1)]), d);
    assert_eq!(d, &s * &f);
    assert!(t.is_zero());

    let (d, s, t) = UnivariatePolynomial::extended_gcd(&zero, &f);
    assert_eq!(d, &t * &f);
    assert!(s.is_zero());

    let (d, s, t) = UnivariatePolynomial::extended_gcd(&zero, &zero);
    assert!(d.is_zero() && s.is_zero() && t.is_zero());
}

#[test]
fn test_poly_eea_random() {
    LogAlgorithmSubscriber::init_test();
    let mut rng = oorandom::Rand64::new(1);
    for _ in 0..crate::RANDOM_TEST_INSTANCE_COUNT {
        let common_deg = rng.rand_range(0..3) as usize;
        let lhs_deg = rng.rand_range(0..4) as usize;
        let rhs_deg = rng.rand_range(0..4) as usize;
        let common = random_poly(&mut rng, common_deg);
        let lhs = &common * &random_poly(&mut rng, lhs_deg);
        let rhs = &common * &random_poly(&mut rng, rhs_deg);
        let (d, s, t) = poly_eea(&lhs, &rhs, DontObserve);
        assert!(d.lcoeff() == rational(1, 1));
        assert!(common.divides(&d));
        assert!(d.divides(&lhs));
        assert!(d.divides(&rhs));
        assert_eq!(d, &(&s * &lhs) + &(&t * &rhs));
        assert_eq!(d, poly_gcd(&lhs, &rhs));
    }
}

#[test]
fn test_poly_gcd() {
    LogAlgorithmSubscriber::init_test();
    // (x - 1)(x + 1) and (x + 1)^2
    assert_eq!(poly(&[1, 1]), UnivariatePolynomial::gcd(&poly(&[-1, 0, 1]), &poly(&[1, 2, 1])));
    assert_eq!(poly(&[1, 1]), UnivariatePolynomial::gcd(&poly(&[1, 2, 1]), &poly(&[-1, 0, 1])));
    assert_eq!(poly(&[1]), UnivariatePolynomial::gcd(&poly(&[1, 0, 1]), &poly(&[-1, 1])));
    assert_eq!(poly(&[1, 1]), UnivariatePolynomial::gcd(&poly(&[3, 3]), &poly(&[])));
    assert!(UnivariatePolynomial::gcd(&poly(&[]), &poly(&[])).is_zero());
}

#[test]
fn test_poly_gcd_recursive() {
    LogAlgorithmSubscriber::init_test();
    let f = poly(&[-2, 0, 2]);
    let g = poly(&[2, 2]);
    let d = UnivariatePolynomial::gcd_recursive(&f, &g);
    assert_eq!(1, d.degree());
    assert_eq!(poly(&[1, 1]), d.normalized());
}

#[test]
fn test_poly_gcd_recursive_operand_order() {
    LogAlgorithmSubscriber::init_test();
    let f = poly(&[1, 1]);
    let g = poly(&[-1, 0, 1]);
    assert_eq!(poly(&[1, 1]), UnivariatePolynomial::gcd_recursive(&f, &g).normalized());
    assert_eq!(poly(&[1, 1]), UnivariatePolynomial::gcd_recursive(&g, &f).normalized());
    assert_eq!(g, UnivariatePolynomial::gcd_recursive(&poly(&[]), &g));
    assert_eq!(g, UnivariatePolynomial::gcd_recursive(&g, &poly(&[])));
    assert!(UnivariatePolynomial::gcd_recursive(&poly(&[]), &poly(&[])).is_zero());
}

#[test]
fn test_poly_gcd_finite_field() {
    LogAlgorithmSubscriber::init_test();
    let poly = |coefficients: &[u64]| UnivariatePolynomial::from_coefficients(X, coefficients.iter().map(|c| Fp::<5>::new(*c)).collect());
    // x^2 - 1 = (x - 1)(x + 1) and x^2 + 3x + 2 = (x + 1)(x + 2)
    let f = poly(&[4, 0, 1]);
    let g = poly(&[2, 3, 1]);
    let (d, s, t) = UnivariatePolynomial::extended_gcd(&f, &g);
    assert_eq!(poly(&[1, 1]), d);
    assert_eq!(d, &(&s * &f) + &(&t * &g));
}

#[test]
fn test_poly_eea_reports_progress() {
    LogAlgorithmSubscriber::init_test();
    let controller = RecordProgress::default();
    let _ = UnivariatePolynomial::extended_gcd_with_controller(&poly(&[-1, 0, 1]), &poly(&[1, 2, 1]), controller.clone());
    assert!(controller.messages.borrow().contains('.'));
}
