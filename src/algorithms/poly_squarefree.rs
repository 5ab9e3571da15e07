use std::collections::BTreeMap;

use tracing::instrument;

use crate::algorithms::eea::poly_eea;
use crate::coefficient::Coefficient;
use crate::computation::*;
use crate::rings::poly::UnivariatePolynomial;

fn div_exact<C: Coefficient>(lhs: &UnivariatePolynomial<C>, rhs: &UnivariatePolynomial<C>) -> UnivariatePolynomial<C> {
    match lhs.checked_div(rhs) {
        Some(result) => result,
        None => panic!("{} is not divisible by {}", lhs, rhs)
    }
}

///
/// Computes the square-free factorization of `poly` using Yun's algorithm, as a map from
/// multiplicity to the monic product of all irreducible factors of `poly` that have exactly
/// this multiplicity. The product of `f^k` over all entries `(k, f)` equals `poly` up to a
/// nonzero scalar. Factors that would be constant are not included.
///
/// Since the map is keyed by the multiplicity, it cannot hold two separate factors of
/// the same multiplicity, those are always combined into their product.
///
/// Yun's algorithm is not valid if the characteristic `p` of the coefficient field is
/// positive and `p <= deg(poly)`, since then the derivative of a nonconstant polynomial
/// may vanish. In this case, and for polynomials of degree at most one, the whole polynomial
/// is returned as single factor of multiplicity one.
///
/// # Example
/// ```
/// # use factorized_poly::variable::*;
/// # use factorized_poly::rings::poly::*;
/// # use factorized_poly::rings::rational::*;
/// let x = Variable::new(0, "x");
/// // (x - 1)^2 (x + 2)
/// let f = UnivariatePolynomial::from_coefficients(x, vec![rational(2, 1), rational(-3, 1), rational(0, 1), rational(1, 1)]);
/// let factorization = f.square_free_factorization();
/// assert_eq!("x + 2", format!("{}", factorization[&1]));
/// assert_eq!("x - 1", format!("{}", factorization[&2]));
/// ```
///
#[instrument(skip_all, level = "trace")]
pub fn poly_square_free_factorization<C, Controller>(poly: &UnivariatePolynomial<C>, controller: Controller) -> BTreeMap<usize, UnivariatePolynomial<C>>
    where C: Coefficient,
        Controller: ComputationController
{
    let mut result = BTreeMap::new();
    let characteristic = C::characteristic();
    if poly.degree() <= 1 || (characteristic > 0 && characteristic <= poly.degree() as u64) {
        result.insert(1, poly.clone());
        return result;
    }
    log_progress!(controller, "(deg={})", poly.degree());
    let derivative = poly.derivative(1);
    let (c, _, _) = poly_eea(poly, &derivative, controller.clone());
    let mut w = div_exact(poly, &c);
    let mut z = &div_exact(&derivative, &c) - &w.derivative(1);
    let mut multiplicity = 1;
    while !z.is_zero() {
        let (g, _, _) = poly_eea(&w, &z, controller.clone());
        w = div_exact(&w, &g);
        z = &div_exact(&z, &g) - &w.derivative(1);
        if !g.is_constant() {
            result.insert(multiplicity, g);
        }
        multiplicity += 1;
        log_progress!(controller, ".");
    }
    if !w.is_constant() {
        result.insert(multiplicity, w.normalized());
    }
    return result;
}

///
/// Checks whether the polynomial has no repeated nonconstant factor, by checking whether
/// it is coprime to its derivative. The coefficients must form a field.
///
pub fn poly_is_square_free<C: Coefficient>(poly: &UnivariatePolynomial<C>) -> bool {
    assert!(!poly.is_zero(), "the zero polynomial is not square-free");
    if poly.is_constant() {
        return true;
    }
    let (gcd, _, _) = poly_eea(poly, &poly.derivative(1), DontObserve);
    return gcd.is_constant();
}

impl<C: Coefficient> UnivariatePolynomial<C> {

    ///
    /// See [`poly_square_free_factorization()`].
    ///
    pub fn square_free_factorization(&self) -> BTreeMap<usize, Self> {
        poly_square_free_factorization(self, DontObserve)
    }

    pub fn square_free_factorization_with_controller<Controller: ComputationController>(&self, controller: Controller) -> BTreeMap<usize, Self> {
        poly_square_free_factorization(self, controller)
    }

    ///
    /// See [`poly_is_square_free()`].
    ///
    pub fn is_square_free(&self) -> bool {
        poly_is_square_free(self)
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
fn assert_is_square_free_factorization<C: Coefficient>(poly: &UnivariatePolynomial<C>, factorization: &BTreeMap<usize, UnivariatePolynomial<C>>) {
    let mut product = UnivariatePolynomial::one(poly.main_var());
    for (k, f) in factorization {
        assert!(f.is_square_free());
        product = &product * &f.pow(*k);
    }
    assert_eq!(poly.degree(), product.degree());
    assert!(product.divides(poly));
}

#[test]
fn test_square_free_factorization() {
    LogAlgorithmSubscriber::init_test();
    // 3 (x - 1)^2 (x + 2)
    let f = poly(&[6, -9, 0, 3]);
    let factorization = f.square_free_factorization();
    assert_eq!(2, factorization.len());
    assert_eq!(poly(&[2, 1]), factorization[&1]);
    assert_eq!(poly(&[-1, 1]), factorization[&2]);
    assert_is_square_free_factorization(&f, &factorization);

    // (x^2 + 1)^3 x^2
    let f = &poly(&[1, 0, 1]).pow(3) * &poly(&[0, 0, 1]);
    let factorization = f.square_free_factorization();
    assert_eq!(2, factorization.len());
    assert_eq!(poly(&[0, 1]), factorization[&2]);
    assert_eq!(poly(&[1, 0, 1]), factorization[&3]);
    assert_is_square_free_factorization(&f, &factorization);
}

#[test]
fn test_square_free_factorization_combines_equal_multiplicities() {
    LogAlgorithmSubscriber::init_test();
    // (x - 1)^2 (x + 1)^2 (x + 3)
    let f = &poly(&[-1, 0, 1]).pow(2) * &poly(&[3, 1]);
    let factorization = f.square_free_factorization();
    assert_eq!(poly(&[3, 1]), factorization[&1]);
    assert_eq!(poly(&[-1, 0, 1]), factorization[&2]);
}

#[test]
fn test_square_free_factorization_trivial() {
    LogAlgorithmSubscriber::init_test();
    let f = poly(&[1, 0, 1]);
    assert_eq!(Some(&f), f.square_free_factorization().get(&1));
    assert_eq!(1, f.square_free_factorization().len());

    let linear = poly(&[3, 2]);
    assert_eq!(Some(&linear), linear.square_free_factorization().get(&1));

    let constant = poly(&[5]);
    assert_eq!(Some(&constant), constant.square_free_factorization().get(&1));
}

#[test]
fn test_square_free_factorization_characteristic_guard() {
    LogAlgorithmSubscriber::init_test();
    let poly3 = |coefficients: &[u64]| UnivariatePolynomial::from_coefficients(X, coefficients.iter().map(|c| Fp::<3>::new(*c)).collect());
    // x^3 + 2 = (x + 2)^3 over F3, but its derivative vanishes
    let f = poly3(&[2, 0, 0, 1]);
    let factorization = f.square_free_factorization();
    assert_eq!(1, factorization.len());
    assert_eq!(f, factorization[&1]);

    let poly7 = |coefficients: &[u64]| UnivariatePolynomial::from_coefficients(X, coefficients.iter().map(|c| Fp::<7>::new(*c)).collect());
    // (x + 6)^2 (x + 2) over F7
    let f = &poly7(&[6, 1]).pow(2) * &poly7(&[2, 1]);
    let factorization = f.square_free_factorization();
    assert_eq!(poly7(&[2, 1]), factorization[&1]);
    assert_eq!(poly7(&[6, 1]), factorization[&2]);
}

#[test]
fn test_square_free_factorization_random() {
    LogAlgorithmSubscriber::init_test();
    let mut rng = oorandom::Rand64::new(1);
    for _ in 0..crate::RANDOM_TEST_INSTANCE_COUNT {
        let mut f = poly(&[rng.rand_range(1..4) as i64]);
        for k in 1..4 {
            let root = rng.rand_range(0..11) as i64 - 5;
            let quadratic_part = rng.rand_range(1..5) as i64;
            f = &f * &poly(&[-root, 1]).pow(k);
            if rng.rand_range(0..2) == 0 {
                f = &f * &poly(&[quadratic_part, 0, 1]);
            }
        }
        let factorization = f.square_free_factorization();
        assert_is_square_free_factorization(&f, &factorization);
    }
}

#[test]
fn test_is_square_free() {
    LogAlgorithmSubscriber::init_test();
    assert!(poly(&[-1, 0, 1]).is_square_free());
    assert!(!poly(&[1, 2, 1]).is_square_free());
    assert!(poly(&[7]).is_square_free());
    assert!(!poly(&[0, 0, 1]).is_square_free());
}
