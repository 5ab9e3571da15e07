use std::cmp::{max, Ordering};
use std::fmt::{Debug, Display};
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

use crate::coefficient::*;
use crate::variable::Variable;

///
/// A univariate polynomial with coefficients in `C`, stored as the dense list of
/// coefficients in ascending degree. The list never ends with a zero coefficient,
/// so the zero polynomial is the empty list.
///
/// Constant polynomials are considered equal independent of their main variable,
/// i.e. `2` in `x` and `2` in `y` are the same polynomial. Nonconstant polynomials
/// in different variables are never equal, and arithmetic between them panics.
///
/// The ordering is a total order compatible with equality: constants come first
/// (ordered by their value), then nonconstant polynomials ordered by main variable,
/// degree and finally their coefficients from the leading one downwards.
///
/// Note that this is not a degree-first order. The main variable takes precedence over
/// the degree for nonconstant polynomials, thus `x^2` in `x` is smaller than `y` in `y`
/// whenever `x` is smaller than `y`. Only constants are ordered before everything else,
/// independent of their main variable.
///
/// # Example
/// ```
/// # use factorized_poly::variable::*;
/// # use factorized_poly::rings::poly::*;
/// # use factorized_poly::rings::rational::*;
/// let x = Variable::new(0, "x");
/// let f = UnivariatePolynomial::from_coefficients(x, vec![rational(-1, 1), rational(0, 1), rational(1, 1)]);
/// assert_eq!(2, f.degree());
/// assert_eq!(rational(3, 1), f.evaluate(&rational(2, 1)));
/// assert_eq!("x^2 - 1", format!("{}", f));
/// ```
///
#[derive(Clone, Serialize, Deserialize)]
#[serde(from = "PolynomialData<C>", bound(deserialize = "C: Coefficient + Deserialize<'de>"))]
pub struct UnivariatePolynomial<C> {
    main_var: Variable,
    coefficients: Vec<C>
}

#[derive(Deserialize)]
struct PolynomialData<C> {
    main_var: Variable,
    coefficients: Vec<C>
}

impl<C: Coefficient> From<PolynomialData<C>> for UnivariatePolynomial<C> {

    fn from(data: PolynomialData<C>) -> Self {
        Self::from_coefficients(data.main_var, data.coefficients)
    }
}

fn strip_leading_zeros<C: Coefficient>(coefficients: &mut Vec<C>) {
    while coefficients.last().map(|c| c.is_zero()).unwrap_or(false) {
        coefficients.pop();
    }
}

impl<C: Coefficient> UnivariatePolynomial<C> {

    pub fn zero(main_var: Variable) -> Self {
        UnivariatePolynomial { main_var, coefficients: Vec::new() }
    }

    pub fn one(main_var: Variable) -> Self {
        Self::constant(main_var, C::one())
    }

    pub fn constant(main_var: Variable, value: C) -> Self {
        Self::from_coefficients(main_var, vec![value])
    }

    ///
    /// Returns the polynomial `x`, where `x` is the given variable.
    ///
    pub fn variable(main_var: Variable) -> Self {
        Self::from_coefficients(main_var, vec![C::zero(), C::one()])
    }

    ///
    /// Creates the polynomial `sum_i coefficients[i] x^i`. Trailing zeros are removed.
    ///
    pub fn from_coefficients(main_var: Variable, mut coefficients: Vec<C>) -> Self {
        strip_leading_zeros(&mut coefficients);
        UnivariatePolynomial { main_var, coefficients }
    }

    ///
    /// Creates the polynomial `sum c x^i` over all terms `(c, i)`. Terms of the same
    /// degree are added.
    ///
    pub fn from_terms<I>(main_var: Variable, terms: I) -> Self
        where I: IntoIterator<Item = (C, usize)>
    {
        let mut coefficients = Vec::new();
        for (c, i) in terms {
            if coefficients.len() <= i {
                coefficients.resize(i + 1, C::zero());
            }
            coefficients[i] = coefficients[i].clone() + c;
        }
        return Self::from_coefficients(main_var, coefficients);
    }

    pub fn main_var(&self) -> Variable {
        self.main_var
    }

    pub fn coefficients(&self) -> &[C] {
        &self.coefficients
    }

    ///
    /// The degree of the polynomial. As a convention, the zero polynomial has degree `0`,
    /// use [`UnivariatePolynomial::is_zero()`] to distinguish it from other constants.
    ///
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    pub fn coefficient(&self, i: usize) -> C {
        self.coefficients.get(i).cloned().unwrap_or_else(C::zero)
    }

    pub fn lcoeff(&self) -> C {
        self.coefficients.last().cloned().unwrap_or_else(C::zero)
    }

    pub fn tcoeff(&self) -> C {
        self.coefficient(0)
    }

    pub fn is_zero(&self) -> bool {
        self.coefficients.is_empty()
    }

    pub fn is_constant(&self) -> bool {
        self.coefficients.len() <= 1
    }

    pub fn is_one(&self) -> bool {
        self.coefficients.len() == 1 && self.coefficients[0].is_one()
    }

    ///
    /// Whether the polynomial has degree at most one.
    ///
    pub fn is_linear(&self) -> bool {
        self.coefficients.len() <= 2
    }

    ///
    /// Returns the main variable of the result of an arithmetic operation between `self`
    /// and `other`. Constants adapt to the variable of the other operand.
    ///
    pub(crate) fn common_var(&self, other: &Self) -> Variable {
        if self.is_constant() {
            other.main_var
        } else if other.is_constant() {
            self.main_var
        } else {
            assert!(self.main_var == other.main_var, "polynomials in different variables {:?} and {:?}", self.main_var, other.main_var);
            self.main_var
        }
    }

    ///
    /// Evaluates the polynomial at `value`, using Horner's scheme.
    ///
    pub fn evaluate(&self, value: &C) -> C {
        let mut result = C::zero();
        for c in self.coefficients.iter().rev() {
            result = result * value.clone() + c.clone();
        }
        return result;
    }

    ///
    /// Computes the `nth` derivative. The coefficient of `x^i` in the result is the
    /// coefficient of `x^(i + nth)` times the falling factorial `(i + nth)! / i!`.
    ///
    pub fn derivative(&self, nth: usize) -> Self {
        if nth == 0 {
            return self.clone();
        }
        if self.coefficients.len() <= nth {
            return Self::zero(self.main_var);
        }
        let result = (nth..self.coefficients.len()).map(|i| {
            let mut factor = C::one();
            for k in (i + 1 - nth)..=i {
                factor = factor * C::from_int(k as i64);
            }
            factor * self.coefficients[i].clone()
        }).collect::<Vec<_>>();
        return Self::from_coefficients(self.main_var, result);
    }

    pub fn pow(&self, exp: usize) -> Self {
        let mut result = Self::one(self.main_var);
        let mut power = self.clone();
        let mut e = exp;
        while e > 0 {
            if e & 1 == 1 {
                result = &result * &power;
            }
            e >>= 1;
            if e > 0 {
                power = &power * &power;
            }
        }
        return result;
    }

    pub fn mul_scalar(&self, factor: &C) -> Self {
        Self::from_coefficients(self.main_var, self.coefficients.iter().map(|c| c.clone() * factor.clone()).collect())
    }

    ///
    /// Divides every coefficient by `divisor`. Panics if one of the divisions is not exact.
    ///
    pub fn div_scalar(&self, divisor: &C) -> Self {
        assert!(!divisor.is_zero(), "division by zero");
        Self::from_coefficients(self.main_var, self.coefficients.iter().map(|c| c.div_exact(divisor)).collect())
    }

    ///
    /// Returns the monic polynomial associated to `self`, i.e. `self` divided by its leading
    /// coefficient. The zero polynomial is returned unchanged.
    ///
    /// This is only supported over fields, and panics otherwise.
    ///
    pub fn normalized(&self) -> Self {
        assert!(C::IS_FIELD, "normalized() is unsupported for coefficients that do not form a field");
        if self.is_zero() {
            return self.clone();
        }
        return self.div_scalar(&self.lcoeff());
    }

    ///
    /// Evaluates the polynomial at `root`, and computes the quotient by `x - root` on the way.
    ///
    /// If the remainder is zero, i.e. `root` is a root of this polynomial, the polynomial is
    /// replaced by the quotient and zero is returned. Otherwise, the polynomial is left unchanged
    /// and the nonzero remainder is returned. Hence, the multiplicity of a root can be found
    /// by calling this function until it returns a nonzero value.
    ///
    pub fn synthetic_division(&mut self, root: &C) -> C {
        if self.is_zero() {
            return C::zero();
        }
        let mut quotient = vec![C::zero(); self.coefficients.len() - 1];
        let mut remainder = C::zero();
        for i in (0..self.coefficients.len()).rev() {
            remainder = remainder * root.clone() + self.coefficients[i].clone();
            if i > 0 {
                quotient[i - 1] = remainder.clone();
            }
        }
        if remainder.is_zero() {
            self.coefficients = quotient;
            strip_leading_zeros(&mut self.coefficients);
        }
        return remainder;
    }
}

impl<C: OrderedCoefficient> UnivariatePolynomial<C> {

    ///
    /// Returns the maximal absolute value of a coefficient, or zero for the zero polynomial.
    ///
    pub fn max_coefficient_abs(&self) -> C {
        self.coefficients.iter().map(|c| c.abs()).max().unwrap_or_else(C::zero)
    }

    ///
    /// Computes the Cauchy bound `1 + max_i |a_i| / |a_n|`, where `a_n` is the leading
    /// coefficient and `i` ranges over all other degrees. Every complex root of the polynomial
    /// has absolute value strictly smaller than this bound.
    ///
    pub fn cauchy_bound(&self) -> C {
        assert!(C::IS_FIELD, "cauchy_bound() requires coefficients that form a field");
        assert!(!self.is_zero(), "the zero polynomial has no Cauchy bound");
        let lc = self.lcoeff().abs();
        let max_lower = self.coefficients[..self.degree()].iter().map(|c| c.abs()).max().unwrap_or_else(C::zero);
        return C::one() + max_lower.div_exact(&lc);
    }
}

impl<C: RationalCoefficient> UnivariatePolynomial<C> {

    ///
    /// Returns the positive rational `c` such that `c * self` has coprime integer coefficients,
    /// i.e. the least common multiple of the denominators divided by the greatest common divisor
    /// of the numerators of the coefficients.
    ///
    /// # Example
    /// ```
    /// # use factorized_poly::variable::*;
    /// # use factorized_poly::rings::poly::*;
    /// # use factorized_poly::rings::rational::*;
    /// let x = Variable::new(0, "x");
    /// let f = UnivariatePolynomial::from_coefficients(x, vec![rational(2, 3), rational(4, 1)]);
    /// assert_eq!(rational(3, 2), f.coprime_factor());
    /// ```
    ///
    pub fn coprime_factor(&self) -> C {
        assert!(!self.is_zero(), "the zero polynomial has no coprime factor");
        let mut numerator_gcd = BigInt::zero();
        let mut denominator_lcm = BigInt::one();
        for c in &self.coefficients {
            numerator_gcd = Integer::gcd(&numerator_gcd, &c.numerator());
            denominator_lcm = Integer::lcm(&denominator_lcm, &c.denominator());
        }
        return C::from_fraction(denominator_lcm, numerator_gcd);
    }

    ///
    /// Returns `c * self` as polynomial over the integers, where `c` is [`UnivariatePolynomial::coprime_factor()`].
    /// The content of the result is `1`.
    ///
    pub fn coprime_coefficients(&self) -> UnivariatePolynomial<BigInt> {
        let factor = self.coprime_factor();
        let coefficients = self.coefficients.iter().map(|c| {
            let scaled = c.clone() * factor.clone();
            debug_assert!(scaled.is_integral());
            scaled.numerator()
        }).collect();
        return UnivariatePolynomial::from_coefficients(self.main_var, coefficients);
    }
}

impl<C: IntegerCoefficient> UnivariatePolynomial<C> {

    ///
    /// Reduces every coefficient modulo `modulus`, see [`IntegerCoefficient::modulo()`].
    ///
    pub fn modulo(&self, modulus: &C) -> Self {
        let mut result = self.clone();
        result.modulo_assign(modulus);
        return result;
    }

    pub fn modulo_assign(&mut self, modulus: &C) {
        for c in &mut self.coefficients {
            *c = c.modulo(modulus);
        }
        strip_leading_zeros(&mut self.coefficients);
    }
}

impl<C: Coefficient> PartialEq for UnivariatePolynomial<C> {

    fn eq(&self, other: &Self) -> bool {
        if self.is_constant() && other.is_constant() {
            self.coefficients == other.coefficients
        } else {
            self.main_var == other.main_var && self.coefficients == other.coefficients
        }
    }
}

impl<C: Coefficient> Eq for UnivariatePolynomial<C> {}

impl<C: Coefficient> Hash for UnivariatePolynomial<C> {

    fn hash<H: Hasher>(&self, state: &mut H) {
        if !self.is_constant() {
            self.main_var.hash(state);
        }
        self.coefficients.hash(state);
    }
}

fn compare_coefficients<C: Coefficient>(lhs: &[C], rhs: &[C]) -> Ordering {
    lhs.len().cmp(&rhs.len()).then_with(|| lhs.iter().rev().cmp(rhs.iter().rev()))
}

impl<C: Coefficient> PartialOrd for UnivariatePolynomial<C> {

    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: Coefficient> Ord for UnivariatePolynomial<C> {

    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_constant(), other.is_constant()) {
            (true, true) => compare_coefficients(&self.coefficients, &other.coefficients),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self.main_var.cmp(&other.main_var).then_with(|| compare_coefficients(&self.coefficients, &other.coefficients))
        }
    }
}

impl<C: Coefficient> Display for UnivariatePolynomial<C> {

    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        let mut first = true;
        for i in (0..self.coefficients.len()).rev() {
            let c = &self.coefficients[i];
            if c.is_zero() {
                continue;
            }
            let mut term = if i == 0 {
                format!("{}", c)
            } else if c.is_one() {
                String::new()
            } else if *c == -C::one() {
                "-".to_owned()
            } else {
                format!("{}*", c)
            };
            if i == 1 {
                term.push_str(self.main_var.name());
            } else if i > 1 {
                term.push_str(&format!("{}^{}", self.main_var.name(), i));
            }
            if first {
                write!(f, "{}", term)?;
            } else if let Some(negated) = term.strip_prefix('-') {
                write!(f, " - {}", negated)?;
            } else {
                write!(f, " + {}", term)?;
            }
            first = false;
        }
        return Ok(());
    }
}

impl<C: Coefficient> Debug for UnivariatePolynomial<C> {

    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} in {:?}", self, self.main_var)
    }
}

impl<'a, 'b, C: Coefficient> Add<&'b UnivariatePolynomial<C>> for &'a UnivariatePolynomial<C> {

    type Output = UnivariatePolynomial<C>;

    fn add(self, rhs: &'b UnivariatePolynomial<C>) -> UnivariatePolynomial<C> {
        let var = self.common_var(rhs);
        let len = max(self.coefficients.len(), rhs.coefficients.len());
        let result = (0..len).map(|i| self.coefficient(i) + rhs.coefficient(i)).collect();
        return UnivariatePolynomial::from_coefficients(var, result);
    }
}

impl<'a, 'b, C: Coefficient> Sub<&'b UnivariatePolynomial<C>> for &'a UnivariatePolynomial<C> {

    type Output = UnivariatePolynomial<C>;

    fn sub(self, rhs: &'b UnivariatePolynomial<C>) -> UnivariatePolynomial<C> {
        let var = self.common_var(rhs);
        let len = max(self.coefficients.len(), rhs.coefficients.len());
        let result = (0..len).map(|i| self.coefficient(i) - rhs.coefficient(i)).collect();
        return UnivariatePolynomial::from_coefficients(var, result);
    }
}

impl<'a, 'b, C: Coefficient> Mul<&'b UnivariatePolynomial<C>> for &'a UnivariatePolynomial<C> {

    type Output = UnivariatePolynomial<C>;

    fn mul(self, rhs: &'b UnivariatePolynomial<C>) -> UnivariatePolynomial<C> {
        let var = self.common_var(rhs);
        if self.is_zero() || rhs.is_zero() {
            return UnivariatePolynomial::zero(var);
        }
        let mut result = vec![C::zero(); self.coefficients.len() + rhs.coefficients.len() - 1];
        for (i, a) in self.coefficients.iter().enumerate() {
            for (j, b) in rhs.coefficients.iter().enumerate() {
                result[i + j] = result[i + j].clone() + a.clone() * b.clone();
            }
        }
        return UnivariatePolynomial::from_coefficients(var, result);
    }
}

impl<'a, C: Coefficient> Neg for &'a UnivariatePolynomial<C> {

    type Output = UnivariatePolynomial<C>;

    fn neg(self) -> UnivariatePolynomial<C> {
        UnivariatePolynomial { main_var: self.main_var, coefficients: self.coefficients.iter().map(|c| -c.clone()).collect() }
    }
}

impl<C: Coefficient> Add for UnivariatePolynomial<C> {

    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        &self + &rhs
    }
}

impl<C: Coefficient> Sub for UnivariatePolynomial<C> {

    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        &self - &rhs
    }
}

impl<C: Coefficient> Mul for UnivariatePolynomial<C> {

    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        &self * &rhs
    }
}

impl<C: Coefficient> Neg for UnivariatePolynomial<C> {

    type Output = Self;

    fn neg(self) -> Self {
        -&self
    }
}

#[cfg(test)]
use num_rational::BigRational;
#[cfg(test)]
use crate::rings::rational::rational;
#[cfg(test)]
use crate::rings::zn::Fp;
#[cfg(test)]
use crate::tracing::LogAlgorithmSubscriber;

#[cfg(test)]
const X: Variable = Variable::new(0, "x");
#[cfg(test)]
const Y: Variable = Variable::new(1, "y");

#[cfg(test)]
fn poly(var: Variable, coefficients: &[i64]) -> UnivariatePolynomial<BigRational> {
    UnivariatePolynomial::from_coefficients(var, coefficients.iter().map(|c| rational(*c, 1)).collect())
}

#[test]
fn test_from_coefficients_strips_zeros() {
    LogAlgorithmSubscriber::init_test();
    let f = poly(X, &[1, 2, 0, 0]);
    assert_eq!(2, f.coefficients().len());
    assert_eq!(1, f.degree());
    assert!(poly(X, &[0, 0]).is_zero());
    assert_eq!(0, poly(X, &[]).degree());
    assert_eq!(poly(X, &[3, 0, 1]), UnivariatePolynomial::from_terms(X, [(rational(1, 1), 2), (rational(1, 1), 0), (rational(2, 1), 0)]));
}

#[test]
fn test_constants_equal_across_variables() {
    LogAlgorithmSubscriber::init_test();
    assert_eq!(poly(X, &[5]), poly(Y, &[5]));
    assert_eq!(poly(X, &[]), poly(Y, &[]));
    assert!(poly(X, &[0, 1]) != poly(Y, &[0, 1]));
    assert_eq!(Ordering::Equal, poly(X, &[5]).cmp(&poly(Y, &[5])));

    let hash = |f: &UnivariatePolynomial<BigRational>| {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        f.hash(&mut hasher);
        hasher.finish()
    };
    assert_eq!(hash(&poly(X, &[5])), hash(&poly(Y, &[5])));
}

#[test]
fn test_ordering() {
    LogAlgorithmSubscriber::init_test();
    let mut polys = vec![poly(Y, &[0, 1]), poly(X, &[1, 0, 1]), poly(X, &[2, 1]), poly(X, &[7]), poly(X, &[1, 1]), poly(X, &[-3])];
    polys.sort();
    assert_eq!(vec![poly(X, &[-3]), poly(X, &[7]), poly(X, &[1, 1]), poly(X, &[2, 1]), poly(X, &[1, 0, 1]), poly(Y, &[0, 1])], polys);
}

#[test]
fn test_ordering_main_variable_before_degree() {
    LogAlgorithmSubscriber::init_test();
    assert!(poly(X, &[0, 0, 0, 1]) < poly(Y, &[0, 1]));
    assert!(poly(Y, &[1, 1]) > poly(X, &[1, 0, 1]));
    assert!(poly(Y, &[5]) < poly(X, &[0, 1]));
    assert_eq!(Ordering::Equal, poly(Y, &[5]).cmp(&poly(X, &[5])));
}

#[test]
fn test_arithmetic() {
    LogAlgorithmSubscriber::init_test();
    let f = poly(X, &[1, 1]);
    let g = poly(X, &[-1, 1]);
    assert_eq!(poly(X, &[-1, 0, 1]), &f * &g);
    assert_eq!(poly(X, &[0, 2]), &f + &g);
    assert_eq!(poly(X, &[2]), &f - &g);
    assert_eq!(poly(X, &[-1, -1]), -f.clone());
    assert_eq!(poly(X, &[1, 3, 3, 1]), f.pow(3));
    assert_eq!(poly(X, &[1]), f.pow(0));
    assert_eq!(poly(X, &[3, 3]), &f * &poly(Y, &[3]));
    assert_eq!(X, (&poly(Y, &[3]) * &f).main_var());
    assert_eq!(poly(X, &[2, 2]), f.mul_scalar(&rational(2, 1)));
    assert_eq!(f, poly(X, &[2, 2]).div_scalar(&rational(2, 1)));
}

#[test]
#[should_panic]
fn test_arithmetic_different_variables() {
    let _ = &poly(X, &[0, 1]) + &poly(Y, &[0, 1]);
}

#[test]
fn test_evaluate() {
    LogAlgorithmSubscriber::init_test();
    let f = poly(X, &[1, -3, 0, 2]);
    assert_eq!(rational(1, 1), f.evaluate(&rational(0, 1)));
    assert_eq!(rational(11, 1), f.evaluate(&rational(2, 1)));
    assert_eq!(rational(1, 4) - rational(3, 2) + rational(1, 1), f.evaluate(&rational(1, 2)));
    assert_eq!(rational(0, 1), poly(X, &[]).evaluate(&rational(3, 1)));
}

#[test]
fn test_derivative() {
    LogAlgorithmSubscriber::init_test();
    let f = poly(X, &[1, -3, 0, 2]);
    assert_eq!(poly(X, &[-3, 0, 6]), f.derivative(1));
    assert_eq!(poly(X, &[0, 12]), f.derivative(2));
    assert_eq!(poly(X, &[12]), f.derivative(3));
    assert!(f.derivative(4).is_zero());
    assert_eq!(f, f.derivative(0));
}

#[test]
fn test_synthetic_division() {
    LogAlgorithmSubscriber::init_test();
    // (x - 1)^2 (x + 2)
    let mut f = poly(X, &[2, -3, 0, 1]);
    let original = f.clone();
    assert_eq!(rational(2, 1), f.synthetic_division(&rational(0, 1)));
    assert_eq!(original, f);
    assert!(f.synthetic_division(&rational(1, 1)).is_zero());
    assert_eq!(poly(X, &[-2, 1, 1]), f);
    assert!(f.synthetic_division(&rational(1, 1)).is_zero());
    assert_eq!(poly(X, &[2, 1]), f);
    assert_eq!(rational(3, 1), f.synthetic_division(&rational(1, 1)));
    assert_eq!(poly(X, &[2, 1]), f);

    let mut constant = poly(X, &[4]);
    assert_eq!(rational(4, 1), constant.synthetic_division(&rational(1, 1)));
    assert_eq!(poly(X, &[4]), constant);
}

#[test]
fn test_normalized() {
    LogAlgorithmSubscriber::init_test();
    let f = poly(X, &[1, 2, 4]);
    let normalized = f.normalized();
    assert!(normalized.lcoeff().is_one());
    assert_eq!(rational(1, 4), normalized.tcoeff());
    assert!(poly(X, &[]).normalized().is_zero());
}

#[test]
#[should_panic]
fn test_normalized_over_integers() {
    let f = UnivariatePolynomial::from_coefficients(X, vec![BigInt::from(1), BigInt::from(2)]);
    let _ = f.normalized();
}

#[test]
fn test_cauchy_bound() {
    LogAlgorithmSubscriber::init_test();
    assert_eq!(rational(3, 1), poly(X, &[-4, 0, 2]).cauchy_bound());
    assert_eq!(rational(2, 1), poly(X, &[-1, 1]).cauchy_bound());
    assert_eq!(rational(1, 1), poly(X, &[0, 0, 5]).cauchy_bound());
    let f = poly(X, &[-6, 1, 1]);
    let bound = f.cauchy_bound();
    for root in [rational(2, 1), rational(-3, 1)] {
        assert!(f.evaluate(&root).is_zero());
        assert!(root.abs() < bound);
    }
}

#[test]
fn test_coprime_factor() {
    LogAlgorithmSubscriber::init_test();
    let f = UnivariatePolynomial::from_coefficients(X, vec![rational(1, 2), rational(-3, 4), rational(0, 1), rational(5, 6)]);
    assert_eq!(rational(12, 1), f.coprime_factor());
    assert_eq!(
        UnivariatePolynomial::from_coefficients(X, [6, -9, 0, 10].into_iter().map(BigInt::from).collect()),
        f.coprime_coefficients()
    );
    assert_eq!(rational(1, 4), poly(X, &[4, -8, 12]).coprime_factor());
    assert_eq!(rational(1, 2), poly(X, &[-2, -2]).coprime_factor());
}

#[test]
fn test_modulo() {
    LogAlgorithmSubscriber::init_test();
    let f = UnivariatePolynomial::from_coefficients(X, [7, -8, 5].into_iter().map(BigInt::from).collect());
    let expected = UnivariatePolynomial::from_coefficients(X, [2, -3].into_iter().map(BigInt::from).collect());
    assert_eq!(expected, f.modulo(&BigInt::from(5)));
    let mut g = f.clone();
    g.modulo_assign(&BigInt::from(5));
    assert_eq!(expected, g);
}

#[test]
fn test_display() {
    LogAlgorithmSubscriber::init_test();
    assert_eq!("0", format!("{}", poly(X, &[])));
    assert_eq!("-3", format!("{}", poly(X, &[-3])));
    assert_eq!("x^3 - 2*x + 1", format!("{}", poly(X, &[1, -2, 0, 1])));
    assert_eq!("-x^2 + x", format!("{}", poly(X, &[0, 1, -1])));
    assert_eq!("1/2*y - 1", format!("{}", UnivariatePolynomial::from_coefficients(Y, vec![rational(-1, 1), rational(1, 2)])));
    assert_eq!("2*x + 3", format!("{}", UnivariatePolynomial::from_coefficients(X, vec![Fp::<5>::new(3), Fp::<5>::new(2)])));
}

#[test]
fn test_serialization_strips_zeros() {
    LogAlgorithmSubscriber::init_test();
    let f = poly(X, &[1, 0, -2]);
    let serialized = serde_json::to_string(&f).unwrap();
    let deserialized: UnivariatePolynomial<BigRational> = serde_json::from_str(&serialized).unwrap();
    assert_eq!(f, deserialized);

    let with_zeros = UnivariatePolynomial { main_var: X, coefficients: vec![rational(1, 1), rational(0, 1), rational(0, 1)] };
    let serialized = serde_json::to_string(&with_zeros).unwrap();
    let deserialized: UnivariatePolynomial<BigRational> = serde_json::from_str(&serialized).unwrap();
    assert_eq!(poly(X, &[1]), deserialized);
    assert_eq!(1, deserialized.coefficients().len());
}

#[test]
fn test_serialization_keeps_variable_name() {
    LogAlgorithmSubscriber::init_test();
    let f = poly(Y, &[1, 1]);
    let serialized = serde_json::to_string(&f).unwrap();
    let deserialized: UnivariatePolynomial<BigRational> = serde_json::from_str(&serialized).unwrap();
    assert_eq!(f, deserialized);
    assert_eq!("y + 1", format!("{}", deserialized));
    assert_eq!(format!("{}", f), format!("{}", deserialized));
}
