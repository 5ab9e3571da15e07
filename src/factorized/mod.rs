use std::cmp::Ordering;
use std::fmt::{Debug, Display};
use std::sync::{Arc, Weak};

use tracing::{event, Level};

use crate::cache::{Cache, CacheRef};
use crate::coefficient::*;
use crate::rings::poly::UnivariatePolynomial;
use crate::variable::Variable;

///
/// Contains [`PolynomialFactorizationPair`], the object stored in the cache.
///
pub mod pair;
///
/// Contains the arithmetic of [`FactorizedPolynomial`]s, i.e. products, sums and the
/// factorization-aware divisibility operations.
///
pub mod ops;

pub use pair::{Factorization, PolynomialFactorizationPair};

///
/// The cache in which the polynomials of [`FactorizedPolynomial`]s are stored.
///
pub type FactorizationCache<C> = Cache<PolynomialFactorizationPair<C>>;

///
/// A univariate polynomial over the rationals that is stored as a coefficient times a
/// primitive polynomial, where the primitive polynomial lives in a shared [`FactorizationCache`]
/// together with a partial factorization of it.
///
/// Equal primitive polynomials are stored only once in the cache, and all handles to them
/// share the factorization. Whenever more is learned about the factors of a polynomial
/// (e.g. during [`ops::gcd()`]), the cached factorization is refined, which benefits all
/// handles to it.
///
/// Constants (including zero) are represented by their coefficient only, and do not use
/// a cache entry.
///
/// Handles created by the user keep their cache alive. Handles that are stored within the
/// factorizations of the cache only hold a weak reference to it, thus a cache is freed once
/// the last handle and the last [`Arc`] outside of it are dropped.
///
/// # Example
/// ```
/// # use std::sync::Arc;
/// # use factorized_poly::variable::*;
/// # use factorized_poly::rings::poly::*;
/// # use factorized_poly::rings::rational::*;
/// # use factorized_poly::factorized::*;
/// let x = Variable::new(0, "x");
/// let poly = |coefficients: [i64; 3]| UnivariatePolynomial::from_coefficients(x, coefficients.iter().map(|c| rational(*c, 1)).collect());
/// let cache = Arc::new(FactorizationCache::new());
/// let f = FactorizedPolynomial::from_polynomial(&cache, &poly([-1, 0, 1]));
/// let g = FactorizedPolynomial::from_polynomial(&cache, &poly([1, 2, 1]));
/// let (d, _, _) = ops::gcd(&f, &g);
/// assert_eq!("x + 1", format!("{}", d));
/// // the gcd computation has split up both operands
/// assert_eq!(2, f.factorization().len());
/// assert_eq!(1, g.factorization().len());
/// ```
///
pub struct FactorizedPolynomial<C: RationalCoefficient> {
    cache: CacheLink<C>,
    cache_ref: Option<CacheRef>,
    coefficient: C,
    main_var: Variable,
    /// the handle a polynomial holds to itself within its cached factorization does not
    /// register a usage, since it would otherwise keep its own entry alive
    owned: bool
}

///
/// The reference of a [`FactorizedPolynomial`] to its cache. It is weak for handles that are
/// stored in a factorization within the cache, since the cache would otherwise own itself.
///
enum CacheLink<C: RationalCoefficient> {
    Owning(Arc<FactorizationCache<C>>),
    Stored(Weak<FactorizationCache<C>>)
}

impl<C: RationalCoefficient> CacheLink<C> {

    fn as_ptr(&self) -> *const FactorizationCache<C> {
        match self {
            CacheLink::Owning(cache) => Arc::as_ptr(cache),
            CacheLink::Stored(cache) => Weak::as_ptr(cache)
        }
    }

    fn downgrade(&self) -> Weak<FactorizationCache<C>> {
        match self {
            CacheLink::Owning(cache) => Arc::downgrade(cache),
            CacheLink::Stored(cache) => cache.clone()
        }
    }

    ///
    /// Returns the cache, or `None` if it is already being dropped.
    ///
    fn upgrade(&self) -> Option<Arc<FactorizationCache<C>>> {
        match self {
            CacheLink::Owning(cache) => Some(cache.clone()),
            CacheLink::Stored(cache) => cache.upgrade()
        }
    }
}

impl<C: RationalCoefficient> FactorizedPolynomial<C> {

    pub fn constant(cache: &Arc<FactorizationCache<C>>, main_var: Variable, coefficient: C) -> Self {
        FactorizedPolynomial {
            cache: CacheLink::Owning(cache.clone()),
            cache_ref: None,
            coefficient,
            main_var,
            owned: true
        }
    }

    pub fn zero(cache: &Arc<FactorizationCache<C>>, main_var: Variable) -> Self {
        Self::constant(cache, main_var, C::zero())
    }

    pub fn one(cache: &Arc<FactorizationCache<C>>, main_var: Variable) -> Self {
        Self::constant(cache, main_var, C::one())
    }

    ///
    /// Creates a handle that takes over one already registered usage of `r`.
    ///
    fn registered(cache: &Arc<FactorizationCache<C>>, r: CacheRef, coefficient: C, main_var: Variable) -> Self {
        FactorizedPolynomial {
            cache: CacheLink::Owning(cache.clone()),
            cache_ref: Some(r),
            coefficient,
            main_var,
            owned: true
        }
    }

    fn self_reference(&self) -> Self {
        FactorizedPolynomial {
            cache: CacheLink::Stored(self.cache.downgrade()),
            cache_ref: self.cache_ref,
            coefficient: C::one(),
            main_var: self.main_var,
            owned: false
        }
    }

    ///
    /// Turns this handle into one that may be stored in a factorization within its own cache.
    ///
    fn into_stored(mut self) -> Self {
        if let CacheLink::Owning(cache) = &self.cache {
            let weak = Arc::downgrade(cache);
            self.cache = CacheLink::Stored(weak);
        }
        return self;
    }

    fn into_stored_factorization(factorization: Factorization<C>) -> Factorization<C> {
        factorization.into_iter().map(|(factor, multiplicity)| (factor.into_stored(), multiplicity)).collect()
    }

    ///
    /// Stores the primitive part of `polynomial` in the cache, and returns a handle to it.
    /// If the primitive part has not been cached before, its factorization consists of only
    /// itself.
    ///
    pub fn from_polynomial(cache: &Arc<FactorizationCache<C>>, polynomial: &UnivariatePolynomial<C>) -> Self {
        let main_var = polynomial.main_var();
        if polynomial.is_constant() {
            return Self::constant(cache, main_var, polynomial.lcoeff());
        }
        let factor = polynomial.coprime_factor();
        let primitive = polynomial.mul_scalar(&factor);
        let coefficient = C::one().div_exact(&factor);
        let (r, inserted) = cache.cache(PolynomialFactorizationPair::new(Factorization::new(), primitive));
        let result = Self::registered(cache, r, coefficient, main_var);
        if inserted {
            // a polynomial can only refer to itself once it is cached
            let mut factorization = Factorization::new();
            factorization.insert(result.self_reference(), 1);
            let previous = cache.modify(r, |pair| pair.replace_factorization(factorization));
            drop(previous);
            cache.rehash(r);
            event!(Level::TRACE, index = r.index(), degree = polynomial.degree(), "factorized_polynomial_cached");
        }
        return result;
    }

    ///
    /// Creates the polynomial `coefficient * prod f^k`, where `(f, k)` runs through the given
    /// factorization. All factors must be stored in `cache`.
    ///
    /// If the resulting polynomial is already cached and its cached factorization consists
    /// only of itself, the cached factorization is replaced by the given one.
    ///
    pub fn from_factorization(cache: &Arc<FactorizationCache<C>>, main_var: Variable, factorization: Factorization<C>, coefficient: C) -> Self {
        let mut total_coefficient = coefficient;
        let mut normalized = Factorization::new();
        for (factor, multiplicity) in factorization {
            assert!(factor.cache.as_ptr() == Arc::as_ptr(cache), "factors must be stored in the given cache");
            assert!(multiplicity > 0, "factors must have positive multiplicity");
            total_coefficient = total_coefficient * factor.coefficient.pow(multiplicity);
            if !factor.is_constant() {
                *normalized.entry(factor.primitive()).or_insert(0) += multiplicity;
            }
        }
        if total_coefficient.is_zero() {
            return Self::zero(cache, main_var);
        }
        if normalized.is_empty() {
            return Self::constant(cache, main_var, total_coefficient);
        }
        if normalized.len() == 1 && normalized.values().all(|multiplicity| *multiplicity == 1) {
            if let Some((factor, _)) = normalized.pop_first() {
                return factor.with_coefficient(total_coefficient);
            }
        }
        let mut polynomial = UnivariatePolynomial::one(main_var);
        for (factor, multiplicity) in &normalized {
            polynomial = &polynomial * &factor.polynomial().pow(*multiplicity);
        }
        let main_var = polynomial.main_var();
        let refinement = normalized.clone();
        let (r, inserted) = cache.cache(PolynomialFactorizationPair::new(Self::into_stored_factorization(normalized), polynomial));
        let result = Self::registered(cache, r, total_coefficient, main_var);
        if !inserted {
            result.refine_factorization(refinement);
        }
        debug_assert!({
            let pair = cache.get(r);
            pair.expand_factorization() == *pair.polynomial()
        });
        return result;
    }

    ///
    /// Replaces the cached factorization by `factorization`, if the current one consists
    /// only of the polynomial itself. The product of `factorization` must equal the cached
    /// polynomial exactly.
    ///
    /// Returns whether the factorization was replaced. It is not replaced if the cached
    /// content is currently accessed by someone else.
    ///
    fn refine_factorization(&self, factorization: Factorization<C>) -> bool {
        let r = match self.cache_ref {
            Some(r) => r,
            None => return false
        };
        let cache = self.cache();
        let pair = cache.get(r);
        let trivial = pair.is_trivial(r);
        drop(pair);
        if !trivial {
            return false;
        }
        debug_assert!({
            let mut product = UnivariatePolynomial::one(self.main_var);
            for (factor, multiplicity) in &factorization {
                product = &product * &factor.content().pow(*multiplicity);
            }
            product == self.polynomial()
        });
        let factor_count = factorization.len();
        let factorization = Self::into_stored_factorization(factorization);
        match cache.try_modify(r, |pair| pair.replace_factorization(factorization)) {
            Some(previous) => {
                drop(previous);
                cache.rehash(r);
                event!(Level::DEBUG, index = r.index(), factors = factor_count, "factorization_refined");
                return true;
            },
            None => return false
        }
    }

    fn with_coefficient(self, coefficient: C) -> Self {
        let mut result = self;
        result.coefficient = coefficient;
        return result;
    }

    ///
    /// Returns the polynomial with the same cache entry, but coefficient one.
    ///
    pub fn primitive(&self) -> Self {
        let cache = self.cache();
        match self.cache_ref {
            None => Self::one(&cache, self.main_var),
            Some(r) => {
                cache.reg(r);
                Self::registered(&cache, r, C::one(), self.main_var)
            }
        }
    }

    ///
    /// Replaces this polynomial by `other`, which must use the same cache.
    ///
    pub fn assign(&mut self, other: &Self) {
        assert!(self.uses_same_cache(other), "factorized polynomials use different caches");
        *self = other.clone();
    }

    pub fn coefficient(&self) -> &C {
        &self.coefficient
    }

    pub fn main_var(&self) -> Variable {
        self.main_var
    }

    ///
    /// Returns the cache in which the polynomial is stored.
    ///
    /// # Panics
    ///
    /// Panics if this handle was taken from a factorization that outlived its cache.
    ///
    pub fn cache(&self) -> Arc<FactorizationCache<C>> {
        match self.cache.upgrade() {
            Some(cache) => cache,
            None => panic!("the cache of a stored factor has already been dropped")
        }
    }

    pub fn uses_same_cache(&self, other: &Self) -> bool {
        self.cache.as_ptr() == other.cache.as_ptr()
    }

    pub fn cache_ref(&self) -> Option<CacheRef> {
        self.cache_ref
    }

    ///
    /// Returns the primitive polynomial stored in the cache, or one if this is a constant.
    ///
    pub fn polynomial(&self) -> UnivariatePolynomial<C> {
        match self.cache_ref {
            None => UnivariatePolynomial::one(self.main_var),
            Some(r) => self.cache().get(r).polynomial().clone()
        }
    }

    ///
    /// Returns the cached factorization of the primitive part. Together with [`FactorizedPolynomial::coefficient()`],
    /// it determines the polynomial.
    ///
    pub fn factorization(&self) -> Factorization<C> {
        match self.cache_ref {
            None => Factorization::new(),
            Some(r) => self.cache().get(r).factorization().clone()
        }
    }

    ///
    /// Returns the expanded polynomial, i.e. the coefficient times the cached polynomial.
    ///
    pub fn content(&self) -> UnivariatePolynomial<C> {
        match self.cache_ref {
            None => UnivariatePolynomial::constant(self.main_var, self.coefficient.clone()),
            Some(r) => self.cache().get(r).polynomial().mul_scalar(&self.coefficient)
        }
    }

    pub fn is_zero(&self) -> bool {
        self.cache_ref.is_none() && self.coefficient.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.cache_ref.is_none() && self.coefficient.is_one()
    }

    pub fn is_constant(&self) -> bool {
        self.cache_ref.is_none()
    }

    ///
    /// Raises the priority of the cache entry of this polynomial to remain in the cache,
    /// once it is no longer used.
    ///
    pub fn strengthen_activity(&self) {
        if let Some(r) = self.cache_ref {
            self.cache().strengthen_activity(r);
        }
    }
}

impl<C: RationalCoefficient> Clone for FactorizedPolynomial<C> {

    fn clone(&self) -> Self {
        let cache = self.cache();
        if let Some(r) = self.cache_ref {
            cache.reg(r);
        }
        FactorizedPolynomial {
            cache: CacheLink::Owning(cache),
            cache_ref: self.cache_ref,
            coefficient: self.coefficient.clone(),
            main_var: self.main_var,
            owned: true
        }
    }
}

impl<C: RationalCoefficient> Drop for FactorizedPolynomial<C> {

    fn drop(&mut self) {
        if let (true, Some(r)) = (self.owned, self.cache_ref) {
            // a stored factor is dropped without deregistration if the whole cache is dropped
            if let Some(cache) = self.cache.upgrade() {
                cache.dereg(r);
            }
        }
    }
}

impl<C: RationalCoefficient> PartialEq for FactorizedPolynomial<C> {

    fn eq(&self, other: &Self) -> bool {
        if self.cache_ref == other.cache_ref && self.uses_same_cache(other) && self.coefficient == other.coefficient {
            return true;
        }
        return self.content() == other.content();
    }
}

impl<C: RationalCoefficient> Eq for FactorizedPolynomial<C> {}

impl<C: RationalCoefficient> PartialOrd for FactorizedPolynomial<C> {

    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: RationalCoefficient> Ord for FactorizedPolynomial<C> {

    fn cmp(&self, other: &Self) -> Ordering {
        self.content().cmp(&other.content())
    }
}

impl<C: RationalCoefficient> Display for FactorizedPolynomial<C> {

    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content())
    }
}

impl<C: RationalCoefficient> Debug for FactorizedPolynomial<C> {

    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.coefficient)?;
        for (factor, multiplicity) in self.factorization() {
            write!(f, " * ({})^{}", factor.content(), multiplicity)?;
        }
        return Ok(());
    }
}

#[cfg(test)]
use num_rational::BigRational;
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

#[test]
fn test_from_polynomial() {
    LogAlgorithmSubscriber::init_test();
    let cache = Arc::new(FactorizationCache::new());
    // 1/2 x^2 - 1/2
    let f = FactorizedPolynomial::from_polynomial(&cache, &poly(&[-1, 0, 1]).div_scalar(&rational(2, 1)));
    assert_eq!(&rational(1, 2), f.coefficient());
    assert_eq!(poly(&[-1, 0, 1]), f.polynomial());
    assert_eq!(poly(&[-1, 0, 1]).div_scalar(&rational(2, 1)), f.content());
    assert_eq!(1, f.factorization().len());
    assert_eq!(Some(&1), f.factorization().get(&f.primitive()));
    assert_eq!(1, cache.len());
    assert_eq!(1, cache.usage(f.cache_ref().unwrap()));
}

#[test]
fn test_from_polynomial_constant() {
    LogAlgorithmSubscriber::init_test();
    let cache = Arc::new(FactorizationCache::new());
    let zero = FactorizedPolynomial::from_polynomial(&cache, &poly(&[]));
    assert!(zero.is_zero());
    assert!(zero.is_constant());
    assert!(zero.factorization().is_empty());
    let three = FactorizedPolynomial::from_polynomial(&cache, &poly(&[3]));
    assert!(three.is_constant() && !three.is_zero() && !three.is_one());
    assert_eq!(&rational(3, 1), three.coefficient());
    assert_eq!(poly(&[3]), three.content());
    assert!(FactorizedPolynomial::one(&cache, X).is_one());
    assert_eq!(0, cache.len());
}

#[test]
fn test_same_polynomial_shares_entry() {
    LogAlgorithmSubscriber::init_test();
    let cache = Arc::new(FactorizationCache::new());
    let f = FactorizedPolynomial::from_polynomial(&cache, &poly(&[0, 2]));
    let g = FactorizedPolynomial::from_polynomial(&cache, &poly(&[0, 2]));
    let h = FactorizedPolynomial::from_polynomial(&cache, &poly(&[0, -3]));
    assert_eq!(f.cache_ref(), g.cache_ref());
    assert!(f == g);
    assert!(f != h);
    let r = f.cache_ref().unwrap();
    assert_eq!(2, cache.usage(r));
    // -3x and 2x differ in their primitive part x and -x
    assert!(h.cache_ref() != f.cache_ref());
    assert_eq!(2, cache.len());
}

#[test]
fn test_usage_tracks_handles() {
    LogAlgorithmSubscriber::init_test();
    let cache = Arc::new(FactorizationCache::new());
    let f = FactorizedPolynomial::from_polynomial(&cache, &poly(&[1, 0, 1]));
    let r = f.cache_ref().unwrap();
    let g = f.clone();
    let mut h = FactorizedPolynomial::one(&cache, X);
    h.assign(&g);
    assert_eq!(3, cache.usage(r));
    drop(f);
    drop(g);
    assert_eq!(1, cache.usage(r));
    drop(h);
    assert_eq!(0, cache.usage(r));
    assert_eq!(1, cache.unused_len());
    cache.clean();
    assert_eq!(0, cache.len());
}

#[test]
fn test_clean_reclaims_factors() {
    LogAlgorithmSubscriber::init_test();
    let cache = Arc::new(FactorizationCache::new());
    let f = FactorizedPolynomial::from_polynomial(&cache, &poly(&[-1, 1]));
    let g = FactorizedPolynomial::from_polynomial(&cache, &poly(&[1, 1]));
    let product = &f * &g;
    assert_eq!(3, cache.len());
    drop(f);
    drop(g);
    let factor_ref = product.factorization().keys().next().unwrap().cache_ref().unwrap();
    // the factors are still used by the factorization of the product
    assert_eq!(1, cache.usage(factor_ref));
    drop(product);
    cache.clean();
    assert_eq!(0, cache.len());
    assert_eq!(1, Arc::strong_count(&cache));
}

#[test]
fn test_cache_freed_with_last_handle() {
    LogAlgorithmSubscriber::init_test();
    let cache = Arc::new(FactorizationCache::new());
    let weak_cache = Arc::downgrade(&cache);
    let f = FactorizedPolynomial::from_polynomial(&cache, &poly(&[-1, 0, 1]));
    let g = FactorizedPolynomial::from_polynomial(&cache, &poly(&[1, 2, 1]));
    let (d, f_rest, g_rest) = ops::gcd(&f, &g);
    let product = &f * &g;
    drop(cache);
    // the handles outside of the cache keep it alive
    assert!(weak_cache.upgrade().is_some());
    assert_eq!(2, f.factorization().len());
    drop(f);
    drop(g);
    drop(d);
    drop(f_rest);
    drop(g_rest);
    assert!(weak_cache.upgrade().is_some());
    drop(product);
    assert!(weak_cache.upgrade().is_none());
}

#[test]
fn test_from_factorization() {
    LogAlgorithmSubscriber::init_test();
    let cache = Arc::new(FactorizationCache::new());
    let f = FactorizedPolynomial::from_polynomial(&cache, &poly(&[-2, 2]));
    let g = FactorizedPolynomial::from_polynomial(&cache, &poly(&[1, 1]));
    let mut factorization = Factorization::new();
    factorization.insert(f.clone(), 2);
    factorization.insert(g.clone(), 1);
    // 3 (2x - 2)^2 (x + 1)
    let product = FactorizedPolynomial::from_factorization(&cache, X, factorization, rational(3, 1));
    assert_eq!(&rational(12, 1), product.coefficient());
    assert_eq!(&(&poly(&[-2, 2]).pow(2) * &poly(&[1, 1])).mul_scalar(&rational(3, 1)), &product.content());
    let factorization = product.factorization();
    assert_eq!(2, factorization.len());
    assert_eq!(Some(&2), factorization.get(&f.primitive()));
    assert_eq!(Some(&1), factorization.get(&g));

    // a single factor reuses the entry of the factor
    let mut factorization = Factorization::new();
    factorization.insert(f.clone(), 1);
    let single = FactorizedPolynomial::from_factorization(&cache, X, factorization, rational(1, 3));
    assert_eq!(f.cache_ref(), single.cache_ref());
    assert_eq!(&rational(2, 3), single.coefficient());

    assert!(FactorizedPolynomial::from_factorization(&cache, X, Factorization::new(), rational(5, 1)).is_constant());
    let mut factorization = Factorization::new();
    factorization.insert(g.clone(), 1);
    assert!(FactorizedPolynomial::from_factorization(&cache, X, factorization, rational(0, 1)).is_zero());
}

#[test]
fn test_from_factorization_refines_cached() {
    LogAlgorithmSubscriber::init_test();
    let cache = Arc::new(FactorizationCache::new());
    let f = FactorizedPolynomial::from_polynomial(&cache, &poly(&[-1, 0, 1]));
    assert_eq!(1, f.factorization().len());
    let mut factorization = Factorization::new();
    factorization.insert(FactorizedPolynomial::from_polynomial(&cache, &poly(&[-1, 1])), 1);
    factorization.insert(FactorizedPolynomial::from_polynomial(&cache, &poly(&[1, 1])), 1);
    let g = FactorizedPolynomial::from_factorization(&cache, X, factorization, rational(1, 1));
    assert_eq!(f.cache_ref(), g.cache_ref());
    assert_eq!(2, f.factorization().len());
    assert_eq!(poly(&[-1, 0, 1]), f.content());
}

#[test]
fn test_ordering_and_equality() {
    LogAlgorithmSubscriber::init_test();
    let cache = Arc::new(FactorizationCache::new());
    let f = FactorizedPolynomial::from_polynomial(&cache, &poly(&[1, 1]));
    let f_scaled = FactorizedPolynomial::from_polynomial(&cache, &poly(&[2, 2]));
    let g = FactorizedPolynomial::from_polynomial(&cache, &poly(&[1, 0, 1]));
    let c = FactorizedPolynomial::constant(&cache, X, rational(7, 1));
    assert_eq!(f.cache_ref(), f_scaled.cache_ref());
    assert!(f != f_scaled);
    assert_eq!(f.content().cmp(&f_scaled.content()), f.cmp(&f_scaled));
    assert_eq!(f.content().cmp(&g.content()), f.cmp(&g));
    assert!(c < f);
    assert!(f == f.clone());
}

#[test]
fn test_display() {
    LogAlgorithmSubscriber::init_test();
    let cache = Arc::new(FactorizationCache::new());
    let f = FactorizedPolynomial::from_polynomial(&cache, &poly(&[-3, 0, 3]));
    assert_eq!("3*x^2 - 3", format!("{}", f));
    assert_eq!("3 * (x^2 - 1)^1", format!("{:?}", f));
    assert_eq!("0", format!("{}", FactorizedPolynomial::zero(&cache, X)));
}

#[test]
fn test_strengthen_activity_keeps_entry() {
    LogAlgorithmSubscriber::init_test();
    let cache = Arc::new(FactorizationCache::with_max_unused(2));
    let f = FactorizedPolynomial::from_polynomial(&cache, &poly(&[1, 1]));
    let g = FactorizedPolynomial::from_polynomial(&cache, &poly(&[2, 1]));
    let h = FactorizedPolynomial::from_polynomial(&cache, &poly(&[3, 1]));
    f.strengthen_activity();
    let f_ref = f.cache_ref().unwrap();
    drop(f);
    drop(g);
    assert_eq!(3, cache.len());
    drop(h);
    // three unused entries exceed the limit, the two less active ones are reclaimed
    assert_eq!(1, cache.len());
    assert_eq!(0, cache.usage(f_ref));
}
