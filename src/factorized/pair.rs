use std::collections::BTreeMap;
use std::fmt::Debug;
use std::hash::{Hash, Hasher};

use crate::cache::CacheRef;
use crate::coefficient::RationalCoefficient;
use crate::factorized::FactorizedPolynomial;
use crate::rings::poly::UnivariatePolynomial;

///
/// A factorization, as map from factors to their multiplicity. All factors stored in a
/// [`PolynomialFactorizationPair`] have coefficient one, and their polynomial is primitive.
///
pub type Factorization<C> = BTreeMap<FactorizedPolynomial<C>, usize>;

///
/// The object stored in the cache that backs [`FactorizedPolynomial`]s. It contains a
/// primitive polynomial, together with a (not necessarily complete) factorization of it.
///
/// Two pairs are considered equal if their polynomials are equal, the factorization
/// is ignored. Thus, the factorization of a cached pair can be refined without changing
/// its identity.
///
pub struct PolynomialFactorizationPair<C: RationalCoefficient> {
    factorization: Factorization<C>,
    polynomial: UnivariatePolynomial<C>
}

impl<C: RationalCoefficient> PolynomialFactorizationPair<C> {

    pub(crate) fn new(factorization: Factorization<C>, polynomial: UnivariatePolynomial<C>) -> Self {
        PolynomialFactorizationPair { factorization, polynomial }
    }

    pub fn factorization(&self) -> &Factorization<C> {
        &self.factorization
    }

    pub fn polynomial(&self) -> &UnivariatePolynomial<C> {
        &self.polynomial
    }

    ///
    /// Replaces the factorization and returns the previous one.
    ///
    /// This is called while the owning cache is locked, thus the returned value must
    /// only be dropped after [`crate::cache::Cache::try_modify()`] returned.
    ///
    pub(crate) fn replace_factorization(&mut self, factorization: Factorization<C>) -> Factorization<C> {
        std::mem::replace(&mut self.factorization, factorization)
    }

    ///
    /// Checks whether the stored factorization consists only of the polynomial itself,
    /// where `own_ref` is the entry of this pair in its cache.
    ///
    pub fn is_trivial(&self, own_ref: CacheRef) -> bool {
        match self.factorization.first_key_value() {
            Some((factor, &1)) => self.factorization.len() == 1 && factor.cache_ref == Some(own_ref),
            _ => false
        }
    }

    ///
    /// Computes the product of all factors, raised to their multiplicities. For a consistent
    /// pair, this equals the stored polynomial.
    ///
    /// This accesses the cache, and thus must not be called while it is locked.
    ///
    #[stability::unstable(feature = "enable")]
    pub fn expand_factorization(&self) -> UnivariatePolynomial<C> {
        let mut result = UnivariatePolynomial::one(self.polynomial.main_var());
        for (factor, multiplicity) in &self.factorization {
            result = &result * &factor.content().pow(*multiplicity);
        }
        return result;
    }
}

impl<C: RationalCoefficient> PartialEq for PolynomialFactorizationPair<C> {

    fn eq(&self, other: &Self) -> bool {
        self.polynomial == other.polynomial
    }
}

impl<C: RationalCoefficient> Eq for PolynomialFactorizationPair<C> {}

impl<C: RationalCoefficient> Hash for PolynomialFactorizationPair<C> {

    fn hash<H: Hasher>(&self, state: &mut H) {
        self.polynomial.hash(state)
    }
}

impl<C: RationalCoefficient> Debug for PolynomialFactorizationPair<C> {

    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} with {} factors", self.polynomial, self.factorization.len())
    }
}

#[cfg(test)]
use std::collections::hash_map::DefaultHasher;
#[cfg(test)]
use std::sync::Arc;
#[cfg(test)]
use num_rational::BigRational;
#[cfg(test)]
use crate::cache::Cache;
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
fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    return hasher.finish();
}

#[test]
fn test_pair_identity_ignores_factorization() {
    LogAlgorithmSubscriber::init_test();
    let cache = Arc::new(Cache::new());
    let factor = FactorizedPolynomial::from_polynomial(&cache, &poly(&[1, 1]));
    let mut factorization = Factorization::new();
    factorization.insert(factor, 2);

    let refined = PolynomialFactorizationPair::new(factorization, poly(&[1, 2, 1]));
    let unrefined = PolynomialFactorizationPair::new(Factorization::new(), poly(&[1, 2, 1]));
    assert!(refined == unrefined);
    assert_eq!(hash_of(&refined), hash_of(&unrefined));
    assert!(refined != PolynomialFactorizationPair::new(Factorization::new(), poly(&[1, 1])));
    assert_eq!(poly(&[1, 2, 1]), refined.expand_factorization());
}

#[test]
fn test_pair_is_trivial() {
    LogAlgorithmSubscriber::init_test();
    let cache = Arc::new(Cache::new());
    let f = FactorizedPolynomial::from_polynomial(&cache, &poly(&[-1, 0, 1]));
    let r = f.cache_ref().unwrap();
    assert!(cache.get(r).is_trivial(r));
    assert_eq!(poly(&[-1, 0, 1]), cache.get(r).expand_factorization());

    let g = FactorizedPolynomial::from_polynomial(&cache, &poly(&[1, 1]));
    let product = &f * &g;
    let product_ref = product.cache_ref().unwrap();
    assert!(!cache.get(product_ref).is_trivial(product_ref));
    assert!(!cache.get(product_ref).is_trivial(r));
}
