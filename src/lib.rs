#![allow(non_snake_case)]
#![doc = include_str!("../Readme.md")]

///
/// Contains [`computation::ComputationController`], the collaborator through which
/// long-running algorithms report their progress.
///
#[macro_use]
pub mod computation;
///
/// Contains [`tracing::LogAlgorithmSubscriber`], a subscriber for the diagnostics
/// emitted through the `tracing` crate, with hierarchical per-channel filters.
///
pub mod tracing;
///
/// Contains the traits describing the coefficient domains of polynomials, in
/// particular [`coefficient::Coefficient`].
///
pub mod coefficient;
///
/// Contains [`variable::Variable`], the indeterminate of a univariate polynomial.
///
pub mod variable;
///
/// Contains implementations of the coefficient traits for concrete number types,
/// and the univariate polynomial type [`rings::poly::UnivariatePolynomial`].
///
pub mod rings;
///
/// Contains the algorithms working on [`rings::poly::UnivariatePolynomial`], like
/// division, gcds and factorization.
///
pub mod algorithms;
///
/// Contains [`cache::Cache`], a reference-counted hash-consing store.
///
pub mod cache;
///
/// Contains [`factorized::FactorizedPolynomial`], polynomials represented as cached
/// products of factors.
///
pub mod factorized;

///
/// The bound on the absolute value of leading and trailing coefficients up to which
/// [`rings::poly::UnivariatePolynomial::factorization()`] searches for rational roots.
///
pub const DEFAULT_LINEAR_FACTOR_BOUND: u64 = i32::MAX as u64;

///
/// The number of slots with usage count zero that a [`cache::Cache`] keeps before it
/// starts reclaiming them, unless configured otherwise.
///
pub const DEFAULT_MAX_UNUSED_SLOTS: usize = 1024;

#[cfg(test)]
const RANDOM_TEST_INSTANCE_COUNT: usize = 10;
