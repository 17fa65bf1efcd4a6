//! Feature-gated Send/Sync marker traits for expression bounds.
//!
//! With the `parallel` feature, [`MaybeSync`] is [`Sync`] and
//! [`MaybeSendSync`] is [`Send`] + [`Sync`], so reductions and
//! materialization can hand expressions to the rayon pool.
//!
//! Without it, both traits are implemented for every type and expressions
//! over non-thread-safe closures or sources are accepted.

// ---- parallel enabled: alias to real Send/Sync ----

#[cfg(feature = "parallel")]
pub trait MaybeSync: Sync {}
#[cfg(feature = "parallel")]
impl<T: Sync> MaybeSync for T {}

#[cfg(feature = "parallel")]
pub trait MaybeSendSync: Send + Sync {}
#[cfg(feature = "parallel")]
impl<T: Send + Sync> MaybeSendSync for T {}

// ---- parallel disabled: blanket impl for all types ----

#[cfg(not(feature = "parallel"))]
pub trait MaybeSync {}
#[cfg(not(feature = "parallel"))]
impl<T> MaybeSync for T {}

#[cfg(not(feature = "parallel"))]
pub trait MaybeSendSync {}
#[cfg(not(feature = "parallel"))]
impl<T> MaybeSendSync for T {}
