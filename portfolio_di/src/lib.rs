//! Minimal compile-time dependency injection.
//!
//! Services are generic over their dependencies and derive [`Build`]. A
//! provider declared with [`provider!`] owns the leaf values (configs,
//! connections) and caches every built service by type, so each service is
//! constructed at most once per provider.

pub use portfolio_di_derive::Build;
pub use typemap::TypeMap;

mod macros;
mod typemap;

pub trait Provider: Sized {
    fn cache(&mut self) -> &mut TypeMap;
}

#[diagnostic::on_unimplemented(
    message = "The type `{Self}` cannot be built using the provider `{P}`",
    note = "Add `{Self}` to the provider `{P}` or implement `Build` for `{Self}` and make sure \
            all dependencies are satisfied"
)]
pub trait Build<P: Provider>: Clone + 'static {
    fn build(provider: &mut P) -> Self;
}

pub trait Provide: Provider {
    fn provide<T: Build<Self>>(&mut self) -> T {
        T::build(self)
    }
}

impl<P: Provider> Provide for P {}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use super::*;

    #[derive(Debug, Clone)]
    struct Counter(Arc<AtomicUsize>);

    #[derive(Debug, Clone)]
    struct Leaf(usize);

    impl Build<TestProvider> for Leaf {
        fn build(provider: &mut TestProvider) -> Self {
            if let Some(cached) = provider.cache().get::<Self>() {
                return cached.clone();
            }
            let leaf = Self(provider.counter.0.fetch_add(1, Ordering::Relaxed));
            provider.cache().insert(leaf.clone());
            leaf
        }
    }

    crate::provider! {
        TestProvider {
            counter: Counter,
        }
    }

    #[test]
    fn cached_by_type() {
        let mut provider = TestProvider {
            _cache: Default::default(),
            counter: Counter(Default::default()),
        };

        let a: Leaf = provider.provide();
        let b: Leaf = provider.provide();

        assert_eq!(a.0, 0);
        assert_eq!(b.0, 0);
        assert_eq!(provider.counter.0.load(Ordering::Relaxed), 1);
    }
}
