//! Memoized Values
//!
//! A lazy value runs its initializer on the first read and hands back the
//! cached result on every later read. The initializer is consumed by that
//! first read, so whatever it captured is released as soon as the value exists.
//!
//! | Type | Guard | Threads |
//! |------|-------|---------|
//! | [`Lazy`] | `OnceLock<T>` | Any: concurrent first reads block until the single initializer call finishes |
//! | [`UnsyncLazy`] | `OnceCell<T>` | Single-threaded only (`!Sync`) |
//!
//! If the initializer panics, the panic reaches the reader and the value is
//! poisoned: it stays uninitialized and every later read panics too.

use std::cell::{Cell, OnceCell};
use std::fmt;
use std::sync::{Mutex, OnceLock, PoisonError};

use crate::error::{PropertyError, Result};
use crate::property::Delegate;

const POISONED: &str = "lazy value poisoned: its initializer panicked";

/// A thread-safe memoized value.
///
/// # Example
///
/// ```
/// use delegates::Lazy;
/// use std::cell::Cell;
///
/// let calls = Cell::new(0);
/// let value = Lazy::new(|| {
///     calls.set(calls.get() + 1);
///     "Hello".to_string()
/// });
///
/// assert!(!value.is_initialized());
/// assert_eq!(value.get(), "Hello");
/// assert_eq!(value.get(), "Hello");
/// assert_eq!(calls.get(), 1);
/// ```
pub struct Lazy<T, F = fn() -> T> {
    cell: OnceLock<T>,
    init: Mutex<Option<F>>,
}

impl<T, F> Lazy<T, F>
where
    F: FnOnce() -> T,
{
    #[must_use]
    pub const fn new(init: F) -> Self {
        Self {
            cell: OnceLock::new(),
            init: Mutex::new(Some(init)),
        }
    }

    /// Returns the cached value, computing it on the first call.
    ///
    /// # Panics
    ///
    /// Panics if an earlier call's initializer panicked.
    pub fn get(&self) -> &T {
        self.cell.get_or_init(|| {
            let init = self
                .init
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take();
            match init {
                Some(init) => {
                    tracing::debug!("computing lazy value");
                    init()
                }
                None => panic!("{POISONED}"),
            }
        })
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Returns the value if it is already computed, without computing it.
    #[must_use]
    pub fn get_if_initialized(&self) -> Option<&T> {
        self.cell.get()
    }
}

impl<T: fmt::Debug, F> fmt::Debug for Lazy<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cell.get() {
            Some(value) => f.debug_tuple("Lazy").field(value).finish(),
            None => f.write_str("Lazy(<uninit>)"),
        }
    }
}

impl<T, F> Delegate for Lazy<T, F>
where
    T: Clone,
    F: FnOnce() -> T,
{
    type Value = T;

    fn get_value(&self, _name: &str) -> Result<T> {
        Ok(self.get().clone())
    }

    fn set_value(&mut self, name: &str, _value: T) -> Result<()> {
        Err(PropertyError::read_only(name))
    }
}

/// A memoized value for single-threaded owners.
///
/// Same contract as [`Lazy`] without the synchronization; the type is not
/// `Sync`, so the compiler keeps it on one thread.
pub struct UnsyncLazy<T, F = fn() -> T> {
    cell: OnceCell<T>,
    init: Cell<Option<F>>,
}

impl<T, F> UnsyncLazy<T, F>
where
    F: FnOnce() -> T,
{
    #[must_use]
    pub const fn new(init: F) -> Self {
        Self {
            cell: OnceCell::new(),
            init: Cell::new(Some(init)),
        }
    }

    /// # Panics
    ///
    /// Panics if an earlier call's initializer panicked.
    pub fn get(&self) -> &T {
        self.cell.get_or_init(|| match self.init.take() {
            Some(init) => {
                tracing::debug!("computing lazy value");
                init()
            }
            None => panic!("{POISONED}"),
        })
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<T: fmt::Debug, F> fmt::Debug for UnsyncLazy<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cell.get() {
            Some(value) => f.debug_tuple("UnsyncLazy").field(value).finish(),
            None => f.write_str("UnsyncLazy(<uninit>)"),
        }
    }
}

impl<T, F> Delegate for UnsyncLazy<T, F>
where
    T: Clone,
    F: FnOnce() -> T,
{
    type Value = T;

    fn get_value(&self, _name: &str) -> Result<T> {
        Ok(self.get().clone())
    }

    fn set_value(&mut self, name: &str, _value: T) -> Result<()> {
        Err(PropertyError::read_only(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::Property;
    use std::cell::Cell;
    use std::panic::{AssertUnwindSafe, catch_unwind};
    use std::rc::Rc;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing_test::traced_test;

    #[test]
    fn test_lazy_initializer_runs_once() {
        let calls = Cell::new(0);
        let lazy = UnsyncLazy::new(|| {
            calls.set(calls.get() + 1);
            "Hello".to_string()
        });

        assert_eq!(calls.get(), 0);
        for _ in 0..5 {
            assert_eq!(lazy.get(), "Hello");
        }
        assert_eq!(calls.get(), 1);
        assert!(lazy.is_initialized());
    }

    #[test]
    fn test_lazy_concurrent_first_reads() {
        let calls = AtomicUsize::new(0);
        let lazy = Lazy::new(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(std::time::Duration::from_millis(5));
            42_u64
        });

        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| assert_eq!(*lazy.get(), 42));
            }
        });

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_lazy_with_fn_pointer() {
        fn compute() -> Vec<i32> {
            vec![1, 2, 3]
        }

        static VALUES: Lazy<Vec<i32>> = Lazy::new(compute);
        assert_eq!(VALUES.get(), &vec![1, 2, 3]);
        assert!(VALUES.is_initialized());
    }

    #[test]
    fn test_lazy_get_if_initialized() {
        let lazy = Lazy::new(|| 7);
        assert_eq!(lazy.get_if_initialized(), None);
        lazy.get();
        assert_eq!(lazy.get_if_initialized(), Some(&7));
    }

    #[test]
    fn test_lazy_poisoned_after_panic() {
        let calls = Cell::new(0);
        let lazy: UnsyncLazy<&str, _> = UnsyncLazy::new(|| {
            calls.set(calls.get() + 1);
            panic!("first attempt fails");
        });

        let first = catch_unwind(AssertUnwindSafe(|| *lazy.get()));
        assert!(first.is_err());
        assert!(!lazy.is_initialized());

        let second = catch_unwind(AssertUnwindSafe(|| *lazy.get()));
        assert!(second.is_err());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_sync_lazy_poisoned_after_panic() {
        let lazy: Lazy<u8, _> = Lazy::new(|| panic!("boom"));
        assert!(catch_unwind(AssertUnwindSafe(|| *lazy.get())).is_err());
        assert!(catch_unwind(AssertUnwindSafe(|| *lazy.get())).is_err());
        assert!(!lazy.is_initialized());
    }

    #[test]
    fn test_unsync_lazy_releases_captures() {
        let big = Rc::new(vec![0u8; 1024]);
        let held = Rc::clone(&big);
        let lazy = UnsyncLazy::new(move || held.len());

        assert_eq!(Rc::strong_count(&big), 2);
        assert_eq!(*lazy.get(), 1024);
        assert_eq!(Rc::strong_count(&big), 1);
    }

    #[test]
    fn test_lazy_releases_captures() {
        let big = Arc::new(vec![0u8; 16]);
        let held = Arc::clone(&big);
        let lazy = Lazy::new(move || held.len());

        assert_eq!(*lazy.get(), 16);
        assert_eq!(Arc::strong_count(&big), 1);
    }

    #[test]
    fn test_lazy_moves_captured_state_out() {
        let values = vec![1, 2, 3];
        let lazy = Lazy::new(move || values);
        assert_eq!(lazy.get(), &vec![1, 2, 3]);

        let name = String::from("Hello");
        let unsync = UnsyncLazy::new(move || name);
        assert_eq!(unsync.get(), "Hello");
    }

    #[test]
    fn test_lazy_property_is_read_only() {
        let mut prop = Property::new("lazyValue", Lazy::new(|| "Hello".to_string()));
        assert_eq!(prop.get(), Ok("Hello".to_string()));
        assert_eq!(
            prop.set("other".to_string()),
            Err(PropertyError::read_only("lazyValue"))
        );
        assert_eq!(prop.get(), Ok("Hello".to_string()));
    }

    #[test]
    #[traced_test]
    fn test_lazy_computation_is_logged_once() {
        let lazy = Lazy::new(|| 1);
        assert!(!logs_contain("computing lazy value"));
        lazy.get();
        lazy.get();
        logs_assert(|lines: &[&str]| {
            match lines.iter().filter(|line| line.contains("computing lazy value")).count() {
                1 => Ok(()),
                n => Err(format!("expected one computation, saw {n}")),
            }
        });
    }

    #[test]
    fn test_lazy_debug() {
        let lazy = Lazy::new(|| 3);
        assert_eq!(format!("{lazy:?}"), "Lazy(<uninit>)");
        lazy.get();
        assert_eq!(format!("{lazy:?}"), "Lazy(3)");
    }
}
