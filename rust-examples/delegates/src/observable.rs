//! Observable and Vetoable Values
//!
//! Both wrap a plain value and put a hook around writes:
//!
//! | Type | Hook | Runs | Can refuse |
//! |------|------|------|------------|
//! | [`Observable`] | `on_change(old, new)` | after the value is replaced | no |
//! | [`Vetoable`] | `should_accept(old, new)` | before the value is replaced | yes, silently |
//!
//! Hooks are plain closures owned by the wrapper; mutation goes through
//! `&mut self`, so no interior mutability is needed.

use std::fmt;

use crate::error::Result;
use crate::property::Delegate;

/// A value that notifies a callback after every write.
///
/// # Example
///
/// ```
/// use delegates::Observable;
///
/// let mut seen = Vec::new();
/// let mut name = Observable::new("<no name>".to_string(), |old: &String, new: &String| {
///     seen.push(format!("{old} -> {new}"));
/// });
/// name.set("Larissa".to_string());
/// drop(name);
/// assert_eq!(seen, vec!["<no name> -> Larissa"]);
/// ```
pub struct Observable<T, F> {
    value: T,
    on_change: F,
}

impl<T, F> Observable<T, F>
where
    F: FnMut(&T, &T),
{
    #[must_use]
    pub fn new(initial: T, on_change: F) -> Self {
        Self {
            value: initial,
            on_change,
        }
    }

    #[must_use]
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replaces the value, then calls `on_change(old, new)` once.
    pub fn set(&mut self, value: T) {
        let old = std::mem::replace(&mut self.value, value);
        (self.on_change)(&old, &self.value);
    }

    #[must_use]
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: fmt::Debug, F> fmt::Debug for Observable<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

impl<T, F> Delegate for Observable<T, F>
where
    T: Clone,
    F: FnMut(&T, &T),
{
    type Value = T;

    fn get_value(&self, _name: &str) -> Result<T> {
        Ok(self.value.clone())
    }

    fn set_value(&mut self, name: &str, value: T) -> Result<()> {
        tracing::trace!(property = name, "observable write");
        self.set(value);
        Ok(())
    }
}

/// A value whose writes must pass a predicate over the old and new value.
///
/// A refused write leaves the value untouched and is not an error.
pub struct Vetoable<T, P> {
    value: T,
    should_accept: P,
}

impl<T, P> Vetoable<T, P>
where
    P: FnMut(&T, &T) -> bool,
{
    #[must_use]
    pub fn new(initial: T, should_accept: P) -> Self {
        Self {
            value: initial,
            should_accept,
        }
    }

    #[must_use]
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Offers `value`; returns whether the write was accepted.
    pub fn set(&mut self, value: T) -> bool {
        if (self.should_accept)(&self.value, &value) {
            self.value = value;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: fmt::Debug, P> fmt::Debug for Vetoable<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vetoable")
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

impl<T, P> Delegate for Vetoable<T, P>
where
    T: Clone,
    P: FnMut(&T, &T) -> bool,
{
    type Value = T;

    fn get_value(&self, _name: &str) -> Result<T> {
        Ok(self.value.clone())
    }

    fn set_value(&mut self, name: &str, value: T) -> Result<()> {
        if !self.set(value) {
            tracing::debug!(property = name, "write vetoed");
        }
        Ok(())
    }
}

/// True when `s` starts with an uppercase letter.
///
/// The empty string has no first letter and is rejected.
#[must_use]
pub fn starts_uppercase(s: &str) -> bool {
    s.chars().next().is_some_and(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::Property;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tracing_test::traced_test;

    #[test]
    fn test_observable_reports_old_and_new() {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&changes);
        let mut name = Observable::new("<no name>".to_string(), move |old: &String, new: &String| {
            log.borrow_mut().push((old.clone(), new.clone()));
        });

        name.set("Larissa".to_string());

        assert_eq!(
            *changes.borrow(),
            vec![("<no name>".to_string(), "Larissa".to_string())]
        );
        assert_eq!(name.get(), "Larissa");
    }

    #[test]
    fn test_observable_sees_committed_value() {
        // The callback runs after the write is committed.
        let mut counter = Observable::new(0, |old: &i32, new: &i32| {
            assert_eq!(*new, old + 1);
        });
        counter.set(1);
        counter.set(2);
        assert_eq!(counter.into_inner(), 2);
    }

    #[test]
    fn test_observable_fires_on_equal_writes() {
        let mut fired = 0;
        let mut value = Observable::new(5, |_: &i32, _: &i32| fired += 1);
        value.set(5);
        value.set(5);
        drop(value);
        assert_eq!(fired, 2);
    }

    #[test]
    fn test_vetoable_surname() {
        let mut surname = Vetoable::new("<no surname>".to_string(), |_: &String, new: &String| {
            starts_uppercase(new)
        });

        assert!(!surname.set("gulin".to_string()));
        assert_eq!(surname.get(), "<no surname>");

        assert!(surname.set("Gulin".to_string()));
        assert_eq!(surname.get(), "Gulin");
    }

    #[test]
    fn test_vetoable_empty_string_rejected() {
        let mut surname = Vetoable::new("Gulin".to_string(), |_: &String, new: &String| {
            starts_uppercase(new)
        });
        assert!(!surname.set(String::new()));
        assert_eq!(surname.get(), "Gulin");
    }

    #[test]
    fn test_vetoable_sees_equal_values() {
        let mut calls = Vec::new();
        let mut value = Vetoable::new(3, |old: &i32, new: &i32| {
            calls.push((*old, *new));
            new > old
        });
        assert!(!value.set(3));
        assert!(value.set(4));
        assert!(!value.set(1));
        assert_eq!(value.into_inner(), 4);
        assert_eq!(calls, vec![(3, 3), (3, 4), (4, 1)]);
    }

    #[test]
    fn test_vetoed_property_write_is_ok() {
        let mut surname = Property::new(
            "surname",
            Vetoable::new("<no surname>".to_string(), |_: &String, new: &String| {
                starts_uppercase(new)
            }),
        );
        assert_eq!(surname.set("gulin".to_string()), Ok(()));
        assert_eq!(surname.get(), Ok("<no surname>".to_string()));
    }

    #[test]
    #[traced_test]
    fn test_vetoed_write_is_logged() {
        let mut surname = Property::new(
            "surname",
            Vetoable::new("Gulin".to_string(), |_: &String, new: &String| starts_uppercase(new)),
        );
        surname.set("gulin".to_string()).unwrap();
        assert!(logs_contain("write vetoed"));
        assert!(logs_contain("surname"));
    }

    #[test]
    #[traced_test]
    fn test_observable_write_is_logged() {
        let mut nickname = Property::new(
            "nickname",
            Observable::new("<no name>".to_string(), |_: &String, _: &String| {}),
        );
        assert!(!logs_contain("observable write"));
        nickname.set("Lari".to_string()).unwrap();
        assert!(logs_contain("observable write"));
        assert!(logs_contain("nickname"));
    }

    #[test]
    #[traced_test]
    fn test_accepted_write_is_not_logged_as_vetoed() {
        let mut surname = Property::new(
            "surname",
            Vetoable::new("<no surname>".to_string(), |_: &String, new: &String| {
                starts_uppercase(new)
            }),
        );
        surname.set("Gulin".to_string()).unwrap();
        assert!(!logs_contain("write vetoed"));
    }

    #[test]
    fn test_starts_uppercase() {
        assert!(starts_uppercase("Gulin"));
        assert!(starts_uppercase("Ágata"));
        assert!(!starts_uppercase("gulin"));
        assert!(!starts_uppercase("1st"));
        assert!(!starts_uppercase(""));
    }
}
