//! Custom Delegates
//!
//! Delegates that are not a wrapped value with a write hook:
//!
//! - [`LateInit`]: no initial value; reading before the first write fails
//! - [`MapBacked`]: reads the entry named after the property from a map
//! - [`FnDelegate`]: any pair of getter/setter closures that see the
//!   property name

use std::fmt;
use std::marker::PhantomData;

use indexmap::IndexMap;

use crate::error::{PropertyError, Result};
use crate::property::Delegate;

/// A property that starts empty and must be written before it is read.
///
/// # Example
///
/// ```
/// use delegates::{LateInit, Property, PropertyError};
///
/// let mut port = Property::new("port", LateInit::<u16>::new());
/// assert_eq!(port.get(), Err(PropertyError::uninitialized("port")));
///
/// port.set(8080).unwrap();
/// assert_eq!(port.get(), Ok(8080));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LateInit<T> {
    value: Option<T>,
}

impl<T> LateInit<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self { value: None }
    }

    #[must_use]
    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn set(&mut self, value: T) {
        self.value = Some(value);
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.value.is_some()
    }
}

impl<T> Default for LateInit<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Delegate for LateInit<T> {
    type Value = T;

    fn get_value(&self, name: &str) -> Result<T> {
        match &self.value {
            Some(value) => Ok(value.clone()),
            None => {
                tracing::debug!(property = name, "read before initialization");
                Err(PropertyError::uninitialized(name))
            }
        }
    }

    fn set_value(&mut self, _name: &str, value: T) -> Result<()> {
        self.set(value);
        Ok(())
    }
}

/// A read-only property backed by the map entry keyed by its name.
///
/// Several properties can share one map, each looking up its own key.
///
/// # Example
///
/// ```
/// use delegates::{MapBacked, Property};
/// use indexmap::IndexMap;
///
/// let fields: IndexMap<String, String> = [
///     ("name".to_string(), "John Doe".to_string()),
///     ("city".to_string(), "Lisbon".to_string()),
/// ]
/// .into_iter()
/// .collect();
///
/// let name = Property::new("name", MapBacked::new(&fields));
/// let city = Property::new("city", MapBacked::new(&fields));
/// assert_eq!(name.get().unwrap(), "John Doe");
/// assert_eq!(city.get().unwrap(), "Lisbon");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MapBacked<'m, V> {
    map: &'m IndexMap<String, V>,
}

impl<'m, V> MapBacked<'m, V> {
    #[must_use]
    pub fn new(map: &'m IndexMap<String, V>) -> Self {
        Self { map }
    }
}

impl<V: Clone> Delegate for MapBacked<'_, V> {
    type Value = V;

    fn get_value(&self, name: &str) -> Result<V> {
        self.map
            .get(name)
            .cloned()
            .ok_or_else(|| PropertyError::missing_key(name))
    }

    fn set_value(&mut self, name: &str, _value: V) -> Result<()> {
        Err(PropertyError::read_only(name))
    }
}

/// A delegate built from a getter and a setter that both see the property
/// name.
///
/// # Example
///
/// ```
/// use delegates::{FnDelegate, Property};
///
/// let mut assigned = Vec::new();
/// let mut p = Property::new(
///     "p",
///     FnDelegate::new(
///         |name: &str| format!("Example, thank you for delegating '{name}' to me!"),
///         |name: &str, value: String| assigned.push(format!("{value} has been assigned to '{name}'")),
///     ),
/// );
///
/// assert_eq!(p.get().unwrap(), "Example, thank you for delegating 'p' to me!");
/// p.set("Teste".to_string()).unwrap();
/// drop(p);
/// assert_eq!(assigned, vec!["Teste has been assigned to 'p'"]);
/// ```
pub struct FnDelegate<T, G, S> {
    getter: G,
    setter: S,
    _value: PhantomData<fn() -> T>,
}

impl<T, G, S> FnDelegate<T, G, S>
where
    G: Fn(&str) -> T,
    S: FnMut(&str, T),
{
    #[must_use]
    pub fn new(getter: G, setter: S) -> Self {
        Self {
            getter,
            setter,
            _value: PhantomData,
        }
    }
}

impl<T, G, S> fmt::Debug for FnDelegate<T, G, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnDelegate").finish_non_exhaustive()
    }
}

impl<T, G, S> Delegate for FnDelegate<T, G, S>
where
    G: Fn(&str) -> T,
    S: FnMut(&str, T),
{
    type Value = T;

    fn get_value(&self, name: &str) -> Result<T> {
        Ok((self.getter)(name))
    }

    fn set_value(&mut self, name: &str, value: T) -> Result<()> {
        (self.setter)(name, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::Property;
    use tracing_test::traced_test;

    #[test]
    fn test_late_init_before_and_after_write() {
        let mut prop = Property::new("token", LateInit::<String>::new());
        assert_eq!(prop.get(), Err(PropertyError::uninitialized("token")));
        assert!(!prop.delegate().is_initialized());

        prop.set("abc".to_string()).unwrap();
        assert_eq!(prop.get(), Ok("abc".to_string()));

        prop.set("def".to_string()).unwrap();
        assert_eq!(prop.delegate().get(), Some(&"def".to_string()));
    }

    #[test]
    #[traced_test]
    fn test_late_init_read_before_write_is_logged() {
        let mut prop = Property::new("token", LateInit::<u32>::new());
        assert!(prop.get().is_err());
        assert!(logs_contain("read before initialization"));
        assert!(logs_contain("token"));

        prop.set(7).unwrap();
        assert_eq!(prop.get(), Ok(7));
        logs_assert(|lines: &[&str]| {
            match lines
                .iter()
                .filter(|line| line.contains("read before initialization"))
                .count()
            {
                1 => Ok(()),
                n => Err(format!("expected one uninitialized read, saw {n}")),
            }
        });
    }

    #[test]
    fn test_map_backed_missing_key() {
        let map: IndexMap<String, i32> = [("age".to_string(), 25)].into_iter().collect();
        let age = Property::new("age", MapBacked::new(&map));
        let height = Property::new("height", MapBacked::new(&map));

        assert_eq!(age.get(), Ok(25));
        assert_eq!(height.get(), Err(PropertyError::missing_key("height")));
    }

    #[test]
    fn test_map_backed_is_read_only() {
        let map: IndexMap<String, i32> = IndexMap::new();
        let mut age = Property::new("age", MapBacked::new(&map));
        assert_eq!(age.set(3), Err(PropertyError::read_only("age")));
    }

    #[test]
    fn test_fn_delegate_getter_sees_name() {
        let names = Property::new(
            "first",
            FnDelegate::new(|name: &str| name.len(), |_: &str, _: usize| {}),
        );
        assert_eq!(names.get(), Ok(5));
    }
}
