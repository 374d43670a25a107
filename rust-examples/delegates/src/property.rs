//! Property slots and the delegate interface.
//!
//! A [`Property`] is a named slot. It owns no value itself: every read and
//! write goes through its [`Delegate`], which receives the property name so
//! it can report errors or look values up by name.
//!
//! # Example
//!
//! ```
//! use delegates::{Lazy, Property, PropertyError};
//!
//! let mut greeting = Property::new("greeting", Lazy::new(|| "Hello".to_string()));
//! assert_eq!(greeting.get().unwrap(), "Hello");
//! assert_eq!(
//!     greeting.set("Bye".to_string()),
//!     Err(PropertyError::read_only("greeting"))
//! );
//! ```

use crate::error::Result;

/// Read/write policy behind a property.
pub trait Delegate {
    type Value;

    /// Returns the value the property currently exposes.
    fn get_value(&self, name: &str) -> Result<Self::Value>;

    /// Offers a new value to the delegate.
    ///
    /// Delegates are free to drop the value (a vetoed write still returns
    /// `Ok`).
    fn set_value(&mut self, name: &str, value: Self::Value) -> Result<()>;
}

/// A named slot whose reads and writes are handled by a delegate.
#[derive(Debug, Clone)]
pub struct Property<D> {
    name: &'static str,
    delegate: D,
}

impl<D> Property<D> {
    #[must_use]
    pub fn new(name: &'static str, delegate: D) -> Self {
        Self { name, delegate }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    pub fn delegate_mut(&mut self) -> &mut D {
        &mut self.delegate
    }

    #[must_use]
    pub fn into_delegate(self) -> D {
        self.delegate
    }
}

impl<D: Delegate> Property<D> {
    pub fn get(&self) -> Result<D::Value> {
        self.delegate.get_value(self.name)
    }

    pub fn set(&mut self, value: D::Value) -> Result<()> {
        self.delegate.set_value(self.name, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PropertyError;

    /// Counts reads and keeps the last written value.
    struct Recording {
        value: i32,
        names: Vec<String>,
    }

    impl Delegate for Recording {
        type Value = i32;

        fn get_value(&self, _name: &str) -> Result<i32> {
            Ok(self.value)
        }

        fn set_value(&mut self, name: &str, value: i32) -> Result<()> {
            self.names.push(name.to_string());
            self.value = value;
            Ok(())
        }
    }

    #[test]
    fn test_property_forwards_name_to_delegate() {
        let mut prop = Property::new(
            "counter",
            Recording {
                value: 0,
                names: vec![],
            },
        );

        prop.set(5).unwrap();
        prop.set(7).unwrap();

        assert_eq!(prop.get(), Ok(7));
        assert_eq!(prop.delegate().names, vec!["counter", "counter"]);
        assert_eq!(prop.name(), "counter");
    }

    #[test]
    fn test_delegate_mut_bypasses_property() {
        let mut prop = Property::new(
            "counter",
            Recording {
                value: 1,
                names: vec![],
            },
        );
        prop.delegate_mut().value = 9;
        assert_eq!(prop.get(), Ok(9));
        assert!(prop.into_delegate().names.is_empty());
    }

    struct Refusing;

    impl Delegate for Refusing {
        type Value = ();

        fn get_value(&self, _name: &str) -> Result<()> {
            Ok(())
        }

        fn set_value(&mut self, name: &str, _value: ()) -> Result<()> {
            Err(PropertyError::read_only(name))
        }
    }

    #[test]
    fn test_delegate_error_carries_property_name() {
        let mut prop = Property::new("frozen", Refusing);
        assert_eq!(prop.set(()), Err(PropertyError::read_only("frozen")));
    }
}
