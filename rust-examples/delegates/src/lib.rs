//! Delegated Properties
//!
//! A property hands its reads and writes over to a delegate object that decides
//! what a read returns and whether a write sticks:
//! - Lazy values (`OnceLock`, `OnceCell`)
//! - Observable values (callback after each write)
//! - Vetoable values (predicate before each write)
//! - Custom delegates (late initialization, map-backed, closure-backed)
//!
//! # Example
//!
//! ```
//! use delegates::{Observable, Property, Vetoable, starts_uppercase};
//!
//! let mut name = Property::new("name", Observable::new("<no name>".to_string(), |_, _| {}));
//! name.set("Larissa".to_string()).unwrap();
//! assert_eq!(name.get().unwrap(), "Larissa");
//!
//! let mut surname = Vetoable::new("<no surname>".to_string(), |_: &String, new: &String| {
//!     starts_uppercase(new)
//! });
//! assert!(!surname.set("gulin".to_string()));
//! assert!(surname.set("Gulin".to_string()));
//! assert_eq!(surname.get(), "Gulin");
//! ```

// Modules
pub mod custom; // Late initialization, map-backed and closure-backed delegates
pub mod error; // Property errors
pub mod lazy; // Memoized values
pub mod observable; // Observable and vetoable values
pub mod property; // Delegate trait and bound property slot

pub use custom::{FnDelegate, LateInit, MapBacked};
pub use error::{PropertyError, Result};
pub use lazy::{Lazy, UnsyncLazy};
pub use observable::{Observable, Vetoable, starts_uppercase};
pub use property::{Delegate, Property};
