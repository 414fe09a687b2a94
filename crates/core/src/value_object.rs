//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. A resource stack
/// is one: two stacks of forty iron ingots are the same value, whichever cell
/// they sit in. To "modify" a value object, build a new one.
///
/// The trait requires:
/// - **Clone**: values are copied freely between inventories
/// - **PartialEq**: values compare by their attributes
/// - **Debug**: values show up in logs and test failures
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
