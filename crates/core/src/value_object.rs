//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values. A
/// product's localized name is a value object; the product itself is an
/// entity (see [`crate::Entity`]).
///
/// ```ignore
/// let a = LocalizedText::new("კამერა", "Камера", "Camera");
/// let b = LocalizedText::new("კამერა", "Камера", "Camera");
/// assert_eq!(a, b);
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
