//! System signatures.
//!
//! A [`Signature`] declares which component types a system requires. An
//! entity matches when it has every required type. Each requirement is
//! tagged as read or write; matching ignores the tag, but the stage planner
//! uses it to find systems that must not run side by side.

use crate::component::{Component, ComponentTypeId};
use crate::error::EcsError;

/// The component requirements of a system.
///
/// Built once at registration time with the builder methods and never
/// changed afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    /// Component types the system reads immutably.
    pub reads: Vec<ComponentTypeId>,
    /// Component types the system writes.
    pub writes: Vec<ComponentTypeId>,
}

impl Signature {
    /// Create an empty signature.
    #[must_use]
    pub fn new() -> Self {
        Self {
            reads: Vec::new(),
            writes: Vec::new(),
        }
    }

    /// Require `T` for reading.
    #[must_use]
    pub fn read<T: Component>(self) -> Self {
        self.read_id(T::component_type_id())
    }

    /// Require `T` for writing.
    #[must_use]
    pub fn write<T: Component>(self) -> Self {
        self.write_id(T::component_type_id())
    }

    /// Require a component type for reading, by identifier.
    #[must_use]
    pub fn read_id(mut self, type_id: ComponentTypeId) -> Self {
        self.reads.push(type_id);
        self
    }

    /// Require a component type for writing, by identifier.
    #[must_use]
    pub fn write_id(mut self, type_id: ComponentTypeId) -> Self {
        self.writes.push(type_id);
        self
    }

    /// Iterates every required component type (reads, then writes).
    pub fn required_types(&self) -> impl Iterator<Item = ComponentTypeId> + '_ {
        self.reads.iter().chain(self.writes.iter()).copied()
    }

    /// Number of required component types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reads.len() + self.writes.len()
    }

    /// Returns `true` if nothing is required.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reads.is_empty() && self.writes.is_empty()
    }

    /// Returns `true` if `type_id` is required, read or write.
    #[must_use]
    pub fn requires(&self, type_id: ComponentTypeId) -> bool {
        self.reads.contains(&type_id) || self.writes.contains(&type_id)
    }

    /// Checks that the signature is well formed.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidArgument`] if the signature is empty or
    /// lists a component type more than once.
    pub fn validate(&self) -> Result<(), EcsError> {
        if self.is_empty() {
            return Err(EcsError::invalid("signature requires no components"));
        }

        let mut seen: Vec<ComponentTypeId> = Vec::with_capacity(self.len());
        for ty in self.required_types() {
            if seen.contains(&ty) {
                return Err(EcsError::invalid(format!(
                    "component type {ty} listed twice in signature"
                )));
            }
            seen.push(ty);
        }
        Ok(())
    }

    /// Checks whether a system with this signature conflicts with another.
    ///
    /// Two signatures conflict when one writes a component type that the
    /// other reads or writes:
    ///
    /// ```text
    /// A.writes ∩ (B.reads ∪ B.writes) ≠ ∅  OR
    /// B.writes ∩ (A.reads ∪ A.writes) ≠ ∅
    /// ```
    #[must_use]
    pub fn conflicts_with(&self, other: &Signature) -> bool {
        self.writes.iter().any(|w| other.requires(*w))
            || other.writes.iter().any(|w| self.requires(*w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    struct Transform;
    impl Component for Transform {
        fn type_name() -> &'static str {
            "Transform"
        }
    }

    struct Velocity;
    impl Component for Velocity {
        fn type_name() -> &'static str {
            "Velocity"
        }
    }

    struct AiState;
    impl Component for AiState {
        fn type_name() -> &'static str {
            "AiState"
        }
    }

    #[test]
    fn test_no_conflict_both_read() {
        let s1 = Signature::new().read::<Transform>();
        let s2 = Signature::new().read::<Transform>();
        assert!(!s1.conflicts_with(&s2));
    }

    #[test]
    fn test_conflict_read_vs_write() {
        let s1 = Signature::new().read::<Transform>();
        let s2 = Signature::new().write::<Transform>();
        assert!(s1.conflicts_with(&s2));
        assert!(s2.conflicts_with(&s1));
    }

    #[test]
    fn test_conflict_write_vs_write() {
        let s1 = Signature::new().write::<Velocity>();
        let s2 = Signature::new().write::<Velocity>();
        assert!(s1.conflicts_with(&s2));
    }

    #[test]
    fn test_no_conflict_different_types() {
        let physics = Signature::new().read::<Transform>().write::<Velocity>();
        let ai = Signature::new().read::<Transform>().write::<AiState>();
        assert!(!physics.conflicts_with(&ai));
    }

    #[test]
    fn test_conflict_movement_vs_physics() {
        let physics = Signature::new().read::<Transform>().write::<Velocity>();
        let movement = Signature::new().read::<Velocity>().write::<Transform>();
        assert!(physics.conflicts_with(&movement));
    }

    #[test]
    fn test_required_types_union() {
        let sig = Signature::new().read::<Velocity>().write::<Transform>();
        let required: Vec<_> = sig.required_types().collect();
        assert_eq!(
            required,
            vec![Velocity::component_type_id(), Transform::component_type_id()]
        );
        assert_eq!(sig.len(), 2);
        assert!(sig.requires(Transform::component_type_id()));
        assert!(!sig.requires(AiState::component_type_id()));
    }

    #[test]
    fn test_validate_rejects_empty() {
        let err = Signature::new().validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let sig = Signature::new().read::<Transform>().write::<Transform>();
        assert!(sig.validate().is_err());
        let sig = Signature::new().read::<Velocity>().read::<Velocity>();
        assert!(sig.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_well_formed() {
        let sig = Signature::new().read::<Velocity>().write::<Transform>();
        assert!(sig.validate().is_ok());
    }
}
