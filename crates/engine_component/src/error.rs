//! Error types shared by every ECS core operation.

use crate::entity::Entity;

/// The coarse failure taxonomy of the ECS core.
///
/// Every [`EcsError`] maps onto exactly one kind, so callers that only care
/// about the category can match on [`EcsError::kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The entity or component being operated on does not exist.
    NotFound,
    /// The identifier space is exhausted.
    CapacityExceeded,
    /// A malformed argument was passed at registration or update time.
    InvalidArgument,
}

/// Errors returned by the entity, component, and system managers.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EcsError {
    /// The entity is not live (never issued, already destroyed, or `0`).
    #[error("entity {0} not found")]
    EntityNotFound(Entity),

    /// The entity has no component of the requested type attached.
    #[error("component '{component}' not found on {entity}")]
    ComponentNotFound {
        /// Name of the component type.
        component: &'static str,
        /// The entity that was queried.
        entity: Entity,
    },

    /// No identifier is left to hand out.
    #[error("entity identifier space exhausted (limit {limit})")]
    CapacityExceeded {
        /// The highest identifier the allocator may issue.
        limit: u64,
    },

    /// An argument was rejected.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl EcsError {
    /// Returns the taxonomy bucket this error belongs to.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EntityNotFound(_) | Self::ComponentNotFound { .. } => ErrorKind::NotFound,
            Self::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
        }
    }

    /// Shorthand for building an [`EcsError::InvalidArgument`].
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}
