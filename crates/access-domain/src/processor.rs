//! Port traits describing the access manager operations.
//!
//! The operations split into mutations ([`AccessManagerEventProcessor`]) and
//! reads ([`AccessManagerQueryProcessor`]). Both are generic over four
//! caller-defined element types:
//!
//! | Parameter | Element |
//! |-----------|---------|
//! | `U` | user |
//! | `G` | group |
//! | `C` | application component |
//! | `A` | access level |
//!
//! Entity types and entities are plain strings throughout.
//!
//! `include_indirect` asks the server to also return mappings reachable
//! through group-to-group or entity hierarchy edges. Resolution happens on
//! the server; the flag is only forwarded.

use std::collections::HashSet;
use std::hash::Hash;

use async_trait::async_trait;

use crate::errors::AccessManagerError;

/// Bound shared by every element type handled by the processors.
pub trait Element: Eq + Hash + Send + Sync + 'static {}

impl<T> Element for T where T: Eq + Hash + Send + Sync + 'static {}

/// Result type of every processor operation.
pub type AccessResult<T> = Result<T, AccessManagerError>;

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Adds and removes elements and mappings.
///
/// Every operation succeeds on any 2xx response. Failures are translated into
/// [`AccessManagerError`]; a missing element surfaces as
/// [`AccessManagerError::ElementNotFound`].
#[async_trait]
pub trait AccessManagerEventProcessor<U, G, C, A>: Send + Sync
where
    U: Element,
    G: Element,
    C: Element,
    A: Element,
{
    async fn add_user(&self, user: &U) -> AccessResult<()>;

    /// Removes a user together with all of its mappings.
    async fn remove_user(&self, user: &U) -> AccessResult<()>;

    async fn add_group(&self, group: &G) -> AccessResult<()>;

    /// Removes a group together with all of its mappings.
    async fn remove_group(&self, group: &G) -> AccessResult<()>;

    async fn add_user_to_group_mapping(&self, user: &U, group: &G) -> AccessResult<()>;

    async fn remove_user_to_group_mapping(&self, user: &U, group: &G) -> AccessResult<()>;

    async fn add_group_to_group_mapping(&self, from_group: &G, to_group: &G) -> AccessResult<()>;

    async fn remove_group_to_group_mapping(&self, from_group: &G, to_group: &G)
        -> AccessResult<()>;

    async fn add_user_to_application_component_and_access_level_mapping(
        &self,
        user: &U,
        application_component: &C,
        access_level: &A,
    ) -> AccessResult<()>;

    async fn remove_user_to_application_component_and_access_level_mapping(
        &self,
        user: &U,
        application_component: &C,
        access_level: &A,
    ) -> AccessResult<()>;

    async fn add_group_to_application_component_and_access_level_mapping(
        &self,
        group: &G,
        application_component: &C,
        access_level: &A,
    ) -> AccessResult<()>;

    async fn remove_group_to_application_component_and_access_level_mapping(
        &self,
        group: &G,
        application_component: &C,
        access_level: &A,
    ) -> AccessResult<()>;

    async fn add_entity_type(&self, entity_type: &str) -> AccessResult<()>;

    /// Removes an entity type together with its entities and their mappings.
    async fn remove_entity_type(&self, entity_type: &str) -> AccessResult<()>;

    async fn add_entity(&self, entity_type: &str, entity: &str) -> AccessResult<()>;

    async fn remove_entity(&self, entity_type: &str, entity: &str) -> AccessResult<()>;

    async fn add_user_to_entity_mapping(
        &self,
        user: &U,
        entity_type: &str,
        entity: &str,
    ) -> AccessResult<()>;

    async fn remove_user_to_entity_mapping(
        &self,
        user: &U,
        entity_type: &str,
        entity: &str,
    ) -> AccessResult<()>;

    async fn add_group_to_entity_mapping(
        &self,
        group: &G,
        entity_type: &str,
        entity: &str,
    ) -> AccessResult<()>;

    async fn remove_group_to_entity_mapping(
        &self,
        group: &G,
        entity_type: &str,
        entity: &str,
    ) -> AccessResult<()>;
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Reads elements, mappings and access decisions.
///
/// List results keep the order the server returned them in and may contain
/// duplicates. The `*_accessible_by_*` operations always include indirect
/// mappings and return sets.
#[async_trait]
pub trait AccessManagerQueryProcessor<U, G, C, A>: Send + Sync
where
    U: Element,
    G: Element,
    C: Element,
    A: Element,
{
    async fn users(&self) -> AccessResult<Vec<U>>;

    async fn groups(&self) -> AccessResult<Vec<G>>;

    async fn entity_types(&self) -> AccessResult<Vec<String>>;

    /// Returns `false` when the server reports the user as not found.
    async fn contains_user(&self, user: &U) -> AccessResult<bool>;

    /// Returns `false` when the server reports the group as not found.
    async fn contains_group(&self, group: &G) -> AccessResult<bool>;

    async fn contains_entity_type(&self, entity_type: &str) -> AccessResult<bool>;

    /// Returns `false` when either the entity type or the entity is not found.
    async fn contains_entity(&self, entity_type: &str, entity: &str) -> AccessResult<bool>;

    async fn user_to_group_mappings(&self, user: &U, include_indirect: bool)
        -> AccessResult<Vec<G>>;

    async fn group_to_user_mappings(
        &self,
        group: &G,
        include_indirect: bool,
    ) -> AccessResult<Vec<U>>;

    async fn group_to_group_mappings(
        &self,
        group: &G,
        include_indirect: bool,
    ) -> AccessResult<Vec<G>>;

    /// Groups mapped *to* `group`.
    async fn group_to_group_reverse_mappings(
        &self,
        group: &G,
        include_indirect: bool,
    ) -> AccessResult<Vec<G>>;

    async fn user_to_application_component_and_access_level_mappings(
        &self,
        user: &U,
    ) -> AccessResult<Vec<(C, A)>>;

    async fn application_component_and_access_level_to_user_mappings(
        &self,
        application_component: &C,
        access_level: &A,
        include_indirect: bool,
    ) -> AccessResult<Vec<U>>;

    async fn group_to_application_component_and_access_level_mappings(
        &self,
        group: &G,
    ) -> AccessResult<Vec<(C, A)>>;

    async fn application_component_and_access_level_to_group_mappings(
        &self,
        application_component: &C,
        access_level: &A,
        include_indirect: bool,
    ) -> AccessResult<Vec<G>>;

    async fn entities(&self, entity_type: &str) -> AccessResult<Vec<String>>;

    /// `(entity type, entity)` pairs directly mapped to `user`.
    async fn user_to_entity_mappings(&self, user: &U) -> AccessResult<Vec<(String, String)>>;

    async fn user_to_entity_mappings_of_type(
        &self,
        user: &U,
        entity_type: &str,
    ) -> AccessResult<Vec<String>>;

    async fn entity_to_user_mappings(
        &self,
        entity_type: &str,
        entity: &str,
        include_indirect: bool,
    ) -> AccessResult<Vec<U>>;

    async fn group_to_entity_mappings(&self, group: &G) -> AccessResult<Vec<(String, String)>>;

    async fn group_to_entity_mappings_of_type(
        &self,
        group: &G,
        entity_type: &str,
    ) -> AccessResult<Vec<String>>;

    async fn entity_to_group_mappings(
        &self,
        entity_type: &str,
        entity: &str,
        include_indirect: bool,
    ) -> AccessResult<Vec<G>>;

    async fn has_access_to_application_component(
        &self,
        user: &U,
        application_component: &C,
        access_level: &A,
    ) -> AccessResult<bool>;

    async fn has_access_to_entity(
        &self,
        user: &U,
        entity_type: &str,
        entity: &str,
    ) -> AccessResult<bool>;

    async fn application_components_accessible_by_user(
        &self,
        user: &U,
    ) -> AccessResult<HashSet<(C, A)>>;

    async fn application_components_accessible_by_group(
        &self,
        group: &G,
    ) -> AccessResult<HashSet<(C, A)>>;

    async fn entities_accessible_by_user(
        &self,
        user: &U,
    ) -> AccessResult<HashSet<(String, String)>>;

    async fn entities_of_type_accessible_by_user(
        &self,
        user: &U,
        entity_type: &str,
    ) -> AccessResult<HashSet<String>>;

    async fn entities_accessible_by_group(
        &self,
        group: &G,
    ) -> AccessResult<HashSet<(String, String)>>;

    async fn entities_of_type_accessible_by_group(
        &self,
        group: &G,
        entity_type: &str,
    ) -> AccessResult<HashSet<String>>;
}
