//! [`AccessManagerQueryProcessor`] over HTTP.
//!
//! List endpoints answer with arrays of objects; the field each element is
//! read from is named by the constants below. The plain `users`, `groups` and
//! `entityTypes` listings are arrays of bare strings.

use std::collections::HashSet;

use access_domain::{
    AccessManagerQueryProcessor, AccessResult, Element, IdentityCodec, StringCodec,
};
use async_trait::async_trait;

use crate::client::AccessManagerClient;

const USER: &str = "user";
const GROUP: &str = "group";
const TO_GROUP: &str = "toGroup";
const FROM_GROUP: &str = "fromGroup";
const APPLICATION_COMPONENT: &str = "applicationComponent";
const ACCESS_LEVEL: &str = "accessLevel";
const ENTITY_TYPE: &str = "entityType";
const ENTITY: &str = "entity";

/// Entity types and entities are plain strings.
fn identity() -> &'static dyn StringCodec<String> {
    &IdentityCodec
}

#[async_trait]
impl<U, G, C, A> AccessManagerQueryProcessor<U, G, C, A> for AccessManagerClient<U, G, C, A>
where
    U: Element,
    G: Element,
    C: Element,
    A: Element,
{
    async fn users(&self) -> AccessResult<Vec<U>> {
        self.get_list(self.urls().users(), self.codecs.user.as_ref(), None)
            .await
    }

    async fn groups(&self) -> AccessResult<Vec<G>> {
        self.get_list(self.urls().groups(), self.codecs.group.as_ref(), None)
            .await
    }

    async fn entity_types(&self) -> AccessResult<Vec<String>> {
        self.get_list(self.urls().entity_types(), identity(), None)
            .await
    }

    async fn contains_user(&self, user: &U) -> AccessResult<bool> {
        self.contains(self.urls().user(&self.codecs.user.encode(user)))
            .await
    }

    async fn contains_group(&self, group: &G) -> AccessResult<bool> {
        self.contains(self.urls().group(&self.codecs.group.encode(group)))
            .await
    }

    async fn contains_entity_type(&self, entity_type: &str) -> AccessResult<bool> {
        self.contains(self.urls().entity_type(entity_type)).await
    }

    async fn contains_entity(&self, entity_type: &str, entity: &str) -> AccessResult<bool> {
        self.contains(self.urls().entity(entity_type, entity)).await
    }

    async fn user_to_group_mappings(
        &self,
        user: &U,
        include_indirect: bool,
    ) -> AccessResult<Vec<G>> {
        let url = self
            .urls()
            .user_to_group_mappings(&self.codecs.user.encode(user), include_indirect);
        self.get_list(url, self.codecs.group.as_ref(), Some(GROUP))
            .await
    }

    async fn group_to_user_mappings(
        &self,
        group: &G,
        include_indirect: bool,
    ) -> AccessResult<Vec<U>> {
        let url = self
            .urls()
            .group_to_user_mappings(&self.codecs.group.encode(group), include_indirect);
        self.get_list(url, self.codecs.user.as_ref(), Some(USER))
            .await
    }

    async fn group_to_group_mappings(
        &self,
        group: &G,
        include_indirect: bool,
    ) -> AccessResult<Vec<G>> {
        let url = self
            .urls()
            .group_to_group_mappings(&self.codecs.group.encode(group), include_indirect);
        self.get_list(url, self.codecs.group.as_ref(), Some(TO_GROUP))
            .await
    }

    async fn group_to_group_reverse_mappings(
        &self,
        group: &G,
        include_indirect: bool,
    ) -> AccessResult<Vec<G>> {
        let url = self
            .urls()
            .group_to_group_reverse_mappings(&self.codecs.group.encode(group), include_indirect);
        self.get_list(url, self.codecs.group.as_ref(), Some(FROM_GROUP))
            .await
    }

    async fn user_to_application_component_and_access_level_mappings(
        &self,
        user: &U,
    ) -> AccessResult<Vec<(C, A)>> {
        let url = self
            .urls()
            .user_to_component_mappings(&self.codecs.user.encode(user), false);
        self.get_pairs(
            url,
            (APPLICATION_COMPONENT, ACCESS_LEVEL),
            (
                self.codecs.application_component.as_ref(),
                self.codecs.access_level.as_ref(),
            ),
        )
        .await
    }

    async fn application_component_and_access_level_to_user_mappings(
        &self,
        application_component: &C,
        access_level: &A,
        include_indirect: bool,
    ) -> AccessResult<Vec<U>> {
        let url = self.urls().component_to_user_mappings(
            &self.codecs.application_component.encode(application_component),
            &self.codecs.access_level.encode(access_level),
            include_indirect,
        );
        self.get_list(url, self.codecs.user.as_ref(), Some(USER))
            .await
    }

    async fn group_to_application_component_and_access_level_mappings(
        &self,
        group: &G,
    ) -> AccessResult<Vec<(C, A)>> {
        let url = self
            .urls()
            .group_to_component_mappings(&self.codecs.group.encode(group), false);
        self.get_pairs(
            url,
            (APPLICATION_COMPONENT, ACCESS_LEVEL),
            (
                self.codecs.application_component.as_ref(),
                self.codecs.access_level.as_ref(),
            ),
        )
        .await
    }

    async fn application_component_and_access_level_to_group_mappings(
        &self,
        application_component: &C,
        access_level: &A,
        include_indirect: bool,
    ) -> AccessResult<Vec<G>> {
        let url = self.urls().component_to_group_mappings(
            &self.codecs.application_component.encode(application_component),
            &self.codecs.access_level.encode(access_level),
            include_indirect,
        );
        self.get_list(url, self.codecs.group.as_ref(), Some(GROUP))
            .await
    }

    async fn entities(&self, entity_type: &str) -> AccessResult<Vec<String>> {
        self.get_list(self.urls().entities(entity_type), identity(), Some(ENTITY))
            .await
    }

    async fn user_to_entity_mappings(&self, user: &U) -> AccessResult<Vec<(String, String)>> {
        let url = self
            .urls()
            .user_to_entity_mappings(&self.codecs.user.encode(user), false);
        self.get_pairs(url, (ENTITY_TYPE, ENTITY), (identity(), identity()))
            .await
    }

    async fn user_to_entity_mappings_of_type(
        &self,
        user: &U,
        entity_type: &str,
    ) -> AccessResult<Vec<String>> {
        let url = self.urls().user_to_entity_mappings_of_type(
            &self.codecs.user.encode(user),
            entity_type,
            false,
        );
        self.get_list(url, identity(), Some(ENTITY)).await
    }

    async fn entity_to_user_mappings(
        &self,
        entity_type: &str,
        entity: &str,
        include_indirect: bool,
    ) -> AccessResult<Vec<U>> {
        let url = self
            .urls()
            .entity_to_user_mappings(entity_type, entity, include_indirect);
        self.get_list(url, self.codecs.user.as_ref(), Some(USER))
            .await
    }

    async fn group_to_entity_mappings(&self, group: &G) -> AccessResult<Vec<(String, String)>> {
        let url = self
            .urls()
            .group_to_entity_mappings(&self.codecs.group.encode(group), false);
        self.get_pairs(url, (ENTITY_TYPE, ENTITY), (identity(), identity()))
            .await
    }

    async fn group_to_entity_mappings_of_type(
        &self,
        group: &G,
        entity_type: &str,
    ) -> AccessResult<Vec<String>> {
        let url = self.urls().group_to_entity_mappings_of_type(
            &self.codecs.group.encode(group),
            entity_type,
            false,
        );
        self.get_list(url, identity(), Some(ENTITY)).await
    }

    async fn entity_to_group_mappings(
        &self,
        entity_type: &str,
        entity: &str,
        include_indirect: bool,
    ) -> AccessResult<Vec<G>> {
        let url = self
            .urls()
            .entity_to_group_mappings(entity_type, entity, include_indirect);
        self.get_list(url, self.codecs.group.as_ref(), Some(GROUP))
            .await
    }

    async fn has_access_to_application_component(
        &self,
        user: &U,
        application_component: &C,
        access_level: &A,
    ) -> AccessResult<bool> {
        let url = self.urls().component_access(
            &self.codecs.user.encode(user),
            &self.codecs.application_component.encode(application_component),
            &self.codecs.access_level.encode(access_level),
        );
        self.get_bool(url).await
    }

    async fn has_access_to_entity(
        &self,
        user: &U,
        entity_type: &str,
        entity: &str,
    ) -> AccessResult<bool> {
        let url = self
            .urls()
            .entity_access(&self.codecs.user.encode(user), entity_type, entity);
        self.get_bool(url).await
    }

    async fn application_components_accessible_by_user(
        &self,
        user: &U,
    ) -> AccessResult<HashSet<(C, A)>> {
        let url = self
            .urls()
            .user_to_component_mappings(&self.codecs.user.encode(user), true);
        self.get_pair_set(
            url,
            (APPLICATION_COMPONENT, ACCESS_LEVEL),
            (
                self.codecs.application_component.as_ref(),
                self.codecs.access_level.as_ref(),
            ),
        )
        .await
    }

    async fn application_components_accessible_by_group(
        &self,
        group: &G,
    ) -> AccessResult<HashSet<(C, A)>> {
        let url = self
            .urls()
            .group_to_component_mappings(&self.codecs.group.encode(group), true);
        self.get_pair_set(
            url,
            (APPLICATION_COMPONENT, ACCESS_LEVEL),
            (
                self.codecs.application_component.as_ref(),
                self.codecs.access_level.as_ref(),
            ),
        )
        .await
    }

    async fn entities_accessible_by_user(
        &self,
        user: &U,
    ) -> AccessResult<HashSet<(String, String)>> {
        let url = self
            .urls()
            .user_to_entity_mappings(&self.codecs.user.encode(user), true);
        self.get_pair_set(url, (ENTITY_TYPE, ENTITY), (identity(), identity()))
            .await
    }

    async fn entities_of_type_accessible_by_user(
        &self,
        user: &U,
        entity_type: &str,
    ) -> AccessResult<HashSet<String>> {
        let url = self.urls().user_to_entity_mappings_of_type(
            &self.codecs.user.encode(user),
            entity_type,
            true,
        );
        self.get_set(url, identity(), ENTITY).await
    }

    async fn entities_accessible_by_group(
        &self,
        group: &G,
    ) -> AccessResult<HashSet<(String, String)>> {
        let url = self
            .urls()
            .group_to_entity_mappings(&self.codecs.group.encode(group), true);
        self.get_pair_set(url, (ENTITY_TYPE, ENTITY), (identity(), identity()))
            .await
    }

    async fn entities_of_type_accessible_by_group(
        &self,
        group: &G,
        entity_type: &str,
    ) -> AccessResult<HashSet<String>> {
        let url = self.urls().group_to_entity_mappings_of_type(
            &self.codecs.group.encode(group),
            entity_type,
            true,
        );
        self.get_set(url, identity(), ENTITY).await
    }
}
