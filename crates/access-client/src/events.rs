//! [`AccessManagerEventProcessor`] over HTTP: POST adds, DELETE removes.

use access_domain::{AccessManagerEventProcessor, AccessResult, Element, HttpMethod};
use async_trait::async_trait;

use crate::client::AccessManagerClient;

#[async_trait]
impl<U, G, C, A> AccessManagerEventProcessor<U, G, C, A> for AccessManagerClient<U, G, C, A>
where
    U: Element,
    G: Element,
    C: Element,
    A: Element,
{
    async fn add_user(&self, user: &U) -> AccessResult<()> {
        let url = self.urls().user(&self.codecs.user.encode(user));
        self.send_event(HttpMethod::Post, url).await
    }

    async fn remove_user(&self, user: &U) -> AccessResult<()> {
        let url = self.urls().user(&self.codecs.user.encode(user));
        self.send_event(HttpMethod::Delete, url).await
    }

    async fn add_group(&self, group: &G) -> AccessResult<()> {
        let url = self.urls().group(&self.codecs.group.encode(group));
        self.send_event(HttpMethod::Post, url).await
    }

    async fn remove_group(&self, group: &G) -> AccessResult<()> {
        let url = self.urls().group(&self.codecs.group.encode(group));
        self.send_event(HttpMethod::Delete, url).await
    }

    async fn add_user_to_group_mapping(&self, user: &U, group: &G) -> AccessResult<()> {
        let url = self.user_to_group_mapping_url(user, group);
        self.send_event(HttpMethod::Post, url).await
    }

    async fn remove_user_to_group_mapping(&self, user: &U, group: &G) -> AccessResult<()> {
        let url = self.user_to_group_mapping_url(user, group);
        self.send_event(HttpMethod::Delete, url).await
    }

    async fn add_group_to_group_mapping(&self, from_group: &G, to_group: &G) -> AccessResult<()> {
        let url = self.group_to_group_mapping_url(from_group, to_group);
        self.send_event(HttpMethod::Post, url).await
    }

    async fn remove_group_to_group_mapping(
        &self,
        from_group: &G,
        to_group: &G,
    ) -> AccessResult<()> {
        let url = self.group_to_group_mapping_url(from_group, to_group);
        self.send_event(HttpMethod::Delete, url).await
    }

    async fn add_user_to_application_component_and_access_level_mapping(
        &self,
        user: &U,
        application_component: &C,
        access_level: &A,
    ) -> AccessResult<()> {
        let url = self.user_to_component_mapping_url(user, application_component, access_level);
        self.send_event(HttpMethod::Post, url).await
    }

    async fn remove_user_to_application_component_and_access_level_mapping(
        &self,
        user: &U,
        application_component: &C,
        access_level: &A,
    ) -> AccessResult<()> {
        let url = self.user_to_component_mapping_url(user, application_component, access_level);
        self.send_event(HttpMethod::Delete, url).await
    }

    async fn add_group_to_application_component_and_access_level_mapping(
        &self,
        group: &G,
        application_component: &C,
        access_level: &A,
    ) -> AccessResult<()> {
        let url = self.group_to_component_mapping_url(group, application_component, access_level);
        self.send_event(HttpMethod::Post, url).await
    }

    async fn remove_group_to_application_component_and_access_level_mapping(
        &self,
        group: &G,
        application_component: &C,
        access_level: &A,
    ) -> AccessResult<()> {
        let url = self.group_to_component_mapping_url(group, application_component, access_level);
        self.send_event(HttpMethod::Delete, url).await
    }

    async fn add_entity_type(&self, entity_type: &str) -> AccessResult<()> {
        let url = self.urls().entity_type(entity_type);
        self.send_event(HttpMethod::Post, url).await
    }

    async fn remove_entity_type(&self, entity_type: &str) -> AccessResult<()> {
        let url = self.urls().entity_type(entity_type);
        self.send_event(HttpMethod::Delete, url).await
    }

    async fn add_entity(&self, entity_type: &str, entity: &str) -> AccessResult<()> {
        let url = self.urls().entity(entity_type, entity);
        self.send_event(HttpMethod::Post, url).await
    }

    async fn remove_entity(&self, entity_type: &str, entity: &str) -> AccessResult<()> {
        let url = self.urls().entity(entity_type, entity);
        self.send_event(HttpMethod::Delete, url).await
    }

    async fn add_user_to_entity_mapping(
        &self,
        user: &U,
        entity_type: &str,
        entity: &str,
    ) -> AccessResult<()> {
        let url = self.urls().user_to_entity_mapping(
            &self.codecs.user.encode(user),
            entity_type,
            entity,
        );
        self.send_event(HttpMethod::Post, url).await
    }

    async fn remove_user_to_entity_mapping(
        &self,
        user: &U,
        entity_type: &str,
        entity: &str,
    ) -> AccessResult<()> {
        let url = self.urls().user_to_entity_mapping(
            &self.codecs.user.encode(user),
            entity_type,
            entity,
        );
        self.send_event(HttpMethod::Delete, url).await
    }

    async fn add_group_to_entity_mapping(
        &self,
        group: &G,
        entity_type: &str,
        entity: &str,
    ) -> AccessResult<()> {
        let url = self.urls().group_to_entity_mapping(
            &self.codecs.group.encode(group),
            entity_type,
            entity,
        );
        self.send_event(HttpMethod::Post, url).await
    }

    async fn remove_group_to_entity_mapping(
        &self,
        group: &G,
        entity_type: &str,
        entity: &str,
    ) -> AccessResult<()> {
        let url = self.urls().group_to_entity_mapping(
            &self.codecs.group.encode(group),
            entity_type,
            entity,
        );
        self.send_event(HttpMethod::Delete, url).await
    }
}

// ---------------------------------------------------------------------------
// URL helpers shared by the add/remove pairs
// ---------------------------------------------------------------------------

impl<U, G, C, A> AccessManagerClient<U, G, C, A> {
    fn user_to_group_mapping_url(&self, user: &U, group: &G) -> String {
        self.urls().user_to_group_mapping(
            &self.codecs.user.encode(user),
            &self.codecs.group.encode(group),
        )
    }

    fn group_to_group_mapping_url(&self, from_group: &G, to_group: &G) -> String {
        self.urls().group_to_group_mapping(
            &self.codecs.group.encode(from_group),
            &self.codecs.group.encode(to_group),
        )
    }

    fn user_to_component_mapping_url(&self, user: &U, component: &C, access_level: &A) -> String {
        self.urls().user_to_component_mapping(
            &self.codecs.user.encode(user),
            &self.codecs.application_component.encode(component),
            &self.codecs.access_level.encode(access_level),
        )
    }

    fn group_to_component_mapping_url(&self, group: &G, component: &C, access_level: &A) -> String {
        self.urls().group_to_component_mapping(
            &self.codecs.group.encode(group),
            &self.codecs.application_component.encode(component),
            &self.codecs.access_level.encode(access_level),
        )
    }
}
