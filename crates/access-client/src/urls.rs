//! URL templates for the access manager REST API.
//!
//! Every element value is percent-encoded as a single path segment, so a
//! value containing `/`, `?` or spaces cannot change the shape of the URL.
//! Values arrive here already converted to their wire strings by the
//! element codecs.

use std::borrow::Cow;

const API_PATH: &str = "api/v1/";
const INCLUDE_INDIRECT_PARAMETER: &str = "includeIndirectMappings";

fn segment(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

/// Builds request URLs below `{base_url}api/v1/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiUrls {
    root: String,
}

impl ApiUrls {
    /// Creates the builder, adding a trailing `/` to `base_url` if missing.
    pub fn new(base_url: &str) -> Self {
        let base_url = base_url.trim();
        let separator = if base_url.ends_with('/') { "" } else { "/" };
        Self {
            root: format!("{base_url}{separator}{API_PATH}"),
        }
    }

    /// The API root, ending in `api/v1/`.
    pub fn root(&self) -> &str {
        &self.root
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.root)
    }

    fn url_with_indirect(&self, path: &str, include_indirect: bool) -> String {
        format!(
            "{}{path}?{INCLUDE_INDIRECT_PARAMETER}={include_indirect}",
            self.root
        )
    }

    // -- Users and groups ---------------------------------------------------

    pub fn users(&self) -> String {
        self.url("users")
    }

    pub fn user(&self, user: &str) -> String {
        self.url(&format!("users/{}", segment(user)))
    }

    pub fn groups(&self) -> String {
        self.url("groups")
    }

    pub fn group(&self, group: &str) -> String {
        self.url(&format!("groups/{}", segment(group)))
    }

    // -- User and group mappings ----------------------------------------------

    pub fn user_to_group_mapping(&self, user: &str, group: &str) -> String {
        self.url(&format!(
            "userToGroupMappings/user/{}/group/{}",
            segment(user),
            segment(group)
        ))
    }

    pub fn user_to_group_mappings(&self, user: &str, include_indirect: bool) -> String {
        self.url_with_indirect(
            &format!("userToGroupMappings/user/{}", segment(user)),
            include_indirect,
        )
    }

    pub fn group_to_user_mappings(&self, group: &str, include_indirect: bool) -> String {
        self.url_with_indirect(
            &format!("groupToUserMappings/group/{}", segment(group)),
            include_indirect,
        )
    }

    pub fn group_to_group_mapping(&self, from_group: &str, to_group: &str) -> String {
        self.url(&format!(
            "groupToGroupMappings/fromGroup/{}/toGroup/{}",
            segment(from_group),
            segment(to_group)
        ))
    }

    pub fn group_to_group_mappings(&self, group: &str, include_indirect: bool) -> String {
        self.url_with_indirect(
            &format!("groupToGroupMappings/group/{}", segment(group)),
            include_indirect,
        )
    }

    pub fn group_to_group_reverse_mappings(&self, group: &str, include_indirect: bool) -> String {
        self.url_with_indirect(
            &format!("groupToGroupReverseMappings/group/{}", segment(group)),
            include_indirect,
        )
    }

    // -- Application component and access level mappings -----------------------

    pub fn user_to_component_mapping(&self, user: &str, component: &str, access_level: &str) -> String {
        self.url(&format!(
            "userToApplicationComponentAndAccessLevelMappings/user/{}/applicationComponent/{}/accessLevel/{}",
            segment(user),
            segment(component),
            segment(access_level)
        ))
    }

    pub fn user_to_component_mappings(&self, user: &str, include_indirect: bool) -> String {
        self.url_with_indirect(
            &format!(
                "userToApplicationComponentAndAccessLevelMappings/user/{}",
                segment(user)
            ),
            include_indirect,
        )
    }

    pub fn component_to_user_mappings(
        &self,
        component: &str,
        access_level: &str,
        include_indirect: bool,
    ) -> String {
        self.url_with_indirect(
            &format!(
                "applicationComponentAndAccessLevelToUserMappings/applicationComponent/{}/accessLevel/{}",
                segment(component),
                segment(access_level)
            ),
            include_indirect,
        )
    }

    pub fn group_to_component_mapping(&self, group: &str, component: &str, access_level: &str) -> String {
        self.url(&format!(
            "groupToApplicationComponentAndAccessLevelMappings/group/{}/applicationComponent/{}/accessLevel/{}",
            segment(group),
            segment(component),
            segment(access_level)
        ))
    }

    pub fn group_to_component_mappings(&self, group: &str, include_indirect: bool) -> String {
        self.url_with_indirect(
            &format!(
                "groupToApplicationComponentAndAccessLevelMappings/group/{}",
                segment(group)
            ),
            include_indirect,
        )
    }

    pub fn component_to_group_mappings(
        &self,
        component: &str,
        access_level: &str,
        include_indirect: bool,
    ) -> String {
        self.url_with_indirect(
            &format!(
                "applicationComponentAndAccessLevelToGroupMappings/applicationComponent/{}/accessLevel/{}",
                segment(component),
                segment(access_level)
            ),
            include_indirect,
        )
    }

    // -- Entity types and entities ------------------------------------------

    pub fn entity_types(&self) -> String {
        self.url("entityTypes")
    }

    pub fn entity_type(&self, entity_type: &str) -> String {
        self.url(&format!("entityTypes/{}", segment(entity_type)))
    }

    pub fn entities(&self, entity_type: &str) -> String {
        self.url(&format!("entityTypes/{}/entities", segment(entity_type)))
    }

    pub fn entity(&self, entity_type: &str, entity: &str) -> String {
        self.url(&format!(
            "entityTypes/{}/entities/{}",
            segment(entity_type),
            segment(entity)
        ))
    }

    // -- Entity mappings ----------------------------------------------------

    pub fn user_to_entity_mapping(&self, user: &str, entity_type: &str, entity: &str) -> String {
        self.url(&format!(
            "userToEntityMappings/user/{}/entityType/{}/entity/{}",
            segment(user),
            segment(entity_type),
            segment(entity)
        ))
    }

    pub fn user_to_entity_mappings(&self, user: &str, include_indirect: bool) -> String {
        self.url_with_indirect(
            &format!("userToEntityMappings/user/{}", segment(user)),
            include_indirect,
        )
    }

    pub fn user_to_entity_mappings_of_type(
        &self,
        user: &str,
        entity_type: &str,
        include_indirect: bool,
    ) -> String {
        self.url_with_indirect(
            &format!(
                "userToEntityMappings/user/{}/entityType/{}",
                segment(user),
                segment(entity_type)
            ),
            include_indirect,
        )
    }

    pub fn entity_to_user_mappings(&self, entity_type: &str, entity: &str, include_indirect: bool) -> String {
        self.url_with_indirect(
            &format!(
                "entityToUserMappings/entityType/{}/entity/{}",
                segment(entity_type),
                segment(entity)
            ),
            include_indirect,
        )
    }

    pub fn group_to_entity_mapping(&self, group: &str, entity_type: &str, entity: &str) -> String {
        self.url(&format!(
            "groupToEntityMappings/group/{}/entityType/{}/entity/{}",
            segment(group),
            segment(entity_type),
            segment(entity)
        ))
    }

    pub fn group_to_entity_mappings(&self, group: &str, include_indirect: bool) -> String {
        self.url_with_indirect(
            &format!("groupToEntityMappings/group/{}", segment(group)),
            include_indirect,
        )
    }

    pub fn group_to_entity_mappings_of_type(
        &self,
        group: &str,
        entity_type: &str,
        include_indirect: bool,
    ) -> String {
        self.url_with_indirect(
            &format!(
                "groupToEntityMappings/group/{}/entityType/{}",
                segment(group),
                segment(entity_type)
            ),
            include_indirect,
        )
    }

    pub fn entity_to_group_mappings(&self, entity_type: &str, entity: &str, include_indirect: bool) -> String {
        self.url_with_indirect(
            &format!(
                "entityToGroupMappings/entityType/{}/entity/{}",
                segment(entity_type),
                segment(entity)
            ),
            include_indirect,
        )
    }

    // -- Access checks --------------------------------------------------------

    pub fn component_access(&self, user: &str, component: &str, access_level: &str) -> String {
        self.url(&format!(
            "dataElementAccess/applicationComponent/user/{}/applicationComponent/{}/accessLevel/{}",
            segment(user),
            segment(component),
            segment(access_level)
        ))
    }

    pub fn entity_access(&self, user: &str, entity_type: &str, entity: &str) -> String {
        self.url(&format!(
            "dataElementAccess/entity/user/{}/entityType/{}/entity/{}",
            segment(user),
            segment(entity_type),
            segment(entity)
        ))
    }
}
