// ABOUTME: MockStore holds every in-memory table (libraries, organizations, memberships, users)
// ABOUTME: and implements the read/mutate operations behind each route as plain synchronous methods.

use std::collections::HashMap;

use chrono::Utc;
use rand::Rng;
use thiserror::Error;

use crate::filler;
use crate::model::{CatalogOrg, Library, LibraryElement, Organization, OrganizationUser, Role, User};
use crate::seed;

/// Failures of store operations. Each maps to a fixed HTTP status at the API edge.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("library not found: {0}")]
    LibraryNotFound(String),

    #[error("library {library_id} does not belong to {org}")]
    LibraryNotInOrganization { library_id: String, org: CatalogOrg },

    #[error("context {context_id} not found in library {library_id}")]
    ContextNotFound { library_id: String, context_id: String },

    #[error("organization not found: {0}")]
    OrganizationNotFound(String),

    #[error("user {user_id} is already a member of {organization_id}")]
    AlreadyMember { organization_id: String, user_id: String },

    #[error("user {user_id} is not a member of {organization_id}")]
    MembershipNotFound { organization_id: String, user_id: String },
}

/// Result of creating a context in a library.
#[derive(Debug, Clone)]
pub struct CreatedContext {
    pub element: LibraryElement,
    pub context_count: usize,
}

/// Process-lifetime tables. Nothing is persisted; a new store starts from the seed data.
#[derive(Debug, Clone)]
pub struct MockStore {
    libraries: Vec<Library>,
    organizations: Vec<Organization>,
    memberships: HashMap<String, Vec<OrganizationUser>>,
    users: HashMap<String, User>,
}

impl Default for MockStore {
    fn default() -> Self {
        Self {
            libraries: seed::libraries(),
            organizations: seed::organizations(),
            memberships: HashMap::new(),
            users: HashMap::new(),
        }
    }
}

impl MockStore {
    /// Create a store populated with the seed catalog and organizations.
    pub fn new() -> Self {
        Self::default()
    }

    // ---- library catalog ----

    /// Libraries owned by `org`, in catalog order.
    pub fn catalog(&self, org: CatalogOrg) -> impl Iterator<Item = &Library> {
        self.libraries.iter().filter(move |lib| lib.org == org)
    }

    pub fn library(&self, id: &str) -> Option<&Library> {
        self.libraries.iter().find(|lib| lib.id == id)
    }

    /// Look up a library and check that `org` owns it. Unknown ids are reported
    /// before ownership.
    pub fn owned_library(&self, org: CatalogOrg, id: &str) -> Result<&Library, StoreError> {
        let library = self
            .library(id)
            .ok_or_else(|| StoreError::LibraryNotFound(id.to_string()))?;
        if library.org != org {
            return Err(StoreError::LibraryNotInOrganization {
                library_id: id.to_string(),
                org,
            });
        }
        Ok(library)
    }

    /// Libraries of `org` whose title, or any element title/description, contains
    /// `needle` (already trimmed and lower-cased). An empty needle keeps everything.
    ///
    /// Filler descriptions are generated only to test them against the needle and
    /// are thrown away afterwards.
    pub fn search_catalog<R: Rng + ?Sized>(
        &self,
        org: CatalogOrg,
        needle: &str,
        rng: &mut R,
    ) -> Vec<Library> {
        self.catalog(org)
            .filter(|lib| needle.is_empty() || library_matches(lib, needle, rng))
            .cloned()
            .collect()
    }

    /// Full element list of an owned library, filtered by `needle` when non-empty.
    pub fn library_elements<R: Rng + ?Sized>(
        &self,
        org: CatalogOrg,
        id: &str,
        needle: &str,
        rng: &mut R,
    ) -> Result<(Library, Vec<LibraryElement>), StoreError> {
        let library = self.owned_library(org, id)?;
        let mut elements = filler::materialize(library, rng);
        if !needle.is_empty() {
            elements.retain(|el| el.matches(needle));
        }
        Ok((library.clone(), elements))
    }

    /// Store a new context in an owned library and bump its `contextCount`.
    pub fn add_context<R: Rng + ?Sized>(
        &mut self,
        org: CatalogOrg,
        library_id: &str,
        description: &str,
        rng: &mut R,
    ) -> Result<CreatedContext, StoreError> {
        self.owned_library(org, library_id)?;
        let element = LibraryElement {
            id: filler::random_id(rng),
            title: description.to_string(),
            category: filler::random_category(rng).to_string(),
            description: description.to_string(),
        };

        let library = self
            .libraries
            .iter_mut()
            .find(|lib| lib.id == library_id)
            .ok_or_else(|| StoreError::LibraryNotFound(library_id.to_string()))?;
        library.stored.push(element.clone());
        library.context_count += 1;

        tracing::debug!(
            library_id,
            context_id = %element.id,
            context_count = library.context_count,
            "stored new context"
        );

        Ok(CreatedContext {
            element,
            context_count: library.context_count,
        })
    }

    /// Find a stored context. Filler elements are never addressable. Ownership is
    /// checked only when `org` is given.
    pub fn context(
        &self,
        org: Option<CatalogOrg>,
        library_id: &str,
        context_id: &str,
    ) -> Result<(&Library, &LibraryElement), StoreError> {
        let library = match org {
            Some(org) => self.owned_library(org, library_id)?,
            None => self
                .library(library_id)
                .ok_or_else(|| StoreError::LibraryNotFound(library_id.to_string()))?,
        };
        let element = library
            .stored
            .iter()
            .find(|el| el.id == context_id)
            .ok_or_else(|| StoreError::ContextNotFound {
                library_id: library_id.to_string(),
                context_id: context_id.to_string(),
            })?;
        Ok((library, element))
    }

    // ---- organizations and membership ----

    /// All organizations in insertion order.
    pub fn organizations(&self) -> &[Organization] {
        &self.organizations
    }

    pub fn organization(&self, id: &str) -> Option<&Organization> {
        self.organizations.iter().find(|org| org.id == id)
    }

    /// Create an organization and make its owner an admin member.
    pub fn create_organization<R: Rng + ?Sized>(
        &mut self,
        name: &str,
        description: &str,
        owner_id: &str,
        rng: &mut R,
    ) -> Organization {
        let now = Utc::now();
        let organization = Organization {
            id: filler::random_id(rng),
            name: name.to_string(),
            description: description.to_string(),
            owner_id: owner_id.to_string(),
            created_at: now,
        };

        self.memberships.insert(
            organization.id.clone(),
            vec![OrganizationUser {
                user_id: owner_id.to_string(),
                organization_id: organization.id.clone(),
                role: Role::Admin,
                added_at: now,
            }],
        );
        self.organizations.push(organization.clone());
        organization
    }

    /// Membership rows of an existing organization, in insertion order.
    pub fn members(&self, organization_id: &str) -> Result<&[OrganizationUser], StoreError> {
        self.require_organization(organization_id)?;
        Ok(self
            .memberships
            .get(organization_id)
            .map(Vec::as_slice)
            .unwrap_or(&[]))
    }

    /// Add `user_id` to an organization. A user can hold only one row per organization,
    /// whatever the role.
    pub fn add_member(
        &mut self,
        organization_id: &str,
        user_id: &str,
        role: Role,
    ) -> Result<&OrganizationUser, StoreError> {
        self.require_organization(organization_id)?;
        let rows = self.memberships.entry(organization_id.to_string()).or_default();
        if rows.iter().any(|row| row.user_id == user_id) {
            return Err(StoreError::AlreadyMember {
                organization_id: organization_id.to_string(),
                user_id: user_id.to_string(),
            });
        }
        rows.push(OrganizationUser {
            user_id: user_id.to_string(),
            organization_id: organization_id.to_string(),
            role,
            added_at: Utc::now(),
        });
        let index = rows.len() - 1;
        Ok(&rows[index])
    }

    pub fn remove_member(
        &mut self,
        organization_id: &str,
        user_id: &str,
    ) -> Result<OrganizationUser, StoreError> {
        self.require_organization(organization_id)?;
        let not_found = || StoreError::MembershipNotFound {
            organization_id: organization_id.to_string(),
            user_id: user_id.to_string(),
        };
        let rows = self.memberships.get_mut(organization_id).ok_or_else(not_found)?;
        let index = rows
            .iter()
            .position(|row| row.user_id == user_id)
            .ok_or_else(not_found)?;
        Ok(rows.remove(index))
    }

    /// Whether `user_id` may perform `action` on the resource. Only organizations are
    /// modelled: any member may read; write and delete need the admin role. Unknown
    /// resource types, actions, or non-members are denied.
    pub fn check_access(
        &self,
        user_id: &str,
        action: &str,
        resource_type: &str,
        resource_id: &str,
    ) -> bool {
        if resource_type != "organization" {
            return false;
        }
        let Some(row) = self
            .memberships
            .get(resource_id)
            .and_then(|rows| rows.iter().find(|row| row.user_id == user_id))
        else {
            return false;
        };
        match action {
            "read" => true,
            "write" | "delete" => row.role == Role::Admin,
            _ => false,
        }
    }

    // ---- users ----

    /// Fabricate a new user and record it. Every call yields a different user.
    pub fn fabricate_user<R: Rng + ?Sized>(&mut self, rng: &mut R) -> User {
        let user = filler::fake_user(rng);
        self.users
            .entry(user.user_id.clone())
            .or_insert_with(|| user.clone());
        user
    }

    pub fn user(&self, user_id: &str) -> Option<&User> {
        self.users.get(user_id)
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    fn require_organization(&self, organization_id: &str) -> Result<(), StoreError> {
        if self.organization(organization_id).is_none() {
            return Err(StoreError::OrganizationNotFound(organization_id.to_string()));
        }
        Ok(())
    }
}

fn library_matches<R: Rng + ?Sized>(library: &Library, needle: &str, rng: &mut R) -> bool {
    if library.title.to_lowercase().contains(needle) {
        return true;
    }
    if library.stored.iter().any(|el| el.matches(needle)) {
        return true;
    }
    (library.stored.len()..library.context_count)
        .any(|index| filler::filler_element(&library.id, index, rng).matches(needle))
}
