// ABOUTME: Core library for mockapi: domain records, seed catalog, placeholder generation,
// ABOUTME: pagination helpers, and the in-memory store that every route reads and mutates.

pub mod filler;
pub mod model;
pub mod pagination;
pub mod seed;
pub mod store;

pub use model::{CatalogOrg, Library, LibraryElement, Organization, OrganizationUser, Role, User};
pub use pagination::{CursorPage, OffsetPage, cursor_page, paginate, parse_lenient};
pub use store::{CreatedContext, MockStore, StoreError};
