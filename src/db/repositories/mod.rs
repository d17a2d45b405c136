//! Database repositories
//!
//! Repository pattern implementations for database access.
//! Each repository handles CRUD operations for a specific entity.

pub mod admin;
pub mod member;
pub mod news;
pub mod publication;
pub mod seminar;
pub mod service_item;

pub use admin::{AdminRepository, SqlxAdminRepository};
pub use member::{MemberRepository, SqlxMemberRepository};
pub use news::{NewsRepository, SqlxNewsRepository};
pub use publication::{PublicationRepository, SqlxPublicationRepository};
pub use seminar::{SeminarRepository, SqlxSeminarRepository};
pub use service_item::{ServiceItemRepository, SqlxServiceItemRepository};
