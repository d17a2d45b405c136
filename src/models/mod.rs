//! Data models
//!
//! This module contains all data structures used throughout the Newsdesk
//! content system. Models represent:
//! - Database entities (News, Admin, Member, Publication, Seminar, ServiceItem)
//! - The ordered membership tier set gating content visibility
//! - Input and listing types for the service layer

mod admin;
mod member;
mod membership;
mod news;
mod publication;
mod seminar;
mod service_item;

pub use admin::{Admin, AdminRole};
pub use member::Member;
pub use membership::{MembershipTier, ALL_TIERS};
pub use news::{
    CreateNewsInput, ListParams, News, NewsPreview, NewsStatus, PagedResult, UpdateNewsInput,
};
pub use publication::{NewPublication, Publication};
pub use seminar::{NewSeminar, Seminar, SeminarStatus};
pub use service_item::{NewServiceItem, ServiceItem};
