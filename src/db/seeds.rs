//! Seed data sets
//!
//! Default data inserted by the `seed` binary. The rows live here, separate
//! from the seeding logic in `services::seed`, so deployments can review or
//! replace the content without touching the runner.
//!
//! The default sets ship empty; site operators fill them in per deployment.

use crate::models::{NewPublication, NewSeminar, NewServiceItem};

/// Publications to seed. Deduplicated by title at insert time.
pub fn default_publications() -> Vec<NewPublication> {
    vec![]
}

/// Seminars to seed. Attributed to the earliest-created admin.
pub fn default_seminars() -> Vec<NewSeminar> {
    vec![]
}

/// Services to seed.
pub fn default_services() -> Vec<NewServiceItem> {
    vec![]
}
