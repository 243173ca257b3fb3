//! sea-orm entity models for the `projects`, `tags` and `tasks` tables.

pub mod project;
pub mod tag;
pub mod task;
