//! Build environment operations over a [`crate::graph::ConfigGraph`].

pub mod filter;
pub mod insert;
pub mod list;
pub mod resolver;

pub use insert::{CommitPlan, InsertRequest, plan_insert};
pub use list::{BuildEnvEntry, list_build_envs};
