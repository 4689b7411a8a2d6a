//! Subcommand implementations.

pub(crate) mod evaluate;
pub(crate) mod prepare;
pub(crate) mod summary;
