//! CLI subcommand implementations.

pub mod equipment;
pub mod import;
pub mod intervals;
pub mod record;
pub mod status;
pub mod summary;
pub mod util;
