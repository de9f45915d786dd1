//! sortdir - sort a flat directory into category subdirectories
//!
//! Each entry of the target directory is classified by its extension and
//! renamed into a destination such as `Images/Raw` or `Code/Python`. Image
//! files take their `.xmp` sidecars along; unclaimed sidecars go to `Misc`.
//! Category directories are never re-sorted, so repeated runs are harmless.

pub mod cli;
pub mod config;
pub mod file_category;
pub mod file_organizer;
pub mod organizer;
pub mod output;

pub use config::{ConfigError, SkipRules, SortConfig};
pub use file_category::{Category, Destination, Subcategory, classify};
pub use file_organizer::{FileOrganizer, OrganizeError};
pub use organizer::{MoveKind, OrganizeReport, Organizer};

pub use cli::{Cli, CliError, run_cli};
