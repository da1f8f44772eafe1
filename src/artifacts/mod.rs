//! Input artifact selection and output directory resolution.

pub mod resolver;
pub mod selector;
pub mod set;

pub use resolver::resolve_report_dir;
pub use selector::{select_all, select_latest, select_latest_matching, ArtifactKind};
pub use set::{resolve_artifacts, ArtifactSet};
