pub mod api;
pub mod config;
pub mod descriptor;
pub mod errors;
pub mod materialize;
pub mod preview;
pub mod template;
pub mod vfs;

mod utils;

pub use api::{bootstrap, BootstrapRequest, Outcome, SproutError};
pub use config::Settings;
pub use descriptor::PackageDescriptor;
pub use vfs::FileTreeNode;
