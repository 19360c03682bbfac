pub mod component;
pub mod edit;
pub mod init;
pub mod page;
pub mod validate;
pub mod watch;

pub use component::{component, ComponentCommand};
pub use edit::{edit, EditArgs};
pub use init::{init, InitArgs};
pub use page::{page, PageCommand};
pub use validate::{validate, ValidateArgs};
pub use watch::{watch, WatchArgs};

use crate::config::Config;
use pagewright_content::FsContentStore;
use std::path::PathBuf;

/// Working directory and loaded config shared by every command
pub struct Context {
    pub cwd: PathBuf,
    pub config: Config,
}

impl Context {
    pub fn new(cwd: PathBuf, config: Config) -> Self {
        Self { cwd, config }
    }

    pub fn content_root(&self) -> PathBuf {
        self.config.content_root(&self.cwd)
    }

    pub fn store(&self) -> FsContentStore {
        FsContentStore::new(self.content_root())
    }
}
