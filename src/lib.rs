//! quill: a small personal blog server
//!
//! Posts are markdown files with YAML front-matter in a fixed directory.
//! Every page view re-reads the files from disk, so edits show up on the
//! next refresh without a rebuild step.

pub mod commands;
pub mod config;
pub mod content;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

/// The blog site: configuration plus resolved directories
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Directory holding the markdown post files
    pub posts_dir: std::path::PathBuf,
}

impl Site {
    /// Create a new Site instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let posts_dir = base_dir.join(&config.posts_dir);

        Ok(Self {
            config,
            base_dir,
            posts_dir,
        })
    }

    /// Create a loader bound to this site's posts directory
    pub fn loader(&self) -> content::PostLoader {
        content::PostLoader::new(&self.posts_dir)
    }
}
