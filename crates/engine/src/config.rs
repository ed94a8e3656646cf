use derive_builder::Builder;
use mfl_core::LengthOptions;
use std::path::PathBuf;

/// Extensions checked when walking directories.
pub const DEFAULT_EXTENSIONS: &[&str] = &["py", "pyi"];

#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct WalkOptions {
    #[builder(default)]
    pub roots: Vec<PathBuf>,
    #[builder(default)]
    pub hidden: bool,
    #[builder(default = "true")]
    pub git_ignore: bool,
    #[builder(default)]
    pub max_depth: Option<usize>,
    #[builder(default)]
    pub follow_links: bool,
    /// Gitignore-style globs; matching files and directories are skipped.
    #[builder(default)]
    pub exclude: Vec<String>,
    /// Extensions (without the dot) of files picked up while walking.
    #[builder(default = "default_extensions()")]
    pub extensions: Vec<String>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            roots: vec![],
            hidden: false,
            git_ignore: true,
            max_depth: None,
            follow_links: false,
            exclude: vec![],
            extensions: default_extensions(),
        }
    }
}

#[must_use]
pub fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|&ext| ext.to_owned()).collect()
}

#[derive(Debug, Clone, Default, Builder)]
#[builder(setter(into))]
pub struct Config {
    #[builder(default)]
    pub walk: WalkOptions,
    #[builder(default)]
    pub length: LengthOptions,

    /// Abort on the first file that cannot be read or scanned.
    #[builder(default)]
    pub strict: bool,
    /// Report violations even on lines marked `# noqa`.
    #[builder(default)]
    pub disable_noqa: bool,
}
