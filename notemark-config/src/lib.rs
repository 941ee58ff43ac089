//! Configuration for notemark: where notes live, how wide image previews get, and the theme
//! used to measure tables and attachments.
//!
//! The defaults in `defaults/notemark.default.toml` are compiled in. [`Loader`] stacks files and
//! single-key overrides on top of them, later layers winning, and deserializes the result into
//! [`NotemarkConfig`]. Convert it into a [`Theme`] with `Theme::from(&config)`.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use notemark::style::{Palette, TableLayout, Theme};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../defaults/notemark.default.toml");

/// The merged configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct NotemarkConfig {
    pub notes: NotesConfig,
    pub images: ImagesConfig,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotesConfig {
    pub root: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImagesConfig {
    pub max_width: f32,
}

/// The configurable part of [`Theme`]. Layout constants that are not listed here keep their
/// built-in values.
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeConfig {
    pub body_size: f32,
    pub heading_sizes: [f32; 6],
    pub line_spacing: f32,
    pub paragraph_spacing: f32,
    pub colors: Palette,
    pub table: TableConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableConfig {
    pub padding_h: f32,
    pub padding_v: f32,
    pub min_column_width: f32,
    pub max_width: f32,
}

impl NotemarkConfig {
    /// The notes root with a leading `~` expanded from `$HOME`.
    pub fn notes_root(&self) -> PathBuf {
        let home = std::env::var_os("HOME").map(PathBuf::from);
        self.notes_root_with_home(home.as_deref())
    }

    /// Like [`notes_root`](Self::notes_root) with an explicit home directory. Without one, the
    /// path is returned as written.
    pub fn notes_root_with_home(&self, home: Option<&Path>) -> PathBuf {
        expand_home(&self.notes.root, home)
    }

    /// The home directory used for `~/` image paths.
    pub fn home_dir(&self) -> Option<PathBuf> {
        std::env::var_os("HOME").map(PathBuf::from)
    }
}

fn expand_home(path: &str, home: Option<&Path>) -> PathBuf {
    match (path, home) {
        ("~", Some(home)) => home.to_path_buf(),
        (path, Some(home)) if path.starts_with("~/") => home.join(&path[2..]),
        (path, _) => PathBuf::from(path),
    }
}

impl From<&NotemarkConfig> for Theme {
    fn from(config: &NotemarkConfig) -> Self {
        let defaults = Theme::default();
        let theme = &config.theme;
        Theme {
            body_size: theme.body_size,
            heading_sizes: theme.heading_sizes,
            colors: theme.colors,
            line_spacing: theme.line_spacing,
            paragraph_spacing: theme.paragraph_spacing,
            table: TableLayout {
                padding_h: theme.table.padding_h,
                padding_v: theme.table.padding_v,
                min_column_width: theme.table.min_column_width,
                max_width: theme.table.max_width,
                ..defaults.table
            },
            image_max_width: config.images.max_width,
            ..defaults
        }
    }
}

impl From<NotemarkConfig> for Theme {
    fn from(config: NotemarkConfig) -> Self {
        Theme::from(&config)
    }
}

/// Builds a [`NotemarkConfig`] from layered sources
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Only the compiled-in defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Stack a TOML file that must exist.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Stack a TOML file if it exists, such as `./notemark.toml`.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Set one dotted key, e.g. `images.max_width`, above every file.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merge the layers. Fails on unreadable files and on values of the wrong type.
    pub fn build(self) -> Result<NotemarkConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The compiled-in configuration.
pub fn load_defaults() -> Result<NotemarkConfig, ConfigError> {
    Loader::new().build()
}
