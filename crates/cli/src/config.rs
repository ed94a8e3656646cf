// crates/cli/src/config.rs
//! Resolve command line arguments and settings into the engine [`Config`].
//!
//! Precedence is command line, then settings file, then defaults. The
//! `--mfl-include-*` switches can only turn an option on.

use crate::args::Args;
use crate::error::{AppError, Result};
pub use mfl_engine::config::{Config, ConfigBuilder, WalkOptions, WalkOptionsBuilder, default_extensions};
use mfl_core::LengthOptions;
use mfl_engine::settings::FileSettings;
use std::path::PathBuf;

/// Settings selected by `--config` / `--isolated`, or found by searching
/// upwards from the working directory.
///
/// # Errors
///
/// Returns an error when the chosen settings file cannot be read or parsed.
pub fn load_settings(args: &Args) -> Result<Option<(PathBuf, FileSettings)>> {
    if args.settings.isolated {
        return Ok(None);
    }
    if let Some(path) = &args.settings.config {
        return Ok(Some((path.clone(), FileSettings::from_file(path)?)));
    }
    Ok(mfl_engine::discover_settings()?)
}

#[must_use]
pub fn length_options(args: &Args, settings: &FileSettings) -> LengthOptions {
    let length = &args.length;
    LengthOptions {
        max_length: length
            .max_function_length
            .or(settings.max_function_length)
            .unwrap_or_default(),
        include_function_definition: length.include_function_definition
            || settings.include_function_definition.unwrap_or(false),
        include_docstring: length.include_docstring || settings.include_docstring.unwrap_or(false),
        include_empty_lines: length.include_empty_lines
            || settings.include_empty_lines.unwrap_or(false),
        include_comment_lines: length.include_comment_lines
            || settings.include_comment_lines.unwrap_or(false),
        include_decorators: length.include_decorators
            || settings.include_decorators.unwrap_or(false),
    }
}

/// # Errors
///
/// Returns [`AppError::Config`] if a builder rejects the values.
pub fn walk_options(args: &Args, settings: &FileSettings) -> Result<WalkOptions> {
    let mut exclude = if args.walk.exclude.is_empty() {
        settings.exclude.clone().unwrap_or_default()
    } else {
        args.walk.exclude.clone()
    };
    exclude.extend(args.walk.extend_exclude.iter().cloned());

    WalkOptionsBuilder::default()
        .roots(args.paths.clone())
        .hidden(args.walk.hidden)
        .git_ignore(!args.walk.no_gitignore)
        .max_depth(args.walk.max_depth)
        .follow_links(args.walk.follow_links)
        .exclude(exclude)
        .extensions(
            settings
                .extensions
                .clone()
                .unwrap_or_else(default_extensions),
        )
        .build()
        .map_err(|e| AppError::Config(e.to_string()))
}

/// # Errors
///
/// Returns [`AppError::Config`] if a builder rejects the values.
pub fn build_config(args: &Args, settings: &FileSettings) -> Result<Config> {
    ConfigBuilder::default()
        .walk(walk_options(args, settings)?)
        .length(length_options(args, settings))
        .strict(args.output.strict)
        .disable_noqa(args.output.disable_noqa)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use mfl_core::MaxLength;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("mfl").chain(argv.iter().copied())).unwrap()
    }

    fn settings() -> FileSettings {
        FileSettings::parse(
            "max-function-length = 20\nmfl-include-docstring = true\nexclude = [\"build\"]\nextensions = [\"py\"]\n",
        )
        .unwrap()
    }

    #[test]
    fn test_defaults_without_settings() {
        let config = build_config(&args(&[]), &FileSettings::default()).unwrap();
        assert_eq!(config.length, LengthOptions::default());
        assert_eq!(config.walk.roots, vec![PathBuf::from(".")]);
        assert_eq!(config.walk.extensions, vec!["py", "pyi"]);
        assert!(config.walk.git_ignore);
        assert_eq!(config.walk.max_depth, None);
        assert!(!config.walk.follow_links);
    }

    #[test]
    fn test_settings_fill_in_unset_options() {
        let config = build_config(&args(&[]), &settings()).unwrap();
        assert_eq!(config.length.max_length.get(), 20);
        assert!(config.length.include_docstring);
        assert!(!config.length.include_empty_lines);
        assert_eq!(config.walk.exclude, vec!["build"]);
        assert_eq!(config.walk.extensions, vec!["py"]);
    }

    #[test]
    fn test_command_line_wins() {
        let config = build_config(
            &args(&[
                "--max-function-length",
                "5",
                "--mfl-include-empty-lines",
                "--exclude",
                "dist",
                "--extend-exclude",
                "gen,tmp",
                "--no-gitignore",
                "--max-depth",
                "3",
                "--follow-links",
                "--strict",
            ]),
            &settings(),
        )
        .unwrap();
        assert_eq!(config.length.max_length, MaxLength::new(5).unwrap());
        assert!(config.length.include_docstring);
        assert!(config.length.include_empty_lines);
        assert_eq!(config.walk.exclude, vec!["dist", "gen", "tmp"]);
        assert!(!config.walk.git_ignore);
        assert_eq!(config.walk.max_depth, Some(3));
        assert!(config.walk.follow_links);
        assert!(config.strict);
    }

    #[test]
    fn test_extend_exclude_keeps_settings() {
        let config = build_config(&args(&["--extend-exclude", "gen"]), &settings()).unwrap();
        assert_eq!(config.walk.exclude, vec!["build", "gen"]);
    }

    #[test]
    fn test_isolated_skips_settings() {
        assert!(load_settings(&args(&["--isolated"])).unwrap().is_none());
    }
}
