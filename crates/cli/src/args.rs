// crates/cli/src/args.rs
use clap::{Args as ClapArgs, Parser, ValueEnum};
use mfl_core::MaxLength;
use std::path::PathBuf;

use crate::parsers::parse_max_length;

/// Report Python functions that are longer than a maximum length.
#[derive(Debug, Parser)]
#[command(name = "mfl", version, about, long_about = None)]
pub struct Args {
    /// Files or directories to check
    #[arg(value_name = "PATH", default_value = ".")]
    pub paths: Vec<PathBuf>,

    #[command(flatten)]
    pub length: LengthArgs,

    #[command(flatten)]
    pub settings: SettingsArgs,

    #[command(flatten)]
    pub walk: WalkArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Default, ClapArgs)]
#[allow(clippy::struct_excessive_bools)]
pub struct LengthArgs {
    /// Maximum allowed function length [default: 50]
    #[arg(long, value_name = "n", value_parser = parse_max_length)]
    pub max_function_length: Option<MaxLength>,

    /// Include the function definition line(s) when calculating the function length
    #[arg(long = "mfl-include-function-definition")]
    pub include_function_definition: bool,

    /// Include the length of the docstring when calculating the function length
    #[arg(long = "mfl-include-docstring")]
    pub include_docstring: bool,

    /// Include empty lines inside the function when calculating the function length
    #[arg(long = "mfl-include-empty-lines")]
    pub include_empty_lines: bool,

    /// Include comment lines when calculating the function length
    #[arg(long = "mfl-include-comment-lines")]
    pub include_comment_lines: bool,

    /// Include decorator lines (together with --mfl-include-function-definition)
    #[arg(long = "mfl-include-decorators")]
    pub include_decorators: bool,
}

#[derive(Debug, Default, ClapArgs)]
pub struct SettingsArgs {
    /// Read settings from this file instead of searching for one
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Ignore settings files
    #[arg(long, conflicts_with = "config")]
    pub isolated: bool,
}

#[derive(Debug, Default, ClapArgs)]
pub struct WalkArgs {
    /// Glob patterns to skip, replacing the configured list
    #[arg(long, value_name = "PATTERNS", value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Glob patterns to skip in addition to the configured list
    #[arg(long, value_name = "PATTERNS", value_delimiter = ',')]
    pub extend_exclude: Vec<String>,

    /// Check hidden files and directories
    #[arg(long)]
    pub hidden: bool,

    /// Do not honour .gitignore files
    #[arg(long)]
    pub no_gitignore: bool,

    /// Descend at most this many directories below each path
    #[arg(long, value_name = "n")]
    pub max_depth: Option<usize>,

    /// Follow symbolic links while walking directories
    #[arg(long)]
    pub follow_links: bool,
}

#[derive(Debug, Default, ClapArgs)]
#[allow(clippy::struct_excessive_bools)]
pub struct OutputArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Exit with status 0 even when violations are reported
    #[arg(long)]
    pub exit_zero: bool,

    /// Stop at the first file that cannot be read or scanned
    #[arg(long)]
    pub strict: bool,

    /// Report violations on lines marked `# noqa`
    #[arg(long)]
    pub disable_noqa: bool,

    /// More log output (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["mfl"]).unwrap();
        assert_eq!(args.paths, vec![PathBuf::from(".")]);
        assert_eq!(args.length.max_function_length, None);
        assert_eq!(args.output.format, OutputFormat::Text);
        assert!(!args.length.include_docstring);
    }

    #[test]
    fn test_option_names() {
        let args = Args::try_parse_from([
            "mfl",
            "--max-function-length",
            "10",
            "--mfl-include-function-definition",
            "--mfl-include-docstring",
            "--mfl-include-empty-lines",
            "--mfl-include-comment-lines",
            "--mfl-include-decorators",
            "--exclude",
            "build,dist",
            "--format",
            "json",
            "-vv",
            "src",
        ])
        .unwrap();
        assert_eq!(args.length.max_function_length.map(MaxLength::get), Some(10));
        assert!(args.length.include_function_definition);
        assert!(args.length.include_decorators);
        assert_eq!(args.walk.exclude, vec!["build", "dist"]);
        assert_eq!(args.output.format, OutputFormat::Json);
        assert_eq!(args.output.verbose, 2);
        assert_eq!(args.paths, vec![PathBuf::from("src")]);
    }

    #[test]
    fn test_rejects_zero_max_length() {
        assert!(Args::try_parse_from(["mfl", "--max-function-length", "0"]).is_err());
        assert!(Args::try_parse_from(["mfl", "--max-function-length", "x"]).is_err());
    }

    #[test]
    fn test_isolated_conflicts_with_config() {
        assert!(Args::try_parse_from(["mfl", "--isolated", "--config", "a.toml"]).is_err());
    }
}
