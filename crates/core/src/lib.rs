#![no_std]
#![allow(clippy::cargo_common_metadata)]

//! Core of the `mfl` checker.
//!
//! Scans Python source, locates every `def` / `async def`, measures each
//! function and reports the ones longer than the configured maximum.
//! Nothing here touches the filesystem; callers hand in source text.

extern crate alloc;

pub mod config;
pub mod error;
pub mod language;
pub mod length;
pub mod rule;
pub mod syntax;

pub use config::{LengthOptions, MaxLength};
pub use error::{ConfigError, SyntaxError, SyntaxErrorKind};
pub use language::{LineKind, SourceFile, scan};
pub use rule::{CODE, FunctionLength, FunctionLengthChecker, Violation};
pub use syntax::{FunctionDef, locate_functions};
