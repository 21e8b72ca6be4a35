//! ## pathsmith - parse, build, transform and minify SVG path data
//!
//! `pathsmith` reads the path data grammar used by SVG `d` attributes (and the
//! simpler point lists of `<polygon>` / `<polyline>`) into a `Path`, a sequence of
//! typed commands which can be extended with builder methods, transformed, and
//! written back out as readable or minimal text.
//!
//! It is normally run as a command line tool, optimizing either a single path
//! string or every path in an SVG document.
//!
//! ## Example
//!
//! ```
//! use pathsmith::{Coordinates, ExportSettings, Path};
//!
//! let path: Path = "M -500,-600 L7,8 l10,12 z".parse().unwrap();
//! let settings = ExportSettings {
//!     coordinates: Coordinates::Auto,
//!     compress: true,
//!     ..Default::default()
//! };
//! assert_eq!(path.export(&settings).unwrap(), "M-500-600L7,8 17,20Z");
//! ```

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "cli")]
pub mod cli;
mod document;
pub mod errors;
mod geometry;
mod path;
mod settings;

pub use document::{optimize_svg_paths, optimize_svg_paths_async};
pub use errors::{Error, Result};
pub use geometry::Point;
pub use path::{
    split_tokens, tokenize, Args, Command, CommandKind, Path, PathSyntax, SvgPathSyntax, Verb,
};
pub use settings::{Coordinates, ExportSettings, TransformSettings};

// Allow users of this as a library to easily retrieve the version of pathsmith being used
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Optimize `input`, which may be an SVG document or a single path / polygon
/// string.
///
/// Input whose first non-blank character is `<` is treated as a document.
pub fn optimize_str(input: &str, settings: &ExportSettings) -> Result<String> {
    if input.trim_start().starts_with('<') {
        optimize_svg_paths(input, settings)
    } else {
        Path::parse(input)?.export(settings)
    }
}

/// Optimize `input` with settings given as a JSON option object, returning
/// the result as a string.
#[cfg(feature = "json")]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub fn optimize_path_string(
    input: String,
    settings_json: String,
) -> core::result::Result<String, String> {
    let settings = if settings_json.trim().is_empty() {
        ExportSettings::default()
    } else {
        ExportSettings::from_json(&settings_json).map_err(|e| e.to_string())?
    };
    optimize_str(&input, &settings).map_err(|e| e.to_string())
}
