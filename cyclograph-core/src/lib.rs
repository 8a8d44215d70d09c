//! Cyclograph decomposes a closed SVG path into a discrete Fourier series and
//! renders the decomposition as a self-contained animated SVG: a chain of
//! rotating epicycles whose vector sum traces the original path.
//!
//! # Pipeline overview
//!
//! 1. **Extract**: `SVG bytes -> PathSource -> Vec<Complex>` (evenly spaced
//!    samples over one period, plus canvas bounds)
//! 2. **Analyze**: [`fourier_series`]: samples + harmonic count ->
//!    `BTreeMap<i32, Complex>` of coefficients
//! 3. **Build**: [`build_scene`]: coefficients + background trace ->
//!    [`Document`] (scene graph of groups, primitives and animations)
//! 4. **Serialize**: [`write_svg`]: document -> SVG markup text
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: identical samples and harmonic count yield
//!   byte-identical output; floats print at a fixed precision.
//! - **No IO in the core**: file handling stays with the CLI; the core
//!   consumes bytes and produces a `String`.
//! - **One-shot batch**: each run builds fresh coefficients, a fresh scene and
//!   a fresh serializer context; nothing is shared across runs.
#![forbid(unsafe_code)]

mod analysis;
mod epicycles;
mod foundation;
mod scene;
mod serialize;
mod source;

pub use analysis::fourier::{fourier_series, reconstruct};
pub use epicycles::builder::{ChainOptions, build_scene};
pub use foundation::core::{Canvas, Complex};
pub use foundation::error::{CyclographError, CyclographResult};
pub use scene::model::{
    Animation, Document, Geometry, Group, Node, PathId, Repeat, Shape, Timing, TransformKind,
};
pub use scene::path::PathData;
pub use serialize::writer::write_svg;
pub use source::svg_path::PathSource;
