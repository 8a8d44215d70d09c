pub mod svg_path;
