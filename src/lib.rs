//! Render a single SVG logo into the favicon, PWA and Apple touch icons a web
//! app needs, and print shallow directory trees.

pub mod catalog;
pub mod icon_gen;
pub mod logging;
pub mod manifest;
pub mod render;
pub mod tree;
