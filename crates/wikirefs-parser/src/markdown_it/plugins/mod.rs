//! Custom markdown-it plugins for wiki reference syntax

pub mod wikiref;

pub use wikiref::add_wikirefs_plugin;
