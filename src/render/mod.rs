
//! Output formats for resolved diagrams.

pub mod svg;
