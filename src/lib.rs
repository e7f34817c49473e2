
// The #[non_exhaustive] attribute applies at the crate-level, and I
// want module-level restrictions, which are far stricter.
#![allow(clippy::manual_non_exhaustive)]

pub mod error;
pub mod errorlist;
pub mod expr;
pub mod graphics;
pub mod parsing;
pub mod render;
pub mod util;

use error::Error;
use graphics::diagram::{DiagramParams, FunctionDiagram};
use render::svg::SvgRenderer;

/// Plots the diagram described by a JSON parameter object, returning
/// the serialized [`PlotResponse`](graphics::response::PlotResponse).
pub fn plot_json(params: &str) -> Result<String, Error> {
  let params = DiagramParams::from_json(params)?;
  let diagram = FunctionDiagram::build(&params);
  Ok(diagram.response().to_json()?)
}

/// Plots the diagram described by a JSON parameter object as a
/// standalone SVG document.
pub fn render_svg(params: &str) -> Result<String, Error> {
  let params = DiagramParams::from_json(params)?;
  Ok(SvgRenderer::new().render(&FunctionDiagram::build(&params)))
}
