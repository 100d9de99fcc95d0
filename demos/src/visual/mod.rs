//! Terminal renderings for the report.

pub mod diagram;
pub mod image;
pub mod pie;

pub use self::diagram::render_circuit;
pub use self::image::{IMAGE_TITLE, render_preview, show_image};
pub use self::pie::{PieSlice, factor_slices, render_pie};
