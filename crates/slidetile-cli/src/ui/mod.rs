pub mod color_scheme;
pub mod widgets;
