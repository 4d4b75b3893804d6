pub mod matrix;
pub mod themes;

pub use matrix::{ColorMatrix, MATRIX_LEN};
pub use themes::MapcnThemes;
