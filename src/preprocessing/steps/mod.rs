//! Individual preprocessing steps

pub mod invert;
pub mod pad;
pub mod scale;
