//! Sketch export

pub mod dxf;

pub use dxf::{CONSTRUCTION_LAYER, DxfDocument, DxfShape, PROFILE_LAYER};
