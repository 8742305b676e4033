pub mod canvas;
pub mod document;
pub mod raster;
pub mod sink;
