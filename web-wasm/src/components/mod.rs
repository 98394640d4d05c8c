//! UIコンポーネント

pub mod header;
pub mod particle_canvas;
pub mod prediction_list;
pub mod status_bar;
pub mod upload_area;
