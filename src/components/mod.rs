pub mod effects;
pub mod lazy_load_image;
pub mod visibility_gate;
