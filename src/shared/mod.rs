pub mod alpha_mask;
pub mod bounds;
pub mod image_adapter;
pub mod opacity_sink;
pub mod pixel_source;
pub mod rgba_buffer;
