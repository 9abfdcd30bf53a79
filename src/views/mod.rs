pub mod gallery;
pub mod main_layout;
pub mod photo;

/// Photo ids served by picsum.photos
pub const PHOTO_IDS: [u32; 12] = [10, 11, 15, 16, 17, 28, 29, 37, 42, 48, 54, 65];

pub fn photo_src(photo_id: u32, width: u32, height: u32) -> String {
    format!("https://picsum.photos/id/{photo_id}/{width}/{height}")
}

/// Tiny version of the photo, stretched as a placeholder
pub fn photo_placeholder_src(photo_id: u32) -> String {
    photo_src(photo_id, 16, 12)
}
