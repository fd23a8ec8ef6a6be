/// Source boundary for glyphcast.
///
/// Decodes input images and externally produced masks into the core's
/// buffer types, and bounds input dimensions before conversion. File
/// formats are the image codec's concern, not the core's.

pub mod image;
pub mod resize;

pub use crate::image::{load_image, load_mask};
pub use crate::resize::bound_dimensions;
