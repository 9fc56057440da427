//! Markup builders for the PPTX parts.

pub mod presentation;
pub mod shape;
pub mod slide;
pub mod table;
pub mod template;

pub use presentation::{
    SLIDE_MASTER_ID, pres_props_element, presentation_element, table_styles_element, view_props_element,
};
pub use shape::{chart_frame_element, picture_element, text_shape_element};
pub use slide::slide_element;
pub use table::{DEFAULT_ROW_HEIGHT, table_frame_element};
pub use template::{SLIDE_LAYOUT_ID, slide_layout_element, slide_master_element};
