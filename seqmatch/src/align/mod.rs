pub mod edit;

pub use edit::{
    approximate_edit_distance, approximate_edit_distance_with_buf, edit_distance, EditBuffer,
};
