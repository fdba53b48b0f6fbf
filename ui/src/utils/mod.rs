pub mod colors;
pub mod file_picker;
pub mod fonts;
