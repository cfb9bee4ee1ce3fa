pub mod confirm;
pub mod form;
pub mod label;
pub mod select;
pub mod text_input;
pub mod widget;
