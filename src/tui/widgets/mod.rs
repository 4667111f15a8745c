pub mod color;
pub mod editor;
pub mod overlay;
pub mod prompt_list;
pub mod quote_banner;
pub mod rating;
pub mod status_bar;
