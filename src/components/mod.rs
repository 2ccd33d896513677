pub mod command_line;
pub mod dialog;
pub mod info;
pub mod listing;
pub mod status_bar;
