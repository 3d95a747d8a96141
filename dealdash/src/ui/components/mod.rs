pub mod deal_grid;
pub mod deal_table;
pub mod detail_popup;
pub mod empty_state;
pub mod filter_sidebar;
pub mod header;
pub mod help_bar;
pub mod help_popup;
pub mod loading_indicator;
pub mod popup;
