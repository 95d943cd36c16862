pub mod comparison_panel;
pub mod controls;
pub mod header;
pub mod metric_row;
pub mod upload_area;
