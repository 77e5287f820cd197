pub mod header;
pub mod image_preview;
pub mod results_display;
pub mod server_status_badge;
pub mod upload_area;
