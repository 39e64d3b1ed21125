//! Widget components for the cooling-unit dashboard.
//!
//! All widgets are generic over `DrawTarget<Color = Rgb565>` for platform independence.
//! Each one draws a single layer; [`compose`](crate::compositor::compose)
//! calls them in z-order.

mod chart;
mod chrome;
mod status_bar;
mod tile;

pub use chart::{draw_chart, format_label, format_reading};
pub use chrome::draw_chrome;
pub use status_bar::{draw_status_bar, truncate_to_width};
pub use tile::draw_tile;
