//! Form rendering module
//!
//! - `field_renderer`: Field rendering utilities
//! - `intake_form`: Client intake form and its action panel

mod field_renderer;
mod intake_form;

pub use intake_form::draw as draw_intake_form;
