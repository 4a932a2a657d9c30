//! Reusable UI components

mod alert;
mod button;

pub use alert::{render_alert, AlertVariant, ALERT_HEIGHT};
pub use button::{render_action_button, BUTTON_HEIGHT};
