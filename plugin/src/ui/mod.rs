//! Board UI
//!
//! Bevy UI for the game page: the clickable grid, the share links and the
//! notice banner, plus the systems that connect them to the socket.

mod input;
mod render;
mod style;
mod types;
mod view;

pub use input::*;
pub use render::*;
pub use style::{Palette, Theme, parse_color};
pub use types::*;
pub use view::UiView;
