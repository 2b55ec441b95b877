mod timer;

pub use self::timer::{Timer, TimerId, TimerOperation, TimerOutput};

// We use Crux's built-in Render capability directly because it provides
// all necessary functionality for triggering view updates.
pub use crux_core::render::Render;

use crate::app::App;
use crate::event::Event;

#[derive(crux_core::macros::Effect)]
#[effect(app = "App")]
pub struct Capabilities {
    pub render: Render<Event>,
    pub timer: Timer<Event>,
}
