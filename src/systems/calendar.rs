use anyhow::Result;

use crate::engine::{System, SystemContext, TickFrame};

pub struct CalendarSystem;

impl CalendarSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CalendarSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for CalendarSystem {
    fn name(&self) -> &str {
        "calendar"
    }

    fn run(&mut self, _ctx: &SystemContext, frame: &mut TickFrame<'_>) -> Result<()> {
        frame.next.day = frame.previous.day + 1;
        Ok(())
    }
}
