//! The application side of the HAL: the entry points a firmware implements,
//! and a small demo firmware for running the simulator without one.

use crate::hal::{EventType, Hal};
use log::debug;

/// Entry points the simulator drives. All of them are called on the event
/// loop thread, one at a time.
pub trait Application {
    /// Called once, after the device is bound and before the first event.
    fn init(&mut self, hal: &mut dyn Hal);

    /// A pad or button changed. `value` is the velocity, 0 on release.
    fn surface_event(&mut self, hal: &mut dyn Hal, kind: EventType, index: u8, value: u8);

    /// Polyphonic pressure on pad `index`.
    fn aftertouch_event(&mut self, hal: &mut dyn Hal, index: u8, value: u8);

    /// Called once per scheduler tick.
    fn timer_event(&mut self, hal: &mut dyn Hal);
}

/// Number of addressable LED indices on the Launchpad Pro grid (10x10, corners unused).
pub const GRID_SIZE: u8 = 100;

/// Index of the setup button LED.
pub const SETUP_LED: u8 = 99;

const BLINK_TICKS: u32 = 1000;

/// Lights pads while they are held and blinks the setup LED.
#[derive(Debug)]
pub struct DemoApp {
    ticks: u32,
    setup_lit: bool,
    pressed: [u8; GRID_SIZE as usize],
}

impl DemoApp {
    pub fn new() -> Self {
        Self {
            ticks: 0,
            setup_lit: false,
            pressed: [0; GRID_SIZE as usize],
        }
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    fn plot_setup(&self, hal: &mut dyn Hal) {
        let level = if self.setup_lit { 0x10 } else { 0 };
        hal.plot_led(EventType::Setup, SETUP_LED, level, level, level);
    }
}

impl Default for DemoApp {
    fn default() -> Self {
        Self::new()
    }
}

impl Application for DemoApp {
    fn init(&mut self, hal: &mut dyn Hal) {
        debug!("Demo app clearing {} LEDs", GRID_SIZE);
        for index in 0..GRID_SIZE {
            hal.plot_led(EventType::Pad, index, 0, 0, 0);
        }
        self.setup_lit = true;
        self.plot_setup(hal);
    }

    fn surface_event(&mut self, hal: &mut dyn Hal, kind: EventType, index: u8, value: u8) {
        if kind != EventType::Pad || index >= GRID_SIZE {
            return;
        }
        self.pressed[index as usize] = value;
        // Velocity is 7-bit; the LED takes 6 bits of useful intensity.
        hal.plot_led(EventType::Pad, index, value >> 1, 0, 0);
    }

    fn aftertouch_event(&mut self, hal: &mut dyn Hal, index: u8, value: u8) {
        if index >= GRID_SIZE {
            return;
        }
        let velocity = self.pressed[index as usize];
        if velocity > 0 {
            hal.plot_led(EventType::Pad, index, velocity >> 1, 0, value >> 1);
        }
    }

    fn timer_event(&mut self, hal: &mut dyn Hal) {
        self.ticks = self.ticks.wrapping_add(1);
        if self.ticks % BLINK_TICKS == 0 {
            self.setup_lit = !self.setup_lit;
            self.plot_setup(hal);
        }
    }
}
