// event_loop.rs

use crate::app::Application;
use crate::hal::Hal;
use crate::midi::RawPacket;
use crate::translate::dispatch_packet;
use crossbeam::channel::{never, select, Receiver};
use log::{debug, info, trace};
use std::time::Instant;

/// Counters kept while the loop runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub packets: u64,
    pub events: u64,
    pub ticks: u64,
}

/// Single-threaded dispatcher for inbound packets and scheduler ticks.
///
/// Every application callback runs on the thread that calls [`run`](Self::run),
/// one at a time.
pub struct EventLoop {
    packets: Receiver<RawPacket>,
    ticks: Receiver<Instant>,
    stats: LoopStats,
}

impl EventLoop {
    pub fn new(packets: Receiver<RawPacket>, ticks: Receiver<Instant>) -> Self {
        EventLoop {
            packets,
            ticks,
            stats: LoopStats::default(),
        }
    }

    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    /// Runs until the packet source disconnects, then handles the ticks that
    /// were already queued and returns. A tick source that disconnects first
    /// is parked and the loop keeps serving packets.
    pub fn run<A: Application + ?Sized>(&mut self, app: &mut A, hal: &mut dyn Hal) -> LoopStats {
        info!("Event loop running");
        let packets = self.packets.clone();
        let mut ticks = self.ticks.clone();
        let mut park_ticks = false;

        loop {
            select! {
                recv(packets) -> packet => match packet {
                    Ok(packet) => {
                        let delivered = dispatch_packet(&packet, &mut *app, &mut *hal);
                        self.stats.packets += 1;
                        self.stats.events += delivered as u64;
                        trace!("Packet of {} bytes gave {} event(s)", packet.len(), delivered);
                    }
                    Err(_) => {
                        debug!("Packet source disconnected");
                        break;
                    }
                },
                recv(ticks) -> tick => match tick {
                    Ok(_) => {
                        app.timer_event(hal);
                        self.stats.ticks += 1;
                    }
                    Err(_) => {
                        debug!("Tick source disconnected");
                        park_ticks = true;
                    }
                },
            }

            // A disconnected receiver is always ready; park it on one that never is.
            if park_ticks {
                ticks = never();
                park_ticks = false;
            }
        }

        // Bounded by what is queued now; a wall-clock ticker keeps at most one.
        let pending = ticks.len();
        for _ in ticks.try_iter().take(pending) {
            app.timer_event(hal);
            self.stats.ticks += 1;
        }

        debug!(
            "Event loop finished: {} packets, {} events, {} ticks",
            self.stats.packets, self.stats.events, self.stats.ticks
        );
        self.stats
    }
}
