extern crate padsim;

use crossbeam::channel::unbounded;
use padsim::app::{DemoApp, GRID_SIZE};
use padsim::config::Settings;
use padsim::event_loop::LoopStats;
use padsim::midi::{LedCommand, MockBackend};
use padsim::{EventType, Simulator};
use std::time::{Duration, Instant};

const DEVICE: &str = "Standalone Port";

#[test]
fn integration_test_packets_and_ticks_reach_the_app() {
    let backend = MockBackend::with_device(DEVICE);
    let handle = backend.handle();
    let mut simulator =
        Simulator::start(|| Ok(backend), &Settings::default(), DemoApp::new()).unwrap();

    // Init clears the grid and lights the setup LED.
    let init_frames = GRID_SIZE as usize + 1;
    assert_eq!(handle.sent_packets().len(), init_frames);

    // Press, pressure and release on pad 11, plus bytes the decoder must skip.
    assert!(handle.inject(&[0x90, 11, 127]));
    assert!(handle.inject(&[0xA0, 11, 64, 0xC0, 1, 2]));
    assert!(handle.inject(&[0x80, 11, 0, 0xB0]));
    handle.disconnect();

    let (tick_tx, tick_rx) = unbounded();
    for _ in 0..1000 {
        tick_tx.send(Instant::now()).unwrap();
    }
    drop(tick_tx);

    let stats = simulator.run_with_ticks(tick_rx);
    assert_eq!(
        stats,
        LoopStats {
            packets: 3,
            events: 3,
            ticks: 1000
        }
    );
    assert_eq!(simulator.app().ticks(), 1000);

    let sent = handle.sent_packets();
    let commands: Vec<LedCommand> = sent[init_frames..]
        .iter()
        .map(|frame| LedCommand::from_frame(frame).expect("only LED frames are sent"))
        .collect();

    // Pad frames keep their relative order; the setup blink may land anywhere
    // between them because ticks and packets are served as they become ready.
    let pad_updates: Vec<(u8, u8, u8, u8)> = commands
        .iter()
        .filter(|c| c.index == 11)
        .map(|c| (c.index, c.red, c.green, c.blue))
        .collect();
    assert_eq!(pad_updates, vec![(11, 63, 0, 0), (11, 63, 0, 32), (11, 0, 0, 0)]);

    let setup_updates: Vec<&LedCommand> = commands.iter().filter(|c| c.index == 99).collect();
    assert_eq!(setup_updates.len(), 1);
    assert_eq!(
        *setup_updates[0],
        LedCommand::new(EventType::Pad, 99, 0, 0, 0)
    );
}

#[test]
fn integration_test_loop_without_device_traffic() {
    let backend = MockBackend::with_device(DEVICE);
    let handle = backend.handle();
    let mut simulator =
        Simulator::start(|| Ok(backend), &Settings::default(), DemoApp::new()).unwrap();
    handle.disconnect();

    let (tick_tx, tick_rx) = unbounded::<Instant>();
    drop(tick_tx);

    let stats = simulator.run_with_ticks(tick_rx);
    assert_eq!(stats, LoopStats::default());
}

#[test]
fn integration_test_run_returns_when_device_input_goes_away() {
    let backend = MockBackend::with_device(DEVICE);
    let handle = backend.handle();
    let mut simulator =
        Simulator::start(|| Ok(backend), &Settings::default(), DemoApp::new()).unwrap();
    assert!(handle.inject(&[0x90, 11, 127]));
    handle.disconnect();

    // A wall-clock ticker never disconnects; the input going away is enough.
    let stats = simulator.run_with_ticks(crossbeam::channel::tick(Duration::from_millis(1)));
    assert_eq!(stats.packets, 1);
    assert_eq!(stats.events, 1);
}
