use crossbeam::channel::unbounded;
use padsim::clock::{ClockSource, ManualClock, TimerClock, TICK_INTERVAL};
use padsim::event_loop::EventLoop;
use padsim::hal::RecordingHal;
use padsim::DemoApp;
use std::thread;
use std::time::{Duration, Instant};

#[test]
fn test_default_clock_is_one_millisecond() {
    assert_eq!(TimerClock::default().interval(), Duration::from_millis(1));
    assert_eq!(TICK_INTERVAL, Duration::from_millis(1));
}

#[test]
fn test_timer_ticks_drive_the_app() {
    const TICKS: usize = 20;
    let clock = TimerClock::new(Duration::from_millis(1));
    let ticks = clock.ticks();

    // Forward a fixed number of wall-clock ticks, then close the packet
    // source so the loop can finish.
    let (tx, rx) = unbounded();
    let (packet_tx, packet_rx) = unbounded::<Vec<u8>>();
    let forwarder = thread::spawn(move || {
        for _ in 0..TICKS {
            let tick = ticks.recv().unwrap();
            tx.send(tick).unwrap();
        }
        drop(packet_tx);
    });

    let started = Instant::now();
    let mut app = DemoApp::new();
    let stats = EventLoop::new(packet_rx, rx).run(&mut app, &mut RecordingHal::new());
    forwarder.join().unwrap();

    assert_eq!(stats.ticks, TICKS as u64);
    assert_eq!(app.ticks(), TICKS as u32);
    // Jitter is allowed, running early is not.
    assert!(started.elapsed() >= Duration::from_millis(TICKS as u64 - 1));
}

#[test]
fn test_manual_clock_feeds_loop() {
    let clock = ManualClock::new();
    clock.fire(7);
    let ticks = clock.ticks();
    drop(clock);

    let (packet_tx, packet_rx) = unbounded::<Vec<u8>>();
    drop(packet_tx);

    let mut app = DemoApp::new();
    let stats = EventLoop::new(packet_rx, ticks).run(&mut app, &mut RecordingHal::new());
    assert_eq!(stats.ticks, 7);
    assert_eq!(stats.packets, 0);
}
