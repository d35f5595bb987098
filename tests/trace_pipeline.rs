mod common;

use std::time::{Duration, Instant};

use approx::assert_relative_eq;
use audioscope::{
    sample, AxisSource, Interpretation, Oscilloscope, SampleBuffer, SampleData, TracePipeline,
    TraceSettings,
};
use common::{counting_window, ms, ScriptedDevice};
use egui::{Pos2, Vec2};

fn scope_with(windows: Vec<SampleBuffer>, rate: u32, settings: TraceSettings) -> Oscilloscope {
    Oscilloscope::new(
        Box::new(ScriptedDevice::new(rate, windows)),
        ms(100),
        settings,
    )
}

#[test]
fn cursor_follows_committed_frames_not_wall_clock() {
    // 1 kHz, 40 frames committed, 50 ms into the window: only 40 are available.
    let mut scope = scope_with(vec![counting_window(0, 40, 1000)], 1000, TraceSettings::default());
    let t0 = Instant::now();
    scope.start(t0).unwrap();
    let t1 = t0 + ms(101);
    scope.restart(t1).unwrap();

    let consumed = scope.advance(t1 + ms(50), Vec2::ZERO);
    assert_eq!(consumed, 40);
    assert_eq!(scope.cursor(), 40);
    assert_eq!(scope.history().len(), 40);

    // Nothing new is due later in the same window.
    assert_eq!(scope.advance(t1 + ms(90), Vec2::ZERO), 0);
    assert_eq!(scope.cursor(), 40);
}

#[test]
fn cursor_is_monotonic_within_a_window_and_resets_on_rotation() {
    let windows = vec![counting_window(0, 100, 1000), counting_window(100, 100, 1000)];
    let mut scope = scope_with(windows, 1000, TraceSettings::default());
    let t0 = Instant::now();
    scope.start(t0).unwrap();
    let t1 = t0 + ms(101);
    scope.restart(t1).unwrap();
    assert_eq!(scope.cursor(), 0);

    let mut last = 0;
    for step in [5, 5, 30, 12, 80, 80, 99] {
        scope.advance(t1 + ms(step), Vec2::ZERO);
        assert!(scope.cursor() >= last);
        last = scope.cursor();
    }
    assert_eq!(last, 99);

    // Past the interval: the tick rotates and the cursor restarts at zero.
    let rotated = scope.maybe_rotate(t1 + ms(101)).unwrap();
    assert!(rotated);
    assert_eq!(scope.cursor(), 0);
    assert_eq!(scope.window_start(), Some(t1 + ms(101)));
}

#[test]
fn history_never_exceeds_max_points() {
    let windows: Vec<_> = (0..6).map(|w| counting_window(w * 50, 50, 1000)).collect();
    let mut scope = scope_with(windows, 1000, TraceSettings::default());
    let t0 = Instant::now();
    scope.start(t0).unwrap();

    let caps = [7usize, 3, 120, 1, 25, 0, 60];
    let mut now = t0;
    for (i, step) in [13u64, 40, 60, 101, 7, 33, 101, 2, 90, 101, 55, 101].iter().enumerate() {
        scope.settings.max_points = caps[i % caps.len()];
        now += ms(*step);
        scope.tick(now, Vec2::new(640.0, 480.0)).unwrap();
        assert!(scope.history().len() <= scope.settings.max_points);
    }
}

#[test]
fn history_stays_newest_first_across_rotations() {
    let windows = vec![
        counting_window(-1000, 30, 1000),
        counting_window(-970, 30, 1000),
        counting_window(-940, 30, 1000),
    ];
    let settings = TraceSettings {
        max_points: 10_000,
        ..Default::default()
    };
    let mut scope = scope_with(windows, 1000, settings);
    let t0 = Instant::now();
    scope.start(t0).unwrap();

    let mut now = t0;
    for _ in 0..3 {
        now += ms(101);
        scope.restart(now).unwrap();
        scope.advance(now + ms(15), Vec2::ZERO);
        scope.advance(now + ms(40), Vec2::ZERO);
    }

    assert_eq!(scope.history().len(), 90);
    let xs: Vec<f32> = scope.history().iter().map(|p| p.x).collect();
    assert!(xs.windows(2).all(|w| w[0] > w[1]), "newest sample must come first");
}

#[test]
fn rotation_keeps_history_and_moves_window_start() {
    let mut scope = scope_with(vec![counting_window(0, 80, 1000)], 1000, TraceSettings::default());
    let t0 = Instant::now();
    scope.start(t0).unwrap();
    let t1 = t0 + ms(101);
    scope.restart(t1).unwrap();
    scope.advance(t1 + ms(60), Vec2::ZERO);
    let before = scope.history().len();
    assert_eq!(before, 60);

    let t2 = t1 + ms(70);
    scope.restart(t2).unwrap();
    assert_eq!(scope.history().len(), before);
    assert_eq!(scope.cursor(), 0);
    assert_eq!(scope.window_start(), Some(t2));
}

#[test]
fn eviction_keeps_the_newest_points() {
    let buf = counting_window(0, 4, 1000);
    let settings = TraceSettings {
        max_points: 3,
        ..Default::default()
    };
    let mut pipeline = TracePipeline::new();
    pipeline.advance(&buf, ms(4), Pos2::ZERO, &settings);

    let expected: Vec<Pos2> = [3, 2, 1]
        .iter()
        .map(|&i| {
            Pos2::new(
                1000.0 * sample(AxisSource::LeftChannel, &buf, i) as f32,
                -1000.0 * sample(AxisSource::RightChannel, &buf, i) as f32,
            )
        })
        .collect();
    let got: Vec<Pos2> = pipeline.history().iter().copied().collect();
    assert_eq!(got, expected);
}

#[test]
fn zero_max_points_consumes_but_keeps_nothing() {
    let settings = TraceSettings {
        max_points: 0,
        ..Default::default()
    };
    let mut scope = scope_with(vec![counting_window(0, 50, 1000)], 1000, settings);
    let t0 = Instant::now();
    scope.start(t0).unwrap();
    let t1 = t0 + ms(101);
    scope.restart(t1).unwrap();

    assert_eq!(scope.advance(t1 + ms(50), Vec2::ZERO), 50);
    assert!(scope.history().is_empty());
    assert_eq!(scope.cursor(), 50);
}

#[test]
fn points_are_centered_on_the_surface() {
    // Silent stereo i16 sits just above the midpoint of the normalized range.
    let buf = SampleBuffer::new(SampleData::I16(vec![0, 0]), 2, 1000);
    let mut scope = scope_with(vec![buf], 1000, TraceSettings::default());
    let t0 = Instant::now();
    scope.start(t0).unwrap();
    let t1 = t0 + ms(101);
    scope.restart(t1).unwrap();
    scope.advance(t1 + ms(5), Vec2::new(800.0, 600.0));

    let p = scope.history().newest().unwrap();
    assert_relative_eq!(p.x, 400.0, epsilon = 0.05);
    assert_relative_eq!(p.y, 300.0, epsilon = 0.05);
}

#[test]
fn polar_maps_right_channel_to_radius() {
    // Left at full negative gives angle -1 rad, right at full positive radius 1.
    let buf = SampleBuffer::new(SampleData::I16(vec![i16::MIN, i16::MAX]), 2, 1000);
    let settings = TraceSettings {
        interpretation: Interpretation::Polar,
        x_amplification: 1.0,
        y_amplification: 1.0,
        ..Default::default()
    };
    let mut pipeline = TracePipeline::new();
    pipeline.advance(&buf, ms(1), Pos2::ZERO, &settings);

    let p = pipeline.history().newest().unwrap();
    assert_relative_eq!(p.x, (-1.0f32).cos(), epsilon = 1e-6);
    assert_relative_eq!(p.y, -(-1.0f32).sin(), epsilon = 1e-6);
}

#[test]
fn normalized_samples_stay_in_unit_range() {
    let raw = vec![f32::NAN, 3.5, -7.0, 0.25, f32::INFINITY, f32::NEG_INFINITY];
    let buf = SampleBuffer::new(SampleData::F32(raw), 2, 8000);
    for frame in 0..buf.frame_count() {
        for src in AxisSource::ALL {
            let v = sample(*src, &buf, frame);
            assert!((-1.0..=1.0).contains(&v), "{src:?} frame {frame}: {v}");
        }
    }
    assert_eq!(sample(AxisSource::LeftChannel, &buf, 0), 0.0);
}

#[test]
fn empty_window_is_a_no_op() {
    let mut scope = scope_with(Vec::new(), 1000, TraceSettings::default());
    let t0 = Instant::now();
    scope.start(t0).unwrap();
    assert_eq!(scope.advance(t0 + Duration::from_secs(5), Vec2::ZERO), 0);
    assert!(scope.history().is_empty());
}
