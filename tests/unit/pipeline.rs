use super::*;
use crate::capture::session::{CaptureSession, ClickEvent};
use crate::encode::sink::InMemorySink;
use crate::foundation::core::{Fps, Rgb8};
use crate::media::source::MemoryFrameSource;
use crate::overlay::style::LabelStyle;
use crate::trajectory::{InterpKind, build_trajectory};

fn frames(n: usize) -> Vec<FrameRgba> {
    (0..n)
        .map(|_| FrameRgba::solid(32, 24, Rgb8::new(20, 20, 20)).unwrap())
        .collect()
}

fn quiet_style() -> TraceStyle {
    TraceStyle {
        label: LabelStyle {
            enabled: false,
            ..LabelStyle::default()
        },
        ..TraceStyle::default()
    }
}

#[test]
fn sink_sees_every_frame_in_order() {
    let samples = CaptureSession::new()
        .drain([
            ClickEvent::click(2, 4, 12),
            ClickEvent::click(5, 16, 6),
            ClickEvent::click(7, 28, 12),
            ClickEvent::Done,
        ])
        .unwrap();
    let traj = build_trajectory(&samples, InterpKind::Quadratic);

    let mut src = MemoryFrameSource::new(Fps::new(24, 1).unwrap(), frames(10)).unwrap();
    let mut sink = InMemorySink::new();
    let stats = trace_video(&mut src, &mut sink, &traj, &quiet_style()).unwrap();

    assert_eq!(stats.frames, 10);
    assert_eq!(stats.frames_with_path, 8);
    assert!(sink.is_ended());
    assert_eq!(
        sink.config(),
        Some(&SinkConfig {
            width: 32,
            height: 24,
            fps: Fps::new(24, 1).unwrap(),
        })
    );
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, (0..10).collect::<Vec<_>>());

    let untouched = &frames(1)[0];
    assert_eq!(&sink.frames()[1].1, untouched);
    assert_ne!(&sink.frames()[2].1, untouched);
}

#[test]
fn too_few_samples_pass_frames_through() {
    let samples = CaptureSession::new()
        .drain([ClickEvent::click(3, 10, 10)])
        .unwrap();
    let traj = build_trajectory(&samples, InterpKind::Quadratic);
    assert!(traj.is_empty());

    let input = frames(4);
    let mut src = MemoryFrameSource::new(Fps::new(30, 1).unwrap(), input.clone()).unwrap();
    let mut sink = InMemorySink::new();
    let stats = trace_video(&mut src, &mut sink, &traj, &quiet_style()).unwrap();
    assert_eq!(stats.frames_with_path, 0);
    for ((_, out), original) in sink.frames().iter().zip(&input) {
        assert_eq!(out, original);
    }
}

#[test]
fn backwards_source_index_is_rejected() {
    let f = frames(2);
    let mut src = MemoryFrameSource::with_indices(
        Fps::new(30, 1).unwrap(),
        vec![(FrameIndex(4), f[0].clone()), (FrameIndex(4), f[1].clone())],
    )
    .unwrap();
    let mut sink = InMemorySink::new();
    let err = trace_video(&mut src, &mut sink, &Trajectory::empty(), &quiet_style()).unwrap_err();
    assert!(matches!(err, TracerError::Validation(_)));
}

#[test]
fn invalid_style_fails_before_any_frame() {
    let mut src = MemoryFrameSource::new(Fps::new(30, 1).unwrap(), frames(2)).unwrap();
    let mut sink = InMemorySink::new();
    let style = TraceStyle {
        thickness: -1.0,
        ..quiet_style()
    };
    assert!(trace_video(&mut src, &mut sink, &Trajectory::empty(), &style).is_err());
    assert!(sink.config().is_none());
}

#[test]
fn single_frame_matches_the_full_pass() {
    let samples: crate::capture::session::SampleSet = [
        (FrameIndex(0), crate::foundation::core::PixelPos::new(2, 2)),
        (FrameIndex(5), crate::foundation::core::PixelPos::new(28, 20)),
    ]
    .into_iter()
    .collect();
    let traj = build_trajectory(&samples, InterpKind::Linear);
    let style = TraceStyle::default();

    let mut src = MemoryFrameSource::new(Fps::new(30, 1).unwrap(), frames(6)).unwrap();
    let mut sink = InMemorySink::new();
    trace_video(&mut src, &mut sink, &traj, &style).unwrap();

    let mut src = MemoryFrameSource::new(Fps::new(30, 1).unwrap(), frames(6)).unwrap();
    let one = trace_single_frame(&mut src, &traj, FrameIndex(3), &style).unwrap();
    assert_eq!(one, sink.frames()[3].1);

    let mut src = MemoryFrameSource::new(Fps::new(30, 1).unwrap(), frames(6)).unwrap();
    assert!(trace_single_frame(&mut src, &traj, FrameIndex(9), &style).is_err());
}
