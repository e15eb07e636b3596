use super::*;

fn samples(pts: &[(u64, i32, i32)]) -> SampleSet {
    pts.iter()
        .map(|&(f, x, y)| (FrameIndex(f), PixelPos::new(x, y)))
        .collect()
}

#[test]
fn zero_or_one_sample_gives_empty_trajectory() {
    for kind in [InterpKind::Linear, InterpKind::Quadratic, InterpKind::Cubic] {
        assert!(build_trajectory(&SampleSet::new(), kind).is_empty());
        assert!(build_trajectory(&samples(&[(7, 1, 1)]), kind).is_empty());
    }
}

#[test]
fn two_samples_fall_back_to_a_line() {
    let s = samples(&[(0, 0, 0), (10, 100, 0)]);
    for kind in [InterpKind::Linear, InterpKind::Quadratic, InterpKind::Cubic] {
        let t = build_trajectory(&s, kind);
        assert_eq!(t.get(FrameIndex(5)), Some(PixelPos::new(50, 0)));
        assert_eq!(t.len(), 11);
    }
}

#[test]
fn covers_every_frame_and_hits_every_sample() {
    let s = samples(&[
        (12, 640, 700),
        (15, 655, 610),
        (19, 672, 480),
        (26, 700, 330),
        (31, 718, 260),
        (40, 745, 210),
    ]);
    for kind in [InterpKind::Linear, InterpKind::Quadratic, InterpKind::Cubic] {
        let t = build_trajectory(&s, kind);
        assert_eq!(t.first_frame(), Some(FrameIndex(12)));
        assert_eq!(t.last_frame(), Some(FrameIndex(40)));
        assert_eq!(t.len(), 29);
        let frames: Vec<u64> = t.iter().map(|(f, _)| f.0).collect();
        assert_eq!(frames, (12..=40).collect::<Vec<_>>());
        for (f, p) in s.iter() {
            assert_eq!(t.get(f), Some(p), "{kind:?} at frame {f}");
        }
    }
}

#[test]
fn lookups_outside_the_range_are_none() {
    let t = build_trajectory(&samples(&[(5, 0, 0), (8, 3, 3)]), InterpKind::Linear);
    assert_eq!(t.get(FrameIndex(4)), None);
    assert_eq!(t.get(FrameIndex(9)), None);
    assert_eq!(Trajectory::empty().first_frame(), None);
    assert_eq!(Trajectory::empty().last_frame(), None);
}

#[test]
fn visible_prefix_follows_the_playhead() {
    let t = build_trajectory(&samples(&[(5, 0, 0), (9, 40, 0)]), InterpKind::Linear);
    assert!(t.visible(FrameIndex(0)).is_empty());
    assert!(t.visible(FrameIndex(4)).is_empty());
    assert_eq!(t.visible(FrameIndex(5)), &[PixelPos::new(0, 0)]);
    assert_eq!(t.visible(FrameIndex(7)).len(), 3);
    assert_eq!(t.visible(FrameIndex(9)).len(), 5);
    assert_eq!(t.visible(FrameIndex(1_000)).len(), 5);
    assert!(Trajectory::empty().visible(FrameIndex(3)).is_empty());
}

#[test]
fn visibility_is_monotonic() {
    let t = build_trajectory(
        &samples(&[(2, 10, 90), (6, 30, 40), (11, 60, 20), (14, 80, 35)]),
        InterpKind::Quadratic,
    );
    for k in 0..20 {
        let now = t.visible(FrameIndex(k));
        let next = t.visible(FrameIndex(k + 1));
        assert!(now.len() <= next.len());
        assert_eq!(now, &next[..now.len()]);
    }
}

#[test]
fn interp_kind_parses_from_json() {
    let k: InterpKind = serde_json::from_str("\"cubic\"").unwrap();
    assert_eq!(k, InterpKind::Cubic);
    assert_eq!(InterpKind::default(), InterpKind::Quadratic);
}

#[test]
fn default_trajectory_is_empty() {
    let t = Trajectory::default();
    assert_eq!(t, Trajectory::empty());
    assert!(t.is_empty());
    assert_eq!(t.first_frame(), None);
    assert!(t.visible(FrameIndex(100)).is_empty());
}

#[test]
fn huge_frame_span_gives_empty_trajectory() {
    let s = samples(&[(0, 0, 0), (u64::MAX, 10, 10)]);
    for kind in [InterpKind::Linear, InterpKind::Quadratic, InterpKind::Cubic] {
        assert!(build_trajectory(&s, kind).is_empty());
    }
}

#[test]
fn dense_len_counts_both_ends() {
    assert_eq!(dense_len(FrameIndex(3), FrameIndex(3)), Some(1));
    assert_eq!(dense_len(FrameIndex(3), FrameIndex(12)), Some(10));
    assert_eq!(dense_len(FrameIndex(0), FrameIndex(u64::MAX)), None);
    assert_eq!(dense_len(FrameIndex(5), FrameIndex(4)), None);
}
