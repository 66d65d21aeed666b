use super::*;

#[test]
fn short_input_passes_through() {
    let s = vec![0.1f32, -0.2, 0.3];
    let out = downsample(&s, 3.0, 3, 10).unwrap();
    assert_eq!(out.amplitudes, s);
    assert_eq!(out.time_axis, vec![0.0, 1.5, 3.0]);
    assert_eq!(out.segment_count(), 2);
}

#[test]
fn input_equal_to_max_points_passes_through() {
    let s: Vec<f32> = (0..100).map(|i| i as f32 / 100.0).collect();
    let out = downsample(&s, 1.0, 100, 100).unwrap();
    assert_eq!(out.len(), 100);
    assert_eq!(out.amplitudes, s);
    assert_eq!(*out.time_axis.last().unwrap(), 1.0);
}

#[test]
fn block_means_and_truncation() {
    // len 11, max 3 => factor 3, keep 9, drop 2.
    let s = vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 100.0, 100.0];
    let out = downsample(&s, 11.0, 11, 3).unwrap();
    assert_eq!(out.amplitudes, vec![2.0, 5.0, 8.0]);
    // 11 s * (3 / 11 frames) = 3 s.
    assert!((out.time_axis[2] - 3.0).abs() < 1e-12);
    assert_eq!(out.time_axis[0], 0.0);
}

#[test]
fn two_second_sine_reduces_to_exactly_max_points() {
    let frames = 88_200usize;
    let s: Vec<f32> = (0..frames)
        .map(|i| ((i as f32) * 0.0627).sin())
        .collect();
    let out = downsample(&s, 2.0, frames as u64, 3000).unwrap();

    assert_eq!(frames / 3000, 29);
    assert_eq!(out.len(), 3000);
    assert_eq!(out.time_axis.len(), 3000);
    let expected_span = 2.0 * (3000.0 / 88_200.0);
    assert!((out.time_axis[2999] - expected_span).abs() < 1e-12);
}

#[test]
fn duration_ratio_uses_frame_count_not_sample_count() {
    // Fewer samples than frames (truncated decode): the ratio still divides by frame_count.
    let s = vec![0.5f32; 40];
    let out = downsample(&s, 10.0, 100, 10).unwrap();
    assert_eq!(out.len(), 10);
    assert!((out.time_axis[9] - 1.0).abs() < 1e-12);
}

#[test]
fn output_length_never_exceeds_max_points() {
    for len in [1usize, 2, 7, 99, 100, 101, 199, 1000, 4321] {
        for max in [1usize, 2, 3, 10, 100, 500] {
            let s = vec![0.25f32; len];
            let out = downsample(&s, 1.0, len as u64, max).unwrap();
            let expected = if len <= max { len } else { max };
            assert_eq!(out.len(), expected, "len={len} max={max}");
            assert_eq!(out.time_axis.len(), out.len());
        }
    }
}

#[test]
fn downsample_is_deterministic() {
    let s: Vec<f32> = (0..5000).map(|i| ((i * 37) % 101) as f32 / 101.0).collect();
    let a = downsample(&s, 5.0, 5000, 300).unwrap();
    let b = downsample(&s, 5.0, 5000, 300).unwrap();
    assert_eq!(a, b);
}

#[test]
fn zero_max_points_is_rejected() {
    assert!(downsample(&[0.0], 1.0, 1, 0).is_err());
}

#[test]
fn linspace_edges() {
    assert!(linspace(0.0, 1.0, 0).is_empty());
    assert_eq!(linspace(0.0, 1.0, 1), vec![0.0]);
    assert_eq!(linspace(0.0, 2.0, 5), vec![0.0, 0.5, 1.0, 1.5, 2.0]);
}
