use super::*;

#[test]
fn full_and_clipped_windows() {
    let out = moving_average(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
    assert_eq!(out[2], 3.0);
    assert_eq!(out[0], 1.5);
    assert_eq!(out[4], 4.5);
}

#[test]
fn window_seven_tapers_at_both_ends() {
    let values: Vec<f64> = (0..10).map(f64::from).collect();
    let out = moving_average(&values, 7);

    // index 0 averages 0..=3, index 1 averages 0..=4
    assert_eq!(out[0], 1.5);
    assert_eq!(out[1], 2.0);
    // index 5 has the full window 2..=8
    assert_eq!(out[5], 5.0);
    // index 9 averages 6..=9
    assert_eq!(out[9], 7.5);
}

#[test]
fn length_is_preserved_for_any_window() {
    for len in [0usize, 1, 2, 5, 31] {
        let values: Vec<f64> = (0..len).map(|i| (i as f64).sin()).collect();
        for window in [0usize, 1, 2, 3, 7, 64] {
            assert_eq!(moving_average(&values, window).len(), len);
        }
    }
}

#[test]
fn unit_windows_are_identity() {
    let values = [3.0, -1.0, 8.5];
    assert_eq!(moving_average(&values, 0), values);
    assert_eq!(moving_average(&values, 1), values);
}

#[test]
fn constant_rows_stay_constant() {
    let out = moving_average(&[-240.0; 9], 7);
    assert!(out.iter().all(|&v| v == -240.0));
}
