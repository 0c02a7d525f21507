use super::*;

fn window() -> DeviceRect {
    DeviceRect::new(0, 0, 100, 100)
}

#[test]
fn inside_segment_is_untouched() {
    assert_eq!(
        clip_segment(window(), (10, 10), (90, 50)),
        Some(((10, 10), (90, 50)))
    );
}

#[test]
fn segment_fully_outside_is_rejected() {
    assert_eq!(clip_segment(window(), (-10, -10), (-5, 50)), None);
    assert_eq!(clip_segment(window(), (150, 10), (200, 90)), None);
}

#[test]
fn crossing_segment_is_pinned_to_edges() {
    assert_eq!(
        clip_segment(window(), (-50, 50), (150, 50)),
        Some(((0, 50), (100, 50)))
    );
    assert_eq!(
        clip_segment(window(), (50, -20), (50, 120)),
        Some(((50, 0), (50, 100)))
    );
}

#[test]
fn diagonal_corner_miss_is_rejected() {
    // Passes outside the top-left corner without entering the window.
    assert_eq!(clip_segment(window(), (-20, 90), (10, 130)), None);
}
