use super::*;

#[test]
fn pen_starts_lost_and_measures_manhattan_travel() {
    let mut pen = PenPosition::default();
    assert!(pen.lost);
    pen.last = (10, -5);
    pen.lost = false;
    assert_eq!(pen.travel_to((13, 1)), 9);
    pen.lose();
    assert!(pen.lost);
}

#[test]
fn parameter_reset_keeps_group_depth_and_text() {
    let text = TextDefaults {
        font: 5,
        ..TextDefaults::default()
    };
    let mut st = InterpreterState::new(DeviceRect::new(0, 0, 100, 100), text);
    st.fat = 12;
    st.dash_on = true;
    st.fill_pattern = 3;
    st.group_depth = 2;

    st.reset_parameters(DeviceRect::new(0, 0, 50, 50));
    assert_eq!(st.fat, 0);
    assert!(!st.dash_on);
    assert_eq!(st.fill_pattern, 0);
    assert_eq!(st.window, DeviceRect::new(0, 0, 50, 50));
    assert_eq!(st.group_depth, 2);
    assert_eq!(st.text.font, 5);
}

#[test]
fn placement_scales_then_shifts() {
    let p = Placement {
        xscale: 2.0,
        yscale: 0.5,
        hshift: 10,
        vshift: -3,
        fatmult: 1.5,
    };
    assert_eq!(p.apply(3, -4), (16, -5));
    assert_eq!(p.fat(4), 6);
    assert_eq!(Placement::default().apply(7, 8), (7, 8));
}

#[test]
fn color_table_is_bounded_and_lists_entries_in_order() {
    let mut t = ColorTable::new(4);
    t.set(3, [1, 2, 3]).unwrap();
    t.set(1, [4, 5, 6]).unwrap();
    assert_eq!(t.get(3).unwrap(), Some([1, 2, 3]));
    assert_eq!(t.get(0).unwrap(), None);
    assert!(matches!(t.set(4, [0; 3]), Err(PlotError::Capacity(_))));
    assert!(matches!(t.get(9), Err(PlotError::Capacity(_))));

    let set: Vec<_> = t.iter_set().collect();
    assert_eq!(set, vec![(1, [4, 5, 6]), (3, [1, 2, 3])]);
}
