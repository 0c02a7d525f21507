use super::*;
use crate::config::PenConfig;
use crate::device::{DeviceCall, DeviceProfile, RecordingDevice};
use crate::render::attributes::Attribute;
use crate::render::pattern::{FillPattern, PatternTable};

fn plotter() -> Plotter<RecordingDevice> {
    let patterns = PatternTable::new().with(0, FillPattern::new(2, 3, vec![0; 6]).unwrap());
    Plotter::new(
        RecordingDevice::new(),
        PenConfig::default(),
        DeviceProfile::default(),
        patterns,
    )
    .unwrap()
}

fn square(p: &mut Plotter<RecordingDevice>) {
    p.begin_polygon(4).unwrap();
    for (x, y) in [(0, 0), (600, 0), (600, 600), (0, 600)] {
        p.push_vertex(x, y).unwrap();
    }
    p.finish_polygon().unwrap();
}

#[test]
fn unfilled_polygon_is_outlined_without_color_switch() {
    let mut p = plotter();
    square(&mut p);
    let calls = p.device.calls();
    assert_eq!(calls.len(), 1);
    let DeviceCall::Area {
        vertices,
        fill,
        pattern_dims,
    } = &calls[0]
    else {
        panic!("expected an area call, got {calls:?}");
    };
    assert_eq!(vertices.len(), 4);
    assert_eq!(vertices[2], InchPoint { x: 1.0, y: 1.0 });
    assert_eq!(*fill, None);
    assert_eq!(*pattern_dims, (2, 3));
    assert!(p.polygon.is_none());
}

#[test]
fn pattern_fill_switches_to_the_pattern_color_and_back() {
    let mut p = plotter();
    p.interp.fill_pattern = 3;
    square(&mut p);
    let calls = p.device.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0], DeviceCall::Color { index: 2 });
    assert!(matches!(calls[1], DeviceCall::Fill { .. }));
    assert_eq!(calls[2], DeviceCall::Color { index: 7 });
}

#[test]
fn pattern_fill_in_the_current_color_needs_no_switch() {
    let mut p = plotter();
    p.apply_attribute(&Attribute::Color(2)).unwrap();
    p.device.take();
    p.interp.fill_pattern = 3;
    square(&mut p);
    let calls = p.device.calls();
    assert_eq!(calls.len(), 1);
    assert!(matches!(calls[0], DeviceCall::Fill { .. }));
}

#[test]
fn polygon_start_loses_pen_and_cache() {
    let mut p = plotter();
    p.plot_point((0, 0), false).unwrap();
    p.apply_attribute(&Attribute::Color(2)).unwrap();
    p.begin_polygon(3).unwrap();
    assert!(p.pen.lost);
    p.apply_attribute(&Attribute::Color(2)).unwrap();
    assert_eq!(
        p.device.count(|c| matches!(c, DeviceCall::Color { index: 2 })),
        2
    );
}

#[test]
fn vertex_sequencing_is_checked() {
    let mut p = plotter();
    assert!(matches!(
        p.push_vertex(0, 0),
        Err(PlotError::Validation(_))
    ));
    assert!(matches!(p.finish_polygon(), Err(PlotError::Validation(_))));

    p.begin_polygon(1).unwrap();
    p.push_vertex(0, 0).unwrap();
    assert!(matches!(p.push_vertex(1, 1), Err(PlotError::Capacity(_))));
    p.finish_polygon().unwrap();
    assert!(p.polygon.is_none());
}
