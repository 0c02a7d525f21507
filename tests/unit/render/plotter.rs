use super::*;
use crate::device::DeviceCall;
use crate::render::bindings::DIAGNOSTIC;

fn plotter(config: PenConfig) -> Plotter<crate::device::RecordingDevice> {
    Plotter::new(
        crate::device::RecordingDevice::new(),
        config,
        DeviceProfile::default(),
        PatternTable::new(),
    )
    .unwrap()
}

#[test]
fn new_plotter_is_live_and_wants_a_fresh_start() {
    let mut p = plotter(PenConfig::default());
    assert!(!p.bindings().is_diagnostic());
    assert!(p.take_start_fresh());
    assert!(!p.take_start_fresh());
    assert!(!p.take_parameter_reset());
    assert_eq!(p.frame_limits(), DeviceProfile::default().big_limits());
}

#[test]
fn invalid_configuration_is_rejected() {
    let cfg = PenConfig {
        xsize: -2.0,
        ..PenConfig::default()
    };
    let err = Plotter::new(
        crate::device::RecordingDevice::new(),
        cfg,
        DeviceProfile::default(),
        PatternTable::new(),
    )
    .err()
    .unwrap();
    assert!(matches!(err, crate::PlotError::Config(_)));
}

#[test]
fn live_reset_installs_defaults() {
    let mut p = plotter(PenConfig {
        force_initial_erase: true,
        ..PenConfig::default()
    });
    p.reset().unwrap();
    let calls = p.device().calls();
    assert_eq!(calls[0], DeviceCall::Erase);
    assert_eq!(calls[1], DeviceCall::AbsoluteStyle);
    assert!(matches!(calls[2], DeviceCall::Clip { .. }));
    assert_eq!(calls[3], DeviceCall::Color { index: 7 });
    assert_eq!(calls[4], DeviceCall::Fat { fat: 0 });
    assert_eq!(
        calls[5],
        DeviceCall::Dash {
            pattern: DashPattern::solid()
        }
    );
    assert_eq!(
        calls[6],
        DeviceCall::TextFont {
            font: 3,
            precision: 2,
            overlay: 0
        }
    );
    assert_eq!(
        calls[7],
        DeviceCall::TextJustify {
            horizontal: 0,
            vertical: 0
        }
    );
    assert_eq!(calls.len(), 8);
    assert!(p.pen().lost);
}

#[test]
fn dumb_reset_sends_nothing() {
    let mut p = plotter(PenConfig {
        dumb: true,
        ..PenConfig::default()
    });
    p.reset().unwrap();
    assert!(p.device().calls().is_empty());
}

#[test]
fn repeated_attribute_reaches_the_device_once() {
    let mut p = plotter(PenConfig::default());
    p.attributes(&Attribute::Justify {
        horizontal: 2,
        vertical: 1,
    })
    .unwrap();
    p.attributes(&Attribute::Justify {
        horizontal: 2,
        vertical: 1,
    })
    .unwrap();
    assert_eq!(p.device().calls().len(), 1);
    assert!(p.pen().lost);
}

#[test]
fn attribute_call_loses_the_pen_even_when_suppressed() {
    let mut p = plotter(PenConfig::default());
    p.attributes(&Attribute::Color(4)).unwrap();
    p.plot((0, 0), false).unwrap();
    assert!(!p.pen().lost);
    p.attributes(&Attribute::Overlay(0)).unwrap();
    assert!(p.pen().lost);
}

#[test]
fn diagnostic_bindings_only_measure() {
    let mut p = plotter(PenConfig::default());
    p.use_bindings(&DIAGNOSTIC);
    p.reset_extent();
    p.reset().unwrap();
    p.attributes(&Attribute::Color(3)).unwrap();
    p.vector((-10, -5), (10, 5), 0, false).unwrap();
    p.marker(1, 100, &[(40, 40)]).unwrap();
    p.interpreter_mut().cursor = (-30, 0);
    p.text("label", (100.0, 0.0), (0.0, 100.0)).unwrap();
    p.erase(EraseEvent::Start).unwrap();
    p.erase(EraseEvent::Middle).unwrap();

    assert!(p.device().calls().is_empty());
    assert_eq!(p.extent(), BoundingBox::from_corners(-30, -5, 40, 40));
    assert_eq!(p.frames().counter, 1);
}

#[test]
fn diagnostic_vectors_are_clipped_to_the_window() {
    let mut p = plotter(PenConfig::default());
    p.use_bindings(&DIAGNOSTIC);
    p.reset_extent();
    p.interpreter_mut().window = DeviceRect::new(0, 0, 100, 100);
    p.vector((-50, 50), (50, 50), 0, false).unwrap();
    p.vector((200, 200), (300, 300), 0, false).unwrap();
    assert_eq!(p.extent(), BoundingBox::from_corners(0, 50, 50, 50));
}

#[test]
fn diagnostic_area_and_raster_log_outlines() {
    let mut p = plotter(PenConfig::default());
    p.use_bindings(&DIAGNOSTIC);
    p.reset_extent();
    p.area(&[(0, 0), (10, 0), (5, 20)]).unwrap();
    let block = RasterBlock {
        xpix: 1,
        ypix: 1,
        data: vec![0],
    };
    p.raster(&block, (-5, -5), (1, 2), 0).unwrap();
    assert!(p.device().calls().is_empty());
    assert_eq!(p.extent(), BoundingBox::from_corners(-5, -5, 10, 20));
}

#[test]
fn live_area_goes_through_the_polygon_path() {
    let mut p = plotter(PenConfig::default());
    p.area(&[(0, 0), (600, 0), (600, 600)]).unwrap();
    assert!(matches!(
        p.device().calls(),
        [DeviceCall::Area { fill: None, .. }]
    ));
}

#[test]
fn live_marker_and_raster_reach_the_device() {
    let mut p = plotter(PenConfig {
        bit: 4,
        ..PenConfig::default()
    });
    p.marker(2, 600, &[(600, 0), (0, 600)]).unwrap();
    let block = RasterBlock {
        xpix: 2,
        ypix: 1,
        data: vec![0, 255],
    };
    p.raster(&block, (0, 0), (600, 300), 1).unwrap();

    let calls = p.device().calls();
    assert_eq!(
        calls[0],
        DeviceCall::Marker {
            kind: 2,
            size: 33,
            points: vec![InchPoint { x: 1.0, y: 0.0 }, InchPoint { x: 0.0, y: 1.0 }],
        }
    );
    assert_eq!(
        calls[1],
        DeviceCall::Raster {
            xpix: 2,
            ypix: 1,
            bit: Some(4),
            min: InchPoint { x: 0.0, y: 0.0 },
            max: InchPoint { x: 1.0, y: 0.5 },
            orient: 1,
        }
    );
    assert!(p.pen().lost);
}

#[test]
fn live_text_returns_the_pen_to_the_anchor() {
    let mut p = plotter(PenConfig::default());
    p.interpreter_mut().cursor = (600, 1200);
    p.text("", (60.0, 0.0), (0.0, 60.0)).unwrap();
    assert!(p.device().calls().is_empty());

    p.text("hi", (60.0, 0.0), (0.0, 60.0)).unwrap();
    let at = InchPoint { x: 1.0, y: 2.0 };
    assert_eq!(
        p.device().calls(),
        &[
            DeviceCall::Text {
                at,
                path: InchPoint { x: 0.1, y: 0.0 },
                up: InchPoint { x: 0.0, y: 0.1 },
                text: "hi".into(),
            },
            DeviceCall::Move { to: at },
        ]
    );
}

#[test]
fn point_is_a_zero_length_vector() {
    let mut p = plotter(PenConfig::default());
    p.point((60, 60)).unwrap();
    let at = InchPoint { x: 0.1, y: 0.1 };
    assert_eq!(
        p.device().calls(),
        &[DeviceCall::Move { to: at }, DeviceCall::Draw { to: at }]
    );
}

#[test]
fn saved_message_is_forwarded_on_done() {
    let mut p = plotter(PenConfig::default());
    p.message(MessageEvent::Ready, "").unwrap();
    p.message(MessageEvent::Text, "not saved").unwrap();
    p.message(MessageEvent::Message, "").unwrap();
    p.message(MessageEvent::Text, "change ").unwrap();
    p.message(MessageEvent::Text, "\r\n").unwrap();
    p.message(MessageEvent::Text, "paper").unwrap();
    p.message(MessageEvent::Done, "").unwrap();
    assert_eq!(
        p.device().calls(),
        &[DeviceCall::Message {
            text: "change paper".into()
        }]
    );
}

#[test]
fn dumb_devices_get_no_messages() {
    let mut p = plotter(PenConfig {
        dumb: true,
        ..PenConfig::default()
    });
    p.message(MessageEvent::Message, "").unwrap();
    p.message(MessageEvent::Text, "hello").unwrap();
    p.message(MessageEvent::Done, "").unwrap();
    assert!(p.device().calls().is_empty());
}

#[test]
fn oversized_message_is_rejected() {
    let mut p = plotter(PenConfig::default());
    p.message(MessageEvent::Message, "").unwrap();
    let long = "x".repeat(crate::render::message::MESSAGE_CAPACITY + 1);
    let err = p.message(MessageEvent::Text, &long).unwrap_err();
    assert!(matches!(err, crate::PlotError::Capacity(_)));
}

#[test]
fn diagnostic_messages_never_reach_the_device() {
    let mut p = plotter(PenConfig::default());
    p.use_bindings(&DIAGNOSTIC);
    p.message(MessageEvent::Message, "").unwrap();
    p.message(MessageEvent::Text, "hello").unwrap();
    p.message(MessageEvent::Done, "").unwrap();
    assert!(p.device().calls().is_empty());
}

#[test]
fn non_interactive_device_has_no_points() {
    let mut p = plotter(PenConfig::default());
    assert_eq!(p.getpoint().unwrap(), None);
    p.interact().unwrap();
}
