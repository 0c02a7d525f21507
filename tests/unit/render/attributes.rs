use super::*;
use crate::device::{DeviceCall, RecordingDevice};
use crate::foundation::core::{DashPair, InchPoint};
use crate::render::pattern::FillPattern;

struct Rig {
    cache: AttributeCache,
    dev: RecordingDevice,
    profile: DeviceProfile,
    patterns: PatternTable,
}

impl Rig {
    fn new(dumb: bool) -> Self {
        let patterns = PatternTable::new()
            .with(0, FillPattern::new(1, 1, vec![0]).unwrap())
            .with(2, FillPattern::new(2, 2, vec![1, 0, 0, 1]).unwrap());
        Self {
            cache: AttributeCache::new(8, 7, dumb),
            dev: RecordingDevice::new(),
            profile: DeviceProfile::default(),
            patterns,
        }
    }

    fn apply(&mut self, attr: Attribute) -> bool {
        self.cache
            .apply(&attr, &mut self.dev, &self.profile, &self.patterns)
            .unwrap()
    }
}

#[test]
fn identical_color_is_sent_once() {
    let mut rig = Rig::new(false);
    assert!(rig.apply(Attribute::Color(3)));
    assert!(!rig.apply(Attribute::Color(3)));
    assert_eq!(rig.dev.calls(), &[DeviceCall::Color { index: 3 }]);
    assert_eq!(rig.cache.color(), 3);
}

#[test]
fn invalidation_forces_retransmission_but_keeps_values() {
    let mut rig = Rig::new(false);
    rig.apply(Attribute::Fat(30));
    rig.cache.invalidate();
    assert_eq!(rig.cache.fat(), 30);
    assert!(rig.apply(Attribute::Fat(30)));
    assert_eq!(rig.dev.count(|c| matches!(c, DeviceCall::Fat { fat: 10 })), 2);
}

#[test]
fn color_table_skips_entries_the_device_already_holds() {
    let mut rig = Rig::new(false);
    assert!(rig.apply(Attribute::ColorTable {
        index: 3,
        rgb: [255, 0, 0]
    }));
    // Same selection: first-level hit.
    assert!(!rig.apply(Attribute::ColorTable {
        index: 3,
        rgb: [255, 0, 0]
    }));
    assert!(rig.apply(Attribute::ColorTable {
        index: 4,
        rgb: [0, 255, 0]
    }));
    // Different selection, but entry 3 still holds red: second-level hit.
    assert!(!rig.apply(Attribute::ColorTable {
        index: 3,
        rgb: [255, 0, 0]
    }));
    assert_eq!(
        rig.dev.calls()[0],
        DeviceCall::ColorTable {
            index: 3,
            rgb: [1.0, 0.0, 0.0]
        }
    );
    assert_eq!(rig.dev.calls().len(), 2);
}

#[test]
fn color_table_resync_ignores_the_history() {
    let mut rig = Rig::new(false);
    rig.apply(Attribute::ColorTable {
        index: 1,
        rgb: [1, 2, 3],
    });
    rig.cache.invalidate();
    rig.cache.set_resync(true);
    assert!(rig.apply(Attribute::ColorTable {
        index: 1,
        rgb: [1, 2, 3]
    }));
    rig.cache.set_resync(false);
    assert_eq!(rig.dev.calls().len(), 2);
}

#[test]
fn color_table_index_is_bounded() {
    let mut rig = Rig::new(false);
    let err = rig
        .cache
        .apply(
            &Attribute::ColorTable {
                index: 8,
                rgb: [0; 3],
            },
            &mut rig.dev,
            &rig.profile,
            &rig.patterns,
        )
        .unwrap_err();
    assert!(matches!(err, PlotError::Capacity(_)));
}

#[test]
fn window_is_sent_in_inches() {
    let mut rig = Rig::new(false);
    rig.apply(Attribute::Window(DeviceRect::new(0, 300, 1200, 600)));
    assert!(!rig.apply(Attribute::Window(DeviceRect::new(0, 300, 1200, 600))));
    assert_eq!(
        rig.dev.calls(),
        &[DeviceCall::Clip {
            min: InchPoint { x: 0.0, y: 0.5 },
            max: InchPoint { x: 2.0, y: 1.0 },
        }]
    );
}

#[test]
fn dash_compares_every_pair() {
    let mut rig = Rig::new(false);
    let a = DashPattern::new([DashPair { dash: 0.1, gap: 0.2 }]).unwrap();
    let b = DashPattern::new([DashPair { dash: 0.1, gap: 0.3 }]).unwrap();
    assert!(rig.apply(Attribute::Dash(a.clone())));
    assert!(!rig.apply(Attribute::Dash(a)));
    assert!(rig.apply(Attribute::Dash(b)));
    assert!(rig.apply(Attribute::Dash(DashPattern::solid())));
}

#[test]
fn fill_pattern_is_reloaded_every_time() {
    let mut rig = Rig::new(false);
    assert!(rig.apply(Attribute::FillPattern(2)));
    assert!(rig.apply(Attribute::FillPattern(2)));
    let loads: Vec<_> = rig
        .dev
        .calls()
        .iter()
        .filter(|c| matches!(c, DeviceCall::PatternLoad { .. }))
        .collect();
    assert_eq!(loads.len(), 2);
    assert_eq!(
        loads[0],
        &DeviceCall::PatternLoad {
            density: 600,
            xdim: 2,
            ydim: 2,
            slot: 1,
            bits: vec![1, 0, 0, 1],
        }
    );
}

#[test]
fn undefined_fill_pattern_is_rejected() {
    let mut rig = Rig::new(false);
    let err = rig
        .cache
        .apply(
            &Attribute::FillPattern(5),
            &mut rig.dev,
            &rig.profile,
            &rig.patterns,
        )
        .unwrap_err();
    assert!(matches!(err, PlotError::Validation(_)));
}

#[test]
fn font_keeps_previous_axes() {
    let mut rig = Rig::new(false);
    rig.apply(Attribute::Font(FontSpec {
        font: Some(3),
        precision: Some(2),
        overlay: Some(0),
    }));
    rig.apply(Attribute::Font(FontSpec {
        font: None,
        precision: Some(1),
        overlay: None,
    }));
    assert!(!rig.apply(Attribute::Font(FontSpec::default())));
    assert_eq!(
        rig.dev.calls()[1],
        DeviceCall::TextFont {
            font: 3,
            precision: 1,
            overlay: 0
        }
    );
    assert_eq!(rig.dev.calls().len(), 2);
}

#[test]
fn justification_and_fat_are_sent_on_change() {
    let mut rig = Rig::new(false);
    rig.apply(Attribute::Justify {
        horizontal: 1,
        vertical: 2,
    });
    assert!(!rig.apply(Attribute::Justify {
        horizontal: 1,
        vertical: 2
    }));
    rig.apply(Attribute::Fat(15));
    assert!(!rig.apply(Attribute::Fat(15)));
    assert_eq!(
        rig.dev.calls(),
        &[
            DeviceCall::TextJustify {
                horizontal: 1,
                vertical: 2
            },
            DeviceCall::Fat { fat: 5 },
        ]
    );
}

#[test]
fn overlay_is_recorded_but_never_sent() {
    let mut rig = Rig::new(false);
    assert!(!rig.apply(Attribute::Overlay(1)));
    assert_eq!(rig.cache.overlay(), 1);
    assert!(rig.dev.calls().is_empty());
}

#[test]
fn outermost_group_is_not_sent() {
    let mut rig = Rig::new(false);
    assert!(!rig.apply(Attribute::BeginGroup {
        name: "file".into(),
        level: 0
    }));
    assert!(rig.apply(Attribute::BeginGroup {
        name: "axes".into(),
        level: 1
    }));
    assert!(rig.apply(Attribute::EndGroup { level: 1 }));
    assert!(!rig.apply(Attribute::EndGroup { level: 0 }));
    assert_eq!(
        rig.dev.calls(),
        &[
            DeviceCall::BeginGroup {
                name: "axes".into()
            },
            DeviceCall::EndGroup,
        ]
    );
}

#[test]
fn dumb_devices_only_change_color() {
    let mut rig = Rig::new(true);
    assert!(rig.cache.is_dumb());
    assert!(!rig.apply(Attribute::Fat(30)));
    assert!(!rig.apply(Attribute::Window(DeviceRect::new(0, 0, 10, 10))));
    assert!(!rig.apply(Attribute::FillPattern(2)));
    assert!(rig.apply(Attribute::Color(2)));
    assert_eq!(rig.dev.calls(), &[DeviceCall::Color { index: 2 }]);
}
