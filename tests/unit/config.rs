use super::*;

#[test]
fn stat_codes_follow_the_classic_letters() {
    assert_eq!(StatMode::from_code("y"), StatMode::Full);
    assert_eq!(StatMode::from_code("Yes"), StatMode::Full);
    assert_eq!(StatMode::from_code("1"), StatMode::Full);
    assert_eq!(StatMode::from_code("l"), StatMode::Compact);
    assert_eq!(StatMode::from_code("n"), StatMode::Off);
    assert_eq!(StatMode::from_code(""), StatMode::Off);
}

#[test]
fn align_codes_parse_and_keep_unknown_letters() {
    let a = AlignSpec::parse("lt").unwrap();
    assert_eq!(a.horizontal, HAlign::Left);
    assert_eq!(a.vertical, VAlign::Top);
    assert!(AlignSpec::parse("uu").unwrap().is_unconstrained());

    let odd = AlignSpec::parse("xq").unwrap();
    assert_eq!(odd.horizontal, HAlign::Unknown('x'));
    assert_eq!(odd.vertical, VAlign::Unknown('q'));
    assert_eq!(odd.to_string(), "xq");
}

#[test]
fn align_codes_must_be_two_characters() {
    assert!(matches!(AlignSpec::parse("l"), Err(PlotError::Config(_))));
    assert!(matches!(AlignSpec::parse("lbt"), Err(PlotError::Config(_))));
}

#[test]
fn defaults_need_no_diagnostic_pass() {
    let cfg = PenConfig::default();
    assert_eq!(cfg.frame_border, -1);
    assert!(cfg.is_big());
    assert!(cfg.uses_absolute_style());
    assert!(!cfg.wants_fit());
    assert!(!cfg.wants_diagnostic_pass());
}

#[test]
fn any_of_stat_align_or_fit_requests_a_diagnostic_pass() {
    let stat = PenConfig {
        stat: StatMode::Full,
        ..PenConfig::default()
    };
    let align = PenConfig {
        align: AlignSpec::parse("cc").unwrap(),
        ..PenConfig::default()
    };
    let fit = PenConfig {
        ysize: 4.0,
        ..PenConfig::default()
    };
    assert!(stat.wants_diagnostic_pass());
    assert!(align.wants_diagnostic_pass());
    assert!(fit.wants_diagnostic_pass());
}

#[test]
fn config_deserializes_with_defaults() {
    let cfg: PenConfig =
        serde_json::from_str(r#"{ "stat": "compact", "align": "lb", "xsize": 5.0 }"#).unwrap();
    assert_eq!(cfg.stat, StatMode::Compact);
    assert_eq!(cfg.align.horizontal, HAlign::Left);
    assert_eq!(cfg.frame_border, -1);
    assert!(cfg.wants_fit());

    assert!(serde_json::from_str::<PenConfig>(r#"{ "align": "l" }"#).is_err());
}

#[test]
fn grid_switches_off_big_screen_and_style_by_default() {
    let cfg = PenConfig {
        grid: Some(GridConfig {
            columns: 3,
            rows: None,
            cell_size: Some([2.0, 1.5]),
        }),
        frame_border: 2,
        ..PenConfig::default()
    };
    assert!(!cfg.is_big());
    assert!(!cfg.uses_absolute_style());

    let profile = DeviceProfile::default();
    assert_eq!(cfg.limits(&profile), profile.standard_limits());

    let grid = cfg.grid_layout(&profile).unwrap();
    assert_eq!(grid.columns, 3);
    assert_eq!(grid.rows, 3);
    assert_eq!(grid.cell_width, 1200);
    assert_eq!(grid.cell_height, 900);
    assert_eq!(grid.top, 6144);
    assert_eq!(grid.border_fat, Some(2));
}

#[test]
fn default_grid_cells_split_the_standard_screen() {
    let cfg = PenConfig {
        grid: Some(GridConfig {
            columns: 2,
            rows: Some(4),
            cell_size: None,
        }),
        ..PenConfig::default()
    };
    let grid = cfg.grid_layout(&DeviceProfile::default()).unwrap();
    assert_eq!(grid.cell_width, 4096);
    assert_eq!(grid.cell_height, 1536);
    assert_eq!(grid.border_fat, None);
}

#[test]
fn big_screen_is_centred_on_the_origin() {
    let profile = DeviceProfile::default();
    let limits = PenConfig::default().limits(&profile);
    assert_eq!(limits.xmin, -limits.xmax);
    assert_eq!(limits.ymin, -limits.ymax);
}

#[test]
fn validation_rejects_degenerate_grids_and_sizes() {
    let mut cfg = PenConfig {
        grid: Some(GridConfig {
            columns: 0,
            rows: None,
            cell_size: None,
        }),
        ..PenConfig::default()
    };
    assert!(cfg.validate().is_err());

    cfg.grid = Some(GridConfig {
        columns: 2,
        rows: None,
        cell_size: Some([0.0, 1.0]),
    });
    assert!(cfg.validate().is_err());

    cfg.grid = None;
    cfg.xsize = -1.0;
    assert!(cfg.validate().is_err());

    cfg.xsize = 3.0;
    assert!(cfg.validate().is_ok());
}
