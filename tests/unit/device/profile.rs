use super::*;

#[test]
fn default_limits_match_the_classic_screen() {
    let p = DeviceProfile::default();
    assert_eq!(p.standard_limits(), DeviceRect::new(0, 0, 8192, 6144));
    assert_eq!(p.big_limits(), DeviceRect::new(-32760, -24570, 32760, 24570));
    assert_eq!(p.standard_top(), 6144);
}

#[test]
fn unit_conversions_round_like_the_device() {
    let p = DeviceProfile::default();
    assert_eq!(p.to_inches(600), 1.0);
    assert_eq!(p.inch_point(300, -150), InchPoint { x: 0.5, y: -0.25 });
    // 10 * 200 / 600 = 3.33 -> 3; 15 * 200 / 600 = 5
    assert_eq!(p.device_fat(10), 3);
    assert_eq!(p.device_fat(15), 5);
    assert_eq!(p.device_text_size(600), 33);
    assert_eq!(p.gun_fraction(255), 1.0);
    assert_eq!(p.gun_fraction(0), 0.0);
}

#[test]
fn profile_fields_default_when_missing_from_json() {
    let p: DeviceProfile = serde_json::from_str(r#"{ "resolution_per_inch": 1200.0 }"#).unwrap();
    assert_eq!(p.resolution_per_inch, 1200.0);
    assert_eq!(p.max_gun, 255);
}
