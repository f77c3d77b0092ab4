use keyout_core::buffer::Rgb;
use keyout_core::preset::MaskPreset;
use keyout_core::threshold::{ChannelRange, ThresholdState};

#[test]
fn test_preset_toml_round_trip() {
    let preset = MaskPreset::new(ThresholdState::pinned(Rgb::new(10, 20, 30)), true);
    let text = toml::to_string_pretty(&preset).unwrap();
    let back: MaskPreset = toml::from_str(&text).unwrap();
    assert_eq!(back, preset);
}

#[test]
fn test_preset_missing_fields_default() {
    let text = r#"
        [thresholds.green]
        lower = 100
        upper = 150
    "#;
    let preset: MaskPreset = toml::from_str(text).unwrap();
    assert!(!preset.highlight);
    assert_eq!(preset.thresholds.red, ChannelRange::FULL);
    assert_eq!(preset.thresholds.green, ChannelRange::new(100, 150));
    assert_eq!(preset.thresholds.blue, ChannelRange::FULL);
}

#[test]
fn test_empty_preset_is_default() {
    let preset: MaskPreset = toml::from_str("").unwrap();
    assert_eq!(preset, MaskPreset::default());
}

#[test]
fn test_out_of_range_bound_is_rejected() {
    let text = r#"
        [thresholds.red]
        lower = 0
        upper = 256
    "#;
    assert!(toml::from_str::<MaskPreset>(text).is_err());
}
