use approx::assert_abs_diff_eq;

use cropsight_core::profile::{
    CloseRangeDetector, CloseRangeMode, CropKind, CropProfile, ThresholdSet, WeatherKind,
    WeatherProfile,
};

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

#[test]
fn test_crop_profiles_match_table() {
    let rice = CropProfile::for_kind(CropKind::Rice);
    assert_eq!(rice.color_range.lower, [35, 60, 60]);
    assert_eq!(rice.color_range.upper, [85, 255, 255]);
    assert_abs_diff_eq!(rice.optimal_altitude, 2.5);
    assert_abs_diff_eq!(rice.altitude_tolerance, 0.4);

    let corn = CropProfile::for_kind(CropKind::Corn);
    assert_abs_diff_eq!(corn.optimal_altitude, 4.0);
    assert_abs_diff_eq!(corn.altitude_tolerance, 0.8);
}

#[test]
fn test_unknown_crop_falls_back_to_general() {
    assert_eq!(CropKind::from_name("durian"), CropKind::General);
    assert_eq!(CropProfile::from_name("durian"), CropProfile::default());
    assert_eq!(CropKind::from_name(" Wheat "), CropKind::Wheat);
}

#[test]
fn test_unknown_weather_falls_back_to_clear() {
    assert_eq!(WeatherKind::from_name("tornado"), WeatherKind::Clear);
    assert_eq!(WeatherProfile::from_name("tornado"), WeatherProfile::default());
}

#[test]
fn test_weather_multipliers() {
    let rainy = WeatherProfile::for_kind(WeatherKind::Rainy);
    assert_abs_diff_eq!(rainy.brightness_mult, 0.6);
    assert_abs_diff_eq!(rainy.contrast_mult, 1.4);
    assert_abs_diff_eq!(rainy.sharpness_mult, 0.7);
}

// ---------------------------------------------------------------------------
// Threshold derivation
// ---------------------------------------------------------------------------

#[test]
fn test_open_field_general_clear() {
    let t = ThresholdSet::derive(&CropProfile::default(), &WeatherProfile::default(), false);
    assert_abs_diff_eq!(t.brightness.min, 60.0);
    assert_abs_diff_eq!(t.brightness.optimal, 120.0);
    assert_eq!(t.brightness.max, Some(180.0));
    assert_abs_diff_eq!(t.sharpness.min, 80.0);
    assert_abs_diff_eq!(t.color_coverage.optimal, 0.6);
    assert!(!t.close_range);
}

#[test]
fn test_weather_scales_bounds() {
    let cloudy = WeatherProfile::for_kind(WeatherKind::Cloudy);
    let t = ThresholdSet::derive(&CropProfile::default(), &cloudy, false);
    assert_abs_diff_eq!(t.brightness.min, 48.0, epsilon = 1e-9);
    assert_abs_diff_eq!(t.contrast.min, 30.0, epsilon = 1e-9);
    assert_abs_diff_eq!(t.sharpness.optimal, 135.0, epsilon = 1e-9);
    // Coverage is never weather dependent.
    assert_abs_diff_eq!(t.color_coverage.min, 0.3);
}

#[test]
fn test_texture_scales_with_crop() {
    let wheat = CropProfile::for_kind(CropKind::Wheat);
    let t = ThresholdSet::derive(&wheat, &WeatherProfile::default(), false);
    assert_abs_diff_eq!(t.texture_variance.min, 60.0, epsilon = 1e-9);
    assert_abs_diff_eq!(t.texture_variance.optimal, 120.0, epsilon = 1e-9);
}

#[test]
fn test_close_range_table() {
    let t = ThresholdSet::derive(&CropProfile::default(), &WeatherProfile::default(), true);
    assert_abs_diff_eq!(t.brightness.min, 30.0);
    assert_eq!(t.brightness.max, Some(220.0));
    assert_abs_diff_eq!(t.color_coverage.min, 0.05);
    assert!(t.close_range);
}

#[test]
fn test_every_combination_is_consistent() {
    for crop in CropKind::ALL {
        for weather in WeatherKind::ALL {
            for close_range in [false, true] {
                let t = ThresholdSet::derive(
                    &CropProfile::for_kind(crop),
                    &WeatherProfile::for_kind(weather),
                    close_range,
                );
                assert!(
                    t.is_consistent(),
                    "inconsistent bounds for {crop}/{weather}/{close_range}"
                );
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Close-range detection
// ---------------------------------------------------------------------------

#[test]
fn test_close_range_hysteresis() {
    let mut d = CloseRangeDetector::new(false);
    assert!(!d.observe(110.0, 50.0), "between bands keeps state");
    assert!(d.observe(90.0, 45.0));
    assert!(d.is_active());
    assert!(!d.observe(110.0, 30.0), "between bands keeps state");
    assert!(d.is_active());
    assert!(d.observe(130.0, 20.0));
    assert!(!d.is_active());
}

#[test]
fn test_close_range_mode_display_and_default() {
    assert_eq!(CloseRangeMode::default(), CloseRangeMode::Off);
    assert_eq!(format!("{}", CloseRangeMode::Auto), "Auto");
}
