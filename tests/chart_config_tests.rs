use chart_stage::api::{Chart, ChartConfig};
use chart_stage::core::{Padding, PaddingEdge};
use chart_stage::render::NullHost;

#[test]
fn json_round_trip_preserves_the_config() {
    let config = ChartConfig::new("root")
        .with_size(720.0, 360.0)
        .with_force_fit(true)
        .with_padding(Padding::new([
            PaddingEdge::Fixed(12.0),
            PaddingEdge::AUTO,
            PaddingEdge::Fixed(30.0),
            PaddingEdge::AUTO,
        ]))
        .with_resize_debounce_ms(150);

    let json = config.to_json_pretty().expect("serialize");
    let restored = ChartConfig::from_json_str(&json).expect("parse");
    assert_eq!(restored, config);
}

#[test]
fn overlay_settings_can_be_disabled_from_json() {
    let config = ChartConfig::from_json_str(
        r#"{"container": "root", "options": {"legend": null, "tooltip": null}}"#,
    )
    .expect("valid json");
    assert!(config.options.legend.is_none());
    assert!(config.options.tooltip.is_none());

    let host = NullHost::with_container("root", 640.0);
    let mut chart = Chart::new(host, config).expect("chart init");
    chart.render().expect("render");
    assert_eq!(chart.legends().legend_count(), 0);
    assert!(!chart.tooltip_controller().is_armed());
}

#[test]
fn invalid_tolerance_fails_init() {
    let host = NullHost::with_container("root", 640.0);
    let config = ChartConfig::new("root").with_padding_tolerance(-1.0);
    assert!(Chart::new(host, config).is_err());
}
