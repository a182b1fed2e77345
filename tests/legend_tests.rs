use chart_stage::api::{Chart, ChartConfig, LegendSetting};
use chart_stage::controller::{
    CustomLegend, FieldLegendOptions, LegendController, LegendItem, LegendOptions, LegendPosition,
};
use chart_stage::core::{ContentRect, Padding, Scale};
use chart_stage::render::{Color, NullHost};
use chart_stage::view::{AttributeRole, PointGeometry, ViewConfig};
use serde_json::json;

fn geometry(color_field: &str) -> PointGeometry {
    PointGeometry::new(
        Scale::category("genre", Vec::<&str>::new()),
        Scale::linear("sold", 0.0, 100.0),
    )
    .color(Scale::category(color_field, Vec::<&str>::new()))
    .with_json_records(vec![
        json!({"genre": "Sports", "region": "EU", "sold": 50}),
        json!({"genre": "Action", "region": "US", "sold": 100}),
    ])
    .expect("records are objects")
}

fn build_chart() -> Chart<NullHost> {
    let host = NullHost::with_container("root", 640.0);
    let config = ChartConfig::new("root")
        .with_size(500.0, 400.0)
        .with_padding(Padding::auto());
    Chart::new(host, config).expect("chart init")
}

fn controller() -> LegendController {
    LegendController::new(
        LegendOptions::default(),
        ContentRect::from_edges(0.0, 0.0, 400.0, 300.0),
    )
}

#[test]
fn equivalent_scales_register_a_single_legend() {
    let mut legends = controller();
    let marks = geometry("genre");
    let first = Scale::category("genre", ["Sports", "Action"]);
    let reordered = Scale::category("genre", ["Action", "Sports"]);

    assert!(legends.add_legend(&first, AttributeRole::Color, &marks, &[]));
    assert!(!legends.add_legend(&reordered, AttributeRole::Color, &marks, &[]));
    assert_eq!(legends.legend_count(), 1);
}

#[test]
fn scales_differing_only_in_field_register_two_legends() {
    let mut legends = controller();
    let marks = geometry("genre");
    assert!(legends.add_legend(
        &Scale::category("genre", ["a", "b"]),
        AttributeRole::Color,
        &marks,
        &[]
    ));
    assert!(legends.add_legend(
        &Scale::category("region", ["a", "b"]),
        AttributeRole::Color,
        &marks,
        &[]
    ));
    assert_eq!(legends.legend_count(), 2);
}

#[test]
fn identity_and_fieldless_scales_are_silently_skipped() {
    let mut legends = controller();
    let marks = geometry("genre");
    assert!(!legends.add_legend(&Scale::identity("red"), AttributeRole::Color, &marks, &[]));
    let mut fieldless = Scale::category("genre", ["a"]);
    fieldless.field = None;
    assert!(!legends.add_legend(&fieldless, AttributeRole::Color, &marks, &[]));
    assert_eq!(legends.legend_count(), 0);
}

#[test]
fn same_color_scale_across_views_yields_one_legend() {
    let mut chart = build_chart();
    chart
        .view(ViewConfig::default().region((0.0, 0.0), (0.5, 1.0)))
        .attach_geometry(geometry("genre"));
    chart
        .view(ViewConfig::default().region((0.5, 0.0), (1.0, 1.0)))
        .attach_geometry(geometry("genre"));
    chart.render().expect("render");

    let legends = chart.legends().legends();
    assert_eq!(legends.len(), 1);
    assert_eq!(legends[0].field(), Some("genre"));
    let labels: Vec<&str> = legends[0]
        .items()
        .iter()
        .map(|item| item.label.as_str())
        .collect();
    assert_eq!(labels, vec!["Sports", "Action"]);
}

#[test]
fn field_setting_hides_one_legend() {
    let mut chart = build_chart();
    chart.root_view_mut().attach_geometry(geometry("genre"));
    chart
        .view(ViewConfig::default())
        .attach_geometry(geometry("region"));
    chart.legend(LegendSetting::Field {
        field: "genre".to_owned(),
        config: None,
    });
    chart.render().expect("render");

    let fields: Vec<_> = chart
        .legends()
        .legends()
        .iter()
        .map(|legend| legend.field())
        .collect();
    assert_eq!(fields, vec![Some("region")]);
}

#[test]
fn field_setting_can_move_a_legend() {
    let mut chart = build_chart();
    chart.root_view_mut().attach_geometry(geometry("genre"));
    chart.legend(LegendSetting::Field {
        field: "genre".to_owned(),
        config: Some(FieldLegendOptions {
            position: Some(LegendPosition::Right),
            title: Some("Genre".to_owned()),
            ..FieldLegendOptions::default()
        }),
    });
    chart.render().expect("render");

    let legend = &chart.legends().legends()[0];
    assert_eq!(legend.position(), LegendPosition::Right);
    assert_eq!(legend.title(), Some("Genre"));
    // A right legend pushes the right edge instead of the bottom one.
    assert!(chart.padding().lengths()[1] > 30.0);
}

#[test]
fn custom_legend_bypasses_scale_discovery() {
    let mut chart = build_chart();
    chart.root_view_mut().attach_geometry(geometry("genre"));
    chart.legend(LegendSetting::Show(LegendOptions {
        custom: Some(CustomLegend {
            title: None,
            items: vec![LegendItem {
                label: "Forecast".to_owned(),
                color: Color::rgb(1.0, 0.0, 0.0),
                checked: true,
            }],
        }),
        ..LegendOptions::default()
    }));
    chart.render().expect("render");

    let legends = chart.legends().legends();
    assert_eq!(legends.len(), 1);
    assert!(legends[0].is_custom());
    assert_eq!(legends[0].items()[0].label, "Forecast");
}

#[test]
fn filtered_values_are_reported_unchecked() {
    let mut chart = build_chart();
    chart
        .root_view_mut()
        .attach_geometry(geometry("genre"))
        .filter("genre", |value| value.to_string() != "Action");
    chart.render().expect("render");

    let items = chart.legends().legends()[0].items();
    let checked: Vec<(&str, bool)> = items
        .iter()
        .map(|item| (item.label.as_str(), item.checked))
        .collect();
    assert_eq!(checked, vec![("Sports", true), ("Action", false)]);
}

#[test]
fn keep_legend_survives_clear() {
    let mut chart = build_chart();
    chart.root_view_mut().attach_geometry(geometry("genre"));
    chart.render().expect("render");
    chart.set_keep_legend(true);
    chart.clear().expect("clear");
    assert_eq!(chart.legends().legend_count(), 1);

    chart.set_keep_legend(false);
    chart.clear().expect("clear");
    assert_eq!(chart.legends().legend_count(), 0);
}

#[test]
fn show_after_field_keeps_per_field_settings() {
    let mut chart = build_chart();
    chart.root_view_mut().attach_geometry(geometry("genre"));
    chart.legend(LegendSetting::Field {
        field: "genre".to_owned(),
        config: None,
    });
    chart.legend(LegendSetting::Show(LegendOptions {
        position: LegendPosition::Right,
        ..LegendOptions::default()
    }));
    chart.render().expect("render");

    assert_eq!(chart.legends().legend_count(), 0);
    assert_eq!(chart.legends().options().position, LegendPosition::Right);
    assert!(chart.legends().options().fields["genre"].hidden);
}

#[test]
fn show_overrides_only_the_fields_it_names() {
    let mut chart = build_chart();
    chart.root_view_mut().attach_geometry(geometry("genre"));
    chart
        .view(ViewConfig::default())
        .attach_geometry(geometry("region"));
    chart.legend(LegendSetting::Field {
        field: "genre".to_owned(),
        config: None,
    });
    chart.legend(LegendSetting::Field {
        field: "region".to_owned(),
        config: None,
    });
    let mut fields = indexmap::IndexMap::new();
    fields.insert("region".to_owned(), FieldLegendOptions::default());
    chart.legend(LegendSetting::Show(LegendOptions {
        fields,
        ..LegendOptions::default()
    }));
    chart.render().expect("render");

    let shown: Vec<_> = chart
        .legends()
        .legends()
        .iter()
        .map(|legend| legend.field())
        .collect();
    assert_eq!(shown, vec![Some("region")]);
}

#[test]
fn kept_legends_follow_the_plot_across_renders() {
    let mut chart = build_chart();
    chart.root_view_mut().attach_geometry(geometry("genre"));
    chart.render().expect("render");
    let rect = chart.content_rect();
    let padding = chart.padding();

    chart.set_keep_legend(true);
    chart.render().expect("render with kept legend");
    assert_eq!(chart.content_rect(), rect);
    assert_eq!(chart.padding(), padding);
    assert_eq!(chart.legends().plot_range(), rect);
    assert_eq!(chart.legends().legend_count(), 1);

    chart.render().expect("third render");
    assert_eq!(chart.content_rect(), rect);
}
