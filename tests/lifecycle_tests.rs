use chart_stage::ChartError;
use chart_stage::api::{Chart, ChartConfig, ChartState};
use chart_stage::core::{Padding, Scale};
use chart_stage::render::NullHost;
use chart_stage::view::{PointGeometry, ViewConfig, ViewId};
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

fn populate(chart: &mut Chart<NullHost>) -> (ViewId, ViewId) {
    let left = chart
        .view(ViewConfig::default().region((0.0, 0.0), (0.5, 1.0)))
        .attach_geometry(geometry("genre"))
        .id();
    let right = chart
        .view(ViewConfig::default().region((0.5, 0.0), (1.0, 1.0)))
        .attach_geometry(geometry("region"))
        .id();
    (left, right)
}

fn legend_fields(chart: &Chart<NullHost>) -> Vec<Option<String>> {
    chart
        .legends()
        .legends()
        .iter()
        .map(|legend| legend.field().map(str::to_owned))
        .collect()
}

#[test]
fn clear_then_rebuild_reproduces_the_layout() {
    let mut chart = build_chart();
    let first_ids = populate(&mut chart);
    chart.render().expect("render");
    let rect = chart.content_rect();
    let padding = chart.padding();
    let fields = legend_fields(&chart);
    assert_eq!(fields.len(), 2);

    chart.clear().expect("clear");
    assert!(chart.views().is_empty());
    assert_eq!(chart.padding(), Padding::auto());
    assert_eq!(chart.legends().legend_count(), 0);

    let second_ids = populate(&mut chart);
    assert_eq!(first_ids, second_ids);
    chart.render().expect("render");
    assert_eq!(chart.content_rect(), rect);
    assert_eq!(chart.padding(), padding);
    assert_eq!(legend_fields(&chart), fields);
}

#[test]
fn clearing_an_empty_chart_is_harmless() {
    let mut chart = build_chart();
    chart.clear().expect("first clear");
    chart.clear().expect("second clear");
    chart.render().expect("render after clear");
    assert_eq!(chart.state(), ChartState::Idle);
}

#[test]
fn state_follows_the_render_cycle() {
    let mut chart = build_chart();
    assert_eq!(chart.state(), ChartState::Initialized);
    assert!(!chart.is_rendered());
    chart.render().expect("render");
    assert_eq!(chart.state(), ChartState::Idle);
    assert!(chart.is_rendered());
}

#[test]
fn init_requires_a_container() {
    let host = NullHost::with_container("root", 640.0);
    let result = Chart::new(host, ChartConfig::default());
    assert!(matches!(result, Err(ChartError::MissingContainer)));

    let host = NullHost::with_container("root", 640.0);
    let empty = ChartConfig::new("");
    assert!(matches!(Chart::new(host, empty), Err(ChartError::MissingContainer)));
}

#[test]
fn init_falls_back_to_the_legacy_id() {
    let host = NullHost::with_container("legacy", 640.0);
    let config = ChartConfig {
        id: Some("legacy".to_owned()),
        ..ChartConfig::default()
    };
    let chart = Chart::new(host, config).expect("id is accepted");
    assert_eq!(chart.host().mounted_count(), 1);
}

#[test]
fn unknown_container_is_reported_by_name() {
    let host = NullHost::with_container("root", 640.0);
    let result = Chart::new(host, ChartConfig::new("missing"));
    assert!(matches!(result, Err(ChartError::ContainerNotFound(name)) if name == "missing"));
}

#[test]
fn invalid_viewport_is_rejected_before_mounting() {
    for (width, height) in [(0.0, 300.0), (400.0, -1.0), (f64::NAN, 300.0)] {
        let host = NullHost::with_container("root", 640.0);
        let config = ChartConfig::new("root").with_size(width, height);
        let result = Chart::new(host, config);
        assert!(matches!(result, Err(ChartError::InvalidViewport { .. })));
    }
}

#[test]
fn export_requires_a_render() {
    let mut chart = build_chart();
    assert!(matches!(chart.to_image_data(), Err(ChartError::NotRendered)));
    assert!(matches!(chart.download_image(None), Err(ChartError::NotRendered)));
    assert!(chart.host().downloads().is_empty());

    chart.root_view_mut().attach_geometry(geometry("genre"));
    chart.render().expect("render");
    let image = chart.to_image_data().expect("image");
    assert_eq!((image.width, image.height), (500, 400));
    assert!(!image.bytes.is_empty());

    assert_eq!(chart.download_image(None).expect("default name"), "chart.png");
    assert_eq!(chart.download_image(Some("sales")).expect("named"), "sales.png");
    assert_eq!(chart.download_image(Some("")).expect("empty name"), "chart.png");
    let names: Vec<String> = chart
        .host()
        .downloads()
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(names, vec!["chart.png", "sales.png", "chart.png"]);
}

#[test]
fn change_visible_toggles_the_wrapper() {
    let mut chart = build_chart();
    let mount = chart.mount();
    chart.change_visible(false);
    assert!(!chart.is_visible());
    assert_eq!(chart.host().is_visible(mount), Some(false));
    chart.change_visible(true);
    assert_eq!(chart.host().is_visible(mount), Some(true));
}

#[test]
fn destroy_returns_a_clean_host() {
    let mut chart = build_chart();
    populate(&mut chart);
    chart.render().expect("render");
    assert_eq!(chart.host().mounted_count(), 1);

    let host = chart.destroy();
    assert_eq!(host.mounted_count(), 0);
    assert_eq!(host.active_resize_listeners(), 0);
    assert!(host.downloads().is_empty());
}

#[test]
fn dropping_a_chart_releases_its_host_registrations() {
    let host = NullHost::with_container("root", 640.0);
    let config = ChartConfig::new("root").with_force_fit(true);
    let mut chart = Chart::new(host.clone(), config).expect("chart");
    populate(&mut chart);
    chart.render().expect("render");
    assert_eq!((host.mounted_count(), host.active_resize_listeners()), (1, 1));

    drop(chart);
    assert_eq!(host.mounted_count(), 0);
    assert_eq!(host.active_resize_listeners(), 0);
}

#[test]
fn host_can_mount_a_new_chart_after_destroy() {
    let chart = build_chart();
    let host = chart.destroy();
    let again = Chart::new(host, ChartConfig::new("root")).expect("remount");
    assert_eq!(again.host().mounted_count(), 1);
}
