use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use chart_stage::api::{Chart, ChartConfig};
use chart_stage::core::Size;
use chart_stage::extensions::{ChartEvent, ChartPlugin, PluginContext};
use chart_stage::render::NullHost;

struct ResizeCounter {
    resizes: Rc<RefCell<Vec<(f64, f64)>>>,
}

impl ChartPlugin for ResizeCounter {
    fn id(&self) -> &str {
        "resize-counter"
    }

    fn on_event(&mut self, event: ChartEvent, _context: PluginContext) {
        if let ChartEvent::AfterChangeSize { width, height } = event {
            self.resizes.borrow_mut().push((width, height));
        }
    }
}

fn build_chart(force_fit: bool) -> (Chart<NullHost>, Rc<RefCell<Vec<(f64, f64)>>>) {
    let host = NullHost::with_container("root", 640.0);
    let config = ChartConfig::new("root")
        .with_size(500.0, 300.0)
        .with_force_fit(force_fit);
    let resizes = Rc::new(RefCell::new(Vec::new()));
    let plugins: Vec<Box<dyn ChartPlugin>> = vec![Box::new(ResizeCounter {
        resizes: resizes.clone(),
    })];
    let chart = Chart::with_plugins(host, config, plugins).expect("chart init");
    (chart, resizes)
}

#[test]
fn force_fit_adopts_container_width_at_init() {
    let (chart, _) = build_chart(true);
    assert_eq!(chart.size(), Size::new(640.0, 300.0));
    assert_eq!(chart.host().active_resize_listeners(), 1);

    let (plain, _) = build_chart(false);
    assert_eq!(plain.size(), Size::new(500.0, 300.0));
    assert_eq!(plain.host().active_resize_listeners(), 0);
}

#[test]
fn burst_of_resize_events_triggers_one_force_fit_after_the_last() {
    let (mut chart, resizes) = build_chart(true);
    chart.render().expect("render");
    chart.host().set_container_width("root", 800.0);

    let start = Instant::now();
    let at = |ms: u64| start + Duration::from_millis(ms);
    for step in 0..5u64 {
        chart.handle_window_resize(at(step * 50));
    }
    // Last event at 200ms, so nothing may fire before 400ms.
    assert!(!chart.poll_resize(at(250)).expect("poll"));
    assert!(!chart.poll_resize(at(399)).expect("poll"));
    assert!(chart.has_pending_resize());

    assert!(chart.poll_resize(at(400)).expect("poll"));
    assert!(!chart.poll_resize(at(900)).expect("poll"));
    assert!(!chart.has_pending_resize());

    assert_eq!(*resizes.borrow(), vec![(800.0, 300.0)]);
    assert_eq!(chart.size(), Size::new(800.0, 300.0));
}

#[test]
fn resize_events_are_ignored_without_force_fit() {
    let (mut chart, resizes) = build_chart(false);
    let start = Instant::now();
    chart.handle_window_resize(start);
    assert!(!chart.has_pending_resize());
    assert!(!chart.poll_resize(start + Duration::from_secs(1)).expect("poll"));
    assert!(resizes.borrow().is_empty());
}

#[test]
fn force_fit_skips_unchanged_or_zero_width() {
    let (mut chart, resizes) = build_chart(true);
    assert!(!chart.force_fit().expect("same width"));

    chart.host().set_container_width("root", 0.0);
    assert!(!chart.force_fit().expect("zero width"));
    assert!(resizes.borrow().is_empty());

    chart.host().set_container_width("root", 720.0);
    assert!(chart.force_fit().expect("new width"));
    assert_eq!(chart.size().width, 720.0);
}

#[test]
fn change_width_and_height_delegate_to_change_size() {
    let (mut chart, resizes) = build_chart(false);
    chart.change_width(420.0).expect("width");
    chart.change_height(260.0).expect("height");
    assert_eq!(*resizes.borrow(), vec![(420.0, 300.0), (420.0, 260.0)]);
    assert!(chart.change_size(-1.0, 10.0).is_err());
    assert_eq!(chart.size(), Size::new(420.0, 260.0));
}

#[test]
fn destroy_releases_resize_subscription_and_pending_timer() {
    let (mut chart, _) = build_chart(true);
    chart.handle_window_resize(Instant::now());
    let host = chart.destroy();
    assert_eq!(host.active_resize_listeners(), 0);
    assert_eq!(host.mounted_count(), 0);
}
