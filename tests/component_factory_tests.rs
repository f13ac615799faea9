use std::cell::RefCell;
use std::rc::Rc;

use reactive_plot::core::{ContainerStyle, DEFAULT_CONTAINER_ID};
use reactive_plot::headless::{EngineCall, HeadlessContainer, HeadlessEngine, HeadlessHost};
use reactive_plot::{LifecycleState, PlotProps, create_plot_component};
use serde_json::json;

#[test]
fn factory_performs_no_engine_calls() {
    let engine = HeadlessEngine::new();
    let component = create_plot_component(engine.clone());

    assert!(engine.calls().is_empty());
    assert!(component.engine().calls().is_empty());
}

#[test]
fn components_from_distinct_engines_are_independent() {
    let first = HeadlessEngine::new();
    let second = HeadlessEngine::new();
    let first_component = create_plot_component(first.clone());
    let second_component = create_plot_component(second.clone());
    let host = Rc::new(HeadlessHost::new());

    let controller = first_component.mount(host.clone(), PlotProps::new(vec![json!({"y": [1]})]));
    host.run_until_stalled();

    assert_eq!(controller.state(), LifecycleState::Initialized);
    assert_eq!(first.create_requests().len(), 1);
    assert!(second.calls().is_empty());

    let other = second_component.mount(host.clone(), PlotProps::default());
    host.run_until_stalled();
    assert_eq!(other.state(), LifecycleState::Initialized);
    assert_eq!(first.create_requests().len(), 1);
    assert_eq!(second.create_requests().len(), 1);
}

#[test]
fn default_container_is_relative_inline_block() {
    let engine = HeadlessEngine::new();
    let component = create_plot_component(engine.clone());
    let host = Rc::new(HeadlessHost::new());

    let controller = component.mount(host.clone(), PlotProps::default());
    let container = controller.container();

    assert_eq!(container.id(), DEFAULT_CONTAINER_ID);
    assert_eq!(container.class(), None);
    assert_eq!(
        container.style_attribute(),
        "position: relative; display: inline-block"
    );
    assert_eq!(
        engine.calls().first(),
        Some(&EngineCall::Create {
            container_id: DEFAULT_CONTAINER_ID.to_owned(),
            request: engine.create_requests()[0].clone(),
        })
    );
}

#[test]
fn id_class_and_style_reach_the_container() {
    let component = create_plot_component(HeadlessEngine::new());
    let host = Rc::new(HeadlessHost::new());
    let style = ContainerStyle::empty()
        .with("width", "100%")
        .with("height", "400px");

    let _controller = component.mount(
        host.clone(),
        PlotProps::default()
            .with_id("revenue")
            .with_class("dashboard-plot")
            .with_style(style),
    );

    let container = host.container("revenue").expect("rendered container");
    assert_eq!(container.class(), Some("dashboard-plot"));
    assert_eq!(container.style_attribute(), "width: 100%; height: 400px");
}

#[test]
fn container_ref_receives_the_rendered_element_before_create_settles() {
    let component = create_plot_component(HeadlessEngine::new());
    let host = Rc::new(HeadlessHost::new());
    let seen = Rc::new(RefCell::new(Vec::<HeadlessContainer>::new()));
    let sink = seen.clone();

    let controller = component.mount(
        host.clone(),
        PlotProps::default().with_container_ref(move |container: &HeadlessContainer| {
            sink.borrow_mut().push(container.clone());
        }),
    );

    assert_eq!(controller.state(), LifecycleState::Mounting);
    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0], controller.container());
}

#[test]
fn cloned_component_mounts_share_the_engine() {
    let engine = HeadlessEngine::new();
    let component = create_plot_component(engine.clone());
    let clone = component.clone();
    let host = Rc::new(HeadlessHost::new());

    let _a = component.mount(host.clone(), PlotProps::default().with_id("a"));
    let _b = clone.mount(host.clone(), PlotProps::default().with_id("b"));
    host.run_until_stalled();

    assert_eq!(engine.create_requests().len(), 2);
    assert_eq!(host.containers().len(), 2);
}

#[test]
fn host_releases_containers_of_dropped_controllers() {
    let component = create_plot_component(HeadlessEngine::new());
    let host = Rc::new(HeadlessHost::new());

    for round in 0..20 {
        let controller =
            component.mount(host.clone(), PlotProps::default().with_id(format!("plot-{round}")));
        host.run_until_stalled();
        assert_eq!(host.containers().len(), 1);
        assert_eq!(host.active_observer_count(), 1);
        drop(controller);
    }

    assert!(host.containers().is_empty());
    assert_eq!(host.active_observer_count(), 0);
    assert_eq!(host.tracked_entry_count(), 0);
    assert_eq!(host.observations_started(), 20);
}
