use std::cell::RefCell;
use std::rc::Rc;

use reactive_plot::core::{AUTOSIZE_KEY, RESPONSIVE_KEY};
use reactive_plot::headless::{
    EngineCall, HeadlessEngine, HeadlessHandle, HeadlessHost, Settlement,
};
use reactive_plot::{
    EngineOperation, EventHandler, Figure, LifecycleState, PlotError, PlotEvent, PlotHandle,
    PlotProps, PlotRequest, create_plot_component,
};
use serde_json::{Map, Value, json};

fn layout(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

#[test]
fn mount_creates_resizes_attaches_and_reports_initialized() {
    let engine = HeadlessEngine::new();
    let component = create_plot_component(engine.clone());
    let host = Rc::new(HeadlessHost::new());
    let initialized = Rc::new(RefCell::new(Vec::<Figure>::new()));
    let sink = initialized.clone();

    let controller = component.mount(
        host.clone(),
        PlotProps::new(vec![json!({"x": [1, 2], "y": [3, 4]})])
            .with_layout(layout(json!({"title": "t"})))
            .with_handler(PlotEvent::Click, EventHandler::new(|_| {}))
            .with_on_initialized(move |figure: &Figure, _: &HeadlessHandle| {
                sink.borrow_mut().push(figure.clone());
            }),
    );
    assert_eq!(controller.state(), LifecycleState::Mounting);
    assert!(initialized.borrow().is_empty());

    host.run_until_stalled();

    let request = &engine.create_requests()[0];
    assert_eq!(request.data, vec![json!({"x": [1, 2], "y": [3, 4]})]);
    assert_eq!(request.layout.get("title"), Some(&json!("t")));
    assert_eq!(request.layout.get(AUTOSIZE_KEY), Some(&json!(true)));
    assert_eq!(request.config.get(RESPONSIVE_KEY), Some(&json!(true)));

    assert_eq!(controller.state(), LifecycleState::Initialized);
    assert_eq!(engine.resize_count(), 1);
    let handle = controller.handle().expect("live handle");
    assert_eq!(handle.subscribed_events(), vec!["plotly_click".to_owned()]);

    let initialized = initialized.borrow();
    assert_eq!(initialized.len(), 1);
    assert_eq!(initialized[0].data, vec![json!({"x": [1, 2], "y": [3, 4]})]);
    assert_eq!(initialized[0].layout.get("title"), Some(&json!("t")));
    assert!(initialized[0].frames.is_empty());
}

#[test]
fn create_failure_reports_the_exact_error_and_never_initializes() {
    let engine = HeadlessEngine::new();
    let rejection = PlotError::rejected(EngineOperation::Create, "bad trace type");
    engine.fail_next_create(rejection.clone());
    let component = create_plot_component(engine.clone());
    let host = Rc::new(HeadlessHost::new());
    let errors = Rc::new(RefCell::new(Vec::<PlotError>::new()));
    let initialized = Rc::new(RefCell::new(0usize));
    let error_sink = errors.clone();
    let init_sink = initialized.clone();

    let controller = component.mount(
        host.clone(),
        PlotProps::new(vec![json!({"type": "nope"})])
            .with_handler(PlotEvent::Hover, EventHandler::new(|_| {}))
            .with_on_error(move |err: &PlotError| error_sink.borrow_mut().push(err.clone()))
            .with_on_initialized(move |_: &Figure, _: &HeadlessHandle| {
                *init_sink.borrow_mut() += 1;
            }),
    );
    host.run_until_stalled();

    assert_eq!(controller.state(), LifecycleState::Failed);
    assert_eq!(*errors.borrow(), vec![rejection]);
    assert_eq!(*initialized.borrow(), 0);
    assert_eq!(engine.resize_count(), 0);
    assert!(controller.handle().is_none());
    assert!(!controller.is_observing_resize());
    assert_eq!(host.observations_started(), 0);
}

#[test]
fn failed_mount_ignores_input_changes_and_unmounts_without_engine_calls() {
    let engine = HeadlessEngine::new();
    engine.fail_next_create(PlotError::rejected(EngineOperation::Create, "boom"));
    let component = create_plot_component(engine.clone());
    let host = Rc::new(HeadlessHost::new());

    let controller = component.mount(host.clone(), PlotProps::default());
    host.run_until_stalled();
    controller
        .set_data(vec![json!({"y": [1]})])
        .expect("setter accepted while failed");
    host.run_until_stalled();
    controller.unmount();

    assert_eq!(controller.state(), LifecycleState::Unmounted);
    assert_eq!(engine.calls().len(), 1);
    assert_eq!(engine.update_requests().len(), 0);
    assert_eq!(engine.destroy_count(), 0);
}

#[test]
fn unmount_stops_observing_detaches_purges_and_reports_final_figure() {
    let engine = HeadlessEngine::new();
    let component = create_plot_component(engine.clone());
    let host = Rc::new(HeadlessHost::new());
    let order = Rc::new(RefCell::new(Vec::<String>::new()));
    let purge_order = order.clone();

    let controller = component.mount(
        host.clone(),
        PlotProps::new(vec![json!({"y": [9]})])
            .with_handler(PlotEvent::Click, EventHandler::new(|_| {}))
            .with_handler(PlotEvent::Hover, EventHandler::new(|_| {}))
            .with_on_purge(move |figure: &Figure, handle: &HeadlessHandle| {
                purge_order.borrow_mut().push(format!(
                    "purge traces={} listeners={}",
                    figure.data.len(),
                    handle.subscribed_events().len()
                ));
            }),
    );
    host.run_until_stalled();
    let handle = controller.handle().expect("live handle");
    assert_eq!(host.active_observer_count(), 1);

    controller.unmount();

    assert_eq!(controller.state(), LifecycleState::Unmounted);
    assert_eq!(host.active_observer_count(), 0);
    assert_eq!(handle.listener_count("plotly_click"), 0);
    assert_eq!(handle.listener_count("plotly_hover"), 0);
    assert!(handle.is_destroyed());
    assert_eq!(engine.destroy_count(), 1);
    assert_eq!(
        *order.borrow(),
        vec!["purge traces=1 listeners=0".to_owned()]
    );
    assert_eq!(engine.calls().last(), Some(&EngineCall::Destroy));
}

#[test]
fn unmount_is_idempotent() {
    let engine = HeadlessEngine::new();
    let component = create_plot_component(engine.clone());
    let host = Rc::new(HeadlessHost::new());
    let purges = Rc::new(RefCell::new(0usize));
    let sink = purges.clone();

    let controller = component.mount(
        host.clone(),
        PlotProps::default().with_on_purge(move |_: &Figure, _: &HeadlessHandle| {
            *sink.borrow_mut() += 1;
        }),
    );
    host.run_until_stalled();
    controller.unmount();
    controller.unmount();
    drop(controller);

    assert_eq!(engine.destroy_count(), 1);
    assert_eq!(*purges.borrow(), 1);
}

#[test]
fn unmount_before_create_settles_destroys_the_late_plot() {
    let engine = HeadlessEngine::new().with_settlement(Settlement::Manual);
    let component = create_plot_component(engine.clone());
    let host = Rc::new(HeadlessHost::new());
    let callbacks = Rc::new(RefCell::new(Vec::<&'static str>::new()));
    let on_init = callbacks.clone();
    let on_purge = callbacks.clone();

    let controller = component.mount(
        host.clone(),
        PlotProps::default()
            .with_handler(PlotEvent::Click, EventHandler::new(|_| {}))
            .with_on_initialized(move |_: &Figure, _: &HeadlessHandle| {
                on_init.borrow_mut().push("initialized");
            })
            .with_on_purge(move |_: &Figure, _: &HeadlessHandle| {
                on_purge.borrow_mut().push("purge");
            }),
    );
    host.run_until_stalled();
    controller.unmount();
    assert_eq!(controller.state(), LifecycleState::Unmounted);

    assert!(engine.settle_next());
    host.run_until_stalled();

    assert_eq!(controller.state(), LifecycleState::Unmounted);
    assert!(callbacks.borrow().is_empty());
    assert_eq!(engine.destroy_count(), 1);
    assert_eq!(engine.resize_count(), 0);
    assert_eq!(host.observations_started(), 0);
    let plot = controller.container().plot().expect("engine rendered late");
    assert!(plot.is_destroyed());
    assert!(plot.data().is_empty());
    assert_eq!(plot.listener_count("plotly_click"), 0);
}

#[test]
fn dropping_the_controller_unmounts() {
    let engine = HeadlessEngine::new();
    let component = create_plot_component(engine.clone());
    let host = Rc::new(HeadlessHost::new());

    let controller = component.mount(host.clone(), PlotProps::new(vec![json!({"y": [1]})]));
    host.run_until_stalled();
    let handle = controller.handle().expect("live handle");
    drop(controller);

    assert!(handle.is_destroyed());
    assert_eq!(engine.destroy_count(), 1);
    assert_eq!(host.active_observer_count(), 0);
}

#[test]
fn dropping_before_create_settles_destroys_the_late_plot() {
    let engine = HeadlessEngine::new().with_settlement(Settlement::Manual);
    let component = create_plot_component(engine.clone());
    let host = Rc::new(HeadlessHost::new());

    let controller = component.mount(host.clone(), PlotProps::new(vec![json!({"y": [1]})]));
    let container = controller.container();
    drop(controller);
    assert!(engine.settle_next());
    host.run_until_stalled();

    let plot = container.plot().expect("engine rendered late");
    assert!(plot.is_destroyed());
    assert_eq!(engine.destroy_count(), 1);
    assert_eq!(engine.resize_count(), 0);
}

#[test]
fn late_create_failure_after_unmount_is_dropped_silently() {
    let engine = HeadlessEngine::new().with_settlement(Settlement::Manual);
    engine.fail_next_create(PlotError::rejected(EngineOperation::Create, "late"));
    let component = create_plot_component(engine.clone());
    let host = Rc::new(HeadlessHost::new());
    let errors = Rc::new(RefCell::new(0usize));
    let sink = errors.clone();

    let controller = component.mount(
        host.clone(),
        PlotProps::default().with_on_error(move |_: &PlotError| *sink.borrow_mut() += 1),
    );
    controller.unmount();
    assert!(engine.settle_next());
    host.run_until_stalled();

    assert_eq!(*errors.borrow(), 0);
    assert_eq!(engine.destroy_count(), 0);
    assert_eq!(controller.state(), LifecycleState::Unmounted);
}

#[test]
fn setters_after_unmount_are_rejected() {
    let component = create_plot_component(HeadlessEngine::new());
    let host = Rc::new(HeadlessHost::new());
    let controller = component.mount(host.clone(), PlotProps::default());
    host.run_until_stalled();
    controller.unmount();

    let err = controller
        .set_data(vec![json!({"y": [1]})])
        .expect_err("unmounted controller rejects input");
    assert_eq!(
        err,
        PlotError::InvalidState {
            operation: "set_data",
            state: LifecycleState::Unmounted,
        }
    );
}

#[test]
fn figure_accessor_reads_live_state() {
    let component = create_plot_component(HeadlessEngine::new());
    let host = Rc::new(HeadlessHost::new());
    let controller = component.mount(host.clone(), PlotProps::new(vec![json!({"y": [1]})]));
    assert!(controller.figure().is_none());

    host.run_until_stalled();
    let figure = controller.figure().expect("figure after init");
    let handle = controller.handle().expect("live handle");
    assert_eq!(figure, Figure::extract(&handle));
    assert_eq!(figure.data, handle.data());
}

#[test]
fn default_inputs_produce_exact_autosize_and_responsive_objects() {
    let engine = HeadlessEngine::new();
    let component = create_plot_component(engine.clone());
    let host = Rc::new(HeadlessHost::new());

    let _controller = component.mount(host.clone(), PlotProps::default());

    let request = &engine.create_requests()[0];
    assert!(request.data.is_empty());
    assert_eq!(request.layout, layout(json!({"autosize": true})));
    assert_eq!(request.config, layout(json!({"responsive": true})));
    assert!(request.frames.is_empty());
}

#[test]
fn data_change_after_init_issues_exact_update_request() {
    let engine = HeadlessEngine::new();
    let component = create_plot_component(engine.clone());
    let host = Rc::new(HeadlessHost::new());
    let controller = component.mount(host.clone(), PlotProps::default());
    host.run_until_stalled();

    let data = vec![json!({"x": [1, 2, 3, 4], "y": [3, 4, 5, 6], "type": "scatter"})];
    controller.set_data(data.clone()).expect("set data");
    host.run_until_stalled();

    let updates = engine.update_requests();
    assert_eq!(updates.len(), 1);
    assert_eq!(
        updates[0],
        PlotRequest {
            data: data.clone(),
            layout: layout(json!({"autosize": true})),
            config: layout(json!({"responsive": true})),
            frames: Vec::new(),
        }
    );
    let figure = controller.figure().expect("figure after update");
    assert_eq!(figure.data, data);
    assert_eq!(figure.layout, layout(json!({"autosize": true})));
}
