use layouter::{DebugDriver, DebugStep, process_instance};
use scene::{NodeId, Scene};
use style_engine::StyleRegistry;

fn setup() -> (Scene, StyleRegistry) {
    let _ = env_logger::builder().is_test(true).try_init();
    (Scene::new(), StyleRegistry::new())
}

fn styled_child(scene: &mut Scene, parent: NodeId, style: &str) -> NodeId {
    let child = scene.create_child(parent).unwrap();
    scene.get_mut(child).unwrap().set_style_text(style);
    child
}

fn build_tree(scene: &mut Scene) -> (NodeId, NodeId) {
    let root = scene.create_node();
    scene.get_mut(root).unwrap().set_style_text(
        "display: vertical\nfitContent: true\ngap: 10\npadding: 5",
    );
    styled_child(scene, root, "width: 100\nheight: 30");
    styled_child(scene, root, "width: 100\nheight: 30");
    let overlay = styled_child(
        scene,
        root,
        "position: absolute\nleft: 2\ntop: 2\nwidth: 10\nheight: 10",
    );
    (root, overlay)
}

fn drain_labels(
    driver: &mut DebugDriver,
    scene: &mut Scene,
    registry: &StyleRegistry,
) -> Vec<String> {
    let mut labels = Vec::new();
    loop {
        match driver.next_step(scene, registry) {
            DebugStep::Step(record) => labels.push(record.label),
            DebugStep::Finished => break,
        }
    }
    labels
}

/// The stepped phases fire in driver order, splicing child sequences in.
#[test]
fn step_labels_follow_phase_order() {
    let (mut scene, registry) = setup();
    let (root, _) = build_tree(&mut scene);
    let mut driver = DebugDriver::new(root);
    let labels = drain_labels(&mut driver, &mut scene, &registry);
    assert_eq!(
        labels,
        vec![
            "compute style",      // root
            "partition children", // root
            "compute style",      // first child
            "partition children",
            "compute style", // second child
            "partition children",
            "flow layout (vertical)", // root flow
            "fit content",            // root fit
            "compute style",          // overlay
            "partition children",
            "position (absolute)",
        ]
    );
    assert!(driver.is_finished());
}

/// Stepping to exhaustion produces exactly the geometry of a tick pass.
#[test]
fn stepped_pass_matches_tick_pass() {
    let (mut stepped_scene, registry) = setup();
    let (stepped_root, _) = build_tree(&mut stepped_scene);
    let mut driver = DebugDriver::new(stepped_root);
    while let DebugStep::Step(_) = driver.next_step(&mut stepped_scene, &registry) {}

    let mut tick_scene = Scene::new();
    let (tick_root, _) = build_tree(&mut tick_scene);
    process_instance(&mut tick_scene, &registry, tick_root);

    let stepped = rects(&stepped_scene, stepped_root);
    let ticked = rects(&tick_scene, tick_root);
    assert_eq!(stepped, ticked);
}

fn rects(scene: &Scene, id: NodeId) -> Vec<(f32, f32, f32, f32)> {
    let mut out = Vec::new();
    let node = scene.get(id).unwrap();
    out.push((node.x, node.y, node.width, node.height));
    for &child in node.children() {
        out.extend(rects(scene, child));
    }
    out
}

/// The flow step happens before fit-content shrinks the container, so the
/// intermediate state is observable.
#[test]
fn intermediate_states_are_observable() {
    let (mut scene, registry) = setup();
    let (root, _) = build_tree(&mut scene);
    let mut driver = DebugDriver::new(root);
    loop {
        match driver.next_step(&mut scene, &registry) {
            DebugStep::Step(record) if record.label == "flow layout (vertical)" => break,
            DebugStep::Step(_) => {}
            DebugStep::Finished => panic!("flow step never fired"),
        }
    }
    // Children are placed but the container has not hugged them yet.
    let root_node = scene.get(root).unwrap();
    assert_eq!(root_node.height, 0.0);
    match driver.next_step(&mut scene, &registry) {
        DebugStep::Step(record) => {
            assert_eq!(record.label, "fit content");
            assert_eq!(record.node.height, 80.0);
        }
        DebugStep::Finished => panic!("fit step never fired"),
    }
}

/// Step records expose tags, classes, and the effective style.
#[test]
fn snapshots_carry_style_and_tags() {
    let (mut scene, registry) = setup();
    let root = scene.create_node();
    scene.get_mut(root).unwrap().add_tag("panel");
    scene.get_mut(root).unwrap().set_classes("card");
    scene
        .get_mut(root)
        .unwrap()
        .set_style_text("width: 120\nheight: 40");
    let mut reg = registry;
    reg.register("card", "gap: 4");

    let mut driver = DebugDriver::new(root);
    match driver.next_step(&mut scene, &reg) {
        DebugStep::Step(record) => {
            assert_eq!(record.label, "compute style");
            assert_eq!(record.node.tags, vec!["panel".to_owned()]);
            assert_eq!(record.node.classes, "card");
            assert_eq!(record.node.width, 120.0);
            assert_eq!(record.node.style.get("gap"), Some(&"4".to_owned()));
            assert_eq!(record.node.style.get("width"), Some(&"120".to_owned()));
        }
        DebugStep::Finished => panic!("expected a step"),
    }
}

/// A finished driver keeps returning the terminal indicator.
#[test]
fn finished_driver_stays_finished() {
    let (mut scene, registry) = setup();
    let root = scene.create_node();
    let mut driver = DebugDriver::new(root);
    while let DebugStep::Step(_) = driver.next_step(&mut scene, &registry) {}
    assert!(driver.is_finished());
    assert!(matches!(
        driver.next_step(&mut scene, &registry),
        DebugStep::Finished
    ));
}
