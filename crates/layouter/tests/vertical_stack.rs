use layouter::process_instance;
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

/// Fit-content vertical stack: three margined children, padded and bordered
/// container hugging them.
#[test]
fn fit_content_stack_positions_and_hugs() {
    let (mut scene, registry) = setup();
    let root = scene.create_node();
    scene.set_rect(root, 100.0, 100.0, 0.0, 0.0);
    scene.get_mut(root).unwrap().set_style_text(
        "display: vertical\npadding: 20\ngap: 10\nfitContent: true\nborder: 2",
    );
    let children: Vec<NodeId> = (0..3)
        .map(|_| styled_child(&mut scene, root, "width: 200\nheight: 80\nmargin: 5"))
        .collect();

    process_instance(&mut scene, &registry, root);

    for &child in &children {
        let node = scene.get(child).unwrap();
        assert_eq!(node.width, 200.0);
        assert_eq!(node.height, 80.0);
        assert_eq!(node.x, 127.0);
    }
    let ys: Vec<f32> = children.iter().map(|&c| scene.get(c).unwrap().y).collect();
    assert_eq!(ys, vec![127.0, 227.0, 327.0]);

    let root_node = scene.get(root).unwrap();
    assert_eq!(root_node.height, 334.0);
    assert_eq!(root_node.width, 254.0);
    // The root keeps its position.
    assert_eq!(root_node.x, 100.0);
    assert_eq!(root_node.y, 100.0);
}

/// Running the same pass twice on an unchanged tree is a fixpoint.
#[test]
fn pass_is_idempotent() {
    let (mut scene, registry) = setup();
    let root = scene.create_node();
    scene.set_rect(root, 100.0, 100.0, 0.0, 0.0);
    scene.get_mut(root).unwrap().set_style_text(
        "display: vertical\npadding: 20\ngap: 10\nfitContent: true\nborder: 2",
    );
    for _ in 0..3 {
        styled_child(&mut scene, root, "width: 200\nheight: 80\nmargin: 5");
    }

    process_instance(&mut scene, &registry, root);
    let first: Vec<(f32, f32, f32, f32)> = scene
        .roots()
        .iter()
        .flat_map(|&r| collect_rects(&scene, r))
        .collect();
    process_instance(&mut scene, &registry, root);
    let second: Vec<(f32, f32, f32, f32)> = scene
        .roots()
        .iter()
        .flat_map(|&r| collect_rects(&scene, r))
        .collect();
    assert_eq!(first, second);
}

fn collect_rects(scene: &Scene, id: NodeId) -> Vec<(f32, f32, f32, f32)> {
    let mut out = Vec::new();
    let node = scene.get(id).unwrap();
    out.push((node.x, node.y, node.width, node.height));
    for &child in node.children() {
        out.extend(collect_rects(scene, child));
    }
    out
}

/// Gap only separates surviving children; hidden and doLayout=false nodes
/// are skipped entirely.
#[test]
fn skips_hidden_and_opted_out_children() {
    let (mut scene, registry) = setup();
    let root = scene.create_node();
    scene
        .get_mut(root)
        .unwrap()
        .set_style_text("display: vertical\ngap: 10\nfitContent: true");
    let first = styled_child(&mut scene, root, "width: 50\nheight: 20");
    let hidden = styled_child(&mut scene, root, "width: 50\nheight: 20");
    scene.get_mut(hidden).unwrap().set_visible(false);
    scene.set_rect(hidden, 400.0, 400.0, 1.0, 1.0);
    let opted_out = styled_child(&mut scene, root, "width: 50\nheight: 20");
    scene.get_mut(opted_out).unwrap().set_attribute("doLayout", "false");
    scene.set_rect(opted_out, 500.0, 500.0, 1.0, 1.0);
    let last = styled_child(&mut scene, root, "width: 50\nheight: 20");

    process_instance(&mut scene, &registry, root);

    assert_eq!(scene.get(first).unwrap().y, 0.0);
    assert_eq!(scene.get(last).unwrap().y, 30.0);
    // Skipped children keep their geometry and do not grow the container.
    assert_eq!(scene.get(hidden).unwrap().x, 400.0);
    assert_eq!(scene.get(opted_out).unwrap().x, 500.0);
    assert_eq!(scene.get(root).unwrap().height, 50.0);
}

/// justify-content: space-between pins the first child to the near content
/// edge and the last child's trailing edge to the far content edge.
#[test]
fn space_between_pins_edges() {
    let (mut scene, registry) = setup();
    let root = scene.create_node();
    scene.get_mut(root).unwrap().set_style_text(
        "display: vertical\nwidth: 100\nheight: 400\npadding: 10\nborder: 2\n\
         justifyContent: space-between",
    );
    let children: Vec<NodeId> = (0..3)
        .map(|_| styled_child(&mut scene, root, "width: 50\nheight: 50"))
        .collect();

    process_instance(&mut scene, &registry, root);

    let first = scene.get(children[0]).unwrap();
    assert!((first.y - 12.0).abs() < 0.001);
    let last = scene.get(children[2]).unwrap();
    assert!((last.y + last.height - 388.0).abs() < 0.001);
    let middle = scene.get(children[1]).unwrap();
    assert!((middle.y - 175.0).abs() < 0.001);
}

/// Without a declared display the container leaves child positions alone.
#[test]
fn undeclared_display_runs_no_flow() {
    let (mut scene, registry) = setup();
    let root = scene.create_node();
    let child = styled_child(&mut scene, root, "width: 40\nheight: 40");
    scene.set_rect(child, 77.0, 88.0, 0.0, 0.0);

    process_instance(&mut scene, &registry, root);

    let node = scene.get(child).unwrap();
    assert_eq!((node.x, node.y), (77.0, 88.0));
    assert_eq!((node.width, node.height), (40.0, 40.0));
}

/// min/max clamp explicit sizes; min wins over a smaller max.
#[test]
fn min_max_clamp_explicit_sizes() {
    let (mut scene, registry) = setup();
    let root = scene.create_node();
    let clamped = styled_child(&mut scene, root, "width: 500\nmaxWidth: 300\nheight: 10");
    let conflicted = styled_child(
        &mut scene,
        root,
        "width: 50\nminWidth: 120\nmaxWidth: 80\nheight: 10",
    );

    process_instance(&mut scene, &registry, root);

    assert_eq!(scene.get(clamped).unwrap().width, 300.0);
    assert_eq!(scene.get(conflicted).unwrap().width, 120.0);
}
