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

/// flex-grow splits free space proportionally to the grow factors.
#[test]
fn grow_splits_free_space() {
    let (mut scene, registry) = setup();
    let root = scene.create_node();
    scene
        .get_mut(root)
        .unwrap()
        .set_style_text("display: horizontal\nwidth: 500\nheight: 100");
    let one = styled_child(&mut scene, root, "flexGrow: 1\nheight: 100");
    let two = styled_child(&mut scene, root, "flexGrow: 2\nheight: 100");

    process_instance(&mut scene, &registry, root);

    let first = scene.get(one).unwrap();
    let second = scene.get(two).unwrap();
    assert!((first.width - 166.67).abs() < 0.1, "width {}", first.width);
    assert!((second.width - 333.33).abs() < 0.1, "width {}", second.width);
    assert!((first.x - 0.0).abs() < 0.1);
    assert!((second.x - 166.67).abs() < 0.1);
}

/// flex-shrink distributes the deficit by shrink-weighted base size.
#[test]
fn shrink_distributes_deficit() {
    let (mut scene, registry) = setup();
    let root = scene.create_node();
    scene
        .get_mut(root)
        .unwrap()
        .set_style_text("display: horizontal\nwidth: 200\nheight: 50");
    let children: Vec<NodeId> = (0..3)
        .map(|_| {
            styled_child(
                &mut scene,
                root,
                "width: 100\nheight: 50\nflexShrink: 1\nminWidth: 40",
            )
        })
        .collect();

    process_instance(&mut scene, &registry, root);

    let widths: Vec<f32> = children
        .iter()
        .map(|&c| scene.get(c).unwrap().width)
        .collect();
    for width in &widths {
        assert!((width - 66.67).abs() < 0.1, "width {width}");
    }
    let total: f32 = widths.iter().sum();
    assert!((total - 200.0).abs() < 0.1);
}

/// When min-width binds, children clamp and the container overflows.
#[test]
fn shrink_clamps_at_min_and_overflows() {
    let (mut scene, registry) = setup();
    let root = scene.create_node();
    scene
        .get_mut(root)
        .unwrap()
        .set_style_text("display: horizontal\nwidth: 200\nheight: 50");
    let children: Vec<NodeId> = (0..3)
        .map(|_| {
            styled_child(
                &mut scene,
                root,
                "width: 100\nheight: 50\nflexShrink: 1\nminWidth: 80",
            )
        })
        .collect();

    process_instance(&mut scene, &registry, root);

    let widths: Vec<f32> = children
        .iter()
        .map(|&c| scene.get(c).unwrap().width)
        .collect();
    for width in &widths {
        assert!((width - 80.0).abs() < 0.01, "width {width}");
    }
    let total: f32 = widths.iter().sum();
    assert!(total > 200.0);
}

/// The `flex` shorthand makes a child flexible; `flex: none` keeps it fixed.
#[test]
fn flex_shorthand_controls_participation() {
    let (mut scene, registry) = setup();
    let root = scene.create_node();
    scene
        .get_mut(root)
        .unwrap()
        .set_style_text("display: horizontal\nwidth: 300\nheight: 40");
    let rigid = styled_child(&mut scene, root, "flex: none\nwidth: 100\nheight: 40");
    let stretchy = styled_child(&mut scene, root, "flex: 1\nheight: 40");

    process_instance(&mut scene, &registry, root);

    assert_eq!(scene.get(rigid).unwrap().width, 100.0);
    assert!((scene.get(stretchy).unwrap().width - 200.0).abs() < 0.1);
}

/// A percentage flex-basis resolves against the container's content box on
/// the main axis before growth distributes the rest.
#[test]
fn percent_flex_basis_resolves_against_content() {
    let (mut scene, registry) = setup();
    let root = scene.create_node();
    scene
        .get_mut(root)
        .unwrap()
        .set_style_text("display: horizontal\nwidth: 400\nheight: 40");
    let left = styled_child(&mut scene, root, "flexGrow: 1\nflexBasis: 25%\nheight: 40");
    let right = styled_child(&mut scene, root, "flexGrow: 1\nflexBasis: 25%\nheight: 40");

    process_instance(&mut scene, &registry, root);

    // Bases 100 + 100, free 200 split evenly.
    assert!((scene.get(left).unwrap().width - 200.0).abs() < 0.1);
    assert!((scene.get(right).unwrap().width - 200.0).abs() < 0.1);
    assert!((scene.get(right).unwrap().x - 200.0).abs() < 0.1);
}

/// A growing child saturating at max-width hands the rest to its siblings.
#[test]
fn grow_saturation_redistributes() {
    let (mut scene, registry) = setup();
    let root = scene.create_node();
    scene
        .get_mut(root)
        .unwrap()
        .set_style_text("display: horizontal\nwidth: 300\nheight: 40");
    let capped = styled_child(&mut scene, root, "flexGrow: 1\nmaxWidth: 60\nheight: 40");
    let open = styled_child(&mut scene, root, "flexGrow: 1\nheight: 40");

    process_instance(&mut scene, &registry, root);

    assert!((scene.get(capped).unwrap().width - 60.0).abs() < 0.1);
    assert!((scene.get(open).unwrap().width - 240.0).abs() < 0.1);
}

/// Cross-axis alignment in a horizontal container positions children
/// vertically by align-items with per-child align-self overrides.
#[test]
fn cross_axis_alignment() {
    let (mut scene, registry) = setup();
    let root = scene.create_node();
    scene.get_mut(root).unwrap().set_style_text(
        "display: horizontal\nwidth: 300\nheight: 100\nalignItems: center",
    );
    let centered = styled_child(&mut scene, root, "width: 50\nheight: 40");
    let pinned = styled_child(&mut scene, root, "width: 50\nheight: 40\nalignSelf: end");

    process_instance(&mut scene, &registry, root);

    assert!((scene.get(centered).unwrap().y - 30.0).abs() < 0.001);
    assert!((scene.get(pinned).unwrap().y - 60.0).abs() < 0.001);
}

/// Fit-content on a horizontal container sums child outer widths.
#[test]
fn fit_content_horizontal_hugs_row() {
    let (mut scene, registry) = setup();
    let root = scene.create_node();
    scene.get_mut(root).unwrap().set_style_text(
        "display: horizontal\nfitContent: true\ngap: 8\npadding: 4",
    );
    styled_child(&mut scene, root, "width: 120\nheight: 30");
    styled_child(&mut scene, root, "width: 330\nheight: 60");

    process_instance(&mut scene, &registry, root);

    let node = scene.get(root).unwrap();
    assert_eq!(node.width, 8.0 + 120.0 + 330.0 + 8.0);
    assert_eq!(node.height, 8.0 + 60.0);
}
