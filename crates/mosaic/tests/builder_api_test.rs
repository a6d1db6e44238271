//! Integration tests for the SceneBuilder API
//!
//! These tests drive whole scenes through parsing, layer assignment,
//! compositing and SVG rendering.

use mosaic::{
    MosaicError, SceneBuilder,
    aes::{Aes, ByGroup, ByState, Prop, Slot, Style},
    color::Color,
    config::{AppConfig, IndexMode, StyleConfig},
    draw::RenderLayer,
    identifier::Id,
    interaction::InteractionState,
    layers::{Layer, LayerLists},
    region::{Element, GroupMetadata, Region, Regions},
    scene::Scene,
};

fn color(name: &str) -> Prop<Color> {
    Prop::Set(Color::new(name).unwrap())
}

const HOVER_SCENE: &str = r#"
    [regions.a]
    elements = [{ kind = "shape", d = "M0 0 H10 V10 H0 Z" }]

    [aes.a]
    base = { stroke_width = 1 }
    select = { stroke_width = 3 }
    hover = { stroke_width = "stroke_width + 1" }
"#;

#[test]
fn test_builder_api_exists() {
    let _builder = SceneBuilder::default();
}

#[test]
fn test_group_beats_global() {
    let source = r#"
        [regions.a]
        elements = [{ kind = "shape", d = "M0 0 H10 V10 H0 Z" }]

        [groups]
        coastal = ["a"]

        [aes.__all]
        fill = "gray"

        [aes.coastal]
        fill = "blue"
    "#;

    let builder = SceneBuilder::default();
    let scene = builder.parse(source).expect("Failed to parse scene");
    let composite = builder
        .composite(&scene, &InteractionState::new())
        .expect("Failed to composite");

    let base = composite.style_of(Id::new("a"), RenderLayer::Base).unwrap();
    assert_eq!(base.fill, color("blue"));
}

#[test]
fn test_group_states_fall_through_to_global() {
    let source = r#"
        [regions.a]
        elements = [{ kind = "shape", d = "M0 0 H10 V10 H0 Z" }]

        [groups]
        coastal = ["a"]

        [aes.__all]
        base = { fill = "gray" }
        select = { fill = "red" }

        [aes.coastal]
        select = { stroke = "black" }
    "#;

    let builder = SceneBuilder::default();
    let scene = builder.parse(source).unwrap();
    let state = InteractionState::new().with_selected(Id::new("a"));
    let composite = builder.composite(&scene, &state).unwrap();

    // coastal says nothing about base, so the global base still applies.
    let base = composite.style_of(Id::new("a"), RenderLayer::Base).unwrap();
    assert_eq!(base.fill, color("gray"));
    // coastal's select shadows the global one whole.
    let select = composite.style_of(Id::new("a"), RenderLayer::Selection).unwrap();
    assert_eq!(select.stroke, color("black"));
    assert_ne!(select.fill, color("red"));
}

#[test]
fn test_bare_group_leaf_keeps_global_select() {
    let source = r#"
        [regions.a]
        elements = [{ kind = "shape", d = "M0 0 H10 V10 H0 Z" }]

        [groups]
        coastal = ["a"]

        [aes.__all]
        base = { fill = "gray" }
        select = { stroke = "red", stroke_width = 3 }

        [aes.coastal]
        fill = "blue"
    "#;

    let builder = SceneBuilder::default();
    let scene = builder.parse(source).unwrap();
    let state = InteractionState::new().with_selected(Id::new("a"));
    let composite = builder.composite(&scene, &state).unwrap();

    let base = composite.style_of(Id::new("a"), RenderLayer::Base).unwrap();
    assert_eq!(base.fill, color("blue"));
    let select = composite.style_of(Id::new("a"), RenderLayer::Selection).unwrap();
    assert_eq!(select.stroke, color("red"));
    assert_eq!(select.stroke_width, Prop::Set(3.0));
}

#[test]
fn test_hover_against_base_when_not_selected() {
    let builder = SceneBuilder::default();
    let scene = builder.parse(HOVER_SCENE).unwrap();

    let state = InteractionState::new().with_hovered(Id::new("a"));
    let composite = builder.composite(&scene, &state).unwrap();

    let hover = composite.style_of(Id::new("a"), RenderLayer::Hover).unwrap();
    assert_eq!(hover.stroke_width, Prop::Set(2.0));
}

#[test]
fn test_hover_against_select_when_selected() {
    let builder = SceneBuilder::default();
    let scene = builder.parse(HOVER_SCENE).unwrap();

    let state = InteractionState::new()
        .with_hovered(Id::new("a"))
        .with_selected(Id::new("a"));
    let composite = builder.composite(&scene, &state).unwrap();

    let hover = composite.style_of(Id::new("a"), RenderLayer::Hover).unwrap();
    assert_eq!(hover.stroke_width, Prop::Set(4.0));
    let status = composite.status(Id::new("a")).unwrap();
    assert!(status.selection_overlay && status.hover_overlay);
}

const INDEXED_SCENE: &str = r#"
    [regions.a]
    elements = [{ kind = "shape", d = "M0 0 H10 V10 H0 Z" }]

    [aes.a.base.indexed]
    fill = ["white", "yellow", "orange", "red"]
"#;

#[test]
fn test_cycle_mode_wraps() {
    let config = AppConfig::new(StyleConfig::default(), IndexMode::Cycle { states: Some(4) });
    let builder = SceneBuilder::new(config);
    let scene = builder.parse(INDEXED_SCENE).unwrap();

    let state = InteractionState::new().with_count(Id::new("a"), 5);
    let composite = builder.composite(&scene, &state).unwrap();

    let base = composite.style_of(Id::new("a"), RenderLayer::Base).unwrap();
    assert_eq!(base.fill, color("yellow"));
}

#[test]
fn test_count_mode_clamps() {
    let source = r#"
        [regions.a]
        elements = [{ kind = "shape", d = "M0 0 H10 V10 H0 Z" }]

        [aes.a.base.indexed]
        fill = ["white", "orange", "red"]
    "#;
    let builder = SceneBuilder::default();
    let scene = builder.parse(source).unwrap();

    let state = InteractionState::new().with_count(Id::new("a"), 10);
    let composite = builder.composite(&scene, &state).unwrap();

    let base = composite.style_of(Id::new("a"), RenderLayer::Base).unwrap();
    assert_eq!(base.fill, color("red"));
}

#[test]
fn test_index_zero_matches_at_rest() {
    let source = r##"
        [regions.a]
        elements = [{ kind = "shape", d = "M0 0 H10 V10 H0 Z" }]

        [aes.a.base.indexed]
        fill = ["#d9d9d9", "orange"]
    "##;
    let builder = SceneBuilder::default();
    let scene = builder.parse(source).unwrap();

    let composite = builder.composite(&scene, &InteractionState::new()).unwrap();
    let base = composite.style_of(Id::new("a"), RenderLayer::Base).unwrap();
    assert_eq!(base, &Style::wash());
}

#[test]
fn test_overlay_beats_group_underlay() {
    let source = r#"
        [regions.grid_h]
        elements = [{ kind = "line", d = "M0 5 H10" }]

        [regions.grid_v]
        elements = [{ kind = "line", d = "M5 0 V10" }]

        [regions.border]
        elements = [{ kind = "line", d = "M0 0 H10 V10 H0 Z" }]

        [regions.land]
        elements = [{ kind = "shape", d = "M1 1 H9 V9 H1 Z" }]

        [groups]
        grid = ["grid_h", "grid_v"]

        [layers]
        underlay = ["grid"]
        overlay = ["border", "grid_h"]
    "#;
    let builder = SceneBuilder::default();
    let scene = builder.parse(source).unwrap();
    let composite = builder.composite(&scene, &InteractionState::new()).unwrap();

    let layer_of = |id: &str| composite.status(Id::new(id)).map(|status| status.layer);
    assert_eq!(layer_of("grid_h"), Some(Layer::Overlay));
    assert_eq!(layer_of("grid_v"), Some(Layer::Underlay));
    assert_eq!(layer_of("border"), Some(Layer::Overlay));
    assert_eq!(layer_of("land"), Some(Layer::Base));
}

#[test]
fn test_render_svg_structure() {
    let source = r#"
        view_box = [0, 0, 20, 10]

        [regions.west]
        elements = [{ kind = "shape", d = "M0 0 H10 V10 H0 Z" }]

        [regions.east]
        elements = [{ kind = "shape", d = "M10 0 H20 V10 H10 Z" }]

        [regions.grid]
        elements = [{ kind = "line", d = "M10 0 V10" }]

        [layers]
        underlay = ["grid"]
    "#;
    let builder = SceneBuilder::default();
    let scene = builder.parse(source).unwrap();
    let state = InteractionState::new()
        .with_selected(Id::new("west"))
        .with_hovered(Id::new("east"))
        .with_selected(Id::new("grid"));

    let svg = builder.render_svg(&scene, &state).unwrap();

    assert!(svg.contains("<svg"));
    let positions: Vec<usize> = ["underlay", "base", "selection", "hover"]
        .iter()
        .map(|name| svg.find(&format!(r#"data-layer="{name}""#)).unwrap())
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));

    // underlay, selection and hover are non-interactive; base is not marked
    assert_eq!(svg.matches(r#"pointer-events="none""#).count(), 3);
    assert_eq!(svg.matches(r#"data-region="west""#).count(), 2);
    assert_eq!(svg.matches(r#"data-region="east""#).count(), 2);
    // non-base regions are never duplicated
    assert_eq!(svg.matches(r#"data-region="grid""#).count(), 1);
}

#[test]
fn test_programmatic_scene() {
    let regions = Regions::new()
        .with_region(Region::new(
            "coast",
            vec![Element::Line {
                d: "M0 0 L10 10".to_string(),
            }],
        ))
        .with_region(Region::new(
            "land",
            vec![Element::Shape {
                d: "M0 0 H10 V10 H0 Z".to_string(),
            }],
        ));
    let groups = GroupMetadata::new().with_group("edges", [Id::new("coast")]);
    let edges = ByState::new(
        Slot::Defined(Aes::new().with_non_scaling_stroke(false).into()),
        Slot::Unset,
        Slot::Unset,
    )
    .unwrap();
    let aes = ByGroup::new().with_entry(Id::new("edges"), edges).unwrap();

    let scene = Scene::new(regions)
        .with_groups(groups)
        .with_layers(LayerLists::new().with_overlay([Id::new("edges")]))
        .with_aes(aes)
        .with_view_box([0.0, 0.0, 10.0, 10.0]);

    let builder = SceneBuilder::default();
    let composite = builder.composite(&scene, &InteractionState::new()).unwrap();
    assert_eq!(
        composite.status(Id::new("coast")).map(|status| status.layer),
        Some(Layer::Overlay)
    );

    let svg = builder.render_svg(&scene, &InteractionState::new()).unwrap();
    // The wash keeps strokes non-scaling; the edges group turns it off.
    assert_eq!(svg.matches(r#"vector-effect="non-scaling-stroke""#).count(), 1);
    assert!(svg.contains(r#"viewBox="0 0 10 10""#));
}

#[test]
fn test_copy_parent_base_rejected_before_paint() {
    let source = r#"
        [regions.a]
        elements = [{ kind = "shape", d = "M0 0 H10 V10 H0 Z" }]

        [aes.a]
        base = "copy_parent"
    "#;
    let builder = SceneBuilder::default();
    assert!(matches!(builder.parse(source), Err(MosaicError::Scene { .. })));
}

#[test]
fn test_unresolvable_hover_fails_render() {
    let source = r#"
        [regions.a]
        elements = [{ kind = "shape", d = "M0 0 H10 V10 H0 Z" }]

        [aes.a]
        base = { opacity = "none" }
        hover = { opacity = "opacity * 0.5" }
    "#;
    let builder = SceneBuilder::default();
    let scene = builder.parse(source).unwrap();

    assert!(builder.render_svg(&scene, &InteractionState::new()).is_ok());

    let state = InteractionState::new().with_hovered(Id::new("a"));
    let err = builder.render_svg(&scene, &state).unwrap_err();
    assert!(matches!(err, MosaicError::Resolve { .. }));
}

#[test]
fn test_export_svg_writes_file() {
    let builder = SceneBuilder::default();
    let scene = builder.parse(HOVER_SCENE).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.svg");

    builder
        .export_svg(&scene, &InteractionState::new(), &path)
        .unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains(r#"data-region="a""#));
}
