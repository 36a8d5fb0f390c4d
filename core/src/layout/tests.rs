use super::*;
use crate::fakes::FakeMeasurer;
use crate::model::Snippet;

fn config(groups: &[(&str, &[(&str, &str)])]) -> RootConfig {
    RootConfig::new(
        groups
            .iter()
            .map(|(name, snippets)| {
                SnippetGroup::new(
                    *name,
                    snippets
                        .iter()
                        .map(|(title, content)| Snippet::new(*title, *content))
                        .collect(),
                )
            })
            .collect(),
    )
}

fn build(config: &RootConfig, width: i32) -> PanelLayout {
    let (layout, kind) = rebuild(
        config,
        Viewport::new(width, width + 20),
        DpiScale::IDENTITY,
        None,
        false,
        &FakeMeasurer,
    );
    assert_eq!(kind, RebuildKind::Full);
    layout
}

#[test]
fn work_and_empty_personal_group() {
    let config = config(&[("Work", &[("Hello", "Hello world")]), ("Personal", &[])]);

    let layout = build(&config, 300);

    assert_eq!(layout.groups.len(), 2);
    let work = &layout.groups[0];
    assert_eq!(work.title, "Work");
    assert_eq!(work.panel.buttons.len(), 1);
    assert_eq!(work.panel.buttons[0].text, "Hello");
    assert_eq!(work.panel.buttons[0].tooltip.as_deref(), Some("Hello world"));

    let personal = &layout.groups[1];
    assert_eq!(personal.title, "Personal");
    assert!(personal.panel.buttons.is_empty());
    assert_eq!(personal.panel.bounds.height, 0);
}

#[test]
fn geometry_at_reference_dpi() {
    let config = config(&[("Work", &[("Hello", "Hello world")]), ("Personal", &[])]);

    let layout = build(&config, 300);

    let work = &layout.groups[0];
    assert_eq!(work.bounds, Rect::new(6, 6, 263, 68));
    assert_eq!(work.title_bounds, Rect::new(4, 4, 28, 16));
    assert_eq!(work.panel.bounds, Rect::new(4, 24, 243, 34));
    assert_eq!(work.panel.buttons[0].bounds, Rect::new(3, 3, 51, 28));
    assert_eq!(
        work.absolute_button_bounds(&work.panel.buttons[0]),
        Rect::new(13, 33, 51, 28)
    );

    let personal = &layout.groups[1];
    assert_eq!(personal.bounds, Rect::new(6, 86, 263, 34));
    assert_eq!(personal.absolute_title_bounds(), Rect::new(10, 90, 56, 16));
    assert_eq!(layout.content_height, 126);
}

#[test]
fn containers_stack_in_config_order() {
    let config = config(&[
        ("A", &[("x", "x"), ("w", "w")]),
        ("B", &[]),
        ("C", &[("y", "y")]),
    ]);

    let layout = build(&config, 300);

    let names: Vec<_> = layout.groups.iter().map(|g| g.title.as_str()).collect();
    assert_eq!(names, ["A", "B", "C"]);
    for pair in layout.groups.windows(2) {
        assert!(pair[1].bounds.y > pair[0].bounds.bottom());
    }
    for (group, source) in layout.groups.iter().zip(&config.groups) {
        assert_eq!(group.panel.buttons.len(), source.snippets.len(), "{}", source.name);
    }
    assert_eq!(layout.groups[0].panel.buttons[1].text, "w");
    assert_eq!(layout.groups[2].panel.buttons[0].text, "y");
    assert_eq!(layout.button_count(), 3);
}

#[test]
fn button_width_is_clamped() {
    let long = "L".repeat(100);
    let config = config(&[("G", &[("A", "a"), (long.as_str(), "b")])]);

    let layout = build(&config, 300);

    let buttons = &layout.groups[0].panel.buttons;
    assert_eq!(buttons[0].bounds.width, 50);
    assert_eq!(buttons[1].bounds.width, 243);
    assert_eq!(buttons[1].bounds.y, 3 + 28 + 3 + 3);
}

#[test]
fn buttons_wrap_into_rows() {
    let hellos = [("Hello", "1"); 5];
    let config = config(&[("G", &hellos)]);

    let layout = build(&config, 300);

    let panel = &layout.groups[0].panel;
    let xs: Vec<_> = panel.buttons.iter().map(|b| (b.bounds.x, b.bounds.y)).collect();
    assert_eq!(xs, [(3, 3), (60, 3), (117, 3), (174, 3), (3, 37)]);
    assert_eq!(panel.bounds.height, 68);
}

#[test]
fn untitled_snippets_use_content_head() {
    let config = RootConfig::new(vec![SnippetGroup::new(
        "G",
        vec![
            Snippet::untitled("x".repeat(50)),
            Snippet::untitled(""),
            Snippet::new("   ", "short"),
        ],
    )]);

    let layout = build(&config, 300);

    let buttons = &layout.groups[0].panel.buttons;
    assert_eq!(buttons[0].text, format!("{}...", "x".repeat(12)));
    assert_eq!(buttons[1].text, "(untitled)");
    assert_eq!(buttons[1].tooltip, None);
    assert_eq!(buttons[2].text, "short");
}

#[test]
fn tooltip_is_truncated() {
    let content = "y".repeat(200);
    let config = config(&[("G", &[("T", content.as_str())])]);

    let layout = build(&config, 300);

    let tooltip = layout.groups[0].panel.buttons[0].tooltip.clone().unwrap();
    assert_eq!(tooltip.chars().count(), 153);
    assert!(tooltip.ends_with("..."));
}

#[test]
fn unnamed_group_gets_placeholder() {
    let config = config(&[(" ", &[])]);

    let layout = build(&config, 300);

    assert_eq!(layout.groups[0].title, "(unnamed group)");
}

#[test]
fn empty_config_has_no_containers() {
    let layout = build(&RootConfig::default(), 300);

    assert!(layout.groups.is_empty());
    assert_eq!(layout.content_height, 0);
}

#[test]
fn narrow_viewport_keeps_minimum_widths() {
    let config = config(&[("G", &[("Hello", "x")])]);

    let layout = build(&config, 120);

    assert_eq!(layout.groups[0].bounds.width, 200);
    assert_eq!(layout.groups[0].panel.bounds.width, 180);
}

#[test]
fn degenerate_viewport_falls_back_to_client_area() {
    let config = config(&[("G", &[("Hello", "x")])]);

    let (layout, _) = rebuild(
        &config,
        Viewport::new(0, 320),
        DpiScale::IDENTITY,
        None,
        false,
        &FakeMeasurer,
    );

    assert_eq!(layout.viewport_width, 300);
    assert_eq!(layout.groups[0].bounds.width, 263);
}

#[test]
fn constants_scale_with_dpi() {
    let config = config(&[("G", &[("Hello", "x")])]);

    let (layout, _) = rebuild(
        &config,
        Viewport::new(300, 320),
        DpiScale::from_dpi(144),
        None,
        false,
        &FakeMeasurer,
    );

    let group = &layout.groups[0];
    assert_eq!(group.bounds.width, 300);
    assert_eq!(group.panel.bounds.width, 270);
    assert_eq!(group.panel.buttons[0].bounds.height, 42);
    assert_eq!(group.panel.buttons[0].bounds.width, 77);
}

#[test]
fn dpi_scale_rounds_and_rejects_garbage() {
    assert_eq!(DpiScale::from_dpi(0), DpiScale::IDENTITY);
    assert_eq!(DpiScale::new(f32::NAN), DpiScale::IDENTITY);
    assert_eq!(DpiScale::new(-2.0), DpiScale::IDENTITY);
    assert_eq!(DpiScale::from_dpi(120).scale(28), 35);
    assert_eq!(DpiScale::from_dpi(192).scale(3), 6);
    assert_eq!(DpiScale::from_dpi(144).unscale(420), 280);
}

#[test]
fn same_names_rebuild_incrementally() {
    let mut engine = LayoutEngine::new();
    let before = config(&[("Work", &[("Hello", "a")]), ("Home", &[])]);
    let after = config(&[("Work", &[("Bye", "b"), ("Again", "c")]), ("Home", &[("x", "y")])]);
    let viewport = Viewport::new(300, 320);

    engine.rebuild(&before, viewport, DpiScale::IDENTITY, false, &FakeMeasurer);
    let ids = engine.layout().unwrap().container_ids();
    let kind = engine.rebuild(&after, viewport, DpiScale::IDENTITY, false, &FakeMeasurer);

    let layout = engine.layout().unwrap();
    assert_eq!(kind, RebuildKind::Incremental);
    assert_eq!(layout.container_ids(), ids);
    let texts: Vec<_> = layout.groups[0]
        .panel
        .buttons
        .iter()
        .map(|b| b.text.as_str())
        .collect();
    assert_eq!(texts, ["Bye", "Again"]);
    assert_eq!(layout.groups[1].panel.buttons.len(), 1);
}

#[test]
fn incremental_rebuild_keeps_metrics_and_width() {
    let mut engine = LayoutEngine::new();
    let config = config(&[("Work", &[("Hello", "a")])]);

    engine.rebuild(
        &config,
        Viewport::new(300, 320),
        DpiScale::IDENTITY,
        false,
        &FakeMeasurer,
    );
    let kind = engine.rebuild(
        &config,
        Viewport::new(500, 520),
        DpiScale::from_dpi(144),
        false,
        &FakeMeasurer,
    );

    let layout = engine.layout().unwrap();
    assert_eq!(kind, RebuildKind::Incremental);
    assert_eq!(layout.viewport_width, 300);
    assert_eq!(layout.metrics.scale, DpiScale::IDENTITY);
    assert_eq!(layout.groups[0].bounds.width, 263);
}

#[test]
fn renamed_group_replaces_containers() {
    let mut engine = LayoutEngine::new();
    let viewport = Viewport::new(300, 320);

    engine.rebuild(
        &config(&[("Work", &[]), ("Home", &[])]),
        viewport,
        DpiScale::IDENTITY,
        false,
        &FakeMeasurer,
    );
    let old_ids = engine.layout().unwrap().container_ids();
    let kind = engine.rebuild(
        &config(&[("Work", &[]), ("House", &[])]),
        viewport,
        DpiScale::IDENTITY,
        false,
        &FakeMeasurer,
    );

    let new_ids = engine.layout().unwrap().container_ids();
    assert_eq!(kind, RebuildKind::Full);
    assert!(new_ids.iter().all(|id| !old_ids.contains(id)));
    assert_eq!(engine.layout().unwrap().group_names(), ["Work", "House"]);
}

#[test]
fn structural_change_rules() {
    let base = config(&[("A", &[]), ("B", &[])]);
    let layout = build(&base, 300);

    assert!(is_structural_change(&base, None, false));
    assert!(!is_structural_change(&base, Some(&layout), false));
    assert!(is_structural_change(&base, Some(&layout), true));
    assert!(is_structural_change(
        &config(&[("A", &[])]),
        Some(&layout),
        false
    ));
    assert!(is_structural_change(
        &config(&[("B", &[]), ("A", &[])]),
        Some(&layout),
        false
    ));
}

#[test]
fn forced_rebuild_is_full_even_with_same_names() {
    let mut engine = LayoutEngine::new();
    let config = config(&[("Work", &[("Hello", "a")])]);
    let viewport = Viewport::new(300, 320);

    engine.rebuild(&config, viewport, DpiScale::IDENTITY, false, &FakeMeasurer);
    let kind = engine.rebuild(&config, viewport, DpiScale::IDENTITY, true, &FakeMeasurer);

    assert_eq!(kind, RebuildKind::Full);
    assert_eq!(engine.layout().unwrap().container_ids()[0].get(), 1);
}

#[test]
fn wrap_places_oversized_child_alone() {
    let flow = wrap(&[Size::new(40, 10), Size::new(200, 10)], 2, 100);

    assert_eq!(flow.bounds[0], Rect::new(2, 2, 40, 10));
    assert_eq!(flow.bounds[1], Rect::new(2, 16, 200, 10));
    assert_eq!(flow.height, 28);
    assert_eq!(wrap(&[], 2, 100).height, 0);
}

#[test]
fn clamp_moves_window_back_into_work_area() {
    let work = Rect::new(0, 0, 1920, 1040);

    assert_eq!(
        clamp_into(Rect::new(100, 70, 280, 750), work),
        Point::new(100, 70)
    );
    assert_eq!(
        clamp_into(Rect::new(1800, 500, 280, 750), work),
        Point::new(1640, 290)
    );
    assert_eq!(
        clamp_into(Rect::new(-50, -10, 280, 750), work),
        Point::new(0, 0)
    );
}

#[test]
fn truncation_counts_characters() {
    assert_eq!(truncate_with_ellipsis("héllo wörld", 5), "héllo...");
    assert_eq!(truncate_with_ellipsis("short", 12), "short");
    assert_eq!(truncate_with_ellipsis("exactly12chr", 12), "exactly12chr");
}
