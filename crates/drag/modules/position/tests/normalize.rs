use drag_host::{BoxMetrics, Coordinate, HeadlessHost, NodeKey, ViewportMetrics, VisualHost as _};
use drag_position::{PositionScheme, normalize};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Root > container > element, each the offset parent of the next.
fn nested() -> (HeadlessHost, NodeKey, NodeKey) {
    let mut host = HeadlessHost::new();
    let container = host.append_child(NodeKey::ROOT);
    let element = host.append_child(container);
    (host, container, element)
}

fn set_all(host: &mut HeadlessHost, node: NodeKey, declarations: &[(&str, &str)]) {
    for (name, value) in declarations {
        host.set_computed(node, name, value);
    }
}

#[test]
fn static_elements_become_relative_at_origin() -> anyhow::Result<()> {
    init_logging();
    let (mut host, _, element) = nested();
    let normalized = normalize(&host, element);

    assert_eq!(normalized.scheme, PositionScheme::Static);
    assert_eq!(normalized.anchor, Coordinate::ORIGIN);
    let edits: Vec<_> = normalized.mutation.iter().collect();
    assert_eq!(edits, vec![("position", "relative"), ("top", "0"), ("left", "0")]);

    normalized.mutation.apply(&mut host, element)?;
    assert_eq!(host.style_text(element), "position: relative; top: 0; left: 0;");
    Ok(())
}

#[test]
fn absolute_with_both_vertical_offsets_keeps_top() {
    let (mut host, _, element) = nested();
    set_all(
        &mut host,
        element,
        &[
            ("position", "absolute"),
            ("top", "30px"),
            ("bottom", "12px"),
            ("left", "5px"),
            ("height", "40px"),
        ],
    );
    let normalized = normalize(&host, element);

    assert_eq!(normalized.anchor, Coordinate::new(5.0, 30.0));
    assert_eq!(normalized.mutation.get("top"), Some("30px"));
    assert_eq!(normalized.mutation.get("bottom"), Some("auto"));
    assert_eq!(normalized.mutation.get("height"), Some("40px"));
    // Left alone: only `left` is set on that axis.
    assert_eq!(normalized.mutation.get("left"), None);
    assert_eq!(normalized.mutation.get("right"), None);
}

#[test]
fn absolute_auto_size_is_pinned_to_content_box() {
    let (mut host, _, element) = nested();
    set_all(
        &mut host,
        element,
        &[
            ("position", "absolute"),
            ("left", "0"),
            ("right", "0"),
            ("border-left-width", "2px"),
            ("border-right-width", "2px"),
            ("padding-left", "1em"),
            ("padding-right", "4px"),
        ],
    );
    host.set_box_metrics(
        element,
        BoxMetrics {
            offset_left: 0.0,
            offset_top: 0.0,
            offset_width: 300.0,
            offset_height: 20.0,
        },
    );
    let normalized = normalize(&host, element);

    // 300 - 2 - 16 - 4 - 2
    assert_eq!(normalized.mutation.get("width"), Some("276px"));
    assert_eq!(normalized.mutation.get("right"), Some("auto"));
    assert_eq!(normalized.anchor.x, 0.0);
}

#[test]
fn absolute_without_offsets_uses_layout_position() {
    let (mut host, _, element) = nested();
    host.set_computed(element, "position", "absolute");
    host.set_box_metrics(
        element,
        BoxMetrics {
            offset_left: 17.0,
            offset_top: 23.5,
            offset_width: 50.0,
            offset_height: 10.0,
        },
    );
    let normalized = normalize(&host, element);

    assert_eq!(normalized.anchor, Coordinate::new(17.0, 23.5));
    assert_eq!(normalized.mutation.get("top"), Some("23.5px"));
    assert_eq!(normalized.mutation.get("left"), Some("17px"));
    assert_eq!(normalized.mutation.get("width"), Some("50px"));
    assert_eq!(normalized.mutation.get("height"), Some("10px"));
}

#[test]
fn absolute_bottom_converts_against_offset_parent_padding_box() {
    let (mut host, container, element) = nested();
    set_all(
        &mut host,
        container,
        &[("border-top-width", "3px"), ("border-bottom-width", "5px")],
    );
    host.set_box_metrics(
        container,
        BoxMetrics {
            offset_left: 0.0,
            offset_top: 0.0,
            offset_width: 400.0,
            offset_height: 308.0,
        },
    );
    set_all(
        &mut host,
        element,
        &[("position", "absolute"), ("bottom", "10px"), ("right", "2%")],
    );
    host.set_computed(container, "width", "400px");
    host.set_box_metrics(
        element,
        BoxMetrics {
            offset_left: 0.0,
            offset_top: 0.0,
            offset_width: 100.0,
            offset_height: 40.0,
        },
    );
    let normalized = normalize(&host, element);

    // (308 - 3 - 5) - 40 - 10
    assert_eq!(normalized.anchor.y, 250.0);
    assert_eq!(normalized.mutation.get("top"), Some("250px"));
    assert_eq!(normalized.mutation.get("bottom"), Some("auto"));
    // right: 2% of 400px = 8px -> 400 - 100 - 8
    assert_eq!(normalized.anchor.x, 292.0);
    assert_eq!(normalized.mutation.get("right"), Some("auto"));
}

#[test]
fn fixed_bottom_converts_against_viewport() -> anyhow::Result<()> {
    let (mut host, _, element) = nested();
    host.set_viewport(ViewportMetrics {
        client_width: 1200.0,
        client_height: 785.0,
        inner_width: 1200.0,
        inner_height: 800.0,
    });
    set_all(
        &mut host,
        element,
        &[("position", "fixed"), ("top", "auto"), ("bottom", "0"), ("left", "10px")],
    );
    host.set_box_metrics(
        element,
        BoxMetrics {
            offset_left: 10.0,
            offset_top: 750.0,
            offset_width: 80.0,
            offset_height: 50.0,
        },
    );
    let normalized = normalize(&host, element);

    assert_eq!(normalized.scheme, PositionScheme::Fixed);
    assert_eq!(normalized.anchor, Coordinate::new(10.0, 750.0));
    normalized.mutation.apply(&mut host, element)?;
    assert_eq!(host.style_property(element, "top"), "750px");
    assert_eq!(host.style_property(element, "bottom"), "auto");
    Ok(())
}

#[test]
fn relative_auto_offsets_pin_to_zero() {
    let (mut host, _, element) = nested();
    host.set_computed(element, "position", "relative");
    let normalized = normalize(&host, element);

    assert_eq!(normalized.anchor, Coordinate::ORIGIN);
    let edits: Vec<_> = normalized.mutation.iter().collect();
    assert_eq!(edits, vec![("top", "0"), ("left", "0")]);
}

#[test]
fn relative_closing_offsets_are_negated() {
    let (mut host, _, element) = nested();
    set_all(
        &mut host,
        element,
        &[("position", "relative"), ("bottom", "12px"), ("right", "-4px")],
    );
    let normalized = normalize(&host, element);

    assert_eq!(normalized.anchor, Coordinate::new(4.0, -12.0));
    assert_eq!(normalized.mutation.get("top"), Some("-12px"));
    assert_eq!(normalized.mutation.get("bottom"), Some("auto"));
    assert_eq!(normalized.mutation.get("left"), Some("4px"));
    assert_eq!(normalized.mutation.get("right"), Some("auto"));
}

#[test]
fn relative_over_constrained_keeps_start() {
    let (mut host, _, element) = nested();
    set_all(
        &mut host,
        element,
        &[
            ("position", "sticky"),
            ("top", "1in"),
            ("bottom", "3px"),
            ("left", "6px"),
        ],
    );
    let normalized = normalize(&host, element);

    assert_eq!(normalized.scheme, PositionScheme::Sticky);
    assert_eq!(normalized.anchor, Coordinate::new(6.0, 96.0));
    assert_eq!(normalized.mutation.get("bottom"), Some("auto"));
    assert_eq!(normalized.mutation.get("top"), None);
}

#[test]
fn unresolvable_percentages_fall_back_to_layout() {
    let (mut host, _, element) = nested();
    // The container's height is `auto`, so a percentage cannot resolve.
    set_all(
        &mut host,
        element,
        &[("position", "absolute"), ("top", "10%"), ("bottom", "10%")],
    );
    host.set_box_metrics(
        element,
        BoxMetrics {
            offset_left: 0.0,
            offset_top: 64.0,
            offset_width: 10.0,
            offset_height: 10.0,
        },
    );
    let normalized = normalize(&host, element);
    assert_eq!(normalized.anchor.y, 64.0);
    assert_eq!(normalized.mutation.get("top"), Some("64px"));
}
