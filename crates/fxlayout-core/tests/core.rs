//! Comprehensive tests for fxlayout-core

use fxlayout_core::breakpoints::BreakPointRegistry;
use fxlayout_core::prefixer::apply_css_prefixes;
use fxlayout_core::{
    BreakPoint, InputValue, LayoutConfig, MarshalEvent, MatchMedia, MediaMarshaller, StyleCaches,
    StyleDefinition, StyleValue, Viewport,
};
use fxlayout_dom::DomTree;

fn media_and_marshal(config: &LayoutConfig) -> (MatchMedia, MediaMarshaller) {
    let registry = BreakPointRegistry::from_config(config);
    let media = MatchMedia::new(&registry, &config.print_with_breakpoints).unwrap();
    (media, MediaMarshaller::new(registry))
}

fn drain(marshal: &mut MediaMarshaller) -> Vec<MarshalEvent> {
    std::iter::from_fn(|| marshal.next_event()).collect()
}

#[test]
fn test_highest_priority_breakpoint_wins() {
    let config = LayoutConfig::default();
    let (mut media, mut marshal) = media_and_marshal(&config);
    let el = DomTree::new().create_element("div");
    marshal.init(el, "flex", &[]);
    marshal.set_value(el, "flex", "base".into(), "");
    marshal.set_value(el, "flex", "small".into(), "lt-md");
    marshal.set_value(el, "flex", "tiny".into(), "xs");
    drain(&mut marshal);

    marshal.apply_media_changes(&media.evaluate(&Viewport::screen(400.0, 800.0)));
    assert_eq!(marshal.activated_alias(), "xs");
    assert_eq!(marshal.get_value(el, "flex"), Some(InputValue::from("tiny")));

    marshal.apply_media_changes(&media.evaluate(&Viewport::screen(700.0, 800.0)));
    assert_eq!(marshal.get_value(el, "flex"), Some(InputValue::from("small")));

    marshal.apply_media_changes(&media.evaluate(&Viewport::screen(1400.0, 800.0)));
    assert_eq!(marshal.get_value(el, "flex"), Some(InputValue::from("base")));
    let events = drain(&mut marshal);
    assert_eq!(events.last(), Some(&MarshalEvent::Update {
        element: el,
        key: "flex",
        value: Some(InputValue::from("base")),
    }));
}

#[test]
fn test_missing_value_clears() {
    let config = LayoutConfig::default();
    let (mut media, mut marshal) = media_and_marshal(&config);
    let el = DomTree::new().create_element("div");
    marshal.init(el, "layout", &[]);
    marshal.init(el, "flex-order", &[]);
    marshal.set_value(el, "layout", "row".into(), "");
    marshal.set_value(el, "flex-order", "2".into(), "md");
    drain(&mut marshal);

    marshal.apply_media_changes(&media.evaluate(&Viewport::screen(1000.0, 800.0)));
    drain(&mut marshal);

    marshal.apply_media_changes(&media.evaluate(&Viewport::screen(400.0, 800.0)));
    let events = drain(&mut marshal);
    assert!(events.contains(&MarshalEvent::Clear { element: el, key: "flex-order" }));
    assert!(events.contains(&MarshalEvent::Update {
        element: el,
        key: "layout",
        value: Some(InputValue::from("row")),
    }));
}

#[test]
fn test_print_keeps_listed_breakpoints() {
    let config = LayoutConfig {
        print_with_breakpoints: vec!["md".into()],
        ..LayoutConfig::default()
    };
    let (mut media, _) = media_and_marshal(&config);

    media.evaluate(&Viewport::print(1000.0, 800.0));
    let active = media.active_aliases();
    assert!(active.contains(&"print"));
    assert!(active.contains(&"md"));
    assert!(!active.contains(&"gt-sm"));
}

#[test]
fn test_custom_breakpoints_from_json() {
    let config = LayoutConfig::from_json(r#"{
        "disableDefaultBps": true,
        "breakpoints": [
            { "alias": "narrow", "mediaQuery": "screen and (max-width: 500px)", "priority": 10 },
            { "alias": "wide", "mediaQuery": "screen and (min-width: 501px)" }
        ]
    }"#).unwrap();
    let registry = BreakPointRegistry::from_config(&config);

    let aliases: Vec<&str> = registry.aliases().collect();
    assert_eq!(aliases, vec!["wide", "narrow", "print"]);
    assert_eq!(
        registry.find_by_alias("narrow"),
        Some(&BreakPoint::new("narrow", "screen and (max-width: 500px)", 10, false)),
    );
}

#[test]
fn test_scoped_cache_memoizes() {
    let mut caches = StyleCaches::new();
    let build = || StyleDefinition::new().with("order", 2);

    let first = caches.scope("flex-order").get_or_insert_with("2", build);
    let second = caches.scope("flex-order").get_or_insert_with("2", || StyleDefinition::new());
    assert_eq!(first, second);

    let stats = caches.stats("flex-order").unwrap();
    assert_eq!((stats.size, stats.hits, stats.misses), (1, 1, 1));
    assert!(caches.stats("flex-row-wrap").is_none());

    caches.clear();
    assert!(caches.scope_names().is_empty());
}

#[test]
fn test_vendor_prefixes() {
    let styles = StyleDefinition::new()
        .with("display", "flex")
        .with("flex-direction", "column")
        .with("order", "first")
        .with("margin", "0");
    let prefixed = apply_css_prefixes(styles);

    assert_eq!(
        prefixed.get("display"),
        Some(&StyleValue::Multi(vec!["-webkit-flex".into(), "flex".into()])),
    );
    assert_eq!(prefixed.text("-webkit-flex-direction").as_deref(), Some("column"));
    assert_eq!(prefixed.text("order").as_deref(), Some("0"));
    assert_eq!(prefixed.text("-webkit-order").as_deref(), Some("0"));
    assert!(!prefixed.contains("-webkit-margin"));
}
