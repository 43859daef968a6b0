//! Media Marshaller
//!
//! Stores every directive input value per element, per breakpoint alias
//! and per key, and resolves which value is active: the value of the
//! highest-priority activated breakpoint that has one, falling back to the
//! base (`""`) value.
//!
//! Directives are not called back directly. Updates and clears are queued
//! as [`MarshalEvent`]s and drained in FIFO order by the runtime, which also
//! notifies the subscribers registered through [`MediaMarshaller::track_value`].

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt;

use fxlayout_dom::NodeId;

use crate::breakpoints::{BreakPoint, BreakPointRegistry, sort_descending_priority};
use crate::keys::DirectiveKey;
use crate::media::MediaChange;

/// A value bound to a directive input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputValue {
    Text(String),
    Bool(bool),
    /// Class names or style declarations given as a list
    List(Vec<String>),
    /// Style object: property -> value
    Map(Vec<(String, String)>),
    /// Class object: class -> enabled
    Flags(Vec<(String, bool)>),
}

impl InputValue {
    /// Textual form of the value
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Bool(b) => b.to_string(),
            Self::List(items) => items.join(" "),
            Self::Map(entries) => entries.iter()
                .map(|(k, v)| format!("{}: {};", k, v))
                .collect::<Vec<_>>()
                .join(" "),
            Self::Flags(flags) => flags.iter()
                .filter(|(_, on)| *on)
                .map(|(k, _)| k.as_str())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    /// Text of an optional value; a missing value reads as empty
    pub fn text_of(value: Option<&InputValue>) -> String {
        value.map(InputValue::as_text).unwrap_or_default()
    }
}

impl fmt::Display for InputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<&str> for InputValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for InputValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for InputValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Events besides breakpoint changes that re-run a directive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Trigger {
    /// Document direction changed
    Directionality,
    /// Children of the directive's element were added or removed
    ChildList,
}

/// A value change observed on `(element, key)`
#[derive(Debug, Clone, PartialEq)]
pub struct ElementMatcher {
    pub element: NodeId,
    pub key: DirectiveKey,
    pub value: Option<InputValue>,
}

/// Pending directive callback
#[derive(Debug, Clone, PartialEq)]
pub enum MarshalEvent {
    Update {
        element: NodeId,
        key: DirectiveKey,
        value: Option<InputValue>,
    },
    Clear {
        element: NodeId,
        key: DirectiveKey,
    },
}

impl MarshalEvent {
    pub fn element(&self) -> NodeId {
        match self {
            Self::Update { element, .. } | Self::Clear { element, .. } => *element,
        }
    }

    pub fn key(&self) -> DirectiveKey {
        match self {
            Self::Update { key, .. } | Self::Clear { key, .. } => *key,
        }
    }
}

/// Directive that wants to hear about another key's changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Subscriber {
    pub element: NodeId,
    pub key: DirectiveKey,
}

type ValueMap = BTreeMap<DirectiveKey, InputValue>;
type BreakPointMap = BTreeMap<String, ValueMap>;

/// Tracks active breakpoints and per-element input values
#[derive(Debug)]
pub struct MediaMarshaller {
    registry: BreakPointRegistry,
    /// Sorted by descending priority
    activated: Vec<BreakPoint>,
    element_map: BTreeMap<NodeId, BreakPointMap>,
    /// Keys with a registered directive, per element
    element_keys: BTreeMap<NodeId, BTreeSet<DirectiveKey>>,
    triggers: BTreeMap<(NodeId, DirectiveKey), Vec<Trigger>>,
    watchers: BTreeMap<(NodeId, DirectiveKey), Vec<Subscriber>>,
    events: VecDeque<MarshalEvent>,
}

impl MediaMarshaller {
    pub fn new(registry: BreakPointRegistry) -> Self {
        Self {
            registry,
            activated: Vec::new(),
            element_map: BTreeMap::new(),
            element_keys: BTreeMap::new(),
            triggers: BTreeMap::new(),
            watchers: BTreeMap::new(),
            events: VecDeque::new(),
        }
    }

    pub fn registry(&self) -> &BreakPointRegistry {
        &self.registry
    }

    /// Alias of the highest-priority activated breakpoint, or `""`
    pub fn activated_alias(&self) -> &str {
        self.activated.first().map(|bp| bp.alias.as_str()).unwrap_or("")
    }

    pub fn activated_breakpoints(&self) -> &[BreakPoint] {
        &self.activated
    }

    pub fn is_activated(&self, alias: &str) -> bool {
        self.activated.iter().any(|bp| bp.alias == alias)
    }

    /// Register a directive for `(element, key)` with its extra triggers
    pub fn init(&mut self, element: NodeId, key: DirectiveKey, triggers: &[Trigger]) {
        self.element_keys.entry(element).or_default().insert(key);
        if !triggers.is_empty() {
            self.triggers.insert((element, key), triggers.to_vec());
        }
    }

    pub fn is_registered(&self, element: NodeId, key: DirectiveKey) -> bool {
        self.element_keys.get(&element).is_some_and(|keys| keys.contains(key))
    }

    /// Subscribe `subscriber` to value changes of `(element, key)`
    pub fn track_value(&mut self, element: NodeId, key: DirectiveKey, subscriber: Subscriber) {
        let list = self.watchers.entry((element, key)).or_default();
        if !list.contains(&subscriber) {
            list.push(subscriber);
        }
    }

    /// Subscribers of `(element, key)`
    pub fn subscribers(&self, element: NodeId, key: DirectiveKey) -> Vec<Subscriber> {
        self.watchers.get(&(element, key)).cloned().unwrap_or_default()
    }

    /// Forget everything about an element
    pub fn release_element(&mut self, element: NodeId) {
        self.element_map.remove(&element);
        self.element_keys.remove(&element);
        self.triggers.retain(|(el, _), _| *el != element);
        self.watchers.retain(|(el, _), _| *el != element);
        for list in self.watchers.values_mut() {
            list.retain(|s| s.element != element);
        }
        self.events.retain(|e| e.element() != element);
    }

    /// Active value for `(element, key)`
    pub fn get_value(&self, element: NodeId, key: DirectiveKey) -> Option<InputValue> {
        let bp_map = self.element_map.get(&element)?;
        self.activated_values(bp_map, Some(key))
            .and_then(|values| values.get(key))
            .cloned()
    }

    /// Value stored for one breakpoint alias
    pub fn get_value_for(&self, element: NodeId, key: DirectiveKey, alias: &str) -> Option<&InputValue> {
        self.element_map.get(&element)?.get(alias)?.get(key)
    }

    pub fn has_value(&self, element: NodeId, key: DirectiveKey) -> bool {
        self.get_value(element, key).is_some()
    }

    /// Store a value for a breakpoint alias and push the resulting active value
    pub fn set_value(&mut self, element: NodeId, key: DirectiveKey, value: InputValue, alias: &str) {
        tracing::trace!("{:?} {}[{}] = {}", element, key, alias, value);
        self.element_map.entry(element)
            .or_default()
            .entry(alias.to_string())
            .or_default()
            .insert(key, value);

        if let Some(active) = self.get_value(element, key) {
            self.update_element(element, key, Some(active));
        }
    }

    fn activated_values<'a>(&self, bp_map: &'a BreakPointMap, key: Option<DirectiveKey>) -> Option<&'a ValueMap> {
        for bp in &self.activated {
            if let Some(values) = bp_map.get(&bp.alias) {
                if key.is_none_or(|k| values.contains_key(k)) {
                    return Some(values);
                }
            }
        }

        let fallback = bp_map.get("");
        match key {
            None => fallback,
            Some(k) => fallback.filter(|values| values.contains_key(k)),
        }
    }

    /// Queue an update for `(element, key)` if the element has directives
    pub fn update_element(&mut self, element: NodeId, key: DirectiveKey, value: Option<InputValue>) {
        if self.element_keys.contains_key(&element) {
            self.events.push_back(MarshalEvent::Update { element, key, value });
        }
    }

    /// Queue a clear for `(element, key)` if a directive is registered
    pub fn clear_element(&mut self, element: NodeId, key: DirectiveKey) {
        if self.is_registered(element, key) {
            self.events.push_back(MarshalEvent::Clear { element, key });
        }
    }

    /// Re-send the active value of one key, or of every active key
    pub fn trigger_update(&mut self, element: NodeId, key: Option<DirectiveKey>) {
        let Some(bp_map) = self.element_map.get(&element) else {
            return;
        };
        let Some(values) = self.activated_values(bp_map, key) else {
            return;
        };

        let updates: Vec<(DirectiveKey, Option<InputValue>)> = match key {
            Some(k) => vec![(k, values.get(k).cloned())],
            None => values.iter().map(|(k, v)| (*k, Some(v.clone()))).collect(),
        };
        for (k, value) in updates {
            self.update_element(element, k, value);
        }
    }

    /// Re-send current values to every directive listening for `trigger`,
    /// optionally only on `target`
    pub fn fire_trigger(&mut self, trigger: Trigger, target: Option<NodeId>) {
        let hits: Vec<(NodeId, DirectiveKey)> = self.triggers.iter()
            .filter(|((el, _), triggers)| triggers.contains(&trigger) && target.is_none_or(|t| t == *el))
            .map(|(k, _)| *k)
            .collect();

        for (element, key) in hits {
            let value = self.get_value(element, key);
            self.update_element(element, key, value);
        }
    }

    /// Resolve every element against the activated breakpoints
    pub fn update_styles(&mut self) {
        let elements: Vec<NodeId> = self.element_map.keys().copied().collect();

        for element in elements {
            let mut pending: BTreeSet<DirectiveKey> = self.element_keys.get(&element)
                .cloned()
                .unwrap_or_default();
            let mut updates: Vec<(DirectiveKey, Option<InputValue>)> = Vec::new();
            let mut clears: Vec<DirectiveKey> = Vec::new();

            if let Some(bp_map) = self.element_map.get(&element) {
                if let Some(values) = self.activated_values(bp_map, None) {
                    for (k, v) in values {
                        updates.push((*k, Some(v.clone())));
                        pending.remove(k);
                    }
                }
                for k in pending {
                    match self.activated_values(bp_map, Some(k)) {
                        Some(values) => updates.push((k, values.get(k).cloned())),
                        None => clears.push(k),
                    }
                }
            }

            for (k, value) in updates {
                self.update_element(element, k, value);
            }
            for k in clears {
                self.clear_element(element, k);
            }
        }
    }

    /// Apply one media change
    pub fn on_media_change(&mut self, change: &MediaChange) {
        if self.apply_change(change) {
            self.update_styles();
        }
    }

    /// Apply a batch of media changes, resolving styles once
    pub fn apply_media_changes(&mut self, changes: &[MediaChange]) {
        let mut changed = false;
        for change in changes {
            changed |= self.apply_change(change);
        }
        if changed {
            self.update_styles();
        }
    }

    fn apply_change(&mut self, change: &MediaChange) -> bool {
        let Some(bp) = self.registry.find_by_query(&change.media_query).cloned() else {
            return false;
        };
        let position = self.activated.iter().position(|b| b.alias == bp.alias);

        match (change.matches, position) {
            (true, None) => {
                tracing::debug!("breakpoint '{}' activated", bp.alias);
                self.activated.push(bp);
                self.activated.sort_by(sort_descending_priority);
                true
            }
            (false, Some(i)) => {
                tracing::debug!("breakpoint '{}' deactivated", bp.alias);
                self.activated.remove(i);
                true
            }
            _ => false,
        }
    }

    /// Next queued event
    pub fn next_event(&mut self) -> Option<MarshalEvent> {
        self.events.pop_front()
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Drop queued events
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Forget all elements and activation state
    pub fn reset(&mut self) {
        self.activated.clear();
        self.element_map.clear();
        self.element_keys.clear();
        self.triggers.clear();
        self.watchers.clear();
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::keys::{FLEX, LAYOUT, LAYOUT_GAP};
    use fxlayout_dom::DomTree;

    fn marshaller() -> MediaMarshaller {
        MediaMarshaller::new(BreakPointRegistry::from_config(&LayoutConfig::default()))
    }

    fn element() -> NodeId {
        let mut dom = DomTree::new();
        dom.create_element("div")
    }

    fn change(m: &MediaMarshaller, alias: &str, matches: bool) -> MediaChange {
        let bp = m.registry().find_by_alias(alias).unwrap();
        MediaChange {
            matches,
            media_query: bp.media_query.clone(),
            mq_alias: bp.alias.clone(),
            priority: bp.priority,
        }
    }

    fn drain(m: &mut MediaMarshaller) -> Vec<MarshalEvent> {
        std::iter::from_fn(|| m.next_event()).collect()
    }

    #[test]
    fn test_fallback_value() {
        let mut m = marshaller();
        let el = element();
        m.set_value(el, FLEX, "50".into(), "");
        assert_eq!(m.get_value(el, FLEX), Some(InputValue::from("50")));
        assert!(m.has_value(el, FLEX));
        assert!(!m.has_value(el, LAYOUT));
    }

    #[test]
    fn test_priority_resolution() {
        let mut m = marshaller();
        let el = element();
        m.set_value(el, FLEX, "10".into(), "");
        m.set_value(el, FLEX, "20".into(), "gt-sm");
        m.set_value(el, FLEX, "30".into(), "md");

        let on: Vec<_> = ["md", "gt-sm", "gt-xs", "lt-lg", "lt-xl"].iter()
            .map(|a| change(&m, a, true))
            .collect();
        m.apply_media_changes(&on);
        assert_eq!(m.activated_alias(), "md");
        assert_eq!(m.get_value(el, FLEX), Some(InputValue::from("30")));

        m.on_media_change(&change(&m, "md", false));
        assert_eq!(m.get_value(el, FLEX), Some(InputValue::from("20")));

        m.on_media_change(&change(&m, "gt-sm", false));
        assert_eq!(m.get_value(el, FLEX), Some(InputValue::from("10")));
        assert_eq!(m.get_value_for(el, FLEX, "md"), Some(&InputValue::from("30")));
    }

    #[test]
    fn test_events_need_registration() {
        let mut m = marshaller();
        let el = element();
        m.set_value(el, FLEX, "1".into(), "");
        assert!(drain(&mut m).is_empty());

        m.init(el, FLEX, &[]);
        m.set_value(el, FLEX, "2".into(), "");
        assert_eq!(drain(&mut m), vec![MarshalEvent::Update {
            element: el,
            key: FLEX,
            value: Some("2".into()),
        }]);
    }

    #[test]
    fn test_deactivation_clears() {
        let mut m = marshaller();
        let el = element();
        m.init(el, FLEX, &[]);
        m.set_value(el, FLEX, "30".into(), "md");
        assert!(drain(&mut m).is_empty(), "md is not active yet");

        m.on_media_change(&change(&m, "md", true));
        assert_eq!(drain(&mut m), vec![MarshalEvent::Update {
            element: el,
            key: FLEX,
            value: Some("30".into()),
        }]);

        m.on_media_change(&change(&m, "md", false));
        assert_eq!(drain(&mut m), vec![MarshalEvent::Clear { element: el, key: FLEX }]);
    }

    #[test]
    fn test_extra_triggers() {
        let mut m = marshaller();
        let el = element();
        m.init(el, LAYOUT_GAP, &[Trigger::Directionality, Trigger::ChildList]);
        m.init(el, FLEX, &[]);
        m.set_value(el, LAYOUT_GAP, "10px".into(), "");
        drain(&mut m);

        m.fire_trigger(Trigger::Directionality, None);
        let events = drain(&mut m);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].key(), LAYOUT_GAP);

        m.fire_trigger(Trigger::ChildList, Some(NodeId::ROOT));
        assert!(drain(&mut m).is_empty());
    }

    #[test]
    fn test_track_and_release() {
        let mut m = marshaller();
        let parent = element();
        let child = NodeId::ROOT;
        m.init(parent, LAYOUT, &[]);
        m.init(child, FLEX, &[]);
        m.track_value(parent, LAYOUT, Subscriber { element: child, key: FLEX });
        m.track_value(parent, LAYOUT, Subscriber { element: child, key: FLEX });
        assert_eq!(m.subscribers(parent, LAYOUT).len(), 1);

        m.set_value(child, FLEX, "1".into(), "");
        m.release_element(child);
        assert!(m.subscribers(parent, LAYOUT).is_empty());
        assert!(!m.is_registered(child, FLEX));
        assert_eq!(m.get_value(child, FLEX), None);
        assert_eq!(m.pending_events(), 0);
    }

    #[test]
    fn test_trigger_update_single_key() {
        let mut m = marshaller();
        let el = element();
        m.init(el, LAYOUT, &[]);
        m.init(el, LAYOUT_GAP, &[]);
        m.set_value(el, LAYOUT, "row".into(), "");
        m.set_value(el, LAYOUT_GAP, "5px".into(), "");
        drain(&mut m);

        m.trigger_update(el, Some(LAYOUT_GAP));
        assert_eq!(drain(&mut m), vec![MarshalEvent::Update {
            element: el,
            key: LAYOUT_GAP,
            value: Some("5px".into()),
        }]);

        m.trigger_update(el, None);
        assert_eq!(drain(&mut m).len(), 2);
    }
}
