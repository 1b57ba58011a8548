//! In-memory visual host.
//!
//! `HeadlessHost` keeps a small node arena with inline styles, computed-style
//! overrides and box metrics supplied by the caller. It performs no layout:
//! metrics change only when the embedder says so. Inline declarations win over
//! computed overrides, which win over the built-in initial values.

use std::collections::{BTreeMap, HashMap, HashSet};

use anyhow::{Result, anyhow};
use log::trace;

use crate::style_attr::InlineStyle;
use crate::{
    BoxMetrics, Coordinate, ListenerId, NodeKey, PointerEventKind, SelectStartHook,
    ViewportMetrics, VisualHost,
};

/// Root font size used when nothing in the ancestry sets one.
const INITIAL_FONT_SIZE: &str = "16px";

/// Properties a modern engine exposes unprefixed.
const DEFAULT_SUPPORTED: [&str; 3] = ["user-select", "transform", "transition"];

#[derive(Clone, Debug, Default)]
struct NodeData {
    parent: Option<NodeKey>,
    offset_parent: Option<NodeKey>,
    inline: InlineStyle,
    computed: HashMap<String, String>,
    attributes: HashMap<String, String>,
    metrics: BoxMetrics,
}

#[derive(Clone, Debug)]
pub struct HeadlessHost {
    nodes: Vec<NodeData>,
    listeners: BTreeMap<ListenerId, (NodeKey, PointerEventKind)>,
    next_listener: u64,
    viewport: ViewportMetrics,
    scroll: Coordinate,
    supported: HashSet<String>,
    select_start: SelectStartHook,
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessHost {
    /// A host holding only the document root, with a 1024x768 viewport.
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData::default()],
            listeners: BTreeMap::new(),
            next_listener: 1,
            viewport: ViewportMetrics {
                client_width: 1024.0,
                client_height: 768.0,
                inner_width: 1024.0,
                inner_height: 768.0,
            },
            scroll: Coordinate::ORIGIN,
            supported: DEFAULT_SUPPORTED.iter().map(|name| (*name).to_owned()).collect(),
            select_start: SelectStartHook::Default,
        }
    }

    /// Append a node under `parent`. Its offset parent starts as `parent`.
    pub fn append_child(&mut self, parent: NodeKey) -> NodeKey {
        let key = NodeKey(self.nodes.len() as u64);
        self.nodes.push(NodeData {
            parent: Some(parent),
            offset_parent: Some(parent),
            ..NodeData::default()
        });
        key
    }

    pub fn set_offset_parent(&mut self, node: NodeKey, offset_parent: Option<NodeKey>) {
        if let Some(data) = self.node_mut(node) {
            data.offset_parent = offset_parent;
        }
    }

    pub fn set_box_metrics(&mut self, node: NodeKey, metrics: BoxMetrics) {
        if let Some(data) = self.node_mut(node) {
            data.metrics = metrics;
        }
    }

    /// Override the computed value of a property (what a stylesheet would produce).
    pub fn set_computed(&mut self, node: NodeKey, name: &str, value: &str) {
        if let Some(data) = self.node_mut(node) {
            data.computed
                .insert(name.to_ascii_lowercase(), value.to_owned());
        }
    }

    pub fn set_viewport(&mut self, viewport: ViewportMetrics) {
        self.viewport = viewport;
    }

    pub fn set_scroll_offset(&mut self, scroll: Coordinate) {
        self.scroll = scroll;
    }

    /// Replace the set of property names `supports_property` accepts.
    pub fn set_supported_properties<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supported = names.into_iter().map(Into::into).collect();
    }

    pub fn select_start_hook(&self) -> SelectStartHook {
        self.select_start
    }

    /// Number of live subscriptions.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Listeners that would fire for a `kind` event targeted at `target`, in
    /// bubbling order (target first, document root last).
    pub fn dispatch(&self, target: NodeKey, kind: PointerEventKind) -> Vec<(NodeKey, ListenerId)> {
        let mut out = Vec::new();
        let mut current = Some(target);
        while let Some(node) = current {
            for (id, &(listened_node, listened_kind)) in &self.listeners {
                if listened_node == node && listened_kind == kind {
                    out.push((node, *id));
                }
            }
            current = self.parent(node);
        }
        trace!("dispatch {} on {target}: {} listener(s)", kind.event_name(), out.len());
        out
    }

    fn node(&self, node: NodeKey) -> Option<&NodeData> {
        usize::try_from(node.0)
            .ok()
            .and_then(|index| self.nodes.get(index))
    }

    fn node_mut(&mut self, node: NodeKey) -> Option<&mut NodeData> {
        usize::try_from(node.0)
            .ok()
            .and_then(|index| self.nodes.get_mut(index))
    }

    fn node_mut_or_err(&mut self, node: NodeKey) -> Result<&mut NodeData> {
        self.node_mut(node)
            .ok_or_else(|| anyhow!("no such node: {node}"))
    }

    /// Initial value of a property when neither inline nor computed override sets it.
    fn initial_value(&self, node: NodeKey, name: &str) -> String {
        match name {
            "position" => "static".to_owned(),
            "top" | "right" | "bottom" | "left" | "width" | "height" => "auto".to_owned(),
            "transform" | "-webkit-transform" | "-moz-transform" | "-ms-transform" => {
                "none".to_owned()
            }
            "font-size" => self
                .parent(node)
                .map_or_else(|| INITIAL_FONT_SIZE.to_owned(), |parent| {
                    self.computed_style(parent, name)
                }),
            _ if name.starts_with("padding-")
                || name.starts_with("margin-")
                || (name.starts_with("border-") && name.ends_with("-width")) =>
            {
                "0px".to_owned()
            }
            _ => String::new(),
        }
    }
}

impl VisualHost for HeadlessHost {
    fn document_root(&self) -> NodeKey {
        NodeKey::ROOT
    }

    fn parent(&self, node: NodeKey) -> Option<NodeKey> {
        self.node(node).and_then(|data| data.parent)
    }

    fn offset_parent(&self, node: NodeKey) -> Option<NodeKey> {
        self.node(node).and_then(|data| data.offset_parent)
    }

    fn style_property(&self, node: NodeKey, name: &str) -> String {
        self.node(node)
            .and_then(|data| data.inline.get(name))
            .unwrap_or_default()
            .to_owned()
    }

    fn set_style_property(&mut self, node: NodeKey, name: &str, value: &str) -> Result<()> {
        trace!("{node}: set {name}: {value}");
        self.node_mut_or_err(node)?.inline.set(name, value);
        Ok(())
    }

    fn style_text(&self, node: NodeKey) -> String {
        self.node(node)
            .map(|data| data.inline.to_css_text())
            .unwrap_or_default()
    }

    fn set_style_text(&mut self, node: NodeKey, text: &str) -> Result<()> {
        self.node_mut_or_err(node)?.inline = InlineStyle::parse(text);
        Ok(())
    }

    fn computed_style(&self, node: NodeKey, name: &str) -> String {
        let name = name.to_ascii_lowercase();
        let Some(data) = self.node(node) else {
            return String::new();
        };
        if let Some(value) = data.inline.get(&name) {
            return value.to_owned();
        }
        if let Some(value) = data.computed.get(&name) {
            return value.clone();
        }
        self.initial_value(node, &name)
    }

    fn attribute(&self, node: NodeKey, name: &str) -> Option<String> {
        self.node(node)
            .and_then(|data| data.attributes.get(name))
            .cloned()
    }

    fn set_attribute(&mut self, node: NodeKey, name: &str, value: &str) -> Result<()> {
        self.node_mut_or_err(node)?
            .attributes
            .insert(name.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_attribute(&mut self, node: NodeKey, name: &str) -> Result<()> {
        self.node_mut_or_err(node)?.attributes.remove(name);
        Ok(())
    }

    fn listen(&mut self, node: NodeKey, kind: PointerEventKind) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.insert(id, (node, kind));
        id
    }

    fn unlisten(&mut self, listener: ListenerId) {
        self.listeners.remove(&listener);
    }

    fn box_metrics(&self, node: NodeKey) -> BoxMetrics {
        self.node(node).map(|data| data.metrics).unwrap_or_default()
    }

    fn viewport(&self) -> ViewportMetrics {
        self.viewport
    }

    fn scroll_offset(&self) -> Coordinate {
        self.scroll
    }

    fn supports_property(&self, name: &str) -> bool {
        self.supported.contains(name)
    }

    fn replace_select_start_hook(&mut self, hook: SelectStartHook) -> SelectStartHook {
        core::mem::replace(&mut self.select_start, hook)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_wins_over_computed_override() -> Result<()> {
        let mut host = HeadlessHost::new();
        let node = host.append_child(NodeKey::ROOT);
        host.set_computed(node, "top", "10px");
        assert_eq!(host.computed_style(node, "top"), "10px");
        host.set_style_property(node, "top", "3px")?;
        assert_eq!(host.computed_style(node, "top"), "3px");
        assert_eq!(host.computed_style(node, "bottom"), "auto");
        Ok(())
    }

    #[test]
    fn font_size_inherits_from_ancestors() {
        let mut host = HeadlessHost::new();
        let parent = host.append_child(NodeKey::ROOT);
        let child = host.append_child(parent);
        assert_eq!(host.computed_style(child, "font-size"), "16px");
        host.set_computed(parent, "font-size", "20px");
        assert_eq!(host.computed_style(child, "font-size"), "20px");
    }

    #[test]
    fn dispatch_bubbles_to_root() {
        let mut host = HeadlessHost::new();
        let parent = host.append_child(NodeKey::ROOT);
        let child = host.append_child(parent);
        let on_parent = host.listen(parent, PointerEventKind::Press);
        let on_root = host.listen(NodeKey::ROOT, PointerEventKind::Press);
        host.listen(NodeKey::ROOT, PointerEventKind::Move);

        let fired = host.dispatch(child, PointerEventKind::Press);
        assert_eq!(fired, vec![(parent, on_parent), (NodeKey::ROOT, on_root)]);

        host.unlisten(on_parent);
        assert_eq!(host.dispatch(child, PointerEventKind::Press).len(), 1);
        assert_eq!(host.listener_count(), 2);
    }

    #[test]
    fn writes_to_unknown_nodes_fail() {
        let mut host = HeadlessHost::new();
        assert!(host.set_style_property(NodeKey(42), "top", "0").is_err());
        assert_eq!(host.style_text(NodeKey(42)), "");
    }

    #[test]
    fn select_start_hook_swaps() {
        let mut host = HeadlessHost::new();
        let previous = host.replace_select_start_hook(SelectStartHook::Suppress);
        assert_eq!(previous, SelectStartHook::Default);
        assert_eq!(host.select_start_hook(), SelectStartHook::Suppress);
    }
}
