//! Subscriptions a session holds, keyed by where and what they listen for.

use std::collections::HashMap;

use drag_host::{ListenerId, NodeKey, PointerEventKind, VisualHost};
use log::trace;

#[derive(Debug, Default)]
pub(crate) struct ListenerMap {
    owned: HashMap<(NodeKey, PointerEventKind), ListenerId>,
}

impl ListenerMap {
    /// Subscribe unless already subscribed to the same node and kind.
    pub(crate) fn listen<H>(&mut self, host: &mut H, node: NodeKey, kind: PointerEventKind)
    where
        H: VisualHost + ?Sized,
    {
        self.owned.entry((node, kind)).or_insert_with(|| {
            trace!("{node}: listen {}", kind.event_name());
            host.listen(node, kind)
        });
    }

    pub(crate) fn unlisten<H>(&mut self, host: &mut H, node: NodeKey, kind: PointerEventKind)
    where
        H: VisualHost + ?Sized,
    {
        if let Some(listener) = self.owned.remove(&(node, kind)) {
            trace!("{node}: unlisten {}", kind.event_name());
            host.unlisten(listener);
        }
    }

    pub(crate) fn unlisten_all<H>(&mut self, host: &mut H)
    where
        H: VisualHost + ?Sized,
    {
        for (_, listener) in self.owned.drain() {
            host.unlisten(listener);
        }
    }

    pub(crate) fn owns(&self, node: NodeKey, kind: PointerEventKind) -> bool {
        self.owned.contains_key(&(node, kind))
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.owned.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drag_host::HeadlessHost;

    #[test]
    fn listens_once_per_node_and_kind() {
        let mut host = HeadlessHost::new();
        let mut listeners = ListenerMap::default();
        listeners.listen(&mut host, NodeKey::ROOT, PointerEventKind::Move);
        listeners.listen(&mut host, NodeKey::ROOT, PointerEventKind::Move);
        listeners.listen(&mut host, NodeKey::ROOT, PointerEventKind::Release);
        assert_eq!(listeners.len(), 2);
        assert_eq!(host.listener_count(), 2);

        listeners.unlisten(&mut host, NodeKey::ROOT, PointerEventKind::Move);
        assert!(!listeners.owns(NodeKey::ROOT, PointerEventKind::Move));
        assert!(listeners.owns(NodeKey::ROOT, PointerEventKind::Release));

        listeners.unlisten_all(&mut host);
        assert_eq!(listeners.len(), 0);
        assert_eq!(host.listener_count(), 0);
    }
}
