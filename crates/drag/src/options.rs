use drag_host::NodeKey;

/// Options for [`crate::DragContext::begin_draggable`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DragOptions {
    /// Node whose press starts a drag. Defaults to the target itself.
    pub handle: Option<NodeKey>,
}

impl DragOptions {
    pub const fn new() -> Self {
        Self { handle: None }
    }

    /// Start drags from `handle` instead of the target.
    #[must_use]
    pub const fn handle(mut self, handle: NodeKey) -> Self {
        self.handle = Some(handle);
        self
    }
}
