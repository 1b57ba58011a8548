//! The drag session state machine.
//!
//! A session is `Idle` until its handle is pressed, `Active` while the pointer
//! moves, and `Idle` again on release. The host delivers events; the embedder
//! routes each one to [`Session::handle_event`] together with the node whose
//! listener fired.

use core::fmt;
use core::mem;
use core::sync::atomic::{AtomicU64, Ordering};

use drag_host::{
    Coordinate, NodeKey, PointerEvent, PointerEventKind, SelectStartHook, VisualHost,
};
use drag_position::normalize;
use drag_transforms::{TransformMatrix, read_translation, write_translation};
use drag_values_units::StyleValue;
use tracing::{debug, trace, warn};

use crate::capabilities::{Capabilities, TranslateMode};
use crate::error::DragError;
use crate::listeners::ListenerMap;
use crate::options::DragOptions;

/// Attribute marking an element as owned by a live session.
pub const SESSION_MARKER: &str = "data-drag-id";

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique session identifier, stored in [`SESSION_MARKER`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct SessionId(pub u64);

impl SessionId {
    fn next() -> Self {
        Self(NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Inline style text captured when the session was created.
#[derive(Clone, Debug)]
struct SavedStyles {
    target: String,
    document: String,
}

/// Bookkeeping for one press..release cycle.
#[derive(Clone, Debug)]
struct ActiveDrag {
    /// Pointer position at the previous event.
    cursor: Coordinate,
    /// Viewport scroll at the previous event.
    scroll: Coordinate,
    /// Inline transition to put back; `None` without a transition property.
    saved_transition: Option<String>,
    /// Hook to reinstall when selection was locked through `selectstart`.
    saved_select_start: Option<SelectStartHook>,
    /// Matrix being rewritten in transform mode.
    matrix: Option<TransformMatrix>,
}

#[derive(Clone, Debug, Default)]
enum DragState {
    #[default]
    Idle,
    Active(ActiveDrag),
}

/// A draggable element.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    target: NodeKey,
    handle: NodeKey,
    capabilities: Capabilities,
    state: DragState,
    /// Translation or `(left, top)` of the target, re-read on every press.
    offset: Option<Coordinate>,
    saved: SavedStyles,
    listeners: ListenerMap,
    disposed: bool,
}

impl Session {
    /// Mark `target`, save its styles and subscribe to presses on the handle.
    pub(crate) fn initialize<H>(
        host: &mut H,
        capabilities: Capabilities,
        target: NodeKey,
        options: DragOptions,
    ) -> Result<Self, DragError>
    where
        H: VisualHost + ?Sized,
    {
        if let Some(existing) = host.attribute(target, SESSION_MARKER) {
            return Err(DragError::DuplicateSession { target, existing });
        }
        let id = SessionId::next();
        host.set_attribute(target, SESSION_MARKER, &id.to_string())?;

        let saved = SavedStyles {
            target: host.style_text(target),
            document: host.style_text(host.document_root()),
        };
        host.set_style_property(target, "cursor", "default")?;

        let handle = options.handle.unwrap_or(target);
        let mut listeners = ListenerMap::default();
        listeners.listen(host, handle, PointerEventKind::Press);

        debug!(session = %id, %target, %handle, mode = ?capabilities.mode(), "draggable");
        Ok(Self {
            id,
            target,
            handle,
            capabilities,
            state: DragState::Idle,
            offset: None,
            saved,
            listeners,
            disposed: false,
        })
    }

    pub const fn id(&self) -> SessionId {
        self.id
    }

    pub const fn target(&self) -> NodeKey {
        self.target
    }

    pub const fn handle(&self) -> NodeKey {
        self.handle
    }

    pub const fn mode(&self) -> TranslateMode {
        self.capabilities.mode()
    }

    pub const fn is_active(&self) -> bool {
        matches!(self.state, DragState::Active(_))
    }

    pub const fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Current offset: the translation in transform mode, `(left, top)` in
    /// offset mode. `None` until the first press.
    pub const fn offset(&self) -> Option<Coordinate> {
        self.offset
    }

    /// Feed an event whose listener fired on `current_target`.
    ///
    /// Returns `Ok(false)` when the event is not for this session: it is not
    /// subscribed to that node and kind, the state does not accept the event,
    /// or the session is disposed.
    ///
    /// # Errors
    /// Propagates host write failures.
    pub fn handle_event<H>(
        &mut self,
        host: &mut H,
        current_target: NodeKey,
        event: &PointerEvent,
    ) -> Result<bool, DragError>
    where
        H: VisualHost + ?Sized,
    {
        if self.disposed || !self.listeners.owns(current_target, event.kind) {
            return Ok(false);
        }
        match (event.kind, self.is_active()) {
            (PointerEventKind::Press, false) => self.start(host, event.client)?,
            (PointerEventKind::Move, true) => self.track(host, event.client)?,
            (PointerEventKind::Release, true) => self.stop(host)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn start<H>(&mut self, host: &mut H, cursor: Coordinate) -> Result<(), DragError>
    where
        H: VisualHost + ?Sized,
    {
        let root = host.document_root();
        let saved_select_start = self.lock_selection(host, root)?;
        let (anchor, matrix, saved_transition) = match self.prepare_target(host) {
            Ok(prepared) => prepared,
            Err(error) => {
                // Stay idle with the document as it was.
                if let Err(restore) = self.unlock_selection(host, root, saved_select_start) {
                    warn!(session = %self.id, error = %restore, "could not restore document style");
                }
                return Err(error);
            }
        };
        let scroll = host.scroll_offset();

        self.listeners.listen(host, root, PointerEventKind::Move);
        self.listeners.listen(host, root, PointerEventKind::Release);
        self.offset = Some(anchor);
        self.state = DragState::Active(ActiveDrag {
            cursor,
            scroll,
            saved_transition,
            saved_select_start,
            matrix,
        });
        debug!(
            session = %self.id,
            x = anchor.x,
            y = anchor.y,
            "drag started"
        );
        Ok(())
    }

    /// Pin the target for dragging. Returns the anchor, the matrix to rewrite
    /// in transform mode and the inline transition to restore.
    fn prepare_target<H>(
        &self,
        host: &mut H,
    ) -> Result<(Coordinate, Option<TransformMatrix>, Option<String>), DragError>
    where
        H: VisualHost + ?Sized,
    {
        host.set_style_property(self.target, "cursor", "move")?;

        let (anchor, matrix) = match self.capabilities.transform {
            Some(accessor) => {
                let read = read_translation(host, self.target, accessor);
                read.mutation.apply(host, self.target)?;
                (read.offset, Some(read.matrix))
            }
            None => {
                let normalized = normalize(host, self.target);
                normalized.mutation.apply(host, self.target)?;
                (normalized.anchor, None)
            }
        };

        let saved_transition = match self.capabilities.transition {
            Some(accessor) => {
                let previous = host.style_property(self.target, accessor);
                host.set_style_property(self.target, accessor, "none")?;
                Some(previous)
            }
            None => None,
        };
        Ok((anchor, matrix, saved_transition))
    }

    /// Disable text selection on the document. Returns the previous
    /// `selectstart` hook when the fallback had to be used.
    fn lock_selection<H>(
        &self,
        host: &mut H,
        root: NodeKey,
    ) -> Result<Option<SelectStartHook>, DragError>
    where
        H: VisualHost + ?Sized,
    {
        if let Some(accessor) = self.capabilities.user_select {
            host.set_style_property(root, accessor, "none")?;
            return Ok(None);
        }
        Ok(Some(host.replace_select_start_hook(SelectStartHook::Suppress)))
    }

    /// Undo [`Self::lock_selection`]: reinstall the `selectstart` hook and put
    /// back the document style captured at creation.
    fn unlock_selection<H>(
        &self,
        host: &mut H,
        root: NodeKey,
        saved_select_start: Option<SelectStartHook>,
    ) -> Result<(), DragError>
    where
        H: VisualHost + ?Sized,
    {
        if let Some(hook) = saved_select_start {
            host.replace_select_start_hook(hook);
        }
        host.set_style_text(root, &self.saved.document)?;
        Ok(())
    }

    fn track<H>(&mut self, host: &mut H, cursor: Coordinate) -> Result<(), DragError>
    where
        H: VisualHost + ?Sized,
    {
        let DragState::Active(drag) = &mut self.state else {
            return Ok(());
        };
        let scroll = host.scroll_offset();
        let delta = (cursor - drag.cursor) + (scroll - drag.scroll);
        drag.cursor = cursor;
        drag.scroll = scroll;

        let offset = self.offset.get_or_insert(Coordinate::ORIGIN);
        *offset += delta;
        let offset = *offset;
        trace!(session = %self.id, x = offset.x, y = offset.y, "drag moved");

        match (self.capabilities.transform, drag.matrix.as_mut()) {
            (Some(accessor), Some(matrix)) => {
                write_translation(host, self.target, accessor, matrix, offset)?;
            }
            _ => {
                let top = StyleValue::Px(offset.y).to_string();
                let left = StyleValue::Px(offset.x).to_string();
                host.set_style_property(self.target, "top", &top)?;
                host.set_style_property(self.target, "left", &left)?;
            }
        }
        Ok(())
    }

    fn stop<H>(&mut self, host: &mut H) -> Result<(), DragError>
    where
        H: VisualHost + ?Sized,
    {
        let DragState::Active(drag) = mem::take(&mut self.state) else {
            return Ok(());
        };
        let root = host.document_root();
        self.listeners.unlisten(host, root, PointerEventKind::Move);
        self.listeners.unlisten(host, root, PointerEventKind::Release);
        self.unlock_selection(host, root, drag.saved_select_start)?;

        host.set_style_property(self.target, "cursor", "default")?;
        if let (Some(accessor), Some(previous)) =
            (self.capabilities.transition, drag.saved_transition)
        {
            host.set_style_property(self.target, accessor, &previous)?;
        }
        debug!(session = %self.id, "drag stopped");
        Ok(())
    }

    /// Put the target's inline style back to what it was before the session.
    /// Listeners and the marker stay in place.
    ///
    /// # Errors
    /// Propagates host write failures.
    pub fn reset<H>(&self, host: &mut H) -> Result<(), DragError>
    where
        H: VisualHost + ?Sized,
    {
        host.set_style_text(self.target, &self.saved.target)?;
        Ok(())
    }

    /// Unsubscribe everything, remove the marker and reset the target's style.
    /// A drag in progress is abandoned and the document style restored. Later
    /// calls do nothing.
    ///
    /// # Errors
    /// Propagates host write failures.
    pub fn dispose<H>(&mut self, host: &mut H) -> Result<(), DragError>
    where
        H: VisualHost + ?Sized,
    {
        if self.disposed {
            return Ok(());
        }
        self.disposed = true;
        self.listeners.unlisten_all(host);
        if let DragState::Active(drag) = mem::take(&mut self.state) {
            let root = host.document_root();
            self.unlock_selection(host, root, drag.saved_select_start)?;
        }
        host.remove_attribute(self.target, SESSION_MARKER)?;
        self.reset(host)?;
        debug!(session = %self.id, target = %self.target, "disposed");
        Ok(())
    }
}
