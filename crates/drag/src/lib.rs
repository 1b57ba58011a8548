//! Draggable elements — press, move and release sessions over a visual host.
//!
//! [`DragContext::begin_draggable`] attaches a [`Session`] to an element. On
//! press the session reads where the element is (its transform translation, or
//! its `top`/`left` after normalizing the positioning scheme), then follows the
//! pointer, compensating for viewport scrolling, until release.
//!
//! ```text
//! Idle --press(handle)--> Active --move(document)--> Active
//!   ^                        |
//!   +----release(document)---+
//! ```

#![forbid(unsafe_code)]

pub mod capabilities;
pub mod error;
mod listeners;
pub mod options;
pub mod session;

pub use capabilities::{Capabilities, TranslateMode};
pub use error::DragError;
pub use options::DragOptions;
pub use session::{SESSION_MARKER, Session, SessionId};

pub use drag_host::{
    BoxMetrics, Coordinate, HeadlessHost, ListenerId, NodeKey, PointerEvent, PointerEventKind,
    SelectStartHook, ViewportMetrics, VisualHost,
};
pub use drag_position::{Normalized, PositionScheme, normalize};
pub use drag_transforms::{TransformMatrix, read_translation, write_translation};
pub use drag_values_units::{Property, StyleValue, resolve_absolute, resolve_absolute_many};

/// Factory for sessions sharing one capability table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragContext {
    capabilities: Capabilities,
}

impl DragContext {
    /// A context using the process-wide capabilities, detected against `host`
    /// the first time any context is created.
    pub fn new<H>(host: &H) -> Self
    where
        H: VisualHost + ?Sized,
    {
        Self {
            capabilities: Capabilities::global(host),
        }
    }

    pub const fn with_capabilities(capabilities: Capabilities) -> Self {
        Self { capabilities }
    }

    pub const fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    pub const fn mode(&self) -> TranslateMode {
        self.capabilities.mode()
    }

    /// Make `target` draggable.
    ///
    /// # Errors
    /// [`DragError::DuplicateSession`] if `target` already has a live session,
    /// or the host's error if a write fails.
    pub fn begin_draggable<H>(
        &self,
        host: &mut H,
        target: NodeKey,
        options: DragOptions,
    ) -> Result<Session, DragError>
    where
        H: VisualHost + ?Sized,
    {
        Session::initialize(host, self.capabilities, target, options)
    }
}

/// Make `target` draggable with the process-wide capabilities.
///
/// # Errors
/// See [`DragContext::begin_draggable`].
pub fn begin_draggable<H>(
    host: &mut H,
    target: NodeKey,
    options: DragOptions,
) -> Result<Session, DragError>
where
    H: VisualHost + ?Sized,
{
    DragContext::new(host).begin_draggable(host, target, options)
}
