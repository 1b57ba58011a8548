//! Visual host boundary — the visual-tree capabilities a drag session needs.
//!
//! The drag core never talks to a concrete document model. Everything it reads
//! (inline and computed styles, box metrics, scroll offsets) and everything it
//! writes (style declarations, the session marker attribute, event
//! subscriptions) goes through [`VisualHost`].

#![forbid(unsafe_code)]

pub mod headless;
pub mod mutation;
pub mod style_attr;

pub use headless::HeadlessHost;
pub use mutation::StyleMutation;

use core::fmt;
use core::ops::{Add, AddAssign, Sub};

/// A 64-bit stable key for nodes in the host's visual tree.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct NodeKey(pub u64);

impl NodeKey {
    /// The document root (always present).
    pub const ROOT: Self = Self(0);
}

impl fmt::Display for NodeKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "node#{}", self.0)
    }
}

/// A position in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Coordinate {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Coordinate {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Coordinate {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Layout box of a node relative to its offset parent, border box included.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoxMetrics {
    pub offset_left: f64,
    pub offset_top: f64,
    pub offset_width: f64,
    pub offset_height: f64,
}

/// Viewport sizes used for `position: fixed` and viewport-relative units.
///
/// `client_*` is the document element's client box, `inner_*` the window's
/// inner size (which includes scrollbars).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportMetrics {
    pub client_width: f64,
    pub client_height: f64,
    pub inner_width: f64,
    pub inner_height: f64,
}

impl ViewportMetrics {
    /// Width of the initial containing block.
    #[inline]
    pub fn width(&self) -> f64 {
        self.client_width.max(self.inner_width)
    }

    /// Height of the initial containing block.
    #[inline]
    pub fn height(&self) -> f64 {
        self.client_height.max(self.inner_height)
    }
}

/// Pointer events a drag session subscribes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Press,
    Move,
    Release,
}

impl PointerEventKind {
    /// DOM event type name.
    pub const fn event_name(self) -> &'static str {
        match self {
            Self::Press => "mousedown",
            Self::Move => "mousemove",
            Self::Release => "mouseup",
        }
    }
}

/// A pointer event in viewport (client) coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub client: Coordinate,
}

impl PointerEvent {
    #[inline]
    pub const fn new(kind: PointerEventKind, client_x: f64, client_y: f64) -> Self {
        Self {
            kind,
            client: Coordinate::new(client_x, client_y),
        }
    }
}

/// Handle returned by [`VisualHost::listen`], used to unsubscribe.
///
/// Ordered by creation, so hosts can notify listeners in subscription order.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct ListenerId(pub u64);

/// Document-level `selectstart` behavior, for hosts without `user-select`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectStartHook {
    /// Whatever the document does by default.
    #[default]
    Default,
    /// Cancel every selection start.
    Suppress,
}

/// Capabilities of the visual tree that hosts a draggable element.
///
/// Style names are CSS property names (`border-top-width`, `-webkit-transform`).
/// Values are CSS text as the host would serialize them.
pub trait VisualHost {
    /// The document element; document-level listeners live here.
    fn document_root(&self) -> NodeKey;

    fn parent(&self, node: NodeKey) -> Option<NodeKey>;

    /// Nearest ancestor establishing the containing block, if any.
    fn offset_parent(&self, node: NodeKey) -> Option<NodeKey>;

    /// Inline style value, empty when not set.
    fn style_property(&self, node: NodeKey, name: &str) -> String;

    /// Set one inline declaration. An empty value removes it.
    ///
    /// # Errors
    /// Returns an error if the host rejects the write.
    fn set_style_property(&mut self, node: NodeKey, name: &str, value: &str)
    -> anyhow::Result<()>;

    /// The whole inline style text.
    fn style_text(&self, node: NodeKey) -> String;

    /// Replace the whole inline style text.
    ///
    /// # Errors
    /// Returns an error if the host rejects the write.
    fn set_style_text(&mut self, node: NodeKey, text: &str) -> anyhow::Result<()>;

    /// Resolved value of a property under the current layout.
    fn computed_style(&self, node: NodeKey, name: &str) -> String;

    fn attribute(&self, node: NodeKey, name: &str) -> Option<String>;

    /// # Errors
    /// Returns an error if the host rejects the write.
    fn set_attribute(&mut self, node: NodeKey, name: &str, value: &str) -> anyhow::Result<()>;

    /// # Errors
    /// Returns an error if the host rejects the write.
    fn remove_attribute(&mut self, node: NodeKey, name: &str) -> anyhow::Result<()>;

    /// Subscribe to a pointer event on `node`.
    fn listen(&mut self, node: NodeKey, kind: PointerEventKind) -> ListenerId;

    /// Drop a subscription. Unknown ids are ignored.
    fn unlisten(&mut self, listener: ListenerId);

    fn box_metrics(&self, node: NodeKey) -> BoxMetrics;

    fn viewport(&self) -> ViewportMetrics;

    /// Current viewport scroll offset.
    fn scroll_offset(&self) -> Coordinate;

    /// Whether the host's style object knows this (possibly prefixed) property.
    fn supports_property(&self, name: &str) -> bool;

    /// Install a document `selectstart` hook, returning the previous one.
    fn replace_select_start_hook(&mut self, hook: SelectStartHook) -> SelectStartHook;
}
