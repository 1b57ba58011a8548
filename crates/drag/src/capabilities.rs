//! One-time detection of the style properties a host supports.
//!
//! Three properties matter for dragging and may only exist vendor-prefixed on
//! older engines: `user-select`, `transform` and `transition`. Detection runs
//! once and produces an immutable table.

use drag_host::VisualHost;
use log::info;
use once_cell::sync::OnceCell;

const USER_SELECT: [&str; 4] = [
    "user-select",
    "-webkit-user-select",
    "-moz-user-select",
    "-ms-user-select",
];
const TRANSFORM: [&str; 4] = [
    "transform",
    "-webkit-transform",
    "-moz-transform",
    "-ms-transform",
];
const TRANSITION: [&str; 4] = [
    "transition",
    "-webkit-transition",
    "-moz-transition",
    "-ms-transition",
];

static PROCESS_CAPABILITIES: OnceCell<Capabilities> = OnceCell::new();

/// How a session moves its element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TranslateMode {
    /// Rewrite the translation of the element's transform matrix.
    Transform,
    /// Rewrite `top`/`left`.
    Offset,
}

/// Property names to use for each capability, `None` when unsupported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
    pub user_select: Option<&'static str>,
    pub transform: Option<&'static str>,
    pub transition: Option<&'static str>,
}

impl Capabilities {
    /// Probe `host`, preferring unprefixed names.
    pub fn detect<H>(host: &H) -> Self
    where
        H: VisualHost + ?Sized,
    {
        let capabilities = Self {
            user_select: first_supported(host, &USER_SELECT),
            transform: first_supported(host, &TRANSFORM),
            transition: first_supported(host, &TRANSITION),
        };
        info!(
            "style capabilities: user-select={:?} transform={:?} transition={:?} -> {:?} mode",
            capabilities.user_select,
            capabilities.transform,
            capabilities.transition,
            capabilities.mode()
        );
        capabilities
    }

    /// The process-wide table, detected against `host` on first use.
    pub fn global<H>(host: &H) -> Self
    where
        H: VisualHost + ?Sized,
    {
        *PROCESS_CAPABILITIES.get_or_init(|| Self::detect(host))
    }

    /// A host without transforms degrades to offset positioning.
    pub const fn mode(&self) -> TranslateMode {
        if self.transform.is_some() {
            TranslateMode::Transform
        } else {
            TranslateMode::Offset
        }
    }

    /// The same table with transforms ignored, forcing offset mode.
    #[must_use]
    pub const fn without_transform(mut self) -> Self {
        self.transform = None;
        self
    }
}

fn first_supported<H>(host: &H, candidates: &'static [&'static str]) -> Option<&'static str>
where
    H: VisualHost + ?Sized,
{
    candidates
        .iter()
        .copied()
        .find(|name| host.supports_property(name))
}
