//! Viewport state, device detection, and resize coalescing.
//!
//! The viewport is read from the embedding environment on demand and passed
//! into the resolver by value; nothing here assumes push notifications
//! beyond a resize event the caller wires up.

use std::time::{Duration, Instant};

use crate::context::{EventBus, PageEvent};
use crate::responsive::{AspectRatio, DeviceClass, classify};

/// A snapshot of the live viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub pixel_ratio: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            pixel_ratio: 1.0,
        }
    }

    #[must_use]
    pub fn with_pixel_ratio(mut self, pixel_ratio: f64) -> Self {
        self.pixel_ratio = pixel_ratio;
        self
    }

    pub fn ratio(&self) -> f64 {
        self.width / self.height
    }

    pub fn aspect_ratio(&self) -> AspectRatio {
        classify(self.width, self.height)
    }
}

/// What kind of device the page is showing on. Tablets use the mobile
/// styling tables but are tracked separately for detection purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    Desktop,
    Tablet,
    Mobile,
}

impl DeviceKind {
    /// The styling class this device uses.
    pub fn class(self) -> DeviceClass {
        match self {
            DeviceKind::Desktop => DeviceClass::Desktop,
            DeviceKind::Tablet | DeviceKind::Mobile => DeviceClass::Mobile,
        }
    }
}

const MOBILE_UA_MARKERS: &[&str] = &[
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

/// Width threshold below which an unrecognized user agent still counts as
/// mobile.
const MOBILE_WIDTH: f64 = 768.0;

/// Classifies a device from viewport width and user-agent heuristics.
///
/// User-agent matching is case-insensitive substring matching; an Android
/// agent that also reports `Mobile` counts as a tablet once the viewport is
/// tablet-sized, mirroring how the page has always behaved.
pub fn detect_device(width: f64, user_agent: &str) -> DeviceKind {
    let ua = user_agent.to_ascii_lowercase();

    let mobile_ua = MOBILE_UA_MARKERS.iter().any(|marker| ua.contains(marker));
    let tablet_ua = ua.contains("ipad")
        || ua
            .find("android")
            .is_some_and(|at| ua[at..].contains("mobile"));
    let tablet = tablet_ua && width >= MOBILE_WIDTH;

    if mobile_ua && !tablet {
        DeviceKind::Mobile
    } else if tablet {
        DeviceKind::Tablet
    } else if width <= MOBILE_WIDTH {
        DeviceKind::Mobile
    } else {
        DeviceKind::Desktop
    }
}

/// App-scoped device tracker. Re-detects on every viewport update and fans
/// the result out over the [`EventBus`].
pub struct DeviceMonitor {
    kind: DeviceKind,
    width: f64,
    bus: EventBus,
}

impl DeviceMonitor {
    pub fn new(width: f64, user_agent: &str, bus: EventBus) -> Self {
        let kind = detect_device(width, user_agent);
        log::debug!("device detected: {kind:?}, viewport width {width}px");
        Self { kind, width, bus }
    }

    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    pub fn class(&self) -> DeviceClass {
        self.kind.class()
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// Re-runs detection, typically from a (debounced) resize handler.
    /// Every update notifies subscribers, changed or not; consumers that
    /// only care about transitions filter on their side.
    pub fn update(&mut self, width: f64, user_agent: &str) {
        self.width = width;
        self.kind = detect_device(width, user_agent);
        log::debug!("device detected: {:?}, viewport width {width}px", self.kind);
        self.bus.emit(PageEvent::DeviceChanged {
            kind: self.kind,
            class: self.kind.class(),
        });
    }
}

/// Trailing-edge coalescing for resize bursts.
///
/// Every recomputation is idempotent, so debouncing is purely a
/// performance measure: bursts of resize events collapse into a single
/// recomputation once no event has arrived for the delay window. Expressed
/// over explicit [`Instant`]s so it needs no timer to test.
#[derive(Debug, Clone)]
pub struct ResizeDebouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl ResizeDebouncer {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(100);

    pub fn new() -> Self {
        Self::with_delay(Self::DEFAULT_DELAY)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Records a resize event, pushing the deadline out.
    pub fn record(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Whether the coalesced recomputation is due. Consumes the deadline
    /// when it fires.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

impl Default for ResizeDebouncer {
    fn default() -> Self {
        Self::new()
    }
}
