//! # Stargaze
//! The core of a small single-page fan site: a responsive style resolver
//! plus the page-state objects around it (device tracking, locale, the
//! background-music unlock puzzle).
//!
//! The centerpiece is the style resolver. From the live viewport and a
//! static [`Theme`](theme::Theme) table it computes concrete inline-style
//! values for each named visual element, bucketing the viewport into a
//! discrete aspect ratio and applying that bucket's adjustment profile:
//!
//! ```rust
//! use stargaze::resolver::{self, compute_scale};
//! use stargaze::responsive::DeviceClass;
//! use stargaze::screen::Viewport;
//! use stargaze::style::StyleProp;
//! use stargaze::theme::Theme;
//!
//! let theme = Theme::default();
//!
//! // A 16:10 display compresses the page vertically; image widths shrink
//! // and a scaleY lands on the transform.
//! let viewport = Viewport::new(1920.0, 1200.0);
//! let style = resolver::image_style(&theme, "muyang", DeviceClass::Desktop, viewport);
//! assert_eq!(style.render(StyleProp::Width).unwrap(), "22.5vw");
//! assert_eq!(
//!     style.render(StyleProp::Transform).unwrap(),
//!     "rotate(20deg) scale(4.5) scaleY(1.1)"
//! );
//!
//! // Density-aware scaling for high-DPI screens.
//! assert_eq!(compute_scale(1.0, 2.0, 1024.0, None), 0.8);
//! ```
//!
//! Resolution is pure and synchronous: the same inputs always produce the
//! same style, so callers re-run it freely on (debounced) resize events.
//! Style values render as CSS strings for whatever inline-style consumer
//! the shell uses.
//!
//! Page state (language, music, puzzle, click-texts, device) lives in
//! explicit context objects created at startup. They communicate over an
//! [`EventBus`](context::EventBus) and reach the outside world only
//! through small traits: [`Storage`](storage::Storage) for persistence and
//! [`AudioSink`](music::AudioSink) for playback.

pub mod clickpop;
pub mod context;
pub mod lang;
pub mod music;
pub mod puzzle;
pub mod resolver;
pub mod responsive;
pub mod screen;
pub mod storage;
pub mod style;
pub mod theme;
pub mod unit;

pub use clickpop::ClickPopContext;
pub use context::{EventBus, PageEvent, Publisher, SubscriptionId};
pub use lang::{LanguageContext, Locale};
pub use music::{AudioSink, MusicContext};
pub use puzzle::PuzzleContext;
pub use resolver::{AdjustOptions, apply_aspect_adjustment, compute_scale, countdown_style, image_style};
pub use responsive::{AspectRatio, DeviceClass, RatioSet, classify};
pub use screen::{DeviceKind, DeviceMonitor, ResizeDebouncer, Viewport, detect_device};
pub use storage::{MemoryStorage, Storage};
pub use style::{ResolvedStyle, StyleProp, StyleValue, TransformList, TransformOp};
pub use theme::{AdjustmentProfile, ElementConfig, Theme};
pub use unit::{CssLength, Pct, Px, UnitExt, Vw};
