//! Client-side presentation behavior for docnav pages.
//!
//! This crate provides:
//! - [`PresentationHook`]: re-runs a [`PageScan`] after each settled route change,
//!   dropping scans for routes that were superseded before their content committed
//! - [`ZoomScan`]: idempotent image zoom attachment
//! - [`WidgetRegistry`]: append-only named widgets, immutable after startup
//!
//! # Example
//!
//! ```
//! use dn_hooks::{CommittedPage, PageImage, PresentationHook, ScanOutcome, ZoomOptions, ZoomScan};
//!
//! let options = ZoomOptions::parse(".main img", "var(--vp-c-bg)").unwrap();
//! let mut hook = PresentationHook::new(ZoomScan::new(options));
//!
//! let ticket = hook.mount("/software/start");
//! let images = vec![PageImage::new("diagram.png", "main")];
//! let page = CommittedPage::new(1, "/software/start", images);
//! assert!(matches!(hook.content_committed(ticket, &page), ScanOutcome::Ran(_)));
//! ```

mod hook;
mod page;
mod scan;
mod widget;
mod zoom;

pub use hook::{HookStats, PresentationHook, ScanOutcome, ScanTicket};
pub use page::{CommittedPage, PageImage};
pub use scan::{PageScan, ScanError, ScanReport};
pub use widget::{
    Expansion, TemplateWidget, Widget, WidgetAttrs, WidgetError, WidgetRegistry,
    WidgetRegistryBuilder,
};
pub use zoom::{ZoomOptions, ZoomScan};
