//! Usage accounting module
//!
//! Records usage events from generation and embedding calls and exposes
//! running per-category token totals.

pub mod event;
pub mod observer;
pub mod recorder;

pub use event::{UsageCategory, UsageEvent, UsageSummary};
pub use observer::{NullObserver, UsageObserver};
pub use recorder::UsageRecorder;
