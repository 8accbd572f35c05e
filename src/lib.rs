//! Weather forecast widget
//!
//! Fetches a city forecast payload, classifies each time slot into an icon
//! category and time-of-day period, and hands a structured view model to a
//! render sink.

pub mod classifier;
pub mod config;
pub mod constants;
pub mod fetch;
pub mod formatters;
pub mod models;
pub mod pipeline;
pub mod service;

pub use classifier::{classify_icon, classify_period, IconCategory, IconStyleTheme, PeriodLabel};
pub use config::WidgetConfig;
pub use fetch::{FetchResponse, Fetcher, HttpFetcher, TransportError};
pub use formatters::{present, JsonRenderer, RenderSink, TextRenderer};
pub use models::{ClassifiedSlot, ViewModel};
pub use pipeline::{MinimumSlotPolicy, Pipeline, PipelineError, PipelineState};
pub use service::WidgetService;
