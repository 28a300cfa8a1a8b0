//! Analytics

use std::fmt;

use tracing::info;

/// User actions worth reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsAction {
    /// Switched between light and dark mode.
    ToggleColorMode,
    /// Opened the about dialog.
    OpenModal,
    /// Followed the donation link.
    AddToCart,
    /// Shared the calculator.
    Share,
}

impl AnalyticsAction {
    /// Event name as sent to the analytics backend.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ToggleColorMode => "toggle_color_mode",
            Self::OpenModal => "open_modal",
            Self::AddToCart => "add_to_cart",
            Self::Share => "share",
        }
    }
}

impl fmt::Display for AnalyticsAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fire-and-forget analytics sink.
pub trait AnalyticsSink {
    /// Record a page view.
    fn record_pageview(&self, url: &str);

    /// Record a user action.
    fn record_event(&self, action: AnalyticsAction);
}

/// Sink emitting analytics as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAnalytics;

impl AnalyticsSink for TracingAnalytics {
    fn record_pageview(&self, url: &str) {
        info!(target: "cashbacc::analytics", url, "pageview");
    }

    fn record_event(&self, action: AnalyticsAction) {
        info!(target: "cashbacc::analytics", action = action.as_str(), "event");
    }
}
