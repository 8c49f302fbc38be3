//! Ticker Renderer
//!
//! Turns a price snapshot into the render model of the scrolling ticker strip.
//! The strip is the snapshot twice in a row; scrolling it from 0% to -50% and
//! starting over looks seamless because the second copy lands exactly where
//! the first one started.

use serde::Serialize;
use std::time::Duration;

use crate::config::TickerStyleConfig;
use crate::models::quote::{AssetQuote, QuoteOrigin};
use crate::services::price_feed::FeedView;

pub const TOOLTIP_MIN_PERCENT: f64 = 10.0;
pub const TOOLTIP_MAX_PERCENT: f64 = 90.0;

/// Palette entries usable in badge gradients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorToken {
    Orange,
    Yellow,
    Amber,
    Indigo,
    Purple,
    Teal,
    Slate,
    Sky,
    Blue,
    Pink,
    Rose,
    Gray,
}

impl ColorToken {
    pub fn css(self) -> &'static str {
        match self {
            ColorToken::Orange => "#f97316",
            ColorToken::Yellow => "#eab308",
            ColorToken::Amber => "#f59e0b",
            ColorToken::Indigo => "#6366f1",
            ColorToken::Purple => "#a855f7",
            ColorToken::Teal => "#14b8a6",
            ColorToken::Slate => "#64748b",
            ColorToken::Sky => "#0ea5e9",
            ColorToken::Blue => "#3b82f6",
            ColorToken::Pink => "#ec4899",
            ColorToken::Rose => "#f43f5e",
            ColorToken::Gray => "#6b7280",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Gradient {
    pub from: ColorToken,
    pub to: ColorToken,
}

impl Gradient {
    pub fn new(from: ColorToken, to: ColorToken) -> Self {
        Self { from, to }
    }

    pub fn css(&self) -> String {
        format!("linear-gradient(90deg, {}, {})", self.from.css(), self.to.css())
    }
}

/// Visual intensity derived from the 24h change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PulseStyle {
    FastPositive,
    SlowPositive,
    FastNegative,
    SlowNegative,
    None,
}

impl PulseStyle {
    pub fn from_change(change_percent_24h: f64) -> Self {
        if change_percent_24h > 5.0 {
            PulseStyle::FastPositive
        } else if change_percent_24h > 0.0 {
            PulseStyle::SlowPositive
        } else if change_percent_24h < -5.0 {
            PulseStyle::FastNegative
        } else if change_percent_24h < 0.0 {
            PulseStyle::SlowNegative
        } else {
            // Zero (and NaN)
            PulseStyle::None
        }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            PulseStyle::FastPositive => "pulse-fast-positive",
            PulseStyle::SlowPositive => "pulse-slow-positive",
            PulseStyle::FastNegative => "pulse-fast-negative",
            PulseStyle::SlowNegative => "pulse-slow-negative",
            PulseStyle::None => "",
        }
    }
}

/// Horizontal scroll of the duplicated strip
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrollAnimation {
    pub from_percent: f64,
    pub to_percent: f64,
    pub duration_secs: f64,
    pub timing: &'static str,
    pub infinite: bool,
}

impl ScrollAnimation {
    pub fn new(duration: Duration) -> Self {
        Self {
            from_percent: 0.0,
            to_percent: -50.0,
            duration_secs: duration.as_secs_f64(),
            timing: "linear",
            infinite: true,
        }
    }

    /// Translation of the strip `elapsed` after the animation started
    pub fn offset_percent_at(&self, elapsed: Duration) -> f64 {
        if self.duration_secs <= 0.0 {
            return self.from_percent;
        }
        let progress = (elapsed.as_secs_f64() % self.duration_secs) / self.duration_secs;
        self.from_percent + (self.to_percent - self.from_percent) * progress
    }
}

/// The strip contents: the list followed by itself
pub fn loop_items<T: Clone>(items: &[T]) -> Vec<T> {
    let mut looped = Vec::with_capacity(items.len() * 2);
    looped.extend_from_slice(items);
    looped.extend_from_slice(items);
    looped
}

/// Tooltip position as a percentage of container width
///
/// Only spreads out the first item or two; everything further right is
/// pinned to 90%.
pub fn tooltip_left_percent(display_index: usize) -> f64 {
    (TOOLTIP_MIN_PERCENT + display_index as f64 * 100.0).clamp(TOOLTIP_MIN_PERCENT, TOOLTIP_MAX_PERCENT)
}

/// Hover state of the strip
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TooltipState {
    pub active_symbol: Option<String>,
    pub display_index: Option<usize>,
}

impl TooltipState {
    /// Pointer entered the strip item at `index` (an index into the duplicated strip)
    pub fn pointer_enter(&mut self, index: usize, quotes: &[AssetQuote]) {
        if quotes.is_empty() {
            self.pointer_leave();
            return;
        }
        let display_index = index % quotes.len();
        self.active_symbol = Some(quotes[display_index].symbol.clone());
        self.display_index = Some(display_index);
    }

    pub fn pointer_leave(&mut self) {
        self.active_symbol = None;
        self.display_index = None;
    }

    pub fn is_active(&self) -> bool {
        self.active_symbol.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderState {
    Loading,
    ErrorWithoutData,
    Data,
}

impl RenderState {
    /// Any snapshot wins over a failed refresh
    pub fn select(view: &FeedView) -> Self {
        match (&view.snapshot, &view.last_error) {
            (Some(_), _) => RenderState::Data,
            (None, Some(_)) => RenderState::ErrorWithoutData,
            (None, None) => RenderState::Loading,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TickerItem {
    pub index: usize,
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change_percent_24h: f64,
    pub pulse: PulseStyle,
    pub pulse_class: &'static str,
    pub gradient: Gradient,
    pub gradient_css: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TooltipView {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change_percent_24h: f64,
    pub left_percent: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TickerView {
    pub state: RenderState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<QuoteOrigin>,
    pub items: Vec<TickerItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation: Option<ScrollAnimation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<TooltipView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TickerRenderer {
    styles: TickerStyleConfig,
    animation: ScrollAnimation,
}

impl TickerRenderer {
    pub fn new(styles: TickerStyleConfig, scroll_duration: Duration) -> Self {
        Self {
            styles,
            animation: ScrollAnimation::new(scroll_duration),
        }
    }

    pub fn animation(&self) -> ScrollAnimation {
        self.animation
    }

    pub fn gradient_for(&self, symbol: &str) -> Gradient {
        self.styles
            .gradients
            .get(symbol)
            .copied()
            .unwrap_or(self.styles.default_gradient)
    }

    pub fn render(&self, view: &FeedView, tooltip: &TooltipState) -> TickerView {
        let state = RenderState::select(view);

        let snapshot = match (state, &view.snapshot) {
            (RenderState::Data, Some(snapshot)) => snapshot,
            _ => {
                return TickerView {
                    state,
                    origin: None,
                    items: Vec::new(),
                    animation: None,
                    tooltip: None,
                    error: view.last_error.clone(),
                };
            }
        };

        let items = loop_items(&snapshot.quotes)
            .into_iter()
            .enumerate()
            .map(|(index, quote)| {
                let pulse = PulseStyle::from_change(quote.change_percent_24h);
                let gradient = self.gradient_for(&quote.symbol);
                TickerItem {
                    index,
                    pulse,
                    pulse_class: pulse.class_name(),
                    gradient,
                    gradient_css: gradient.css(),
                    symbol: quote.symbol,
                    name: quote.name,
                    price: quote.price,
                    change_percent_24h: quote.change_percent_24h,
                }
            })
            .collect();

        TickerView {
            state,
            origin: Some(snapshot.origin),
            items,
            animation: Some(self.animation),
            tooltip: tooltip_view(tooltip, &snapshot.quotes),
            error: None,
        }
    }
}

fn tooltip_view(tooltip: &TooltipState, quotes: &[AssetQuote]) -> Option<TooltipView> {
    let symbol = tooltip.active_symbol.as_deref()?;
    let display_index = tooltip.display_index?;
    // The hovered asset may have left the snapshot since
    let quote = quotes.iter().find(|q| q.symbol == symbol)?;

    Some(TooltipView {
        symbol: quote.symbol.clone(),
        name: quote.name.clone(),
        price: quote.price,
        change_percent_24h: quote.change_percent_24h,
        left_percent: tooltip_left_percent(display_index),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quote::FeedSnapshot;
    use chrono::Utc;
    use std::sync::Arc;

    fn quote(symbol: &str, price: f64, change: f64) -> AssetQuote {
        AssetQuote {
            symbol: symbol.to_string(),
            name: format!("{} coin", symbol),
            price,
            change_percent_24h: change,
        }
    }

    fn data_view(quotes: Vec<AssetQuote>) -> FeedView {
        FeedView {
            snapshot: Some(Arc::new(FeedSnapshot {
                quotes,
                origin: QuoteOrigin::Live,
                sequence: 1,
                refreshed_at: Utc::now(),
            })),
            last_error: None,
        }
    }

    fn renderer() -> TickerRenderer {
        TickerRenderer::new(TickerStyleConfig::default(), Duration::from_secs(30))
    }

    #[test]
    fn test_pulse_mapping() {
        assert_eq!(PulseStyle::from_change(7.0), PulseStyle::FastPositive);
        assert_eq!(PulseStyle::from_change(3.0), PulseStyle::SlowPositive);
        assert_eq!(PulseStyle::from_change(-6.0), PulseStyle::FastNegative);
        assert_eq!(PulseStyle::from_change(-1.0), PulseStyle::SlowNegative);
        assert_eq!(PulseStyle::from_change(0.0), PulseStyle::None);
    }

    #[test]
    fn test_pulse_boundaries() {
        assert_eq!(PulseStyle::from_change(5.0), PulseStyle::SlowPositive);
        assert_eq!(PulseStyle::from_change(5.01), PulseStyle::FastPositive);
        assert_eq!(PulseStyle::from_change(-5.0), PulseStyle::SlowNegative);
        assert_eq!(PulseStyle::from_change(-5.01), PulseStyle::FastNegative);
        assert_eq!(PulseStyle::from_change(-0.0), PulseStyle::None);
        assert_eq!(PulseStyle::from_change(f64::NAN), PulseStyle::None);
    }

    #[test]
    fn test_loop_items_duplicates_in_order() {
        let quotes = vec![quote("BTC", 1.0, 1.0), quote("ETH", 2.0, -1.0), quote("SOL", 3.0, 0.0)];
        let looped = loop_items(&quotes);

        assert_eq!(looped.len(), quotes.len() * 2);
        for i in 0..quotes.len() {
            assert_eq!(looped[i], looped[i + quotes.len()]);
        }
        assert!(loop_items::<AssetQuote>(&[]).is_empty());
    }

    #[test]
    fn test_gradient_lookup_is_total() {
        let renderer = renderer();
        assert_eq!(
            renderer.gradient_for("BTC"),
            Gradient::new(ColorToken::Orange, ColorToken::Yellow)
        );
        let fallback = renderer.gradient_for("UNLISTED");
        assert_eq!(fallback, TickerStyleConfig::default().default_gradient);
        assert_eq!(fallback.css(), "linear-gradient(90deg, #6b7280, #64748b)");
    }

    #[test]
    fn test_tooltip_placement_clamped() {
        for index in [0, 1, 10] {
            let left = tooltip_left_percent(index);
            assert!((10.0..=90.0).contains(&left), "index {} gave {}", index, left);
        }
        assert_eq!(tooltip_left_percent(0), 10.0);
        assert_eq!(tooltip_left_percent(1), 90.0);
        assert_eq!(tooltip_left_percent(usize::MAX), 90.0);
    }

    #[test]
    fn test_pointer_enter_uses_original_index() {
        let quotes = vec![quote("BTC", 1.0, 1.0), quote("ETH", 2.0, -1.0), quote("SOL", 3.0, 0.0)];
        let mut tooltip = TooltipState::default();

        // Index 4 of the duplicated strip is the second copy of ETH
        tooltip.pointer_enter(4, &quotes);
        assert_eq!(tooltip.active_symbol.as_deref(), Some("ETH"));
        assert_eq!(tooltip.display_index, Some(1));

        tooltip.pointer_leave();
        assert_eq!(tooltip, TooltipState::default());
        assert!(!tooltip.is_active());

        tooltip.pointer_enter(0, &[]);
        assert!(!tooltip.is_active());
    }

    #[test]
    fn test_render_states() {
        let renderer = renderer();
        let tooltip = TooltipState::default();

        let loading = renderer.render(
            &FeedView {
                snapshot: None,
                last_error: None,
            },
            &tooltip,
        );
        assert_eq!(loading.state, RenderState::Loading);
        assert!(loading.items.is_empty());

        let failed = renderer.render(
            &FeedView {
                snapshot: None,
                last_error: Some("timeout".to_string()),
            },
            &tooltip,
        );
        assert_eq!(failed.state, RenderState::ErrorWithoutData);
        assert_eq!(failed.error.as_deref(), Some("timeout"));

        // Data wins even though the last refresh failed
        let mut view = data_view(vec![quote("BTC", 1.0, 1.0)]);
        view.last_error = Some("timeout".to_string());
        let data = renderer.render(&view, &tooltip);
        assert_eq!(data.state, RenderState::Data);
        assert_eq!(data.items.len(), 2);
        assert!(data.error.is_none());
    }

    #[test]
    fn test_render_items_and_tooltip() {
        let renderer = renderer();
        let view = data_view(vec![quote("BTC", 43000.0, 7.0), quote("XYZ", 1.5, -1.0)]);
        let mut tooltip = TooltipState::default();
        tooltip.pointer_enter(3, &view.snapshot.as_ref().unwrap().quotes);

        let rendered = renderer.render(&view, &tooltip);

        assert_eq!(rendered.items.len(), 4);
        assert_eq!(rendered.items[0].pulse_class, "pulse-fast-positive");
        assert_eq!(rendered.items[3].symbol, "XYZ");
        assert_eq!(rendered.items[3].index, 3);
        assert_eq!(rendered.items[3].pulse, PulseStyle::SlowNegative);
        assert_eq!(rendered.items[3].gradient, TickerStyleConfig::default().default_gradient);

        let tip = rendered.tooltip.unwrap();
        assert_eq!(tip.symbol, "XYZ");
        assert_eq!(tip.left_percent, 90.0);
        assert_eq!(rendered.animation.unwrap().to_percent, -50.0);
    }

    #[test]
    fn test_tooltip_dropped_when_symbol_left_snapshot() {
        let renderer = renderer();
        let tooltip = TooltipState {
            active_symbol: Some("DOGE".to_string()),
            display_index: Some(0),
        };
        let rendered = renderer.render(&data_view(vec![quote("BTC", 1.0, 0.0)]), &tooltip);
        assert!(rendered.tooltip.is_none());
    }

    #[test]
    fn test_scroll_offset_wraps() {
        let animation = ScrollAnimation::new(Duration::from_secs(20));
        assert_eq!(animation.offset_percent_at(Duration::ZERO), 0.0);
        assert_eq!(animation.offset_percent_at(Duration::from_secs(10)), -25.0);
        assert_eq!(animation.offset_percent_at(Duration::from_secs(25)), -12.5);
        assert_eq!(animation.offset_percent_at(Duration::from_secs(40)), 0.0);

        let frozen = ScrollAnimation::new(Duration::ZERO);
        assert_eq!(frozen.offset_percent_at(Duration::from_secs(3)), 0.0);
    }
}
