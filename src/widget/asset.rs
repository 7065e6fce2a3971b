use crate::quote::response::TickerSnapshot;
use serde::Deserialize;
use std::fmt;

/// The assets a widget can track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Asset {
    Btc,
    Eth,
}

/// Static per-widget configuration: everything that differs between the
/// BTC and ETH widgets.
#[derive(Clone, Debug, PartialEq)]
pub struct WidgetSpec {
    pub kind: &'static str,
    pub symbol_pair: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub description: &'static str,
    pub preview: TickerSnapshot,
}

impl Asset {
    pub fn ticker(&self) -> &'static str {
        match self {
            Asset::Btc => "BTC",
            Asset::Eth => "ETH",
        }
    }

    pub fn widget(&self) -> WidgetSpec {
        match self {
            Asset::Btc => WidgetSpec {
                kind: "BTC_Widget",
                symbol_pair: "BTC-USD",
                title: "BTC Track",
                subtitle: "Bitcoin",
                description: "Track Bitcoin Prices From Your Home Screen.",
                preview: TickerSnapshot::from_scaled((5918311, 2), (37783100325, 8), (5770833, 2)),
            },
            Asset::Eth => WidgetSpec {
                kind: "ETH_Widget",
                symbol_pair: "ETH-USD",
                title: "ETH Track",
                subtitle: "Ethereum",
                description: "Track Ethereum Prices From Your Home Screen.",
                preview: TickerSnapshot::from_scaled((39497, 1), (71913422951, 8), (390473, 2)),
            },
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.ticker())
    }
}
