use crate::widget::asset::WidgetSpec;
use crate::widget::entry::{DifferenceClass, DisplayEntry};
use bigdecimal::BigDecimal;
use serde::Deserialize;

pub const PLACEHOLDER_DASHES: &str = "––––";

/// Size variants offered by the widget host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetFamily {
    #[default]
    Small,
    Medium,
    Large,
}

/// Fixed-point text of `value`, rounded like `%.Nf` on the nearest double
/// (`100.45` shows as `100.5`).
pub fn format_decimal(value: &BigDecimal, decimals: usize) -> String {
    let nearest = value.to_string().parse::<f64>().ok();
    match nearest.filter(|f| f.is_finite()) {
        Some(f) => format!("{:.*}", decimals, f),
        None => format!("{:.*}", decimals, value),
    }
}

/// The headline number is the 24h reference price, not the last trade.
pub fn price_text(entry: &DisplayEntry) -> String {
    if entry.error {
        return PLACEHOLDER_DASHES.to_string();
    }

    format_decimal(&entry.data.price_24h, 1)
}

pub fn difference_text(entry: &DisplayEntry) -> String {
    if entry.error {
        return format!("± {}", PLACEHOLDER_DASHES);
    }

    let sign = if entry.difference_class() == DifferenceClass::Up {
        "+"
    } else {
        ""
    };
    format!("{}{}", sign, format_decimal(&entry.difference(), 2))
}

pub fn volume_text(entry: &DisplayEntry) -> String {
    if entry.error {
        return format!("VOLUME: {}", PLACEHOLDER_DASHES);
    }

    format!("VOLUME: {}", format_decimal(&entry.data.volume_24h, 2))
}

/// Lays out the widget as text lines: header, pricing, and volume on the
/// large variant. Medium keeps price and difference on one line.
pub fn render(widget: &WidgetSpec, entry: &DisplayEntry, family: WidgetFamily) -> Vec<String> {
    let mut lines = vec![widget.title.to_string(), widget.subtitle.to_string()];

    match family {
        WidgetFamily::Medium => {
            lines.push(format!("{} {}", price_text(entry), difference_text(entry)));
        }
        WidgetFamily::Small | WidgetFamily::Large => {
            lines.push(price_text(entry));
            lines.push(difference_text(entry));
        }
    }

    if family == WidgetFamily::Large {
        lines.push(volume_text(entry));
    }

    lines
}
