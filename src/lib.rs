//! Price-tracking widget pipeline: fetch one exchange ticker, turn it into a
//! display entry, and hand entries to a widget host on its refresh cadence.

pub mod config;
pub mod quote;
pub mod widget;
