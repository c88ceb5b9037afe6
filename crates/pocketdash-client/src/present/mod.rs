pub mod chart;
pub mod currency;
pub mod groups;
pub mod model;

pub use chart::{circumference, donut_chart, legend, spend_ring};
pub use currency::{format_currency, format_signed, group_digits};
pub use groups::group_transactions;
pub use model::build_dashboard;
