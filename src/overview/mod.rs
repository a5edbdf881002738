//! Overview (OVER/XOVER) schema negotiation and record parsing

mod record;
mod schema;

pub use record::{parse_overview_line, OverviewRecord};
pub use schema::{OverviewField, OverviewSchema};
