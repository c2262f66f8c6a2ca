//! Price history reporting
//!
//! This module turns stored observations into the statistics served by the
//! API and printed by the command line.

pub mod stats;

pub use stats::{
    load_product_report, load_statistics, print_statistics, DatabaseStatistics, PriceStats,
    ProductReport,
};
