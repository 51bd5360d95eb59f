// Tax module - exemption threshold, loss carryforward, and the per-batch fold

pub mod batch;
pub mod calculator;
pub mod regime;

pub use batch::process_batch;
pub use calculator::{assess, Assessment};
pub use regime::TaxRegime;
