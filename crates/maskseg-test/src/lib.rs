//! maskseg-test - Regression test harness for maskseg
//!
//! Provides [`RegParams`], a small regression harness that numbers each
//! check, records failures and reports them at [`RegParams::cleanup`], plus
//! deterministic synthetic fixtures (bimodal images, rectangles, random
//! masks) so no test depends on image files.
//!
//! Two modes are supported:
//!
//! - **Compare**: run every check (default)
//! - **Display**: also write PNG previews of masks and overlays into
//!   `tests/regout` for visual inspection
//!
//! # Usage
//!
//! ```ignore
//! use maskseg_test::RegParams;
//!
//! let mut rp = RegParams::new("otsu");
//! rp.compare_values(100.0, t as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
pub mod fixtures;
mod params;

pub use error::{TestError, TestResult};
pub use fixtures::Lcg;
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // maskseg-test is at crates/maskseg-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
