//! RMR Rules: baseline transformation checks
//!
//! Each [`Rule`] derives expected baseline values from the compiled-in
//! [`tables`], compares them with what the baseline model holds, and checks
//! that nothing it does not license has changed between the stage copies.
//!
//! ```text
//! CheckConfig ─→ RuleRegistry ─→ Rule::evaluate(&Triplet, &mut RuleScope)
//!                     │                        │
//!                     └── merge flags ←────────┘
//!                               ↓
//!                           RunReport
//! ```
//!
//! # Example
//!
//! ```
//! use rmr_core::{Flag, Triplet};
//! use rmr_rules::CheckRules;
//! use serde_json::json;
//!
//! let origin = json!({
//!     "climate_zone": "CZ4A",
//!     "exterior_lighting_areas": [
//!         { "id": "lot", "lighting_category": "UNCOVERED_PARKING_AREAS", "area": 1000, "power": 150 }
//!     ]
//! });
//! let mut triplet = Triplet::from_document(&origin, "parking").unwrap();
//!
//! let report = triplet.check_rules(&["6a"]).unwrap();
//! assert!(report.passed(Flag::Baseline));
//! ```

pub mod config;
pub mod logging;
pub mod registry;
pub mod report;
pub mod rule;
pub mod rules;
pub mod scope;
pub mod tables;

pub use config::CheckConfig;
pub use registry::{standard_registry, CheckRules, RuleRegistry, ALL};
pub use report::{CheckRecord, CheckStatus, RunReport};
pub use rule::Rule;
pub use scope::RuleScope;
