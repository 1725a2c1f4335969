//! RMR Core: model triplets and structural invariants
//!
//! A ruleset model report exists in three copies: the user's design, the
//! proposed design, and the baseline derived from it by the transformation
//! rules of an energy standard. This crate holds the pieces every rule check
//! shares.
//!
//! ```text
//! origin.json → Triplet ─┬─ user      (USER)
//!                        ├─ proposed  (PROPOSED)
//!                        └─ baseline  (BASELINE)
//!                              ↓
//!                 StructuralInvariant / FailureFlags
//! ```
//!
//! # Example
//!
//! ```
//! use rmr_core::{Stage, StructuralInvariant, Triplet};
//! use serde_json::json;
//!
//! let origin = json!({
//!     "climate_zone": "CZ4A",
//!     "exterior_lighting_areas": [{ "lighting_category": "CANOPIES", "area": 200, "power": 250 }]
//! });
//! let mut triplet = Triplet::from_document(&origin, "canopy").unwrap();
//!
//! let area = triplet.model_mut(Stage::Baseline).entry_mut("exterior_lighting_areas", 0).unwrap();
//! area["power"] = json!(240);
//!
//! let invariant = StructuralInvariant::neutralizing(["[*].power"]).unwrap();
//! let outcome = invariant.check(
//!     triplet.user().get("exterior_lighting_areas"),
//!     triplet.baseline().get("exterior_lighting_areas"),
//! );
//! assert!(outcome.holds());
//! ```

pub mod error;
pub mod flags;
pub mod invariant;
pub mod model;
pub mod path;
pub mod schema;
pub mod stage;
pub mod store;
pub mod triplet;

pub use error::{Result, RmrError};
pub use flags::{FailureFlags, Flag};
pub use invariant::{first_difference, neutralize, values_equal, InvariantOutcome, StructuralInvariant};
pub use model::{
    entity_label, BuildingModel, ExteriorLightingArea, ExteriorWall, FenestrationAssembly,
    HvacSystem, ThermalBlock,
};
pub use path::{FieldPath, Segment};
pub use schema::{validate_documents, validate_triplet, DocumentCheck, RequiredFields, SchemaValidator, SchemaViolation};
pub use stage::{Stage, STAGE_FIELD};
pub use store::{DocumentStore, JsonFileStore};
pub use triplet::{digest, StageDigests, Triplet};
