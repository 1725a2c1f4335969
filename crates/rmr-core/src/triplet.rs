//! Model triplets: user, proposed, and baseline copies of one origin model
use crate::error::Result;
use crate::flags::FailureFlags;
use crate::model::BuildingModel;
use crate::stage::Stage;
use crate::store::{DocumentStore, JsonFileStore};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Three independent copies of one origin document, each tagged with its
/// stage, plus the failure flags accumulated by rule checks.
///
/// The copies share no structure: mutating one never affects another.
#[derive(Debug, Clone)]
pub struct Triplet {
    root: PathBuf,
    user: BuildingModel,
    proposed: BuildingModel,
    baseline: BuildingModel,
    flags: FailureFlags,
}

impl Triplet {
    /// Builds a triplet from an in-memory origin document.
    ///
    /// `root` names the instance files written by [`Triplet::save_instances`].
    pub fn from_document(origin: &Value, root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let triplet = Self {
            user: BuildingModel::for_stage(origin, Stage::User)?,
            proposed: BuildingModel::for_stage(origin, Stage::Proposed)?,
            baseline: BuildingModel::for_stage(origin, Stage::Baseline)?,
            flags: FailureFlags::new(),
            root,
        };
        tracing::debug!(root = %triplet.root.display(), "triplet created");
        Ok(triplet)
    }

    /// Loads the origin document from disk. An unreadable origin is fatal.
    pub fn load(origin_path: impl AsRef<Path>, root: impl Into<PathBuf>) -> Result<Self> {
        Self::load_with(&JsonFileStore, origin_path, root)
    }

    pub fn load_with(
        store: &dyn DocumentStore,
        origin_path: impl AsRef<Path>,
        root: impl Into<PathBuf>,
    ) -> Result<Self> {
        let origin_path = origin_path.as_ref();
        let origin = store.load(origin_path)?;
        tracing::info!(origin = %origin_path.display(), "origin model loaded");
        Self::from_document(&origin, root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>.user.json`, `<root>.proposed.json`, `<root>.baseline.json`
    pub fn instance_path(&self, stage: Stage) -> PathBuf {
        let mut name = self.root.clone().into_os_string();
        name.push(format!(".{}.json", stage.file_suffix()));
        PathBuf::from(name)
    }

    pub fn model(&self, stage: Stage) -> &BuildingModel {
        match stage {
            Stage::User => &self.user,
            Stage::Proposed => &self.proposed,
            Stage::Baseline => &self.baseline,
        }
    }

    /// Mutable access for building fixtures that exercise one rule.
    pub fn model_mut(&mut self, stage: Stage) -> &mut BuildingModel {
        match stage {
            Stage::User => &mut self.user,
            Stage::Proposed => &mut self.proposed,
            Stage::Baseline => &mut self.baseline,
        }
    }

    pub fn user(&self) -> &BuildingModel {
        &self.user
    }

    pub fn proposed(&self) -> &BuildingModel {
        &self.proposed
    }

    pub fn baseline(&self) -> &BuildingModel {
        &self.baseline
    }

    pub fn flags(&self) -> FailureFlags {
        self.flags
    }

    /// OR-merges flags raised by a rule evaluation.
    pub fn merge_flags(&mut self, flags: FailureFlags) {
        self.flags |= flags;
    }

    pub fn save_instances(&self) -> Result<()> {
        self.save_instances_with(&JsonFileStore)
    }

    pub fn save_instances_with(&self, store: &dyn DocumentStore) -> Result<()> {
        for stage in Stage::ALL {
            store.save(&self.instance_path(stage), self.model(stage).document())?;
        }
        tracing::info!(root = %self.root.display(), "triplet instances saved");
        Ok(())
    }

    pub fn digests(&self) -> StageDigests {
        StageDigests {
            user: digest(self.user.document()),
            proposed: digest(self.proposed.document()),
            baseline: digest(self.baseline.document()),
        }
    }
}

/// blake3 digests of the three stage documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageDigests {
    pub user: String,
    pub proposed: String,
    pub baseline: String,
}

/// Digest of a document's compact JSON form. Object members serialize in
/// key order, so equal documents hash equally.
pub fn digest(document: &Value) -> String {
    format!("blake3:{}", blake3::hash(document.to_string().as_bytes()))
}
