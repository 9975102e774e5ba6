//! The session's history of drinks.
//!
//! The cellar is the only owner of artifacts. "Current" is an id into it, so
//! the drink on the result view and the one in the cellar are the same value
//! and a consumed flag set through either is seen by both.

use thiserror::Error;

use soulbar_types::{Artifact, ArtifactId, PositivityScore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no artifact with id {0} in the cellar")]
pub struct NotFound(pub ArtifactId);

/// Append-only, creation-ordered collection of artifacts plus the current pointer.
#[derive(Debug, Default)]
pub struct Cellar {
    artifacts: Vec<Artifact>,
    current: Option<ArtifactId>,
}

impl Cellar {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `artifact` at the end and makes it current.
    pub fn append(&mut self, artifact: Artifact) -> ArtifactId {
        let id = artifact.id();
        debug_assert!(self.get(id).is_none(), "artifact ids are unique");
        self.artifacts.push(artifact);
        self.current = Some(id);
        id
    }

    /// Sets the consumed flag. Unknown ids and already-consumed drinks are no-ops.
    ///
    /// Returns `true` when the flag actually changed.
    pub fn mark_consumed(&mut self, id: ArtifactId) -> bool {
        self.artifacts
            .iter_mut()
            .find(|a| a.id() == id)
            .is_some_and(Artifact::mark_consumed)
    }

    /// Makes the artifact with `id` current.
    pub fn select(&mut self, id: ArtifactId) -> Result<&Artifact, NotFound> {
        let index = self.index_of(id).ok_or(NotFound(id))?;
        self.current = Some(id);
        Ok(&self.artifacts[index])
    }

    #[must_use]
    pub fn current(&self) -> Option<&Artifact> {
        self.current.and_then(|id| self.get(id))
    }

    #[must_use]
    pub fn get(&self, id: ArtifactId) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.id() == id)
    }

    fn index_of(&self, id: ArtifactId) -> Option<usize> {
        self.artifacts.iter().position(|a| a.id() == id)
    }

    /// Artifacts in creation order.
    pub fn iter(&self) -> std::slice::Iter<'_, Artifact> {
        self.artifacts.iter()
    }

    /// Artifacts newest first, as the cellar shelves show them.
    pub fn newest_first(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter().rev()
    }

    /// Positivity scores in creation order, for the mood trend.
    #[must_use]
    pub fn scores(&self) -> Vec<PositivityScore> {
        self.artifacts.iter().map(Artifact::positivity).collect()
    }

    /// Whether there is enough history to draw a trend.
    #[must_use]
    pub fn has_trend(&self) -> bool {
        self.artifacts.len() > 1
    }

    #[must_use]
    pub fn last(&self) -> Option<&Artifact> {
        self.artifacts.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}
