//! Event tree model types.
//!
//! This module contains the flat representation of an event tree after it has
//! been located in a document and enumerated. These types are plain records:
//! they are built once per document load and never mutated afterwards.
//!
//! # Pipeline Position
//!
//! ```text
//! XML Text
//!     ↓ document provider
//! Node Tree
//!     ↓ locate + extract + enumerate
//! EventTree (these types)
//!     ↓ layout
//! GridLayout
//!     ↓ export
//! JSON / Table
//! ```
//!
//! # Serialization
//!
//! All types serialize with camelCase field names, so the JSON form of an
//! [`EventTree`] is `{ functionalEvents: [{name, label}], paths: [{steps:
//! [{event, state}], sequence}] }`.

use serde::{Deserialize, Serialize};

/// A decision or failure point declared in an event tree header.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionalEvent {
    name: String,
    label: String,
}

impl FunctionalEvent {
    /// Creates a new functional event.
    ///
    /// # Arguments
    ///
    /// * `name` - Identifier referenced by forks through their `functional-event` attribute.
    /// * `label` - Human readable description. Empty when the document has none.
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
        }
    }

    /// Returns the identifier of this functional event.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the label of this functional event.
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// One accumulated decision outcome: the state taken at a functional event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StepRecord {
    event: String,
    state: String,
}

impl StepRecord {
    pub fn new(event: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            state: state.into(),
        }
    }

    /// Name of the functional event this step branched on.
    pub fn event(&self) -> &str {
        &self.event
    }

    /// State label of the branch that was taken (e.g. `Success`, `Failure`).
    pub fn state(&self) -> &str {
        &self.state
    }
}

/// A named terminal outcome together with the steps that lead to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sequence {
    steps: Vec<StepRecord>,
    sequence: String,
}

impl Sequence {
    /// Creates a new sequence record.
    ///
    /// # Arguments
    ///
    /// * `steps` - Steps in the order their forks were entered, root first.
    /// * `sequence` - Name of the terminal sequence marker.
    pub fn new(steps: Vec<StepRecord>, sequence: impl Into<String>) -> Self {
        Self {
            steps,
            sequence: sequence.into(),
        }
    }

    /// Returns the steps leading to this sequence, root first.
    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    /// Returns the name of the terminal sequence.
    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    /// Returns the number of steps, which equals the depth of the emitting branch.
    pub fn depth(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` if this sequence's steps are a strict prefix of `other`'s.
    pub fn is_strict_prefix_of(&self, other: &Sequence) -> bool {
        self.steps.len() < other.steps.len() && other.steps.starts_with(&self.steps)
    }
}

/// The enumerated result of one event tree.
///
/// The order of [`functional_events`](Self::functional_events) is the
/// document order of their declarations. The order of
/// [`paths`](Self::paths) is the depth-first emission order of the traversal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTree {
    functional_events: Vec<FunctionalEvent>,
    paths: Vec<Sequence>,
}

impl EventTree {
    /// Creates an event tree from its header and enumerated sequences.
    pub fn new(functional_events: Vec<FunctionalEvent>, paths: Vec<Sequence>) -> Self {
        Self {
            functional_events,
            paths,
        }
    }

    /// Returns the functional-event header in declaration order.
    pub fn functional_events(&self) -> &[FunctionalEvent] {
        &self.functional_events
    }

    /// Returns the enumerated sequences in emission order.
    pub fn paths(&self) -> &[Sequence] {
        &self.paths
    }

    /// Looks up a functional event by name. The first declaration wins.
    pub fn functional_event(&self, name: &str) -> Option<&FunctionalEvent> {
        self.functional_events.iter().find(|fe| fe.name() == name)
    }

    /// Returns the header position of the functional event called `name`.
    ///
    /// When a name is declared more than once the first position is returned.
    pub fn column_of(&self, name: &str) -> Option<usize> {
        self.functional_events
            .iter()
            .position(|fe| fe.name() == name)
    }

    /// Returns the length of the longest sequence, or 0 when there are none.
    pub fn max_depth(&self) -> usize {
        self.paths.iter().map(Sequence::depth).max().unwrap_or(0)
    }

    /// Returns `true` when the traversal emitted no sequences.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
