use crate::emit::{MapAttribute, ALL_ATTRIBUTES, CORE_ATTRIBUTES};

/// What to do with a document that is not well-formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Skip the input, like any other per-file failure
    #[default]
    Skip,
    /// Convert it as an empty map and keep going
    Absorb,
}

/// Batch settings that are not tied to where the output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    /// Emitter table, in output order
    pub attributes: Vec<MapAttribute>,
    /// Handling of documents that fail to parse
    pub malformed: MalformedPolicy,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            attributes: CORE_ATTRIBUTES.to_vec(),
            malformed: MalformedPolicy::Skip,
        }
    }
}

impl BatchOptions {
    /// Emit every map attribute, see [`ALL_ATTRIBUTES`].
    pub fn with_all_attributes(mut self) -> Self {
        self.attributes = ALL_ATTRIBUTES.to_vec();
        self
    }

    /// Replace the malformed-document policy.
    pub fn with_malformed_policy(mut self, policy: MalformedPolicy) -> Self {
        self.malformed = policy;
        self
    }
}
