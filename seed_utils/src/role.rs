//! A functional role.
use serde::{Deserialize, Serialize};

/// A role has a stable ID and a human-readable name.
/// Two roles are the same if their IDs are the same. The name is
/// carried only for reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    id: String,
    name: String,
}

impl Role {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Role {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Role {}

impl std::hash::Hash for Role {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}\t{}", self.id, self.name)
    }
}
