//! Genomes and their features, as stored in GTO (genome typed object) JSON files.
//! Only the fields needed to resolve roles are kept; everything else in the
//! file is ignored.
use super::role::Role;
use super::role_map::RoleMap;
use serde::{Deserialize, Serialize};
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Genome {
    id: String,
    #[serde(default)]
    scientific_name: String,
    #[serde(default)]
    features: Vec<Feature>,
}

impl std::fmt::Display for Genome {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} ({})", self.id, self.scientific_name)
    }
}

impl Genome {
    pub fn new(id: &str, scientific_name: &str) -> Self {
        Self {
            id: id.to_string(),
            scientific_name: scientific_name.to_string(),
            features: vec![],
        }
    }
    pub fn add_feature(&mut self, feature: Feature) {
        self.features.push(feature);
    }
    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn name(&self) -> &str {
        &self.scientific_name
    }
    pub fn features(&self) -> &[Feature] {
        &self.features
    }
    /// Read a genome from a GTO file.
    pub fn from_file<P: AsRef<Path>>(file: P) -> std::io::Result<Self> {
        let path = file.as_ref();
        let reader = BufReader::new(std::fs::File::open(path)?);
        serde_json::from_reader(reader).map_err(|why| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("{}:{}", path.display(), why),
            )
        })
    }
}

impl std::str::FromStr for Genome {
    type Err = serde_json::Error;
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(input)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    id: String,
    #[serde(default)]
    function: Option<String>,
}

impl Feature {
    pub fn new(id: &str, function: &str) -> Self {
        Self {
            id: id.to_string(),
            function: Some(function.to_string()),
        }
    }
    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn function(&self) -> Option<&str> {
        self.function.as_deref()
    }
    /// The roles of interest this feature encodes. A role listed twice
    /// in the functional assignment is returned twice.
    pub fn useful_roles<'a>(&self, roles: &'a RoleMap) -> Vec<&'a Role> {
        match self.function.as_deref() {
            Some(function) => roles.resolve(function),
            None => vec![],
        }
    }
}
