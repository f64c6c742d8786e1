//! The registry of roles of interest.
//!
//! A role map knows every role we care about, indexed both by ID and
//! by normalized name, so that the free-text functional assignment of a
//! feature can be resolved into the roles it encodes.
use super::role::Role;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Separators between the roles of a multifunctional assignment.
const ROLE_SEPARATORS: [&str; 3] = [" / ", " @ ", "; "];
/// Markers starting a comment in a functional assignment.
const COMMENT_MARKERS: [&str; 2] = [" #", " !"];

/// Roles of interest, kept in registration order.
#[derive(Debug, Clone, Default)]
pub struct RoleMap {
    roles: IndexMap<String, Role>,
    // normalized name -> role ID
    names: HashMap<String, String>,
}

impl RoleMap {
    pub fn new() -> Self {
        Self::default()
    }
    /// Register a role. If the ID is already known, the role keeps its
    /// position and takes the new name.
    /// If another role already has the same normalized name, the new role
    /// takes over the name and the ID of the old one is returned; the old
    /// role can then no longer be resolved from an annotation.
    pub fn register(&mut self, role: Role) -> Option<String> {
        let shadowed = self
            .names
            .insert(normalize(role.name()), role.id().to_string())
            .filter(|old| old != role.id());
        if let Some(ref old) = shadowed {
            warn!(
                "Role {} has the same name as {} and replaces it in name lookups.",
                role.id(),
                old
            );
        }
        self.roles.insert(role.id().to_string(), role);
        shadowed
    }
    /// Register roles from bare names, generating an ID for each new one.
    /// Returns the roles in the order of `names`. A name which is
    /// already registered gives back the existing role.
    pub fn register_names(&mut self, names: &[&str]) -> Vec<Role> {
        names
            .iter()
            .map(|name| match self.get_by_name(name).cloned() {
                Some(role) => role,
                None => {
                    let role = Role::new(&self.new_id(name), name);
                    self.register(role.clone());
                    role
                }
            })
            .collect()
    }
    // The ID is the alphanumeric part of the name. A numeric suffix
    // ("n1", "n2", ...) is added when the name ends in a digit or the
    // plain form is taken.
    fn new_id(&self, name: &str) -> String {
        let base: String = name.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
        let ends_in_digit = base.chars().last().map_or(true, |c| c.is_ascii_digit());
        if !ends_in_digit && !self.roles.contains_key(&base) {
            return base;
        }
        let mut suffix = 1;
        loop {
            let id = format!("{}n{}", base, suffix);
            if !self.roles.contains_key(&id) {
                break id;
            }
            suffix += 1;
        }
    }
    pub fn get(&self, id: &str) -> Option<&Role> {
        self.roles.get(id)
    }
    pub fn contains(&self, id: &str) -> bool {
        self.roles.contains_key(id)
    }
    /// Find a role by name. The name is normalized before the lookup.
    pub fn get_by_name(&self, name: &str) -> Option<&Role> {
        self.names
            .get(&normalize(name))
            .and_then(|id| self.roles.get(id))
    }
    /// Resolve a functional assignment into the registered roles it
    /// encodes, in the order they are listed. Unknown roles are dropped.
    pub fn resolve(&self, annotation: &str) -> Vec<&Role> {
        split_function(annotation)
            .into_iter()
            .filter_map(|name| self.get_by_name(name))
            .collect()
    }
    /// All the registered roles, in registration order.
    pub fn values(&self) -> impl Iterator<Item = &Role> {
        self.roles.values()
    }
    pub fn len(&self) -> usize {
        self.roles.len()
    }
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
    /// Load a role file. Each line is a role ID and a role name separated
    /// by a tab. Blank lines and lines starting with '#' are skipped.
    pub fn load<P: AsRef<Path>>(file: P) -> std::io::Result<Self> {
        let file = std::fs::File::open(file)?;
        Self::from_reader(BufReader::new(file))
    }
    pub fn from_reader<R: BufRead>(reader: R) -> std::io::Result<Self> {
        let mut map = Self::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let (id, rest) = line.split_once('\t').ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("line {}: expected a role ID and a name separated by a tab", idx + 1),
                )
            })?;
            let name = rest.split('\t').next().unwrap_or(rest);
            map.register(Role::new(id.trim(), name.trim()));
        }
        debug!("Loaded {} roles.", map.len());
        Ok(map)
    }
}

/// Split a functional assignment into single role names.
/// Comments are removed first.
/// # Example
/// ```
/// let roles = seed_utils::role_map::split_function("Role 6 / Role 1 # fusion");
/// assert_eq!(roles, vec!["Role 6", "Role 1"]);
/// ```
pub fn split_function(annotation: &str) -> Vec<&str> {
    let end = COMMENT_MARKERS
        .iter()
        .filter_map(|marker| annotation.find(marker))
        .min()
        .unwrap_or_else(|| annotation.len());
    let mut roles = vec![&annotation[..end]];
    for sep in ROLE_SEPARATORS.iter() {
        roles = roles.into_iter().flat_map(|role| role.split(sep)).collect();
    }
    roles
        .into_iter()
        .map(str::trim)
        .filter(|role| !role.is_empty())
        .collect()
}

/// Normalize a role name for matching: lower case, no trailing EC or TC
/// number, and single spaces in place of punctuation and whitespace.
pub fn normalize(name: &str) -> String {
    let name = strip_ec_number(name.trim());
    let mut result = String::with_capacity(name.len());
    let mut gap = false;
    for c in name.chars() {
        if c.is_alphanumeric() {
            if gap && !result.is_empty() {
                result.push(' ');
            }
            gap = false;
            result.extend(c.to_lowercase());
        } else {
            gap = true;
        }
    }
    result
}

fn strip_ec_number(name: &str) -> &str {
    if !name.ends_with(')') {
        return name;
    }
    match ["(EC ", "(TC "]
        .iter()
        .filter_map(|tag| name.rfind(tag))
        .max()
    {
        Some(start) => name[..start].trim_end(),
        None => name,
    }
}
