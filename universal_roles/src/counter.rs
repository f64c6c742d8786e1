//! Counting single and multiple occurrences of roles across genomes.
use super::quality_count::QualityCountMap;
use super::snapshot::{RoleCounts, Snapshot};
use indexmap::IndexMap;
use rayon::prelude::*;
use seed_utils::{Genome, Role, RoleMap};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Occurrences of each role of interest in a single genome.
type Profile<'a> = IndexMap<&'a Role, u32>;

/// Counts universal roles in genomes. A role that occurs once in a genome
/// gets a good count, a role that occurs more than once gets a bad count,
/// and a role that does not occur gets nothing.
#[derive(Debug, Clone, Default)]
pub struct UniversalRoleCounter {
    genome_count: u32,
    roles: RoleMap,
    counts: QualityCountMap<Role>,
}

impl UniversalRoleCounter {
    /// Create a counter for the roles in `roles`.
    pub fn new(roles: RoleMap) -> Self {
        Self {
            genome_count: 0,
            roles,
            counts: QualityCountMap::new(),
        }
    }
    /// Count the roles of one genome.
    pub fn count(&mut self, genome: &Genome) {
        let profile = profile(&self.roles, genome);
        fold(&mut self.counts, &profile);
        self.genome_count += 1;
    }
    /// Count the roles of many genomes. The profiles are built in
    /// parallel, then folded in the order of `genomes`, so the result is
    /// the same as calling [`UniversalRoleCounter::count`] on each.
    pub fn count_all(&mut self, genomes: &[Genome]) {
        let roles = &self.roles;
        let profiles: Vec<Profile> = genomes.par_iter().map(|g| profile(roles, g)).collect();
        for profile in profiles.iter() {
            fold(&mut self.counts, profile);
            self.genome_count += 1;
        }
        debug!("{} genomes counted so far.", self.genome_count);
    }
    /// The number of genomes counted.
    pub fn counted(&self) -> u32 {
        self.genome_count
    }
    pub fn good(&self, role: &Role) -> u32 {
        self.counts.good(role)
    }
    pub fn bad(&self, role: &Role) -> u32 {
        self.counts.bad(role)
    }
    /// The role with the given ID, if it is one of ours.
    pub fn get_role(&self, id: &str) -> Option<&Role> {
        self.roles.get(id)
    }
    pub fn roles(&self) -> &RoleMap {
        &self.roles
    }
    /// Every counted role, best first.
    pub fn best_roles(&self) -> Vec<&Role> {
        self.counts.best_keys()
    }
    /// The roles that occur singly in at least `threshold` of the
    /// genomes, best first.
    ///
    /// The cutoff is computed from `threshold * genomes`: when that is a
    /// whole number `m`, a role needs `m` good counts; otherwise it needs
    /// more than its floor. With no genomes counted every counted role
    /// passes, so callers should check [`UniversalRoleCounter::counted`].
    #[allow(clippy::float_cmp)]
    pub fn universals(&self, threshold: f64) -> Vec<&Role> {
        let min_d = threshold * f64::from(self.genome_count);
        let min_f = min_d.floor();
        let min = if min_d == min_f {
            min_f as i64 - 1
        } else {
            min_f as i64
        };
        self.counts
            .best_keys()
            .into_iter()
            .filter(|role| i64::from(self.counts.good(role)) > min)
            .collect()
    }
    /// The fraction of genomes in which `role` occurs singly, or `None`
    /// if no genome has been counted.
    pub fn score(&self, role: &Role) -> Option<f64> {
        if self.genome_count == 0 {
            None
        } else {
            Some(f64::from(self.good(role)) / f64::from(self.genome_count))
        }
    }
    /// The state of this counter. Every role of interest is included,
    /// counted or not.
    pub fn snapshot(&self) -> Snapshot {
        let roles = self
            .roles
            .values()
            .map(|role| {
                let quality = self.counts.quality(role);
                RoleCounts {
                    role: role.clone(),
                    good: quality.good,
                    bad: quality.bad,
                }
            })
            .collect();
        Snapshot {
            genome_count: self.genome_count,
            roles,
        }
    }
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut counter = Self::new(RoleMap::new());
        counter.genome_count = snapshot.genome_count;
        for RoleCounts { role, good, bad } in snapshot.roles {
            counter.counts.add_good(&role, good);
            counter.counts.add_bad(&role, bad);
            counter.roles.register(role);
        }
        counter
    }
    pub fn write_to<W: Write>(&self, wtr: &mut W) -> std::io::Result<()> {
        self.snapshot().write_to(wtr)
    }
    pub fn read_from<R: Read>(rdr: &mut R) -> std::io::Result<Self> {
        Snapshot::read_from(rdr).map(Self::from_snapshot)
    }
    /// Save the counter to a file.
    pub fn save<P: AsRef<Path>>(&self, file: P) -> std::io::Result<()> {
        let mut wtr = BufWriter::new(std::fs::File::create(file)?);
        self.write_to(&mut wtr)?;
        wtr.flush()
    }
    /// Load a counter saved by [`UniversalRoleCounter::save`].
    pub fn load<P: AsRef<Path>>(file: P) -> std::io::Result<Self> {
        let mut rdr = BufReader::new(std::fs::File::open(file)?);
        Self::read_from(&mut rdr)
    }
}

fn profile<'a>(roles: &'a RoleMap, genome: &Genome) -> Profile<'a> {
    let mut profile = Profile::new();
    for feature in genome.features() {
        for role in feature.useful_roles(roles) {
            *profile.entry(role).or_default() += 1;
        }
    }
    profile
}

fn fold(counts: &mut QualityCountMap<Role>, profile: &Profile) {
    for (&role, &occurrences) in profile.iter() {
        match occurrences {
            0 => {}
            1 => counts.set_good(role),
            _ => counts.set_bad(role),
        }
    }
}
