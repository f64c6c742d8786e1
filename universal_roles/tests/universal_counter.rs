extern crate approx;
extern crate seed_utils;
extern crate tempfile;
extern crate universal_roles;
use approx::assert_abs_diff_eq;
use seed_utils::{Feature, Genome, GenomeDirectory, Role, RoleMap};
use universal_roles::UniversalRoleCounter;

fn fake_genome() -> Genome {
    let mut genome = Genome::new("12345.6", "Bacillus praestrigiae Narnia");
    let features = [
        ("fig|12345.6.peg.1", "Role 1"),
        ("fig|12345.6.peg.2", "Role 2"),
        ("fig|12345.6.peg.3", "Role 3"),
        ("fig|12345.6.peg.4", "Role 4"),
        ("fig|12345.6.peg.5", "Role 5"),
        ("fig|12345.6.peg.6", "Role 6 / Role 1"),
        ("fig|12345.6.peg.7", "Role 2 # comment"),
        ("fig|12345.6.peg.9", "Role 1"),
        ("fig|12345.6.peg.10", "Role 2"),
    ];
    for (id, function) in features.iter() {
        genome.add_feature(Feature::new(id, function));
    }
    genome
}

fn role_map() -> (RoleMap, Vec<Role>) {
    let mut roles = RoleMap::new();
    let registered = roles.register_names(&[
        "Role 1", "Role 2", "Role 3", "Role 4", "Role 5", "Role A", "Role B",
    ]);
    (roles, registered)
}

fn ids(roles: &[&Role]) -> Vec<String> {
    roles.iter().map(|r| r.id().to_string()).collect()
}

#[test]
fn counting_three_genomes() {
    let (roles, registered) = role_map();
    let (r1, r2, r3, r4, r5, ra, rb) = (
        &registered[0],
        &registered[1],
        &registered[2],
        &registered[3],
        &registered[4],
        &registered[5],
        &registered[6],
    );
    let mut counter = UniversalRoleCounter::new(roles);
    assert_eq!(counter.get_role("RoleB"), Some(rb));
    let mut genome = fake_genome();
    counter.count(&genome);
    assert_eq!(counter.counted(), 1);
    assert_eq!(ids(&counter.universals(0.60)), vec!["Role3n1", "Role4n1", "Role5n1"]);
    assert_abs_diff_eq!(counter.score(r2).unwrap(), 0.0, epsilon = 0.001);
    assert_eq!((counter.good(rb), counter.bad(rb)), (0, 0));

    genome.add_feature(Feature::new("fig|12345.6.peg.8", "Role 3"));
    counter.count(&genome);
    assert_eq!(ids(&counter.universals(0.60)), vec!["Role4n1", "Role5n1"]);
    assert_eq!(counter.good(r1), 0);
    assert_eq!(counter.bad(r1), 2);
    assert_abs_diff_eq!(counter.score(r1).unwrap(), 0.0, epsilon = 0.001);
    assert_eq!(counter.good(r2), 0);
    assert_eq!(counter.bad(r2), 2);
    assert_eq!(counter.good(r3), 1);
    assert_eq!(counter.bad(r3), 1);
    assert_abs_diff_eq!(counter.score(r3).unwrap(), 0.5, epsilon = 0.001);

    genome.add_feature(Feature::new("fig|12345.6.peg.11", "Role 4"));
    counter.count(&genome);
    assert_eq!(ids(&counter.universals(0.60)), vec!["Role5n1", "Role4n1"]);
    assert_eq!(counter.good(r4), 2);
    assert_eq!(counter.bad(r4), 1);
    assert_abs_diff_eq!(counter.score(r4).unwrap(), 0.667, epsilon = 0.001);
    assert_eq!(counter.good(r5), 3);
    assert_eq!((counter.good(ra), counter.bad(ra)), (0, 0));
    assert_abs_diff_eq!(counter.score(ra).unwrap(), 0.0, epsilon = 0.001);

    let dir = tempfile::tempdir().unwrap();
    let save_file = dir.path().join("uniCounter.ser");
    counter.save(&save_file).unwrap();
    let loaded = UniversalRoleCounter::load(&save_file).unwrap();
    assert_eq!(loaded.counted(), counter.counted());
    for role in registered.iter() {
        assert_eq!(loaded.good(role), counter.good(role), "{}", role.id());
        assert_eq!(loaded.bad(role), counter.bad(role), "{}", role.id());
        let loaded_role = loaded.get_role(role.id()).unwrap();
        assert_eq!(loaded_role, role);
        assert_eq!(loaded_role.name(), role.name());
    }
    let order: Vec<_> = loaded.roles().values().map(|r| r.id()).collect();
    assert_eq!(
        order,
        vec!["Role1n1", "Role2n1", "Role3n1", "Role4n1", "Role5n1", "RoleA", "RoleB"]
    );
}

#[test]
fn loading_an_empty_counter() {
    let dir = tempfile::tempdir().unwrap();
    let save_file = dir.path().join("empty.ser");
    UniversalRoleCounter::new(RoleMap::new())
        .save(&save_file)
        .unwrap();
    let loaded = UniversalRoleCounter::load(&save_file).unwrap();
    assert_eq!(loaded.counted(), 0);
    assert!(loaded.roles().is_empty());
    assert!(loaded.universals(0.0).is_empty());
    assert!(loaded.universals(1.0).is_empty());
}

#[test]
fn loading_bad_files() {
    let dir = tempfile::tempdir().unwrap();
    assert!(UniversalRoleCounter::load(dir.path().join("missing.ser")).is_err());
    let (roles, _) = role_map();
    let mut counter = UniversalRoleCounter::new(roles);
    counter.count(&fake_genome());
    let mut buf: Vec<u8> = vec![];
    counter.write_to(&mut buf).unwrap();
    let truncated = dir.path().join("truncated.ser");
    std::fs::write(&truncated, &buf[..buf.len() / 2]).unwrap();
    let err = UniversalRoleCounter::load(&truncated).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof);
}

#[test]
fn counting_a_genome_directory() {
    let dir = tempfile::tempdir().unwrap();
    let role_file = dir.path().join("roles.tbl");
    std::fs::write(
        &role_file,
        "PhenTrnaSyntAlph\tPhenylalanyl-tRNA synthetase alpha chain (EC 6.1.1.20)\n\
         LsuL2p\tLSU ribosomal protein L2p (L8e)\n",
    )
    .unwrap();
    let genomes = dir.path().join("genomes");
    std::fs::create_dir(&genomes).unwrap();
    let gto = |id: &str, functions: &[&str]| {
        let features: Vec<String> = functions
            .iter()
            .enumerate()
            .map(|(idx, f)| format!(r#"{{"id": "fig|{}.peg.{}", "function": "{}"}}"#, id, idx, f))
            .collect();
        format!(
            r#"{{"id": "{}", "scientific_name": "Genome {}", "features": [{}]}}"#,
            id,
            id,
            features.join(",")
        )
    };
    let phes = "Phenylalanyl-tRNA synthetase alpha chain (EC 6.1.1.20)";
    let l2p = "LSU ribosomal protein L2p (L8e)";
    std::fs::write(genomes.join("1.1.gto"), gto("1.1", &[phes, l2p])).unwrap();
    std::fs::write(genomes.join("2.1.gto"), gto("2.1", &[phes, l2p, l2p])).unwrap();
    std::fs::write(genomes.join("3.1.gto"), gto("3.1", &[phes, "hypothetical protein"])).unwrap();
    let roles = RoleMap::load(&role_file).unwrap();
    let mut counter = UniversalRoleCounter::new(roles);
    for genome in GenomeDirectory::new(&genomes).unwrap().iter() {
        counter.count(&genome.unwrap());
    }
    assert_eq!(counter.counted(), 3);
    assert_eq!(ids(&counter.universals(0.9)), vec!["PhenTrnaSyntAlph"]);
    let l2p = counter.get_role("LsuL2p").unwrap();
    assert_eq!((counter.good(l2p), counter.bad(l2p)), (1, 1));
    assert_abs_diff_eq!(counter.score(l2p).unwrap(), 1.0 / 3.0, epsilon = 1e-9);
}
