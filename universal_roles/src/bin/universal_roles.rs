extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate rayon;
extern crate seed_utils;
extern crate universal_roles;
use clap::{App, Arg, ArgMatches};
use seed_utils::{GenomeDirectory, RoleMap};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use universal_roles::report::write_report;
use universal_roles::UniversalRoleCounter;

/// Genomes parsed at once, per thread.
const GENOMES_PER_THREAD: usize = 4;

#[derive(Debug)]
struct Config {
    roles: PathBuf,
    threshold: f64,
    save: Option<PathBuf>,
    compare: Option<PathBuf>,
    genome_dirs: Vec<PathBuf>,
    threads: usize,
}

fn invalid_input(message: String) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidInput, message)
}

impl Config {
    fn from_matches(matches: &ArgMatches) -> std::io::Result<Self> {
        let roles = matches
            .value_of("roles")
            .map(PathBuf::from)
            .ok_or_else(|| invalid_input("please specify a role file.".to_string()))?;
        let threshold: f64 = match matches.value_of("threshold") {
            Some(arg) => arg
                .parse()
                .map_err(|_| invalid_input(format!("{} is not a number.", arg)))?,
            None => universal_roles::DEFAULT_THRESHOLD,
        };
        if !(0.0..=1.0).contains(&threshold) {
            return Err(invalid_input(format!(
                "threshold {} must be between 0 and 1.",
                threshold
            )));
        }
        let threads: usize = match matches.value_of("threads") {
            Some(arg) => arg
                .parse()
                .map_err(|_| invalid_input(format!("{} is not a thread count.", arg)))?,
            None => 1,
        };
        let save = matches.value_of("save").map(PathBuf::from);
        let compare = matches.value_of("compare").map(PathBuf::from);
        if let Some(ref compare) = compare {
            if !compare.exists() {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("{} not found on disk.", compare.display()),
                ));
            }
        }
        let genome_dirs = matches
            .values_of("genome_dirs")
            .map(|dirs| dirs.map(PathBuf::from).collect())
            .unwrap_or_else(Vec::new);
        Ok(Self {
            roles,
            threshold,
            save,
            compare,
            genome_dirs,
            threads: threads.max(1),
        })
    }
}

fn run(config: &Config) -> std::io::Result<()> {
    let roles = RoleMap::load(&config.roles)?;
    info!("{} roles of interest.", roles.len());
    // Check every directory before counting anything.
    let genome_dirs = config
        .genome_dirs
        .iter()
        .map(GenomeDirectory::new)
        .collect::<std::io::Result<Vec<_>>>()?;
    let mut counter = UniversalRoleCounter::new(roles);
    for genome_dir in genome_dirs.iter() {
        info!("Processing {}.", genome_dir.path().display());
        for genomes in genome_dir.load_chunks(config.threads * GENOMES_PER_THREAD) {
            let genomes = genomes?;
            for genome in genomes.iter() {
                debug!("Parsed {}.", genome);
            }
            counter.count_all(&genomes);
        }
    }
    info!("{} genomes counted.", counter.counted());
    if counter.counted() == 0 {
        warn!("No genomes were counted. Every counted role is trivially universal.");
    }
    if let Some(ref save) = config.save {
        info!("Saving results to {}.", save.display());
        counter.save(save)?;
    }
    let universals = counter.universals(config.threshold);
    let comparator = match config.compare {
        Some(ref compare) => {
            info!("Loading comparison data from {}.", compare.display());
            Some(UniversalRoleCounter::load(compare)?)
        }
        None => None,
    };
    let stdout = std::io::stdout();
    let mut wtr = BufWriter::new(stdout.lock());
    let summary = write_report(
        &mut wtr,
        &counter,
        &universals,
        comparator.as_ref(),
        config.threshold,
    )?;
    wtr.flush()?;
    info!("{} universal roles found.", summary.universal);
    if comparator.is_some() {
        info!("Failure count is {}.", summary.failures);
    }
    Ok(())
}

fn main() {
    let matches = App::new("universal_roles")
        .version("0.1")
        .author("Bansho Masutani")
        .about("List the roles occurring singly in nearly every genome.")
        .arg(
            Arg::with_name("roles")
                .required(true)
                .short("R")
                .long("roles")
                .value_name("ROLE_FILE")
                .help("Roles of interest<TSV: role ID, role name>")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("threshold")
                .short("t")
                .long("threshold")
                .value_name("FRACTION")
                .help("Minimum fraction of genomes in which a universal role must occur singly")
                .default_value(&"0.90")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("save")
                .short("o")
                .long("save")
                .value_name("SAVE_FILE")
                .help("File to which the counts are saved")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("compare")
                .long("compare")
                .value_name("SAVE_FILE")
                .help("Saved counts to compare the universal roles against")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("threads")
                .long("threads")
                .value_name("THREADS")
                .help("Number of Threads")
                .default_value(&"1")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Output debug to the standard error."),
        )
        .arg(
            Arg::with_name("genome_dirs")
                .value_name("GENOME_DIR")
                .help("Directories of GTO files")
                .multiple(true)
                .index(1),
        )
        .get_matches();
    let level = match matches.occurrences_of("verbose") {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    let config = match Config::from_matches(&matches) {
        Ok(config) => config,
        Err(why) => {
            error!("{}", why);
            std::process::exit(1);
        }
    };
    debug!("{:?}", config);
    if let Err(why) = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build_global()
    {
        error!("{}", why);
        std::process::exit(1);
    }
    if let Err(why) = run(&config) {
        error!("{}", why);
        std::process::exit(1);
    }
}
