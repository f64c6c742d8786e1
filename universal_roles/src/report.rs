//! Tab-delimited report of universal roles.
use super::counter::UniversalRoleCounter;
use seed_utils::Role;
use std::io::Write;

/// What a report contained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    /// Number of universal roles written.
    pub universal: usize,
    /// Number of them that are not universal in the comparison counter.
    pub failures: usize,
}

/// Write one line per role in `universals` with its good and bad counts
/// in `counter`. If a `comparator` is given, each line also shows the
/// role's score and good count there, and a `Y` when the score falls
/// below `threshold` or no genome was counted.
pub fn write_report<W: Write>(
    wtr: &mut W,
    counter: &UniversalRoleCounter,
    universals: &[&Role],
    comparator: Option<&UniversalRoleCounter>,
    threshold: f64,
) -> std::io::Result<ReportSummary> {
    write!(wtr, "role_id\tdescription\tgood\tbad")?;
    match comparator {
        Some(_) => writeln!(wtr, "\ttest_pct\ttest_count\terror")?,
        None => writeln!(wtr)?,
    }
    let mut summary = ReportSummary::default();
    for role in universals {
        summary.universal += 1;
        write!(
            wtr,
            "{}\t{}\t{}\t{}",
            role.id(),
            role.name(),
            counter.good(role),
            counter.bad(role)
        )?;
        match comparator {
            Some(comparator) => {
                let score = comparator.score(role);
                let failed = score.map_or(true, |score| score < threshold);
                if failed {
                    summary.failures += 1;
                }
                let pct = match score {
                    Some(score) => format!("{:.2}", score),
                    None => "NaN".to_string(),
                };
                let flag = if failed { "Y" } else { "" };
                writeln!(wtr, "\t{}\t{}\t{}", pct, comparator.good(role), flag)?;
            }
            None => writeln!(wtr)?,
        }
    }
    Ok(summary)
}
