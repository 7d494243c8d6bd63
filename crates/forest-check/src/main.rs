/// Offline integrity battery for forests-with-districts.json.
///
/// Every forest with districts is classed as perfect (strict tolerance),
/// minor (lenient tolerance: 10 records, 5 miles) or major. Any strict
/// violation makes the run fail.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use forest_core::artifact::load_forests;
use forest_core::integrity::{IntegrityReport, Violation};
use forest_core::paths::{self, DataDir};

#[derive(Parser, Debug)]
#[command(name = "forest-check", about = "Data integrity battery for the forest artifact")]
struct Args {
    /// Directory holding the artifact
    #[arg(short, long, default_value = paths::DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// List every violation, including minor ones
    #[arg(short, long)]
    verbose: bool,
}

fn pct(n: usize, of: usize) -> f64 {
    if of == 0 {
        0.0
    } else {
        100.0 * n as f64 / of as f64
    }
}

fn print_group(title: &str, group: &[(String, Vec<Violation>)]) {
    if group.is_empty() {
        return;
    }
    println!("{title}:");
    for (name, violations) in group {
        println!("\n{name}:");
        for v in violations {
            println!("  - {v}");
        }
    }
    println!("\n{}", "=".repeat(40));
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stdout)
        .init();
    let args = Args::parse();
    let dir = DataDir::new(&args.data_dir);
    let forests = load_forests(&dir.artifact()).context("loading forests with districts")?;

    let report = IntegrityReport::build(&forests);
    let total = report.with_districts;
    let minor = report.minor.len();
    let major = report.major.len();

    println!("{}", "=".repeat(40));
    println!("DATA INTEGRITY SUMMARY");
    println!("{}", "=".repeat(40));
    println!("Total forests analyzed: {total}");
    println!("Forests without ranger districts: {}", report.without_districts.len());
    println!();
    println!("Perfect aggregation:  {:>4} ({:.1}%)", report.perfect, pct(report.perfect, total));
    println!("Minor discrepancies:  {:>4} ({:.1}%)", minor, pct(minor, total));
    println!("Major data issues:    {:>4} ({:.1}%)", major, pct(major, total));
    println!();
    println!(
        "Overall passing rate: {} / {} ({:.1}%)",
        report.perfect + minor,
        total,
        pct(report.perfect + minor, total)
    );
    println!("{}", "=".repeat(40));

    print_group("FORESTS WITH MAJOR DATA ISSUES", &report.major);
    if args.verbose {
        print_group("FORESTS WITH MINOR DISCREPANCIES", &report.minor);
    }
    if !report.without_districts.is_empty() {
        println!("FORESTS WITHOUT RANGER DISTRICTS:");
        for name in &report.without_districts {
            println!("  {name}");
        }
    }

    if !report.is_clean() {
        bail!("{} forests fail strict integrity checks", report.strict_violations());
    }
    Ok(())
}
