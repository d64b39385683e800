//! Gap Engine CLI
//!
//! Computes the coverage-gap report for a household (from a JSON file or a
//! built-in sample) and optionally writes a monthly timeline CSV.

use anyhow::Context;
use chrono::{Datelike, NaiveDate};
use clap::Parser;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use gap_engine::household::{self, AvsCareer, LppInputs, MaritalStatus, ThirdPillarInputs};
use gap_engine::{
    EventCause, GapStack, Household, ScenarioRunner, TimelineTheme,
};

#[derive(Parser)]
#[command(name = "gap-engine", about = "Coverage-gap report for a household")]
struct Args {
    /// Household JSON file; a built-in sample is used when absent
    #[arg(long)]
    input: Option<PathBuf>,

    /// Reference date (YYYY-MM-DD) injected into the computation
    #[arg(long)]
    reference: Option<NaiveDate>,

    /// Parameter directory with CSV overrides (compiled-in defaults otherwise)
    #[arg(long)]
    params: Option<PathBuf>,

    /// Write the disability timeline to this CSV file
    #[arg(long)]
    timeline_csv: Option<PathBuf>,

    /// Timeline horizon in years
    #[arg(long, default_value_t = 20)]
    horizon_years: u32,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let runner = match &args.params {
        Some(dir) => ScenarioRunner::from_csv_path(dir)
            .with_context(|| format!("loading parameters from {}", dir.display()))?,
        None => ScenarioRunner::new(),
    };

    let household = match &args.input {
        Some(path) => household::load_household(path)
            .map_err(|e| anyhow::anyhow!("loading household from {}: {}", path.display(), e))?,
        None => sample_household(),
    };

    let reference = args
        .reference
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    println!("Gap Engine v0.1.0");
    println!("=================\n");
    println!("Annual income: CHF {:.0}", household.income.annual);
    println!("Reference date: {}\n", reference);

    let result = runner.run(&household, reference);

    println!(
        "Targets: invalidity {:.0}% ({:.0}/month), death {:.0}% ({:.0}/month), retirement {:.0}% ({:.0}/month)\n",
        result.targets_pct.invalidity_pct,
        result.targets_monthly.invalidity,
        result.targets_pct.death_pct,
        result.targets_monthly.death,
        result.targets_pct.retirement_pct,
        result.targets_monthly.retirement,
    );

    print_stack("Disability / sickness", &result.invalidity.maladie);
    print_stack("Disability / accident", &result.invalidity.accident);
    print_stack("Death / sickness", &result.death.maladie);
    print_stack("Death / accident", &result.death.accident);
    if let Some(capital) = result.death.capital {
        println!("  Death capital (LPP): CHF {:.0}\n", capital);
    }
    print_stack("Retirement", &result.retirement);

    if let Some(path) = &args.timeline_csv {
        let start = reference;
        let end = add_years(reference, args.horizon_years);
        let timeline = runner.run_timeline(
            &household,
            TimelineTheme::Disability,
            household.ctx.cause_invalidity,
            start,
            end,
        );

        let mut file = File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        writeln!(file, "Month,Target,Covered,Gap,AVS,LPP,LAA,P3")?;
        for p in &timeline.data {
            writeln!(
                file,
                "{},{:.0},{:.0},{:.0},{:.0},{:.0},{:.0},{:.0}",
                p.month, p.target, p.covered, p.gap, p.avs, p.lpp, p.laa, p.p3
            )?;
        }
        println!("Timeline written to: {}", path.display());
        for marker in &timeline.markers {
            println!("  marker {}: {}", marker.x, marker.label);
        }
    }

    Ok(())
}

fn print_stack(title: &str, stack: &GapStack) {
    println!("{}", title);
    println!(
        "  target {:>8.0}  covered {:>8.0}  gap {:>8.0}",
        stack.target, stack.covered, stack.gap
    );
    for seg in &stack.segments {
        println!(
            "    {:<28} {:>8.0} {:>5} {}",
            seg.label,
            seg.value,
            format!("{:?}", seg.source),
            if seg.estimated { "(estimated)" } else { "" },
        );
    }
    println!();
}

fn add_years(date: NaiveDate, years: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year() + years as i32, date.month(), 1).unwrap_or(date)
}

/// The known child birthdates activate the AVS career override: all AVS
/// figures come out of the scale estimate and are flagged as estimated.
fn sample_household() -> Household {
    let mut h = Household::new(95_000.0);
    h.ctx.avs_career = Some(AvsCareer {
        start_year: Some(2007),
        ..Default::default()
    });
    h.benefits.lpp = LppInputs {
        invalidity_monthly: Some(2_000.0),
        widow_monthly: Some(1_200.0),
        orphan_monthly: Some(400.0),
        retirement_annual_from_cert: Some(24_000.0),
        ..Default::default()
    };
    h.benefits.third_pillar = ThirdPillarInputs {
        invalidity_monthly: Some(500.0),
        death_monthly: Some(500.0),
        retirement_monthly: Some(300.0),
    };
    h.ctx.survivor.marital_status = MaritalStatus::Married;
    h.ctx.survivor.has_child = true;
    h.ctx.children_count = 2;
    h.ctx.children_birthdates = vec![
        NaiveDate::from_ymd_opt(2015, 3, 10),
        NaiveDate::from_ymd_opt(2018, 9, 2),
    ];
    h.ctx.birth_date = NaiveDate::from_ymd_opt(1985, 6, 15);
    h.ctx.cause_invalidity = EventCause::Sickness;
    h
}
