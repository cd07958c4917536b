use std::fmt::Write;

use crate::stats::report::{PassengerReport, SexBreakdown};
use crate::stats::Summary;

// ---------------------------------------------------------------------------
// Plain-text rendering of a report
// ---------------------------------------------------------------------------

/// Render the report as console lines.
///
/// Ages are truncated to whole years, shares shown with one decimal and
/// per-class female survival rounded to a whole percent.
pub fn render(report: &PassengerReport) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_report(&mut out, report);
    out
}

fn write_report(out: &mut String, report: &PassengerReport) -> std::fmt::Result {
    let overview = &report.overview;
    let shares = &report.outcome_rates;
    writeln!(out, "Total passengers: {}", overview["total"])?;
    writeln!(
        out,
        "Survivors: {}({:.1}%)",
        overview["survivors"], shares["survivors"]
    )?;
    writeln!(
        out,
        "Non-survivors: {}({:.1}%)",
        overview["non_survivors"], shares["non_survivors"]
    )?;
    writeln!(out)?;

    let ages = &report.ages;
    writeln!(out, "Mean passenger age: {}", whole_years(ages.mean_all))?;
    writeln!(out, "Mean survivor age: {}", whole_years(ages.mean_survivors))?;
    writeln!(
        out,
        "Mean non-survivor age: {}",
        whole_years(ages.mean_non_survivors)
    )?;
    writeln!(
        out,
        "Unknown ages among survivors: {}({:.1}%)",
        ages.missing_survivors_count, ages.missing_survivors_rate
    )?;
    writeln!(
        out,
        "Unknown ages among non-survivors: {}({:.1}%)",
        ages.missing_non_survivors_count, ages.missing_non_survivors_rate
    )?;
    writeln!(out)?;

    write_classes(out, "Passengers by class", &report.classes)?;
    write_classes(out, "Survivors by class", &report.survivor_classes)?;
    writeln!(out)?;

    write_sexes(out, "Passengers by sex", &report.sexes)?;
    write_sexes(out, "Survivors by sex", &report.survivor_sexes)?;
    writeln!(out)?;

    for row in &report.female_survival {
        writeln!(
            out,
            "Female survivors in class {}: {} of {}({:.0}%)",
            row.class, row.survivor_count, row.count, row.survival_rate
        )?;
    }
    Ok(())
}

fn write_classes(out: &mut String, title: &str, classes: &Summary<usize>) -> std::fmt::Result {
    let parts: Vec<String> = classes
        .iter()
        .map(|(label, n)| format!("{}: {n}", label.replace('_', " ")))
        .collect();
    writeln!(out, "{title}, {}", parts.join(", "))
}

fn write_sexes(out: &mut String, title: &str, sexes: &SexBreakdown) -> std::fmt::Result {
    for (label, n) in sexes.counts.iter() {
        let share = sexes.rates.get(label).copied().unwrap_or_default();
        writeln!(out, "{title} {label}: {n}({share:.1}%)")?;
    }
    Ok(())
}

/// Truncate toward zero, as an integer print of the mean would.
#[allow(clippy::cast_possible_truncation)]
fn whole_years(age: f64) -> i64 {
    age.trunc() as i64
}
