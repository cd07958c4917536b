use serde::Serialize;

use crate::data::filter::{is_female, split_by_outcome};
use crate::data::group::Grouping;
use crate::data::model::{PassengerClass, PassengerRecord, PassengerTable, Sex, Subset};

use super::aggregate::{count, group_counts, mean_age};
use super::error::Result;
use super::rate::{combined_rate, rate};
use super::summary::Summary;

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

/// Age means per outcome and how many ages are unknown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeReport {
    /// Unweighted average of `mean_survivors` and `mean_non_survivors`.
    /// This is not the pooled mean over every known age.
    pub mean_all: f64,
    pub mean_survivors: f64,
    pub mean_non_survivors: f64,
    pub missing_survivors_count: usize,
    pub missing_non_survivors_count: usize,
    /// Missing ages relative to the known ages of the same group.
    pub missing_survivors_rate: f64,
    pub missing_non_survivors_rate: f64,
}

/// Male / female counts and their shares of the combined total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SexBreakdown {
    pub counts: Summary<usize>,
    pub rates: Summary<f64>,
}

/// Female passengers of one class and how many of them survived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassSurvival {
    pub class: PassengerClass,
    pub count: usize,
    pub survivor_count: usize,
    pub survival_rate: f64,
}

/// Everything the explorer shows for one table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassengerReport {
    pub overview: Summary<usize>,
    pub outcome_rates: Summary<f64>,
    pub ages: AgeReport,
    pub classes: Summary<usize>,
    pub survivor_classes: Summary<usize>,
    pub sexes: SexBreakdown,
    pub survivor_sexes: SexBreakdown,
    pub female_survival: Vec<ClassSurvival>,
}

// ---------------------------------------------------------------------------
// Assembly steps
// ---------------------------------------------------------------------------

/// `total`, `survivors` and `non_survivors`; the last two partition the
/// table.
pub fn overview(table: &PassengerTable) -> Summary<usize> {
    let all = table.all();
    let outcome = split_by_outcome(&all);
    let mut summary = Summary::new();
    summary.insert("total", count(&all));
    summary.insert("survivors", count(&outcome.survivors));
    summary.insert("non_survivors", count(&outcome.non_survivors));
    summary
}

/// Survivor and non-survivor shares of the whole table.
pub fn outcome_rates(survivors: usize, non_survivors: usize) -> Result<Summary<f64>> {
    let (survivors_rate, non_survivors_rate) = combined_rate(survivors, non_survivors)?;
    let mut summary = Summary::new();
    summary.insert("survivors", survivors_rate);
    summary.insert("non_survivors", non_survivors_rate);
    Ok(summary)
}

pub fn age_report(survivors: &Subset<'_>, non_survivors: &Subset<'_>) -> Result<AgeReport> {
    let surv = mean_age(survivors, "survivors")?;
    let non_surv = mean_age(non_survivors, "non_survivors")?;

    if surv.excluded_count + non_surv.excluded_count > 0 {
        log::warn!(
            "{} survivor and {} non-survivor ages are unknown",
            surv.excluded_count,
            non_surv.excluded_count
        );
    }

    Ok(AgeReport {
        mean_all: (surv.mean + non_surv.mean) / 2.0,
        mean_survivors: surv.mean,
        mean_non_survivors: non_surv.mean,
        missing_survivors_count: surv.excluded_count,
        missing_non_survivors_count: non_surv.excluded_count,
        missing_survivors_rate: rate(surv.excluded_count, surv.known_count)?,
        missing_non_survivors_rate: rate(non_surv.excluded_count, non_surv.known_count)?,
    })
}

/// `class_1`, `class_2`, `class_3` counts. Every class must be in the
/// grouping's domain.
pub fn class_breakdown(by_class: &Grouping<'_, PassengerClass>) -> Result<Summary<usize>> {
    Ok(group_counts(by_class, &PassengerClass::ALL)?
        .into_iter()
        .map(|(class, n)| (class.label(), n))
        .collect())
}

pub fn sex_breakdown(male_count: usize, female_count: usize) -> Result<SexBreakdown> {
    let (male_rate, female_rate) = combined_rate(male_count, female_count)?;
    let counts = [(Sex::Male.label(), male_count), (Sex::Female.label(), female_count)]
        .into_iter()
        .collect();
    let rates = [(Sex::Male.label(), male_rate), (Sex::Female.label(), female_rate)]
        .into_iter()
        .collect();
    Ok(SexBreakdown { counts, rates })
}

/// Per-class (count, survivor_count, survival_rate) for female passengers.
pub fn female_survival_by_class(
    females: &Grouping<'_, PassengerClass>,
    female_survivors: &Grouping<'_, PassengerClass>,
) -> Result<Vec<ClassSurvival>> {
    let totals = group_counts(females, &PassengerClass::ALL)?;
    let survivors = group_counts(female_survivors, &PassengerClass::ALL)?;

    totals
        .into_iter()
        .zip(survivors)
        .map(|((class, count), (_, survivor_count))| {
            Ok(ClassSurvival {
                class,
                count,
                survivor_count,
                survival_rate: rate(survivor_count, count)?,
            })
        })
        .collect()
}

/// Run the full pipeline over `table`.
///
/// Groupings are built over the closed class and sex domains, so a class or
/// sex without rows reports 0 rather than failing.
pub fn assemble(table: &PassengerTable) -> Result<PassengerReport> {
    let all = table.all();
    let outcome = split_by_outcome(&all);
    log::debug!(
        "assembling report: {} passengers, {} survivors",
        all.len(),
        outcome.survivors.len()
    );

    let overview = overview(table);
    let outcome_rates = outcome_rates(
        count(&outcome.survivors),
        count(&outcome.non_survivors),
    )?;
    let ages = age_report(&outcome.survivors, &outcome.non_survivors)?;

    let class_of = |r: &PassengerRecord| r.class;
    let sex_of = |r: &PassengerRecord| r.sex;

    let classes = class_breakdown(&Grouping::over_domain(&all, class_of, &PassengerClass::ALL))?;
    let survivor_classes = class_breakdown(&Grouping::over_domain(
        &outcome.survivors,
        class_of,
        &PassengerClass::ALL,
    ))?;
    log::debug!("class breakdown done");

    let sexes = sex_breakdown_of(&Grouping::over_domain(&all, sex_of, &Sex::ALL))?;
    let survivor_sexes =
        sex_breakdown_of(&Grouping::over_domain(&outcome.survivors, sex_of, &Sex::ALL))?;
    log::debug!("sex breakdown done");

    let females = all.filter(is_female);
    let female_survivors = outcome.survivors.filter(is_female);
    let female_survival = female_survival_by_class(
        &Grouping::over_domain(&females, class_of, &PassengerClass::ALL),
        &Grouping::over_domain(&female_survivors, class_of, &PassengerClass::ALL),
    )?;
    log::debug!("female survival by class done");

    Ok(PassengerReport {
        overview,
        outcome_rates,
        ages,
        classes,
        survivor_classes,
        sexes,
        survivor_sexes,
        female_survival,
    })
}

fn sex_breakdown_of(by_sex: &Grouping<'_, Sex>) -> Result<SexBreakdown> {
    let counts = group_counts(by_sex, &Sex::ALL)?;
    sex_breakdown(counts[0].1, counts[1].1)
}
