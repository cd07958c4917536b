use crate::data::model::PassengerTable;
use crate::stats::report::{assemble, PassengerReport};
use crate::stats::Summary;

// ---------------------------------------------------------------------------
// Chart selection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    #[default]
    Overview,
    PassengerClasses,
    SurvivorClasses,
    PassengerSexes,
    SurvivorSexes,
    FemaleSurvival,
}

impl ChartKind {
    pub const ALL: [ChartKind; 6] = [
        ChartKind::Overview,
        ChartKind::PassengerClasses,
        ChartKind::SurvivorClasses,
        ChartKind::PassengerSexes,
        ChartKind::SurvivorSexes,
        ChartKind::FemaleSurvival,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::Overview => "Overview",
            ChartKind::PassengerClasses => "Passengers by class",
            ChartKind::SurvivorClasses => "Survivors by class",
            ChartKind::PassengerSexes => "Passengers by sex",
            ChartKind::SurvivorSexes => "Survivors by sex",
            ChartKind::FemaleSurvival => "Female survivors by class",
        }
    }

    /// The values shown in the side-panel table for this chart.
    pub fn table_rows(self, report: &PassengerReport) -> Vec<(String, String)> {
        fn counts(summary: &Summary<usize>) -> Vec<(String, String)> {
            summary
                .iter()
                .map(|(l, n)| (l.to_string(), n.to_string()))
                .collect()
        }

        match self {
            ChartKind::Overview => counts(&report.overview),
            ChartKind::PassengerClasses => counts(&report.classes),
            ChartKind::SurvivorClasses => counts(&report.survivor_classes),
            ChartKind::PassengerSexes | ChartKind::SurvivorSexes => {
                let sexes = if self == ChartKind::PassengerSexes {
                    &report.sexes
                } else {
                    &report.survivor_sexes
                };
                sexes
                    .counts
                    .iter()
                    .map(|(l, n)| {
                        let share = sexes.rates.get(l).copied().unwrap_or_default();
                        (l.to_string(), format!("{n} ({share:.1}%)"))
                    })
                    .collect()
            }
            ChartKind::FemaleSurvival => report
                .female_survival
                .iter()
                .map(|row| {
                    (
                        row.class.label(),
                        format!(
                            "{} / {} ({:.0}%)",
                            row.survivor_count, row.count, row.survival_rate
                        ),
                    )
                })
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded table (None until user loads a file).
    pub table: Option<PassengerTable>,

    /// Report assembled from `table`; None if assembly failed.
    pub report: Option<PassengerReport>,

    /// Chart shown in the central panel.
    pub chart: ChartKind,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Ingest a newly loaded table and assemble its report.
    pub fn set_table(&mut self, table: PassengerTable) {
        match assemble(&table) {
            Ok(report) => {
                self.report = Some(report);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to assemble report: {e}");
                self.report = None;
                self.status_message = Some(format!("Report error: {e}"));
            }
        }
        self.table = Some(table);
    }
}
