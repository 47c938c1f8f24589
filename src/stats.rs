//! Statistics Engine: per-field salary percentiles overall and by company size.
//!
//! Quantiles use linear interpolation between closest ranks (`h = (n - 1) q`),
//! the standard deviation is the sample one. A segment with no values is
//! absent from a field, and a field with no values at all is absent from the
//! result.

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{
    catalog,
    cli::{StatsArgs, SummaryArgs, TopArgs},
    error::SurveyError,
    io_utils, normalize, overrides,
    survey::{SizeCategory, SurveyTable},
    table,
};

/// Fields summarised when no selection is given.
pub const DEFAULT_SUMMARY_FIELDS: usize = 20;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum,
)]
pub enum Segment {
    General,
    Grande,
    Pyme,
}

impl Segment {
    pub const ALL: [Segment; 3] = [Segment::General, Segment::Grande, Segment::Pyme];

    pub fn as_str(self) -> &'static str {
        match self {
            Segment::General => "General",
            Segment::Grande => "Grande",
            Segment::Pyme => "Pyme",
        }
    }

    fn includes(self, category: SizeCategory) -> bool {
        match self {
            Segment::General => true,
            Segment::Grande => category == SizeCategory::Grande,
            Segment::Pyme => category == SizeCategory::Pyme,
        }
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    #[default]
    Computed,
    Override,
}

impl Provenance {
    pub fn as_str(self) -> &'static str {
        match self {
            Provenance::Computed => "computed",
            Provenance::Override => "override",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryStats {
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub mean: f64,
    /// Absent for a single value.
    pub std_dev: Option<f64>,
    pub min: f64,
    pub max: f64,
    pub count: usize,
    #[serde(default)]
    pub provenance: Provenance,
}

impl SalaryStats {
    /// Returns `None` for an empty slice.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let count = sorted.len();
        let mean = sorted.iter().sum::<f64>() / count as f64;
        let std_dev = (count > 1).then(|| {
            let squares = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
            (squares / (count as f64 - 1.0)).sqrt()
        });
        Some(Self {
            p25: quantile(&sorted, 0.25),
            p50: quantile(&sorted, 0.50),
            p75: quantile(&sorted, 0.75),
            mean,
            std_dev,
            min: sorted[0],
            max: sorted[count - 1],
            count,
            provenance: Provenance::Computed,
        })
    }
}

/// Linear-interpolation quantile of an ascending, non-empty slice.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let position = (sorted.len() - 1) as f64 * q.clamp(0.0, 1.0);
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldStatistics {
    pub field: String,
    pub display_name: String,
    /// Position of the field among the table's salary fields.
    pub column_position: usize,
    pub general: SalaryStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grande: Option<SalaryStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pyme: Option<SalaryStats>,
}

impl FieldStatistics {
    pub fn segment(&self, segment: Segment) -> Option<&SalaryStats> {
        match segment {
            Segment::General => Some(&self.general),
            Segment::Grande => self.grande.as_ref(),
            Segment::Pyme => self.pyme.as_ref(),
        }
    }

    pub fn segment_mut(&mut self, segment: Segment) -> Option<&mut SalaryStats> {
        match segment {
            Segment::General => Some(&mut self.general),
            Segment::Grande => self.grande.as_mut(),
            Segment::Pyme => self.pyme.as_mut(),
        }
    }

    pub fn segments(&self) -> impl Iterator<Item = (Segment, &SalaryStats)> {
        Segment::ALL
            .into_iter()
            .filter_map(|segment| self.segment(segment).map(|stats| (segment, stats)))
    }

    pub fn respondents(&self) -> usize {
        self.general.count
    }

    /// Grande-vs-Pyme P50 difference relative to Pyme, in percent.
    pub fn size_gap_pct(&self) -> Option<f64> {
        let grande = self.grande.as_ref()?;
        let pyme = self.pyme.as_ref()?;
        (pyme.p50 != 0.0).then(|| (grande.p50 - pyme.p50) / pyme.p50 * 100.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurveyStatistics {
    pub fields: Vec<FieldStatistics>,
}

impl SurveyStatistics {
    pub fn compute(survey: &SurveyTable) -> Self {
        let categories = survey.size_categories();
        let mut fields = Vec::new();
        for (position, (name, values)) in survey.salary_fields().enumerate() {
            let Some(general) = segment_stats(values, categories, Segment::General) else {
                debug!("Skipping '{name}': no values");
                continue;
            };
            fields.push(FieldStatistics {
                field: name.to_string(),
                display_name: catalog::display_name(name),
                column_position: position,
                general,
                grande: segment_stats(values, categories, Segment::Grande),
                pyme: segment_stats(values, categories, Segment::Pyme),
            });
        }
        info!("Computed statistics for {} salary field(s)", fields.len());
        Self { fields }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&FieldStatistics> {
        self.fields.iter().find(|f| f.field == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FieldStatistics> {
        self.fields.iter_mut().find(|f| f.field == name)
    }

    /// Like [`SurveyStatistics::field`] but an unknown name is an error.
    pub fn require(&self, name: &str) -> Result<&FieldStatistics, SurveyError> {
        self.field(name).ok_or_else(|| SurveyError::UnknownField {
            field: name.to_string(),
        })
    }

    /// The `n` fields with most respondents; ties keep column order.
    pub fn top_fields(&self, n: usize) -> Vec<&FieldStatistics> {
        let mut ranked = self.fields.iter().collect::<Vec<_>>();
        ranked.sort_by(|a, b| {
            b.respondents()
                .cmp(&a.respondents())
                .then(a.column_position.cmp(&b.column_position))
        });
        ranked.truncate(n);
        ranked
    }

    /// One row per selected field, or per top field when `selected` is `None`.
    /// Selected names without statistics are skipped.
    pub fn summary_rows(&self, selected: Option<&[String]>) -> Vec<SummaryRow> {
        let fields = match selected {
            Some(names) => names
                .iter()
                .filter_map(|name| {
                    let found = self.field(name);
                    if found.is_none() {
                        debug!("No statistics for '{name}'; left out of summary");
                    }
                    found
                })
                .collect::<Vec<_>>(),
            None => self.top_fields(DEFAULT_SUMMARY_FIELDS),
        };
        fields.into_iter().map(SummaryRow::from_field).collect()
    }
}

fn segment_stats(
    values: &[Option<f64>],
    categories: Option<&[SizeCategory]>,
    segment: Segment,
) -> Option<SalaryStats> {
    let selected = match (segment, categories) {
        (Segment::General, _) => values.iter().flatten().copied().collect::<Vec<_>>(),
        (_, Some(categories)) => values
            .iter()
            .zip(categories)
            .filter(|(_, category)| segment.includes(**category))
            .filter_map(|(value, _)| *value)
            .collect(),
        (_, None) => return None,
    };
    SalaryStats::from_values(&selected)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    #[serde(rename = "Campo")]
    pub field: String,
    #[serde(rename = "Cargo")]
    pub name: String,
    #[serde(rename = "Respuestas")]
    pub respondents: usize,
    #[serde(rename = "P25_General")]
    pub general_p25: f64,
    #[serde(rename = "P50_General")]
    pub general_p50: f64,
    #[serde(rename = "P75_General")]
    pub general_p75: f64,
    #[serde(rename = "Promedio_General")]
    pub general_mean: f64,
    #[serde(rename = "P25_Grande")]
    pub grande_p25: Option<f64>,
    #[serde(rename = "P50_Grande")]
    pub grande_p50: Option<f64>,
    #[serde(rename = "P75_Grande")]
    pub grande_p75: Option<f64>,
    #[serde(rename = "P25_Pyme")]
    pub pyme_p25: Option<f64>,
    #[serde(rename = "P50_Pyme")]
    pub pyme_p50: Option<f64>,
    #[serde(rename = "P75_Pyme")]
    pub pyme_p75: Option<f64>,
    #[serde(rename = "Brecha_Grande_Pyme_%")]
    pub gap_pct: Option<f64>,
}

impl SummaryRow {
    pub const HEADERS: [&'static str; 14] = [
        "Campo",
        "Cargo",
        "Respuestas",
        "P25_General",
        "P50_General",
        "P75_General",
        "Promedio_General",
        "P25_Grande",
        "P50_Grande",
        "P75_Grande",
        "P25_Pyme",
        "P50_Pyme",
        "P75_Pyme",
        "Brecha_Grande_Pyme_%",
    ];

    fn from_field(stats: &FieldStatistics) -> Self {
        Self {
            field: stats.field.clone(),
            name: stats.display_name.clone(),
            respondents: stats.respondents(),
            general_p25: stats.general.p25,
            general_p50: stats.general.p50,
            general_p75: stats.general.p75,
            general_mean: stats.general.mean,
            grande_p25: stats.grande.as_ref().map(|s| s.p25),
            grande_p50: stats.grande.as_ref().map(|s| s.p50),
            grande_p75: stats.grande.as_ref().map(|s| s.p75),
            pyme_p25: stats.pyme.as_ref().map(|s| s.p25),
            pyme_p50: stats.pyme.as_ref().map(|s| s.p50),
            pyme_p75: stats.pyme.as_ref().map(|s| s.p75),
            gap_pct: stats.size_gap_pct(),
        }
    }

    pub fn render(&self) -> Vec<String> {
        vec![
            self.field.clone(),
            self.name.clone(),
            self.respondents.to_string(),
            table::format_amount(self.general_p25),
            table::format_amount(self.general_p50),
            table::format_amount(self.general_p75),
            table::format_amount(self.general_mean),
            table::format_optional_amount(self.grande_p25),
            table::format_optional_amount(self.grande_p50),
            table::format_optional_amount(self.grande_p75),
            table::format_optional_amount(self.pyme_p25),
            table::format_optional_amount(self.pyme_p50),
            table::format_optional_amount(self.pyme_p75),
            self.gap_pct.map(table::format_percent).unwrap_or_default(),
        ]
    }
}

pub fn write_summary_csv(rows: &[SummaryRow], path: &Path) -> Result<()> {
    let mut writer = io_utils::open_csv_writer(Some(path), io_utils::DEFAULT_CSV_DELIMITER)?;
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("Writing summary row for '{}'", row.field))?;
    }
    writer.flush().context("Flushing summary output")?;
    info!("Summary with {} row(s) written to {:?}", rows.len(), path);
    Ok(())
}

/// Computes statistics and applies the override table at `overrides`, if any.
pub fn compute_with_overrides(
    survey: &SurveyTable,
    overrides: Option<&Path>,
) -> Result<SurveyStatistics> {
    let mut statistics = SurveyStatistics::compute(survey);
    if let Some(path) = overrides {
        let table = overrides::OverrideTable::load(path)?;
        let report = table.apply(&mut statistics);
        report.log();
    }
    Ok(statistics)
}

fn headers(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

pub fn execute(args: &StatsArgs) -> Result<()> {
    let survey = normalize::load_survey(&args.input)?;
    let statistics = compute_with_overrides(&survey, args.overrides.as_deref())?;

    let selected = if args.fields.is_empty() {
        statistics.fields.iter().collect::<Vec<_>>()
    } else {
        args.fields
            .iter()
            .map(|name| statistics.require(name))
            .collect::<Result<Vec<_>, _>>()?
    };

    if args.json {
        let json = serde_json::to_string_pretty(&selected).context("Serializing statistics")?;
        println!("{json}");
        return Ok(());
    }

    let mut rows = Vec::new();
    for field in &selected {
        for (segment, stats) in field.segments() {
            if args.segment.is_some_and(|wanted| wanted != segment) {
                continue;
            }
            rows.push(vec![
                field.field.clone(),
                segment.to_string(),
                stats.count.to_string(),
                table::format_amount(stats.p25),
                table::format_amount(stats.p50),
                table::format_amount(stats.p75),
                table::format_amount(stats.mean),
                table::format_optional_amount(stats.std_dev),
                table::format_amount(stats.min),
                table::format_amount(stats.max),
                stats.provenance.as_str().to_string(),
            ]);
        }
    }
    table::print_table(
        &headers(&[
            "field", "segment", "count", "p25", "p50", "p75", "mean", "std_dev", "min", "max",
            "source",
        ]),
        &rows,
    );
    if let [only] = selected.as_slice() {
        if let Some(job) = catalog::job_title(&only.field) {
            println!();
            println!("{}: {}", job.name, job.description);
        }
        if let Some(area) = catalog::area_of(&only.field) {
            println!("Area: {}", area.name);
        }
    }
    info!("Reported statistics for {} field(s)", selected.len());
    Ok(())
}

pub fn execute_top(args: &TopArgs) -> Result<()> {
    let survey = normalize::load_survey(&args.input)?;
    let statistics = SurveyStatistics::compute(&survey);
    let rows = statistics
        .top_fields(args.top)
        .into_iter()
        .enumerate()
        .map(|(rank, field)| {
            vec![
                (rank + 1).to_string(),
                field.field.clone(),
                field.display_name.clone(),
                field.respondents().to_string(),
            ]
        })
        .collect::<Vec<_>>();
    table::print_table(&headers(&["rank", "field", "name", "respondents"]), &rows);
    Ok(())
}

pub fn execute_summary(args: &SummaryArgs) -> Result<()> {
    let survey = normalize::load_survey(&args.input)?;
    let statistics = compute_with_overrides(&survey, args.overrides.as_deref())?;

    let mut selected = args.fields.clone();
    if let Some(area_name) = &args.area {
        let area = catalog::functional_area(area_name)
            .with_context(|| format!("Unknown functional area '{area_name}'"))?;
        selected.extend(area.salary_fields());
    }
    if selected.is_empty() {
        selected = statistics
            .top_fields(args.top)
            .into_iter()
            .map(|f| f.field.clone())
            .collect();
    }
    let rows = statistics.summary_rows(Some(&selected));

    let rendered = rows.iter().map(SummaryRow::render).collect::<Vec<_>>();
    table::print_table(&headers(&SummaryRow::HEADERS), &rendered);
    if let Some(output) = &args.output {
        write_summary_csv(&rows, output)?;
    }
    Ok(())
}
