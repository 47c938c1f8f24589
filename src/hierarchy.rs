//! Salary ranges per hierarchy level, pooling every field of the level.

use anyhow::Result;
use log::info;

use crate::{
    catalog::{HIERARCHY_LEVELS, HierarchyLevel},
    cli::HierarchyArgs,
    normalize,
    stats::SalaryStats,
    survey::{SizeCategory, SurveyTable},
    table,
};

#[derive(Debug, Clone, PartialEq)]
pub struct LevelRange {
    pub level: &'static str,
    pub stats: SalaryStats,
}

/// Pools the positive values of each level's fields, optionally restricted
/// to one size category. Levels without values are left out.
pub fn hierarchy_ranges(survey: &SurveyTable, category: Option<SizeCategory>) -> Vec<LevelRange> {
    let rows = row_filter(survey, category);
    HIERARCHY_LEVELS
        .iter()
        .filter_map(|level| {
            let pooled = pool(survey, level, &rows);
            SalaryStats::from_values(&pooled).map(|stats| LevelRange {
                level: level.name,
                stats,
            })
        })
        .collect()
}

fn row_filter(survey: &SurveyTable, category: Option<SizeCategory>) -> Vec<bool> {
    match (category, survey.size_categories()) {
        (None, _) => vec![true; survey.row_count()],
        (Some(wanted), Some(categories)) => categories.iter().map(|c| *c == wanted).collect(),
        (Some(_), None) => vec![false; survey.row_count()],
    }
}

fn pool(survey: &SurveyTable, level: &HierarchyLevel, rows: &[bool]) -> Vec<f64> {
    level
        .fields
        .iter()
        .filter_map(|field| survey.salary(field))
        .flat_map(|values| {
            values
                .iter()
                .zip(rows)
                .filter_map(|(value, keep)| value.filter(|v| *keep && *v > 0.0))
        })
        .collect()
}

/// Grande-vs-Pyme P50 difference per level present in both.
pub fn level_gaps(grande: &[LevelRange], pyme: &[LevelRange]) -> Vec<(&'static str, f64)> {
    grande
        .iter()
        .filter_map(|g| {
            let p = pyme.iter().find(|p| p.level == g.level)?;
            (p.stats.p50 > 0.0)
                .then(|| (g.level, (g.stats.p50 - p.stats.p50) / p.stats.p50 * 100.0))
        })
        .collect()
}

pub fn execute(args: &HierarchyArgs) -> Result<()> {
    let survey = normalize::load_survey(&args.input)?;
    let headers = ["level", "count", "p25", "p50", "p75", "mean"]
        .iter()
        .map(|h| h.to_string())
        .collect::<Vec<_>>();
    let render = |ranges: &[LevelRange]| {
        ranges
            .iter()
            .map(|range| {
                vec![
                    range.level.to_string(),
                    range.stats.count.to_string(),
                    table::format_amount(range.stats.p25),
                    table::format_amount(range.stats.p50),
                    table::format_amount(range.stats.p75),
                    table::format_amount(range.stats.mean),
                ]
            })
            .collect::<Vec<_>>()
    };

    if let Some(category) = args.category {
        let ranges = hierarchy_ranges(&survey, Some(category));
        table::print_table(&headers, &render(&ranges));
        return Ok(());
    }

    let general = hierarchy_ranges(&survey, None);
    table::print_section("General", &headers, &render(&general));
    if survey.size_categories().is_some() {
        let grande = hierarchy_ranges(&survey, Some(SizeCategory::Grande));
        let pyme = hierarchy_ranges(&survey, Some(SizeCategory::Pyme));
        table::print_section("Grande", &headers, &render(&grande));
        table::print_section("Pyme", &headers, &render(&pyme));
        let gaps = level_gaps(&grande, &pyme)
            .into_iter()
            .map(|(level, gap)| vec![level.to_string(), table::format_percent(gap)])
            .collect::<Vec<_>>();
        table::print_section(
            "Grande vs Pyme (P50)",
            &["level".to_string(), "gap".to_string()],
            &gaps,
        );
    }
    info!("Reported hierarchy ranges for {} level(s)", general.len());
    Ok(())
}
