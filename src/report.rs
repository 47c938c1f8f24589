//! Overview report: participation, most answered positions and the salary
//! summary table, all drawn from one cached statistics computation.

use anyhow::Result;
use itertools::Itertools;
use log::info;

use crate::{
    cache::ReportCache,
    cli::ReportArgs,
    normalize,
    rules::INDUSTRY_FIELD,
    stats::{self, SummaryRow},
    survey::SurveyTable,
    table,
};

/// Respondent counts by size category and by industry (short names when
/// available).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participation {
    pub respondents: usize,
    pub by_size: Vec<(String, usize)>,
    pub by_industry: Vec<(String, usize)>,
}

pub fn participation(survey: &SurveyTable) -> Participation {
    let by_size = survey
        .size_categories()
        .map(|categories| ranked(categories.iter().map(|c| c.as_str().to_string())))
        .unwrap_or_default();
    let industry = survey.industry_short().or_else(|| survey.text(INDUSTRY_FIELD));
    let by_industry = industry
        .map(|values| ranked(values.iter().flatten().cloned()))
        .unwrap_or_default();
    Participation {
        respondents: survey.row_count(),
        by_size,
        by_industry,
    }
}

fn ranked(values: impl Iterator<Item = String>) -> Vec<(String, usize)> {
    values
        .counts()
        .into_iter()
        .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)))
        .collect()
}

/// Most answered positions plus the summary rows, from a single lookup.
fn positions_and_summary(
    survey: &SurveyTable,
    cache: &mut ReportCache,
    top: usize,
) -> Result<(Vec<Vec<String>>, Vec<SummaryRow>)> {
    let statistics = cache.statistics(survey)?;
    let positions = statistics
        .top_fields(top)
        .into_iter()
        .map(|field| {
            vec![
                field.display_name.clone(),
                field.respondents().to_string(),
                table::format_amount(field.general.p50),
            ]
        })
        .collect();
    Ok((positions, statistics.summary_rows(None)))
}

fn headers(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

pub fn execute(args: &ReportArgs) -> Result<()> {
    let survey = normalize::load_survey(&args.input)?;
    let mut cache = ReportCache::new(args.overrides.as_deref());

    let overview = participation(&survey);
    println!("Respondents: {}", overview.respondents);
    println!();
    let share = |count: usize| {
        table::format_percent(count as f64 / overview.respondents.max(1) as f64 * 100.0)
    };
    if !overview.by_size.is_empty() {
        let rows = overview
            .by_size
            .iter()
            .map(|(name, count)| vec![name.clone(), count.to_string(), share(*count)])
            .collect::<Vec<_>>();
        table::print_section("By company size", &headers(&["size", "companies", "share"]), &rows);
    }
    if !overview.by_industry.is_empty() {
        let rows = overview
            .by_industry
            .iter()
            .take(args.industries)
            .map(|(name, count)| vec![name.clone(), count.to_string(), share(*count)])
            .collect::<Vec<_>>();
        table::print_section("By industry", &headers(&["industry", "companies", "share"]), &rows);
    }

    let (top, summary) = positions_and_summary(&survey, &mut cache, args.top)?;
    table::print_section(
        "Most answered positions",
        &headers(&["position", "respondents", "p50"]),
        &top,
    );

    let rendered = summary.iter().map(SummaryRow::render).collect::<Vec<_>>();
    table::print_section("Salary summary", &headers(&SummaryRow::HEADERS), &rendered);
    if let Some(output) = &args.summary_output {
        stats::write_summary_csv(&summary, output)?;
    }
    info!(
        "Report built from {} statistics computation(s)",
        cache.inner().misses()
    );
    Ok(())
}
