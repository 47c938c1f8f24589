//! Categorical answers: raise and rotation outlook, benefit adoption and
//! bonus sizes.

use std::{collections::HashMap, sync::LazyLock};

use anyhow::Result;
use log::info;
use regex::Regex;

use crate::{
    cli::{DistributionArgs, SurveyInputArgs},
    normalize,
    rules::{BENEFIT_PREFIX, BONUS_PREFIX},
    stats::{Segment, quantile},
    survey::{SizeCategory, SurveyTable},
    table,
};

pub const OUTLOOK_FIELDS: [&str; 3] = [
    "aumento_salarial_2025_pct",
    "cantidad_aumentos_2025",
    "rotacion_2025_pct",
];

/// Benefit whose answers are free sentences; any answer mentioning this word
/// counts as granted.
const PREPAID_HEALTH_FIELD: &str = "benef_medicina_prepaga";
const PREPAID_HEALTH_GRANTED: &str = "otorgamos";
const AFFIRMATIVE: &str = "Si";
/// Cells repeating the question header carry these markers.
const HEADER_MARKERS: [char; 2] = ['💵', '⏰'];

static BONUS_FRACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)/(\d+)").expect("fraction pattern is valid"));
static BONUS_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+[,.]?\d*)").expect("number pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Counts of the non-missing values, most frequent first, ties by value.
pub fn value_counts<'a, I>(values: I) -> Vec<ValueCount>
where
    I: IntoIterator<Item = &'a Option<String>>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values.into_iter().flatten() {
        *counts.entry(value.as_str()).or_insert(0) += 1;
    }
    let mut items = counts
        .into_iter()
        .map(|(value, count)| ValueCount {
            value: value.to_string(),
            count,
        })
        .collect::<Vec<_>>();
    items.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    items
}

/// Value counts for each outlook field present in the table.
pub fn outlook(survey: &SurveyTable) -> Vec<(&'static str, Vec<ValueCount>)> {
    OUTLOOK_FIELDS
        .iter()
        .filter_map(|field| survey.text(field).map(|values| (*field, value_counts(values))))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct BenefitShare {
    pub field: String,
    pub segment: Segment,
    pub granted: usize,
    pub answered: usize,
}

impl BenefitShare {
    pub fn percent(&self) -> f64 {
        if self.answered == 0 {
            0.0
        } else {
            self.granted as f64 / self.answered as f64 * 100.0
        }
    }
}

fn is_header_echo(cell: &str) -> bool {
    cell.contains(HEADER_MARKERS)
}

fn is_granted(field: &str, answer: &str) -> bool {
    if field == PREPAID_HEALTH_FIELD {
        answer.to_lowercase().contains(PREPAID_HEALTH_GRANTED)
    } else {
        answer == AFFIRMATIVE
    }
}

/// Share of companies granting each benefit, per segment. Segments where no
/// company grants the benefit are left out, as are Grande and Pyme when the
/// size category is unknown.
pub fn benefit_shares(survey: &SurveyTable) -> Vec<BenefitShare> {
    let categories = survey.size_categories();
    let mut shares = Vec::new();
    for (field, answers) in survey.text_fields_with_prefix(BENEFIT_PREFIX) {
        for segment in Segment::ALL {
            let in_segment = |row: usize| match (segment, categories) {
                (Segment::General, _) => true,
                (Segment::Grande, Some(c)) => c[row] == SizeCategory::Grande,
                (Segment::Pyme, Some(c)) => c[row] == SizeCategory::Pyme,
                (_, None) => false,
            };
            let valid = answers
                .iter()
                .enumerate()
                .filter(|(row, _)| in_segment(*row))
                .filter_map(|(_, answer)| answer.as_deref())
                .filter(|answer| !is_header_echo(answer))
                .collect::<Vec<_>>();
            let granted = valid.iter().filter(|a| is_granted(field, a)).count();
            if granted == 0 {
                continue;
            }
            shares.push(BenefitShare {
                field: field.to_string(),
                segment,
                granted,
                answered: valid.len(),
            });
        }
    }
    shares
}

/// Reads a bonus answer as a number of monthly salaries.
pub fn parse_bonus(text: &str) -> Option<f64> {
    let lowered = text.to_lowercase();
    if lowered.contains("no tenemos asignado") {
        return Some(0.0);
    }
    if let Some(caps) = BONUS_FRACTION.captures(&lowered) {
        let numerator = caps[1].parse::<f64>().ok()?;
        let denominator = caps[2].parse::<f64>().ok()?;
        return (denominator != 0.0).then(|| numerator / denominator);
    }
    let caps = BONUS_NUMBER.captures(&lowered)?;
    caps[1].replace(',', ".").parse::<f64>().ok()
}

#[derive(Debug, Clone, PartialEq)]
pub struct BonusSummary {
    pub field: String,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub with_bonus: usize,
    pub without_bonus: usize,
}

/// Summaries of each bonus field with at least one positive bonus.
pub fn bonus_summaries(survey: &SurveyTable) -> Vec<BonusSummary> {
    survey
        .text_fields_with_prefix(BONUS_PREFIX)
        .filter_map(|(field, answers)| {
            let parsed = answers
                .iter()
                .flatten()
                .filter_map(|answer| parse_bonus(answer))
                .collect::<Vec<_>>();
            let without_bonus = parsed.iter().filter(|v| **v == 0.0).count();
            let mut positive = parsed.into_iter().filter(|v| *v > 0.0).collect::<Vec<_>>();
            if positive.is_empty() {
                return None;
            }
            positive.sort_by(f64::total_cmp);
            Some(BonusSummary {
                field: field.to_string(),
                mean: positive.iter().sum::<f64>() / positive.len() as f64,
                median: quantile(&positive, 0.5),
                min: positive[0],
                max: positive[positive.len() - 1],
                with_bonus: positive.len(),
                without_bonus,
            })
        })
        .collect()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

pub fn execute_outlook(args: &DistributionArgs) -> Result<()> {
    let survey = normalize::load_survey(&args.input)?;
    let sections = outlook(&survey);
    for (field, counts) in &sections {
        let total = counts.iter().map(|c| c.count).sum::<usize>();
        let rows = counts
            .iter()
            .take(if args.top > 0 { args.top } else { usize::MAX })
            .map(|c| {
                vec![
                    c.value.clone(),
                    c.count.to_string(),
                    table::format_percent(c.count as f64 / total as f64 * 100.0),
                ]
            })
            .collect::<Vec<_>>();
        table::print_section(field, &strings(&["value", "count", "percent"]), &rows);
    }
    info!("Reported outlook for {} field(s)", sections.len());
    Ok(())
}

pub fn execute_benefits(args: &DistributionArgs) -> Result<()> {
    let survey = normalize::load_survey(&args.input)?;
    let shares = benefit_shares(&survey);
    let rows = shares
        .iter()
        .map(|share| {
            vec![
                share.field.clone(),
                share.segment.to_string(),
                share.granted.to_string(),
                share.answered.to_string(),
                table::format_percent(share.percent()),
            ]
        })
        .collect::<Vec<_>>();
    table::print_table(
        &strings(&["benefit", "segment", "granted", "answered", "percent"]),
        &rows,
    );
    Ok(())
}

pub fn execute_bonus(args: &SurveyInputArgs) -> Result<()> {
    let survey = normalize::load_survey(args)?;
    let rows = bonus_summaries(&survey)
        .into_iter()
        .map(|summary| {
            vec![
                summary.field,
                format!("{:.1}", summary.mean),
                format!("{:.1}", summary.median),
                format!("{:.1}", summary.min),
                format!("{:.1}", summary.max),
                summary.with_bonus.to_string(),
                summary.without_bonus.to_string(),
            ]
        })
        .collect::<Vec<_>>();
    table::print_table(
        &strings(&[
            "bonus",
            "mean",
            "median",
            "min",
            "max",
            "with_bonus",
            "without_bonus",
        ]),
        &rows,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::Field;

    fn text(values: &[&str]) -> Vec<Option<String>> {
        values
            .iter()
            .map(|v| (!v.is_empty()).then(|| v.to_string()))
            .collect()
    }

    #[test]
    fn value_counts_sort_by_count_then_value() {
        let values = text(&["5%", "10%", "", "5%", "3%", "10%"]);
        let counts = value_counts(&values);
        let flat = counts
            .iter()
            .map(|c| (c.value.as_str(), c.count))
            .collect::<Vec<_>>();
        assert_eq!(flat, vec![("10%", 2), ("5%", 2), ("3%", 1)]);
    }

    #[test]
    fn bonus_text_parses_to_salaries() {
        assert_eq!(parse_bonus("4 sueldos"), Some(4.0));
        assert_eq!(parse_bonus("1,5 sueldos"), Some(1.5));
        assert_eq!(parse_bonus("1/2 sueldo"), Some(0.5));
        assert_eq!(parse_bonus("No tenemos asignado"), Some(0.0));
        assert_eq!(parse_bonus("a definir"), None);
        assert_eq!(parse_bonus("0/0"), None);
    }

    #[test]
    fn benefit_shares_skip_header_echoes() {
        let mut survey = SurveyTable::new(4);
        survey
            .push_field(Field::text(
                "benef_home_office",
                text(&["Si", "No", "⏰  Home Office", "Si"]),
            ))
            .unwrap();
        survey
            .push_field(Field::text(
                "benef_medicina_prepaga",
                text(&["Otorgamos a todo el personal", "OTORGAMOS solo a gerentes", "", "No"]),
            ))
            .unwrap();
        survey
            .set_size_category(vec![
                SizeCategory::Grande,
                SizeCategory::Pyme,
                SizeCategory::Pyme,
                SizeCategory::Otro,
            ])
            .unwrap();
        let shares = benefit_shares(&survey);
        let home_general = &shares[0];
        assert_eq!((home_general.granted, home_general.answered), (2, 3));
        assert!(!shares
            .iter()
            .any(|s| s.field == "benef_home_office" && s.segment == Segment::Pyme));
        let home_grande = shares
            .iter()
            .find(|s| s.field == "benef_home_office" && s.segment == Segment::Grande)
            .unwrap();
        assert_eq!((home_grande.granted, home_grande.answered), (1, 1));
        let health = shares
            .iter()
            .find(|s| s.field == "benef_medicina_prepaga" && s.segment == Segment::General)
            .unwrap();
        assert_eq!((health.granted, health.answered), (2, 3));
    }

    #[test]
    fn bonus_summary_counts_companies_without_bonus() {
        let mut survey = SurveyTable::new(4);
        survey
            .push_field(Field::text(
                "bonus_jefes",
                text(&["2 sueldos", "No tenemos asignado", "1/2 sueldo", "?"]),
            ))
            .unwrap();
        let summaries = bonus_summaries(&survey);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].with_bonus, 2);
        assert_eq!(summaries[0].without_bonus, 1);
        assert_eq!(summaries[0].median, 1.25);
        assert_eq!(summaries[0].max, 2.0);
    }
}
