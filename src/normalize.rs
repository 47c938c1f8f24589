//! Data Normalizer: applies a [`ColumnMapping`] to a [`RawTable`] and produces
//! the typed [`SurveyTable`].
//!
//! Salary fields are coerced to numbers, the sentinel zero becomes missing and
//! the size category and short industry name are derived when their source
//! fields exist. Nothing here fails on bad cell content; problems are counted
//! in the [`NormalizationReport`] instead.

use std::{collections::BTreeMap, path::Path};

use anyhow::{Context, Result};
use itertools::Itertools;
use log::{debug, info, warn};

use crate::{
    cli::{NormalizeArgs, SurveyInputArgs},
    io_utils,
    mapping::{ColumnMapping, DroppedArtifact},
    raw::RawTable,
    rules::{self, INDUSTRY_FIELD, SIZE_FIELD},
    survey::{Field, SizeCategory, SurveyTable},
    table,
};

const INDUSTRY_UNIFICATION: &[(&str, &str)] = &[
    ("Otro rubro", "Otro Rubro"),
    (
        "Gastronomía, Hotelería y Turísmo",
        "Gastronomía, Hotelería y Turismo",
    ),
];

const INDUSTRY_SHORT_NAMES: &[(&str, &str)] = &[
    (
        "Transporte, Logística, Almacenamiento",
        "Transporte y Logística",
    ),
    (
        "Energía, Petroleo, Minería, Servicios relacionados",
        "Energía y Minería",
    ),
    ("Gastronomía, Hotelería y Turismo", "Gastronomía y Turismo"),
];

/// Outcome of coercing one salary cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coerced {
    Value(f64),
    Empty,
    Invalid,
    SentinelZero,
}

impl Coerced {
    pub fn value(self) -> Option<f64> {
        match self {
            Coerced::Value(v) => Some(v),
            _ => None,
        }
    }
}

pub fn coerce_salary(cell: &str) -> Coerced {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return Coerced::Empty;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if !value.is_finite() => Coerced::Invalid,
        Ok(value) if value == 0.0 => Coerced::SentinelZero,
        Ok(value) => Coerced::Value(value),
        Err(_) => Coerced::Invalid,
    }
}

/// Per-field counts gathered while coercing a salary column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldCoercion {
    pub values: usize,
    pub empty: usize,
    pub invalid: usize,
    pub sentinel_zeros: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizationReport {
    pub coercion: BTreeMap<String, FieldCoercion>,
    pub artifacts: Vec<DroppedArtifact>,
    pub size_field_present: bool,
    pub industry_field_present: bool,
}

impl NormalizationReport {
    pub fn invalid_total(&self) -> usize {
        self.coercion.values().map(|c| c.invalid).sum()
    }

    pub fn sentinel_total(&self) -> usize {
        self.coercion.values().map(|c| c.sentinel_zeros).sum()
    }
}

#[derive(Debug, Clone)]
pub struct Normalized {
    pub table: SurveyTable,
    pub report: NormalizationReport,
}

pub fn normalize(raw: &RawTable, mapping: &ColumnMapping) -> Result<Normalized> {
    let mut report = NormalizationReport {
        artifacts: mapping.artifacts.clone(),
        ..NormalizationReport::default()
    };
    let mut table = SurveyTable::new(raw.row_count());

    for column in &mapping.columns {
        let cells =
            (0..raw.row_count()).map(|row| raw.cell(row, column.index).unwrap_or(""));

        let field = if rules::is_salary_field(&column.canonical) {
            let mut stats = FieldCoercion::default();
            let values = cells
                .enumerate()
                .map(|(row, cell)| {
                    let coerced = coerce_salary(cell);
                    match coerced {
                        Coerced::Value(_) => stats.values += 1,
                        Coerced::Empty => stats.empty += 1,
                        Coerced::SentinelZero => stats.sentinel_zeros += 1,
                        Coerced::Invalid => {
                            stats.invalid += 1;
                            debug!(
                                "Row {} of '{}': '{}' is not numeric",
                                row + 2,
                                column.canonical,
                                cell
                            );
                        }
                    }
                    coerced.value()
                })
                .collect::<Vec<_>>();
            if stats.invalid > 0 {
                warn!(
                    "{} non-numeric value(s) in '{}' treated as missing",
                    stats.invalid, column.canonical
                );
            }
            report.coercion.insert(column.canonical.clone(), stats);
            Field::salary(column.canonical.clone(), values)
        } else if column.canonical == INDUSTRY_FIELD {
            Field::text(column.canonical.clone(), cells.map(unify_industry).collect())
        } else {
            Field::text(
                column.canonical.clone(),
                cells
                    .map(|cell| (!cell.is_empty()).then(|| cell.to_string()))
                    .collect(),
            )
        };
        table.push_field(field)?;
    }

    if let Some(sizes) = table.text(SIZE_FIELD) {
        let categories = sizes
            .iter()
            .map(|value| SizeCategory::from_bracket(value.as_deref()))
            .collect();
        table.set_size_category(categories)?;
        report.size_field_present = true;
    } else {
        info!("No '{SIZE_FIELD}' field; size category not derived");
    }

    if let Some(industry) = table.text(INDUSTRY_FIELD) {
        let short = industry
            .iter()
            .map(|value| value.as_deref().map(shorten_industry))
            .collect();
        table.set_industry_short(short)?;
        report.industry_field_present = true;
    } else {
        info!("No '{INDUSTRY_FIELD}' field; short industry name not derived");
    }

    info!(
        "Normalized {} row(s) into {} field(s); {} invalid salary value(s), {} sentinel zero(s)",
        table.row_count(),
        table.fields().len(),
        report.invalid_total(),
        report.sentinel_total()
    );
    Ok(Normalized { table, report })
}

fn unify_industry(cell: &str) -> Option<String> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    let unified = INDUSTRY_UNIFICATION
        .iter()
        .find(|(from, _)| *from == trimmed)
        .map_or(trimmed, |(_, to)| *to);
    Some(unified.to_string())
}

pub fn shorten_industry(industry: &str) -> String {
    INDUSTRY_SHORT_NAMES
        .iter()
        .find(|(from, _)| *from == industry)
        .map_or(industry, |(_, to)| *to)
        .to_string()
}

/// Runs mapping plus normalization over a raw export file.
pub fn normalize_file(
    path: &Path,
    delimiter: Option<u8>,
    encoding: Option<&str>,
) -> Result<(ColumnMapping, Normalized)> {
    let delimiter = io_utils::resolve_input_delimiter(path, delimiter);
    let encoding = io_utils::resolve_encoding(encoding)?;
    let raw = RawTable::load(path, delimiter, encoding)?;
    let mapping = ColumnMapping::generate(&raw.headers);
    let normalized = normalize(&raw, &mapping)?;
    Ok((mapping, normalized))
}

/// Loads the table a query command works on: a normalized file by default,
/// or a raw export normalized on the fly with `--raw`.
pub fn load_survey(args: &SurveyInputArgs) -> Result<SurveyTable> {
    if args.raw {
        let (_, normalized) =
            normalize_file(&args.input, args.delimiter, args.input_encoding.as_deref())?;
        Ok(normalized.table)
    } else {
        let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
        let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
        SurveyTable::load(&args.input, delimiter, encoding)
            .with_context(|| format!("Loading normalized survey {:?}", args.input))
    }
}

pub fn execute(args: &NormalizeArgs) -> Result<()> {
    let (mapping, normalized) =
        normalize_file(&args.input, args.delimiter, args.input_encoding.as_deref())?;
    let output_delimiter = io_utils::resolve_input_delimiter(&args.output, None);
    normalized
        .table
        .save(&args.output, output_delimiter)
        .with_context(|| format!("Writing normalized table to {:?}", args.output))?;
    if let Some(mapping_path) = &args.mapping {
        mapping
            .save(mapping_path, &args.input)
            .with_context(|| format!("Writing mapping to {mapping_path:?}"))?;
        info!("Mapping record written to {:?}", mapping_path);
    }
    if !args.no_summary {
        print_summary(&normalized);
    }
    Ok(())
}

pub fn print_summary(normalized: &Normalized) {
    let survey = &normalized.table;
    println!("Respondents: {}", survey.row_count());
    println!();

    if let Some(categories) = survey.size_categories() {
        let rows = categories
            .iter()
            .counts()
            .into_iter()
            .sorted_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)))
            .map(|(category, count)| vec![category.to_string(), count.to_string()])
            .collect::<Vec<_>>();
        table::print_section(
            "By company size",
            &["categoria_tamano".to_string(), "companies".to_string()],
            &rows,
        );
    }

    if let Some(industry) = survey.text(INDUSTRY_FIELD) {
        let rows = industry
            .iter()
            .flatten()
            .counts()
            .into_iter()
            .sorted_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)))
            .map(|(name, count)| vec![name.clone(), count.to_string()])
            .collect::<Vec<_>>();
        table::print_section(
            "By industry",
            &["rubro".to_string(), "companies".to_string()],
            &rows,
        );
    }

    let salary_fields = survey
        .salary_fields()
        .map(|(name, values)| (name, values.iter().flatten().count()))
        .collect::<Vec<_>>();
    println!("Salary fields: {}", salary_fields.len());
    println!();
    let top = salary_fields
        .into_iter()
        .enumerate()
        .sorted_by(|(ia, a), (ib, b)| b.1.cmp(&a.1).then(ia.cmp(ib)))
        .take(10)
        .map(|(_, (name, count))| vec![name.to_string(), count.to_string()])
        .collect::<Vec<_>>();
    table::print_section(
        "Top 10 fields by respondents",
        &["field".to_string(), "companies".to_string()],
        &top,
    );

    let report = &normalized.report;
    if !report.artifacts.is_empty() || report.invalid_total() > 0 {
        println!(
            "Dropped artifacts: {}  Invalid salary values: {}",
            report.artifacts.len(),
            report.invalid_total()
        );
    }
}
