//! Column Mapper: verbose survey headers to short canonical field names.
//!
//! Each header is resolved through the ordered rule table in [`crate::rules`];
//! headers no rule recognises get a synthesized name. Afterwards the mapping
//! is collapsed so that every canonical name is produced by exactly one raw
//! column: the first one in header order wins and later collisions are
//! dropped together with their data. `X.N` headers that a spreadsheet tool
//! made out of a repeated header `X` are dropped before they claim a name.

use std::{
    collections::HashSet,
    fs::File,
    io::BufWriter,
    path::Path,
    sync::LazyLock,
};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::{info, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{cli::MappingArgs, io_utils, raw::RawTable, rules, table};

/// Number of header characters used to synthesize a fallback name.
pub const SYNTHESIZED_PREFIX_CHARS: usize = 50;

/// Appended to a synthesized name that equals a derived field name.
pub const RESERVED_NAME_SUFFIX: &str = "_original";

static SUFFIX_ARTIFACT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?s)(.+)\.(\d+)$").expect("suffix artifact pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingOrigin {
    /// Matched the rule at this position of the rule table.
    Rule(usize),
    Synthesized,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappedColumn {
    pub index: usize,
    pub raw: String,
    pub canonical: String,
    pub origin: MappingOrigin,
}

/// A raw column whose canonical name was already taken by an earlier column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedColumn {
    pub index: usize,
    pub raw: String,
    pub canonical: String,
    pub kept_index: usize,
}

/// A raw `X.N` column whose base header `X` is also present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedArtifact {
    pub index: usize,
    pub raw: String,
    pub canonical: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MappingWarning {
    /// The synthesized name carries no alphanumeric character.
    EmptySynthesizedName {
        index: usize,
        raw: String,
        canonical: String,
    },
    /// The synthesized name was taken by a derived field and got renamed.
    ReservedName {
        index: usize,
        raw: String,
        canonical: String,
    },
}

impl std::fmt::Display for MappingWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MappingWarning::EmptySynthesizedName {
                index,
                raw,
                canonical,
            } => write!(
                f,
                "column {} ('{}') synthesizes to empty name '{}'",
                index + 1,
                table::truncate_chars(raw, 40),
                canonical
            ),
            MappingWarning::ReservedName {
                index,
                raw,
                canonical,
            } => write!(
                f,
                "column {} ('{}') renamed to '{}' to keep the derived field name free",
                index + 1,
                table::truncate_chars(raw, 40),
                canonical
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    pub columns: Vec<MappedColumn>,
    pub dropped: Vec<DroppedColumn>,
    pub artifacts: Vec<DroppedArtifact>,
    pub warnings: Vec<MappingWarning>,
}

impl ColumnMapping {
    pub fn generate(headers: &[String]) -> Self {
        let raw_headers = headers.iter().map(String::as_str).collect::<HashSet<_>>();
        let candidates = headers
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                let (canonical, origin) = match rules::first_match(raw) {
                    Some((position, rule)) => {
                        (rule.canonical.to_string(), MappingOrigin::Rule(position))
                    }
                    None => (synthesize_name(raw), MappingOrigin::Synthesized),
                };
                MappedColumn {
                    index,
                    raw: raw.clone(),
                    canonical,
                    origin,
                }
            })
            .collect::<Vec<_>>();

        let mut mapping = ColumnMapping::default();
        for mut candidate in candidates {
            if is_suffix_artifact(&candidate.raw, &raw_headers) {
                warn!(
                    "Dropping duplicate-suffix artifact column {} '{}'",
                    candidate.index + 1,
                    table::truncate_chars(&candidate.raw, 60)
                );
                mapping.artifacts.push(DroppedArtifact {
                    index: candidate.index,
                    raw: candidate.raw,
                    canonical: candidate.canonical,
                });
                continue;
            }
            if rules::is_derived_field(&candidate.canonical) {
                candidate.canonical.push_str(RESERVED_NAME_SUFFIX);
                let warning = MappingWarning::ReservedName {
                    index: candidate.index,
                    raw: candidate.raw.clone(),
                    canonical: candidate.canonical.clone(),
                };
                warn!("Data quality: {warning}");
                mapping.warnings.push(warning);
            }
            if candidate.origin == MappingOrigin::Synthesized
                && is_degenerate_name(&candidate.canonical)
            {
                let warning = MappingWarning::EmptySynthesizedName {
                    index: candidate.index,
                    raw: candidate.raw.clone(),
                    canonical: candidate.canonical.clone(),
                };
                warn!("Data quality: {warning}");
                mapping.warnings.push(warning);
            }
            match mapping.position_of(&candidate.canonical) {
                Some(kept) => {
                    let kept_index = mapping.columns[kept].index;
                    warn!(
                        "Skipping duplicate column {} '{}' -> '{}' (already produced by column {})",
                        candidate.index + 1,
                        table::truncate_chars(&candidate.raw, 60),
                        candidate.canonical,
                        kept_index + 1
                    );
                    mapping.dropped.push(DroppedColumn {
                        index: candidate.index,
                        raw: candidate.raw,
                        canonical: candidate.canonical,
                        kept_index,
                    });
                }
                None => mapping.columns.push(candidate),
            }
        }
        info!(
            "{} column(s) mapped ({} duplicate(s), {} artifact(s) dropped)",
            mapping.columns.len(),
            mapping.dropped.len(),
            mapping.artifacts.len()
        );
        mapping
    }

    fn position_of(&self, canonical: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.canonical == canonical)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Canonical name of the raw column at `index`, if it survived.
    pub fn canonical_for(&self, index: usize) -> Option<&str> {
        self.columns
            .iter()
            .find(|c| c.index == index)
            .map(|c| c.canonical.as_str())
    }

    /// Canonical name for a raw header text (first column with that text).
    pub fn get(&self, raw: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|c| c.raw == raw)
            .map(|c| c.canonical.as_str())
    }

    pub fn to_record(&self, source: &Path) -> MappingRecord {
        MappingRecord {
            source: source.display().to_string(),
            generated_at: Utc::now(),
            columns: self
                .columns
                .iter()
                .map(|c| MappingEntry {
                    raw: c.raw.clone(),
                    canonical: c.canonical.clone(),
                })
                .collect(),
            dropped: self.dropped.clone(),
            artifacts: self.artifacts.clone(),
            warnings: self.warnings.clone(),
        }
    }

    pub fn save(&self, path: &Path, source: &Path) -> Result<()> {
        self.to_record(source).save(path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    pub raw: String,
    pub canonical: String,
}

/// Persisted audit record of a mapping run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingRecord {
    pub source: String,
    pub generated_at: DateTime<Utc>,
    pub columns: Vec<MappingEntry>,
    #[serde(default)]
    pub dropped: Vec<DroppedColumn>,
    #[serde(default)]
    pub artifacts: Vec<DroppedArtifact>,
    #[serde(default)]
    pub warnings: Vec<MappingWarning>,
}

impl MappingRecord {
    pub fn save(&self, path: &Path) -> Result<()> {
        io_utils::ensure_parent_dir(path)?;
        let file =
            File::create(path).with_context(|| format!("Creating mapping file {path:?}"))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self).context("Writing mapping JSON")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Opening mapping file {path:?}"))?;
        serde_json::from_reader(std::io::BufReader::new(file)).context("Parsing mapping JSON")
    }
}

/// Fallback name: the lowercased header prefix with every character outside
/// `[a-zA-Z0-9]` replaced by `_`.
pub fn synthesize_name(header: &str) -> String {
    header
        .chars()
        .take(SYNTHESIZED_PREFIX_CHARS)
        .collect::<String>()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

fn is_degenerate_name(name: &str) -> bool {
    name.chars().all(|c| c == '_')
}

fn is_suffix_artifact(raw: &str, headers: &HashSet<&str>) -> bool {
    SUFFIX_ARTIFACT
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .is_some_and(|base| headers.contains(base.as_str()))
}

pub fn execute(args: &MappingArgs) -> Result<()> {
    let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let raw = RawTable::load(&args.input, delimiter, encoding)?;
    let mapping = ColumnMapping::generate(&raw.headers);

    let mut rows = Vec::with_capacity(raw.column_count());
    for (index, header) in raw.headers.iter().enumerate() {
        let (canonical, status) = match mapping.columns.iter().find(|c| c.index == index) {
            Some(column) => (
                column.canonical.clone(),
                match column.origin {
                    MappingOrigin::Rule(_) => "mapped".to_string(),
                    MappingOrigin::Synthesized => "synthesized".to_string(),
                },
            ),
            None => match mapping.artifacts.iter().find(|a| a.index == index) {
                Some(artifact) => (artifact.canonical.clone(), "dropped (artifact)".to_string()),
                None => {
                    let dropped = mapping.dropped.iter().find(|d| d.index == index);
                    (
                        dropped.map(|d| d.canonical.clone()).unwrap_or_default(),
                        dropped
                            .map(|d| format!("dropped (dup of #{})", d.kept_index + 1))
                            .unwrap_or_default(),
                    )
                }
            },
        };
        rows.push(vec![
            (index + 1).to_string(),
            canonical,
            status,
            table::truncate_chars(header, 60),
        ]);
    }
    let headers = vec![
        "#".to_string(),
        "canonical".to_string(),
        "status".to_string(),
        "header".to_string(),
    ];
    table::print_table(&headers, &rows);

    if let Some(output) = &args.output {
        mapping
            .save(output, &args.input)
            .with_context(|| format!("Writing mapping to {output:?}"))?;
        info!("Mapping record written to {:?}", output);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn synthesize_name_lowercases_and_replaces_symbols() {
        assert_eq!(synthesize_name("Nombre de la Empresa"), "nombre_de_la_empresa");
        assert_eq!(synthesize_name("¿Año?"), "_a_o_");
    }

    #[test]
    fn synthesize_name_truncates_prefix() {
        let long = "x".repeat(80);
        assert_eq!(synthesize_name(&long).len(), SYNTHESIZED_PREFIX_CHARS);
    }

    #[test]
    fn later_collisions_are_dropped() {
        let mapping = ColumnMapping::generate(&headers(&[
            "JEFE DE VENTAS: supervisa vendedores",
            "Clasificación por TAMAÑO",
            "JEFE DE VENTAS (repetida)",
        ]));
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.canonical_for(0), Some("salario_jefe_ventas"));
        assert_eq!(mapping.canonical_for(2), None);
        assert_eq!(mapping.dropped.len(), 1);
        assert_eq!(mapping.dropped[0].index, 2);
        assert_eq!(mapping.dropped[0].kept_index, 0);
    }

    #[test]
    fn synthesized_names_collide_like_rule_names() {
        let mapping = ColumnMapping::generate(&headers(&["Empresa", "empresa"]));
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.dropped[0].canonical, "empresa");
    }

    #[test]
    fn degenerate_synthesized_names_raise_warnings() {
        let mapping = ColumnMapping::generate(&headers(&["¿¿??", ""]));
        assert_eq!(mapping.warnings.len(), 2);
        // "" and "____" are distinct names, both kept
        assert_eq!(mapping.len(), 2);
    }

    #[test]
    fn suffix_artifacts_never_reach_the_columns() {
        let mapping = ColumnMapping::generate(&headers(&[
            "Comentarios finales",
            "Comentarios finales.1",
            "Versión 2.1",
        ]));
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.canonical_for(1), None);
        assert_eq!(mapping.artifacts.len(), 1);
        assert_eq!(mapping.artifacts[0].index, 1);
        assert_eq!(mapping.artifacts[0].canonical, "comentarios_finales_1");
        assert!(mapping.dropped.is_empty());

        let record = mapping.to_record(Path::new("encuesta.csv"));
        let canonicals = record
            .columns
            .iter()
            .map(|c| c.canonical.as_str())
            .collect::<Vec<_>>();
        assert_eq!(canonicals, vec!["comentarios_finales", "versi_n_2_1"]);
        assert_eq!(record.artifacts[0].raw, "Comentarios finales.1");
    }

    #[test]
    fn artifact_does_not_claim_a_canonical_name() {
        let mapping = ColumnMapping::generate(&headers(&[
            "JEFE DE VENTAS",
            "JEFE DE VENTAS.1",
        ]));
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.artifacts.len(), 1);
        assert!(mapping.dropped.is_empty());
    }

    #[test]
    fn derived_field_names_are_reserved() {
        let mapping = ColumnMapping::generate(&headers(&["categoria tamano"]));
        assert_eq!(mapping.canonical_for(0), Some("categoria_tamano_original"));
        assert!(matches!(
            mapping.warnings[0],
            MappingWarning::ReservedName { index: 0, .. }
        ));
    }

    #[test]
    fn lookup_by_raw_header() {
        let mapping = ColumnMapping::generate(&headers(&["Marca temporal"]));
        assert_eq!(mapping.get("Marca temporal"), Some("timestamp"));
        assert_eq!(mapping.get("otra"), None);
    }

    #[test]
    fn record_round_trips_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config").join("mapeo.json");
        let mapping = ColumnMapping::generate(&headers(&["RUBRO", "RUBRO 2"]));
        mapping.save(&path, Path::new("encuesta.csv")).unwrap();
        let record = MappingRecord::load(&path).unwrap();
        assert_eq!(record.columns.len(), 1);
        assert_eq!(record.columns[0].canonical, "rubro");
        assert_eq!(record.dropped.len(), 1);
        assert_eq!(record.source, "encuesta.csv");
    }
}
