//! Quality-assured replacement figures for specific field/segment pairs.
//!
//! The table is applied after statistics are computed. Every substituted
//! metric is recorded together with the value it replaced, and the affected
//! segment is flagged with [`Provenance::Override`].

use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::stats::{Provenance, SalaryStats, Segment, SurveyStatistics};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatOverride {
    pub field: String,
    pub segment: Segment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p25: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p50: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p75: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverrideTable {
    #[serde(default)]
    pub overrides: Vec<StatOverride>,
}

/// One substituted metric.
#[derive(Debug, Clone, PartialEq)]
pub struct OverrideAudit {
    pub field: String,
    pub segment: Segment,
    pub metric: &'static str,
    pub computed: f64,
    pub replacement: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnappliedReason {
    UnknownField,
    AbsentSegment,
    NoMetrics,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnappliedOverride {
    pub field: String,
    pub segment: Segment,
    pub reason: UnappliedReason,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverrideReport {
    pub applied: Vec<OverrideAudit>,
    pub unapplied: Vec<UnappliedOverride>,
}

impl OverrideReport {
    pub fn log(&self) {
        for audit in &self.applied {
            info!(
                "Override {}/{} {}: {} -> {}",
                audit.field, audit.segment, audit.metric, audit.computed, audit.replacement
            );
        }
        for skipped in &self.unapplied {
            warn!(
                "Override for {}/{} not applied ({:?})",
                skipped.field, skipped.segment, skipped.reason
            );
        }
    }
}

impl OverrideTable {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Opening overrides file {path:?}"))?;
        let table: OverrideTable =
            serde_yaml::from_reader(BufReader::new(file)).context("Parsing overrides YAML")?;
        info!(
            "Loaded {} override(s) from {:?}",
            table.overrides.len(),
            path
        );
        Ok(table)
    }

    /// Substitutes override figures into `statistics`. Overrides naming a
    /// field without statistics or an absent segment are skipped.
    pub fn apply(&self, statistics: &mut SurveyStatistics) -> OverrideReport {
        let mut report = OverrideReport::default();
        for entry in &self.overrides {
            let target = statistics
                .field_mut(&entry.field)
                .ok_or(UnappliedReason::UnknownField)
                .and_then(|field| {
                    field
                        .segment_mut(entry.segment)
                        .ok_or(UnappliedReason::AbsentSegment)
                });
            let stats = match target {
                Ok(stats) => stats,
                Err(reason) => {
                    report.unapplied.push(UnappliedOverride {
                        field: entry.field.clone(),
                        segment: entry.segment,
                        reason,
                    });
                    continue;
                }
            };
            let before = report.applied.len();
            apply_entry(entry, stats, &mut report.applied);
            if report.applied.len() == before {
                report.unapplied.push(UnappliedOverride {
                    field: entry.field.clone(),
                    segment: entry.segment,
                    reason: UnappliedReason::NoMetrics,
                });
                continue;
            }
            stats.provenance = Provenance::Override;
            if !(stats.p25 <= stats.p50 && stats.p50 <= stats.p75) {
                warn!(
                    "Override for {}/{} leaves percentiles out of order ({} / {} / {})",
                    entry.field, entry.segment, stats.p25, stats.p50, stats.p75
                );
            }
        }
        report
    }
}

fn apply_entry(entry: &StatOverride, stats: &mut SalaryStats, audit: &mut Vec<OverrideAudit>) {
    let mut record = |metric: &'static str, computed: f64, replacement: f64| {
        audit.push(OverrideAudit {
            field: entry.field.clone(),
            segment: entry.segment,
            metric,
            computed,
            replacement,
        });
    };
    if let Some(value) = entry.p25 {
        record("p25", stats.p25, value);
        stats.p25 = value;
    }
    if let Some(value) = entry.p50 {
        record("p50", stats.p50, value);
        stats.p50 = value;
    }
    if let Some(value) = entry.p75 {
        record("p75", stats.p75, value);
        stats.p75 = value;
    }
    if let Some(value) = entry.mean {
        record("mean", stats.mean, value);
        stats.mean = value;
    }
    if let Some(value) = entry.count {
        record("count", stats.count as f64, value as f64);
        stats.count = value;
    }
}
