//! Typed model of the normalized survey table.
//!
//! Salary fields hold numbers, everything else holds text, and the two derived
//! fields (company-size category and short industry name) are explicit
//! optional members rather than columns looked up by name.

use std::{io::Write, path::Path};

use anyhow::{Context, Result, ensure};
use clap::ValueEnum;
use encoding_rs::Encoding;
use log::info;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{
    io_utils,
    normalize::{Coerced, coerce_salary},
    rules::{self, INDUSTRY_SHORT_FIELD, SIZE_CATEGORY_FIELD},
    table,
};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum,
)]
pub enum SizeCategory {
    Grande,
    Pyme,
    Otro,
}

impl SizeCategory {
    pub const ALL: [SizeCategory; 3] = [SizeCategory::Grande, SizeCategory::Pyme, SizeCategory::Otro];

    /// Classifies the size-bracket answer of the survey.
    pub fn from_bracket(bracket: Option<&str>) -> Self {
        match bracket.map(str::trim) {
            Some("201 - 500 empleados" | "+ 500 empleados") => SizeCategory::Grande,
            Some("1 - 50 empleados" | "51 - 200 empleados") => SizeCategory::Pyme,
            _ => SizeCategory::Otro,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SizeCategory::Grande => "Grande",
            SizeCategory::Pyme => "Pyme",
            SizeCategory::Otro => "Otro",
        }
    }

    /// Reads a label written by [`SizeCategory::as_str`]; unknown labels are `Otro`.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Grande" => SizeCategory::Grande,
            "Pyme" => SizeCategory::Pyme,
            _ => SizeCategory::Otro,
        }
    }
}

impl std::fmt::Display for SizeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValues {
    Salary(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

impl FieldValues {
    pub fn len(&self) -> usize {
        match self {
            FieldValues::Salary(values) => values.len(),
            FieldValues::Text(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn render(&self, row: usize) -> String {
        match self {
            FieldValues::Salary(values) => values
                .get(row)
                .copied()
                .flatten()
                .map(table::format_number)
                .unwrap_or_default(),
            FieldValues::Text(values) => values
                .get(row)
                .and_then(|v| v.clone())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub values: FieldValues,
}

impl Field {
    pub fn salary(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            values: FieldValues::Salary(values),
        }
    }

    pub fn text(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Self {
            name: name.into(),
            values: FieldValues::Text(values),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SurveyTable {
    row_count: usize,
    fields: Vec<Field>,
    size_category: Option<Vec<SizeCategory>>,
    industry_short: Option<Vec<Option<String>>>,
}

impl SurveyTable {
    pub fn new(row_count: usize) -> Self {
        Self {
            row_count,
            ..Self::default()
        }
    }

    pub fn push_field(&mut self, field: Field) -> Result<()> {
        ensure!(
            field.values.len() == self.row_count,
            "Field '{}' has {} value(s) but the table has {} row(s)",
            field.name,
            field.values.len(),
            self.row_count
        );
        ensure!(
            self.field(&field.name).is_none(),
            "Field '{}' already present",
            field.name
        );
        ensure!(
            !rules::is_derived_field(&field.name),
            "Field name '{}' is reserved for a derived field",
            field.name
        );
        self.fields.push(field);
        Ok(())
    }

    pub fn set_size_category(&mut self, categories: Vec<SizeCategory>) -> Result<()> {
        ensure!(
            categories.len() == self.row_count,
            "Size categories cover {} row(s) but the table has {}",
            categories.len(),
            self.row_count
        );
        self.size_category = Some(categories);
        Ok(())
    }

    pub fn set_industry_short(&mut self, values: Vec<Option<String>>) -> Result<()> {
        ensure!(
            values.len() == self.row_count,
            "Short industry names cover {} row(s) but the table has {}",
            values.len(),
            self.row_count
        );
        self.industry_short = Some(values);
        Ok(())
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn salary(&self, name: &str) -> Option<&[Option<f64>]> {
        match self.field(name).map(|f| &f.values) {
            Some(FieldValues::Salary(values)) => Some(values),
            _ => None,
        }
    }

    pub fn text(&self, name: &str) -> Option<&[Option<String>]> {
        match self.field(name).map(|f| &f.values) {
            Some(FieldValues::Text(values)) => Some(values),
            _ => None,
        }
    }

    /// Salary fields in column order.
    pub fn salary_fields(&self) -> impl Iterator<Item = (&str, &[Option<f64>])> {
        self.fields.iter().filter_map(|f| match &f.values {
            FieldValues::Salary(values) => Some((f.name.as_str(), values.as_slice())),
            FieldValues::Text(_) => None,
        })
    }

    /// Text fields whose name starts with `prefix`, in column order.
    pub fn text_fields_with_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a [Option<String>])> + 'a {
        self.fields.iter().filter_map(move |f| match &f.values {
            FieldValues::Text(values) if f.name.starts_with(prefix) => {
                Some((f.name.as_str(), values.as_slice()))
            }
            _ => None,
        })
    }

    pub fn size_categories(&self) -> Option<&[SizeCategory]> {
        self.size_category.as_deref()
    }

    pub fn industry_short(&self) -> Option<&[Option<String>]> {
        self.industry_short.as_deref()
    }

    pub fn headers(&self) -> Vec<String> {
        let mut headers = self
            .fields
            .iter()
            .map(|f| f.name.clone())
            .collect::<Vec<_>>();
        if self.size_category.is_some() {
            headers.push(SIZE_CATEGORY_FIELD.to_string());
        }
        if self.industry_short.is_some() {
            headers.push(INDUSTRY_SHORT_FIELD.to_string());
        }
        headers
    }

    pub fn row(&self, row: usize) -> Vec<String> {
        let mut cells = self
            .fields
            .iter()
            .map(|f| f.values.render(row))
            .collect::<Vec<_>>();
        if let Some(categories) = &self.size_category {
            cells.push(categories[row].as_str().to_string());
        }
        if let Some(short) = &self.industry_short {
            cells.push(short[row].clone().unwrap_or_default());
        }
        cells
    }

    pub fn write_csv<W: Write>(&self, writer: &mut csv::Writer<W>) -> Result<()> {
        writer
            .write_record(self.headers())
            .context("Writing normalized headers")?;
        for row in 0..self.row_count {
            writer
                .write_record(self.row(row))
                .with_context(|| format!("Writing normalized row {}", row + 2))?;
        }
        writer.flush().context("Flushing normalized output")?;
        Ok(())
    }

    pub fn save(&self, path: &Path, delimiter: u8) -> Result<()> {
        let mut writer = io_utils::open_csv_writer(Some(path), delimiter)?;
        self.write_csv(&mut writer)?;
        info!(
            "Normalized table with {} row(s) written to {:?}",
            self.row_count, path
        );
        Ok(())
    }

    pub fn to_csv_string(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        self.write_csv(&mut writer)?;
        let bytes = writer
            .into_inner()
            .map_err(|err| anyhow::anyhow!("Finishing CSV buffer: {err}"))?;
        Ok(String::from_utf8(bytes)?)
    }

    /// Reads a table written by [`SurveyTable::save`].
    pub fn load(path: &Path, delimiter: u8, encoding: &'static Encoding) -> Result<Self> {
        let raw = crate::raw::RawTable::load(path, delimiter, encoding)?;
        let mut table = SurveyTable::new(raw.row_count());
        for (idx, name) in raw.headers.iter().enumerate() {
            let cells = raw.rows.iter().map(|row| row[idx].as_str());
            match name.as_str() {
                SIZE_CATEGORY_FIELD => {
                    table.set_size_category(cells.map(SizeCategory::from_label).collect())?;
                }
                INDUSTRY_SHORT_FIELD => {
                    table.set_industry_short(cells.map(non_empty).collect())?;
                }
                salary if rules::is_salary_field(salary) => {
                    let values = cells
                        .map(|cell| match coerce_salary(cell) {
                            Coerced::Value(value) => Some(value),
                            _ => None,
                        })
                        .collect();
                    table.push_field(Field::salary(salary, values))?;
                }
                other => {
                    table.push_field(Field::text(other, cells.map(non_empty).collect()))?;
                }
            }
        }
        Ok(table)
    }

    /// SHA-256 over column names and typed cell values.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update((self.row_count as u64).to_le_bytes());
        for field in &self.fields {
            hasher.update(field.name.as_bytes());
            hasher.update([0x1f]);
            match &field.values {
                FieldValues::Salary(values) => {
                    hasher.update(b"S");
                    for value in values {
                        match value {
                            Some(v) => {
                                hasher.update([1]);
                                hasher.update(v.to_bits().to_le_bytes());
                            }
                            None => hasher.update([0]),
                        }
                    }
                }
                FieldValues::Text(values) => {
                    hasher.update(b"T");
                    for value in values {
                        match value {
                            Some(v) => {
                                hasher.update([1]);
                                hasher.update((v.len() as u64).to_le_bytes());
                                hasher.update(v.as_bytes());
                            }
                            None => hasher.update([0]),
                        }
                    }
                }
            }
        }
        if let Some(categories) = &self.size_category {
            hasher.update(SIZE_CATEGORY_FIELD.as_bytes());
            for category in categories {
                hasher.update(category.as_str().as_bytes());
                hasher.update([0x1e]);
            }
        }
        if let Some(short) = &self.industry_short {
            hasher.update(INDUSTRY_SHORT_FIELD.as_bytes());
            for value in short {
                hasher.update(value.as_deref().unwrap_or("\u{0}").as_bytes());
                hasher.update([0x1e]);
            }
        }
        format!("{:x}", hasher.finalize())
    }
}

fn non_empty(cell: &str) -> Option<String> {
    if cell.is_empty() {
        None
    } else {
        Some(cell.to_string())
    }
}
