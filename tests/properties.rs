use std::collections::HashSet;

use encuesta_salarial::{
    mapping::ColumnMapping,
    normalize::{self, Normalized},
    raw::RawTable,
    stats::SurveyStatistics,
};
use proptest::prelude::*;

const CEO_HEADER: &str = "👤 CEO / GERENTE GENERAL: Responsabilidad de definir el rumbo [SUELDO BRUTO MENSUAL, escribir 0 si no aplica]";
const SIZE_HEADER: &str = "TAMAÑO de la empresa";

const KNOWN_HEADERS: &[&str] = &[
    "Marca temporal",
    "RUBRO de la empresa",
    SIZE_HEADER,
    CEO_HEADER,
    "👤 ASISTENTE DE GERENTE GENERAL: agenda del Gerente General",
    "JEFE DE VENTAS: supervisa vendedores",
    "JEFE DE VENTAS (otra sucursal)",
    "PASANTE: estudiante",
    "🎁 Bonus JEFES",
    "Comentarios finales",
    "Comentarios finales.1",
];

const BRACKETS: &[&str] = &[
    "1 - 50 empleados",
    "51 - 200 empleados",
    "201 - 500 empleados",
    "+ 500 empleados",
    "Unipersonal",
    "",
];

fn header_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => prop::sample::select(KNOWN_HEADERS).prop_map(str::to_string),
        1 => "[A-Za-zñÑ:¿? ]{0,24}",
    ]
}

fn salary_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("0".to_string()),
        Just("a convenir".to_string()),
        (1u32..20_000_000).prop_map(|v| v.to_string()),
    ]
}

fn survey_rows() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(
        (prop::sample::select(BRACKETS).prop_map(str::to_string), salary_cell()),
        1..40,
    )
}

fn normalize_rows(rows: &[(String, String)]) -> Normalized {
    let raw = RawTable::new(
        vec![SIZE_HEADER.to_string(), CEO_HEADER.to_string()],
        rows.iter()
            .map(|(size, salary)| vec![size.clone(), salary.clone()])
            .collect(),
    );
    let mapping = ColumnMapping::generate(&raw.headers);
    normalize::normalize(&raw, &mapping).expect("normalize")
}

proptest! {
    #[test]
    fn mapped_canonical_names_are_unique(
        headers in prop::collection::vec(header_strategy(), 0..16)
    ) {
        let mapping = ColumnMapping::generate(&headers);
        let mut seen = HashSet::new();
        for column in &mapping.columns {
            prop_assert!(seen.insert(column.canonical.as_str()), "{} mapped twice", column.canonical);
        }
        prop_assert_eq!(
            mapping.columns.len() + mapping.dropped.len() + mapping.artifacts.len(),
            headers.len()
        );
        for dropped in &mapping.dropped {
            prop_assert!(dropped.kept_index < dropped.index);
            prop_assert_eq!(mapping.canonical_for(dropped.kept_index), Some(dropped.canonical.as_str()));
        }
    }

    #[test]
    fn zero_salaries_are_never_stored(rows in survey_rows()) {
        let normalized = normalize_rows(&rows);
        let values = normalized.table.salary("salario_ceo").expect("salary field");
        for ((_, cell), value) in rows.iter().zip(values) {
            if cell == "0" {
                prop_assert_eq!(*value, None);
            }
            prop_assert_ne!(*value, Some(0.0));
        }
    }

    #[test]
    fn counts_match_non_missing_values(rows in survey_rows()) {
        let normalized = normalize_rows(&rows);
        let survey = &normalized.table;
        let values = survey.salary("salario_ceo").expect("salary field");
        let categories = survey.size_categories().expect("size category");
        let statistics = SurveyStatistics::compute(survey);
        let present = values.iter().flatten().count();
        match statistics.field("salario_ceo") {
            None => prop_assert_eq!(present, 0),
            Some(field) => {
                for (segment, stats) in field.segments() {
                    let expected = values
                        .iter()
                        .zip(categories)
                        .filter(|(value, category)| {
                            value.is_some() && (segment.as_str() == "General" || segment.as_str() == category.as_str())
                        })
                        .count();
                    prop_assert_eq!(stats.count, expected);
                }
            }
        }
    }

    #[test]
    fn percentiles_are_ordered(rows in survey_rows()) {
        let statistics = SurveyStatistics::compute(&normalize_rows(&rows).table);
        for field in &statistics.fields {
            for (_, stats) in field.segments() {
                prop_assert!(stats.min <= stats.p25);
                prop_assert!(stats.p25 <= stats.p50);
                prop_assert!(stats.p50 <= stats.p75);
                prop_assert!(stats.p75 <= stats.max);
                prop_assert_eq!(stats.std_dev.is_none(), stats.count == 1);
            }
        }
    }

    #[test]
    fn normalizing_twice_is_byte_identical(rows in survey_rows()) {
        let first = normalize_rows(&rows).table.to_csv_string().expect("csv");
        let second = normalize_rows(&rows).table.to_csv_string().expect("csv");
        prop_assert_eq!(first, second);
    }
}

#[test]
fn zero_sentinel_scenario() {
    let rows = [
        ("1 - 50 empleados", "0"),
        ("51 - 200 empleados", "5000000"),
        ("1 - 50 empleados", "8000000"),
    ]
    .map(|(size, salary)| (size.to_string(), salary.to_string()));
    let normalized = normalize_rows(&rows);
    assert_eq!(
        normalized.table.salary("salario_ceo").unwrap(),
        &[None, Some(5_000_000.0), Some(8_000_000.0)]
    );
    let statistics = SurveyStatistics::compute(&normalized.table);
    let pyme = statistics.fields[0].pyme.as_ref().unwrap();
    assert_eq!(pyme.count, 2);
    assert_eq!(pyme.p50, 6_500_000.0);
    assert!(statistics.fields[0].grande.is_none());
}
