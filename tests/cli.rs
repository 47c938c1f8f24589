mod common;

use std::fs;

use common::{RAW_FIXTURE, TestWorkspace, bin, shipped_overrides};
use encoding_rs::WINDOWS_1252;
use encuesta_salarial::mapping::MappingRecord;
use predicates::prelude::*;
use predicates::str::contains;

const RAW_EXPORT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/encuesta_raw.csv");

#[test]
fn normalize_writes_table_mapping_and_summary() {
    let workspace = TestWorkspace::new();
    let output = workspace.join("out/normalizada.csv");
    let mapping = workspace.join("out/mapping.json");
    bin()
        .args([
            "normalize",
            "-i",
            RAW_EXPORT,
            "-o",
            output.to_str().unwrap(),
            "-m",
            mapping.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(contains("Respondents: 10"))
        .stdout(contains("Top 10 fields by respondents"))
        .stdout(contains("Dropped artifacts: 1"));

    let contents = fs::read_to_string(&output).expect("read normalized output");
    let header = contents.lines().next().unwrap();
    assert!(header.starts_with("timestamp,puntuacion,nombre_de_la_empresa,rubro,tamano,"));
    assert!(header.ends_with("comentarios_finales,categoria_tamano,rubro_corto"));
    assert!(!header.contains("comentarios_finales_1"));
    assert_eq!(contents.lines().count(), 11);

    let record = MappingRecord::load(&mapping).expect("mapping record");
    assert_eq!(record.columns.len(), 18);
    assert_eq!(record.dropped.len(), 3);
    assert_eq!(record.artifacts.len(), 1);
    assert_eq!(record.artifacts[0].raw, "Comentarios finales.1");
    let header_fields = header.split(',').collect::<Vec<_>>();
    for column in &record.columns {
        assert!(
            header_fields.contains(&column.canonical.as_str()),
            "{} listed in the mapping but missing from the table",
            column.canonical
        );
    }
    assert!(record.source.ends_with(RAW_FIXTURE));
}

#[test]
fn normalize_reports_missing_input() {
    let workspace = TestWorkspace::new();
    bin()
        .args([
            "normalize",
            "-i",
            workspace.join("missing.csv").to_str().unwrap(),
            "-o",
            workspace.join("out.csv").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("input file not found"));
    assert!(!workspace.join("out.csv").exists());
}

#[test]
fn normalize_rejects_empty_input() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("vacia.csv", "");
    bin()
        .args([
            "normalize",
            "-i",
            input.to_str().unwrap(),
            "-o",
            workspace.join("out.csv").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(contains("has no header row"));
}

#[test]
fn normalize_decodes_windows_1252_input() {
    let workspace = TestWorkspace::new();
    let text = "Nombre de la Empresa,TAMAÑO de la empresa,JEFE DE VENTAS: supervisa vendedores\n\
                Metalúrgica Este,+ 500 empleados,3000000\n";
    let (bytes, _, _) = WINDOWS_1252.encode(text);
    let input = workspace.path().join("latin1.csv");
    fs::write(&input, &bytes).expect("write latin1 input");
    let output = workspace.join("normalizada.csv");
    bin()
        .args([
            "normalize",
            "-i",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "--input-encoding",
            "windows-1252",
            "--no-summary",
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    let contents = fs::read_to_string(&output).expect("read normalized output");
    assert_eq!(
        contents,
        "nombre_de_la_empresa,tamano,salario_jefe_ventas,categoria_tamano\n\
         Metalúrgica Este,+ 500 empleados,3000000,Grande\n"
    );
}

#[test]
fn unknown_encoding_is_fatal() {
    bin()
        .args([
            "mapping",
            "-i",
            RAW_EXPORT,
            "--input-encoding",
            "klingon",
        ])
        .assert()
        .failure()
        .stderr(contains("unknown encoding 'klingon'"));
}

#[test]
fn semicolon_delimited_export() {
    let workspace = TestWorkspace::new();
    let input = workspace.write(
        "encuesta.csv",
        "TAMAÑO;PASANTE: estudiante\n1 - 50 empleados;700000\n51 - 200 empleados;0\n",
    );
    bin()
        .args([
            "stats",
            "-i",
            input.to_str().unwrap(),
            "--raw",
            "--delimiter",
            ";",
            "--json",
        ])
        .assert()
        .success()
        .stdout(contains("\"field\": \"salario_pasante\""))
        .stdout(contains("\"count\": 1"));
}

#[test]
fn mapping_lists_status_per_column() {
    let workspace = TestWorkspace::new();
    let output = workspace.join("mapping.json");
    bin()
        .args(["mapping", "-i", RAW_EXPORT, "-o", output.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("salario_gerente_ventas"))
        .stdout(contains("dropped (dup of #9)"))
        .stdout(contains("dropped (dup of #12)"))
        .stdout(contains("dropped (artifact)"))
        .stdout(contains("synthesized"));
    let record = MappingRecord::load(&output).expect("mapping record");
    assert_eq!(record.dropped[1].canonical, "salario_jefe_ventas");
}

#[test]
fn stats_for_single_field_include_job_description() {
    let workspace = TestWorkspace::new();
    let normalized = workspace.normalized_fixture();
    bin()
        .args([
            "stats",
            "-i",
            normalized.to_str().unwrap(),
            "--field",
            "salario_ceo",
        ])
        .assert()
        .success()
        .stdout(contains("7500000"))
        .stdout(contains("8750000"))
        .stdout(contains("Pyme"))
        .stdout(contains("CEO / Gerente General: Responsabilidad de definir"))
        .stdout(contains("Area: Gerencia General"));
}

#[test]
fn stats_segment_filter() {
    let workspace = TestWorkspace::new();
    let normalized = workspace.normalized_fixture();
    bin()
        .args([
            "stats",
            "-i",
            normalized.to_str().unwrap(),
            "-f",
            "salario_pasante",
            "--segment",
            "grande",
        ])
        .assert()
        .success()
        .stdout(contains("875000"))
        .stdout(contains("Pyme").not())
        .stdout(contains("General").not());
}

#[test]
fn stats_unknown_field_fails() {
    let workspace = TestWorkspace::new();
    let normalized = workspace.normalized_fixture();
    bin()
        .args([
            "stats",
            "-i",
            normalized.to_str().unwrap(),
            "--field",
            "salario_director_it",
        ])
        .assert()
        .failure()
        .stderr(contains("no statistics for field 'salario_director_it'"));
}

#[test]
fn stats_json_from_raw_export() {
    let output = bin()
        .args(["stats", "-i", RAW_EXPORT, "--raw", "--json"])
        .output()
        .expect("run stats");
    assert!(output.status.success());
    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stats json output");
    let fields = parsed.as_array().expect("array of fields");
    assert_eq!(fields.len(), 6);
    assert_eq!(fields[0]["field"], "salario_ceo");
    assert_eq!(fields[0]["general"]["p50"], 7_500_000.0);
    assert_eq!(fields[0]["general"]["provenance"], "computed");
}

#[test]
fn top_ranks_by_respondents() {
    let workspace = TestWorkspace::new();
    let normalized = workspace.normalized_fixture();
    bin()
        .args(["top", "-i", normalized.to_str().unwrap(), "-n", "2"])
        .assert()
        .success()
        .stdout(contains("salario_ceo"))
        .stdout(contains("salario_gerente_ventas"))
        .stdout(contains("salario_jefe_ventas").not());
}

#[test]
fn summary_writes_csv_with_report_headers() {
    let workspace = TestWorkspace::new();
    let normalized = workspace.normalized_fixture();
    let output = workspace.join("resumen.csv");
    bin()
        .args([
            "summary",
            "-i",
            normalized.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(contains("Brecha_Grande_Pyme_%"))
        .stdout(contains("45.8%"));
    let contents = fs::read_to_string(&output).expect("read summary");
    let mut lines = contents.lines();
    assert_eq!(
        lines.next().unwrap(),
        "Campo,Cargo,Respuestas,P25_General,P50_General,P75_General,Promedio_General,\
         P25_Grande,P50_Grande,P75_Grande,P25_Pyme,P50_Pyme,P75_Pyme,Brecha_Grande_Pyme_%"
    );
    assert!(lines.next().unwrap().starts_with("salario_ceo,CEO / Gerente General,8,"));
    assert_eq!(contents.lines().count(), 7);
}

#[test]
fn summary_by_functional_area() {
    let workspace = TestWorkspace::new();
    let normalized = workspace.normalized_fixture();
    bin()
        .args([
            "summary",
            "-i",
            normalized.to_str().unwrap(),
            "--area",
            "comercial",
        ])
        .assert()
        .success()
        .stdout(contains("salario_gerente_ventas"))
        .stdout(contains("salario_analista_facturacion"))
        .stdout(contains("salario_ceo").not());

    bin()
        .args([
            "summary",
            "-i",
            normalized.to_str().unwrap(),
            "--area",
            "Astronautas",
        ])
        .assert()
        .failure()
        .stderr(contains("Unknown functional area 'Astronautas'"));
}

#[test]
fn summary_applies_overrides() {
    let workspace = TestWorkspace::new();
    let normalized = workspace.normalized_fixture();
    bin()
        .args([
            "stats",
            "-i",
            normalized.to_str().unwrap(),
            "-f",
            "salario_analista_facturacion",
            "--overrides",
            shipped_overrides().to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(contains("1520000"))
        .stdout(contains("override"));
}

#[test]
fn hierarchy_reports_levels_and_gap() {
    bin()
        .args(["hierarchy", "-i", RAW_EXPORT, "--raw"])
        .assert()
        .success()
        .stdout(contains("GERENTE"))
        .stdout(contains("JEFE"))
        .stdout(contains("DIRECTOR").not())
        .stdout(contains("Grande vs Pyme (P50)"))
        .stdout(contains("45.8%"));
}

#[test]
fn distribution_commands() {
    bin()
        .args(["outlook", "-i", RAW_EXPORT, "--raw", "-n", "1"])
        .assert()
        .success()
        .stdout(contains("aumento_salarial_2025_pct"))
        .stdout(contains("rotacion_2025_pct"))
        .stdout(contains("44.4%"));

    bin()
        .args(["benefits", "-i", RAW_EXPORT, "--raw"])
        .assert()
        .success()
        .stdout(contains("benef_home_office"))
        .stdout(contains("62.5%"));

    bin()
        .args(["bonus", "-i", RAW_EXPORT, "--raw"])
        .assert()
        .success()
        .stdout(contains("bonus_jefes"))
        .stdout(contains("1.4"));
}

#[test]
fn report_combines_sections() {
    let workspace = TestWorkspace::new();
    let summary = workspace.join("reporte/resumen.csv");
    bin()
        .args([
            "report",
            "-i",
            RAW_EXPORT,
            "--raw",
            "--overrides",
            shipped_overrides().to_str().unwrap(),
            "--summary-output",
            summary.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(contains("Respondents: 10"))
        .stdout(contains("Transporte y Logística"))
        .stdout(contains("Most answered positions"))
        .stdout(contains("Salary summary"));
    assert!(summary.exists());
}
