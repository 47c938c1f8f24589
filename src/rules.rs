//! Ordered header-matching rules for the salary survey export.
//!
//! Rules are evaluated top to bottom and the first match wins. Several survey
//! questions mention more than one job title (the assistant to the general
//! manager mentions `GERENTE GENERAL`, for instance), so reordering this table
//! changes which columns survive deduplication.

/// Canonical prefix of every salary field.
pub const SALARY_PREFIX: &str = "salario_";
pub const BONUS_PREFIX: &str = "bonus_";
pub const BENEFIT_PREFIX: &str = "benef_";

pub const SIZE_FIELD: &str = "tamano";
pub const INDUSTRY_FIELD: &str = "rubro";
pub const SIZE_CATEGORY_FIELD: &str = "categoria_tamano";
pub const INDUSTRY_SHORT_FIELD: &str = "rubro_corto";

/// Names the normalizer appends itself; no survey column may claim them.
pub const DERIVED_FIELDS: [&str; 2] = [SIZE_CATEGORY_FIELD, INDUSTRY_SHORT_FIELD];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingRule {
    pub canonical: &'static str,
    /// The rule matches when any of these substrings occurs in the header.
    pub any_of: &'static [&'static str],
    /// ...unless one of these occurs as well.
    pub none_of: &'static [&'static str],
    pub case_insensitive: bool,
}

impl MappingRule {
    pub fn matches(&self, header: &str) -> bool {
        if self.case_insensitive {
            let lowered = header.to_lowercase();
            self.any_of.iter().any(|p| lowered.contains(&p.to_lowercase()))
                && !self.none_of.iter().any(|p| lowered.contains(&p.to_lowercase()))
        } else {
            self.any_of.iter().any(|p| header.contains(p))
                && !self.none_of.iter().any(|p| header.contains(p))
        }
    }
}

const fn rule(canonical: &'static str, any_of: &'static [&'static str]) -> MappingRule {
    MappingRule {
        canonical,
        any_of,
        none_of: &[],
        case_insensitive: false,
    }
}

const fn rule_excluding(
    canonical: &'static str,
    any_of: &'static [&'static str],
    none_of: &'static [&'static str],
) -> MappingRule {
    MappingRule {
        canonical,
        any_of,
        none_of,
        case_insensitive: false,
    }
}

const fn rule_ignore_case(canonical: &'static str, any_of: &'static [&'static str]) -> MappingRule {
    MappingRule {
        canonical,
        any_of,
        none_of: &[],
        case_insensitive: true,
    }
}

pub const RULES: &[MappingRule] = &[
    // company
    rule("timestamp", &["Marca temporal"]),
    rule("puntuacion", &["Puntuación"]),
    rule(INDUSTRY_FIELD, &["RUBRO"]),
    rule(SIZE_FIELD, &["TAMAÑO"]),
    // projections and employment
    rule(
        "aumento_salarial_2025_pct",
        &["AUMENTO SALARIAL estima dar la empresa en TODO el año 2025"],
    ),
    rule("cantidad_aumentos_2025", &["Cuantos aumentos salariales"]),
    rule(
        "aumento_acumulado_2025",
        &["AUMENTO salarial ACUMULADO de Enero a Agosto 2025"],
    ),
    rule(
        "indicador_aumentos",
        &["indicador con el cual prevé dar los aumentos"],
    ),
    rule_ignore_case("otro_indicador", &["otro indicador"]),
    rule("prevision_incorporacion", &["incorporar nuevos puestos"]),
    rule("prevision_reduccion", &["reducir puestos"]),
    rule("rotacion_2025_pct", &["Rotación"]),
    // salaries
    rule("salario_ceo", &["CEO / GERENTE GENERAL", "GERENTE GENERAL"]),
    rule("salario_asistente_gg", &["ASISTENTE DE GERENTE GENERAL"]),
    rule("salario_director_comercial", &["DIRECTOR COMERCIAL"]),
    rule("salario_gerente_ventas", &["GERENTE DE VENTAS"]),
    rule("salario_jefe_ventas", &["JEFE DE VENTAS"]),
    rule("salario_ejecutivo_ventas", &["EJECUTIVO DE VENTAS"]),
    rule("salario_analista_ecommerce", &["ANALISTA E-COMMERCE"]),
    rule("salario_analista_facturacion", &["ANALISTA DE FACTURACION"]),
    rule("salario_gerente_marketing", &["GERENTE DE MARKETING"]),
    rule("salario_jefe_marketing", &["JEFE DE MARKETING"]),
    rule("salario_analista_marketing", &["ANALISTA DE MARKETING"]),
    rule("salario_gerente_comex", &["GERENTE DE COMERCIO EXTERIOR"]),
    rule("salario_responsable_comex", &["RESPONSABLE DE COMERCIO EXTERIOR"]),
    rule("salario_asistente_comex", &["ASISTENTE DE COMERCIO EXTERIOR"]),
    rule("salario_atencion_cliente", &["ATENCION AL CLIENTE"]),
    rule("salario_jefe_hospitalidad", &["JEFE DE HOSPITALIDAD Y TURISMO"]),
    rule("salario_guia_turismo", &["GUIA DE TURISMO"]),
    rule("salario_jefe_alimentos_bebidas", &["JEFE DE ALIMENTOS & BEBIDAS"]),
    rule("salario_chef_ejecutivo", &["CHEF EJECUTIVO"]),
    rule("salario_jefe_salon", &["JEFE DE SALON", "Maître"]),
    rule("salario_gerente_ops_hotel", &["GERENTE DE OPERACIONES (HOTEL)"]),
    rule("salario_jefe_recepcion_hotel", &["JEFE DE RECEPCION (HOTEL)"]),
    rule("salario_recepcionista_hotel", &["RECEPCIONISTA (HOTEL)"]),
    rule("salario_concierge", &["CONCIERGE (HOTEL)"]),
    rule("salario_director_admin_finanzas", &["DIRECTOR DE ADMIN. & FINANZAS"]),
    rule(
        "salario_gerente_admin_conta",
        &["GERENTE DE ADMIN, CONTABILIDAD & IMPUESTOS"],
    ),
    rule(
        "salario_jefe_admin_conta",
        &["JEFE DE ADMINISTRACION & CONTABILIDAD"],
    ),
    rule("salario_analista_contabilidad", &["ANALISTA DE CONTABILIDAD"]),
    rule("salario_jefe_impuestos", &["JEFE DE IMPUESTOS"]),
    rule("salario_analista_impuestos", &["ANALISTA DE IMPUESTOS"]),
    rule("salario_jefe_finanzas", &["JEFE DE FINANZAS"]),
    rule(
        "salario_analista_cuentas_pagar",
        &["ANALISTA DE CUENTAS POR PAGAR"],
    ),
    rule(
        "salario_empleado_administrativo",
        &["EMPLEADO ADMINISTRATIVO", "DATA ENTRY"],
    ),
    rule("salario_jefe_creditos_cobranzas", &["JEFE DE CREDITOS Y COBRANZAS"]),
    rule("salario_analista_cobranzas", &["ANALISTA DE COBRANZAS"]),
    rule("salario_jefe_control_gestion", &["JEFE DE CONTROL DE GESTION"]),
    rule(
        "salario_analista_control_gestion",
        &["ANALISTA DE CONTROL DE GESTION"],
    ),
    rule("salario_auditor_interno", &["AUDITOR INTERNO"]),
    rule_excluding("salario_recepcionista", &["RECEPCIONISTA:"], &["HOTEL"]),
    rule_excluding(
        "salario_director_operaciones",
        &["DIRECTOR DE OPERACIONES"],
        &["HOTEL"],
    ),
    rule("salario_gerente_planta", &["GERENTE DE PLANTA", "OPERACIONES:"]),
    rule("salario_jefe_produccion", &["JEFE DE PRODUCCION"]),
    rule(
        "salario_ingeniero_procesos",
        &["INGENIERO DE PROCESOS", "MEJORA CONTINUA"],
    ),
    rule("salario_supervisor_produccion", &["SUPERVISOR DE PRODUCCION"]),
    rule("salario_analista_produccion", &["ANALISTA DE PRODUCCION"]),
    rule("salario_gerente_enologia", &["GERENTE DE ENOLOGIA", "1er Enologo"]),
    rule("salario_jefe_bodega", &["JEFE DE BODEGA", "2ndo Enologo"]),
    rule("salario_supervisor_bodega", &["SUPERVISOR DE BODEGA"]),
    rule("salario_gerente_agricola", &["GERENTE AGRICOLA"]),
    rule("salario_ingeniero_agronomo", &["INGENIERO AGRONOMO"]),
    rule("salario_supervisor_fincas", &["SUPERVISOR DE FINCAS"]),
    rule("salario_jefe_laboratorio", &["JEFE DE LABORATORIO"]),
    rule("salario_analista_laboratorio", &["ANALISTA DE LABORATORIO"]),
    rule("salario_gerente_supply_chain", &["GERENTE DE SUPPLY CHAIN"]),
    rule("salario_jefe_planificacion", &["JEFE DE PLANIFICACION"]),
    rule("salario_jefe_logistica", &["JEFE DE LOGISTICA"]),
    rule("salario_analista_logistica", &["ANALISTA DE LOGISTICA"]),
    rule("salario_supervisor_depositos", &["SUPERVISOR DE DEPOSITOS"]),
    rule(
        "salario_gerente_compras",
        &["GERENTE DE ABASTECIMIENTO Y COMPRAS"],
    ),
    rule("salario_jefe_compras", &["JEFE DE COMPRAS"]),
    rule(
        "salario_comprador_analista",
        &["COMPRADOR", "ANALISTA DE COMPRAS"],
    ),
    rule("salario_gerente_mantenimiento", &["GERENTE DE MANTENIMIENTO"]),
    rule("salario_jefe_mantenimiento", &["JEFE DE MANTENIMIENTO"]),
    rule(
        "salario_supervisor_mantenimiento",
        &["SUPERVISOR DE MANTENIMIENTO"],
    ),
    rule("salario_tecnico_mantenimiento", &["TECNICO DE MANTENIMIENTO"]),
    rule(
        "salario_gerente_calidad",
        &["GERENTE DE ASEGURAMIENTO DE LA CALIDAD"],
    ),
    rule("salario_jefe_calidad", &["JEFE DE CALIDAD"]),
    rule("salario_analista_calidad", &["ANALISTA DE CALIDAD"]),
    rule("salario_tecnico_calidad", &["TECNICO DE CALIDAD"]),
    rule(
        "salario_diseñador_grafico",
        &["DISEÑADOR GRAFICO", "PRODUCTO:"],
    ),
    rule(
        "salario_responsable_sustentabilidad",
        &["SUSTENTABILIDAD", "MEDIOAMBIENTE"],
    ),
    rule("salario_gerente_seguridad", &["GERENTE DE SEGURIDAD & HIGIENE"]),
    rule("salario_jefe_seguridad", &["JEFE DE SEGURIDAD & HIGIENE"]),
    rule("salario_tecnico_seguridad", &["TECNICO DE SEGURIDAD & HIGIENE"]),
    rule("salario_jefe_ingenieria", &["JEFE DE INGENIERIA Y PROYECTOS"]),
    rule(
        "salario_ingeniero_proyectos",
        &["INGENIERO DE PROYECTOS", "PROJECT MANAGER"],
    ),
    rule(
        "salario_asistente_proyecto",
        &["ASISTENTE DE PROYECTO", "PROYECTISTA"],
    ),
    rule("salario_jefe_obra", &["JEFE DE OBRA"]),
    rule("salario_supervisor_obra", &["SUPERVISOR DE OBRA"]),
    rule("salario_director_rrhh", &["DIRECTOR DE RECURSOS HUMANOS"]),
    rule("salario_gerente_rrhh", &["GERENTE DE RECURSOS HUMANOS"]),
    rule("salario_jefe_rrhh", &["JEFE DE RECURSOS HUMANOS", "HRBP"]),
    rule("salario_responsable_liquidacion", &["RESPONSABLE DE LIQUIDACION"]),
    rule(
        "salario_analista_admin_personal",
        &["ANALISTA DE ADMINISTRACION DE PERSONAL"],
    ),
    rule("salario_jefe_seleccion", &["JEFE DE SELECCION"]),
    rule("salario_analista_seleccion", &["ANALISTA DE SELECCION"]),
    rule(
        "salario_analista_capacitacion",
        &["ANALISTA DE CAPACITACION Y DESARROLLO"],
    ),
    rule("salario_director_it", &["DIRECTOR DE SISTEMAS & IT"]),
    rule("salario_gerente_it", &["GERENTE DE SISTEMAS & IT"]),
    rule("salario_jefe_desarrollo", &["JEFE DE DESARROLLO DE SISTEMAS"]),
    rule(
        "salario_programador",
        &["PROGRAMADOR", "DESARROLLADOR DE SISTEMAS"],
    ),
    rule("salario_analista_funcional", &["ANALISTA FUNCIONAL"]),
    rule("salario_jefe_redes", &["JEFE DE REDES E INFRAESTRUCTURA"]),
    rule("salario_tecnico_redes", &["TECNICO DE REDES E INFRAESTRUCTURA"]),
    rule("salario_jefe_soporte", &["JEFE DE SOPORTE TECNICO"]),
    rule("salario_analista_helpdesk", &["ANALISTA HELP DESK"]),
    rule("salario_joven_profesional", &["JOVEN PROFESIONAL"]),
    rule("salario_pasante", &["PASANTE"]),
    // bonuses
    rule("bonus_gerente_general", &["Bonus GERENTE GENERAL"]),
    rule("bonus_directores", &["Bonus DIRECTORES"]),
    rule("bonus_gerentes", &["Bonus GERENTES"]),
    rule("bonus_jefes", &["Bonus JEFES"]),
    rule("bonus_supervisores", &["Bonus SUPERVISORES"]),
    rule("bonus_analistas", &["Bonus ANALISTAS"]),
    // monetary benefits
    rule("benef_medicina_prepaga", &["Medicina Prepaga"]),
    rule(
        "benef_reintegro_medicamentos",
        &["reintegro en compra de medicamentos"],
    ),
    rule("benef_prestamos", &["Prestamos al personal"]),
    rule("benef_almuerzo", &["Almuerzo pago", "Viandas"]),
    rule("benef_gimnasio", &["Gimnasio", "Yoga", "Mindfulness"]),
    rule("benef_gift_card", &["Gift card", "Vales de compras"]),
    rule("benef_red_descuentos", &["Red de Descuentos"]),
    rule(
        "benef_descuento_productos",
        &["Descuento en productos de la empresa"],
    ),
    rule("benef_combustible", &["Combustible / Transporte"]),
    rule("benef_cochera", &["Cochera", "estacionamiento"]),
    rule("benef_auto_gerentes", &["Auto compañía para Gerentes"]),
    rule("benef_auto_vendedores", &["Auto compañía para Vendedores"]),
    rule(
        "benef_gastos_auto",
        &["Gastos de Mantenimiento y Seguro de Auto"],
    ),
    rule("benef_tarjeta_credito", &["Tarjeta de Crédito Corporativa"]),
    rule("benef_colegio", &["Pago de Colegio"]),
    rule("benef_pension", &["Planes de Pensión", "Seguros de retiro"]),
    rule("benef_pago_dolares", &["Pago del sueldo en dólares"]),
    rule("benef_posgrados", &["Pago de Posgrados", "MBA"]),
    rule("benef_coaching", &["Pago de Sesiones de Coaching"]),
    rule("benef_idiomas", &["Pago de Clases de Inglés"]),
    rule("benef_internet", &["Pago de conectividad", "Internet"]),
    // time benefits
    rule(
        "benef_vacaciones_adicionales",
        &["Dias adicionales de vacaciones"],
    ),
    rule("benef_home_office", &["Home Office"]),
    rule("benef_dia_flex", &["Día flex"]),
    rule("benef_cumpleanos", &["cumpleaños libre"]),
    rule("benef_maternidad", &["Licencia de Maternidad extendida"]),
    rule("benef_paternidad", &["Licencia de Paternidad extendida"]),
    rule("benef_after_office", &["after office"]),
    rule(
        "benef_integracion",
        &["Actividades de integración dentro del horario"],
    ),
    // free-text comments
    rule(
        "comentarios_beneficios",
        &["beneficio que tengan implementado"],
    ),
    rule("sugerencias_puestos", &["NUEVOS PUESTOS"]),
    rule("comentarios_generales", &["OTRA INFORMACION"]),
];

/// Returns the position and rule of the first rule matching `header`.
pub fn first_match(header: &str) -> Option<(usize, &'static MappingRule)> {
    RULES
        .iter()
        .enumerate()
        .find(|(_, rule)| rule.matches(header))
}

pub fn is_salary_field(name: &str) -> bool {
    name.starts_with(SALARY_PREFIX)
}

pub fn is_derived_field(name: &str) -> bool {
    DERIVED_FIELDS.contains(&name)
}
