//! Reference data about the surveyed positions: display names and
//! descriptions, functional areas and hierarchy levels.

use heck::ToTitleCase;

use crate::rules::SALARY_PREFIX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobTitle {
    pub field: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionalArea {
    pub name: &'static str,
    /// Salary field names without the `salario_` prefix.
    pub jobs: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HierarchyLevel {
    pub name: &'static str,
    pub fields: &'static [&'static str],
}

pub const JOB_TITLES: &[JobTitle] = &[
    JobTitle {
        field: "salario_ceo",
        name: "CEO / Gerente General",
        description: "Responsabilidad de definir a dónde se va a dirigir la empresa en un corto, medio y largo plazo. Fijar objetivos que marcan el rumbo y el trabajo de la organización. Definir e implementar la estrategia de la empresa. Asegurar el cumplimiento de los resultados económicos y financieros requeridos por los accionistas.",
    },
    JobTitle {
        field: "salario_asistente_gg",
        name: "Asistente de Gerente General",
        description: "Responsabilidad de llevar agenda laboral del Gerente General y su equipo de gerentes/directores. Gestionar y atender llamadas, correos, correspondencia, participación de eventos, etc. Participar de las reuniones de directorio, armar presentaciones, gestionar sala y equipos. Coordinar viajes, pasajes, traslados y estadías.",
    },
    JobTitle {
        field: "salario_director_comercial",
        name: "Director Comercial",
        description: "Responsabilidad de definir la estrategia comercial de la empresa, supervisar equipos comerciales y de ventas, establecer objetivos de ventas y asegurar su cumplimiento. Reporta directamente a la Gerencia General.",
    },
    JobTitle {
        field: "salario_gerente_ventas",
        name: "Gerente de Ventas",
        description: "Responsabilidad por cumplir los objetivos y lograr el crecimiento comercial fijado por la dirección de la empresa. Diseñar e implementar el plan comercial, las acciones con los clientes, presencia en los diferentes canales.",
    },
    JobTitle {
        field: "salario_jefe_ventas",
        name: "Jefe de Ventas",
        description: "Responsabilidad de supervisar al equipo de vendedores, gestionar la cartera de clientes, definir estrategias de ventas y asegurar el cumplimiento de objetivos comerciales del área.",
    },
    JobTitle {
        field: "salario_ejecutivo_ventas",
        name: "Ejecutivo de Ventas",
        description: "Responsabilidad de gestionar cartera de clientes, realizar visitas comerciales, cerrar ventas, mantener relaciones con clientes y cumplir con los objetivos de ventas asignados.",
    },
    JobTitle {
        field: "salario_analista_ecommerce",
        name: "Analista de E-commerce",
        description: "Responsabilidad de gestionar plataformas de comercio electrónico, análisis de métricas digitales, optimización de conversión y coordinación con áreas de marketing y logística.",
    },
    JobTitle {
        field: "salario_analista_facturacion",
        name: "Analista de Facturación",
        description: "Responsabilidad de emisión de facturas, gestión de comprobantes, control de documentación comercial y coordinación con áreas de administración y ventas.",
    },
    JobTitle {
        field: "salario_gerente_marketing",
        name: "Gerente de Marketing",
        description: "Responsabilidad de diseñar e implementar la estrategia de marketing, gestión de marca, campañas publicitarias, análisis de mercado y coordinación con agencias externas.",
    },
    JobTitle {
        field: "salario_jefe_marketing",
        name: "Jefe de Marketing",
        description: "Responsabilidad de ejecutar el plan de marketing, gestión de redes sociales, coordinación de campañas, análisis de resultados y supervisión del equipo de marketing.",
    },
    JobTitle {
        field: "salario_analista_marketing",
        name: "Analista de Marketing",
        description: "Responsabilidad de análisis de datos de mercado, seguimiento de campañas, gestión de contenidos, investigación de mercado y apoyo en la ejecución del plan de marketing.",
    },
    JobTitle {
        field: "salario_gerente_admin_conta",
        name: "Gerente de Administración y Contabilidad",
        description: "Responsabilidad de gestionar el área administrativa y contable de la empresa, supervisar cierres contables, reportes financieros, presupuestos y cumplimiento normativo.",
    },
    JobTitle {
        field: "salario_jefe_admin_conta",
        name: "Jefe de Administración y Contabilidad",
        description: "Responsabilidad de supervisar procesos administrativos y contables, controlar registraciones, estados contables y coordinación con auditorías.",
    },
    JobTitle {
        field: "salario_analista_contabilidad",
        name: "Analista de Contabilidad",
        description: "Responsabilidad de ejecutar y analizar el proceso completo de la contabilidad: análisis de cuentas, ingreso y pago de facturas, rendiciones de gastos, preparación de estados contables.",
    },
    JobTitle {
        field: "salario_jefe_impuestos",
        name: "Jefe de Impuestos",
        description: "Responsabilidad de gestionar el cumplimiento de obligaciones fiscales, liquidación de impuestos, presentación de declaraciones juradas y asesoramiento tributario.",
    },
    JobTitle {
        field: "salario_analista_impuestos",
        name: "Analista de Impuestos",
        description: "Responsabilidad de cálculo y liquidación de impuestos, preparación de DDJJ, control de retenciones y percepciones, y análisis de normativa fiscal.",
    },
    JobTitle {
        field: "salario_jefe_finanzas",
        name: "Jefe de Finanzas",
        description: "Responsabilidad de gestión de tesorería, análisis financiero, control de flujo de fondos, negociación con bancos y planificación financiera.",
    },
    JobTitle {
        field: "salario_analista_cuentas_pagar",
        name: "Analista de Cuentas a Pagar",
        description: "Responsabilidad de gestión de pagos a proveedores, control de facturas, conciliaciones bancarias y registro de operaciones.",
    },
    JobTitle {
        field: "salario_empleado_administrativo",
        name: "Empleado Administrativo",
        description: "Responsabilidad de tareas administrativas generales, atención telefónica, gestión de archivos, coordinación de trámites y apoyo a diferentes áreas.",
    },
    JobTitle {
        field: "salario_jefe_creditos_cobranzas",
        name: "Jefe de Créditos y Cobranzas",
        description: "Responsabilidad de gestión de cartera de clientes, análisis de crédito, seguimiento de cobranzas, negociación de deudas y minimización de morosidad.",
    },
    JobTitle {
        field: "salario_analista_cobranzas",
        name: "Analista de Cobranzas",
        description: "Responsabilidad de seguimiento de pagos, contacto con clientes morosos, gestión de reclamos y coordinación con áreas comerciales.",
    },
    JobTitle {
        field: "salario_director_rrhh",
        name: "Director de Recursos Humanos",
        description: "Responsabilidad de definir la estrategia de gestión de personas, desarrollo organizacional, clima laboral, compensaciones y beneficios.",
    },
    JobTitle {
        field: "salario_gerente_rrhh",
        name: "Gerente de Recursos Humanos",
        description: "Responsabilidad de implementar políticas de RRHH, procesos de selección, capacitación, evaluación de desempeño y relaciones laborales.",
    },
    JobTitle {
        field: "salario_jefe_rrhh",
        name: "Jefe de Recursos Humanos",
        description: "Responsabilidad de coordinar procesos de RRHH, administración de personal, legajos, contratos y gestión de beneficios.",
    },
    JobTitle {
        field: "salario_responsable_liquidacion",
        name: "Responsable de Liquidación de Sueldos",
        description: "Responsabilidad de liquidación mensual de sueldos, cálculo de cargas sociales, presentación de DDJJ y cumplimiento de obligaciones laborales.",
    },
    JobTitle {
        field: "salario_analista_admin_personal",
        name: "Analista de Administración de Personal",
        description: "Responsabilidad de gestión de legajos, control de ausentismo, registro de novedades y coordinación con liquidación de sueldos.",
    },
    JobTitle {
        field: "salario_jefe_seleccion",
        name: "Jefe de Selección",
        description: "Responsabilidad de liderar procesos de reclutamiento y selección, entrevistas, evaluaciones y onboarding de nuevos colaboradores.",
    },
    JobTitle {
        field: "salario_analista_seleccion",
        name: "Analista de Selección",
        description: "Responsabilidad de búsqueda de candidatos, screening de CVs, coordinación de entrevistas y evaluaciones psicotécnicas.",
    },
    JobTitle {
        field: "salario_analista_capacitacion",
        name: "Analista de Capacitación",
        description: "Responsabilidad de diseño e implementación de programas de capacitación, detección de necesidades, coordinación de formaciones y evaluación de resultados.",
    },
    JobTitle {
        field: "salario_director_it",
        name: "Director de Sistemas / IT",
        description: "Responsabilidad de definir la estrategia tecnológica de la empresa, transformación digital, ciberseguridad e innovación tecnológica.",
    },
    JobTitle {
        field: "salario_gerente_it",
        name: "Gerente de Sistemas / IT",
        description: "Responsabilidad de gestión de infraestructura tecnológica, proyectos de IT, soporte técnico y seguridad informática.",
    },
    JobTitle {
        field: "salario_jefe_desarrollo",
        name: "Jefe de Desarrollo",
        description: "Responsabilidad de liderar equipos de desarrollo de software, gestión de proyectos tecnológicos y arquitectura de sistemas.",
    },
    JobTitle {
        field: "salario_programador",
        name: "Programador / Desarrollador",
        description: "Responsabilidad de desarrollo de software, programación, testing, mantenimiento de aplicaciones y documentación técnica.",
    },
    JobTitle {
        field: "salario_analista_funcional",
        name: "Analista Funcional",
        description: "Responsabilidad de relevamiento de requerimientos, análisis funcional, documentación de procesos y coordinación con desarrollo.",
    },
    JobTitle {
        field: "salario_jefe_redes",
        name: "Jefe de Redes",
        description: "Responsabilidad de gestión de infraestructura de redes, conectividad, seguridad perimetral y administración de servidores.",
    },
    JobTitle {
        field: "salario_tecnico_redes",
        name: "Técnico de Redes",
        description: "Responsabilidad de configuración de equipos de red, mantenimiento de conectividad, troubleshooting y soporte técnico.",
    },
    JobTitle {
        field: "salario_jefe_soporte",
        name: "Jefe de Soporte Técnico",
        description: "Responsabilidad de coordinar equipo de soporte, gestión de tickets, resolución de incidentes y service desk.",
    },
    JobTitle {
        field: "salario_analista_helpdesk",
        name: "Analista de Help Desk",
        description: "Responsabilidad de atención de usuarios, resolución de problemas técnicos, gestión de tickets y soporte remoto.",
    },
    JobTitle {
        field: "salario_director_operaciones",
        name: "Director de Operaciones",
        description: "Responsabilidad de definir estrategia operativa, optimización de procesos productivos, supply chain y gestión de calidad.",
    },
    JobTitle {
        field: "salario_gerente_planta",
        name: "Gerente de Planta",
        description: "Responsabilidad de gestión integral de planta productiva, cumplimiento de objetivos de producción, seguridad y calidad.",
    },
    JobTitle {
        field: "salario_jefe_produccion",
        name: "Jefe de Producción",
        description: "Responsabilidad de planificación y control de producción, supervisión de líneas productivas y optimización de procesos.",
    },
    JobTitle {
        field: "salario_supervisor_produccion",
        name: "Supervisor de Producción",
        description: "Responsabilidad de supervisión de operarios, control de calidad en línea, cumplimiento de estándares de producción.",
    },
    JobTitle {
        field: "salario_gerente_supply_chain",
        name: "Gerente de Supply Chain",
        description: "Responsabilidad de gestión de cadena de suministro, planificación de demanda, inventarios y coordinación logística.",
    },
    JobTitle {
        field: "salario_jefe_logistica",
        name: "Jefe de Logística",
        description: "Responsabilidad de coordinar operaciones logísticas, distribución, transporte y gestión de depósitos.",
    },
    JobTitle {
        field: "salario_analista_logistica",
        name: "Analista de Logística",
        description: "Responsabilidad de planificación de despachos, coordinación de transportes, seguimiento de entregas y gestión documental.",
    },
    JobTitle {
        field: "salario_supervisor_depositos",
        name: "Supervisor de Depósitos",
        description: "Responsabilidad de supervisión de operaciones de almacén, control de inventarios, recepción y despacho de mercadería.",
    },
    JobTitle {
        field: "salario_gerente_compras",
        name: "Gerente de Compras",
        description: "Responsabilidad de definir estrategia de compras, negociación con proveedores, gestión de contratos y optimización de costos.",
    },
    JobTitle {
        field: "salario_jefe_compras",
        name: "Jefe de Compras",
        description: "Responsabilidad de gestión de órdenes de compra, cotizaciones, homologación de proveedores y control de calidad.",
    },
    JobTitle {
        field: "salario_comprador_analista",
        name: "Comprador / Analista de Compras",
        description: "Responsabilidad de solicitar cotizaciones, negociar condiciones, emitir órdenes de compra y seguimiento de entregas.",
    },
    JobTitle {
        field: "salario_gerente_calidad",
        name: "Gerente de Calidad",
        description: "Responsabilidad de implementar sistema de gestión de calidad, auditorías, certificaciones y mejora continua.",
    },
    JobTitle {
        field: "salario_jefe_calidad",
        name: "Jefe de Calidad",
        description: "Responsabilidad de control de calidad en procesos, análisis de no conformidades, acciones correctivas y documentación.",
    },
    JobTitle {
        field: "salario_gerente_mantenimiento",
        name: "Gerente de Mantenimiento",
        description: "Responsabilidad de planificación de mantenimiento preventivo y correctivo, gestión de repuestos y optimización de equipos.",
    },
    JobTitle {
        field: "salario_jefe_mantenimiento",
        name: "Jefe de Mantenimiento",
        description: "Responsabilidad de coordinar tareas de mantenimiento, gestión de órdenes de trabajo y supervisión de técnicos.",
    },
    JobTitle {
        field: "salario_supervisor_mantenimiento",
        name: "Supervisor de Mantenimiento",
        description: "Responsabilidad de supervisión de trabajos de mantenimiento, control de seguridad y coordinación con producción.",
    },
    JobTitle {
        field: "salario_tecnico_mantenimiento",
        name: "Técnico de Mantenimiento",
        description: "Responsabilidad de ejecución de mantenimiento preventivo y correctivo, reparaciones, diagnóstico de fallas.",
    },
    JobTitle {
        field: "salario_joven_profesional",
        name: "Joven Profesional",
        description: "Posición para recién graduados o con poca experiencia laboral. Responsabilidad de apoyo en proyectos, análisis y tareas específicas del área asignada.",
    },
    JobTitle {
        field: "salario_pasante",
        name: "Pasante",
        description: "Estudiante universitario o terciario que realiza prácticas profesionales en la empresa, con responsabilidades de apoyo y aprendizaje.",
    },
];

pub const FUNCTIONAL_AREAS: &[FunctionalArea] = &[
    FunctionalArea {
        name: "Gerencia General",
        jobs: &["ceo"],
    },
    FunctionalArea {
        name: "Comercial",
        jobs: &[
            "director_comercial",
            "gerente_ventas",
            "jefe_ventas",
            "ejecutivo_ventas",
            "analista_facturacion",
            "atencion_cliente",
        ],
    },
    FunctionalArea {
        name: "Comercio Exterior",
        jobs: &["gerente_comex", "responsable_comex", "asistente_comex"],
    },
    FunctionalArea {
        name: "Turismo y Gastronomía",
        jobs: &[
            "jefe_hospitalidad",
            "guia_turismo",
            "jefe_alimentos_bebidas",
            "chef_ejecutivo",
            "jefe_salon",
            "gerente_ops_hotel",
            "jefe_recepcion_hotel",
            "recepcionista_hotel",
            "concierge",
        ],
    },
    FunctionalArea {
        name: "Administración y Finanzas",
        jobs: &[
            "director_admin_finanzas",
            "gerente_admin_conta",
            "jefe_admin_conta",
            "analista_contabilidad",
            "jefe_impuestos",
            "analista_impuestos",
            "jefe_finanzas",
            "analista_cuentas_pagar",
            "empleado_administrativo",
            "jefe_creditos_cobranzas",
            "analista_cobranzas",
            "jefe_control_gestion",
            "analista_control_gestion",
            "auditor_interno",
            "recepcionista",
        ],
    },
    FunctionalArea {
        name: "Operaciones",
        jobs: &[
            "director_operaciones",
            "gerente_planta",
            "jefe_produccion",
            "ingeniero_procesos",
            "supervisor_produccion",
            "analista_produccion",
            "jefe_bodega",
            "supervisor_bodega",
            "gerente_agricola",
            "ingeniero_agronomo",
            "supervisor_fincas",
            "jefe_laboratorio",
            "analista_laboratorio",
            "gerente_enologia",
        ],
    },
    FunctionalArea {
        name: "Supply Chain",
        jobs: &[
            "gerente_supply_chain",
            "jefe_planificacion",
            "jefe_logistica",
            "analista_logistica",
            "supervisor_depositos",
            "jefe_compras",
            "gerente_compras",
            "comprador_analista",
        ],
    },
    FunctionalArea {
        name: "Mantenimiento y Calidad",
        jobs: &[
            "gerente_mantenimiento",
            "jefe_mantenimiento",
            "supervisor_mantenimiento",
            "tecnico_mantenimiento",
            "gerente_calidad",
            "jefe_calidad",
            "analista_calidad",
            "tecnico_calidad",
        ],
    },
    FunctionalArea {
        name: "Higiene y Seguridad",
        jobs: &[
            "responsable_sustentabilidad",
            "gerente_seguridad",
            "jefe_seguridad",
            "tecnico_seguridad",
        ],
    },
    FunctionalArea {
        name: "Ingeniería y Proyectos",
        jobs: &[
            "jefe_ingenieria",
            "ingeniero_proyectos",
            "asistente_proyecto",
            "jefe_obra",
            "supervisor_obra",
        ],
    },
    FunctionalArea {
        name: "RRHH",
        jobs: &[
            "director_rrhh",
            "gerente_rrhh",
            "jefe_rrhh",
            "responsable_liquidacion",
            "analista_admin_personal",
            "jefe_seleccion",
            "analista_seleccion",
            "analista_capacitacion",
        ],
    },
    FunctionalArea {
        name: "IT",
        jobs: &[
            "director_it",
            "gerente_it",
            "jefe_desarrollo",
            "programador",
            "analista_funcional",
            "jefe_redes",
            "tecnico_redes",
            "jefe_soporte",
            "analista_helpdesk",
        ],
    },
    FunctionalArea {
        name: "Marketing",
        jobs: &[
            "gerente_marketing",
            "jefe_marketing",
            "analista_marketing",
            "analista_ecommerce",
            "diseñador_grafico",
        ],
    },
    FunctionalArea {
        name: "Pasante",
        jobs: &["pasante", "joven_profesional"],
    },
];

pub const HIERARCHY_LEVELS: &[HierarchyLevel] = &[
    HierarchyLevel {
        name: "CEO",
        fields: &["salario_ceo"],
    },
    HierarchyLevel {
        name: "DIRECTOR",
        fields: &[
            "salario_director_comercial",
            "salario_director_admin_finanzas",
            "salario_director_rrhh",
            "salario_director_operaciones",
            "salario_director_it",
        ],
    },
    HierarchyLevel {
        name: "GERENTE",
        fields: &[
            "salario_gerente_ventas",
            "salario_gerente_admin_conta",
            "salario_gerente_rrhh",
            "salario_gerente_planta",
            "salario_gerente_it",
            "salario_gerente_marketing",
            "salario_gerente_supply_chain",
            "salario_gerente_enologia",
            "salario_gerente_agricola",
            "salario_gerente_compras",
            "salario_gerente_mantenimiento",
            "salario_gerente_calidad",
            "salario_gerente_comex",
            "salario_gerente_ops_hotel",
            "salario_gerente_seguridad",
        ],
    },
    HierarchyLevel {
        name: "JEFE",
        fields: &[
            "salario_jefe_ventas",
            "salario_jefe_admin_conta",
            "salario_jefe_rrhh",
            "salario_jefe_compras",
            "salario_jefe_desarrollo",
            "salario_jefe_marketing",
            "salario_jefe_produccion",
            "salario_jefe_logistica",
            "salario_jefe_finanzas",
            "salario_jefe_impuestos",
            "salario_jefe_creditos_cobranzas",
            "salario_jefe_control_gestion",
            "salario_jefe_bodega",
            "salario_jefe_laboratorio",
            "salario_jefe_planificacion",
            "salario_jefe_mantenimiento",
            "salario_jefe_calidad",
            "salario_jefe_seguridad",
            "salario_jefe_ingenieria",
            "salario_jefe_obra",
            "salario_jefe_seleccion",
            "salario_jefe_hospitalidad",
            "salario_jefe_alimentos_bebidas",
            "salario_jefe_salon",
            "salario_jefe_recepcion_hotel",
            "salario_jefe_redes",
            "salario_jefe_soporte",
        ],
    },
];

pub fn job_title(field: &str) -> Option<&'static JobTitle> {
    JOB_TITLES.iter().find(|job| job.field == field)
}

/// Catalog name when known, otherwise the field name without its salary
/// prefix in title case.
pub fn display_name(field: &str) -> String {
    match job_title(field) {
        Some(job) => job.name.to_string(),
        None => field
            .strip_prefix(SALARY_PREFIX)
            .unwrap_or(field)
            .to_title_case(),
    }
}

pub fn functional_area(name: &str) -> Option<&'static FunctionalArea> {
    FUNCTIONAL_AREAS
        .iter()
        .find(|area| area.name.eq_ignore_ascii_case(name))
}

impl FunctionalArea {
    pub fn salary_fields(&self) -> impl Iterator<Item = String> + '_ {
        self.jobs.iter().map(|job| format!("{SALARY_PREFIX}{job}"))
    }
}

/// Functional area a salary field belongs to.
pub fn area_of(field: &str) -> Option<&'static FunctionalArea> {
    let job = field.strip_prefix(SALARY_PREFIX)?;
    FUNCTIONAL_AREAS
        .iter()
        .find(|area| area.jobs.contains(&job))
}
