// ABOUTME: Fixed seed data loaded at startup: the two organizations' library catalogs,
// ABOUTME: the seeded organizations, and the category/title tables used for filler elements.

use chrono::{DateTime, TimeZone, Utc};

use crate::model::{CatalogOrg, Library, Organization};

pub const CATEGORIES: [&str; 6] = [
    "Best Practice",
    "Documentation",
    "Example",
    "Tutorial",
    "Reference",
    "Guide",
];

pub const FILLER_TITLES: [&str; 10] = [
    "Introducción a conceptos fundamentales",
    "Patrones y arquitecturas comunes",
    "Casos de uso avanzados",
    "Integración con sistemas externos",
    "Optimización y rendimiento",
    "Debugging y troubleshooting",
    "Configuración inicial",
    "Mejores prácticas",
    "Solución de problemas",
    "Casos de éxito",
];

const ORG_001_LIBRARIES: [(&str, &str, usize); 12] = [
    ("lib-org001-001", "Code Review Guidelines", 6),
    ("lib-org001-002", "Microservices Architecture", 14),
    ("lib-org001-003", "Cloud Deployment", 11),
    ("lib-org001-004", "DevOps Best Practices", 13),
    ("lib-org001-005", "Monitoring and Logging", 10),
    ("lib-org001-006", "Authentication & Authorization", 12),
    ("lib-org001-007", "Database Design", 15),
    ("lib-org001-008", "Frontend Optimization", 9),
    ("lib-org001-009", "API Security", 8),
    ("lib-org001-010", "Testing Frameworks", 11),
    ("lib-org001-011", "CI/CD Pipelines", 13),
    ("lib-org001-012", "Documentation Standards", 7),
];

const ORG_002_LIBRARIES: [(&str, &str, usize); 7] = [
    ("lib-org002-001", "React Patterns", 8),
    ("lib-org002-002", "TypeScript Best Practices", 12),
    ("lib-org002-003", "API Design Guide", 10),
    ("lib-org002-004", "Database Optimization", 15),
    ("lib-org002-005", "Testing Strategies", 9),
    ("lib-org002-006", "Security Standards", 11),
    ("lib-org002-007", "Performance Tuning", 7),
];

/// All seeded libraries, org-001's first, each list in catalog order.
pub fn libraries() -> Vec<Library> {
    let org001 = ORG_001_LIBRARIES
        .iter()
        .map(|(id, title, count)| Library::new(id, title, *count, CatalogOrg::Org001));
    let org002 = ORG_002_LIBRARIES
        .iter()
        .map(|(id, title, count)| Library::new(id, title, *count, CatalogOrg::Org002));
    org001.chain(org002).collect()
}

pub fn organizations() -> Vec<Organization> {
    vec![
        Organization {
            id: "org-001".to_string(),
            name: "Acme Corporation".to_string(),
            description: "Empresa líder en soluciones tecnológicas innovadoras".to_string(),
            owner_id: "user-001".to_string(),
            created_at: seeded_at(2024, 1, 15, 10, 30),
        },
        Organization {
            id: "org-002".to_string(),
            name: "StartupX Labs".to_string(),
            description: "Laboratorio de innovación y desarrollo de productos digitales".to_string(),
            owner_id: "user-002".to_string(),
            created_at: seeded_at(2024, 3, 22, 14, 45),
        },
    ]
}

fn seeded_at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}
