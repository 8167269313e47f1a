//! Template Selector
//! Mission: Map a free-text idea onto one of three canned project shapes

use crate::models::{FieldSpec, ModelSpec};

/// A fixed `{name, description, models}` shape chosen by keyword matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub models: Vec<ModelSpec>,
}

/// Keywords that select the clinic template. Checked before storefront
/// keywords, so an idea mentioning both gets the clinic shape.
const CLINIC_KEYWORDS: &[&str] = &["حجز", "عيادة", "clinic", "booking"];

/// Keywords that select the e-commerce template.
const STORE_KEYWORDS: &[&str] = &["متجر", "store", "shop", "ecommerce"];

/// Pick a template for an idea. Pure, total, deterministic; matching is
/// case-insensitive. Empty ideas are rejected by the API layer before this
/// is invoked.
pub fn select(idea: &str) -> ProjectTemplate {
    let lower = idea.to_lowercase();

    if CLINIC_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        return clinic_template();
    }

    if STORE_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        return ecommerce_template();
    }

    generic_template()
}

fn field(name: &str, field_type: &str) -> FieldSpec {
    FieldSpec {
        name: name.to_string(),
        field_type: field_type.to_string(),
    }
}

fn clinic_template() -> ProjectTemplate {
    ProjectTemplate {
        name: "Clinic Management System",
        description: "نظام إدارة حجوزات ومرضى للعيادات",
        models: vec![
            ModelSpec {
                name: "Patients".to_string(),
                fields: vec![field("name", "string"), field("phone", "string")],
            },
            ModelSpec {
                name: "Appointments".to_string(),
                fields: vec![field("date", "date"), field("status", "string")],
            },
        ],
    }
}

fn ecommerce_template() -> ProjectTemplate {
    ProjectTemplate {
        name: "Ecommerce Dashboard",
        description: "لوحة إدارة متجر إلكتروني",
        models: vec![
            ModelSpec {
                name: "Products".to_string(),
                fields: vec![field("name", "string"), field("price", "number")],
            },
            ModelSpec {
                name: "Orders".to_string(),
                fields: vec![field("total", "number"), field("status", "string")],
            },
        ],
    }
}

fn generic_template() -> ProjectTemplate {
    ProjectTemplate {
        name: "Custom Dashboard",
        description: "لوحة إدارة عامة",
        models: vec![ModelSpec {
            name: "Items".to_string(),
            fields: vec![field("name", "string"), field("createdAt", "date")],
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clinic_keyword_selects_clinic() {
        let template = select("An online booking system for dentists");
        assert_eq!(template.name, "Clinic Management System");

        let model_names: Vec<&str> = template.models.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(model_names, vec!["Patients", "Appointments"]);
    }

    #[test]
    fn test_arabic_clinic_keyword_selects_clinic() {
        let template = select("نظام حجز مواعيد");
        assert_eq!(template.name, "Clinic Management System");
    }

    #[test]
    fn test_store_keyword_selects_ecommerce() {
        let template = select("a storefront for sneakers");
        assert_eq!(template.name, "Ecommerce Dashboard");

        let model_names: Vec<&str> = template.models.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(model_names, vec!["Products", "Orders"]);
    }

    #[test]
    fn test_arabic_store_keyword_selects_ecommerce() {
        let template = select("متجر إلكتروني للملابس");
        assert_eq!(template.name, "Ecommerce Dashboard");
    }

    #[test]
    fn test_unmatched_idea_selects_generic() {
        let template = select("a fitness tracker");
        assert_eq!(template.name, "Custom Dashboard");
        assert_eq!(template.models.len(), 1);
        assert_eq!(template.models[0].name, "Items");
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(select("CLINIC portal").name, "Clinic Management System");
        assert_eq!(select("My SHOP").name, "Ecommerce Dashboard");
    }

    #[test]
    fn test_clinic_wins_over_store() {
        // Both keyword families present: clinic is checked first.
        let template = select("a booking page for my shop");
        assert_eq!(template.name, "Clinic Management System");
    }

    #[test]
    fn test_generic_template_fields() {
        let template = select("anything");
        let fields = &template.models[0].fields;
        assert_eq!(fields[0].name, "name");
        assert_eq!(fields[0].field_type, "string");
        assert_eq!(fields[1].name, "createdAt");
        assert_eq!(fields[1].field_type, "date");
    }
}
