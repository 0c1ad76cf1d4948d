use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "companies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = true)]
    pub id: i64,
    pub name: String,
    pub industry: String,
    /// Last investment; free-form date text
    pub lastinv: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// A stored company as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Company {
    /// Identifier assigned on creation
    pub id: i64,
    /// Company name
    pub name: String,
    /// Industry the company operates in
    pub industry: String,
    /// Date (free text) of the last investment
    pub lastinv: String,
}

impl From<Model> for Company {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            industry: model.industry,
            lastinv: model.lastinv,
        }
    }
}

/// Request body for creating or replacing a company. All fields are required.
#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
pub struct CompanyInput {
    /// Company name
    #[serde(default)]
    pub name: Option<String>,
    /// Industry the company operates in
    #[serde(default)]
    pub industry: Option<String>,
    /// Date (free text) of the last investment
    #[serde(default)]
    pub lastinv: Option<String>,
}

/// A company payload that passed validation and can go to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCompany {
    pub name: String,
    pub industry: String,
    pub lastinv: String,
}

pub const REQUIRED_FIELDS_MESSAGE: &str = "name, industry and lastinv are required";

impl CompanyInput {
    pub fn validate(self) -> Result<NewCompany, AppError> {
        fn present(field: Option<String>) -> Option<String> {
            field.filter(|value| !value.is_empty())
        }

        match (present(self.name), present(self.industry), present(self.lastinv)) {
            (Some(name), Some(industry), Some(lastinv)) => Ok(NewCompany {
                name,
                industry,
                lastinv,
            }),
            _ => Err(AppError::Validation(REQUIRED_FIELDS_MESSAGE.to_string())),
        }
    }
}

impl NewCompany {
    pub fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            name: sea_orm::Set(self.name),
            industry: sea_orm::Set(self.industry),
            lastinv: sea_orm::Set(self.lastinv),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: Option<&str>, industry: Option<&str>, lastinv: Option<&str>) -> CompanyInput {
        CompanyInput {
            name: name.map(str::to_string),
            industry: industry.map(str::to_string),
            lastinv: lastinv.map(str::to_string),
        }
    }

    #[test]
    fn complete_input_validates() {
        let company = input(Some("Acme"), Some("Tech"), Some("2024-01-01")).validate().unwrap();
        assert_eq!(
            company,
            NewCompany {
                name: "Acme".into(),
                industry: "Tech".into(),
                lastinv: "2024-01-01".into(),
            }
        );
    }

    #[test]
    fn any_missing_or_empty_field_is_rejected() {
        let full = [Some("Acme"), Some("Tech"), Some("2024-01-01")];
        for missing in 0..3 {
            for replacement in [None, Some("")] {
                let mut fields = full;
                fields[missing] = replacement;
                let err = input(fields[0], fields[1], fields[2]).validate().unwrap_err();
                assert!(
                    matches!(err, AppError::Validation(ref msg) if msg == REQUIRED_FIELDS_MESSAGE),
                    "field {} = {:?} should fail validation",
                    missing,
                    replacement
                );
            }
        }
        assert!(CompanyInput::default().validate().is_err());
    }

    #[test]
    fn whitespace_only_counts_as_present() {
        assert!(input(Some(" "), Some("Tech"), Some("2024")).validate().is_ok());
    }

    #[test]
    fn missing_fields_deserialize_as_none() {
        let parsed: CompanyInput = serde_json::from_str(r#"{"name": "Acme", "industry": null}"#).unwrap();
        assert_eq!(parsed.name.as_deref(), Some("Acme"));
        assert!(parsed.industry.is_none());
        assert!(parsed.lastinv.is_none());
    }
}
