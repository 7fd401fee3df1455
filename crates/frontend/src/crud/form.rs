use serde::Serialize;
use serde_json::Value;

pub const REQUIRED_MESSAGE: &str = "此为必填项";

#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Field rules checked before a save.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormRules {
    required: Vec<String>,
}

impl FormRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self, field: impl Into<String>) -> Self {
        self.required.push(field.into());
        self
    }

    /// A field fails `required` when it is absent, null, an empty or blank
    /// string, or an empty array.
    pub fn validate<F: Serialize>(&self, form: &F) -> Result<(), Vec<FieldError>> {
        let value = match serde_json::to_value(form) {
            Ok(value) => value,
            Err(err) => {
                return Err(vec![FieldError {
                    field: String::new(),
                    message: err.to_string(),
                }])
            }
        };

        let errors: Vec<FieldError> = self
            .required
            .iter()
            .filter(|field| is_blank(value.get(field.as_str())))
            .map(|field| FieldError {
                field: field.clone(),
                message: REQUIRED_MESSAGE.to_string(),
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}
