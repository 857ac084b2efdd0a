//! Execution options and their pre-encoding validation.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// One execution request: the language to run under, the code itself, and the
/// optional toolchain knobs tio.run exposes (compiler flags, interpreter
/// options, driver arguments, program input and arguments).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EvaluateOptions {
    pub language: String,
    pub code: String,
    #[serde(default)]
    pub input: Option<String>,
    #[serde(default)]
    pub flags: Option<Vec<String>>,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub driver: Option<Vec<String>>,
    #[serde(default)]
    pub args: Option<Vec<String>>,
}

impl EvaluateOptions {
    pub fn new(language: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            code: code.into(),
            ..Self::default()
        }
    }

    /// Required options must be non-empty before anything is encoded.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("language", &self.language), ("code", &self.code)] {
            if value.is_empty() {
                return Err(Error::Validation(format!("Option '{name}' is required.")));
            }
        }
        Ok(())
    }

    /// Build options from a loose JSON object, checking shapes as we go.
    ///
    /// This is the entry point for dynamic callers (`--json` on the CLI,
    /// catalog examples): string-typed keys must hold strings, array-typed
    /// keys must hold arrays of strings, and violations name the offending
    /// option.
    pub fn from_value(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| Error::Validation("Options must be a JSON object.".into()))?;

        let options = Self {
            language: required_string(object, "language")?,
            code: required_string(object, "code")?,
            input: optional_string(object, "input")?,
            flags: optional_string_array(object, "flags")?,
            options: optional_string_array(object, "options")?,
            driver: optional_string_array(object, "driver")?,
            args: optional_string_array(object, "args")?,
        };
        options.validate()?;
        Ok(options)
    }
}

fn required_string(object: &serde_json::Map<String, Value>, key: &str) -> Result<String> {
    match object.get(key) {
        None | Some(Value::Null) => {
            Err(Error::Validation(format!("Option '{key}' is required.")))
        }
        Some(Value::String(s)) if s.is_empty() => {
            Err(Error::Validation(format!("Option '{key}' is required.")))
        }
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(Error::Validation(format!("Option '{key}' must be a string."))),
    }
}

fn optional_string(object: &serde_json::Map<String, Value>, key: &str) -> Result<Option<String>> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(Error::Validation(format!("Option '{key}' must be a string."))),
    }
}

fn optional_string_array(
    object: &serde_json::Map<String, Value>,
    key: &str,
) -> Result<Option<Vec<String>>> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    Error::Validation(format!("Option '{key}' must be an array of strings."))
                })
            })
            .collect::<Result<Vec<_>>>()
            .map(Some),
        Some(_) => Err(Error::Validation(format!("Option '{key}' must be an array."))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_language_is_a_validation_error() {
        let err = EvaluateOptions::from_value(&json!({ "code": "x" })).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(err.to_string().contains("language"));
    }

    #[test]
    fn empty_code_is_a_validation_error() {
        let err = EvaluateOptions::new("python3", "").validate().unwrap_err();
        assert!(err.to_string().contains("code"));
    }

    #[test]
    fn non_array_flags_are_rejected() {
        let err = EvaluateOptions::from_value(&json!({
            "language": "python3",
            "code": "print(1)",
            "flags": "not-an-array",
        }))
        .unwrap_err();
        assert!(err.to_string().contains("flags"));
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn array_of_non_strings_is_rejected() {
        let err = EvaluateOptions::from_value(&json!({
            "language": "python3",
            "code": "print(1)",
            "args": ["ok", 3],
        }))
        .unwrap_err();
        assert!(err.to_string().contains("args"));
        assert!(err.to_string().contains("array of strings"));
    }

    #[test]
    fn full_object_parses() {
        let options = EvaluateOptions::from_value(&json!({
            "language": "python3",
            "code": "print(input())",
            "input": "hi",
            "flags": ["-O"],
            "args": ["a", "b"],
        }))
        .unwrap();
        assert_eq!(options.language, "python3");
        assert_eq!(options.input.as_deref(), Some("hi"));
        assert_eq!(options.flags.as_deref(), Some(&["-O".to_string()][..]));
        assert_eq!(options.options, None);
    }
}
