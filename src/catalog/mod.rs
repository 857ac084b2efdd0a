//! The language catalog served alongside the tio.run frontend.
//!
//! The catalog is one big JSON object keyed by language id. We read only the
//! fields the client uses and leave the rest alone; each entry's `tests` table
//! is folded into ready-to-run [`Example`]s.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::options::EvaluateOptions;

/// Metadata for one hosted language.
#[derive(Debug, Clone)]
pub struct Language {
    pub id: String,
    pub name: String,
    pub link: String,
    pub categories: Vec<String>,
    pub encoding: String,
    pub update: String,
    pub unmask: Vec<String>,
    pub piggyback: Option<String>,
    pub prettify: Option<String>,
    pub tab: Option<String>,
    pub examples: Vec<Example>,
}

/// A known-good invocation for a language, paired with a substring its output
/// is expected to contain.
#[derive(Debug, Clone)]
pub struct Example {
    pub options: EvaluateOptions,
    pub expected: String,
}

#[derive(Debug, Deserialize)]
struct RawLanguage {
    name: String,
    link: String,
    #[serde(default)]
    categories: Vec<String>,
    #[serde(default)]
    encoding: String,
    #[serde(default)]
    update: String,
    #[serde(default)]
    unmask: Vec<String>,
    #[serde(default)]
    piggyback: Option<String>,
    #[serde(default)]
    prettify: Option<String>,
    #[serde(default)]
    tab: Option<String>,
    #[serde(default)]
    tests: serde_json::Map<String, Value>,
}

/// Parse the scraped catalog JSON into language entries.
pub fn parse(data: &Value) -> Result<Vec<Language>> {
    let object = data
        .as_object()
        .ok_or_else(|| Error::Decode("language catalog is not a JSON object".into()))?;

    let mut languages = Vec::with_capacity(object.len());
    for (id, entry) in object {
        let raw: RawLanguage = serde_json::from_value(entry.clone())
            .map_err(|e| Error::Decode(format!("language entry '{id}': {e}")))?;
        let examples = raw
            .tests
            .values()
            .filter_map(|test| test_to_example(id, test))
            .collect();
        languages.push(Language {
            id: id.clone(),
            name: raw.name,
            link: raw.link,
            categories: raw.categories,
            encoding: raw.encoding,
            update: raw.update,
            unmask: raw.unmask,
            piggyback: raw.piggyback,
            prettify: raw.prettify,
            tab: raw.tab,
            examples,
        });
    }
    Ok(languages)
}

/// Fold one catalog test entry back into execution options. The request is a
/// list of commands whose payloads we merge; entries without code or an
/// expected response are skipped.
fn test_to_example(language: &str, test: &Value) -> Option<Example> {
    let request = test.get("request")?.as_array()?;
    let mut payload = serde_json::Map::new();
    for command in request {
        if let Some(fields) = command.get("payload").and_then(Value::as_object) {
            payload.extend(fields.clone());
        }
    }

    let string_of = |key: &str| {
        payload.get(key).and_then(Value::as_str).map(str::to_string)
    };
    let strings_of = |key: &str| {
        payload.get(key).and_then(Value::as_array).map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
    };

    let options = EvaluateOptions {
        language: language.to_string(),
        code: string_of(".code.tio")?,
        input: string_of(".input.tio"),
        flags: strings_of("TIO_CFLAGS"),
        options: strings_of("TIO_OPTIONS"),
        driver: strings_of("TIO_DRIVER"),
        args: strings_of("args"),
    };
    let expected = test.get("response")?.as_str()?.to_string();
    Some(Example { options, expected })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "python3": {
                "name": "Python 3",
                "link": "https://docs.python.org/3/",
                "categories": ["practical"],
                "encoding": "UTF-8",
                "update": "dnf",
                "unmask": ["cflags"],
                "tests": {
                    "helloWorld": {
                        "request": [
                            { "command": "V", "payload": { "lang": ["python3"] } },
                            { "command": "F", "payload": { ".code.tio": "print(\"Hello, World!\")" } },
                            { "command": "F", "payload": { ".input.tio": "" } },
                            { "command": "RC" }
                        ],
                        "response": "Hello, World!"
                    }
                }
            }
        })
    }

    #[test]
    fn parses_entries_keyed_by_id() {
        let languages = parse(&sample()).unwrap();
        assert_eq!(languages.len(), 1);
        let python = &languages[0];
        assert_eq!(python.id, "python3");
        assert_eq!(python.name, "Python 3");
        assert_eq!(python.categories, ["practical"]);
    }

    #[test]
    fn tests_become_examples() {
        let languages = parse(&sample()).unwrap();
        let example = &languages[0].examples[0];
        assert_eq!(example.options.language, "python3");
        assert_eq!(example.options.code, "print(\"Hello, World!\")");
        assert_eq!(example.options.input.as_deref(), Some(""));
        assert_eq!(example.expected, "Hello, World!");
    }

    #[test]
    fn incomplete_tests_are_skipped() {
        let data = json!({
            "broken": {
                "name": "Broken",
                "link": "",
                "tests": { "noCode": { "request": [], "response": "x" } }
            }
        });
        let languages = parse(&data).unwrap();
        assert!(languages[0].examples.is_empty());
    }

    #[test]
    fn non_object_catalog_is_a_decode_error() {
        assert!(matches!(parse(&json!([1, 2])), Err(Error::Decode(_))));
    }
}
