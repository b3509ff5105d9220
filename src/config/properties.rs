//! Build properties and `${name}` interpolation
//!
//! Properties come from the manifest's `properties:` table and are overridden
//! by `-D key=value` on the command line.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{Result, config};

/// A YAML scalar accepted where a string is expected.
///
/// Integers and booleans are turned back into text. Unquoted decimals such as
/// `1.50` are rejected: YAML reads them as floats and `1.50` would become `1.5`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Text(String),
    Number(serde_yaml::Number),
    Bool(bool),
}

impl ScalarValue {
    /// Textual form of the value declared as `what`
    pub fn to_text(&self, what: &str) -> Result<String> {
        match self {
            ScalarValue::Text(s) => Ok(s.clone()),
            ScalarValue::Number(n) if n.is_f64() => Err(config::invalid(format!(
                "quote {what} '{n}': unquoted decimals are read as numbers and lose trailing zeros"
            ))),
            ScalarValue::Number(n) => Ok(n.to_string()),
            ScalarValue::Bool(b) => Ok(b.to_string()),
        }
    }
}

impl From<&str> for ScalarValue {
    fn from(s: &str) -> Self {
        ScalarValue::Text(s.to_string())
    }
}

/// Resolved property table
#[derive(Debug, Clone, Default)]
pub struct Properties {
    values: BTreeMap<String, String>,
}

impl Properties {
    /// Build the table from manifest values, then apply command-line overrides
    pub fn new(
        declared: &BTreeMap<String, ScalarValue>,
        overrides: &[(String, String)],
    ) -> Result<Self> {
        let mut values = BTreeMap::new();
        for (key, value) in declared {
            values.insert(key.clone(), value.to_text(&format!("property {key}"))?);
        }
        for (key, value) in overrides {
            values.insert(key.clone(), value.clone());
        }
        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Replace every `${name}` in `raw` with its property value
    ///
    /// Substituted values are not expanded again.
    pub fn interpolate(&self, raw: &str) -> Result<String> {
        let mut out = String::with_capacity(raw.len());
        let mut rest = raw;

        while let Some(start) = rest.find("${") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let end = after.find('}').ok_or_else(|| {
                config::invalid(format!("unterminated property reference in '{raw}'"))
            })?;
            let name = after[..end].trim();
            if name.is_empty() {
                return Err(config::invalid(format!(
                    "empty property reference in '{raw}'"
                )));
            }
            let value = self
                .get(name)
                .ok_or_else(|| config::undefined_property(name))?;
            out.push_str(value);
            rest = &after[end + 1..];
        }

        out.push_str(rest);
        Ok(out)
    }
}

/// Parse a `-D key=value` argument
pub fn parse_property_arg(arg: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{arg}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty property name in '{arg}'"));
    }
    Ok((key.to_string(), value.to_string()))
}
