use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A saved search the remote service re-runs to find newly filed cases
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Monitor {
    /// Server-assigned identifier
    pub id: i64,
    /// Primary search term
    pub termo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipo: Option<String>,
    /// Creation timestamp in ISO 8601 format
    pub criado_em: String,
    /// Term variations, order preserved
    #[serde(default, deserialize_with = "null_as_default")]
    pub variacoes: Vec<String>,
    /// Auxiliary terms grouped by condition
    #[serde(default, deserialize_with = "lenient_term_map")]
    pub termos_auxiliares: AuxiliaryTermMap,
    /// Courts the monitor is restricted to (empty = all courts)
    #[serde(default, deserialize_with = "null_as_default")]
    pub tribunais_especificos: Vec<String>,
}

/// Condition under which an auxiliary term applies
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Condition {
    #[serde(rename = "CONTEM")]
    Contains,
    #[serde(rename = "NAO_CONTEM")]
    NotContains,
    #[serde(rename = "CONTEM_ALGUMA")]
    ContainsAny,
}

impl Condition {
    /// Display order used wherever grouped terms are listed
    pub const ALL: [Condition; 3] = [
        Condition::Contains,
        Condition::NotContains,
        Condition::ContainsAny,
    ];

    /// Tag used by the remote service
    pub fn wire_name(&self) -> &'static str {
        match self {
            Condition::Contains => "CONTEM",
            Condition::NotContains => "NAO_CONTEM",
            Condition::ContainsAny => "CONTEM_ALGUMA",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Condition::Contains => "contains",
            Condition::NotContains => "does not contain",
            Condition::ContainsAny => "contains any",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single condition + term pair, as edited in the create form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuxiliaryTerm {
    pub condicao: Condition,
    pub termo: String,
}

impl AuxiliaryTerm {
    pub fn new(condicao: Condition, termo: impl Into<String>) -> Self {
        Self {
            condicao,
            termo: termo.into(),
        }
    }
}

/// Auxiliary terms grouped by condition, as returned by the remote service
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuxiliaryTermMap {
    #[serde(rename = "CONTEM", default, skip_serializing_if = "Option::is_none")]
    pub contains: Option<Vec<String>>,
    #[serde(
        rename = "NAO_CONTEM",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub not_contains: Option<Vec<String>>,
    #[serde(
        rename = "CONTEM_ALGUMA",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub contains_any: Option<Vec<String>>,
}

impl AuxiliaryTermMap {
    pub fn get(&self, condition: Condition) -> Option<&Vec<String>> {
        match condition {
            Condition::Contains => self.contains.as_ref(),
            Condition::NotContains => self.not_contains.as_ref(),
            Condition::ContainsAny => self.contains_any.as_ref(),
        }
    }

    pub fn get_mut(&mut self, condition: Condition) -> &mut Option<Vec<String>> {
        match condition {
            Condition::Contains => &mut self.contains,
            Condition::NotContains => &mut self.not_contains,
            Condition::ContainsAny => &mut self.contains_any,
        }
    }

    pub fn is_empty(&self) -> bool {
        Condition::ALL
            .iter()
            .all(|c| self.get(*c).map_or(true, |terms| terms.is_empty()))
    }
}

/// Payload submitted to create a monitor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewMonitorRequest {
    pub termo: String,
    pub variacoes: Vec<String>,
    pub termos_auxiliares: Vec<AuxiliaryTerm>,
    pub tribunais: Vec<String>,
}

/// A case matched by a monitor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoundCase {
    /// CNJ-formatted case number
    pub numero_cnj: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data_inicio: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tribunal: String,
    /// Highlighted match, may contain HTML markup
    #[serde(default, rename = "match", deserialize_with = "null_as_default")]
    pub match_html: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub estado_origem: OriginState,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OriginState {
    #[serde(default, deserialize_with = "null_as_default")]
    pub nome: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sigla: String,
}

/// Success envelope for collection endpoints
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct Items<T> {
    #[serde(default = "Vec::new", deserialize_with = "null_as_default")]
    pub items: Vec<T>,
}

/// Error envelope returned by the remote service
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// The service sends `[]` instead of `{}` for monitors without auxiliary terms.
fn lenient_term_map<'de, D>(deserializer: D) -> Result<AuxiliaryTermMap, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Object(_) => {
            serde_json::from_value(value).map_err(serde::de::Error::custom)
        }
        _ => Ok(AuxiliaryTermMap::default()),
    }
}
