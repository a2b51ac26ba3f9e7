use std::sync::LazyLock;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use regex::Regex;
use serde::Serialize;

use crate::models::{AuxiliaryTerm, AuxiliaryTermMap, Condition};

#[allow(clippy::unwrap_used)]
static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Parse an ISO 8601 timestamp into local time.
///
/// Offsets are converted to the local timezone; naive timestamps are taken as
/// local time already. A bare date is read as local midnight.
pub fn parse_timestamp(iso: &str) -> Option<DateTime<Local>> {
    let iso = iso.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(iso) {
        return Some(dt.with_timezone(&Local));
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(iso, pattern) {
            return Local.from_local_datetime(&naive).earliest();
        }
    }

    NaiveDate::parse_from_str(iso, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
}

/// Date-only rendering (`dd/mm/yyyy`) of an ISO timestamp in local time.
///
/// Input the parser does not understand is returned unchanged.
pub fn format_date(iso: &str) -> String {
    match parse_timestamp(iso) {
        Some(dt) => dt.format("%d/%m/%Y").to_string(),
        None => iso.to_string(),
    }
}

/// Remove `<...>` markup from a highlighted match. Entities are left as-is;
/// this is for display only and is not a sanitizer.
pub fn strip_html(s: &str) -> String {
    HTML_TAG.replace_all(s, "").into_owned()
}

/// Flatten grouped auxiliary terms into condition + term rows.
///
/// Groups are emitted in the fixed order CONTEM, NAO_CONTEM, CONTEM_ALGUMA.
pub fn flatten_auxiliary_terms(map: Option<&AuxiliaryTermMap>) -> Vec<AuxiliaryTerm> {
    let Some(map) = map else {
        return vec![];
    };

    Condition::ALL
        .iter()
        .filter_map(|condition| map.get(*condition).map(|terms| (*condition, terms)))
        .flat_map(|(condition, terms)| {
            terms
                .iter()
                .map(move |termo| AuxiliaryTerm::new(condition, termo.clone()))
        })
        .collect()
}

/// Group flat auxiliary rows by condition, the way the service stores them
pub fn group_auxiliary_terms(terms: &[AuxiliaryTerm]) -> AuxiliaryTermMap {
    let mut map = AuxiliaryTermMap::default();

    for term in terms {
        map.get_mut(term.condicao)
            .get_or_insert_with(Vec::new)
            .push(term.termo.clone());
    }

    map
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseAction {
    Details,
    Movements,
}

/// Where the front end should go to look at a found case
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseLink {
    pub numero_cnj: String,
    pub action: CaseAction,
}

impl CaseLink {
    pub fn path(&self) -> String {
        match self.action {
            CaseAction::Details => format!("/detalhes-processo?numero={}", self.numero_cnj),
            CaseAction::Movements => format!("/movimentacoes?numero={}", self.numero_cnj),
        }
    }

    /// Absolute URL on the given web front end
    pub fn url(&self, web_base: &str) -> String {
        format!("{}{}", web_base.trim_end_matches('/'), self.path())
    }
}

/// Navigation intent for a case; the caller decides how to follow it
pub fn navigate_to_case(cnj: &str, action: CaseAction) -> CaseLink {
    CaseLink {
        numero_cnj: cnj.trim().to_string(),
        action,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("<b>Maria</b> Silva"), "Maria Silva");
        assert_eq!(
            strip_html(r#"<em class="hl">João</em> &amp; <br/>Filhos"#),
            "João &amp; Filhos"
        );
        assert_eq!(strip_html("no markup"), "no markup");
    }

    #[test]
    fn test_flatten_empty_inputs() {
        assert!(flatten_auxiliary_terms(None).is_empty());
        assert!(flatten_auxiliary_terms(Some(&AuxiliaryTermMap::default())).is_empty());
    }

    #[test]
    fn test_flatten_uses_fixed_condition_order() {
        let map = AuxiliaryTermMap {
            contains: None,
            not_contains: Some(vec!["arquivado".to_string()]),
            contains_any: Some(vec!["ltda".to_string(), "s/a".to_string()]),
        };
        let mut map_with_contains = map.clone();
        map_with_contains.contains = Some(vec!["banco".to_string()]);

        let flat = flatten_auxiliary_terms(Some(&map_with_contains));

        assert_eq!(
            flat,
            vec![
                AuxiliaryTerm::new(Condition::Contains, "banco"),
                AuxiliaryTerm::new(Condition::NotContains, "arquivado"),
                AuxiliaryTerm::new(Condition::ContainsAny, "ltda"),
                AuxiliaryTerm::new(Condition::ContainsAny, "s/a"),
            ]
        );
        assert_eq!(flatten_auxiliary_terms(Some(&map)).len(), 3);
    }

    #[test]
    fn test_group_then_flatten_round_trips() {
        let map = AuxiliaryTermMap {
            contains: Some(vec!["a".to_string(), "b".to_string()]),
            not_contains: None,
            contains_any: Some(vec!["c".to_string()]),
        };

        let flat = flatten_auxiliary_terms(Some(&map));
        assert_eq!(group_auxiliary_terms(&flat), map);
    }

    #[test]
    fn test_group_keeps_order_within_condition() {
        let rows = vec![
            AuxiliaryTerm::new(Condition::ContainsAny, "x"),
            AuxiliaryTerm::new(Condition::Contains, "first"),
            AuxiliaryTerm::new(Condition::Contains, "second"),
        ];

        let map = group_auxiliary_terms(&rows);

        assert_eq!(
            map.contains,
            Some(vec!["first".to_string(), "second".to_string()])
        );
        assert_eq!(map.contains_any, Some(vec!["x".to_string()]));
        assert_eq!(map.not_contains, None);
    }

    #[test]
    fn test_format_date_with_offset() {
        let local = Local.with_ymd_and_hms(2024, 3, 5, 10, 30, 0).unwrap();

        assert_eq!(format_date(&local.to_rfc3339()), "05/03/2024");
    }

    #[test]
    fn test_format_date_naive_inputs() {
        assert_eq!(format_date("2024-12-31T23:59:59"), "31/12/2024");
        assert_eq!(format_date("2024-12-31 08:00:00"), "31/12/2024");
        assert_eq!(format_date("2024-01-02"), "02/01/2024");
    }

    #[test]
    fn test_format_date_passes_through_garbage() {
        assert_eq!(format_date("not a date"), "not a date");
    }

    #[test]
    fn test_case_links() {
        let details = navigate_to_case("0000001-02.2024.8.26.0100", CaseAction::Details);
        let movements = navigate_to_case("0000001-02.2024.8.26.0100", CaseAction::Movements);

        assert_eq!(
            details.path(),
            "/detalhes-processo?numero=0000001-02.2024.8.26.0100"
        );
        assert_eq!(
            movements.url("https://painel.example.com/"),
            "https://painel.example.com/movimentacoes?numero=0000001-02.2024.8.26.0100"
        );
    }
}
