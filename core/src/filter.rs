use chrono::NaiveDate;

use crate::{format::parse_timestamp, models::Monitor};

/// Monitors created on `day` (local calendar day). `None` keeps every monitor.
///
/// Monitors whose `criado_em` cannot be parsed never match a selected day.
pub fn filter_by_creation_date(monitors: &[Monitor], day: Option<NaiveDate>) -> Vec<&Monitor> {
    match day {
        None => monitors.iter().collect(),
        Some(day) => monitors
            .iter()
            .filter(|m| created_on(m) == Some(day))
            .collect(),
    }
}

fn created_on(monitor: &Monitor) -> Option<NaiveDate> {
    parse_timestamp(&monitor.criado_em).map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use chrono::{Local, TimeZone};

    use super::*;
    use crate::models::AuxiliaryTermMap;

    fn monitor(id: i64, criado_em: String) -> Monitor {
        Monitor {
            id,
            termo: format!("term {}", id),
            tipo: None,
            criado_em,
            variacoes: vec![],
            termos_auxiliares: AuxiliaryTermMap::default(),
            tribunais_especificos: vec![],
        }
    }

    fn local_rfc3339(y: i32, m: u32, d: u32, h: u32) -> String {
        Local.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap().to_rfc3339()
    }

    #[test]
    fn test_no_date_keeps_everything() {
        let monitors = vec![
            monitor(1, local_rfc3339(2024, 3, 5, 9)),
            monitor(2, "garbage".to_string()),
        ];

        let filtered = filter_by_creation_date(&monitors, None);

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].id, 1);
        assert_eq!(filtered[1].id, 2);
    }

    #[test]
    fn test_filters_by_local_calendar_day() {
        let monitors = vec![
            monitor(1, local_rfc3339(2024, 3, 5, 0)),
            monitor(2, local_rfc3339(2024, 3, 5, 23)),
            monitor(3, local_rfc3339(2024, 3, 6, 0)),
            monitor(4, "2024-03-05T12:00:00".to_string()),
            monitor(5, "not a date".to_string()),
        ];

        let day = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let ids: Vec<i64> = filter_by_creation_date(&monitors, Some(day))
            .iter()
            .map(|m| m.id)
            .collect();

        assert_eq!(ids, vec![1, 2, 4]);
        // source collection is untouched
        assert_eq!(monitors.len(), 5);
    }

    #[test]
    fn test_no_match_is_empty() {
        let monitors = vec![monitor(1, local_rfc3339(2024, 3, 5, 12))];
        let day = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();

        assert!(filter_by_creation_date(&monitors, Some(day)).is_empty());
    }
}
