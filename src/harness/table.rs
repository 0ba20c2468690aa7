//! Reservation table.
//!
//! Tabulates the applicants left by one strategy run: requested slots,
//! reservation and its display color, sorted by reserved value with
//! unresolved applicants last. "No reservation" is an ordinary row key,
//! so a table where everyone is resolved needs no special handling.

use std::fmt;

use serde::Serialize;

use crate::models::{Applicant, HsvColor, Slot};

/// One table row.
#[derive(Debug, Clone, Serialize)]
pub struct ReservationRow {
    pub id: String,
    pub requested: Vec<Slot>,
    pub reserved: Option<Slot>,
    pub color: HsvColor,
}

/// Reservation table for one allocation run.
#[derive(Debug, Clone, Serialize)]
pub struct AllocationReport {
    pub rows: Vec<ReservationRow>,
    pub unresolved: usize,
    pub percentage: f64,
}

impl AllocationReport {
    /// Builds the table from allocated applicants.
    pub fn from_applicants(applicants: &[Applicant]) -> Self {
        let mut rows: Vec<ReservationRow> = applicants
            .iter()
            .map(|a| ReservationRow {
                id: a.id.to_string(),
                requested: a.requested.clone(),
                reserved: a.reserved,
                color: a.space.display_color(a.reserved),
            })
            .collect();
        // Stable: ties keep input order. `None` sorts after every slot.
        rows.sort_by_key(|row| (row.reserved.is_none(), row.reserved));

        let unresolved = rows.iter().filter(|r| r.reserved.is_none()).count();
        let percentage = if rows.is_empty() {
            0.0
        } else {
            unresolved as f64 / rows.len() as f64 * 100.0
        };

        Self {
            rows,
            unresolved,
            percentage,
        }
    }

    /// Number of rows per reservation value, in table order.
    pub fn value_counts(&self) -> Vec<(Option<Slot>, usize)> {
        let mut counts: Vec<(Option<Slot>, usize)> = Vec::new();
        for row in &self.rows {
            match counts.last_mut() {
                Some((key, n)) if *key == row.reserved => *n += 1,
                _ => counts.push((row.reserved, 1)),
            }
        }
        counts
    }
}

impl fmt::Display for AllocationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<8} {:<24} {:>8}  {}", "id", "requested", "reserved", "color")?;
        for row in &self.rows {
            let requested: Vec<String> = row.requested.iter().map(|s| s.value().to_string()).collect();
            let reserved = row
                .reserved
                .map(|s| s.value().to_string())
                .unwrap_or_else(|| "None".to_string());
            writeln!(
                f,
                "{:<8} {:<24} {:>8}  {}",
                row.id,
                format!("[{}]", requested.join(", ")),
                reserved,
                row.color
            )?;
        }
        if self.unresolved == 0 {
            writeln!(f, "All applications have a reserved slot!")?;
        }
        write!(
            f,
            "Applications without a reserved slot: {} -> {:.2}%",
            self.unresolved, self.percentage
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SlotSpace;

    fn space() -> SlotSpace {
        SlotSpace::new(0, 9).unwrap()
    }

    fn applicant(id: &str, slots: &[i64], reserved: Option<i64>) -> Applicant {
        let mut a = Applicant::new(id, space(), slots.iter().map(|&v| Slot(v)).collect());
        a.reserved = reserved.map(Slot);
        a
    }

    #[test]
    fn test_sorted_by_reservation_unresolved_last() {
        let list = vec![
            applicant("a", &[7], Some(7)),
            applicant("b", &[7], None),
            applicant("c", &[2], Some(2)),
            applicant("d", &[7], None),
        ];
        let report = AllocationReport::from_applicants(&list);
        let ids: Vec<&str> = report.rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b", "d"]);
        assert_eq!(report.unresolved, 2);
        assert!((report.percentage - 50.0).abs() < 1e-10);
    }

    #[test]
    fn test_colors() {
        let list = vec![applicant("a", &[9], Some(9)), applicant("b", &[9], None)];
        let report = AllocationReport::from_applicants(&list);
        assert!((report.rows[0].color.hue - 360.0).abs() < 1e-10);
        assert_eq!(report.rows[1].color, HsvColor::NEUTRAL);
    }

    #[test]
    fn test_all_resolved() {
        let list = vec![applicant("a", &[1], Some(1)), applicant("b", &[2], Some(2))];
        let report = AllocationReport::from_applicants(&list);
        assert_eq!(report.unresolved, 0);
        assert_eq!(report.value_counts(), vec![(Some(Slot(1)), 1), (Some(Slot(2)), 1)]);
        let text = report.to_string();
        assert!(text.contains("All applications have a reserved slot!"));
        assert!(text.ends_with("0 -> 0.00%"));
    }

    #[test]
    fn test_none_is_ordinary_key() {
        let list = vec![applicant("a", &[1], None), applicant("b", &[2], None)];
        let report = AllocationReport::from_applicants(&list);
        assert_eq!(report.value_counts(), vec![(None, 2)]);
        assert!(report.to_string().ends_with("2 -> 100.00%"));
    }

    #[test]
    fn test_empty() {
        let report = AllocationReport::from_applicants(&[]);
        assert_eq!(report.unresolved, 0);
        assert!((report.percentage - 0.0).abs() < 1e-10);
        assert!(report.value_counts().is_empty());
    }
}
