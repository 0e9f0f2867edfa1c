//! Payslip field layout.
//!
//! Maps each named payslip field to a fixed position on the template page.
//! Coordinates are in PDF points with the origin at the top-left corner of
//! the page; the renderer flips them to PDF's bottom-left origin.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A value printed on the payslip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayslipField {
    /// Date the payslip was issued.
    IssueDate,
    /// Employee name.
    EmployeeName,
    /// Employee identity number.
    IdNumber,
    /// Monthly base salary.
    BaseSalary,
    /// Regular plus premium extra hours.
    TotalExtraHours,
    /// Value of all extra hours.
    TotalExtraHoursEquivalent,
    /// Extra days worked.
    ExtraDays,
    /// Value of extra days.
    ExtraDaysEquivalent,
    /// Days absent.
    DaysAbsent,
    /// Value deducted for absent days.
    DaysAbsentEquivalent,
    /// Hours absent.
    HoursAbsent,
    /// Value deducted for absent hours.
    HoursAbsentEquivalent,
    /// Advance payment deducted.
    AdvancePayment,
    /// Amount payable.
    FinalSalary,
}

impl PayslipField {
    /// Every field, in template order.
    pub const ALL: [PayslipField; 14] = [
        PayslipField::IssueDate,
        PayslipField::EmployeeName,
        PayslipField::IdNumber,
        PayslipField::BaseSalary,
        PayslipField::TotalExtraHours,
        PayslipField::TotalExtraHoursEquivalent,
        PayslipField::ExtraDays,
        PayslipField::ExtraDaysEquivalent,
        PayslipField::DaysAbsent,
        PayslipField::DaysAbsentEquivalent,
        PayslipField::HoursAbsent,
        PayslipField::HoursAbsentEquivalent,
        PayslipField::AdvancePayment,
        PayslipField::FinalSalary,
    ];

    /// The configuration key for this field.
    pub fn name(&self) -> &'static str {
        match self {
            PayslipField::IssueDate => "issue_date",
            PayslipField::EmployeeName => "employee_name",
            PayslipField::IdNumber => "id_number",
            PayslipField::BaseSalary => "base_salary",
            PayslipField::TotalExtraHours => "total_extra_hours",
            PayslipField::TotalExtraHoursEquivalent => "total_extra_hours_equivalent",
            PayslipField::ExtraDays => "extra_days",
            PayslipField::ExtraDaysEquivalent => "extra_days_equivalent",
            PayslipField::DaysAbsent => "days_absent",
            PayslipField::DaysAbsentEquivalent => "days_absent_equivalent",
            PayslipField::HoursAbsent => "hours_absent",
            PayslipField::HoursAbsentEquivalent => "hours_absent_equivalent",
            PayslipField::AdvancePayment => "advance_payment",
            PayslipField::FinalSalary => "final_salary",
        }
    }
}

/// Horizontal anchoring of a value relative to its position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    /// Text starts at `x`.
    #[default]
    Left,
    /// Text ends at `x`.
    Right,
}

/// Where a field is drawn. `y` is the text baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldPosition {
    /// Distance from the left edge of the page.
    pub x: f32,
    /// Distance of the baseline from the top edge of the page.
    pub y: f32,
    /// Horizontal anchoring.
    #[serde(default)]
    pub align: Alignment,
}

impl FieldPosition {
    /// A left-aligned position.
    pub const fn left(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            align: Alignment::Left,
        }
    }
}

/// The complete field-to-position table for a template.
///
/// Construction checks that every [`PayslipField`] has a position, so the
/// renderer never has to deal with a partial layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayslipLayout {
    fields: BTreeMap<PayslipField, FieldPosition>,
}

impl PayslipLayout {
    /// Builds a layout, failing if any field lacks a position.
    pub fn new(fields: BTreeMap<PayslipField, FieldPosition>) -> EngineResult<Self> {
        let missing: Vec<&str> = PayslipField::ALL
            .iter()
            .filter(|field| !fields.contains_key(*field))
            .map(PayslipField::name)
            .collect();

        if !missing.is_empty() {
            return Err(EngineError::validation(
                "layout",
                format!("missing positions for: {}", missing.join(", ")),
            ));
        }

        Ok(Self { fields })
    }

    /// The layout of the original salary template.
    ///
    /// # Examples
    ///
    /// ```
    /// use payslip_engine::render::{PayslipField, PayslipLayout};
    ///
    /// let layout = PayslipLayout::legacy();
    /// let position = layout.position(PayslipField::FinalSalary);
    /// assert_eq!((position.x, position.y), (254.0, 648.0));
    /// ```
    pub fn legacy() -> Self {
        let fields = BTreeMap::from([
            (PayslipField::IssueDate, FieldPosition::left(90.0, 263.0)),
            (PayslipField::EmployeeName, FieldPosition::left(370.0, 280.0)),
            (PayslipField::IdNumber, FieldPosition::left(380.0, 302.0)),
            (PayslipField::BaseSalary, FieldPosition::left(255.0, 431.0)),
            (PayslipField::TotalExtraHours, FieldPosition::left(265.0, 479.0)),
            (
                PayslipField::TotalExtraHoursEquivalent,
                FieldPosition::left(153.0, 479.0),
            ),
            (PayslipField::ExtraDays, FieldPosition::left(280.0, 527.0)),
            (PayslipField::ExtraDaysEquivalent, FieldPosition::left(160.0, 527.0)),
            (PayslipField::DaysAbsent, FieldPosition::left(300.0, 551.0)),
            (PayslipField::DaysAbsentEquivalent, FieldPosition::left(178.0, 551.0)),
            (PayslipField::HoursAbsent, FieldPosition::left(273.0, 575.0)),
            (PayslipField::HoursAbsentEquivalent, FieldPosition::left(161.0, 575.0)),
            (PayslipField::AdvancePayment, FieldPosition::left(338.0, 599.0)),
            (PayslipField::FinalSalary, FieldPosition::left(254.0, 648.0)),
        ]);
        Self { fields }
    }

    /// The position of a field.
    pub fn position(&self, field: PayslipField) -> FieldPosition {
        self.fields
            .get(&field)
            .copied()
            .unwrap_or(FieldPosition::left(0.0, 0.0))
    }

    /// Iterates over fields and positions in template order.
    pub fn iter(&self) -> impl Iterator<Item = (PayslipField, FieldPosition)> + '_ {
        self.fields.iter().map(|(field, position)| (*field, *position))
    }
}

impl Default for PayslipLayout {
    fn default() -> Self {
        Self::legacy()
    }
}

impl<'de> Deserialize<'de> for PayslipLayout {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct RawLayout {
            fields: BTreeMap<PayslipField, FieldPosition>,
        }

        let raw = RawLayout::deserialize(deserializer)?;
        PayslipLayout::new(raw.fields).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_layout_covers_every_field() {
        let layout = PayslipLayout::legacy();
        assert_eq!(layout.iter().count(), PayslipField::ALL.len());
        assert!(PayslipLayout::new(layout.fields.clone()).is_ok());
    }

    #[test]
    fn test_legacy_coordinates() {
        let layout = PayslipLayout::legacy();
        let expected = [
            (PayslipField::IssueDate, 90.0, 263.0),
            (PayslipField::EmployeeName, 370.0, 280.0),
            (PayslipField::IdNumber, 380.0, 302.0),
            (PayslipField::BaseSalary, 255.0, 431.0),
            (PayslipField::TotalExtraHours, 265.0, 479.0),
            (PayslipField::TotalExtraHoursEquivalent, 153.0, 479.0),
            (PayslipField::ExtraDays, 280.0, 527.0),
            (PayslipField::ExtraDaysEquivalent, 160.0, 527.0),
            (PayslipField::DaysAbsent, 300.0, 551.0),
            (PayslipField::DaysAbsentEquivalent, 178.0, 551.0),
            (PayslipField::HoursAbsent, 273.0, 575.0),
            (PayslipField::HoursAbsentEquivalent, 161.0, 575.0),
            (PayslipField::AdvancePayment, 338.0, 599.0),
            (PayslipField::FinalSalary, 254.0, 648.0),
        ];

        for (field, x, y) in expected {
            let position = layout.position(field);
            assert_eq!(position.x, x, "x of {}", field.name());
            assert_eq!(position.y, y, "y of {}", field.name());
            assert_eq!(position.align, Alignment::Left);
        }
    }

    #[test]
    fn test_new_rejects_incomplete_layout() {
        let mut fields = PayslipLayout::legacy().fields;
        fields.remove(&PayslipField::FinalSalary);
        fields.remove(&PayslipField::IdNumber);

        match PayslipLayout::new(fields) {
            Err(EngineError::Validation { field, message }) => {
                assert_eq!(field, "layout");
                assert!(message.contains("final_salary"));
                assert!(message.contains("id_number"));
            }
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_field_names_match_serde_names() {
        for field in PayslipField::ALL {
            let json = serde_json::to_string(&field).unwrap();
            assert_eq!(json, format!("\"{}\"", field.name()));
        }
    }

    #[test]
    fn test_deserialize_layout_from_yaml() {
        let mut yaml = String::from("fields:\n");
        for field in &PayslipField::ALL[..13] {
            yaml.push_str(&format!("  {}: {{ x: 10, y: 20 }}\n", field.name()));
        }
        yaml.push_str("  final_salary: { x: 500, y: 700, align: right }\n");

        let layout: PayslipLayout = serde_yaml::from_str(&yaml).unwrap();
        let position = layout.position(PayslipField::FinalSalary);
        assert_eq!(position.x, 500.0);
        assert_eq!(position.align, Alignment::Right);
        assert_eq!(layout.position(PayslipField::IssueDate).y, 20.0);
    }

    #[test]
    fn test_deserialize_incomplete_layout_fails() {
        let yaml = "fields:\n  issue_date: { x: 1, y: 2 }\n";
        let result: Result<PayslipLayout, _> = serde_yaml::from_str(yaml);
        assert!(result.is_err());
    }
}
