use std::fmt;

use tracing::debug;

use crate::api::types::NeoDto;
use crate::core::approach::CloseApproach;
use crate::core::error::ModelError;
use crate::core::fields::{CatalogRecord, RawFields};

pub const FIELD_DESIGNATION: &str = "pdes";
pub const FIELD_NAME: &str = "name";
pub const FIELD_DIAMETER: &str = "diameter";
pub const FIELD_HAZARDOUS: &str = "pha";

/// A near-Earth object.
///
/// Owns its close approaches in the order they were appended. `diameter` is
/// NaN when unknown, never zero.
#[derive(Clone, PartialEq)]
pub struct NearEarthObject {
    designation: String,
    name: Option<String>,
    diameter: f64,
    hazardous: bool,
    approaches: Vec<CloseApproach>,
}

impl NearEarthObject {
    pub fn new(
        designation: impl Into<String>,
        name: Option<String>,
        diameter: Option<f64>,
        hazardous: bool,
    ) -> Self {
        Self {
            designation: designation.into(),
            name: name.filter(|n| !n.is_empty()),
            diameter: diameter.unwrap_or(f64::NAN),
            hazardous,
            approaches: Vec::new(),
        }
    }

    /// Builds an object from a raw source row (`pdes`, `name`, `diameter`, `pha`).
    /// Unrecognized fields are ignored.
    pub fn from_fields(fields: &RawFields) -> Result<Self, ModelError> {
        let designation = fields.required_text(FIELD_DESIGNATION)?;
        let name = fields.non_empty_text(FIELD_NAME)?;
        let diameter = fields.float(FIELD_DIAMETER)?;
        let hazardous = parse_hazard_flag(fields)?;
        debug!(designation = %designation, hazardous, "Built near-Earth object");
        Ok(Self::new(designation, name, diameter, hazardous))
    }

    pub fn designation(&self) -> &str {
        &self.designation
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    pub fn hazardous(&self) -> bool {
        self.hazardous
    }

    pub fn approaches(&self) -> &[CloseApproach] {
        &self.approaches
    }

    /// `433 (Eros)` when named, otherwise just the designation.
    pub fn fullname(&self) -> String {
        match &self.name {
            Some(name) => format!("{} ({})", self.designation, name),
            None => self.designation.clone(),
        }
    }

    /// Adds a close approach to this object. Anything else is a `TypeMismatch`.
    pub fn append(&mut self, record: impl Into<CatalogRecord>) -> Result<(), ModelError> {
        match record.into() {
            CatalogRecord::Approach(approach) => {
                self.approaches.push(approach);
                Ok(())
            }
            other => Err(ModelError::TypeMismatch {
                expected: "close approach",
                found: other.kind(),
            }),
        }
    }

    pub fn serialize(&self) -> NeoDto {
        NeoDto {
            designation: self.designation.clone(),
            name: self.name.clone(),
            diameter_km: self.diameter,
            potentially_hazardous: self.hazardous,
        }
    }
}

/// Exactly `Y`/`y` means hazardous; any other token, booleans included, means not.
fn parse_hazard_flag(fields: &RawFields) -> Result<bool, ModelError> {
    Ok(fields
        .text(FIELD_HAZARDOUS)?
        .is_some_and(|token| token.eq_ignore_ascii_case("y")))
}

impl fmt::Display for NearEarthObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NEO {} has ", self.fullname())?;
        if self.diameter.is_nan() {
            write!(f, "an unknown diameter")?;
        } else {
            write!(f, "a diameter of {} km", self.diameter)?;
        }
        if self.hazardous {
            write!(f, " and is potentially hazardous.")
        } else {
            write!(f, " and is not potentially hazardous.")
        }
    }
}

impl fmt::Debug for NearEarthObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NearEarthObject(designation={:?}, name={:?}, diameter={}, hazardous={})",
            self.designation, self.name, self.diameter, self.hazardous
        )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::NearEarthObject;
    use crate::core::approach::CloseApproach;
    use crate::core::error::ModelError;
    use crate::core::fields::RawFields;
    use crate::utils::time::parse_calendar_string;

    fn row(value: serde_json::Value) -> RawFields {
        RawFields::try_from(value).unwrap()
    }

    #[test]
    fn csv_row_round_trips_through_serialize() {
        let neo = NearEarthObject::from_fields(&row(json!({
            "pdes": "433", "name": "Eros", "diameter": "16.84", "pha": "N", "extra": "ignored"
        })))
        .unwrap();
        let dto = neo.serialize();
        assert_eq!(dto.designation, "433");
        assert_eq!(dto.name.as_deref(), Some("Eros"));
        assert_eq!(dto.diameter_km, 16.84);
        assert!(!dto.potentially_hazardous);
        assert!(neo.approaches().is_empty());
    }

    #[test]
    fn empty_name_and_diameter_use_defaults() {
        let neo = NearEarthObject::from_fields(&row(json!({
            "PDES": "2015 AB", "Name": "", "DIAMETER": "", "pha": "Y"
        })))
        .unwrap();
        let dto = neo.serialize();
        assert_eq!(dto.name, None);
        assert!(dto.diameter_km.is_nan());

        let bare = NearEarthObject::from_fields(&row(json!({"pdes": "2015 AB"}))).unwrap();
        assert_eq!(bare.name(), None);
        assert!(bare.diameter().is_nan());
        assert!(!bare.hazardous());
    }

    #[test]
    fn hazard_flag_table() {
        let cases = [
            (Some(json!("Y")), true),
            (Some(json!("y")), true),
            (Some(json!("N")), false),
            (Some(json!("")), false),
            (None, false),
            (Some(json!("yes")), false),
            (Some(json!(" Y ")), false),
            (Some(json!("y\n")), false),
            (Some(json!(true)), false),
            (Some(json!(1)), false),
        ];
        for (token, expected) in cases {
            let mut fields = RawFields::new();
            fields.insert("pdes", "1");
            if let Some(token) = token.clone() {
                fields.insert("pha", token);
            }
            let neo = NearEarthObject::from_fields(&fields).unwrap();
            assert_eq!(neo.hazardous(), expected, "token {token:?}");
        }
    }

    #[test]
    fn json_numbers_are_accepted() {
        let neo = NearEarthObject::from_fields(&row(json!({
            "pdes": 433, "name": "Eros", "diameter": 16.84, "pha": "N"
        })))
        .unwrap();
        assert_eq!(neo.designation(), "433");
        assert_eq!(neo.diameter(), 16.84);
        assert_eq!(neo.fullname(), "433 (Eros)");
    }

    #[test]
    fn missing_designation_fails_construction() {
        let err = NearEarthObject::from_fields(&row(json!({"name": "Eros"}))).unwrap_err();
        assert!(matches!(err, ModelError::MissingField { field: "pdes" }));
    }

    #[test]
    fn non_numeric_diameter_is_a_format_error() {
        let err = NearEarthObject::from_fields(&row(json!({"pdes": "433", "diameter": "big"})))
            .unwrap_err();
        assert!(matches!(err, ModelError::FieldFormat { field: "diameter", .. }));
    }

    #[test]
    fn malformed_hazard_flag_fails_construction() {
        let err = NearEarthObject::from_fields(&row(json!({"pdes": "433", "pha": {"y": 1}})))
            .unwrap_err();
        assert!(matches!(err, ModelError::FieldFormat { field: "pha", .. }));
    }

    #[test]
    fn fullname_with_and_without_name() {
        let eros = NearEarthObject::new("433", Some("Eros".into()), None, false);
        assert_eq!(eros.fullname(), "433 (Eros)");
        let anon = NearEarthObject::new("2015 AB", None, None, false);
        assert_eq!(anon.fullname(), "2015 AB");
    }

    #[test]
    fn display_templates() {
        let apophis = NearEarthObject::new("99942", Some("Apophis".into()), Some(0.34), true);
        assert_eq!(
            apophis.to_string(),
            "NEO 99942 (Apophis) has a diameter of 0.34 km and is potentially hazardous."
        );
        let benign = NearEarthObject::new("99942", Some("Apophis".into()), Some(0.34), false);
        assert_eq!(
            benign.to_string(),
            "NEO 99942 (Apophis) has a diameter of 0.34 km and is not potentially hazardous."
        );
        let pebble = NearEarthObject::new("X", None, Some(0.0001234), false);
        assert_eq!(
            pebble.to_string(),
            "NEO X has a diameter of 0.0001234 km and is not potentially hazardous."
        );
        assert!(format!("{pebble:?}").contains("diameter=0.0001234,"));
        let unknown = NearEarthObject::new("2015 AB", None, None, false);
        assert_eq!(
            unknown.to_string(),
            "NEO 2015 AB has an unknown diameter and is not potentially hazardous."
        );
    }

    #[test]
    fn debug_is_machine_readable() {
        let eros = NearEarthObject::new("433", Some("Eros".into()), Some(16.84), false);
        assert_eq!(
            format!("{eros:?}"),
            "NearEarthObject(designation=\"433\", name=Some(\"Eros\"), diameter=16.84, hazardous=false)"
        );
    }

    #[test]
    fn append_rejects_non_approach_records() {
        let mut eros = NearEarthObject::new("433", Some("Eros".into()), None, false);
        let other = NearEarthObject::new("1036", Some("Ganymed".into()), None, false);
        let err = eros.append(other).unwrap_err();
        assert!(matches!(
            err,
            ModelError::TypeMismatch { expected: "close approach", found: "near-Earth object" }
        ));
        assert!(eros.approaches().is_empty());
    }

    #[test]
    fn append_keeps_insertion_order() {
        let mut eros = NearEarthObject::new("433", Some("Eros".into()), None, false);
        for cd in ["2020-Jan-01 00:00", "1975-Jan-23 07:31", "2056-Jan-24 12:10"] {
            let time = parse_calendar_string(cd).unwrap();
            eros.append(CloseApproach::new("433", time, 0.15, 5.9)).unwrap();
        }
        let times: Vec<String> = eros.approaches().iter().map(|a| a.time_str()).collect();
        assert_eq!(times, ["2020-01-01 00:00", "1975-01-23 07:31", "2056-01-24 12:10"]);
    }
}
