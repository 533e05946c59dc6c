use std::fmt;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::api::types::ApproachDto;
use crate::core::error::ModelError;
use crate::core::fields::RawFields;
use crate::core::neo::NearEarthObject;
use crate::utils::time::{format_timestamp, parse_calendar_string};

pub const FIELD_DESIGNATION: &str = "des";
pub const FIELD_TIME: &str = "cd";
pub const FIELD_DISTANCE: &str = "dist";
pub const FIELD_VELOCITY: &str = "v_rel";

/// Handle of a near-Earth object inside a [`crate::catalog::Catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NeoId(pub usize);

/// A single close approach to Earth by a near-Earth object.
///
/// `neo` is empty until the linking pass runs and is set at most once.
#[derive(Clone, PartialEq)]
pub struct CloseApproach {
    designation: String,
    time: NaiveDateTime,
    distance: f64,
    velocity: f64,
    neo: Option<NeoId>,
}

impl CloseApproach {
    /// `distance` in au, `velocity` in km/s.
    pub fn new(designation: impl Into<String>, time: NaiveDateTime, distance: f64, velocity: f64) -> Self {
        Self {
            designation: designation.into(),
            time,
            distance,
            velocity,
            neo: None,
        }
    }

    /// Builds an approach from a raw source row (`des`, `cd`, `dist`, `v_rel`).
    /// Every field is mandatory.
    pub fn from_fields(fields: &RawFields) -> Result<Self, ModelError> {
        let designation = fields.required_text(FIELD_DESIGNATION)?;
        let cd = fields.required_text(FIELD_TIME)?;
        let time = parse_calendar_string(&cd).map_err(|e| ModelError::time(FIELD_TIME, e))?;
        let distance = fields.required_float(FIELD_DISTANCE)?;
        let velocity = fields.required_float(FIELD_VELOCITY)?;
        debug!(designation = %designation, time = %cd, "Built close approach");
        Ok(Self::new(designation, time, distance, velocity))
    }

    /// Primary designation of the owning object.
    pub fn designation(&self) -> &str {
        &self.designation
    }

    pub fn time(&self) -> NaiveDateTime {
        self.time
    }

    pub fn time_str(&self) -> String {
        format_timestamp(&self.time)
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn neo(&self) -> Option<NeoId> {
        self.neo
    }

    /// Records the owning object. Only the linking pass calls this, once.
    pub fn set_neo(&mut self, id: NeoId) -> Result<(), ModelError> {
        if let Some(existing) = self.neo {
            return Err(ModelError::Precondition(format!(
                "approach of {} at {} already linked to {:?}",
                self.designation,
                self.time_str(),
                existing
            )));
        }
        self.neo = Some(id);
        Ok(())
    }

    pub fn serialize(&self) -> ApproachDto {
        ApproachDto {
            datetime_utc: self.time_str(),
            distance_au: self.distance,
            velocity_km_s: self.velocity,
        }
    }

    /// Pairs this approach with its owning object for display.
    ///
    /// Fails if the approach has not been linked yet, or if `neo` is not the
    /// object it was linked to.
    pub fn describe<'a>(&'a self, neo: &'a NearEarthObject) -> Result<LinkedApproach<'a>, ModelError> {
        if self.neo.is_none() {
            return Err(ModelError::Precondition(format!(
                "approach of {} at {} is not linked to an object",
                self.designation,
                self.time_str()
            )));
        }
        if neo.designation() != self.designation {
            return Err(ModelError::Precondition(format!(
                "approach of {} described against object {}",
                self.designation,
                neo.designation()
            )));
        }
        Ok(LinkedApproach { approach: self, neo })
    }
}

impl fmt::Debug for CloseApproach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CloseApproach(time={:?}, distance={:.2}, velocity={:.2}, neo={:?})",
            self.time_str(),
            self.distance,
            self.velocity,
            self.neo
        )
    }
}

/// A linked approach together with its object; the human-readable form.
#[derive(Debug, Clone, Copy)]
pub struct LinkedApproach<'a> {
    approach: &'a CloseApproach,
    neo: &'a NearEarthObject,
}

impl<'a> LinkedApproach<'a> {
    pub fn approach(&self) -> &'a CloseApproach {
        self.approach
    }

    pub fn neo(&self) -> &'a NearEarthObject {
        self.neo
    }
}

impl fmt::Display for LinkedApproach<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "On {}, {} approaches Earth at a distance of {:.2} au and velocity of {:.2} km/s.",
            self.approach.time_str(),
            self.neo.fullname(),
            self.approach.distance,
            self.approach.velocity
        )
    }
}
