use serde::Serialize;

/// Export shape of a near-Earth object. `diameter_km` is NaN when unknown,
/// which `serde_json` writes as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeoDto {
    pub designation: String,
    pub name: Option<String>,
    pub diameter_km: f64,
    pub potentially_hazardous: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApproachDto {
    pub datetime_utc: String,
    pub distance_au: f64,
    pub velocity_km_s: f64,
}
