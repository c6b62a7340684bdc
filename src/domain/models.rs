use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

/// Risk bands reported by the analysis service. On the wire the highest
/// band is the two-word string `"Very High"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::VeryHigh => "Very High",
        })
    }
}

/// Validated coordinate pair. Field names double as the request body keys.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoordinateInput {
    pub latitude: f64,
    pub longitude: f64,
}

/// A validated image selection, held by the controller until replaced or
/// cleared.
#[derive(Debug, Clone)]
pub struct ImageInput {
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub bytes: Vec<u8>,
    /// base64 data URL generated once at selection time.
    pub preview: String,
}

/// The assessment shown to the user. Built only by the normalizer and
/// replaced wholesale by the next successful analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    pub description: String,
    pub recommendations: Vec<String>,
    pub elevation_m: f64,
    pub distance_from_water_m: f64,
    pub location_name: Option<String>,
    pub geographic_features: Option<String>,
    pub ai_narrative: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMode {
    Coordinates,
    Image,
}

/// Lifecycle of the current analysis request. A new submission from either
/// terminal state re-enters `Loading`.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisState {
    Idle,
    Loading(AnalysisMode),
    Success(RiskAssessment),
    Error(String),
}
