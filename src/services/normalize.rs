use crate::domain::models::RiskAssessment;
use crate::services::client::ApiResponse;

/// Maps the on-wire payload into the display model. Pure and total for any
/// well-formed response.
///
/// The envelope's `success` and `message` fields are not consulted: a body
/// that decodes is displayed even when the service reports failure inside a
/// 200. Callers that want the envelope record it before normalizing.
pub fn normalize(raw: ApiResponse) -> RiskAssessment {
    RiskAssessment {
        risk_level: raw.risk_level,
        description: raw.description,
        recommendations: raw.recommendations,
        elevation_m: raw.elevation,
        distance_from_water_m: raw.distance_from_water,
        location_name: raw.location_name,
        geographic_features: raw.geographic_features,
        ai_narrative: raw.ai_analysis.unwrap_or_default(),
    }
}
