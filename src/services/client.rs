use crate::domain::models::{CoordinateInput, ImageInput, RiskLevel};
use reqwest::blocking::multipart;
use serde::Deserialize;

/// On-wire analysis payload. Field names are snake-cased as sent by the
/// service; `location_name`, `geographic_features` and `ai_analysis` are
/// optional.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiResponse {
    pub success: bool,
    pub risk_level: RiskLevel,
    pub description: String,
    pub recommendations: Vec<String>,
    pub elevation: f64,
    pub distance_from_water: f64,
    pub location_name: Option<String>,
    pub geographic_features: Option<String>,
    pub ai_analysis: Option<String>,
    pub message: String,
}

#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    #[error("analysis service returned status {0}")]
    Status(u16),
    #[error("analysis request failed: {0}")]
    Network(#[from] reqwest::Error),
}

pub struct ApiClient {
    base: String,
    http: reqwest::blocking::Client,
}

impl ApiClient {
    /// No request timeout is configured here; the transport's own limits
    /// apply.
    pub fn new(base: &str) -> anyhow::Result<Self> {
        let http = reqwest::blocking::Client::builder().build()?;
        Ok(Self {
            base: base.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn analyze_coordinates(
        &self,
        input: &CoordinateInput,
    ) -> Result<ApiResponse, TransportError> {
        let url = format!("{}/api/analyze/coordinates", self.base);
        let resp = self.http.post(url).json(input).send()?;
        decode(resp)
    }

    /// Single multipart field `file`; the boundary and content type of the
    /// request are left to the transport.
    pub fn analyze_image(&self, input: &ImageInput) -> Result<ApiResponse, TransportError> {
        let url = format!("{}/api/analyze/image", self.base);
        let part = multipart::Part::bytes(input.bytes.clone())
            .file_name(input.file_name.clone())
            .mime_str(&input.mime_type)?;
        let form = multipart::Form::new().part("file", part);
        let resp = self.http.post(url).multipart(form).send()?;
        decode(resp)
    }
}

fn decode(resp: reqwest::blocking::Response) -> Result<ApiResponse, TransportError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(TransportError::Status(status.as_u16()));
    }
    Ok(resp.json()?)
}
