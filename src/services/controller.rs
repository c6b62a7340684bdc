use crate::domain::models::{AnalysisMode, AnalysisState, ImageInput};
use crate::services::client::ApiClient;
use crate::services::normalize::normalize;
use crate::services::storage::audit;
use crate::services::validate::{self, ValidationError};
use std::path::Path;

pub const COORDINATES_FAILURE_ALERT: &str =
    "Error analyzing coordinates. Please check if the backend server is running.";
pub const IMAGE_FAILURE_ALERT: &str =
    "Error analyzing image. Please check if the backend server is running.";
pub const MISSING_COORDINATES_ALERT: &str = "Please enter both latitude and longitude";
pub const RANGE_ALERT: &str =
    "Please enter valid coordinates (Lat: -90 to 90, Lng: -180 to 180)";
pub const IMAGE_TOO_LARGE_ALERT: &str = "Image size must be less than 10MB";
pub const BAD_IMAGE_ALERT: &str = "Please select a valid image file";
pub const UNREADABLE_IMAGE_ALERT: &str = "Could not read the selected image file";
pub const NO_IMAGE_ALERT: &str = "Please select an image first";
pub const BUSY_ALERT: &str = "An analysis is already in progress";

#[derive(thiserror::Error, Debug)]
pub enum ControllerError {
    #[error("an analysis is already in progress")]
    Busy,
    #[error("no image selected")]
    NoImageSelected,
}

/// Orchestrates validate → submit → normalize → publish for both input
/// modes. Exclusive owner of the analysis state, the held image and the
/// alert slot.
pub struct AnalysisController {
    client: ApiClient,
    state: AnalysisState,
    selected_image: Option<ImageInput>,
    alert: Option<String>,
    generation: u64,
}

impl AnalysisController {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: AnalysisState::Idle,
            selected_image: None,
            alert: None,
            generation: 0,
        }
    }

    pub fn state(&self) -> &AnalysisState {
        &self.state
    }

    pub fn selected_image(&self) -> Option<&ImageInput> {
        self.selected_image.as_ref()
    }

    /// Drains the pending alert, if any.
    pub fn take_alert(&mut self) -> Option<String> {
        self.alert.take()
    }

    /// Validates and submits a raw coordinate pair. A validation failure
    /// raises its alert and leaves the current state untouched; a transport
    /// failure lands in `Error` with the coordinates-specific alert.
    pub fn submit_coordinates(&mut self, raw_lat: &str, raw_lng: &str) -> anyhow::Result<()> {
        self.ensure_not_loading()?;
        let input = match validate::validate_coordinates(raw_lat, raw_lng) {
            Ok(input) => input,
            Err(err) => {
                self.raise_alert(validation_alert(&err));
                return Err(err.into());
            }
        };
        let token = self.begin(AnalysisMode::Coordinates);
        audit(
            "analyze_coordinates",
            serde_json::json!({
                "latitude": input.latitude,
                "longitude": input.longitude
            }),
        );
        match self.client.analyze_coordinates(&input) {
            Ok(raw) => {
                audit(
                    "analysis_resolved",
                    serde_json::json!({
                        "mode": "coordinates",
                        "service_success": raw.success,
                        "service_message": raw.message
                    }),
                );
                self.finish(token, AnalysisState::Success(normalize(raw)));
                Ok(())
            }
            Err(err) => {
                audit(
                    "analysis_failed",
                    serde_json::json!({"mode": "coordinates", "error": err.to_string()}),
                );
                self.finish(token, AnalysisState::Error(err.to_string()));
                self.raise_alert(COORDINATES_FAILURE_ALERT);
                Err(err.into())
            }
        }
    }

    /// Validates a photo and holds it (with its preview) for submission. A
    /// rejected selection leaves any previously held image in place.
    pub fn select_image(&mut self, path: &Path) -> anyhow::Result<()> {
        match validate::validate_image(path) {
            Ok(input) => {
                self.selected_image = Some(input);
                Ok(())
            }
            Err(err) => {
                self.raise_alert(validation_alert(&err));
                Err(err.into())
            }
        }
    }

    /// Drops the held image and its preview. The analysis state is
    /// unaffected.
    pub fn clear_image(&mut self) {
        self.selected_image = None;
    }

    /// Submits the held image. Fails immediately, without a state
    /// transition, when nothing is selected.
    pub fn submit_image(&mut self) -> anyhow::Result<()> {
        self.ensure_not_loading()?;
        let Some(image) = self.selected_image.clone() else {
            self.raise_alert(NO_IMAGE_ALERT);
            return Err(ControllerError::NoImageSelected.into());
        };
        let token = self.begin(AnalysisMode::Image);
        audit(
            "analyze_image",
            serde_json::json!({
                "file_name": image.file_name,
                "mime_type": image.mime_type,
                "size_bytes": image.size_bytes
            }),
        );
        match self.client.analyze_image(&image) {
            Ok(raw) => {
                audit(
                    "analysis_resolved",
                    serde_json::json!({
                        "mode": "image",
                        "service_success": raw.success,
                        "service_message": raw.message
                    }),
                );
                self.finish(token, AnalysisState::Success(normalize(raw)));
                Ok(())
            }
            Err(err) => {
                audit(
                    "analysis_failed",
                    serde_json::json!({"mode": "image", "error": err.to_string()}),
                );
                self.finish(token, AnalysisState::Error(err.to_string()));
                self.raise_alert(IMAGE_FAILURE_ALERT);
                Err(err.into())
            }
        }
    }

    /// The alert slot holds at most one message; raising a second alert
    /// before the first is taken replaces it.
    fn raise_alert(&mut self, message: impl Into<String>) {
        self.alert = Some(message.into());
    }

    fn ensure_not_loading(&mut self) -> anyhow::Result<()> {
        if matches!(self.state, AnalysisState::Loading(_)) {
            self.raise_alert(BUSY_ALERT);
            return Err(ControllerError::Busy.into());
        }
        Ok(())
    }

    fn begin(&mut self, mode: AnalysisMode) -> u64 {
        self.generation += 1;
        self.state = AnalysisState::Loading(mode);
        self.generation
    }

    /// Applies a terminal state only when `token` belongs to the newest
    /// submission; a stale resolution must not overwrite fresher state.
    fn finish(&mut self, token: u64, next: AnalysisState) {
        if token == self.generation {
            self.state = next;
        }
    }
}

fn validation_alert(err: &ValidationError) -> &'static str {
    match err {
        ValidationError::MissingInput => MISSING_COORDINATES_ALERT,
        ValidationError::OutOfRange(..) => RANGE_ALERT,
        ValidationError::TooLarge(_) => IMAGE_TOO_LARGE_ALERT,
        ValidationError::UnsupportedType(_) => BAD_IMAGE_ALERT,
        ValidationError::ReadError(_) => UNREADABLE_IMAGE_ALERT,
    }
}
