//! Price prediction: request validation, feature encoding, and inference.
//!
//! [`predict_body`] is the whole endpoint minus HTTP. It checks that the
//! artifacts loaded, validates the body, encodes features against the trained
//! schema, and formats the model output as `"<price> soles"`.

mod request;

pub use request::PredictionRequest;

use crate::artifacts::ArtifactBundle;
use crate::model::Regressor;
use ndarray::Array2;
use thiserror::Error;
use tracing::{debug, info};

/// Outcome of a prediction, split into client and internal failures.
#[derive(Debug, Error)]
pub enum PredictError {
    /// Artifacts failed to load at startup.
    #[error("Modelo o codificadores no inicializados. Contacte al administrador.")]
    NotInitialized,

    /// Body was absent, unparseable, or empty.
    #[error("No se recibieron datos JSON")]
    NoJson,

    /// One of `peso`, `inicio`, `llegada` is missing or empty.
    #[error("Faltan datos requeridos")]
    MissingFields,

    /// Origin or destination is outside the city vocabulary.
    #[error("Ciudad no válida")]
    InvalidCity,

    /// Weight is zero, negative, or not finite.
    #[error("El peso debe ser mayor que 0")]
    NonPositiveWeight,

    /// Anything else: coercion failures, encoder or model errors.
    #[error("Error en la predicción: {0}")]
    Internal(String),
}

impl PredictError {
    /// Whether the caller sent bad input (as opposed to a server fault).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NoJson | Self::MissingFields | Self::InvalidCity | Self::NonPositiveWeight
        )
    }
}

impl From<crate::Error> for PredictError {
    fn from(e: crate::Error) -> Self {
        Self::Internal(e.to_string())
    }
}

/// Format a price the way clients display it.
pub fn format_price(price: f64) -> String {
    format!("{price:.2} soles")
}

/// Loaded artifacts ready to serve predictions.
#[derive(Debug)]
pub struct Predictor {
    bundle: ArtifactBundle,
}

impl Predictor {
    pub fn new(bundle: ArtifactBundle) -> Self {
        Self { bundle }
    }

    /// Raw model output for a validated request.
    pub fn predict(&self, request: &PredictionRequest) -> Result<f64, PredictError> {
        let bundle = &self.bundle;

        let origin_code = bundle.origin_encoder.transform(&request.origin)?;
        let destination_code = bundle.destination_encoder.transform(&request.destination)?;
        debug!(origin_code, destination_code, "cities encoded");

        let features = bundle.schema.encode(request.weight, &request.origin, &request.destination);
        debug!(columns = ?bundle.schema.active_columns(&features), "features encoded");

        let batch = Array2::from_shape_vec((1, features.len()), features)
            .map_err(|e| PredictError::Internal(e.to_string()))?;
        let output = bundle.model.predict(batch.view())?;

        output
            .get((0, 0))
            .map(|&price| f64::from(price))
            .ok_or_else(|| PredictError::Internal("model returned no output".to_string()))
    }
}

/// Run the full prediction pipeline on a raw request body.
///
/// `model` is the startup load result; a load failure answers every call
/// with [`PredictError::NotInitialized`].
pub fn predict_body(
    model: &Result<Predictor, crate::Error>,
    body: &[u8],
) -> Result<String, PredictError> {
    let Ok(predictor) = model else {
        return Err(PredictError::NotInitialized);
    };

    debug!(payload = %String::from_utf8_lossy(body), "request received");
    let request = PredictionRequest::from_body(body)?;
    info!(
        peso = request.weight,
        inicio = %request.origin,
        llegada = %request.destination,
        "request validated"
    );

    let price = predictor.predict(&request)?;
    info!(price, "prediction complete");

    Ok(format_price(price))
}
