//! Envios: shipping price estimation service
//!
//! Loads a trained regression network plus its city encoders and column
//! order once at startup, then prices shipments over HTTP:
//!
//! - `GET /` serves a static form
//! - `POST /predict` takes `{"peso", "inicio", "llegada"}` and answers
//!   `{"precio_predicho": "<price> soles"}` or `{"error": "..."}`
//!
//! # Modules
//!
//! - [`artifacts`]: loading the model, encoders, and trained column list
//! - [`features`]: encoding a shipment into the trained feature layout
//! - [`model`]: the dense regression network and its safetensors format
//! - [`predict`]: request validation and the prediction pipeline
//! - [`server`]: axum router, handlers, and server loop
//! - [`config`] / [`cli`]: command line and configuration

pub mod artifacts;
pub mod cli;
pub mod config;
pub mod error;
pub mod features;
pub mod model;
pub mod predict;
pub mod server;
pub mod vocabulary;

pub use error::{Error, Result};
