//! CNPJ Dossier API Library
//!
//! Builds business dossiers for Brazilian companies: CNPJ validation,
//! provider aggregation with fallback data, risk scoring, and document
//! rendering, plus the axum handlers that expose them.
//!
//! # Modules
//!
//! - `api`: HTTP-facing components.
//! - `core`: Domain logic and shared models/errors.
//! - `integrations`: External provider clients.
//! - `aggregator`: Sequential provider calls with per-section fallback.
//! - `cnpj`: CNPJ normalization, validation and formatting.
//! - `config`: Configuration management.
//! - `dossier`: Dossier assembly.
//! - `errors`: Error handling types.
//! - `fallback`: Illustrative and synthetic substitute data.
//! - `handlers`: HTTP request handlers and router.
//! - `locale`: pt-BR formatting.
//! - `models`: Core data models.
//! - `openapi`: OpenAPI document.
//! - `presentation`: Summary and document layouts.
//! - `risk`: Risk scoring.
//! - `services`: Provider HTTP clients.

pub mod api;
pub mod core;
pub mod integrations;

pub mod aggregator;
pub mod cnpj;
pub mod config;
pub mod dossier;
pub mod errors;
pub mod fallback;
pub mod handlers;
pub mod locale;
pub mod models;
pub mod openapi;
pub mod presentation;
pub mod risk;
pub mod services;
