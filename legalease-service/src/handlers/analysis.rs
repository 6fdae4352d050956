//! Single-shot helper analyses. Neither reads nor writes the session store.

use axum::{extract::State, Json};
use service_core::error::AppError;

use crate::{
    dtos::{CategoryAnalysisRequest, CategoryAnalysisResponse, CitationRequest, CitationResponse},
    startup::AppState,
};

/// Format a legal citation.
pub async fn format_citation(
    State(state): State<AppState>,
    Json(payload): Json<CitationRequest>,
) -> Result<Json<CitationResponse>, AppError> {
    let formatted = state.assistant.format_citation(&payload.citation).await?;

    Ok(Json(CitationResponse {
        original: payload.citation.trim().to_string(),
        formatted,
    }))
}

/// Identify the legal category of a question or excerpt.
pub async fn analyze_category(
    State(state): State<AppState>,
    Json(payload): Json<CategoryAnalysisRequest>,
) -> Result<Json<CategoryAnalysisResponse>, AppError> {
    let analysis = state.assistant.analyze_category(&payload.text).await?;

    Ok(Json(CategoryAnalysisResponse {
        text: analysis.excerpt,
        category_analysis: analysis.analysis,
    }))
}
