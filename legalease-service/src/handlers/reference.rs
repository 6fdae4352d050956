//! Read-only reference data: disclaimer, templates, glossary and categories.

use axum::{extract::Path, Json};
use service_core::error::AppError;

use crate::{
    catalog::{self, Table, CATEGORIES, DISCLAIMER, GLOSSARY},
    dtos::{
        CategoriesResponse, DisclaimerResponse, GlossaryResponse, TemplateListResponse,
        TemplateResponse, TermResponse,
    },
};

pub async fn disclaimer() -> Json<DisclaimerResponse> {
    Json(DisclaimerResponse {
        disclaimer: DISCLAIMER,
    })
}

/// Template metadata without the bodies.
pub async fn list_templates() -> Json<TemplateListResponse> {
    Json(TemplateListResponse {
        templates: catalog::template_summaries(),
    })
}

pub async fn get_template(Path(id): Path<String>) -> Result<Json<TemplateResponse>, AppError> {
    let template = catalog::templates::find(&id)
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Template not found")))?;

    Ok(Json(TemplateResponse { id, template }))
}

pub async fn glossary() -> Json<GlossaryResponse> {
    Json(GlossaryResponse {
        glossary: Table(GLOSSARY),
    })
}

pub async fn get_term(Path(id): Path<String>) -> Result<Json<TermResponse>, AppError> {
    let term_data = catalog::glossary::find(&id)
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Term not found")))?;

    Ok(Json(TermResponse { id, term_data }))
}

pub async fn categories() -> Json<CategoriesResponse> {
    Json(CategoriesResponse {
        categories: Table(CATEGORIES),
    })
}
