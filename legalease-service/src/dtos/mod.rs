use crate::catalog::{Category, GlossaryTerm, Table, Template, TemplateIndex};
use crate::models::SessionId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub is_document: bool,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub message: String,
    pub session_id: SessionId,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub service: &'static str,
    pub disclaimer: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DisclaimerResponse {
    pub disclaimer: &'static str,
}

#[derive(Debug, Serialize)]
pub struct TemplateListResponse {
    pub templates: TemplateIndex,
}

#[derive(Debug, Serialize)]
pub struct TemplateResponse {
    pub id: String,
    pub template: &'static Template,
}

#[derive(Debug, Serialize)]
pub struct GlossaryResponse {
    pub glossary: Table<GlossaryTerm>,
}

#[derive(Debug, Serialize)]
pub struct TermResponse {
    pub id: String,
    pub term_data: &'static GlossaryTerm,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Table<Category>,
}

#[derive(Debug, Deserialize)]
pub struct CitationRequest {
    #[serde(default)]
    pub citation: String,
}

#[derive(Debug, Serialize)]
pub struct CitationResponse {
    pub original: String,
    pub formatted: String,
}

#[derive(Debug, Deserialize)]
pub struct CategoryAnalysisRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct CategoryAnalysisResponse {
    /// The analysed text, cut to 100 characters.
    pub text: String,
    pub category_analysis: String,
}
