//! Template catalog and per-user template customization kept in local storage.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::generation::generator::find_template;
use crate::latency::{Latency, Operation};
use crate::models::template::{Customization, Template};
use crate::store::local_storage::customization_key;
use crate::store::{Repository, Store};

/// Result of applying a customization to a template.
#[derive(Debug, Clone, Serialize)]
pub struct CustomizationPreview {
    pub template_id: u64,
    pub customization: Customization,
    pub preview_url: String,
    pub applied_at: DateTime<Utc>,
}

pub async fn get_templates(store: &Store, latency: &Latency) -> Result<Vec<Template>, AppError> {
    latency.simulate(Operation::ListTemplates).await;
    Ok(store.templates.list().await)
}

/// Persists the customization under the user's key for the template.
pub async fn save_customization(
    store: &Store,
    latency: &Latency,
    user_id: u64,
    template_id: u64,
    customization: &Customization,
) -> Result<(), AppError> {
    latency.simulate(Operation::SaveCustomization).await;

    find_template(store, template_id).await?;
    store
        .local_storage
        .set_json(&customization_key(user_id, template_id), customization)
        .await?;

    info!(
        "Saved customization for user {user_id}, template {template_id}: {} / {}",
        customization.color_scheme.name, customization.font.name
    );
    Ok(())
}

/// The user's saved customization, else the template's default.
pub async fn get_customization(
    store: &Store,
    latency: &Latency,
    user_id: u64,
    template_id: u64,
) -> Result<Customization, AppError> {
    latency.simulate(Operation::GetCustomization).await;

    let saved: Option<Customization> = store
        .local_storage
        .get_json(&customization_key(user_id, template_id))
        .await?;
    if let Some(customization) = saved {
        debug!("Using saved customization of user {user_id} for template {template_id}");
        return Ok(customization);
    }

    find_template(store, template_id)
        .await?
        .default_customization()
        .ok_or_else(|| {
            AppError::NotFound(format!("No customization for template {template_id}"))
        })
}

/// Previews a customization without saving it.
pub async fn apply_customization(
    store: &Store,
    latency: &Latency,
    template_id: u64,
    customization: Customization,
) -> Result<CustomizationPreview, AppError> {
    latency.simulate(Operation::ApplyCustomization).await;

    find_template(store, template_id).await?;
    let applied_at = Utc::now();
    Ok(CustomizationPreview {
        template_id,
        customization,
        preview_url: format!(
            "/api/templates/{template_id}/preview?t={}",
            applied_at.timestamp_millis()
        ),
        applied_at,
    })
}
