use crate::config::ClassifierConfig;
use crate::error::AppError;
use crate::models::image_types::SelectedImage;
use crate::models::view_types::PanelView;
use crate::panel::Panel;
use crate::services::classifier_client::ClassifierClient;
use crate::services::image_intake;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared panel plus the client used to classify. The lock is only held
/// while the state changes, never across a preview or a request.
#[derive(Clone)]
pub struct PanelHandle {
    panel: Arc<Mutex<Panel>>,
    client: ClassifierClient,
}

impl PanelHandle {
    pub fn new(client: ClassifierClient) -> Self {
        PanelHandle {
            panel: Arc::new(Mutex::new(Panel::new())),
            client,
        }
    }

    pub fn from_config(config: &ClassifierConfig) -> Result<Self, AppError> {
        Ok(Self::new(ClassifierClient::new(config)?))
    }

    pub async fn view(&self) -> PanelView {
        self.panel.lock().await.view()
    }
}

pub async fn get_panel_view(handle: &PanelHandle) -> Result<PanelView, AppError> {
    Ok(handle.view().await)
}

/// Picker path: read the file, then select it.
pub async fn select_image(handle: &PanelHandle, path: impl AsRef<Path>) -> Result<PanelView, AppError> {
    match image_intake::picked(path.as_ref()).await {
        Ok(image) => load_selection(handle, image).await,
        Err(err) => {
            let mut panel = handle.panel.lock().await;
            panel.reject(&err);
            Ok(panel.view())
        }
    }
}

/// Drag-and-drop path: the blob is already in memory.
pub async fn drop_image(
    handle: &PanelHandle,
    file_name: String,
    mime_type: Option<String>,
    bytes: Vec<u8>,
) -> Result<PanelView, AppError> {
    let image = image_intake::dropped(file_name, mime_type.as_deref(), bytes);
    load_selection(handle, image).await
}

async fn load_selection(handle: &PanelHandle, image: SelectedImage) -> Result<PanelView, AppError> {
    let job = handle.panel.lock().await.select(image);
    if let Some(job) = job {
        let outcome = job.run().await;
        handle.panel.lock().await.apply_preview(outcome);
    }
    Ok(handle.view().await)
}

pub async fn classify_image(handle: &PanelHandle) -> Result<PanelView, AppError> {
    let job = handle.panel.lock().await.submit();
    if let Some(job) = job {
        let outcome = job.run(&handle.client).await;
        handle.panel.lock().await.apply_submission(outcome);
    }
    Ok(handle.view().await)
}

pub async fn reset_panel(handle: &PanelHandle) -> Result<PanelView, AppError> {
    let mut panel = handle.panel.lock().await;
    panel.reset();
    Ok(panel.view())
}
