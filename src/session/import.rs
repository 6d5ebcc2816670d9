//! Async image import: normalize first, commit the layer only on success.

use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task};
use futures_lite::future;

use crate::config::EngineConfig;
use crate::image_pipeline::{ImageDecodeError, NormalizedImage, normalize_image, place_image_layer};
use crate::layer::{ImageLayer, Layer};

use super::messages::{HistoryCommitted, ImageImportFailed, ImportImageRequest, LayerCommandFailed};
use super::state::EditorSession;

/// Result of an async image normalization
pub struct ImportResult {
    pub name: String,
    pub is_background: bool,
    pub image: Result<NormalizedImage, ImageDecodeError>,
}

/// Component for a pending image import. Despawning it abandons the import.
#[derive(Component)]
pub struct ImportImageTask(pub Task<ImportResult>);

/// Build the image layer for a normalized preview, placed on a canvas
pub fn image_layer_from(
    name: impl Into<String>,
    image: &NormalizedImage,
    canvas: (f64, f64),
    is_background: bool,
) -> Layer {
    let mut layer = ImageLayer::new(name, Some(image.to_data_url()));
    if is_background {
        layer.is_background = Some(true);
    }
    let placement = place_image_layer(
        canvas,
        (image.source_width, image.source_height),
        is_background,
    );
    layer.base.x = placement.x;
    layer.base.y = placement.y;
    layer.base.width = placement.width;
    layer.base.height = placement.height;
    layer.into()
}

/// Starts an async normalization for each import request
pub fn start_image_imports(
    mut commands: Commands,
    mut events: MessageReader<ImportImageRequest>,
    config: Option<Res<EngineConfig>>,
) {
    let (bounds, quality) = config
        .map(|config| (config.data.preview_bounds(), config.data.preview_quality()))
        .unwrap_or_else(|| {
            let defaults = crate::config::EngineConfigData::default();
            (defaults.preview_bounds(), defaults.preview_quality())
        });

    for event in events.read() {
        let request = event.clone();
        info!("Importing image '{}'", request.name);

        let task_pool = AsyncComputeTaskPool::get();
        let task = task_pool.spawn(async move {
            let image = normalize_image(request.source, bounds, quality).await;
            ImportResult {
                name: request.name,
                is_background: request.is_background,
                image,
            }
        });

        commands.spawn(ImportImageTask(task));
    }
}

/// Polls import tasks and commits the finished layers
pub fn poll_image_imports(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut ImportImageTask)>,
    mut session: ResMut<EditorSession>,
    mut committed: MessageWriter<HistoryCommitted>,
    mut import_failed: MessageWriter<ImageImportFailed>,
    mut command_failed: MessageWriter<LayerCommandFailed>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        let Some(result) = future::block_on(future::poll_once(&mut task.0)) else {
            continue;
        };
        commands.entity(entity).despawn();

        match result.image {
            Ok(image) => {
                let layer =
                    image_layer_from(result.name, &image, session.canvas(), result.is_background);
                let before = session.history().current().id();
                match session.add_layer(layer) {
                    Ok(()) => {
                        let entry = session.history().current();
                        if entry.id() != before {
                            committed.write(HistoryCommitted {
                                entry_id: entry.id(),
                                action: entry.action(),
                                description: entry.description().to_string(),
                            });
                        }
                    }
                    Err(error) => {
                        error!("Failed to add imported image: {}", error);
                        command_failed.write(LayerCommandFailed { error });
                    }
                }
            }
            Err(e) => {
                warn!("Image import '{}' failed: {}", result.name, e);
                import_failed.write(ImageImportFailed {
                    name: result.name,
                    reason: e.to_string(),
                });
            }
        }
    }
}
