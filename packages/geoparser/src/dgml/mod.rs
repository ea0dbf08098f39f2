//! DGML: Marble's map theme description language.

pub mod handlers;
pub mod tags;

use crate::format::FormatDescriptor;
use crate::model::GeoDocument;
use crate::registry::HandlerRegistry;

use handlers::*;

pub const DGML_NAMESPACE_20: &str = "http://edu.kde.org/marble/dgml/2.0";

pub static DGML_FORMAT: FormatDescriptor = FormatDescriptor::new(
    "DGML",
    &[tags::DGML],
    &[DGML_NAMESPACE_20],
    GeoDocument::new_scene_document,
);

/// Build the registry of all DGML handlers.
#[must_use]
pub fn create_dgml_registry() -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    let ns = DGML_NAMESPACE_20;

    registry.register(tags::DGML, ns, DgmlHandler);
    registry.register(tags::DOCUMENT, ns, DocumentHandler);
    registry.register(tags::HEAD, ns, HeadHandler);
    registry.register(tags::NAME, ns, NameHandler);
    registry.register(tags::TARGET, ns, TargetHandler);
    registry.register(tags::THEME, ns, ThemeHandler);
    registry.register(tags::DESCRIPTION, ns, DescriptionHandler);
    registry.register(tags::VISIBLE, ns, VisibleHandler);
    registry.register(tags::MAP, ns, MapHandler);
    registry.register(tags::LAYER, ns, LayerHandler);
    registry.register(tags::TEXTURE, ns, TextureHandler);
    registry.register(tags::SOURCE_DIR, ns, SourceDirHandler);
    registry.register(tags::INSTALL_MAP, ns, InstallMapHandler);
    registry.register(tags::STORAGE_LAYOUT, ns, StorageLayoutHandler);
    registry.register(tags::TILE_SIZE, ns, TileSizeHandler);
    registry.register(tags::PROJECTION, ns, ProjectionHandler);
    registry.register(tags::DOWNLOAD_URL, ns, DownloadUrlHandler);

    registry
}
