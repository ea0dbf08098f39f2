//! DGML element and attribute names.

pub const DGML: &str = "dgml";
pub const DOCUMENT: &str = "document";
pub const HEAD: &str = "head";
pub const NAME: &str = "name";
pub const TARGET: &str = "target";
pub const THEME: &str = "theme";
pub const DESCRIPTION: &str = "description";
pub const VISIBLE: &str = "visible";
pub const MAP: &str = "map";
pub const LAYER: &str = "layer";
pub const TEXTURE: &str = "texture";
pub const SOURCE_DIR: &str = "sourcedir";
pub const INSTALL_MAP: &str = "installmap";
pub const STORAGE_LAYOUT: &str = "storageLayout";
pub const TILE_SIZE: &str = "tileSize";
pub const PROJECTION: &str = "projection";
pub const DOWNLOAD_URL: &str = "downloadUrl";

pub const ATTR_BGCOLOR: &str = "bgcolor";
pub const ATTR_NAME: &str = "name";
pub const ATTR_BACKEND: &str = "backend";
pub const ATTR_MODE: &str = "mode";
pub const ATTR_LEVEL_ZERO_COLUMNS: &str = "levelZeroColumns";
pub const ATTR_LEVEL_ZERO_ROWS: &str = "levelZeroRows";
pub const ATTR_MAXIMUM_TILE_LEVEL: &str = "maximumTileLevel";
pub const ATTR_WIDTH: &str = "width";
pub const ATTR_HEIGHT: &str = "height";
pub const ATTR_PROTOCOL: &str = "protocol";
pub const ATTR_HOST: &str = "host";
pub const ATTR_PORT: &str = "port";
pub const ATTR_PATH: &str = "path";
pub const ATTR_QUERY: &str = "query";
