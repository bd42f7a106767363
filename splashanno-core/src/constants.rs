/// Prefix joined onto every `ref_image` to build the public image URL.
pub const DEFAULT_IMAGE_PREFIX: &str =
    "https://dl.dir.freefiremobile.com/common/Local/BD/Splashanno/";

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_DATA_FILE: &str = "data.json";
pub const DEFAULT_ADMIN_PAGE: &str = "public/admin.html";
pub const DEFAULT_CONFIG_FILE: &str = "splashanno.toml";

/// Environment prefix for every setting except `PORT`.
pub const ENV_PREFIX: &str = "SPLASHANNO";

// Item field names
pub const RAW_IMAGE_FIELD: &str = "ref_image";
pub const IMAGE_URL_FIELD: &str = "refImage";
pub const SEQUENCE_FIELD: &str = "imageNumber";
pub const NAME_FIELD: &str = "name";
pub const TITLE_FIELD: &str = "title";
pub const START_FIELD: &str = "start";
pub const END_FIELD: &str = "end";
