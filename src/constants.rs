// GDC Legacy Archive endpoints
pub const PROJECTS_ENDPOINT: &str = "https://gdc-api.nci.nih.gov/legacy/projects/";
pub const FILES_ENDPOINT: &str = "https://gdc-api.nci.nih.gov/legacy/files/";
pub const DATA_ENDPOINT: &str = "https://gdc-api.nci.nih.gov/legacy/data/";

// File search filter literals
pub const PROJECT_PREFIX: &str = "TCGA-";
pub const DATA_FORMAT: &str = "MAF";
pub const OPEN_ACCESS: &str = "open";

// Filter field paths understood by the archive
pub const PROJECT_ID_FIELD: &str = "cases.project.project_id";
pub const DATA_FORMAT_FIELD: &str = "files.data_format";
pub const ACCESS_FIELD: &str = "access";

// Result caps and requested output fields
pub const PROJECT_PAGE_SIZE: u32 = 1000;
pub const FILE_PAGE_SIZE: u32 = 1000;
pub const FILE_FIELDS: &[&str] = &["file_id", "file_name", "file_size", "md5sum"];

// Local output
pub const OUTPUT_ROOT: &str = "mafs";
pub const DOWNLOAD_CHUNK_SIZE: usize = 1024;
