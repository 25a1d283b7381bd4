mod loader;

pub use loader::{
    glob_match, ClassificationConfig, Config, InspectionConfig, ReportConfig,
    DEFAULT_CONTAINER_SYMBOL,
};
