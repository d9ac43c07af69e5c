mod load;
mod types;

pub use load::{apply_env_overrides, get_data_dir, load_default, load_from_path, load_from_str};
pub use types::{AggregationConfig, ApiConfig, AppConfig, LoggingConfig};
