mod configuration;
pub mod keys;
mod properties;

pub use configuration::{ConfigurationView, CONF_ENV_PREFIX};
pub use properties::TablePropertySet;
