// netglance-core: reactive network status — connectivity, public IP /
// country, and WiFi signal quality — behind a thread-safe store.

mod backend;

pub mod config;
pub mod country;
pub mod error;
pub mod model;
pub mod monitor;
pub mod path;
pub mod resolver;
pub mod store;
pub mod stream;
pub mod wifi;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{DEFAULT_BACKEND_URL, MonitorConfig};
pub use country::{CONNECTED_GLYPH, GLOBE_GLYPH, OFFLINE_GLYPH, status_glyph};
pub use error::CoreError;
pub use monitor::NetMonitor;
pub use path::{ChannelPathSource, PathSource, SysfsPathSource, channel_source};
pub use resolver::BackendResolver;
pub use store::StatusStore;
pub use stream::StateStream;
pub use wifi::{CommandProbe, SignalProbe, WifiSampler};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    BackendResult, Connectivity, GeoStatus, InterfaceKind, PathUpdate, WifiSample,
    interface_signature,
};
