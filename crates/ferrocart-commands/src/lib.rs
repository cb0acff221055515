//! # Ferrocart Commands
//!
//! The ecommerce command surface and the assembled platform behind the CLI
//! and the HTTP API.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | `FERROCART_*` environment configuration |
//! | [`extensions`] | products, orders, customers, inventory, marketing, analytics, pricing |
//! | [`platform`] | discovery, router assembly and deadline-bound execution |
//! | [`system`] | built-in `/system/status` |
//!
//! ```rust,no_run
//! use ferrocart_commands::{Platform, PlatformConfig};
//! use ferrocart_core::Parameters;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let platform = Platform::assemble(PlatformConfig::default());
//! let envelope = platform.execute("/inventory/levels/current", None, Parameters::new()).await?;
//! println!("{}", envelope.to_csv()?);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod extensions;
pub mod platform;
pub mod system;

pub use config::{ConfigError, PlatformConfig};
pub use extensions::root_router;
pub use platform::{builtin_plugins, Platform, PlatformError};
pub use system::SystemStatus;
