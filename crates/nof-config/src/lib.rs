//! Network profiles and compiler settings for NOFToken deployments.
//!
//! Exposes the static network registry (mainnet, shasta, nile, development),
//! environment-backed credential resolution, and the process-wide solc
//! options consumed by the deployment runtime and the `nof-deploy` binary.

pub mod compiler;
pub mod credential;
pub mod env_source;
pub mod error;
pub mod network_profile;
pub mod registry;

pub use compiler::{compiler_options, CompilerOptions, OptimizerOptions, SolcSettings};
pub use credential::{CredentialPolicy, CredentialSource, PrivateKey};
pub use env_source::{EnvSource, MapEnv, ProcessEnv};
pub use error::ConfigError;
pub use network_profile::{EndpointSpec, NetworkProfile, NetworkProfileSpec};
pub use registry::{resolve_host_port, NetworkRegistry, DEFAULT_HOST_PORT, HOST_PORT_ENV};
