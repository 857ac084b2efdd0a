//! Unofficial Rust client for the <https://tio.run> code execution service.
//!
//! The service has no published API: its submission and catalog endpoints are
//! scraped off the frontend, requests travel as a raw-DEFLATE compressed,
//! length-prefixed command frame, and responses come back gzip-compressed with
//! a random marker delimiting the output, debug and warnings sections.
//!
//! ```no_run
//! # async fn demo() -> tio::Result<()> {
//! let client = tio::Client::new()?;
//! let result = client
//!     .evaluate(&tio::EvaluateOptions::new("python3", "print(1)"))
//!     .await?;
//! println!("{}", result.output);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod client;
pub mod config;
pub mod discover;
pub mod error;
pub mod options;
pub mod response;
pub mod wire;

pub use client::{Client, EvaluateResult};
pub use error::{Error, Result};
pub use options::EvaluateOptions;
pub use response::Status;
