/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/* Automatically managed default lints */
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
/* End of automatically managed default lints */
#![warn(
    missing_debug_implementations,
    missing_docs,
    rustdoc::missing_crate_level_docs,
    unreachable_pub,
    rust_2018_idioms
)]

//! Download objects from Amazon S3 (or an S3 compatible store) to the local filesystem.
//!
//! The destination decides what is downloaded. A destination ending in `/` is a directory:
//! every key under the source prefix is downloaded below it, keys ending in `/` become empty
//! directories. Any other destination is a file and the source must name a single object.
//!
//! # Examples
//!
//! ```no_run
//! # async fn example() -> Result<(), s3_download::error::Error> {
//! let config = s3_download::Config::builder()
//!     .bucket_name("my-bucket")
//!     .source("a/")
//!     .destination("/tmp/out/")
//!     .build()?;
//!
//! let client = s3_download::Client::from_conf(config).await?;
//! client.execute().await?;
//! # Ok(())
//! # }
//! ```

/// Error types emitted by `s3-download`
pub mod error;

/// Download configuration
pub mod config;

/// Credential resolution
pub mod credentials;

/// Directory/file classification of keys and local paths
pub mod key;

/// Download client
pub mod client;

/// Download operations
pub mod operation;

/// HTTP related components and utils
pub(crate) mod http;

pub use self::client::Client;
pub use self::config::Config;
