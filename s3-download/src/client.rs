/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::path::Path;
use std::sync::Arc;

use crate::error;
use crate::operation::download::DownloadedEntry;
use crate::operation::download_objects::DownloadOutput;
use crate::operation::list_objects::ListObjectsStream;
use crate::Config;

/// Download client for a single invocation.
///
/// Owns the S3 client (and with it the connection pool) for as long as the invocation runs.
#[derive(Debug, Clone)]
pub struct Client {
    pub(crate) handle: Arc<Handle>,
}

/// Whatever is needed to carry out operations: the invocation config and the S3 client
#[derive(Debug)]
pub(crate) struct Handle {
    pub(crate) config: Config,
    pub(crate) s3: aws_sdk_s3::Client,
}

impl Handle {
    /// The S3 client to use for SDK operations
    pub(crate) fn s3_client(&self) -> &aws_sdk_s3::Client {
        &self.s3
    }
}

impl Client {
    /// Creates a new client from a config and an explicit S3 client.
    pub fn new(config: Config, s3_client: aws_sdk_s3::Client) -> Client {
        let handle = Arc::new(Handle {
            config,
            s3: s3_client,
        });
        Client { handle }
    }

    /// Creates a new client, building the S3 client from the credentials, endpoint and TLS
    /// settings in `config`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # async fn example() -> Result<(), s3_download::error::Error> {
    /// let config = s3_download::Config::builder()
    ///     .bucket_name("my-bucket")
    ///     .source("reports/2024/")
    ///     .destination("/tmp/reports/")
    ///     .build()?;
    ///
    /// let client = s3_download::Client::from_conf(config).await?;
    /// let output = client.execute().await?;
    /// println!("downloaded {} objects", output.objects_downloaded());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn from_conf(config: Config) -> Result<Client, error::Error> {
        let s3_client = crate::config::loader::load(&config).await?;
        Ok(Client::new(config, s3_client))
    }

    /// Returns the client's configuration
    pub fn config(&self) -> &Config {
        &self.handle.config
    }

    /// The S3 client used to send requests
    pub fn s3_client(&self) -> &aws_sdk_s3::Client {
        self.handle.s3_client()
    }

    /// Run the download described by the configuration.
    ///
    /// If the destination ends with a `/` every key under the source prefix is downloaded
    /// below it. Otherwise the source names a single object that is written to the
    /// destination file. Fails with [`ErrorKind::NotFound`](crate::error::ErrorKind::NotFound)
    /// before anything is listed or downloaded if the bucket does not exist.
    pub async fn execute(&self) -> Result<DownloadOutput, error::Error> {
        crate::operation::execute::Execute::orchestrate(self.handle.clone()).await
    }

    /// Check whether the configured bucket exists
    pub async fn bucket_exists(&self) -> Result<bool, error::Error> {
        crate::operation::bucket::bucket_exists(self.s3_client(), self.config().bucket_name())
            .await
    }

    /// Lazily list every key under `prefix` in the configured bucket
    pub fn list_objects(&self, prefix: impl Into<String>) -> ListObjectsStream {
        ListObjectsStream::new(
            self.s3_client().clone(),
            self.config().bucket_name(),
            prefix,
        )
    }

    /// Download a single key of the configured bucket below `root_dir`
    pub async fn download_key(
        &self,
        root_dir: impl AsRef<Path>,
        key: &str,
    ) -> Result<DownloadedEntry, error::Error> {
        crate::operation::download::download_key(
            self.s3_client(),
            self.config().bucket_name(),
            root_dir.as_ref(),
            key,
        )
        .await
    }
}
