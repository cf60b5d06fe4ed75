/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

mod output;
/// Output type for a download invocation
pub use output::{DownloadOutput, DownloadOutputBuilder};

use std::path::Path;
use std::sync::Arc;

use super::download::download_key;
use super::list_objects::ListObjectsStream;
use crate::error;

/// Operation struct for downloading every object under a prefix
#[derive(Clone, Default, Debug)]
pub(crate) struct DownloadObjects;

impl DownloadObjects {
    /// List every key under `prefix` and download each one below `root_dir`.
    ///
    /// Keys are downloaded one at a time in listing order. The first failure aborts the
    /// remaining downloads.
    #[tracing::instrument(skip_all, level = "debug", name = "download-objects")]
    pub(crate) async fn orchestrate(
        handle: Arc<crate::client::Handle>,
        prefix: &str,
        root_dir: &Path,
    ) -> Result<DownloadOutput, error::Error> {
        let client = handle.s3_client();
        let bucket = handle.config.bucket_name();
        let mut stream = ListObjectsStream::new(client.clone(), bucket, prefix);
        let mut output = DownloadOutput::builder();

        while let Some(key) = stream.next().await {
            let key = key?;
            let entry = download_key(client, bucket, root_dir, &key).await?;
            output.record(entry);
        }

        tracing::debug!(
            "listed {} page(s) under prefix {prefix:?}",
            stream.pages_fetched()
        );
        Ok(output.build())
    }
}
