/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;
use tokio::fs;

use super::bucket::bucket_exists;
use super::download::download_object;
use super::download_objects::{DownloadObjects, DownloadOutput};
use crate::{error, key};

/// Operation struct for a complete download invocation
#[derive(Clone, Default, Debug)]
pub(crate) struct Execute;

impl Execute {
    /// Verify the bucket, then download either a whole prefix (directory destination) or a
    /// single object (file destination).
    pub(crate) async fn orchestrate(
        handle: Arc<crate::client::Handle>,
    ) -> Result<DownloadOutput, error::Error> {
        let config = &handle.config;
        tracing::info!("--- s3-download");
        tracing::info!(
            "bucket: {}, source: {}, destination: {}",
            config.bucket_name(),
            config.source(),
            config.destination()
        );

        if !bucket_exists(handle.s3_client(), config.bucket_name()).await? {
            return Err(error::bucket_not_found(config.bucket_name()));
        }

        let destination = config.destination_path();
        let output = if key::is_directory(config.destination()) {
            fs::create_dir_all(destination).await?;
            DownloadObjects::orchestrate(handle.clone(), config.source(), destination).await?
        } else {
            if config.source().is_empty() {
                return Err(error::invalid_input(format!(
                    "a source key is required to download to the file {}",
                    config.destination()
                )));
            }

            let entry = download_object(
                handle.s3_client(),
                config.bucket_name(),
                config.source(),
                destination,
            )
            .await?;
            DownloadOutput::builder().entry(entry).build()
        };

        tracing::info!(
            "Successfully downloaded all files ({} objects, {} directories, {} bytes)",
            output.objects_downloaded(),
            output.directories_created(),
            output.total_bytes_transferred()
        );
        Ok(output)
    }
}
