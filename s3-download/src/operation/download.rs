/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_smithy_types::byte_stream::ByteStream;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error;
use crate::key;

/// What a single key download produced locally
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadedEntry {
    /// A directory placeholder key was materialized as a local directory
    Directory,

    /// An object was written to a local file
    File {
        /// Size of the object body in bytes
        bytes: u64,
    },
}

/// Download `key` to `root_dir` joined with the key.
pub(crate) async fn download_key(
    client: &aws_sdk_s3::Client,
    bucket: &str,
    root_dir: &Path,
    key: &str,
) -> Result<DownloadedEntry, error::Error> {
    let target = key::local_key_path(root_dir, key)?;
    download_object(client, bucket, key, &target).await
}

/// Download `key` to exactly `target`.
///
/// A directory shaped key only creates `target` (and its ancestors), no request is sent.
/// Otherwise the object body is streamed to a temporary file next to `target` which then
/// replaces `target`. On failure the temporary file is removed and an existing `target`
/// is left untouched.
pub(crate) async fn download_object(
    client: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
    target: &Path,
) -> Result<DownloadedEntry, error::Error> {
    if key::is_directory(key) {
        tracing::debug!("creating directory {} for key {key:?}", target.display());
        fs::create_dir_all(target).await?;
        return Ok(DownloadedEntry::Directory);
    }

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }

    tracing::debug!("downloading key {key:?} to {}", target.display());
    let output = client.get_object().bucket(bucket).key(key).send().await?;
    let bytes = write_body(output.body, target).await?;
    tracing::debug!("finished downloading key {key:?} ({bytes} bytes)");

    Ok(DownloadedEntry::File { bytes })
}

async fn write_body(mut body: ByteStream, target: &Path) -> Result<u64, error::Error> {
    let part_path = part_path(target)?;

    let result = match copy_body(&mut body, &part_path).await {
        Ok(written) => fs::rename(&part_path, target)
            .await
            .map(|_| written)
            .map_err(error::Error::from),
        Err(err) => Err(err),
    };

    if result.is_err() {
        if let Err(err) = fs::remove_file(&part_path).await {
            tracing::debug!(
                "unable to remove partial download {}: {err}",
                part_path.display()
            );
        }
    }

    result
}

async fn copy_body(body: &mut ByteStream, path: &Path) -> Result<u64, error::Error> {
    let mut dest = fs::File::create(path).await?;
    let mut written: u64 = 0;

    while let Some(chunk) = body.try_next().await? {
        tracing::trace!("recv'd chunk size={}", chunk.len());
        dest.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }

    dest.flush().await?;
    Ok(written)
}

/// Hidden sibling of `target` the body is streamed into before being renamed over `target`
fn part_path(target: &Path) -> Result<PathBuf, error::Error> {
    let file_name = target.file_name().ok_or_else(|| {
        error::invalid_input(format!(
            "destination {} does not name a file",
            target.display()
        ))
    })?;

    let part_name = format!(
        ".{}.{:08x}.part",
        file_name.to_string_lossy(),
        fastrand::u32(..)
    );
    Ok(target.with_file_name(part_name))
}
