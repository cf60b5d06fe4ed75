/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::operation::download::DownloadedEntry;

/// Summary of a completed download invocation
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadOutput {
    /// The number of objects written to local files
    pub objects_downloaded: u64,

    /// The number of directory placeholder keys materialized as local directories
    pub directories_created: u64,

    /// Total number of bytes written
    pub total_bytes_transferred: u64,
}

impl DownloadOutput {
    /// Creates a new builder-style object to manufacture [`DownloadOutput`](crate::operation::download_objects::DownloadOutput).
    pub fn builder() -> DownloadOutputBuilder {
        DownloadOutputBuilder::default()
    }

    /// The number of objects written to local files
    pub fn objects_downloaded(&self) -> u64 {
        self.objects_downloaded
    }

    /// The number of directory placeholder keys materialized as local directories
    pub fn directories_created(&self) -> u64 {
        self.directories_created
    }

    /// The number of bytes successfully transferred (downloaded)
    pub fn total_bytes_transferred(&self) -> u64 {
        self.total_bytes_transferred
    }
}

/// A builder for [`DownloadOutput`](crate::operation::download_objects::DownloadOutput).
#[non_exhaustive]
#[derive(Debug, Default)]
pub struct DownloadOutputBuilder {
    pub(crate) objects_downloaded: u64,
    pub(crate) directories_created: u64,
    pub(crate) total_bytes_transferred: u64,
}

impl DownloadOutputBuilder {
    /// Account for a single downloaded entry
    pub fn entry(mut self, entry: DownloadedEntry) -> Self {
        self.record(entry);
        self
    }

    pub(crate) fn record(&mut self, entry: DownloadedEntry) {
        match entry {
            DownloadedEntry::Directory => self.directories_created += 1,
            DownloadedEntry::File { bytes } => {
                self.objects_downloaded += 1;
                self.total_bytes_transferred += bytes;
            }
        }
    }

    /// The number of objects that were successfully downloaded
    pub fn get_objects_downloaded(&self) -> u64 {
        self.objects_downloaded
    }

    /// The number of bytes successfully transferred (downloaded)
    pub fn get_total_bytes_transferred(&self) -> u64 {
        self.total_bytes_transferred
    }

    /// Consume the builder and return the output
    pub fn build(self) -> DownloadOutput {
        DownloadOutput {
            objects_downloaded: self.objects_downloaded,
            directories_created: self.directories_created,
            total_bytes_transferred: self.total_bytes_transferred,
        }
    }
}
