/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Bucket existence check
pub(crate) mod bucket;

/// Types for paginated key listing
pub mod list_objects;

/// Types for single key download
pub mod download;

/// Types for downloading every key under a prefix
pub mod download_objects;

/// Full invocation: bucket check followed by a prefix or single object download
pub(crate) mod execute;
