/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::error::{self, ErrorKind};

/// Check whether `bucket` exists with a `HeadBucket` request.
///
/// A `403 Forbidden` response still proves the bucket exists; the caller may simply lack
/// permission to list it. Only a `404` means the bucket is absent.
pub(crate) async fn bucket_exists(
    client: &aws_sdk_s3::Client,
    bucket: &str,
) -> Result<bool, error::Error> {
    let err = match client.head_bucket().bucket(bucket).send().await {
        Ok(_) => return Ok(true),
        Err(err) => err,
    };

    if err
        .as_service_error()
        .map(|e| e.is_not_found())
        .unwrap_or(false)
    {
        return Ok(false);
    }

    match err.raw_response().map(|resp| resp.status().as_u16()) {
        Some(404) => Ok(false),
        Some(403) => {
            tracing::debug!("access denied on bucket {bucket}, assuming it exists");
            Ok(true)
        }
        _ => Err(error::Error::new(ErrorKind::ServiceError, err)),
    }
}
