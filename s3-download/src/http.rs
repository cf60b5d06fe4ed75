/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */
use aws_smithy_runtime::client::http::hyper_014::HyperClientBuilder;
use aws_smithy_runtime_api::client::http::SharedHttpClient;
use hyper_014::client::HttpConnector;
use hyper_tls::HttpsConnector;
use native_tls::TlsConnector;

use crate::error;

/// An HTTP client that trusts self-signed certificates and does not verify hostnames.
///
/// Only used when TLS verification is explicitly disabled. Failing to build the TLS connector
/// (e.g. the platform TLS library is unavailable) is reported as invalid input.
pub(crate) fn insecure_client() -> Result<SharedHttpClient, error::Error> {
    let tls = TlsConnector::builder()
        .danger_accept_invalid_certs(true)
        .danger_accept_invalid_hostnames(true)
        .build()
        .map_err(|err| {
            error::invalid_input(format!("unable to skip ssl verification: {err}"))
        })?;

    let mut http = HttpConnector::new();
    http.enforce_http(false);
    let https = HttpsConnector::from((http, tls.into()));

    Ok(HyperClientBuilder::new().build(https))
}
