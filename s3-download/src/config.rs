/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_sdk_s3::config::SharedCredentialsProvider;
use aws_smithy_types::error::operation::BuildError;
use std::fmt;
use std::path::Path;

use crate::credentials::CredentialsSource;

/// Constructs the S3 client for a [`Config`]
pub mod loader;

/// Configuration for a single download invocation
///
/// A `Config` is immutable once built. Use [`Config::builder`] to construct one.
#[derive(Clone)]
pub struct Config {
    bucket_name: String,
    source: String,
    destination: String,
    access_key: Option<String>,
    secret_key: Option<String>,
    credentials_provider: Option<SharedCredentialsProvider>,
    endpoint: Option<String>,
    signing_region: Option<String>,
    skip_ssl_verification: bool,
}

impl Config {
    /// Create a new `Config` builder
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// The bucket to download from
    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    /// The key or key prefix to download. An empty string selects the whole bucket.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The local destination, treated as a directory only if it ends with a `/`
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// The local destination as a path
    pub fn destination_path(&self) -> &Path {
        Path::new(&self.destination)
    }

    /// Explicit access key, if one was given
    pub fn access_key(&self) -> Option<&str> {
        self.access_key.as_deref()
    }

    /// Explicit secret key, if one was given
    pub fn secret_key(&self) -> Option<&str> {
        self.secret_key.as_deref()
    }

    /// Alternate service endpoint URL
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// Region used to sign requests. Only consulted when an [`endpoint`](Self::endpoint) is set.
    pub fn signing_region(&self) -> Option<&str> {
        self.signing_region.as_deref()
    }

    /// Whether TLS certificate and hostname verification is disabled
    pub fn skip_ssl_verification(&self) -> bool {
        self.skip_ssl_verification
    }

    /// Where credentials for this invocation come from
    pub fn credentials_source(&self) -> CredentialsSource {
        CredentialsSource::resolve(
            self.credentials_provider.clone(),
            self.access_key.as_deref(),
            self.secret_key.as_deref(),
        )
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut formatter = f.debug_struct("Config");
        formatter.field("bucket_name", &self.bucket_name);
        formatter.field("source", &self.source);
        formatter.field("destination", &self.destination);
        formatter.field("access_key", &self.access_key);
        formatter.field("secret_key", &self.secret_key.as_ref().map(|_| "** redacted **"));
        formatter.field("credentials_provider", &self.credentials_provider.is_some());
        formatter.field("endpoint", &self.endpoint);
        formatter.field("signing_region", &self.signing_region);
        formatter.field("skip_ssl_verification", &self.skip_ssl_verification);
        formatter.finish()
    }
}

/// Fluent style builder for [Config]
#[derive(Clone, Default)]
pub struct Builder {
    bucket_name: Option<String>,
    source: Option<String>,
    destination: Option<String>,
    access_key: Option<String>,
    secret_key: Option<String>,
    credentials_provider: Option<SharedCredentialsProvider>,
    endpoint: Option<String>,
    signing_region: Option<String>,
    skip_ssl_verification: bool,
}

impl Builder {
    /// Set the bucket to download from.
    ///
    /// NOTE: A bucket name is required.
    pub fn bucket_name(mut self, input: impl Into<String>) -> Self {
        self.bucket_name = Some(input.into());
        self
    }

    /// Set the bucket to download from.
    ///
    /// NOTE: A bucket name is required.
    pub fn set_bucket_name(mut self, input: Option<String>) -> Self {
        self.bucket_name = input;
        self
    }

    /// The bucket to download from.
    pub fn get_bucket_name(&self) -> &Option<String> {
        &self.bucket_name
    }

    /// Set the key or key prefix to download.
    ///
    /// Defaults to the empty string which selects every key in the bucket.
    pub fn source(mut self, input: impl Into<String>) -> Self {
        self.source = Some(input.into());
        self
    }

    /// Set the key or key prefix to download.
    pub fn set_source(mut self, input: Option<String>) -> Self {
        self.source = input;
        self
    }

    /// The key or key prefix to download.
    pub fn get_source(&self) -> &Option<String> {
        &self.source
    }

    /// Set the local destination.
    ///
    /// The destination is treated as a directory (and the source as a prefix) only if it ends
    /// with a `/`. Otherwise it names the single file the source object is written to.
    ///
    /// NOTE: A destination is required.
    pub fn destination(mut self, input: impl Into<String>) -> Self {
        self.destination = Some(input.into());
        self
    }

    /// Set the local destination.
    ///
    /// NOTE: A destination is required.
    pub fn set_destination(mut self, input: Option<String>) -> Self {
        self.destination = input;
        self
    }

    /// The local destination.
    pub fn get_destination(&self) -> &Option<String> {
        &self.destination
    }

    /// Set the access key.
    ///
    /// Used only when a secret key is also given, otherwise credentials are resolved from the
    /// environment.
    pub fn access_key(mut self, input: impl Into<String>) -> Self {
        self.access_key = Some(input.into());
        self
    }

    /// Set the access key.
    pub fn set_access_key(mut self, input: Option<String>) -> Self {
        self.access_key = input;
        self
    }

    /// The access key.
    pub fn get_access_key(&self) -> &Option<String> {
        &self.access_key
    }

    /// Set the secret key.
    ///
    /// Used only when an access key is also given, otherwise credentials are resolved from the
    /// environment.
    pub fn secret_key(mut self, input: impl Into<String>) -> Self {
        self.secret_key = Some(input.into());
        self
    }

    /// Set the secret key.
    pub fn set_secret_key(mut self, input: Option<String>) -> Self {
        self.secret_key = input;
        self
    }

    /// The secret key.
    pub fn get_secret_key(&self) -> &Option<String> {
        &self.secret_key
    }

    /// Set an explicit credentials provider. Takes precedence over the access and secret keys.
    pub fn credentials_provider(
        mut self,
        input: impl aws_sdk_s3::config::ProvideCredentials + 'static,
    ) -> Self {
        self.credentials_provider = Some(SharedCredentialsProvider::new(input));
        self
    }

    /// Set an explicit credentials provider.
    pub fn set_credentials_provider(mut self, input: Option<SharedCredentialsProvider>) -> Self {
        self.credentials_provider = input;
        self
    }

    /// The explicit credentials provider.
    pub fn get_credentials_provider(&self) -> &Option<SharedCredentialsProvider> {
        &self.credentials_provider
    }

    /// Override the service endpoint, e.g. for S3 compatible stores or specific regions.
    pub fn endpoint(mut self, input: impl Into<String>) -> Self {
        self.endpoint = Some(input.into());
        self
    }

    /// Override the service endpoint.
    pub fn set_endpoint(mut self, input: Option<String>) -> Self {
        self.endpoint = input;
        self
    }

    /// The service endpoint override.
    pub fn get_endpoint(&self) -> &Option<String> {
        &self.endpoint
    }

    /// Set the region to use for SigV4 signing of requests (e.g. `us-west-1`).
    ///
    /// Only used when an endpoint is set.
    pub fn signing_region(mut self, input: impl Into<String>) -> Self {
        self.signing_region = Some(input.into());
        self
    }

    /// Set the region to use for SigV4 signing of requests.
    pub fn set_signing_region(mut self, input: Option<String>) -> Self {
        self.signing_region = input;
        self
    }

    /// The signing region.
    pub fn get_signing_region(&self) -> &Option<String> {
        &self.signing_region
    }

    /// Skip TLS certificate and hostname verification of the endpoint.
    ///
    /// Default is `false`.
    pub fn skip_ssl_verification(mut self, input: bool) -> Self {
        self.skip_ssl_verification = input;
        self
    }

    /// Whether TLS verification is skipped.
    pub fn get_skip_ssl_verification(&self) -> bool {
        self.skip_ssl_verification
    }

    /// Consumes the builder and constructs a [`Config`](crate::config::Config)
    pub fn build(self) -> Result<Config, BuildError> {
        let bucket_name = non_empty(self.bucket_name)
            .ok_or_else(|| BuildError::missing_field("bucket_name", "A bucket name is required"))?;

        let destination = non_empty(self.destination)
            .ok_or_else(|| BuildError::missing_field("destination", "A destination is required"))?;

        Ok(Config {
            bucket_name,
            source: self.source.unwrap_or_default(),
            destination,
            access_key: self.access_key,
            secret_key: self.secret_key,
            credentials_provider: self.credentials_provider,
            endpoint: non_empty(self.endpoint),
            signing_region: non_empty(self.signing_region),
            skip_ssl_verification: self.skip_ssl_verification,
        })
    }
}

impl fmt::Debug for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut formatter = f.debug_struct("Builder");
        formatter.field("bucket_name", &self.bucket_name);
        formatter.field("source", &self.source);
        formatter.field("destination", &self.destination);
        formatter.field("access_key", &self.access_key);
        formatter.field("secret_key", &self.secret_key.as_ref().map(|_| "** redacted **"));
        formatter.field("credentials_provider", &self.credentials_provider.is_some());
        formatter.field("endpoint", &self.endpoint);
        formatter.field("signing_region", &self.signing_region);
        formatter.field("skip_ssl_verification", &self.skip_ssl_verification);
        formatter.finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn test_no_bucket_error() {
        let err = Config::builder()
            .destination("/tmp/out/")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("A bucket name is required"));
    }

    #[test]
    fn test_empty_bucket_error() {
        let err = Config::builder()
            .bucket_name("")
            .destination("/tmp/out/")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("A bucket name is required"));
    }

    #[test]
    fn test_no_destination_error() {
        let err = Config::builder().bucket_name("b").build().unwrap_err();
        assert!(err.to_string().contains("A destination is required"));
    }

    #[test]
    fn test_source_defaults_to_whole_bucket() {
        let config = Config::builder()
            .bucket_name("b")
            .destination("/tmp/out/")
            .build()
            .unwrap();
        assert_eq!("", config.source());
        assert!(!config.skip_ssl_verification());
    }

    #[test]
    fn test_empty_endpoint_and_region_are_absent() {
        let config = Config::builder()
            .bucket_name("b")
            .destination("/tmp/out/")
            .endpoint("")
            .signing_region("")
            .build()
            .unwrap();
        assert_eq!(None, config.endpoint());
        assert_eq!(None, config.signing_region());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = Config::builder()
            .bucket_name("b")
            .destination("/tmp/out/")
            .access_key("AKIDEXAMPLE")
            .secret_key("super-secret-value")
            .build()
            .unwrap();
        let debug = format!("{config:?}");
        assert!(debug.contains("AKIDEXAMPLE"));
        assert!(!debug.contains("super-secret-value"));
    }
}
