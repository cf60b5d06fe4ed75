/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_config::meta::region::RegionProviderChain;
use aws_config::BehaviorVersion;
use aws_types::region::Region;
use aws_types::SdkConfig;

use crate::credentials::CredentialsSource;
use crate::{error, http, Config};

/// Region used when none is configured and none can be found in the environment
const DEFAULT_REGION: &str = "us-east-1";

/// Build the S3 client described by `config`.
///
/// * Credentials come from [`Config::credentials_source`].
/// * With an endpoint, requests are sent there and signed for the configured signing region.
///   Without one, the provider's default endpoint resolution applies.
/// * Path-style addressing is always enabled.
///
/// No network request is made here.
pub(crate) async fn load(config: &Config) -> Result<aws_sdk_s3::Client, error::Error> {
    let signing_region = config
        .endpoint()
        .and(config.signing_region())
        .map(|region| Region::new(region.to_owned()));
    let region = RegionProviderChain::first_try(signing_region)
        .or_default_provider()
        .or_else(Region::from_static(DEFAULT_REGION));

    let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region);

    let credentials = config.credentials_source();
    if matches!(credentials, CredentialsSource::Ambient)
        && (config.access_key().is_some() || config.secret_key().is_some())
    {
        tracing::warn!(
            "only one of access key and secret key was given, falling back to the default credentials chain"
        );
    }

    if let Some(provider) = credentials.into_provider() {
        loader = loader.credentials_provider(provider);
    }

    if config.skip_ssl_verification() {
        tracing::warn!("TLS certificate and hostname verification is disabled");
        loader = loader.http_client(http::insecure_client()?);
    }

    if let Some(endpoint) = config.endpoint() {
        tracing::debug!("using endpoint override {endpoint}");
        loader = loader.endpoint_url(endpoint);
    }

    let sdk_config = loader.load().await;
    Ok(s3_client(&sdk_config))
}

fn s3_client(sdk_config: &SdkConfig) -> aws_sdk_s3::Client {
    let s3_config = aws_sdk_s3::config::Builder::from(sdk_config)
        .force_path_style(true)
        .build();
    aws_sdk_s3::Client::from_conf(s3_config)
}

#[cfg(test)]
mod tests {
    use super::load;
    use crate::Config;
    use std::io;
    use std::sync::{Arc, Mutex};

    /// Log sink shared between the subscriber and the test
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_endpoint_uses_signing_region() {
        let config = Config::builder()
            .bucket_name("b")
            .destination("/tmp/out/")
            .access_key("ak")
            .secret_key("sk")
            .endpoint("https://minio.internal:9000")
            .signing_region("eu-west-3")
            .build()
            .unwrap();

        let client = load(&config).await.unwrap();
        let region = client.config().region().map(|r| r.as_ref().to_owned());
        assert_eq!(Some("eu-west-3".to_owned()), region);
    }

    #[tokio::test]
    async fn test_skip_ssl_verification() {
        let config = Config::builder()
            .bucket_name("b")
            .destination("/tmp/out/")
            .access_key("ak")
            .secret_key("sk")
            .endpoint("https://localhost:9000")
            .signing_region("us-west-1")
            .skip_ssl_verification(true)
            .build()
            .unwrap();

        load(&config).await.expect("client with relaxed TLS");
    }

    #[tokio::test]
    async fn test_lone_key_warns_once_on_load() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let config = Config::builder()
            .bucket_name("b")
            .destination("/tmp/out/")
            .access_key("ak")
            .endpoint("http://localhost:9000")
            .signing_region("us-east-1")
            .build()
            .unwrap();

        // reading the configuration has no logging side effect
        config.credentials_source();
        config.credentials_source();
        assert!(logs.contents().is_empty(), "{}", logs.contents());

        load(&config).await.unwrap();
        let warning = "only one of access key and secret key was given";
        assert_eq!(1, logs.contents().matches(warning).count(), "{}", logs.contents());
    }
}
