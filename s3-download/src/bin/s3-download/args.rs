/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_smithy_types::error::operation::BuildError;
use s3_download::Config;

#[derive(Debug, Clone, clap::Parser)]
#[command(name = "s3-download")]
#[command(
    about = "Downloads a single object or every object under a prefix from an S3 bucket.",
    long_about = "Downloads a single object or every object under a prefix from an S3 bucket.\n\n\
        A destination ending in '/' is treated as a directory and receives every key under \
        the source prefix. Any other destination is a file and the source must name a single \
        object."
)]
pub(crate) struct Args {
    /// Access key id, the ambient credential chain is used when omitted
    #[arg(long, env = "S3_DOWNLOAD_ACCESS_KEY")]
    access_key: Option<String>,

    /// Secret access key
    #[arg(long, env = "S3_DOWNLOAD_SECRET_KEY", hide_env_values = true)]
    secret_key: Option<String>,

    /// Bucket to download from
    #[arg(short, long, env = "S3_DOWNLOAD_BUCKET_NAME")]
    bucket_name: String,

    /// Key (file destination) or key prefix (directory destination)
    #[arg(short, long, env = "S3_DOWNLOAD_SOURCE", default_value = "")]
    source: String,

    /// Local file, or directory when it ends with '/'
    #[arg(short, long, env = "S3_DOWNLOAD_DESTINATION")]
    destination: String,

    /// Endpoint of an S3 compatible store
    #[arg(long, env = "S3_DOWNLOAD_ENDPOINT")]
    endpoint: Option<String>,

    /// Region requests to the custom endpoint are signed for
    #[arg(long, env = "S3_DOWNLOAD_SIGNING_REGION")]
    signing_region: Option<String>,

    /// Accept invalid TLS certificates and hostnames
    #[arg(long, env = "S3_DOWNLOAD_SKIP_SSL_VERIFICATION", default_value_t = false)]
    skip_ssl_verification: bool,

    /// Log level, ignored when RUST_LOG is set
    #[arg(long, value_enum, default_value = "info")]
    pub(crate) log_level: LogLevel,
}

impl Args {
    pub(crate) fn into_config(self) -> Result<Config, BuildError> {
        Config::builder()
            .set_access_key(self.access_key)
            .set_secret_key(self.secret_key)
            .bucket_name(self.bucket_name)
            .source(self.source)
            .destination(self.destination)
            .set_endpoint(self.endpoint)
            .set_signing_region(self.signing_region)
            .skip_ssl_verification(self.skip_ssl_verification)
            .build()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Args, LogLevel};
    use clap::Parser;

    #[test]
    fn test_parse_directory_download() {
        let args = Args::try_parse_from([
            "s3-download",
            "-b",
            "artifacts",
            "-s",
            "builds/42/",
            "-d",
            "out/",
            "--endpoint",
            "http://localhost:9000",
            "--signing-region",
            "eu-west-1",
            "--skip-ssl-verification",
        ])
        .unwrap();
        assert_eq!(LogLevel::Info, args.log_level);

        let config = args.into_config().unwrap();
        assert_eq!("artifacts", config.bucket_name());
        assert_eq!("builds/42/", config.source());
        assert_eq!("out/", config.destination());
        assert_eq!(Some("http://localhost:9000"), config.endpoint());
        assert_eq!(Some("eu-west-1"), config.signing_region());
        assert!(config.skip_ssl_verification());
    }

    #[test]
    fn test_source_defaults_to_whole_bucket() {
        let args = Args::try_parse_from([
            "s3-download",
            "--bucket-name",
            "artifacts",
            "--destination",
            "out/",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(LogLevel::Debug, args.log_level);
        assert_eq!("", args.into_config().unwrap().source());
    }

    #[test]
    fn test_bucket_name_required() {
        let err = Args::try_parse_from(["s3-download", "-d", "out/"]);
        assert!(err.is_err());
    }
}
