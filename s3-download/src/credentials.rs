/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_sdk_s3::config::{Credentials, SharedCredentialsProvider};

/// Name reported by the static credentials provider
const PROVIDER_NAME: &str = "s3-download";

/// Where credentials for an invocation are resolved from.
///
/// Any type implementing [`ProvideCredentials`](aws_sdk_s3::config::ProvideCredentials) can be
/// plugged in with [`Builder::credentials_provider`](crate::config::Builder::credentials_provider).
/// Otherwise an explicit access/secret key pair is used when both halves are present, and the
/// ambient chain when they are not.
#[derive(Debug, Clone)]
pub enum CredentialsSource {
    /// Caller supplied provider
    Custom(SharedCredentialsProvider),

    /// Explicit access/secret key pair
    Static {
        /// Access key id
        access_key: String,
        /// Secret access key
        secret_key: String,
    },

    /// The default provider chain, consulted in this order:
    ///
    /// 1. Environment variables (`AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`, `AWS_SESSION_TOKEN`)
    /// 2. Shared config and credentials files (`~/.aws/config`, `~/.aws/credentials`)
    /// 3. Web identity token
    /// 4. ECS container credentials
    /// 5. EC2 instance metadata
    Ambient,
}

impl CredentialsSource {
    pub(crate) fn resolve(
        provider: Option<SharedCredentialsProvider>,
        access_key: Option<&str>,
        secret_key: Option<&str>,
    ) -> CredentialsSource {
        if let Some(provider) = provider {
            return CredentialsSource::Custom(provider);
        }

        match (access_key, secret_key) {
            (Some(access_key), Some(secret_key)) => CredentialsSource::Static {
                access_key: access_key.to_owned(),
                secret_key: secret_key.to_owned(),
            },
            // a lone key is not usable on its own
            _ => CredentialsSource::Ambient,
        }
    }

    /// The provider to install on the client, `None` leaves the default chain in place.
    pub(crate) fn into_provider(self) -> Option<SharedCredentialsProvider> {
        match self {
            CredentialsSource::Custom(provider) => Some(provider),
            CredentialsSource::Static {
                access_key,
                secret_key,
            } => {
                let credentials = Credentials::new(access_key, secret_key, None, None, PROVIDER_NAME);
                Some(SharedCredentialsProvider::new(credentials))
            }
            CredentialsSource::Ambient => None,
        }
    }
}
