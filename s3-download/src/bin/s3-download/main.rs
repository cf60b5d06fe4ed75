/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */
use std::process::ExitCode;

use aws_sdk_s3::error::DisplayErrorContext;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod args;

use args::{Args, LogLevel};

fn init_logging(level: LogLevel) {
    let level: tracing::Level = level.into();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.log_level);

    let config = match args.into_config() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("invalid configuration: {}", DisplayErrorContext(&err));
            return ExitCode::FAILURE;
        }
    };

    let result = match s3_download::Client::from_conf(config).await {
        Ok(client) => client.execute().await,
        Err(err) => Err(err),
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("download failed: {}", DisplayErrorContext(&err));
            ExitCode::FAILURE
        }
    }
}
