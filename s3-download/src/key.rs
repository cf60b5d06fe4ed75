/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use path_clean::PathClean;
use std::path::{Component, Path, PathBuf};

use crate::error;

/// Separator that marks a key (or destination) as a directory
pub const DIRECTORY_SEPARATOR: char = '/';

/// Returns true if `path` names a directory, that is, if it ends with a `/`.
///
/// This is a purely lexical check; the filesystem is never consulted.
///
/// # Examples
///
/// ```
/// use s3_download::key::is_directory;
///
/// assert!(is_directory("photos/2021/"));
/// assert!(!is_directory("photos/2021/1.png"));
/// ```
pub fn is_directory(path: &str) -> bool {
    path.ends_with(DIRECTORY_SEPARATOR)
}

/// Derive the local path for a given S3 key relative to `root_dir`
///
/// Separators inside the key become nested directories. A key that resolves outside of
/// `root_dir` (e.g. `../secret` or `/etc/passwd`) is rejected.
pub fn local_key_path(root_dir: &Path, key: &str) -> Result<PathBuf, error::Error> {
    let relative_path = Path::new(key).clean();
    validate_path(&relative_path, key)?;
    Ok(root_dir.join(relative_path).clean())
}

/// The cleaned key must stay relative and must not climb above the root it is joined to.
fn validate_path(relative_path: &Path, key: &str) -> Result<(), error::Error> {
    let escapes_root = matches!(
        relative_path.components().next(),
        Some(Component::ParentDir | Component::RootDir | Component::Prefix(_))
    );

    if escapes_root {
        return Err(error::invalid_input(format!(
            "Unable to download key: '{key}', it's relative path resolves outside the target destination directory"
        )));
    }

    Ok(())
}
