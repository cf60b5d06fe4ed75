/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::collections::VecDeque;

use aws_sdk_s3::{
    error::SdkError,
    operation::list_objects::{ListObjectsError, ListObjectsOutput},
};
use aws_smithy_runtime_api::http::Response;
use tracing::Instrument;

use crate::error;

/// Paginator for the `ListObjects` operation, driven by the `Marker` request parameter.
#[derive(Debug)]
struct ListObjectsPaginator {
    client: aws_sdk_s3::Client,
    bucket: String,
    prefix: String,
    state: Option<State>,
    pages: u64,
}

#[derive(Debug, PartialEq)]
enum State {
    Paginating {
        // marker to start the next page after
        marker: Option<String>,
    },
    Done,
}

impl State {
    fn next_state(self, output: &ListObjectsOutput) -> State {
        if !output.is_truncated().unwrap_or(false) {
            return State::Done;
        }

        // S3 only returns `NextMarker` when a delimiter is set, otherwise
        // the last key of the page is the marker for the next one
        let marker = output
            .next_marker()
            .or_else(|| output.contents().last().and_then(|obj| obj.key()))
            .map(str::to_owned);

        match marker {
            Some(marker) => State::Paginating {
                marker: Some(marker),
            },
            None => {
                tracing::warn!("listing truncated without a continuation marker, stopping");
                State::Done
            }
        }
    }
}

impl ListObjectsPaginator {
    fn new(client: aws_sdk_s3::Client, bucket: String, prefix: String) -> Self {
        Self {
            client,
            bucket,
            prefix,
            state: Some(State::Paginating { marker: None }),
            pages: 0,
        }
    }

    fn state(&self) -> &State {
        self.state.as_ref().expect("valid state")
    }

    async fn next_page(
        &mut self,
    ) -> Option<Result<ListObjectsOutput, SdkError<ListObjectsError, Response>>> {
        let marker = match self.state() {
            State::Done => return None,
            State::Paginating { marker } => marker.clone(),
        };

        self.pages += 1;
        let span = tracing::debug_span!("list-objects-page", page = self.pages);
        let list_result = self
            .client
            .list_objects()
            .bucket(&self.bucket)
            .prefix(&self.prefix)
            .set_marker(marker)
            .send()
            .instrument(span)
            .await;

        match list_result {
            Ok(output) => {
                let prev_state = self.state.take().expect("state set");
                let next_state = prev_state.next_state(&output);
                self.state.replace(next_state);
                Some(Ok(output))
            }
            Err(err) => {
                // a failed page ends the listing, there is no retry
                self.state.replace(State::Done);
                Some(Err(err))
            }
        }
    }
}

/// Lazy, single pass sequence of every key under a prefix.
///
/// Keys are yielded in the order the service returns them. The next page is only requested
/// once every key of the current page has been consumed.
#[derive(Debug)]
pub struct ListObjectsStream {
    paginator: ListObjectsPaginator,
    current_page: VecDeque<String>,
}

impl ListObjectsStream {
    pub(crate) fn new(
        client: aws_sdk_s3::Client,
        bucket: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            paginator: ListObjectsPaginator::new(client, bucket.into(), prefix.into()),
            current_page: VecDeque::new(),
        }
    }

    /// Get the next key, fetching the next page if required.
    ///
    /// Returns `None` once the final page has been drained. An error ends the stream.
    pub async fn next(&mut self) -> Option<Result<String, error::Error>> {
        loop {
            if let Some(key) = self.current_page.pop_front() {
                return Some(Ok(key));
            }

            match self.paginator.next_page().await? {
                Ok(output) => {
                    self.current_page = output
                        .contents()
                        .iter()
                        .filter_map(|obj| obj.key().map(str::to_owned))
                        .collect();
                    tracing::debug!(
                        "listed {} keys on page {}",
                        self.current_page.len(),
                        self.paginator.pages
                    );
                }
                Err(err) => return Some(Err(err.into())),
            }
        }
    }

    /// Number of listing requests issued so far
    pub fn pages_fetched(&self) -> u64 {
        self.paginator.pages
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use aws_sdk_s3::{operation::list_objects::ListObjectsOutput, types::Object};
    use aws_smithy_mocks_experimental::{mock, mock_client, RuleMode};
    use aws_smithy_runtime_api::client::orchestrator::HttpResponse;
    use aws_smithy_runtime_api::http::StatusCode;
    use bytes::Bytes;

    use super::{ListObjectsStream, State};
    use crate::error::ErrorKind;

    fn list_resp(
        is_truncated: bool,
        next_marker: Option<&'static str>,
        keys: Vec<&'static str>,
    ) -> ListObjectsOutput {
        let contents = keys.iter().map(|k| Object::builder().key(*k).build()).collect();
        ListObjectsOutput::builder()
            .is_truncated(is_truncated)
            .set_next_marker(next_marker.map(str::to_owned))
            .set_contents(Some(contents))
            .build()
    }

    #[test]
    fn test_next_state() {
        let start = State::Paginating { marker: None };

        let state2 = start.next_state(&list_resp(true, Some("M"), vec!["k1", "k2"]));
        assert_eq!(
            state2,
            State::Paginating {
                marker: Some("M".to_owned())
            }
        );

        let state3 = state2.next_state(&list_resp(false, None, vec!["k3"]));
        assert_eq!(state3, State::Done);
    }

    #[test]
    fn test_next_state_falls_back_to_last_key() {
        let start = State::Paginating { marker: None };
        let next = start.next_state(&list_resp(true, None, vec!["a/1.txt", "a/2.txt"]));
        assert_eq!(
            next,
            State::Paginating {
                marker: Some("a/2.txt".to_owned())
            }
        );
    }

    #[test]
    fn test_next_state_truncated_without_marker() {
        let start = State::Paginating { marker: None };
        let next = start.next_state(&list_resp(true, None, vec![]));
        assert_eq!(next, State::Done);
    }

    #[test]
    fn test_missing_truncation_flag_is_last_page() {
        let start = State::Paginating { marker: None };
        let output = ListObjectsOutput::builder()
            .contents(Object::builder().key("k1").build())
            .build();
        assert_eq!(start.next_state(&output), State::Done);
    }

    #[tokio::test]
    async fn test_two_pages_follow_marker() {
        let first_calls = Arc::new(AtomicUsize::new(0));
        let second_calls = Arc::new(AtomicUsize::new(0));

        let counter = first_calls.clone();
        let page1 = mock!(aws_sdk_s3::Client::list_objects)
            .match_requests(|r| r.marker().is_none() && r.prefix() == Some("a/"))
            .then_output(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                list_resp(true, Some("M"), vec!["a/1.txt", "a/2.txt"])
            });

        let counter = second_calls.clone();
        let page2 = mock!(aws_sdk_s3::Client::list_objects)
            .match_requests(|r| r.marker() == Some("M"))
            .then_output(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                list_resp(false, None, vec!["a/3.txt"])
            });

        let client = mock_client!(aws_sdk_s3, RuleMode::MatchAny, &[&page1, &page2]);
        let mut stream = ListObjectsStream::new(client, "test-bucket", "a/");

        let mut keys = Vec::new();
        while let Some(key) = stream.next().await {
            keys.push(key.unwrap());
        }

        assert_eq!(vec!["a/1.txt", "a/2.txt", "a/3.txt"], keys);
        assert_eq!(2, stream.pages_fetched());
        assert_eq!(1, first_calls.load(Ordering::SeqCst));
        assert_eq!(1, second_calls.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_empty_prefix_lists_whole_bucket() {
        let rule = mock!(aws_sdk_s3::Client::list_objects)
            .match_requests(|r| r.bucket() == Some("test-bucket") && r.prefix() == Some(""))
            .then_output(|| list_resp(false, None, vec!["x", "y/z"]));

        let client = mock_client!(aws_sdk_s3, RuleMode::MatchAny, &[&rule]);
        let mut stream = ListObjectsStream::new(client, "test-bucket", "");

        let mut keys = Vec::new();
        while let Some(key) = stream.next().await {
            keys.push(key.unwrap());
        }
        assert_eq!(vec!["x", "y/z"], keys);
        assert_eq!(1, stream.pages_fetched());
    }

    #[tokio::test]
    async fn test_failed_page_ends_stream() {
        let page1 = mock!(aws_sdk_s3::Client::list_objects)
            .match_requests(|r| r.marker().is_none())
            .then_output(|| list_resp(true, Some("M"), vec!["a/1.txt"]));

        let failed_calls = Arc::new(AtomicUsize::new(0));
        let counter = failed_calls.clone();
        let page2 = mock!(aws_sdk_s3::Client::list_objects)
            .match_requests(|r| r.marker() == Some("M"))
            .then_http_response(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                HttpResponse::new(StatusCode::try_from(403).unwrap(), Bytes::new().into())
            });

        let client = mock_client!(aws_sdk_s3, RuleMode::MatchAny, &[&page1, &page2]);
        let mut stream = ListObjectsStream::new(client, "test-bucket", "a/");

        assert_eq!("a/1.txt", stream.next().await.unwrap().unwrap());

        let err = stream.next().await.unwrap().unwrap_err();
        assert_eq!(&ErrorKind::ServiceError, err.kind());

        // no retry and no further pages once a page failed
        assert!(stream.next().await.is_none());
        assert_eq!(2, stream.pages_fetched());
        assert_eq!(1, failed_calls.load(Ordering::SeqCst));
    }
}
