//! # Scripted Test Doubles
//!
//! Backend clients are traits, so tests drive the gateway with programmable
//! stand-ins instead of real services. Everything here follows one rule:
//! responses are queued up front, in the order they will be consumed, and a
//! call with nothing queued is a test failure.
//!
//! | Double | Stands in for |
//! |--------|---------------|
//! | [`ResponseQueue`] | any unary backend call |
//! | [`ScriptedPoller`] | a [`Poller`] returned by a begin-style call |
//! | [`ScriptedPager`] | a [`PageCursor`] returned by a list-style call |
//!
//! ```rust
//! use gateway_framework::lro::{LroWaiter, PollResponse};
//! use gateway_framework::mock::ScriptedPoller;
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut poller = ScriptedPoller::new(vec![
//!         PollResponse::InProgress,
//!         PollResponse::Succeeded("deleted"),
//!     ]);
//!     let polls = poller.polls();
//!
//!     let out = LroWaiter::new(Duration::ZERO)
//!         .wait(&CancellationToken::new(), &mut poller)
//!         .await;
//!
//!     assert_eq!(out, Ok("deleted"));
//!     assert_eq!(polls.get(), 2);
//! }
//! ```

use crate::error::BackendError;
use crate::lro::{PollResponse, Poller};
use crate::pager::PageCursor;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A shared call counter that outlives the double it was taken from.
#[derive(Debug, Clone, Default)]
pub struct CallCounter(Arc<AtomicUsize>);

impl CallCounter {
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn bump(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// An ordered queue of canned responses, one consumed per call.
///
/// Clones share the same queue, so a test can keep one handle for
/// assertions while the code under test owns another.
#[derive(Debug)]
pub struct ResponseQueue<R> {
    name: &'static str,
    responses: Arc<Mutex<VecDeque<R>>>,
    calls: CallCounter,
}

impl<R> Clone for ResponseQueue<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            responses: self.responses.clone(),
            calls: self.calls.clone(),
        }
    }
}

impl<R> ResponseQueue<R> {
    /// Creates an empty queue; `name` shows up in panic messages.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            responses: Arc::new(Mutex::new(VecDeque::new())),
            calls: CallCounter::default(),
        }
    }

    pub fn push(&self, response: R) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// Pops the next response.
    ///
    /// # Panics
    /// When nothing is queued: the code under test made a call the test did not expect.
    pub fn next(&self) -> R {
        self.calls.bump();
        let mut responses = self.responses.lock().unwrap();
        match responses.pop_front() {
            Some(response) => response,
            None => panic!("{}: unexpected call", self.name),
        }
    }

    /// Number of queued responses that were never consumed.
    pub fn remaining(&self) -> usize {
        self.responses.lock().unwrap().len()
    }

    /// Number of calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// # Panics
    /// When queued responses were left unconsumed.
    pub fn verify(&self) {
        let remaining = self.remaining();
        if remaining != 0 {
            panic!("{}: not all expectations were met. {} remaining", self.name, remaining);
        }
    }
}

/// A [`Poller`] that replays a fixed sequence of poll responses.
pub struct ScriptedPoller<T> {
    responses: VecDeque<PollResponse<T>>,
    polls: CallCounter,
}

impl<T> ScriptedPoller<T> {
    pub fn new(responses: Vec<PollResponse<T>>) -> Self {
        Self {
            responses: responses.into(),
            polls: CallCounter::default(),
        }
    }

    /// Handle to the number of polls made.
    pub fn polls(&self) -> CallCounter {
        self.polls.clone()
    }

    pub fn is_drained(&self) -> bool {
        self.responses.is_empty()
    }
}

#[async_trait]
impl<T: Send> Poller for ScriptedPoller<T> {
    type Output = T;

    async fn poll(&mut self) -> PollResponse<T> {
        self.polls.bump();
        match self.responses.pop_front() {
            Some(response) => response,
            None => panic!("ScriptedPoller: polled after the script ended"),
        }
    }
}

/// A [`PageCursor`] that replays a fixed sequence of pages or page errors.
///
/// It reports more pages for as long as anything is left in the script.
pub struct ScriptedPager<T> {
    pages: VecDeque<Result<Vec<T>, BackendError>>,
    fetches: CallCounter,
}

impl<T> ScriptedPager<T> {
    pub fn new(pages: Vec<Result<Vec<T>, BackendError>>) -> Self {
        Self {
            pages: pages.into(),
            fetches: CallCounter::default(),
        }
    }

    /// Handle to the number of page fetches made.
    pub fn fetches(&self) -> CallCounter {
        self.fetches.clone()
    }
}

#[async_trait]
impl<T: Send> PageCursor for ScriptedPager<T> {
    type Item = T;

    fn more(&self) -> bool {
        !self.pages.is_empty()
    }

    async fn next_page(&mut self) -> Result<Vec<T>, BackendError> {
        self.fetches.bump();
        match self.pages.pop_front() {
            Some(page) => page,
            None => panic!("ScriptedPager: fetched past the last page"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_queue_is_shared_between_clones() {
        let queue = ResponseQueue::<u32>::new("numbers");
        let handle = queue.clone();
        queue.push(1);
        queue.push(2);

        assert_eq!(handle.next(), 1);
        assert_eq!(queue.calls(), 1);
        assert_eq!(queue.remaining(), 1);
        assert_eq!(handle.next(), 2);
        queue.verify();
    }

    #[test]
    #[should_panic(expected = "numbers: unexpected call")]
    fn test_response_queue_panics_when_empty() {
        let queue = ResponseQueue::<u32>::new("numbers");
        queue.next();
    }

    #[test]
    #[should_panic(expected = "1 remaining")]
    fn test_verify_reports_leftovers() {
        let queue = ResponseQueue::<u32>::new("numbers");
        queue.push(1);
        queue.verify();
    }

    #[tokio::test]
    async fn test_scripted_pager_reports_more_until_empty() {
        let mut pager = ScriptedPager::new(vec![Ok(vec![1, 2]), Ok(vec![3])]);
        assert!(pager.more());
        assert_eq!(pager.next_page().await, Ok(vec![1, 2]));
        assert!(pager.more());
        assert_eq!(pager.next_page().await, Ok(vec![3]));
        assert!(!pager.more());
        assert_eq!(pager.fetches().get(), 2);
    }
}
