use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::Stream;

use super::Shared;
use crate::sample::Sample;

/// Asynchronous consumer handle, made with [`Reader::into_async`][super::Reader::into_async].
///
/// The producer wakes parked tasks on every push, so `next` resolves as
/// soon as a sample is available.
///
/// # Examples
///
/// ```rust
/// # tokio_test::block_on(async {
/// use simtemp::device::Device;
///
/// let device = Device::new().unwrap();
/// let mut samples = device.open().into_async();
///
/// let sample = samples.next().await.unwrap();
/// assert!(sample.temp_mc >= -50_000);
/// # });
/// ```
pub struct AsyncReader {
    shared: Arc<Shared>,
}

impl AsyncReader {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        Self { shared }
    }

    /// Resolves to the next sample, or `None` once the device has shut
    /// down and the ring is drained.
    pub async fn next(&mut self) -> Option<Sample> {
        Next(self).await
    }

    fn poll_sample(&self, cx: &mut Context<'_>) -> Poll<Option<Sample>> {
        // Register before checking the ring, so a push landing right
        // after an empty pop still wakes this task.
        self.shared.register_waker(cx.waker());

        if let Some(sample) = self.shared.rb().pop() {
            return Poll::Ready(Some(sample));
        }
        if !self.shared.is_running() {
            return Poll::Ready(None);
        }
        Poll::Pending
    }
}

struct Next<'a>(&'a AsyncReader);

impl Future for Next<'_> {
    type Output = Option<Sample>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.0.poll_sample(cx)
    }
}

impl Stream for AsyncReader {
    type Item = Sample;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.poll_sample(cx)
    }
}
