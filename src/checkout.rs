//! Submission of a completed form to the checkout service.
//!
//! [`CheckoutFeature`] owns the form for a checkout session. When asked to
//! verify the card it builds a [`VerificationRequest`] (skipping silently
//! if the form is not valid), calls the [`CheckoutService`], and posts
//! exactly one [`CheckoutEvent`] describing the outcome. Service errors
//! are logged and reported as [`CheckoutEvent::UnknownError`], without
//! detail.
//!
//! Events are buffered until consumed, so an outcome posted while no one
//! is listening is delivered to the next reader.

use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use futures::FutureExt;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::error::CheckoutError;
use crate::form::PaymentCardForm;
use crate::mask::mask_number;
use crate::request::{VerificationRequest, VerificationUrl};

/// The remote endpoint that starts card verification.
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Submits card details and returns the verification page URL.
    async fn request_verification(
        &self,
        request: &VerificationRequest,
    ) -> Result<VerificationUrl, CheckoutError>;
}

#[async_trait]
impl<T: CheckoutService + ?Sized> CheckoutService for Arc<T> {
    async fn request_verification(
        &self,
        request: &VerificationRequest,
    ) -> Result<VerificationUrl, CheckoutError> {
        (**self).request_verification(request).await
    }
}

/// Outcome of a verification request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutEvent {
    /// The user should be sent to `url` to confirm the payment.
    VerificationReady {
        /// Verification page URL.
        url: String,
    },
    /// The request failed. No further detail is exposed.
    UnknownError,
}

/// Form state plus submission for one checkout session.
pub struct CheckoutFeature<S> {
    service: S,
    form: Mutex<PaymentCardForm>,
    in_flight: AtomicUsize,
    loading: watch::Sender<bool>,
    events_tx: mpsc::UnboundedSender<CheckoutEvent>,
    events_rx: tokio::sync::Mutex<mpsc::UnboundedReceiver<CheckoutEvent>>,
}

impl<S: CheckoutService> CheckoutFeature<S> {
    /// Creates a feature with an empty form.
    pub fn new(service: S) -> Self {
        Self::with_form(service, PaymentCardForm::new())
    }

    /// Creates a feature around an existing form.
    pub fn with_form(service: S, form: PaymentCardForm) -> Self {
        let (loading, _) = watch::channel(false);
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            service,
            form: Mutex::new(form),
            in_flight: AtomicUsize::new(0),
            loading,
            events_tx,
            events_rx: tokio::sync::Mutex::new(events_rx),
        }
    }

    /// Locks the form for reading or input.
    ///
    /// Do not hold the guard across an await point.
    pub fn form(&self) -> MutexGuard<'_, PaymentCardForm> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// True while a verification request is in flight.
    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    /// Watches the loading flag.
    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    /// Waits for the next outcome event.
    ///
    /// Only one caller drains events at a time; concurrent callers queue up.
    pub async fn next_event(&self) -> Option<CheckoutEvent> {
        self.events_rx.lock().await.recv().await
    }

    /// Takes the next outcome event if one is already buffered.
    pub fn try_next_event(&self) -> Option<CheckoutEvent> {
        self.events_rx.try_lock().ok()?.try_recv().ok()
    }

    /// Requests verification of the card in the form.
    ///
    /// Does nothing if the form is invalid. Otherwise sends one request,
    /// keeps [`is_loading`](Self::is_loading) true while it runs, and posts
    /// one event once it finishes. The loading flag is cleared before the
    /// event is posted, whether the call succeeded, failed or panicked.
    pub async fn request_verification(&self, success_url: &str, failure_url: &str) {
        let request = {
            let form = self.form();
            form.to_request(success_url, failure_url)
        };
        let Some(request) = request else {
            debug!("verification skipped: form incomplete or invalid");
            return;
        };

        info!(number = %mask_number(&request.number), "requesting card verification");

        let outcome = {
            let _loading = LoadingGuard::start(&self.in_flight, &self.loading);
            AssertUnwindSafe(self.service.request_verification(&request))
                .catch_unwind()
                .await
        };

        let event = match outcome {
            Ok(Ok(verification)) => {
                info!("verification ready");
                CheckoutEvent::VerificationReady {
                    url: verification.url,
                }
            }
            Ok(Err(error)) => {
                warn!(%error, "verification request failed");
                CheckoutEvent::UnknownError
            }
            Err(_) => {
                warn!("checkout service panicked");
                CheckoutEvent::UnknownError
            }
        };

        // The receiver lives in self, so the send cannot fail
        let _ = self.events_tx.send(event);
    }
}

/// Marks a request in flight for as long as it lives.
struct LoadingGuard<'a> {
    in_flight: &'a AtomicUsize,
    loading: &'a watch::Sender<bool>,
}

impl<'a> LoadingGuard<'a> {
    fn start(in_flight: &'a AtomicUsize, loading: &'a watch::Sender<bool>) -> Self {
        in_flight.fetch_add(1, Ordering::SeqCst);
        loading.send_replace(true);
        Self { in_flight, loading }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if self.in_flight.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.loading.send_replace(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expiry::{FixedClock, YearMonth};

    struct FixedUrl;

    #[async_trait]
    impl CheckoutService for FixedUrl {
        async fn request_verification(
            &self,
            _request: &VerificationRequest,
        ) -> Result<VerificationUrl, CheckoutError> {
            Ok(VerificationUrl { url: "X".into() })
        }
    }

    fn form(valid: bool) -> PaymentCardForm {
        let mut form =
            PaymentCardForm::with_clock(Arc::new(FixedClock(YearMonth::new(22, 9).unwrap())));
        form.set_number("4242424242424242");
        form.set_expiry("0930");
        if valid {
            form.set_cvv("123");
        }
        form
    }

    #[tokio::test]
    async fn test_event_buffered_until_read() {
        let feature = CheckoutFeature::with_form(FixedUrl, form(true));
        feature.request_verification("s", "f").await;
        assert!(!feature.is_loading());
        assert_eq!(
            feature.next_event().await,
            Some(CheckoutEvent::VerificationReady { url: "X".into() })
        );
        assert_eq!(feature.try_next_event(), None);
    }

    #[tokio::test]
    async fn test_invalid_form_posts_nothing() {
        let feature = CheckoutFeature::with_form(FixedUrl, form(false));
        feature.request_verification("s", "f").await;
        assert_eq!(feature.try_next_event(), None);
        assert!(!feature.is_loading());
    }

    #[test]
    fn test_loading_guard_counts_overlapping_requests() {
        let (loading, _) = watch::channel(false);
        let in_flight = AtomicUsize::new(0);

        let first = LoadingGuard::start(&in_flight, &loading);
        let second = LoadingGuard::start(&in_flight, &loading);
        assert!(*loading.borrow());

        drop(first);
        assert!(*loading.borrow());
        drop(second);
        assert!(!*loading.borrow());
    }
}
