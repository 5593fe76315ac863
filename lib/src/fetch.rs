use crate::{error::Error, Config, Result};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Source of HTML documents. Implemented over HTTP for real runs and over
/// fixed fixtures in tests.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<String>;
}

impl<F: Fetch + ?Sized> Fetch for &F {
    fn fetch(&self, url: &str) -> Result<String> {
        (**self).fetch(url)
    }
}

/// A player link is usable only if it is an absolute http(s) URL.
pub fn is_valid_reference(reference: &str) -> bool {
    reference.starts_with("http://") || reference.starts_with("https://")
}

pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()?;
        Ok(HttpFetcher { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        log::debug!("GET {}", url);
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.text()?)
    }
}

/// Serializes requests and holds a fixed pause between the end of one
/// request and the start of the next.
///
/// The pause is tracked on the wrapper, not per caller, so sharing one
/// `Throttled` between workers keeps the aggregate request rate at or below
/// one request per `interval`. Views made with [`Throttled::with_interval`]
/// share the same clock and lock.
pub struct Throttled<F> {
    inner: F,
    interval: Duration,
    last: Arc<Mutex<Option<Instant>>>,
}

impl<F: Fetch> Throttled<F> {
    pub fn new(inner: F, interval: Duration) -> Self {
        Throttled {
            inner,
            interval,
            last: Arc::new(Mutex::new(None)),
        }
    }

    /// A view over the same fetcher and clock that waits `interval` instead.
    pub fn with_interval(&self, interval: Duration) -> Throttled<&F> {
        Throttled {
            inner: &self.inner,
            interval,
            last: Arc::clone(&self.last),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl<F: Fetch> Fetch for Throttled<F> {
    fn fetch(&self, url: &str) -> Result<String> {
        // Lock is held across the request: one fetch in flight at a time.
        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(finished) = *last {
            let elapsed = finished.elapsed();
            if elapsed < self.interval {
                let wait = self.interval - elapsed;
                log::trace!("Throttling for {:?}", wait);
                std::thread::sleep(wait);
            }
        }
        let result = self.inner.fetch(url);
        *last = Some(Instant::now());
        result
    }
}
