use std::time::Duration;

use bytes::Bytes;
use http::{Request, Response};

/// Blocking HTTP transport used by the clients.
///
/// A response with a non-2xx status is still `Ok`; `Err` is reserved for
/// network-level failures (connect, timeout, reading the body).
pub trait HttpTransport: Send + Sync {
    fn execute(
        &self,
        request: Request<Vec<u8>>,
        timeout: Option<Duration>,
    ) -> anyhow::Result<Response<Bytes>>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for &T {
    fn execute(
        &self,
        request: Request<Vec<u8>>,
        timeout: Option<Duration>,
    ) -> anyhow::Result<Response<Bytes>> {
        (**self).execute(request, timeout)
    }
}

impl<T: HttpTransport + ?Sized> HttpTransport for Box<T> {
    fn execute(
        &self,
        request: Request<Vec<u8>>,
        timeout: Option<Duration>,
    ) -> anyhow::Result<Response<Bytes>> {
        (**self).execute(request, timeout)
    }
}
