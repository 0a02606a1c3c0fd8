/// Monotonic request counter for one logical operation (search, metrics, …).
///
/// In-flight requests carry no cancellation; instead each request is issued
/// a token and a response is only applied while its token is still the most
/// recently issued one. This turns last-response-wins into last-request-wins
/// without needing real cancellation support from the backend.
#[derive(Debug, Default)]
pub struct RequestSequence {
    issued: u64,
}

/// Proof that a request was issued; compared against the sequence on apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a token for a new outbound request, superseding all prior ones.
    pub fn issue(&mut self) -> RequestToken {
        self.issued += 1;
        RequestToken(self.issued)
    }

    /// Invalidate every outstanding token without issuing a new one.
    ///
    /// Used when state is cleared synchronously (no request in flight should
    /// be allowed to land on top of the cleared state).
    pub fn supersede(&mut self) {
        self.issued += 1;
    }

    /// Whether `token` belongs to the most recently issued request.
    #[must_use]
    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.issued
    }
}
