use std::net::IpAddr;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait RateLimitService: Send + Sync + 'static {
    /// Records one request from `client` and returns whether it is within the
    /// configured limit. Always returns `true` if rate limiting is disabled.
    fn check(&self, client: IpAddr) -> bool;
}

#[cfg(feature = "mock")]
impl MockRateLimitService {
    pub fn with_check(mut self, client: IpAddr, result: bool) -> Self {
        self.expect_check()
            .once()
            .with(mockall::predicate::eq(client))
            .return_const(result);
        self
    }
}
