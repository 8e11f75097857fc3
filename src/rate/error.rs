use derive_more::{Display, Error, IsVariant};

/// An error returned when a [`RateLimitPolicy`](super::RateLimitPolicy) can never admit anything.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq, IsVariant)]
pub enum InvalidPolicy {
    #[display("rate limit policy must refill at least one token per period")]
    ZeroRate,
    #[display("rate limit policy period must be longer than zero")]
    ZeroPeriod,
    #[display("rate limit policy must hold at least one token")]
    ZeroBurst,
}

/// An error returned when more tokens are requested at once than the bucket can ever hold, so
/// waiting would never end.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("requested {requested} tokens but the burst capacity is {burst}")]
pub struct ExceedsBurst {
    pub requested: u32,
    pub burst: u32,
}
