use anyhow::Result;

/// OS launch-at-login registration. Failures are reported, never fatal.
pub trait AutostartPort: Send + Sync {
    fn is_enabled(&self) -> Result<bool>;
    fn enable(&self) -> Result<()>;
    fn disable(&self) -> Result<()>;
}
