//! Correlation id generation.
//!
//! Every call through the logger mints one id and embeds it in both the request
//! record and the paired response or error record.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::SystemTime;

/// Source of correlation ids. Implementations must not fail.
///
/// Any `Fn() -> String` closure is an `IdGenerator`, which is handy for
/// deterministic ids in tests:
///
/// ```rust
/// use clientlog::IdGenerator;
///
/// let fixed = || "r1".to_string();
/// assert_eq!(fixed.generate(), "r1");
/// ```
pub trait IdGenerator: Send + Sync + 'static {
    fn generate(&self) -> String;
}

impl<F> IdGenerator for F
where
    F: Fn() -> String + Send + Sync + 'static,
{
    fn generate(&self) -> String {
        self()
    }
}

/// Global atomic counter for correlation IDs and process start timestamp
static CORRELATION_COUNTER: AtomicU64 = AtomicU64::new(1);
static PROCESS_START_TIME: OnceLock<u64> = OnceLock::new();

/// Default generator: process start time combined with a process-wide counter.
///
/// The high 32 bits hold the process start time in seconds and the low 32 bits
/// a counter, rendered as 16 lowercase hex digits. No entropy source is
/// involved, so generation cannot fail. Ids never repeat within a process until
/// 2^32 of them have been minted; two processes only differ if they started in
/// different seconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniqueIdGenerator;

impl IdGenerator for UniqueIdGenerator {
    fn generate(&self) -> String {
        let start_time = *PROCESS_START_TIME.get_or_init(|| {
            SystemTime::now()
                .duration_since(SystemTime::UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs()
        });

        let counter = CORRELATION_COUNTER.fetch_add(1, Ordering::Relaxed);

        format!("{:016x}", (start_time << 32) | (counter & 0xFFFF_FFFF))
    }
}

/// Random v4 UUIDs.
///
/// 122 random bits per id; the chance of any collision among `n` ids is about
/// `n² / 2^123`. Unlike [`UniqueIdGenerator`] this relies on the operating
/// system's random number source.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}
