/// Runs `$block`, logs how long the named phase took at debug level and
/// yields the block's value.
#[macro_export]
macro_rules! timer_debug {
    ($phase:literal, $block:expr) => {{
        let started = jiff::Timestamp::now();
        let result = $block;
        let elapsed = jiff::Timestamp::now().duration_since(started);

        tracing::debug!(phase = $phase, ?elapsed, "phase finished");

        result
    }};
}
