/// Log the start and end of a block of work, along with how long it took.
#[macro_export]
macro_rules! timed {
    ($msg:expr, $closure:expr) => {{
        use std::time::Instant;
        let msg = $msg;

        let start_time = Instant::now();
        info!("Start: {}", msg);

        let out = $closure();

        info!("End:   {}: {:?}", msg, start_time.elapsed());

        out
    }};
}
