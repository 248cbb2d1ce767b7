pub mod action_executor;
pub mod config;
pub mod contract;
pub mod core_service;
pub mod discovery;
pub mod fuzzy;
pub mod index_store;
pub mod logging;
pub mod model;
pub mod runtime;
pub mod search;

#[cfg(test)]
mod tests {
    mod rank_latency_test {
        include!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../../tests/perf/rank_latency_test.rs"
        ));
    }
}
