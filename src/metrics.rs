use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, register_int_gauge,
    Histogram, IntCounter, IntCounterVec, IntGauge,
};

lazy_static::lazy_static! {
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "lemmata_http_requests_total", "Total HTTP requests", &["method", "path", "status"]
    ).unwrap();
    pub static ref SEARCHES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "lemmata_searches_total", "Searches by outcome", &["outcome"]
    ).unwrap();
    pub static ref SEARCH_DURATION: Histogram = register_histogram!(
        "lemmata_search_duration_seconds", "Full corpus scan duration",
        vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]
    ).unwrap();
    pub static ref ACTIVE_SEARCHES: IntGauge = register_int_gauge!(
        "lemmata_active_searches", "Number of in-flight searches"
    ).unwrap();
    pub static ref FILES_SCANNED_TOTAL: IntCounter = register_int_counter!(
        "lemmata_files_scanned_total", "Corpus files opened by scans"
    ).unwrap();
    pub static ref FILE_PARSE_FAILURES_TOTAL: IntCounter = register_int_counter!(
        "lemmata_file_parse_failures_total", "Corpus files skipped as unreadable or malformed"
    ).unwrap();
    pub static ref RECORDS_MATCHED_TOTAL: IntCounter = register_int_counter!(
        "lemmata_records_matched_total", "Sentence records that matched a query"
    ).unwrap();
}

/// RAII guard that decrements an IntGauge on drop.
pub struct GaugeGuard<'a>(pub &'a IntGauge);

impl Drop for GaugeGuard<'_> {
    fn drop(&mut self) {
        self.0.dec();
    }
}

pub fn init() {
    lazy_static::initialize(&HTTP_REQUESTS_TOTAL);
    lazy_static::initialize(&SEARCHES_TOTAL);
    lazy_static::initialize(&SEARCH_DURATION);
    lazy_static::initialize(&ACTIVE_SEARCHES);
    lazy_static::initialize(&FILES_SCANNED_TOTAL);
    lazy_static::initialize(&FILE_PARSE_FAILURES_TOTAL);
    lazy_static::initialize(&RECORDS_MATCHED_TOTAL);
}
