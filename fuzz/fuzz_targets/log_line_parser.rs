#![no_main]

use flushscope::log_loader::{parse_line, RecordFilter};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Any line must either parse or yield a reason, never panic
        for filter in [RecordFilter::All, RecordFilter::ReadsOnly] {
            if let Ok(parsed) = parse_line(input, filter) {
                if filter == RecordFilter::ReadsOnly {
                    assert!(parsed.write_type.is_some());
                }
            }
        }
    }
});
