#![no_main]

use arxiv_search::client::query::build_query;
use arxiv_search::config::api;
use arxiv_search::models::SearchParams;
use libfuzzer_sys::fuzz_target;
use url::Url;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(base) = Url::parse(api::API_URL) else {
        return;
    };

    // Same text as a query and as a comma-separated id list
    let _ = build_query(&base, &SearchParams::query(text));
    let _ = build_query(&base, &SearchParams::ids(text.split(',')));
});
