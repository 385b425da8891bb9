//! Benchmark for the fallback responder keyword scan.
//!
//! The fallback path runs on every gateway outage, inline with the chat
//! request, so the table scan should stay comfortably sub-millisecond
//! even for maximum-length utterances.

use criterion::{criterion_group, criterion_main, Criterion};

use concierge_assistant::FallbackResponder;

/// Build an utterance of roughly the maximum accepted message length.
fn long_utterance(keyword: &str) -> String {
    let filler = "I have been comparing agencies for a while and would like to \
                  understand what makes your team different before committing. "
        .repeat(12);
    format!("{} Specifically about {} please.", filler, keyword)
}

fn bench_fallback(c: &mut Criterion) {
    let responder = FallbackResponder::new();

    c.bench_function("fallback_short_match", |b| {
        b.iter(|| responder.respond("can I schedule an appointment"))
    });

    let long_hit = long_utterance("ecommerce");
    c.bench_function("fallback_long_match_last_topic", |b| {
        b.iter(|| responder.respond(&long_hit))
    });

    let long_miss = long_utterance("gardening");
    c.bench_function("fallback_long_no_match", |b| {
        b.iter(|| responder.respond(&long_miss))
    });
}

criterion_group!(benches, bench_fallback);
criterion_main!(benches);
