//! Replay semantics: record kinds, malformed-record policies, and the
//! end-to-end worked examples.

use std::io::Cursor;

use csim_core::cache::{CacheSim, Outcome};
use csim_core::config::CacheConfig;
use csim_core::error::TraceError;
use csim_core::replay::{MalformedPolicy, Replayer};
use csim_core::trace::TraceReader;
use pretty_assertions::assert_eq;

fn sim(set_bits: u32, ways: usize, block_bits: u32) -> CacheSim {
    CacheSim::new(&CacheConfig::new(set_bits, ways, block_bits)).unwrap()
}

fn reader(text: &str) -> TraceReader<Cursor<&str>> {
    TraceReader::new(Cursor::new(text))
}

#[test]
fn test_worked_example_distinct_sets() {
    // 4 sets, direct-mapped, 4-byte blocks; 0, 4, 8 land in sets 0, 1, 2.
    let mut replayer = Replayer::new(sim(2, 1, 2));
    let stats = replayer
        .run(reader(" L 0,1\n L 4,1\n L 0,1\n S 8,1\n"))
        .unwrap();

    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 3);
    assert_eq!(stats.evictions, 0);
}

#[test]
fn test_worked_example_single_line_cache() {
    // One set, one line, 1-byte blocks: the tag is the whole address and
    // every change of address displaces the resident line.
    let mut replayer = Replayer::new(sim(0, 1, 0));
    let stats = replayer.run(reader(" L 0,1\n L 1,1\n L 0,1\n")).unwrap();

    assert_eq!(stats.hits, 0);
    assert_eq!(stats.misses, 3);
    assert_eq!(stats.evictions, 2);
}

#[test]
fn test_instruction_fetches_are_not_accesses() {
    let mut replayer = Replayer::new(sim(2, 1, 2));
    let stats = replayer.run(reader("I 0,8\nI 4,8\nI 0,8\n")).unwrap();

    assert_eq!(stats.accesses(), 0);
    assert!(!replayer.sim().contains(0));
}

#[test]
fn test_modify_adds_one_guaranteed_hit() {
    let mut replayer = Replayer::new(sim(2, 1, 2));
    let mut events = Vec::new();
    let stats = replayer
        .run_with(reader(" M 10,4\n"), |event| {
            events.push((*event.record, event.first, event.second));
        })
        .unwrap();

    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.evictions, 0);

    assert_eq!(events.len(), 1);
    let (record, first, second) = events[0];
    assert_eq!(record.addr, 0x10);
    assert_eq!(first, Outcome::Miss);
    assert_eq!(second, Some(Outcome::Hit));
}

#[test]
fn test_modify_on_resident_line_hits_twice() {
    let mut replayer = Replayer::new(sim(2, 1, 2));
    let stats = replayer.run(reader(" L 10,4\n M 10,4\n")).unwrap();

    assert_eq!(stats.hits, 2);
    assert_eq!(stats.misses, 1);
}

#[test]
fn test_modify_evicting_still_hits_second_access() {
    // One direct-mapped set: the modify displaces the resident line, then
    // its second access hits the line it just installed.
    let mut replayer = Replayer::new(sim(0, 1, 0));
    let mut events = Vec::new();
    let stats = replayer
        .run_with(reader(" L 0,1\n M 1,1\n"), |event| {
            events.push((event.first, event.second));
        })
        .unwrap();

    assert_eq!(events[1], (Outcome::Eviction, Some(Outcome::Hit)));
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.evictions, 1);
}

#[test]
fn test_strict_policy_aborts_on_malformed_record() {
    let mut replayer = Replayer::new(sim(2, 1, 2));
    let err = replayer
        .run(reader(" L 0,1\nGARBAGE\n L 8,1\n"))
        .unwrap_err();

    assert!(matches!(err, TraceError::Malformed { ordinal: 2, .. }));
    // The run stopped where the trace broke: only the first record landed.
    assert_eq!(replayer.stats().accesses(), 1);
}

#[test]
fn test_lenient_policy_skips_and_tallies() {
    let mut replayer = Replayer::with_policy(sim(2, 1, 2), MalformedPolicy::Lenient);
    let stats = replayer
        .run(reader(" L 0,1\nGARBAGE\nZ 4,1\n L 0,1\n"))
        .unwrap();

    assert_eq!(replayer.skipped(), 2);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
}

#[test]
fn test_replay_order_defines_recency() {
    // 2-way set; reversing the middle accesses would change the victim.
    let mut replayer = Replayer::new(sim(0, 2, 0));
    let stats = replayer
        .run(reader(" L a,1\n L b,1\n L a,1\n L c,1\n"))
        .unwrap();

    assert_eq!(stats.evictions, 1);
    assert!(replayer.sim().contains(0xa));
    assert!(!replayer.sim().contains(0xb));
    assert!(replayer.sim().contains(0xc));
}
