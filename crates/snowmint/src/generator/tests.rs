use core::{cell::Cell, time::Duration};
use std::{
    collections::HashSet,
    rc::Rc,
    sync::{Arc, Mutex},
    thread::scope,
};

use crate::{
    Builder, ClockPolicy, ConfigError, GeneratorConfig, Id, IdGenStatus, MintError, Parts,
    SnowflakeGenerator, SnowflakeId, SystemClock, TimeSource,
};

/// 2023-01-01T00:00:00Z
const EPOCH: Duration = Duration::from_secs(1_672_531_200);
const TICK: Duration = Duration::from_millis(1);

struct MockTime {
    now: Duration,
}

impl TimeSource for MockTime {
    fn now(&self) -> Duration {
        self.now
    }
}

#[derive(Clone)]
struct SharedMockStepTime {
    clock: Rc<MockStepTime>,
}

impl TimeSource for SharedMockStepTime {
    fn now(&self) -> Duration {
        self.clock.values[self.clock.index.get()]
    }
}

struct MockStepTime {
    values: Vec<Duration>,
    index: Cell<usize>,
}

fn at_tick(tick: u64) -> Duration {
    EPOCH + TICK * u32::try_from(tick).unwrap()
}

fn step_time(ticks: &[u64]) -> SharedMockStepTime {
    SharedMockStepTime {
        clock: Rc::new(MockStepTime {
            values: ticks.iter().copied().map(at_tick).collect(),
            index: Cell::new(0),
        }),
    }
}

fn builder(node: u64, timestamp_bits: u8, node_bits: u8, sequence_bits: u8) -> Builder {
    Builder::new(EPOCH)
        .tick(TICK)
        .node(node)
        .layout(timestamp_bits, node_bits, sequence_bits)
}

trait IdGenStatusExt<T: Id> {
    fn unwrap_ready(self) -> T;
    fn unwrap_pending(self) -> u64;
}

impl<T: Id> IdGenStatusExt<T> for IdGenStatus<T> {
    fn unwrap_ready(self) -> T {
        match self {
            Self::Ready { id } => id,
            Self::Pending { yield_for } => {
                panic!("unexpected pending (yield for: {yield_for})")
            }
        }
    }

    fn unwrap_pending(self) -> u64 {
        match self {
            Self::Ready { id } => panic!("unexpected ready ({id})"),
            Self::Pending { yield_for } => yield_for,
        }
    }
}

#[test]
fn sequence_increments_within_same_tick() {
    let generator: SnowflakeGenerator<SnowflakeId, _> = builder(3, 41, 10, 12)
        .build_with_time(MockTime { now: at_tick(42) })
        .unwrap();

    let id1 = generator.try_poll().unwrap().unwrap_ready();
    let id2 = generator.try_poll().unwrap().unwrap_ready();
    let id3 = generator.try_poll().unwrap().unwrap_ready();

    for (i, id) in [id1, id2, id3].into_iter().enumerate() {
        assert_eq!(
            generator.decompose(id),
            Parts {
                timestamp: 42,
                node: 3,
                sequence: i as u64,
            }
        );
    }
    assert!(id1 < id2 && id2 < id3);
}

#[test]
fn packs_fields_in_documented_order() {
    let generator: SnowflakeGenerator<u64, _> = builder(5, 41, 10, 12)
        .build_with_time(MockTime { now: at_tick(1000) })
        .unwrap();

    let id = generator.mint();
    assert_eq!(id, (1000 << 22) | (5 << 12));
}

#[test]
fn pending_when_sequence_exhausted() {
    let generator: SnowflakeGenerator<SnowflakeId, _> = builder(0, 41, 10, 2)
        .build_with_time(MockTime { now: at_tick(7) })
        .unwrap();

    for seq in 0..=3 {
        let id = generator.try_poll().unwrap().unwrap_ready();
        assert_eq!(generator.decompose(id).sequence, seq);
    }

    assert_eq!(generator.try_poll().unwrap().unwrap_pending(), 1);
    // stays pending until the clock moves
    assert_eq!(generator.try_poll().unwrap().unwrap_pending(), 1);
}

#[test]
fn rolls_over_to_next_tick() {
    let time = step_time(&[42, 43]);
    let generator: SnowflakeGenerator<SnowflakeId, _> = builder(1, 41, 10, 12)
        .build_with_time(time.clone())
        .unwrap();

    let max_sequence = generator.layout().max_sequence();
    for seq in 0..=max_sequence {
        let id = generator.try_poll().unwrap().unwrap_ready();
        assert_eq!(generator.decompose(id).sequence, seq);
        assert_eq!(generator.decompose(id).timestamp, 42);
    }

    assert_eq!(generator.try_poll().unwrap().unwrap_pending(), 1);

    time.clock.index.set(1);

    let id = generator.try_poll().unwrap().unwrap_ready();
    assert_eq!(generator.decompose(id).timestamp, 43);
    assert_eq!(generator.decompose(id).sequence, 0);
}

#[test]
fn waits_when_clock_moves_backwards() {
    let time = step_time(&[45, 42, 45, 46]);
    let generator: SnowflakeGenerator<SnowflakeId, _> = builder(0, 41, 10, 12)
        .build_with_time(time.clone())
        .unwrap();

    let first = generator.mint();
    assert_eq!(generator.decompose(first).timestamp, 45);

    time.clock.index.set(1);
    assert_eq!(generator.try_poll().unwrap().unwrap_pending(), 3);

    // caught up: continues the old tick instead of reusing it
    time.clock.index.set(2);
    let second = generator.try_poll().unwrap().unwrap_ready();
    assert_eq!(
        generator.decompose(second),
        Parts {
            timestamp: 45,
            node: 0,
            sequence: 1,
        }
    );

    time.clock.index.set(3);
    let third = generator.mint();
    assert_eq!(generator.decompose(third).timestamp, 46);
    assert!(first < second && second < third);
}

#[test]
fn fails_when_clock_moves_backwards_under_fail_policy() {
    let time = step_time(&[43, 42]);
    let generator: SnowflakeGenerator<SnowflakeId, _> = builder(0, 41, 10, 12)
        .clock_policy(ClockPolicy::Fail)
        .build_with_time(time.clone())
        .unwrap();
    assert_eq!(generator.clock_policy(), ClockPolicy::Fail);

    generator.mint();
    time.clock.index.set(1);

    assert_eq!(
        generator.try_mint(),
        Err(MintError::ClockMovedBackwards { now: 42, last: 43 })
    );
}

#[test]
fn epoch_exhaustion_is_an_error() {
    // 4 timestamp bits at 1ms ticks since 1970 ran out long ago
    let generator: SnowflakeGenerator<SnowflakeId, _> = Builder::new(Duration::ZERO)
        .layout(4, 10, 12)
        .build()
        .unwrap();

    match generator.try_mint() {
        Err(MintError::EpochExhausted { ticks, max }) => {
            assert_eq!(max, 15);
            assert!(ticks > 15);
        }
        other => panic!("expected exhaustion, got {other:?}"),
    }
}

#[test]
#[should_panic(expected = "maximum life cycle has ended")]
fn mint_panics_on_epoch_exhaustion() {
    let generator: SnowflakeGenerator<SnowflakeId, _> = Builder::new(Duration::ZERO)
        .layout(4, 10, 12)
        .build()
        .unwrap();
    generator.mint();
}

#[test]
fn last_representable_tick_still_mints() {
    let generator: SnowflakeGenerator<SnowflakeId, _> = builder(0, 4, 10, 12)
        .build_with_time(MockTime { now: at_tick(15) })
        .unwrap();
    let id = generator.mint();
    assert_eq!(generator.decompose(id).timestamp, 15);

    let generator: SnowflakeGenerator<SnowflakeId, _> = builder(0, 4, 10, 12)
        .build_with_time(MockTime { now: at_tick(16) })
        .unwrap();
    assert_eq!(
        generator.try_mint(),
        Err(MintError::EpochExhausted { ticks: 16, max: 15 })
    );
}

#[test]
fn clock_before_epoch_is_an_error() {
    let generator: SnowflakeGenerator<SnowflakeId, _> = builder(0, 41, 10, 12)
        .build_with_time(MockTime {
            now: EPOCH - Duration::from_secs(1),
        })
        .unwrap();
    assert_eq!(generator.try_poll(), Err(MintError::ClockBeforeEpoch));
}

#[test]
fn construction_rejects_invalid_config() {
    let time = || MockTime { now: EPOCH };
    let cases = [
        (builder(0, 41, 10, 0), ConfigError::ZeroSequenceBits),
        (builder(0, 41, 12, 12), ConfigError::LayoutOverflow { total: 65 }),
        (builder(0, 41, 10, 12).tick(Duration::ZERO), ConfigError::ZeroTick),
        (
            builder(1024, 41, 10, 12),
            ConfigError::NodeOutOfRange {
                node: 1024,
                max: 1023,
            },
        ),
    ];
    for (builder, expected) in cases {
        let err = builder
            .build_with_time::<SnowflakeId, _>(time())
            .expect_err("construction should fail");
        assert_eq!(err, expected);
    }
}

#[test]
fn timestamp_of_maps_back_to_wall_time() {
    let generator: SnowflakeGenerator<SnowflakeId, _> = builder(0, 41, 10, 12)
        .build_with_time(MockTime { now: at_tick(1500) })
        .unwrap();
    let id = generator.mint();
    assert_eq!(generator.timestamp_of(id), EPOCH + Duration::from_millis(1500));
    assert_eq!(generator.epoch(), EPOCH);
    assert_eq!(generator.tick(), TICK);
    assert_eq!(generator.node(), 0);
    assert_eq!(generator.time().now(), at_tick(1500));
}

#[test]
fn coarse_ticks_floor_wall_time() {
    let generator: SnowflakeGenerator<SnowflakeId, _> = builder(0, 41, 10, 12)
        .tick(Duration::from_secs(1))
        .build_with_time(MockTime {
            now: EPOCH + Duration::from_millis(2_999),
        })
        .unwrap();
    let id = generator.mint();
    assert_eq!(generator.decompose(id).timestamp, 2);
}

#[test]
fn debug_shows_layout_and_last_issued() {
    let generator: SnowflakeGenerator<SnowflakeId, _> = builder(2, 41, 10, 12)
        .build_with_time(MockTime { now: at_tick(1) })
        .unwrap();
    let id = generator.mint();
    let dbg = format!("{generator:?}");
    assert!(dbg.contains("node: 2"));
    assert!(dbg.contains(&format!("last: {}", id.to_raw())));
}

#[test]
fn sequential_ids_are_unique() {
    const TOTAL_IDS: usize = 100_000;

    let generator: SnowflakeGenerator<SnowflakeId, SystemClock> =
        builder(0, 41, 3, 19).build().unwrap();

    let mut seen = HashSet::with_capacity(TOTAL_IDS);
    let mut last_timestamp = 0;
    for i in 0..TOTAL_IDS {
        let id = generator.mint();
        assert!(seen.insert(id), "ID repeated {id} at {i}");

        let timestamp = generator.decompose(id).timestamp;
        assert!(timestamp >= last_timestamp);
        last_timestamp = timestamp;
    }
    assert_eq!(seen.len(), TOTAL_IDS);
}

#[test]
fn tiny_sequence_spins_into_next_tick() {
    const TOTAL_IDS: usize = 64;

    // two IDs per millisecond
    let generator: SnowflakeGenerator<SnowflakeId, SystemClock> =
        builder(1, 41, 10, 1).build().unwrap();

    let ids: Vec<_> = (0..TOTAL_IDS).map(|_| generator.mint()).collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));

    let ticks: HashSet<_> = ids
        .iter()
        .map(|&id| generator.decompose(id).timestamp)
        .collect();
    assert!(ticks.len() >= TOTAL_IDS / 2);
}

#[test]
fn threaded_ids_are_unique_and_ordered_per_thread() {
    const TOTAL_IDS: usize = 4096 * 64;

    let threads = num_cpus::get().max(2);
    let ids_per_thread = TOTAL_IDS / threads;

    let generator: SnowflakeGenerator<SnowflakeId, SystemClock> =
        builder(0, 41, 3, 19).build().unwrap();
    let seen_ids = Arc::new(Mutex::new(HashSet::with_capacity(TOTAL_IDS)));

    scope(|s| {
        for _ in 0..threads {
            let generator = &generator;
            let seen_ids = Arc::clone(&seen_ids);

            s.spawn(move || {
                let mut last = None;
                for _ in 0..ids_per_thread {
                    let id = generator.mint();
                    if let Some(last) = last {
                        assert!(id > last, "IDs must increase within a thread");
                    }
                    last = Some(id);
                    assert!(seen_ids.lock().unwrap().insert(id));
                }
            });
        }
    });

    let final_count = seen_ids.lock().unwrap().len();
    assert_eq!(final_count, ids_per_thread * threads);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_callers_get_distinct_ids() {
    const CALLERS: usize = 100_000;

    let generator: Arc<SnowflakeGenerator<SnowflakeId, SystemClock>> =
        Arc::new(builder(0, 41, 3, 19).build().unwrap());

    let handles: Vec<_> = (0..CALLERS)
        .map(|_| {
            let generator = Arc::clone(&generator);
            tokio::spawn(async move { generator.mint() })
        })
        .collect();

    let mut seen = HashSet::with_capacity(CALLERS);
    for handle in handles {
        let id = handle.await.expect("caller panicked");
        assert!(seen.insert(id), "ID repeated {id}");
    }
    assert_eq!(seen.len(), CALLERS);
}

#[test]
fn separate_nodes_never_collide() {
    let time = MockTime { now: at_tick(9) };
    let a: SnowflakeGenerator<SnowflakeId, _> = builder(1, 41, 10, 12)
        .build_with_time(&time)
        .unwrap();
    let b: SnowflakeGenerator<SnowflakeId, _> = builder(2, 41, 10, 12)
        .build_with_time(&time)
        .unwrap();

    let from_a: HashSet<_> = (0..100).map(|_| a.mint()).collect();
    let from_b: HashSet<_> = (0..100).map(|_| b.mint()).collect();
    assert!(from_a.is_disjoint(&from_b));
}

#[test]
fn presets_build_from_config() {
    let generator: SnowflakeGenerator<SnowflakeId, _> =
        SnowflakeGenerator::with_time(GeneratorConfig::discord(4), MockTime { now: EPOCH })
            .unwrap();
    let id = generator.mint();
    // 2015-01-01 to 2023-01-01
    let parts = generator.decompose(id);
    assert_eq!(parts.timestamp, 252_460_800_000);
    assert_eq!(parts.node, 4);
}
