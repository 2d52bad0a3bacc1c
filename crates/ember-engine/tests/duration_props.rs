use ember_engine::time::{Duration, Instant, TimeUnit};
use proptest::prelude::*;

fn any_unit() -> impl Strategy<Value = TimeUnit> {
    prop::sample::select(TimeUnit::ALL.to_vec())
}

proptest! {
    #[test]
    fn between_is_commutative(a in any::<u64>(), b in any::<u64>()) {
        let a = Instant::of(a, TimeUnit::Nanoseconds);
        let b = Instant::of(b, TimeUnit::Nanoseconds);
        prop_assert_eq!(Duration::between(a, b), Duration::between(b, a));
        prop_assert!(Duration::between(a, b) >= Duration::ZERO);
    }

    #[test]
    fn between_matches_distance(a in any::<u64>(), b in any::<u64>()) {
        let d = Duration::between(
            Instant::of(a, TimeUnit::Nanoseconds),
            Instant::of(b, TimeUnit::Nanoseconds),
        );
        prop_assert_eq!(d.nanosecond_value(), a.abs_diff(b));
    }

    #[test]
    fn value_round_trips_at_same_unit(ns in any::<u64>(), unit in any_unit()) {
        let d = Duration::of(ns, TimeUnit::Nanoseconds);
        let v = d.value(unit);
        prop_assert_eq!(Duration::of(v, unit).value(unit), v);
    }

    #[test]
    fn value_truncates_toward_zero(ns in any::<u64>(), unit in any_unit()) {
        let d = Duration::of(ns, TimeUnit::Nanoseconds);
        let back = Duration::of(d.value(unit), unit);
        prop_assert!(back <= d);
        prop_assert!(d.nanosecond_value() - back.nanosecond_value() < unit.nanoseconds_per_unit());
    }

    #[test]
    fn ordering_matches_nanoseconds(a in any::<u64>(), b in any::<u64>()) {
        let (da, db) = (Duration::of(a, TimeUnit::Nanoseconds), Duration::of(b, TimeUnit::Nanoseconds));
        prop_assert_eq!(da.cmp(&db), a.cmp(&b));
    }
}
