//! Property tests for Stamina invariants.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::components::Stamina;

    #[derive(Debug, Clone)]
    enum Op {
        Deplete(f32),
        Consume(f32),
        Regenerate(f32),
        Tick(f32, bool),
        TakeEvent,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0.0f32..80.0).prop_map(Op::Deplete),
            (-5.0f32..60.0).prop_map(Op::Consume),
            (0.0f32..10.0).prop_map(Op::Regenerate),
            ((0.0f32..2.0), any::<bool>()).prop_map(|(dt, running)| Op::Tick(dt, running)),
            Just(Op::TakeEvent),
        ]
    }

    proptest! {
        /// current всегда в [0, max]
        #[test]
        fn prop_current_stays_in_bounds(
            max in 1.0f32..200.0,
            ops in proptest::collection::vec(op_strategy(), 0..64),
        ) {
            let mut stamina = Stamina::new(max, 3.0);

            for op in ops {
                match op {
                    Op::Deplete(amount) => stamina.deplete(amount),
                    Op::Consume(cost) => { stamina.try_consume(cost); }
                    Op::Regenerate(dt) => stamina.regenerate(dt),
                    Op::Tick(dt, running) => { stamina.tick(dt, running); }
                    Op::TakeEvent => { stamina.take_fatigue_event(); }
                }

                prop_assert!(stamina.current() >= 0.0);
                prop_assert!(stamina.current() <= stamina.max());
                prop_assert!(stamina.fatigue_timer() >= 0.0);
            }
        }

        /// Пока не вызван tick с выходом из fatigue, событие приходит максимум раз
        #[test]
        fn prop_fatigue_event_once_per_episode(
            extra_drains in proptest::collection::vec(0.0f32..20.0, 0..16),
            running in any::<bool>(),
        ) {
            let mut stamina = Stamina::new(50.0, 3.0);
            stamina.deplete(50.0);

            let mut events = 0;
            for amount in extra_drains {
                stamina.deplete(amount);
                // Бег держит fatigue бесконечно, без бега таймер не успевает (dt мал)
                stamina.tick(0.01, running);
                if stamina.take_fatigue_event() {
                    events += 1;
                }
            }
            if stamina.take_fatigue_event() {
                events += 1;
            }

            prop_assert_eq!(events, 1);
        }

        /// Регенерация не превышает rate × dt
        #[test]
        fn prop_regeneration_rate(
            drain in 0.0f32..50.0,
            dt in 0.0f32..5.0,
        ) {
            let mut stamina = Stamina::new(50.0, 3.0);
            stamina.deplete(drain);
            let before = stamina.current();

            stamina.regenerate(dt);

            prop_assert!(stamina.current() - before <= stamina.regen_rate() * dt + 1e-4);
        }
    }
}
