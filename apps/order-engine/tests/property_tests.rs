//! Property tests for order engine invariants.
//!
//! Uses proptest to verify, over random command sequences:
//! 1. Leg category: a leg is accepted exactly when pending allocation or allocated
//! 2. Edge events: `FirstAccepted` and `FirstAllocated` fire at most once per order
//! 3. Atomicity: a refused command changes nothing and consumes no sequence number
//! 4. Phase continuity: every `StateChanged` starts where the previous one ended
//! 5. Closed is absorbing

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use order_engine::domain::order_lifecycle::{Leg, SellSide};
use order_engine::{
    BrokerId, EngineSettings, IntakeItem, LegAction, LegState, OrderEngine, OrderError,
    OrderEvent, OrderEventKind, OrderState,
};

// ── Strategies (proptest) ────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
enum Op {
    Intake,
    Cancel,
    Leg(u32, LegAction),
    Close,
}

fn arb_leg_action() -> impl Strategy<Value = LegAction> {
    prop::sample::select(LegAction::ALL.to_vec())
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Intake),
        1 => Just(Op::Cancel),
        // Broker 3 is outside the default pool.
        12 => (0..4_u32, arb_leg_action()).prop_map(|(id, action)| Op::Leg(id, action)),
        1 => Just(Op::Close),
    ]
}

fn apply(engine: &mut OrderEngine, op: Op) -> Result<Vec<OrderEvent>, OrderError> {
    match op {
        Op::Intake => engine.add_intake_item(IntakeItem::new("item")),
        Op::Cancel => engine.cancel_buy_side(),
        Op::Leg(id, action) => engine.broker_action(BrokerId::new(id), action),
        Op::Close => engine.close(),
    }
}

fn observable(engine: &OrderEngine) -> (OrderState, usize, bool, Vec<Leg>) {
    (
        engine.current_state(),
        engine.intake_count(),
        engine.buy_side_cancelled(),
        engine.legs().to_vec(),
    )
}

// ── 1. Leg Category ──────────────────────────────────────────────────

proptest! {
    /// Accepted is a derived category over the flat leg states.
    #[test]
    fn accepted_matches_flat_states(
        actions in prop::collection::vec((0..3_u32, arb_leg_action()), 0..40),
    ) {
        let mut sell_side = SellSide::new(3);
        for (id, action) in actions {
            let _ = sell_side.apply(BrokerId::new(id), action);
            for leg in sell_side.legs() {
                prop_assert_eq!(
                    leg.is_accepted(),
                    matches!(leg.state(), LegState::PendingAllocation | LegState::Allocated)
                );
            }
        }
    }

    /// A successful delete always clears the refusal flag.
    #[test]
    fn delete_clears_refusal(
        actions in prop::collection::vec((0..3_u32, arb_leg_action()), 0..40),
    ) {
        let mut sell_side = SellSide::new(3);
        for (id, action) in actions {
            let broker_id = BrokerId::new(id);
            if sell_side.apply(broker_id, action).is_ok() && action == LegAction::Delete {
                let leg = sell_side.leg(broker_id).unwrap();
                prop_assert!(leg.is_deleted());
                prop_assert!(!leg.is_cancel_rejected());
            }
        }
    }
}

// ── 2-5. Engine Invariants ───────────────────────────────────────────

proptest! {
    /// Edge-triggered sell-side events fire at most once per order.
    #[test]
    fn first_events_fire_at_most_once(ops in prop::collection::vec(arb_op(), 0..60)) {
        let mut engine = OrderEngine::new(EngineSettings::default()).unwrap();
        let mut first_accepted = 0;
        let mut first_allocated = 0;

        for op in ops {
            for event in apply(&mut engine, op).unwrap_or_default() {
                match event.kind {
                    OrderEventKind::FirstAccepted { .. } => first_accepted += 1,
                    OrderEventKind::FirstAllocated { .. } => first_allocated += 1,
                    _ => {}
                }
            }
        }

        prop_assert!(first_accepted <= 1);
        prop_assert!(first_allocated <= 1);
    }

    /// Refused commands leave the engine untouched; sequence numbers stay contiguous.
    #[test]
    fn refused_commands_are_atomic(ops in prop::collection::vec(arb_op(), 0..60)) {
        let mut engine = OrderEngine::new(EngineSettings::default()).unwrap();
        let mut next_sequence = 1;

        for op in ops {
            let before = observable(&engine);
            match apply(&mut engine, op) {
                Ok(events) => {
                    for event in events {
                        prop_assert_eq!(event.sequence, next_sequence);
                        next_sequence += 1;
                    }
                }
                Err(_) => prop_assert_eq!(observable(&engine), before),
            }
        }
    }

    /// Phase changes chain, and the cancellation flag tracks `Cancelling`.
    #[test]
    fn state_changes_are_continuous(ops in prop::collection::vec(arb_op(), 0..60)) {
        let mut engine = OrderEngine::new(EngineSettings::default()).unwrap();
        let mut phase = OrderState::Intake;

        for op in ops {
            for event in apply(&mut engine, op).unwrap_or_default() {
                if let OrderEventKind::StateChanged { from, to } = event.kind {
                    prop_assert_eq!(from, phase);
                    prop_assert_ne!(from, to);
                    phase = to;
                }
            }
            prop_assert_eq!(engine.current_state(), phase);
            if !phase.is_terminal() {
                prop_assert_eq!(engine.buy_side_cancelled(), phase == OrderState::Cancelling);
            }
        }
    }

    /// Once closed, every command is refused as an invalid transition.
    #[test]
    fn closed_is_absorbing(
        prefix in prop::collection::vec(arb_op(), 0..30),
        suffix in prop::collection::vec(arb_op(), 1..20),
    ) {
        let mut engine = OrderEngine::new(EngineSettings::default()).unwrap();
        for op in prefix {
            let _ = apply(&mut engine, op);
        }
        if !engine.current_state().is_terminal() {
            engine.close().unwrap();
        }

        for op in suffix {
            let err = apply(&mut engine, op).unwrap_err();
            prop_assert!(err.is_invalid_transition());
            prop_assert_eq!(engine.current_state(), OrderState::Closed);
        }
    }
}
