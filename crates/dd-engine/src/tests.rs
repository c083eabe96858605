//! Unit tests for dd-engine.

use dd_core::{DispatchConfig, Order, OrderId, Tick};

use crate::{DeliveryQueue, DispatchEngine, EngineError, EtaUpdate, Report};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn lines(reports: &[Report]) -> Vec<String> {
    reports.iter().map(ToString::to_string).collect()
}

fn create(engine: &mut DispatchEngine, id: i64, at: i64, value: i64, duration: i64) -> Vec<String> {
    lines(&engine.create(OrderId(id), Tick(at), value, duration))
}

/// Three orders queued back to back, each lower priority than the last:
/// order 1 at ETA 10, order 2 at 25, order 3 at 34.
fn three_queued() -> DispatchEngine {
    let mut engine = DispatchEngine::new();
    create(&mut engine, 1, 0, 50, 10);
    create(&mut engine, 2, 1, 50, 5);
    create(&mut engine, 3, 2, 50, 4);
    engine
}

fn etas(engine: &DispatchEngine) -> Vec<(i64, i64)> {
    engine.active_by_eta().map(|o| (o.id().0, o.eta().0)).collect()
}

// ── Create ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod creation {
    use super::*;

    #[test]
    fn idle_agent_leaves_immediately() {
        let mut engine = DispatchEngine::new();
        assert_eq!(create(&mut engine, 1, 0, 50, 10), ["Order 1 has been created - ETA: 10"]);
        assert_eq!(engine.active_len(), 1);
        assert_eq!(engine.order(OrderId(1)).map(Order::eta), Some(Tick(10)));
    }

    #[test]
    fn higher_priority_jumps_queue() {
        let mut engine = DispatchEngine::new();
        create(&mut engine, 1, 0, 50, 10);
        assert_eq!(
            create(&mut engine, 2, 0, 500, 5),
            ["Order 2 has been created - ETA: 5", "Updated ETAs: [1: 20]"]
        );
        assert_eq!(etas(&engine), [(2, 5), (1, 20)]);
    }

    #[test]
    fn lower_priority_queues_behind() {
        let engine = three_queued();
        assert_eq!(etas(&engine), [(1, 10), (2, 25), (3, 34)]);
    }

    #[test]
    fn in_flight_order_is_never_shifted() {
        let mut engine = DispatchEngine::new();
        create(&mut engine, 1, 0, 50, 10);
        // Order 2 outranks order 1, but the agent already left at t=0.
        assert_eq!(create(&mut engine, 2, 5, 1000, 5), ["Order 2 has been created - ETA: 25"]);
        assert_eq!(etas(&engine), [(1, 10), (2, 25)]);
        assert_eq!(engine.currently_delivering().map(Order::id), Some(OrderId(1)));
    }

    #[test]
    fn waits_for_agent_to_return() {
        let mut engine = DispatchEngine::new();
        create(&mut engine, 1, 0, 50, 10);
        assert_eq!(
            create(&mut engine, 2, 15, 50, 5),
            ["Order 2 has been created - ETA: 25", "Order 1 has been delivered at time 10"]
        );
        assert_eq!(engine.delivered_len(), 1);
    }

    #[test]
    fn agent_back_at_base_leaves_immediately() {
        let mut engine = DispatchEngine::new();
        create(&mut engine, 1, 0, 50, 10);
        create(&mut engine, 2, 25, 50, 5);
        assert_eq!(engine.order(OrderId(2)).map(Order::eta), Some(Tick(30)));
    }

    #[test]
    fn duplicate_id_is_ignored() {
        let mut engine = DispatchEngine::new();
        create(&mut engine, 1, 0, 50, 10);
        assert!(create(&mut engine, 1, 2, 900, 3).is_empty());
        assert_eq!(engine.active_len(), 1);
        assert_eq!(engine.order(OrderId(1)).map(Order::value), Some(50));
    }

    #[test]
    fn equal_priority_larger_id_queues_behind() {
        let mut engine = DispatchEngine::new();
        // Same created_at and value bucket, so all three share one priority.
        create(&mut engine, 5, 1, 60, 4);
        create(&mut engine, 7, 1, 70, 4);
        assert_eq!(
            create(&mut engine, 3, 1, 80, 4),
            ["Order 3 has been created - ETA: 5", "Updated ETAs: [5: 13, 7: 21]"]
        );
        assert_eq!(etas(&engine), [(3, 5), (5, 13), (7, 21)]);
    }

    #[test]
    fn equal_priority_later_created_queues_behind() {
        let cfg = DispatchConfig { value_weight: 1.0, time_weight: 0.0, value_bucket: 10 };
        let mut engine = DispatchEngine::with_config(cfg).unwrap();
        create(&mut engine, 1, 0, 50, 4);
        create(&mut engine, 2, 2, 50, 4);
        create(&mut engine, 3, 3, 50, 4);
        assert_eq!(etas(&engine), [(1, 4), (2, 12), (3, 20)]);
    }

    #[test]
    fn huge_duration_saturates_cascade() {
        let mut engine = DispatchEngine::new();
        create(&mut engine, 1, 0, 50, 10);
        let big = i64::MAX / 2 + 1;
        let reports = engine.create(OrderId(2), Tick(0), 5000, big);
        assert_eq!(reports[0], Report::Created { id: OrderId(2), eta: Tick(big) });
        assert_eq!(etas(&engine), [(2, big), (1, i64::MAX)]);

        let reports = engine.cancel(OrderId(2), Tick(0));
        assert_eq!(reports[0], Report::Cancelled { id: OrderId(2) });
        assert_eq!(engine.active_len(), 1);
        assert!(engine.order(OrderId(1)).is_some());
    }

    #[test]
    fn huge_duration_update_saturates() {
        let mut engine = three_queued();
        engine.update_duration(OrderId(2), Tick(3), i64::MAX);
        assert_eq!(etas(&engine), [(1, 10), (2, i64::MAX), (3, i64::MAX)]);
        assert_eq!(engine.finish().len(), 3);
    }

    #[test]
    fn clock_never_moves_back() {
        let mut engine = DispatchEngine::new();
        create(&mut engine, 1, 8, 50, 10);
        create(&mut engine, 2, 3, 50, 10);
        assert_eq!(engine.now(), Tick(8));
    }
}

// ── Cancel / update ───────────────────────────────────────────────────────────

#[cfg(test)]
mod mutation {
    use super::*;

    #[test]
    fn cancel_pulls_lower_orders_forward() {
        let mut engine = three_queued();
        assert_eq!(
            lines(&engine.cancel(OrderId(2), Tick(3))),
            ["Order 2 has been canceled", "Updated ETAs: [3: 24]"]
        );
        assert_eq!(etas(&engine), [(1, 10), (3, 24)]);
        assert!(engine.order(OrderId(2)).is_none());
    }

    #[test]
    fn cancel_lowest_has_no_updates() {
        let mut engine = three_queued();
        assert_eq!(lines(&engine.cancel(OrderId(3), Tick(3))), ["Order 3 has been canceled"]);
        assert_eq!(etas(&engine), [(1, 10), (2, 25)]);
    }

    #[test]
    fn cancel_in_flight_refused() {
        let mut engine = three_queued();
        assert_eq!(
            lines(&engine.cancel(OrderId(1), Tick(5))),
            ["Cannot cancel. Order 1 has already been delivered."]
        );
        assert_eq!(engine.active_len(), 3);
    }

    #[test]
    fn cancel_after_delivery_refused() {
        let mut engine = DispatchEngine::new();
        create(&mut engine, 1, 0, 50, 10);
        assert_eq!(
            lines(&engine.cancel(OrderId(1), Tick(12))),
            [
                "Cannot cancel. Order 1 has already been delivered.",
                "Order 1 has been delivered at time 10",
            ]
        );
    }

    #[test]
    fn cancel_unknown_refused() {
        let mut engine = DispatchEngine::new();
        assert_eq!(
            engine.cancel(OrderId(9), Tick(1)),
            [Report::CannotCancel { id: OrderId(9) }]
        );
    }

    #[test]
    fn update_lowest_moves_only_itself() {
        let mut engine = three_queued();
        engine.cancel(OrderId(2), Tick(3));
        assert_eq!(
            lines(&engine.update_duration(OrderId(3), Tick(4), 6)),
            ["Updated ETAs: [3: 26]"]
        );
        let order = engine.order(OrderId(3)).cloned();
        assert_eq!(order.as_ref().map(Order::duration), Some(6));
        assert_eq!(order.as_ref().map(Order::delivery_start), Some(Tick(20)));
    }

    #[test]
    fn update_cascades_twice_the_change() {
        let mut engine = three_queued();
        assert_eq!(
            engine.update_duration(OrderId(2), Tick(3), 8),
            [Report::EtaUpdates(vec![
                EtaUpdate { id: OrderId(2), eta: Tick(28) },
                EtaUpdate { id: OrderId(3), eta: Tick(40) },
            ])]
        );
        assert_eq!(etas(&engine), [(1, 10), (2, 28), (3, 40)]);
    }

    #[test]
    fn update_shorter_pulls_forward() {
        let mut engine = three_queued();
        engine.update_duration(OrderId(2), Tick(3), 2);
        assert_eq!(etas(&engine), [(1, 10), (2, 22), (3, 28)]);
    }

    #[test]
    fn update_in_flight_refused() {
        let mut engine = three_queued();
        assert_eq!(
            lines(&engine.update_duration(OrderId(1), Tick(2), 20)),
            ["Cannot update. Order 1 has already been delivered."]
        );
        assert_eq!(engine.order(OrderId(1)).map(Order::eta), Some(Tick(10)));
    }
}

// ── Queries ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod queries {
    use super::*;

    #[test]
    fn describe_renders_snapshot() {
        let mut engine = DispatchEngine::new();
        create(&mut engine, 1001, 1, 200, 3);
        let report = engine.describe(OrderId(1001)).unwrap();
        assert_eq!(report.to_string(), "[1001, 1, 200, 3, 4]");
    }

    #[test]
    fn describe_unknown_is_not_found() {
        let engine = DispatchEngine::new();
        assert!(matches!(
            engine.describe(OrderId(4)),
            Err(EngineError::NotFound(OrderId(4)))
        ));
    }

    #[test]
    fn range_is_inclusive_and_ordered() {
        let engine = three_queued();
        assert_eq!(engine.describe_range(Tick(0), Tick(100)).to_string(), "[1, 2, 3]");
        assert_eq!(engine.describe_range(Tick(10), Tick(25)).to_string(), "[1, 2]");
        assert_eq!(
            engine.describe_range(Tick(11), Tick(20)).to_string(),
            "There are no orders in that time period"
        );
    }

    #[test]
    fn queries_do_not_advance_clock() {
        let engine = three_queued();
        let before = engine.now();
        engine.describe_range(Tick(0), Tick(1000));
        engine.rank_of(OrderId(3)).unwrap();
        assert_eq!(engine.now(), before);
        assert_eq!(engine.active_len(), 3);
    }

    #[test]
    fn rank_counts_earlier_etas() {
        let engine = three_queued();
        for (id, ahead) in [(1, 0), (2, 1), (3, 2)] {
            assert_eq!(
                engine.rank_of(OrderId(id)).unwrap(),
                Report::Rank { id: OrderId(id), ahead }
            );
        }
        assert_eq!(
            engine.rank_of(OrderId(3)).unwrap().to_string(),
            "Order 3 will be delivered after 2 orders."
        );
        assert!(engine.rank_of(OrderId(99)).is_err());
    }
}

// ── Delivery ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod delivery {
    use super::*;

    #[test]
    fn sweep_reports_in_eta_order() {
        let mut engine = three_queued();
        let reports = engine.cancel(OrderId(9), Tick(40));
        assert_eq!(
            lines(&reports),
            [
                "Cannot cancel. Order 9 has already been delivered.",
                "Order 1 has been delivered at time 10",
                "Order 2 has been delivered at time 25",
                "Order 3 has been delivered at time 34",
            ]
        );
        assert_eq!(engine.active_len(), 0);
        assert_eq!(engine.delivered_len(), 3);
    }

    #[test]
    fn eta_equal_to_now_is_delivered() {
        let mut engine = DispatchEngine::new();
        create(&mut engine, 1, 0, 50, 10);
        let reports = engine.create(OrderId(2), Tick(10), 50, 1);
        assert!(reports.iter().any(Report::is_delivery));
        assert!(engine.order(OrderId(1)).is_none());
    }

    #[test]
    fn finish_drains_everything() {
        let mut engine = three_queued();
        engine.cancel(OrderId(2), Tick(3));
        engine.update_duration(OrderId(3), Tick(4), 6);
        assert_eq!(
            lines(&engine.finish()),
            ["Order 1 has been delivered at time 10", "Order 3 has been delivered at time 26"]
        );
        assert_eq!(engine.active_len(), 0);
        assert_eq!(engine.now(), Tick::MAX);
        assert!(engine.finish().is_empty());
    }

    #[test]
    fn last_delivered_is_latest_eta() {
        let mut engine = three_queued();
        engine.finish();
        assert_eq!(engine.last_delivered_or_collected().map(Order::id), Some(OrderId(3)));
        let delivered: Vec<i64> = engine.delivered().map(|o| o.id().0).collect();
        assert_eq!(delivered, [1, 2, 3]);
    }

    #[test]
    fn colliding_etas_both_delivered() {
        let mut engine = DispatchEngine::new();
        create(&mut engine, 1, 0, 50, 10);
        // Outranks order 1 but waits for it to return.
        create(&mut engine, 2, 1, 5000, 5);
        // Ranks below order 1, so it also queues straight behind it.
        create(&mut engine, 3, 2, 50, 5);
        assert_eq!(etas(&engine), [(1, 10), (2, 25), (3, 25)]);
        assert_eq!(engine.describe_range(Tick(25), Tick(25)).to_string(), "[2, 3]");
        assert_eq!(
            lines(&engine.finish()),
            [
                "Order 1 has been delivered at time 10",
                "Order 2 has been delivered at time 25",
                "Order 3 has been delivered at time 25",
            ]
        );
        assert_eq!(engine.active_len(), 0);
    }

    #[test]
    fn busy_schedule_loses_no_orders() {
        let mut engine = DispatchEngine::new();
        let mut cancelled = 0;
        for i in 0..40_i64 {
            engine.create(OrderId(i), Tick(i * 3), 25 + (i * 37) % 400, 1 + i % 7);
            if i % 5 == 4 {
                let reports = engine.cancel(OrderId(i - 1), Tick(i * 3));
                if reports.contains(&Report::Cancelled { id: OrderId(i - 1) }) {
                    cancelled += 1;
                }
            }
            if i % 6 == 5 {
                engine.update_duration(OrderId(i), Tick(i * 3), 2 + i % 4);
            }
            let active: Vec<Tick> = engine.active_by_eta().map(Order::eta).collect();
            assert_eq!(active.len(), engine.active_len());
            assert!(active.windows(2).all(|w| w[0] <= w[1]));
        }
        let finished = engine.finish();
        assert!(finished.iter().all(Report::is_delivery));
        assert_eq!(engine.active_len(), 0);
        assert_eq!(engine.delivered_len() + cancelled, 40);
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod config {
    use super::*;

    #[test]
    fn invalid_config_rejected() {
        let cfg = DispatchConfig { value_bucket: -1, ..DispatchConfig::default() };
        assert!(matches!(DispatchEngine::with_config(cfg), Err(EngineError::Core(_))));
    }

    #[test]
    fn value_only_weights() {
        let cfg = DispatchConfig { value_weight: 1.0, time_weight: 0.0, value_bucket: 10 };
        let mut engine = DispatchEngine::with_config(cfg).unwrap();
        create(&mut engine, 1, 0, 10, 5);
        // Worth more, so it goes first.
        create(&mut engine, 2, 0, 100, 5);
        assert_eq!(etas(&engine), [(2, 5), (1, 15)]);
    }
}

// ── DeliveryQueue ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod queue {
    use super::*;

    fn order(id: i64, eta: i64) -> Order {
        let mut o = Order::new(OrderId(id), Tick(0), 50, 1, &DispatchConfig::default());
        o.set_eta(Tick(eta));
        o
    }

    #[test]
    fn drains_ascending() {
        let mut q = DeliveryQueue::new();
        q.push(order(1, 30));
        q.push(order(2, 10));
        q.push(order(3, 20));
        assert_eq!(q.len(), 3);
        assert_eq!(q.latest().map(Order::id), Some(OrderId(1)));
        let ids: Vec<i64> = q.drain_ascending().iter().map(|o| o.id().0).collect();
        assert_eq!(ids, [2, 3, 1]);
        assert!(q.is_empty());
    }

    #[test]
    fn latest_prefers_last_pushed_on_tie() {
        let mut q = DeliveryQueue::new();
        q.push(order(1, 10));
        q.push(order(2, 10));
        assert_eq!(q.len(), 2);
        assert_eq!(q.latest().map(Order::id), Some(OrderId(2)));
    }
}
