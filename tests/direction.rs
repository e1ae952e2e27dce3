mod common;

mod tests {
    use myrtio_ring_chaser::{
        ChaserConfig, ChaserState, DebouncePhase, Direction, DirectionController, Duration,
        EdgeOutcome,
    };

    use crate::common::{MockEdges, MockTimer};

    const DEBOUNCE: Duration = Duration::from_millis(200);

    #[test]
    fn test_controller_starts_armed_with_edges_enabled() {
        let state = ChaserState::new(500);
        let controller =
            DirectionController::new(&state, MockEdges::default(), MockTimer::default(), DEBOUNCE);

        assert_eq!(controller.phase(), DebouncePhase::Armed);
        assert!(controller.edges().enabled);
        assert_eq!(state.direction(), Direction::Forward);
    }

    #[test]
    fn test_edge_flips_once_and_enters_cooldown() {
        let state = ChaserState::new(500);
        let mut controller =
            DirectionController::new(&state, MockEdges::default(), MockTimer::default(), DEBOUNCE);

        assert_eq!(
            controller.on_edge(),
            EdgeOutcome::Flipped(Direction::Backward)
        );
        assert_eq!(controller.phase(), DebouncePhase::Cooldown);
        assert_eq!(state.direction(), Direction::Backward);
        assert!(!controller.edges().enabled);
        assert_eq!(controller.timer().scheduled, vec![DEBOUNCE]);
    }

    #[test]
    fn test_bounce_during_cooldown_is_dropped() {
        let state = ChaserState::new(500);
        let mut controller =
            DirectionController::new(&state, MockEdges::default(), MockTimer::default(), DEBOUNCE);

        controller.on_edge();
        for _ in 0..10 {
            assert_eq!(controller.on_edge(), EdgeOutcome::Ignored);
        }

        assert_eq!(state.direction(), Direction::Backward);
        assert_eq!(controller.timer().scheduled.len(), 1);
        assert_eq!(controller.edges().disable_calls, 1);
    }

    #[test]
    fn test_timer_rearms_and_next_edge_flips_again() {
        let state = ChaserState::new(500);
        let mut controller =
            DirectionController::new(&state, MockEdges::default(), MockTimer::default(), DEBOUNCE);

        controller.on_edge();
        assert!(controller.on_timer_fired());
        assert_eq!(controller.phase(), DebouncePhase::Armed);
        assert!(controller.edges().enabled);

        assert_eq!(
            controller.on_edge(),
            EdgeOutcome::Flipped(Direction::Forward)
        );
        assert_eq!(state.direction(), Direction::Forward);
        assert_eq!(controller.timer().scheduled.len(), 2);
    }

    #[test]
    fn test_spurious_timer_while_armed_is_noop() {
        let state = ChaserState::new(500);
        let mut controller =
            DirectionController::new(&state, MockEdges::default(), MockTimer::default(), DEBOUNCE);

        assert!(!controller.on_timer_fired());
        assert_eq!(controller.edges().enable_calls, 1);
        assert_eq!(controller.phase(), DebouncePhase::Armed);
    }

    #[test]
    fn test_reference_debounce_is_scheduled() {
        let config = ChaserConfig::REFERENCE;
        let state = ChaserState::new(config.initial_period_ms);
        let mut controller = DirectionController::new(
            &state,
            MockEdges::default(),
            MockTimer::default(),
            config.debounce,
        );

        controller.on_edge();
        assert_eq!(controller.timer().scheduled, vec![config.debounce]);
    }
}
