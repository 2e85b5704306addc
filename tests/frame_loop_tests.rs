use scroll_showcase::core::{InputAction, ScrollTarget, Viewport};
use scroll_showcase::frame::FrameInfo;
use scroll_showcase::page::PageLayout;
use scroll_showcase::scene::IDLE_AMPLITUDE;
use scroll_showcase::AppState;

fn bootstrap(width: f32, height: f32) -> AppState {
    AppState::bootstrap(Viewport::new(width, height, 1.0), PageLayout::default()).unwrap()
}

fn frame(number: u64, time: f64) -> FrameInfo {
    FrameInfo::new(number, time, 1.0 / 60.0)
}

#[cfg(test)]
mod idle_motion_tests {
    use super::*;

    #[test]
    fn test_bob_follows_time_and_phase() {
        let mut state = bootstrap(1000.0, 800.0);
        for (i, time) in [0.0, 0.4, 1.3, 2.9].into_iter().enumerate() {
            state.tick(&frame(i as u64, time));
            for (phase, id) in state.nodes.all().into_iter().enumerate() {
                let node = state.scene().node(id).unwrap();
                let expected = (time as f32 + phase as f32).sin() * IDLE_AMPLITUDE;
                assert!(
                    (node.idle_offset - expected).abs() < 1e-5,
                    "{} at t={}: {} vs {}",
                    node.name,
                    time,
                    node.idle_offset,
                    expected
                );
            }
        }
    }

    #[test]
    fn test_bob_is_independent_of_scroll() {
        let mut state = bootstrap(1000.0, 800.0);
        let sphere = state.nodes.sphere;
        state.tick(&frame(0, 0.5));
        let offset = state.scene().node(sphere).unwrap().idle_offset;

        state.scroll_to(1600.0);
        let node = state.scene().node(sphere).unwrap();
        assert_eq!(node.idle_offset, offset, "scrolling must not touch the bob");
        assert!((node.world_position().y - (0.75 + offset)).abs() < 1e-5);
    }

    #[test]
    fn test_hidden_nodes_stop_bobbing() {
        let mut state = bootstrap(1000.0, 800.0);
        let cube = state.nodes.cube;
        state.tick(&frame(0, 1.0));
        let frozen = state.scene().node(cube).unwrap().idle_offset;

        state.scroll_to(1300.0);
        state.tick(&frame(1, 2.0));
        assert_eq!(state.scene().node(cube).unwrap().idle_offset, frozen);

        state.scroll_to(0.0);
        state.tick(&frame(2, 2.0));
        let resumed = state.scene().node(cube).unwrap().idle_offset;
        assert!((resumed - 2.0f32.sin() * IDLE_AMPLITUDE).abs() < 1e-5);
    }
}

#[cfg(test)]
mod resize_tests {
    use super::*;

    #[test]
    fn test_resize_updates_aspect_and_buffer() {
        let mut state = bootstrap(1000.0, 800.0);
        let viewport = Viewport::new(500.0, 1000.0, 3.0);
        state.resize(viewport);

        assert_eq!(state.camera().aspect, 0.5);
        assert_eq!(viewport.drawing_buffer_size(), (1000, 2000), "pixel ratio caps at 2");
        assert_eq!(state.scroll.max(), 3500.0);
    }

    #[test]
    fn test_resize_recomputes_trigger_positions() {
        let mut state = bootstrap(1000.0, 800.0);
        let cube = state.nodes.cube;
        state.scroll_to(1300.0);
        assert!(!state.scene().node(cube).unwrap().is_visible());

        // section2 now reaches the viewport center at 1500
        state.resize(Viewport::new(1000.0, 1000.0, 1.0));
        assert_eq!(state.scroll.offset(), 1300.0);
        assert!(state.scene().node(cube).unwrap().is_visible());
        let progress = state.timeline.progress("cube-scale").unwrap();
        assert!((progress - 0.8).abs() < 1e-5);
    }
}

#[cfg(test)]
mod interaction_tests {
    use super::*;

    #[test]
    fn test_orbit_survives_scroll() {
        let mut state = bootstrap(1000.0, 800.0);
        state.apply(InputAction::Orbit(200.0, 0.0));
        for i in 0..120 {
            state.tick(&frame(i, i as f64 / 60.0));
        }
        let x = state.camera().position.x;
        assert!(x.abs() > 0.5, "camera should have orbited, x = {}", x);

        state.apply(InputAction::ScrollBy(140.0));
        assert_eq!(state.camera().position.x, x);
        assert!((state.camera().position.z - (5.0 - 2.0 * 140.0 / 2800.0)).abs() < 1e-5);
    }

    #[test]
    fn test_dolly_respects_distance_limits() {
        let mut state = bootstrap(1000.0, 800.0);
        for _ in 0..200 {
            state.apply(InputAction::Dolly(-1.0));
        }
        for i in 0..300 {
            state.tick(&frame(i, 0.0));
        }
        let distance = state.camera().position.length();
        assert!(distance <= 15.0 + 1e-3, "distance {}", distance);
        assert!(distance > 14.0);
    }

    #[test]
    fn test_home_and_end() {
        let mut state = bootstrap(1000.0, 800.0);
        state.apply(InputAction::ScrollTo(ScrollTarget::End));
        assert_eq!(state.scroll.offset(), 2800.0);
        assert_eq!(state.section_at_center(), Some("outro"));
        state.apply(InputAction::ScrollTo(ScrollTarget::Home));
        assert_eq!(state.scroll.offset(), 0.0);
        assert_eq!(state.section_at_center(), Some("intro"));
    }
}
