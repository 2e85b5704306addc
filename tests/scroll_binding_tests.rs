use std::f32::consts::PI;

use scroll_showcase::core::Viewport;
use scroll_showcase::math::Color;
use scroll_showcase::page::PageLayout;
use scroll_showcase::scene::NodeId;
use scroll_showcase::AppState;

const WIDTH: f32 = 1000.0;
const HEIGHT: f32 = 800.0;
/// Document is 4.5 viewports tall
const MAX_SCROLL: f32 = 3.5 * HEIGHT;
/// section1 top reaches the viewport center
const REGION1_START: f32 = 400.0;
const REGION1_END: f32 = 1200.0;

fn bootstrap() -> AppState {
    AppState::bootstrap(Viewport::new(WIDTH, HEIGHT, 1.0), PageLayout::default()).unwrap()
}

fn transform(state: &AppState, id: NodeId) -> scroll_showcase::scene::Transform {
    state.scene().node(id).unwrap().transform
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

fn approx_color(a: Color, b: Color) -> bool {
    approx(a.r, b.r) && approx(a.g, b.g) && approx(a.b, b.b)
}

/// section3 top reaches the viewport center
const REGION3_START: f32 = 2000.0;
const REGION3_END: f32 = 2800.0;

#[cfg(test)]
mod scroll_binding_tests {
    use super::*;

    #[test]
    fn test_region1_rotation_and_scale_follow_fraction() {
        let mut state = bootstrap();
        let cube = state.nodes.cube;

        for step in 0..=10 {
            let f = step as f32 / 10.0;
            let offset = REGION1_START + f * (REGION1_END - REGION1_START);
            state.scroll_to(offset);
            let t = transform(&state, cube);
            let document_fraction = offset / MAX_SCROLL;

            assert!(approx(t.rotation.x, f * 2.0 * PI), "rotation.x at f={}", f);
            // y also carries the whole-document spin
            assert!(approx(t.rotation.y, f * 2.0 * PI + document_fraction * 4.0 * PI));
            if f < 1.0 {
                assert!(approx(t.scale.x, 1.0 + f * 0.5), "scale at f={}", f);
                assert_eq!(t.scale.x, t.scale.z);
            }
        }
    }

    #[test]
    fn test_before_region1_nothing_moves() {
        let mut state = bootstrap();
        let cube = state.nodes.cube;
        state.scroll_to(REGION1_START);
        let t = transform(&state, cube);
        assert_eq!(t.rotation.x, 0.0);
        assert_eq!(t.scale.x, 1.0);
    }

    #[test]
    fn test_cube_hides_at_region2_start_and_restores() {
        let mut state = bootstrap();
        let cube = state.nodes.cube;

        state.scroll_to(REGION1_END - 1.0);
        let before = transform(&state, cube).scale.x;
        assert!(before > 1.49);

        state.scroll_to(REGION1_END);
        assert_eq!(transform(&state, cube).scale.x, 0.0);
        assert!(!state.scene().node(cube).unwrap().is_visible());

        state.scroll_to(REGION1_END - 1.0);
        assert_eq!(transform(&state, cube).scale.x, before);
    }

    #[test]
    fn test_camera_z_is_linear_over_document() {
        let mut state = bootstrap();
        let mut last = f32::INFINITY;
        for step in 0..=20 {
            let f = step as f32 / 20.0;
            state.scroll_to(f * MAX_SCROLL);
            let z = state.camera().position.z;
            assert!(approx(z, 5.0 - 2.0 * f), "z at f={}", f);
            assert!(z < last);
            last = z;
        }
        assert!(approx(last, 3.0));
    }

    #[test]
    fn test_section2_sphere_bindings() {
        let mut state = bootstrap();
        let sphere = state.nodes.sphere;
        // section2 spans offsets 1200..2000
        state.scroll_to(1600.0);
        let node = state.scene().node(sphere).unwrap();
        assert!(approx(node.transform.position.y, 0.75));
        assert!(approx(node.transform.scale.x, 1.15));
        // red shifts toward yellow: green rises, red stays
        assert!(node.material.color.g > 0.4);
        assert!(approx(node.material.color.r, 1.0));

        state.scroll_to(2000.0);
        assert_eq!(state.scene().node(sphere).unwrap().transform.scale.x, 0.0);
    }

    #[test]
    fn test_torus_hidden_only_at_document_end() {
        let mut state = bootstrap();
        let torus = state.nodes.torus;
        state.scroll_to(MAX_SCROLL - 0.5);
        assert!(state.scene().node(torus).unwrap().is_visible());
        assert!(transform(&state, torus).position.y < -0.99);
        state.scroll_to_end();
        assert!(!state.scene().node(torus).unwrap().is_visible());
    }

    #[test]
    fn test_round_trip_restores_initial_values() {
        let mut state = bootstrap();
        let scene = state.scene().clone();
        let camera = *state.camera();

        let mut offset = 0.0;
        while offset < MAX_SCROLL {
            offset += 37.0;
            state.scroll_to(offset);
        }
        assert_eq!(state.scroll.offset(), MAX_SCROLL);
        while state.scroll_by(-53.0) {}

        assert_eq!(state.scroll.offset(), 0.0);
        assert_eq!(state.scene(), &scene);
        assert_eq!(state.camera(), &camera);
    }

    #[test]
    fn test_jump_scroll_matches_incremental_scroll() {
        let mut stepped = bootstrap();
        for _ in 0..30 {
            stepped.scroll_by(70.0);
        }
        let mut jumped = bootstrap();
        jumped.scroll_to(stepped.scroll.offset());
        assert_eq!(stepped.scene(), jumped.scene());
    }

    #[test]
    fn test_region2_sphere_emissive_end_value() {
        let mut state = bootstrap();
        let sphere = state.nodes.sphere;
        state.scroll_to(2000.0);
        let material = state.scene().node(sphere).unwrap().material;
        assert!(approx_color(material.color, Color::from_hex(0xffff00)), "{:?}", material.color);
        assert!(
            approx_color(material.emissive, Color::from_hex(0x444400)),
            "{:?}",
            material.emissive
        );
    }

    #[test]
    fn test_region3_torus_bindings() {
        let mut state = bootstrap();
        let torus = state.nodes.torus;
        let blue = Color::from_hex(0x0000ff);
        let magenta = Color::from_hex(0xff00ff);
        let dark_blue = Color::from_hex(0x000044);
        let dark_magenta = Color::from_hex(0x440044);

        for f in [0.5f32, 1.0] {
            let offset = REGION3_START + f * (REGION3_END - REGION3_START);
            state.scroll_to(offset);
            let node = state.scene().node(torus).unwrap();
            let t = node.transform;

            assert!(approx(t.rotation.x, f * 2.0 * PI), "rotation.x at f={}", f);
            assert!(approx(t.rotation.z, f * 2.0 * PI), "rotation.z at f={}", f);
            // y carries only the whole-document spin
            assert!(approx(t.rotation.y, offset / MAX_SCROLL * 4.0 * PI), "rotation.y at f={}", f);
            assert!(approx(t.position.y, -f), "position.y at f={}", f);
            assert!(
                approx_color(node.material.color, blue.lerp(magenta, f)),
                "color at f={}: {:?}",
                f,
                node.material.color
            );
            assert!(
                approx_color(node.material.emissive, dark_blue.lerp(dark_magenta, f)),
                "emissive at f={}: {:?}",
                f,
                node.material.emissive
            );
        }
    }

    #[test]
    fn test_document_spin_on_sphere_and_torus() {
        let mut state = bootstrap();
        let (sphere, torus) = (state.nodes.sphere, state.nodes.torus);
        for step in 0..=8 {
            let offset = step as f32 / 8.0 * MAX_SCROLL;
            state.scroll_to(offset);
            let spin = offset / MAX_SCROLL * 4.0 * PI;
            assert!(approx(transform(&state, sphere).rotation.y, spin), "sphere at {}", offset);
            assert!(approx(transform(&state, torus).rotation.y, spin), "torus at {}", offset);
        }
    }
}
